//! Compressed audio decode via symphonia.

use crate::{Error, Result};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

/// Decoded interleaved PCM.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: usize,
    /// Packets the decoder rejected and dropped.
    pub skipped_frames: usize,
}

/// Decode a complete MP3 byte buffer at its native sample rate.
pub fn decode_mp3(bytes: Vec<u8>) -> Result<DecodedAudio> {
    if bytes.is_empty() {
        return Err(Error::decode("empty audio payload"));
    }

    let cursor = std::io::Cursor::new(bytes);
    let mss = MediaSourceStream::new(Box::new(cursor), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    hint.with_extension("mp3").mime_type("audio/mpeg");

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::decode(e.to_string()))?;

    let mut format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| Error::decode("no audio track found"))?;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::decode("unknown sample rate"))?;
    let mut channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(1);
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| Error::decode(e.to_string()))?;

    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut samples: Vec<f32> = Vec::new();
    let mut skipped_frames = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(_)) | Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(Error::decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                channels = decoded.spec().channels.count().max(1);
                let sb = sample_buf.get_or_insert_with(|| {
                    SampleBuffer::new(decoded.capacity() as u64, *decoded.spec())
                });
                sb.copy_interleaved_ref(decoded);
                samples.extend_from_slice(sb.samples());
            }
            // a corrupt frame is skipped, as players do
            Err(SymphoniaError::IoError(e)) => {
                skipped_frames += 1;
                debug!(error = %e, "skipping unreadable mp3 frame");
            }
            Err(SymphoniaError::DecodeError(e)) => {
                skipped_frames += 1;
                debug!(error = e, "skipping undecodable mp3 frame");
            }
            Err(e) => return Err(Error::decode(e.to_string())),
        }
    }

    if samples.is_empty() {
        return Err(Error::decode("stream contained no decodable frames"));
    }

    if skipped_frames > 0 {
        warn!(
            skipped_frames,
            samples = samples.len(),
            "mp3 decode dropped frames; waveform is shorter than the stream"
        );
    }

    debug!(samples = samples.len(), sample_rate, channels, "decoded mp3");
    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
        skipped_frames,
    })
}

/// Average interleaved frames down to one channel.
pub fn downmix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// MPEG-1 Layer III, 128 kbps, 44.1 kHz, mono, no CRC. Zeroed side info decodes to
    /// 1152 samples of silence per frame.
    pub(crate) fn silent_mp3(frames: usize) -> Vec<u8> {
        const FRAME_LEN: usize = 417;
        let mut out = Vec::with_capacity(frames * FRAME_LEN);
        for _ in 0..frames {
            let mut frame = vec![0u8; FRAME_LEN];
            frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0xC4]);
            out.extend_from_slice(&frame);
        }
        out
    }

    #[test]
    fn test_decodes_silent_stream_at_native_rate() {
        let decoded = decode_mp3(silent_mp3(12)).unwrap();
        assert_eq!(decoded.sample_rate, 44_100);
        assert_eq!(decoded.channels, 1);
        assert!(!decoded.samples.is_empty());
        assert_eq!(decoded.samples.len() % 1152, 0);
        assert!(decoded.samples.iter().all(|s| s.abs() < 1e-6));
    }

    #[test]
    fn test_clean_stream_skips_nothing() {
        assert_eq!(decode_mp3(silent_mp3(4)).unwrap().skipped_frames, 0);
    }

    #[test]
    fn test_channel_mode_switch_reports_dropped_frames() {
        // five mono frames, then five stereo frames the mono decoder rejects
        let mut bytes = silent_mp3(5);
        for _ in 0..5 {
            let mut frame = vec![0u8; 417];
            frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x04]);
            bytes.extend_from_slice(&frame);
        }
        let decoded = decode_mp3(bytes).unwrap();
        assert_eq!(decoded.channels, 1);
        assert!(decoded.skipped_frames > 0);
        assert!(decoded.samples.len() < 10 * 1152);
    }

    #[test]
    fn test_rejects_empty_and_garbage() {
        assert!(matches!(decode_mp3(Vec::new()), Err(Error::Decode { .. })));
        assert!(matches!(
            decode_mp3(b"definitely not audio".to_vec()),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn test_downmix_averages_frames() {
        let stereo = [1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        assert_eq!(downmix_to_mono(&stereo, 2), vec![0.5, 0.5, 0.0]);
        assert_eq!(downmix_to_mono(&[0.25, 0.75], 1), vec![0.25, 0.75]);
    }
}
