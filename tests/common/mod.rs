//! Mock HTTP server setup for integration tests

#![allow(dead_code)]

use elevenlabs_nodes::{ClientConfig, ElevenLabsClient};
use mockito::{Matcher, Mock, Server, ServerGuard};

/// Test fixture that manages a mock ElevenLabs server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client pointed at the mock server, with retry delays disabled.
    pub fn client(&self) -> ElevenLabsClient {
        ElevenLabsClient::builder()
            .config(ClientConfig {
                base_url: self.base_url.clone(),
                retry_delay_ms: 0,
                timeout_secs: 10,
                ..ClientConfig::default()
            })
            .build()
            .expect("client should build against mock server")
    }

    /// `GET /v1/shared-voices` answering with `body`.
    pub async fn mock_shared_voices(
        &mut self,
        query: Matcher,
        status: usize,
        body: &str,
        hits: usize,
    ) -> Mock {
        self.server
            .mock("GET", "/v1/shared-voices")
            .match_header("xi-api-key", "test-key")
            .match_query(query)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    /// `POST /v1/text-to-speech/{voice_id}` streaming `audio` back.
    pub async fn mock_tts(
        &mut self,
        voice_id: &str,
        status: usize,
        audio: Vec<u8>,
        hits: usize,
    ) -> Mock {
        self.server
            .mock("POST", format!("/v1/text-to-speech/{}", voice_id).as_str())
            .match_header("xi-api-key", "test-key")
            .match_query(Matcher::UrlEncoded(
                "output_format".into(),
                "mp3_44100_128".into(),
            ))
            .with_status(status)
            .with_header("content-type", "audio/mpeg")
            .with_body(audio)
            .expect(hits)
            .create_async()
            .await
    }
}

pub fn voices_body(ids: &[&str]) -> String {
    let voices: Vec<_> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "voice_id": id,
                "name": format!("Voice {}", id),
                "gender": "female"
            })
        })
        .collect();
    serde_json::json!({"voices": voices, "has_more": false}).to_string()
}

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, mono. Zeroed side info decodes to silence.
pub fn silent_mp3(frames: usize) -> Vec<u8> {
    const FRAME_LEN: usize = 417;
    let mut out = Vec::with_capacity(frames * FRAME_LEN);
    for _ in 0..frames {
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0xC4]);
        out.extend_from_slice(&frame);
    }
    out
}
