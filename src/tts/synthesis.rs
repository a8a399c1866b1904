//! Speech synthesis: request, drain, decode, reshape, all under one retry.

use super::types::{ModelId, SynthesisRequest};
use crate::audio::{decode_mp3, AudioBuffer};
use crate::client::require_non_blank;
use crate::resilience::RetryPolicy;
use crate::{BoxStream, Error, ErrorContext, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use tracing::info;

/// Producer of encoded audio chunks for a synthesis request.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn convert(
        &self,
        api_key: &str,
        request: &SynthesisRequest,
    ) -> Result<BoxStream<'static, Bytes>>;
}

/// Turns text into an [`AudioBuffer`].
pub struct SpeechSynthesis<B> {
    backend: B,
    retry: RetryPolicy,
}

impl<B: SpeechBackend> SpeechSynthesis<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            retry: RetryPolicy::any_failure(),
        }
    }

    /// Override the attempt budget and delay. Every failure stays retryable.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = RetryPolicy::any_failure()
            .with_max_attempts(retry.max_attempts())
            .with_delay(retry.delay());
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn synthesize(
        &self,
        api_key: &str,
        text: &str,
        voice_id: &str,
        model_id: ModelId,
    ) -> Result<AudioBuffer> {
        let api_key = require_non_blank(api_key, "api_key", "speech_synthesis")?;
        let voice_id = require_non_blank(voice_id, "voice_id", "speech_synthesis").map_err(|_| {
            Error::configuration_with_context(
                "voice_id must not be empty; provide one or connect a voice query node",
                ErrorContext::new()
                    .with_field_path("voice_id")
                    .with_source("speech_synthesis"),
            )
        })?;
        if text.trim().is_empty() {
            return Err(Error::validation_with_context(
                "text must not be empty",
                ErrorContext::new()
                    .with_field_path("text")
                    .with_source("speech_synthesis"),
            ));
        }

        let request = SynthesisRequest::new(text, voice_id, model_id);
        let backend = &self.backend;
        let req = &request;
        let audio = self
            .retry
            .run("speech synthesis", move |_| async move {
                let encoded = drain(backend.convert(api_key, req).await?).await?;
                let decoded = decode_mp3(encoded)?;
                Ok(AudioBuffer::from_decoded(decoded))
            })
            .await?;

        info!(
            voice_id = %request.voice_id,
            model_id = %request.model_id,
            samples = audio.num_samples(),
            sample_rate = audio.sample_rate(),
            "synthesized speech"
        );
        Ok(audio)
    }
}

/// Collect every chunk into one owned buffer; decoding needs random access.
async fn drain(mut chunks: BoxStream<'static, Bytes>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    while let Some(chunk) = chunks.try_next().await? {
        buf.extend_from_slice(&chunk);
    }
    if buf.is_empty() {
        return Err(Error::synthesis_with_context(
            "provider returned an empty audio stream",
            ErrorContext::new().with_source("speech_synthesis"),
        ));
    }
    Ok(buf)
}
