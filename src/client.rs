//! ElevenLabs HTTP client.
//!
//! One [`ElevenLabsClient`] serves both nodes: it implements [`VoiceLibrary`] against
//! `GET /v1/shared-voices` and [`SpeechBackend`] against `POST /v1/text-to-speech/{voice_id}`.
//! The credential is passed per call, as the host hands it to each node invocation.

pub mod builder;

pub use builder::ElevenLabsClientBuilder;

use crate::config::ClientConfig;
use crate::transport::HttpTransport;
use crate::tts::{SpeechBackend, SpeechSynthesis, SynthesisRequest};
use crate::voices::{QueryFilter, SharedVoicesPage, VoiceLibrary, VoiceLookup};
use crate::{BoxStream, Error, ErrorContext, Result};
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Clone)]
pub struct ElevenLabsClient {
    transport: HttpTransport,
    config: ClientConfig,
}

impl ElevenLabsClient {
    pub fn builder() -> ElevenLabsClientBuilder {
        ElevenLabsClientBuilder::new()
    }

    pub(crate) fn from_parts(transport: HttpTransport, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Voice lookup bound to this client and its configured retry budget.
    pub fn voice_lookup(&self) -> VoiceLookup<ElevenLabsClient> {
        VoiceLookup::new(self.clone()).with_retry(self.config.lookup_retry())
    }

    /// Speech synthesis bound to this client and its configured retry budget.
    pub fn speech_synthesis(&self) -> SpeechSynthesis<ElevenLabsClient> {
        SpeechSynthesis::new(self.clone()).with_retry(self.config.synthesis_retry())
    }
}

#[async_trait]
impl VoiceLibrary for ElevenLabsClient {
    async fn shared_voices(&self, api_key: &str, filter: &QueryFilter) -> Result<SharedVoicesPage> {
        let query = filter.to_query();
        self.transport
            .get_json(&["v1", "shared-voices"], api_key, &query)
            .await
    }
}

#[async_trait]
impl SpeechBackend for ElevenLabsClient {
    async fn convert(
        &self,
        api_key: &str,
        request: &SynthesisRequest,
    ) -> Result<BoxStream<'static, Bytes>> {
        let query = [("output_format", request.output_format.as_str().to_string())];
        self.transport
            .post_stream(
                &["v1", "text-to-speech", request.voice_id.as_str()],
                api_key,
                &query,
                &request.body(),
            )
            .await
    }
}

/// Trimmed `value`, or a configuration error naming `field` when it is blank.
pub(crate) fn require_non_blank<'a>(value: &'a str, field: &str, source: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::configuration_with_context(
            format!("{} must not be empty", field),
            ErrorContext::new()
                .with_field_path(field)
                .with_source(source),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_blank_trims() {
        assert_eq!(require_non_blank("  key ", "api_key", "t").unwrap(), "key");
        let err = require_non_blank(" \t", "api_key", "t").unwrap_err();
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("api_key")
        );
    }
}
