use super::ElevenLabsClient;
use crate::config::ClientConfig;
use crate::transport::HttpTransport;
use crate::Result;

/// Builder for [`ElevenLabsClient`].
///
/// Starts from [`ClientConfig::from_env`]; explicit setters win over the environment.
pub struct ElevenLabsClientBuilder {
    config: ClientConfig,
}

impl ElevenLabsClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::from_env(),
        }
    }

    /// Replace the whole configuration (environment overrides are not re-applied).
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Override base URL (primarily for testing with mock servers)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(url.into());
        self
    }

    pub fn max_attempts(mut self, n: u32) -> Self {
        self.config.max_attempts = n.max(1);
        self
    }

    pub fn retry_delay_ms(mut self, ms: u64) -> Self {
        self.config.retry_delay_ms = ms;
        self
    }

    pub fn build(self) -> Result<ElevenLabsClient> {
        let transport = HttpTransport::new(&self.config)?;
        Ok(ElevenLabsClient::from_parts(transport, self.config))
    }
}

impl Default for ElevenLabsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
