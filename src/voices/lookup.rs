//! Voice lookup: filtered query, retry, seeded selection.

use super::select::select_voice;
use super::types::{QueryFilter, SharedVoicesPage, VoiceSelection};
use crate::client::require_non_blank;
use crate::resilience::RetryPolicy;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use tracing::info;

/// Source of shared voice pages.
#[async_trait]
pub trait VoiceLibrary: Send + Sync {
    /// Fetch one page of the shared voice library. Transport failures must surface as
    /// [`Error::Transport`] so the lookup can retry them.
    async fn shared_voices(&self, api_key: &str, filter: &QueryFilter) -> Result<SharedVoicesPage>;
}

/// Picks one shared voice for a seed.
pub struct VoiceLookup<L> {
    library: L,
    retry: RetryPolicy,
}

impl<L: VoiceLibrary> VoiceLookup<L> {
    pub fn new(library: L) -> Self {
        Self {
            library,
            retry: RetryPolicy::network_only(),
        }
    }

    /// Override the attempt budget and delay. Terminal errors (no results, malformed
    /// record) are never retried regardless of the policy passed here.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = RetryPolicy::network_only()
            .with_max_attempts(retry.max_attempts())
            .with_delay(retry.delay());
        self
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub async fn lookup(
        &self,
        api_key: &str,
        seed: u64,
        filter: &QueryFilter,
    ) -> Result<VoiceSelection> {
        let api_key = require_non_blank(api_key, "api_key", "voice_lookup")?;
        filter.validate()?;

        let library = &self.library;
        let selection = self
            .retry
            .run("voice lookup", move |_| async move {
                let page = library.shared_voices(api_key, filter).await?;
                choose(page, seed)
            })
            .await?;

        info!(
            candidates = selection.candidates,
            seed = selection.seed,
            name = %selection.name,
            voice_id = %selection.voice_id,
            "selected shared voice"
        );
        Ok(selection)
    }
}

fn choose(page: SharedVoicesPage, seed: u64) -> Result<VoiceSelection> {
    let candidates = page.voices.len();
    let record = select_voice(&page.voices, seed).ok_or_else(|| Error::NoResults {
        context: ErrorContext::new().with_source("voice_lookup"),
    })?;

    let voice_id = record
        .voice_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            Error::malformed_with_context(
                "selected voice has no voice_id",
                ErrorContext::new()
                    .with_field_path("voices[].voice_id")
                    .with_details(format!("name: {}", record.display_name())),
            )
        })?;

    Ok(VoiceSelection {
        voice_id: voice_id.to_string(),
        name: record.display_name().to_string(),
        candidates,
        seed,
    })
}
