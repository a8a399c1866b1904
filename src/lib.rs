//! # elevenlabs-nodes
//!
//! ElevenLabs shared-voice lookup and text-to-speech nodes for node-based media hosts.
//!
//! ## Overview
//!
//! The crate provides two independent request/response components:
//!
//! - **Voice lookup**: queries the shared voice library with optional facet filters and
//!   picks one voice deterministically from a caller-supplied seed.
//! - **Speech synthesis**: turns text into speech with a chosen voice and model, and decodes
//!   the returned MP3 stream into a mono waveform shaped `[1, 1, N]`.
//!
//! Both run under a fixed linear retry loop. The lookup retries only network failures, while
//! synthesis retries anything that goes wrong between the request and the decoded buffer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use elevenlabs_nodes::voices::Gender;
//! use elevenlabs_nodes::{ElevenLabsClient, ModelId, QueryFilter};
//!
//! #[tokio::main]
//! async fn main() -> elevenlabs_nodes::Result<()> {
//!     let client = ElevenLabsClient::builder().build()?;
//!     let api_key = std::env::var("ELEVENLABS_API_KEY").unwrap_or_default();
//!
//!     let filter = QueryFilter::new().gender(Gender::Female).language("en");
//!     let selection = client.voice_lookup().lookup(&api_key, 42, &filter).await?;
//!
//!     let audio = client
//!         .speech_synthesis()
//!         .synthesize(&api_key, "Hello there.", &selection.voice_id, ModelId::ElevenTurboV2)
//!         .await?;
//!     println!("{:?} @ {} Hz", audio.shape(), audio.sample_rate());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Client configuration (defaults, env overrides, YAML) |
//! | [`client`] | HTTP client and builder |
//! | [`transport`] | reqwest transport and transport errors |
//! | [`resilience`] | Linear retry policies |
//! | [`voices`] | Shared voice library query and seeded selection |
//! | [`tts`] | Text-to-speech synthesis |
//! | [`audio`] | MP3 decode and the host audio buffer |
//! | [`nodes`] | Node descriptors, input parsing and dispatch |

pub mod audio;
pub mod client;
pub mod config;
pub mod nodes;
pub mod resilience;
pub mod transport;
pub mod tts;
pub mod voices;

pub use audio::AudioBuffer;
pub use client::{ElevenLabsClient, ElevenLabsClientBuilder};
pub use config::ClientConfig;
pub use nodes::{NodeOutput, NodeRegistry};
pub use resilience::{RetryPolicy, RetryScope};
pub use tts::{ModelId, OutputFormat, SpeechBackend, SpeechSynthesis, SynthesisRequest};
pub use voices::{QueryFilter, VoiceLibrary, VoiceLookup, VoiceRecord, VoiceSelection};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
