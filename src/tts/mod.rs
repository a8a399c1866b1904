//! TTS（文字转语音）模块：按 voice_id 与模型合成语音并解码为波形。
//!
//! Text-to-speech: model selectors, request shape, and the retrying synthesis pipeline.

mod synthesis;
mod types;

pub use synthesis::{SpeechBackend, SpeechSynthesis};
pub use types::{ModelId, OutputFormat, SynthesisRequest};
