//! Audio decode and the host-facing audio buffer.

mod buffer;
pub mod decode;

pub use buffer::AudioBuffer;
pub use decode::{decode_mp3, DecodedAudio};
