//! TTS (Text-to-Speech) types.

use serde::{Deserialize, Serialize};

/// Synthesis model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelId {
    #[default]
    #[serde(rename = "eleven_multilingual_v2")]
    ElevenMultilingualV2,
    #[serde(rename = "eleven_monolingual_v1")]
    ElevenMonolingualV1,
    #[serde(rename = "eleven_turbo_v2")]
    ElevenTurboV2,
    #[serde(rename = "eleven_turbo_v2_5")]
    ElevenTurboV2_5,
}

impl ModelId {
    pub const ALL: [ModelId; 4] = [
        ModelId::ElevenMultilingualV2,
        ModelId::ElevenMonolingualV1,
        ModelId::ElevenTurboV2,
        ModelId::ElevenTurboV2_5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElevenMultilingualV2 => "eleven_multilingual_v2",
            Self::ElevenMonolingualV1 => "eleven_monolingual_v1",
            Self::ElevenTurboV2 => "eleven_turbo_v2",
            Self::ElevenTurboV2_5 => "eleven_turbo_v2_5",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s.trim())
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested encoding of the synthesized stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// MP3, 44.1 kHz, 128 kbps.
    #[default]
    Mp3_44100_128,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3_44100_128 => "mp3_44100_128",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3_44100_128 => "audio/mpeg",
        }
    }
}

/// One synthesis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: String,
    pub model_id: ModelId,
    pub output_format: OutputFormat,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>, model_id: ModelId) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            model_id,
            output_format: OutputFormat::default(),
        }
    }

    /// JSON request body; the voice and output format travel in the URL.
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "text": self.text,
            "model_id": self.model_id.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_ids_match_provider_names() {
        let names: Vec<_> = ModelId::ALL.iter().map(ModelId::as_str).collect();
        assert_eq!(
            names,
            vec![
                "eleven_multilingual_v2",
                "eleven_monolingual_v1",
                "eleven_turbo_v2",
                "eleven_turbo_v2_5"
            ]
        );
        assert_eq!(ModelId::default(), ModelId::ElevenMultilingualV2);
    }

    #[test]
    fn test_model_parse_and_serde_agree() {
        for model in ModelId::ALL {
            assert_eq!(ModelId::parse(model.as_str()), Some(model));
            assert_eq!(
                serde_json::to_value(model).unwrap(),
                serde_json::Value::String(model.as_str().to_string())
            );
        }
        assert_eq!(ModelId::parse("eleven_v3"), None);
    }

    #[test]
    fn test_request_body() {
        let req = SynthesisRequest::new("hello", "abc123", ModelId::ElevenTurboV2);
        assert_eq!(req.output_format.as_str(), "mp3_44100_128");
        assert_eq!(
            req.body(),
            serde_json::json!({"text": "hello", "model_id": "eleven_turbo_v2"})
        );
    }
}
