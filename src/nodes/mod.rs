//! 节点模块：节点描述、输入解析与按名称分发。
//!
//! Host-facing nodes.
//!
//! | Node | Inputs | Output |
//! |------|--------|--------|
//! | `ElevenLabsVoiceQuery` | `api_key`, `seed`, facets, `page_size` | `voice_id: STRING` |
//! | `ElevenLabsTTS` | `text`, `voice_id`, `model_id`, `api_key` | `audio: AUDIO` |
//!
//! A host hands each node its keyword inputs as a JSON object and gets back an ordered
//! list of outputs. Facet inputs use the `"all"` sentinel for "no filter"; this module is
//! the only place that sentinel is understood.

mod inputs;
pub mod schema;

pub use inputs::NodeInputs;
pub use schema::{InputField, InputSpec, NodeDescriptor};

use crate::audio::AudioBuffer;
use crate::client::ElevenLabsClient;
use crate::tts::{ModelId, SpeechBackend, SpeechSynthesis};
use crate::voices::{
    Age, Category, Descriptive, Gender, QueryFilter, UseCase, VoiceLibrary, VoiceLookup,
    MAX_PAGE_SIZE,
};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};

pub const CATEGORY: &str = "audio/ElevenLabs";
pub const VOICE_QUERY_NODE: &str = "ElevenLabsVoiceQuery";
pub const TTS_NODE: &str = "ElevenLabsTTS";

const DEFAULT_TEXT: &str = "The first move is what sets everything in motion.";

/// One value of a node's ordered result.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOutput {
    String(String),
    Audio(AudioBuffer),
}

impl NodeOutput {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::String(_) => "STRING",
            Self::Audio(_) => "AUDIO",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_audio(&self) -> Option<&AudioBuffer> {
        match self {
            Self::Audio(a) => Some(a),
            _ => None,
        }
    }
}

#[async_trait]
pub trait Node: Send + Sync {
    fn descriptor(&self) -> &NodeDescriptor;

    /// Run once. Returns exactly `descriptor().return_types.len()` outputs.
    async fn execute(&self, inputs: &Map<String, Value>) -> Result<Vec<NodeOutput>>;
}

/// Shared voice library query.
pub struct VoiceQueryNode<L> {
    lookup: VoiceLookup<L>,
    descriptor: NodeDescriptor,
}

impl<L: VoiceLibrary> VoiceQueryNode<L> {
    pub fn new(lookup: VoiceLookup<L>) -> Self {
        Self {
            lookup,
            descriptor: voice_query_descriptor(),
        }
    }

    /// Build the filter from host inputs.
    pub fn filter_from(inputs: &NodeInputs<'_>) -> Result<QueryFilter> {
        Ok(QueryFilter {
            category: inputs.facet("category", Category::parse)?,
            gender: inputs.facet("gender", Gender::parse)?,
            age: inputs.facet("age", Age::parse)?,
            language: inputs.facet("language", |s| Some(s.to_string()))?,
            locale: inputs.facet("locale", |s| Some(s.to_string()))?,
            use_case: inputs.facet("use_cases", UseCase::parse)?,
            descriptive: inputs.facet("descriptive", Descriptive::parse)?,
            page_size: inputs.int("page_size")? as u32,
        })
    }
}

pub fn voice_query_descriptor() -> NodeDescriptor {
    fn names<T: std::fmt::Display>(all: &[T]) -> Vec<String> {
        let mut v: Vec<String> = all.iter().map(|x| x.to_string()).collect();
        v.sort();
        v
    }

    NodeDescriptor {
        name: VOICE_QUERY_NODE,
        display_name: "ElevenLabs Voice Query",
        category: CATEGORY,
        function: "query_voices",
        required: vec![
            InputField::new("api_key", InputSpec::string("")),
            InputField::new("seed", InputSpec::int(0, 0, u64::MAX)),
        ],
        optional: vec![
            InputField::new("category", InputSpec::facet(names(Category::ALL))),
            InputField::new("gender", InputSpec::facet(names(Gender::ALL))),
            InputField::new("age", InputSpec::facet(names(Age::ALL))),
            InputField::new("language", InputSpec::facet(schema::LANGUAGES.iter().copied())),
            InputField::new("locale", InputSpec::facet(schema::LOCALES.iter().copied())),
            InputField::new("use_cases", InputSpec::facet(names(UseCase::ALL))),
            InputField::new("descriptive", InputSpec::facet(names(Descriptive::ALL))),
            InputField::new(
                "page_size",
                InputSpec::int(MAX_PAGE_SIZE as u64, 1, MAX_PAGE_SIZE as u64),
            ),
        ],
        return_types: vec!["STRING"],
        return_names: vec!["voice_id"],
    }
}

#[async_trait]
impl<L: VoiceLibrary> Node for VoiceQueryNode<L> {
    fn descriptor(&self) -> &NodeDescriptor {
        &self.descriptor
    }

    async fn execute(&self, inputs: &Map<String, Value>) -> Result<Vec<NodeOutput>> {
        let inputs = NodeInputs::new(inputs, &self.descriptor);
        let api_key = inputs.string("api_key")?;
        let seed = inputs.int("seed")?;
        let filter = Self::filter_from(&inputs)?;
        let selection = self.lookup.lookup(&api_key, seed, &filter).await?;
        Ok(vec![NodeOutput::String(selection.voice_id)])
    }
}

/// Text-to-speech.
pub struct TextToSpeechNode<B> {
    synthesis: SpeechSynthesis<B>,
    descriptor: NodeDescriptor,
}

impl<B: SpeechBackend> TextToSpeechNode<B> {
    pub fn new(synthesis: SpeechSynthesis<B>) -> Self {
        Self {
            synthesis,
            descriptor: tts_descriptor(),
        }
    }
}

pub fn tts_descriptor() -> NodeDescriptor {
    NodeDescriptor {
        name: TTS_NODE,
        display_name: "ElevenLabs TTS",
        category: CATEGORY,
        function: "generate",
        required: vec![
            InputField::new("text", InputSpec::multiline(DEFAULT_TEXT)),
            InputField::new("voice_id", InputSpec::string("")),
            InputField::new(
                "model_id",
                InputSpec::choice(
                    ModelId::ALL.iter().map(ModelId::as_str),
                    ModelId::default().as_str(),
                ),
            ),
            InputField::new("api_key", InputSpec::string("")),
        ],
        optional: Vec::new(),
        return_types: vec!["AUDIO"],
        return_names: vec!["audio"],
    }
}

#[async_trait]
impl<B: SpeechBackend> Node for TextToSpeechNode<B> {
    fn descriptor(&self) -> &NodeDescriptor {
        &self.descriptor
    }

    async fn execute(&self, inputs: &Map<String, Value>) -> Result<Vec<NodeOutput>> {
        let inputs = NodeInputs::new(inputs, &self.descriptor);
        let text = inputs.string("text")?;
        let voice_id = inputs.string("voice_id")?;
        let model = inputs.choice("model_id")?;
        let model_id = ModelId::parse(&model).ok_or_else(|| {
            Error::validation_with_context(
                format!("unsupported model '{}'", model),
                ErrorContext::new().with_field_path("inputs.model_id"),
            )
        })?;
        let api_key = inputs.string("api_key")?;
        let audio = self
            .synthesis
            .synthesize(&api_key, &text, &voice_id, model_id)
            .await?;
        Ok(vec![NodeOutput::Audio(audio)])
    }
}

/// Name-indexed set of nodes.
#[derive(Default)]
pub struct NodeRegistry {
    nodes: Vec<Box<dyn Node>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both ElevenLabs nodes backed by `client`.
    pub fn standard(client: &ElevenLabsClient) -> Self {
        let mut registry = Self::new();
        registry.register(VoiceQueryNode::new(client.voice_lookup()));
        registry.register(TextToSpeechNode::new(client.speech_synthesis()));
        registry
    }

    /// Add a node, replacing any node registered under the same name.
    pub fn register<N: Node + 'static>(&mut self, node: N) {
        let name = node.descriptor().name;
        self.nodes.retain(|n| n.descriptor().name != name);
        self.nodes.push(Box::new(node));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Node> {
        self.nodes
            .iter()
            .find(|n| n.descriptor().name == name)
            .map(|n| n.as_ref())
    }

    pub fn descriptors(&self) -> Vec<&NodeDescriptor> {
        self.nodes.iter().map(|n| n.descriptor()).collect()
    }

    /// Dispatch to the named node.
    pub async fn execute(
        &self,
        name: &str,
        inputs: &Map<String, Value>,
    ) -> Result<Vec<NodeOutput>> {
        let node = self.get(name).ok_or_else(|| {
            Error::validation_with_context(
                format!("unknown node '{}'", name),
                ErrorContext::new()
                    .with_details(format!(
                        "registered: {}",
                        self.descriptors()
                            .iter()
                            .map(|d| d.name)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))
                    .with_source("node_registry"),
            )
        })?;
        node.execute(inputs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptors_declare_host_contract() {
        let query = voice_query_descriptor();
        assert_eq!(query.function, "query_voices");
        assert_eq!(query.return_types, vec!["STRING"]);
        assert_eq!(query.return_names, vec!["voice_id"]);
        assert!(query.input("use_cases").is_some());

        let tts = tts_descriptor();
        assert_eq!(tts.return_types, vec!["AUDIO"]);
        assert_eq!(tts.required.len(), 4);
        match &tts.input("model_id").unwrap().spec {
            InputSpec::Choice { options, default } => {
                assert_eq!(options.len(), 4);
                assert_eq!(default, "eleven_multilingual_v2");
            }
            other => panic!("unexpected spec {:?}", other),
        }
    }

    #[test]
    fn test_filter_from_maps_all_to_unset() {
        let d = voice_query_descriptor();
        let values = serde_json::json!({
            "api_key": "k",
            "seed": 3,
            "category": "all",
            "gender": "male",
            "age": "middle_aged",
            "language": "all",
            "locale": "en-GB",
            "use_cases": "social_media",
            "page_size": 25
        });
        let values = values.as_object().unwrap();
        let filter =
            VoiceQueryNode::<ElevenLabsClient>::filter_from(&NodeInputs::new(values, &d)).unwrap();
        assert_eq!(filter.category, None);
        assert_eq!(filter.gender, Some(Gender::Male));
        assert_eq!(filter.age, Some(Age::MiddleAged));
        assert_eq!(filter.language, None);
        assert_eq!(filter.locale.as_deref(), Some("en-GB"));
        assert_eq!(filter.use_case, Some(UseCase::SocialMedia));
        assert_eq!(filter.descriptive, None);
        assert_eq!(filter.page_size, 25);
    }

    #[test]
    fn test_filter_from_rejects_unknown_facet_value() {
        let d = voice_query_descriptor();
        let values = serde_json::json!({"api_key": "k", "seed": 0, "gender": "robot"});
        let err = VoiceQueryNode::<ElevenLabsClient>::filter_from(&NodeInputs::new(
            values.as_object().unwrap(),
            &d,
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_node_output_accessors() {
        let out = NodeOutput::String("v".into());
        assert_eq!(out.type_tag(), "STRING");
        assert_eq!(out.as_str(), Some("v"));
        assert!(out.as_audio().is_none());
    }
}
