//! Node descriptors: what a host needs to render widgets and wire outputs.

use serde::Serialize;

/// Sentinel choice meaning "do not filter on this facet".
pub const ALL: &str = "all";

pub const LANGUAGES: &[&str] = &[
    "ar", "bg", "cs", "da", "de", "el", "en", "es", "fi", "fil", "fr", "hi", "hr", "hu", "id",
    "it", "ja", "ko", "ms", "nl", "no", "pl", "pt", "ro", "ru", "sk", "sv", "ta", "tr", "uk",
    "vi", "zh",
];

pub const LOCALES: &[&str] = &[
    "ar-EG", "ar-KW", "ar-LB", "ar-MA", "ar-SA", "bg-BG", "ceb-PH", "cmn-CN", "cmn-TW", "cs-CZ",
    "da-DK", "de-AT", "de-DE", "el-GR", "en-AU", "en-CA", "en-FI", "en-GB", "en-IE", "en-IN",
    "en-JM", "en-KR", "en-MY", "en-NG", "en-NZ", "en-PH", "en-RU", "en-SG", "en-US", "en-ZA",
    "es-AR", "es-CL", "es-CO", "es-ES", "es-MX", "es-PE", "es-US", "es-VE", "fi-FI", "fil-PH",
    "fr-BE", "fr-CA", "fr-CH", "fr-FR", "fr-TN", "fr-US", "hi-IN", "hr-HR", "hu-HU", "id-ID",
    "ilo-PH", "it-IT", "ja-JP", "jv-ID", "ko-KR", "li-NL", "ms-MY", "nl-BE", "nl-NL", "no-NO",
    "pl-PL", "pt-BR", "pt-PT", "ro-RO", "ru-RU", "sk-SK", "sv-SE", "ta-IN", "tr-TR", "uk-UA",
    "vi-VN",
];

/// Widget declaration for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum InputSpec {
    #[serde(rename = "STRING")]
    String { default: String, multiline: bool },
    #[serde(rename = "INT")]
    Int { default: u64, min: u64, max: u64 },
    #[serde(rename = "COMBO")]
    Choice { options: Vec<String>, default: String },
}

impl InputSpec {
    pub fn string(default: &str) -> Self {
        Self::String {
            default: default.to_string(),
            multiline: false,
        }
    }

    pub fn multiline(default: &str) -> Self {
        Self::String {
            default: default.to_string(),
            multiline: true,
        }
    }

    pub fn int(default: u64, min: u64, max: u64) -> Self {
        Self::Int { default, min, max }
    }

    pub fn choice<I, S>(options: I, default: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choice {
            options: options.into_iter().map(Into::into).collect(),
            default: default.to_string(),
        }
    }

    /// Choice list led by the `"all"` sentinel, defaulting to it.
    pub fn facet<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all = vec![ALL.to_string()];
        all.extend(options.into_iter().map(Into::into));
        Self::Choice {
            options: all,
            default: ALL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputField {
    pub name: &'static str,
    #[serde(flatten)]
    pub spec: InputSpec,
}

impl InputField {
    pub fn new(name: &'static str, spec: InputSpec) -> Self {
        Self { name, spec }
    }
}

/// Static description of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    /// Entry function the host calls.
    pub function: &'static str,
    pub required: Vec<InputField>,
    pub optional: Vec<InputField>,
    pub return_types: Vec<&'static str>,
    pub return_names: Vec<&'static str>,
}

impl NodeDescriptor {
    pub fn input(&self, name: &str) -> Option<&InputField> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_spec_serializes_with_host_type_tags() {
        let field = InputField::new("seed", InputSpec::int(0, 0, u64::MAX));
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            serde_json::json!({
                "name": "seed",
                "type": "INT",
                "default": 0,
                "min": 0,
                "max": u64::MAX
            })
        );
    }

    #[test]
    fn test_facet_leads_with_all() {
        match InputSpec::facet(["female", "male"]) {
            InputSpec::Choice { options, default } => {
                assert_eq!(options, vec!["all", "female", "male"]);
                assert_eq!(default, "all");
            }
            other => panic!("expected choice, got {:?}", other),
        }
    }
}
