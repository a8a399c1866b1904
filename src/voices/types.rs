//! Shared voice library types.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Fixed sort order: most cloned voices first.
pub const SORT_MOST_CLONED: &str = "cloned_by_count";

pub const MAX_PAGE_SIZE: u32 = 100;

/// Declares a closed facet enum with its wire names.
macro_rules! facet {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

facet!(
    /// Voice quality tier.
    Category {
        HighQuality => "high_quality",
        Professional => "professional",
    }
);

facet!(Gender {
    Female => "female",
    Male => "male",
    Neutral => "neutral",
});

facet!(
    /// Both spellings of "middle aged" exist in the library.
    Age {
        MiddleAgedHyphen => "middle-aged",
        MiddleAged => "middle_aged",
        Old => "old",
        Young => "young",
    }
);

facet!(UseCase {
    Advertisement => "advertisement",
    CharactersAnimation => "characters_animation",
    Conversational => "conversational",
    EntertainmentTv => "entertainment_tv",
    InformativeEducational => "informative_educational",
    NarrativeStory => "narrative_story",
    SocialMedia => "social_media",
});

facet!(
    /// Descriptive tone.
    Descriptive {
        Anxious => "anxious",
        Calm => "calm",
        Casual => "casual",
        Confident => "confident",
        Excited => "excited",
        Formal => "formal",
        Gentle => "gentle",
        Professional => "professional",
        Relaxed => "relaxed",
        Serious => "serious",
        Soft => "soft",
        Upbeat => "upbeat",
        Warm => "warm",
    }
);

/// Filter for the shared voice library. Unset facets are left out of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub category: Option<Category>,
    pub gender: Option<Gender>,
    pub age: Option<Age>,
    /// ISO language code, e.g. `en`.
    pub language: Option<String>,
    /// Locale code, e.g. `en-US`.
    pub locale: Option<String>,
    pub use_case: Option<UseCase>,
    pub descriptive: Option<Descriptive>,
    pub page_size: u32,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            category: None,
            gender: None,
            age: None,
            language: None,
            locale: None,
            use_case: None,
            descriptive: None,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, v: Category) -> Self {
        self.category = Some(v);
        self
    }

    pub fn gender(mut self, v: Gender) -> Self {
        self.gender = Some(v);
        self
    }

    pub fn age(mut self, v: Age) -> Self {
        self.age = Some(v);
        self
    }

    pub fn language(mut self, v: impl Into<String>) -> Self {
        self.language = Some(v.into());
        self
    }

    pub fn locale(mut self, v: impl Into<String>) -> Self {
        self.locale = Some(v.into());
        self
    }

    pub fn use_case(mut self, v: UseCase) -> Self {
        self.use_case = Some(v);
        self
    }

    pub fn descriptive(mut self, v: Descriptive) -> Self {
        self.descriptive = Some(v);
        self
    }

    pub fn page_size(mut self, n: u32) -> Self {
        self.page_size = n;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(Error::validation_with_context(
                format!("page_size must be between 1 and {}", MAX_PAGE_SIZE),
                ErrorContext::new()
                    .with_field_path("page_size")
                    .with_details(format!("got {}", self.page_size)),
            ));
        }
        Ok(())
    }

    /// Outbound query parameters. `page_size` and `sort` are always present.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page_size", self.page_size.to_string()),
            ("sort", SORT_MOST_CLONED.to_string()),
        ];
        let facets = [
            ("category", self.category.map(|v| v.as_str().to_string())),
            ("gender", self.gender.map(|v| v.as_str().to_string())),
            ("age", self.age.map(|v| v.as_str().to_string())),
            ("language", non_blank(&self.language)),
            ("locale", non_blank(&self.locale)),
            ("use_case", self.use_case.map(|v| v.as_str().to_string())),
            ("descriptive", self.descriptive.map(|v| v.as_str().to_string())),
        ];
        params.extend(
            facets
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v))),
        );
        params
    }
}

fn non_blank(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// One shared voice. Only the id and name are interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceRecord {
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VoiceRecord {
    pub fn new(voice_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            voice_id: Some(voice_id.into()),
            name: Some(name.into()),
            extra: serde_json::Map::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// Response of `GET /v1/shared-voices`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedVoicesPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub voices: Vec<VoiceRecord>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub last_sort_id: Option<String>,
}

/// `"voices": null` reads as an empty page rather than a malformed body.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<VoiceRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<VoiceRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result of a voice lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceSelection {
    pub voice_id: String,
    pub name: String,
    pub candidates: usize,
    pub seed: u64,
}
