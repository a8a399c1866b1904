use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Input or field that caused the error (e.g., "api_key", "inputs.gender")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected values)
    pub details: Option<String>,
    /// Source of the error (e.g., "voice_lookup", "speech_synthesis")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for both nodes.
///
/// Every variant is terminal for a node invocation; the retry policies decide which of them
/// get another attempt first (see [`Error::is_network`]).
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("No voices matched the query{}", format_context(.context))]
    NoResults { context: ErrorContext },

    #[error("Malformed voice record: {message}{}", format_context(.context))]
    MalformedResult {
        message: String,
        context: ErrorContext,
    },

    #[error("Synthesis error: {message}{}", format_context(.context))]
    Synthesis {
        message: String,
        context: ErrorContext,
    },

    #[error("Audio decode error: {message}")]
    Decode { message: String },

    #[error("{operation} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn malformed_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::MalformedResult {
            message: msg.into(),
            context,
        }
    }

    pub fn synthesis_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Synthesis {
            message: msg.into(),
            context,
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode {
            message: msg.into(),
        }
    }

    /// True for failures where no usable response arrived: connect errors, timeouts,
    /// non-2xx statuses and bodies that could not be read or parsed.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::NoResults { context }
            | Error::MalformedResult { context, .. }
            | Error::Synthesis { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Attempt count of an exhausted retry loop.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Error::RetriesExhausted { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_rendered_in_display() {
        let err = Error::configuration_with_context(
            "API key must not be empty",
            ErrorContext::new()
                .with_field_path("api_key")
                .with_source("voice_lookup"),
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: API key must not be empty (field: api_key, source: voice_lookup)"
        );
    }

    #[test]
    fn test_retries_exhausted_names_attempts_and_cause() {
        let err = Error::RetriesExhausted {
            operation: "voice lookup".to_string(),
            attempts: 3,
            source: Box::new(Error::Transport(TransportError::Status {
                status: 503,
                body: "busy".to_string(),
            })),
        };
        assert_eq!(err.attempts(), Some(3));
        let msg = err.to_string();
        assert!(msg.starts_with("voice lookup failed after 3 attempts"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn test_only_transport_errors_are_network() {
        assert!(Error::Transport(TransportError::Body("eof".into())).is_network());
        assert!(!Error::NoResults {
            context: ErrorContext::new()
        }
        .is_network());
        assert!(!Error::decode("bad frame").is_network());
    }
}
