//! Error Types
//!
//! Failures are split by where they arise: schema compilation, a single
//! decode invocation, the downstream event sink, input decoding and
//! configuration. [`Error`] unifies them for the parser facade.

use crate::infoset::Diagnostic;
use std::error::Error as StdError;
use thiserror::Error;

/// Boxed error used for opaque causes
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias defaulting to the crate error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure surfaced by this crate
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Compilation(#[from] CompilationError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The sink failure, if this error was raised by the event consumer
    pub fn as_sink_error(&self) -> Option<&SinkError> {
        match self {
            Error::Sink(e) => Some(e),
            _ => None,
        }
    }
}

/// The schema compiler rejected a schema identity
#[derive(Debug, Error)]
#[error("failed to compile DFDL schema `{schema}`: {message}")]
pub struct CompilationError {
    /// Source URI of the rejected schema
    pub schema: String,
    pub message: String,
    #[source]
    pub cause: Option<BoxError>,
}

impl CompilationError {
    pub fn new(schema: impl Into<String>, message: impl Into<String>) -> Self {
        CompilationError {
            schema: schema.into(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

/// A decode invocation failed; aborts the decode loop for the current input
#[derive(Debug, Error)]
#[error("DFDL parse error at byte {position}: {message}")]
pub struct DecodeError {
    pub message: String,
    /// Input offset at which the failing invocation started
    pub position: u64,
    #[source]
    pub cause: Option<BoxError>,
}

impl DecodeError {
    /// Wrap an error-severity diagnostic, keeping its message and cause
    pub fn from_diagnostic(diagnostic: Diagnostic, position: u64) -> Self {
        let (message, cause) = diagnostic.into_parts();
        DecodeError {
            message,
            position,
            cause,
        }
    }

    pub(crate) fn stalled(position: u64) -> Self {
        DecodeError {
            message: "decoder made no progress and did not report end of data".to_string(),
            position,
            cause: None,
        }
    }
}

/// The event consumer rejected an event
///
/// Display is the inner error's Display; use [`SinkError::downcast_ref`] to
/// recover the value the sink raised.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SinkError(BoxError);

impl SinkError {
    pub fn new(error: impl Into<BoxError>) -> Self {
        SinkError(error.into())
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

/// Input bytes could not be decoded, or a charset label is unknown
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("unsupported character set: {0}")]
    Unsupported(String),
    #[error("malformed {charset} input: {reason}")]
    Malformed {
        charset: &'static str,
        reason: String,
    },
}

/// Parser configuration is invalid
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid parser configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("schema_uri is required")]
    MissingSchemaUri,
    #[error("unknown validation mode `{0}` (expected off, limited or full)")]
    InvalidValidationMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infoset::Diagnostic;

    #[test]
    fn test_decode_error_keeps_diagnostic_cause() {
        let diagnostic = Diagnostic::error("bad field").with_cause(std::io::Error::other("short read"));
        let err = DecodeError::from_diagnostic(diagnostic, 12);

        assert_eq!(err.message, "bad field");
        assert_eq!(err.position, 12);
        assert_eq!(err.source().map(|c| c.to_string()), Some("short read".to_string()));
    }

    #[test]
    fn test_sink_error_display_is_unchanged() {
        let err = SinkError::new("ContentHandler error");
        assert_eq!(err.to_string(), "ContentHandler error");

        let wrapped: Error = err.into();
        assert_eq!(wrapped.to_string(), "ContentHandler error");
        assert!(wrapped.as_sink_error().is_some());
    }

    #[test]
    fn test_sink_error_downcast() {
        let err = SinkError::new(std::io::Error::other("closed"));
        let io = err.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.to_string(), "closed");
    }
}
