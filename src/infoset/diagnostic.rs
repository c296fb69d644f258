//! Decode Diagnostics
//!
//! What a single decode invocation reports back to the driver.

use super::node::InfosetNode;
use crate::error::BoxError;
use std::fmt;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Unrecoverable for the current input
    Error,
    /// Reportable but never alters control flow (e.g. limited validation findings)
    Warning,
}

/// A message produced by a decode invocation
#[derive(Debug)]
pub struct Diagnostic {
    message: String,
    cause: Option<BoxError>,
    severity: Severity,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            cause: None,
            severity,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub(crate) fn into_parts(self) -> (String, Option<BoxError>) {
        (self.message, self.cause)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{} ({})", self.message, cause),
            None => f.write_str(&self.message),
        }
    }
}

/// Outcome of one decode invocation
#[derive(Debug, Default)]
pub struct ParseResult {
    /// The decoded tree, if the invocation produced one
    pub infoset: Option<InfosetNode>,
    pub diagnostics: Vec<Diagnostic>,
    /// Set once the decoder has consumed all available input
    pub end_of_data: bool,
}

impl ParseResult {
    /// A successfully decoded tree
    pub fn record(infoset: InfosetNode, end_of_data: bool) -> Self {
        ParseResult {
            infoset: Some(infoset),
            diagnostics: Vec::new(),
            end_of_data,
        }
    }

    /// No tree; input exhausted
    pub fn end_of_data() -> Self {
        ParseResult {
            infoset: None,
            diagnostics: Vec::new(),
            end_of_data: true,
        }
    }

    /// A failed invocation carrying one error diagnostic
    pub fn failed(diagnostic: Diagnostic) -> Self {
        ParseResult {
            infoset: None,
            diagnostics: vec![diagnostic],
            end_of_data: false,
        }
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    /// Whether any diagnostic is error-severity
    pub fn is_error(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}
