//! Streaming Decode Driver
//!
//! Runs a compiled decoder repeatedly over one input, translating each
//! decoded infoset to events as soon as it is produced. Memory stays bounded
//! by the largest single record, not by the size of the input.
//!
//! ## Loop
//!
//! ```text
//! parse ──► error diagnostic? ──yes──► DecodeError (nothing emitted for it)
//!              │ no
//!              ▼
//!         warnings logged, tree translated to the sink
//!              │
//!              ▼
//!         end of data? ──yes──► DecodeOutcome
//!              │ no
//!              ▼
//!         consumed nothing? ──yes──► DecodeError (stalled)
//!              │ no
//!              └──► parse again
//! ```
//!
//! Events for earlier records stay with the sink when a later record fails.

use crate::core::Charset;
use crate::error::{DecodeError, Result};
use crate::infoset::{Diagnostic, ParseResult};
use crate::reader::{DataInput, InputSource};
use crate::sax::{EventSink, InfosetOutputter};
use crate::schema::CompiledDecoder;

/// Summary of a successful decode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// Infosets translated to the sink
    pub records: usize,
    /// Non-error diagnostics seen
    pub warnings: usize,
    /// Input bytes the decoder consumed
    pub bytes_consumed: u64,
}

/// Drives a compiled decoder over an input
#[derive(Clone)]
pub struct DecodeDriver {
    decoder: CompiledDecoder,
    indent: bool,
    debugging: bool,
    default_charset: Charset,
}

impl DecodeDriver {
    pub fn new(decoder: CompiledDecoder) -> Self {
        DecodeDriver {
            decoder,
            indent: false,
            debugging: false,
            default_charset: Charset::Utf8,
        }
    }

    /// Pretty-print by emitting whitespace character events
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Log every decoded record at debug level
    pub fn with_debugging(mut self, debugging: bool) -> Self {
        self.debugging = debugging;
        self
    }

    /// Charset for byte inputs that do not declare one
    pub fn with_default_charset(mut self, charset: Charset) -> Self {
        self.default_charset = charset;
        self
    }

    pub fn decoder(&self) -> &CompiledDecoder {
        &self.decoder
    }

    pub fn default_charset(&self) -> Charset {
        self.default_charset
    }

    /// Decode `source` to completion, emitting events to `sink`
    pub fn decode<S: EventSink + ?Sized>(&self, source: InputSource<'_>, sink: &mut S) -> Result<DecodeOutcome> {
        let mut input = DataInput::new(source, self.default_charset);
        let mut outputter = InfosetOutputter::new(sink).with_indent(self.indent);
        let mut outcome = DecodeOutcome::default();

        tracing::trace!(encoding = ?input.encoding(), "starting decode");

        loop {
            let start = input.position();
            let ParseResult {
                infoset,
                diagnostics,
                end_of_data,
            } = self.decoder.parse(&mut input);

            if let Some(error) = self.check_diagnostics(diagnostics, start, &mut outcome) {
                return Err(DecodeError::from_diagnostic(error, start).into());
            }

            if let Some(node) = infoset {
                if self.debugging {
                    tracing::debug!(
                        position = start,
                        consumed = input.position() - start,
                        elements = node.element_count(),
                        root = %node.metadata().name,
                        "decoded record"
                    );
                }
                outputter.output(&node)?;
                outcome.records += 1;
            }

            if end_of_data {
                break;
            }
            if input.position() == start {
                return Err(DecodeError::stalled(start).into());
            }
        }

        outcome.bytes_consumed = input.position();
        tracing::trace!(
            records = outcome.records,
            warnings = outcome.warnings,
            bytes = outcome.bytes_consumed,
            "decode complete"
        );
        Ok(outcome)
    }

    /// Log warnings and return the first error diagnostic, if any
    fn check_diagnostics(
        &self,
        diagnostics: Vec<Diagnostic>,
        position: u64,
        outcome: &mut DecodeOutcome,
    ) -> Option<Diagnostic> {
        let mut first_error = None;
        for diagnostic in diagnostics {
            if !diagnostic.is_error() {
                outcome.warnings += 1;
                tracing::warn!(position, %diagnostic, "DFDL parse warning");
            } else if first_error.is_none() {
                first_error = Some(diagnostic);
            } else {
                tracing::debug!(position, %diagnostic, "additional DFDL parse error");
            }
        }
        first_error
    }
}

impl std::fmt::Debug for DecodeDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeDriver")
            .field("indent", &self.indent)
            .field("debugging", &self.debugging)
            .field("default_charset", &self.default_charset)
            .finish_non_exhaustive()
    }
}
