//! Test Doubles
//!
//! Stand-ins for the external DFDL engine so the cache, driver and parser
//! can be exercised end to end.
//!
//! [`RecordDecoder`] understands a toy format: records are `<f1,f2,...>`,
//! back to back, in whatever charset the input declares. Each record decodes
//! to `ex:record` (namespace [`RECORD_NS`]) holding one `ex:field` per value.
//! Special field values drive the failure paths:
//!
//! - `~` a nil field
//! - `?` a warning diagnostic (the field is still emitted)
//! - `!` an error diagnostic (no tree)

use crate::error::CompilationError;
use crate::infoset::{Diagnostic, InfosetNode, ParseResult, PrimType};
use crate::reader::DataInput;
use crate::schema::{CompiledDecoder, DataProcessor, SchemaCompiler, SchemaIdentity};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const RECORD_NS: &str = "urn:example:csv";
pub const RECORD_PREFIX: &str = "ex";

/// Compiler that counts invocations and can be slowed down or made to fail
#[derive(Debug, Default)]
pub struct CountingCompiler {
    calls: AtomicUsize,
    delay: Option<Duration>,
    failures_left: AtomicUsize,
}

impl CountingCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep inside every compilation
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Reject the first `n` compilations
    pub fn failing_first(self, n: usize) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SchemaCompiler for CountingCompiler {
    fn compile(&self, schema: &SchemaIdentity) -> Result<CompiledDecoder, CompilationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }

        if schema.uri().is_empty() {
            return Err(CompilationError::new("", "schema URI is empty"));
        }

        let fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if fail {
            return Err(CompilationError::new(schema.uri(), "schema could not be loaded")
                .with_cause(std::io::Error::other("connection reset")));
        }

        Ok(Arc::new(RecordDecoder::for_schema(schema)))
    }
}

/// Decoder for `<a,b,c>` records
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    separator: char,
}

impl RecordDecoder {
    pub fn new() -> Self {
        RecordDecoder { separator: ',' }
    }

    /// Honours a `Separator` external variable
    pub fn for_schema(schema: &SchemaIdentity) -> Self {
        let separator = schema
            .variable("Separator")
            .and_then(|s| s.chars().next())
            .unwrap_or(',');
        RecordDecoder { separator }
    }

    fn record(&self, body: &str) -> ParseResult {
        let mut children = Vec::new();
        let mut warnings = Vec::new();

        for value in body.split(self.separator) {
            let field = match value {
                "!" => return ParseResult::failed(Diagnostic::error(format!("invalid field value `{}`", value))),
                "?" => {
                    warnings.push(Diagnostic::warning("suspicious field value `?`"));
                    InfosetNode::text("field", value)
                }
                "~" => InfosetNode::simple("field", PrimType::String, "").nilled(),
                _ => InfosetNode::text("field", value),
            };
            children.push(field.with_namespace(RECORD_NS, Some(RECORD_PREFIX)));
        }

        let record = InfosetNode::complex("record", children)
            .with_namespace(RECORD_NS, Some(RECORD_PREFIX))
            .with_binding(Some(RECORD_PREFIX), RECORD_NS);

        warnings
            .into_iter()
            .fold(ParseResult::record(record, false), ParseResult::with_diagnostic)
    }
}

impl Default for RecordDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProcessor for RecordDecoder {
    fn parse(&self, input: &mut DataInput<'_>) -> ParseResult {
        let charset = input.charset();
        let delimiter = match charset.encode(">") {
            Ok(delimiter) => delimiter,
            Err(e) => return ParseResult::failed(Diagnostic::error("cannot encode delimiter").with_cause(e)),
        };

        let mut raw = Vec::new();
        let terminated = match input.read_until(&delimiter, charset.unit_width(), &mut raw) {
            Ok(found) => found,
            Err(e) => return ParseResult::failed(Diagnostic::error("failed to read record").with_cause(e)),
        };

        let text = match charset.decode(&raw) {
            Ok(text) => text,
            Err(e) => return ParseResult::failed(Diagnostic::error("record is not valid text").with_cause(e)),
        };
        let text = text.trim();

        if !terminated {
            if text.is_empty() {
                return ParseResult::end_of_data();
            }
            return ParseResult::failed(Diagnostic::error(format!("unterminated record `{}`", text)));
        }

        let body = text.strip_prefix('<').unwrap_or(text);
        let mut result = self.record(body);
        if !result.is_error() {
            result.end_of_data = match input.has_data() {
                Ok(more) => !more,
                Err(e) => {
                    return ParseResult::failed(Diagnostic::error("failed to read ahead").with_cause(e));
                }
            };
        }
        result
    }
}

/// Decoder that never consumes input and never reports end of data
#[derive(Debug, Default)]
pub struct StallingDecoder;

impl DataProcessor for StallingDecoder {
    fn parse(&self, _input: &mut DataInput<'_>) -> ParseResult {
        ParseResult::default()
    }
}

/// Decoder that consumes all input and returns one complex chain `depth` levels deep
#[derive(Debug)]
pub struct DeepDecoder {
    pub depth: usize,
}

impl DataProcessor for DeepDecoder {
    fn parse(&self, input: &mut DataInput<'_>) -> ParseResult {
        if let Err(e) = input.read_to_end() {
            return ParseResult::failed(Diagnostic::error("failed to read input").with_cause(e));
        }

        let mut node = InfosetNode::text("leaf", "x");
        for _ in 0..self.depth {
            node = InfosetNode::complex("level", vec![node]);
        }
        ParseResult::record(node, true)
    }
}

/// A decoder handle for [`RecordDecoder`] with default settings
pub fn record_decoder() -> CompiledDecoder {
    Arc::new(RecordDecoder::new())
}
