//! RustyDFDL - Schema-driven decoding to SAX-style document events
//!
//! A compiled DFDL decoder turns raw input into infoset trees; this crate
//! drives it and replays every tree to a host pipeline as namespace-aware
//! start-element / characters / end-element events.
//!
//! Strategies:
//! A: Compiled-schema cache (CompiledSchemaCache::acquire)
//! B: Streaming decode loop (DecodeDriver::decode, DfdlParser::parse)
//! C: Infoset-to-event translation (InfosetOutputter)
//! D: Parallel batch decoding (decode_parallel, `parallel` feature)
//!
//! The DFDL compiler itself is supplied by the host through
//! [`SchemaCompiler`] and [`DataProcessor`].

pub mod config;
pub mod core;
pub mod error;
pub mod infoset;
pub mod parser;
pub mod reader;
pub mod sax;
pub mod schema;
pub mod strategy;

#[cfg(test)]
mod testing;

// ============================================================================
// Public API
// ============================================================================

pub use crate::config::ParserConfig;
pub use crate::core::Charset;
pub use crate::error::{
    CompilationError, ConfigError, DecodeError, EncodingError, Error, Result, SinkError,
};
pub use crate::infoset::{Diagnostic, InfosetNode, ParseResult, PrimType, Severity};
pub use crate::parser::DfdlParser;
pub use crate::reader::{DataInput, InputSource};
pub use crate::sax::{Attribute, AttributeSet, EventSink, InfosetOutputter, SaxCollector, SaxEvent, XmlWriter};
pub use crate::schema::{
    CacheStats, CompiledDecoder, CompiledSchemaCache, DataProcessor, SchemaCompiler, SchemaIdentity,
    ValidationMode,
};
pub use crate::strategy::{DecodeDriver, DecodeOutcome};

#[cfg(feature = "parallel")]
pub use crate::strategy::parallel::{decode_parallel, decode_parallel_to_xml};

// ============================================================================
// Convenience Entry Points
// ============================================================================

/// Decode an input and return the collected events
pub fn parse_events(parser: &DfdlParser, input: InputSource<'_>) -> Result<Vec<SaxEvent>> {
    let mut collector = SaxCollector::new();
    parser.parse(input, &mut collector)?;
    Ok(collector.into_events())
}

/// Decode an input and return it serialised as XML text
pub fn parse_to_xml(parser: &DfdlParser, input: InputSource<'_>) -> Result<String> {
    let mut writer = XmlWriter::new();
    parser.parse(input, &mut writer)?;
    Ok(writer.into_string())
}

/// Translate a single infoset tree to events
pub fn infoset_to_events(node: &InfosetNode) -> std::result::Result<Vec<SaxEvent>, SinkError> {
    let mut outputter = InfosetOutputter::new(SaxCollector::new());
    outputter.output(node)?;
    Ok(outputter.into_sink().into_events())
}
