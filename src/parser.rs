//! DFDL Parser
//!
//! The embedding point for a host pipeline. A [`DfdlParser`] is built from
//! explicit configuration and a shared [`CompiledSchemaCache`]; it acquires
//! its compiled decoder up front so a bad schema is reported at
//! construction, not on the first input.

use crate::config::ParserConfig;
use crate::error::Result;
use crate::reader::InputSource;
use crate::sax::EventSink;
use crate::schema::{CompiledSchemaCache, SchemaIdentity};
use crate::strategy::{DecodeDriver, DecodeOutcome};

/// Decodes inputs against one compiled schema and emits document events
#[derive(Debug, Clone)]
pub struct DfdlParser {
    config: ParserConfig,
    schema: SchemaIdentity,
    driver: DecodeDriver,
}

impl DfdlParser {
    /// Validate `config` and acquire its compiled decoder from `cache`
    pub fn new(cache: &CompiledSchemaCache, config: ParserConfig) -> Result<Self> {
        config.validate()?;
        let charset = config.content_charset()?;
        let schema = config.schema_identity();
        let decoder = cache.acquire(&schema)?;

        tracing::debug!(schema = %schema, content_encoding = %charset, "DFDL parser ready");

        let driver = DecodeDriver::new(decoder)
            .with_indent(config.indent)
            .with_debugging(config.debugging)
            .with_default_charset(charset);

        Ok(DfdlParser { config, schema, driver })
    }

    /// Decode one input to completion, emitting events to `sink`
    ///
    /// Document start/end bracketing is left to the caller.
    pub fn parse<S: EventSink + ?Sized>(&self, input: InputSource<'_>, sink: &mut S) -> Result<DecodeOutcome> {
        self.driver.decode(input, sink)
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn schema(&self) -> &SchemaIdentity {
        &self.schema
    }

    pub fn driver(&self) -> &DecodeDriver {
        &self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Charset;
    use crate::error::{Error, SinkError};
    use crate::sax::{AttributeSet, SaxCollector, XmlWriter};
    use crate::testing::CountingCompiler;
    use std::fmt;
    use std::sync::Arc;

    fn cache() -> CompiledSchemaCache {
        CompiledSchemaCache::new(Arc::new(CountingCompiler::new()))
    }

    fn parse_to_xml(parser: &DfdlParser, input: InputSource<'_>) -> Result<String> {
        let mut writer = XmlWriter::new();
        parser.parse(input, &mut writer)?;
        Ok(writer.into_string())
    }

    #[test]
    fn test_parse_repeated_records() {
        let parser = DfdlParser::new(&cache(), ParserConfig::new("/csv.dfdl.xsd")).unwrap();
        let single = parse_to_xml(&parser, InputSource::text("<x,y>")).unwrap();
        let double = parse_to_xml(&parser, InputSource::text("<x,y><x,y>")).unwrap();

        assert_eq!(double, format!("{}{}", single, single));
    }

    #[test]
    fn test_parsers_share_compiled_schema() {
        let compiler = Arc::new(CountingCompiler::new());
        let cache = CompiledSchemaCache::new(compiler.clone());

        let a = DfdlParser::new(&cache, ParserConfig::new("/csv.dfdl.xsd")).unwrap();
        let b = DfdlParser::new(&cache, ParserConfig::new("/csv.dfdl.xsd").with_indent(true)).unwrap();

        assert!(Arc::ptr_eq(a.driver().decoder(), b.driver().decoder()));
        assert_eq!(compiler.calls(), 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_variables_reach_compiler() {
        let config = ParserConfig::new("/csv.dfdl.xsd").with_variable("Separator", ";");
        let parser = DfdlParser::new(&cache(), config).unwrap();

        let mut collector = SaxCollector::new();
        let outcome = parser.parse(InputSource::text("<a;b,c>"), &mut collector).unwrap();
        assert_eq!(outcome.records, 1);
        assert_eq!(collector.events()[5].as_characters(), Some("b,c"));
    }

    #[test]
    fn test_bad_schema_fails_at_construction() {
        let err = DfdlParser::new(&cache(), ParserConfig::new("")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let cache = CompiledSchemaCache::new(Arc::new(CountingCompiler::new().failing_first(1)));
        let err = DfdlParser::new(&cache, ParserConfig::new("/csv.dfdl.xsd")).unwrap_err();
        match err {
            Error::Compilation(e) => assert_eq!(e.schema, "/csv.dfdl.xsd"),
            other => panic!("expected compilation error, got {:?}", other),
        }

        let err = DfdlParser::new(
            &cache,
            ParserConfig::new("/csv.dfdl.xsd").with_content_encoding("EBCDIC"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_encoding_sensitivity() {
        let text = "<café,crème>";
        let latin1 = Charset::Latin1.encode(text).unwrap();

        let declared = DfdlParser::new(
            &cache(),
            ParserConfig::new("/csv.dfdl.xsd").with_content_encoding("ISO-8859-1"),
        )
        .unwrap();
        let from_text = parse_to_xml(&declared, InputSource::text(text)).unwrap();
        let from_bytes = parse_to_xml(&declared, InputSource::from_slice(&latin1)).unwrap();
        assert_eq!(from_text, from_bytes);

        // Same bytes read as UTF-8: 0xE9 is not valid UTF-8
        let mismatched = DfdlParser::new(&cache(), ParserConfig::new("/csv.dfdl.xsd")).unwrap();
        let err = parse_to_xml(&mismatched, InputSource::from_slice(&latin1)).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));

        // UTF-8 bytes read as Latin-1 decode, but garbled
        let garbled = parse_to_xml(&declared, InputSource::from_slice(text.as_bytes())).unwrap();
        assert_ne!(garbled, from_text);
        assert!(garbled.contains("cafÃ©"));
    }

    #[test]
    fn test_first_record_error_emits_nothing() {
        let parser = DfdlParser::new(&cache(), ParserConfig::new("/csv.dfdl.xsd")).unwrap();
        let mut collector = SaxCollector::new();

        let err = parser.parse(InputSource::text("<!><a>"), &mut collector).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(collector.is_empty());
    }

    #[test]
    fn test_later_record_error_keeps_prior_events() {
        let parser = DfdlParser::new(&cache(), ParserConfig::new("/csv.dfdl.xsd")).unwrap();
        let mut collector = SaxCollector::new();

        let err = parser.parse(InputSource::text("<a><b><!>"), &mut collector).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(collector.len(), 10);
    }

    #[derive(Debug)]
    struct Rejected(&'static str);

    impl fmt::Display for Rejected {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "ContentHandler error: {}", self.0)
        }
    }

    impl std::error::Error for Rejected {}

    /// Rejects the nth start element
    struct RejectingSink {
        starts: usize,
        reject_at: usize,
        inner: SaxCollector,
    }

    impl EventSink for RejectingSink {
        fn start_element(
            &mut self,
            namespace_uri: &str,
            local_name: &str,
            qualified_name: &str,
            attributes: &AttributeSet,
        ) -> std::result::Result<(), SinkError> {
            self.starts += 1;
            if self.starts == self.reject_at {
                return Err(SinkError::new(Rejected("element refused")));
            }
            self.inner.start_element(namespace_uri, local_name, qualified_name, attributes)
        }

        fn characters(&mut self, text: &str) -> std::result::Result<(), SinkError> {
            self.inner.characters(text)
        }

        fn end_element(
            &mut self,
            namespace_uri: &str,
            local_name: &str,
            qualified_name: &str,
        ) -> std::result::Result<(), SinkError> {
            self.inner.end_element(namespace_uri, local_name, qualified_name)
        }
    }

    #[test]
    fn test_sink_error_propagates_unchanged() {
        let parser = DfdlParser::new(&cache(), ParserConfig::new("/csv.dfdl.xsd")).unwrap();
        let mut sink = RejectingSink {
            starts: 0,
            reject_at: 4,
            inner: SaxCollector::new(),
        };

        let err = parser.parse(InputSource::text("<a><b><c>"), &mut sink).unwrap_err();

        let sink_error = err.as_sink_error().unwrap();
        assert_eq!(sink_error.to_string(), "ContentHandler error: element refused");
        assert!(sink_error.downcast_ref::<Rejected>().is_some());
        // First record complete, second stopped at its field
        assert_eq!(sink.inner.len(), 6);
        assert_eq!(sink.starts, 4);
    }

    #[test]
    fn test_concurrent_parsers() {
        let compiler = Arc::new(CountingCompiler::new());
        let cache = CompiledSchemaCache::new(compiler.clone());

        let outputs: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let cache = &cache;
                    s.spawn(move || {
                        let parser = DfdlParser::new(cache, ParserConfig::new("/csv.dfdl.xsd")).unwrap();
                        let input = format!("<{}>", i);
                        parse_to_xml(&parser, InputSource::text(&input)).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(compiler.calls(), 1);
        for (i, xml) in outputs.iter().enumerate() {
            assert!(xml.contains(&format!(">{}<", i)));
        }
    }
}
