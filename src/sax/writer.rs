//! XML Writer
//!
//! Serialises the event stream to XML text. Elements are never self-closed,
//! so an element without content is written as `<a></a>`.

use super::events::AttributeSet;
use super::sink::EventSink;
use crate::error::SinkError;

/// Sink that writes events as XML into a `String`
#[derive(Debug, Clone, Default)]
pub struct XmlWriter {
    buf: String,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        XmlWriter {
            buf: String::with_capacity(capacity),
        }
    }

    /// XML written so far
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl EventSink for XmlWriter {
    fn start_element(
        &mut self,
        _namespace_uri: &str,
        _local_name: &str,
        qualified_name: &str,
        attributes: &AttributeSet,
    ) -> Result<(), SinkError> {
        self.buf.push('<');
        self.buf.push_str(qualified_name);
        for attr in attributes {
            self.buf.push(' ');
            self.buf.push_str(&attr.qualified_name);
            self.buf.push_str("=\"");
            escape_xml_to_buf(&attr.value, &mut self.buf);
            self.buf.push('"');
        }
        self.buf.push('>');
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), SinkError> {
        escape_xml_to_buf(text, &mut self.buf);
        Ok(())
    }

    fn end_element(&mut self, _namespace_uri: &str, _local_name: &str, qualified_name: &str) -> Result<(), SinkError> {
        self.buf.push_str("</");
        self.buf.push_str(qualified_name);
        self.buf.push('>');
        Ok(())
    }
}

/// Escape XML special characters to buffer
#[inline]
fn escape_xml_to_buf(s: &str, buf: &mut String) {
    for c in s.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            _ => buf.push(c),
        }
    }
}
