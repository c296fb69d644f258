//! SAX Collector
//!
//! Implements [`EventSink`] by recording every event as an owned [`SaxEvent`].

use super::events::{AttributeSet, SaxEvent};
use super::sink::EventSink;
use crate::error::SinkError;

/// Sink that gathers events for later inspection
#[derive(Debug, Clone)]
pub struct SaxCollector {
    /// Collected events
    events: Vec<SaxEvent>,
}

impl SaxCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create with estimated capacity
    pub fn with_capacity(events: usize) -> Self {
        Self {
            events: Vec::with_capacity(events),
        }
    }

    /// Get the collected events as a slice
    pub fn events(&self) -> &[SaxEvent] {
        &self.events
    }

    /// Take the collected events, leaving the collector empty
    pub fn take_events(&mut self) -> Vec<SaxEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn into_events(self) -> Vec<SaxEvent> {
        self.events
    }

    /// Get number of collected events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for SaxCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for SaxCollector {
    fn start_element(
        &mut self,
        namespace_uri: &str,
        local_name: &str,
        qualified_name: &str,
        attributes: &AttributeSet,
    ) -> Result<(), SinkError> {
        self.events.push(SaxEvent::StartElement {
            namespace_uri: namespace_uri.to_string(),
            local_name: local_name.to_string(),
            qualified_name: qualified_name.to_string(),
            attributes: attributes.clone(),
        });
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), SinkError> {
        self.events.push(SaxEvent::Characters(text.to_string()));
        Ok(())
    }

    fn end_element(&mut self, namespace_uri: &str, local_name: &str, qualified_name: &str) -> Result<(), SinkError> {
        self.events.push(SaxEvent::EndElement {
            namespace_uri: namespace_uri.to_string(),
            local_name: local_name.to_string(),
            qualified_name: qualified_name.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sax::Attribute;

    #[test]
    fn test_records_in_order() {
        let mut collector = SaxCollector::new();
        let attrs: AttributeSet = std::iter::once(Attribute::new("", "id", "1")).collect();

        collector.start_element("urn:a", "a", "p:a", &attrs).unwrap();
        collector.characters("hello").unwrap();
        collector.end_element("urn:a", "a", "p:a").unwrap();

        let events = collector.events();
        assert_eq!(events.len(), 3);
        assert!(events[0].is_start_element());
        assert_eq!(events[0].attributes().unwrap().value("id"), Some("1"));
        assert_eq!(events[1].as_characters(), Some("hello"));
        assert!(events[2].is_end_element());
    }

    #[test]
    fn test_take_events_resets() {
        let mut collector = SaxCollector::new();
        collector.characters("x").unwrap();

        assert_eq!(collector.take_events().len(), 1);
        assert!(collector.is_empty());
    }
}
