//! Event Sink
//!
//! The consumer side of the event stream, supplied by the host pipeline.
//! Any method may fail; the failure stops translation and decoding and is
//! returned to the caller unchanged.

use super::events::AttributeSet;
use crate::error::SinkError;

/// Receiver of document events
pub trait EventSink {
    fn start_element(
        &mut self,
        namespace_uri: &str,
        local_name: &str,
        qualified_name: &str,
        attributes: &AttributeSet,
    ) -> Result<(), SinkError>;

    fn characters(&mut self, text: &str) -> Result<(), SinkError>;

    fn end_element(&mut self, namespace_uri: &str, local_name: &str, qualified_name: &str) -> Result<(), SinkError>;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn start_element(
        &mut self,
        namespace_uri: &str,
        local_name: &str,
        qualified_name: &str,
        attributes: &AttributeSet,
    ) -> Result<(), SinkError> {
        (**self).start_element(namespace_uri, local_name, qualified_name, attributes)
    }

    fn characters(&mut self, text: &str) -> Result<(), SinkError> {
        (**self).characters(text)
    }

    fn end_element(&mut self, namespace_uri: &str, local_name: &str, qualified_name: &str) -> Result<(), SinkError> {
        (**self).end_element(namespace_uri, local_name, qualified_name)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn start_element(
        &mut self,
        namespace_uri: &str,
        local_name: &str,
        qualified_name: &str,
        attributes: &AttributeSet,
    ) -> Result<(), SinkError> {
        (**self).start_element(namespace_uri, local_name, qualified_name, attributes)
    }

    fn characters(&mut self, text: &str) -> Result<(), SinkError> {
        (**self).characters(text)
    }

    fn end_element(&mut self, namespace_uri: &str, local_name: &str, qualified_name: &str) -> Result<(), SinkError> {
        (**self).end_element(namespace_uri, local_name, qualified_name)
    }
}
