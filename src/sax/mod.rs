//! SAX Output Module
//!
//! Turns decoded infosets into a stream of namespace-aware document events.
//!
//! ## Architecture
//!
//! ```text
//! InfosetNode ---> InfosetOutputter ---> EventSink
//!                        |                   |
//!                 NamespaceStack       SaxCollector / XmlWriter / host sink
//! ```
//!
//! ## Event Types
//!
//! - `start_element` - namespace URI, local name, qualified name and attributes
//! - `characters` - value of a simple element that is not nil
//! - `end_element` - closes the matching start
//!
//! Attributes carry namespace declarations (`xmlns`, `xmlns:p`) and, for nil
//! elements, `xsi:nil="true"`.

pub mod attributes;
pub mod collector;
pub mod events;
pub mod outputter;
pub mod sink;
pub mod writer;

pub use attributes::{element_attributes, ElementAttributes};
pub use collector::SaxCollector;
pub use events::{Attribute, AttributeSet, SaxEvent};
pub use outputter::InfosetOutputter;
pub use sink::EventSink;
pub use writer::XmlWriter;
