//! Infoset Module
//!
//! Everything a decode invocation hands back to the driver:
//!
//! ```text
//! DataProcessor::parse ---> ParseResult { infoset, diagnostics, end_of_data }
//!                                 |
//!                                 v
//!                         InfosetNode tree ---> InfosetOutputter
//! ```

pub mod diagnostic;
pub mod namespace;
pub mod node;

pub use diagnostic::{Diagnostic, ParseResult, Severity};
pub use namespace::{NamespaceBinding, NamespaceStack};
pub use node::{ComplexElement, ElementMetadata, InfosetNode, PrimType, SimpleElement};
