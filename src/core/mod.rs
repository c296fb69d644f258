//! Core Module
//!
//! Low-level helpers shared by the input and event layers.

pub mod encoding;
pub mod qname;

pub use encoding::Charset;
