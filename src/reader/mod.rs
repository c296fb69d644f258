//! Reader Module
//!
//! Input plumbing between the caller's stream and the decoder.

pub mod input;

pub use input::{DataInput, InputEncoding, InputSource};
