//! Decoding Strategy Module
//!
//! - Streaming: one input, records decoded and emitted one at a time
//!   (default, bounded memory)
//! - Parallel: many independent inputs across the rayon thread pool
//!   (requires the `parallel` feature)

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod streaming;

pub use streaming::{DecodeDriver, DecodeOutcome};
