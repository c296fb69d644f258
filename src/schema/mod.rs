//! Schema Module
//!
//! From configuration to a shared, compiled decoder:
//!
//! ```text
//! SchemaIdentity ---> CompiledSchemaCache ---> SchemaCompiler (on miss)
//!                            |
//!                            v
//!                     CompiledDecoder (Arc<dyn DataProcessor>)
//! ```

pub mod cache;
pub mod compiler;
pub mod identity;

pub use cache::{CacheStats, CompiledSchemaCache};
pub use compiler::{CompiledDecoder, DataProcessor, SchemaCompiler};
pub use identity::{SchemaIdentity, ValidationMode};
