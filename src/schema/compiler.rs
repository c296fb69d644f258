//! Compiler Seams
//!
//! The DFDL compiler and runtime live outside this crate. They plug in
//! through two traits: a [`SchemaCompiler`] turns a [`SchemaIdentity`] into
//! a [`DataProcessor`], and the processor decodes one infoset per call.

use super::identity::SchemaIdentity;
use crate::error::CompilationError;
use crate::infoset::ParseResult;
use crate::reader::DataInput;
use std::sync::Arc;

/// A compiled, immutable decode capability
///
/// Implementations must be safe to call from many threads at once; all
/// per-input state lives in the [`DataInput`].
pub trait DataProcessor: Send + Sync {
    /// Decode the next infoset from the remaining input
    ///
    /// Consumes exactly the bytes of the decoded structure, leaving the rest
    /// of the input for the next call. Failures are reported as
    /// error-severity diagnostics on the result, never as panics.
    fn parse(&self, input: &mut DataInput<'_>) -> ParseResult;
}

/// Shared handle to a compiled decoder
pub type CompiledDecoder = Arc<dyn DataProcessor>;

/// Compiles schema identities into decoders
pub trait SchemaCompiler: Send + Sync {
    fn compile(&self, schema: &SchemaIdentity) -> Result<CompiledDecoder, CompilationError>;
}

impl<F> SchemaCompiler for F
where
    F: Fn(&SchemaIdentity) -> Result<CompiledDecoder, CompilationError> + Send + Sync,
{
    fn compile(&self, schema: &SchemaIdentity) -> Result<CompiledDecoder, CompilationError> {
        self(schema)
    }
}
