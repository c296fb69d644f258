//! Compiled-Schema Cache
//!
//! Maps each [`SchemaIdentity`] to its compiled decoder. Lookups of an
//! already compiled identity only take a shared read lock. A miss inserts a
//! per-identity cell under a short write lock and compiles inside that cell,
//! so concurrent callers for the same identity wait for one compilation
//! while callers for other identities proceed.
//!
//! Entries are never evicted. A failed compilation leaves its cell empty,
//! so a later `acquire` for the same identity compiles again. A caller that
//! was waiting on a compilation that failed runs its own compilation within
//! that same `acquire` call; the cache never retries on anyone's behalf.

use super::compiler::{CompiledDecoder, SchemaCompiler};
use super::identity::SchemaIdentity;
use crate::error::CompilationError;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type Slot = Arc<OnceCell<CompiledDecoder>>;

/// Counters describing cache behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Acquisitions served by an existing decoder
    pub hits: u64,
    /// Successful compilations (one per cached identity)
    pub compilations: u64,
    /// Compilations the compiler rejected
    pub failures: u64,
}

/// Process- or scope-wide cache of compiled decoders
pub struct CompiledSchemaCache {
    compiler: Arc<dyn SchemaCompiler>,
    slots: RwLock<HashMap<SchemaIdentity, Slot>>,
    hits: AtomicU64,
    compilations: AtomicU64,
    failures: AtomicU64,
}

impl CompiledSchemaCache {
    pub fn new(compiler: Arc<dyn SchemaCompiler>) -> Self {
        CompiledSchemaCache {
            compiler,
            slots: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            compilations: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Get the compiled decoder for `schema`, compiling it on first use
    ///
    /// All callers for one identity receive the same decoder instance.
    pub fn acquire(&self, schema: &SchemaIdentity) -> Result<CompiledDecoder, CompilationError> {
        let existing = self.slots.read().get(schema).cloned();
        if let Some(decoder) = existing.as_ref().and_then(|slot| slot.get()) {
            self.record_hit(schema);
            return Ok(Arc::clone(decoder));
        }

        let slot = match existing {
            Some(slot) => slot,
            None => Arc::clone(self.slots.write().entry(schema.clone()).or_default()),
        };

        let mut compiled_here = false;
        let decoder = slot
            .get_or_try_init(|| {
                compiled_here = true;
                self.compile(schema)
            })
            .map(Arc::clone)?;

        if compiled_here {
            self.compilations.fetch_add(1, Ordering::Relaxed);
            tracing::info!(schema = %schema, "compiled and cached DFDL schema");
        } else {
            self.record_hit(schema);
        }
        Ok(decoder)
    }

    fn compile(&self, schema: &SchemaIdentity) -> Result<CompiledDecoder, CompilationError> {
        tracing::debug!(schema = %schema, "compiling DFDL schema");
        self.compiler.compile(schema).inspect_err(|e| {
            self.failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(schema = %schema, error = %e, "DFDL schema compilation failed");
        })
    }

    fn record_hit(&self, schema: &SchemaIdentity) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(schema = %schema, "compiled schema cache hit");
    }

    /// Whether a compiled decoder is cached for `schema`
    pub fn contains(&self, schema: &SchemaIdentity) -> bool {
        self.slots
            .read()
            .get(schema)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Number of compiled decoders held
    pub fn len(&self) -> usize {
        self.slots.read().values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            compilations: self.compilations.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

impl fmt::Debug for CompiledSchemaCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchemaCache")
            .field("compiled", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}
