//! Namespace Scoping
//!
//! Stack-based record of the namespace bindings already declared on the
//! event stream, so each element only declares what is new.

/// Well-known namespace URIs
pub mod ns {
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";
    /// XML Schema instance namespace, home of `xsi:nil`
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
    pub const XSI_PREFIX: &str = "xsi";
}

/// Namespace binding (prefix -> URI); `None` prefix is the default namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceBinding {
    pub prefix: Option<String>,
    pub uri: String,
}

impl NamespaceBinding {
    pub fn new(prefix: Option<&str>, uri: impl Into<String>) -> Self {
        NamespaceBinding {
            // An empty prefix is the default namespace
            prefix: prefix.filter(|p| !p.is_empty()).map(str::to_owned),
            uri: uri.into(),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

#[derive(Debug, Clone)]
struct ScopedBinding {
    binding: NamespaceBinding,
    depth: u32,
}

/// Stack of in-scope namespace bindings
///
/// Lookups return the innermost binding for a prefix. Bindings declared
/// after [`push_scope`](Self::push_scope) are removed by the matching
/// [`pop_scope`](Self::pop_scope).
#[derive(Debug, Clone, Default)]
pub struct NamespaceStack {
    bindings: Vec<ScopedBinding>,
    depth: u32,
}

impl NamespaceStack {
    pub fn new() -> Self {
        NamespaceStack {
            bindings: Vec::with_capacity(16),
            depth: 0,
        }
    }

    /// Enter a new element scope
    pub fn push_scope(&mut self) {
        self.depth += 1;
    }

    /// Leave an element scope, removing any bindings declared in it
    pub fn pop_scope(&mut self) {
        while let Some(scoped) = self.bindings.last() {
            if scoped.depth < self.depth {
                break;
            }
            self.bindings.pop();
        }
        self.depth = self.depth.saturating_sub(1);
    }

    /// Declare a binding in the current scope
    pub fn declare(&mut self, binding: NamespaceBinding) {
        self.bindings.push(ScopedBinding {
            binding,
            depth: self.depth,
        });
    }

    /// Resolve a prefix (`None` for the default namespace) to its innermost URI
    pub fn resolve(&self, prefix: Option<&str>) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|scoped| scoped.binding.prefix() == prefix)
            .map(|scoped| scoped.binding.uri.as_str())
    }

    /// Whether `binding` is already the innermost binding for its prefix
    pub fn is_bound(&self, binding: &NamespaceBinding) -> bool {
        self.resolve(binding.prefix()) == Some(binding.uri.as_str())
    }

    /// Current scope depth
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of declared bindings, shadowed ones included
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
