//! Infoset Nodes
//!
//! The decoder's result tree: namespace-qualified simple (leaf) and complex
//! (container) elements. Decoders build these; the outputter walks them.

use super::namespace::NamespaceBinding;

/// Primitive type of a simple element's value
///
/// Values are carried in their canonical lexical form, so the tag is only
/// needed by consumers that care about the original type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimType {
    #[default]
    String,
    Boolean,
    /// Any integral type (byte through unbounded integer, signed or not)
    Integer,
    Decimal,
    Float,
    Double,
    Date,
    Time,
    DateTime,
    HexBinary,
    AnyUri,
}

/// Schema-derived facts about an element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementMetadata {
    /// Local name; may be empty when the schema leaves it undefined
    pub name: String,
    /// Namespace URI; empty for no namespace
    pub namespace: String,
    /// Prefix used for the qualified name
    pub prefix: Option<String>,
    /// Minimized in-scope namespace bindings, innermost first
    pub scope: Vec<NamespaceBinding>,
    pub optional: bool,
    pub array: bool,
    pub nillable: bool,
}

impl ElementMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        ElementMetadata {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether the element has a usable local name
    #[inline]
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A typed leaf element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleElement {
    pub metadata: ElementMetadata,
    pub prim_type: PrimType,
    pub nilled: bool,
    /// Canonical text of the value
    pub text: String,
}

/// A container element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexElement {
    pub metadata: ElementMetadata,
    pub nilled: bool,
    /// Children in document order
    pub children: Vec<InfosetNode>,
}

impl Drop for ComplexElement {
    // Flattens the subtree so dropping a deeply nested infoset does not recurse
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            if let InfosetNode::Complex(complex) = &mut node {
                pending.append(&mut complex.children);
            }
        }
    }
}

/// One node of a decoded infoset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfosetNode {
    Simple(SimpleElement),
    Complex(ComplexElement),
}

impl InfosetNode {
    /// A non-nil simple element
    pub fn simple(name: impl Into<String>, prim_type: PrimType, text: impl Into<String>) -> Self {
        InfosetNode::Simple(SimpleElement {
            metadata: ElementMetadata::new(name),
            prim_type,
            nilled: false,
            text: text.into(),
        })
    }

    /// A simple string element
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::simple(name, PrimType::String, text)
    }

    /// A non-nil complex element
    pub fn complex(name: impl Into<String>, children: Vec<InfosetNode>) -> Self {
        InfosetNode::Complex(ComplexElement {
            metadata: ElementMetadata::new(name),
            nilled: false,
            children,
        })
    }

    /// Place the element in a namespace with the given prefix
    pub fn with_namespace(mut self, uri: impl Into<String>, prefix: Option<&str>) -> Self {
        let metadata = self.metadata_mut();
        metadata.namespace = uri.into();
        metadata.prefix = prefix.map(str::to_owned);
        self
    }

    /// Add a binding to the element's minimized scope
    pub fn with_binding(mut self, prefix: Option<&str>, uri: impl Into<String>) -> Self {
        self.metadata_mut().scope.push(NamespaceBinding::new(prefix, uri));
        self
    }

    /// Mark the element nil (and nillable)
    pub fn nilled(mut self) -> Self {
        match &mut self {
            InfosetNode::Simple(e) => e.nilled = true,
            InfosetNode::Complex(e) => e.nilled = true,
        }
        self.metadata_mut().nillable = true;
        self
    }

    pub fn metadata(&self) -> &ElementMetadata {
        match self {
            InfosetNode::Simple(e) => &e.metadata,
            InfosetNode::Complex(e) => &e.metadata,
        }
    }

    pub fn metadata_mut(&mut self) -> &mut ElementMetadata {
        match self {
            InfosetNode::Simple(e) => &mut e.metadata,
            InfosetNode::Complex(e) => &mut e.metadata,
        }
    }

    pub fn is_nilled(&self) -> bool {
        match self {
            InfosetNode::Simple(e) => e.nilled,
            InfosetNode::Complex(e) => e.nilled,
        }
    }

    /// Number of elements in this subtree, including this one
    pub fn element_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            if let InfosetNode::Complex(e) = node {
                stack.extend(&e.children);
            }
        }
        count
    }
}
