//! Attribute Construction
//!
//! Computes the attribute set of an element's start event from the element
//! and the bindings already in scope. Pure: the namespace stack is only read,
//! and the bindings to push are returned alongside the attributes.

use super::events::{Attribute, AttributeSet};
use crate::core::qname;
use crate::infoset::namespace::ns;
use crate::infoset::{ElementMetadata, InfosetNode, NamespaceBinding, NamespaceStack};
use std::collections::HashSet;

/// Attributes for one start element plus the bindings it introduces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementAttributes {
    pub attributes: AttributeSet,
    /// Bindings to declare in the element's scope
    pub declared: Vec<NamespaceBinding>,
}

/// Namespace declarations for the element's minimized scope that are not already in scope
///
/// An element without a local name declares nothing.
pub fn namespace_declarations(metadata: &ElementMetadata, namespaces: &NamespaceStack) -> ElementAttributes {
    let mut out = ElementAttributes::default();
    if !metadata.has_name() {
        return out;
    }

    let mut seen = HashSet::new();
    for binding in &metadata.scope {
        // Innermost binding wins when a prefix repeats
        if !seen.insert(binding.prefix()) || namespaces.is_bound(binding) {
            continue;
        }
        out.attributes.push(declaration(binding));
        out.declared.push(binding.clone());
    }
    out
}

/// Full attribute set for a node's start element
///
/// Namespace declarations, then for nil elements `xsi:nil="true"` and, when
/// `xsi` is not already bound to the schema-instance namespace, `xmlns:xsi`.
/// An element without a local name gets no attributes at all.
pub fn element_attributes(node: &InfosetNode, namespaces: &NamespaceStack) -> ElementAttributes {
    let metadata = node.metadata();
    let mut out = namespace_declarations(metadata, namespaces);
    if !metadata.has_name() || !node.is_nilled() {
        return out;
    }

    out.attributes.push(Attribute::new(
        ns::XSI,
        qname::join(Some(ns::XSI_PREFIX), "nil"),
        "true",
    ));

    let xsi = NamespaceBinding::new(Some(ns::XSI_PREFIX), ns::XSI);
    if !namespaces.is_bound(&xsi) && !out.declared.contains(&xsi) {
        out.attributes.push(declaration(&xsi));
        out.declared.push(xsi);
    }
    out
}

fn declaration(binding: &NamespaceBinding) -> Attribute {
    let name = match binding.prefix() {
        Some(prefix) => qname::join(Some("xmlns"), prefix),
        None => "xmlns".to_string(),
    };
    Attribute::new(ns::XMLNS, name, binding.uri.as_str())
}
