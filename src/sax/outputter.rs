//! Infoset Outputter
//!
//! Walks an infoset tree and emits it as SAX events.
//!
//! ## Traversal
//!
//! Pre-order, depth-first, children in document order. For every element:
//!
//! 1. compute its attributes against the current [`NamespaceStack`]
//!    (see [`element_attributes`]) and push the bindings it introduces
//! 2. `start_element`
//! 3. simple: `characters` with the value unless nil;
//!    complex: recurse into the children
//! 4. `end_element`, then pop the bindings pushed in step 1
//!
//! Uses an explicit stack instead of recursion so deeply nested infosets
//! cannot overflow the call stack. Any sink error stops the walk at once.

use super::attributes::{element_attributes, ElementAttributes};
use super::sink::EventSink;
use crate::core::qname;
use crate::error::SinkError;
use crate::infoset::{ElementMetadata, InfosetNode, NamespaceStack};

/// Indentation unit per nesting level
const INDENT: &str = "  ";

enum Step<'n> {
    Enter(&'n InfosetNode),
    Close(&'n InfosetNode),
}

/// Translates infosets into events on a sink
pub struct InfosetOutputter<S> {
    sink: S,
    namespaces: NamespaceStack,
    /// Scope depth of the caller-supplied bindings
    base_scope: u32,
    indent: bool,
    depth: usize,
}

impl<S: EventSink> InfosetOutputter<S> {
    pub fn new(sink: S) -> Self {
        Self::with_namespaces(sink, NamespaceStack::new())
    }

    /// Start from bindings the consumer already has in scope
    pub fn with_namespaces(sink: S, namespaces: NamespaceStack) -> Self {
        InfosetOutputter {
            base_scope: namespaces.depth(),
            sink,
            namespaces,
            indent: false,
            depth: 0,
        }
    }

    /// Emit whitespace so serialised output is pretty-printed
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    pub fn namespaces(&self) -> &NamespaceStack {
        &self.namespaces
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Emit one infoset tree
    ///
    /// Scopes left open by an earlier walk that a sink error cut short are
    /// discarded first, so the outputter stays usable after a failure.
    pub fn output(&mut self, root: &InfosetNode) -> Result<(), SinkError> {
        self.reset();

        let mut stack: Vec<Step<'_>> = Vec::with_capacity(64);
        stack.push(Step::Enter(root));

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(node) => {
                    self.start(node)?;
                    match node {
                        InfosetNode::Simple(simple) => {
                            if !simple.nilled {
                                self.sink.characters(&simple.text)?;
                            }
                            self.end(&simple.metadata)?;
                        }
                        InfosetNode::Complex(complex) => {
                            self.depth += 1;
                            stack.push(Step::Close(node));
                            stack.extend(complex.children.iter().rev().map(Step::Enter));
                        }
                    }
                }
                Step::Close(node) => {
                    self.depth -= 1;
                    if let InfosetNode::Complex(complex) = node {
                        if !complex.children.is_empty() {
                            self.newline()?;
                        }
                    }
                    self.end(node.metadata())?;
                }
            }
        }

        if self.indent {
            self.sink.characters("\n")?;
        }
        Ok(())
    }

    fn reset(&mut self) {
        while self.namespaces.depth() > self.base_scope {
            self.namespaces.pop_scope();
        }
        self.depth = 0;
    }

    fn start(&mut self, node: &InfosetNode) -> Result<(), SinkError> {
        let ElementAttributes { attributes, declared } = element_attributes(node, &self.namespaces);

        self.namespaces.push_scope();
        for binding in declared {
            self.namespaces.declare(binding);
        }

        if self.depth > 0 {
            self.newline()?;
        }

        let metadata = node.metadata();
        self.sink.start_element(
            &metadata.namespace,
            &metadata.name,
            &qualified_name(metadata),
            &attributes,
        )
    }

    fn end(&mut self, metadata: &ElementMetadata) -> Result<(), SinkError> {
        self.sink
            .end_element(&metadata.namespace, &metadata.name, &qualified_name(metadata))?;
        self.namespaces.pop_scope();
        Ok(())
    }

    fn newline(&mut self) -> Result<(), SinkError> {
        if !self.indent {
            return Ok(());
        }
        let mut text = String::with_capacity(1 + INDENT.len() * self.depth);
        text.push('\n');
        for _ in 0..self.depth {
            text.push_str(INDENT);
        }
        self.sink.characters(&text)
    }
}

/// `prefix:local` when a non-default prefix applies; empty for an unnamed element
fn qualified_name(metadata: &ElementMetadata) -> String {
    if !metadata.has_name() {
        return String::new();
    }
    qname::join(metadata.prefix.as_deref(), &metadata.name)
}
