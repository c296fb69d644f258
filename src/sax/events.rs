//! SAX Event Types
//!
//! Attributes and the owned events recorded by sinks such as
//! [`SaxCollector`](super::SaxCollector).

use crate::core::qname;

/// An attribute on an emitted start element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Namespace URI; the xmlns namespace for namespace declarations
    pub namespace_uri: String,
    pub local_name: String,
    /// Name as written, e.g. `xsi:nil` or `xmlns:ex`
    pub qualified_name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(
        namespace_uri: impl Into<String>,
        qualified_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let qualified_name = qualified_name.into();
        let local_name = qname::split(&qualified_name).1.to_string();
        Attribute {
            namespace_uri: namespace_uri.into(),
            local_name,
            qualified_name,
            value: value.into(),
        }
    }

    /// Prefix of the qualified name, if any
    pub fn prefix(&self) -> Option<&str> {
        qname::split(&self.qualified_name).0
    }
}

/// Attributes of one start element
///
/// Order carries no meaning; look attributes up by qualified name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        AttributeSet::default()
    }

    pub fn push(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Get an attribute by qualified name
    pub fn get(&self, qualified_name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.qualified_name == qualified_name)
    }

    /// Get an attribute value by qualified name
    pub fn value(&self, qualified_name: &str) -> Option<&str> {
        self.get(qualified_name).map(|a| a.value.as_str())
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.get(qualified_name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        AttributeSet {
            attributes: iter.into_iter().collect(),
        }
    }
}

/// A recorded SAX event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaxEvent {
    StartElement {
        namespace_uri: String,
        local_name: String,
        qualified_name: String,
        attributes: AttributeSet,
    },
    Characters(String),
    EndElement {
        namespace_uri: String,
        local_name: String,
        qualified_name: String,
    },
}

impl SaxEvent {
    /// Check if this is a start element event
    #[inline]
    pub fn is_start_element(&self) -> bool {
        matches!(self, SaxEvent::StartElement { .. })
    }

    /// Check if this is an end element event
    #[inline]
    pub fn is_end_element(&self) -> bool {
        matches!(self, SaxEvent::EndElement { .. })
    }

    /// Check if this is a characters event
    #[inline]
    pub fn is_characters(&self) -> bool {
        matches!(self, SaxEvent::Characters(_))
    }

    /// Qualified name of a start or end element
    pub fn element_name(&self) -> Option<&str> {
        match self {
            SaxEvent::StartElement { qualified_name, .. } | SaxEvent::EndElement { qualified_name, .. } => {
                Some(qualified_name)
            }
            SaxEvent::Characters(_) => None,
        }
    }

    /// Attributes of a start element
    pub fn attributes(&self) -> Option<&AttributeSet> {
        match self {
            SaxEvent::StartElement { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    pub fn as_characters(&self) -> Option<&str> {
        match self {
            SaxEvent::Characters(text) => Some(text),
            _ => None,
        }
    }
}
