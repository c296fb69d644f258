//! Schema Identity
//!
//! A schema reference plus the compilation options that change what the
//! compiler produces. Two identities are equal iff every field is equal,
//! which makes the identity the compiled-schema cache key.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Validation applied by the decoder while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ValidationMode {
    #[default]
    Off,
    /// Facet checks reported as diagnostics
    Limited,
    /// Full schema validation
    Full,
}

impl ValidationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationMode::Off => "off",
            ValidationMode::Limited => "limited",
            ValidationMode::Full => "full",
        }
    }
}

impl FromStr for ValidationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(ValidationMode::Off),
            "limited" => Ok(ValidationMode::Limited),
            "full" => Ok(ValidationMode::Full),
            _ => Err(ConfigError::InvalidValidationMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for ValidationMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one compiled schema
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaIdentity {
    uri: String,
    /// External variable bindings; ordered map so insertion order is irrelevant
    variables: BTreeMap<String, String>,
    validation_mode: ValidationMode,
    cache_on_disk: bool,
    debugging: bool,
}

impl SchemaIdentity {
    /// Identity with default options
    pub fn new(uri: impl Into<String>) -> Self {
        SchemaIdentity {
            uri: uri.into(),
            variables: BTreeMap::new(),
            validation_mode: ValidationMode::Off,
            cache_on_disk: false,
            debugging: false,
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_variables<I, K, V>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.variables
            .extend(variables.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    pub fn with_cache_on_disk(mut self, cache_on_disk: bool) -> Self {
        self.cache_on_disk = cache_on_disk;
        self
    }

    pub fn with_debugging(mut self, debugging: bool) -> Self {
        self.debugging = debugging;
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.validation_mode
    }

    pub fn cache_on_disk(&self) -> bool {
        self.cache_on_disk
    }

    pub fn debugging(&self) -> bool {
        self.debugging
    }
}

impl fmt::Display for SchemaIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [validation={}", self.uri, self.validation_mode)?;
        for (name, value) in &self.variables {
            write!(f, ", {}={}", name, value)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_variable_order_is_irrelevant() {
        let a = SchemaIdentity::new("/csv.dfdl.xsd")
            .with_variable("Encoding", "UTF-8")
            .with_variable("Separator", ",");
        let b = SchemaIdentity::new("/csv.dfdl.xsd")
            .with_variable("Separator", ",")
            .with_variable("Encoding", "UTF-8");

        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_every_field_participates_in_equality() {
        let base = SchemaIdentity::new("/csv.dfdl.xsd");

        assert_ne!(base, SchemaIdentity::new("/other.dfdl.xsd"));
        assert_ne!(base, base.clone().with_variable("Encoding", "UTF-8"));
        assert_ne!(base, base.clone().with_validation_mode(ValidationMode::Full));
        assert_ne!(base, base.clone().with_cache_on_disk(true));
        assert_ne!(base, base.clone().with_debugging(true));
    }

    #[test]
    fn test_validation_mode_parse() {
        assert_eq!("Off".parse::<ValidationMode>().unwrap(), ValidationMode::Off);
        assert_eq!("LIMITED".parse::<ValidationMode>().unwrap(), ValidationMode::Limited);
        assert_eq!(" full ".parse::<ValidationMode>().unwrap(), ValidationMode::Full);
        assert!(matches!(
            "strict".parse::<ValidationMode>(),
            Err(ConfigError::InvalidValidationMode(_))
        ));
    }

    #[test]
    fn test_display() {
        let identity = SchemaIdentity::new("/csv.dfdl.xsd").with_variable("Encoding", "ISO-8859-1");
        assert_eq!(identity.to_string(), "/csv.dfdl.xsd [validation=off, Encoding=ISO-8859-1]");
    }
}
