//! Parser Configuration
//!
//! Host-supplied settings for one parser instance, deserialisable from TOML:
//!
//! ```toml
//! schema_uri = "/schemas/csv.dfdl.xsd"
//! validation_mode = "limited"
//! content_encoding = "ISO-8859-1"
//! indent = true
//!
//! [variables]
//! Separator = ";"
//! ```
//!
//! The camelCase names used by pipeline descriptors (`schemaURI`,
//! `validationMode`, `cacheOnDisk`, `contentEncoding`) are accepted too.

use crate::core::Charset;
use crate::error::{ConfigError, EncodingError};
use crate::schema::{SchemaIdentity, ValidationMode};
use serde::Deserialize;
use std::collections::BTreeMap;

fn default_content_encoding() -> String {
    Charset::Utf8.label().to_string()
}

/// Settings for a [`DfdlParser`](crate::DfdlParser)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    /// Location of the DFDL schema; required
    #[serde(alias = "schemaURI", alias = "schemaUri")]
    pub schema_uri: String,
    /// External variable bindings
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    #[serde(default, alias = "validationMode")]
    pub validation_mode: ValidationMode,
    #[serde(default, alias = "cacheOnDisk")]
    pub cache_on_disk: bool,
    #[serde(default)]
    pub debugging: bool,
    /// Pretty-print via whitespace character events
    #[serde(default)]
    pub indent: bool,
    /// Charset assumed for byte inputs that do not declare one
    #[serde(default = "default_content_encoding", alias = "contentEncoding")]
    pub content_encoding: String,
}

impl ParserConfig {
    pub fn new(schema_uri: impl Into<String>) -> Self {
        ParserConfig {
            schema_uri: schema_uri.into(),
            variables: BTreeMap::new(),
            validation_mode: ValidationMode::Off,
            cache_on_disk: false,
            debugging: false,
            indent: false,
            content_encoding: default_content_encoding(),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
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

    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_content_encoding(mut self, label: impl Into<String>) -> Self {
        self.content_encoding = label.into();
        self
    }

    /// Check the settings that deserialisation alone cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema_uri.trim().is_empty() {
            return Err(ConfigError::MissingSchemaUri);
        }
        Ok(())
    }

    /// Cache key for the schema these settings compile
    pub fn schema_identity(&self) -> SchemaIdentity {
        SchemaIdentity::new(self.schema_uri.as_str())
            .with_variables(self.variables.clone())
            .with_validation_mode(self.validation_mode)
            .with_cache_on_disk(self.cache_on_disk)
            .with_debugging(self.debugging)
    }

    /// Resolved host content encoding
    pub fn content_charset(&self) -> Result<Charset, EncodingError> {
        Charset::from_label(&self.content_encoding)
    }
}
