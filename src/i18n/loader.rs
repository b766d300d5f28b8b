//! Resource loaders: turn a resolved resource name into a translation table.
//!
//! The registry builds a resource name as `locator + remainder + "." + extension`
//! and asks its loader whether it exists and, if so, to load it.

use super::template::{Formatter, Template, TranslationTable};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a translation resource.
///
/// These never escape a translation call: the registry logs them and treats
/// the resource as unavailable.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("translation resource not found: {0}")]
    NotFound(String),

    #[error("failed to read translation resource {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse translation resource {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("translation resource {path}: entry '{key}' refers to unknown formatter '{name}'")]
    UnknownFormatter {
        path: String,
        key: String,
        name: String,
    },
}

/// Source of translation tables for the registry.
pub trait ResourceLoader: Send + Sync {
    /// File extension (without the dot) appended to every resource name.
    fn extension(&self) -> &str;

    /// Whether the named resource exists.
    fn exists(&self, resource: &str) -> bool;

    /// Load the named resource into a translation table.
    fn load(&self, resource: &str) -> Result<TranslationTable, LoadError>;
}

/// Named formatter functions that resource files may refer to.
#[derive(Debug, Clone, Default)]
pub struct FormatterSet {
    formatters: HashMap<String, Formatter>,
}

impl FormatterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, formatter: Formatter) -> Self {
        self.insert(name, formatter);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, formatter: Formatter) {
        self.formatters.insert(name.into(), formatter);
    }

    pub fn get(&self, name: &str) -> Option<&Formatter> {
        self.formatters.get(name)
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}

/// One value in a JSON translation file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Text(String),
    Formatter { formatter: String },
}

/// Loads JSON translation files from the filesystem.
///
/// A file is a single JSON object mapping source text to either a replacement
/// string or a formatter reference:
///
/// ```json
/// {
///     "Hello, {world}": "Greetings, {world}",
///     "{num} results": { "formatter": "results" }
/// }
/// ```
///
/// Formatter references are resolved against the loader's [`FormatterSet`]
/// when the file is loaded, never at translation time.
#[derive(Debug, Clone, Default)]
pub struct JsonFileLoader {
    formatters: FormatterSet,
}

impl JsonFileLoader {
    pub fn new(formatters: FormatterSet) -> Self {
        Self { formatters }
    }

    /// Parse JSON table contents. `path` is only used for error messages.
    pub fn parse(&self, path: &str, contents: &str) -> Result<TranslationTable, LoadError> {
        let raw: HashMap<String, RawEntry> =
            serde_json::from_str(contents).map_err(|source| LoadError::Parse {
                path: path.to_string(),
                source,
            })?;

        raw.into_iter()
            .map(|(key, entry)| {
                let template = match entry {
                    RawEntry::Text(text) => Template::Static(text),
                    RawEntry::Formatter { formatter: name } => match self.formatters.get(&name) {
                        Some(formatter) => Template::Formatter(formatter.clone()),
                        None => {
                            return Err(LoadError::UnknownFormatter {
                                path: path.to_string(),
                                key,
                                name,
                            })
                        }
                    },
                };
                Ok((key, template))
            })
            .collect()
    }
}

impl ResourceLoader for JsonFileLoader {
    fn extension(&self) -> &str {
        "json"
    }

    fn exists(&self, resource: &str) -> bool {
        Path::new(resource).is_file()
    }

    fn load(&self, resource: &str) -> Result<TranslationTable, LoadError> {
        let contents = std::fs::read_to_string(resource).map_err(|source| LoadError::Io {
            path: resource.to_string(),
            source,
        })?;

        let table = self.parse(resource, &contents)?;
        debug!("Loaded {} entries from {}", table.len(), resource);
        Ok(table)
    }
}

/// Serves translation tables from memory, keyed by full resource name.
///
/// Useful for embedding translations in the binary and for tests.
#[derive(Debug, Clone)]
pub struct MemoryLoader {
    extension: String,
    resources: HashMap<String, TranslationTable>,
}

impl MemoryLoader {
    /// Create an empty loader using the `json` extension.
    pub fn new() -> Self {
        Self {
            extension: "json".to_string(),
            resources: HashMap::new(),
        }
    }

    /// Use a different extension when the registry builds resource names.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builder-style insert.
    pub fn with(mut self, resource: impl Into<String>, table: TranslationTable) -> Self {
        self.insert(resource, table);
        self
    }

    pub fn insert(&mut self, resource: impl Into<String>, table: TranslationTable) {
        self.resources.insert(resource.into(), table);
    }
}

impl Default for MemoryLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLoader for MemoryLoader {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn exists(&self, resource: &str) -> bool {
        self.resources.contains_key(resource)
    }

    fn load(&self, resource: &str) -> Result<TranslationTable, LoadError> {
        self.resources
            .get(resource)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(resource.to_string()))
    }
}
