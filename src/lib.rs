//! Runtime translation registry.
//!
//! Resolves an English source string within a hierarchical translation domain
//! (e.g. `"vendor/package/sub"`) to its localized template, then substitutes
//! named tokens into it. Domains are registered against resource locators;
//! a request for `"a/b/c"` falls back to the longest registered ancestor.

pub mod config;
pub mod i18n;

pub use i18n::{
    substitute, tokens, DomainTranslator, ErrorHook, Formatter, FormatterSet, JsonFileLoader,
    LoadError, MemoryLoader, MetricsReport, PlaceholderValidator, RegistryMetrics, ResourceLoader,
    Template, Tokens, TranslationRegistry, TranslationTable, ValidationReport, DEFAULT_LANGUAGE,
};
