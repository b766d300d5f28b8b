//! Internationalization (i18n) module: domain-scoped translation lookup.
//!
//! # Architecture
//!
//! - `registry`: The translation registry (active language, domain registrations, table cache)
//! - `template`: Static and parametrized templates plus token substitution
//! - `loader`: Resource loaders turning a resolved locator into a translation table
//! - `validator`: Placeholder consistency checks for loaded tables
//! - `metrics`: Per-registry lookup counters
//!
//! # Example
//!
//! ```rust,ignore
//! use lang_registry::{tokens, TranslationRegistry};
//!
//! let registry = TranslationRegistry::default();
//! registry.register("acme/shop", "/srv/lang/acme/shop");
//!
//! let greeting = registry.text("acme/shop", "Hello, {name}", Some(&tokens([("name", "Ada")])));
//!
//! // Formatter bound to a domain, re-reading the active language on each call
//! let t = registry.domain("acme/shop", None);
//! let label = t.text("Checkout", None);
//! ```

mod loader;
mod metrics;
mod registry;
mod template;
mod validator;

pub use loader::{FormatterSet, JsonFileLoader, LoadError, MemoryLoader, ResourceLoader};
pub use metrics::{MetricsReport, RegistryMetrics};
pub use registry::{DomainTranslator, ErrorHook, TranslationRegistry, DEFAULT_LANGUAGE};
pub use template::{substitute, tokens, Formatter, Template, Tokens, TranslationTable};
pub use validator::{PlaceholderValidator, ValidationReport};
