//! Translation registry: domain registrations, table cache and active language.
//!
//! A registry is an ordinary value rather than process-wide state, so several
//! independent registries can coexist (e.g. one per tenant). Interior state
//! sits behind locks so a registry can be shared through an `Arc`.
//!
//! Resolution of a `(domain, code)` pair walks the slash-delimited cache key
//! `"{domain}/{code}"` from its longest prefix down to its first segment. The
//! first registered prefix whose resource exists provides the table; the
//! unmatched remainder of the key becomes the resource's relative path:
//!
//! ```text
//! register("foo", "/lang/foo")         "foo/bar/en" => /lang/foo/bar/en.json
//! register("foo/bar", "/lang/foo/bar") "foo/bar/en" => /lang/foo/bar/en.json
//! register("foo/bar/en", "/lang/en")   "foo/bar/en" => /lang/en.json
//! ```

use super::loader::{JsonFileLoader, ResourceLoader};
use super::metrics::RegistryMetrics;
use super::template::{substitute, Tokens, TranslationTable};
use super::validator::PlaceholderValidator;
use crate::config::Config;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Language code active in a new or reset registry.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Callback receiving diagnostic messages about missing translations.
pub type ErrorHook = Arc<dyn Fn(&str) + Send + Sync>;

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Resolves source texts to localized strings.
///
/// Missing resources and missing entries are never errors: translation
/// degrades to the source text and the condition is reported through the
/// optional error hook.
pub struct TranslationRegistry {
    /// Active language code
    code: RwLock<String>,

    /// Registered domain name => resource locator
    paths: RwLock<HashMap<String, String>>,

    /// "{domain}/{code}" => loaded table (empty when no resource was found)
    cache: RwLock<HashMap<String, Arc<TranslationTable>>>,

    on_error: RwLock<Option<ErrorHook>>,

    loader: Box<dyn ResourceLoader>,

    metrics: RegistryMetrics,
}

impl TranslationRegistry {
    /// Create a registry that reads resources through `loader`.
    pub fn new(loader: impl ResourceLoader + 'static) -> Self {
        Self {
            code: RwLock::new(DEFAULT_LANGUAGE.to_string()),
            paths: RwLock::new(HashMap::new()),
            cache: RwLock::new(HashMap::new()),
            on_error: RwLock::new(None),
            loader: Box::new(loader),
            metrics: RegistryMetrics::new(),
        }
    }

    /// Create a registry with the configured language and domain registrations.
    pub fn from_config(config: &Config, loader: impl ResourceLoader + 'static) -> Self {
        let registry = Self::new(loader);
        registry.set(config.language.as_str());

        for (domain, locator) in &config.domains {
            registry.register(domain.as_str(), locator.as_str());
        }

        registry
    }

    /// Change the active language code. Any string is accepted.
    pub fn set(&self, code: impl Into<String>) {
        *write(&self.code) = code.into();
    }

    /// The active language code.
    pub fn get(&self) -> String {
        read(&self.code).clone()
    }

    /// Register the resource locator (base path without extension) for a domain.
    ///
    /// Replaces any locator previously registered for the exact same domain.
    /// Nothing is loaded until a translation in the domain is requested.
    ///
    /// # Arguments
    /// * `domain` - Translation domain name (e.g., "vendor/package")
    /// * `locator` - Base path of the domain's files, without extension
    ///   (e.g., "/srv/lang/vendor/package")
    pub fn register(&self, domain: impl Into<String>, locator: impl Into<String>) {
        let domain = domain.into();
        let locator = locator.into();
        debug!("Registered translation domain {} => {}", domain, locator);
        write(&self.paths).insert(domain, locator);
    }

    /// Install a callback for "no translation file" and "missing translation" reports.
    pub fn set_error_hook<F>(&self, hook: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        *write(&self.on_error) = Some(Arc::new(hook));
    }

    /// Remove the error callback; reports are silently dropped afterwards.
    pub fn clear_error_hook(&self) {
        *write(&self.on_error) = None;
    }

    /// Translate `text` in `domain` using the active language.
    pub fn text(&self, domain: &str, text: &str, tokens: Option<&Tokens>) -> String {
        let code = self.get();
        self.translate(&code, domain, text, tokens)
    }

    /// Obtain a translator bound to `domain` and, optionally, a fixed language.
    ///
    /// Without a fixed code (or with an empty one) the translator reads the
    /// active language on every call, so later [`set`](Self::set) calls apply.
    ///
    /// # Arguments
    /// * `domain` - Translation domain name
    /// * `code` - Optional language code overriding the active one
    ///
    /// # Returns
    /// A `DomainTranslator` borrowing this registry.
    pub fn domain(&self, domain: impl Into<String>, code: Option<&str>) -> DomainTranslator<'_> {
        DomainTranslator {
            registry: self,
            domain: domain.into(),
            code: code.filter(|c| !c.is_empty()).map(str::to_string),
        }
    }

    /// Translate `text` in `domain` for an explicit language code.
    ///
    /// # Arguments
    /// * `code` - Language code (e.g., "en", "da")
    /// * `domain` - Translation domain name
    /// * `text` - English source text, also the lookup key
    /// * `tokens` - Optional token values for `{name}` placeholders or formatter parameters
    ///
    /// # Returns
    /// The rendered translation, or `text` itself (with tokens substituted)
    /// when the domain has no resource or the resource has no entry for it.
    pub fn translate(
        &self,
        code: &str,
        domain: &str,
        text: &str,
        tokens: Option<&Tokens>,
    ) -> String {
        let name = format!("{}/{}", domain, code);

        let cached = read(&self.cache).get(&name).cloned();
        let table = match cached {
            Some(table) => {
                self.metrics.record_cache_hit();
                table
            }
            None => {
                self.metrics.record_cache_miss();
                self.load(&name)
            }
        };

        match table.get(text) {
            Some(template) => template.render(tokens),
            None => {
                self.metrics.record_missing_entry();
                self.report(&format!("missing translation of '{}' for: {}", text, name));

                // The source text doubles as the template
                match tokens {
                    Some(tokens) if !tokens.is_empty() => substitute(text, tokens),
                    _ => text.to_string(),
                }
            }
        }
    }

    /// Restore the default language and forget all registrations, tables and counters.
    ///
    /// The error hook is left in place.
    pub fn reset(&self) {
        *write(&self.code) = DEFAULT_LANGUAGE.to_string();
        write(&self.paths).clear();
        write(&self.cache).clear();
        self.metrics.reset();
    }

    /// Whether a table (possibly empty) is cached for `domain` in `code`.
    pub fn is_loaded(&self, domain: &str, code: &str) -> bool {
        read(&self.cache).contains_key(&format!("{}/{}", domain, code))
    }

    /// Lookup counters for this registry.
    pub fn metrics(&self) -> &RegistryMetrics {
        &self.metrics
    }

    /// Resolve and cache the table for a `"{domain}/{code}"` key.
    fn load(&self, name: &str) -> Arc<TranslationTable> {
        let found = self.find_table(name);
        let missing = found.is_none();

        // Cached before reporting; the hook may translate in this domain.
        // Concurrent misses may both load, the first insert wins
        let table = write(&self.cache)
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(found.unwrap_or_default()))
            .clone();

        if missing {
            self.metrics.record_missing_resource();
            self.report(&format!("no translation file found for: {}", name));
        }

        table
    }

    fn find_table(&self, name: &str) -> Option<TranslationTable> {
        for resource in self.candidates(name) {
            if !self.loader.exists(&resource) {
                continue;
            }

            match self.loader.load(&resource) {
                Ok(table) => {
                    debug!("Resolved {} to {}", name, resource);
                    self.check_placeholders(&resource, &table);
                    return Some(table);
                }
                Err(e) => {
                    warn!("Skipping translation resource for {}: {}", name, e);
                }
            }
        }

        None
    }

    /// Resource names to try for `name`, most specific registered prefix first.
    fn candidates(&self, name: &str) -> Vec<String> {
        let paths = read(&self.paths);
        let extension = self.loader.extension();
        let mut segments: Vec<&str> = name.split('/').collect();
        let mut resources = Vec::new();

        while !segments.is_empty() {
            let prefix = segments.join("/");

            if let Some(locator) = paths.get(&prefix) {
                resources.push(format!(
                    "{}{}.{}",
                    locator,
                    &name[prefix.len()..],
                    extension
                ));
            }

            segments.pop();
        }

        resources
    }

    fn check_placeholders(&self, resource: &str, table: &TranslationTable) {
        let report = PlaceholderValidator::validate_table(table);

        for error in &report.errors {
            warn!("{}: {}", resource, error);
        }
        for warning in &report.warnings {
            warn!("{}: {}", resource, warning);
        }
    }

    fn report(&self, message: &str) {
        // Release the lock before calling out; the hook may use the registry
        let hook = read(&self.on_error).clone();

        match hook {
            Some(hook) => hook(message),
            None => debug!("{}", message),
        }
    }
}

impl Default for TranslationRegistry {
    fn default() -> Self {
        Self::new(JsonFileLoader::default())
    }
}

impl fmt::Debug for TranslationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationRegistry")
            .field("code", &*read(&self.code))
            .field("paths", &*read(&self.paths))
            .field("cached", &read(&self.cache).len())
            .finish_non_exhaustive()
    }
}

/// Translator bound to one domain of a registry.
///
/// Obtained from [`TranslationRegistry::domain`]; handy to hand to a view or
/// component so it doesn't repeat the domain name on every call.
#[derive(Debug, Clone)]
pub struct DomainTranslator<'a> {
    registry: &'a TranslationRegistry,
    domain: String,
    code: Option<String>,
}

impl DomainTranslator<'_> {
    /// Translate `text` in the bound domain.
    pub fn text(&self, text: &str, tokens: Option<&Tokens>) -> String {
        match &self.code {
            Some(code) => self.registry.translate(code, &self.domain, text, tokens),
            None => self.registry.text(&self.domain, text, tokens),
        }
    }

    /// The bound domain name.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The fixed language code, if any.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::loader::{LoadError, MemoryLoader};
    use crate::i18n::template::{tokens, Formatter, Template};
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn table(entries: &[(&str, &str)]) -> TranslationTable {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Template::from(*v)))
            .collect()
    }

    fn results_formatter() -> Template {
        Template::from(Formatter::new(["num"], |args| {
            if args[0] == "1" {
                "1 result".to_string()
            } else {
                format!("{} results", args[0])
            }
        }))
    }

    /// Loader holding the foo/bar tables under `lang/`.
    fn fixture_loader() -> MemoryLoader {
        let mut en = table(&[("Hello, {world}", "Greetings, {world}")]);
        en.insert("{num} results".to_string(), results_formatter());

        let da = table(&[("Hello, {world}", "Hej, {world}")]);

        MemoryLoader::new()
            .with("lang/foo/bar/en.json", en)
            .with("lang/foo/bar/da.json", da)
    }

    fn capture_errors(registry: &TranslationRegistry) -> Arc<Mutex<Vec<String>>> {
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&errors);
        registry.set_error_hook(move |message| sink.lock().unwrap().push(message.to_string()));
        errors
    }

    fn world() -> Tokens {
        tokens([("world", "World")])
    }

    // ==================== Language Code Tests ====================

    #[test]
    fn test_default_language() {
        let registry = TranslationRegistry::new(MemoryLoader::new());
        assert_eq!(registry.get(), DEFAULT_LANGUAGE);
        assert_eq!(registry.get(), "en");
    }

    #[test]
    fn test_set_accepts_any_code() {
        let registry = TranslationRegistry::new(MemoryLoader::new());
        registry.set("not-a-code");
        assert_eq!(registry.get(), "not-a-code");
    }

    // ==================== Missing Translation Tests ====================

    #[test]
    fn test_missing_translation_returns_source_text() {
        let registry = TranslationRegistry::new(MemoryLoader::new());
        assert_eq!(registry.text("foo/bar", "Hello", None), "Hello");
    }

    #[test]
    fn test_missing_translation_substitutes_tokens() {
        let registry = TranslationRegistry::new(MemoryLoader::new());

        assert_eq!(
            registry.text("foo/bar", "Hello, {world}", Some(&world())),
            "Hello, World"
        );
        assert_eq!(
            registry.text("foo/bar", "{num} results", Some(&tokens([("num", 5)]))),
            "5 results"
        );
    }

    #[test]
    fn test_reports_missing_file_and_translation() {
        let registry = TranslationRegistry::new(MemoryLoader::new());
        let errors = capture_errors(&registry);

        registry.text("foo/bar", "Hello", None);

        assert_eq!(
            *errors.lock().unwrap(),
            vec![
                "no translation file found for: foo/bar/en".to_string(),
                "missing translation of 'Hello' for: foo/bar/en".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_file_reported_once() {
        let registry = TranslationRegistry::new(MemoryLoader::new());
        let errors = capture_errors(&registry);

        registry.text("foo/bar", "Hello", None);
        registry.text("foo/bar", "Goodbye", None);

        let errors = errors.lock().unwrap();
        let file_reports = errors
            .iter()
            .filter(|m| m.starts_with("no translation file found"))
            .count();
        assert_eq!(file_reports, 1);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_missing_entry_in_loaded_table_is_reported() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "lang/foo");
        let errors = capture_errors(&registry);

        assert_eq!(registry.text("foo/bar", "Rename", None), "Rename");
        assert_eq!(
            *errors.lock().unwrap(),
            vec!["missing translation of 'Rename' for: foo/bar/en".to_string()]
        );
    }

    #[test]
    fn test_no_hook_is_silent() {
        let registry = TranslationRegistry::new(MemoryLoader::new());
        let errors = capture_errors(&registry);
        registry.clear_error_hook();

        registry.text("foo/bar", "Hello", None);
        assert!(errors.lock().unwrap().is_empty());
    }

    // ==================== Resolution Tests ====================

    #[test]
    fn test_translation_via_parent_domain() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "lang/foo");

        assert_eq!(
            registry.text("foo/bar", "Hello, {world}", Some(&world())),
            "Greetings, World"
        );
    }

    #[test]
    fn test_translation_via_exact_domain() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo/bar", "lang/foo/bar");

        assert_eq!(
            registry.text("foo/bar", "Hello, {world}", Some(&world())),
            "Greetings, World"
        );
    }

    #[test]
    fn test_translation_via_language_specific_registration() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo/bar/en", "lang/foo/bar/en");

        assert_eq!(
            registry.text("foo/bar", "Hello, {world}", Some(&world())),
            "Greetings, World"
        );
        assert_eq!(
            registry.text("foo/bar", "{num} results", Some(&tokens([("num", 5)]))),
            "5 results"
        );
    }

    #[test]
    fn test_longest_registered_prefix_wins() {
        let loader = fixture_loader().with(
            "override/en.json",
            table(&[("Hello, {world}", "Howdy, {world}")]),
        );
        let registry = TranslationRegistry::new(loader);
        registry.register("foo", "lang/foo");
        registry.register("foo/bar/en", "override/en");

        assert_eq!(
            registry.text("foo/bar", "Hello, {world}", Some(&world())),
            "Howdy, World"
        );
    }

    #[test]
    fn test_falls_back_when_specific_resource_missing() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "lang/foo");
        registry.register("foo/bar", "nowhere/foo/bar");

        assert_eq!(
            registry.text("foo/bar", "Hello, {world}", Some(&world())),
            "Greetings, World"
        );
    }

    #[test]
    fn test_register_overwrites_locator() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "nowhere");
        registry.register("foo", "lang/foo");

        assert_eq!(
            registry.text("foo/bar", "Hello, {world}", Some(&world())),
            "Greetings, World"
        );
    }

    #[test]
    fn test_register_does_not_load() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "lang/foo");
        assert!(!registry.is_loaded("foo/bar", "en"));

        registry.text("foo/bar", "Hello", None);
        assert!(registry.is_loaded("foo/bar", "en"));
    }

    #[test]
    fn test_candidates_order() {
        let registry = TranslationRegistry::new(MemoryLoader::new());
        registry.register("a", "/l/a");
        registry.register("a/b", "/l/ab");
        registry.register("a/b/c/en", "/l/en");

        assert_eq!(
            registry.candidates("a/b/c/en"),
            vec![
                "/l/en.json".to_string(),
                "/l/ab/c/en.json".to_string(),
                "/l/a/b/c/en.json".to_string(),
            ]
        );
    }

    #[test]
    fn test_prefix_must_match_whole_segments() {
        let registry = TranslationRegistry::new(MemoryLoader::new());
        registry.register("fo", "/l/fo");

        assert!(registry.candidates("foo/bar/en").is_empty());
    }

    // ==================== Formatter Tests ====================

    #[test]
    fn test_formatter_entry() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "lang/foo");

        assert_eq!(
            registry.text("foo/bar", "{num} results", Some(&tokens([("num", 1)]))),
            "1 result"
        );
        assert_eq!(
            registry.text("foo/bar", "{num} results", Some(&tokens([("num", 5)]))),
            "5 results"
        );
    }

    #[test]
    fn test_formatter_entry_without_tokens() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "lang/foo");

        assert_eq!(registry.text("foo/bar", "{num} results", None), "{num} results");
    }

    // ==================== Language Switching Tests ====================

    #[test]
    fn test_switch_languages() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "lang/foo");

        assert_eq!(
            registry.text("foo/bar", "Hello, {world}", Some(&world())),
            "Greetings, World"
        );

        registry.set("da");
        assert_eq!(registry.get(), "da");
        assert_eq!(
            registry.text("foo/bar", "Hello, {world}", Some(&world())),
            "Hej, World"
        );

        // Both languages stay cached independently
        assert!(registry.is_loaded("foo/bar", "en"));
        assert!(registry.is_loaded("foo/bar", "da"));
    }

    #[test]
    fn test_translate_with_explicit_code_ignores_active_language() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "lang/foo");

        assert_eq!(
            registry.translate("da", "foo/bar", "Hello, {world}", Some(&world())),
            "Hej, World"
        );
        assert_eq!(registry.get(), "en");
    }

    // ==================== Domain Translator Tests ====================

    #[test]
    fn test_domain_translator_late_binding() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "lang/foo");

        let t = registry.domain("foo/bar", None);
        assert_eq!(t.text("Hello, {world}", Some(&world())), "Greetings, World");

        registry.set("da");
        assert_eq!(t.text("Hello, {world}", Some(&world())), "Hej, World");
        assert_eq!(t.text("Rename", None), "Rename");
    }

    #[test]
    fn test_domain_translator_fixed_code() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "lang/foo");

        let t = registry.domain("foo/bar", Some("da"));
        assert_eq!(t.code(), Some("da"));
        assert_eq!(t.domain(), "foo/bar");
        assert_eq!(t.text("Hello, {world}", Some(&world())), "Hej, World");
    }

    #[test]
    fn test_domain_translator_empty_code_is_unbound() {
        let registry = TranslationRegistry::new(fixture_loader());
        let t = registry.domain("foo/bar", Some(""));
        assert_eq!(t.code(), None);
    }

    // ==================== Reset Tests ====================

    #[test]
    fn test_reset_restores_defaults() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "lang/foo");
        registry.set("da");
        registry.text("foo/bar", "Hello", None);

        registry.reset();

        assert_eq!(registry.get(), DEFAULT_LANGUAGE);
        assert!(!registry.is_loaded("foo/bar", "da"));
        assert_eq!(registry.metrics().cache_misses(), 0);
        assert_eq!(
            registry.text("foo/bar", "Hello, {world}", Some(&world())),
            "Hello, World"
        );
    }

    #[test]
    fn test_reset_keeps_error_hook() {
        let registry = TranslationRegistry::new(MemoryLoader::new());
        let errors = capture_errors(&registry);

        registry.reset();
        registry.text("x", "y", None);

        assert_eq!(errors.lock().unwrap().len(), 2);
    }

    // ==================== Metrics Tests ====================

    #[test]
    fn test_metrics_track_cache_and_misses() {
        let registry = TranslationRegistry::new(fixture_loader());
        registry.register("foo", "lang/foo");

        registry.text("foo/bar", "Hello, {world}", None);
        registry.text("foo/bar", "Rename", None);
        registry.text("baz", "Hello", None);

        let report = registry.metrics().report();
        assert_eq!(report.cache_misses, 2);
        assert_eq!(report.cache_hits, 1);
        assert_eq!(report.missing_resources, 1);
        assert_eq!(report.missing_entries, 2);
    }

    // ==================== Broken Resource Tests ====================

    struct BrokenLoader {
        inner: MemoryLoader,
        broken: HashSet<String>,
    }

    impl ResourceLoader for BrokenLoader {
        fn extension(&self) -> &str {
            self.inner.extension()
        }

        fn exists(&self, resource: &str) -> bool {
            self.broken.contains(resource) || self.inner.exists(resource)
        }

        fn load(&self, resource: &str) -> Result<TranslationTable, LoadError> {
            if self.broken.contains(resource) {
                return Err(LoadError::NotFound(resource.to_string()));
            }
            self.inner.load(resource)
        }
    }

    #[test]
    fn test_broken_resource_falls_back_to_shorter_prefix() {
        let loader = BrokenLoader {
            inner: fixture_loader(),
            broken: HashSet::from(["broken/en.json".to_string()]),
        };
        let registry = TranslationRegistry::new(loader);
        registry.register("foo", "lang/foo");
        registry.register("foo/bar", "broken");

        assert_eq!(
            registry.text("foo/bar", "Hello, {world}", Some(&world())),
            "Greetings, World"
        );
    }

    #[test]
    fn test_broken_only_resource_yields_empty_table() {
        let loader = BrokenLoader {
            inner: MemoryLoader::new(),
            broken: HashSet::from(["broken/en.json".to_string()]),
        };
        let registry = TranslationRegistry::new(loader);
        registry.register("foo/bar", "broken");
        let errors = capture_errors(&registry);

        assert_eq!(registry.text("foo/bar", "Hello", None), "Hello");
        assert_eq!(
            errors.lock().unwrap()[0],
            "no translation file found for: foo/bar/en"
        );
    }

    // ==================== Sharing Tests ====================

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TranslationRegistry>();
    }

    #[test]
    fn test_shared_registry_across_threads() {
        let registry = Arc::new(TranslationRegistry::new(fixture_loader()));
        registry.register("foo", "lang/foo");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry.translate("da", "foo/bar", "Hello, {world}", Some(&world()))
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "Hej, World");
        }
    }

    #[test]
    fn test_hook_may_use_registry() {
        let registry = Arc::new(TranslationRegistry::new(MemoryLoader::new()));
        let inner = Arc::clone(&registry);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        registry.set_error_hook(move |message| {
            sink.lock().unwrap().push(format!("{} [{}]", message, inner.get()));
        });
        registry.text("foo", "Hello", None);

        assert_eq!(
            seen.lock().unwrap()[0],
            "no translation file found for: foo/en [en]"
        );
    }

    #[test]
    fn test_hook_translating_same_domain_reports_missing_file_once() {
        let registry = Arc::new(TranslationRegistry::new(MemoryLoader::new()));
        let inner = Arc::clone(&registry);
        let reports = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reports);

        registry.set_error_hook(move |message| {
            let first = {
                let mut reports = sink.lock().unwrap();
                reports.push(message.to_string());
                reports.len() == 1
            };
            if first {
                inner.text("foo", "diag", None);
            }
        });

        assert_eq!(registry.text("foo", "Hello", None), "Hello");

        let reports = reports.lock().unwrap();
        let file_reports = reports
            .iter()
            .filter(|m| m.starts_with("no translation file found"))
            .count();
        assert_eq!(file_reports, 1);
        assert_eq!(
            *reports,
            vec![
                "no translation file found for: foo/en".to_string(),
                "missing translation of 'diag' for: foo/en".to_string(),
                "missing translation of 'Hello' for: foo/en".to_string(),
            ]
        );
        assert_eq!(registry.metrics().missing_resources(), 1);
        assert_eq!(registry.metrics().cache_misses(), 1);
    }
}
