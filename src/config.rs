use crate::i18n::DEFAULT_LANGUAGE;
use anyhow::{bail, Context, Result};

/// Environment variable holding the initial language code.
pub const LANGUAGE_VAR: &str = "LANG_REGISTRY_LANGUAGE";

/// Environment variable holding `domain=locator` pairs separated by `;`.
pub const DOMAINS_VAR: &str = "LANG_REGISTRY_DOMAINS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Language code active when the registry is created
    pub language: String,

    /// Domain registrations, in declaration order
    pub domains: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            domains: Vec::new(),
        }
    }
}

impl Config {
    /// Load `.env` (if present), then read the configuration from the environment.
    pub fn load() -> Result<Self> {
        // Missing .env is fine; real environment variables take precedence anyway
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        let language = std::env::var(LANGUAGE_VAR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let domains = match std::env::var(DOMAINS_VAR) {
            Ok(value) => parse_domains(&value)
                .with_context(|| format!("{} is malformed", DOMAINS_VAR))?,
            Err(_) => Vec::new(),
        };

        Ok(Self { language, domains })
    }
}

/// Parse `domain=locator;domain=locator` into registration pairs.
///
/// Empty items (e.g. a trailing `;`) are ignored.
pub fn parse_domains(value: &str) -> Result<Vec<(String, String)>> {
    let mut domains = Vec::new();

    for item in value.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((domain, locator)) = item.split_once('=') else {
            bail!("expected domain=locator, got '{}'", item);
        };

        let domain = domain.trim();
        let locator = locator.trim();

        if domain.is_empty() {
            bail!("missing domain name in '{}'", item);
        }
        if locator.is_empty() {
            bail!("missing locator for domain '{}'", domain);
        }

        domains.push((domain.to_string(), locator.to_string()));
    }

    Ok(domains)
}
