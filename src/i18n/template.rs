//! Translation templates and token substitution.
//!
//! A template is whatever a translation table maps a source text to: either a
//! literal string carrying `{token}` placeholders, or a parametrized formatter
//! with an explicitly declared, ordered parameter list.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Named token values supplied to a translation call.
pub type Tokens = HashMap<String, String>;

/// A loaded translation table: source text => template.
pub type TranslationTable = HashMap<String, Template>;

type FormatterFn = dyn Fn(&[String]) -> String + Send + Sync;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Matches `{name}` placeholders; capture group 1 is the name.
pub(crate) fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder pattern"))
}

/// Build a token map from `(name, value)` pairs.
///
/// Values only need to implement `ToString`, so numbers can be passed directly:
///
/// ```
/// let t = lang_registry::tokens([("num", 5)]);
/// assert_eq!(t["num"], "5");
/// ```
pub fn tokens<I, K, V>(pairs: I) -> Tokens
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToString,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.to_string()))
        .collect()
}

/// Replace every `{key}` in `template` with the value of `key` from `tokens`.
///
/// Substitution is a single pass over the template: replaced values are never
/// scanned again, and placeholders with no matching token stay verbatim.
///
/// A placeholder name may not contain `{` or `}`: a token whose key contains a
/// brace never matches anything and is ignored.
pub fn substitute(template: &str, tokens: &Tokens) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| match tokens.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// A parametrized template: a function of named, ordered arguments.
///
/// The parameter names are declared alongside the function so tokens can be
/// mapped to positional arguments without any runtime introspection.
#[derive(Clone)]
pub struct Formatter {
    params: Vec<String>,
    func: Arc<FormatterFn>,
}

impl Formatter {
    /// Create a formatter taking the given parameters, in order.
    pub fn new<I, S, F>(params: I, func: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[String]) -> String + Send + Sync + 'static,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            func: Arc::new(func),
        }
    }

    /// Declared parameter names, in call order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Invoke the formatter with arguments drawn from `tokens`.
    ///
    /// A declared parameter without a supplied token receives the literal
    /// placeholder `{name}`, so gaps show up in the output instead of failing.
    pub fn call(&self, tokens: Option<&Tokens>) -> String {
        let args: Vec<String> = self
            .params
            .iter()
            .map(|param| match tokens.and_then(|t| t.get(param)) {
                Some(value) => value.clone(),
                None => format!("{{{}}}", param),
            })
            .collect();

        (self.func)(&args)
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// The resolved translation of one source text.
#[derive(Debug, Clone)]
pub enum Template {
    /// Literal text with optional `{token}` placeholders
    Static(String),
    /// Parametrized formatter
    Formatter(Formatter),
}

impl Template {
    /// Produce the final string for the given tokens.
    pub fn render(&self, tokens: Option<&Tokens>) -> String {
        match self {
            Template::Static(text) => match tokens {
                Some(tokens) if !tokens.is_empty() => substitute(text, tokens),
                _ => text.clone(),
            },
            Template::Formatter(formatter) => formatter.call(tokens),
        }
    }

    /// The literal text, if this is a static template.
    pub fn as_static(&self) -> Option<&str> {
        match self {
            Template::Static(text) => Some(text),
            Template::Formatter(_) => None,
        }
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Template::Static(text.to_string())
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Template::Static(text)
    }
}

impl From<Formatter> for Template {
    fn from(formatter: Formatter) -> Self {
        Template::Formatter(formatter)
    }
}
