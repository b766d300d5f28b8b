//! Placeholder validation for loaded translation tables.
//!
//! A static translation should carry the same `{token}` placeholders as the
//! source text it translates. Dropped placeholders lose information silently;
//! invented ones can never be filled by callers.

use super::template::{placeholder_regex, Template, TranslationTable};
use std::collections::BTreeSet;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Placeholders the translation introduces that the source does not have
    pub errors: Vec<String>,

    /// Placeholders of the source that the translation drops
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for placeholder consistency.
pub struct PlaceholderValidator;

impl PlaceholderValidator {
    /// Compare the placeholders of `source` with those of its translation.
    pub fn validate(source: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        let source_names = Self::extract_placeholders(source);
        let translated_names = Self::extract_placeholders(translated);

        for name in source_names.difference(&translated_names) {
            report.warnings.push(format!(
                "Translation of '{}' drops placeholder {{{}}}",
                source, name
            ));
        }

        for name in translated_names.difference(&source_names) {
            report.errors.push(format!(
                "Translation of '{}' introduces unknown placeholder {{{}}}",
                source, name
            ));
        }

        report
    }

    /// Validate every static entry of a table. Formatter entries are skipped.
    pub fn validate_table(table: &TranslationTable) -> ValidationReport {
        let mut report = ValidationReport::new();

        let mut keys: Vec<&String> = table.keys().collect();
        keys.sort();

        for source in keys {
            if let Some(Template::Static(translated)) = table.get(source) {
                report.merge(Self::validate(source, translated));
            }
        }

        report
    }

    /// Extract the distinct placeholder names from text
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        placeholder_regex()
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
