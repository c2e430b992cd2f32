// src/record.rs

use chrono::Local;
use indexmap::IndexMap;

/// Sentinel written whenever a field cannot be resolved from the page.
/// These exact strings are the dataset's convention; downstream consumers
/// filter on them, so they must never change casually.
pub const PLACEHOLDER: &str = "Non spécifié";
/// Feminine variant used for date fields.
pub const PLACEHOLDER_DATE: &str = "Non spécifiée";

/// One scraped listing: a flat, ordered mapping from column name to string
/// value. Every column a source declares is always present; a failed lookup
/// stores the placeholder instead of dropping the field. Records are built
/// once at extraction time and never mutated after being written out.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new(source: &str) -> Self {
        let mut fields = IndexMap::new();
        fields.insert("source".to_string(), source.to_string());
        Self { fields }
    }

    /// Sets a field. Blank values collapse to the placeholder so the
    /// "every field present and non-empty" invariant holds.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        let value = value.into();
        let value = value.trim();
        let value = if value.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            value.to_string()
        };
        self.fields.insert(field.to_string(), value);
    }

    /// Sets a field from an optional lookup result.
    pub fn set_opt(&mut self, field: &str, value: Option<String>) {
        match value {
            Some(v) => self.set(field, v),
            None => self.set(field, PLACEHOLDER),
        }
    }

    /// Like `set_opt` but defaults to the feminine placeholder (dates).
    pub fn set_opt_date(&mut self, field: &str, value: Option<String>) {
        match value {
            Some(v) => self.set(field, v),
            None => {
                self.fields
                    .insert(field.to_string(), PLACEHOLDER_DATE.to_string());
            }
        }
    }

    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or(PLACEHOLDER)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Today's date in the dataset's `date_scraping` format.
pub fn scrape_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
