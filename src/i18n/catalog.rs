//! Message catalogs: flat, immutable key → text maps, one per locale.

use crate::i18n::{I18nError, Locale};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Translated strings for one locale.
///
/// Keys are dotted paths into the source document (`contact.form.title`);
/// array entries are addressed by index (`contact.process.steps.0`).
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: Locale,
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Build a catalog from an already flattened key map.
    pub fn new(locale: Locale, entries: HashMap<String, String>) -> Self {
        Self { locale, entries }
    }

    /// Parse a catalog document (a JSON object, possibly nested).
    ///
    /// # Errors
    /// Returns `I18nError::CatalogParse` if the text is not JSON or the root
    /// is not an object.
    pub fn from_json(locale: Locale, text: &str) -> Result<Self, I18nError> {
        let value: Value = serde_json::from_str(text).map_err(|e| I18nError::CatalogParse {
            locale: locale.code().to_string(),
            reason: e.to_string(),
        })?;

        if !value.is_object() {
            return Err(I18nError::CatalogParse {
                locale: locale.code().to_string(),
                reason: "root must be a JSON object".to_string(),
            });
        }

        Ok(Self::new(locale, flatten_json(&value)))
    }

    /// The locale this catalog belongs to.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Look up a key.
    ///
    /// # Errors
    /// Returns `I18nError::MissingKey` if the catalog does not define `key`.
    pub fn get(&self, key: &str) -> Result<&str, I18nError> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| I18nError::MissingKey {
                locale: self.locale.code().to_string(),
                key: key.to_string(),
            })
    }

    /// Look up a key for rendering.
    ///
    /// A missing key renders as a visible `⟦missing: key⟧` marker and is
    /// logged, so gaps show up on the page instead of being papered over.
    pub fn text(&self, key: &str) -> String {
        match self.get(key) {
            Ok(value) => value.to_string(),
            Err(e) => {
                warn!("{}", e);
                missing_marker(key)
            }
        }
    }

    /// Look up a key and substitute `{name}` placeholders.
    ///
    /// Placeholders without a matching argument are left as-is.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.text(key), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }

    /// Check whether a key is defined.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over all keys (in no particular order).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of keys in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog defines no keys at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect consecutive indexed entries under `prefix` (`prefix.0`,
    /// `prefix.1`, ...) until the first gap.
    pub fn list(&self, prefix: &str) -> Vec<&str> {
        (0..)
            .map(|i| self.entries.get(&format!("{}.{}", prefix, i)))
            .take_while(Option::is_some)
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

/// Visible placeholder rendered in place of a missing translation.
pub fn missing_marker(key: &str) -> String {
    format!("⟦missing: {}⟧", key)
}

/// Flatten a nested JSON document into dot-separated keys.
///
/// Objects contribute `parent.child`, arrays contribute `parent.0`,
/// `parent.1`, ... Non-string scalars are stored as their JSON text.
pub fn flatten_json(json: &Value) -> HashMap<String, String> {
    let mut result = HashMap::new();
    flatten_json_value(json, None, &mut result);
    result
}

fn flatten_json_value(json: &Value, prefix: Option<&str>, result: &mut HashMap<String, String>) {
    let join = |segment: &str| prefix.map_or_else(|| segment.to_string(), |p| format!("{}.{}", p, segment));

    match json {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_json_value(value, Some(&join(key)), result);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten_json_value(value, Some(&join(&index.to_string())), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}
