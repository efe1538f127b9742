//! Localization boundary
//!
//! Keys may carry their namespace inline as `"namespace|message"`. Lookups never
//! fail: an unknown key falls back to its message part.

use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_NAMESPACE: &str = "translation";
const NAMESPACE_SEPARATOR: char = '|';

const ENGLISH: &str = r#"{
    "glossary": {
        "Resource Quotas": "Resource Quotas",
        "Resource Quota": "Resource Quota",
        "Namespace": "Namespace",
        "Cluster": "Cluster"
    },
    "translation": {
        "Name": "Name",
        "Age": "Age",
        "Request": "Request",
        "Limit": "Limit",
        "Create": "Create",
        "Cancel": "Cancel",
        "Hard limits": "Hard limits",
        "Loading…": "Loading…",
        "No data to be shown.": "No data to be shown.",
        "Filter": "Filter",
        "All namespaces": "All namespaces",
        "Rows per page": "Rows per page",
        "Previous": "Previous",
        "Next": "Next"
    }
}"#;

pub trait Translator {
    fn translate(&self, key: &str, namespace: &str) -> String;
}

/// Split `"ns|message"` into its parts, using `default_ns` when there is no prefix
pub fn split_key<'a>(key: &'a str, default_ns: &'a str) -> (&'a str, &'a str) {
    match key.split_once(NAMESPACE_SEPARATOR) {
        Some((ns, message)) if !ns.is_empty() => (ns, message),
        Some((_, message)) => (default_ns, message),
        None => (default_ns, key),
    }
}

/// Translate, falling back to the key's message part if the result is blank
pub fn translate_non_empty(translator: &dyn Translator, key: &str, namespace: &str) -> String {
    let text = translator.translate(key, namespace);
    if text.trim().is_empty() {
        split_key(key, namespace).1.to_string()
    } else {
        text
    }
}

/// Translator that only strips namespaces
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyFallback;

impl Translator for KeyFallback {
    fn translate(&self, key: &str, namespace: &str) -> String {
        split_key(key, namespace).1.to_string()
    }
}

/// Message catalog: namespace → key → text
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    namespaces: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Built-in English catalog
    pub fn english() -> Self {
        Self::from_json(ENGLISH).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Overlay `other` on top of this catalog
    pub fn merge(mut self, other: Catalog) -> Self {
        for (ns, entries) in other.namespaces {
            self.namespaces.entry(ns).or_default().extend(entries);
        }
        self
    }

    pub fn lookup(&self, namespace: &str, message: &str) -> Option<&str> {
        self.namespaces
            .get(namespace)
            .and_then(|entries| entries.get(message))
            .map(String::as_str)
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, namespace: &str) -> String {
        let (ns, message) = split_key(key, namespace);
        match self.lookup(ns, message) {
            Some(text) => text.to_string(),
            None => {
                tracing::trace!(namespace = ns, key = message, "missing translation");
                message.to_string()
            }
        }
    }
}
