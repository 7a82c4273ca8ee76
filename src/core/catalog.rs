//! Translation catalog: locale -> message id -> raw template.
//!
//! The catalog is owned by the composition root (CLI command, test, or an
//! embedding application) and passed by reference to whatever needs locale
//! context; there is no process-global locale state.
//!
//! `load` replaces a locale's entry wholesale by swapping an `Arc`, so a
//! concurrent reader observes either the previous entry or the new one in
//! full, never a half-loaded mix. Lookup misses are not errors: callers
//! fall back to the default template baked into the source. The one hard
//! failure is a translation file that cannot be read or parsed: that is a
//! broken deployment, not a missing key, and it propagates to the caller.

use std::{
    collections::HashMap,
    fs,
    path::Path,
    sync::{Arc, RwLock},
};

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// All messages for a single locale. Replaced wholesale on reload.
#[derive(Debug, Clone, Default)]
pub struct TranslationEntry {
    /// Locale code (e.g., "en", "zh-CN").
    pub locale: String,
    /// Raw templates keyed by message id. Insertion order is irrelevant.
    pub messages: HashMap<String, String>,
}

impl TranslationEntry {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: HashMap::new(),
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(id.into(), template.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Runtime store of per-locale translation entries.
#[derive(Debug, Default)]
pub struct TranslationCatalog {
    entries: RwLock<HashMap<String, Arc<TranslationEntry>>>,
}

impl TranslationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry for `entry.locale` atomically.
    pub fn load(&self, entry: TranslationEntry) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(entry.locale.clone(), Arc::new(entry));
    }

    /// Look up a raw template. `None` is a plain miss, never an error.
    pub fn get(&self, locale: &str, message_id: &str) -> Option<String> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries
            .get(locale)
            .and_then(|entry| entry.messages.get(message_id))
            .cloned()
    }

    /// The full entry for a locale, if loaded.
    pub fn entry(&self, locale: &str) -> Option<Arc<TranslationEntry>> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(locale).cloned()
    }

    /// Loaded locales, sorted for stable output.
    pub fn available_locales(&self) -> Vec<String> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut locales: Vec<String> = entries.keys().cloned().collect();
        locales.sort();
        locales
    }

    /// Load one translation file. Returns the locale it was stored under.
    ///
    /// Accepts either the explicit form
    /// `{"locale": "fr", "translations": {...}}` or a bare id -> template
    /// object, in which case the locale comes from the file stem
    /// (`fr.json` -> `fr`).
    pub fn load_file(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read translation file: {:?}", path))?;
        let json: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse translation file: {:?}", path))?;

        let entry = parse_translation_file(&json, path)
            .with_context(|| format!("Invalid translation file: {:?}", path))?;
        let locale = entry.locale.clone();
        self.load(entry);
        Ok(locale)
    }

    /// Load every `*.json` file in `dir`. Returns the loaded locales.
    ///
    /// Any unreadable or malformed file aborts the whole load: partially
    /// deployed catalogs should fail loudly at startup.
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<String>> {
        if !dir.exists() {
            bail!(
                "Translations directory '{}' does not exist.\n\
                 Hint: Check your .weftrc.json 'translationsRoot' setting.",
                dir.display()
            );
        }
        if !dir.is_dir() {
            bail!("'{}' is not a directory.", dir.display());
        }

        let mut locales = Vec::new();
        for dir_entry in fs::read_dir(dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                locales.push(self.load_file(&path)?);
            }
        }
        locales.sort();
        Ok(locales)
    }
}

/// Extracts locale from a translation file name.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "zh-CN.json" -> Some("zh-CN")
/// - "/path/to/locales/ja.json" -> Some("ja")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

fn parse_translation_file(json: &Value, path: &Path) -> Result<TranslationEntry> {
    let Value::Object(root) = json else {
        bail!("expected a top-level JSON object");
    };

    let (locale, messages) = match root.get("translations") {
        Some(Value::Object(translations)) => {
            let locale = match root.get("locale") {
                Some(Value::String(locale)) => locale.clone(),
                Some(_) => bail!("'locale' must be a string"),
                None => extract_locale(path).context("cannot derive locale from file name")?,
            };
            (locale, translations)
        }
        Some(_) => bail!("'translations' must be an object"),
        None => {
            let locale = extract_locale(path).context("cannot derive locale from file name")?;
            (locale, root)
        }
    };

    let mut entry = TranslationEntry::new(locale);
    for (id, template) in messages {
        match template {
            Value::String(template) => entry.insert(id, template),
            _ => bail!("template for message id '{}' must be a string", id),
        }
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    fn entry(locale: &str, pairs: &[(&str, &str)]) -> TranslationEntry {
        let mut entry = TranslationEntry::new(locale);
        for (id, template) in pairs {
            entry.insert(*id, *template);
        }
        entry
    }

    #[test]
    fn get_after_load() {
        let catalog = TranslationCatalog::new();
        catalog.load(entry("fr", &[("greeting", "Bonjour")]));

        assert_eq!(catalog.get("fr", "greeting"), Some("Bonjour".to_string()));
        assert_eq!(catalog.get("fr", "missing"), None);
        assert_eq!(catalog.get("de", "greeting"), None);
    }

    #[test]
    fn load_replaces_the_whole_entry() {
        let catalog = TranslationCatalog::new();
        catalog.load(entry("en", &[("a", "old a"), ("b", "old b")]));
        catalog.load(entry("en", &[("a", "new a")]));

        assert_eq!(catalog.get("en", "a"), Some("new a".to_string()));
        // "b" came from the previous load; wholesale replacement drops it.
        assert_eq!(catalog.get("en", "b"), None);
    }

    #[test]
    fn available_locales_sorted() {
        let catalog = TranslationCatalog::new();
        catalog.load(entry("zh", &[]));
        catalog.load(entry("en", &[]));
        catalog.load(entry("fr", &[]));

        assert_eq!(catalog.available_locales(), vec!["en", "fr", "zh"]);
    }

    #[test]
    fn readers_keep_old_entry_alive_across_reload() {
        let catalog = TranslationCatalog::new();
        catalog.load(entry("en", &[("a", "old")]));
        let before = catalog.entry("en").unwrap();

        catalog.load(entry("en", &[("a", "new")]));

        // The held Arc still sees the snapshot it took.
        assert_eq!(before.messages.get("a"), Some(&"old".to_string()));
        assert_eq!(catalog.get("en", "a"), Some("new".to_string()));
    }

    #[test]
    fn load_file_with_explicit_locale_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("anything.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"locale": "fr", "translations": {{"hello": "Bonjour"}}}}"#
        )
        .unwrap();

        let catalog = TranslationCatalog::new();
        let locale = catalog.load_file(&path).unwrap();
        assert_eq!(locale, "fr");
        assert_eq!(catalog.get("fr", "hello"), Some("Bonjour".to_string()));
    }

    #[test]
    fn load_file_bare_object_takes_locale_from_stem() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("de.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"hello": "Hallo"}}"#).unwrap();

        let catalog = TranslationCatalog::new();
        assert_eq!(catalog.load_file(&path).unwrap(), "de");
        assert_eq!(catalog.get("de", "hello"), Some("Hallo".to_string()));
    }

    #[test]
    fn malformed_file_is_a_hard_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("en.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{{ not json").unwrap();

        let catalog = TranslationCatalog::new();
        let err = catalog.load_file(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse translation file"));
    }

    #[test]
    fn non_string_template_is_a_hard_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("en.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"count": 42}}"#).unwrap();

        let catalog = TranslationCatalog::new();
        assert!(catalog.load_file(&path).is_err());
    }

    #[test]
    fn load_dir_reads_all_locales() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"id": "Hello"}"#).unwrap();
        fs::write(dir.path().join("sv.json"), r#"{"id": "Hej"}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = TranslationCatalog::new();
        let locales = catalog.load_dir(dir.path()).unwrap();
        assert_eq!(locales, vec!["en", "sv"]);
        assert_eq!(catalog.get("sv", "id"), Some("Hej".to_string()));
    }

    #[test]
    fn load_dir_missing_directory_is_a_hard_error() {
        let catalog = TranslationCatalog::new();
        let err = catalog
            .load_dir(Path::new("/nonexistent/translations"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("does not exist"));
        assert!(err.contains("translationsRoot"));
    }

    #[test]
    fn load_dir_aborts_on_malformed_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"id": "Hello"}"#).unwrap();
        fs::write(dir.path().join("bad.json"), "{ nope").unwrap();

        let catalog = TranslationCatalog::new();
        assert!(catalog.load_dir(dir.path()).is_err());
    }

    #[test]
    fn extract_locale_from_paths() {
        assert_eq!(extract_locale(Path::new("en.json")), Some("en".to_string()));
        assert_eq!(
            extract_locale(Path::new("zh-CN.json")),
            Some("zh-CN".to_string())
        );
        assert_eq!(
            extract_locale(Path::new("/path/to/locales/ja.json")),
            Some("ja".to_string())
        );
    }
}
