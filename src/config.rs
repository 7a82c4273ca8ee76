use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use clap::ValueEnum;
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".weftrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

/// What to do when static substitution finds no translation for a message id.
///
/// The engine itself only reports the miss; this policy is how the build
/// pipeline decides whether that miss is ignorable, a warning, or fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingTranslationPolicy {
    Ignore,
    Warning,
    Error,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_translations_root", alias = "translationsDir")]
    pub translations_root: String,
    #[serde(default = "default_build_locale", alias = "locale")]
    pub build_locale: String,
    #[serde(default = "default_localize_name")]
    pub localize_name: String,
    #[serde(default = "default_missing_translation")]
    pub missing_translation: MissingTranslationPolicy,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_translations_root() -> String {
    "./locales".to_string()
}

fn default_build_locale() -> String {
    "en".to_string()
}

fn default_localize_name() -> String {
    "$localize".to_string()
}

fn default_missing_translation() -> MissingTranslationPolicy {
    MissingTranslationPolicy::Warning
}

fn default_extensions() -> Vec<String> {
    [".js", ".jsx", ".ts", ".tsx", ".mjs"]
        .map(String::from)
        .to_vec()
}

fn default_out_dir() -> String {
    "./dist".to_string()
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: default_includes(),
            source_root: default_source_root(),
            translations_root: default_translations_root(),
            build_locale: default_build_locale(),
            localize_name: default_localize_name(),
            missing_translation: default_missing_translation(),
            extensions: default_extensions(),
            out_dir: default_out_dir(),
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are
    /// invalid, or if the localize name is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.localize_name.trim().is_empty() {
            anyhow::bail!("'localizeName' must not be empty");
        }

        Ok(())
    }
}

/// Load configuration from `dir/.weftrc.json`, falling back to defaults
/// when the file does not exist.
pub fn load_config(dir: &Path) -> Result<Config> {
    let path: PathBuf = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;
    Ok(config)
}

/// The JSON written by `weft init`.
pub fn default_config_json() -> Result<String> {
    let json = serde_json::to_string_pretty(&Config::default())?;
    Ok(json)
}
