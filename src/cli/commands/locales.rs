//! The `locales` command: list what the translation catalog provides.

use anyhow::Result;
use colored::Colorize;

use crate::cli::args::LocalesCommand;
use crate::cli::commands::CommandResult;
use crate::config::load_config;
use crate::core::TranslationCatalog;

pub fn locales(cmd: LocalesCommand) -> Result<CommandResult> {
    let project = cmd.common.project.as_path();
    let mut config = load_config(project)?;
    if let Some(translations_root) = &cmd.common.translations_root {
        config.translations_root = translations_root.clone();
    }

    let catalog = TranslationCatalog::new();
    let loaded = catalog.load_dir(&project.join(&config.translations_root))?;

    for locale in catalog.available_locales() {
        let count = catalog.entry(&locale).map(|entry| entry.len()).unwrap_or(0);
        println!(
            "{}  {} {}",
            locale.bold(),
            count,
            if count == 1 { "message" } else { "messages" }
        );
    }

    Ok(CommandResult {
        issues: Vec::new(),
        error_count: 0,
        source_files: 0,
        rewritten_files: 0,
        locale_count: loaded.len(),
    })
}
