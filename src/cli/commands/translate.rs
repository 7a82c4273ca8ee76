//! The `translate` command: run the localize pass over the project.

use std::fs;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::cli::args::TranslateCommand;
use crate::cli::commands::CommandResult;
use crate::config::{Config, load_config};
use crate::core::TranslationCatalog;
use crate::issues::{Issue, Severity};
use crate::transform::{RewriteContext, scan_files, transform_source};
use crate::utils::relative_to;

/// Outcome of transforming one scanned file.
struct FileReport {
    /// Path relative to the source root, used for output placement.
    relative_path: std::path::PathBuf,
    /// Rewritten code, or `None` when the file passes through unchanged.
    code: Option<String>,
    /// Original content, written to the output tree when unchanged.
    original: String,
    issues: Vec<Issue>,
}

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let project = cmd.common.project.as_path();
    let mut config = load_config(project)?;
    apply_overrides(&mut config, &cmd);

    // Catalog snapshot, loaded once before the pass begins.
    let catalog = TranslationCatalog::new();
    let locales = catalog.load_dir(&project.join(&config.translations_root))?;
    if cmd.common.verbose {
        eprintln!("Loaded locales: {}", locales.join(", "));
    }

    let source_root = project.join(&config.source_root);
    let scan = scan_files(
        &source_root,
        &config.includes,
        &config.ignores,
        &config.extensions,
        config.ignore_test_files,
        cmd.common.verbose,
    );
    if scan.skipped_count > 0 {
        eprintln!(
            "Warning: {} path(s) skipped due to access errors",
            scan.skipped_count
        );
    }

    let ctx = RewriteContext {
        catalog: &catalog,
        build_locale: &config.build_locale,
        localize_name: &config.localize_name,
        missing_translation: config.missing_translation,
    };

    // Files are independent: the pass holds no cross-file state beyond the
    // read-only catalog snapshot.
    let reports: Vec<FileReport> = scan
        .files
        .par_iter()
        .filter_map(|path| match fs::read_to_string(path) {
            Ok(source) => {
                let display = path.to_string_lossy();
                let outcome = transform_source(&source, &display, &ctx);
                Some(FileReport {
                    relative_path: relative_to(path, &source_root),
                    code: outcome.code,
                    original: source,
                    issues: outcome.issues,
                })
            }
            Err(e) => {
                eprintln!("Warning: failed to read {:?}: {}", path, e);
                None
            }
        })
        .collect();

    let issues: Vec<Issue> = reports
        .iter()
        .flat_map(|report| report.issues.iter().cloned())
        .collect();
    let rewritten = reports.iter().filter(|report| report.code.is_some()).count();

    if !cmd.check {
        let out_dir = project.join(&config.out_dir);
        for report in &reports {
            let target = out_dir.join(&report.relative_path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
            }
            let content = report.code.as_deref().unwrap_or(&report.original);
            fs::write(&target, content)
                .with_context(|| format!("Failed to write output file: {:?}", target))?;
        }
    }

    let error_count = issues
        .iter()
        .filter(|issue| issue.severity() == Severity::Error)
        .count();

    Ok(CommandResult {
        issues,
        error_count,
        source_files: reports.len(),
        rewritten_files: rewritten,
        locale_count: locales.len(),
    })
}

fn apply_overrides(config: &mut Config, cmd: &TranslateCommand) {
    if let Some(locale) = &cmd.locale {
        config.build_locale = locale.clone();
    }
    if let Some(out_dir) = &cmd.out_dir {
        config.out_dir = out_dir.clone();
    }
    if let Some(policy) = cmd.missing_translation {
        config.missing_translation = policy;
    }
    if let Some(translations_root) = &cmd.common.translations_root {
        config.translations_root = translations_root.clone();
    }
}
