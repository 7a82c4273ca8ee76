//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `translate`: Run the localize pass over the configured sources
//! - `locales`: List locales available in the translation catalog
//! - `init`: Initialize the weft configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::MissingTranslationPolicy;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by commands that read the project config.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (where .weftrc.json lives)
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Translations directory (overrides config file)
    #[arg(long)]
    pub translations_root: Option<String>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the localize pass: statically substitute translatable literals
    /// and defer ICU expressions to runtime calls
    Translate(TranslateCommand),
    /// List locales available in the translation catalog
    Locales(LocalesCommand),
    /// Initialize the weft configuration file
    Init,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Build locale used for static substitution (overrides config file)
    #[arg(long, env = "WEFT_LOCALE")]
    pub locale: Option<String>,

    /// Output directory for transformed sources (overrides config file)
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Missing-translation policy (overrides config file)
    #[arg(long, value_enum)]
    pub missing_translation: Option<MissingTranslationPolicy>,

    /// Report issues without writing any output
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Args)]
pub struct LocalesCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parses_translate_with_overrides() {
        let args = Arguments::parse_from([
            "weft",
            "translate",
            "--locale",
            "sv",
            "--check",
            "--missing-translation",
            "error",
        ]);
        match args.command {
            Some(Command::Translate(cmd)) => {
                assert_eq!(cmd.locale.as_deref(), Some("sv"));
                assert!(cmd.check);
                assert_eq!(
                    cmd.missing_translation,
                    Some(MissingTranslationPolicy::Error)
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_locales() {
        let args = Arguments::parse_from(["weft", "locales", "--translations-root", "./i18n"]);
        match args.command {
            Some(Command::Locales(cmd)) => {
                assert_eq!(cmd.common.translations_root.as_deref(), Some("./i18n"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn no_command_yields_help() {
        let args = Arguments::parse_from(["weft"]);
        assert!(args.with_command_or_help().is_none());
    }
}
