//! Main entry point for the weft CLI.
//!
//! Dispatches to the appropriate command handler based on the parsed
//! arguments, prints the report, and maps the outcome to an exit status.

use std::{fs, path::Path};

use anyhow::Result;

use super::args::{Arguments, Command};
use super::exit_status::ExitStatus;
use super::report::{print_success, report};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Translate(cmd)) => {
            let result = super::commands::translate::translate(cmd)?;
            if result.issues.is_empty() {
                print_success(
                    result.source_files,
                    result.rewritten_files,
                    result.locale_count,
                );
                Ok(ExitStatus::Success)
            } else {
                report(&result.issues);
                Ok(ExitStatus::from_error_count(result.error_count))
            }
        }
        Some(Command::Locales(cmd)) => {
            super::commands::locales::locales(cmd)?;
            Ok(ExitStatus::Success)
        }
        Some(Command::Init) => {
            init()?;
            println!("Created {}", CONFIG_FILE_NAME);
            Ok(ExitStatus::Success)
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}
