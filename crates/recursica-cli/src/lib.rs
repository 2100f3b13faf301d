//! Command-line front end for the `recursica` transforms.
//!
//! Reads the token, brand and ui-kit JSON files, runs the transforms and
//! writes the results. All decisions about the output live in the library;
//! this crate only handles files, configuration and logging.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

use std::io;

use anyhow::Result;
use tracing::info;

use crate::cli::{Cli, Command};
use crate::config::{Config, Settings};

/// Runs one parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Export { inputs, out } => {
            let settings = Settings::resolve(config, &inputs, out.as_deref());
            let written = commands::export(&settings)?;
            info!(files = written.len(), out = %settings.out.display(), "export complete");
        }
        Command::Css { inputs, variant } => {
            let settings = Settings::resolve(config, &inputs, None);
            commands::css(&settings, variant, &mut io::stdout().lock())?;
        }
        Command::RenameVars { inputs, file } => {
            let settings = Settings::resolve(config, &inputs, None);
            commands::rename_vars(&settings, &file, &mut io::stdout().lock())?;
        }
    }
    Ok(())
}
