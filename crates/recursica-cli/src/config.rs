//! Layered configuration: an optional YAML file under command-line flags.
//!
//! ```yaml
//! tokens: tokens.json
//! brand: brand.json
//! ui-kit: ui-kit.json
//! out: dist
//! strict-references: true
//! ```
//!
//! Relative paths in the file are taken relative to the file itself.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use recursica::TransformOptions;
use serde::Deserialize;
use tracing::debug;

use crate::cli::InputArgs;

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "recursica.yaml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub tokens: Option<PathBuf>,
    pub brand: Option<PathBuf>,
    pub ui_kit: Option<PathBuf>,
    pub out: Option<PathBuf>,
    #[serde(flatten)]
    pub transform: TransformOptions,
}

impl Config {
    /// Loads `path`, or the default config file when present, or nothing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => config.rebase(dir),
            _ => config,
        })
    }

    /// Parses YAML text; an empty file is an empty config.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    fn rebase(self, dir: &Path) -> Self {
        let rebase = |path: Option<PathBuf>| path.map(|p| if p.is_relative() { dir.join(p) } else { p });
        Self {
            tokens: rebase(self.tokens),
            brand: rebase(self.brand),
            ui_kit: rebase(self.ui_kit),
            out: rebase(self.out),
            transform: self.transform,
        }
    }
}

/// The effective settings of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tokens: Option<PathBuf>,
    pub brand: Option<PathBuf>,
    pub ui_kit: Option<PathBuf>,
    pub out: PathBuf,
    pub options: TransformOptions,
}

impl Settings {
    /// Flags win over the config file; the output directory defaults to `.`.
    pub fn resolve(config: Config, inputs: &InputArgs, out: Option<&Path>) -> Self {
        let strict = inputs.strict_references || config.transform.strict_references;
        Self {
            tokens: inputs.tokens.clone().or(config.tokens),
            brand: inputs.brand.clone().or(config.brand),
            ui_kit: inputs.ui_kit.clone().or(config.ui_kit),
            out: out
                .map(Path::to_path_buf)
                .or(config.out)
                .unwrap_or_else(|| PathBuf::from(".")),
            options: TransformOptions::new().strict_references(strict),
        }
    }
}
