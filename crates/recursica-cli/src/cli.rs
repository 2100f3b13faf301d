//! Command-line definition.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "recursica", version, about = "Export Recursica design tokens as CSS variables")]
pub struct Cli {
    /// Config file; defaults to ./recursica.yaml when present
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log more (-v info, -vv debug); RECURSICA_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// The three input documents, shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Token JSON file
    #[arg(long, value_name = "FILE")]
    pub tokens: Option<PathBuf>,

    /// Brand JSON file
    #[arg(long, value_name = "FILE")]
    pub brand: Option<PathBuf>,

    /// UI-kit JSON file
    #[arg(long = "ui-kit", value_name = "FILE")]
    pub ui_kit: Option<PathBuf>,

    /// Fail on references that only resolve after correction
    #[arg(long)]
    pub strict_references: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the JSON documents and both stylesheets into a directory
    Export {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output directory
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Print one stylesheet to stdout
    Css {
        #[command(flatten)]
        inputs: InputArgs,

        #[arg(long, value_enum, default_value_t = Variant::Specific)]
        variant: Variant,
    },

    /// Rewrite internal `--recursica-*` names in a CSS file to exported names
    RenameVars {
        #[command(flatten)]
        inputs: InputArgs,

        /// CSS file to rewrite
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Stylesheet layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// One `:root` block of fully-qualified names
    Specific,
    /// Theme and layer scoped aliases
    Scoped,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from([
            "recursica",
            "-vv",
            "export",
            "--tokens",
            "t.json",
            "--ui-kit",
            "u.json",
            "--out",
            "dist",
            "--strict-references",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Export { inputs, out } = cli.command else {
            panic!("expected export");
        };
        assert_eq!(inputs.tokens, Some(PathBuf::from("t.json")));
        assert_eq!(inputs.brand, None);
        assert_eq!(inputs.ui_kit, Some(PathBuf::from("u.json")));
        assert!(inputs.strict_references);
        assert_eq!(out, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_parse_css_variant() {
        let cli = Cli::try_parse_from(["recursica", "css", "--variant", "scoped"]).unwrap();
        assert!(matches!(cli.command, Command::Css { variant: Variant::Scoped, .. }));

        let cli = Cli::try_parse_from(["recursica", "css"]).unwrap();
        assert!(matches!(cli.command, Command::Css { variant: Variant::Specific, .. }));

        assert!(Cli::try_parse_from(["recursica", "css", "--variant", "flat"]).is_err());
    }
}
