//! Command-line argument parsing.
//!
//! Keeps argument parsing separate from execution logic.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ec_core::{scan::Tool, Language};

/// EcoCycle: identify a waste item and decide what to do with it.
#[derive(Debug, Parser)]
#[command(name = "ecocycle", version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to config.toml in the app data directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Interface and AI response language: en or ta
    #[arg(long, global = true, value_parser = parse_language)]
    pub lang: Option<Language>,

    /// Disable speech narration
    #[arg(long, global = true)]
    pub mute: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify a photo and walk through reuse or disposal
    Scan(ScanArgs),
}

#[derive(Debug, clap::Args)]
pub struct ScanArgs {
    /// Photo of the item (JPEG, PNG or WebP)
    pub image: PathBuf,

    /// Branch to take after classification; asked interactively when omitted
    #[arg(long, value_enum)]
    pub branch: Option<Branch>,

    /// Tools at hand for the creative branch, comma separated
    #[arg(long, value_delimiter = ',', value_parser = parse_tool)]
    pub tools: Vec<Tool>,

    /// Name of the reuse project
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Branch {
    Creative,
    Disposal,
}

fn parse_language(value: &str) -> Result<Language, String> {
    value.parse::<Language>().map_err(|e| e.to_string())
}

fn parse_tool(value: &str) -> Result<Tool, String> {
    value.parse::<Tool>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scan_with_tools_and_branch() {
        let cli = Cli::try_parse_from([
            "ecocycle",
            "--lang",
            "ta",
            "scan",
            "bottle.jpg",
            "--branch",
            "creative",
            "--tools",
            "scissors,Glue",
            "--project",
            "Lamp",
        ])
        .unwrap();

        assert_eq!(cli.lang, Some(Language::Ta));
        assert!(!cli.mute);
        let Commands::Scan(args) = cli.command;
        assert_eq!(args.image, PathBuf::from("bottle.jpg"));
        assert_eq!(args.branch, Some(Branch::Creative));
        assert_eq!(args.tools, vec![Tool::Scissors, Tool::Glue]);
        assert_eq!(args.project.as_deref(), Some("Lamp"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ecocycle", "scan", "x.png", "--mute"]).unwrap();
        assert!(cli.mute);
        assert!(cli.config.is_none());
    }

    #[test]
    fn rejects_unknown_tool() {
        let err = Cli::try_parse_from(["ecocycle", "scan", "x.png", "--tools", "hammer"]);
        assert!(err.is_err());
    }
}
