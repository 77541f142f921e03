//! Command-line interface definitions.
//!
//! Defines the CLI structure for thesis-lab using `clap`. Every subcommand is
//! a single-shot computation: take a snapshot, resolve concentration only,
//! re-score a persisted snapshot, or validate a rules document.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Daily token snapshot with holder-concentration resolution and scenario scoring
#[derive(Parser, Debug)]
#[command(name = "thesis-lab")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect market data, resolve concentration, score and persist a snapshot
    Snapshot(SnapshotArgs),

    /// Resolve top-10 holder concentration only
    Concentration(ConfigArg),

    /// Re-score a persisted snapshot against a rules document
    Score(ScoreArgs),

    /// Inspect scenario rules
    #[command(subcommand)]
    Rules(RulesCommand),
}

/// Subcommands for `thesis-lab rules`.
#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// Validate a scenario rules document.
    Validate(RulesPathArg),
}

/// Shared argument for commands that only need settings.
#[derive(Parser, Debug)]
pub struct ConfigArg {
    /// Path to the TOML settings file; built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `thesis-lab snapshot`.
#[derive(Parser, Debug)]
pub struct SnapshotArgs {
    /// Path to the TOML settings file; built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scenario rules document, overriding `paths.rules`.
    #[arg(short, long)]
    pub rules: Option<PathBuf>,

    /// Compute everything but write nothing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `thesis-lab score`.
#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Persisted `*.snapshot.json` document.
    pub file: PathBuf,

    /// Scenario rules document.
    #[arg(short, long, default_value = "config/scenario_rules.json")]
    pub rules: PathBuf,
}

/// Arguments for `thesis-lab rules validate`.
#[derive(Parser, Debug)]
pub struct RulesPathArg {
    /// Scenario rules document.
    #[arg(default_value = "config/scenario_rules.json")]
    pub path: PathBuf,
}
