//! Command dispatch and settings bootstrap shared by the handlers.

use std::path::Path;

use super::command::{Cli, Commands, RulesCommand};
use super::diagnostic::SettingsDiagnostic;
use super::operator::{operator, read_config_toml};
use super::output::{self, OutputConfig};
use super::{concentration, rules, score, snapshot};

use crate::error::Result;
use crate::port::inbound::operator::configuration::SettingsView;

/// Run the parsed command line.
pub async fn execute(cli: &Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose).with_color(&cli.color));

    match &cli.command {
        Commands::Snapshot(args) => snapshot::execute(args).await,
        Commands::Concentration(arg) => concentration::execute(arg).await,
        Commands::Score(args) => score::execute(args),
        Commands::Rules(RulesCommand::Validate(arg)) => rules::validate(&arg.path),
    }
}

/// Settings text as handed to the operator, with its projection.
pub(crate) struct LoadedSettings {
    pub config_toml: Option<String>,
    pub view: SettingsView,
}

/// Load settings (defaults when `path` is `None`) and start logging at the
/// verbosity requested on the command line.
pub(crate) fn load_settings(path: Option<&Path>) -> Result<LoadedSettings> {
    let loaded = path.map(read_config_toml).transpose().and_then(|config_toml| {
        let view = operator().load_settings(
            config_toml.as_deref(),
            output::is_quiet(),
            output::verbosity(),
        )?;
        Ok(LoadedSettings { config_toml, view })
    });

    if let Err(err) = &loaded {
        if !output::is_json() {
            let report = miette::Report::new(SettingsDiagnostic::new(err.to_string()));
            eprintln!("{report:?}");
        }
    }
    loaded
}
