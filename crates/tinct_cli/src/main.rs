//! Tinct CLI
//!
//! - `tinct ramp <COLOR>` prints the tonal ramp derived from one color
//! - `tinct publish --themes <FILE>` prints the property registry of a theme
//! - `tinct run <SCENARIO>` replays a headless scenario and prints its report

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tinct_app::EngineConfig;

/// Runtime re-theming engine tools
#[derive(Parser, Debug)]
#[command(name = "tinct")]
#[command(about = "Inspect ramps, publish theme registries and replay headless scenarios")]
#[command(version)]
struct Cli {
    /// Engine configuration file (tinct.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the 10-step ramp derived from a CSS color
    Ramp {
        /// `#rgb`, `#rrggbb` or `rgb(r, g, b)`
        color: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the property registry for a theme
    Publish {
        /// Themes file with `[[themes]]` tables
        #[arg(short, long)]
        themes: PathBuf,

        /// Theme id; defaults to the one marked active
        #[arg(long)]
        theme: Option<String>,

        /// Print JSON instead of CSS
        #[arg(long)]
        json: bool,
    },

    /// Replay a headless scenario and print its JSON report
    Run {
        /// Scenario JSON file
        scenario: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let filter = if cli.verbose {
        "debug"
    } else {
        config.logging.filter.as_str()
    };
    tinct_app::init_logging(filter)?;

    match cli.command {
        Command::Ramp { color, json } => commands::ramp(&color, json),
        Command::Publish {
            themes,
            theme,
            json,
        } => commands::publish(&config, &themes, theme.as_deref(), json),
        Command::Run { scenario } => commands::run(&config, &scenario),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_publish() {
        let cli = Cli::try_parse_from([
            "tinct", "publish", "--themes", "themes.toml", "--theme", "ocean", "-c", "tinct.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("tinct.toml")));
        assert!(matches!(
            cli.command,
            Command::Publish { theme: Some(ref id), json: false, .. } if id == "ocean"
        ));
    }

    #[test]
    fn test_ramp_requires_color() {
        assert!(Cli::try_parse_from(["tinct", "ramp"]).is_err());
    }
}
