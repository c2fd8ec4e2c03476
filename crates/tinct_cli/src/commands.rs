//! Subcommand implementations

use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tinct_app::{run_loaded_scenario, EngineConfig, InMemoryThemeProvider, Scenario};
use tinct_core::Rgb;
use tinct_theme::{find_active, Ramp};

pub fn ramp(color: &str, json: bool) -> Result<ExitCode> {
    let base = Rgb::parse(color).with_context(|| format!("Cannot derive a ramp from {color:?}"))?;
    let ramp = Ramp::generate(base);
    let mut out = std::io::stdout().lock();

    if json {
        let steps: Vec<_> = ramp
            .iter()
            .map(|(weight, color)| serde_json::json!({ "weight": weight.value(), "color": color }))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&steps)?)?;
    } else {
        for (weight, color) in ramp.iter() {
            writeln!(out, "{:>4}  {color}", weight.value())?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn publish(
    config: &EngineConfig,
    themes: &Path,
    id: Option<&str>,
    json: bool,
) -> Result<ExitCode> {
    let provider = InMemoryThemeProvider::from_path(themes)?;
    let theme = match id {
        Some(id) => provider
            .themes()
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| anyhow!("No theme {id:?} in {}", themes.display()))?,
        None => find_active(provider.themes()).with_context(|| {
            format!("Pass --theme or mark a theme active in {}", themes.display())
        })?,
    };

    let publication = config.publisher().publish(theme, None);
    for issue in &publication.issues {
        tracing::warn!(theme = %theme.id, %issue, "published with fallback");
    }

    let mut out = std::io::stdout().lock();
    if json {
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&publication.registry.to_map())?
        )?;
    } else {
        write!(out, "{}", publication.registry.to_css())?;
    }
    Ok(ExitCode::SUCCESS)
}

pub fn run(config: &EngineConfig, path: &Path) -> Result<ExitCode> {
    let scenario = Scenario::from_path(path)?;
    let report = run_loaded_scenario(&scenario, config)?;
    report.write_to_writer(&mut std::io::stdout().lock())?;

    if report.is_failed() {
        tracing::error!(
            step = report.failed_step_index,
            message = report.message.as_deref().unwrap_or_default(),
            "scenario failed"
        );
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
