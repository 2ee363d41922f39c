//! The `score` and `config` commands.

use std::io::Write;

use eyre::{Result, WrapErr};
use tracing::{info, warn};
use vitals_fleet::{FleetReport, FleetSnapshot, VitalityPipeline};
use vitals_score::ScoreConfig;

use crate::cli::ScoreArgs;

/// Load the snapshot and config, run the pipeline and write the report.
pub(crate) fn run(args: &ScoreArgs) -> Result<()> {
    let config = load_config(args)?;
    let snapshot = FleetSnapshot::load(&args.snapshot)?;

    if snapshot.is_empty() {
        warn!(path = %args.snapshot.display(), "snapshot contains no nodes");
    }

    let report = VitalityPipeline::new(config).run(snapshot.nodes, !args.credits_offline);
    info!(
        nodes = report.nodes.len(),
        consensus = %report.aggregates.consensus_version,
        credits_online = report.aggregates.is_credits_source_online,
        "fleet scored"
    );

    let rendered = render(&report, args.pretty)?;
    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .wrap_err_with(|| format!("failed to write report to {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn load_config(args: &ScoreArgs) -> Result<ScoreConfig> {
    let mut config = match &args.config {
        Some(path) => ScoreConfig::load(path)?,
        None => ScoreConfig::default(),
    };

    if let Some(table) = args.decay {
        config = config.with_version_decay(table.into());
    }

    config.validate()?;
    Ok(config)
}

fn render(report: &FleetReport, pretty: bool) -> Result<String> {
    let mut rendered = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    rendered.push('\n');
    Ok(rendered)
}

/// The default scoring configuration, as a starting point for a config file.
pub(crate) fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&ScoreConfig::default()).wrap_err("failed to render default config")
}
