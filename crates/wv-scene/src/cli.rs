use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::SceneConfig;
use crate::error::Result;
use crate::scene::Scene;
use crate::script::{ReplayReport, load_script, replay};

#[derive(Debug, Parser)]
#[command(
    name = "wedgeview",
    about = "Replay scripted pointer input against a wedge view scene and print the final frame",
    version
)]
pub struct Cli {
    /// TOML scene configuration. Defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON script of input events and control operations.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Override the configured tree count.
    #[arg(long)]
    pub tree_count: Option<u32>,

    /// Override the configured generator seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    pub log_json: bool,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pub pretty: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

/// Build the scene, replay the script and write the report to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let report = replay_from(&cli)?;
    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

fn replay_from(cli: &Cli) -> Result<ReplayReport> {
    let mut config = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if let Some(count) = cli.tree_count {
        config.tree_count = count;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let steps = match &cli.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let mut scene = Scene::new(config)?;
    let report = replay(&mut scene, &steps);
    info!(
        message = "replay.done",
        steps = report.steps,
        count_changes = report.count_changes.len(),
        in_frustum = report.final_frame.indicators.in_frustum
    );
    Ok(report)
}

/// Install the global subscriber. `RUST_LOG` wins over the `info` default.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // A subscriber may already be installed when embedded; keep it.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
