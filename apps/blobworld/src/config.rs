//! Command line and configuration file handling for `blobworld`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use blob_core::{RendererMode, SimConfig};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Real-time blob agent simulation")]
pub struct Args {
    /// JSON configuration file; missing fields take their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Viewer host to stream snapshots to
    #[arg(long)]
    pub host: Option<String>,

    /// Viewer port
    #[arg(long)]
    pub port: Option<u16>,

    /// Where snapshots go
    #[arg(long, value_enum)]
    pub renderer: Option<RendererArg>,

    /// Stop once simulation time reaches this many hours
    #[arg(long)]
    pub max_hours: Option<f64>,

    /// Simulated hours per real second
    #[arg(long)]
    pub multiplier: Option<f64>,

    /// Initial number of agents
    #[arg(long)]
    pub population: Option<usize>,

    /// Master RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with the engine paused
    #[arg(long)]
    pub start_paused: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RendererArg {
    Headless,
    Socket,
}

impl From<RendererArg> for RendererMode {
    fn from(arg: RendererArg) -> Self {
        match arg {
            RendererArg::Headless => RendererMode::Headless,
            RendererArg::Socket => RendererMode::Socket,
        }
    }
}

/// Parse a JSON configuration document.
pub fn parse_config(text: &str) -> Result<SimConfig> {
    serde_json::from_str(text).context("configuration is not valid JSON for SimConfig")
}

/// Command-line values win over file values.
pub fn apply_overrides(config: &mut SimConfig, args: &Args) {
    if let Some(host) = &args.host {
        config.network.host = host.clone();
    }
    if let Some(port) = args.port {
        config.network.port = port;
    }
    if let Some(renderer) = args.renderer {
        config.renderer = renderer.into();
    }
    if let Some(hours) = args.max_hours {
        config.max_sim_hours = hours;
    }
    if let Some(multiplier) = args.multiplier {
        config.time_multiplier = multiplier;
    }
    if let Some(population) = args.population {
        config.world.initial_population = population;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.start_paused {
        config.start_paused = true;
    }
}

/// Build the validated run configuration from the file (if any) and flags.
pub fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            parse_config(&text).with_context(|| format!("in {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    apply_overrides(&mut config, args);
    config.validate().context("invalid configuration")?;
    Ok(config)
}
