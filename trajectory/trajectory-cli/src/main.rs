//! `trajconvert`: batch conversion of recorded trajectories.
//!
//! Scans a dataset folder for files named `trajectory.traj`, then converts
//! each one sequentially: attaches camera imagery from the sibling
//! `recordings/` archive, re-derives action representations, and prunes
//! idle timesteps (unless told otherwise).
//!
//! The batch halts on the first failed trajectory; a partial batch exits
//! nonzero with the offending path in the error chain.

mod scan;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trajectory_convert::{
    convert_trajectory, ConvertConfig, RecordedFrameProvider, RotationCodecRegistry,
};

/// Add synchronized camera images to recorded trajectories.
#[derive(Parser)]
#[command(name = "trajconvert")]
#[command(about = "Add camera images and derived actions to recorded trajectories")]
#[command(version)]
struct Cli {
    /// Folder containing trajectories to convert
    #[arg(long, default_value = "~/datasets/r2d2/success")]
    folder: String,

    /// Square image resolution (width and height)
    #[arg(long, default_value_t = 128)]
    imsize: usize,

    /// Keep idle timesteps instead of pruning them
    #[arg(long)]
    keep_idle_timesteps: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = ConvertConfig {
        imsize: cli.imsize,
        keep_idle_timesteps: cli.keep_idle_timesteps,
        ..ConvertConfig::default()
    }
    .resolve(&RotationCodecRegistry::default())?;

    let folder = scan::expand_user(&cli.folder);
    let trajectories = scan::find_trajectories(&folder)
        .with_context(|| format!("scanning {}", folder.display()))?;
    info!(count = trajectories.len(), folder = %folder.display(), "converting datasets");

    let bar = ProgressBar::new(trajectories.len() as u64);
    for path in &trajectories {
        let mut provider = RecordedFrameProvider::open(path, cli.imsize)
            .with_context(|| format!("opening recordings for {}", path.display()))?;
        convert_trajectory(path, &mut provider, &config)
            .with_context(|| format!("converting {}", path.display()))?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(())
}
