//! # Rollout
//!
//! Runs random-action episodes of a classic control environment and writes
//! the rendered frames to disk.
//!
//! ```text
//! rollout --env cartpole --seed 7 --episodes 3 --format png --out-dir frames
//! rollout --config pendulum.json --format bgr
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use control::{EnvConfig, EnvKind};
use runtime::{run_episode, DirectorySink, FrameFormat, FrameSink, NullSink, RolloutOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rollout", about = "Run random-action episodes of classic control environments")]
struct Cli {
    /// Environment to run (acrobot, cartpole, pendulum)
    #[arg(long, default_value = "acrobot")]
    env: EnvKind,

    /// JSON environment configuration; overrides --env
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the random stream; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Number of episodes to run
    #[arg(long, default_value_t = 1)]
    episodes: u32,

    /// Stop each episode after this many steps
    #[arg(long)]
    max_steps: Option<u32>,

    /// Directory that receives one sub-directory of frames per episode
    #[arg(long, default_value = "frames")]
    out_dir: PathBuf,

    /// Frame encoding
    #[arg(long, value_enum, default_value_t = FrameFormat::Png)]
    format: FrameFormat,

    /// Skip rendering entirely
    #[arg(long)]
    no_render: bool,

    /// Log progress every N steps (0 disables)
    #[arg(long, default_value_t = 100)]
    log_every: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<EnvConfig>(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => EnvConfig::from(cli.env),
    };
    let env = config.build().context("building environment")?;

    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));
    tracing::info!(env = %config.kind(), seed, episodes = cli.episodes, "starting rollout");
    let mut rng = fastrand::Rng::with_seed(seed);

    let options = RolloutOptions { render: !cli.no_render, max_steps: cli.max_steps, log_every: cli.log_every };
    for index in 0..cli.episodes {
        let mut sink: Box<dyn FrameSink> = if options.render {
            let dir = cli.out_dir.join(format!("{}_{index:03}", config.kind()));
            Box::new(DirectorySink::new(dir, cli.format)?)
        } else {
            Box::new(NullSink)
        };
        let summary = run_episode(env.as_ref(), &mut rng, &options, sink.as_mut())?;
        println!(
            "episode {index}: steps={} return={:.3} terminated={} truncated={} frames={}",
            summary.steps, summary.total_reward, summary.terminated, summary.truncated, summary.frames
        );
    }
    Ok(())
}
