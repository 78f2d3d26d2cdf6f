use anyhow::{Context, Result};
use control::{Environment, RandomSource};
use tracing::info;

use crate::sink::FrameSink;

/// Driver-side controls for a single episode.
#[derive(Debug, Clone)]
pub struct RolloutOptions {
    /// Render a frame before every step.
    pub render: bool,
    /// Stop after this many steps even if the episode has not ended.
    pub max_steps: Option<u32>,
    /// Log progress every this many steps; `0` disables progress logs.
    pub log_every: u32,
}

impl Default for RolloutOptions {
    fn default() -> Self {
        Self { render: true, max_steps: None, log_every: 100 }
    }
}

/// Outcome of one driven episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    pub env: &'static str,
    pub steps: u32,
    pub total_reward: f32,
    /// The environment ended the episode (as opposed to `max_steps`).
    pub ended: bool,
    pub terminated: bool,
    pub truncated: bool,
    pub frames: usize,
}

/// Runs one episode with random actions.
///
/// Resets `env`, then repeatedly draws an action from the descriptor's
/// bounds, optionally renders the current state into a reused frame for
/// `sink`, and steps in place, until the episode ends or `max_steps` is
/// reached.
///
/// # Errors
///
/// Returns the first environment or sink error.
pub fn run_episode(
    env: &dyn Environment,
    rng: &mut dyn RandomSource,
    options: &RolloutOptions,
    sink: &mut dyn FrameSink,
) -> Result<EpisodeSummary> {
    let descriptor = env.descriptor();
    let name = descriptor.name();
    let mut episode = env.reset(rng).with_context(|| format!("resetting {name}"))?;
    let mut action = vec![0.0; descriptor.action_size()];
    let mut frame = if options.render { Some(descriptor.new_frame()?) } else { None };
    let mut total_reward = 0.0;
    let mut frames = 0;

    info!(env = name, state = ?episode.state, "episode started");
    while !episode.ended && !options.max_steps.is_some_and(|limit| episode.step >= limit) {
        descriptor.random_action_in_place(rng, &mut action);
        if let Some(frame) = frame.as_mut() {
            env.render_in_place(&episode, &action, frame)
                .with_context(|| format!("rendering {name} at step {}", episode.step))?;
            sink.write_frame(frames, frame)?;
            frames += 1;
        }
        env.step_in_place(rng, &mut episode, &action)
            .with_context(|| format!("stepping {name} at step {}", episode.step))?;
        total_reward += episode.reward;

        if options.log_every > 0 && episode.step % options.log_every == 0 {
            info!(env = name, step = episode.step, total_reward, "progress");
        }
    }
    sink.finish()?;

    let summary = EpisodeSummary {
        env: name,
        steps: episode.step,
        total_reward,
        ended: episode.ended,
        terminated: episode.terminated,
        truncated: episode.truncated(),
        frames,
    };
    info!(
        env = name,
        steps = summary.steps,
        total_reward = summary.total_reward,
        terminated = summary.terminated,
        truncated = summary.truncated,
        frames = summary.frames,
        "episode finished"
    );
    Ok(summary)
}
