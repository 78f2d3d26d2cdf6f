#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Rollout Runtime
//!
//! The episode driver: seeds randomness, picks uniformly random actions,
//! renders each frame before stepping and hands frames to a [`FrameSink`].
//! The `rollout` binary wraps [`rollout::run_episode`] with a CLI.

pub mod rollout;
pub mod sink;

pub use rollout::{run_episode, EpisodeSummary, RolloutOptions};
pub use sink::{DirectorySink, FrameFormat, FrameSink, NullSink};
