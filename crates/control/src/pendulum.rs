//! Inverted pendulum swing-up with a continuous torque.
//!
//! There is no failure state: every episode runs to the step limit and the
//! reward penalises distance from upright, angular speed and effort.
//!
//! State: `[θ, θ̇]` with `θ = 0` upright.
//! Observation: `[sin θ, cos θ, θ̇]`.
//! Action: one torque, clipped to `[-max_torque, max_torque]`.

use std::f32::consts::PI;

use raster::{Frame, Rgb};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::descriptor::{ActionSpace, Descriptor, Episode};
use crate::env::Environment;
use crate::math::{clip, ensure_finite, is_positive, random_range, RandomSource};
use crate::EnvError;

pub const STATE_SIZE: usize = 2;
pub const OBSERVATION_SIZE: usize = 3;
pub const ACTION_SIZE: usize = 1;

const ROD_PIXELS: f32 = 150.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumConfig {
    pub max_speed: f32,
    pub max_torque: f32,
    pub dt: f32,
    pub gravity: f32,
    pub mass: f32,
    pub length: f32,
    pub max_steps: u32,
    pub render_width: usize,
    pub render_height: usize,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            max_speed: 8.0,
            max_torque: 2.0,
            dt: 0.05,
            gravity: 10.0,
            mass: 1.0,
            length: 1.0,
            max_steps: 200,
            render_width: 500,
            render_height: 500,
        }
    }
}

pub struct Pendulum {
    config: PendulumConfig,
    descriptor: Descriptor,
}

impl Pendulum {
    /// # Errors
    ///
    /// Fails on non-positive physical constants or a zero render size.
    pub fn new(config: PendulumConfig) -> Result<Self, EnvError> {
        let positive = [config.max_speed, config.max_torque, config.dt, config.mass, config.length];
        if !positive.into_iter().all(is_positive) {
            return Err(EnvError::InvalidConfig("pendulum constants must be positive"));
        }
        let descriptor = Descriptor::new(
            "pendulum",
            STATE_SIZE,
            OBSERVATION_SIZE,
            ActionSpace::Continuous(ACTION_SIZE),
            &[(-config.max_torque, config.max_torque)],
            (config.render_width, config.render_height),
        )?;
        Ok(Self { config, descriptor })
    }

    #[must_use]
    pub fn config(&self) -> &PendulumConfig {
        &self.config
    }

    pub fn observe(state: &[f32], observation: &mut [f32]) {
        observation[0] = state[0].sin();
        observation[1] = state[0].cos();
        observation[2] = state[1];
    }

    /// `((θ + π) mod 2π) - π` with the remainder taking the sign of the
    /// dividend, so angles below `-π` stay below `-π`.
    #[must_use]
    pub fn normalize_angle(theta: f32) -> f32 {
        (theta + PI) % (2.0 * PI) - PI
    }
}

impl Environment for Pendulum {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn reset_in_place(&self, rng: &mut dyn RandomSource, episode: &mut Episode) -> Result<(), EnvError> {
        self.descriptor.check_episode(episode)?;
        episode.state[0] = random_range(rng, -PI, PI);
        episode.state[1] = random_range(rng, -1.0, 1.0);
        Self::observe(&episode.state, &mut episode.observation);
        episode.step = 0;
        episode.reward = 0.0;
        episode.ended = false;
        episode.terminated = false;
        trace!(env = "pendulum", state = ?episode.state, "reset");
        Ok(())
    }

    fn step_in_place(&self, _rng: &mut dyn RandomSource, episode: &mut Episode, action: &[f32]) -> Result<(), EnvError> {
        self.descriptor.check_episode(episode)?;
        self.descriptor.check_action(action)?;
        let c = &self.config;

        let theta = episode.state[0];
        let theta_dot = episode.state[1];
        let torque = clip(action[0], -c.max_torque, c.max_torque);
        let angle = Self::normalize_angle(theta);
        let reward = -(angle * angle + 0.1 * theta_dot * theta_dot + 0.001 * torque * torque);

        let theta_acc = 3.0 * c.gravity / (2.0 * c.length) * theta.sin() + 3.0 / (c.mass * c.length * c.length) * torque;
        let new_theta_dot = clip(theta_dot + theta_acc * c.dt, -c.max_speed, c.max_speed);
        // Semi-implicit: the angle advances with the updated velocity.
        let new_theta = theta + new_theta_dot * c.dt;

        ensure_finite(&[new_theta, new_theta_dot, theta_acc], "pendulum state")?;
        ensure_finite(&[reward], "pendulum reward")?;
        episode.state[0] = new_theta;
        episode.state[1] = new_theta_dot;
        Self::observe(&episode.state, &mut episode.observation);
        episode.step += 1;
        episode.reward = reward;
        episode.ended = episode.step >= c.max_steps;
        episode.terminated = false;
        if episode.ended {
            debug!(env = "pendulum", step = episode.step, "episode truncated");
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn render_in_place(&self, episode: &Episode, action: &[f32], frame: &mut Frame) -> Result<(), EnvError> {
        self.descriptor.check_episode(episode)?;
        self.descriptor.check_action(action)?;
        self.descriptor.check_frame(frame)?;
        frame.clear(Rgb::WHITE);

        let cx = frame.width() as i32 / 2;
        let cy = frame.height() as i32 / 2;
        // Screen y grows downwards, so rotate by π to draw θ = 0 pointing up.
        let angle = episode.state[0] + PI;
        let reach = self.config.length * ROD_PIXELS;
        let x1 = cx + (angle.sin() * reach) as i32;
        let y1 = cy + (angle.cos() * reach) as i32;

        frame.line(cx - 20, cy, cx + 20, cy, Rgb::BLACK);
        frame.line(cx, cy - 20, cx, cy + 20, Rgb::BLACK);
        frame.line(cx, cy, x1, y1, Rgb::RED);
        frame.circle(cx, cy, 10, Rgb::BLACK);

        let d = &self.descriptor;
        frame.continuous_indicator(action, d.action_mins(), d.action_maxs());
        Ok(())
    }
}
