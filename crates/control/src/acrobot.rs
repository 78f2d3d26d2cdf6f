//! Two-link acrobot swing-up.
//!
//! Two links hang from a fixed pivot with torque applied only at the joint
//! between them. The goal is to swing the tip above one link length over
//! the pivot. Dynamics are integrated with RK4 on the augmented state
//! `(θ1, θ2, θ̇1, θ̇2, torque)`.
//!
//! State: `[θ1, θ2, θ̇1, θ̇2]` with `θ1` measured from hanging straight down
//! and `θ2` relative to link 1.
//! Observation: `[cos θ1, sin θ1, cos θ2, sin θ2, θ̇1, θ̇2]`.
//! Action: three scores, argmax selects torque `-1`, `0` or `+1`.

use std::f32::consts::{FRAC_PI_2, PI};

use raster::{Frame, Rgb};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::descriptor::{ActionSpace, Descriptor, Episode};
use crate::env::Environment;
use crate::integrator::rk4;
use crate::math::{
    argmax, clip, ensure_finite, ensure_nonzero, is_non_negative, is_positive, random_range, wrap, RandomSource,
};
use crate::EnvError;

pub const STATE_SIZE: usize = 4;
pub const OBSERVATION_SIZE: usize = 6;
pub const ACTION_SIZE: usize = 3;
/// Torque applied for each action index.
pub const TORQUES: [f32; ACTION_SIZE] = [-1.0, 0.0, 1.0];

/// Pixels per unit of link length when rendering.
const RENDER_SCALE: f32 = 100.0;

/// Physical constants and episode limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcrobotConfig {
    /// Integration step in seconds.
    pub dt: f32,
    pub link_length_1: f32,
    pub link_length_2: f32,
    pub link_mass_1: f32,
    pub link_mass_2: f32,
    /// Distance from each joint to its link's centre of mass.
    pub link_com_pos_1: f32,
    pub link_com_pos_2: f32,
    /// Moment of inertia of each link.
    pub link_moi: f32,
    pub max_vel_1: f32,
    pub max_vel_2: f32,
    pub gravity: f32,
    /// Half-width of the uniform noise added to the selected torque.
    pub torque_noise_max: f32,
    /// Half-width of the uniform perturbation applied to every state slot
    /// on reset.
    pub reset_noise: f32,
    pub max_steps: u32,
    pub render_width: usize,
    pub render_height: usize,
}

impl Default for AcrobotConfig {
    fn default() -> Self {
        Self {
            dt: 0.2,
            link_length_1: 1.0,
            link_length_2: 1.0,
            link_mass_1: 1.0,
            link_mass_2: 1.0,
            link_com_pos_1: 0.5,
            link_com_pos_2: 0.5,
            link_moi: 1.0,
            max_vel_1: 4.0 * PI,
            max_vel_2: 9.0 * PI,
            gravity: 9.8,
            torque_noise_max: 0.0,
            reset_noise: 0.1,
            max_steps: 500,
            render_width: 500,
            render_height: 500,
        }
    }
}

pub struct Acrobot {
    config: AcrobotConfig,
    descriptor: Descriptor,
}

impl Acrobot {
    /// # Errors
    ///
    /// Fails if the step or velocity limits are not positive, the noise
    /// widths are negative, or the render size is zero.
    pub fn new(config: AcrobotConfig) -> Result<Self, EnvError> {
        if !is_positive(config.dt) {
            return Err(EnvError::InvalidConfig("acrobot dt must be positive"));
        }
        if !(is_positive(config.max_vel_1) && is_positive(config.max_vel_2)) {
            return Err(EnvError::InvalidConfig("acrobot velocity limits must be positive"));
        }
        if !(is_non_negative(config.torque_noise_max) && is_non_negative(config.reset_noise)) {
            return Err(EnvError::InvalidConfig("acrobot noise widths must be non-negative"));
        }
        let descriptor = Descriptor::new(
            "acrobot",
            STATE_SIZE,
            OBSERVATION_SIZE,
            ActionSpace::Discrete(ACTION_SIZE),
            &[(0.0, 1.0); ACTION_SIZE],
            (config.render_width, config.render_height),
        )?;
        Ok(Self { config, descriptor })
    }

    #[must_use]
    pub fn config(&self) -> &AcrobotConfig {
        &self.config
    }

    /// Writes the observation derived from `state`.
    pub fn observe(state: &[f32], observation: &mut [f32]) {
        observation[0] = state[0].cos();
        observation[1] = state[0].sin();
        observation[2] = state[1].cos();
        observation[3] = state[1].sin();
        observation[4] = state[2];
        observation[5] = state[3];
    }

    /// Height of the tip above the pivot in units of link length, the
    /// quantity compared against `1.0` for success.
    #[must_use]
    pub fn tip_height(theta1: f32, theta2: f32) -> f32 {
        -theta1.cos() - (theta2 + theta1).cos()
    }

    /// Time derivative of the augmented state. The torque slot is constant.
    fn dsdt(&self, s: &[f32; 5]) -> Result<[f32; 5], EnvError> {
        let c = &self.config;
        let (m1, m2) = (c.link_mass_1, c.link_mass_2);
        let l1 = c.link_length_1;
        let (lc1, lc2) = (c.link_com_pos_1, c.link_com_pos_2);
        let (i1, i2) = (c.link_moi, c.link_moi);
        let g = c.gravity;
        let [theta1, theta2, dtheta1, dtheta2, torque] = *s;

        let d1 = m1 * lc1 * lc1 + m2 * (l1 * l1 + lc2 * lc2 + 2.0 * l1 * lc2 * theta2.cos()) + i1 + i2;
        let d1 = ensure_nonzero(d1, "acrobot inertia d1")?;
        let d2 = m2 * (lc2 * lc2 + l1 * lc2 * theta2.cos()) + i2;
        let phi2 = m2 * lc2 * g * (theta1 + theta2 - FRAC_PI_2).cos();
        let phi1 = -m2 * l1 * lc2 * dtheta2 * dtheta2 * theta2.sin()
            - 2.0 * m2 * l1 * lc2 * dtheta1 * dtheta2 * theta2.sin()
            + (m1 * lc1 + m2 * l1) * g * (theta1 - FRAC_PI_2).cos()
            + phi2;

        let denominator = ensure_nonzero(m2 * lc2 * lc2 + i2 - (d2 * d2 / d1), "acrobot denominator")?;
        let ddtheta2 =
            (torque + (d2 / d1) * phi1 - m2 * l1 * lc2 * dtheta1 * dtheta1 * theta2.sin() - phi2) / denominator;
        let ddtheta1 = -(d2 * ddtheta2 + phi1) / d1;

        Ok([dtheta1, dtheta2, ddtheta1, ddtheta2, 0.0])
    }
}

impl Environment for Acrobot {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn reset_in_place(&self, rng: &mut dyn RandomSource, episode: &mut Episode) -> Result<(), EnvError> {
        self.descriptor.check_episode(episode)?;
        let noise = self.config.reset_noise;
        for slot in &mut episode.state {
            *slot = random_range(rng, -noise, noise);
        }
        Self::observe(&episode.state, &mut episode.observation);
        episode.step = 0;
        episode.reward = 0.0;
        episode.ended = false;
        episode.terminated = false;
        trace!(env = "acrobot", state = ?episode.state, "reset");
        Ok(())
    }

    fn step_in_place(&self, rng: &mut dyn RandomSource, episode: &mut Episode, action: &[f32]) -> Result<(), EnvError> {
        self.descriptor.check_episode(episode)?;
        self.descriptor.check_action(action)?;

        let mut torque = TORQUES[argmax(action)];
        if self.config.torque_noise_max > 0.0 {
            let noise = self.config.torque_noise_max;
            torque += random_range(rng, -noise, noise);
        }

        let s = &episode.state;
        let augmented = [s[0], s[1], s[2], s[3], torque];
        let next = rk4(&augmented, self.config.dt, |y| self.dsdt(y))?;
        ensure_finite(&next[..STATE_SIZE], "acrobot state")?;

        let theta1 = wrap(next[0], -PI, PI);
        let theta2 = wrap(next[1], -PI, PI);
        let state = &mut episode.state;
        state[0] = theta1;
        state[1] = theta2;
        state[2] = clip(next[2], -self.config.max_vel_1, self.config.max_vel_1);
        state[3] = clip(next[3], -self.config.max_vel_2, self.config.max_vel_2);
        Self::observe(&episode.state, &mut episode.observation);
        episode.step += 1;

        let reached_goal = Self::tip_height(theta1, theta2) > 1.0;
        let out_of_time = episode.step >= self.config.max_steps;
        if reached_goal {
            episode.reward = 0.0;
            episode.ended = true;
            episode.terminated = true;
        } else {
            episode.reward = -1.0;
            episode.ended = out_of_time;
            episode.terminated = false;
        }
        if episode.ended {
            debug!(env = "acrobot", step = episode.step, terminated = episode.terminated, "episode ended");
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn render_in_place(&self, episode: &Episode, action: &[f32], frame: &mut Frame) -> Result<(), EnvError> {
        self.descriptor.check_episode(episode)?;
        self.descriptor.check_action(action)?;
        self.descriptor.check_frame(frame)?;
        frame.clear(Rgb::WHITE);

        let width = frame.width() as i32;
        let cx = width / 2;
        let cy = frame.height() as i32 / 2;
        let theta1 = episode.state[0];
        let theta2 = episode.state[1];
        let reach_1 = self.config.link_length_1 * RENDER_SCALE;
        let reach_2 = self.config.link_length_2 * RENDER_SCALE;

        let x1 = cx + (theta1.sin() * reach_1) as i32;
        let y1 = cy + (theta1.cos() * reach_1) as i32;
        let x2 = x1 + ((theta1 + theta2).sin() * reach_2) as i32;
        let y2 = y1 + ((theta1 + theta2).cos() * reach_2) as i32;

        frame.circle(cx, cy, 5, Rgb::BLACK);
        frame.line(cx, cy, x1, y1, Rgb::RED);
        frame.line(x1, y1, x2, y2, Rgb::RED);

        // Success threshold: the tip must rise above one link length over the pivot.
        let target_y = cy - RENDER_SCALE as i32;
        frame.line(0, target_y, width - 1, target_y, Rgb::RED);

        frame.argmax_indicator(argmax(action), ACTION_SIZE);
        Ok(())
    }
}
