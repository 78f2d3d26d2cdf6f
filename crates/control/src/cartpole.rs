//! Cart-pole balancing.
//!
//! A pole is hinged to a cart on a frictionless track; pushing the cart
//! left or right keeps the pole upright. Integrated with one explicit Euler
//! step per call.
//!
//! State and observation: `[x, ẋ, θ, θ̇]`.
//! Action: two scores, argmax index 1 pushes right, index 0 pushes left.

use raster::{Frame, Rgb};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::descriptor::{ActionSpace, Descriptor, Episode};
use crate::env::Environment;
use crate::math::{argmax, ensure_finite, ensure_nonzero, is_non_negative, is_positive, random_range, RandomSource};
use crate::EnvError;

pub const STATE_SIZE: usize = 4;
pub const OBSERVATION_SIZE: usize = 4;
pub const ACTION_SIZE: usize = 2;

const CART_WIDTH: f32 = 50.0;
const CART_HEIGHT: f32 = 30.0;
const POLE_PIXELS: f32 = 100.0;

/// Configuration for the cart-pole dynamics and limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartPoleConfig {
    pub gravity: f32,
    pub mass_cart: f32,
    pub mass_pole: f32,
    /// Half the pole length.
    pub length: f32,
    /// Magnitude of the push applied for either action.
    pub force_mag: f32,
    /// Integration step in seconds.
    pub tau: f32,
    /// Pole angle beyond which the episode fails (radians).
    pub theta_threshold_radians: f32,
    /// Cart position beyond which the episode fails.
    pub x_threshold: f32,
    pub reset_noise: f32,
    pub max_steps: u32,
    pub render_width: usize,
    pub render_height: usize,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            mass_cart: 1.0,
            mass_pole: 0.1,
            length: 0.5,
            force_mag: 10.0,
            tau: 0.02,
            theta_threshold_radians: 12.0 * 2.0 * std::f32::consts::PI / 360.0,
            x_threshold: 2.4,
            reset_noise: 0.05,
            max_steps: 500,
            render_width: 400,
            render_height: 400,
        }
    }
}

impl CartPoleConfig {
    #[must_use]
    pub fn total_mass(&self) -> f32 {
        self.mass_cart + self.mass_pole
    }

    #[must_use]
    pub fn pole_mass_length(&self) -> f32 {
        self.mass_pole * self.length
    }
}

pub struct CartPole {
    config: CartPoleConfig,
    descriptor: Descriptor,
}

impl CartPole {
    /// # Errors
    ///
    /// Fails if the masses, pole length, step or thresholds are not
    /// positive, or the render size is zero.
    pub fn new(config: CartPoleConfig) -> Result<Self, EnvError> {
        if !(is_positive(config.mass_cart) && is_non_negative(config.mass_pole) && is_positive(config.length)) {
            return Err(EnvError::InvalidConfig("cartpole masses and length must be positive"));
        }
        if !is_positive(config.tau) {
            return Err(EnvError::InvalidConfig("cartpole tau must be positive"));
        }
        if !(is_positive(config.x_threshold) && is_positive(config.theta_threshold_radians)) {
            return Err(EnvError::InvalidConfig("cartpole thresholds must be positive"));
        }
        if !is_non_negative(config.reset_noise) {
            return Err(EnvError::InvalidConfig("cartpole reset noise must be non-negative"));
        }
        let descriptor = Descriptor::new(
            "cartpole",
            STATE_SIZE,
            OBSERVATION_SIZE,
            ActionSpace::Discrete(ACTION_SIZE),
            &[(0.0, 1.0); ACTION_SIZE],
            (config.render_width, config.render_height),
        )?;
        Ok(Self { config, descriptor })
    }

    #[must_use]
    pub fn config(&self) -> &CartPoleConfig {
        &self.config
    }

    /// The observation is the state itself.
    pub fn observe(state: &[f32], observation: &mut [f32]) {
        observation[..STATE_SIZE].copy_from_slice(&state[..STATE_SIZE]);
    }

    /// Strictly beyond either threshold; a cart exactly at `x_threshold` is
    /// still in bounds.
    #[must_use]
    pub fn out_of_bounds(&self, x: f32, theta: f32) -> bool {
        let c = &self.config;
        x < -c.x_threshold || x > c.x_threshold || theta < -c.theta_threshold_radians || theta > c.theta_threshold_radians
    }
}

impl Environment for CartPole {
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
        trace!(env = "cartpole", state = ?episode.state, "reset");
        Ok(())
    }

    fn step_in_place(&self, _rng: &mut dyn RandomSource, episode: &mut Episode, action: &[f32]) -> Result<(), EnvError> {
        self.descriptor.check_episode(episode)?;
        self.descriptor.check_action(action)?;
        let c = &self.config;

        let force = if argmax(action) == 1 { c.force_mag } else { -c.force_mag };
        let [x, x_dot, theta, theta_dot] = [episode.state[0], episode.state[1], episode.state[2], episode.state[3]];
        let cos_theta = theta.cos();
        let sin_theta = theta.sin();
        let total_mass = c.total_mass();
        let pole_mass_length = c.pole_mass_length();

        let temp = (force + pole_mass_length * (theta_dot * theta_dot) * sin_theta) / total_mass;
        let denominator = ensure_nonzero(
            c.length * (4.0 / 3.0 - c.mass_pole * (cos_theta * cos_theta) / total_mass),
            "cartpole denominator",
        )?;
        let theta_acc = (c.gravity * sin_theta - cos_theta * temp) / denominator;
        let x_acc = temp - pole_mass_length * theta_acc * cos_theta / total_mass;

        let next = [
            x + c.tau * x_dot,
            x_dot + c.tau * x_acc,
            theta + c.tau * theta_dot,
            theta_dot + c.tau * theta_acc,
        ];
        ensure_finite(&next, "cartpole state")?;
        episode.state.copy_from_slice(&next);
        Self::observe(&episode.state, &mut episode.observation);
        episode.step += 1;

        let out_of_bounds = self.out_of_bounds(next[0], next[2]);
        let out_of_time = episode.step >= c.max_steps;
        episode.ended = out_of_bounds || out_of_time;
        episode.terminated = out_of_bounds;
        // Survival is rewarded on every step, the one that ends the episode included.
        episode.reward = 1.0;
        if episode.ended {
            debug!(env = "cartpole", step = episode.step, terminated = episode.terminated, "episode ended");
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    fn render_in_place(&self, episode: &Episode, action: &[f32], frame: &mut Frame) -> Result<(), EnvError> {
        self.descriptor.check_episode(episode)?;
        self.descriptor.check_action(action)?;
        self.descriptor.check_frame(frame)?;
        frame.clear(Rgb::WHITE);

        let width = frame.width() as f32;
        let x = episode.state[0];
        let theta = episode.state[2];
        let scale = width / (self.config.x_threshold * 2.0);
        let cart_y = (frame.height() / 2) as f32;
        let cart_x = x * scale + width / 2.0;

        frame.line(0, cart_y as i32, frame.width() as i32, cart_y as i32, Rgb::BLACK);
        frame.rect(
            (cart_x - CART_WIDTH / 2.0) as i32,
            (cart_y - CART_HEIGHT / 2.0) as i32,
            CART_WIDTH as i32,
            CART_HEIGHT as i32,
            Rgb::BROWN,
        );

        let pole_x = cart_x + theta.sin() * POLE_PIXELS;
        let pole_y = cart_y - theta.cos() * POLE_PIXELS;
        frame.line(cart_x as i32, cart_y as i32, pole_x as i32, pole_y as i32, Rgb::RED);

        frame.argmax_indicator(argmax(action), ACTION_SIZE);
        Ok(())
    }
}
