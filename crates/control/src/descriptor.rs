//! Fixed shape of an environment kind and the per-episode buffers it
//! operates on.

use raster::Frame;

use crate::math::{random_range, RandomSource};
use crate::EnvError;

/// How an environment interprets its action vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSpace {
    /// `n` scores; the index of the first maximum selects the applied input.
    Discrete(usize),
    /// `n` values used directly after clipping to the declared bounds.
    Continuous(usize),
}

impl ActionSpace {
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            ActionSpace::Discrete(n) | ActionSpace::Continuous(n) => *n,
        }
    }

    #[must_use]
    pub fn is_discrete(&self) -> bool {
        matches!(self, ActionSpace::Discrete(_))
    }
}

/// Immutable description of one environment kind: buffer sizes, action
/// bounds and render dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    name: &'static str,
    state_size: usize,
    observation_size: usize,
    action_space: ActionSpace,
    action_mins: Vec<f32>,
    action_maxs: Vec<f32>,
    render_width: usize,
    render_height: usize,
}

impl Descriptor {
    /// Builds and validates a descriptor.
    ///
    /// `action_bounds` holds one `(min, max)` pair per action slot and
    /// `render_size` is `(width, height)` in pixels.
    ///
    /// # Errors
    ///
    /// Fails if any size is zero, if the number of bounds differs from the
    /// action size, or if a bound has `min > max` (or is NaN).
    pub fn new(
        name: &'static str,
        state_size: usize,
        observation_size: usize,
        action_space: ActionSpace,
        action_bounds: &[(f32, f32)],
        render_size: (usize, usize),
    ) -> Result<Self, EnvError> {
        if state_size == 0 {
            return Err(EnvError::InvalidSize("state_size"));
        }
        if observation_size == 0 {
            return Err(EnvError::InvalidSize("observation_size"));
        }
        if action_space.size() == 0 {
            return Err(EnvError::InvalidSize("action_size"));
        }
        if render_size.0 == 0 {
            return Err(EnvError::InvalidSize("render_width"));
        }
        if render_size.1 == 0 {
            return Err(EnvError::InvalidSize("render_height"));
        }
        if action_bounds.len() != action_space.size() {
            return Err(EnvError::ActionSize { expected: action_space.size(), got: action_bounds.len() });
        }
        for (index, &(min, max)) in action_bounds.iter().enumerate() {
            if min.is_nan() || max.is_nan() || min > max {
                return Err(EnvError::InvalidBounds { index, min, max });
            }
        }
        Ok(Self {
            name,
            state_size,
            observation_size,
            action_space,
            action_mins: action_bounds.iter().map(|b| b.0).collect(),
            action_maxs: action_bounds.iter().map(|b| b.1).collect(),
            render_width: render_size.0,
            render_height: render_size.1,
        })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn state_size(&self) -> usize {
        self.state_size
    }

    #[must_use]
    pub fn observation_size(&self) -> usize {
        self.observation_size
    }

    #[must_use]
    pub fn action_size(&self) -> usize {
        self.action_space.size()
    }

    #[must_use]
    pub fn action_space(&self) -> ActionSpace {
        self.action_space
    }

    #[must_use]
    pub fn action_mins(&self) -> &[f32] {
        &self.action_mins
    }

    #[must_use]
    pub fn action_maxs(&self) -> &[f32] {
        &self.action_maxs
    }

    #[must_use]
    pub fn render_width(&self) -> usize {
        self.render_width
    }

    #[must_use]
    pub fn render_height(&self) -> usize {
        self.render_height
    }

    /// Draws a fresh action with each slot uniform in its bounds.
    pub fn random_action(&self, rng: &mut dyn RandomSource) -> Vec<f32> {
        let mut action = vec![0.0; self.action_size()];
        self.random_action_in_place(rng, &mut action);
        action
    }

    /// Overwrites `action` with uniform draws from the action bounds.
    pub fn random_action_in_place(&self, rng: &mut dyn RandomSource, action: &mut [f32]) {
        for ((slot, &min), &max) in action.iter_mut().zip(&self.action_mins).zip(&self.action_maxs) {
            *slot = random_range(rng, min, max);
        }
    }

    /// Checks that the episode buffers match this descriptor.
    ///
    /// # Errors
    ///
    /// Returns the size error for the first mismatching buffer.
    pub fn check_episode(&self, episode: &Episode) -> Result<(), EnvError> {
        if episode.state.len() != self.state_size {
            return Err(EnvError::StateSize { expected: self.state_size, got: episode.state.len() });
        }
        if episode.observation.len() != self.observation_size {
            return Err(EnvError::ObservationSize {
                expected: self.observation_size,
                got: episode.observation.len(),
            });
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`EnvError::ActionSize`] if the length differs from the
    /// action size.
    pub fn check_action(&self, action: &[f32]) -> Result<(), EnvError> {
        if action.len() == self.action_size() {
            Ok(())
        } else {
            Err(EnvError::ActionSize { expected: self.action_size(), got: action.len() })
        }
    }

    /// # Errors
    ///
    /// Returns [`EnvError::FrameSize`] unless the frame has the render size.
    pub fn check_frame(&self, frame: &Frame) -> Result<(), EnvError> {
        let got = (frame.width(), frame.height());
        let expected = (self.render_width, self.render_height);
        if got == expected {
            Ok(())
        } else {
            Err(EnvError::FrameSize { expected, got })
        }
    }

    /// Allocates a frame of the render size.
    ///
    /// # Errors
    ///
    /// Propagates the raster error for an empty frame, which a validated
    /// descriptor never produces.
    pub fn new_frame(&self) -> Result<Frame, EnvError> {
        Ok(Frame::new(self.render_width, self.render_height)?)
    }
}

/// Mutable values of one running episode.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Steps taken since the last reset.
    pub step: u32,
    pub state: Vec<f32>,
    pub observation: Vec<f32>,
    /// Reward of the most recent step.
    pub reward: f32,
    /// The episode should stop.
    pub ended: bool,
    /// The episode stopped on a success or failure condition rather than
    /// the step limit. Only ever set together with `ended`.
    pub terminated: bool,
}

impl Episode {
    /// Zeroed buffers sized for `descriptor`.
    #[must_use]
    pub fn new(descriptor: &Descriptor) -> Self {
        Self {
            step: 0,
            state: vec![0.0; descriptor.state_size()],
            observation: vec![0.0; descriptor.observation_size()],
            reward: 0.0,
            ended: false,
            terminated: false,
        }
    }

    /// Ended because the step limit ran out.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.ended && !self.terminated
    }
}
