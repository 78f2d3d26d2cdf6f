use raster::Frame;

use crate::descriptor::{Descriptor, Episode};
use crate::math::RandomSource;
use crate::EnvError;

/// Environment trait shared by every simulator.
///
/// Implementors provide the in-place operations; the allocating variants
/// are copy-then-delegate wrappers and produce identical results. All
/// randomness comes from the explicit `rng` argument, so an environment
/// value holds no mutable state and may be shared between threads that
/// each own their own episode and generator.
pub trait Environment: Send + Sync {
    /// Shape of this environment kind.
    fn descriptor(&self) -> &Descriptor;

    /// Samples a new initial state, zeroes the step counter, clears the
    /// flags and recomputes the observation.
    ///
    /// # Errors
    ///
    /// Fails if the episode buffers do not match the descriptor.
    fn reset_in_place(&self, rng: &mut dyn RandomSource, episode: &mut Episode) -> Result<(), EnvError>;

    /// Advances the dynamics by one fixed time increment.
    ///
    /// Updates state, observation, reward and flags and increments the step
    /// counter. Stepping an episode that has already ended is not guarded
    /// against; the driver is expected to stop.
    ///
    /// # Errors
    ///
    /// Fails on buffer or action size mismatches and when the dynamics
    /// produce a non-finite state or reward.
    fn step_in_place(&self, rng: &mut dyn RandomSource, episode: &mut Episode, action: &[f32]) -> Result<(), EnvError>;

    /// Draws the episode's current state into `frame`.
    ///
    /// # Errors
    ///
    /// Fails if the frame is not the descriptor's render size or the
    /// buffers are mis-sized.
    fn render_in_place(&self, episode: &Episode, action: &[f32], frame: &mut Frame) -> Result<(), EnvError>;

    /// Allocates an episode and resets it.
    ///
    /// # Errors
    ///
    /// See [`Environment::reset_in_place`].
    fn reset(&self, rng: &mut dyn RandomSource) -> Result<Episode, EnvError> {
        let mut episode = Episode::new(self.descriptor());
        self.reset_in_place(rng, &mut episode)?;
        Ok(episode)
    }

    /// Steps a copy of `episode` and returns it.
    ///
    /// # Errors
    ///
    /// See [`Environment::step_in_place`].
    fn step(&self, rng: &mut dyn RandomSource, episode: &Episode, action: &[f32]) -> Result<Episode, EnvError> {
        let mut next = episode.clone();
        self.step_in_place(rng, &mut next, action)?;
        Ok(next)
    }

    /// Renders into a freshly allocated frame.
    ///
    /// # Errors
    ///
    /// See [`Environment::render_in_place`].
    fn render(&self, episode: &Episode, action: &[f32]) -> Result<Frame, EnvError> {
        let mut frame = self.descriptor().new_frame()?;
        self.render_in_place(episode, action, &mut frame)?;
        Ok(frame)
    }
}
