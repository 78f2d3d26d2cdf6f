#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_panics_doc)]
//! # Classic Control Environments
//!
//! Deterministic simulators for three benchmark control problems behind one
//! [`Environment`] trait:
//!
//! -   [`Acrobot`]: two-link swing-up, RK4 integration, discrete torque.
//! -   [`CartPole`]: pole balancing on a cart, explicit Euler, discrete push.
//! -   [`Pendulum`]: single pendulum swing-up, continuous torque.
//!
//! Each environment is described by an immutable [`Descriptor`] (buffer
//! sizes, action bounds, render size). The mutable values of a run live in
//! an [`Episode`], which callers own. Randomness is only ever drawn from the
//! [`RandomSource`] passed into a call, so a seeded generator and the same
//! action sequence reproduce a trajectory and its frames exactly.
//!
//! ```rust,ignore
//! use control::{EnvKind, Environment};
//!
//! let env = EnvKind::CartPole.make()?;
//! let mut rng = fastrand::Rng::with_seed(42);
//! let mut episode = env.reset(&mut rng)?;
//! while !episode.ended {
//!     let action = env.descriptor().random_action(&mut rng);
//!     env.step_in_place(&mut rng, &mut episode, &action)?;
//! }
//! ```

pub mod acrobot;
pub mod cartpole;
pub mod descriptor;
pub mod env;
pub mod error;
pub mod integrator;
pub mod math;
pub mod pendulum;
pub mod registry;

pub use acrobot::{Acrobot, AcrobotConfig};
pub use cartpole::{CartPole, CartPoleConfig};
pub use descriptor::{ActionSpace, Descriptor, Episode};
pub use env::Environment;
pub use error::EnvError;
pub use math::RandomSource;
pub use pendulum::{Pendulum, PendulumConfig};
pub use raster::Frame;
pub use registry::{EnvConfig, EnvKind, UnknownEnv};
