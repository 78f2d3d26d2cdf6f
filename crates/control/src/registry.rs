//! Construct environments by name or from a serialized configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::acrobot::{Acrobot, AcrobotConfig};
use crate::cartpole::{CartPole, CartPoleConfig};
use crate::env::Environment;
use crate::pendulum::{Pendulum, PendulumConfig};
use crate::EnvError;

/// The available environment kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvKind {
    Acrobot,
    CartPole,
    Pendulum,
}

impl EnvKind {
    pub const ALL: [EnvKind; 3] = [EnvKind::Acrobot, EnvKind::CartPole, EnvKind::Pendulum];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            EnvKind::Acrobot => "acrobot",
            EnvKind::CartPole => "cartpole",
            EnvKind::Pendulum => "pendulum",
        }
    }

    /// Builds the environment with its reference constants.
    ///
    /// # Errors
    ///
    /// Only fails if the default configuration is rejected, which would be
    /// a bug in this crate.
    pub fn make(self) -> Result<Box<dyn Environment>, EnvError> {
        EnvConfig::from(self).build()
    }
}

impl fmt::Display for EnvKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown environment `{0}` (expected acrobot, cartpole or pendulum)")]
pub struct UnknownEnv(pub String);

impl FromStr for EnvKind {
    type Err = UnknownEnv;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "acrobot" => Ok(EnvKind::Acrobot),
            "cartpole" | "cart-pole" => Ok(EnvKind::CartPole),
            "pendulum" => Ok(EnvKind::Pendulum),
            _ => Err(UnknownEnv(s.to_string())),
        }
    }
}

/// An environment kind together with its constants, e.g.
/// `{"env": "cartpole", "force_mag": 5.0}`. Omitted fields keep their
/// reference values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "env", rename_all = "lowercase")]
pub enum EnvConfig {
    Acrobot(AcrobotConfig),
    CartPole(CartPoleConfig),
    Pendulum(PendulumConfig),
}

impl EnvConfig {
    #[must_use]
    pub fn kind(&self) -> EnvKind {
        match self {
            EnvConfig::Acrobot(_) => EnvKind::Acrobot,
            EnvConfig::CartPole(_) => EnvKind::CartPole,
            EnvConfig::Pendulum(_) => EnvKind::Pendulum,
        }
    }

    /// # Errors
    ///
    /// Returns the validation error of the selected environment.
    pub fn build(&self) -> Result<Box<dyn Environment>, EnvError> {
        Ok(match self {
            EnvConfig::Acrobot(c) => Box::new(Acrobot::new(c.clone())?),
            EnvConfig::CartPole(c) => Box::new(CartPole::new(c.clone())?),
            EnvConfig::Pendulum(c) => Box::new(Pendulum::new(c.clone())?),
        })
    }
}

impl From<EnvKind> for EnvConfig {
    fn from(kind: EnvKind) -> Self {
        match kind {
            EnvKind::Acrobot => EnvConfig::Acrobot(AcrobotConfig::default()),
            EnvKind::CartPole => EnvConfig::CartPole(CartPoleConfig::default()),
            EnvKind::Pendulum => EnvConfig::Pendulum(PendulumConfig::default()),
        }
    }
}
