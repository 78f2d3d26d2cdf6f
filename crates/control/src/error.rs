use raster::RasterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("state has {got} slots, expected {expected}")]
    StateSize { expected: usize, got: usize },
    #[error("observation has {got} slots, expected {expected}")]
    ObservationSize { expected: usize, got: usize },
    #[error("action has {got} slots, expected {expected}")]
    ActionSize { expected: usize, got: usize },
    #[error("action bound {index} is malformed: min {min} > max {max}")]
    InvalidBounds { index: usize, min: f32, max: f32 },
    #[error("descriptor dimension must be positive: {0}")]
    InvalidSize(&'static str),
    #[error("frame is {got:?}, expected {expected:?}")]
    FrameSize { expected: (usize, usize), got: (usize, usize) },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
    #[error(transparent)]
    Raster(#[from] RasterError),
}
