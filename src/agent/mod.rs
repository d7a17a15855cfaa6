//! Agent-facing interface to the simulation
//!
//! Provides:
//! - A fixed 14-feature observation vector
//! - An environment wrapper with reset / step / observation

pub mod environment;
pub mod observation;

pub use environment::SnakeEnvironment;
pub use observation::{OBSERVATION_LEN, Observation, create_observation};
