/// Implemented RL algorithms
pub mod algo;

/// Strategies for decaying the exploration rate between episodes
pub mod decay;

/// Data structures
pub mod ds;

/// Environment
pub mod env;

/// Configuration errors
pub mod error;

/// Single transitions
pub mod exp;

/// Exploration policies
pub mod exploration;

mod util;

pub use algo::tabular::{
    agent::TdAgent,
    q_table::ActionValueTable,
    td::{ExpectedSarsa, Sarsa, SarsaMax, UpdateRule},
    train::{train, RewardHistory, TrainConfig, Training},
};
pub use error::ConfigError;
