/// Exploration policy result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

pub mod epsilon_greedy;

pub use epsilon_greedy::EpsilonGreedy;
