pub mod agent;
pub mod q_table;
pub mod td;
pub mod train;

/// A trait for state types that can be used as keys in a [`HashMap`](std::collections::HashMap)
pub trait Hashable: Copy + Eq + std::hash::Hash {}

impl<T> Hashable for T where T: Copy + Eq + std::hash::Hash {}
