use rand::Rng;

use crate::{
    algo::tabular::{q_table::ActionValueTable, Hashable},
    assert_interval,
    decay::Decay,
    util::argmax,
};

use super::Choice;

/// Decide whether to explore with probability `epsilon`
pub fn choose<R: Rng + ?Sized>(epsilon: f64, rng: &mut R) -> Choice {
    if rng.gen::<f64>() < epsilon {
        Choice::Explore
    } else {
        Choice::Exploit
    }
}

/// Select an action for `state`: uniform with probability `epsilon`, otherwise the first-max greedy action
///
/// Unvisited states behave like a zero row; the table is not modified.
pub fn select<S, R>(table: &ActionValueTable<S>, state: &S, epsilon: f64, rng: &mut R) -> usize
where
    S: Hashable,
    R: Rng + ?Sized,
{
    match choose(epsilon, rng) {
        Choice::Explore => rng.gen_range(0..table.n_actions()),
        Choice::Exploit => table.greedy_action(state).unwrap_or(0),
    }
}

/// The epsilon-greedy distribution over `values`
///
/// Every action gets `epsilon / n` and the greedy action an extra `1 - epsilon`.
///
/// **Panics** if `epsilon` is not in `[0, 1]` or `values` is empty
pub fn probabilities(values: &[f64], epsilon: f64) -> Vec<f64> {
    assert_interval!(epsilon, 0.0, 1.0);
    let n = values.len();
    let mut probs = vec![epsilon / n as f64; n];
    probs[argmax(values)] += 1.0 - epsilon;
    probs
}

/// Epsilon greedy exploration policy with an epsilon annealed between episodes
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: f64,
    decay: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy from a starting epsilon and a decay strategy
    ///
    /// **Panics** if `epsilon` is not in the interval `[0,1]`
    pub fn new(epsilon: f64, decay: D) -> Self {
        assert_interval!(epsilon, 0.0, 1.0);
        Self { epsilon, decay }
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Apply one decay step and return the new epsilon
    pub fn advance(&mut self) -> f64 {
        self.epsilon = self.decay.step(self.epsilon);
        self.epsilon
    }

    /// Invoke epsilon greedy policy with the current epsilon
    pub fn select<S, R>(&self, table: &ActionValueTable<S>, state: &S, rng: &mut R) -> usize
    where
        S: Hashable,
        R: Rng + ?Sized,
    {
        select(table, state, self.epsilon, rng)
    }
}
