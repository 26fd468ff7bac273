//! One-step temporal-difference update rules
//!
//! All three rules share the update
//!
//! Q(s, a) ← Q(s, a) + α(r + γ·target − Q(s, a))
//!
//! and differ only in the bootstrap `target` computed for the next state. A terminal
//! transition always bootstraps from `0`.

use crate::{exp::Exp, exploration::epsilon_greedy};

use super::{q_table::ActionValueTable, Hashable};

/// Computes the bootstrap target of a TD update
pub trait UpdateRule {
    /// Whether the target depends on the next action actually chosen by the behaviour policy,
    /// in which case the agent must select that action before learning
    const ON_POLICY_SAMPLE: bool = false;

    /// Bootstrap target for `next_state`, or `0` if the transition was terminal
    ///
    /// Rows that were never visited contribute zeros and are not created.
    fn target<S: Hashable>(
        &self,
        table: &ActionValueTable<S>,
        next_state: Option<&S>,
        epsilon: f64,
        next_action: Option<usize>,
    ) -> f64;
}

/// On-policy TD control: bootstraps from Q(s', a') for the sampled next action a'
#[derive(Debug, Clone, Copy, Default)]
pub struct Sarsa;

/// Off-policy TD control (Q-learning): bootstraps from max<sub>a</sub> Q(s', a)
#[derive(Debug, Clone, Copy, Default)]
pub struct SarsaMax;

/// Bootstraps from the expectation of Q(s', ·) under the epsilon-greedy policy
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedSarsa;

impl UpdateRule for Sarsa {
    const ON_POLICY_SAMPLE: bool = true;

    fn target<S: Hashable>(
        &self,
        table: &ActionValueTable<S>,
        next_state: Option<&S>,
        _epsilon: f64,
        next_action: Option<usize>,
    ) -> f64 {
        let Some(next_state) = next_state else {
            return 0.0;
        };
        let next_action =
            next_action.expect("SARSA bootstraps from the action selected for the next step");
        table.get(next_state).map_or(0.0, |q| q[next_action])
    }
}

impl UpdateRule for SarsaMax {
    fn target<S: Hashable>(
        &self,
        table: &ActionValueTable<S>,
        next_state: Option<&S>,
        _epsilon: f64,
        _next_action: Option<usize>,
    ) -> f64 {
        next_state
            .and_then(|s| table.state_value(s))
            .unwrap_or(0.0)
    }
}

impl UpdateRule for ExpectedSarsa {
    fn target<S: Hashable>(
        &self,
        table: &ActionValueTable<S>,
        next_state: Option<&S>,
        epsilon: f64,
        _next_action: Option<usize>,
    ) -> f64 {
        let Some(q) = next_state.and_then(|s| table.get(s)) else {
            return 0.0;
        };
        epsilon_greedy::probabilities(q, epsilon)
            .iter()
            .zip(q)
            .map(|(p, v)| p * v)
            .sum()
    }
}

/// Apply Q(s, a) ← Q(s, a) + α(r + γ·target − Q(s, a)) for `exp` and return the TD error
pub fn td_update<S: Hashable>(
    table: &mut ActionValueTable<S>,
    exp: &Exp<S>,
    target: f64,
    alpha: f64,
    gamma: f64,
) -> f64 {
    let q = &mut table.get_or_init(exp.state)[exp.action];
    let td_error = exp.reward + gamma * target - *q;
    *q += alpha * td_error;
    td_error
}
