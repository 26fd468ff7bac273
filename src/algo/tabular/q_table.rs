use std::collections::HashMap;

use crate::util::argmax;

use super::Hashable;

/// A sparse table of action values, one vector of length `n_actions` per state
///
/// Rows are created lazily, zero-filled, the first time a state is looked up through
/// [`get_or_init`](Self::get_or_init). A state with a row counts as visited; the greedy
/// policy is undefined for every other state.
#[derive(Debug, Clone)]
pub struct ActionValueTable<S: Hashable> {
    values: HashMap<S, Vec<f64>>,
    n_actions: usize,
}

impl<S: Hashable> ActionValueTable<S> {
    /// **Panics** if `n_actions` is zero
    pub fn new(n_actions: usize) -> Self {
        assert!(n_actions > 0, "There is always at least one action available");
        Self {
            values: HashMap::new(),
            n_actions,
        }
    }

    /// Length of every row
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// Number of visited states
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no state has been visited yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `state` has a row
    pub fn contains(&self, state: &S) -> bool {
        self.values.contains_key(state)
    }

    /// Action values of a visited state, without creating a row
    pub fn get(&self, state: &S) -> Option<&[f64]> {
        self.values.get(state).map(Vec::as_slice)
    }

    /// Action values of `state`, inserting a zero row on first access
    pub fn get_or_init(&mut self, state: S) -> &mut [f64] {
        let n_actions = self.n_actions;
        self.values
            .entry(state)
            .or_insert_with(|| vec![0.0; n_actions])
    }

    /// Overwrite a single action value
    pub fn update(&mut self, state: S, action: usize, value: f64) {
        self.get_or_init(state)[action] = value;
    }

    /// First-max greedy action of a visited state, `None` if never visited
    pub fn greedy_action(&self, state: &S) -> Option<usize> {
        self.get(state).map(argmax)
    }

    /// max<sub>a</sub> Q(s, a) of a visited state, `None` if never visited
    pub fn state_value(&self, state: &S) -> Option<f64> {
        self.greedy_action(state).map(|a| self.values[state][a])
    }

    /// Greedy action for every visited state
    pub fn policy(&self) -> HashMap<S, usize> {
        self.values.iter().map(|(&s, v)| (s, argmax(v))).collect()
    }

    /// Greedy action for each of `states` in order, `None` where the state was never visited
    pub fn policy_over(&self, states: impl IntoIterator<Item = S>) -> Vec<Option<usize>> {
        states
            .into_iter()
            .map(|s| self.greedy_action(&s))
            .collect()
    }

    /// Visited states and their action values, in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&S, &[f64])> {
        self.values.iter().map(|(s, v)| (s, v.as_slice()))
    }
}
