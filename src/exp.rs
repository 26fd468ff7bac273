/// Represents a single experience or transition in the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Exp<S> {
    /// The state of the environment before taking the action
    pub state: S,
    /// The action taken in the given state
    pub action: usize,
    /// The reward received after taking the action
    pub reward: f64,
    /// The state of the environment after the action is taken, or if terminal, `None`
    pub next_state: Option<S>,
}
