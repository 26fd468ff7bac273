/// Represents an episodic environment with a finite action space, indexed `0..action_count()`
///
/// This mirrors the `reset`/`step` protocol of gym-style environments. States are opaque
/// to the learning code and only used as table keys.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// Auxiliary data returned alongside each transition, ignored by the learners
    type Info;

    /// Number of available actions, fixed for the lifetime of the environment
    fn action_count(&self) -> usize;

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;

    /// Update the environment in response to an action taken by an agent
    fn step(&mut self, action: usize) -> Step<Self::State, Self::Info>;
}

/// The outcome of a single [`Environment::step`]
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S, I = ()> {
    pub next_state: S,
    pub reward: f64,
    /// Whether `next_state` is terminal
    pub done: bool,
    pub info: I,
}

/// Wraps an environment and panics if it is stepped after reporting `done` without a `reset`
pub struct ProtocolGuard<'a, E> {
    env: &'a mut E,
    active: bool,
}

impl<'a, E: Environment> ProtocolGuard<'a, E> {
    pub fn new(env: &'a mut E) -> Self {
        Self { env, active: false }
    }
}

impl<E: Environment> Environment for ProtocolGuard<'_, E> {
    type State = E::State;
    type Info = E::Info;

    fn action_count(&self) -> usize {
        self.env.action_count()
    }

    fn reset(&mut self) -> Self::State {
        self.active = true;
        self.env.reset()
    }

    fn step(&mut self, action: usize) -> Step<Self::State, Self::Info> {
        assert!(
            self.active,
            "Environment stepped outside of an episode; call `reset` first"
        );
        let step = self.env.step(action);
        self.active = !step.done;
        step
    }
}
