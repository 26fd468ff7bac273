use std::fmt::Debug;

use log::{debug, trace};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    assert_interval,
    decay::Decay,
    env::{Environment, ProtocolGuard, Step},
    exp::Exp,
    exploration::{epsilon_greedy, EpsilonGreedy},
};

use super::{
    q_table::ActionValueTable,
    td::{td_update, UpdateRule},
    Hashable,
};

/// A tabular TD control agent
///
/// ### Generics
/// - `S` - The environment's state type, used as a key of the [`ActionValueTable`]
/// - `R` - The [`UpdateRule`] that computes the bootstrap target ([`Sarsa`](super::td::Sarsa),
///   [`SarsaMax`](super::td::SarsaMax) or [`ExpectedSarsa`](super::td::ExpectedSarsa))
/// - `D` - The [`Decay`] strategy applied to epsilon between episodes
pub struct TdAgent<S, R, D>
where
    S: Hashable,
    R: UpdateRule,
    D: Decay,
{
    table: ActionValueTable<S>,
    rule: R,
    exploration: EpsilonGreedy<D>,
    alpha: f64, // step size
    gamma: f64, // discount factor
    rng: StdRng,
    episode: u32,
}

impl<S, R, D> TdAgent<S, R, D>
where
    S: Hashable,
    R: UpdateRule,
    D: Decay,
{
    /// Initialize a new `TdAgent` with an empty table over `n_actions` actions
    ///
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`, or if `n_actions` is zero
    pub fn new(
        n_actions: usize,
        rule: R,
        exploration: EpsilonGreedy<D>,
        alpha: f64,
        gamma: f64,
        rng: StdRng,
    ) -> Self {
        assert_interval!(alpha, 0.0, 1.0);
        assert_interval!(gamma, 0.0, 1.0);
        Self {
            table: ActionValueTable::new(n_actions),
            rule,
            exploration,
            alpha,
            gamma,
            rng,
            episode: 0,
        }
    }

    /// Same as [`new`](Self::new) with a generator seeded from `seed`
    pub fn seeded(
        n_actions: usize,
        rule: R,
        exploration: EpsilonGreedy<D>,
        alpha: f64,
        gamma: f64,
        seed: u64,
    ) -> Self {
        Self::new(
            n_actions,
            rule,
            exploration,
            alpha,
            gamma,
            StdRng::seed_from_u64(seed),
        )
    }

    /// The learned action values
    pub fn table(&self) -> &ActionValueTable<S> {
        &self.table
    }

    /// Consume the agent, keeping only its table
    pub fn into_table(self) -> ActionValueTable<S> {
        self.table
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.exploration.epsilon()
    }

    /// Number of episodes run so far
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Decay epsilon one step and return the new value
    pub fn anneal(&mut self) -> f64 {
        self.exploration.advance()
    }

    /// Choose an action based on the current state and exploration policy
    fn act(&mut self, state: &S) -> usize {
        self.exploration.select(&self.table, state, &mut self.rng)
    }

    /// Learn from a given experience and update the table
    fn learn(&mut self, exp: Exp<S>, next_action: Option<usize>) {
        let target = self.rule.target(
            &self.table,
            exp.next_state.as_ref(),
            self.exploration.epsilon(),
            next_action,
        );
        td_update(&mut self.table, &exp, target, self.alpha, self.gamma);
    }

    /// Run one episode with the current epsilon, learning after every step
    ///
    /// **Returns** the total reward of the episode
    pub fn go<E>(&mut self, env: &mut E) -> f64
    where
        E: Environment<State = S>,
        S: Debug,
    {
        let mut env = ProtocolGuard::new(env);
        let mut state = env.reset();
        let mut pending = R::ON_POLICY_SAMPLE.then(|| self.act(&state));
        let mut total = 0.0;

        loop {
            let action = match pending.take() {
                Some(action) => action,
                None => self.act(&state),
            };
            let Step {
                next_state,
                reward,
                done,
                ..
            } = env.step(action);
            trace!(
                "state {:?}, action {} -> reward {}, done {}",
                state,
                action,
                reward,
                done
            );
            total += reward;

            if done {
                self.learn(
                    Exp {
                        state,
                        action,
                        reward,
                        next_state: None,
                    },
                    None,
                );
                break;
            }

            if R::ON_POLICY_SAMPLE {
                pending = Some(self.act(&next_state));
            }
            self.learn(
                Exp {
                    state,
                    action,
                    reward,
                    next_state: Some(next_state),
                },
                pending,
            );
            state = next_state;
        }

        debug!(
            "episode {}: epsilon {:.4}, reward {}",
            self.episode,
            self.exploration.epsilon(),
            total
        );
        self.episode += 1;
        total
    }

    /// Run one purely greedy episode without learning, giving up after `max_steps` steps
    ///
    /// **Returns** the total reward of the episode, or `None` if it did not terminate in time
    pub fn evaluate<E>(&mut self, env: &mut E, max_steps: usize) -> Option<f64>
    where
        E: Environment<State = S>,
    {
        let mut env = ProtocolGuard::new(env);
        let mut state = env.reset();
        let mut total = 0.0;
        for _ in 0..max_steps {
            let action = epsilon_greedy::select(&self.table, &state, 0.0, &mut self.rng);
            let step = env.step(action);
            total += step.reward;
            if step.done {
                return Some(total);
            }
            state = step.next_state;
        }
        None
    }
}
