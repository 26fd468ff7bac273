use std::fmt::Debug;

use log::info;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    decay::Geometric,
    ds::RingBuffer,
    env::Environment,
    error::{check_range, ConfigError},
    exploration::EpsilonGreedy,
};

use super::{agent::TdAgent, q_table::ActionValueTable, td::UpdateRule, Hashable};

/// Hyperparameters of a training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Total training episodes
    pub num_episodes: u32,
    /// Starting exploration rate
    pub eps: f64,
    /// Floor for the exploration rate
    pub eps_min: f64,
    /// Multiplicative decay of epsilon per episode, in `(0, 1]`
    pub eps_decay: f64,
    /// TD step size
    pub alpha: f64,
    /// Discount factor
    pub gamma: f64,
    /// Window size for the trailing reward average
    pub plot_every: usize,
    /// Seed for the run's random generator, entropy if `None`
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            num_episodes: 5000,
            eps: 1.0,
            eps_min: 0.01,
            eps_decay: 0.999,
            alpha: 0.01,
            gamma: 1.0,
            plot_every: 100,
            seed: None,
        }
    }
}

impl TrainConfig {
    /// Check every option against its valid range, reporting the first violation
    pub fn validate(&self, action_count: usize) -> Result<(), ConfigError> {
        if self.num_episodes == 0 {
            return Err(ConfigError::NotPositive {
                name: "num_episodes",
            });
        }
        if self.plot_every == 0 {
            return Err(ConfigError::NotPositive { name: "plot_every" });
        }
        if action_count == 0 {
            return Err(ConfigError::NotPositive {
                name: "action_count",
            });
        }
        check_range("alpha", self.alpha, "(0, 1]", (0.0, false), (1.0, true))?;
        check_range("gamma", self.gamma, "[0, 1]", (0.0, true), (1.0, true))?;
        check_range("eps", self.eps, "[0, 1]", (0.0, true), (1.0, true))?;
        check_range("eps_min", self.eps_min, "[0, 1]", (0.0, true), (1.0, true))?;
        check_range("eps_decay", self.eps_decay, "(0, 1]", (0.0, false), (1.0, true))?;
        Ok(())
    }
}

/// Per-episode rewards and their trailing averages
#[derive(Debug, Clone)]
pub struct RewardHistory {
    rewards: Vec<f64>,
    window: RingBuffer<f64>,
    averages: Vec<f64>,
}

impl RewardHistory {
    /// **Panics** if `plot_every` is zero
    pub fn new(plot_every: usize) -> Self {
        Self {
            rewards: Vec::new(),
            window: RingBuffer::new(plot_every),
            averages: Vec::new(),
        }
    }

    /// Record the reward of the next episode
    ///
    /// **Returns** the trailing mean if this episode completes a reporting window
    pub fn record(&mut self, reward: f64) -> Option<f64> {
        self.rewards.push(reward);
        self.window.push(reward);
        if self.rewards.len() % self.window.capacity() != 0 {
            return None;
        }
        let mean = self.window.mean()?;
        self.averages.push(mean);
        Some(mean)
    }

    /// Total reward of every episode, in order
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Trailing mean recorded at the end of every full window
    pub fn averages(&self) -> &[f64] {
        &self.averages
    }

    /// The most recent episodes, at most `plot_every` of them
    pub fn window(&self) -> &RingBuffer<f64> {
        &self.window
    }

    /// Size of the reporting window
    pub fn plot_every(&self) -> usize {
        self.window.capacity()
    }

    /// Highest trailing mean so far
    pub fn best_average(&self) -> Option<f64> {
        self.averages.iter().copied().reduce(f64::max)
    }
}

/// The result of [`train`]
#[derive(Debug, Clone)]
pub struct Training<S: Hashable> {
    /// Learned action values, doubling as the greedy policy
    pub table: ActionValueTable<S>,
    pub history: RewardHistory,
    /// Exploration rate used for the last episode
    pub epsilon: f64,
}

/// Train a fresh table on `env` for `config.num_episodes` episodes
///
/// Epsilon is decayed before every episode, including the first.
///
/// **Returns** an error before touching the environment if `config` is invalid
pub fn train<E, R>(
    env: &mut E,
    rule: R,
    config: &TrainConfig,
) -> Result<Training<E::State>, ConfigError>
where
    E: Environment,
    E::State: Hashable + Debug,
    R: UpdateRule,
{
    let n_actions = env.action_count();
    config.validate(n_actions)?;

    let rng = config
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let exploration = EpsilonGreedy::new(
        config.eps,
        Geometric::new(config.eps_decay, config.eps_min)?,
    );
    let mut agent = TdAgent::new(
        n_actions,
        rule,
        exploration,
        config.alpha,
        config.gamma,
        rng,
    );
    let mut history = RewardHistory::new(config.plot_every);

    for i in 1..=config.num_episodes {
        agent.anneal();
        let reward = agent.go(env);
        if let Some(mean) = history.record(reward) {
            info!(
                "episode {}/{}: average reward {:.3} over the last {}, epsilon {:.4}",
                i,
                config.num_episodes,
                mean,
                config.plot_every,
                agent.epsilon()
            );
        }
    }

    if let Some(best) = history.best_average() {
        info!(
            "best average reward over {} episodes: {:.3}",
            config.plot_every, best
        );
    }
    info!("visited {} states", agent.table().len());

    Ok(Training {
        epsilon: agent.epsilon(),
        table: agent.into_table(),
        history,
    })
}

#[cfg(test)]
mod tests {
    use crate::{
        algo::tabular::td::{ExpectedSarsa, Sarsa, SarsaMax},
        env::tests::ChainEnv,
    };

    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn chain_config(seed: u64) -> TrainConfig {
        TrainConfig {
            num_episodes: 500,
            eps: 1.0,
            eps_min: 0.01,
            eps_decay: 0.95,
            alpha: 0.1,
            gamma: 1.0,
            plot_every: 100,
            seed: Some(seed),
        }
    }

    fn check_chain_solved<R: UpdateRule>(rule: R) {
        init_logger();
        let mut env = ChainEnv::new();
        let Training {
            table,
            history,
            epsilon,
        } = train(&mut env, rule, &chain_config(17)).unwrap();

        assert_eq!(table.greedy_action(&0), Some(1), "walk right from 0");
        assert_eq!(table.greedy_action(&1), Some(1), "walk right from 1");
        assert_eq!(epsilon, 0.01, "epsilon at its floor");

        assert_eq!(history.rewards().len(), 500);
        assert_eq!(history.averages().len(), 5);
        assert!(
            history.rewards().iter().all(|&r| r <= -2.0),
            "no episode beats the optimal path"
        );
        assert_eq!(
            history.averages().last(),
            Some(&-2.0),
            "last window entirely on the optimal path, got {:?}",
            history.averages()
        );
        assert_eq!(history.best_average(), Some(-2.0));
    }

    #[test]
    fn sarsa_solves_chain() {
        check_chain_solved(Sarsa);
    }

    #[test]
    fn sarsamax_solves_chain() {
        check_chain_solved(SarsaMax);
    }

    #[test]
    fn expected_sarsa_solves_chain() {
        check_chain_solved(ExpectedSarsa);
    }

    #[test]
    fn seeded_runs_repeat() {
        let mut env = ChainEnv::new();
        let a = train(&mut env, Sarsa, &chain_config(5)).unwrap();
        let b = train(&mut env, Sarsa, &chain_config(5)).unwrap();
        assert_eq!(a.history.rewards(), b.history.rewards(), "same rewards");
        assert_eq!(a.table.get(&0), b.table.get(&0), "same table");
    }

    #[test]
    fn constant_full_exploration_never_settles() {
        init_logger();
        let config = TrainConfig {
            eps_decay: 1.0,
            ..chain_config(3)
        };
        let Training { history, .. } = train(&mut ChainEnv::new(), SarsaMax, &config).unwrap();
        let best = history.best_average().unwrap();
        assert!(best < -2.0, "random behaviour keeps paying detours, got {}", best);
    }

    #[test]
    fn first_episode_uses_decayed_epsilon() {
        let config = TrainConfig {
            num_episodes: 1,
            eps: 0.8,
            eps_decay: 0.5,
            eps_min: 0.0,
            ..chain_config(0)
        };
        let training = train(&mut ChainEnv::new(), Sarsa, &config).unwrap();
        assert_eq!(training.epsilon, 0.4);
    }

    #[test]
    fn reward_history_windows() {
        let mut history = RewardHistory::new(3);
        assert_eq!(history.record(-1.0), None);
        assert_eq!(history.record(-2.0), None);
        assert_eq!(history.record(-3.0), Some(-2.0), "first window");
        assert_eq!(history.best_average(), Some(-2.0));
        assert_eq!(history.record(-4.0), None);
        assert_eq!(history.record(-5.0), None);
        assert_eq!(history.record(-6.0), Some(-5.0), "second window");
        assert_eq!(history.record(-7.0), None);

        assert_eq!(history.rewards().len(), 7, "full history kept");
        assert_eq!(history.window().len(), 3, "window bounded");
        assert_eq!(history.averages(), [-2.0, -5.0], "one mean per full window");
        assert_eq!(history.best_average(), Some(-2.0));
        assert_eq!(history.plot_every(), 3);
    }

    #[test]
    fn validation() {
        let valid = TrainConfig::default();
        assert!(valid.validate(4).is_ok());

        assert_eq!(
            valid.validate(0),
            Err(ConfigError::NotPositive {
                name: "action_count"
            })
        );

        let cases = [
            (
                TrainConfig {
                    num_episodes: 0,
                    ..Default::default()
                },
                "num_episodes",
            ),
            (
                TrainConfig {
                    plot_every: 0,
                    ..Default::default()
                },
                "plot_every",
            ),
            (
                TrainConfig {
                    alpha: 0.0,
                    ..Default::default()
                },
                "alpha",
            ),
            (
                TrainConfig {
                    gamma: 1.5,
                    ..Default::default()
                },
                "gamma",
            ),
            (
                TrainConfig {
                    eps: -0.1,
                    ..Default::default()
                },
                "eps",
            ),
            (
                TrainConfig {
                    eps_min: 2.0,
                    ..Default::default()
                },
                "eps_min",
            ),
            (
                TrainConfig {
                    eps_decay: 0.0,
                    ..Default::default()
                },
                "eps_decay",
            ),
        ];

        for (config, field) in cases {
            let err = config.validate(4).unwrap_err();
            assert!(
                err.to_string().contains(field),
                "{} rejected, got: {}",
                field,
                err
            );
        }
    }

    #[test]
    fn invalid_config_skips_training() {
        struct Untouchable;

        impl Environment for Untouchable {
            type State = u8;
            type Info = ();

            fn action_count(&self) -> usize {
                2
            }

            fn reset(&mut self) -> Self::State {
                panic!("environment used despite invalid config")
            }

            fn step(&mut self, _action: usize) -> crate::env::Step<Self::State> {
                panic!("environment used despite invalid config")
            }
        }

        let config = TrainConfig {
            alpha: -1.0,
            ..Default::default()
        };
        assert!(train(&mut Untouchable, Sarsa, &config).is_err());
    }
}
