//! Compute module - The Social Learning search operators.
//!
//! One generation runs three operators in order:
//!
//! - **Attention** (`attention`): per-dimension t-test between the elite
//!   group and the rest, compressed into one shared threshold
//! - **Reproduction** (`reproduction`): gene-wise imitation, reinforcement
//!   and exploration producing one offspring per individual
//! - **Motivation** (`motivation`): greedy parent/offspring replacement
//!
//! The `controller` sequences them into trials and runs.

mod attention;
mod controller;
mod motivation;
mod objective;
mod population;
mod reproduction;
mod rng;

pub use attention::{Attention, t_statistic};
pub use controller::{SocialLearning, Trial};
pub use motivation::motivate;
pub use objective::{
    Objective, ackley, griewank, rastrigin, rosenbrock, schwefel_2_22, sphere, step,
};
pub use population::{EvaluationCounter, Evaluator, GlobalBest, Individual, Population};
pub use reproduction::{Branch, ReproductionParams, reflect, reproduce};
pub use rng::SearchRng;
