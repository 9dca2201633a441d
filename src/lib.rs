//! Social Learning - attention-driven population optimizer.
//!
//! This crate implements the Social Learning Algorithm (SLA), a
//! population-based metaheuristic that minimizes a black-box function over
//! a box-bounded real domain. Each generation ranks the population, runs a
//! two-sample t-test per dimension between the best individuals and the
//! rest, and uses the outcome to decide, gene by gene, whether to imitate
//! and reinforce a model individual or to explore.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, benchmark selection and result types
//! - `compute`: Search operators, objectives and the run controller
//!
//! # Example
//!
//! ```rust
//! use social_learning::{OptimizerConfig, SocialLearning};
//!
//! let config = OptimizerConfig {
//!     population_size: 30,
//!     dimensions: 2,
//!     max_evaluations: 600,
//!     trials: 1,
//!     elite_size: Some(15),
//!     lower_bound: -10.0,
//!     upper_bound: 10.0,
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! let optimizer = SocialLearning::new(config, sphere).unwrap();
//! let summary = optimizer.run();
//!
//! println!("Best fitness: {:e}", summary.best);
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{Objective, SocialLearning, Trial};
pub use schema::{
    BenchmarkFunction, ConfigError, GenerationProgress, NonFinitePolicy, OptimizerConfig,
    RunConfig, RunSummary, StopReason, TrialResult,
};
