//! Configuration types for Social Learning optimizer runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::BenchmarkFunction;

fn default_trials() -> usize {
    1
}
fn default_imitation_probability() -> f64 {
    0.7
}
fn default_randomization_probability() -> f64 {
    0.2
}

/// Optimizer parameters shared by every trial of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Population size (N).
    pub population_size: usize,
    /// Problem dimensionality (D).
    pub dimensions: usize,
    /// Maximum objective evaluations per trial.
    pub max_evaluations: u64,
    /// Number of independent trials.
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Probability of copying a random individual on an inconclusive dimension (p_i).
    #[serde(default = "default_imitation_probability")]
    pub imitation_probability: f64,
    /// Probability of reinitializing a gene when imitation was not chosen (p_r).
    #[serde(default = "default_randomization_probability")]
    pub randomization_probability: f64,
    /// Size of the elite (model) group (SN1). Defaults to half the population.
    #[serde(default)]
    pub elite_size: Option<usize>,
    /// Lower bound, shared by every dimension.
    pub lower_bound: f64,
    /// Upper bound, shared by every dimension.
    pub upper_bound: f64,
    /// Master seed. Each trial derives its own seed from it.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Stop a trial early once the global best reaches this value.
    #[serde(default)]
    pub target_fitness: Option<f64>,
    /// Handling of NaN and infinite objective values.
    #[serde(default)]
    pub non_finite_policy: NonFinitePolicy,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            dimensions: 30,
            max_evaluations: 300_000,
            trials: 30,
            imitation_probability: default_imitation_probability(),
            randomization_probability: default_randomization_probability(),
            elite_size: None,
            lower_bound: -100.0,
            upper_bound: 100.0,
            random_seed: None,
            target_fitness: None,
            non_finite_policy: NonFinitePolicy::default(),
        }
    }
}

/// What to do with an objective value that is NaN or infinite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NonFinitePolicy {
    /// Replace the value with `+inf`, the worst possible fitness.
    #[default]
    Worst,
    /// Keep the raw IEEE value. NaN never passes an improvement test.
    Propagate,
}

impl NonFinitePolicy {
    /// Apply the policy to a raw objective value.
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            NonFinitePolicy::Worst if !value.is_finite() => f64::INFINITY,
            _ => value,
        }
    }
}

impl OptimizerConfig {
    /// Elite group size (SN1) after applying the default.
    #[inline]
    pub fn elite_count(&self) -> usize {
        self.elite_size.unwrap_or(self.population_size / 2)
    }

    /// Non-elite group size (SN2).
    #[inline]
    pub fn non_elite_count(&self) -> usize {
        self.population_size.saturating_sub(self.elite_count())
    }

    /// Width of the search domain.
    #[inline]
    pub fn domain_width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.dimensions == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        let elite = self.elite_count();
        if elite == 0 || elite >= self.population_size {
            return Err(ConfigError::InvalidEliteSize {
                elite,
                population: self.population_size,
            });
        }
        if !self.lower_bound.is_finite()
            || !self.upper_bound.is_finite()
            || self.lower_bound >= self.upper_bound
        {
            return Err(ConfigError::InvalidBounds {
                lower: self.lower_bound,
                upper: self.upper_bound,
            });
        }
        for (name, p) in [
            ("imitation", self.imitation_probability),
            ("randomization", self.randomization_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::InvalidProbability { name, value: p });
            }
        }
        if self.max_evaluations == 0 {
            return Err(ConfigError::InvalidBudget);
        }
        if self.trials == 0 {
            return Err(ConfigError::InvalidTrials);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("Dimensionality must be non-zero")]
    InvalidDimensions,
    #[error("Elite size {elite} must be in 1..{population}")]
    InvalidEliteSize { elite: usize, population: usize },
    #[error("Invalid bounds [{lower}, {upper}]: must be finite with lower < upper")]
    InvalidBounds { lower: f64, upper: f64 },
    #[error("Probability of {name} must be in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Evaluation budget must be positive")]
    InvalidBudget,
    #[error("Trial count must be positive")]
    InvalidTrials,
}

/// A complete run description: optimizer parameters plus the objective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Optimizer parameters.
    pub optimizer: OptimizerConfig,
    /// Objective to minimize.
    pub objective: BenchmarkFunction,
}

impl Default for RunConfig {
    fn default() -> Self {
        let objective = BenchmarkFunction::Sphere;
        let (lower_bound, upper_bound) = objective.default_bounds();
        Self {
            optimizer: OptimizerConfig {
                lower_bound,
                upper_bound,
                ..Default::default()
            },
            objective,
        }
    }
}

impl RunConfig {
    /// Load and validate a run configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RunConfigError> {
        let content = fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&content)?;
        config.optimizer.validate()?;
        Ok(config)
    }
}

/// Errors raised while loading a run configuration.
#[derive(Debug, thiserror::Error)]
pub enum RunConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Config validation failed: {0}")]
    Config(#[from] ConfigError),
}
