//! Selection of built-in benchmark objectives.

use serde::{Deserialize, Serialize};

/// Built-in benchmark objectives (all minimized, global minimum 0).
///
/// The numerical definitions live in `compute::objective`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type")]
pub enum BenchmarkFunction {
    /// Sum of squares. Unimodal, separable.
    #[default]
    Sphere,
    /// Rosenbrock valley. Unimodal, non-separable.
    Rosenbrock,
    /// Rastrigin. Highly multimodal lattice of local minima.
    Rastrigin,
    /// Ackley. Multimodal with a nearly flat outer region.
    Ackley,
    /// Griewank. Multimodal, non-separable.
    Griewank,
    /// Schwefel 2.22: sum of absolute values plus their product.
    Schwefel222,
    /// Step: sum of squared `floor(x + 0.5)`. Plateaus everywhere.
    Step,
}

impl BenchmarkFunction {
    /// Conventional search domain `(lower, upper)` for this function.
    pub fn default_bounds(self) -> (f64, f64) {
        match self {
            BenchmarkFunction::Sphere | BenchmarkFunction::Step => (-100.0, 100.0),
            BenchmarkFunction::Rosenbrock => (-30.0, 30.0),
            BenchmarkFunction::Rastrigin => (-5.12, 5.12),
            BenchmarkFunction::Ackley => (-32.0, 32.0),
            BenchmarkFunction::Griewank => (-600.0, 600.0),
            BenchmarkFunction::Schwefel222 => (-10.0, 10.0),
        }
    }

    /// All built-in functions.
    pub fn all() -> [BenchmarkFunction; 7] {
        [
            BenchmarkFunction::Sphere,
            BenchmarkFunction::Rosenbrock,
            BenchmarkFunction::Rastrigin,
            BenchmarkFunction::Ackley,
            BenchmarkFunction::Griewank,
            BenchmarkFunction::Schwefel222,
            BenchmarkFunction::Step,
        ]
    }
}
