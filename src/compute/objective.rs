//! Objective function adapter and built-in benchmark functions.
//!
//! Any `Fn(&[f64]) -> f64` is an [`Objective`]; the built-in
//! [`BenchmarkFunction`] set covers the usual continuous test suite.

use std::f64::consts::{E, PI};

use crate::schema::BenchmarkFunction;

/// A scalar function to be minimized.
///
/// Implementations must be pure: the same input always yields the same value.
pub trait Objective: Send + Sync {
    /// Evaluate the objective at `x`.
    fn evaluate(&self, x: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    #[inline]
    fn evaluate(&self, x: &[f64]) -> f64 {
        self(x)
    }
}

impl Objective for BenchmarkFunction {
    fn evaluate(&self, x: &[f64]) -> f64 {
        match self {
            BenchmarkFunction::Sphere => sphere(x),
            BenchmarkFunction::Rosenbrock => rosenbrock(x),
            BenchmarkFunction::Rastrigin => rastrigin(x),
            BenchmarkFunction::Ackley => ackley(x),
            BenchmarkFunction::Griewank => griewank(x),
            BenchmarkFunction::Schwefel222 => schwefel_2_22(x),
            BenchmarkFunction::Step => step(x),
        }
    }
}

/// Sum of squares. Minimum 0 at the origin.
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

/// Rosenbrock valley. Minimum 0 at `(1, ..., 1)`.
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| {
            let a = w[1] - w[0] * w[0];
            let b = 1.0 - w[0];
            100.0 * a * a + b * b
        })
        .sum()
}

/// Rastrigin. Minimum 0 at the origin.
pub fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

/// Ackley. Minimum 0 at the origin.
pub fn ackley(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum_cos: f64 = x.iter().map(|xi| (2.0 * PI * xi).cos()).sum();
    -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + E
}

/// Griewank. Minimum 0 at the origin.
pub fn griewank(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|xi| xi * xi).sum::<f64>() / 4000.0;
    let prod: f64 = x
        .iter()
        .enumerate()
        .map(|(i, xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product();
    sum - prod + 1.0
}

/// Schwefel 2.22. Minimum 0 at the origin.
pub fn schwefel_2_22(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|xi| xi.abs()).sum();
    let prod: f64 = x.iter().map(|xi| xi.abs()).product();
    sum + prod
}

/// Step. Minimum 0 on `[-0.5, 0.5)^D`.
pub fn step(x: &[f64]) -> f64 {
    x.iter().map(|xi| (xi + 0.5).floor().powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_is_zero() {
        let origin = vec![0.0; 4];
        for f in BenchmarkFunction::all() {
            let at = if f == BenchmarkFunction::Rosenbrock {
                vec![1.0; 4]
            } else {
                origin.clone()
            };
            assert!(f.evaluate(&at).abs() < 1e-10, "{:?} at optimum", f);
        }
    }

    #[test]
    fn test_away_from_minimum_is_positive() {
        let x = vec![1.7, -2.3, 0.9];
        for f in BenchmarkFunction::all() {
            assert!(f.evaluate(&x) > 0.0, "{:?} away from optimum", f);
        }
    }

    #[test]
    fn test_closure_is_objective() {
        let offset = 3.0;
        let shifted = move |x: &[f64]| x.iter().map(|v| (v - offset).powi(2)).sum::<f64>();
        assert_eq!(shifted.evaluate(&[3.0, 3.0]), 0.0);
        assert_eq!(shifted.evaluate(&[4.0, 1.0]), 5.0);

        let boxed: Box<dyn Objective> = Box::new(shifted);
        assert_eq!(boxed.evaluate(&[3.0, 5.0]), 4.0);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(sphere(&[1.0, 2.0]), 5.0);
        assert_eq!(rosenbrock(&[0.0, 0.0]), 1.0);
        assert_eq!(schwefel_2_22(&[1.0, -2.0]), 5.0);
        assert_eq!(step(&[0.4, 1.6]), 4.0);
    }

    #[test]
    fn test_default_bounds_are_ordered() {
        for f in BenchmarkFunction::all() {
            let (lo, hi) = f.default_bounds();
            assert!(lo < hi);
        }
    }
}
