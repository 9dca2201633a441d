//! Attention operator.
//!
//! Ranks the population, splits it into an elite (model) group and the
//! rest, and runs a two-sample Student t-test on every dimension. The
//! absolute t-value of one randomly chosen dimension becomes the attention
//! threshold shared by all dimensions for the generation.

use super::population::Population;
use super::rng::SearchRng;

/// Output of the attention operator. Valid for a single generation.
#[derive(Debug, Clone)]
pub struct Attention {
    /// Storage indices, best first.
    pub ranked: Vec<usize>,
    /// Size of the elite group (first `elite_size` entries of `ranked`).
    pub elite_size: usize,
    /// t-statistic per dimension (elite minus non-elite).
    pub statistic: Vec<f64>,
    /// Attention threshold `AT >= 0`.
    pub threshold: f64,
    /// Dimension the threshold was taken from.
    pub threshold_dimension: usize,
}

impl Attention {
    /// Analyze `population` with an elite group of `elite_size` members.
    ///
    /// Requires `0 < elite_size < population.len()` and at least one dimension.
    pub fn analyze(population: &Population, elite_size: usize, rng: &mut SearchRng) -> Self {
        let ranked = population.ranked_indices();
        let dims = population.dimensions();
        let (elite, rest) = ranked.split_at(elite_size);

        let mut elite_sample = Vec::with_capacity(elite.len());
        let mut rest_sample = Vec::with_capacity(rest.len());
        let statistic: Vec<f64> = (0..dims)
            .map(|j| {
                elite_sample.clear();
                elite_sample.extend(elite.iter().map(|&i| population.gene(i, j)));
                rest_sample.clear();
                rest_sample.extend(rest.iter().map(|&i| population.gene(i, j)));
                t_statistic(&elite_sample, &rest_sample)
            })
            .collect();

        let threshold_dimension = rng.index(dims);
        let threshold = statistic[threshold_dimension].abs();

        Self {
            ranked,
            elite_size,
            statistic,
            threshold,
            threshold_dimension,
        }
    }

    /// Storage indices of the elite group, best first.
    #[inline]
    pub fn elite(&self) -> &[usize] {
        &self.ranked[..self.elite_size]
    }

    /// Negative threshold `mAT = -AT`.
    #[inline]
    pub fn negative_threshold(&self) -> f64 {
        -self.threshold
    }

    /// Rank position of storage index `index` inside the elite group, if any.
    pub fn elite_position(&self, index: usize) -> Option<usize> {
        self.elite().iter().position(|&i| i == index)
    }
}

/// Pooled-variance two-sample Student t-statistic of `a` against `b`.
///
/// Returns 0 when the pooled standard error is zero or undefined
/// (constant samples, or fewer than three values in total).
pub fn t_statistic(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let mean1 = a.iter().sum::<f64>() / n1;
    let mean2 = b.iter().sum::<f64>() / n2;
    let ss1: f64 = a.iter().map(|x| (x - mean1).powi(2)).sum();
    let ss2: f64 = b.iter().map(|x| (x - mean2).powi(2)).sum();
    let df = n1 + n2 - 2.0;

    let pooled = ((ss1 + ss2) / df) * (1.0 / n1 + 1.0 / n2);
    let se = pooled.sqrt();
    if !(se.is_finite() && se > 0.0) {
        return 0.0;
    }
    (mean1 - mean2) / se
}
