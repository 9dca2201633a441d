//! Reproduction and reinforcement operators.
//!
//! Every gene of every offspring is produced independently. On dimensions
//! where the elite group is significantly distinguishable from the rest
//! (`|t| >= AT`), the individual copies a random elite member and is pushed
//! past it (positive reinforcement) or away from it (negative
//! reinforcement). On inconclusive dimensions it explores: imitation of a
//! random individual, reinitialization, or keeping its own gene.

use crate::schema::{BranchCounts, OptimizerConfig};

use super::attention::Attention;
use super::population::{Individual, Population};
use super::rng::SearchRng;

/// Branch taken to produce one gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    PositiveReinforcement,
    NegativeReinforcement,
    Imitation,
    Reinitialization,
    Retain,
}

impl BranchCounts {
    fn record(&mut self, branch: Branch) {
        match branch {
            Branch::PositiveReinforcement => self.positive_reinforcement += 1,
            Branch::NegativeReinforcement => self.negative_reinforcement += 1,
            Branch::Imitation => self.imitation += 1,
            Branch::Reinitialization => self.reinitialization += 1,
            Branch::Retain => self.retained += 1,
        }
    }
}

/// Parameters of the reproduction step.
#[derive(Debug, Clone, Copy)]
pub struct ReproductionParams {
    pub imitation_probability: f64,
    pub randomization_probability: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl From<&OptimizerConfig> for ReproductionParams {
    fn from(config: &OptimizerConfig) -> Self {
        Self {
            imitation_probability: config.imitation_probability,
            randomization_probability: config.randomization_probability,
            lower_bound: config.lower_bound,
            upper_bound: config.upper_bound,
        }
    }
}

/// Reflect a value that left `[lower, upper]` back inside, halving the overshoot.
///
/// A single pass: an overshoot larger than twice the domain width stays outside.
#[inline]
pub fn reflect(value: f64, lower: f64, upper: f64) -> f64 {
    if value > upper {
        upper - 0.5 * (value - upper)
    } else if value < lower {
        lower + 0.5 * (lower - value)
    } else {
        value
    }
}

/// Produce one offspring per parent. The parent population is only read.
///
/// Offspring are returned in parent storage order and are unevaluated.
pub fn reproduce(
    population: &Population,
    attention: &Attention,
    params: &ReproductionParams,
    rng: &mut SearchRng,
) -> (Vec<Individual>, BranchCounts) {
    let dims = population.dimensions();
    let elite = attention.elite();
    let at = attention.threshold;
    let mat = attention.negative_threshold();
    let mut counts = BranchCounts::default();

    let offspring = (0..population.len())
        .map(|i| {
            let own_rank = attention.elite_position(i);
            let genes = (0..dims)
                .map(|j| {
                    let model = elite[rng.index_excluding(elite.len(), own_rank)];
                    let peer = rng.index_excluding(population.len(), Some(i));
                    let nd = rng.unit();

                    let own = population.gene(i, j);
                    let exemplar = population.gene(model, j);
                    let delta = (exemplar - own).abs();
                    let t = attention.statistic[j];

                    let (branch, value) = if t >= at {
                        (Branch::PositiveReinforcement, exemplar + nd * delta)
                    } else if t <= mat {
                        (Branch::NegativeReinforcement, exemplar - nd * delta)
                    } else if rng.chance(params.imitation_probability) {
                        (Branch::Imitation, population.gene(peer, j))
                    } else if rng.chance(params.randomization_probability) {
                        (
                            Branch::Reinitialization,
                            rng.uniform(params.lower_bound, params.upper_bound),
                        )
                    } else {
                        (Branch::Retain, own)
                    };
                    counts.record(branch);

                    let repaired = reflect(value, params.lower_bound, params.upper_bound);
                    if repaired != value {
                        counts.repaired += 1;
                    }
                    repaired
                })
                .collect();
            Individual::new(genes)
        })
        .collect();

    (offspring, counts)
}
