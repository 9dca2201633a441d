//! Population storage, initialization and fitness evaluation.

use crate::schema::{NonFinitePolicy, OptimizerConfig};

use super::objective::Objective;
use super::rng::SearchRng;

/// A candidate solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// One gene per dimension.
    pub genes: Vec<f64>,
    /// Objective value (lower is better).
    pub fitness: f64,
}

impl Individual {
    /// Create an unevaluated individual.
    pub fn new(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }
}

/// Best individual seen in the current trial.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalBest {
    /// Storage index of the individual that set the record.
    pub index: usize,
    /// Best fitness value.
    pub fitness: f64,
    /// Copy of the record-setting genes.
    pub genes: Vec<f64>,
}

impl GlobalBest {
    /// The worst possible record for minimization.
    pub fn sentinel() -> Self {
        Self {
            index: 0,
            fitness: f64::INFINITY,
            genes: Vec::new(),
        }
    }

    fn record(&mut self, index: usize, individual: &Individual) {
        self.index = index;
        self.fitness = individual.fitness;
        self.genes.clone_from(&individual.genes);
    }

    /// Record `individual` if strictly better than the current best.
    pub fn update_strict(&mut self, index: usize, individual: &Individual) -> bool {
        if individual.fitness < self.fitness {
            self.record(index, individual);
            true
        } else {
            false
        }
    }

    /// Record `individual` if at least as good as the current best.
    pub fn update_non_strict(&mut self, index: usize, individual: &Individual) -> bool {
        if individual.fitness <= self.fitness {
            self.record(index, individual);
            true
        } else {
            false
        }
    }
}

/// Counts objective calls against a fixed budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationCounter {
    count: u64,
    max: u64,
}

impl EvaluationCounter {
    /// Create a counter with the given budget.
    pub fn new(max: u64) -> Self {
        Self { count: 0, max }
    }

    /// Evaluations consumed.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Budget.
    #[inline]
    pub fn max(&self) -> u64 {
        self.max
    }

    /// True once the budget is used up.
    #[inline]
    pub fn exhausted(&self) -> bool {
        self.count >= self.max
    }

    #[inline]
    fn increment(&mut self) {
        self.count += 1;
    }
}

/// Evaluates individuals and applies the non-finite policy.
pub struct Evaluator<'a> {
    objective: &'a dyn Objective,
    policy: NonFinitePolicy,
}

impl<'a> Evaluator<'a> {
    /// Wrap an objective.
    pub fn new(objective: &'a dyn Objective, policy: NonFinitePolicy) -> Self {
        Self { objective, policy }
    }

    /// Evaluate `genes`, counting one evaluation.
    pub fn evaluate(&self, genes: &[f64], counter: &mut EvaluationCounter) -> f64 {
        counter.increment();
        let raw = self.objective.evaluate(genes);
        if !raw.is_finite() {
            log::warn!(
                "Non-finite objective value {} at evaluation {} ({:?})",
                raw,
                counter.count(),
                self.policy
            );
        }
        self.policy.apply(raw)
    }
}

/// The current generation of individuals, in storage order.
#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Build from existing individuals.
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Draw every gene of every individual uniformly from the bounds.
    pub fn initialize(config: &OptimizerConfig, rng: &mut SearchRng) -> Self {
        let individuals = (0..config.population_size)
            .map(|_| {
                let genes = (0..config.dimensions)
                    .map(|_| rng.uniform(config.lower_bound, config.upper_bound))
                    .collect();
                Individual::new(genes)
            })
            .collect();
        Self { individuals }
    }

    /// Evaluate every individual, updating `best` on strict improvement.
    ///
    /// Consumes exactly `len()` evaluations.
    pub fn evaluate(
        &mut self,
        evaluator: &Evaluator<'_>,
        counter: &mut EvaluationCounter,
        best: &mut GlobalBest,
    ) {
        for (i, individual) in self.individuals.iter_mut().enumerate() {
            individual.fitness = evaluator.evaluate(&individual.genes, counter);
            best.update_strict(i, individual);
        }
    }

    /// Number of individuals.
    #[inline]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// True if there are no individuals.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Dimensionality of the individuals.
    pub fn dimensions(&self) -> usize {
        self.individuals.first().map_or(0, |ind| ind.genes.len())
    }

    /// Borrow an individual.
    #[inline]
    pub fn get(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }

    /// Gene `dim` of individual `index`.
    #[inline]
    pub fn gene(&self, index: usize, dim: usize) -> f64 {
        self.individuals[index].genes[dim]
    }

    /// Replace an individual wholesale.
    pub fn replace(&mut self, index: usize, individual: Individual) {
        self.individuals[index] = individual;
    }

    /// All individuals in storage order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Mean fitness.
    pub fn mean_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        self.individuals.iter().map(|c| c.fitness).sum::<f64>() / self.individuals.len() as f64
    }

    /// Storage indices ordered from best to worst fitness.
    ///
    /// Ties keep storage order (the sort is stable). NaN of either sign ranks last.
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.individuals.len()).collect();
        order.sort_by(|&a, &b| {
            let (fa, fb) = (self.individuals[a].fitness, self.individuals[b].fitness);
            fa.is_nan().cmp(&fb.is_nan()).then_with(|| fa.total_cmp(&fb))
        });
        order
    }
}
