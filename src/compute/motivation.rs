//! Motivation operator: greedy one-to-one replacement.

use super::population::{EvaluationCounter, Evaluator, GlobalBest, Individual, Population};

/// Evaluate each offspring and let it replace its parent when it is at least
/// as fit. A replacing individual at least as fit as the global best becomes
/// the new global best.
///
/// Consumes exactly `offspring.len()` evaluations. Returns the number of
/// replacements.
pub fn motivate(
    population: &mut Population,
    offspring: Vec<Individual>,
    evaluator: &Evaluator<'_>,
    counter: &mut EvaluationCounter,
    best: &mut GlobalBest,
) -> usize {
    debug_assert_eq!(population.len(), offspring.len());

    let mut replaced = 0;
    for (i, mut child) in offspring.into_iter().enumerate() {
        child.fitness = evaluator.evaluate(&child.genes, counter);
        if child.fitness <= population.get(i).fitness {
            best.update_non_strict(i, &child);
            population.replace(i, child);
            replaced += 1;
        }
    }
    replaced
}
