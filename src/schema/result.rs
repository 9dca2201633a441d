//! Progress and result types reported by the run controller.

use serde::{Deserialize, Serialize};

/// Progress update emitted after every generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationProgress {
    /// Trial index (0-based).
    pub trial: usize,
    /// Generations completed in this trial.
    pub generation: usize,
    /// Objective evaluations consumed so far.
    pub evaluations: u64,
    /// Evaluation budget of the trial.
    pub max_evaluations: u64,
    /// Global best fitness of the trial.
    pub best_fitness: f64,
    /// Mean fitness of the current population.
    pub mean_fitness: f64,
    /// Attention threshold used by the generation (`None` after initial evaluation).
    pub attention_threshold: Option<f64>,
}

/// Per-branch gene counts produced by reproduction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BranchCounts {
    /// Genes moved past an elite exemplar (`statistic >= AT`).
    pub positive_reinforcement: u64,
    /// Genes moved away from an elite exemplar (`statistic <= -AT`).
    pub negative_reinforcement: u64,
    /// Genes copied from a random individual.
    pub imitation: u64,
    /// Genes redrawn uniformly from the bounds.
    pub reinitialization: u64,
    /// Genes kept from the parent.
    pub retained: u64,
    /// Genes reflected back from a bound.
    pub repaired: u64,
}

impl BranchCounts {
    /// Total genes produced.
    pub fn total(&self) -> u64 {
        self.positive_reinforcement
            + self.negative_reinforcement
            + self.imitation
            + self.reinitialization
            + self.retained
    }

    /// Genes that took an exploration branch.
    pub fn explored(&self) -> u64 {
        self.imitation + self.reinitialization + self.retained
    }

    /// Accumulate another set of counts.
    pub fn merge(&mut self, other: &BranchCounts) {
        self.positive_reinforcement += other.positive_reinforcement;
        self.negative_reinforcement += other.negative_reinforcement;
        self.imitation += other.imitation;
        self.reinitialization += other.reinitialization;
        self.retained += other.retained;
        self.repaired += other.repaired;
    }
}

/// Reason a trial stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Evaluation budget exhausted.
    BudgetExhausted,
    /// Reached target fitness.
    TargetReached,
    /// User cancelled.
    Cancelled,
}

/// Outcome of one trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialResult {
    /// Trial index (0-based).
    pub trial: usize,
    /// Seed the trial's random stream was created from.
    pub seed: u64,
    /// Best fitness found.
    pub best_fitness: f64,
    /// Vector that achieved the best fitness.
    pub best_position: Vec<f64>,
    /// Objective evaluations consumed.
    pub evaluations: u64,
    /// Generations completed.
    pub generations: usize,
    /// Global best after initial evaluation and after each generation.
    pub best_history: Vec<f64>,
    /// Gene counts per reproduction branch over the whole trial.
    pub branches: BranchCounts,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Statistics over all trials of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Per-trial outcomes, in trial order.
    pub trials: Vec<TrialResult>,
    /// Best of the trial best values.
    pub best: f64,
    /// Worst of the trial best values.
    pub worst: f64,
    /// Mean of the trial best values.
    pub mean: f64,
    /// Median of the trial best values.
    pub median: f64,
    /// Sample standard deviation of the trial best values.
    pub std_dev: f64,
    /// Evaluations consumed by all trials.
    pub total_evaluations: u64,
    /// Wall-clock time (in seconds).
    pub elapsed_seconds: f64,
}

impl RunSummary {
    /// Summarize a set of trial results.
    pub fn from_trials(trials: Vec<TrialResult>, elapsed_seconds: f64) -> Self {
        let mut values: Vec<f64> = trials.iter().map(|t| t.best_fitness).collect();
        values.sort_by(f64::total_cmp);

        let n = values.len();
        let mean = if n == 0 {
            f64::NAN
        } else {
            values.iter().sum::<f64>() / n as f64
        };
        let median = match n {
            0 => f64::NAN,
            _ if n % 2 == 1 => values[n / 2],
            _ => 0.5 * (values[n / 2 - 1] + values[n / 2]),
        };
        let std_dev = if n < 2 {
            0.0
        } else {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        };

        Self {
            best: values.first().copied().unwrap_or(f64::NAN),
            worst: values.last().copied().unwrap_or(f64::NAN),
            mean,
            median,
            std_dev,
            total_evaluations: trials.iter().map(|t| t.evaluations).sum(),
            elapsed_seconds,
            trials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(index: usize, best: f64) -> TrialResult {
        TrialResult {
            trial: index,
            seed: index as u64,
            best_fitness: best,
            best_position: vec![0.0],
            evaluations: 100,
            generations: 3,
            best_history: vec![best],
            branches: BranchCounts::default(),
            stop_reason: StopReason::BudgetExhausted,
        }
    }

    #[test]
    fn test_summary_statistics() {
        let summary =
            RunSummary::from_trials(vec![trial(0, 3.0), trial(1, 1.0), trial(2, 2.0)], 0.5);
        assert_eq!(summary.best, 1.0);
        assert_eq!(summary.worst, 3.0);
        assert_eq!(summary.median, 2.0);
        assert!((summary.mean - 2.0).abs() < 1e-12);
        assert!((summary.std_dev - 1.0).abs() < 1e-12);
        assert_eq!(summary.total_evaluations, 300);
        assert_eq!(summary.trials[0].trial, 0);
    }

    #[test]
    fn test_summary_even_median_single_std() {
        let summary = RunSummary::from_trials(vec![trial(0, 1.0), trial(1, 4.0)], 0.0);
        assert_eq!(summary.median, 2.5);

        let summary = RunSummary::from_trials(vec![trial(0, 7.0)], 0.0);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.median, 7.0);
    }

    #[test]
    fn test_branch_counts_merge() {
        let mut a = BranchCounts {
            positive_reinforcement: 1,
            imitation: 2,
            ..Default::default()
        };
        let b = BranchCounts {
            retained: 3,
            reinitialization: 4,
            repaired: 1,
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.total(), 10);
        assert_eq!(a.explored(), 9);
        assert_eq!(a.repaired, 1);
    }
}
