//! Run controller: trial state machine and multi-trial driver.
//!
//! A trial runs `initialize -> evaluate -> (attention -> reproduce ->
//! motivate)*` until its evaluation budget is used up. All of its state,
//! including the random stream, is owned by the [`Trial`] value, so trials
//! can run side by side.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::schema::{
    BranchCounts, ConfigError, GenerationProgress, OptimizerConfig, RunSummary, StopReason,
    TrialResult,
};

use super::attention::Attention;
use super::motivation::motivate;
use super::objective::Objective;
use super::population::{EvaluationCounter, Evaluator, GlobalBest, Population};
use super::reproduction::{ReproductionParams, reproduce};
use super::rng::SearchRng;

/// State of a single optimization trial.
pub struct Trial<'a> {
    config: &'a OptimizerConfig,
    index: usize,
    seed: u64,
    rng: SearchRng,
    population: Population,
    counter: EvaluationCounter,
    best: GlobalBest,
    generation: usize,
    history: Vec<f64>,
    branches: BranchCounts,
}

impl<'a> Trial<'a> {
    /// Create a trial with its own random stream. Fails if `config` is invalid.
    pub fn new(
        config: &'a OptimizerConfig,
        index: usize,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config, index, seed))
    }

    /// Create a trial from a configuration that already passed `validate()`.
    pub(crate) fn from_validated(config: &'a OptimizerConfig, index: usize, seed: u64) -> Self {
        Self {
            config,
            index,
            seed,
            rng: SearchRng::new(seed),
            population: Population::default(),
            counter: EvaluationCounter::new(config.max_evaluations),
            best: GlobalBest::sentinel(),
            generation: 0,
            history: Vec::new(),
            branches: BranchCounts::default(),
        }
    }

    /// Draw a fresh population and reset the counter and global best.
    pub fn initialize(&mut self) {
        self.population = Population::initialize(self.config, &mut self.rng);
        self.counter = EvaluationCounter::new(self.config.max_evaluations);
        self.best = GlobalBest::sentinel();
        self.generation = 0;
        self.history.clear();
        self.branches = BranchCounts::default();
    }

    /// Evaluate the initial population.
    pub fn evaluate(&mut self, objective: &dyn Objective) {
        let evaluator = Evaluator::new(objective, self.config.non_finite_policy);
        self.population
            .evaluate(&evaluator, &mut self.counter, &mut self.best);
        self.history.push(self.best.fitness);
    }

    /// Run one attention -> reproduction -> motivation cycle.
    pub fn step_generation(&mut self, objective: &dyn Objective) -> GenerationProgress {
        let attention =
            Attention::analyze(&self.population, self.config.elite_count(), &mut self.rng);

        let params = ReproductionParams::from(self.config);
        let (offspring, counts) =
            reproduce(&self.population, &attention, &params, &mut self.rng);
        self.branches.merge(&counts);

        let evaluator = Evaluator::new(objective, self.config.non_finite_policy);
        let replaced = motivate(
            &mut self.population,
            offspring,
            &evaluator,
            &mut self.counter,
            &mut self.best,
        );

        self.generation += 1;
        self.history.push(self.best.fitness);

        log::debug!(
            "Trial {} generation {}: best={:e} AT={:.4} (dim {}) replaced={}/{} evals={}",
            self.index,
            self.generation,
            self.best.fitness,
            attention.threshold,
            attention.threshold_dimension,
            replaced,
            self.population.len(),
            self.counter.count()
        );

        self.progress(Some(attention.threshold))
    }

    /// Current progress.
    pub fn progress(&self, attention_threshold: Option<f64>) -> GenerationProgress {
        GenerationProgress {
            trial: self.index,
            generation: self.generation,
            evaluations: self.counter.count(),
            max_evaluations: self.counter.max(),
            best_fitness: self.best.fitness,
            mean_fitness: self.population.mean_fitness(),
            attention_threshold,
        }
    }

    /// Check if the trial should stop.
    fn should_stop(&self, cancelled: &AtomicBool) -> Option<StopReason> {
        if cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }

        if let Some(target) = self.config.target_fitness
            && self.best.fitness <= target
        {
            return Some(StopReason::TargetReached);
        }

        if self.counter.exhausted() {
            return Some(StopReason::BudgetExhausted);
        }

        None
    }

    /// Run the trial to completion.
    pub fn run<F>(
        mut self,
        objective: &dyn Objective,
        cancelled: &AtomicBool,
        callback: F,
    ) -> TrialResult
    where
        F: Fn(&GenerationProgress),
    {
        self.initialize();
        self.evaluate(objective);
        callback(&self.progress(None));

        let stop_reason = loop {
            if let Some(reason) = self.should_stop(cancelled) {
                break reason;
            }
            let progress = self.step_generation(objective);
            callback(&progress);
        };

        log::info!(
            "Trial {} finished: best={:e} after {} generations, {} evaluations ({:?})",
            self.index,
            self.best.fitness,
            self.generation,
            self.counter.count(),
            stop_reason
        );

        TrialResult {
            trial: self.index,
            seed: self.seed,
            best_fitness: self.best.fitness,
            best_position: self.best.genes,
            evaluations: self.counter.count(),
            generations: self.generation,
            best_history: self.history,
            branches: self.branches,
            stop_reason,
        }
    }

    /// Global best of the trial.
    pub fn best(&self) -> &GlobalBest {
        &self.best
    }

    /// Evaluation counter of the trial.
    pub fn counter(&self) -> &EvaluationCounter {
        &self.counter
    }

    /// Current population.
    pub fn population(&self) -> &Population {
        &self.population
    }
}

/// Social Learning optimizer: runs independent trials on one objective.
pub struct SocialLearning {
    config: OptimizerConfig,
    objective: Box<dyn Objective>,
    cancelled: Arc<AtomicBool>,
}

impl SocialLearning {
    /// Create an optimizer. Fails if the configuration is invalid.
    pub fn new<O>(config: OptimizerConfig, objective: O) -> Result<Self, ConfigError>
    where
        O: Objective + 'static,
    {
        config.validate()?;
        Ok(Self {
            config,
            objective: Box::new(objective),
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Optimizer configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Get cancellation handle.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Per-trial seeds, drawn from a master stream seeded by `random_seed`.
    ///
    /// Every trial gets its own stream, so results do not depend on
    /// whether trials run sequentially or in parallel.
    pub fn trial_seeds(&self) -> Vec<u64> {
        let mut master = match self.config.random_seed {
            Some(seed) => SearchRng::new(seed),
            None => SearchRng::random(),
        };
        (0..self.config.trials).map(|_| master.next_seed()).collect()
    }

    /// Run a single trial with an explicit seed.
    pub fn run_trial(&self, index: usize, seed: u64) -> TrialResult {
        Trial::from_validated(&self.config, index, seed).run(
            self.objective.as_ref(),
            &self.cancelled,
            |_| {},
        )
    }

    /// Run all trials sequentially with progress callback.
    pub fn run_with_callback<F>(&self, callback: F) -> RunSummary
    where
        F: Fn(&GenerationProgress),
    {
        let start_time = Instant::now();
        let results = self
            .trial_seeds()
            .into_iter()
            .enumerate()
            .map(|(index, seed)| {
                Trial::from_validated(&self.config, index, seed).run(
                    self.objective.as_ref(),
                    &self.cancelled,
                    &callback,
                )
            })
            .collect();
        RunSummary::from_trials(results, start_time.elapsed().as_secs_f64())
    }

    /// Run all trials sequentially (blocking).
    pub fn run(&self) -> RunSummary {
        self.run_with_callback(|_| {})
    }

    /// Run all trials on the rayon thread pool.
    pub fn run_parallel(&self) -> RunSummary {
        let start_time = Instant::now();
        let results = self
            .trial_seeds()
            .into_par_iter()
            .enumerate()
            .map(|(index, seed)| self.run_trial(index, seed))
            .collect();
        RunSummary::from_trials(results, start_time.elapsed().as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::objective::sphere;
    use std::sync::Mutex;

    fn config() -> OptimizerConfig {
        OptimizerConfig {
            population_size: 10,
            dimensions: 3,
            max_evaluations: 205,
            trials: 3,
            lower_bound: -5.0,
            upper_bound: 5.0,
            random_seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = OptimizerConfig {
            elite_size: Some(10),
            ..config()
        };
        assert!(SocialLearning::new(config, sphere).is_err());
    }

    #[test]
    fn test_trial_rejects_invalid_config() {
        let config = OptimizerConfig {
            elite_size: Some(0),
            ..config()
        };
        assert!(matches!(
            Trial::new(&config, 0, 1),
            Err(ConfigError::InvalidEliteSize { elite: 0, .. })
        ));

        let config = OptimizerConfig {
            lower_bound: 5.0,
            ..self::config()
        };
        assert!(Trial::new(&config, 0, 1).is_err());
    }

    #[test]
    fn test_budget_accounting() {
        let config = config();
        let cancelled = AtomicBool::new(false);
        let mut trial = Trial::new(&config, 0, 1).unwrap();
        trial.initialize();
        trial.evaluate(&sphere);
        assert_eq!(trial.counter().count(), 10);

        let mut last = trial.counter().count();
        while trial.should_stop(&cancelled).is_none() {
            trial.step_generation(&sphere);
            assert_eq!(trial.counter().count(), last + 10);
            last = trial.counter().count();
        }
        let count = trial.counter().count();
        assert!(count >= 205 && count - 10 < 205);
        assert_eq!(count, 210);
    }

    #[test]
    fn test_best_history_non_increasing() {
        let optimizer = SocialLearning::new(config(), sphere).unwrap();
        let summary = optimizer.run();

        assert_eq!(summary.trials.len(), 3);
        for trial in &summary.trials {
            assert_eq!(trial.stop_reason, StopReason::BudgetExhausted);
            assert_eq!(trial.generations, 20);
            assert_eq!(trial.best_history.len(), 21);
            assert!(trial.best_history.windows(2).all(|w| w[1] <= w[0]));
            assert_eq!(*trial.best_history.last().unwrap(), trial.best_fitness);
            assert_eq!(sphere(&trial.best_position), trial.best_fitness);
            assert_eq!(trial.branches.total(), 20 * 10 * 3);
        }
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let optimizer = SocialLearning::new(config(), sphere).unwrap();
        let sequential = optimizer.run();
        let parallel = optimizer.run_parallel();

        for (a, b) in sequential.trials.iter().zip(&parallel.trials) {
            assert_eq!(a.trial, b.trial);
            assert_eq!(a.seed, b.seed);
            assert_eq!(a.best_history, b.best_history);
        }
    }

    #[test]
    fn test_progress_callback() {
        let optimizer = SocialLearning::new(
            OptimizerConfig {
                trials: 1,
                ..config()
            },
            sphere,
        )
        .unwrap();
        let seen = Mutex::new(Vec::new());
        optimizer.run_with_callback(|p| seen.lock().unwrap().push(p.clone()));

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 21);
        assert_eq!(seen[0].generation, 0);
        assert!(seen[0].attention_threshold.is_none());
        assert_eq!(seen[0].evaluations, 10);
        assert!(seen[1..].iter().all(|p| p.attention_threshold.is_some()));
        assert_eq!(seen.last().unwrap().evaluations, 210);
    }

    #[test]
    fn test_target_fitness_stops_early() {
        let config = OptimizerConfig {
            target_fitness: Some(f64::MAX),
            ..config()
        };
        let optimizer = SocialLearning::new(config, sphere).unwrap();
        let result = optimizer.run_trial(0, 3);
        assert_eq!(result.stop_reason, StopReason::TargetReached);
        assert_eq!(result.generations, 0);
        assert_eq!(result.evaluations, 10);
    }

    #[test]
    fn test_cancellation() {
        let optimizer = SocialLearning::new(config(), sphere).unwrap();
        let cancel = optimizer.cancel_handle();

        // Cancel immediately
        cancel.store(true, Ordering::Relaxed);

        let summary = optimizer.run();
        assert!(
            summary
                .trials
                .iter()
                .all(|t| t.stop_reason == StopReason::Cancelled)
        );
    }

    #[test]
    fn test_budget_smaller_than_population() {
        let config = OptimizerConfig {
            max_evaluations: 4,
            ..config()
        };
        let optimizer = SocialLearning::new(config, sphere).unwrap();
        let result = optimizer.run_trial(0, 0);
        assert_eq!(result.evaluations, 10);
        assert_eq!(result.generations, 0);
    }
}
