//! End-to-end behaviour of the Social Learning optimizer.

use std::sync::atomic::AtomicBool;

use proptest::prelude::*;
use social_learning::{
    BenchmarkFunction, NonFinitePolicy, OptimizerConfig, SocialLearning, StopReason, Trial,
};

fn sphere_config(seed: u64) -> OptimizerConfig {
    OptimizerConfig {
        population_size: 30,
        dimensions: 2,
        max_evaluations: 600,
        trials: 1,
        elite_size: Some(15),
        lower_bound: -10.0,
        upper_bound: 10.0,
        random_seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn test_sphere_converges_within_budget() {
    let optimizer = SocialLearning::new(sphere_config(2016), BenchmarkFunction::Sphere).unwrap();
    let summary = optimizer.run();
    let trial = &summary.trials[0];

    assert_eq!(trial.stop_reason, StopReason::BudgetExhausted);
    assert_eq!(trial.evaluations, 600);
    assert_eq!(trial.generations, 19);
    assert!(
        trial.best_fitness < 1.0,
        "best fitness {} not below 1.0",
        trial.best_fitness
    );
    assert!(trial.best_history.first().unwrap() >= trial.best_history.last().unwrap());
}

#[test]
fn test_fixed_seed_is_reproducible() {
    let a = SocialLearning::new(sphere_config(99), BenchmarkFunction::Sphere)
        .unwrap()
        .run();
    let b = SocialLearning::new(sphere_config(99), BenchmarkFunction::Sphere)
        .unwrap()
        .run();

    assert_eq!(a.trials[0].best_history, b.trials[0].best_history);
    assert_eq!(a.trials[0].best_position, b.trials[0].best_position);
    assert_eq!(a.trials[0].branches, b.trials[0].branches);
}

#[test]
fn test_trials_are_independent_streams() {
    let config = OptimizerConfig {
        trials: 4,
        ..sphere_config(5)
    };
    let summary = SocialLearning::new(config, BenchmarkFunction::Sphere)
        .unwrap()
        .run();

    let seeds: Vec<u64> = summary.trials.iter().map(|t| t.seed).collect();
    for (i, s) in seeds.iter().enumerate() {
        assert!(!seeds[i + 1..].contains(s));
    }
    // Each trial restarts from a fresh population and best.
    assert_ne!(summary.trials[0].best_history, summary.trials[1].best_history);
}

#[test]
fn test_single_model_member_runs() {
    let config = OptimizerConfig {
        elite_size: Some(1),
        ..sphere_config(1)
    };
    let result = SocialLearning::new(config, BenchmarkFunction::Sphere)
        .unwrap()
        .run_trial(0, 1);

    assert!(result.best_fitness.is_finite());
    assert!(result.best_history.iter().all(|v| v.is_finite()));
}

#[test]
fn test_nan_objective_does_not_poison_search() {
    let objective = |x: &[f64]| {
        if x[0] > 5.0 {
            f64::NAN
        } else {
            x.iter().map(|v| v * v).sum()
        }
    };
    for policy in [NonFinitePolicy::Worst, NonFinitePolicy::Propagate] {
        let config = OptimizerConfig {
            non_finite_policy: policy,
            ..sphere_config(3)
        };
        let result = SocialLearning::new(config, objective).unwrap().run_trial(0, 3);
        assert!(result.best_fitness.is_finite(), "{:?}", policy);
        assert!(result.best_position[0] <= 5.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn test_genes_stay_in_bounds_and_best_never_worsens(
        seed in 0..1000u64,
        dims in 1..6usize,
        elite in 1..10usize,
    ) {
        let config = OptimizerConfig {
            population_size: 10,
            dimensions: dims,
            max_evaluations: 300,
            elite_size: Some(elite),
            lower_bound: -2.0,
            upper_bound: 3.0,
            ..Default::default()
        };
        let objective = BenchmarkFunction::Rastrigin;
        let mut trial = Trial::new(&config, 0, seed).unwrap();
        trial.initialize();
        trial.evaluate(&objective);

        let mut best = trial.best().fitness;
        let mut evaluations = trial.counter().count();
        prop_assert_eq!(evaluations, 10);

        while !trial.counter().exhausted() {
            trial.step_generation(&objective);
            prop_assert_eq!(trial.counter().count(), evaluations + 10);
            evaluations = trial.counter().count();

            prop_assert!(trial.best().fitness <= best);
            best = trial.best().fitness;

            for individual in trial.population().individuals() {
                for &g in &individual.genes {
                    prop_assert!((-2.0..=3.0).contains(&g));
                }
            }
        }
        prop_assert!(evaluations >= 300 && evaluations - 10 < 300);
    }
}

#[test]
fn test_invalid_trial_config_fails_before_running() {
    let config = OptimizerConfig {
        elite_size: Some(0),
        ..sphere_config(0)
    };
    assert!(Trial::new(&config, 0, 0).is_err());
}

#[test]
fn test_cancelled_trial_stops_after_initial_evaluation() {
    let config = sphere_config(0);
    let cancelled = AtomicBool::new(true);
    let result = Trial::new(&config, 0, 0)
        .unwrap()
        .run(&BenchmarkFunction::Sphere, &cancelled, |_| {});
    assert_eq!(result.stop_reason, StopReason::Cancelled);
    assert_eq!(result.evaluations, 30);
}
