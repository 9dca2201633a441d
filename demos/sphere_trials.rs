//! Quick Social Learning performance test across benchmark functions

use social_learning::{BenchmarkFunction, OptimizerConfig, SocialLearning};
use std::time::Instant;

fn main() {
    println!("=== Social Learning Benchmark Sweep ===\n");

    for function in BenchmarkFunction::all() {
        let (lower_bound, upper_bound) = function.default_bounds();
        let config = OptimizerConfig {
            population_size: 30,
            dimensions: 10,
            max_evaluations: 30_000,
            trials: 10,
            lower_bound,
            upper_bound,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let optimizer = SocialLearning::new(config, function).expect("valid config");
        let summary = optimizer.run_parallel();
        let elapsed = start.elapsed();

        println!("{:?}", function);
        println!("  Best:      {:e}", summary.best);
        println!("  Mean:      {:e}", summary.mean);
        println!("  Std:       {:e}", summary.std_dev);
        println!("  Elapsed:   {:.2}s", elapsed.as_secs_f64());
        println!();
    }
}
