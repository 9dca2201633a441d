//! Social Learning CLI - Run optimization trials from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;

use social_learning::{RunConfig, SocialLearning};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [summary.json]", args[0]);
        eprintln!();
        eprintln!("Run Social Learning optimization trials from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json   Path to run configuration file");
        eprintln!("  summary.json  Optional path for the JSON run summary");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let summary_path = args.get(2).map(PathBuf::from);

    let config = RunConfig::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {}", config_path.display(), e);
        std::process::exit(1);
    });

    let opt = &config.optimizer;
    println!("Social Learning Optimization");
    println!("============================");
    println!("Objective: {:?}", config.objective);
    println!(
        "Population: {} (elite {}), dimensions: {}",
        opt.population_size,
        opt.elite_count(),
        opt.dimensions
    );
    println!("Bounds: [{}, {}]", opt.lower_bound, opt.upper_bound);
    println!(
        "p_i = {}, p_r = {}",
        opt.imitation_probability, opt.randomization_probability
    );
    println!(
        "Evaluations per trial: {}, trials: {}",
        opt.max_evaluations, opt.trials
    );
    println!();

    let optimizer = SocialLearning::new(config.optimizer.clone(), config.objective)
        .unwrap_or_else(|e| {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        });

    let summary = optimizer.run_parallel();

    for trial in &summary.trials {
        println!(
            "  Trial {:>3}: best = {:e} ({} generations, {} evaluations)",
            trial.trial, trial.best_fitness, trial.generations, trial.evaluations
        );
    }

    println!();
    println!("Best:   {:e}", summary.best);
    println!("Worst:  {:e}", summary.worst);
    println!("Mean:   {:e}", summary.mean);
    println!("Median: {:e}", summary.median);
    println!("Std:    {:e}", summary.std_dev);
    println!(
        "Time: {:.2}s ({:.0} evals/s)",
        summary.elapsed_seconds,
        summary.total_evaluations as f64 / summary.elapsed_seconds.max(f64::EPSILON)
    );

    if let Some(path) = summary_path {
        let json = serde_json::to_string_pretty(&summary).unwrap_or_else(|e| {
            eprintln!("Error serializing summary: {}", e);
            std::process::exit(1);
        });
        if let Err(e) = fs::write(&path, json) {
            eprintln!("Error writing {}: {}", path.display(), e);
            std::process::exit(1);
        }
        println!("Summary written to {}", path.display());
    }
}

fn print_example_config() {
    let config = RunConfig::default();

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
