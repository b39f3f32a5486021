use std::time::Instant;

use cohort::assignment::inertia;
use cohort::constants::FEATURE_NAMES;
use cohort::engine::cluster_students_seeded;
use cohort::features::extract_features;
use cohort::io::load_metrics_csv;
use cohort::statistics::save_outcome;
use cohort::types::ClusteringConfig;

struct Args {
    input: String,
    k: usize,
    max_iter: u32,
    epsilon: f64,
    seed: Option<u64>,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut input: Option<String> = None;
    let mut k = 3usize;
    let mut max_iter = 100u32;
    let mut epsilon = 0.001f64;
    let mut seed: Option<u64> = None;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                if i < args.len() {
                    input = Some(args[i].clone());
                }
            }
            "--k" => {
                i += 1;
                if i < args.len() {
                    k = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --k value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--max-iter" => {
                i += 1;
                if i < args.len() {
                    max_iter = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --max-iter value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--epsilon" => {
                i += 1;
                if i < args.len() {
                    epsilon = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --epsilon value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = Some(args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --seed value: {}", args[i]);
                        std::process::exit(1);
                    }));
                }
            }
            "--output" => {
                i += 1;
                if i < args.len() {
                    output = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                println!(
                    "Usage: cohort-cluster --input FILE [--k N] [--max-iter N] [--epsilon E] [--seed S] [--output DIR]"
                );
                println!();
                println!("Options:");
                println!("  --input FILE    Metrics CSV export (required)");
                println!("  --k N           Requested tier count (default: 3)");
                println!("  --max-iter N    Iteration cap (default: 100)");
                println!("  --epsilon E     Convergence threshold (default: 0.001)");
                println!("  --seed S        Seeding RNG seed (default: COHORT_SEED or 42)");
                println!("  --output DIR    Write clustering_outcome.json to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: cohort-cluster --input FILE [--k N] [--max-iter N] [--epsilon E] [--seed S] [--output DIR]"
                );
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let input = input.unwrap_or_else(|| {
        eprintln!("Missing required --input FILE");
        std::process::exit(1);
    });

    Args {
        input,
        k,
        max_iter,
        epsilon,
        seed,
        output,
    }
}

fn main() {
    let _base = cohort::env_config::init_base_path();
    let args = parse_args();
    let seed = args.seed.unwrap_or_else(cohort::env_config::default_seed);

    let t0 = Instant::now();
    let metrics = match load_metrics_csv(&args.input) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args.input, e);
            std::process::exit(1);
        }
    };
    let load_ms = t0.elapsed().as_secs_f64() * 1000.0;

    println!("Cohort Clustering ({} students)", metrics.len());
    println!("  Load:        {:.1} ms ({})", load_ms, args.input);

    let config = ClusteringConfig {
        cluster_count: args.k,
        max_iterations: args.max_iter,
        convergence_epsilon: args.epsilon,
    };

    let t1 = Instant::now();
    let outcome = match cluster_students_seeded(&metrics, &config, seed) {
        Ok(o) => o,
        Err(e) => {
            if e.is_configuration() {
                eprintln!("Invalid configuration: {}", e);
            } else {
                eprintln!("Invalid metrics: {}", e);
            }
            std::process::exit(1);
        }
    };
    let cluster_ms = t1.elapsed().as_secs_f64() * 1000.0;

    println!("  Cluster:     {:.1} ms", cluster_ms);

    let vectors = extract_features(&metrics);
    let labels: Vec<usize> = outcome.assignments.iter().map(|a| a.cluster).collect();
    let final_inertia = inertia(&vectors, &outcome.centroids, &labels);

    println!();
    println!("Results (seed {}):", seed);
    println!("  Requested k:  {}", args.k);
    println!("  Effective k:  {}", outcome.summary.effective_k);
    println!("  Iterations:   {}", outcome.summary.iterations_run);
    println!("  Converged:    {}", outcome.summary.converged);
    println!("  Inertia:      {:.6}", final_inertia);
    if !outcome.summary.converged {
        eprintln!(
            "WARNING: centroids still moving after {} iterations",
            outcome.summary.iterations_run
        );
    }

    if !outcome.reports.is_empty() {
        println!(
            "\n{:>7}  {:>8}  {:>6}  {:>8}  {:>8}  {:>7}  {:>7}  {:>8}",
            "Cluster", "Students", "%", "Literacy", "Math", "Score", "Games", "Perf"
        );
        println!("{}", "─".repeat(72));
        for r in &outcome.reports {
            println!(
                "{:>7}  {:>8}  {:>6.1}  {:>8.1}  {:>8.1}  {:>7.3}  {:>7.3}  {:>8.1}",
                r.cluster,
                r.student_count,
                r.percentage_of_total,
                r.avg_literacy,
                r.avg_math,
                r.avg_score,
                r.avg_games,
                r.avg_performance
            );
        }

        println!("\nCentroids (normalized):");
        let header: Vec<String> = FEATURE_NAMES
            .iter()
            .map(|name| format!("{:>9}", name))
            .collect();
        println!("{:>7}  {}", "Cluster", header.join("  "));
        for (i, c) in outcome.centroids.iter().enumerate() {
            let row: Vec<String> = c.iter().map(|x| format!("{:>9.4}", x)).collect();
            println!("{:>7}  {}", i, row.join("  "));
        }
    }

    if let Some(ref output_dir) = args.output {
        let json_path = format!("{}/clustering_outcome.json", output_dir);
        save_outcome(&outcome, &json_path);
        println!("\n  Outcome:     {}", json_path);
    }
}
