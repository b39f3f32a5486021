use cohort::io::load_metrics_csv;
use cohort::sweep::{save_sweep, sweep_seeds};
use cohort::types::ClusteringConfig;

struct Args {
    input: String,
    k: usize,
    max_iter: u32,
    epsilon: f64,
    runs: usize,
    base_seed: Option<u64>,
    output: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut input: Option<String> = None;
    let mut k = 3usize;
    let mut max_iter = 100u32;
    let mut epsilon = 0.001f64;
    let mut runs = 20usize;
    let mut base_seed: Option<u64> = None;
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
            "--runs" => {
                i += 1;
                if i < args.len() {
                    runs = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --runs value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--base-seed" => {
                i += 1;
                if i < args.len() {
                    base_seed = Some(args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --base-seed value: {}", args[i]);
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
                    "Usage: cohort-stability --input FILE [--k N] [--max-iter N] [--epsilon E] [--runs N] [--base-seed S] [--output DIR]"
                );
                println!();
                println!("Options:");
                println!("  --input FILE    Metrics CSV export (required)");
                println!("  --k N           Requested tier count (default: 3)");
                println!("  --max-iter N    Iteration cap per run (default: 100)");
                println!("  --epsilon E     Convergence threshold (default: 0.001)");
                println!("  --runs N        Seeds to sweep (default: 20)");
                println!("  --base-seed S   First seed (default: COHORT_SEED or 42)");
                println!("  --output DIR    Write stability_sweep.json to DIR");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!(
                    "Usage: cohort-stability --input FILE [--k N] [--max-iter N] [--epsilon E] [--runs N] [--base-seed S] [--output DIR]"
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

    if runs == 0 {
        eprintln!("--runs must be at least 1");
        std::process::exit(1);
    }

    Args {
        input,
        k,
        max_iter,
        epsilon,
        runs,
        base_seed,
        output,
    }
}

fn main() {
    let _base = cohort::env_config::init_base_path();
    let args = parse_args();
    let base_seed = args.base_seed.unwrap_or_else(cohort::env_config::default_seed);
    let num_threads = cohort::env_config::init_sweep_threads();

    let metrics = match load_metrics_csv(&args.input) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    let config = ClusteringConfig {
        cluster_count: args.k,
        max_iterations: args.max_iter,
        convergence_epsilon: args.epsilon,
    };

    println!(
        "Stability sweep: {} students, k={}, seeds {}..{} ({} threads)",
        metrics.len(),
        args.k,
        base_seed,
        base_seed.wrapping_add(args.runs as u64),
        num_threads
    );

    let summary = match sweep_seeds(&metrics, &config, base_seed, args.runs) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Sweep failed: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "\n{:>4}  {:>10}  {:>6}  {:>5}  {:>12}",
        "Run", "Seed", "Iters", "Conv", "Inertia"
    );
    println!("{}", "─".repeat(46));
    for (i, r) in summary.runs.iter().enumerate() {
        println!(
            "{:>4}  {:>10}  {:>6}  {:>5}  {:>12.6}",
            i,
            r.seed,
            r.iterations_run,
            if r.converged { "yes" } else { "no" },
            r.inertia
        );
    }

    println!();
    println!("Stability ({} runs):", args.runs);
    println!(
        "  Inertia:     {:.6} mean, {:.6} std",
        summary.inertia_mean, summary.inertia_std_dev
    );
    println!(
        "  Range:       [{:.6}, {:.6}]",
        summary.inertia_min, summary.inertia_max
    );
    println!("  Converged:   {}/{}", summary.converged_runs, args.runs);
    println!(
        "  Partitions:  {} distinct, modal share {:.1}%",
        summary.distinct_partitions,
        summary.modal_partition_share * 100.0
    );
    println!("  Elapsed:     {:.1} ms", summary.elapsed * 1000.0);

    if let Some(ref output_dir) = args.output {
        let json_path = format!("{}/stability_sweep.json", output_dir);
        save_sweep(&summary, &json_path);
        println!("  Summary:     {}", json_path);
    }

    println!("\nDone.");
}
