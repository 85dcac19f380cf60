// Measure Planner — transition table generator for the pandemic planning domain
// Costs every measure-to-measure transition and writes the planner's (:init ...) block
//
// Usage:
//   cargo run --release --bin planner                          # Write data.pddl
//   cargo run --release --bin planner -- --seed 42             # Reproducible social values
//   cargo run --release --bin planner -- --output out.pddl     # Custom output path
//   cargo run --release --bin planner -- --catalog m.json      # Custom measure catalog
//   cargo run --release --bin planner -- --params p.json       # Custom model parameters
//   cargo run --release --bin planner -- --report run.json     # JSON run summary
//   cargo run --release --bin planner -- --trajectory t.jsonl  # Per-transition tolls

mod trajectory;

use measure_planner::emitter::DEFAULT_OUTPUT;
use measure_planner::report::RunReport;
use measure_planner::{MeasureCatalog, ModelParams, Planner};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;
use trajectory::TrajectoryRecorder;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    output: PathBuf,
    seed: Option<u64>,
    catalog: Option<PathBuf>,
    params: Option<PathBuf>,
    report: Option<PathBuf>,
    trajectory: Option<PathBuf>,
    help: bool,
}

fn parse_args() -> Result<CliArgs, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        output: PathBuf::from(DEFAULT_OUTPUT),
        seed: None,
        catalog: None,
        params: None,
        report: None,
        trajectory: None,
        help: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => cli.output = PathBuf::from(take_value(&args, &mut i, "--output")?),
            "--seed" => {
                let raw = take_value(&args, &mut i, "--seed")?;
                let seed = raw.parse::<u64>().map_err(|_| format!("invalid seed: {raw}"))?;
                cli.seed = Some(seed);
            }
            "--catalog" => cli.catalog = Some(PathBuf::from(take_value(&args, &mut i, "--catalog")?)),
            "--params" => cli.params = Some(PathBuf::from(take_value(&args, &mut i, "--params")?)),
            "--report" => cli.report = Some(PathBuf::from(take_value(&args, &mut i, "--report")?)),
            "--trajectory" => {
                cli.trajectory = Some(PathBuf::from(take_value(&args, &mut i, "--trajectory")?))
            }
            "--help" | "-h" => cli.help = true,
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    Ok(cli)
}

fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn print_usage() {
    println!("planner [options]");
    println!("options:");
    println!("  --output <path>       problem file to write (default {})", DEFAULT_OUTPUT);
    println!("  --seed <u64>          seed for the randomized social values");
    println!("  --catalog <json>      measure catalog to use instead of the shipped one");
    println!("  --params <json>       model parameters overriding the defaults");
    println!("  --report <path>       write a JSON run summary");
    println!("  --trajectory <path>   write per-transition tolls as JSONL");
    println!("logging: set RUST_LOG (e.g. RUST_LOG=measure_planner=debug)");
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{}", err);
            print_usage();
            std::process::exit(1);
        }
    };

    if cli.help {
        print_usage();
        return;
    }

    if let Err(err) = run(&cli) {
        eprintln!("  Error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = match &cli.catalog {
        Some(path) => MeasureCatalog::from_json_file(path)?,
        None => MeasureCatalog::shipped(),
    };
    let params = match &cli.params {
        Some(path) => ModelParams::from_json(&std::fs::read_to_string(path)?)?,
        None => ModelParams::default(),
    };
    let planner = Planner::new(catalog, params)?;

    println!("\n  Measure Planner v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "  Measures: {} | PRNG: ChaCha8Rng | Seed: {}",
        planner.catalog().len(),
        cli.seed.map(|s| s.to_string()).unwrap_or_else(|| "entropy".to_string()),
    );

    let start = Instant::now();
    let mut recorder = TrajectoryRecorder::new();
    let table = planner.build_table_observed(|path, state| recorder.record(path, state))?;

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let written = measure_planner::emitter::write_problem_file(&cli.output, &table, &mut rng)?;

    let state = table.final_state;
    println!("  {}", "-".repeat(60));
    println!("  Paths written:      {:>12}", written);
    println!("  Infections toll:    {:>12}", state.infections_toll);
    println!("  Death toll:         {:>12}", state.death_toll);
    println!("  Social toll:        {:>12}", state.social_toll);
    println!("  Elapsed:            {:>10.1}ms", start.elapsed().as_secs_f64() * 1000.0);
    println!("  Problem saved to: {}", cli.output.display());

    if let Some(path) = &cli.trajectory {
        recorder.write_jsonl(path)?;
        println!("  Trajectory saved to: {} ({} steps)", path.display(), recorder.len());
    }

    if let Some(path) = &cli.report {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis().to_string())
            .unwrap_or_default();
        let report = RunReport::from_table(
            &table,
            planner.catalog().len(),
            &cli.output.display().to_string(),
            cli.seed,
            timestamp,
        );
        report.write(path)?;
        println!("  Report saved to: {}", path.display());
    }
    println!();

    Ok(())
}
