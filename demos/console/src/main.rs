//! qsim — run a batch of queue simulations and report on them.
//!
//! Usage:
//!   qsim
//!   qsim --config day.json --runs 20 --seed 7
//!   qsim --servers 3 --duration 600 --out ./output
//!
//! Without `--config` the built-in defaults are used (8-hour day, 2 servers,
//! arrivals every 1–4 minutes, services of 1–12 minutes, 5 runs).  Flags
//! override whatever the config file sets.  Set `RUST_LOG=info` for progress.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use qs_batch::{BatchConfig, run_replications};
use qs_output::{CsvWriter, JsonReportWriter, ReportWriter, dashboard};

const PATTERNS_FILE: &str = "patterns.json";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = load_config(&args)?;
    let out_dir = parse_str(&args, "--out").map(PathBuf::from);

    println!("queuesim: {} runs", config.runs);
    println!("  duration:  {} min", config.sim.duration);
    println!("  servers:   {}", config.sim.server_count);
    println!("  seed:      {}", config.sim.seed);
    println!();

    let t0 = Instant::now();
    let report = run_replications(&config).context("batch failed")?;
    log::info!("{} runs in {:.2?}", report.runs.len(), t0.elapsed());

    print!("{}", dashboard::render(&report));

    if let Some(dir) = out_dir {
        let mut writer = CsvWriter::new(&dir)
            .with_context(|| format!("opening CSV output in {}", dir.display()))?;
        writer.write_batch(&report)?;

        let json_path = dir.join(PATTERNS_FILE);
        JsonReportWriter::write(&json_path, &report.patterns, &report.suggestions)
            .with_context(|| format!("writing {}", json_path.display()))?;
        println!("Results exported to {}", dir.display());
    }

    Ok(())
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config(args: &[String]) -> Result<BatchConfig> {
    let mut config = match parse_str(args, "--config") {
        Some(path) => read_config(Path::new(path))?,
        None => BatchConfig::default(),
    };

    config.runs = parse_arg(args, "--runs", config.runs);
    config.sim.seed = parse_arg(args, "--seed", config.sim.seed);
    config.sim.server_count = parse_arg(args, "--servers", config.sim.server_count);
    config.sim.duration = parse_arg(args, "--duration", config.sim.duration);

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<BatchConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn parse_str<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}
