//! roi-runner: headless front end for the ROI engine.
//!
//! Usage:
//!   roi-runner                                   # load builtin sample, report all periods
//!   roi-runner --cursor 6 --config roi.json      # report the first 6 periods
//!   roi-runner --synthetic --seed 7 --periods 36 # seeded synthetic batch
//!   roi-runner --data batch.json --json          # machine-readable summary
//!   roi-runner --ipc-mode                        # JSON-lines requests on stdin

use anyhow::Result;
use roi_core::{
    alert::AlertLevel,
    command::{DeskCommand, DeskResponse, RoiReport},
    config::{LoaderConfig, RoiConfig},
    desk::RoiDesk,
    loader::{self, LoadSummary, SampleBatch},
    trajectory::Trajectory,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Serialize)]
struct RunSummary<'a> {
    load:   LoadSummary,
    report: &'a RoiReport,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let synthetic = args.iter().any(|a| a == "--synthetic");
    let json_out = args.iter().any(|a| a == "--json");
    let seed = parse_arg(&args, "--seed", 42u64);
    let periods = parse_arg(&args, "--periods", 24usize);

    let config = match flag_value(&args, "--config") {
        Some(path) => RoiConfig::load(path)?,
        None => RoiConfig::default(),
    };
    let loader_config = match flag_value(&args, "--loader-config") {
        Some(path) => LoaderConfig::load(path)?,
        None => LoaderConfig::default(),
    };

    let mut desk = RoiDesk::new(config);

    if ipc_mode {
        return run_ipc_loop(&mut desk);
    }

    let batch = if synthetic {
        SampleBatch::synthesize(seed, periods)
    } else if let Some(path) = flag_value(&args, "--data") {
        SampleBatch::load(path)?
    } else {
        SampleBatch::builtin()?
    };

    let load = loader::load_batch(&mut desk, &batch, &loader_config)?;
    let cursor = parse_arg(&args, "--cursor", desk.engine().len());
    desk.seek(cursor);
    let report = desk.report();

    if json_out {
        println!("{}", serde_json::to_string_pretty(&RunSummary { load, report: &report })?);
    } else {
        print_summary(&load, &report);
    }
    Ok(())
}

fn run_ipc_loop(desk: &mut RoiDesk) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let response = match RoiDesk::parse(&buffer) {
            Ok(DeskCommand::Quit) => break,
            Ok(cmd) => desk.handle(cmd),
            Err(e) => {
                log::warn!("Rejected IPC request: {e}");
                DeskResponse::from(e)
            }
        };
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(load: &LoadSummary, report: &RoiReport) {
    println!("=== LOAD ===");
    println!("  loaded:  {}", load.loaded);
    println!("  failed:  {}", load.failed);
    println!();

    println!("=== ROI (through period {}) ===", report.current_period);
    for row in &report.results {
        println!(
            "  {:<10} | ROI: {:>14.2} | Forecast: {:>14.2} | Savings: {:>12.2}",
            row.period, row.roi, row.forecast, row.raw_numbers.period_savings
        );
    }
    println!();

    println!("=== TRAJECTORY ===");
    match &report.trajectory {
        Trajectory::InsufficientData => println!("  (insufficient data)"),
        Trajectory::Projected { achieved, periods_remaining, savings_rate, .. } => {
            println!("  on target:          {achieved}");
            match periods_remaining {
                Some(n) => println!("  periods remaining:  {n}"),
                None => println!("  periods remaining:  (no positive trend)"),
            }
            println!("  savings rate:       {savings_rate:.2}");
        }
    }
    println!();

    println!("=== ALERTS ===");
    for alert in &report.alerts {
        let tag = match alert.level {
            AlertLevel::Info => "INFO",
            AlertLevel::Success => "OK",
            AlertLevel::Warning => "WARN",
            AlertLevel::Error => "ERROR",
        };
        println!(
            "  [{tag:<5}] {} ({})",
            alert.message,
            alert.timestamp.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
        );
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
