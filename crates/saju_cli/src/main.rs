use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use saju_core::{BirthTimeRange, FourPillarsCalculator, Pillar, SajuConfig, SexagenaryCycle};

#[derive(Parser)]
#[command(name = "saju", about = "Four Pillars (sexagenary calendar) CLI")]
struct Cli {
    /// Config file (default: ./saju.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Debug-level logging
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Errors only
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Four pillars for a local birth date-time, as JSON
    Pillars {
        /// Local date-time (YYYY-MM-DDThh:mm) or date (YYYY-MM-DD, time unknown)
        datetime: String,
        /// Include element and ten-god details per pillar
        #[arg(long)]
        detailed: bool,
    },
    /// List the 60-term sexagenary cycle
    Cycle,
    /// 1-based cycle position of a pillar code (e.g. 甲子)
    Index {
        /// Two-character stem-branch code
        pillar: String,
    },
    /// Solar-term boundary (day, hour, minute) for a month
    SolarTerm {
        /// Gregorian year
        year: i32,
        /// Gregorian month (1-12)
        month: u32,
    },
    /// Two-hour birth-time range containing a time
    TimeRange {
        /// Local time (hh:mm)
        time: String,
    },
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("SAJU_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {e}");
    }
}

fn load_config(path: Option<&PathBuf>) -> SajuConfig {
    let loaded = match path {
        Some(p) => SajuConfig::load_from(p),
        None => SajuConfig::load(),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}");
        std::process::exit(1);
    })
}

fn load_calculator(config: &SajuConfig) -> FourPillarsCalculator {
    FourPillarsCalculator::from_config(config).unwrap_or_else(|e| {
        eprintln!("Failed to load solar-term table: {e}");
        std::process::exit(1);
    })
}

/// Parse "YYYY-MM-DDThh:mm", "YYYY-MM-DD hh:mm", or "YYYY-MM-DD" (midnight).
fn parse_birth(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::default()))
        .map_err(|_| format!("expected YYYY-MM-DDThh:mm or YYYY-MM-DD, got {s}"))
}

/// Parse a pillar code and return it with its 1-based cycle position.
fn cycle_position(code: &str) -> saju_core::Result<(Pillar, usize)> {
    let pillar = code.trim().parse::<Pillar>()?;
    Ok((pillar, SexagenaryCycle::new().index_of(pillar)))
}

fn exit_with(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    let config_path = cli.config.as_ref();

    match cli.command {
        Commands::Pillars { datetime, detailed } => {
            let birth = parse_birth(&datetime).unwrap_or_else(|e| exit_with(e));
            let config = load_config(config_path);
            let calc = load_calculator(&config);
            let result = if detailed || config.detailed {
                calc.calculate_detailed(birth)
            } else {
                calc.calculate(birth)
            };
            tracing::debug!(%birth, detailed, "calculated four pillars");
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{json}"),
                Err(e) => exit_with(format!("Failed to serialize result: {e}")),
            }
        }

        Commands::Cycle => {
            for (i, p) in SexagenaryCycle::new().iter().enumerate() {
                println!(
                    "{:>2}  {}  {}{}",
                    i + 1,
                    p,
                    p.stem().korean(),
                    p.branch().korean()
                );
            }
        }

        Commands::Index { pillar } => match cycle_position(&pillar) {
            Ok((p, index)) => println!("{p} = {index}"),
            Err(e) => exit_with(e),
        },

        Commands::SolarTerm { year, month } => {
            if !(1..=12).contains(&month) {
                exit_with(format!("Invalid month: {month} (1-12)"));
            }
            let calc = load_calculator(&load_config(config_path));
            let table = calc.solar_terms();
            let entry = table.lookup(year, month);
            let source = if table.contains(year, month) {
                "table"
            } else {
                "default"
            };
            println!(
                "{year}-{month:02}: day {} {:02}:{:02} ({source})",
                entry.day, entry.hour, entry.minute
            );
        }

        Commands::TimeRange { time } => {
            let t = NaiveTime::parse_from_str(time.trim(), "%H:%M")
                .unwrap_or_else(|_| exit_with(format!("expected hh:mm, got {time}")));
            match BirthTimeRange::from_time(t) {
                Some(r) => println!("{r} ({})", r.branch().symbol()),
                None => println!("00:00 is read as unknown time"),
            }
        }
    }
}
