//! Skirmish -- simulate a grid combat and search for a flawless attack power.
//!
//! Usage:
//!   skirmish [OPTIONS] <GRID_FILE | ->
//!
//! Options:
//!   --config FILE      JSON configuration (see `SimConfig`)
//!   --elf-attack N     Elf attack power for the plain combat (default: 3)
//!   --goblin-attack N  Goblin attack power for the plain combat (default: 3)
//!   --protect F        Faction whose attack power is searched (default: elf)
//!   --start N          First attack power the search tries (default: 4)
//!   --threads N        Parallel search threads (default: 1)
//!   --max-rounds N     Give up on a combat after N rounds
//!   --no-search        Only run the plain combat
//!   --json             Print the results as one JSON object
//!   --trace            Log the board after every round
//!   --verbose          Enable debug logging
//!   --help             Show this help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use serde::Serialize;
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

use skirmish::combat::{Combat, Outcome, Verdict};
use skirmish::config::SimConfig;
use skirmish::protocol::{parse_grid, render_board};
use skirmish::search::SearchResult;

/// Parsed command-line options.
struct Args {
    grid: String,
    config: SimConfig,
    search: bool,
    json: bool,
    trace: bool,
    verbose: bool,
}

/// Results printed by `--json`.
#[derive(Serialize)]
struct Report {
    combat: Outcome,
    search: Option<SearchResult>,
}

fn main() {
    let args = match parse_args(std::env::args().skip(1).collect()) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            process::exit(2);
        }
    };

    init_logging(args.verbose, args.trace);

    if let Err(msg) = run(&args) {
        eprintln!("error: {}", msg);
        process::exit(1);
    }
}

fn init_logging(verbose: bool, trace: bool) {
    let default = if trace {
        "skirmish=trace"
    } else if verbose {
        "skirmish=debug"
    } else {
        "skirmish=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), String> {
    let text = read_grid(&args.grid)?;
    let scenario = parse_grid(&text).map_err(|e| format!("bad grid: {}", e))?;
    let config = &args.config;
    info!(
        width = scenario.terrain.width(),
        height = scenario.terrain.height(),
        units = scenario.placements.len(),
        "grid loaded"
    );

    let board = scenario
        .deploy(&config.armament())
        .map_err(|e| format!("bad grid: {}", e))?;
    let mut combat = Combat::new(board).with_round_limit(config.max_rounds);
    let verdict = combat
        .run_with(|board, _| {
            if args.trace {
                trace!("\n{}", render_board(board));
            }
        })
        .map_err(|e| e.to_string())?;
    let outcome = match verdict {
        Verdict::Finished(outcome) => outcome,
        Verdict::Aborted { .. } => return Err("combat aborted without a protected faction".into()),
    };

    let search = if args.search {
        Some(
            config
                .power_search(&scenario)
                .run_parallel(config.search_threads)
                .map_err(|e| e.to_string())?,
        )
    } else {
        None
    };

    if args.json {
        let report = Report {
            combat: outcome,
            search,
        };
        let json = serde_json::to_string(&report).map_err(|e| e.to_string())?;
        println!("{}", json);
    } else {
        println!(
            "combat outcome {} ({} rounds x {} hit points, {} victory)",
            outcome.score,
            outcome.rounds,
            outcome.hit_points,
            outcome.winner.name()
        );
        if let Some(found) = search {
            println!(
                "minimal {} attack power {}, outcome {} ({} rounds x {} hit points)",
                config.protected.name(),
                found.attack_power,
                found.outcome.score,
                found.outcome.rounds,
                found.outcome.hit_points
            );
        }
    }
    Ok(())
}

fn read_grid(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        Ok(text)
    } else {
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path, e))
    }
}

/// Returns `Ok(None)` when help was requested.
fn parse_args(args: Vec<String>) -> Result<Option<Args>, String> {
    let mut grid = None;
    let mut config_path: Option<PathBuf> = None;
    let mut overrides: Vec<(String, String)> = Vec::new();
    let mut search = true;
    let mut json = false;
    let mut trace = false;
    let mut verbose = false;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config needs a value")?;
                config_path = Some(PathBuf::from(value));
            }
            "--elf-attack" | "--goblin-attack" | "--protect" | "--start" | "--threads"
            | "--max-rounds" => {
                let value = iter.next().ok_or(format!("{} needs a value", arg))?;
                overrides.push((arg.clone(), value));
            }
            "--no-search" => search = false,
            "--json" => json = true,
            "--trace" => trace = true,
            "--verbose" => verbose = true,
            "--help" | "-h" => return Ok(None),
            other if other.starts_with("--") => return Err(format!("Unknown argument: {}", other)),
            other => {
                if grid.replace(other.to_string()).is_some() {
                    return Err("only one grid file may be given".into());
                }
            }
        }
    }

    let mut config = match config_path {
        Some(path) => SimConfig::load(&path).map_err(|e| e.to_string())?,
        None => SimConfig::default(),
    };

    for (flag, value) in overrides {
        let bad = |e: &dyn std::fmt::Display| format!("invalid {} value '{}': {}", flag, value, e);
        match flag.as_str() {
            "--elf-attack" => config.elf_attack = value.parse().map_err(|e| bad(&e))?,
            "--goblin-attack" => config.goblin_attack = value.parse().map_err(|e| bad(&e))?,
            "--protect" => config.protected = value.parse().map_err(|e| bad(&e))?,
            "--start" => config.search_start = Some(value.parse().map_err(|e| bad(&e))?),
            "--threads" => config.search_threads = value.parse().map_err(|e| bad(&e))?,
            "--max-rounds" => config.max_rounds = Some(value.parse().map_err(|e| bad(&e))?),
            _ => unreachable!("flag list above"),
        }
    }
    config.validate().map_err(|e| e.to_string())?;

    let grid = grid.ok_or("missing grid file (use - for stdin)")?;
    Ok(Some(Args {
        grid,
        config,
        search,
        json,
        trace,
        verbose,
    }))
}

fn print_usage() {
    eprintln!("Usage: skirmish [OPTIONS] <GRID_FILE | ->");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE      JSON configuration file");
    eprintln!("  --elf-attack N     Elf attack power for the plain combat (default: 3)");
    eprintln!("  --goblin-attack N  Goblin attack power for the plain combat (default: 3)");
    eprintln!("  --protect F        Faction whose attack power is searched (default: elf)");
    eprintln!("  --start N          First attack power the search tries (default: 4)");
    eprintln!("  --threads N        Parallel search threads (default: 1)");
    eprintln!("  --max-rounds N     Give up on a combat after N rounds");
    eprintln!("  --no-search        Only run the plain combat");
    eprintln!("  --json             Print the results as one JSON object");
    eprintln!("  --trace            Log the board after every round");
    eprintln!("  --verbose          Enable debug logging");
    eprintln!("  --help             Show this help");
}
