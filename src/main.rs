use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rank_delta::scoring::{BandTable, Outcome, RankingValue};
use rank_delta::{config, debug_eprintln, output, scoring, tui};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive calculator screen (default if no subcommand)
    Tui,
    /// Work out the points for one match
    Calc {
        /// Your ranking (0-9999)
        my_ranking: String,
        /// Opponent's ranking (0-9999)
        opponent_ranking: String,
        /// Match outcome: won or lost
        outcome: Outcome,
        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check a ranking the way the input field does
    Validate {
        /// Raw text as typed
        #[arg(allow_hyphen_values = true)]
        raw: String,
        /// Previously accepted value, kept when RAW is rejected
        #[arg(short, long, default_value = "")]
        previous: String,
        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the points table in use
    Table {
        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "rank-delta")]
#[command(about = "Ranking points calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/rank-delta/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    rank_delta::diagnostics::set_verbose(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Tui);
    let config_path = cli.config.map(PathBuf::from);

    // Init writes the config, so it must not require a valid one
    if let Commands::Init = command {
        if let Err(e) = config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = scoring::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let table = match config.band_table() {
        Ok(t) => t,
        Err(errors) => {
            for error in errors {
                eprintln!("Config error: {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    };

    debug_eprintln!(
        "Using {} points table with {} bands",
        if config.bands.is_some() { "configured" } else { "standard" },
        table.len()
    );

    let code = match command {
        Commands::Tui => run_tui(&config, table).await,
        Commands::Calc {
            my_ranking,
            opponent_ranking,
            outcome,
            json,
        } => run_calc(&table, &my_ranking, &opponent_ranking, outcome, json, cli.verbose),
        Commands::Validate {
            raw,
            previous,
            json,
        } => run_validate(&raw, &previous, json),
        Commands::Table { tsv } => {
            if tsv {
                println!("{}", output::format_tsv(&table));
            } else {
                println!(
                    "{}",
                    output::format_band_table(&table, None, output::should_use_colors())
                );
            }
            EXIT_SUCCESS
        }
        Commands::Init => unreachable!("handled before config load"),
    };

    std::process::exit(code);
}

async fn run_tui(config: &config::Config, table: BandTable) -> i32 {
    // Theme detection talks to the terminal, so it has to happen before the TUI starts
    let theme = tui::resolve_theme(config.theme);
    debug_eprintln!("Theme: {:?}", theme);

    let app = tui::App::new(table, theme.colors(), config.flash_duration());
    match tui::run_tui(app).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Terminal error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

fn run_calc(
    table: &BandTable,
    my_raw: &str,
    opponent_raw: &str,
    outcome: Outcome,
    json: bool,
    verbose: bool,
) -> i32 {
    let my_ranking = match RankingValue::parse(my_raw) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Your ranking '{}': {}", my_raw, e);
            return EXIT_INPUT;
        }
    };
    let opponent_ranking = match RankingValue::parse(opponent_raw) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Opponent ranking '{}': {}", opponent_raw, e);
            return EXIT_INPUT;
        }
    };

    let resolution =
        match scoring::resolve_detailed(table, &my_ranking, &opponent_ranking, outcome) {
            Some(r) => r,
            None => {
                eprintln!("Both rankings and an outcome (won or lost) are required.");
                return EXIT_INPUT;
            }
        };

    if json {
        match output::format_json(&output::CalcReport::from(&resolution)) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                return EXIT_FAILURE;
            }
        }
        return EXIT_SUCCESS;
    }

    let use_colors = output::should_use_colors();
    println!("{}", output::format_result(&resolution.result, use_colors));
    if verbose {
        println!("{}", output::format_breakdown(&resolution, use_colors));
    }
    EXIT_SUCCESS
}

fn run_validate(raw: &str, previous_raw: &str, json: bool) -> i32 {
    let previous = match RankingValue::parse(previous_raw) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Previous value '{}': {}", previous_raw, e);
            return EXIT_INPUT;
        }
    };

    let result = scoring::validate(raw, &previous);

    if json {
        match output::format_json(&output::ValidationReport::from(&result)) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                return EXIT_FAILURE;
            }
        }
    } else {
        println!(
            "{}",
            output::format_validation(&result, output::should_use_colors())
        );
    }

    if result.is_accepted() {
        EXIT_SUCCESS
    } else {
        EXIT_INPUT
    }
}
