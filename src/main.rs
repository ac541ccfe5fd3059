//! City Royale - Entry Point
//!
//! Loads the reference data, runs a country or world royale and reports the
//! result on the console and, optionally, in a report file.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use city_royale::core::error::Result;
use city_royale::core::RoyaleConfig;
use city_royale::data::{FileReportSink, StdoutSink, WorldData};
use city_royale::royale::{run_until_winner, CompositionStrategy, RoyaleOutcome, RoyaleRunner, RunOptions};

/// City Royale - there can only be one luckiest city
#[derive(Parser, Debug)]
#[command(name = "city-royale")]
#[command(about = "Eliminate one random city per day until a single winner remains")]
struct Args {
    /// TOML config file (defaults apply when absent)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// First draw day, YYYY-MM-DD (today when absent)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Write a report file under the configured logs directory
    #[arg(long)]
    save: bool,

    /// Do not print the run's log lines
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw among the cities of one country
    Country {
        /// Country name (case-insensitive)
        #[arg(long)]
        country: Option<String>,

        /// City to follow through the draw
        #[arg(long)]
        track: Option<String>,
    },
    /// Draw among the cities of the whole world
    Global {
        /// City to follow through the draw
        #[arg(long)]
        track: Option<String>,

        /// Pool every city directly instead of crowning country winners first
        #[arg(long)]
        sequential: bool,
    },
    /// Repeat a country royale until the tracked city wins
    UntilWin {
        /// Country name (case-insensitive)
        #[arg(long)]
        country: Option<String>,

        /// City that has to win
        #[arg(long)]
        track: Option<String>,

        /// Give up after this many attempts
        #[arg(long)]
        threshold: Option<u32>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RoyaleConfig::load(path)?,
        None => RoyaleConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("City Royale starting (seed {})", seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let data = WorldData::load(&config.countries_path, &config.cities_path)?;
    let reports = FileReportSink::new(&config.logs_dir);
    let console = StdoutSink;

    let options = RunOptions {
        save_to_file: args.save || config.save_to_file,
        print_to_console: !args.quiet && config.print_to_console,
    };
    let runner = RoyaleRunner::new(&data, &reports, &console).with_options(options);

    match args.command {
        Command::Country { country, track } => {
            let country = country.unwrap_or_else(|| config.default_country.clone());
            let track = track.unwrap_or_else(|| config.default_tracked_city.clone());

            let outcome = runner.run_country(args.date, &country, Some(&track), &mut rng)?;
            print_summary(&outcome, args.json);
        }
        Command::Global { track, sequential } => {
            let track = track.unwrap_or_else(|| config.default_tracked_city.clone());
            let strategy = CompositionStrategy::from_simultaneous(!sequential);

            let outcome = runner.run_global(args.date, Some(&track), strategy, &mut rng)?;
            print_summary(&outcome, args.json);
        }
        Command::UntilWin { country, track, threshold } => {
            let country = country.unwrap_or_else(|| config.default_country.clone());
            let track = track.unwrap_or_else(|| config.default_tracked_city.clone());

            let retry = run_until_winner(&runner, &country, &track, threshold, seed)?;
            match &retry.winning {
                Some(outcome) => {
                    println!("{} won after {} attempts!", track, retry.attempts);
                    println!("Winning result details:");
                    println!("{}", outcome.logs.join("\n"));
                    print_summary(outcome, args.json);
                }
                None => println!("After {} attempts, {} did not win.", retry.attempts, track),
            }
        }
    }

    Ok(())
}

fn print_summary(outcome: &RoyaleOutcome, json: bool) {
    if !json {
        return;
    }
    match &outcome.summary {
        Some(summary) => println!("{}", summary.to_json()),
        None => println!("{{}}"),
    }
}
