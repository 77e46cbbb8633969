mod config;
mod history;
mod output;

use anyhow::{bail, Context, Result};
use arenarank_core::synthetic::{generate_history, random_strengths};
use arenarank_core::{predict_win_probability, EstimatorOptions, Leaderboard, RatingEstimator};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::ArenarankConfig;
use crate::history::{HistoryFile, HistoryRecord};

#[derive(Parser)]
#[command(name = "arenarank", version, about = "Bradley-Terry leaderboards from head-to-head match histories")]
struct Cli {
    /// Path to config file (default: ~/.config/arenarank/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logs on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fit ratings and print the leaderboard
    Rate(RateArgs),
    /// Fit ratings and print the probability that one model beats another
    Predict(PredictArgs),
    /// List categories in a history file with their match counts
    Categories {
        /// JSON history file
        #[arg(long)]
        history: PathBuf,
    },
    /// Write a synthetic history drawn from random ground-truth strengths
    Simulate(SimulateArgs),
    /// Create a default config file
    Init,
}

#[derive(clap::Args)]
struct FitArgs {
    /// JSON history file: {"models": [...], "matches": [{"a", "b", "result", "category"?}]}
    #[arg(long)]
    history: PathBuf,

    /// Only use matches tagged with this category
    #[arg(long)]
    category: Option<String>,

    /// Maximum Bradley-Terry sweeps
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Convergence threshold on the largest strength change per sweep
    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(clap::Args)]
struct RateArgs {
    #[command(flatten)]
    fit: FitArgs,

    /// Number of leaderboard rows to print
    #[arg(long)]
    limit: Option<usize>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct PredictArgs {
    #[command(flatten)]
    fit: FitArgs,

    /// First model id
    a: String,

    /// Second model id
    b: String,
}

#[derive(clap::Args)]
struct SimulateArgs {
    /// Number of models in the roster
    #[arg(long, default_value_t = 8)]
    models: usize,

    /// Number of matches to draw
    #[arg(long, default_value_t = 500)]
    matches: usize,

    /// Probability that a match is a tie
    #[arg(long, default_value_t = 0.1)]
    tie_rate: f64,

    /// RNG seed for a reproducible history
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated categories assigned uniformly to matches
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,

    /// Output path (default: stdout)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    // only commands that read or write the config need HOME
    let config_path = || match &cli.config {
        Some(path) => Ok(path.clone()),
        None => config::config_path(),
    };

    match cli.command {
        Commands::Rate(args) => {
            let cfg = config::load_config(&config_path()?)?;
            run_rate(args, &cfg)
        }
        Commands::Predict(args) => {
            let cfg = config::load_config(&config_path()?)?;
            run_predict(args, &cfg)
        }
        Commands::Categories { history: path } => run_categories(&path),
        Commands::Simulate(args) => run_simulate(args),
        Commands::Init => {
            let config_path = config_path()?;
            config::create_default_config(&config_path)?;
            println!("Created config at {}", config_path.display());
            println!("Edit it to set default iteration limits and leaderboard size.");
            Ok(())
        }
    }
}

/// CLI flags win over the config file, which wins over built-in defaults.
fn resolve_options(args: &FitArgs, cfg: &ArenarankConfig) -> EstimatorOptions {
    let defaults = EstimatorOptions::default();
    EstimatorOptions {
        max_iterations: args
            .max_iterations
            .or(cfg.max_iterations)
            .unwrap_or(defaults.max_iterations),
        convergence_threshold: args
            .threshold
            .or(cfg.convergence_threshold)
            .unwrap_or(defaults.convergence_threshold),
    }
}

fn build_estimator(args: &FitArgs, cfg: &ArenarankConfig) -> Result<RatingEstimator> {
    let history = history::load_history(&args.history)?;
    let outcomes = history.outcomes(args.category.as_deref());

    if let Some(ref category) = args.category {
        if outcomes.is_empty() {
            bail!("No matches tagged with category \"{category}\" in {}", args.history.display());
        }
    }

    let options = resolve_options(args, cfg);
    debug!(
        models = history.models.len(),
        matches = outcomes.len(),
        max_iterations = options.max_iterations,
        threshold = options.convergence_threshold,
        "loaded history"
    );

    RatingEstimator::with_options(&history.models, &outcomes, options)
        .with_context(|| format!("Invalid history in {}", args.history.display()))
}

fn run_rate(args: RateArgs, cfg: &ArenarankConfig) -> Result<()> {
    let estimator = build_estimator(&args.fit, cfg)?;
    let limit = args.limit.or(cfg.limit);
    let leaderboard = Leaderboard::from_estimator(&estimator, limit);

    if !leaderboard.converged {
        warn!(
            iterations = leaderboard.iterations,
            "ratings did not converge; consider raising --max-iterations"
        );
    }

    let category = args.fit.category.as_deref();
    if args.json {
        output::print_json(&leaderboard, category)
    } else {
        output::print_table(&leaderboard, category);
        Ok(())
    }
}

fn run_predict(args: PredictArgs, cfg: &ArenarankConfig) -> Result<()> {
    let estimator = build_estimator(&args.fit, cfg)?;
    let fit = estimator.estimate();

    if !fit.converged {
        warn!(iterations = fit.iterations, "ratings did not converge");
    }

    let probability = predict_win_probability(&fit.ratings, &args.a, &args.b)?;
    println!(
        "P({} beats {}) = {:.3}  ({} vs {})",
        args.a, args.b, probability, fit.ratings[&args.a], fit.ratings[&args.b],
    );
    Ok(())
}

fn run_categories(path: &std::path::Path) -> Result<()> {
    let history = history::load_history(path)?;
    let counts = history.category_counts();

    if counts.is_empty() {
        println!("No categorized matches in {}", path.display());
        return Ok(());
    }
    for (category, count) in counts {
        println!("{category:<20} {count:>6} matches");
    }
    Ok(())
}

fn run_simulate(args: SimulateArgs) -> Result<()> {
    if args.models < 2 {
        bail!("Need at least 2 models to simulate, got {}", args.models);
    }
    if !(0.0..=1.0).contains(&args.tie_rate) {
        bail!("--tie-rate must be between 0.0 and 1.0, got {}", args.tie_rate);
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let models: Vec<String> = (1..=args.models).map(|i| format!("model-{i}")).collect();
    let strengths = random_strengths(&mut rng, models.len());
    for (model, strength) in models.iter().zip(&strengths) {
        debug!(model = %model, strength, "ground truth");
    }

    let outcomes = generate_history(&mut rng, &models, &strengths, args.matches, args.tie_rate);
    let matches = outcomes
        .into_iter()
        .map(|outcome| {
            let category = if args.categories.is_empty() {
                None
            } else {
                Some(args.categories[rng.random_range(0..args.categories.len())].clone())
            };
            HistoryRecord { outcome, category }
        })
        .collect();

    let file = HistoryFile { models, matches };
    let json = serde_json::to_string_pretty(&file)?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), matches = args.matches, "wrote synthetic history");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit_args(max_iterations: Option<usize>, threshold: Option<f64>) -> FitArgs {
        FitArgs {
            history: PathBuf::from("history.json"),
            category: None,
            max_iterations,
            threshold,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let cfg = ArenarankConfig {
            max_iterations: Some(50),
            convergence_threshold: Some(1e-3),
            limit: None,
        };
        let options = resolve_options(&fit_args(Some(10), None), &cfg);
        assert_eq!(options.max_iterations, 10);
        assert_eq!(options.convergence_threshold, 1e-3);
    }

    #[test]
    fn test_defaults_when_unset() {
        let options = resolve_options(&fit_args(None, None), &ArenarankConfig::default());
        assert_eq!(options, EstimatorOptions::default());
    }

    #[test]
    fn test_cli_parses_rate_command() {
        let cli = Cli::try_parse_from([
            "arenarank", "rate", "--history", "h.json", "--category", "admet", "--limit", "5", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Rate(args) => {
                assert_eq!(args.fit.category.as_deref(), Some("admet"));
                assert_eq!(args.limit, Some(5));
                assert!(args.json);
            }
            _ => panic!("expected rate"),
        }
    }
}
