use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{Level, info};

use secchi::config::Config;
use secchi::lake::LakeSeries;
use secchi::model::{self, Metrics, Predictor, TreeEnsemble, split_train_validation};
use secchi::pipeline::BatchRunner;

#[derive(Parser)]
#[command(name = "secchi")]
#[command(author, version, about = "Lake clarity features from satellite reflectance", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the feature table
    Build {
        /// JSON configuration file
        #[arg(short, long, default_value = "./data/config/config.json")]
        config: PathBuf,
    },
    /// Apply a trained tree ensemble to the configured lake
    Predict {
        /// JSON configuration file
        #[arg(short, long, default_value = "./data/config/config.json")]
        config: PathBuf,
        /// Tree ensemble dumped as JSON
        #[arg(short, long)]
        model: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Build { config } => {
            let config = Config::from_file(&config)?;
            let output = BatchRunner::new(config)?.run()?;

            println!("{}", output.report);
            if let Some(path) = output.written_to {
                println!("Feature table written to {}", path);
            }
        }
        Commands::Predict {
            config,
            model: model_path,
        } => {
            let config = Config::from_file(&config)?;
            let lake = config
                .lake()
                .cloned()
                .ok_or("No lake configured for prediction")?;
            let validation_fraction = config.validation_fraction();
            let seed = config.boosting().seed;

            let output = BatchRunner::new(config)?.run()?;
            let ensemble = TreeEnsemble::from_file(&model_path)?;
            info!(
                "Loaded {} tree(s), best iteration {:?}, best score {:?}",
                ensemble.n_trees(),
                ensemble.best_iteration(),
                ensemble.best_score()
            );

            let (_, valid) = split_train_validation(&output.features, validation_fraction, seed);
            if !valid.is_empty() {
                println!("Validation: {}", model::evaluate(&ensemble, &valid)?);
            }

            let series = LakeSeries::select(&output.features, &lake);
            println!(
                "{}: {} observation(s)",
                lake.name.as_deref().unwrap_or("Lake"),
                series.len()
            );

            let points = series.predict(&ensemble);
            for point in &points {
                let date = point
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  {}  observed: {:.2} m  predicted: {:.2} m",
                    date, point.observed, point.predicted
                );
            }

            if !points.is_empty() {
                let observed: Vec<f64> = points.iter().map(|p| p.observed).collect();
                let predicted: Vec<f64> = points.iter().map(|p| p.predicted).collect();
                println!("  {}", Metrics::evaluate(&observed, &predicted)?);
            }
        }
    }

    Ok(())
}
