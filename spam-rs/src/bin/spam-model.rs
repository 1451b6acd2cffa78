//! CLI tool for training and querying the spam classifier
//!
//! # Usage
//!
//! ```bash
//! # Train on the default dataset and write both artifacts
//! spam-model train --dataset data/SMSSpamCollection
//!
//! # Classify a single message with the saved artifacts
//! spam-model classify "You win a free prize now"
//! ```

use clap::{Parser, Subcommand};
use spam_rs::{Predictor, SpamConfig, Trainer};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spam-model")]
#[command(about = "Train and query the spam classifier", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Vectorizer artifact path
    #[arg(long, global = true)]
    vectorizer: Option<PathBuf>,

    /// Classifier artifact path
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit the vectorizer and classifier, evaluate, and save both
    Train {
        /// Tab-separated label/message file
        #[arg(short, long)]
        dataset: Option<PathBuf>,
        /// Fraction of rows held out for evaluation
        #[arg(long)]
        test_size: Option<f64>,
        /// Split seed
        #[arg(long)]
        seed: Option<u64>,
        /// Smoothing constant
        #[arg(long)]
        alpha: Option<f64>,
    },
    /// Classify a message with the saved artifacts
    Classify {
        /// Message text
        message: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spam_rs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            SpamConfig::from_file(path)?
        }
        None => SpamConfig::default(),
    };
    if let Some(path) = cli.vectorizer {
        config.artifacts.vectorizer_path = path;
    }
    if let Some(path) = cli.model {
        config.artifacts.model_path = path;
    }

    match cli.command {
        Commands::Train {
            dataset,
            test_size,
            seed,
            alpha,
        } => {
            if let Some(path) = dataset {
                config.dataset.path = path;
            }
            if let Some(test_size) = test_size {
                config.training.test_size = test_size;
            }
            if let Some(seed) = seed {
                config.training.seed = seed;
            }
            if let Some(alpha) = alpha {
                config.training.alpha = alpha;
            }

            let outcome = Trainer::new(config).run()?;
            println!("Accuracy: {:.4}", outcome.report.accuracy);
            println!("\nClassification Report:");
            println!("{}", outcome.report);
        }
        Commands::Classify { message } => {
            let predictor = Predictor::load(&config.artifacts);
            let result = predictor.classify(&message)?;
            println!("{} ({:.2}%)", result.display_label(), result.percent());
        }
    }

    Ok(())
}
