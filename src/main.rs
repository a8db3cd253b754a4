//! Mark Six prediction CLI
//!
//! Thin shell around the prediction core: loads a draw-history file,
//! drives predict / validate / backtest, and prints the validation report.

use anyhow::Context;
use clap::{Parser, Subcommand};
use marksix_predictor::{
    config::AppConfig,
    engine::{weights::WeightConfig, PredictionEngine},
    types::{DrawResult, HistoricalDataset, PredictionResult},
    validation,
};
use std::fs;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "marksix-predictor")]
#[command(about = "Lottery draw prediction engine with adaptive weight feedback")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the next draw from the configured history file
    Predict {
        /// Write the prediction JSON here instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
    /// Validate a stored prediction against the latest recorded draw
    Validate {
        /// Prediction JSON produced by `predict`
        prediction: String,
    },
    /// Replay recent history: predict each draw from its predecessors and
    /// feed every outcome back into the weights
    Backtest {
        /// Number of most recent draws to replay
        #[arg(short, long, default_value = "20")]
        window: usize,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    let dataset = load_history(&config)?;
    let engine = build_engine(&config)?;

    match cli.command {
        Commands::Predict { output } => predict(&engine, &dataset, output),
        Commands::Validate { prediction } => validate(&config, &engine, &dataset, &prediction),
        Commands::Backtest { window } => backtest(&engine, &dataset, window),
    }
}

fn load_history(config: &AppConfig) -> anyhow::Result<HistoricalDataset> {
    let raw = fs::read_to_string(&config.history_file)
        .with_context(|| format!("reading draw history from {}", config.history_file))?;
    let draws: Vec<DrawResult> =
        serde_json::from_str(&raw).context("parsing draw history JSON")?;
    let dataset = HistoricalDataset::new(config.variant, draws)
        .context("draw history failed integrity checks")?;
    tracing::info!(
        variant = %config.variant,
        draws = dataset.len(),
        "loaded draw history"
    );
    Ok(dataset)
}

fn build_engine(config: &AppConfig) -> anyhow::Result<PredictionEngine> {
    let weights = match &config.weights_file {
        Some(path) if Path::new(path).exists() => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading weights from {path}"))?;
            serde_json::from_str::<WeightConfig>(&raw).context("parsing weights JSON")?
        }
        _ => WeightConfig::balanced(),
    };
    Ok(PredictionEngine::with_weights(config.variant, weights))
}

fn save_weights(config: &AppConfig, engine: &PredictionEngine) -> anyhow::Result<()> {
    if let Some(path) = &config.weights_file {
        let json = serde_json::to_string_pretty(&engine.current_weights())?;
        fs::write(path, json).with_context(|| format!("writing weights to {path}"))?;
        tracing::info!(path, "weights saved");
    }
    Ok(())
}

fn predict(
    engine: &PredictionEngine,
    dataset: &HistoricalDataset,
    output: Option<String>,
) -> anyhow::Result<()> {
    let prediction = engine.predict_next_draw(dataset)?;
    let json = serde_json::to_string_pretty(&prediction)?;

    match output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("writing prediction to {path}"))?;
            tracing::info!(path, confidence = prediction.confidence, "prediction saved");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn validate(
    config: &AppConfig,
    engine: &PredictionEngine,
    dataset: &HistoricalDataset,
    prediction_path: &str,
) -> anyhow::Result<()> {
    let raw = fs::read_to_string(prediction_path)
        .with_context(|| format!("reading prediction from {prediction_path}"))?;
    let prediction: PredictionResult =
        serde_json::from_str(&raw).context("parsing prediction JSON")?;

    let actual = dataset
        .draws()
        .last()
        .context("draw history is empty, nothing to validate against")?;

    let result = engine.validate_and_update_weights(&prediction, actual)?;
    println!("{}", validation::render_report(&result));
    save_weights(config, engine)
}

fn backtest(
    engine: &PredictionEngine,
    dataset: &HistoricalDataset,
    window: usize,
) -> anyhow::Result<()> {
    let total = dataset.len();
    anyhow::ensure!(total >= 2, "backtest needs at least 2 recorded draws");

    let start = total.saturating_sub(window).max(1);
    let mut accuracy_sum = 0.0;
    let mut cycles = 0usize;

    for i in start..total {
        let prefix = HistoricalDataset::new(
            dataset.variant(),
            dataset.draws()[..i].to_vec(),
        )?;
        let prediction = engine.predict_next_draw(&prefix)?;
        let actual = &dataset.draws()[i];
        let result = engine.validate_and_update_weights(&prediction, actual)?;

        tracing::info!(
            draw_time = %actual.draw_time,
            hits = result.hit_count,
            special = result.special_hit,
            accuracy = result.accuracy,
            confidence = prediction.confidence,
            "backtest cycle"
        );
        accuracy_sum += result.accuracy;
        cycles += 1;
    }

    println!("backtest cycles: {cycles}");
    println!("average accuracy: {:.4}", accuracy_sum / cycles as f64);
    println!("final weights:");
    let weights = engine.current_weights();
    for dim in marksix_predictor::engine::weights::Dimension::ALL {
        println!("  {:<12} {:.4}", dim.name(), weights.weight(dim));
    }
    Ok(())
}
