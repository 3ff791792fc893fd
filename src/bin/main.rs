use anyhow::{Context, Result};
use bayes_core::Model;
use log::info;
use std::env;
use std::io::{self, Write};

const DEFAULT_DATASET: &str = "Diseases_Symptoms_Updated.csv";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dataset = env::args().nth(1).unwrap_or_else(|| DEFAULT_DATASET.to_string());
    let model = Model::from_csv_path(&dataset)?;
    info!(
        "trained on {} rows covering {} diseases from {}",
        model.total_cases(),
        model.num_diseases(),
        dataset
    );

    print!("\nEnter symptoms (comma-separated, e.g., palpitations, sweating): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read symptoms from stdin")?;

    // Tokens left empty by trimming are dropped, so a blank line asks for the
    // prior-only ranking.
    let symptoms: Vec<String> = line
        .split(',')
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect();

    println!("\nTop 5 Predicted Diseases:");
    for prediction in model.predict(&symptoms) {
        let treatment = prediction
            .treatment
            .as_deref()
            .unwrap_or("No treatment data available");
        println!(
            "{}: {:.2}% | Treatment: {}",
            prediction.disease,
            prediction.score * 100.0,
            treatment
        );
    }

    Ok(())
}
