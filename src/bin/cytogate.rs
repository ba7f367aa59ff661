//! cytogate - Flow-cytometry preprocessing CLI
//!
//! Cuts per-stage training subsets out of an event table and its gate
//! annotations, and reports the class balance of every stage label.
//!
//! Usage:
//!   cytogate events.csv gates.csv --sample 10000
//!   cytogate events.csv gates.csv --sample 10000 --seed 42 --json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use cytogate::diagnostics::{diagnose, ImbalanceReport};
use cytogate::labels::HierarchicalLabelDeriver;
use cytogate::preprocess::StagePreprocessor;
use cytogate::Result;

/// cytogate - flow-cytometry training-data preparation
#[derive(Parser)]
#[command(name = "cytogate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the event feature table (CSV export)
    #[arg(value_name = "FEATURES")]
    features: PathBuf,

    /// Path to the gate annotation table (CSV)
    #[arg(value_name = "ANNOTATIONS")]
    annotations: PathBuf,

    /// Number of events to downsample for the first stage
    #[arg(short = 'n', long, default_value_t = 10_000)]
    sample: usize,

    /// Random seed for reproducible downsampling
    #[arg(long)]
    seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct StageSummary {
    stage: String,
    rows: usize,
    cols: usize,
    imbalance: ImbalanceReport,
}

#[derive(Serialize)]
struct RunSummary {
    stages: Vec<StageSummary>,
    class_counts: BTreeMap<String, usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            if cli.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Failed to serialize summary: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_summary(&summary);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("An error occurred during preprocessing: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RunSummary> {
    let mut preprocessor = StagePreprocessor::from_csv(&cli.features, &cli.annotations);
    if let Some(seed) = cli.seed {
        preprocessor = preprocessor.with_random_state(seed);
    }

    let stage_names: Vec<String> = preprocessor
        .hierarchy()
        .stages()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut stages = Vec::with_capacity(stage_names.len());
    for (position, stage) in stage_names.iter().enumerate() {
        let subset = if position == 0 {
            preprocessor.initial_subset(cli.sample)?
        } else {
            preprocessor.stage_subset(stage)?
        };
        let (rows, cols) = subset.shape();
        stages.push(StageSummary {
            stage: stage.clone(),
            rows,
            cols,
            imbalance: diagnose(&subset.labels),
        });
    }

    let gates = preprocessor
        .gates()
        .ok_or("Annotation table not loaded")?;
    let classes = HierarchicalLabelDeriver::default().derive_classes(gates)?;
    let mut class_counts = BTreeMap::new();
    for class in classes {
        *class_counts.entry(class.as_str().to_string()).or_insert(0) += 1;
    }

    Ok(RunSummary {
        stages,
        class_counts,
    })
}

fn print_summary(summary: &RunSummary) {
    for stage in &summary.stages {
        println!(
            "{} data shape: ({}, {})",
            stage.stage, stage.rows, stage.cols
        );
        println!("  {}", stage.imbalance.advice());
    }
    println!("Combined class distribution:");
    for (class, count) in &summary.class_counts {
        println!("  {class}: {count}");
    }
}
