//! `fixtures` subcommand: emit seeded synthetic data as JSON

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::FixtureKind;
use crate::fixtures::{
    generate_feat, get_labels, make_covariances_with_params, seeded, to_rows, CovarianceExport,
};

#[derive(Serialize)]
struct FeatureExport {
    seed: u64,
    features: Vec<Vec<f64>>,
}

#[derive(Serialize)]
struct LabelExport {
    labels: Vec<usize>,
}

/// Generate the requested fixture and write it to `output` or stdout
pub fn run_fixtures(kind: &FixtureKind) -> Result<()> {
    match kind {
        FixtureKind::Covariances {
            n_matrices,
            n_channels,
            with_params,
            seed,
            output,
        } => {
            let mut rng = seeded(*seed);
            let params = make_covariances_with_params(*n_matrices, *n_channels, &mut rng);
            emit(
                &CovarianceExport::new(*seed, &params, *with_params),
                output.as_deref(),
            )
        }
        FixtureKind::Features {
            n_samples,
            n_features,
            seed,
            output,
        } => {
            let mut rng = seeded(*seed);
            let features = generate_feat(*n_samples, *n_features, &mut rng);
            emit(
                &FeatureExport {
                    seed: *seed,
                    features: to_rows(&features),
                },
                output.as_deref(),
            )
        }
        FixtureKind::Labels {
            n_matrices,
            n_classes,
            output,
        } => emit(
            &LabelExport {
                labels: get_labels(*n_matrices, *n_classes),
            },
            output.as_deref(),
        ),
    }
}

fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize fixtures")?;

    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write fixtures to {}", path.display())),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}
