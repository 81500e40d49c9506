//! Synthetic data generators for tests
//!
//! Seeded generators for covariance matrices, class labels and feature
//! matrices, plus [`Requirement`] for skipping tests whose optional
//! capability was not compiled in.

use faer::Mat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::Serialize;

/// Seed shared by every fixture generator
pub const DEFAULT_SEED: u64 = 1234;

/// Mean of the generated eigenvalues
const EVALS_MEAN: f64 = 2.0;
/// Standard deviation of the generated eigenvalues
const EVALS_STD: f64 = 0.1;

/// Fresh random state with the default seed
pub fn rndstate() -> StdRng {
    seeded(DEFAULT_SEED)
}

/// Fresh random state with an explicit seed
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Covariance matrices together with the parameters that generated them
#[derive(Debug, Clone)]
pub struct CovarianceParams {
    pub covmats: Vec<Mat<f64>>,
    /// One row of eigenvalues per matrix (`n_matrices x n_channels`)
    pub evals: Mat<f64>,
    /// Shared eigenvector basis (`n_channels x n_channels`), unit-norm rows
    pub evecs: Mat<f64>,
}

/// Generate `n_matrices` symmetric positive definite `n_channels x n_channels`
/// matrices.
pub fn make_covariances(n_matrices: usize, n_channels: usize, rng: &mut StdRng) -> Vec<Mat<f64>> {
    make_covariances_with_params(n_matrices, n_channels, rng).covmats
}

/// Generate covariance matrices and return their eigen-parameters.
///
/// Each matrix is `V * diag(l_i) * V^T` where `V` has rows drawn from
/// `[-1, 1]` and scaled to unit length, and `l_i = |2.0 + 0.1 * N(0, 1)|`.
pub fn make_covariances_with_params(
    n_matrices: usize,
    n_channels: usize,
    rng: &mut StdRng,
) -> CovarianceParams {
    let evals = Mat::from_fn(n_matrices, n_channels, |_, _| {
        let z: f64 = rng.sample(StandardNormal);
        (EVALS_MEAN + EVALS_STD * z).abs()
    });

    let mut evecs = Mat::from_fn(n_channels, n_channels, |_, _| 2.0 * rng.gen::<f64>() - 1.0);
    for i in 0..n_channels {
        let norm = (0..n_channels)
            .map(|j| evecs[(i, j)] * evecs[(i, j)])
            .sum::<f64>()
            .sqrt();
        for j in 0..n_channels {
            evecs[(i, j)] /= norm;
        }
    }

    let covmats = (0..n_matrices)
        .map(|m| {
            let scaled = Mat::from_fn(n_channels, n_channels, |i, k| evecs[(i, k)] * evals[(m, k)]);
            scaled.as_ref() * evecs.transpose()
        })
        .collect();

    CovarianceParams {
        covmats,
        evals,
        evecs,
    }
}

/// Class labels `0..n_classes`, each repeated `n_matrices / n_classes` times
pub fn get_labels(n_matrices: usize, n_classes: usize) -> Vec<usize> {
    if n_classes == 0 {
        return Vec::new();
    }
    let per_class = n_matrices / n_classes;
    (0..n_classes)
        .flat_map(|class| std::iter::repeat(class).take(per_class))
        .collect()
}

/// `n_samples x n_features` matrix of standard normal draws
pub fn generate_feat(n_samples: usize, n_features: usize, rng: &mut StdRng) -> Mat<f64> {
    Mat::from_fn(n_samples, n_features, |_, _| rng.sample(StandardNormal))
}

/// Row-major copy of a matrix, for JSON export
pub fn to_rows(mat: &Mat<f64>) -> Vec<Vec<f64>> {
    (0..mat.nrows())
        .map(|i| (0..mat.ncols()).map(|j| mat[(i, j)]).collect())
        .collect()
}

/// JSON shape of a covariance fixture set
#[derive(Debug, Clone, Serialize)]
pub struct CovarianceExport {
    pub seed: u64,
    pub covmats: Vec<Vec<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evals: Option<Vec<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evecs: Option<Vec<Vec<f64>>>,
}

impl CovarianceExport {
    pub fn new(seed: u64, params: &CovarianceParams, with_params: bool) -> Self {
        Self {
            seed,
            covmats: params.covmats.iter().map(to_rows).collect(),
            evals: with_params.then(|| to_rows(&params.evals)),
            evecs: with_params.then(|| to_rows(&params.evecs)),
        }
    }
}

/// An optional capability a test depends on, named after its cargo feature
#[derive(Debug, Clone, Copy)]
pub struct Requirement {
    pub name: &'static str,
    pub available: bool,
}

/// Parquet reading and writing
pub const PARQUET: Requirement = Requirement {
    name: "parquet",
    available: cfg!(feature = "parquet"),
};

impl Requirement {
    /// `Ok(())` when available, otherwise the reason the test is skipped
    pub fn check(&self, test_name: &str) -> Result<(), String> {
        if self.available {
            Ok(())
        } else {
            Err(format!(
                "Test {} skipped, requires {}.",
                test_name, self.name
            ))
        }
    }
}

/// Return early from a test when a [`Requirement`] is unavailable, printing
/// the skip reason.
#[macro_export]
macro_rules! require {
    ($requirement:expr, $test_name:expr) => {
        if let Err(reason) = $requirement.check($test_name) {
            eprintln!("{}", reason);
            return;
        }
    };
}
