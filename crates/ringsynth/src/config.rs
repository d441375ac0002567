//! Generator configuration.
//!
//! All sections are serde-friendly with `#[serde(default)]`, so a JSON file
//! only needs the fields it overrides.

use std::path::{Path, PathBuf};

use crate::error::{Result, SynthError};
use crate::prune::PruneConfig;
use crate::sampler::SamplerConfig;

const DEFAULT_GRID_SIZE: usize = 64;
const DEFAULT_OUTPUT_DIR: &str = "data";

/// Circle distribution parameters; missing values are derived from the grid size.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Mean of the center distribution. Default: `n / 2`.
    pub mu: Option<f64>,
    /// Standard deviation of the center distribution. Default: `mu / 2`.
    pub sigma: Option<f64>,
    /// Smallest radius (inclusive). Default: `mu / 4`.
    pub rmin: Option<f64>,
    /// Largest radius (exclusive). Default: `mu`.
    pub rmax: Option<f64>,
}

/// Fully resolved distribution parameters for one sampler call.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DistributionParams {
    pub mu: f64,
    pub sigma: f64,
    pub rmin: f64,
    pub rmax: f64,
}

impl DistributionConfig {
    /// Fill in defaults for an `n x n` grid.
    ///
    /// `sigma`, `rmin` and `rmax` defaults follow the resolved `mu`, whether
    /// it was given or derived.
    pub fn resolve(&self, n: usize) -> DistributionParams {
        let mu = self.mu.unwrap_or(n as f64 / 2.0);
        DistributionParams {
            mu,
            sigma: self.sigma.unwrap_or(mu / 2.0),
            rmin: self.rmin.unwrap_or(mu / 4.0),
            rmax: self.rmax.unwrap_or(mu),
        }
    }
}

impl DistributionParams {
    /// Same parameters with a different mean.
    pub fn with_mu(self, mu: f64) -> Self {
        Self { mu, ..self }
    }
}

/// Everything needed for one dataset generation run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Linear grid size `n`.
    pub grid_size: usize,
    /// Number of grids to generate.
    pub n_samples: usize,
    /// Circles drawn on every grid.
    pub n_circles: usize,
    pub distribution: DistributionConfig,
    pub prune: PruneConfig,
    pub sampler: SamplerConfig,
    /// Seed for the run; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Directory receiving the dataset files (created if absent).
    pub output_dir: PathBuf,
    /// Also write a PNG next to each text file.
    pub write_png: bool,
    /// Cell size in pixels for PNG output.
    pub png_scale: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            n_samples: 1,
            n_circles: 1,
            distribution: DistributionConfig::default(),
            prune: PruneConfig::default(),
            sampler: SamplerConfig::default(),
            seed: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            write_png: false,
            png_scale: 4,
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Check run-level settings; per-circle parameters are checked by the stages.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(SynthError::InvalidConfig(
                "grid_size must be at least 1".to_string(),
            ));
        }
        if self.n_samples == 0 {
            return Err(SynthError::InvalidConfig(
                "n_samples must be at least 1".to_string(),
            ));
        }
        if self.n_circles == 0 {
            return Err(SynthError::InvalidConfig(
                "n_circles must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
