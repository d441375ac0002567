//! Dataset generation: compose circles per sample, prune, persist, report.
//!
//! One [`StdRng`] drives the whole run. Each sample draws `n_circles`
//! circles, ORs their rings into one grid and prunes it once. A failing
//! sample is logged and recorded in the [`GenerationReport`]; the run moves
//! on to the next sample.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{DistributionParams, GeneratorConfig};
use crate::error::Result;
use crate::grid::Grid;
use crate::prune::{prune, PruneStats};
use crate::sampler::{sample_circle_with, CircleSpec};
use crate::store::{record_file_name, DatasetRecord, DatasetWriter};

/// One generated grid before persistence.
#[derive(Debug, Clone)]
pub struct Sample {
    pub index: usize,
    pub grid: Grid,
    pub circles: Vec<CircleSpec>,
    pub prune: PruneStats,
}

impl Sample {
    pub fn into_record(self) -> DatasetRecord {
        DatasetRecord {
            circles: self.circles,
            grid: self.grid,
        }
    }
}

/// Draws samples for one run.
pub struct DatasetGenerator {
    config: GeneratorConfig,
    params: DistributionParams,
    rng: StdRng,
}

impl DatasetGenerator {
    /// Validate `config` and seed the run's random source.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let params = config.distribution.resolve(config.grid_size);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            params,
            rng,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Base distribution parameters after defaults were applied.
    pub fn params(&self) -> &DistributionParams {
        &self.params
    }

    /// Center mean for circle `circle` of sample `index`.
    ///
    /// Alternates `mu ± n/6` with the parity of `circle + index` so centers
    /// spread over the grid instead of piling up around one mean.
    pub fn circle_mean(&self, index: usize, circle: usize) -> f64 {
        let offset = self.config.grid_size as f64 / 6.0;
        if (circle + index) % 2 == 0 {
            self.params.mu + offset
        } else {
            self.params.mu - offset
        }
    }

    /// Generate sample `index`.
    pub fn next_sample(&mut self, index: usize) -> Result<Sample> {
        let n = self.config.grid_size;
        let mut grid = Grid::zeros(n);
        let mut circles = Vec::with_capacity(self.config.n_circles);

        for j in 0..self.config.n_circles {
            let params = self.params.with_mu(self.circle_mean(index, j));
            let circle = sample_circle_with(&params, n, &self.config.sampler, &mut self.rng)?;
            grid.merge_or(&circle.rasterize(n)?)?;
            circles.push(circle);
        }

        let stats = prune(&mut grid, &self.config.prune, &mut self.rng)?;
        tracing::debug!(
            "sample {}: {} circles, {} -> {} hits",
            index,
            circles.len(),
            stats.input_hits,
            stats.kept
        );

        Ok(Sample {
            index,
            grid,
            circles,
            prune: stats,
        })
    }
}

/// Result of one sample in a run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SampleOutcome {
    pub index: usize,
    #[serde(flatten)]
    pub status: SampleStatus,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SampleStatus {
    Written {
        path: PathBuf,
        circles: Vec<CircleSpec>,
        hits: usize,
    },
    Failed {
        error: String,
    },
}

/// Per-sample outcomes of a run, in sample order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GenerationReport {
    pub outcomes: Vec<SampleOutcome>,
}

impl GenerationReport {
    pub fn n_written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SampleStatus::Written { .. }))
            .count()
    }

    pub fn n_failed(&self) -> usize {
        self.outcomes.len() - self.n_written()
    }

    /// `(index, error)` of every failed sample.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.outcomes.iter().filter_map(|o| match &o.status {
            SampleStatus::Failed { error } => Some((o.index, error.as_str())),
            SampleStatus::Written { .. } => None,
        })
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_manifest(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Generate and persist a whole dataset.
///
/// Fails only if the configuration is invalid or the output directory cannot
/// be created; every per-sample error ends up in the returned report.
pub fn generate_dataset(config: &GeneratorConfig) -> Result<GenerationReport> {
    let mut generator = DatasetGenerator::new(config.clone())?;
    let mut writer = DatasetWriter::create(&config.output_dir)?;
    if config.write_png {
        writer = writer.with_png(config.png_scale);
    }

    tracing::info!(
        "generating {} samples of {}x{} with {} circles into {}",
        config.n_samples,
        config.grid_size,
        config.grid_size,
        config.n_circles,
        writer.dir().display()
    );

    let mut report = GenerationReport::default();
    for index in 0..config.n_samples {
        let status = match write_sample(&mut generator, &writer, index) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("sample {} failed: {}", index, e);
                SampleStatus::Failed {
                    error: e.to_string(),
                }
            }
        };
        report.outcomes.push(SampleOutcome { index, status });
    }

    tracing::info!(
        "{} samples written, {} failed",
        report.n_written(),
        report.n_failed()
    );
    Ok(report)
}

fn write_sample(
    generator: &mut DatasetGenerator,
    writer: &DatasetWriter,
    index: usize,
) -> Result<SampleStatus> {
    let sample = generator.next_sample(index)?;
    let cfg = generator.config();
    let name = record_file_name(cfg.n_circles, cfg.n_samples, index);
    let hits = sample.prune.kept;
    let record = sample.into_record();
    let path = writer.write(&name, &record)?;
    Ok(SampleStatus::Written {
        path,
        circles: record.circles,
        hits,
    })
}
