//! ringsynth — synthetic ring images for training and testing ring detectors.
//!
//! Each generated grid is an `n x n` binary matrix with one or more thin
//! circular rings of set cells. The pipeline stages are:
//!
//! 1. **Sampler** – Gaussian center by rejection sampling inside the grid,
//!    uniform integer radius.
//! 2. **Raster** – marks cells whose distance to the center is within
//!    [`RING_HALF_WIDTH`] of the radius.
//! 3. **Prune** – probabilistic thinning followed by a hard cap on the number
//!    of set cells, emulating sparse detector hits.
//! 4. **Dataset** – ORs the rings of several circles into one grid, prunes
//!    it and writes it with a header listing every circle.
//!
//! All randomness comes from a caller-supplied [`rand::Rng`], so a seeded
//! generator reproduces a dataset exactly.
//!
//! # Example
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use ringsynth::{prune, sample_circle, DistributionConfig, PruneConfig};
//!
//! let n = 32;
//! let mut rng = StdRng::seed_from_u64(7);
//! let params = DistributionConfig::default().resolve(n);
//! let circle = sample_circle(&params, n, &mut rng).unwrap();
//! let mut grid = circle.rasterize(n).unwrap();
//! let stats = prune(&mut grid, &PruneConfig::default(), &mut rng).unwrap();
//! assert!(stats.kept <= 64);
//! ```

mod check;
mod config;
mod dataset;
mod error;
mod grid;
mod prune;
mod raster;
mod sampler;
mod store;

pub use check::{check_below, check_max, check_min, check_range};
pub use config::{DistributionConfig, DistributionParams, GeneratorConfig};
pub use dataset::{
    generate_dataset, DatasetGenerator, GenerationReport, Sample, SampleOutcome, SampleStatus,
};
pub use error::{Bound, Result, SynthError};
pub use grid::Grid;
pub use prune::{prune, PruneConfig, PruneStats};
pub use raster::{rasterize_ring, RING_HALF_WIDTH};
pub use sampler::{sample_circle, sample_circle_with, CircleSpec, SamplerConfig};
pub use store::{record_file_name, DatasetRecord, DatasetWriter};
