//! Random circle parameters: Gaussian center by rejection, uniform integer radius.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::check::{check_min, check_range};
use crate::config::DistributionParams;
use crate::error::{Bound, Result, SynthError};
use crate::grid::Grid;
use crate::raster::rasterize_ring;

/// One circle to be drawn: integer center (row, col) and integer radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CircleSpec {
    /// Center coordinates, both in `[0, n)` for sampled circles.
    pub center: [i64; 2],
    /// Ring radius in cells.
    pub radius: u32,
}

impl CircleSpec {
    /// Render this circle on an `n x n` grid.
    pub fn rasterize(&self, n: usize) -> Result<Grid> {
        rasterize_ring(n, self.center, self.radius as f64)
    }
}

/// Knobs for the center rejection loop.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Maximum number of center draws before giving up.
    ///
    /// `None` retries forever. A mean/sigma pair that leaves almost no mass
    /// inside the grid will then never return.
    pub max_attempts: Option<usize>,
}

/// Draw one circle for an `n x n` grid with the default (unbounded) sampler.
pub fn sample_circle<R: Rng>(
    params: &DistributionParams,
    n: usize,
    rng: &mut R,
) -> Result<CircleSpec> {
    sample_circle_with(params, n, &SamplerConfig::default(), rng)
}

/// Draw one circle for an `n x n` grid.
///
/// Both center components come from `Normal(mu, sigma)` truncated toward zero;
/// the pair is redrawn until both lie in `[0, n)`. The radius is uniform over
/// the integers in `[rmin, rmax)`.
pub fn sample_circle_with<R: Rng>(
    params: &DistributionParams,
    n: usize,
    config: &SamplerConfig,
    rng: &mut R,
) -> Result<CircleSpec> {
    let DistributionParams {
        mu,
        sigma,
        rmin,
        rmax,
    } = *params;
    let nf = n as f64;

    check_range("mu", mu, 0.0, nf)?;
    check_min("sigma", sigma, 0.0)?;
    check_min("rmax", rmax, rmin)?;
    check_range("rmin", rmin, 0.0, rmax)?;
    check_min("n", nf, 1.0)?;

    let radii = integer_radius_range(rmin, rmax)?;
    let normal = Normal::new(mu, sigma).map_err(|_| SynthError::InvalidParameter {
        name: "sigma",
        bound: Bound::AtLeast(0.0),
        value: sigma,
    })?;

    let center = sample_center(&normal, n as i64, config.max_attempts, rng)?;
    let radius = rng.gen_range(radii);

    Ok(CircleSpec { center, radius })
}

/// Integers `r` with `rmin <= r < rmax`.
fn integer_radius_range(rmin: f64, rmax: f64) -> Result<std::ops::Range<u32>> {
    let lo = rmin.ceil();
    let hi = rmax.ceil();
    if !(lo < hi) || hi > u32::MAX as f64 {
        return Err(SynthError::EmptyRadiusRange { rmin, rmax });
    }
    Ok(lo as u32..hi as u32)
}

fn sample_center<R: Rng>(
    normal: &Normal<f64>,
    n: i64,
    max_attempts: Option<usize>,
    rng: &mut R,
) -> Result<[i64; 2]> {
    let mut attempts = 0usize;
    loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            tracing::debug!("center sampling exhausted after {} draws", attempts);
            return Err(SynthError::SamplingExhausted { attempts });
        }
        attempts += 1;

        // `as` truncates toward zero, so draws in (-1, 0) land on 0.
        let c = [normal.sample(rng) as i64, normal.sample(rng) as i64];
        if c.iter().all(|&v| (0..n).contains(&v)) {
            if attempts > 1 {
                tracing::trace!("center accepted after {} draws", attempts);
            }
            return Ok(c);
        }
    }
}
