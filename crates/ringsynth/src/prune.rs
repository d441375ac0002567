//! Random removal of ring pixels to mimic sparse, incomplete detections.
//!
//! Two passes run over the set cells of a binary grid:
//!
//! 1. **Thinning** – every set cell survives independently when a uniform
//!    draw in `[0, 1)` is `<= threshold`.
//! 2. **Cap** – if at least `max_hits` cells survive, a uniformly random
//!    subset of the surplus is cleared so exactly `max_hits` remain.

use rand::Rng;

use crate::check::check_range;
use crate::error::{Result, SynthError};
use crate::grid::Grid;

/// Pruning parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    /// Survival probability of each set cell in the thinning pass, in `[0, 1]`.
    pub threshold: f64,
    /// Upper bound on set cells after pruning.
    pub max_hits: usize,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            max_hits: 64,
        }
    }
}

/// Set-cell counts observed while pruning one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PruneStats {
    /// Set cells before pruning.
    pub input_hits: usize,
    /// Set cells after the thinning pass.
    pub after_thinning: usize,
    /// Set cells after the cap.
    pub kept: usize,
}

/// Prune `grid` in place.
///
/// Fails with [`SynthError::InvalidGrid`] if any cell is not 0/1 and with
/// [`SynthError::InvalidParameter`] if `threshold` is outside `[0, 1]`; the
/// grid is untouched on error.
pub fn prune<R: Rng>(grid: &mut Grid, config: &PruneConfig, rng: &mut R) -> Result<PruneStats> {
    if let Some((row, col, value)) = grid.first_non_binary() {
        return Err(SynthError::InvalidGrid { row, col, value });
    }
    check_range("threshold", config.threshold, 0.0, 1.0)?;

    let input_hits = grid.count_ones();

    let mut survivors: Vec<usize> = Vec::with_capacity(input_hits);
    for (i, cell) in grid.cells_mut().iter_mut().enumerate() {
        if *cell == 0 {
            continue;
        }
        if rng.gen::<f64>() <= config.threshold {
            survivors.push(i);
        } else {
            *cell = 0;
        }
    }
    let after_thinning = survivors.len();

    if after_thinning >= config.max_hits {
        let surplus = after_thinning - config.max_hits;
        let cells = grid.cells_mut();
        for k in sample_indices(rng, after_thinning, surplus) {
            cells[survivors[k]] = 0;
        }
    }

    let kept = after_thinning.min(config.max_hits);
    tracing::trace!(
        "pruned {} -> {} (thinning) -> {} (cap {})",
        input_hits,
        after_thinning,
        kept,
        config.max_hits
    );

    Ok(PruneStats {
        input_hits,
        after_thinning,
        kept,
    })
}

/// Sample `k` distinct indices from `0..n` using Fisher–Yates partial shuffle.
fn sample_indices<R: Rng>(rng: &mut R, n: usize, k: usize) -> Vec<usize> {
    debug_assert!(k <= n);
    let mut indices: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = rng.gen_range(i..n);
        indices.swap(i, j);
    }
    indices.truncate(k);
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn filled(n: usize, ones: usize) -> Grid {
        let mut cells = vec![0u8; n * n];
        cells[..ones].fill(1);
        Grid::from_vec(n, cells).unwrap()
    }

    #[test]
    fn threshold_one_without_cap_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let original = crate::raster::rasterize_ring(40, [20, 20], 12.0).unwrap();
        let mut g = original.clone();
        let cfg = PruneConfig {
            threshold: 1.0,
            max_hits: usize::MAX,
        };
        let stats = prune(&mut g, &cfg, &mut rng).unwrap();
        assert_eq!(g, original);
        assert_eq!(stats.input_hits, stats.kept);
    }

    #[test]
    fn threshold_zero_clears_almost_everything() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut g = filled(10, 100);
        let cfg = PruneConfig {
            threshold: 0.0,
            max_hits: 64,
        };
        let stats = prune(&mut g, &cfg, &mut rng).unwrap();
        // Only an exact 0.0 draw survives.
        assert!(stats.kept <= 1);
        assert_eq!(g.count_ones(), stats.kept);
    }

    #[test]
    fn cap_leaves_exact_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut g = filled(10, 100);
        let cfg = PruneConfig {
            threshold: 1.0,
            max_hits: 20,
        };
        let stats = prune(&mut g, &cfg, &mut rng).unwrap();
        assert_eq!(stats.after_thinning, 100);
        assert_eq!(stats.kept, 20);
        assert_eq!(g.count_ones(), 20);
    }

    #[test]
    fn never_adds_pixels() {
        let mut rng = StdRng::seed_from_u64(4);
        for trial in 0..50 {
            let original = crate::raster::rasterize_ring(30, [15, 14], (trial % 10 + 2) as f64)
                .unwrap();
            let mut g = original.clone();
            let cfg = PruneConfig {
                threshold: 0.6,
                max_hits: 8,
            };
            prune(&mut g, &cfg, &mut rng).unwrap();
            assert!(g.count_ones() <= 8);
            assert!(g.count_ones() <= original.count_ones());
            for (row, col) in g.ones() {
                assert_eq!(original.get(row, col), 1);
            }
        }
    }

    #[test]
    fn hundred_ones_thin_to_about_thirty() {
        let mut rng = StdRng::seed_from_u64(5);
        let trials = 400;
        let mut total_after_thinning = 0usize;
        for _ in 0..trials {
            let mut g = filled(10, 100);
            let cfg = PruneConfig {
                threshold: 0.3,
                max_hits: 20,
            };
            let stats = prune(&mut g, &cfg, &mut rng).unwrap();
            assert_eq!(stats.kept, stats.after_thinning.min(20));
            assert_eq!(g.count_ones(), stats.kept);
            total_after_thinning += stats.after_thinning;
        }
        let mean = total_after_thinning as f64 / trials as f64;
        // Binomial(100, 0.3): sd of the mean over 400 trials is ~0.23.
        assert_abs_diff_eq!(mean, 30.0, epsilon = 1.5);
    }

    #[test]
    fn cap_is_not_positionally_biased() {
        let mut rng = StdRng::seed_from_u64(6);
        let trials = 2000;
        let mut first_half = 0usize;
        for _ in 0..trials {
            let mut g = filled(10, 40);
            let cfg = PruneConfig {
                threshold: 1.0,
                max_hits: 10,
            };
            prune(&mut g, &cfg, &mut rng).unwrap();
            first_half += g.cells()[..20].iter().filter(|&&v| v == 1).count();
        }
        let share = first_half as f64 / (trials * 10) as f64;
        assert_abs_diff_eq!(share, 0.5, epsilon = 0.03);
    }

    #[test]
    fn rejects_non_binary_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut g = Grid::from_vec(2, vec![1, 0, 3, 1]).unwrap();
        let before = g.clone();
        let err = prune(&mut g, &PruneConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SynthError::InvalidGrid {
                row: 1,
                col: 0,
                value: 3
            }
        ));
        assert_eq!(g, before);
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut g = filled(4, 4);
        let cfg = PruneConfig {
            threshold: 1.2,
            max_hits: 64,
        };
        assert!(matches!(
            prune(&mut g, &cfg, &mut rng),
            Err(SynthError::InvalidParameter {
                name: "threshold",
                ..
            })
        ));
        assert_eq!(g.count_ones(), 4);
    }

    #[test]
    fn sample_indices_are_distinct() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut idx = sample_indices(&mut rng, 50, 30);
        idx.sort_unstable();
        idx.dedup();
        assert_eq!(idx.len(), 30);
        assert!(idx.iter().all(|&i| i < 50));
    }
}
