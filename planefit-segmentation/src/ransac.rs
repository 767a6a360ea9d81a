//! RANSAC consensus search and inlier extraction

use crate::plane::PlaneModel;
use planefit_core::{Error, Point3f, PointCloud, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Parameters controlling the RANSAC consensus search
#[derive(Debug, Clone)]
pub struct RansacParams {
    /// Number of sampling iterations
    pub max_iterations: usize,
    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Refine the winning model by a least-squares fit over its inliers
    pub optimize_coefficients: bool,
}

impl Default for RansacParams {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            seed: None,
            optimize_coefficients: true,
        }
    }
}

/// Result of a successful plane fit
///
/// Owned by the caller; a failed fit returns an error instead of leaving
/// partially-populated outputs behind.
#[derive(Debug, Clone)]
pub struct PlaneFit<T> {
    /// The inlier points, in the same relative order as the input cloud
    pub cloud: PointCloud<T>,
    /// Fitted plane coefficients with unit normal
    pub model: PlaneModel,
    /// Indices of the inliers in the input cloud, ascending
    pub inliers: Vec<usize>,
}

/// Fit a plane to a point cloud using RANSAC
///
/// Repeatedly samples minimal 3-point subsets, scores each candidate plane
/// by the number of points within `threshold` (inclusive perpendicular
/// distance), refines the winning candidate by least squares, and extracts
/// the inlier points into a new cloud preserving input order.
///
/// Runs with [`RansacParams::default`]; use [`fit_plane_with`] to control
/// iteration count, seeding, or refinement.
///
/// # Arguments
/// * `cloud` - Input point cloud; any point type convertible to a position
/// * `threshold` - Maximum perpendicular distance for a point to be an inlier
///
/// # Returns
/// * `Result<PlaneFit<T>>` - Inlier cloud and plane model, or
///   [`Error::PlaneFitFailed`] when no candidate plane has any inliers
///
/// # Example
/// ```rust
/// use planefit_core::{PointCloud, Point3f};
/// use planefit_segmentation::fit_plane;
///
/// fn main() -> planefit_core::Result<()> {
///     let cloud = PointCloud::from_points(vec![
///         Point3f::new(0.0, 0.0, 0.0),
///         Point3f::new(1.0, 0.0, 0.0),
///         Point3f::new(0.0, 1.0, 0.0),
///         Point3f::new(1.0, 1.0, 0.0),
///     ]);
///
///     let fit = fit_plane(&cloud, 0.01)?;
///     println!("{} of {} points on the plane", fit.cloud.len(), cloud.len());
///     Ok(())
/// }
/// ```
pub fn fit_plane<T>(cloud: &PointCloud<T>, threshold: f32) -> Result<PlaneFit<T>>
where
    T: Copy,
    Point3f: From<T>,
{
    fit_plane_with(cloud, threshold, &RansacParams::default())
}

/// Fit a plane to a point cloud using RANSAC with explicit parameters
pub fn fit_plane_with<T>(
    cloud: &PointCloud<T>,
    threshold: f32,
    params: &RansacParams,
) -> Result<PlaneFit<T>>
where
    T: Copy,
    Point3f: From<T>,
{
    validate(threshold, params)?;

    let positions = positions_of(cloud);
    let mut rng = make_rng(params.seed);

    let mut best: Option<(PlaneModel, usize)> = None;
    if positions.len() >= 3 {
        for _ in 0..params.max_iterations {
            let Some(model) = sample_candidate(&positions, &mut rng) else {
                continue;
            };
            let count = model.count_inliers(&positions, threshold);
            // First candidate reaching the maximum wins
            if count > best.as_ref().map_or(0, |(_, best_count)| *best_count) {
                best = Some((model, count));
            }
        }
    }

    finish(cloud, &positions, best, threshold, params)
}

/// Fit a plane to a point cloud using RANSAC, scoring iterations in parallel
///
/// Observable behavior matches [`fit_plane_with`]; iterations are scored
/// across threads and ties in inlier count break toward the lowest iteration
/// index, so a seeded run stays reproducible.
pub fn fit_plane_parallel<T>(
    cloud: &PointCloud<T>,
    threshold: f32,
    params: &RansacParams,
) -> Result<PlaneFit<T>>
where
    T: Copy + Sync,
    Point3f: From<T>,
{
    validate(threshold, params)?;

    let positions = positions_of(cloud);

    let mut best: Option<(PlaneModel, usize)> = None;
    if positions.len() >= 3 {
        best = (0..params.max_iterations)
            .into_par_iter()
            .filter_map(|iteration| {
                let mut rng = match params.seed {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(iteration as u64)),
                    None => StdRng::from_entropy(),
                };
                let model = sample_candidate(&positions, &mut rng)?;
                let count = model.count_inliers(&positions, threshold);
                Some((iteration, model, count))
            })
            .reduce_with(|a, b| {
                // Higher count wins; on a tie the earlier iteration wins
                if b.2 > a.2 || (b.2 == a.2 && b.0 < a.0) {
                    b
                } else {
                    a
                }
            })
            .map(|(_, model, count)| (model, count));
    }

    finish(cloud, &positions, best, threshold, params)
}

fn validate(threshold: f32, params: &RansacParams) -> Result<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(Error::InvalidData(
            "threshold must be a non-negative finite distance".to_string(),
        ));
    }
    if params.max_iterations == 0 {
        return Err(Error::InvalidData(
            "max_iterations must be positive".to_string(),
        ));
    }
    Ok(())
}

fn positions_of<T>(cloud: &PointCloud<T>) -> Vec<Point3f>
where
    T: Copy,
    Point3f: From<T>,
{
    cloud.iter().map(|&point| Point3f::from(point)).collect()
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Sample 3 distinct points and build a candidate plane from them
///
/// Returns `None` when the sampled points are collinear; the caller just
/// moves on to the next iteration.
fn sample_candidate(positions: &[Point3f], rng: &mut impl Rng) -> Option<PlaneModel> {
    let sample = rand::seq::index::sample(rng, positions.len(), 3);
    PlaneModel::from_points(
        &positions[sample.index(0)],
        &positions[sample.index(1)],
        &positions[sample.index(2)],
    )
}

/// Refine the winning model, select the final inlier set, and extract it
fn finish<T>(
    cloud: &PointCloud<T>,
    positions: &[Point3f],
    best: Option<(PlaneModel, usize)>,
    threshold: f32,
    params: &RansacParams,
) -> Result<PlaneFit<T>>
where
    T: Copy,
    Point3f: From<T>,
{
    let Some((mut model, _)) = best.filter(|(_, count)| *count > 0) else {
        log::error!(
            "unable to fit a plane to the data ({} input points)",
            positions.len()
        );
        return Err(Error::PlaneFitFailed);
    };

    if params.optimize_coefficients {
        let consensus = model.inlier_indices(positions, threshold);
        // Keep the consensus model if the selection is too small to refine
        if let Some(refined) = PlaneModel::least_squares_fit(positions, &consensus) {
            model = refined;
        }
    }

    let inliers = model.inlier_indices(positions, threshold);
    if inliers.is_empty() {
        log::error!(
            "unable to fit a plane to the data ({} input points)",
            positions.len()
        );
        return Err(Error::PlaneFitFailed);
    }

    log::debug!(
        "plane fit: {} input points, {} inlier points",
        positions.len(),
        inliers.len()
    );

    let extracted = inliers.iter().map(|&i| cloud.points[i]).collect();
    Ok(PlaneFit {
        cloud: PointCloud::from_points(extracted),
        model,
        inliers,
    })
}
