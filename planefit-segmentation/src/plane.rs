//! Plane model and point-to-plane geometry

use nalgebra::{Matrix3, Vector4};
use planefit_core::{Point3f, Vector3f};

/// A 3D plane model defined by the equation ax + by + cz + d = 0
///
/// All constructors keep (a, b, c) at unit length, so the plane equation
/// evaluated at a point is its signed Euclidean distance to the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneModel {
    /// Plane coefficients [a, b, c, d] where ax + by + cz + d = 0
    pub coefficients: Vector4<f32>,
}

/// Cross products and eigenvectors below this magnitude are treated as
/// degenerate (collinear sample, rank-deficient covariance).
const DEGENERACY_EPS: f32 = 1e-8;

impl PlaneModel {
    /// Create a plane model from coefficients
    ///
    /// (a, b, c) is normalized to unit length and d scaled with it, so the
    /// described plane is unchanged and distances stay Euclidean.
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        let magnitude = Vector3f::new(a, b, c).magnitude();
        debug_assert!(magnitude >= DEGENERACY_EPS, "plane normal must be non-zero");
        Self {
            coefficients: Vector4::new(a, b, c, d) / magnitude,
        }
    }

    /// Create a plane model from a unit normal and a point on the plane
    pub fn from_normal_and_point(normal: Vector3f, point: &Point3f) -> Self {
        let d = -normal.dot(&point.coords);
        Self::new(normal.x, normal.y, normal.z, d)
    }

    /// Create a plane model from three points
    ///
    /// Returns `None` if the points are collinear (or coincident) and thus
    /// do not determine a plane.
    pub fn from_points(p1: &Point3f, p2: &Point3f, p3: &Point3f) -> Option<Self> {
        let v1 = p2 - p1;
        let v2 = p3 - p1;

        let normal = v1.cross(&v2);
        if normal.magnitude() < DEGENERACY_EPS {
            return None;
        }

        Some(Self::from_normal_and_point(normal.normalize(), p1))
    }

    /// Fit a plane to the points at `indices` by least squares
    ///
    /// Computes the centroid and covariance of the selected points and takes
    /// the eigenvector of the smallest eigenvalue as the plane normal. This
    /// is the coefficient-optimization step applied after the consensus
    /// search. Returns `None` when the selection is too small or degenerate.
    pub fn least_squares_fit(points: &[Point3f], indices: &[usize]) -> Option<Self> {
        if indices.len() < 3 {
            return None;
        }

        let mut centroid = Vector3f::zeros();
        for &i in indices {
            centroid += points[i].coords;
        }
        centroid /= indices.len() as f32;

        let mut covariance = Matrix3::zeros();
        for &i in indices {
            let diff = points[i].coords - centroid;
            covariance += diff * diff.transpose();
        }

        let eigen = covariance.symmetric_eigen();
        let min_index = eigen
            .eigenvalues
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(i, _)| i)?;
        let normal: Vector3f = eigen.eigenvectors.column(min_index).clone_owned();

        if normal.magnitude() < DEGENERACY_EPS {
            return None;
        }

        Some(Self::from_normal_and_point(
            normal.normalize(),
            &Point3f::from(centroid),
        ))
    }

    /// Get the normal vector of the plane
    pub fn normal(&self) -> Vector3f {
        Vector3f::new(
            self.coefficients.x,
            self.coefficients.y,
            self.coefficients.z,
        )
    }

    /// Calculate the perpendicular distance from a point to the plane
    pub fn distance_to_point(&self, point: &Point3f) -> f32 {
        (self.coefficients.x * point.x
            + self.coefficients.y * point.y
            + self.coefficients.z * point.z
            + self.coefficients.w)
            .abs()
    }

    /// Count inliers within a distance threshold (inclusive)
    pub fn count_inliers(&self, points: &[Point3f], threshold: f32) -> usize {
        points
            .iter()
            .filter(|point| self.distance_to_point(point) <= threshold)
            .count()
    }

    /// Get indices of inlier points within a distance threshold (inclusive)
    ///
    /// Indices are returned in ascending order, so extracting them yields a
    /// stable subsequence of the input.
    pub fn inlier_indices(&self, points: &[Point3f], threshold: f32) -> Vec<usize> {
        points
            .iter()
            .enumerate()
            .filter(|(_, point)| self.distance_to_point(point) <= threshold)
            .map(|(i, _)| i)
            .collect()
    }
}
