//! # planefit-segmentation
//!
//! RANSAC plane fitting for 3D point clouds.
//!
//! Given a point cloud and a distance threshold, [`fit_plane`] estimates the
//! best-fit plane by consensus sampling, optionally refines the coefficients
//! by a least-squares fit over the inlier set, and returns the inlier subset
//! as a new cloud together with the plane coefficients.

pub mod plane;
pub mod ransac;

pub use plane::*;
pub use ransac::*;
