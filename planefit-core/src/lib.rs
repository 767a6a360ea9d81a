//! Core data structures for planefit
//!
//! This crate provides the fundamental types for 3D point cloud plane
//! fitting: points, point clouds, and the shared error type.

pub mod error;
pub mod point;
pub mod point_cloud;

pub use error::*;
pub use point::*;
pub use point_cloud::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix3, Point3, Vector3, Vector4};

/// Common result type for planefit operations
pub type Result<T> = std::result::Result<T, Error>;
