//! Integration tests for RANSAC plane fitting

use planefit_core::{ColoredPoint3f, NormalPoint3f, Point3f, PointCloud, Vector3f};
use planefit_segmentation::{fit_plane_with, PlaneModel, RansacParams};

fn seeded(seed: u64) -> RansacParams {
    RansacParams {
        seed: Some(seed),
        ..RansacParams::default()
    }
}

#[test]
fn test_fit_recovers_tilted_plane() {
    // Points on x + y + z = 3 plus a few far-off points
    let mut cloud = PointCloud::new();
    for i in 0..12 {
        for j in 0..12 {
            let x = i as f32 * 0.5;
            let y = j as f32 * 0.5;
            cloud.push(Point3f::new(x, y, 3.0 - x - y));
        }
    }
    let on_plane = cloud.len();
    cloud.push(Point3f::new(0.0, 0.0, 30.0));
    cloud.push(Point3f::new(2.0, 2.0, 20.0));

    let fit = fit_plane_with(&cloud, 0.01, &seeded(21)).unwrap();

    assert_eq!(fit.cloud.len(), on_plane);

    let normal = fit.model.normal();
    let expected = 1.0 / 3.0f32.sqrt();
    assert!((normal.x.abs() - expected).abs() < 1e-3);
    assert!((normal.y.abs() - expected).abs() < 1e-3);
    assert!((normal.z.abs() - expected).abs() < 1e-3);

    // d is consistent with the recovered orientation
    let d = fit.model.coefficients.w;
    assert!((d.abs() - 3.0 * expected).abs() < 1e-2);
}

#[test]
fn test_fit_colored_cloud_keeps_attributes() {
    let mut cloud = PointCloud::new();
    for i in 0..30u8 {
        cloud.push(ColoredPoint3f {
            position: Point3f::new(i as f32, (i % 4) as f32, 0.0),
            color: [i, 0, 255 - i],
        });
    }
    cloud.push(ColoredPoint3f {
        position: Point3f::new(3.0, 1.0, 9.0),
        color: [9, 9, 9],
    });

    let fit = fit_plane_with(&cloud, 0.05, &seeded(2)).unwrap();

    assert_eq!(fit.cloud.len(), 30);
    for (k, point) in fit.cloud.iter().enumerate() {
        assert_eq!(point.color, [k as u8, 0, 255 - k as u8]);
    }
}

#[test]
fn test_fit_normal_cloud() {
    let mut cloud = PointCloud::new();
    for i in 0..5 {
        for j in 0..5 {
            cloud.push(NormalPoint3f {
                position: Point3f::new(i as f32, j as f32, 1.0),
                normal: Vector3f::new(0.0, 0.0, 1.0),
            });
        }
    }

    let fit = fit_plane_with(&cloud, 0.01, &seeded(17)).unwrap();

    assert_eq!(fit.cloud.len(), 25);
    // Plane z = 1: coefficients (0, 0, ±1, ∓1)
    let model = &fit.model;
    assert!(model.normal().z.abs() > 0.999);
    assert!((model.coefficients.w + model.coefficients.z).abs() < 1e-4);
}

#[test]
fn test_failure_leaves_no_output() {
    let cloud: PointCloud<Point3f> = PointCloud::new();
    let result = fit_plane_with(&cloud, 0.1, &seeded(1));
    assert!(result.is_err());
}

#[test]
fn test_model_distance_matches_plane_equation() {
    let model = PlaneModel::new(0.0, 1.0, 0.0, -2.0);
    assert!((model.distance_to_point(&Point3f::new(10.0, 5.0, -3.0)) - 3.0).abs() < 1e-6);
}
