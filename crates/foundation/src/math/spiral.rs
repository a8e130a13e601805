use core::f64::consts::PI;

use super::Vec3;

/// Spread `count` points evenly over a sphere along a golden-angle spiral.
///
/// Used for gallery hotspots that carry no explicit 3D position. Index 0 sits
/// nearest the north pole and the last index nearest the south pole.
pub fn golden_spiral(count: usize, radius: f64) -> Vec<Vec3> {
    let n = count as f64;
    let golden_angle = PI * (1.0 + 5.0_f64.sqrt());

    (0..count)
        .map(|i| {
            let t = i as f64 + 0.5;
            let phi = (1.0 - 2.0 * t / n).acos();
            let theta = golden_angle * t;
            let (sin_phi, cos_phi) = phi.sin_cos();
            Vec3::new(sin_phi * theta.cos(), cos_phi, sin_phi * theta.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::golden_spiral;

    #[test]
    fn empty_for_zero_count() {
        assert!(golden_spiral(0, 1.0).is_empty());
    }

    #[test]
    fn single_point_on_equator() {
        let points = golden_spiral(1, 2.0);
        assert_eq!(points.len(), 1);
        assert!(points[0].y.abs() < 1e-12);
        assert!((points[0].length() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn points_lie_on_sphere_and_descend() {
        let points = golden_spiral(50, 1.6);
        assert_eq!(points.len(), 50);
        for p in &points {
            assert!((p.length() - 1.6).abs() < 1e-12);
        }
        for pair in points.windows(2) {
            assert!(pair[0].y > pair[1].y);
        }
        assert!(points[0].y > 0.0 && points[49].y < 0.0);
    }

    #[test]
    fn hemispheres_are_balanced() {
        let points = golden_spiral(100, 1.0);
        let north = points.iter().filter(|p| p.y > 0.0).count();
        assert_eq!(north, 50);
    }
}
