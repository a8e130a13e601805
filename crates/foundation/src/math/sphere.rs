//! Geographic <-> Cartesian conversion on a sphere.
//!
//! Frame conventions (shared with the 3D scene):
//! - `y` is up; the north pole sits at `(0, r, 0)`.
//! - phi is the polar angle from the north pole, `90 - lat`.
//! - theta is the azimuth, `lon + 180`.
//! - `x` carries a leading minus so markers line up with the renderer's
//!   handedness. Changing it mirrors every marker east/west.
//!
//! Longitude is indeterminate at the poles; [`to_geographic`] returns
//! whatever `atan2` yields there.

use core::f64::consts::PI;

use super::coord::{CoordinateError, GeoCoordinate, finite};
use super::Vec3;

/// Radius matching the scale of the planet models in the viewer.
pub const DEFAULT_SPHERE_RADIUS: f64 = 1.6;

/// Sphere of a validated radius. All conversions go through it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    radius: f64,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            radius: DEFAULT_SPHERE_RADIUS,
        }
    }
}

impl Sphere {
    pub fn new(radius: f64) -> Result<Self, CoordinateError> {
        if radius.is_finite() && radius > 0.0 {
            Ok(Self { radius })
        } else {
            Err(CoordinateError::InvalidRadius(radius))
        }
    }

    pub fn radius(self) -> f64 {
        self.radius
    }

    pub fn to_cartesian(self, geo: GeoCoordinate) -> Result<Vec3, CoordinateError> {
        let geo = geo.sanitized()?;

        let phi = (90.0 - geo.latitude).to_radians();
        let theta = (geo.longitude + 180.0).to_radians();

        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();

        Ok(Vec3::new(
            -(self.radius * sin_phi * cos_theta),
            self.radius * cos_phi,
            self.radius * sin_phi * sin_theta,
        ))
    }

    /// Inverse of [`Sphere::to_cartesian`].
    ///
    /// The polar angle is taken from the point's actual length, so points
    /// slightly off the surface still map to sensible coordinates and the
    /// sphere's radius never affects the result.
    pub fn to_geographic(self, point: Vec3) -> Result<GeoCoordinate, CoordinateError> {
        finite("x", point.x)?;
        finite("y", point.y)?;
        finite("z", point.z)?;

        let r = point.length();
        if r == 0.0 {
            return Err(CoordinateError::ZeroVector);
        }

        // Rounding in `r` can push the ratio a hair past 1 at the poles.
        let phi = (point.y / r).clamp(-1.0, 1.0).acos();
        let theta = point.z.atan2(-point.x);

        let latitude = 90.0 - phi * (180.0 / PI);
        let mut longitude = theta * (180.0 / PI) - 180.0;
        if longitude > 180.0 {
            longitude -= 360.0;
        }
        if longitude < -180.0 {
            longitude += 360.0;
        }

        Ok(GeoCoordinate::new(latitude, longitude))
    }

    /// Great-circle distance along the surface (haversine).
    pub fn distance(self, from: GeoCoordinate, to: GeoCoordinate) -> Result<f64, CoordinateError> {
        let from = from.sanitized()?;
        let to = to.sanitized()?;

        let phi1 = from.latitude.to_radians();
        let phi2 = to.latitude.to_radians();
        let d_phi = (to.latitude - from.latitude).to_radians();
        let d_lambda = (to.longitude - from.longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Ok(self.radius * c)
    }
}

/// Place `(latitude, longitude)` on a sphere of `radius`.
pub fn to_cartesian(latitude: f64, longitude: f64, radius: f64) -> Result<Vec3, CoordinateError> {
    Sphere::new(radius)?.to_cartesian(GeoCoordinate::new(latitude, longitude))
}

/// Recover latitude/longitude from a point produced by [`to_cartesian`].
pub fn to_geographic(x: f64, y: f64, z: f64, radius: f64) -> Result<GeoCoordinate, CoordinateError> {
    Sphere::new(radius)?.to_geographic(Vec3::new(x, y, z))
}

pub fn spherical_distance(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    radius: f64,
) -> Result<f64, CoordinateError> {
    Sphere::new(radius)?.distance(GeoCoordinate::new(lat1, lon1), GeoCoordinate::new(lat2, lon2))
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI};

    use super::{
        DEFAULT_SPHERE_RADIUS, Sphere, spherical_distance, to_cartesian, to_geographic,
    };
    use crate::math::{CoordinateError, GeoCoordinate, Vec3};

    const R: f64 = DEFAULT_SPHERE_RADIUS;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        assert_close(a.x, b.x, eps);
        assert_close(a.y, b.y, eps);
        assert_close(a.z, b.z, eps);
    }

    // -180 and 180 name the same meridian.
    fn longitude_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn round_trip_reproduces_lat_lon() {
        let mut lats: Vec<f64> = (-8..=8_i32).map(|i| f64::from(i) * 10.0).collect();
        lats.extend([-89.5, -45.25, 0.001, 18.65, 89.5]);

        for radius in [0.5, R, 6_371.0] {
            for &lat in &lats {
                for step in 0..=24_i32 {
                    let lon = -180.0 + f64::from(step) * 15.0;
                    let p = to_cartesian(lat, lon, radius).unwrap();
                    let geo = to_geographic(p.x, p.y, p.z, radius).unwrap();
                    assert_close(geo.latitude, lat, 1e-6);
                    assert!(
                        longitude_diff(geo.longitude, lon) <= 1e-6,
                        "lon {lon} came back as {} at lat {lat}",
                        geo.longitude
                    );
                    assert!((-180.0..=180.0).contains(&geo.longitude));
                }
            }
        }
    }

    #[test]
    fn poles_round_trip_latitude_only() {
        for lon in [-180.0, -37.0, 0.0, 123.0] {
            let north = to_cartesian(90.0, lon, R).unwrap();
            let geo = to_geographic(north.x, north.y, north.z, R).unwrap();
            assert_close(geo.latitude, 90.0, 1e-6);
            assert!((-180.0..=180.0).contains(&geo.longitude));

            let south = to_cartesian(-90.0, lon, R).unwrap();
            let geo = to_geographic(south.x, south.y, south.z, R).unwrap();
            assert_close(geo.latitude, -90.0, 1e-6);
        }
    }

    #[test]
    fn output_lies_on_the_sphere() {
        for radius in [0.25, R, 3.0] {
            for lat in [-90.0, -60.0, -1.0, 0.0, 33.3, 90.0] {
                for lon in [-180.0, -90.0, 0.0, 45.0, 179.9] {
                    let p = to_cartesian(lat, lon, radius).unwrap();
                    assert_close(p.length(), radius, 1e-12);
                }
            }
        }
    }

    #[test]
    fn poles_map_to_y_axis() {
        for lon in [-180.0, -45.0, 0.0, 90.0, 180.0] {
            assert_vec_close(to_cartesian(90.0, lon, R).unwrap(), Vec3::new(0.0, R, 0.0), 1e-12);
            assert_vec_close(to_cartesian(-90.0, lon, R).unwrap(), Vec3::new(0.0, -R, 0.0), 1e-12);
        }
    }

    #[test]
    fn equator_follows_frame_convention() {
        // theta = lon + 180, so the prime meridian lands on +x once the
        // leading minus is applied.
        assert_vec_close(to_cartesian(0.0, 0.0, R).unwrap(), Vec3::new(R, 0.0, 0.0), 1e-12);
        assert_vec_close(to_cartesian(0.0, 180.0, R).unwrap(), Vec3::new(-R, 0.0, 0.0), 1e-12);
        assert_vec_close(to_cartesian(0.0, 90.0, R).unwrap(), Vec3::new(0.0, 0.0, -R), 1e-12);
        assert_vec_close(to_cartesian(0.0, -90.0, R).unwrap(), Vec3::new(0.0, 0.0, R), 1e-12);
    }

    #[test]
    fn radius_scales_linearly() {
        let unit = to_cartesian(27.988, 86.925, 1.0).unwrap();
        let big = to_cartesian(27.988, 86.925, 4.0).unwrap();
        assert_vec_close(big, unit * 4.0, 1e-12);

        let a = to_geographic(unit.x, unit.y, unit.z, 1.0).unwrap();
        let b = to_geographic(big.x, big.y, big.z, 4.0).unwrap();
        assert_close(a.latitude, b.latitude, 1e-9);
        assert_close(a.longitude, b.longitude, 1e-9);
    }

    #[test]
    fn off_sphere_points_use_actual_length() {
        let p = to_cartesian(-43.3, -11.2, R).unwrap() * 1.01;
        let geo = to_geographic(p.x, p.y, p.z, R).unwrap();
        assert_close(geo.latitude, -43.3, 1e-9);
        assert_close(geo.longitude, -11.2, 1e-9);
    }

    #[test]
    fn olympus_mons() {
        let p = to_cartesian(18.65, -133.8, R).unwrap();
        assert_vec_close(
            p,
            Vec3::new(-1.049_277_650_223, 0.511_658_034_732, 1.094_176_616_564),
            1e-9,
        );

        let geo = to_geographic(p.x, p.y, p.z, R).unwrap();
        assert_close(geo.latitude, 18.65, 1e-9);
        assert_close(geo.longitude, -133.8, 1e-9);
    }

    #[test]
    fn out_of_range_longitude_is_wrapped() {
        for lat in [-30.0, 0.0, 61.0] {
            assert_eq!(to_cartesian(lat, 270.0, R), to_cartesian(lat, -90.0, R));
            assert_eq!(to_cartesian(lat, -200.0, R), to_cartesian(lat, 160.0, R));
        }
    }

    #[test]
    fn out_of_range_latitude_is_clamped() {
        for lon in [-120.0, 0.0, 75.0] {
            assert_eq!(to_cartesian(120.0, lon, R), to_cartesian(90.0, lon, R));
            assert_eq!(to_cartesian(-95.0, lon, R), to_cartesian(-90.0, lon, R));
        }
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert!(matches!(
            to_cartesian(f64::NAN, 0.0, R),
            Err(CoordinateError::NonFinite { field: "latitude", .. })
        ));
        assert!(matches!(
            to_cartesian(0.0, f64::NEG_INFINITY, R),
            Err(CoordinateError::NonFinite { field: "longitude", .. })
        ));
        assert_eq!(to_cartesian(0.0, 0.0, 0.0), Err(CoordinateError::InvalidRadius(0.0)));
        assert_eq!(to_cartesian(0.0, 0.0, -1.0), Err(CoordinateError::InvalidRadius(-1.0)));

        assert_eq!(to_geographic(0.0, 0.0, 0.0, R), Err(CoordinateError::ZeroVector));
        assert!(matches!(
            to_geographic(1.0, f64::NAN, 0.0, R),
            Err(CoordinateError::NonFinite { field: "y", .. })
        ));
        assert!(matches!(
            spherical_distance(0.0, 0.0, f64::NAN, 0.0, R),
            Err(CoordinateError::NonFinite { .. })
        ));
        assert!(Sphere::new(f64::INFINITY).is_err());
    }

    #[test]
    fn distance_identities() {
        for (lat, lon) in [(0.0, 0.0), (18.65, -133.8), (-90.0, 45.0), (36.1069, -112.1129)] {
            assert_eq!(spherical_distance(lat, lon, lat, lon, R).unwrap(), 0.0);
        }

        assert_close(spherical_distance(90.0, 0.0, 0.0, 0.0, R).unwrap(), R * FRAC_PI_2, 1e-12);
        assert_close(spherical_distance(90.0, 0.0, -90.0, 0.0, R).unwrap(), R * PI, 1e-12);
        assert_close(spherical_distance(0.0, 0.0, 0.0, 180.0, 2.0).unwrap(), 2.0 * PI, 1e-12);
    }

    #[test]
    fn distance_is_symmetric_and_matches_chord() {
        let sphere = Sphere::new(3.0).unwrap();
        let a = GeoCoordinate::new(0.674, 23.473);
        let b = GeoCoordinate::new(-43.3, -11.2);

        let ab = sphere.distance(a, b).unwrap();
        let ba = sphere.distance(b, a).unwrap();
        assert_close(ab, ba, 1e-12);

        // Arc length agrees with the angle between the two surface vectors.
        let pa = sphere.to_cartesian(a).unwrap();
        let pb = sphere.to_cartesian(b).unwrap();
        let angle = (pa.dot(pb) / (9.0)).clamp(-1.0, 1.0).acos();
        assert_close(ab, 3.0 * angle, 1e-9);
    }

    #[test]
    fn distance_sanitizes_inputs() {
        let wrapped = spherical_distance(10.0, 370.0, 10.0, 20.0, R).unwrap();
        let plain = spherical_distance(10.0, 10.0, 10.0, 20.0, R).unwrap();
        assert_close(wrapped, plain, 1e-12);

        let clamped = spherical_distance(100.0, 0.0, 0.0, 0.0, R).unwrap();
        assert_close(clamped, R * FRAC_PI_2, 1e-12);
    }

    #[test]
    fn default_sphere_uses_model_radius() {
        let sphere = Sphere::default();
        assert_eq!(sphere.radius(), 1.6);
        let p = sphere.to_cartesian(GeoCoordinate::new(90.0, 0.0)).unwrap();
        assert_close(p.y, 1.6, 1e-12);
    }
}
