//! Oblate reference ellipsoid and the local tangent frame it induces.

use glam::{DMat4, DVec3};

/// The idealized curved surface used for horizon computation and for
/// anchoring tile-local frames.
///
/// This is the immutable specification of a reference body. Radii must be
/// positive with `radius_equator >= radius_polar` for oblate bodies;
/// degenerate radii are not validated here and produce undefined results
/// downstream (the per-frame culling path stays branch-free).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    radius_equator: f64,
    radius_polar: f64,
}

impl Ellipsoid {
    /// WGS84 semi-major axis in meters.
    pub const WGS84_RADIUS_EQUATOR: f64 = 6_378_137.0;
    /// WGS84 semi-minor axis in meters.
    pub const WGS84_RADIUS_POLAR: f64 = 6_356_752.314_245;

    /// Construct an ellipsoid from its equatorial and polar radii.
    pub fn new(radius_equator: f64, radius_polar: f64) -> Self {
        debug_assert!(
            radius_equator > 0.0 && radius_polar > 0.0,
            "ellipsoid radii must be positive, got {radius_equator}, {radius_polar}"
        );
        Self {
            radius_equator,
            radius_polar,
        }
    }

    /// The WGS84 Earth ellipsoid.
    pub fn wgs84() -> Self {
        Self::new(Self::WGS84_RADIUS_EQUATOR, Self::WGS84_RADIUS_POLAR)
    }

    /// A perfect sphere of the given radius.
    pub fn sphere(radius: f64) -> Self {
        Self::new(radius, radius)
    }

    /// Semi-major (equatorial) radius.
    pub fn radius_equator(&self) -> f64 {
        self.radius_equator
    }

    /// Semi-minor (polar) radius.
    pub fn radius_polar(&self) -> f64 {
        self.radius_polar
    }

    /// First eccentricity squared: (a^2 - b^2) / a^2.
    pub fn eccentricity_squared(&self) -> f64 {
        let a2 = self.radius_equator * self.radius_equator;
        let b2 = self.radius_polar * self.radius_polar;
        (a2 - b2) / a2
    }

    /// Convert geodetic coordinates (radians, meters above the surface)
    /// to a world-space position.
    pub fn geodetic_to_world(&self, lon: f64, lat: f64, height: f64) -> DVec3 {
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        let e2 = self.eccentricity_squared();
        // Radius of curvature in the prime vertical.
        let n = self.radius_equator / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        DVec3::new(
            (n + height) * cos_lat * cos_lon,
            (n + height) * cos_lat * sin_lon,
            (n * (1.0 - e2) + height) * sin_lat,
        )
    }

    /// Build the local tangent-plane frame (east, north, up) anchored at a
    /// geodetic point on the surface, as a local-to-world transform.
    ///
    /// Local +X points east, +Y north, +Z along the geodetic up vector;
    /// the origin sits on the ellipsoid surface.
    pub fn local_to_world_frame(&self, lon: f64, lat: f64) -> DMat4 {
        let origin = self.geodetic_to_world(lon, lat, 0.0);
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();

        let east = DVec3::new(-sin_lon, cos_lon, 0.0);
        let north = DVec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
        let up = DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

        DMat4::from_cols(
            east.extend(0.0),
            north.extend(0.0),
            up.extend(0.0),
            origin.extend(1.0),
        )
    }
}
