use glam::DVec3;
use tellus_geo::Ellipsoid;

/// Horizon occlusion test against an ellipsoidal reference body.
///
/// A point is visible if the line segment from the eye to the point does
/// not pass through the solid body. The test works in the anisotropically
/// scaled space that maps the ellipsoid onto the unit sphere (x and y
/// divided by the equatorial radius, z by the polar radius), where the
/// horizon of a unit sphere has a closed form.
///
/// Instances are used prototype-style: a culler holds one `Horizon` with
/// the ellipsoid configured, and each query clones it and sets its own
/// eye point. The clone is a cheap value copy, so concurrent queries
/// never share mutable state.
#[derive(Clone, Copy, Debug)]
pub struct Horizon {
    ellipsoid: Ellipsoid,
    /// Per-axis scale taking world coordinates into unit-sphere space.
    scale: DVec3,
    /// Eye position in world space.
    eye: DVec3,
    /// Eye position in unit-sphere space.
    eye_scaled: DVec3,
    /// Squared distance from the scaled eye to its horizon; <= 0 when the
    /// eye is on or inside the ellipsoid.
    vh_mag2: f64,
}

impl Horizon {
    /// Create a horizon model for the given ellipsoid, with the eye at
    /// the body center (everything visible until [`set_eye`] is called).
    ///
    /// [`set_eye`]: Horizon::set_eye
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        let mut horizon = Self {
            ellipsoid,
            scale: DVec3::ONE,
            eye: DVec3::ZERO,
            eye_scaled: DVec3::ZERO,
            vh_mag2: -1.0,
        };
        horizon.set_ellipsoid(ellipsoid);
        horizon
    }

    /// Replace the reference ellipsoid, keeping the current eye point.
    pub fn set_ellipsoid(&mut self, ellipsoid: Ellipsoid) {
        self.ellipsoid = ellipsoid;
        self.scale = DVec3::new(
            1.0 / ellipsoid.radius_equator(),
            1.0 / ellipsoid.radius_equator(),
            1.0 / ellipsoid.radius_polar(),
        );
        self.rederive_eye_state();
    }

    /// Set the eye position in world space.
    pub fn set_eye(&mut self, eye: DVec3) {
        self.eye = eye;
        self.rederive_eye_state();
    }

    fn rederive_eye_state(&mut self) {
        self.eye_scaled = self.eye * self.scale;
        self.vh_mag2 = self.eye_scaled.length_squared() - 1.0;
    }

    /// The ellipsoid currently in effect.
    pub fn ellipsoid(&self) -> Ellipsoid {
        self.ellipsoid
    }

    /// The eye position in world space.
    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    /// Test whether a world-space point is over the horizon (potentially
    /// visible) from the current eye.
    ///
    /// Returns `true` when the eye is on or inside the ellipsoid: there is
    /// no horizon to occlude against in that case.
    pub fn is_visible(&self, point: DVec3) -> bool {
        if self.vh_mag2 <= 0.0 {
            return true;
        }

        // In unit-sphere space, with scaled eye c and scaled target t,
        // the target is occluded iff it lies both behind the horizon
        // plane and inside the horizon cone:
        //   vt . (-c) > vh^2   and   (vt . (-c))^2 > vh^2 * |vt|^2
        // where vt = t - c and vh^2 = |c|^2 - 1.
        let vt = point * self.scale - self.eye_scaled;
        let vt_dot_vc = -vt.dot(self.eye_scaled);

        let behind_horizon_plane = vt_dot_vc > self.vh_mag2;
        let inside_horizon_cone = vt_dot_vc * vt_dot_vc > self.vh_mag2 * vt.length_squared();

        !(behind_horizon_plane && inside_horizon_cone)
    }
}
