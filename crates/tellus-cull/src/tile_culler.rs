use glam::{DMat4, DVec3};
use tellus_geo::Ellipsoid;
use tellus_math::DAabb;

use crate::{Horizon, VisibilityPredicate};

/// Per-tile horizon cull predicate.
///
/// Holds a prototype [`Horizon`] configured for the tile's reference body
/// plus the tile's four upper bounding-box corners in world space. Each
/// query clones the prototype, sets its own eye point, and passes if at
/// least one of the four corners is over the horizon. For a convex
/// terrain tile the top face is the most likely to protrude above the
/// horizon, so testing the bottom four corners as well would be redundant.
#[derive(Clone, Debug)]
pub struct HorizonTileCuller {
    horizon_proto: Horizon,
    /// Unadjusted reference-body radii; `set` rebuilds the prototype's
    /// ellipsoid from these so repeated calls never compound.
    radius_equator: f64,
    radius_polar: f64,
    local_to_world: DMat4,
    /// The four max-Z corners of the tile's bounding box, world space.
    points: [DVec3; 4],
}

impl HorizonTileCuller {
    /// Construct a culler for a tile with the given reference-body
    /// ellipsoid and local-to-world transform. Call [`set`] before the
    /// first query.
    ///
    /// [`set`]: HorizonTileCuller::set
    pub fn new(ellipsoid: Ellipsoid, local_to_world: DMat4) -> Self {
        Self {
            horizon_proto: Horizon::new(ellipsoid),
            radius_equator: ellipsoid.radius_equator(),
            radius_polar: ellipsoid.radius_polar(),
            local_to_world,
            points: [DVec3::ZERO; 4],
        }
    }

    /// Recompute cached state from a new local-space bounding box.
    ///
    /// A tile whose minimum Z dips below the reference surface (ocean
    /// floor, e.g.) may be visible even though it fails the horizon-cone
    /// test against the nominal body, so the prototype's ellipsoid is
    /// rebuilt with both radii shrunk by that (negative) offset. The
    /// adjustment always starts from the original radii.
    pub fn set(&mut self, bbox: &DAabb) {
        let z_min = bbox.corner(0).z;
        if z_min < 0.0 {
            self.horizon_proto.set_ellipsoid(Ellipsoid::new(
                self.radius_equator + z_min,
                self.radius_polar + z_min,
            ));
        } else {
            self.horizon_proto
                .set_ellipsoid(Ellipsoid::new(self.radius_equator, self.radius_polar));
        }

        // Cache the uppermost four corners of the box in world space
        // (corners 4-7 are the max-Z face).
        for i in 0..4 {
            self.points[i] = self.local_to_world.transform_point3(bbox.corner(4 + i));
        }
    }

    /// Test the tile against the horizon for an eye point given in the
    /// tile's local frame.
    ///
    /// Clones the prototype so concurrent traversals with different eye
    /// points never observe each other's state.
    pub fn query(&self, eye_local: DVec3) -> bool {
        let mut horizon = self.horizon_proto;
        horizon.set_eye(self.local_to_world.transform_point3(eye_local));

        self.points.iter().any(|p| horizon.is_visible(*p))
    }

    /// The prototype horizon model currently in effect.
    pub fn horizon(&self) -> &Horizon {
        &self.horizon_proto
    }

    /// The cached world-space top corners.
    pub fn points(&self) -> &[DVec3; 4] {
        &self.points
    }
}

impl VisibilityPredicate for HorizonTileCuller {
    fn evaluate(&self, viewpoint: DVec3) -> bool {
        self.query(viewpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f64 = 6_400_000.0;

    /// A culler for a tile whose local frame sits at (RADIUS, 0, 0) with
    /// local +Z pointing radially outward.
    fn surface_culler() -> HorizonTileCuller {
        let local_to_world = DMat4::from_cols(
            DVec3::Y.extend(0.0),
            DVec3::Z.extend(0.0),
            DVec3::X.extend(0.0),
            DVec3::new(RADIUS, 0.0, 0.0).extend(1.0),
        );
        HorizonTileCuller::new(Ellipsoid::sphere(RADIUS), local_to_world)
    }

    fn flat_tile_box(z_min: f64, z_max: f64) -> DAabb {
        DAabb::new(
            DVec3::new(-50_000.0, -50_000.0, z_min),
            DVec3::new(50_000.0, 50_000.0, z_max),
        )
    }

    /// An eye hovering over the tile sees it; an eye on the far side of
    /// the body does not.
    #[test]
    fn test_near_tile_passes_far_tile_culled() {
        let mut culler = surface_culler();
        culler.set(&flat_tile_box(0.0, 1000.0));

        // 10 km above the tile, in local coordinates.
        assert!(culler.query(DVec3::new(0.0, 0.0, 10_000.0)));

        // Far side: local Z = -3R puts the eye well beyond the antipode.
        assert!(!culler.query(DVec3::new(0.0, 0.0, -3.0 * RADIUS)));
    }

    /// A sea-level box (z_min exactly 0) leaves the ellipsoid unmodified.
    #[test]
    fn test_sea_level_box_keeps_nominal_ellipsoid() {
        let mut culler = surface_culler();
        culler.set(&flat_tile_box(0.0, 500.0));

        let e = culler.horizon().ellipsoid();
        assert_eq!(e.radius_equator(), RADIUS);
        assert_eq!(e.radius_polar(), RADIUS);
    }

    /// A box dipping below the surface shrinks both radii by exactly the
    /// z-min offset.
    #[test]
    fn test_below_surface_box_shrinks_ellipsoid() {
        let mut culler = surface_culler();
        culler.set(&flat_tile_box(-4000.0, 500.0));

        let e = culler.horizon().ellipsoid();
        assert_eq!(e.radius_equator(), RADIUS - 4000.0);
        assert_eq!(e.radius_polar(), RADIUS - 4000.0);
    }

    /// Repeated `set` calls never compound the adjustment, and a
    /// subsequent at-or-above-surface box restores the nominal radii.
    #[test]
    fn test_adjustment_does_not_compound() {
        let mut culler = surface_culler();
        culler.set(&flat_tile_box(-4000.0, 500.0));
        culler.set(&flat_tile_box(-4000.0, 500.0));
        assert_eq!(
            culler.horizon().ellipsoid().radius_equator(),
            RADIUS - 4000.0
        );

        culler.set(&flat_tile_box(0.0, 500.0));
        assert_eq!(culler.horizon().ellipsoid().radius_equator(), RADIUS);
    }

    /// The shrunk-ellipsoid adjustment is strictly more permissive: every
    /// eye that saw the tile before still sees it after.
    #[test]
    fn test_adjustment_is_more_permissive() {
        let mut nominal = surface_culler();
        nominal.set(&flat_tile_box(0.0, 100.0));
        let mut adjusted = surface_culler();
        adjusted.set(&flat_tile_box(-8000.0, 100.0));

        // Sweep eyes from overhead toward the limb.
        for i in 0..128 {
            let t = f64::from(i) / 127.0;
            let eye = DVec3::new(t * 2_000_000.0, 0.0, 20_000.0 * (1.0 - t) + 100.0);
            if nominal.query(eye) {
                assert!(
                    adjusted.query(eye),
                    "eye {eye:?} saw the nominal tile but not the adjusted one"
                );
            }
        }
    }

    /// The cached corners are the world-transformed max-Z corners of the
    /// most recent box.
    #[test]
    fn test_set_caches_top_corners_of_latest_box() {
        let mut culler = surface_culler();
        culler.set(&flat_tile_box(0.0, 1000.0));
        culler.set(&flat_tile_box(0.0, 2500.0));

        for p in culler.points() {
            // Local z = 2500 maps to world x = RADIUS + 2500.
            assert!((p.x - (RADIUS + 2500.0)).abs() < 1e-6);
        }
    }

    /// Two concurrent queries with different eye points must not observe
    /// each other's eye: each result depends only on its own.
    #[test]
    fn test_concurrent_queries_do_not_cross_talk() {
        let mut culler = surface_culler();
        culler.set(&flat_tile_box(0.0, 1000.0));

        let near_eye = DVec3::new(0.0, 0.0, 10_000.0);
        let far_eye = DVec3::new(0.0, 0.0, -3.0 * RADIUS);
        assert!(culler.query(near_eye));
        assert!(!culler.query(far_eye));

        let culler = &culler;
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    s.spawn(move || {
                        let (eye, expected) = if i % 2 == 0 {
                            (near_eye, true)
                        } else {
                            (far_eye, false)
                        };
                        (0..1000).all(|_| culler.query(eye) == expected)
                    })
                })
                .collect();
            for handle in handles {
                assert!(
                    handle.join().unwrap(),
                    "a query observed a result inconsistent with its own eye point"
                );
            }
        });
    }

    /// The culler is consumable through the capability trait.
    #[test]
    fn test_visibility_predicate_impl() {
        let mut culler = surface_culler();
        culler.set(&flat_tile_box(0.0, 1000.0));

        let predicate: &dyn VisibilityPredicate = &culler;
        assert!(predicate.evaluate(DVec3::new(0.0, 0.0, 10_000.0)));
        assert!(!predicate.evaluate(DVec3::new(0.0, 0.0, -3.0 * RADIUS)));
    }
}
