use glam::{DMat4, DVec3, Mat4};
use tracing::trace;

use tellus_cull::HorizonTileCuller;
use tellus_geo::{Ellipsoid, Profile, TileKey};
use tellus_math::DAabb;

use crate::{ElevationRaster, TileDebugNode, TileDrawable};

/// The number of quadrant children a tile subdivides into.
const CHILD_COUNT: usize = 4;

/// A tile's spatial container in the render set.
///
/// Owns the renderable drawable, anchors a local tangent-plane frame at
/// the tile's geographic centroid, and caches world-space bounding
/// geometry for the tile and its four potential children. The horizon
/// culler owned here is the tile's per-frame visibility predicate; the
/// child-corner cache backs the subdivision distance test an external
/// LOD policy drives.
///
/// Updates (`set_elevation_raster`) take `&mut self` and must not overlap
/// concurrent queries against the same tile; the traversal engine's frame
/// boundary provides that separation. Queries themselves are `&self` and
/// safe to run from several traversals at once.
pub struct SurfaceTile {
    key: TileKey,
    ellipsoid: Ellipsoid,
    local_to_world: DMat4,
    drawable: Option<Box<dyn TileDrawable>>,
    /// World-space corners of the four potential children, 8 corners each.
    child_corners: [[DVec3; 8]; CHILD_COUNT],
    culler: Option<HorizonTileCuller>,
    debug_node: Option<TileDebugNode>,
    show_tile_bounds: bool,
    bounds_dirty: bool,
}

impl SurfaceTile {
    /// Create a tile node for `key` under `profile`, taking ownership of
    /// its drawable.
    ///
    /// The local frame is anchored at the geodetic centroid of the tile's
    /// extent. `show_tile_bounds` gates the debug wireframe/label
    /// geometry and comes from configuration, not ambient process state.
    /// Initial bounding state is established by an immediate raster-less
    /// update.
    pub fn new(
        key: TileKey,
        profile: &Profile,
        drawable: Box<dyn TileDrawable>,
        show_tile_bounds: bool,
    ) -> Self {
        let (lon, lat) = key.extent(profile).centroid();
        let ellipsoid = profile.ellipsoid();
        let local_to_world = ellipsoid.local_to_world_frame(lon.to_radians(), lat.to_radians());

        let mut tile = Self {
            key,
            ellipsoid,
            local_to_world,
            drawable: Some(drawable),
            child_corners: [[DVec3::ZERO; 8]; CHILD_COUNT],
            culler: None,
            debug_node: None,
            show_tile_bounds,
            bounds_dirty: false,
        };
        tile.set_elevation_raster(None, Mat4::IDENTITY);
        tile
    }

    /// The tile's quadtree key.
    pub fn key(&self) -> TileKey {
        self.key
    }

    /// The local tangent-plane to world transform.
    pub fn local_to_world(&self) -> DMat4 {
        self.local_to_world
    }

    /// Assign new elevation data and recompute all cached bounding state.
    ///
    /// Forwards the raster to the drawable, reads the displaced bounding
    /// box back, rebuilds the four child corner sets in world space,
    /// refreshes (lazily creating) the horizon culler, and replaces the
    /// debug geometry when enabled. A tile without a drawable skips the
    /// update entirely.
    pub fn set_elevation_raster(&mut self, raster: Option<ElevationRaster>, scale_bias: Mat4) {
        let Some(drawable) = self.drawable.as_mut() else {
            trace!(key = %self.key, "elevation update on tile without drawable, skipped");
            return;
        };

        if let Some(raster) = raster {
            drawable.set_elevation_raster(raster, scale_bias);
        }

        let bbox = drawable.bounding_box();

        self.child_corners = child_corner_sets(&bbox);
        for corners in &mut self.child_corners {
            for corner in corners.iter_mut() {
                *corner = self.local_to_world.transform_point3(*corner);
            }
        }

        if self.show_tile_bounds {
            self.debug_node = Some(TileDebugNode::new(&bbox, self.key));
        }

        let culler = self
            .culler
            .get_or_insert_with(|| HorizonTileCuller::new(self.ellipsoid, self.local_to_world));
        culler.set(&bbox);

        self.bounds_dirty = true;
    }

    /// Would the viewpoint trigger refinement into any of the four
    /// potential children?
    ///
    /// For each child, takes the minimum squared distance from `center`
    /// (world space) to that child's eight corners, scaled by
    /// `zoom_factor` squared, and compares it against `radius_squared`.
    pub fn any_child_box_intersects_sphere(
        &self,
        center: DVec3,
        radius_squared: f64,
        zoom_factor: f64,
    ) -> bool {
        let z2 = zoom_factor * zoom_factor;
        self.child_corners
            .iter()
            .any(|corners| min_squared_distance_from_point(corners, center, z2) <= radius_squared)
    }

    /// The cached world-space corners of one potential child (0-3).
    pub fn child_corners(&self, child: usize) -> &[DVec3; 8] {
        &self.child_corners[child]
    }

    /// The horizon culler, once the first bounding update has created it.
    pub fn culler(&self) -> Option<&HorizonTileCuller> {
        self.culler.as_ref()
    }

    /// The current elevation raster, if a drawable holds one.
    pub fn elevation_raster(&self) -> Option<&ElevationRaster> {
        self.drawable.as_deref().and_then(|d| d.elevation_raster())
    }

    /// The scale/bias matrix for the current raster.
    pub fn elevation_matrix(&self) -> Mat4 {
        self.drawable
            .as_deref()
            .map_or(Mat4::IDENTITY, |d| d.elevation_matrix())
    }

    /// The tile-aligned local-space bounding box, as reported by the
    /// drawable. Invalid (empty) when no drawable is attached.
    pub fn aligned_bounding_box(&self) -> DAabb {
        self.drawable
            .as_deref()
            .map_or_else(DAabb::default, |d| d.bounding_box())
    }

    /// The debug geometry, when enabled and built.
    pub fn debug_node(&self) -> Option<&TileDebugNode> {
        self.debug_node.as_ref()
    }

    /// Replace the debug label text. No-op if no debug label exists.
    pub fn set_debug_text(&mut self, text: &str) {
        if let Some(node) = self.debug_node.as_mut() {
            node.set_text(text);
        }
    }

    /// Detach and return the drawable (tile eviction path). Subsequent
    /// elevation updates are skipped.
    pub fn take_drawable(&mut self) -> Option<Box<dyn TileDrawable>> {
        self.drawable.take()
    }

    /// True when cached bounding state changed since the last
    /// [`clear_bounds_dirty`]; the traversal engine uses this to
    /// recompute its culling bounds.
    ///
    /// [`clear_bounds_dirty`]: SurfaceTile::clear_bounds_dirty
    pub fn bounds_dirty(&self) -> bool {
        self.bounds_dirty
    }

    /// Acknowledge the dirty flag.
    pub fn clear_bounds_dirty(&mut self) {
        self.bounds_dirty = false;
    }
}

/// Minimum squared distance from `center` to any of the eight corners,
/// with the squared zoom scale applied uniformly.
fn min_squared_distance_from_point(corners: &[DVec3; 8], center: DVec3, zoom_squared: f64) -> f64 {
    let mut min_d2 = f64::MAX;
    for corner in corners {
        let d2 = (*corner - center).length_squared() * zoom_squared;
        if d2 < min_d2 {
            min_d2 = d2;
        }
    }
    min_d2
}

/// Derive the corner sets of the four quadrant children from a parent
/// box, in the parent's local space.
///
/// The combinatorial mapping is a fixed contract: child k touches parent
/// corner k, its two adjacent edge midpoints, and the face center, on the
/// min-Z and max-Z faces independently. Changing which points compose
/// which child silently changes culling and LOD behavior downstream.
fn child_corner_sets(bbox: &DAabb) -> [[DVec3; 8]; CHILD_COUNT] {
    // Edge midpoints of the min-Z face...
    let min_z_medians = [
        (bbox.corner(0) + bbox.corner(1)) * 0.5,
        (bbox.corner(1) + bbox.corner(3)) * 0.5,
        (bbox.corner(3) + bbox.corner(2)) * 0.5,
        (bbox.corner(0) + bbox.corner(2)) * 0.5,
    ];
    // ...and of the max-Z face.
    let max_z_medians = [
        (bbox.corner(4) + bbox.corner(5)) * 0.5,
        (bbox.corner(5) + bbox.corner(7)) * 0.5,
        (bbox.corner(7) + bbox.corner(6)) * 0.5,
        (bbox.corner(4) + bbox.corner(6)) * 0.5,
    ];
    let min_z_center = (min_z_medians[0] + min_z_medians[2]) * 0.5;
    let max_z_center = (max_z_medians[0] + max_z_medians[2]) * 0.5;

    [
        [
            bbox.corner(0),
            min_z_medians[0],
            min_z_medians[3],
            min_z_center,
            bbox.corner(4),
            max_z_medians[0],
            max_z_medians[3],
            max_z_center,
        ],
        [
            min_z_medians[0],
            bbox.corner(1),
            min_z_center,
            min_z_medians[1],
            max_z_medians[0],
            bbox.corner(5),
            max_z_center,
            max_z_medians[1],
        ],
        [
            min_z_medians[3],
            min_z_center,
            bbox.corner(2),
            min_z_medians[2],
            max_z_medians[3],
            max_z_center,
            bbox.corner(6),
            max_z_medians[2],
        ],
        [
            min_z_center,
            min_z_medians[1],
            min_z_medians[2],
            bbox.corner(3),
            max_z_center,
            max_z_medians[1],
            max_z_medians[2],
            bbox.corner(7),
        ],
    ]
}
