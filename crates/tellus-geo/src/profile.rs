//! Map profile: the coordinate reference a tile pyramid is built over.

use crate::{Ellipsoid, GeoExtent, TileKey};

/// The spatial reference and tiling layout of a map.
///
/// This is the immutable specification of the tile pyramid: the world
/// extent it covers, the reference-body ellipsoid, and the root tile grid
/// that level 0 partitions the extent into. It does not contain runtime
/// state (loaded tiles, caches) — those belong to the render set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Profile {
    extent: GeoExtent,
    ellipsoid: Ellipsoid,
    root_tiles_x: u32,
    root_tiles_y: u32,
}

impl Profile {
    /// Construct a profile from an extent, an ellipsoid, and the root
    /// tile grid dimensions.
    pub fn new(extent: GeoExtent, ellipsoid: Ellipsoid, root_tiles_x: u32, root_tiles_y: u32) -> Self {
        debug_assert!(
            root_tiles_x > 0 && root_tiles_y > 0,
            "root tile grid must be non-empty, got {root_tiles_x}x{root_tiles_y}"
        );
        Self {
            extent,
            ellipsoid,
            root_tiles_x,
            root_tiles_y,
        }
    }

    /// The standard global geodetic profile: whole-world extent over
    /// WGS84, with a 2x1 root tile grid.
    pub fn global_geodetic() -> Self {
        Self::new(
            GeoExtent::new(-180.0, -90.0, 180.0, 90.0),
            Ellipsoid::wgs84(),
            2,
            1,
        )
    }

    /// The world extent this profile covers.
    pub fn extent(&self) -> GeoExtent {
        self.extent
    }

    /// The reference-body ellipsoid.
    pub fn ellipsoid(&self) -> Ellipsoid {
        self.ellipsoid
    }

    /// Tile grid dimensions (columns, rows) at the given level.
    pub fn tiles_at_level(&self, lod: u32) -> (u32, u32) {
        (self.root_tiles_x << lod, self.root_tiles_y << lod)
    }

    /// The geographic extent of one tile. Row 0 is the northernmost row.
    pub fn tile_extent(&self, key: TileKey) -> GeoExtent {
        let (cols, rows) = self.tiles_at_level(key.lod);
        let tile_width = self.extent.width() / f64::from(cols);
        let tile_height = self.extent.height() / f64::from(rows);

        let west = self.extent.west + f64::from(key.x) * tile_width;
        let north = self.extent.north - f64::from(key.y) * tile_height;
        GeoExtent::new(west, north - tile_height, west + tile_width, north)
    }
}
