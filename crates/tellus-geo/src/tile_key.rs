use std::fmt;

use crate::{GeoExtent, Profile};

/// A tile's position in the quadtree pyramid: level, column, row.
///
/// Row 0 is the northernmost row. A key is meaningful only together with
/// the [`Profile`] whose pyramid it indexes; the key itself is a plain
/// value, immutable for the lifetime of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileKey {
    /// Quadtree level (0 = root grid).
    pub lod: u32,
    /// Column, west to east.
    pub x: u32,
    /// Row, north to south.
    pub y: u32,
}

impl TileKey {
    /// Create a key from level, column, and row.
    pub fn new(lod: u32, x: u32, y: u32) -> Self {
        Self { lod, x, y }
    }

    /// The geographic extent of this tile under the given profile.
    pub fn extent(&self, profile: &Profile) -> GeoExtent {
        profile.tile_extent(*self)
    }

    /// The four quadrant children at the next level, ordered
    /// \[north-west, north-east, south-west, south-east\].
    pub fn children(&self) -> [TileKey; 4] {
        let lod = self.lod + 1;
        let x = self.x * 2;
        let y = self.y * 2;
        [
            TileKey::new(lod, x, y),
            TileKey::new(lod, x + 1, y),
            TileKey::new(lod, x, y + 1),
            TileKey::new(lod, x + 1, y + 1),
        ]
    }

    /// The parent key, or `None` at level 0.
    pub fn parent(&self) -> Option<TileKey> {
        if self.lod == 0 {
            return None;
        }
        Some(TileKey::new(self.lod - 1, self.x / 2, self.y / 2))
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.lod, self.x, self.y)
    }
}
