//! Tile debug visualization data: wireframe bounds and a key/extent label.
//!
//! The tile core produces this as plain data; whatever overlay renders it
//! (lines, screen-space text) lives outside the core.

use glam::DVec3;
use tellus_geo::TileKey;
use tellus_math::DAabb;

/// A screen-anchored debug label.
#[derive(Clone, Debug, PartialEq)]
pub struct TileDebugLabel {
    /// Label text.
    pub text: String,
    /// Anchor position in tile-local space.
    pub position: DVec3,
}

/// Debug geometry for one tile: the top face of its bounding box as a
/// line list, plus a label carrying the tile key and Z extent.
#[derive(Clone, Debug, PartialEq)]
pub struct TileDebugNode {
    lines: Vec<[DVec3; 2]>,
    label: TileDebugLabel,
}

impl TileDebugNode {
    /// Build debug geometry for a tile's local-space bounding box.
    ///
    /// For an invalid (never-expanded) box the line list is empty and the
    /// label shows a placeholder instead of the Z extent.
    pub fn new(bbox: &DAabb, key: TileKey) -> Self {
        if !bbox.valid() {
            return Self {
                lines: Vec::new(),
                label: TileDebugLabel {
                    text: "(empty)".to_string(),
                    position: DVec3::ZERO,
                },
            };
        }

        // Top face only: edges 4-5, 5-7, 7-6, 6-4.
        let lines = vec![
            [bbox.corner(4), bbox.corner(5)],
            [bbox.corner(5), bbox.corner(7)],
            [bbox.corner(7), bbox.corner(6)],
            [bbox.corner(6), bbox.corner(4)],
        ];
        let label = TileDebugLabel {
            text: format!("{key}\nmax={}\nmin={}", bbox.z_max(), bbox.z_min()),
            position: DVec3::new(0.0, 0.0, bbox.z_max()),
        };
        Self { lines, label }
    }

    /// The wireframe line list (tile-local space).
    pub fn lines(&self) -> &[[DVec3; 2]] {
        &self.lines
    }

    /// The debug label.
    pub fn label(&self) -> &TileDebugLabel {
        &self.label
    }

    /// Replace the label text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.label.text = text.into();
    }
}
