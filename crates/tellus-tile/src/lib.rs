//! Surface tile container: per-tile bounding geometry, quadtree child
//! subdivision, horizon culler ownership, and debug visualization data.

mod debug;
mod drawable;
mod surface_tile;

pub use debug::{TileDebugLabel, TileDebugNode};
pub use drawable::{ElevationRaster, TileDrawable};
pub use surface_tile::SurfaceTile;
