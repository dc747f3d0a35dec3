//! Horizon occlusion culling for terrain tiles over a curved reference body.
//!
//! Eliminates tiles that are geometrically below the visible horizon of
//! the reference ellipsoid. At surface level this can cull around half of
//! all active tiles before any frustum test runs.

mod horizon;
mod tile_culler;
mod visibility;

pub use horizon::Horizon;
pub use tile_culler::HorizonTileCuller;
pub use visibility::VisibilityPredicate;
