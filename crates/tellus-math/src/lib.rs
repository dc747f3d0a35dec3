//! Geometry primitives shared by the terrain culling crates.

mod aabb;

pub use aabb::DAabb;
