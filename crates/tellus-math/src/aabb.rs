use glam::DVec3;

/// Axis-aligned bounding box in f64 local space.
///
/// Invariant: once valid, min.x <= max.x, min.y <= max.y, min.z <= max.z.
/// The two-point constructor enforces this by sorting components.
///
/// Corners follow a fixed indexing convention the culling code depends on:
/// bit 0 of the index selects max.x over min.x, bit 1 selects max.y, and
/// bit 2 selects max.z. Corners 0-3 therefore form the min-Z face and
/// corners 4-7 the max-Z face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DAabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Default for DAabb {
    /// An empty, invalid box (min > max on every axis). Expanding it by
    /// any point makes it valid.
    fn default() -> Self {
        Self {
            min: DVec3::splat(f64::MAX),
            max: DVec3::splat(f64::MIN),
        }
    }
}

impl DAabb {
    /// Create an AABB from two corners. Automatically sorts components
    /// so that min <= max on every axis.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Returns false for an empty box that has never been expanded.
    pub fn valid(&self) -> bool {
        self.max.x >= self.min.x && self.max.y >= self.min.y && self.max.z >= self.min.z
    }

    /// Return corner `i` (0-7) per the indexing convention above.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `i >= 8`.
    pub fn corner(&self, i: usize) -> DVec3 {
        debug_assert!(i < 8, "corner index out of range: {i}");
        DVec3::new(
            if i & 1 != 0 { self.max.x } else { self.min.x },
            if i & 2 != 0 { self.max.y } else { self.min.y },
            if i & 4 != 0 { self.max.z } else { self.min.z },
        )
    }

    /// Grow the box to include the given point.
    pub fn expand_by_point(&mut self, p: DVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Returns the smallest AABB enclosing both self and other.
    pub fn union(&self, other: &DAabb) -> DAabb {
        DAabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: DVec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Returns the center point of the AABB.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the size along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Minimum Z over the box (the floor of the min-Z face).
    pub fn z_min(&self) -> f64 {
        self.min.z
    }

    /// Maximum Z over the box (the ceiling of the max-Z face).
    pub fn z_max(&self) -> f64 {
        self.max.z
    }

    /// Returns true if the box is valid but has zero extent on at least
    /// one axis.
    pub fn is_degenerate(&self) -> bool {
        self.valid()
            && (self.min.x == self.max.x || self.min.y == self.max.y || self.min.z == self.max.z)
    }
}
