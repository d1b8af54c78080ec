//! The world box.

use blob_core::Vec3;

/// Axis-aligned box from the origin to `max`, both ends inclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub max: Vec3,
}

impl Bounds {
    /// Box `[0, length] × [0, width] × [0, height]`.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self { max: Vec3::new(length, width, height) }
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        (0.0..=self.max.x).contains(&p.x)
            && (0.0..=self.max.y).contains(&p.y)
            && (0.0..=self.max.z).contains(&p.z)
    }

    /// Nearest point inside the box.
    #[inline]
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        p.clamp(Vec3::ZERO, self.max)
    }
}

impl From<Vec3> for Bounds {
    fn from(max: Vec3) -> Self {
        Self { max }
    }
}
