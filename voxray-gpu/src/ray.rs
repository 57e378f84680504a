use glam::Vec3;

use crate::SURFACE_OFFSET;

#[derive(Copy, Clone, Debug, Default)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    inv_direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: 1.0 / direction,
        }
    }

    /// Creates a ray that starts at given surface and goes towards given
    /// direction; the origin is nudged along the normal so that the ray
    /// doesn't hit the surface it starts at.
    pub fn from_surface(point: Vec3, normal: Vec3, direction: Vec3) -> Self {
        Self::new(point + normal * SURFACE_OFFSET, direction)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn inv_direction(&self) -> Vec3 {
        self.inv_direction
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}
