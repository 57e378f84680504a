use glam::{UVec2, Vec3, Vec4Swizzles};

use crate::{F32Ext, Tex};

/// Geometric properties of the primary surface, as used by the edge-stopping
/// functions.
#[derive(Clone, Copy, Debug)]
pub struct Surface {
    pub normal: Vec3,
    pub position: Vec3,
    pub depth: f32,
}

impl Surface {
    pub fn is_sky(&self) -> bool {
        self.depth == 0.0
    }

    /// Returns distance (in world units) between `other` and the plane
    /// tangent to this surface.
    ///
    /// Zero for any two points of the same plane, no matter how slanted or
    /// how far away it is.
    pub fn plane_distance(&self, other: &Self) -> f32 {
        self.normal.dot(other.position - self.position).abs()
    }

    /// Returns a score `<0.0, 1.0>` that says how likely both surfaces belong
    /// to the same object, judging by their positions.
    ///
    /// Falls off linearly and reaches zero once `other` lays further than
    /// `sigma` world units from this surface's plane.
    pub fn depth_weight(&self, other: &Self, sigma: f32) -> f32 {
        let leeway = sigma.max(crate::VOXRAY_EPSILON);

        (1.0 - self.plane_distance(other) / leeway).saturate()
    }

    /// Returns a score `<0.0, 1.0>` that says how similar both surfaces are,
    /// judging by their normals.
    pub fn normal_weight(&self, other: &Self, sigma: f32) -> f32 {
        self.normal.dot(other.normal).max(0.0).powf(sigma)
    }
}

#[derive(Clone, Copy)]
pub struct SurfaceMap<'a> {
    normals: Tex<'a>,
    positions: Tex<'a>,
}

impl<'a> SurfaceMap<'a> {
    pub fn new(normals: Tex<'a>, positions: Tex<'a>) -> Self {
        Self { normals, positions }
    }

    pub fn get(&self, screen_pos: UVec2) -> Surface {
        let position = self.positions.read(screen_pos);

        Surface {
            normal: self.normals.read(screen_pos).xyz(),
            position: position.xyz(),
            depth: position.w,
        }
    }
}
