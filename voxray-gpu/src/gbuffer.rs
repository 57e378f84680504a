use glam::{vec4, UVec2, Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::{MaterialId, Tex};

/// Per-pixel data of the primary surface, packed into four textures:
///
/// - d0: normal (xyz), material id (w, as bits),
/// - d1: world position (xyz), linear depth (w),
/// - d2: albedo (xyz), emission (w),
/// - d3: motion vector (xy), object id (z, as bits), motion validity (w).
///
/// Depth of `0.0` marks sky.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GBufferEntry {
    pub normal: Vec3,
    pub material_id: MaterialId,
    pub position: Vec3,
    pub depth: f32,
    pub albedo: Vec3,
    pub emission: f32,
    pub motion: Vec2,
    pub object_id: u32,
    pub has_motion: bool,
}

impl GBufferEntry {
    pub fn unpack([d0, d1, d2, d3]: [Vec4; 4]) -> Self {
        Self {
            normal: d0.xyz(),
            material_id: MaterialId::new(d0.w.to_bits()),
            position: d1.xyz(),
            depth: d1.w,
            albedo: d2.xyz(),
            emission: d2.w,
            motion: d3.xy(),
            object_id: d3.z.to_bits(),
            has_motion: d3.w > 0.0,
        }
    }

    pub fn pack(self) -> [Vec4; 4] {
        let d0 = self
            .normal
            .extend(f32::from_bits(self.material_id.get()));

        let d1 = self.position.extend(self.depth);
        let d2 = self.albedo.extend(self.emission);

        let d3 = vec4(
            self.motion.x,
            self.motion.y,
            f32::from_bits(self.object_id),
            if self.has_motion { 1.0 } else { 0.0 },
        );

        [d0, d1, d2, d3]
    }

    pub fn is_some(&self) -> bool {
        self.depth != Default::default()
    }

    pub fn is_sky(&self) -> bool {
        !self.is_some()
    }
}

#[derive(Clone, Copy)]
pub struct GBufferMap<'a> {
    pub d0: Tex<'a>,
    pub d1: Tex<'a>,
    pub d2: Tex<'a>,
    pub d3: Tex<'a>,
}

impl<'a> GBufferMap<'a> {
    pub fn get(&self, screen_pos: UVec2) -> GBufferEntry {
        GBufferEntry::unpack([
            self.d0.read(screen_pos),
            self.d1.read(screen_pos),
            self.d2.read(screen_pos),
            self.d3.read(screen_pos),
        ])
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{vec2, vec3};

    use super::*;

    #[test]
    fn serialization() {
        let target = GBufferEntry {
            normal: vec3(0.26, 0.53, 0.80),
            material_id: MaterialId::new(7),
            position: vec3(1.0, -2.0, 3.5),
            depth: 123.456,
            albedo: vec3(0.1, 0.2, 0.3),
            emission: 4.0,
            motion: vec2(-1.5, 0.25),
            object_id: 1234,
            has_motion: true,
        };

        let target = GBufferEntry::unpack(target.pack());

        assert_relative_eq!(target.normal.x, 0.26);
        assert_relative_eq!(target.normal.y, 0.53);
        assert_relative_eq!(target.normal.z, 0.80);
        assert_eq!(target.material_id, MaterialId::new(7));
        assert_relative_eq!(target.depth, 123.456);
        assert_relative_eq!(target.emission, 4.0);
        assert_relative_eq!(target.motion.x, -1.5);
        assert_eq!(target.object_id, 1234);
        assert!(target.has_motion);
        assert!(target.is_some());
    }

    #[test]
    fn sky() {
        let target = GBufferEntry::unpack(GBufferEntry::default().pack());

        assert!(target.is_sky());
        assert!(!target.has_motion);
        assert_eq!(target.object_id, 0);
    }
}
