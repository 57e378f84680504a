use glam::Vec3;

use crate::MaterialId;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub distance: f32,
    pub position: Vec3,
    pub normal: Vec3,
    pub material_id: MaterialId,

    /// Identifier of the object (e.g. chunk) that's been hit; `0` is reserved
    /// for "nothing".
    pub object_id: u32,
}

impl Hit {
    pub fn none() -> Self {
        Self {
            distance: f32::MAX,
            position: Vec3::ZERO,
            normal: Vec3::ZERO,
            material_id: MaterialId::new(0),
            object_id: 0,
        }
    }

    pub fn is_some(&self) -> bool {
        self.distance < f32::MAX
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }
}
