use bytemuck::{Pod, Zeroable};
use glam::{vec4, Vec3, Vec4, Vec4Swizzles};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Material {
    /// x, y, z - albedo
    /// w - emission strength
    pub d0: Vec4,
}

impl Material {
    /// Material used for voxels referring to a material that doesn't exist;
    /// bright magenta, so that it stands out.
    pub const MISSING: Self = Self {
        d0: vec4(1.0, 0.0, 1.0, 0.0),
    };

    pub fn new(albedo: Vec3, emission: f32) -> Self {
        Self {
            d0: albedo.extend(emission),
        }
    }

    pub fn albedo(&self) -> Vec3 {
        self.d0.xyz()
    }

    pub fn emission(&self) -> f32 {
        self.d0.w
    }
}

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct MaterialId(u32);

impl MaterialId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy)]
pub struct MaterialsView<'a> {
    items: &'a [Material],
}

impl<'a> MaterialsView<'a> {
    pub fn new(items: &'a [Material]) -> Self {
        Self { items }
    }

    pub fn get(&self, id: MaterialId) -> Material {
        self.items
            .get(id.get() as usize)
            .copied()
            .unwrap_or(Material::MISSING)
    }
}
