use glam::{UVec2, Vec4};

/// Read-only view into a screen-sized texture.
///
/// That's how kernels see their inputs; outputs are returned from the kernel
/// and written by the host, so a kernel can never write into a texture it
/// wasn't given as an output.
#[derive(Clone, Copy)]
pub struct Tex<'a> {
    texels: &'a [Vec4],
    size: UVec2,
}

impl<'a> Tex<'a> {
    pub fn new(texels: &'a [Vec4], size: UVec2) -> Self {
        assert_eq!(
            texels.len(),
            (size.x as usize) * (size.y as usize),
            "texture doesn't match its size"
        );

        Self { texels, size }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn read(&self, pos: UVec2) -> Vec4 {
        self.texels[(pos.y * self.size.x + pos.x) as usize]
    }
}
