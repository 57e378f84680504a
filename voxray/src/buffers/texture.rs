use std::path::Path;

use derivative::Derivative;
use glam::{UVec2, Vec4};
use image::{DynamicImage, ImageBuffer, Rgba, Rgba32FImage};
use log::debug;

use crate::{gpu, Error};

/// Screen-sized, host-side texture of `Vec4` texels.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Texture {
    label: &'static str,
    size: UVec2,

    #[derivative(Debug = "ignore")]
    texels: Vec<Vec4>,
}

impl Texture {
    pub fn new(label: &'static str, size: UVec2) -> Result<Self, Error> {
        debug!("Allocating texture `{label}`; size={:?}", size);

        if size.x == 0 || size.y == 0 {
            return Err(Error::InvalidViewport { size });
        }

        let len = (size.x as usize)
            .checked_mul(size.y as usize)
            .ok_or(Error::OutOfMemory { label, size })?;

        let mut texels = Vec::new();

        texels
            .try_reserve_exact(len)
            .map_err(|_| Error::OutOfMemory { label, size })?;

        texels.resize(len, Vec4::ZERO);

        Ok(Self {
            label,
            size,
            texels,
        })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn texels(&self) -> &[Vec4] {
        &self.texels
    }

    pub fn read(&self, pos: UVec2) -> Vec4 {
        self.readable().read(pos)
    }

    pub fn readable(&self) -> gpu::Tex<'_> {
        gpu::Tex::new(&self.texels, self.size)
    }

    pub(crate) fn texels_mut(&mut self) -> &mut [Vec4] {
        &mut self.texels
    }

    #[cfg(test)]
    pub(crate) fn fill(&mut self, value: Vec4) {
        self.texels.fill(value);
    }

    /// Exchanges contents of both textures, keeping their labels.
    pub(crate) fn swap_texels(&mut self, other: &mut Self) {
        assert_eq!(self.size, other.size);

        std::mem::swap(&mut self.texels, &mut other.texels);
    }

    pub fn to_image(&self) -> Rgba32FImage {
        ImageBuffer::from_fn(self.size.x, self.size.y, |x, y| {
            let texel = self.read(UVec2::new(x, y));

            Rgba([texel.x, texel.y, texel.z, texel.w])
        })
    }

    /// Saves the texture as an 8-bit image; format is deduced from the path's
    /// extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();

        debug!("Saving texture `{}` into `{}`", self.label, path.display());

        DynamicImage::ImageRgba32F(self.to_image())
            .into_rgba8()
            .save(path)?;

        Ok(())
    }
}
