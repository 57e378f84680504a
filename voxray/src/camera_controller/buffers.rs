use std::ops::Index;

use glam::{UVec2, Vec4};
use log::debug;

use crate::{gpu, Camera, Error, Texture};

/// Role of a per-camera buffer.
///
/// Each role maps to exactly one texture; roles prefixed with `Prev` (and
/// [`BufferRole::History`]) hold previous frame's data and get refreshed by
/// the frame's commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferRole {
    /// xyz - normal, w - material id (as bits)
    GBufferNormals,

    /// xyz - world position, w - linear depth (0 for sky)
    GBufferPositions,

    /// xyz - albedo, w - emission
    GBufferAlbedo,

    /// xy - motion vector, z - object id (as bits), w - motion validity
    GBufferMotion,

    PrevGBufferNormals,
    PrevGBufferPositions,
    PrevGBufferAlbedo,
    PrevGBufferMotion,

    DirectLight,
    IndirectLight,

    /// x - ambient occlusion factor
    AmbientOcclusion,

    /// xyz - noisy lighting, input of the denoiser
    Signal,

    /// xyz - blended lighting, w - history length
    Reprojected,

    /// x - first moment, y - second moment, z - history length
    Moments,

    History,
    PrevMoments,

    /// xyz - lighting, w - variance
    Variance,

    FilterPing,
    FilterPong,

    Output,
}

impl BufferRole {
    pub const ALL: [Self; 20] = [
        Self::GBufferNormals,
        Self::GBufferPositions,
        Self::GBufferAlbedo,
        Self::GBufferMotion,
        Self::PrevGBufferNormals,
        Self::PrevGBufferPositions,
        Self::PrevGBufferAlbedo,
        Self::PrevGBufferMotion,
        Self::DirectLight,
        Self::IndirectLight,
        Self::AmbientOcclusion,
        Self::Signal,
        Self::Reprojected,
        Self::Moments,
        Self::History,
        Self::PrevMoments,
        Self::Variance,
        Self::FilterPing,
        Self::FilterPong,
        Self::Output,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::GBufferNormals => "voxray_gbuffer_normals",
            Self::GBufferPositions => "voxray_gbuffer_positions",
            Self::GBufferAlbedo => "voxray_gbuffer_albedo",
            Self::GBufferMotion => "voxray_gbuffer_motion",
            Self::PrevGBufferNormals => "voxray_prev_gbuffer_normals",
            Self::PrevGBufferPositions => "voxray_prev_gbuffer_positions",
            Self::PrevGBufferAlbedo => "voxray_prev_gbuffer_albedo",
            Self::PrevGBufferMotion => "voxray_prev_gbuffer_motion",
            Self::DirectLight => "voxray_direct_light",
            Self::IndirectLight => "voxray_indirect_light",
            Self::AmbientOcclusion => "voxray_ambient_occlusion",
            Self::Signal => "voxray_signal",
            Self::Reprojected => "voxray_reprojected",
            Self::Moments => "voxray_moments",
            Self::History => "voxray_history",
            Self::PrevMoments => "voxray_prev_moments",
            Self::Variance => "voxray_variance",
            Self::FilterPing => "voxray_filter_ping",
            Self::FilterPong => "voxray_filter_pong",
            Self::Output => "voxray_output",
        }
    }

    fn idx(&self) -> usize {
        *self as usize
    }
}

/// All buffers of a single camera, allocated together at camera's
/// resolution.
#[derive(Debug)]
pub struct CameraBuffers {
    size: UVec2,
    textures: Vec<Texture>,
}

impl CameraBuffers {
    pub fn new(camera: &Camera) -> Result<Self, Error> {
        debug!("Initializing camera buffers");

        let size = camera.viewport.size;

        let textures = BufferRole::ALL
            .iter()
            .map(|role| Texture::new(role.label(), size))
            .collect::<Result<_, _>>()?;

        Ok(Self { size, textures })
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn tex(&self, role: BufferRole) -> gpu::Tex<'_> {
        self[role].readable()
    }

    pub fn gbuffer(&self) -> gpu::GBufferMap<'_> {
        gpu::GBufferMap {
            d0: self.tex(BufferRole::GBufferNormals),
            d1: self.tex(BufferRole::GBufferPositions),
            d2: self.tex(BufferRole::GBufferAlbedo),
            d3: self.tex(BufferRole::GBufferMotion),
        }
    }

    pub fn prev_gbuffer(&self) -> gpu::GBufferMap<'_> {
        gpu::GBufferMap {
            d0: self.tex(BufferRole::PrevGBufferNormals),
            d1: self.tex(BufferRole::PrevGBufferPositions),
            d2: self.tex(BufferRole::PrevGBufferAlbedo),
            d3: self.tex(BufferRole::PrevGBufferMotion),
        }
    }

    pub fn surfaces(&self) -> gpu::SurfaceMap<'_> {
        gpu::SurfaceMap::new(
            self.tex(BufferRole::GBufferNormals),
            self.tex(BufferRole::GBufferPositions),
        )
    }

    /// Scatters texels produced by a pass into its outputs; `texels[idx][n]`
    /// lands in pixel `idx` of `outputs[n]`.
    pub(crate) fn write<const N: usize>(
        &mut self,
        outputs: [BufferRole; N],
        texels: Vec<[Vec4; N]>,
    ) {
        for (n, role) in outputs.into_iter().enumerate() {
            let target = self.textures[role.idx()].texels_mut();

            assert_eq!(target.len(), texels.len());

            for (target, texel) in target.iter_mut().zip(&texels) {
                *target = texel[n];
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn fill(&mut self, role: BufferRole, value: Vec4) {
        self.textures[role.idx()].fill(value);
    }

    /// Exchanges contents of both buffers in O(1).
    pub(crate) fn swap(&mut self, a: BufferRole, b: BufferRole) {
        let (a, b) = (a.idx(), b.idx());

        assert_ne!(a, b);

        let (lo, hi) = (a.min(b), a.max(b));
        let (head, tail) = self.textures.split_at_mut(hi);

        head[lo].swap_texels(&mut tail[0]);
    }
}

impl Index<BufferRole> for CameraBuffers {
    type Output = Texture;

    fn index(&self, role: BufferRole) -> &Self::Output {
        &self.textures[role.idx()]
    }
}

#[cfg(test)]
mod tests {
    use glam::{uvec2, vec4, Mat4};

    use super::*;

    fn buffers() -> CameraBuffers {
        CameraBuffers::new(&Camera::new(
            uvec2(4, 2),
            Mat4::IDENTITY,
            Mat4::IDENTITY,
        ))
        .unwrap()
    }

    #[test]
    fn roles() {
        for (idx, role) in BufferRole::ALL.iter().enumerate() {
            assert_eq!(idx, role.idx());
        }

        let target = buffers();

        for role in BufferRole::ALL {
            assert_eq!(role.label(), target[role].label());
            assert_eq!(uvec2(4, 2), target[role].size());
        }
    }

    #[test]
    fn write() {
        let mut target = buffers();

        let texels = (0..8)
            .map(|idx| [Vec4::splat(idx as f32), -Vec4::splat(idx as f32)])
            .collect();

        target.write([BufferRole::Signal, BufferRole::Output], texels);

        assert_eq!(
            Vec4::splat(5.0),
            target.tex(BufferRole::Signal).read(uvec2(1, 1))
        );

        assert_eq!(
            Vec4::splat(-2.0),
            target[BufferRole::Output].read(uvec2(2, 0))
        );

        assert_eq!(Vec4::ZERO, target[BufferRole::Variance].read(uvec2(2, 0)));
    }

    #[test]
    fn swap() {
        let mut target = buffers();

        target.fill(BufferRole::History, vec4(1.0, 2.0, 3.0, 4.0));
        target.swap(BufferRole::Reprojected, BufferRole::History);

        assert_eq!(Vec4::ZERO, target[BufferRole::History].read(uvec2(0, 0)));

        assert_eq!(
            vec4(1.0, 2.0, 3.0, 4.0),
            target[BufferRole::Reprojected].read(uvec2(3, 1))
        );

        assert_eq!("voxray_history", target[BufferRole::History].label());
    }
}
