use glam::{UVec2, Vec4};
use log::{debug, trace};
use rayon::prelude::*;

use crate::{gpu, utils, BufferRole, CameraBuffers};

/// A per-pixel pass over the camera's buffers.
///
/// Pass declares what it reads and what it writes; its kernel gets to see
/// only the declared inputs and returns one texel per declared output, which
/// get scattered into the buffers once the entire viewport has been
/// processed; because of that, a pass can read and write the same buffer.
#[derive(Debug)]
pub struct CameraComputePass<const N: usize> {
    label: &'static str,
    inputs: Vec<BufferRole>,
    outputs: [BufferRole; N],
}

impl CameraComputePass<0> {
    pub fn builder(label: &'static str) -> CameraPassBuilder {
        CameraPassBuilder {
            label,
            inputs: Default::default(),
        }
    }
}

impl<const N: usize> CameraComputePass<N> {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn outputs(&self) -> [BufferRole; N] {
        self.outputs
    }

    pub fn run<F>(&self, buffers: &mut CameraBuffers, kernel: F)
    where
        F: Fn(CameraPassInputs<'_>, UVec2) -> [Vec4; N] + Send + Sync,
    {
        trace!("Running pass: {}", self.label);

        utils::measure(self.label, || {
            let size = buffers.size();

            let texels: Vec<_> = {
                let inputs = CameraPassInputs {
                    buffers,
                    roles: &self.inputs,
                };

                (0..size.x * size.y)
                    .into_par_iter()
                    .map(|idx| {
                        let pos = UVec2::new(idx % size.x, idx / size.x);

                        kernel(inputs, pos)
                    })
                    .collect()
            };

            buffers.write(self.outputs, texels);
        });
    }
}

pub struct CameraPassBuilder {
    label: &'static str,
    inputs: Vec<BufferRole>,
}

impl CameraPassBuilder {
    pub fn read<const M: usize>(mut self, roles: [BufferRole; M]) -> Self {
        self.inputs.extend(roles);
        self
    }

    pub fn write<const N: usize>(
        self,
        outputs: [BufferRole; N],
    ) -> CameraComputePass<N> {
        debug!("Initializing pass: {}", self.label);

        CameraComputePass {
            label: self.label,
            inputs: self.inputs,
            outputs,
        }
    }
}

/// Buffers a pass has declared as its inputs.
#[derive(Clone, Copy)]
pub struct CameraPassInputs<'a> {
    buffers: &'a CameraBuffers,
    roles: &'a [BufferRole],
}

impl<'a> CameraPassInputs<'a> {
    pub fn tex(&self, role: BufferRole) -> gpu::Tex<'a> {
        self.assert_declared(role);
        self.buffers.tex(role)
    }

    pub fn gbuffer(&self) -> gpu::GBufferMap<'a> {
        self.assert_declared(BufferRole::GBufferNormals);
        self.assert_declared(BufferRole::GBufferPositions);
        self.assert_declared(BufferRole::GBufferAlbedo);
        self.assert_declared(BufferRole::GBufferMotion);
        self.buffers.gbuffer()
    }

    pub fn prev_gbuffer(&self) -> gpu::GBufferMap<'a> {
        self.assert_declared(BufferRole::PrevGBufferNormals);
        self.assert_declared(BufferRole::PrevGBufferPositions);
        self.assert_declared(BufferRole::PrevGBufferAlbedo);
        self.assert_declared(BufferRole::PrevGBufferMotion);
        self.buffers.prev_gbuffer()
    }

    pub fn surfaces(&self) -> gpu::SurfaceMap<'a> {
        self.assert_declared(BufferRole::GBufferNormals);
        self.assert_declared(BufferRole::GBufferPositions);
        self.buffers.surfaces()
    }

    fn assert_declared(&self, role: BufferRole) {
        debug_assert!(
            self.roles.contains(&role),
            "pass tried to read undeclared buffer: {:?}",
            role
        );
    }
}
