use voxray_shaders as shaders;

use crate::{
    gpu, BufferRole, CameraBuffers, CameraComputePass, CameraFrame,
};

#[derive(Debug)]
pub struct LightingPass {
    pass: CameraComputePass<3>,
}

impl LightingPass {
    pub fn new() -> Self {
        let pass = CameraComputePass::builder("lighting")
            .read([
                BufferRole::GBufferNormals,
                BufferRole::GBufferPositions,
                BufferRole::GBufferAlbedo,
                BufferRole::GBufferMotion,
            ])
            .write([
                BufferRole::DirectLight,
                BufferRole::IndirectLight,
                BufferRole::AmbientOcclusion,
            ]);

        Self { pass }
    }

    pub fn run(&self, frame: &CameraFrame, buffers: &mut CameraBuffers) {
        let params = Self::params(frame);
        let materials = gpu::MaterialsView::new(frame.materials);

        self.pass.run(buffers, |inputs, pos| {
            shaders::lighting::main(
                pos,
                &params,
                &frame.world,
                inputs.gbuffer(),
                frame.accel,
                materials,
            )
        });
    }

    pub(crate) fn params(frame: &CameraFrame) -> gpu::LightingPassParams {
        let settings = frame.settings;
        let mut flags = 0;

        if settings.direct_lighting {
            flags |= gpu::LightingPassParams::DIRECT;
        }

        if settings.indirect_lighting {
            flags |= gpu::LightingPassParams::INDIRECT;
        }

        if settings.ambient_occlusion > 0 {
            flags |= gpu::LightingPassParams::AMBIENT_OCCLUSION;
        }

        if settings.soft_shadows {
            flags |= gpu::LightingPassParams::SOFT_SHADOWS;
        }

        gpu::LightingPassParams {
            seed: frame.frame_counter,
            flags,
            depth_of_recursion: settings.depth_of_recursion,
            ao_strength: settings.ambient_occlusion as f32,
            ao_radius: settings.ambient_occlusion_radius,
        }
    }
}
