use voxray_shaders as shaders;

use crate::{
    gpu, BufferRole, CameraBuffers, CameraComputePass, CameraFrame,
};

#[derive(Debug)]
pub struct ReprojectionPass {
    pass: CameraComputePass<2>,
    passthrough_pass: CameraComputePass<2>,
}

impl ReprojectionPass {
    pub fn new() -> Self {
        let pass = CameraComputePass::builder("reprojection")
            .read([
                BufferRole::GBufferNormals,
                BufferRole::GBufferPositions,
                BufferRole::GBufferAlbedo,
                BufferRole::GBufferMotion,
                BufferRole::PrevGBufferNormals,
                BufferRole::PrevGBufferPositions,
                BufferRole::PrevGBufferAlbedo,
                BufferRole::PrevGBufferMotion,
                BufferRole::Signal,
                BufferRole::History,
                BufferRole::PrevMoments,
            ])
            .write([BufferRole::Reprojected, BufferRole::Moments]);

        let passthrough_pass =
            CameraComputePass::builder("reprojection_passthrough")
                .read([BufferRole::Signal])
                .write([BufferRole::Reprojected, BufferRole::Moments]);

        Self {
            pass,
            passthrough_pass,
        }
    }

    pub fn run(&self, frame: &CameraFrame, buffers: &mut CameraBuffers) {
        let params = Self::params(frame);

        self.pass.run(buffers, |inputs, pos| {
            shaders::reprojection::main(
                pos,
                &params,
                &frame.curr_camera,
                &frame.prev_camera,
                inputs.gbuffer(),
                inputs.prev_gbuffer(),
                inputs.tex(BufferRole::Signal),
                inputs.tex(BufferRole::History),
                inputs.tex(BufferRole::PrevMoments),
            )
        });
    }

    /// Forwards the signal with an empty history.
    pub fn run_passthrough(&self, buffers: &mut CameraBuffers) {
        self.passthrough_pass.run(buffers, |inputs, pos| {
            shaders::reprojection::passthrough(
                pos,
                inputs.tex(BufferRole::Signal),
            )
        });
    }

    fn params(frame: &CameraFrame) -> gpu::ReprojectionPassParams {
        let settings = frame.settings;
        let mut flags = 0;

        if settings.reproject_with_ids {
            flags |= gpu::ReprojectionPassParams::WITH_IDS;
        }

        if frame.history_available {
            flags |= gpu::ReprojectionPassParams::HISTORY_AVAILABLE;
        }

        if settings.ground_truth_if_no_motion {
            flags |= gpu::ReprojectionPassParams::ACCUMULATE;
        }

        gpu::ReprojectionPassParams {
            start_coef: settings.start_coef,
            adapt_coef: settings.adapt_coef,
            min_coef: settings.min_coef,
            max_history: settings.max_history_length as f32,
            depth_tolerance: settings.depth_tolerance,
            normal_tolerance: settings.normal_tolerance,
            frame_index: frame.frame_index,
            flags,
        }
    }
}
