use voxray_shaders as shaders;

use crate::{
    gpu, BufferRole, CameraBuffers, CameraComputePass, CameraFrame,
};

#[derive(Debug)]
pub struct VarianceEstimationPass {
    pass: CameraComputePass<1>,
}

impl VarianceEstimationPass {
    pub fn new() -> Self {
        let pass = CameraComputePass::builder("variance_estimation")
            .read([
                BufferRole::GBufferNormals,
                BufferRole::GBufferPositions,
                BufferRole::Reprojected,
                BufferRole::Moments,
            ])
            .write([BufferRole::Variance]);

        Self { pass }
    }

    pub fn run(&self, frame: &CameraFrame, buffers: &mut CameraBuffers) {
        let params = gpu::VariancePassParams {
            history_threshold: frame.settings.variance_history_threshold,
            depth_sigma: frame.settings.filter_depth_sigma,
            normal_sigma: frame.settings.filter_normal_sigma,
        };

        self.pass.run(buffers, |inputs, pos| {
            [shaders::variance::main(
                pos,
                &params,
                &frame.curr_camera,
                inputs.surfaces(),
                inputs.tex(BufferRole::Reprojected),
                inputs.tex(BufferRole::Moments),
            )]
        });
    }
}
