use voxray_shaders as shaders;

use crate::{BufferRole, CameraBuffers, CameraComputePass, CameraFrame};

#[derive(Debug)]
pub struct MotionVectorsPass {
    pass: CameraComputePass<1>,
}

impl MotionVectorsPass {
    pub fn new() -> Self {
        let pass = CameraComputePass::builder("motion_vectors")
            .read([
                BufferRole::GBufferNormals,
                BufferRole::GBufferPositions,
                BufferRole::GBufferAlbedo,
                BufferRole::GBufferMotion,
            ])
            .write([BufferRole::GBufferMotion]);

        Self { pass }
    }

    pub fn run(&self, frame: &CameraFrame, buffers: &mut CameraBuffers) {
        self.pass.run(buffers, |inputs, pos| {
            [shaders::motion_vectors::main(
                pos,
                &frame.prev_camera,
                inputs.gbuffer(),
            )]
        });
    }
}
