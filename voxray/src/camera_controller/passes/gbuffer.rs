use voxray_shaders as shaders;

use crate::{
    gpu, BufferRole, CameraBuffers, CameraComputePass, CameraFrame,
};

#[derive(Debug)]
pub struct GBufferPass {
    pass: CameraComputePass<4>,
}

impl GBufferPass {
    pub fn new() -> Self {
        let pass = CameraComputePass::builder("gbuffer").write([
            BufferRole::GBufferNormals,
            BufferRole::GBufferPositions,
            BufferRole::GBufferAlbedo,
            BufferRole::GBufferMotion,
        ]);

        Self { pass }
    }

    pub fn run(&self, frame: &CameraFrame, buffers: &mut CameraBuffers) {
        let materials = gpu::MaterialsView::new(frame.materials);

        self.pass.run(buffers, |_, pos| {
            shaders::gbuffer::main(
                pos,
                &frame.curr_camera,
                &frame.world,
                frame.accel,
                materials,
            )
        });
    }
}
