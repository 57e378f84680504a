use voxray_shaders as shaders;

use crate::{
    BufferRole, CameraBuffers, CameraComputePass, CameraFrame, LightingPass,
};

#[derive(Debug)]
pub struct LightResolvingPass {
    pass: CameraComputePass<1>,
}

impl LightResolvingPass {
    pub fn new() -> Self {
        let pass = CameraComputePass::builder("light_resolving")
            .read([
                BufferRole::DirectLight,
                BufferRole::IndirectLight,
                BufferRole::AmbientOcclusion,
            ])
            .write([BufferRole::Signal]);

        Self { pass }
    }

    pub fn run(&self, frame: &CameraFrame, buffers: &mut CameraBuffers) {
        let params = LightingPass::params(frame);

        self.pass.run(buffers, |inputs, pos| {
            [shaders::light_resolving::main(
                pos,
                &params,
                &frame.world,
                inputs.tex(BufferRole::DirectLight),
                inputs.tex(BufferRole::IndirectLight),
                inputs.tex(BufferRole::AmbientOcclusion),
            )]
        });
    }
}
