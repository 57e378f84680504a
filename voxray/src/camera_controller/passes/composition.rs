use glam::Vec4;
use voxray_shaders as shaders;

use crate::{
    gpu, BufferRole, CameraBuffers, CameraComputePass, CompositeMode,
};

#[derive(Debug)]
pub struct CompositionPass {
    passes: Vec<CameraComputePass<1>>,
    flat_color_pass: CameraComputePass<1>,
}

impl CompositionPass {
    /// Color displayed while the scene is not ready.
    pub const FLAT_COLOR: Vec4 = Vec4::new(0.1, 0.1, 0.1, 1.0);

    const SIGNALS: [BufferRole; 4] = [
        BufferRole::Reprojected,
        BufferRole::Variance,
        BufferRole::FilterPing,
        BufferRole::FilterPong,
    ];

    pub fn new() -> Self {
        let passes = Self::SIGNALS
            .into_iter()
            .map(|signal| {
                CameraComputePass::builder("composition")
                    .read([
                        BufferRole::GBufferNormals,
                        BufferRole::GBufferPositions,
                        BufferRole::GBufferAlbedo,
                        BufferRole::GBufferMotion,
                        signal,
                    ])
                    .write([BufferRole::Output])
            })
            .collect();

        let flat_color_pass = CameraComputePass::builder("flat_color")
            .write([BufferRole::Output]);

        Self {
            passes,
            flat_color_pass,
        }
    }

    /// Composes the final image out of the G-Buffer and given signal, which
    /// must be one of the denoiser's outputs.
    pub fn run(
        &self,
        buffers: &mut CameraBuffers,
        signal: BufferRole,
        mode: CompositeMode,
    ) {
        let pass = Self::SIGNALS
            .iter()
            .position(|role| *role == signal)
            .map(|idx| &self.passes[idx])
            .unwrap_or_else(|| {
                panic!("Not a composable signal: {:?}", signal)
            });

        let params = gpu::CompositionPassParams {
            mode: mode.serialize(),
        };

        pass.run(buffers, |inputs, pos| {
            [shaders::composition::main(
                pos,
                &params,
                inputs.gbuffer(),
                inputs.tex(signal),
            )]
        });
    }

    pub fn run_flat_color(&self, buffers: &mut CameraBuffers) {
        self.flat_color_pass.run(buffers, |_, _| [Self::FLAT_COLOR]);
    }
}
