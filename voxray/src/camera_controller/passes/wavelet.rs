use log::trace;
use voxray_shaders as shaders;

use crate::{
    gpu, BufferRole, CameraBuffers, CameraComputePass, CameraFrame,
};

/// À-trous filter, ping-ponging between [`BufferRole::FilterPing`] and
/// [`BufferRole::FilterPong`].
#[derive(Debug)]
pub struct WaveletPass {
    from_reprojected: CameraComputePass<1>,
    from_variance: CameraComputePass<1>,
    ping_to_pong: CameraComputePass<1>,
    pong_to_ping: CameraComputePass<1>,
}

impl WaveletPass {
    pub fn new() -> Self {
        fn pass(
            label: &'static str,
            input: BufferRole,
            output: BufferRole,
        ) -> CameraComputePass<1> {
            CameraComputePass::builder(label)
                .read([
                    BufferRole::GBufferNormals,
                    BufferRole::GBufferPositions,
                    input,
                ])
                .write([output])
        }

        Self {
            from_reprojected: pass(
                "wavelet_from_reprojected",
                BufferRole::Reprojected,
                BufferRole::FilterPing,
            ),
            from_variance: pass(
                "wavelet_from_variance",
                BufferRole::Variance,
                BufferRole::FilterPing,
            ),
            ping_to_pong: pass(
                "wavelet_ping_to_pong",
                BufferRole::FilterPing,
                BufferRole::FilterPong,
            ),
            pong_to_ping: pass(
                "wavelet_pong_to_ping",
                BufferRole::FilterPong,
                BufferRole::FilterPing,
            ),
        }
    }

    /// Runs given number of iterations over `input` (either
    /// [`BufferRole::Reprojected`] or [`BufferRole::Variance`]) and returns
    /// the buffer that holds the result.
    pub fn run(
        &self,
        frame: &CameraFrame,
        buffers: &mut CameraBuffers,
        input: BufferRole,
        iterations: u32,
    ) -> BufferRole {
        let mut flags = 0;

        // Without the variance estimate there's nothing to guide the
        // luminance edge-stopping function with
        if input == BufferRole::Variance {
            flags |= gpu::WaveletPassParams::VARIANCE_GUIDED;
        }

        let mut output = input;

        for iteration in 0..iterations {
            let pass = match (iteration, input) {
                (0, BufferRole::Variance) => &self.from_variance,
                (0, _) => &self.from_reprojected,
                (i, _) if i % 2 == 1 => &self.ping_to_pong,
                _ => &self.pong_to_ping,
            };

            let params = gpu::WaveletPassParams {
                stride: 1 << iteration,
                flags,
                depth_sigma: frame.settings.filter_depth_sigma,
                normal_sigma: frame.settings.filter_normal_sigma,
                luma_sigma: frame.settings.filter_luma_sigma,
                variance_cutoff: frame.settings.filter_variance_cutoff,
            };

            trace!(
                "Filtering; iteration={iteration}, stride={}",
                params.stride
            );

            let [pass_output] = pass.outputs();
            let pass_input = output;

            pass.run(buffers, |inputs, pos| {
                [shaders::wavelet::main(
                    pos,
                    &params,
                    &frame.curr_camera,
                    inputs.surfaces(),
                    inputs.tex(pass_input),
                )]
            });

            output = pass_output;
        }

        output
    }
}
