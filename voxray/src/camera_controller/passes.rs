use log::debug;

use crate::{gpu, Settings};

macro_rules! passes {
    ([ $( $name:ident => $class:ident, )* ]) => {
        $( mod $name; )*
        $( pub use self::$name::*; )*

        #[derive(Debug)]
        pub struct CameraPasses {
            $( pub $name: $class, )*
        }

        impl CameraPasses {
            pub fn new() -> Self {
                debug!("Initializing camera passes");

                Self {
                    $( $name: $class::new(), )*
                }
            }
        }
    };
}

passes!([
    composition => CompositionPass,
    gbuffer => GBufferPass,
    light_resolving => LightResolvingPass,
    lighting => LightingPass,
    motion_vectors => MotionVectorsPass,
    reprojection => ReprojectionPass,
    variance_estimation => VarianceEstimationPass,
    wavelet => WaveletPass,
]);

/// Everything passes need to know about the frame that's being rendered.
#[derive(Clone, Copy)]
pub struct CameraFrame<'a> {
    pub settings: &'a Settings,
    pub accel: &'a dyn gpu::AccelerationStructure,
    pub materials: &'a [gpu::Material],
    pub world: gpu::World,
    pub curr_camera: gpu::Camera,
    pub prev_camera: gpu::Camera,

    /// Free-running counter, seeds the noise
    pub frame_counter: u32,

    /// Number of frames the camera and the scene have been static for,
    /// starting at 1
    pub frame_index: u32,

    /// Whether buffers holding previous frame's data are meaningful
    pub history_available: bool,
}
