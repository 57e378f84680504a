mod buffers;
mod pass;
mod passes;

use log::{debug, info, trace, warn};

pub use self::buffers::*;
pub use self::pass::*;
pub use self::passes::*;
use crate::{
    gpu, Camera, Error, PipelineConfig, Scene, Settings, Stage, Texture,
};

/// Per-camera state of the renderer: buffers, passes and the transforms of
/// the current and the previous frame.
#[derive(Debug)]
pub struct CameraController {
    camera: Camera,
    buffers: CameraBuffers,
    passes: CameraPasses,
    curr_camera: gpu::Camera,
    prev_camera: gpu::Camera,
    frame_counter: u32,
    frame_index: u32,
    scene_revision: Option<u64>,
    history_available: bool,
    stages: Vec<Stage>,
}

impl CameraController {
    pub(crate) fn new(camera: Camera) -> Result<Self, Error> {
        info!("Creating camera: {}", camera.describe());

        let buffers = CameraBuffers::new(&camera)?;
        let passes = CameraPasses::new();

        debug!("Camera created");

        Ok(Self {
            curr_camera: camera.serialize(),
            prev_camera: Default::default(),
            camera,
            buffers,
            passes,
            frame_counter: 0,
            frame_index: 0,
            scene_revision: None,
            history_available: false,
            stages: Default::default(),
        })
    }

    pub(crate) fn update(&mut self, camera: Camera) -> Result<(), Error> {
        if self.camera.is_invalidated_by(&camera) {
            debug!("Rebuilding buffers for camera: {}", camera.describe());

            self.buffers = CameraBuffers::new(&camera)?;
            self.reset_history();
        }

        self.curr_camera = camera.serialize();
        self.camera = camera;

        Ok(())
    }

    fn reset_history(&mut self) {
        debug!("Resetting history for camera: {}", self.camera.describe());

        self.prev_camera = Default::default();
        self.history_available = false;
    }

    pub(crate) fn render(&mut self, settings: &Settings, scene: &dyn Scene) {
        self.frame_counter = self.frame_counter.wrapping_add(1);

        let accel = scene.acceleration_structure();

        self.stages = PipelineConfig::new(settings).stages(accel.is_some());

        let Some(accel) = accel else {
            warn!(
                "Scene is not ready, rendering flat color for camera: {}",
                self.camera.describe()
            );

            self.passes.composition.run_flat_color(&mut self.buffers);

            return;
        };

        let revision = scene.revision();
        let scene_changed = self.scene_revision != Some(revision);
        let camera_moved = !self.prev_camera.is_eq(&self.curr_camera);

        self.scene_revision = Some(revision);

        self.frame_index = if scene_changed || camera_moved {
            1
        } else {
            self.frame_index.saturating_add(1)
        };

        let frame = CameraFrame {
            settings,
            accel,
            materials: scene.materials(),
            world: scene.sun().serialize(),
            curr_camera: self.curr_camera,
            prev_camera: self.prev_camera,
            frame_counter: self.frame_counter,
            frame_index: self.frame_index,
            history_available: self.history_available,
        };

        let mut signal = BufferRole::Reprojected;
        let mut history_written = false;

        for stage in &self.stages {
            trace!("Running stage: {:?}", stage);

            match *stage {
                Stage::GBuffer => {
                    self.passes.gbuffer.run(&frame, &mut self.buffers);
                }

                Stage::MotionVectors => {
                    self.passes.motion_vectors.run(&frame, &mut self.buffers);
                }

                Stage::Lighting => {
                    self.passes.lighting.run(&frame, &mut self.buffers);
                }

                Stage::LightResolving => {
                    self.passes.light_resolving.run(&frame, &mut self.buffers);
                }

                Stage::Reprojection => {
                    self.passes.reprojection.run(&frame, &mut self.buffers);
                    history_written = true;
                }

                Stage::HistoryPassthrough => {
                    self.passes.reprojection.run_passthrough(&mut self.buffers);
                    history_written = true;
                }

                Stage::VarianceEstimation => {
                    self.passes
                        .variance_estimation
                        .run(&frame, &mut self.buffers);

                    signal = BufferRole::Variance;
                }

                Stage::SpatialFilter { iterations } => {
                    signal = self.passes.wavelet.run(
                        &frame,
                        &mut self.buffers,
                        signal,
                        iterations,
                    );
                }

                Stage::Composition(mode) => {
                    self.passes
                        .composition
                        .run(&mut self.buffers, signal, mode);
                }

                // Resolved only when the scene isn't ready, handled above
                Stage::FlatColor => unreachable!(),
            }
        }

        self.commit_frame(history_written);
    }

    /// Moves this frame's data into the previous-frame buffers.
    ///
    /// When the frame didn't produce any history (e.g. lighting is turned
    /// off), the next frame starts without one.
    fn commit_frame(&mut self, history_written: bool) {
        trace!("Committing frame {}", self.frame_counter);

        for (curr, prev) in [
            (BufferRole::GBufferNormals, BufferRole::PrevGBufferNormals),
            (BufferRole::GBufferPositions, BufferRole::PrevGBufferPositions),
            (BufferRole::GBufferAlbedo, BufferRole::PrevGBufferAlbedo),
            (BufferRole::GBufferMotion, BufferRole::PrevGBufferMotion),
        ] {
            self.buffers.swap(curr, prev);
        }

        if history_written {
            self.buffers
                .swap(BufferRole::Reprojected, BufferRole::History);

            self.buffers.swap(BufferRole::Moments, BufferRole::PrevMoments);
        }

        self.history_available = history_written;
        self.prev_camera = self.curr_camera;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn buffers(&self) -> &CameraBuffers {
        &self.buffers
    }

    /// Returns the most recently rendered image.
    pub fn output(&self) -> &Texture {
        &self.buffers[BufferRole::Output]
    }

    /// Returns stages executed in the most recent frame.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn history_available(&self) -> bool {
        self.history_available
    }

    pub fn curr_camera(&self) -> &gpu::Camera {
        &self.curr_camera
    }

    pub fn prev_camera(&self) -> &gpu::Camera {
        &self.prev_camera
    }
}

impl Drop for CameraController {
    fn drop(&mut self) {
        info!("Deleting camera: {}", self.camera.describe());
    }
}
