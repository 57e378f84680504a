//! Ray-traced voxel renderer with a spatiotemporal, variance-guided denoiser.
//!
//! Each frame goes through a couple of stages: G-Buffer, motion vectors,
//! noisy lighting, temporal reprojection, variance estimation, an
//! edge-avoiding à-trous filter and composition; the stages that run are
//! resolved from [`Settings`] each frame (see [`PipelineConfig`]).

mod buffers;
mod camera;
mod camera_controller;
mod camera_controllers;
mod error;
mod pipeline;
mod scene;
mod settings;
mod sun;
mod utils;
mod voxels;

use log::info;
pub use voxray_gpu as gpu;

pub use self::buffers::*;
pub use self::camera::*;
pub use self::camera_controller::*;
pub(crate) use self::camera_controllers::*;
pub use self::error::*;
pub use self::pipeline::*;
pub use self::scene::*;
pub use self::settings::*;
pub use self::sun::*;
pub use self::voxels::*;

#[derive(Debug, Default)]
pub struct Engine {
    cameras: CameraControllers,
}

impl Engine {
    pub fn new() -> Self {
        info!("Initializing");

        Self::default()
    }

    /// Creates a new camera, allocating all of its buffers upfront.
    pub fn create_camera(
        &mut self,
        camera: Camera,
    ) -> Result<CameraHandle, Error> {
        let camera = CameraController::new(camera)?;

        Ok(self.cameras.add(camera))
    }

    /// Updates camera's configuration.
    ///
    /// Changing the viewport's size reallocates camera's buffers and resets
    /// its history; if that fails, the camera keeps its previous
    /// configuration.
    pub fn update_camera(
        &mut self,
        handle: CameraHandle,
        camera: Camera,
    ) -> Result<(), Error> {
        self.cameras.get_mut(handle).update(camera)
    }

    pub fn remove_camera(&mut self, handle: CameraHandle) {
        self.cameras.remove(handle);
    }

    pub fn camera(&self, handle: CameraHandle) -> &CameraController {
        self.cameras.get(handle)
    }

    /// Renders a single frame for given camera.
    pub fn render_camera(
        &mut self,
        handle: CameraHandle,
        settings: &Settings,
        scene: &dyn Scene,
    ) {
        self.cameras.get_mut(handle).render(settings, scene);
    }

    /// Renders a single frame for each camera.
    pub fn render_all(&mut self, settings: &Settings, scene: &dyn Scene) {
        for camera in self.cameras.iter_mut() {
            camera.render(settings, scene);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CameraHandle(usize);

impl CameraHandle {
    pub(crate) fn new(id: usize) -> Self {
        Self(id)
    }
}
