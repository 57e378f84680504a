use glam::{vec3, vec4, Vec3};

use crate::gpu;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sun {
    pub position: Vec3,

    /// Radius of the sun's sphere; affects how soft the soft shadows are.
    pub radius: f32,

    /// Day/night progress, `<0.0, 1.0)`: `0.0` is sunrise, `0.25` is noon,
    /// `0.5` is sunset, the second half is night.
    pub progress: f32,
}

impl Sun {
    pub(crate) fn serialize(&self) -> gpu::World {
        gpu::World {
            d0: self.position.extend(self.radius),
            d1: vec4(self.progress.rem_euclid(1.0), 0.0, 0.0, 0.0),
        }
    }
}

impl Default for Sun {
    fn default() -> Self {
        Self {
            position: vec3(300.0, 1000.0, 200.0),
            radius: 25.0,
            progress: 0.25,
        }
    }
}
