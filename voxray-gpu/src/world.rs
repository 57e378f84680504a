use core::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::{vec3, Vec3, Vec4, Vec4Swizzles};

use crate::lerp;

/// Light intensity when the sun is below the horizon.
pub const NIGHT_LIGHT_INTENSITY: f32 = 0.05;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct World {
    /// x, y, z - sun's position
    /// w - sun's radius (used for soft shadows)
    pub d0: Vec4,

    /// x - day/night progress, `<0.0, 1.0)`; `0.0` is sunrise, `0.25` is noon,
    ///     `0.5` is sunset, the second half is night
    /// y, z, w - unused
    pub d1: Vec4,
}

impl World {
    pub fn sun_position(&self) -> Vec3 {
        self.d0.xyz()
    }

    pub fn sun_radius(&self) -> f32 {
        self.d0.w
    }

    pub fn sun_progress(&self) -> f32 {
        self.d1.x
    }

    /// Returns how bright the sun currently is, `<NIGHT_LIGHT_INTENSITY, 1.0>`.
    pub fn light_intensity(&self) -> f32 {
        let elevation = (self.sun_progress() * 2.0 * PI).sin().max(0.0);

        lerp(NIGHT_LIGHT_INTENSITY, 1.0, elevation)
    }

    /// Returns radiance of the sky seen in given direction.
    pub fn sky_color(&self, direction: Vec3) -> Vec3 {
        let horizon = vec3(0.80, 0.90, 1.00);
        let zenith = vec3(0.25, 0.45, 0.85);

        lerp(horizon, zenith, direction.y.max(0.0)) * self.light_intensity()
    }
}
