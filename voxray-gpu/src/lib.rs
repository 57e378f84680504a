//! Common structs, algorithms etc. used by voxray's kernels and renderer.

#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]

mod acceleration_structure;
mod camera;
mod gbuffer;
mod hit;
mod material;
mod noise;
mod passes;
mod ray;
mod reprojection;
mod surface;
mod tex;
mod utils;
mod world;

pub use self::acceleration_structure::*;
pub use self::camera::*;
pub use self::gbuffer::*;
pub use self::hit::*;
pub use self::material::*;
pub use self::noise::*;
pub use self::passes::*;
pub use self::ray::*;
pub use self::reprojection::*;
pub use self::surface::*;
pub use self::tex::*;
pub use self::utils::*;
pub use self::world::*;

pub mod prelude {
    pub use core::f32::consts::PI;

    pub use glam::*;

    pub use crate::*;
}

/// Hard cap for the number of bounces of indirect lighting.
pub const MAX_DEPTH_OF_RECURSION: u32 = 5;

/// Distance by which secondary rays are pushed away from the surface they
/// originate at, so that they don't hit it again.
pub const SURFACE_OFFSET: f32 = 0.001;

pub const VOXRAY_EPSILON: f32 = 0.0001;
