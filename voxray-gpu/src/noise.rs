use core::f32::consts::PI;

use glam::{vec2, UVec2, Vec2, Vec3};

use crate::Vec3Ext;

/// PCG-based generator of per-pixel random numbers.
///
/// Seeded with the frame counter and pixel position, so that each pixel gets
/// a different (but reproducible) sequence each frame.
#[derive(Copy, Clone, Debug)]
pub struct Noise {
    state: u32,
}

impl Noise {
    pub fn new(seed: u32, id: UVec2) -> Self {
        let mut this = Self {
            state: seed
                ^ id.x.wrapping_mul(48619)
                ^ id.y.wrapping_mul(95461),
        };

        // Warm-up; neighbouring seeds produce correlated first samples
        this.sample_int();
        this
    }

    /// Generates a uniform sample in range `<0.0, 1.0>`.
    pub fn sample(&mut self) -> f32 {
        (self.sample_int() as f32) / (u32::MAX as f32)
    }

    /// Generates a uniform sample in range `<0, u32::MAX>`.
    pub fn sample_int(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(747796405)
            .wrapping_add(2891336453);

        let word = ((self.state >> ((self.state >> 28) + 4)) ^ self.state)
            .wrapping_mul(277803737);

        (word >> 22) ^ word
    }

    /// Generates a uniform sample on a circle.
    pub fn sample_circle(&mut self) -> Vec2 {
        let angle = self.sample() * PI * 2.0;

        vec2(angle.cos(), angle.sin())
    }

    /// Generates a uniform sample on a unit sphere's surface.
    pub fn sample_sphere(&mut self) -> Vec3 {
        let z = self.sample() * 2.0 - 1.0;
        let radius = (1.0 - z * z).max(0.0).sqrt();

        (self.sample_circle() * radius).extend(z)
    }

    /// Generates a cosine-weighted sample on a hemisphere around given normal.
    pub fn sample_hemisphere(&mut self, normal: Vec3) -> Vec3 {
        let u = self.sample();
        let radius = u.sqrt();
        let disk = self.sample_circle() * radius;
        let (b, t) = normal.basis();

        (disk.x * b + disk.y * t + (1.0 - u).max(0.0).sqrt() * normal)
            .normalize()
    }
}
