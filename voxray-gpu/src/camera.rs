use bytemuck::{Pod, Zeroable};
use glam::{vec2, IVec2, Mat4, UVec2, Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::Ray;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Camera {
    pub projection_view: Mat4,
    pub ndc_to_world: Mat4,
    pub view: Mat4,

    /// x, y - viewport size, in pixels
    /// z, w - unused
    pub screen: Vec4,
}

impl Camera {
    /// Returns whether this camera has been initialized.
    ///
    /// The previous-frame camera stays zeroed until the first frame is
    /// committed; anything reprojected through such camera is invalid.
    pub fn is_some(&self) -> bool {
        self.screen.x > 0.0 && self.screen.y > 0.0
    }

    /// Given a point in world-coordinates, returns it in clip-coordinates.
    pub fn world_to_clip(&self, pos: Vec3) -> Vec4 {
        self.projection_view * pos.extend(1.0)
    }

    /// Given a point in world-coordinates, returns it in screen-coordinates.
    pub fn world_to_screen(&self, pos: Vec3) -> Vec2 {
        self.clip_to_screen(self.world_to_clip(pos))
    }

    /// Given a point in clip-coordinates, returns it in screen-coordinates.
    ///
    /// Pixel `(x, y)` covers `<x, x + 1) × <y, y + 1)`, so its center lands at
    /// `(x + 0.5, y + 0.5)`.
    pub fn clip_to_screen(&self, pos: Vec4) -> Vec2 {
        let ndc = pos.xy() / pos.w;
        let ndc = vec2(ndc.x, -ndc.y);

        (0.5 * ndc + 0.5) * self.screen.xy()
    }

    /// Returns linear (view-space) depth of given point, as seen from this
    /// camera; positive in front of the camera.
    pub fn depth_of(&self, pos: Vec3) -> f32 {
        -self.view.transform_point3(pos).z
    }

    pub fn screen_size(&self) -> UVec2 {
        self.screen.xy().as_uvec2()
    }

    /// Returns whether given point lays inside the screen.
    pub fn contains(&self, pos: IVec2) -> bool {
        let screen_size = self.screen.xy().as_ivec2();

        pos.x >= 0
            && pos.y >= 0
            && pos.x < screen_size.x
            && pos.y < screen_size.y
    }

    /// Casts a ray from the camera through the center of given pixel.
    pub fn ray(&self, screen_pos: UVec2) -> Ray {
        let screen_size = self.screen.xy();
        let ndc = (screen_pos.as_vec2() + 0.5) * 2.0 / screen_size - Vec2::ONE;
        let ndc = vec2(ndc.x, -ndc.y);

        let near_plane = self.ndc_to_world.project_point3(ndc.extend(0.0));
        let far_plane = self.ndc_to_world.project_point3(ndc.extend(1.0));

        Ray::new(near_plane, (far_plane - near_plane).normalize())
    }

    /// Returns whether both cameras look at the scene the same way, modulo
    /// floating-point noise; used to detect camera motion.
    pub fn is_eq(&self, rhs: &Self) -> bool {
        self.projection_view
            .abs_diff_eq(rhs.projection_view, 0.0025)
            && self.screen == rhs.screen
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{uvec2, vec3, vec4};

    use super::*;

    fn camera(view: Mat4, projection: Mat4, size: UVec2) -> Camera {
        let projection_view = projection * view;

        Camera {
            projection_view,
            ndc_to_world: projection_view.inverse(),
            view,
            screen: size.as_vec2().extend(0.0).extend(0.0),
        }
    }

    fn ortho() -> Camera {
        camera(
            Mat4::look_at_rh(vec3(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::NEG_Z),
            Mat4::orthographic_rh(-8.0, 8.0, -8.0, 8.0, 0.1, 100.0),
            uvec2(16, 16),
        )
    }

    fn perspective() -> Camera {
        camera(
            Mat4::look_at_rh(vec3(0.0, 2.0, 5.0), Vec3::ZERO, Vec3::Y),
            Mat4::perspective_rh(1.0, 4.0 / 3.0, 0.1, 100.0),
            uvec2(64, 48),
        )
    }

    #[test]
    fn ray_goes_through_pixel_center() {
        for camera in [ortho(), perspective()] {
            for pos in [uvec2(0, 0), uvec2(7, 3), uvec2(15, 15)] {
                let ray = camera.ray(pos);
                let target = ray.at(4.0);
                let screen = camera.world_to_screen(target);

                assert_relative_eq!(screen.x, pos.x as f32 + 0.5, epsilon = 0.01);
                assert_relative_eq!(screen.y, pos.y as f32 + 0.5, epsilon = 0.01);
            }
        }
    }

    #[test]
    fn depth_of() {
        let camera = ortho();

        assert_relative_eq!(camera.depth_of(vec3(3.0, 0.0, -2.0)), 10.0);
        assert_relative_eq!(camera.depth_of(vec3(0.0, 4.0, 0.0)), 6.0);

        let camera = perspective();
        let ray = camera.ray(uvec2(10, 20));
        let point = ray.at(3.0);

        assert!(camera.depth_of(point) > 0.0);
        assert!(camera.depth_of(point) <= 3.2);
    }

    #[test]
    fn contains() {
        let camera = ortho();

        assert!(camera.contains(IVec2::new(0, 0)));
        assert!(camera.contains(IVec2::new(15, 15)));
        assert!(!camera.contains(IVec2::new(-1, 0)));
        assert!(!camera.contains(IVec2::new(16, 3)));
        assert!(!camera.contains(IVec2::new(3, 16)));
    }

    #[test]
    fn is_eq() {
        let a = ortho();
        let mut b = ortho();

        assert!(a.is_eq(&b));
        assert!(!a.is_eq(&Camera::default()));
        assert!(!Camera::default().is_some());

        b.projection_view.w_axis += vec4(0.5, 0.0, 0.0, 0.0);

        assert!(!a.is_eq(&b));
    }
}
