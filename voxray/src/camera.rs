use glam::{Mat4, UVec2, Vec4};

use crate::gpu;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub viewport: CameraViewport,

    /// World-to-view transform.
    pub transform: Mat4,

    pub projection: Mat4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraViewport {
    pub size: UVec2,
}

impl Camera {
    pub fn new(size: UVec2, transform: Mat4, projection: Mat4) -> Self {
        Self {
            viewport: CameraViewport { size },
            transform,
            projection,
        }
    }

    /// Returns whether changing this camera into `other` requires
    /// reallocating camera's buffers.
    pub(crate) fn is_invalidated_by(&self, other: &Self) -> bool {
        self.viewport != other.viewport
    }

    pub(crate) fn serialize(&self) -> gpu::Camera {
        let projection_view = self.projection * self.transform;

        gpu::Camera {
            projection_view,
            ndc_to_world: projection_view.inverse(),
            view: self.transform,
            screen: Vec4::new(
                self.viewport.size.x as f32,
                self.viewport.size.y as f32,
                0.0,
                0.0,
            ),
        }
    }

    pub(crate) fn describe(&self) -> String {
        format!("size={}x{}", self.viewport.size.x, self.viewport.size.y)
    }
}
