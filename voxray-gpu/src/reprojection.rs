use glam::{IVec2, UVec2};

use crate::{Camera, GBufferEntry, GBufferMap, ReprojectionPassParams};

/// Outcome of looking up a pixel's history in the previous frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reprojection {
    Some { prev_pos: UVec2 },
    None(Rejection),
}

/// Why a pixel's history got rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// There's no previous frame (first frame, history reset, resolution
    /// change etc.).
    NoHistory,

    /// Pixel doesn't contain any geometry.
    Sky,

    /// Pixel has no previous position (e.g. it was behind the previous
    /// camera).
    NoMotion,

    /// Previous position lays outside the viewport.
    OutOfScreen,

    /// Previous position contains a different object or material.
    IdMismatch,

    /// Previous position contains a surface that doesn't lay on the current
    /// surface's plane.
    DepthMismatch,

    /// Previous position contains a surface facing a different direction.
    NormalMismatch,
}

impl Reprojection {
    /// Finds where given pixel was visible during the previous frame and
    /// validates that it is the same surface.
    pub fn find(
        screen_pos: UVec2,
        params: &ReprojectionPassParams,
        curr_camera: &Camera,
        prev_camera: &Camera,
        curr: &GBufferEntry,
        prev_gbuffer: GBufferMap,
    ) -> Self {
        if !params.has(ReprojectionPassParams::HISTORY_AVAILABLE)
            || !prev_camera.is_some()
        {
            return Self::None(Rejection::NoHistory);
        }

        if curr.is_sky() {
            return Self::None(Rejection::Sky);
        }

        if !curr.has_motion {
            return Self::None(Rejection::NoMotion);
        }

        let prev_pos: IVec2 =
            (screen_pos.as_vec2() + 0.5 - curr.motion).floor().as_ivec2();

        if !curr_camera.contains(prev_pos) || !prev_camera.contains(prev_pos) {
            return Self::None(Rejection::OutOfScreen);
        }

        let prev_pos = prev_pos.as_uvec2();
        let prev = prev_gbuffer.get(prev_pos);

        if prev.is_sky() {
            return Self::None(Rejection::DepthMismatch);
        }

        if params.has(ReprojectionPassParams::WITH_IDS)
            && (prev.object_id != curr.object_id
                || prev.material_id != curr.material_id)
        {
            return Self::None(Rejection::IdMismatch);
        }

        // Previous surface must lay on the current surface's plane
        let plane_distance =
            curr.normal.dot(prev.position - curr.position).abs();

        if plane_distance > params.depth_tolerance {
            return Self::None(Rejection::DepthMismatch);
        }

        if prev.normal.dot(curr.normal) < params.normal_tolerance {
            return Self::None(Rejection::NormalMismatch);
        }

        Self::Some { prev_pos }
    }

    pub fn is_some(&self) -> bool {
        matches!(self, Self::Some { .. })
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }

    pub fn prev_pos(&self) -> Option<UVec2> {
        match self {
            Self::Some { prev_pos } => Some(*prev_pos),
            Self::None(_) => None,
        }
    }
}
