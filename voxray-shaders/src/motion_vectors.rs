use voxray_gpu::prelude::*;

/// Projects the pixel's surface through the previous frame's camera and
/// returns the G-Buffer's motion texel (d3) with the motion vector filled
/// in.
///
/// Motion is `current screen position − previous screen position`; pixels
/// without a previous position (sky, first frame, surface behind the
/// previous camera) are marked as having no motion.
pub fn main(
    global_id: UVec2,
    prev_camera: &Camera,
    gbuffer: GBufferMap,
) -> Vec4 {
    let mut entry = gbuffer.get(global_id);

    entry.motion = Vec2::ZERO;
    entry.has_motion = false;

    if entry.is_some() && prev_camera.is_some() {
        let prev_clip = prev_camera.world_to_clip(entry.position);

        if prev_clip.w > 0.0 {
            let prev_screen_pos = prev_camera.clip_to_screen(prev_clip);

            entry.motion = global_id.as_vec2() + 0.5 - prev_screen_pos;
            entry.has_motion = true;
        }
    }

    entry.pack()[3]
}
