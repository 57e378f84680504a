use voxray_gpu::prelude::*;

/// Blends the pixel's current sample with its history.
///
/// Returns `[color, moments]`:
///
/// - color: blended radiance (xyz) and history length (w),
/// - moments: first (x) and second (y) moment of luminance, history length
///   (z).
///
/// When history gets rejected (see [`Reprojection::find()`]), history length
/// goes back to zero and the sample is returned unmodified.
pub fn main(
    global_id: UVec2,
    params: &ReprojectionPassParams,
    curr_camera: &Camera,
    prev_camera: &Camera,
    curr_gbuffer: GBufferMap,
    prev_gbuffer: GBufferMap,
    signal: Tex,
    prev_colors: Tex,
    prev_moments: Tex,
) -> [Vec4; 2] {
    let sample = signal.read(global_id).xyz();
    let entry = curr_gbuffer.get(global_id);

    let reprojection = Reprojection::find(
        global_id,
        params,
        curr_camera,
        prev_camera,
        &entry,
        prev_gbuffer,
    );

    let Some(prev_pos) = reprojection.prev_pos() else {
        return reset(sample);
    };

    let prev_color = prev_colors.read(prev_pos).xyz();
    let prev_moments = prev_moments.read(prev_pos);

    let history_len = (prev_moments.z + 1.0).min(params.history_cap());
    let alpha = params.sample_weight(history_len);

    let sample_luma = sample.luma();
    let color = lerp(prev_color, sample, alpha);
    let m1 = lerp(prev_moments.x, sample_luma, alpha);
    let m2 = lerp(prev_moments.y, sample_luma * sample_luma, alpha);

    [color.extend(history_len), vec4(m1, m2, history_len, 0.0)]
}

/// Stands in for [`main()`] when reprojection is turned off: forwards the
/// sample with an empty history, so that there's still something to blend
/// with once reprojection gets turned back on.
pub fn passthrough(global_id: UVec2, signal: Tex) -> [Vec4; 2] {
    reset(signal.read(global_id).xyz())
}

fn reset(sample: Vec3) -> [Vec4; 2] {
    let luma = sample.luma();

    [sample.extend(0.0), vec4(luma, luma * luma, 0.0, 0.0)]
}
