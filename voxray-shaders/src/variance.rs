use voxray_gpu::prelude::*;

/// Estimates variance of the pixel's luminance.
///
/// Pixels with a long history use the temporal estimate (from the blended
/// moments); pixels with a short (or no) history fall back to a spatial
/// estimate over their 7x7 neighbourhood, blended in proportion to history
/// length.
///
/// Returns the color (xyz) and its variance (w).
pub fn main(
    global_id: UVec2,
    params: &VariancePassParams,
    camera: &Camera,
    surfaces: SurfaceMap,
    colors: Tex,
    moments: Tex,
) -> Vec4 {
    let center_color = colors.read(global_id).xyz();
    let center_surface = surfaces.get(global_id);

    if center_surface.is_sky() {
        return center_color.extend(0.0);
    }

    let center_moments = moments.read(global_id);
    let history_len = center_moments.z;

    let temporal_var =
        (center_moments.y - center_moments.x * center_moments.x).max(0.0);

    let t = (history_len / params.history_threshold.max(VOXRAY_EPSILON))
        .saturate();

    let var = if t >= 1.0 {
        temporal_var
    } else {
        let spatial_var = estimate_spatial_variance(
            global_id,
            params,
            camera,
            surfaces,
            center_surface,
            colors,
        );

        lerp(spatial_var, temporal_var, t)
    };

    center_color.extend(var)
}

fn estimate_spatial_variance(
    global_id: UVec2,
    params: &VariancePassParams,
    camera: &Camera,
    surfaces: SurfaceMap,
    center_surface: Surface,
    colors: Tex,
) -> f32 {
    // x - sum of luminance
    // y - sum of squared luminance
    // z - sum of weights
    let mut sum = Vec3::ZERO;
    let mut sample_offset = ivec2(-3, -3);

    loop {
        let sample_pos = global_id.as_ivec2() + sample_offset;

        if camera.contains(sample_pos) {
            let sample_pos = sample_pos.as_uvec2();
            let sample_surface = surfaces.get(sample_pos);

            if !sample_surface.is_sky() {
                let sample_luma = colors.read(sample_pos).xyz().luma();

                let sample_weight = center_surface
                    .depth_weight(&sample_surface, params.depth_sigma)
                    * center_surface
                        .normal_weight(&sample_surface, params.normal_sigma);

                sum += vec3(sample_luma, sample_luma * sample_luma, 1.0)
                    * sample_weight;
            }
        }

        // ---

        sample_offset.x += 1;

        if sample_offset.x == 4 {
            sample_offset.x = -3;
            sample_offset.y += 1;

            if sample_offset.y == 4 {
                break;
            }
        }
    }

    if sum.z <= 0.0 {
        return 0.0;
    }

    let m1 = sum.x / sum.z;
    let m2 = sum.y / sum.z;

    (m2 - m1 * m1).max(0.0)
}
