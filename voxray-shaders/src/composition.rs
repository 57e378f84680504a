use voxray_gpu::prelude::*;

/// Produces the final color of given pixel.
///
/// `signal` is the denoised lighting (or, in the variance view, the variance
/// estimate's output).
pub fn main(
    global_id: UVec2,
    params: &CompositionPassParams,
    gbuffer: GBufferMap,
    signal: Tex,
) -> Vec4 {
    let entry = gbuffer.get(global_id);
    let signal = signal.read(global_id);

    let color = match params.mode {
        CompositionPassParams::MODE_SIGNAL => signal.xyz(),
        CompositionPassParams::MODE_VARIANCE => Vec3::splat(signal.w),
        CompositionPassParams::MODE_ALBEDO => entry.albedo,

        CompositionPassParams::MODE_NORMALS => {
            if entry.is_sky() {
                Vec3::ZERO
            } else {
                entry.normal * 0.5 + 0.5
            }
        }

        _ => {
            if entry.is_sky() {
                entry.albedo
            } else {
                entry.albedo * signal.xyz() + entry.albedo * entry.emission
            }
        }
    };

    color.extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn compose(mode: u32, pos: UVec2) -> Vec3 {
        let size = uvec2(8, 8);
        let camera = ortho_camera(size, Vec2::ZERO);
        let gbuffer = TestGBuffer::render(&camera, &TestScene::floor());
        let signal = TestTexture::new(size, |_| vec4(0.5, 0.25, 1.0, 0.125));

        main(
            pos,
            &CompositionPassParams { mode },
            gbuffer.map(),
            signal.tex(),
        )
        .xyz()
    }

    #[test]
    fn smoke() {
        let floor = uvec2(1, 1);
        let sky = uvec2(6, 1);
        let albedo = test_materials()[1].albedo();

        assert_eq!(
            compose(CompositionPassParams::MODE_LIT, floor),
            albedo * vec3(0.5, 0.25, 1.0)
        );

        assert_eq!(
            compose(CompositionPassParams::MODE_LIT, sky),
            noon().sky_color(Vec3::NEG_Y)
        );

        assert_eq!(
            compose(CompositionPassParams::MODE_SIGNAL, floor),
            vec3(0.5, 0.25, 1.0)
        );

        assert_eq!(
            compose(CompositionPassParams::MODE_VARIANCE, floor),
            Vec3::splat(0.125)
        );

        assert_eq!(compose(CompositionPassParams::MODE_ALBEDO, floor), albedo);

        assert_eq!(
            compose(CompositionPassParams::MODE_NORMALS, floor),
            vec3(0.5, 1.0, 0.5)
        );

        assert_eq!(
            compose(CompositionPassParams::MODE_NORMALS, sky),
            Vec3::ZERO
        );
    }
}
