use voxray_gpu::prelude::*;

/// Folds all enabled lighting terms into a single signal that's then
/// denoised.
///
/// Ambient occlusion darkens the other terms; if it's the only enabled term,
/// it becomes the signal itself.
pub fn main(
    global_id: UVec2,
    params: &LightingPassParams,
    world: &World,
    direct: Tex,
    indirect: Tex,
    ambient_occlusion: Tex,
) -> Vec4 {
    let has_direct = params.has(LightingPassParams::DIRECT);
    let has_indirect = params.has(LightingPassParams::INDIRECT);
    let has_ao = params.has(LightingPassParams::AMBIENT_OCCLUSION);

    let mut signal = Vec3::ZERO;

    if has_direct {
        signal += direct.read(global_id).xyz();
    }

    if has_indirect {
        signal += indirect.read(global_id).xyz();
    }

    if has_ao {
        let ao = ambient_occlusion.read(global_id).x;

        if has_direct || has_indirect {
            signal *= ao;
        } else {
            signal = Vec3::splat(ao * world.light_intensity());
        }
    }

    signal.extend(1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::test_utils::*;

    fn resolve(flags: u32) -> Vec3 {
        let size = uvec2(1, 1);
        let direct = TestTexture::new(size, |_| vec4(0.5, 0.5, 0.5, 1.0));
        let indirect = TestTexture::new(size, |_| vec4(0.1, 0.2, 0.3, 1.0));
        let ao = TestTexture::new(size, |_| Vec4::splat(0.5));

        let params = LightingPassParams {
            flags,
            ..Default::default()
        };

        main(
            uvec2(0, 0),
            &params,
            &noon(),
            direct.tex(),
            indirect.tex(),
            ao.tex(),
        )
        .xyz()
    }

    #[test]
    fn smoke() {
        const D: u32 = LightingPassParams::DIRECT;
        const I: u32 = LightingPassParams::INDIRECT;
        const AO: u32 = LightingPassParams::AMBIENT_OCCLUSION;

        assert_eq!(resolve(0), Vec3::ZERO);
        assert_eq!(resolve(D), vec3(0.5, 0.5, 0.5));
        assert_eq!(resolve(I), vec3(0.1, 0.2, 0.3));

        let actual = resolve(D | I | AO);

        assert_relative_eq!(actual.x, 0.30, epsilon = 0.0001);
        assert_relative_eq!(actual.y, 0.35, epsilon = 0.0001);
        assert_relative_eq!(actual.z, 0.40, epsilon = 0.0001);

        let actual = resolve(AO);

        assert_relative_eq!(actual.x, 0.5 * noon().light_intensity());
    }
}
