use voxray_gpu::prelude::*;

/// B3-spline kernel, indexed by absolute offset.
const KERNEL: [f32; 3] = [3.0 / 8.0, 1.0 / 4.0, 1.0 / 16.0];

/// Performs a single iteration of the edge-avoiding à-trous wavelet filter.
///
/// Input and output are both color (xyz) and variance (w); the host runs this
/// kernel a couple of times, doubling `params.stride` each time.
///
/// See:
/// - https://research.nvidia.com/publication/2017-07_spatiotemporal-variance-guided-filtering-real-time-reconstruction-path-traced
pub fn main(
    global_id: UVec2,
    params: &WaveletPassParams,
    camera: &Camera,
    surfaces: SurfaceMap,
    input: Tex,
) -> Vec4 {
    let center = input.read(global_id);
    let center_color = center.xyz();
    let center_var = center.w;
    let center_surface = surfaces.get(global_id);

    if center_surface.is_sky() {
        return center;
    }

    let is_variance_guided = params.has(WaveletPassParams::VARIANCE_GUIDED);

    if is_variance_guided && center_var <= params.variance_cutoff {
        return center;
    }

    // Zero turns the luminance edge-stopping function off
    let luma_sigma = if is_variance_guided {
        let var = blur_variance(global_id, params, camera, surfaces, input);

        params.luma_sigma * var.max(0.0).sqrt() + VOXRAY_EPSILON
    } else {
        0.0
    };

    let center_luma = center_color.luma();
    let stride = params.stride.max(1) as i32;

    let mut sum_weights = 0.0;
    let mut sum_color = Vec3::ZERO;
    let mut sum_var = 0.0;
    let mut sample_offset = ivec2(-2, -2);

    loop {
        let sample_pos = global_id.as_ivec2() + sample_offset * stride;

        if camera.contains(sample_pos) {
            let sample_pos = sample_pos.as_uvec2();
            let sample_surface = surfaces.get(sample_pos);

            if !sample_surface.is_sky() {
                let sample = input.read(sample_pos);

                let mut sample_weight = KERNEL
                    [sample_offset.x.unsigned_abs() as usize]
                    * KERNEL[sample_offset.y.unsigned_abs() as usize];

                if sample_offset != IVec2::ZERO {
                    sample_weight *= eval_sample_weight(
                        params,
                        center_surface,
                        center_luma,
                        sample_surface,
                        sample.xyz().luma(),
                        luma_sigma,
                    );
                }

                if sample_weight > 0.0 {
                    sum_weights += sample_weight;
                    sum_color += sample_weight * sample.xyz();
                    sum_var += sample_weight * sample_weight * sample.w;
                }
            }
        }

        // ---

        sample_offset.x += 1;

        if sample_offset.x == 3 {
            sample_offset.x = -2;
            sample_offset.y += 1;

            if sample_offset.y == 3 {
                break;
            }
        }
    }

    let out_color = sum_color / sum_weights;
    let out_var = sum_var / (sum_weights * sum_weights);

    out_color.extend(out_var)
}

/// Returns the center's variance, prefiltered with a 3x3 gaussian to make the
/// luminance edge-stopping function more stable.
fn blur_variance(
    global_id: UVec2,
    params: &WaveletPassParams,
    camera: &Camera,
    surfaces: SurfaceMap,
    input: Tex,
) -> f32 {
    let kernel = [1.0 / 4.0, 1.0 / 8.0, 1.0 / 16.0];
    let center_surface = surfaces.get(global_id);
    let mut sum = vec2(0.0, 0.0);
    let mut sample_offset = ivec2(-1, -1);

    loop {
        let sample_pos = global_id.as_ivec2() + sample_offset;

        if camera.contains(sample_pos) {
            let sample_pos = sample_pos.as_uvec2();
            let sample_surface = surfaces.get(sample_pos);

            if !sample_surface.is_sky() {
                let sample_weight = kernel[(sample_offset.x.abs()
                    + sample_offset.y.abs())
                    as usize]
                    * center_surface
                        .depth_weight(&sample_surface, params.depth_sigma);

                sum += vec2(input.read(sample_pos).w, 1.0) * sample_weight;
            }
        }

        // ---

        sample_offset.x += 1;

        if sample_offset.x == 2 {
            sample_offset.x = -1;
            sample_offset.y += 1;

            if sample_offset.y == 2 {
                break;
            }
        }
    }

    if sum.y > 0.0 {
        sum.x / sum.y
    } else {
        0.0
    }
}

fn eval_sample_weight(
    params: &WaveletPassParams,
    center_surface: Surface,
    center_luma: f32,
    sample_surface: Surface,
    sample_luma: f32,
    luma_sigma: f32,
) -> f32 {
    let depth_weight =
        center_surface.depth_weight(&sample_surface, params.depth_sigma);

    if depth_weight == 0.0 {
        return 0.0;
    }

    let normal_weight =
        center_surface.normal_weight(&sample_surface, params.normal_sigma);

    let luma_weight = if luma_sigma > 0.0 {
        (-(center_luma - sample_luma).abs() / luma_sigma).exp()
    } else {
        1.0
    };

    depth_weight * normal_weight * luma_weight
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::test_utils::*;

    const SIZE: UVec2 = UVec2::new(32, 32);

    fn params(stride: u32, flags: u32) -> WaveletPassParams {
        WaveletPassParams {
            stride,
            flags,
            depth_sigma: 0.2,
            normal_sigma: 32.0,
            luma_sigma: 4.0,
            variance_cutoff: 0.0,
        }
    }

    /// Runs the whole filter (five iterations) over given input.
    fn filter(
        scene: &TestScene,
        input: TestTexture,
        flags: u32,
    ) -> TestTexture {
        let camera = ortho_camera(SIZE, Vec2::ZERO);
        let gbuffer = TestGBuffer::render(&camera, scene);

        (0..5).fold(input, |input, iteration| {
            let params = params(1 << iteration, flags);

            TestTexture::new(SIZE, |pos| {
                main(pos, &params, &camera, gbuffer.surfaces(), input.tex())
            })
        })
    }

    fn noise(seed: u64, var: f32) -> TestTexture {
        let mut rng = StdRng::seed_from_u64(seed);

        let values: Vec<_> =
            (0..SIZE.x * SIZE.y).map(|_| rng.gen_range(0.0..1.0)).collect();

        TestTexture::new(SIZE, |pos| {
            Vec3::splat(values[(pos.y * SIZE.x + pos.x) as usize]).extend(var)
        })
    }

    fn spread(tex: &TestTexture, xs: impl Iterator<Item = u32> + Clone) -> f32 {
        let lumas: Vec<_> = (0..SIZE.y)
            .flat_map(|y| xs.clone().map(move |x| uvec2(x, y)))
            .map(|pos| tex.get(pos).xyz().luma())
            .collect();

        let mean = lumas.iter().sum::<f32>() / (lumas.len() as f32);

        lumas.iter().map(|l| (l - mean).sqr()).sum::<f32>()
            / (lumas.len() as f32)
    }

    /// Plane on the right, box (closer to the camera) on the left.
    fn depth_step(height: f32) -> TestScene {
        TestScene::plane()
            .with_blocker(vec3(-16.0, 0.0, -16.0), vec3(0.0, height, 16.0))
    }

    #[test]
    fn reduces_noise() {
        let input = noise(1, 1.0 / 12.0);
        let before = spread(&input, 0..SIZE.x);

        for flags in [0, WaveletPassParams::VARIANCE_GUIDED] {
            let output =
                filter(&TestScene::plane(), noise(1, 1.0 / 12.0), flags);

            let after = spread(&output, 0..SIZE.x);

            assert!(
                after < before * 0.25,
                "flags={flags}: {after} vs {before}"
            );
        }
    }

    fn assert_preserves_depth_edges(scene: &TestScene) {
        // Left half stays the same, right half differs; since both halves
        // are on different surfaces, the left half's output must not change
        let make_input = |right: f32| {
            let noise = noise(2, 0.1);

            TestTexture::new(SIZE, move |pos| {
                if pos.x < SIZE.x / 2 {
                    noise.get(pos)
                } else {
                    vec4(right, right, right, 0.1)
                }
            })
        };

        for flags in [0, WaveletPassParams::VARIANCE_GUIDED] {
            let a = filter(scene, make_input(0.0), flags);
            let b = filter(scene, make_input(100.0), flags);

            for y in 0..SIZE.y {
                for x in 0..SIZE.x / 2 {
                    assert_eq!(
                        a.get(uvec2(x, y)),
                        b.get(uvec2(x, y)),
                        "flags={flags}, x={x}, y={y}"
                    );
                }
            }

            // ... and the right half, being flat, must stay flat
            for y in 0..SIZE.y {
                for x in SIZE.x / 2..SIZE.x {
                    assert_relative_eq!(
                        b.get(uvec2(x, y)).x,
                        100.0,
                        epsilon = 0.01
                    );
                }
            }
        }
    }

    #[test]
    fn preserves_depth_edges() {
        assert_preserves_depth_edges(&depth_step(5.0));
    }

    #[test]
    fn preserves_one_voxel_steps() {
        assert_preserves_depth_edges(&depth_step(1.0));
    }

    #[test]
    fn is_deterministic() {
        let a = filter(&depth_step(5.0), noise(3, 0.1), 0);
        let b = filter(&depth_step(5.0), noise(3, 0.1), 0);

        assert_eq!(a.texels, b.texels);
    }

    #[test]
    fn skips_converged_pixels() {
        let camera = ortho_camera(SIZE, Vec2::ZERO);
        let gbuffer = TestGBuffer::render(&camera, &TestScene::plane());
        let input = noise(4, 0.0);

        let output = main(
            uvec2(5, 5),
            &params(1, WaveletPassParams::VARIANCE_GUIDED),
            &camera,
            gbuffer.surfaces(),
            input.tex(),
        );

        assert_eq!(output, input.get(uvec2(5, 5)));
    }

    #[test]
    fn propagates_variance() {
        let camera = ortho_camera(SIZE, Vec2::ZERO);
        let gbuffer = TestGBuffer::render(&camera, &TestScene::plane());
        let input = TestTexture::new(SIZE, |_| vec4(0.5, 0.5, 0.5, 1.0));

        let output = main(
            uvec2(16, 16),
            &params(1, 0),
            &camera,
            gbuffer.surfaces(),
            input.tex(),
        );

        // Flat input, so every weight equals to the kernel's; variance drops
        // by `sum(w^2) / sum(w)^2`
        let expected = KERNEL
            .iter()
            .chain(&KERNEL[1..])
            .map(|w| w * w)
            .sum::<f32>()
            .sqr()
            / KERNEL.iter().chain(&KERNEL[1..]).sum::<f32>().powi(4);

        assert_relative_eq!(output.x, 0.5, epsilon = 0.0001);
        assert_relative_eq!(output.w, expected, epsilon = 0.0001);
    }
}
