use voxray_gpu::prelude::*;

/// Traces the noisy lighting of given pixel's primary surface.
///
/// Returns `[direct, indirect, ambient occlusion]`; terms that are turned off
/// come back as zero (or as one, in the case of ambient occlusion).
pub fn main(
    global_id: UVec2,
    params: &LightingPassParams,
    world: &World,
    gbuffer: GBufferMap,
    accel: &dyn AccelerationStructure,
    materials: MaterialsView,
) -> [Vec4; 3] {
    let entry = gbuffer.get(global_id);

    if entry.is_sky() {
        return [Vec4::ZERO, Vec4::ZERO, Vec4::ONE];
    }

    let mut noise = Noise::new(params.seed, global_id);

    let direct = if params.has(LightingPassParams::DIRECT) {
        trace_sun(&mut noise, params, world, accel, entry.position, entry.normal)
    } else {
        Vec3::ZERO
    };

    let indirect = if params.has(LightingPassParams::INDIRECT) {
        trace_indirect(
            &mut noise,
            params,
            world,
            accel,
            materials,
            entry.position,
            entry.normal,
        )
    } else {
        Vec3::ZERO
    };

    let ao = if params.has(LightingPassParams::AMBIENT_OCCLUSION) {
        trace_ambient_occlusion(
            &mut noise,
            params,
            accel,
            entry.position,
            entry.normal,
        )
    } else {
        1.0
    };

    [direct.extend(1.0), indirect.extend(1.0), Vec4::splat(ao)]
}

/// Returns radiance the sun delivers to given point, or zero if the point is
/// in shadow.
fn trace_sun(
    noise: &mut Noise,
    params: &LightingPassParams,
    world: &World,
    accel: &dyn AccelerationStructure,
    point: Vec3,
    normal: Vec3,
) -> Vec3 {
    let target = if params.has(LightingPassParams::SOFT_SHADOWS) {
        world.sun_position() + noise.sample_sphere() * world.sun_radius()
    } else {
        world.sun_position()
    };

    let to_target = target - point;
    let distance = to_target.length();
    let direction = to_target / distance;
    let cos_angle = normal.dot(direction);

    if cos_angle <= 0.0 {
        return Vec3::ZERO;
    }

    let ray = Ray::from_surface(point, normal, direction);

    if accel.trace_any(ray, distance) {
        return Vec3::ZERO;
    }

    Vec3::splat(cos_angle * world.light_intensity())
}

/// Follows a cosine-weighted path of up to `depth_of_recursion` bounces,
/// performing next-event estimation towards the sun at each bounce.
///
/// The primary surface's albedo is left out, it's applied during
/// composition.
fn trace_indirect(
    noise: &mut Noise,
    params: &LightingPassParams,
    world: &World,
    accel: &dyn AccelerationStructure,
    materials: MaterialsView,
    mut point: Vec3,
    mut normal: Vec3,
) -> Vec3 {
    let mut radiance = Vec3::ZERO;
    let mut throughput = Vec3::ONE;

    for _ in 0..params.depth_of_recursion() {
        let direction = noise.sample_hemisphere(normal);
        let ray = Ray::from_surface(point, normal, direction);
        let hit = accel.trace_nearest(ray, f32::MAX);

        if hit.is_none() {
            radiance += throughput * world.sky_color(direction);
            break;
        }

        let material = materials.get(hit.material_id);

        throughput *= material.albedo();
        radiance += throughput * material.emission();

        radiance += throughput
            * trace_sun(noise, params, world, accel, hit.position, hit.normal);

        point = hit.position;
        normal = hit.normal;
    }

    radiance
}

/// Returns `<0.0, 1.0>`, where `1.0` means "not occluded".
fn trace_ambient_occlusion(
    noise: &mut Noise,
    params: &LightingPassParams,
    accel: &dyn AccelerationStructure,
    point: Vec3,
    normal: Vec3,
) -> f32 {
    let radius = params.ao_radius.max(VOXRAY_EPSILON);
    let direction = noise.sample_hemisphere(normal);
    let ray = Ray::from_surface(point, normal, direction);
    let hit = accel.trace_nearest(ray, radius);

    let occlusion = if hit.is_some() {
        1.0 - hit.distance / radius
    } else {
        0.0
    };

    (1.0 - occlusion).saturate().powf(params.ao_strength)
}
