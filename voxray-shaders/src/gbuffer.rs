use voxray_gpu::prelude::*;

/// Traces the primary ray for given pixel and returns its G-Buffer entry,
/// packed.
///
/// Motion vectors are left empty; they are filled by
/// [`crate::motion_vectors::main()`].
pub fn main(
    global_id: UVec2,
    camera: &Camera,
    world: &World,
    accel: &dyn AccelerationStructure,
    materials: MaterialsView,
) -> [Vec4; 4] {
    let ray = camera.ray(global_id);
    let hit = accel.trace_nearest(ray, f32::MAX);

    if hit.is_none() {
        return GBufferEntry {
            albedo: world.sky_color(ray.direction()),
            ..Default::default()
        }
        .pack();
    }

    let material = materials.get(hit.material_id);

    GBufferEntry {
        normal: hit.normal,
        material_id: hit.material_id,
        position: hit.position,
        depth: camera.depth_of(hit.position).max(VOXRAY_EPSILON),
        albedo: material.albedo(),
        emission: material.emission(),
        motion: Vec2::ZERO,
        object_id: hit.object_id,
        has_motion: false,
    }
    .pack()
}
