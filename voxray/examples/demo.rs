//! Renders a small voxel landscape and saves the result as `demo.png`.
//!
//! Usage: `cargo run --example demo -- [settings.json]`; the settings file is
//! created with default values if it doesn't exist.

use std::env;

use glam::{ivec3, uvec2, uvec3, vec3, Mat4, Vec3};
use log::info;
use voxray::gpu::{Material, MaterialId};
use voxray::{Camera, Engine, Error, Settings, Sun, VoxelGrid, VoxelScene};

const GRASS: MaterialId = MaterialId::new(1);
const STONE: MaterialId = MaterialId::new(2);
const LAMP: MaterialId = MaterialId::new(3);

fn main() -> Result<(), Error> {
    env_logger::init();

    let settings_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "settings.json".into());

    let settings = Settings::load(&settings_path)?;

    settings.save(&settings_path)?;

    let mut scene = VoxelScene::new(vec![
        Material::default(),
        Material::new(vec3(0.3, 0.7, 0.2), 0.0),
        Material::new(vec3(0.5, 0.5, 0.5), 0.0),
        Material::new(vec3(1.0, 0.9, 0.6), 4.0),
    ]);

    scene.set_grid(Some(landscape()));

    let mut engine = Engine::new();
    let size = uvec2(320, 240);
    let eye = vec3(-8.0, 28.0, -8.0);

    let handle = engine.create_camera(Camera::new(
        size,
        Mat4::look_at_rh(eye, vec3(32.0, 0.0, 32.0), Vec3::Y),
        Mat4::perspective_rh(
            45.0_f32.to_radians(),
            size.x as f32 / size.y as f32,
            0.1,
            500.0,
        ),
    ))?;

    for frame in 0..32 {
        // Late afternoon, slowly turning into evening
        scene.set_sun(Sun {
            progress: 0.35 + (frame as f32) * 0.001,
            ..Default::default()
        });

        engine.render_camera(handle, &settings, &scene);
    }

    info!("Rendered {} frames", engine.camera(handle).frame_counter());

    engine.camera(handle).output().save("demo.png")?;

    Ok(())
}

/// Rolling hills of grass on top of stone, with a couple of lamps.
fn landscape() -> VoxelGrid {
    let mut grid = VoxelGrid::new(uvec3(64, 16, 64));

    for z in 0..64 {
        for x in 0..64 {
            let height = 4.0
                + 2.0 * (x as f32 * 0.2).sin()
                + 2.0 * (z as f32 * 0.15).cos();

            let height = height.max(1.0) as i32;

            grid.fill(
                ivec3(x, 0, z),
                ivec3(x + 1, height - 1, z + 1),
                Some(STONE),
            );

            grid.set(ivec3(x, height - 1, z), Some(GRASS));
        }
    }

    for (x, z) in [(16, 16), (40, 24), (24, 48)] {
        grid.fill(ivec3(x, 0, z), ivec3(x + 1, 12, z + 1), Some(STONE));
        grid.set(ivec3(x, 12, z), Some(LAMP));
    }

    grid
}
