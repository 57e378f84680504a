use derivative::Derivative;
use glam::{ivec3, IVec3, UVec3, Vec3};
use log::debug;

use crate::gpu::{self, AccelerationStructure, Hit, MaterialId, Ray};
use crate::{Scene, Sun};

/// Dense grid of unit-sized voxels, spanning `<0, size)` in world
/// coordinates.
///
/// Used as the reference acceleration structure: rays are traversed with a
/// 3D DDA, voxel by voxel.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct VoxelGrid {
    size: UVec3,

    #[derivative(Debug = "ignore")]
    voxels: Vec<Option<MaterialId>>,
}

impl VoxelGrid {
    /// Object ids are assigned per chunk of this size.
    pub const CHUNK_SIZE: u32 = 16;

    pub fn new(size: UVec3) -> Self {
        debug!("Allocating voxel grid; size={:?}", size);

        Self {
            size,
            voxels: vec![None; (size.x * size.y * size.z) as usize],
        }
    }

    pub fn size(&self) -> UVec3 {
        self.size
    }

    pub fn contains(&self, pos: IVec3) -> bool {
        pos.cmpge(IVec3::ZERO).all() && pos.cmplt(self.size.as_ivec3()).all()
    }

    pub fn get(&self, pos: IVec3) -> Option<MaterialId> {
        if self.contains(pos) {
            self.voxels[self.idx(pos)]
        } else {
            None
        }
    }

    /// Sets given voxel; positions outside of the grid are ignored.
    pub fn set(&mut self, pos: IVec3, voxel: Option<MaterialId>) {
        if self.contains(pos) {
            let idx = self.idx(pos);

            self.voxels[idx] = voxel;
        }
    }

    /// Sets all voxels within `<min, max)`.
    pub fn fill(&mut self, min: IVec3, max: IVec3, voxel: Option<MaterialId>) {
        for z in min.z..max.z {
            for y in min.y..max.y {
                for x in min.x..max.x {
                    self.set(ivec3(x, y, z), voxel);
                }
            }
        }
    }

    /// Returns id of the object (chunk) given voxel belongs to; `0` is
    /// reserved for sky.
    pub fn object_id(&self, pos: IVec3) -> u32 {
        let chunk = pos.as_uvec3() / Self::CHUNK_SIZE;
        let chunks = (self.size + Self::CHUNK_SIZE - 1) / Self::CHUNK_SIZE;

        chunk.x + chunk.y * chunks.x + chunk.z * chunks.x * chunks.y + 1
    }

    fn idx(&self, pos: IVec3) -> usize {
        let pos = pos.as_uvec3();

        (pos.x + pos.y * self.size.x + pos.z * self.size.x * self.size.y)
            as usize
    }
}

impl AccelerationStructure for VoxelGrid {
    fn trace_nearest(&self, ray: Ray, max_distance: f32) -> Hit {
        let origin = ray.origin();
        let dir = ray.direction();
        let inv_dir = ray.inv_direction();

        // Clip the ray to the grid's bounding box
        let t0 = (Vec3::ZERO - origin) * inv_dir;
        let t1 = (self.size.as_vec3() - origin) * inv_dir;
        let t_near = t0.min(t1);
        let t_far = t0.max(t1).min_element();
        let t_enter = t_near.max_element();

        if t_far < t_enter.max(0.0) || t_enter > max_distance {
            return Hit::none();
        }

        let mut axis = if t_near.x >= t_near.y && t_near.x >= t_near.z {
            0
        } else if t_near.y >= t_near.z {
            1
        } else {
            2
        };

        let mut t = t_enter.max(0.0);

        let mut voxel = ray
            .at(t)
            .floor()
            .as_ivec3()
            .clamp(IVec3::ZERO, self.size.as_ivec3() - 1);

        let step = dir.signum().as_ivec3();

        let mut t_max = Vec3::splat(f32::INFINITY);
        let mut t_delta = Vec3::splat(f32::INFINITY);

        for i in 0..3 {
            if dir[i] != 0.0 {
                let boundary = if dir[i] > 0.0 {
                    (voxel[i] + 1) as f32
                } else {
                    voxel[i] as f32
                };

                t_max[i] = (boundary - origin[i]) * inv_dir[i];
                t_delta[i] = inv_dir[i].abs();
            }
        }

        loop {
            if t > max_distance {
                return Hit::none();
            }

            if let Some(material_id) = self.get(voxel) {
                let mut normal = Vec3::ZERO;
                normal[axis] = -dir[axis].signum();

                return Hit {
                    distance: t,
                    position: ray.at(t),
                    normal,
                    material_id,
                    object_id: self.object_id(voxel),
                };
            }

            axis = if t_max.x < t_max.y && t_max.x < t_max.z {
                0
            } else if t_max.y < t_max.z {
                1
            } else {
                2
            };

            t = t_max[axis];
            voxel[axis] += step[axis];
            t_max[axis] += t_delta[axis];

            if !self.contains(voxel) || t.is_infinite() {
                return Hit::none();
            }
        }
    }
}

/// [`Scene`] made of a single voxel grid.
///
/// The grid is optional, so that a world that's still being generated can be
/// represented as well.
#[derive(Clone, Debug, Default)]
pub struct VoxelScene {
    grid: Option<VoxelGrid>,
    materials: Vec<gpu::Material>,
    sun: Sun,
    revision: u64,
}

impl VoxelScene {
    pub fn new(materials: Vec<gpu::Material>) -> Self {
        Self {
            materials,
            ..Default::default()
        }
    }

    pub fn grid(&self) -> Option<&VoxelGrid> {
        self.grid.as_ref()
    }

    /// Replaces the world, bumping scene's revision.
    pub fn set_grid(&mut self, grid: Option<VoxelGrid>) {
        self.grid = grid;
        self.revision += 1;
    }

    /// Provides mutable access to the world, bumping scene's revision.
    pub fn grid_mut(&mut self) -> Option<&mut VoxelGrid> {
        self.revision += 1;
        self.grid.as_mut()
    }

    pub fn set_sun(&mut self, sun: Sun) {
        self.sun = sun;
    }
}

impl Scene for VoxelScene {
    fn acceleration_structure(&self) -> Option<&dyn AccelerationStructure> {
        self.grid
            .as_ref()
            .map(|grid| grid as &dyn AccelerationStructure)
    }

    fn materials(&self) -> &[gpu::Material] {
        &self.materials
    }

    fn sun(&self) -> Sun {
        self.sun
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}
