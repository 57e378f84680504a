use crate::{gpu, Sun};

/// Provider of everything the renderer needs to know about the world.
pub trait Scene {
    /// Returns the acceleration structure or `None` if it's not ready yet
    /// (e.g. the world is still being generated); in that case cameras
    /// render a flat color.
    fn acceleration_structure(&self) -> Option<&dyn gpu::AccelerationStructure>;

    /// Returns materials indexed by [`gpu::MaterialId`].
    fn materials(&self) -> &[gpu::Material];

    fn sun(&self) -> Sun;

    /// Returns a number that changes whenever the world gets regenerated;
    /// object ids are not stable across revisions.
    fn revision(&self) -> u64;
}
