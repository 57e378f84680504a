use crate::{Hit, Ray};

/// Spatial index over the scene's geometry, queried by every ray-traced
/// stage.
///
/// Building and refreshing the structure (e.g. after a chunk has been
/// modified) is up to the scene provider; the renderer only traces rays
/// through it.
pub trait AccelerationStructure: Send + Sync {
    /// Traces given ray and returns its nearest hit up to given distance (or
    /// [`Hit::none()`] if nothing was hit).
    fn trace_nearest(&self, ray: Ray, max_distance: f32) -> Hit;

    /// Traces given ray and returns whether it hits anything up to given
    /// distance.
    fn trace_any(&self, ray: Ray, max_distance: f32) -> bool {
        self.trace_nearest(ray, max_distance).is_some()
    }
}
