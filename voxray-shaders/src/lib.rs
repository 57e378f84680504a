//! Per-pixel kernels of voxray's rendering pipeline.
//!
//! Each kernel is a pure function of a pixel's position, read-only views into
//! the textures it samples and its pass parameters; it returns whatever it
//! produces for that pixel and the host writes it into the pass's outputs.

#![allow(clippy::too_many_arguments)]

pub mod composition;
pub mod gbuffer;
pub mod light_resolving;
pub mod lighting;
pub mod motion_vectors;
pub mod reprojection;
pub mod variance;
pub mod wavelet;

#[cfg(test)]
mod test_utils;
