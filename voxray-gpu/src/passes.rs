use bytemuck::{Pod, Zeroable};

use crate::{F32Ext, MAX_DEPTH_OF_RECURSION};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LightingPassParams {
    pub seed: u32,
    pub flags: u32,
    pub depth_of_recursion: u32,
    pub ao_strength: f32,
    pub ao_radius: f32,
}

impl LightingPassParams {
    pub const DIRECT: u32 = 1 << 0;
    pub const INDIRECT: u32 = 1 << 1;
    pub const AMBIENT_OCCLUSION: u32 = 1 << 2;
    pub const SOFT_SHADOWS: u32 = 1 << 3;

    pub fn has(&self, flag: u32) -> bool {
        self.flags & flag > 0
    }

    /// Returns the number of indirect bounces, capped at
    /// [`MAX_DEPTH_OF_RECURSION`].
    pub fn depth_of_recursion(&self) -> u32 {
        self.depth_of_recursion.clamp(1, MAX_DEPTH_OF_RECURSION)
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ReprojectionPassParams {
    pub start_coef: f32,
    pub adapt_coef: f32,
    pub min_coef: f32,
    pub max_history: f32,
    pub depth_tolerance: f32,
    pub normal_tolerance: f32,
    pub frame_index: u32,
    pub flags: u32,
}

impl ReprojectionPassParams {
    /// Reject history whose object / material ids differ from the current
    /// ones.
    pub const WITH_IDS: u32 = 1 << 0;

    /// Previous frame's buffers hold meaningful data.
    pub const HISTORY_AVAILABLE: u32 = 1 << 1;

    /// Camera hasn't moved for `frame_index` frames and ground-truth
    /// accumulation is turned on: lifts the history cap so that the image
    /// converges towards the true mean.
    pub const ACCUMULATE: u32 = 1 << 2;

    pub fn has(&self, flag: u32) -> bool {
        self.flags & flag > 0
    }

    /// Returns the maximum history length a pixel can reach.
    pub fn history_cap(&self) -> f32 {
        if self.has(Self::ACCUMULATE) {
            self.max_history.max(self.frame_index as f32)
        } else {
            self.max_history
        }
    }

    /// Returns weight of the current sample when blending it with a history
    /// of given length.
    pub fn sample_weight(&self, history_len: f32) -> f32 {
        let floor = if self.has(Self::ACCUMULATE) {
            self.min_coef.min(1.0 / (self.frame_index.max(1) as f32))
        } else {
            self.min_coef
        };

        (self.start_coef / (1.0 + self.adapt_coef * history_len))
            .max(floor)
            .saturate()
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct VariancePassParams {
    /// History length at which the temporal estimate is fully trusted.
    pub history_threshold: f32,
    pub depth_sigma: f32,
    pub normal_sigma: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct WaveletPassParams {
    pub stride: u32,
    pub flags: u32,
    pub depth_sigma: f32,
    pub normal_sigma: f32,
    pub luma_sigma: f32,
    pub variance_cutoff: f32,
}

impl WaveletPassParams {
    /// Use variance to drive the luminance edge-stopping function.
    pub const VARIANCE_GUIDED: u32 = 1 << 0;

    pub fn has(&self, flag: u32) -> bool {
        self.flags & flag > 0
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct CompositionPassParams {
    pub mode: u32,
}

impl CompositionPassParams {
    pub const MODE_LIT: u32 = 0;
    pub const MODE_SIGNAL: u32 = 1;
    pub const MODE_VARIANCE: u32 = 2;
    pub const MODE_ALBEDO: u32 = 3;
    pub const MODE_NORMALS: u32 = 4;
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn reprojection(flags: u32, frame_index: u32) -> ReprojectionPassParams {
        ReprojectionPassParams {
            start_coef: 1.0,
            adapt_coef: 1.0,
            min_coef: 0.05,
            max_history: 32.0,
            depth_tolerance: 0.1,
            normal_tolerance: 0.9,
            frame_index,
            flags,
        }
    }

    #[test]
    fn sample_weight() {
        let params = reprojection(0, 1);

        assert_relative_eq!(params.sample_weight(0.0), 1.0);
        assert_relative_eq!(params.sample_weight(1.0), 0.5);
        assert_relative_eq!(params.sample_weight(3.0), 0.25);
        assert_relative_eq!(params.sample_weight(100.0), 0.05);
        assert_relative_eq!(params.history_cap(), 32.0);
    }

    #[test]
    fn sample_weight_when_accumulating() {
        let params = reprojection(ReprojectionPassParams::ACCUMULATE, 200);

        assert_relative_eq!(params.history_cap(), 200.0);
        assert_relative_eq!(params.sample_weight(99.0), 0.01);
        assert_relative_eq!(params.sample_weight(199.0), 1.0 / 200.0);
    }

    #[test]
    fn depth_of_recursion() {
        let mut params = LightingPassParams::default();

        assert_eq!(params.depth_of_recursion(), 1);

        params.depth_of_recursion = 3;
        assert_eq!(params.depth_of_recursion(), 3);

        params.depth_of_recursion = 100;
        assert_eq!(params.depth_of_recursion(), MAX_DEPTH_OF_RECURSION);
    }
}
