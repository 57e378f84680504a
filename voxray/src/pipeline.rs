use crate::{gpu, Settings};

/// A single step of the frame, in the order of execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    GBuffer,
    MotionVectors,
    Lighting,
    LightResolving,
    Reprojection,

    /// Forwards the signal with an empty history, standing in for
    /// [`Stage::Reprojection`] when it's turned off.
    HistoryPassthrough,

    VarianceEstimation,
    SpatialFilter { iterations: u32 },
    Composition(CompositeMode),

    /// Fills the output with a flat color; used while the scene is not
    /// ready yet.
    FlatColor,
}

/// What gets displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositeMode {
    /// Albedo multiplied by the (denoised) lighting, plus emission.
    Lit,

    /// The lighting signal itself.
    Signal,

    /// Per-pixel variance estimate, as grayscale.
    Variance,

    Albedo,
    Normals,
}

impl CompositeMode {
    pub(crate) fn serialize(&self) -> u32 {
        match self {
            CompositeMode::Lit => gpu::CompositionPassParams::MODE_LIT,
            CompositeMode::Signal => gpu::CompositionPassParams::MODE_SIGNAL,
            CompositeMode::Variance => {
                gpu::CompositionPassParams::MODE_VARIANCE
            }
            CompositeMode::Albedo => gpu::CompositionPassParams::MODE_ALBEDO,
            CompositeMode::Normals => gpu::CompositionPassParams::MODE_NORMALS,
        }
    }
}

/// Resolves [`Settings`] into the list of stages to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    pub direct: bool,
    pub indirect: bool,
    pub soft_shadows: bool,
    pub ambient_occlusion: bool,
    pub reprojection: bool,
    pub variance: bool,
    pub filtering: bool,
    pub filter_iterations: u32,
    pub combine_albedo: bool,
    pub show_normals_when_unlit: bool,
}

impl PipelineConfig {
    pub const MAX_FILTER_ITERATIONS: u32 = 7;

    pub fn new(settings: &Settings) -> Self {
        Self {
            direct: settings.direct_lighting,
            indirect: settings.indirect_lighting,
            soft_shadows: settings.soft_shadows,
            ambient_occlusion: settings.ambient_occlusion > 0,
            reprojection: settings.reprojection,
            variance: settings.variance,
            filtering: settings.filtering,
            filter_iterations: settings
                .filter_iterations
                .clamp(1, Self::MAX_FILTER_ITERATIONS),
            combine_albedo: settings.combine_albedo_and_shadows,
            show_normals_when_unlit: settings.show_normals_when_unlit,
        }
    }

    /// Returns whether any lighting term is turned on.
    pub fn has_lighting(&self) -> bool {
        self.direct || self.indirect || self.ambient_occlusion
    }

    /// Returns whether the lighting signal contains stochastic terms; hard
    /// direct lighting alone is noise-free and doesn't need filtering.
    pub fn is_noisy(&self) -> bool {
        self.indirect || self.soft_shadows || self.ambient_occlusion
    }

    pub fn stages(&self, scene_ready: bool) -> Vec<Stage> {
        if !scene_ready {
            return vec![Stage::FlatColor];
        }

        let mut stages = vec![Stage::GBuffer, Stage::MotionVectors];

        if !self.has_lighting() {
            stages.push(Stage::Composition(if self.show_normals_when_unlit {
                CompositeMode::Normals
            } else {
                CompositeMode::Albedo
            }));

            return stages;
        }

        stages.push(Stage::Lighting);
        stages.push(Stage::LightResolving);

        stages.push(if self.reprojection {
            Stage::Reprojection
        } else {
            Stage::HistoryPassthrough
        });

        if self.variance {
            stages.push(Stage::VarianceEstimation);
        }

        let filtered = self.filtering && self.is_noisy();

        if filtered {
            stages.push(Stage::SpatialFilter {
                iterations: self.filter_iterations,
            });
        }

        let mode = if self.combine_albedo {
            CompositeMode::Lit
        } else if self.variance && !filtered {
            CompositeMode::Variance
        } else {
            CompositeMode::Signal
        };

        stages.push(Stage::Composition(mode));
        stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stages(settings: Settings) -> Vec<Stage> {
        PipelineConfig::new(&settings).stages(true)
    }

    #[test]
    fn default_settings() {
        assert_eq!(
            vec![
                Stage::GBuffer,
                Stage::MotionVectors,
                Stage::Lighting,
                Stage::LightResolving,
                Stage::Reprojection,
                Stage::VarianceEstimation,
                Stage::Composition(CompositeMode::Lit),
            ],
            stages(Settings::default()),
        );
    }

    #[test]
    fn noisy_lighting_gets_filtered() {
        assert_eq!(
            vec![
                Stage::GBuffer,
                Stage::MotionVectors,
                Stage::Lighting,
                Stage::LightResolving,
                Stage::Reprojection,
                Stage::VarianceEstimation,
                Stage::SpatialFilter { iterations: 5 },
                Stage::Composition(CompositeMode::Lit),
            ],
            stages(Settings {
                soft_shadows: true,
                ..Default::default()
            }),
        );

        assert!(stages(Settings {
            indirect_lighting: true,
            filtering: false,
            ..Default::default()
        })
        .iter()
        .all(|stage| !matches!(stage, Stage::SpatialFilter { .. })));
    }

    #[test]
    fn filter_iterations_are_clamped() {
        let config = PipelineConfig::new(&Settings {
            filter_iterations: 100,
            ..Default::default()
        });

        assert_eq!(7, config.filter_iterations);

        let config = PipelineConfig::new(&Settings {
            filter_iterations: 0,
            ..Default::default()
        });

        assert_eq!(1, config.filter_iterations);
    }

    #[test]
    fn no_lighting() {
        assert_eq!(
            vec![
                Stage::GBuffer,
                Stage::MotionVectors,
                Stage::Composition(CompositeMode::Albedo),
            ],
            stages(Settings {
                direct_lighting: false,
                ..Default::default()
            }),
        );

        assert_eq!(
            Some(&Stage::Composition(CompositeMode::Normals)),
            stages(Settings {
                direct_lighting: false,
                show_normals_when_unlit: true,
                ..Default::default()
            })
            .last(),
        );
    }

    #[test]
    fn reprojection_turned_off() {
        assert!(stages(Settings {
            reprojection: false,
            ..Default::default()
        })
        .contains(&Stage::HistoryPassthrough));
    }

    #[test]
    fn uncombined_output() {
        assert_eq!(
            Some(&Stage::Composition(CompositeMode::Variance)),
            stages(Settings {
                combine_albedo_and_shadows: false,
                ..Default::default()
            })
            .last(),
        );

        assert_eq!(
            Some(&Stage::Composition(CompositeMode::Signal)),
            stages(Settings {
                combine_albedo_and_shadows: false,
                variance: false,
                ..Default::default()
            })
            .last(),
        );
    }

    #[test]
    fn scene_not_ready() {
        let config = PipelineConfig::new(&Settings::default());

        assert_eq!(vec![Stage::FlatColor], config.stages(false));
    }
}
