use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Every toggle and coefficient of the pipeline.
///
/// Settings are passed into each frame by reference, so changes take effect
/// on the next frame; toggling a stage never reallocates anything.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Strength of ambient occlusion; `0` turns it off.
    pub ambient_occlusion: u32,

    /// Length of ambient occlusion's rays.
    pub ambient_occlusion_radius: f32,

    pub direct_lighting: bool,
    pub indirect_lighting: bool,
    pub soft_shadows: bool,

    /// Number of bounces for indirect lighting, `1..=5`.
    pub depth_of_recursion: u32,

    pub reprojection: bool,

    /// Reject history of pixels whose object or material changed.
    pub reproject_with_ids: bool,

    /// Keep accumulating for as long as the camera doesn't move, converging
    /// to the ground truth.
    pub ground_truth_if_no_motion: bool,

    /// Weight of the current sample for a pixel without history.
    pub start_coef: f32,

    /// How quickly the current sample's weight drops as history grows.
    pub adapt_coef: f32,

    /// Lower bound of the current sample's weight.
    pub min_coef: f32,

    pub max_history_length: u32,

    /// Maximum distance (in world units) between the reprojected surface and
    /// the current surface's plane.
    pub depth_tolerance: f32,

    /// Minimum cosine between the current and the reprojected normal.
    pub normal_tolerance: f32,

    pub variance: bool,

    /// History length at which the temporal variance estimate is fully
    /// trusted.
    pub variance_history_threshold: f32,

    pub filtering: bool,

    /// Number of à-trous iterations, `1..=7`.
    pub filter_iterations: u32,

    /// Distance (in world units) from the center's plane at which the
    /// filter stops blending samples.
    pub filter_depth_sigma: f32,

    pub filter_normal_sigma: f32,
    pub filter_luma_sigma: f32,

    /// Pixels with variance at or below this value are not filtered.
    pub filter_variance_cutoff: f32,

    /// Multiply lighting by albedo; when turned off, the lighting signal
    /// itself gets displayed.
    pub combine_albedo_and_shadows: bool,

    /// With all lighting turned off, display normals instead of albedo.
    pub show_normals_when_unlit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ambient_occlusion: 0,
            ambient_occlusion_radius: 2.0,
            direct_lighting: true,
            indirect_lighting: false,
            soft_shadows: false,
            depth_of_recursion: 2,
            reprojection: true,
            reproject_with_ids: true,
            ground_truth_if_no_motion: false,
            start_coef: 1.0,
            adapt_coef: 1.0,
            min_coef: 0.05,
            max_history_length: 32,
            depth_tolerance: 0.1,
            normal_tolerance: 0.9,
            variance: true,
            variance_history_threshold: 4.0,
            filtering: true,
            filter_iterations: 5,
            filter_depth_sigma: 0.2,
            filter_normal_sigma: 32.0,
            filter_luma_sigma: 4.0,
            filter_variance_cutoff: 0.0,
            combine_albedo_and_shadows: true,
            show_normals_when_unlit: false,
        }
    }
}

impl Settings {
    /// Loads settings from given JSON file.
    ///
    /// Missing file yields the default settings; missing keys are
    /// defaulted and unknown ones are ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        let json = match fs::read_to_string(path) {
            Ok(json) => json,

            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "Settings not found at `{}`, using defaults",
                    path.display()
                );

                return Ok(Self::default());
            }

            Err(source) => {
                return Err(Error::SettingsIo {
                    path: path.to_owned(),
                    source,
                });
            }
        };

        debug!("Loading settings from `{}`", path.display());

        serde_json::from_str(&json).map_err(|source| Error::SettingsFormat {
            path: path.to_owned(),
            source,
        })
    }

    /// Saves settings into given JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();

        debug!("Saving settings to `{}`", path.display());

        let json = serde_json::to_string_pretty(self).map_err(|source| {
            Error::SettingsFormat {
                path: path.to_owned(),
                source,
            }
        })?;

        fs::write(path, json).map_err(|source| Error::SettingsIo {
            path: path.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::{env, process};

    use super::*;

    fn tmp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("voxray-{}-{}.json", process::id(), name))
    }

    #[test]
    fn load_missing() {
        let settings = Settings::load(tmp_path("missing")).unwrap();

        assert_eq!(Settings::default(), settings);
    }

    #[test]
    fn save_and_load() {
        let path = tmp_path("save-and-load");

        let settings = Settings {
            ambient_occlusion: 3,
            soft_shadows: true,
            min_coef: 0.1,
            filter_iterations: 7,
            ..Default::default()
        };

        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();

        fs::remove_file(&path).unwrap();

        assert_eq!(settings, loaded);
    }

    #[test]
    fn load_partial() {
        let path = tmp_path("partial");

        fs::write(&path, r#"{ "soft_shadows": true, "unknown_key": 123 }"#)
            .unwrap();

        let loaded = Settings::load(&path).unwrap();

        fs::remove_file(&path).unwrap();

        assert_eq!(
            Settings {
                soft_shadows: true,
                ..Default::default()
            },
            loaded
        );
    }

    #[test]
    fn load_invalid() {
        let path = tmp_path("invalid");

        fs::write(&path, "definitely not json").unwrap();

        let loaded = Settings::load(&path);

        fs::remove_file(&path).unwrap();

        assert!(matches!(loaded, Err(Error::SettingsFormat { .. })));
    }
}
