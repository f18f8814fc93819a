//! Configuration loader. Reads design parameters from airframe.toml.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::params::{BuildSettings, RawInputs};

const FILE_NAME: &str = "airframe.toml";
const ENV_VAR: &str = "AIRFRAME_CONFIG";

/// Contents of the parameter file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Design inputs from the `[default]` table.
    #[serde(rename = "default")]
    pub inputs: RawInputs,
    /// Mesh settings from the optional `[build]` table.
    #[serde(default)]
    pub build: BuildSettings,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Resolve the path to airframe.toml.
///
/// Tries in order:
/// 1. `AIRFRAME_CONFIG` environment variable
/// 2. `airframe.toml` in the crate manifest directory (compile-time)
/// 3. `airframe.toml` next to the current executable
/// 4. `airframe.toml` in the current directory
pub fn resolve_config_path() -> PathBuf {
    if let Ok(p) = std::env::var(ENV_VAR) {
        return PathBuf::from(p);
    }

    let manifest_relative = Path::new(env!("CARGO_MANIFEST_DIR")).join(FILE_NAME);
    if manifest_relative.exists() {
        return manifest_relative;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(FILE_NAME);
            if candidate.exists() {
                return candidate;
            }
        }
    }

    PathBuf::from(FILE_NAME)
}

/// Load and parse a parameter file. `None` resolves the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(resolve_config_path, Path::to_path_buf);
    log::debug!("config.load_config | reading {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Config::from_toml(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[default]
mode = "NASA"
length = 30.0
diameter = 2.0
nose_length = 5.0
sweep_angle_deg = 20.0
mach = 0.8

[default.wing]
root_chord = 3.0
tip_chord = 1.5
span = 2.0
offset = 10.0

[default.fin]
root_chord = 4.0
tip_chord = 2.0
span = 3.0
offset = 26.0

[build]
nose_segments = 80
radial_segments = 48
"#;

    #[test]
    fn test_parse_sample() {
        let cfg = Config::from_toml(SAMPLE).unwrap();
        assert_eq!(cfg.inputs.mode, "NASA");
        assert_eq!(cfg.inputs.length, 30.0);
        assert_eq!(cfg.inputs.mach, 0.8);
        assert_eq!(cfg.inputs.aoa, 0.0);
        assert_eq!(cfg.inputs.fin.offset, 26.0);
        assert_eq!(cfg.build.nose_segments, 80);
        assert_eq!(cfg.build.radial_segments, 48);
        assert_eq!(cfg.build.scale, 10.0);
        assert_eq!(cfg.build.plate_thickness, 0.75);
    }

    #[test]
    fn test_missing_build_table_uses_defaults() {
        let without_build = SAMPLE.split("[build]").next().unwrap();
        let cfg = Config::from_toml(without_build).unwrap();
        assert_eq!(cfg.build, BuildSettings::default());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Config::from_toml("[default]\nlength = \"long\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/airframe.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bundled_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(FILE_NAME);
        let cfg = load_config(Some(&path)).unwrap();
        assert!(cfg.inputs.mode.parse::<crate::params::Mode>().is_ok());
        assert_eq!(cfg.build, BuildSettings::default());
    }
}
