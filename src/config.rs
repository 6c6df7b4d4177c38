//! Application configuration
//!
//! Read from `assets/config/app.ron` at startup. Native builds let a user
//! file under the platform config directory take precedence. Every field
//! has a default, so a partial file (or none at all) is fine.

use crate::backend::BackendConfig;
use crate::scene::OrbitSettings;
use macroquad::math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bundled configuration, relative to the working directory / web root
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/app.ron";

/// Directory name under the platform config dir
#[cfg(not(target_arch = "wasm32"))]
const APP_DIR: &str = "edutech-academy";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(String),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Camera, controls and lighting for role card viewports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub camera_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping_factor: f32,
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub directional_position: [f32; 3],
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            fov: 75.0,
            camera_distance: 5.0,
            min_distance: 3.0,
            max_distance: 7.0,
            damping_factor: 0.05,
            ambient_intensity: 0.5,
            directional_intensity: 0.5,
            directional_position: [5.0, 3.0, 5.0],
        }
    }
}

impl ViewerSettings {
    pub fn orbit_settings(&self) -> OrbitSettings {
        OrbitSettings::clamped(self.damping_factor, self.min_distance, self.max_distance)
    }

    pub fn directional_position(&self) -> Vec3 {
        Vec3::from_array(self.directional_position)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base directory (or URL path) holding the role models
    pub models_dir: String,
    /// Remote backend settings; no backend client when absent
    pub backend: Option<BackendConfig>,
    pub viewer: ViewerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models_dir: "assets/models".to_string(),
            backend: None,
            viewer: ViewerSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(contents)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_ron(&contents)
    }

    /// Per-user override location (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn user_config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("app.ron"))
    }

    /// Load the effective configuration, falling back to defaults
    pub async fn load() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            match Self::load_file(&path) {
                Ok(config) => {
                    log::info!("using config {}", path.display());
                    return config;
                }
                Err(e) => log::warn!("ignoring {}: {}", path.display(), e),
            }
        }

        let loaded = match macroquad::file::load_string(DEFAULT_CONFIG_PATH).await {
            Ok(contents) => Self::from_ron(&contents),
            Err(e) => Err(ConfigError::Io(format!("{}: {}", DEFAULT_CONFIG_PATH, e))),
        };
        match loaded {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Locator for a model file inside `models_dir`
    pub fn model_path(&self, file: &str) -> String {
        let dir = self.models_dir.trim_end_matches('/');
        if dir.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", dir, file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.model_path("student.glb"), "assets/models/student.glb");
        assert!(config.backend.is_none());
        assert_eq!(config.viewer.fov, 75.0);
        let orbit = config.viewer.orbit_settings();
        assert!(orbit.enable_damping && !orbit.enable_pan);
        assert_eq!((orbit.min_distance, orbit.max_distance), (3.0, 7.0));
    }

    #[test]
    fn test_partial_ron() {
        let config = AppConfig::from_ron(r#"(models_dir: "models/", viewer: (fov: 60.0))"#).unwrap();
        assert_eq!(config.model_path("teacher.glb"), "models/teacher.glb");
        assert_eq!(config.viewer.fov, 60.0);
        // Unlisted fields keep their defaults
        assert_eq!(config.viewer.max_distance, 7.0);
    }

    #[test]
    fn test_bundled_config_matches_defaults() {
        let config = AppConfig::from_ron(include_str!("../assets/config/app.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_ron() {
        assert!(matches!(AppConfig::from_ron("(models_dir: 12"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(viewer: (damping_factor: 0.1))").unwrap();
        let config = AppConfig::load_file(file.path()).unwrap();
        assert_eq!(config.viewer.damping_factor, 0.1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_file(&dir.path().join("absent.ron"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_empty_models_dir() {
        let config = AppConfig { models_dir: String::new(), ..Default::default() };
        assert_eq!(config.model_path("a.glb"), "a.glb");
    }
}
