// src/config/config_load.rs
//
// loading config.toml and the scene file it points at

use super::config_types::{AnimationConfig, OscConfig, PathConfig, Scene, SceneConfig, WindowConfig};
use crate::error::{FlowError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub window: WindowConfig,
    pub osc: OscConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    pub paths: PathConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        // First try the executable's directory
        if let Some(exe_config) = exe_dir().map(|dir| dir.join(CONFIG_FILE)) {
            if exe_config.exists() {
                tracing::info!(path = %exe_config.display(), "loading config");
                return Self::load_from(&exe_config);
            }
        }

        // Fallback to the current working directory
        tracing::info!(path = CONFIG_FILE, "loading config from working directory");
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Self::from_toml_str(&read(path)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Absolute scene paths are used as is; relative ones resolve against the
    /// executable's directory, then the working directory.
    pub fn resolve_scene_path(&self) -> PathBuf {
        let scene = Path::new(&self.paths.scene_file);
        if scene.is_absolute() {
            return scene.to_path_buf();
        }
        exe_dir()
            .map(|dir| dir.join(scene))
            .filter(|path| path.exists())
            .unwrap_or_else(|| scene.to_path_buf())
    }
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let scene = Self::from_json_str(&read(path)?)?;
        tracing::info!(
            path = %path.display(),
            markers = scene.markers.len(),
            connections = scene.connections.len(),
            "scene loaded"
        );
        Ok(scene)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(content)?;
        config.resolve()
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| FlowError::Io {
        path: path.to_path_buf(),
        source,
    })
}
