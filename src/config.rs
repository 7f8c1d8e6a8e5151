//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rstreemap/rstreemap.toml`
//! 3. Local config: an explicit file passed by the caller
//! 4. Environment variables: `RSTREEMAP_*` prefix (`__` separates nested keys)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::flavor::{FILESYSTEM_SEPARATOR, POPULATION_SEPARATOR};
use crate::domain::{ColorSource, Flavor, RandomColors, Rect, SeededColors};

/// Path separators per tree flavor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SeparatorConfig {
    pub population: String,
    pub filesystem: String,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            population: POPULATION_SEPARATOR.into(),
            filesystem: FILESYSTEM_SEPARATOR.into(),
        }
    }
}

/// Default drawing surface handed to `layout`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub world_label: Option<String>,
    pub color_seed: Option<u64>,
    pub separators: RawSeparatorConfig,
    pub canvas: RawCanvasConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSeparatorConfig {
    pub population: Option<String>,
    pub filesystem: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCanvasConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Unified configuration for rstreemap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Label of the population tree's root (default: "World")
    pub world_label: String,
    /// Seed for reproducible leaf colors; random colors when unset
    pub color_seed: Option<u64>,
    pub separators: SeparatorConfig,
    pub canvas: CanvasConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_label: "World".into(),
            color_seed: None,
            separators: SeparatorConfig::default(),
            canvas: CanvasConfig::default(),
        }
    }
}

/// Get the XDG config directory for rstreemap.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rstreemap").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rstreemap.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ApplicationError::io(format!("read {}", path.display()), e))?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            world_label: overlay
                .world_label
                .clone()
                .unwrap_or_else(|| self.world_label.clone()),
            color_seed: overlay.color_seed.or(self.color_seed),
            separators: SeparatorConfig {
                population: overlay
                    .separators
                    .population
                    .clone()
                    .unwrap_or_else(|| self.separators.population.clone()),
                filesystem: overlay
                    .separators
                    .filesystem
                    .clone()
                    .unwrap_or_else(|| self.separators.filesystem.clone()),
            },
            canvas: CanvasConfig {
                width: overlay.canvas.width.unwrap_or(self.canvas.width),
                height: overlay.canvas.height.unwrap_or(self.canvas.height),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_config` - Optional config file layered over the global one; it
    ///   must exist if given
    pub fn load(local_config: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit local config
        if let Some(local_path) = local_config {
            if !local_path.exists() {
                return Err(ApplicationError::NotFound(local_path.to_path_buf()));
            }
            let raw = load_raw_settings(local_path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply RSTREEMAP_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        Self::apply_env_source(settings, None)
    }

    /// Reads overrides from `source` instead of the process environment when given.
    ///
    /// The prefix is joined with a single `_`; nested keys use `__`, so
    /// `RSTREEMAP_CANVAS__WIDTH` maps to `canvas.width`.
    fn apply_env_source(
        mut settings: Self,
        source: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("RSTREEMAP")
                    .prefix_separator("_")
                    .separator("__")
                    .source(source),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("world_label") {
            settings.world_label = val;
        }
        if let Ok(val) = config.get::<u64>("color_seed") {
            settings.color_seed = Some(val);
        }
        if let Ok(val) = config.get_string("separators.population") {
            settings.separators.population = val;
        }
        if let Ok(val) = config.get_string("separators.filesystem") {
            settings.separators.filesystem = val;
        }
        if let Ok(val) = config.get::<u32>("canvas.width") {
            settings.canvas.width = val;
        }
        if let Ok(val) = config.get::<u32>("canvas.height") {
            settings.canvas.height = val;
        }

        Ok(settings)
    }

    /// Effective path separator for `flavor`.
    pub fn separator_for(&self, flavor: &Flavor) -> String {
        match flavor {
            Flavor::Population => self.separators.population.clone(),
            Flavor::FileSystem => self.separators.filesystem.clone(),
            Flavor::Custom { separator } => separator.clone(),
        }
    }

    /// Seeded colors when `color_seed` is set, random otherwise.
    pub fn color_source(&self) -> Box<dyn ColorSource> {
        match self.color_seed {
            Some(seed) => Box::new(SeededColors::new(seed)),
            None => Box::new(RandomColors),
        }
    }

    /// The whole canvas, anchored at the origin.
    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0, 0, self.canvas.width, self.canvas.height)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# rstreemap configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rstreemap/rstreemap.toml
#   Local:  a file passed explicitly by the host application
#   Env:    RSTREEMAP_* environment variables, e.g. RSTREEMAP_CANVAS__WIDTH=800

# Label of the population tree's root
# world_label = "World"

# Seed for reproducible leaf colors (random when unset)
# color_seed = 42

[separators]
# population = "-->"
# filesystem = "/"

[canvas]
# width = 1024
# height = 768
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
