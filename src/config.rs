//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rstree/rstree.toml`
//! 3. Local config: an explicit TOML file passed by the caller
//! 4. Environment variables: `RSTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::domain::NodeKey;
use crate::render::Renderer;

/// Outline rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Indentation unit, repeated once per level below the top
    pub indent: String,
    /// Prefix written before every node label
    pub marker: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let renderer = Renderer::default();
        Self {
            indent: renderer.indent,
            marker: renderer.marker,
        }
    }
}

impl RenderConfig {
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.indent.clone(), self.marker.clone())
    }
}

/// Raw render config for intermediate parsing (None = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub indent: Option<String>,
    pub marker: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub root_id: Option<NodeKey>,
    pub render: RawRenderConfig,
}

/// Unified configuration for rstree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Identifier of the synthetic root (default: 0)
    pub root_id: NodeKey,
    pub render: RenderConfig,
}

/// Get the XDG config directory for rstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rstree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins for every value it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            root_id: overlay
                .root_id
                .clone()
                .unwrap_or_else(|| self.root_id.clone()),
            render: RenderConfig {
                indent: overlay
                    .render
                    .indent
                    .clone()
                    .unwrap_or_else(|| self.render.indent.clone()),
                marker: overlay
                    .render
                    .marker
                    .clone()
                    .unwrap_or_else(|| self.render.marker.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional TOML file applied on top of the global config.
    ///   It must exist when given.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/rstree/rstree.toml`
    /// 3. Local config file
    /// 4. Environment variables: `RSTREE_ROOT_ID`, `RSTREE_RENDER__INDENT`,
    ///    `RSTREE_RENDER__MARKER`
    #[instrument(level = "debug")]
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("applying global config {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(local_path) = local {
            let raw = load_raw_settings(local_path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current)
    }

    /// Parse settings from TOML text on top of the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ApplicationError> {
        let raw: RawSettings = toml::from_str(content).map_err(|e| ApplicationError::Config {
            message: format!("parse settings: {}", e),
        })?;
        Ok(Self::default().merge_with(&raw))
    }

    /// Apply RSTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("RSTREE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;

        // Only plain integers become Int keys; "true" or "1.5" stay strings.
        if let Ok(val) = config.get_string("root_id") {
            settings.root_id = match val.parse::<i64>() {
                Ok(id) => NodeKey::Int(id),
                Err(_) => NodeKey::Str(val),
            };
        }
        if let Ok(val) = config.get_string("render.indent") {
            settings.render.indent = val;
        }
        if let Ok(val) = config.get_string("render.marker") {
            settings.render.marker = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# rstree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rstree/rstree.toml
#   Local:  file passed explicitly by the caller
#   Env:    RSTREE_* environment variables (RSTREE_RENDER__INDENT, ...)

# Identifier of the synthetic root; records without a parent attach here
# root_id = 0

[render]
# Indentation unit per level
# indent = "  "

# Marker written before each node label
# marker = "- "
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
