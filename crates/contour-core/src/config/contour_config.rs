//! Top-level Contour configuration with layered resolution.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ExtractionConfig, LayoutConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`CONTOUR_*`)
/// 3. Project config (`contour.toml` in the repository root)
/// 4. User config (`~/.contour/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ContourConfig {
    pub layout: LayoutConfig,
    pub extraction: ExtractionConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub wiring_file: Option<String>,
    pub routes_dir: Option<String>,
    pub services_dir: Option<String>,
    pub schema_dir: Option<String>,
    pub client_file: Option<String>,
    pub client_objects: Vec<String>,
}

impl ContourConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Only parse failures are fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                if let Err(e) = Self::merge_toml_file(&mut config, &user_config_path) {
                    if e.is_parse_error() {
                        return Err(e);
                    }
                    tracing::warn!(error = %e, "ignoring unreadable user config");
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &ContourConfig) -> Result<(), ConfigError> {
        for (field, path) in config.layout.named_paths() {
            validate_relative_path(field, path)?;
        }

        let extraction = &config.extraction;
        validate_identifier("extraction.app_object", extraction.effective_app_object())?;
        validate_identifier("extraction.router_object", extraction.effective_router_object())?;
        for name in extraction.effective_client_objects() {
            validate_identifier("extraction.client_objects", &name)?;
        }
        for name in extraction.effective_auth_middleware() {
            validate_identifier("extraction.auth_middleware", &name)?;
        }
        for ext in extraction.effective_source_extensions() {
            if ext.is_empty() || ext.starts_with('.') || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::InvalidValue {
                    field: "extraction.source_extensions".to_string(),
                    message: format!("'{ext}' must be a bare alphanumeric extension"),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.contour/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".contour").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut ContourConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ContourConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it sets a value.
    fn merge(base: &mut ContourConfig, other: &ContourConfig) {
        // Layout
        if other.layout.wiring_file.is_some() {
            base.layout.wiring_file = other.layout.wiring_file.clone();
        }
        if other.layout.routes_dir.is_some() {
            base.layout.routes_dir = other.layout.routes_dir.clone();
        }
        if other.layout.services_dir.is_some() {
            base.layout.services_dir = other.layout.services_dir.clone();
        }
        if other.layout.schema_dir.is_some() {
            base.layout.schema_dir = other.layout.schema_dir.clone();
        }
        if other.layout.client_file.is_some() {
            base.layout.client_file = other.layout.client_file.clone();
        }

        // Extraction
        if other.extraction.app_object.is_some() {
            base.extraction.app_object = other.extraction.app_object.clone();
        }
        if other.extraction.router_object.is_some() {
            base.extraction.router_object = other.extraction.router_object.clone();
        }
        if !other.extraction.client_objects.is_empty() {
            base.extraction.client_objects = other.extraction.client_objects.clone();
        }
        if !other.extraction.auth_middleware.is_empty() {
            base.extraction.auth_middleware = other.extraction.auth_middleware.clone();
        }
        if !other.extraction.source_extensions.is_empty() {
            base.extraction.source_extensions = other.extraction.source_extensions.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `CONTOUR_WIRING_FILE`, `CONTOUR_CLIENT_OBJECTS=api,http`, etc.
    fn apply_env_overrides(config: &mut ContourConfig) {
        if let Ok(val) = std::env::var("CONTOUR_WIRING_FILE") {
            config.layout.wiring_file = Some(val);
        }
        if let Ok(val) = std::env::var("CONTOUR_ROUTES_DIR") {
            config.layout.routes_dir = Some(val);
        }
        if let Ok(val) = std::env::var("CONTOUR_SERVICES_DIR") {
            config.layout.services_dir = Some(val);
        }
        if let Ok(val) = std::env::var("CONTOUR_SCHEMA_DIR") {
            config.layout.schema_dir = Some(val);
        }
        if let Ok(val) = std::env::var("CONTOUR_CLIENT_FILE") {
            config.layout.client_file = Some(val);
        }
        if let Ok(val) = std::env::var("CONTOUR_CLIENT_OBJECTS") {
            let objects: Vec<String> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if !objects.is_empty() {
                config.extraction.client_objects = objects;
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut ContourConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.wiring_file {
            config.layout.wiring_file = Some(v.clone());
        }
        if let Some(ref v) = cli.routes_dir {
            config.layout.routes_dir = Some(v.clone());
        }
        if let Some(ref v) = cli.services_dir {
            config.layout.services_dir = Some(v.clone());
        }
        if let Some(ref v) = cli.schema_dir {
            config.layout.schema_dir = Some(v.clone());
        }
        if let Some(ref v) = cli.client_file {
            config.layout.client_file = Some(v.clone());
        }
        if !cli.client_objects.is_empty() {
            config.extraction.client_objects = cli.client_objects.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn validate_relative_path(field: &str, path: &str) -> Result<(), ConfigError> {
    let p = Path::new(path);
    if path.is_empty() || p.is_absolute() {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("'{path}' must be a non-empty path relative to the repository root"),
        });
    }
    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("'{path}' must not contain '..'"),
        });
    }
    Ok(())
}

fn validate_identifier(field: &str, name: &str) -> Result<(), ConfigError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("'{name}' is not a JavaScript identifier"),
        });
    }
    Ok(())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
