//! Editor settings: gesture thresholds and per-tool creation parameters.

use crate::input::DEFAULT_DRAG_THRESHOLD;
use crate::shapes::{BackgroundType, DEFAULT_WEB_CONTAINER_URL};
use crate::tools::{DynamicBackgroundFactory, FactoryConfig, WebContainerFactory};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Web container tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebContainerSettings {
    pub factory: FactoryConfig,
    pub url: String,
}

impl Default for WebContainerSettings {
    fn default() -> Self {
        Self {
            factory: FactoryConfig::new(Size::new(400.0, 300.0), Size::new(100.0, 80.0), 0.3),
            url: DEFAULT_WEB_CONTAINER_URL.to_string(),
        }
    }
}

/// Dynamic background tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicBackgroundSettings {
    pub factory: FactoryConfig,
    /// Variant selected when the session starts.
    pub initial_type: BackgroundType,
}

impl Default for DynamicBackgroundSettings {
    fn default() -> Self {
        Self {
            factory: FactoryConfig::new(Size::new(600.0, 400.0), Size::new(50.0, 50.0), 0.3),
            initial_type: BackgroundType::default(),
        }
    }
}

/// All tunables of an editing session. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Device pixels a press must travel before it counts as a drag.
    pub drag_threshold: f64,
    pub web_container: WebContainerSettings,
    pub dynamic_background: DynamicBackgroundSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            web_container: WebContainerSettings::default(),
            dynamic_background: DynamicBackgroundSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(SettingsError::Invalid {
                field: "drag_threshold",
                reason: format!("{} is not a non-negative number", self.drag_threshold),
            });
        }
        let factories = [
            ("web_container", &self.web_container.factory),
            ("dynamic_background", &self.dynamic_background.factory),
        ];
        for (field, config) in factories {
            if !config.is_valid() {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "sizes must be finite and non-negative, preview opacity below 0.8"
                        .to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn web_container_factory(&self) -> WebContainerFactory {
        WebContainerFactory::new(self.web_container.factory, self.web_container.url.clone())
    }

    pub fn dynamic_background_factory(&self) -> DynamicBackgroundFactory {
        DynamicBackgroundFactory::new(
            self.dynamic_background.factory,
            self.dynamic_background.initial_type,
        )
    }
}
