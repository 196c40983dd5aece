// filepath: src/config.rs
//! Configuration handling for initials-badge
//!
//! This file defines the configuration structure and provides
//! functionality to load and save configuration from/to files.

use crate::color::Color;
use crate::font::{Font, DEFAULT_FONT_SIZE};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

pub const DEFAULT_DIAMETER: u32 = 44;
/// Largest diameter the host will allocate a buffer for
pub const MAX_DIAMETER: u32 = 4096;
pub const DEFAULT_MARGIN: i32 = 8;

/// Configuration for the badge appearance and placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BadgeConfig {
    pub diameter: Option<u32>,
    pub initials: Option<String>,
    pub circle_color: Option<Color>,
    pub text_color: Option<Color>,
    pub font_path: Option<PathBuf>,
    pub margin: Option<i32>,
}

/// Resolved configuration with no Option fields
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBadgeConfig {
    pub diameter: u32,
    pub initials: String,
    pub circle_color: Color,
    pub text_color: Color,
    pub font_path: Option<PathBuf>,
    pub margin: i32,
}

impl BadgeConfig {
    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("initials-badge")
        } else {
            PathBuf::from(".config/initials-badge")
        };

        config_dir.join("config.toml")
    }

    /// Load configuration from file, creating a default one if not found
    pub fn load_from_file() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from_path(&Self::get_config_path())
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        match fs::read_to_string(config_path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let default_config = Self::starter();
                default_config.save_to_path(config_path)?;
                Ok(default_config)
            }
            Err(e) => Err(Box::new(e)),
        }
    }

    /// Save configuration to `config_path`
    pub fn save_to_path(&self, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        // Create the directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;

        Ok(())
    }

    /// Config written on first run, with the defaults spelled out
    pub fn starter() -> Self {
        Self {
            diameter: Some(DEFAULT_DIAMETER),
            initials: Some(String::new()),
            circle_color: Some(Color::LIGHT_GRAY),
            text_color: Some(Color::WHITE),
            font_path: None,
            margin: Some(DEFAULT_MARGIN),
        }
    }

    pub fn resolved(&self) -> ResolvedBadgeConfig {
        ResolvedBadgeConfig {
            diameter: self
                .diameter
                .unwrap_or(DEFAULT_DIAMETER)
                .min(MAX_DIAMETER),
            initials: self.initials.clone().unwrap_or_default(),
            circle_color: self.circle_color.unwrap_or(Color::LIGHT_GRAY),
            text_color: self.text_color.unwrap_or(Color::WHITE),
            font_path: self.font_path.clone(),
            margin: self.margin.unwrap_or(DEFAULT_MARGIN),
        }
    }
}

impl ResolvedBadgeConfig {
    /// Load the configured font file, if any.
    ///
    /// Returns `None` when no font is configured or it fails to load, so
    /// callers keep whatever font they already have.
    pub fn load_font(&self) -> Option<Font> {
        let path = self.font_path.as_ref()?;
        match Font::from_file(path, DEFAULT_FONT_SIZE) {
            Ok(font) => Some(font),
            Err(e) => {
                warn!("Failed to load font {}: {}", path.display(), e);
                None
            }
        }
    }
}
