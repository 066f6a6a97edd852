// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Engine configuration.
//!
//! All tunable parameters live in one YAML-backed structure so a host
//! can ship a config file next to the binary and tweak the picture
//! without recompiling. Every field has a default matching the stock
//! visualization.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::wave::WaveSettings;
use crate::harmony::classify::ClassifierSettings;
use crate::music::layout::LayoutParams;
use crate::music::pitch::TONES;

/// Validation failure for an [`EngineConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sides must be at least 3, got {0}")]
    TooFewSides(u32),
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("curve_step must divide the curve into at least {TONES} segments, got {0}")]
    CurveStepTooCoarse(f32),
    #[error("fifth_path_samples must be at least 2, got {0}")]
    TooFewPathSamples(usize),
}

/// Root configuration for the engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Polygon sides of the torus cross-section
    #[serde(default = "default_sides")]
    pub sides: u32,
    /// Polygon edge length
    #[serde(default = "default_edge_length")]
    pub edge_length: f32,
    /// Major radius of the torus
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Parameter step for sampled backbone polylines
    #[serde(default = "default_curve_step")]
    pub curve_step: f32,
    /// Width of one playback slice in seconds
    #[serde(default = "default_slice_duration")]
    pub slice_duration: f64,
    /// Tick resolution assumed for incoming timelines
    #[serde(default = "default_ticks_per_quarter")]
    pub ticks_per_quarter: u32,
    /// Key modulation transition length in seconds
    #[serde(default = "default_modulation_duration")]
    pub modulation_duration: f32,
    /// Sample count along a curved fifth path
    #[serde(default = "default_fifth_path_samples")]
    pub fifth_path_samples: usize,
    /// Color response tuning
    #[serde(default)]
    pub classifier: ClassifierSettings,
    /// Chord wave animation tuning
    #[serde(default)]
    pub wave: WaveSettings,
}

fn default_sides() -> u32 {
    3
}
fn default_edge_length() -> f32 {
    0.67
}
fn default_radius() -> f32 {
    1.0
}
fn default_curve_step() -> f32 {
    0.001
}
fn default_slice_duration() -> f64 {
    0.01
}
fn default_ticks_per_quarter() -> u32 {
    480
}
fn default_modulation_duration() -> f32 {
    1.0
}
fn default_fifth_path_samples() -> usize {
    64
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sides: default_sides(),
            edge_length: default_edge_length(),
            radius: default_radius(),
            curve_step: default_curve_step(),
            slice_duration: default_slice_duration(),
            ticks_per_quarter: default_ticks_per_quarter(),
            modulation_duration: default_modulation_duration(),
            fifth_path_samples: default_fifth_path_samples(),
            classifier: ClassifierSettings::default(),
            wave: WaveSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Check that the configuration describes a usable engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sides < 3 {
            return Err(ConfigError::TooFewSides(self.sides));
        }
        if self.edge_length <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "edge_length",
                value: self.edge_length as f64,
            });
        }
        if self.radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "radius",
                value: self.radius as f64,
            });
        }
        if self.curve_step <= 0.0 || self.curve_step > 1.0 / TONES as f32 {
            return Err(ConfigError::CurveStepTooCoarse(self.curve_step));
        }
        if self.slice_duration <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "slice_duration",
                value: self.slice_duration,
            });
        }
        if self.ticks_per_quarter == 0 {
            return Err(ConfigError::NonPositive {
                name: "ticks_per_quarter",
                value: 0.0,
            });
        }
        if self.modulation_duration <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "modulation_duration",
                value: self.modulation_duration as f64,
            });
        }
        if self.fifth_path_samples < 2 {
            return Err(ConfigError::TooFewPathSamples(self.fifth_path_samples));
        }
        Ok(())
    }

    /// Geometry parameters derived from this configuration
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            sides: self.sides,
            edge_length: self.edge_length,
            radius: self.radius,
            curve_step: self.curve_step,
        }
    }
}
