// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Standing-wave animation along a chord path.
//!
//! Displaces the interior points of a chord's polyline with a sine wave
//! whose envelope is zero at both endpoints, so the line vibrates like a
//! plucked string between the two notes.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Parameters for the wave animation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WaveSettings {
    /// Oscillation frequency in radians per second
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    /// Overall amplitude scale
    #[serde(default = "default_amplitude_scale")]
    pub amplitude_scale: f32,
}

fn default_frequency() -> f32 {
    60.0
}
fn default_amplitude_scale() -> f32 {
    0.02
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            amplitude_scale: default_amplitude_scale(),
        }
    }
}

/// Endpoint line widths for a chord, driven by the two notes' amplitudes.
pub fn endpoint_widths(amp_a: f32, amp_b: f32) -> (f32, f32) {
    (amp_a * 0.01, amp_b * 0.01)
}

/// Apply the standing-wave displacement to a base path at the given time.
///
/// `curved` marks multi-point fifth paths: their tangent varies along the
/// path (estimated from neighboring samples) and their wave amplitude is
/// tripled relative to straight chords. The first and last points are
/// standing nodes and stay fixed.
pub fn wave_path(
    base: &[Vec3],
    time: f32,
    amp_a: f32,
    amp_b: f32,
    curved: bool,
    settings: &WaveSettings,
) -> Vec<Vec3> {
    if base.len() < 2 {
        return base.to_vec();
    }

    let combined_amp = (amp_a + amp_b) * 0.5;
    let max_amplitude = combined_amp * settings.amplitude_scale * if curved { 3.0 } else { 1.0 };

    let last = base.len() - 1;
    let mut out = base.to_vec();

    for i in 1..last {
        let t = i as f32 / last as f32;

        let forward = if curved {
            (base[i + 1] - base[i - 1]).normalize_or_zero()
        } else {
            (base[last] - base[0]).normalize_or_zero()
        };

        // Perpendicular to the local tangent; fall back to another axis
        // when the tangent is near vertical
        let mut perpendicular = forward.cross(Vec3::Y);
        if perpendicular.length_squared() < 1e-4 {
            perpendicular = forward.cross(Vec3::X);
        }
        perpendicular = perpendicular.normalize_or_zero();

        // sin(pi * t) is zero at both ends and peaks mid-path
        let envelope = (PI * t).sin();
        let oscillation = (time * settings.frequency + i as f32 * 0.5).sin();

        out[i] = base[i] + perpendicular * (max_amplitude * envelope * oscillation);
    }

    out
}
