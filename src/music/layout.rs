// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Circle-of-fifths layout on the umbilic torus.
//!
//! Pitches are placed along the torus curve in fifths order rather than
//! chromatic order: slot `i` around the curve carries pitch-class
//! `(5 * i) % 12`, so walking the curve steps through the circle of
//! fifths. Octaves of the same pitch-class stack radially between the
//! sector centroid and the outer curve.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::geometry::torus;
use crate::music::pitch::{Pitch, OCTAVES, TONES};

/// Pitch-class held by a circle-of-fifths slot.
///
/// Stepping five semitones per slot walks every pitch-class exactly once
/// before returning to the start, which makes this a bijection.
pub fn class_at_slot(slot: usize) -> u8 {
    ((slot * 5) % TONES) as u8
}

/// Slot holding a pitch-class; inverse of [`class_at_slot`].
///
/// Five is its own inverse modulo twelve, so the inverse map is the same
/// multiplication.
pub fn slot_of_class(pitch_class: u8) -> usize {
    (pitch_class as usize * 5) % TONES
}

/// Geometry parameters for the layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Polygon sides of the torus cross-section
    pub sides: u32,
    /// Polygon edge length
    pub edge_length: f32,
    /// Major radius of the torus
    pub radius: f32,
    /// Parameter step for sampled backbone polylines
    pub curve_step: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            sides: 3,
            edge_length: 0.67,
            radius: 1.0,
            curve_step: 0.001,
        }
    }
}

/// Roll offset selecting the strand that passes through t = 0
const STRAND_OFFSET: f32 = PI;

/// Built-once mapping from pitches to positions on the torus.
#[derive(Debug, Clone)]
pub struct PitchLayout {
    params: LayoutParams,
}

impl PitchLayout {
    /// Create a layout from geometry parameters
    pub fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    /// Geometry parameters in use
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Number of centroid sectors around the torus
    pub fn sections(&self) -> usize {
        TONES / self.params.sides as usize
    }

    /// Curve parameter of a slot at the given rotation phase, wrapped to [0, 1)
    pub fn slot_t(&self, slot: usize, phase: f32) -> f32 {
        (slot as f32 / TONES as f32 + phase).rem_euclid(1.0)
    }

    /// Point on the fifths curve at parameter `t`
    pub fn curve_point(&self, t: f32) -> Vec3 {
        torus::point_along_umbilic(
            self.params.sides,
            self.params.edge_length,
            self.params.radius,
            t,
            STRAND_OFFSET,
            1,
        )
    }

    /// Centroid of the torus sector containing parameter `t`.
    ///
    /// A continuous function of `t` so centroids rotate together with the
    /// layout during key modulation.
    pub fn sector_centroid(&self, t: f32) -> Vec3 {
        let sections = self.sections() as f32;
        let alpha = TAU * (TONES as f32 * t + 1.0) / sections;
        let rad = self.params.radius + self.params.edge_length * 0.5;
        Vec3::new(rad * alpha.sin(), 0.0, rad * alpha.cos())
    }

    /// Radial interpolation factor for an octave.
    ///
    /// Increases with octave; the top octave sits exactly on the outer
    /// curve and octave 0 sits one step off the centroid so that the three
    /// slots sharing a sector never collapse onto one point.
    pub fn octave_factor(&self, octave: u8) -> f32 {
        (octave as f32 + 1.0) / OCTAVES as f32
    }

    /// Position between centroid and curve at parameter `t` with radial factor `f`
    pub fn position_at(&self, t: f32, factor: f32) -> Vec3 {
        self.sector_centroid(t).lerp(self.curve_point(t), factor)
    }

    /// Node position of a pitch at the given rotation phase
    pub fn node_position(&self, pitch: Pitch, phase: f32) -> Vec3 {
        let slot = slot_of_class(pitch.pitch_class());
        let t = self.slot_t(slot, phase);
        self.position_at(t, self.octave_factor(pitch.octave()))
    }

    /// Sphere scale of a pitch node, shrinking with the range index
    pub fn node_scale(&self, pitch: Pitch) -> f32 {
        let frac = pitch.index() as f32 / crate::music::pitch::PITCH_COUNT as f32;
        0.03 + (0.005 - 0.03) * frac
    }

    /// Anchor point for a slot's text label, pushed outward past the curve
    pub fn label_anchor(&self, slot: usize, phase: f32) -> Vec3 {
        let t = self.slot_t(slot, phase);
        let curve = self.curve_point(t);
        let centroid = self.sector_centroid(t);
        // Unclamped lerp: a negative factor lands outside the curve
        curve + (centroid - curve) * -0.2
    }

    /// Full fifths backbone polyline at the given rotation phase
    pub fn fifths_backbone(&self, phase: f32) -> Vec<Vec3> {
        torus::sample_closed(
            self.params.sides,
            self.params.edge_length,
            self.params.radius,
            STRAND_OFFSET,
            1,
            self.params.curve_step,
            phase,
        )
    }

    /// Chromatic backbone polyline: the same sweep with extra roll turns
    /// threads the curve through the pitch-classes in chromatic order.
    pub fn chromatic_backbone(&self, phase: f32) -> Vec<Vec3> {
        let roll = (self.params.sides * 2 - 1) as i32;
        torus::sample_closed(
            self.params.sides,
            self.params.edge_length,
            self.params.radius,
            STRAND_OFFSET,
            roll,
            self.params.curve_step,
            phase,
        )
    }

    /// The sub-segment of the fifths curve between a slot and its successor
    pub fn semitone_segment(&self, slot: usize, phase: f32) -> Vec<Vec3> {
        let t0 = slot as f32 / TONES as f32 + phase;
        let t1 = (slot as f32 + 1.0) / TONES as f32 + phase;
        let step = self.params.curve_step;
        let count = ((t1 - t0) / step).round() as usize;
        (0..=count)
            .map(|i| self.curve_point(t0 + i as f32 * step))
            .collect()
    }
}

impl Default for PitchLayout {
    fn default() -> Self {
        Self::new(LayoutParams::default())
    }
}
