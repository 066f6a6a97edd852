// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pairwise interval classification and display-color derivation.
//!
//! Every update the classifier looks at the set of sounding pitches,
//! classifies each unordered pair by interval, and derives a display
//! color for every pitch in the range: active pitches blend their base
//! hue with the harmonic colors of the intervals they participate in,
//! everything else falls back to a dim version of its base hue.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::harmony::color::{fifths_palette, Color};
use crate::harmony::pairing::{encode, PairKey};
use crate::music::layout::slot_of_class;
use crate::music::pitch::{Pitch, PITCH_COUNT, TONES};

/// Interval relationship between two pitch-classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalRelation {
    /// Unison or octave
    Octave,
    /// Perfect fourth or fifth
    Fifth,
    /// Major/minor third or their sixth inversions
    Third,
    /// Everything else (seconds, sevenths, tritone)
    Other,
}

impl IntervalRelation {
    /// Classify the relation between two pitches
    pub fn between(a: Pitch, b: Pitch) -> Self {
        Self::between_classes(a.pitch_class(), b.pitch_class())
    }

    /// Classify the relation between two pitch-classes.
    ///
    /// Symmetric: each matched interval set contains its own mod-12
    /// complement.
    pub fn between_classes(a: u8, b: u8) -> Self {
        match (b as i32 - a as i32).rem_euclid(TONES as i32) {
            0 => IntervalRelation::Octave,
            5 | 7 => IntervalRelation::Fifth,
            4 | 8 => IntervalRelation::Third,
            _ => IntervalRelation::Other,
        }
    }

    /// How strongly this relation pulls a neighbor's harmonic color into
    /// a sounding pitch's blend
    pub fn influence_weight(self) -> f32 {
        match self {
            IntervalRelation::Octave => 0.3,
            IntervalRelation::Fifth => 0.4,
            IntervalRelation::Third => 0.3,
            IntervalRelation::Other => 0.1,
        }
    }

    /// Fixed color contributed by this relation to the blend
    pub fn harmonic_color(self) -> Color {
        match self {
            IntervalRelation::Octave => Color::new(1.0, 1.0, 1.0),
            IntervalRelation::Fifth => Color::new(1.0, 0.85, 0.4),
            IntervalRelation::Third => Color::new(0.45, 0.75, 1.0),
            IntervalRelation::Other => Color::new(0.5, 0.5, 0.5),
        }
    }
}

/// Tunable color-derivation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// How far an active pitch's color is pushed toward white per unit
    /// amplitude
    #[serde(default = "default_lighten")]
    pub lighten: f32,
    /// Exponent scale for amplitude-driven intensity
    #[serde(default = "default_gain")]
    pub gain: f32,
    /// Brightness retained by inactive pitches
    #[serde(default = "default_dim")]
    pub dim: f32,
}

fn default_lighten() -> f32 {
    0.3
}
fn default_gain() -> f32 {
    1.0
}
fn default_dim() -> f32 {
    0.1
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            lighten: default_lighten(),
            gain: default_gain(),
            dim: default_dim(),
        }
    }
}

/// Result of classifying one frame's active set
#[derive(Debug, Clone, Default)]
pub struct ClassifiedFrame {
    /// Pair keys of sounding octave/unison relations
    pub octaves: HashSet<PairKey>,
    /// Pair keys of sounding fourth/fifth relations
    pub fifths: HashSet<PairKey>,
    /// Pair keys of sounding third/sixth relations
    pub thirds: HashSet<PairKey>,
    /// Display color for every pitch in the range
    pub colors: Vec<Color>,
    /// Vote-blended colors for sounding fifth and third pairs
    pub chord_colors: HashMap<PairKey, Color>,
}

impl ClassifiedFrame {
    /// All visualized pair keys with their kind-discriminating sets intact
    pub fn pair_count(&self) -> usize {
        self.octaves.len() + self.fifths.len() + self.thirds.len()
    }
}

/// Derives interval sets and display colors from the active pitch set.
#[derive(Debug, Clone)]
pub struct HarmonicClassifier {
    palette: [Color; TONES],
    settings: ClassifierSettings,
}

impl HarmonicClassifier {
    /// Create a classifier with the given color settings
    pub fn new(settings: ClassifierSettings) -> Self {
        Self {
            palette: fifths_palette(),
            settings,
        }
    }

    /// Base color of a pitch-class relative to the current key: the
    /// palette is indexed by position on the circle of fifths, so the key
    /// itself is entry 0 and its dominant/subdominant sit beside it.
    pub fn base_color(&self, pitch_class: u8, current_key: u8) -> Color {
        let chromatic = (pitch_class as i32 - current_key as i32).rem_euclid(TONES as i32);
        self.palette[slot_of_class(chromatic as u8)]
    }

    /// Steps around the circle of fifths from the current key, folded to
    /// the shorter side (0-6)
    pub fn fifths_distance(&self, pitch_class: u8, current_key: u8) -> usize {
        let chromatic = (pitch_class as i32 - current_key as i32).rem_euclid(TONES as i32);
        let slot = slot_of_class(chromatic as u8);
        slot.min(TONES - slot)
    }

    /// Classify one frame of active `(pitch, amplitude)` entries.
    ///
    /// Input contract: no duplicate pitch indices, amplitudes in `(0, 1]`.
    pub fn classify_frame(&self, active: &[(Pitch, f32)], current_key: u8) -> ClassifiedFrame {
        let mut frame = ClassifiedFrame {
            colors: (0..PITCH_COUNT)
                .map(|index| {
                    let pc = (index % TONES) as u8;
                    self.base_color(pc, current_key) * self.settings.dim
                })
                .collect(),
            ..ClassifiedFrame::default()
        };

        // Pitch-class amplitude votes, shared by the chord-color blend
        let mut votes = [0.0f32; TONES];
        for (pitch, amp) in active {
            votes[pitch.pitch_class() as usize] += amp;
        }

        // Pairwise classification
        for i in 0..active.len() {
            for j in (i + 1)..active.len() {
                let (a, _) = active[i];
                let (b, _) = active[j];
                // Canonical low/high order keeps the key stable no matter
                // how the caller ordered its input
                let (lo, hi) = if a.index() <= b.index() { (a, b) } else { (b, a) };
                let key = encode(lo.index() as u64, hi.index() as u64);

                match IntervalRelation::between(lo, hi) {
                    IntervalRelation::Octave => {
                        frame.octaves.insert(key);
                    }
                    IntervalRelation::Fifth => {
                        frame.fifths.insert(key);
                        frame
                            .chord_colors
                            .insert(key, self.chord_color(lo, hi, &votes, current_key));
                    }
                    IntervalRelation::Third => {
                        frame.thirds.insert(key);
                        frame
                            .chord_colors
                            .insert(key, self.chord_color(lo, hi, &votes, current_key));
                    }
                    IntervalRelation::Other => {}
                }
            }
        }

        // Per-pitch display colors for the active set
        for (i, &(pitch, amp)) in active.iter().enumerate() {
            let base = self.base_color(pitch.pitch_class(), current_key);

            let blended = if active.len() >= 2 {
                let mut accum = base * 0.5;
                let mut total_weight = 0.5f32;
                for (j, &(other, other_amp)) in active.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let relation = IntervalRelation::between(pitch, other);
                    let influence = relation.influence_weight() * other_amp;
                    accum = accum + relation.harmonic_color() * influence;
                    total_weight += influence;
                }
                accum * (1.0 / total_weight)
            } else {
                base
            };

            // Lighten toward white and intensify with amplitude
            let lit = blended.lerp(Color::WHITE, self.settings.lighten * amp);
            frame.colors[pitch.index()] = lit * 2.0f32.powf(amp * self.settings.gain);
        }

        frame
    }

    /// Chord color for a sounding fifth or third pair.
    ///
    /// Each note's weight is the summed amplitude of every active pitch
    /// sharing its pitch-class. With no votes at all the pair falls back
    /// to the inner note's base color (the one harmonically closer to the
    /// current key), so the result is always defined.
    fn chord_color(&self, a: Pitch, b: Pitch, votes: &[f32; TONES], current_key: u8) -> Color {
        let color_a = self.base_color(a.pitch_class(), current_key);
        let color_b = self.base_color(b.pitch_class(), current_key);

        let vote_a = votes[a.pitch_class() as usize];
        let vote_b = votes[b.pitch_class() as usize];
        let total = vote_a + vote_b;

        if total <= 0.0 {
            let inner = if self.fifths_distance(b.pitch_class(), current_key)
                < self.fifths_distance(a.pitch_class(), current_key)
            {
                color_b
            } else {
                color_a
            };
            return inner;
        }

        color_a.lerp(color_b, vote_b / total)
    }
}

impl Default for HarmonicClassifier {
    fn default() -> Self {
        Self::new(ClassifierSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(index: usize) -> Pitch {
        Pitch::new(index).unwrap()
    }

    #[test]
    fn test_relation_classification() {
        assert_eq!(IntervalRelation::between_classes(0, 0), IntervalRelation::Octave);
        assert_eq!(IntervalRelation::between_classes(0, 7), IntervalRelation::Fifth);
        assert_eq!(IntervalRelation::between_classes(0, 5), IntervalRelation::Fifth);
        assert_eq!(IntervalRelation::between_classes(0, 4), IntervalRelation::Third);
        assert_eq!(IntervalRelation::between_classes(0, 8), IntervalRelation::Third);
        assert_eq!(IntervalRelation::between_classes(0, 1), IntervalRelation::Other);
        assert_eq!(IntervalRelation::between_classes(0, 6), IntervalRelation::Other);
    }

    #[test]
    fn test_relation_symmetry() {
        for a in 0..TONES as u8 {
            for b in 0..TONES as u8 {
                assert_eq!(
                    IntervalRelation::between_classes(a, b),
                    IntervalRelation::between_classes(b, a),
                    "asymmetric at ({}, {})",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_fifth_pair_lands_in_fifths_set() {
        let classifier = HarmonicClassifier::default();
        let frame = classifier.classify_frame(&[(pitch(0), 0.8), (pitch(7), 0.8)], 0);
        assert_eq!(frame.fifths.len(), 1);
        assert!(frame.octaves.is_empty());
        assert!(frame.thirds.is_empty());

        let key = *frame.fifths.iter().next().unwrap();
        assert_eq!(crate::harmony::pairing::decode(key), (0, 7));
        assert!(frame.chord_colors.contains_key(&key));
    }

    #[test]
    fn test_octave_pair_classified() {
        let classifier = HarmonicClassifier::default();
        let frame = classifier.classify_frame(&[(pitch(0), 0.5), (pitch(12), 0.5)], 0);
        assert_eq!(frame.octaves.len(), 1);
        assert_eq!(frame.pair_count(), 1);
    }

    #[test]
    fn test_input_order_does_not_change_keys() {
        let classifier = HarmonicClassifier::default();
        let forward = classifier.classify_frame(&[(pitch(0), 0.8), (pitch(7), 0.8)], 0);
        let reversed = classifier.classify_frame(&[(pitch(7), 0.8), (pitch(0), 0.8)], 0);
        assert_eq!(forward.fifths, reversed.fifths);
    }

    #[test]
    fn test_empty_frame_is_dim_and_finite() {
        let classifier = HarmonicClassifier::default();
        let frame = classifier.classify_frame(&[], 0);
        assert_eq!(frame.colors.len(), PITCH_COUNT);
        assert_eq!(frame.pair_count(), 0);
        for color in &frame.colors {
            assert!(color.is_finite());
            // Dim, not lit
            assert!(color.r <= 0.11 && color.g <= 0.11 && color.b <= 0.11);
        }
    }

    #[test]
    fn test_active_pitch_brighter_than_inactive() {
        let classifier = HarmonicClassifier::default();
        let frame = classifier.classify_frame(&[(pitch(0), 1.0)], 0);
        let active = frame.colors[0];
        let inactive = frame.colors[1];
        let luma = |c: Color| c.r + c.g + c.b;
        assert!(luma(active) > luma(inactive) * 2.0);
    }

    #[test]
    fn test_blend_is_normalized() {
        let classifier = HarmonicClassifier::default();
        // A dense cluster should still produce finite, bounded colors
        let cluster: Vec<(Pitch, f32)> = (0..12).map(|i| (pitch(i), 1.0)).collect();
        let frame = classifier.classify_frame(&cluster, 0);
        for &(p, _) in &cluster {
            let c = frame.colors[p.index()];
            assert!(c.is_finite());
            // 2^gain is the intensity ceiling at full amplitude
            assert!(c.r <= 2.1 && c.g <= 2.1 && c.b <= 2.1);
        }
    }

    #[test]
    fn test_chord_color_equal_votes_is_midpoint() {
        let classifier = HarmonicClassifier::default();
        let a = pitch(0);
        let b = pitch(7);
        let votes = {
            let mut v = [0.0f32; TONES];
            v[a.pitch_class() as usize] = 0.5;
            v[b.pitch_class() as usize] = 0.5;
            v
        };
        let color = classifier.chord_color(a, b, &votes, 0);
        let expected = classifier
            .base_color(a.pitch_class(), 0)
            .lerp(classifier.base_color(b.pitch_class(), 0), 0.5);
        assert_eq!(color, expected);
    }

    #[test]
    fn test_chord_color_zero_votes_defaults_to_inner() {
        let classifier = HarmonicClassifier::default();
        let a = pitch(7); // E: one fifth step from A
        let b = pitch(2); // B: two steps
        let votes = [0.0f32; TONES];
        let color = classifier.chord_color(a, b, &votes, 0);
        assert_eq!(color, classifier.base_color(a.pitch_class(), 0));
        assert!(color.is_finite());
    }

    #[test]
    fn test_base_color_rotates_with_key() {
        let classifier = HarmonicClassifier::default();
        // The tonic always gets palette entry 0
        assert_eq!(classifier.base_color(0, 0), classifier.base_color(7, 7));
        // Different distances get different entries
        assert_ne!(classifier.base_color(0, 0), classifier.base_color(7, 0));
    }

    #[test]
    fn test_fifths_distance_folds() {
        let classifier = HarmonicClassifier::default();
        assert_eq!(classifier.fifths_distance(0, 0), 0);
        // A fifth away in either direction is one step
        assert_eq!(classifier.fifths_distance(7, 0), 1);
        assert_eq!(classifier.fifths_distance(5, 0), 1);
        // Tritone is maximally far
        assert_eq!(classifier.fifths_distance(6, 0), 6);
    }
}
