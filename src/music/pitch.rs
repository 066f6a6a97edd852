// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The fixed pitch range of the visualization.
//!
//! Ninety-six pitches cover eight octaves of twelve pitch-classes,
//! starting at A0 (27.5 Hz, MIDI note 21). A pitch is just an index into
//! that range; its amplitude lives with whoever is driving playback.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pitch-classes per octave
pub const TONES: usize = 12;

/// Octaves in the visualized range
pub const OCTAVES: usize = 8;

/// Total number of pitches
pub const PITCH_COUNT: usize = TONES * OCTAVES;

/// Frequency of the lowest pitch (A0) in Hz
pub const BASE_FREQUENCY_HZ: f32 = 27.5;

/// MIDI note number of the lowest pitch (A0)
pub const MIDI_BASE_NOTE: u8 = 21;

/// Pitch-class names, chromatic from A
pub const NOTE_LABELS: [&str; TONES] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// A pitch in the visualized range, identified by its index `0..96`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Pitch(u8);

impl Pitch {
    /// Create a pitch from a range index, if it is in `0..PITCH_COUNT`
    pub fn new(index: usize) -> Option<Self> {
        if index < PITCH_COUNT {
            Some(Pitch(index as u8))
        } else {
            None
        }
    }

    /// Create a pitch from a MIDI note number (A0 = 21)
    pub fn from_midi(note: u8) -> Option<Self> {
        let index = note.checked_sub(MIDI_BASE_NOTE)?;
        Self::new(index as usize)
    }

    /// Create a pitch from pitch-class and octave
    pub fn from_parts(pitch_class: u8, octave: u8) -> Option<Self> {
        if (pitch_class as usize) < TONES && (octave as usize) < OCTAVES {
            Self::new(octave as usize * TONES + pitch_class as usize)
        } else {
            None
        }
    }

    /// Index into the full pitch range
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Pitch-class (0 = A, 1 = A#, ...)
    pub fn pitch_class(self) -> u8 {
        self.0 % TONES as u8
    }

    /// Octave within the range (0-7)
    pub fn octave(self) -> u8 {
        self.0 / TONES as u8
    }

    /// Equal-tempered frequency in Hz
    pub fn frequency(self) -> f32 {
        BASE_FREQUENCY_HZ * 2.0_f32.powf(self.0 as f32 / TONES as f32)
    }

    /// Pitch-class name
    pub fn label(self) -> &'static str {
        NOTE_LABELS[self.pitch_class() as usize]
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.octave())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_range() {
        assert!(Pitch::new(0).is_some());
        assert!(Pitch::new(PITCH_COUNT - 1).is_some());
        assert!(Pitch::new(PITCH_COUNT).is_none());
    }

    #[test]
    fn test_pitch_parts() {
        let p = Pitch::new(13).unwrap();
        assert_eq!(p.pitch_class(), 1);
        assert_eq!(p.octave(), 1);
        assert_eq!(p.label(), "A#");

        let q = Pitch::from_parts(1, 1).unwrap();
        assert_eq!(p, q);
        assert!(Pitch::from_parts(12, 0).is_none());
        assert!(Pitch::from_parts(0, 8).is_none());
    }

    #[test]
    fn test_pitch_from_midi() {
        // A0 is MIDI 21
        assert_eq!(Pitch::from_midi(21), Pitch::new(0));
        // A4 (concert A) is MIDI 69
        let a4 = Pitch::from_midi(69).unwrap();
        assert_eq!(a4.pitch_class(), 0);
        assert_eq!(a4.octave(), 4);
        // Below and above the range
        assert!(Pitch::from_midi(20).is_none());
        assert!(Pitch::from_midi(117).is_none());
        assert!(Pitch::from_midi(116).is_some());
    }

    #[test]
    fn test_pitch_frequency() {
        let a0 = Pitch::new(0).unwrap();
        assert!((a0.frequency() - 27.5).abs() < 1e-4);

        // One octave up doubles the frequency
        let a1 = Pitch::new(12).unwrap();
        assert!((a1.frequency() - 55.0).abs() < 1e-3);

        // Concert A
        let a4 = Pitch::from_midi(69).unwrap();
        assert!((a4.frequency() - 440.0).abs() < 0.01);
    }

    #[test]
    fn test_pitch_display() {
        assert_eq!(Pitch::new(0).unwrap().to_string(), "A 0");
        assert_eq!(Pitch::new(15).unwrap().to_string(), "C 1");
    }
}
