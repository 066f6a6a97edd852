// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback driver over a sliced timeline.
//!
//! Owns the slice array and a playback position; each tick the host
//! advances it by wall-clock delta time and feeds whatever notes come
//! back into the engine. No clocks of its own, so it is fully
//! deterministic under test.

use crate::midi::slicer::TimeSlice;
use crate::music::pitch::Pitch;

const NO_NOTES: &[(Pitch, f32)] = &[];

/// Steps through time slices at a configurable speed.
#[derive(Debug, Clone)]
pub struct TimelinePlayer {
    slices: Vec<TimeSlice>,
    slice_duration: f64,
    speed: f64,
    elapsed: f64,
    playing: bool,
}

impl TimelinePlayer {
    /// Create a player over a sliced timeline
    pub fn new(slices: Vec<TimeSlice>, slice_duration: f64) -> Self {
        Self {
            slices,
            slice_duration: slice_duration.max(f64::EPSILON),
            speed: 1.0,
            elapsed: 0.0,
            playing: false,
        }
    }

    /// Start playback from the beginning. An empty timeline is a no-op.
    pub fn play(&mut self) {
        self.elapsed = 0.0;
        self.playing = !self.slices.is_empty();
    }

    /// Stop playback and rewind
    pub fn stop(&mut self) {
        self.playing = false;
        self.elapsed = 0.0;
    }

    /// Playback speed multiplier (1.0 = real time)
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.max(0.0);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Slice index the playhead is currently in
    pub fn current_slice(&self) -> usize {
        (self.elapsed / self.slice_duration) as usize
    }

    /// Total number of slices
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Advance by `dt` seconds of wall-clock time and return the notes
    /// sounding at the new position. Returns the empty set once the
    /// timeline is exhausted, flipping to stopped.
    pub fn step(&mut self, dt: f64) -> &[(Pitch, f32)] {
        if !self.playing {
            return NO_NOTES;
        }

        self.elapsed += dt * self.speed;
        let slice = self.current_slice();
        if slice >= self.slices.len() {
            self.playing = false;
            return NO_NOTES;
        }
        &self.slices[slice].notes
    }
}
