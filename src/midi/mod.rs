// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MIDI timeline slicing and playback.
//!
//! Decoding a MIDI file is someone else's job; this module takes an
//! already-decoded, tick-stamped event stream, flattens the tempo map
//! into wall-clock time, and quantizes it into fixed-width slices that a
//! playback driver can index in O(1) every tick.

pub mod player;
pub mod slicer;

pub use player::TimelinePlayer;
pub use slicer::{slice_timeline, TimeSlice, TimelineEvent, DEFAULT_TEMPO_MICROS};
