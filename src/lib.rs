// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! FIFTHS-TORUS - circle-of-fifths visualization on an umbilic torus.
//!
//! Ninety-six pitches are laid out on an umbilic torus so that walking
//! the curve steps through the circle of fifths, after the tonality
//! construction described at <https://jimishol.github.io/post/tonality/>.
//! The engine consumes note amplitudes each tick and produces colors,
//! chord link geometry, and key-rotation state for a host renderer.
//! No rendering, audio, or MIDI I/O lives here; hosts bring their own.

pub mod config;
pub mod engine;
pub mod geometry;
pub mod harmony;
pub mod midi;
pub mod music;

pub use config::EngineConfig;
pub use engine::{Engine, FrameUpdate};
pub use harmony::tracker::{ChordKind, ChordUpdate};
pub use midi::{slice_timeline, TimelineEvent, TimelinePlayer};
pub use music::pitch::{Pitch, OCTAVES, PITCH_COUNT, TONES};
