// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music model for the torus.
//!
//! This module provides the fixed pitch range, the circle-of-fifths
//! spatial layout, and the key modulation state machine.

pub mod layout;
pub mod modulation;
pub mod pitch;

pub use layout::{class_at_slot, slot_of_class, LayoutParams, PitchLayout};
pub use modulation::{fifth_steps_between, KeyModulationController, ModulationState};
pub use pitch::{Pitch, NOTE_LABELS, OCTAVES, PITCH_COUNT, TONES};
