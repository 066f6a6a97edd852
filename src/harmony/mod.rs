// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Harmonic analysis of the active pitch set.
//!
//! This module classifies simultaneously sounding pitch pairs, derives
//! display colors from circle-of-fifths distance, and diffs the classified
//! set frame over frame so the rendering host only hears about changes.

pub mod classify;
pub mod color;
pub mod pairing;
pub mod tracker;

pub use classify::{ClassifiedFrame, ClassifierSettings, HarmonicClassifier, IntervalRelation};
pub use color::Color;
pub use pairing::{decode, encode, PairKey};
pub use tracker::{ChordKind, ChordStateTracker, ChordUpdate};
