// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Frame-over-frame diffing of sounding interval pairs.
//!
//! The tracker remembers which pair keys were alive last frame and turns
//! the classifier's fresh sets into create/update/remove instructions, so
//! the rendering host can keep a visual per pair instead of rebuilding
//! the scene every tick. At most one visual exists per pair key at any
//! time.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::harmony::classify::ClassifiedFrame;
use crate::harmony::color::Color;
use crate::harmony::pairing::{decode, PairKey};
use crate::music::layout::{slot_of_class, PitchLayout};
use crate::music::pitch::{Pitch, TONES};

/// Which interval family a chord visual belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordKind {
    Octave,
    Fifth,
    Third,
}

/// One instruction for the rendering host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChordUpdate {
    /// A pair started sounding: build its visual
    Create {
        key: PairKey,
        kind: ChordKind,
        path: Vec<Vec3>,
        color: Color,
        widths: (f32, f32),
    },
    /// A pair kept sounding: refresh geometry and color in place
    Update {
        key: PairKey,
        kind: ChordKind,
        path: Vec<Vec3>,
        color: Color,
        widths: (f32, f32),
    },
    /// A pair stopped sounding: discard its visual
    Remove { key: PairKey },
}

/// Diffs classified frames and emits chord instructions.
#[derive(Debug, Default)]
pub struct ChordStateTracker {
    active: HashMap<PairKey, ChordKind>,
    fifth_path_samples: usize,
}

impl ChordStateTracker {
    /// Create a tracker; `fifth_path_samples` is the number of segments
    /// used for curved fifth paths
    pub fn new(fifth_path_samples: usize) -> Self {
        Self {
            active: HashMap::new(),
            fifth_path_samples: fifth_path_samples.max(2),
        }
    }

    /// Number of currently tracked pairs
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Diff a new classified frame against the previous one.
    ///
    /// Removals come first so a host processing instructions in order
    /// never holds two visuals for one key.
    pub fn update(
        &mut self,
        frame: &ClassifiedFrame,
        layout: &PitchLayout,
        phase: f32,
        amplitude_of: impl Fn(Pitch) -> f32,
    ) -> Vec<ChordUpdate> {
        let mut updates = Vec::new();

        let mut fresh: HashMap<PairKey, ChordKind> = HashMap::new();
        for &key in &frame.octaves {
            fresh.insert(key, ChordKind::Octave);
        }
        for &key in &frame.fifths {
            fresh.insert(key, ChordKind::Fifth);
        }
        for &key in &frame.thirds {
            fresh.insert(key, ChordKind::Third);
        }

        // Pairs gone since last frame
        self.active.retain(|key, _| {
            if fresh.contains_key(key) {
                true
            } else {
                trace!(key, "chord removed");
                updates.push(ChordUpdate::Remove { key: *key });
                false
            }
        });

        // Surviving and new pairs
        for (&key, &kind) in &fresh {
            let (a, b) = decode_pitches(key);
            let path = match kind {
                ChordKind::Fifth => self.fifth_path(a, b, layout, phase),
                _ => vec![
                    layout.node_position(a, phase),
                    layout.node_position(b, phase),
                ],
            };
            let color = match kind {
                ChordKind::Octave => {
                    // Both notes share a pitch-class; average their lit colors
                    frame.colors[a.index()].lerp(frame.colors[b.index()], 0.5)
                }
                _ => frame
                    .chord_colors
                    .get(&key)
                    .copied()
                    .unwrap_or(frame.colors[a.index()]),
            };
            let widths = crate::geometry::wave::endpoint_widths(amplitude_of(a), amplitude_of(b));

            if self.active.contains_key(&key) {
                updates.push(ChordUpdate::Update { key, kind, path, color, widths });
            } else {
                trace!(key, ?kind, "chord created");
                self.active.insert(key, kind);
                updates.push(ChordUpdate::Create { key, kind, path, color, widths });
            }
        }

        updates
    }

    /// Forget all tracked pairs, emitting a removal for each
    pub fn clear(&mut self) -> Vec<ChordUpdate> {
        let updates = self
            .active
            .keys()
            .map(|&key| ChordUpdate::Remove { key })
            .collect();
        self.active.clear();
        updates
    }

    /// Curved path for a fifth: walk the curve between the two slots the
    /// shorter angular way, blending the radial factor from one octave's
    /// to the other's.
    fn fifth_path(&self, a: Pitch, b: Pitch, layout: &PitchLayout, phase: f32) -> Vec<Vec3> {
        let t_a = slot_of_class(a.pitch_class()) as f32 / TONES as f32 + phase;
        let mut t_b = slot_of_class(b.pitch_class()) as f32 / TONES as f32 + phase;

        // Wrap-around fix: shift one endpoint by a whole turn if that
        // shortens the sweep
        if t_b - t_a > 0.5 {
            t_b -= 1.0;
        } else if t_a - t_b > 0.5 {
            t_b += 1.0;
        }

        let f_a = layout.octave_factor(a.octave());
        let f_b = layout.octave_factor(b.octave());

        let samples = self.fifth_path_samples;
        (0..=samples)
            .map(|i| {
                let u = i as f32 / samples as f32;
                let t = t_a + (t_b - t_a) * u;
                let f = f_a + (f_b - f_a) * u;
                layout.position_at(t, f)
            })
            .collect()
    }
}

fn decode_pitches(key: PairKey) -> (Pitch, Pitch) {
    let (a, b) = decode(key);
    // Keys only ever come from the classifier, which encodes valid
    // pitch indices
    (
        Pitch::new(a as usize).expect("pair key holds invalid pitch"),
        Pitch::new(b as usize).expect("pair key holds invalid pitch"),
    )
}
