// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The per-tick engine tying layout, classification and diffing together.
//!
//! The engine owns every piece of mutable per-frame state (active
//! amplitudes, the tracker's previous-frame set, the modulation state)
//! and is driven by single-threaded host calls: `play_keys` with the
//! sounding set each tick, `step` with delta time, `request_key` on key
//! changes. Everything it returns is plain data for the host to render.

use anyhow::Result;
use glam::Vec3;
use tracing::debug;

use crate::config::EngineConfig;
use crate::geometry::wave::wave_path;
use crate::harmony::classify::HarmonicClassifier;
use crate::harmony::color::Color;
use crate::harmony::tracker::{ChordKind, ChordStateTracker, ChordUpdate};
use crate::music::layout::{class_at_slot, PitchLayout};
use crate::music::modulation::{KeyModulationController, ModulationState};
use crate::music::pitch::{Pitch, NOTE_LABELS, PITCH_COUNT, TONES};

/// Everything that changed in one engine tick
#[derive(Debug, Clone)]
pub struct FrameUpdate {
    /// Display color for every pitch in the range
    pub colors: Vec<Color>,
    /// Amplitude of every pitch after clamping, zero when silent
    pub amplitudes: Vec<f32>,
    /// Chord visual instructions, removals first
    pub chords: Vec<ChordUpdate>,
}

/// The visualization engine core.
pub struct Engine {
    layout: PitchLayout,
    classifier: HarmonicClassifier,
    tracker: ChordStateTracker,
    modulation: KeyModulationController,
    /// Current amplitude per pitch, rewritten every update
    amplitudes: Vec<f32>,
    /// Last sanitized active set, replayed during modulation steps
    last_active: Vec<(Pitch, f32)>,
    config: EngineConfig,
}

impl Engine {
    /// Build an engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Build an engine with default parameters
    pub fn with_defaults() -> Self {
        Self::build(EngineConfig::default())
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            layout: PitchLayout::new(config.layout_params()),
            classifier: HarmonicClassifier::new(config.classifier),
            tracker: ChordStateTracker::new(config.fifth_path_samples),
            modulation: KeyModulationController::new(config.modulation_duration),
            amplitudes: vec![0.0; PITCH_COUNT],
            last_active: Vec::new(),
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Feed the sounding set for this tick: `(pitch index, amplitude)`
    /// pairs, duplicates disallowed by contract. Out-of-range indices are
    /// dropped silently so a stray input degrades the picture instead of
    /// failing the tick.
    pub fn play_keys(&mut self, keys: &[(usize, f32)]) -> FrameUpdate {
        let mut active: Vec<(Pitch, f32)> = Vec::with_capacity(keys.len());
        for &(index, amplitude) in keys {
            match Pitch::new(index) {
                Some(pitch) => active.push((pitch, amplitude.clamp(0.0, 1.0))),
                None => debug!(index, "dropping out-of-range pitch index"),
            }
        }
        self.last_active = active;
        self.rebuild_frame()
    }

    /// Advance time by `dt` seconds. Returns a fresh frame when the key
    /// modulation moved the layout, so mid-transition visuals track the
    /// rotation.
    pub fn step(&mut self, dt: f32) -> Option<FrameUpdate> {
        if self.modulation.step(dt) {
            Some(self.rebuild_frame())
        } else {
            None
        }
    }

    /// Request a key modulation; returns whether a transition started
    pub fn request_key(&mut self, key: u8) -> bool {
        self.modulation.request(key)
    }

    /// The committed key
    pub fn current_key(&self) -> u8 {
        self.modulation.current_key()
    }

    /// Current layout rotation phase, in turns
    pub fn rotation_phase(&self) -> f32 {
        self.modulation.rotation_phase()
    }

    /// Modulation state, for hosts that gate input during transitions
    pub fn modulation_state(&self) -> ModulationState {
        self.modulation.state()
    }

    /// Current amplitude of a pitch
    pub fn amplitude(&self, pitch: Pitch) -> f32 {
        self.amplitudes[pitch.index()]
    }

    /// Number of chord visuals currently alive
    pub fn active_chord_count(&self) -> usize {
        self.tracker.active_count()
    }

    /// Node position of a pitch under the current rotation
    pub fn node_position(&self, pitch: Pitch) -> Vec3 {
        self.layout.node_position(pitch, self.rotation_phase())
    }

    /// Sphere scale of a pitch node
    pub fn node_scale(&self, pitch: Pitch) -> f32 {
        self.layout.node_scale(pitch)
    }

    /// Slot labels with their anchor positions under the current rotation
    pub fn slot_labels(&self) -> Vec<(&'static str, Vec3)> {
        let phase = self.rotation_phase();
        (0..TONES)
            .map(|slot| {
                let label = NOTE_LABELS[class_at_slot(slot) as usize];
                (label, self.layout.label_anchor(slot, phase))
            })
            .collect()
    }

    /// Fifths backbone polyline under the current rotation
    pub fn fifths_backbone(&self) -> Vec<Vec3> {
        self.layout.fifths_backbone(self.rotation_phase())
    }

    /// Chromatic backbone polyline under the current rotation
    pub fn chromatic_backbone(&self) -> Vec<Vec3> {
        self.layout.chromatic_backbone(self.rotation_phase())
    }

    /// The twelve per-semitone curve segments under the current rotation
    pub fn semitone_segments(&self) -> Vec<Vec<Vec3>> {
        let phase = self.rotation_phase();
        (0..TONES)
            .map(|slot| self.layout.semitone_segment(slot, phase))
            .collect()
    }

    /// Direct access to the layout, for hosts that sample geometry
    pub fn layout(&self) -> &PitchLayout {
        &self.layout
    }

    /// Animate a chord path at the given time using the configured wave
    /// parameters. `kind` decides the curved-path treatment.
    pub fn animate_chord_path(
        &self,
        base: &[Vec3],
        time: f32,
        amp_a: f32,
        amp_b: f32,
        kind: ChordKind,
    ) -> Vec<Vec3> {
        let curved = kind == ChordKind::Fifth;
        wave_path(base, time, amp_a, amp_b, curved, &self.config.wave)
    }

    fn rebuild_frame(&mut self) -> FrameUpdate {
        self.amplitudes.fill(0.0);
        for &(pitch, amplitude) in &self.last_active {
            self.amplitudes[pitch.index()] = amplitude;
        }

        let frame = self
            .classifier
            .classify_frame(&self.last_active, self.modulation.current_key());

        let amplitudes = &self.amplitudes;
        let chords = self.tracker.update(
            &frame,
            &self.layout,
            self.modulation.rotation_phase(),
            |pitch| amplitudes[pitch.index()],
        );

        FrameUpdate {
            colors: frame.colors,
            amplitudes: self.amplitudes.clone(),
            chords,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_keys_produces_colors_for_all_pitches() {
        let mut engine = Engine::with_defaults();
        let update = engine.play_keys(&[(0, 0.8), (7, 0.8)]);
        assert_eq!(update.colors.len(), PITCH_COUNT);
        for color in &update.colors {
            assert!(color.is_finite());
        }
        assert_eq!(update.amplitudes.len(), PITCH_COUNT);
        assert_eq!(update.amplitudes[0], 0.8);
        assert_eq!(update.amplitudes[1], 0.0);
    }

    #[test]
    fn test_fifth_creates_chord_visual() {
        let mut engine = Engine::with_defaults();
        let update = engine.play_keys(&[(0, 0.8), (7, 0.8)]);
        assert_eq!(update.chords.len(), 1);
        assert!(matches!(
            update.chords[0],
            ChordUpdate::Create { kind: ChordKind::Fifth, .. }
        ));
        assert_eq!(engine.active_chord_count(), 1);
    }

    #[test]
    fn test_silence_removes_chord_visuals() {
        let mut engine = Engine::with_defaults();
        engine.play_keys(&[(0, 0.8), (7, 0.8)]);
        let update = engine.play_keys(&[]);
        assert_eq!(update.chords.len(), 1);
        assert!(matches!(update.chords[0], ChordUpdate::Remove { .. }));
        assert_eq!(engine.active_chord_count(), 0);
    }

    #[test]
    fn test_out_of_range_indices_dropped() {
        let mut engine = Engine::with_defaults();
        let update = engine.play_keys(&[(500, 0.8), (0, 0.8)]);
        // Only the valid pitch sounds; no pairs exist
        assert!(update.chords.is_empty());
        assert_eq!(engine.amplitude(Pitch::new(0).unwrap()), 0.8);
    }

    #[test]
    fn test_step_during_modulation_refreshes_frame() {
        let mut engine = Engine::with_defaults();
        engine.play_keys(&[(0, 0.8), (7, 0.8)]);
        assert!(engine.request_key(7));

        let update = engine.step(0.1).expect("transition should move the phase");
        // The sounding fifth survives as an update, not a re-create
        assert_eq!(update.chords.len(), 1);
        assert!(matches!(update.chords[0], ChordUpdate::Update { .. }));

        // Idle steps produce nothing
        while engine.modulation_state() == ModulationState::Transitioning {
            engine.step(0.1);
        }
        assert!(engine.step(0.1).is_none());
        assert_eq!(engine.current_key(), 7);
    }

    #[test]
    fn test_node_positions_follow_rotation() {
        let mut engine = Engine::with_defaults();
        let pitch = Pitch::new(0).unwrap();
        let before = engine.node_position(pitch);

        engine.request_key(7);
        engine.step(0.5);
        let during = engine.node_position(pitch);
        assert!(before.distance(during) > 1e-4);
    }

    #[test]
    fn test_amplitudes_reset_each_frame() {
        let mut engine = Engine::with_defaults();
        engine.play_keys(&[(3, 0.9)]);
        assert!(engine.amplitude(Pitch::new(3).unwrap()) > 0.0);
        engine.play_keys(&[]);
        assert_eq!(engine.amplitude(Pitch::new(3).unwrap()), 0.0);
    }

    #[test]
    fn test_animate_chord_path_pins_endpoints() {
        let mut engine = Engine::with_defaults();
        let update = engine.play_keys(&[(0, 1.0), (7, 1.0)]);
        let ChordUpdate::Create { path, kind, .. } = &update.chords[0] else {
            panic!("expected create");
        };

        let waved = engine.animate_chord_path(path, 0.01, 1.0, 1.0, *kind);
        assert_eq!(waved.len(), path.len());
        assert_eq!(waved[0], path[0]);
        assert_eq!(waved[path.len() - 1], path[path.len() - 1]);
    }

    #[test]
    fn test_slot_labels_cover_all_classes() {
        let engine = Engine::with_defaults();
        let labels = engine.slot_labels();
        assert_eq!(labels.len(), TONES);
        let mut names: Vec<&str> = labels.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TONES);
    }
}
