// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key modulation as an animated layout rotation.
//!
//! Changing key rotates the whole pitch layout so the new key's slot
//! arrives at the reference position. The rotation is animated by a small
//! state machine advanced with an externally supplied delta-time; there is
//! no timer or suspension anywhere in here.

use tracing::info;

use crate::music::layout::slot_of_class;
use crate::music::pitch::TONES;

/// Signed shortest number of circle-of-fifths steps from one key to
/// another, wrapped to `[-6, 6]`.
pub fn fifth_steps_between(from_key: u8, to_key: u8) -> i32 {
    let delta = (slot_of_class(to_key % TONES as u8) as i32
        - slot_of_class(from_key % TONES as u8) as i32)
        .rem_euclid(TONES as i32);
    if delta > TONES as i32 / 2 {
        delta - TONES as i32
    } else {
        delta
    }
}

/// Observable state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModulationState {
    Idle,
    Transitioning,
}

/// An in-flight rotation toward a new key
#[derive(Debug, Clone, Copy)]
struct Transition {
    target_key: u8,
    start_phase: f32,
    target_phase: f32,
    elapsed: f32,
}

/// Animates the layout rotation phase between keys.
///
/// The resting phase for key `k` is `-slot(k) / 12` (mod 1), which puts
/// that key's slot at curve parameter 0. A transition interpolates
/// linearly from the current phase to the nearest whole-turn
/// representative of the new key's resting phase, which is the shorter
/// angular direction around the circle of fifths.
#[derive(Debug, Clone)]
pub struct KeyModulationController {
    current_key: u8,
    phase: f32,
    duration: f32,
    transition: Option<Transition>,
}

impl KeyModulationController {
    /// Create a controller at key 0 (A) with the given transition duration
    /// in seconds
    pub fn new(duration: f32) -> Self {
        Self {
            current_key: 0,
            phase: 0.0,
            duration: duration.max(f32::EPSILON),
            transition: None,
        }
    }

    /// The committed key (the in-flight target does not commit until the
    /// transition completes)
    pub fn current_key(&self) -> u8 {
        self.current_key
    }

    /// Current rotation phase, in turns
    pub fn rotation_phase(&self) -> f32 {
        self.phase
    }

    /// Observable state
    pub fn state(&self) -> ModulationState {
        if self.transition.is_some() {
            ModulationState::Transitioning
        } else {
            ModulationState::Idle
        }
    }

    /// Request a modulation to a new key.
    ///
    /// Requesting the current key while idle is a no-op. A request during
    /// a transition cancels the in-flight one and starts fresh from the
    /// current interpolated phase. Returns whether a transition started.
    pub fn request(&mut self, new_key: u8) -> bool {
        let new_key = new_key % TONES as u8;

        // Nearest whole-turn representative of the new key's resting phase
        let base = -(slot_of_class(new_key) as f32) / TONES as f32;
        let turns = (self.phase - base).round();
        let target = base + turns;

        if (target - self.phase).abs() < 1e-6 {
            // Already at the resting phase for this key; commit and settle
            self.current_key = new_key;
            self.transition = None;
            return false;
        }

        info!(
            from = self.current_key,
            to = new_key,
            steps = fifth_steps_between(self.current_key, new_key),
            "key modulation started"
        );

        self.transition = Some(Transition {
            target_key: new_key,
            start_phase: self.phase,
            target_phase: target,
            elapsed: 0.0,
        });
        true
    }

    /// Advance the transition by `dt` seconds.
    ///
    /// Returns `true` when the phase moved, which signals the caller to
    /// recompute layout positions and re-classify the active set.
    pub fn step(&mut self, dt: f32) -> bool {
        let Some(mut tr) = self.transition else {
            return false;
        };

        tr.elapsed += dt;
        let progress = (tr.elapsed / self.duration).min(1.0);
        self.phase = tr.start_phase + (tr.target_phase - tr.start_phase) * progress;

        if progress >= 1.0 {
            self.current_key = tr.target_key;
            self.transition = None;
            info!(key = self.current_key, "key modulation committed");
        } else {
            self.transition = Some(tr);
        }
        true
    }
}

impl Default for KeyModulationController {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifth_steps() {
        // A up a fifth to E is one step back around the fifths slots
        assert_eq!(fifth_steps_between(0, 7), -1);
        assert_eq!(fifth_steps_between(7, 0), 1);
        // A to D (a fourth up) is the opposite direction
        assert_eq!(fifth_steps_between(0, 5), 1);
        // Tritone is the far side of the circle
        assert_eq!(fifth_steps_between(0, 6), 6);
        assert_eq!(fifth_steps_between(0, 0), 0);
    }

    #[test]
    fn test_request_current_key_is_noop() {
        let mut controller = KeyModulationController::new(1.0);
        assert!(!controller.request(0));
        assert_eq!(controller.state(), ModulationState::Idle);
        assert_eq!(controller.rotation_phase(), 0.0);
    }

    #[test]
    fn test_transition_reaches_target() {
        let mut controller = KeyModulationController::new(1.0);
        assert!(controller.request(7));
        assert_eq!(controller.state(), ModulationState::Transitioning);

        // Ten steps of 0.1s complete the 1s transition
        for _ in 0..10 {
            assert!(controller.step(0.1));
        }
        assert_eq!(controller.state(), ModulationState::Idle);
        assert_eq!(controller.current_key(), 7);
        // Key 7 sits at slot 11; one step the short way is +1/12
        assert!((controller.rotation_phase() - 1.0 / 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_phase_interpolates_linearly() {
        let mut controller = KeyModulationController::new(1.0);
        controller.request(7);
        controller.step(0.5);
        assert!((controller.rotation_phase() - 0.5 / 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_immediate_reversal_restores_phase() {
        let mut controller = KeyModulationController::new(1.0);
        controller.request(7);
        // Reverse before any time passes: already at key 0's resting
        // phase, so nothing remains to animate
        controller.request(0);
        assert_eq!(controller.state(), ModulationState::Idle);
        assert_eq!(controller.current_key(), 0);
        assert!(controller.rotation_phase().abs() < 1e-6);
    }

    #[test]
    fn test_mid_flight_reversal_returns_home() {
        let mut controller = KeyModulationController::new(1.0);
        controller.request(7);
        controller.step(0.4);
        let mid_phase = controller.rotation_phase();
        assert!(mid_phase > 0.0);

        // Cancel and head back; no state corruption, one consistent target
        assert!(controller.request(0));
        for _ in 0..20 {
            controller.step(0.1);
        }
        assert_eq!(controller.state(), ModulationState::Idle);
        assert_eq!(controller.current_key(), 0);
        assert!(controller.rotation_phase().abs() < 1e-5);
    }

    #[test]
    fn test_step_while_idle_reports_no_motion() {
        let mut controller = KeyModulationController::new(1.0);
        assert!(!controller.step(0.1));
    }

    #[test]
    fn test_chained_modulations_accumulate_shortest_paths() {
        let mut controller = KeyModulationController::new(0.1);
        // Walk up by fifths: A -> E -> B; each is one slot the short way
        controller.request(7);
        while controller.state() == ModulationState::Transitioning {
            controller.step(0.05);
        }
        controller.request(2);
        while controller.state() == ModulationState::Transitioning {
            controller.step(0.05);
        }
        assert_eq!(controller.current_key(), 2);
        assert!((controller.rotation_phase() - 2.0 / 12.0).abs() < 1e-5);
    }
}
