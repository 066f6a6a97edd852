// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tick-stamped events to fixed-width time slices.
//!
//! MIDI events are sparse and tempo-relative; playback wants a uniform
//! timeline it can index by elapsed seconds. The slicer walks the event
//! stream once, converting ticks to seconds under the running tempo,
//! then snapshots the set of sounding notes at the end of every
//! slice-sized window.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::music::pitch::Pitch;

/// Default MIDI tempo: 500,000 microseconds per quarter note (120 BPM)
pub const DEFAULT_TEMPO_MICROS: f64 = 500_000.0;

/// One event on the input timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimelineEvent {
    /// Tempo change, in microseconds per quarter note
    Tempo { micros_per_quarter: f64 },
    /// Note on/off; `pitch` indexes the visualized range (A0 = 0) and
    /// may be out of range, in which case the event is dropped
    Note { pitch: i32, velocity: f32, on: bool },
}

/// A fixed-width window of the timeline with its sounding-note snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlice {
    /// Position in the slice sequence
    pub index: usize,
    /// Notes sounding at the end of this slice's window, sorted by pitch
    pub notes: Vec<(Pitch, f32)>,
}

/// Quantize an event stream into fixed-width slices.
///
/// Events out of tick order are tolerated (sorted first). The slice grid
/// starts at the first note event's timestamp and spans
/// `ceil((last - first) / slice_duration)` slices, at least one. Each
/// slice snapshots the sounding-note map after applying every event with
/// `time < slice_start + slice_duration`. An empty or note-free stream
/// produces no slices.
///
/// Deterministic: identical input yields identical output.
pub fn slice_timeline(
    events: &[(u64, TimelineEvent)],
    ticks_per_quarter: u32,
    slice_duration: f64,
) -> Vec<TimeSlice> {
    assert!(ticks_per_quarter > 0, "ticks_per_quarter must be positive");
    assert!(slice_duration > 0.0, "slice_duration must be positive");

    let mut ordered: Vec<(u64, TimelineEvent)> = events.to_vec();
    ordered.sort_by_key(|(tick, _)| *tick);

    // Flatten the tempo map into wall-clock note events
    let mut note_events: Vec<(f64, Pitch, f32)> = Vec::new();
    let mut tempo = DEFAULT_TEMPO_MICROS;
    let mut time = 0.0f64;
    let mut last_tick = 0u64;

    for (tick, event) in ordered {
        let delta_ticks = tick - last_tick;
        time += delta_ticks as f64 * tempo / (ticks_per_quarter as f64 * 1_000_000.0);
        last_tick = tick;

        match event {
            TimelineEvent::Tempo { micros_per_quarter } => {
                tempo = micros_per_quarter;
            }
            TimelineEvent::Note { pitch, velocity, on } => {
                let Some(pitch) = usize::try_from(pitch).ok().and_then(Pitch::new) else {
                    debug!(pitch, "dropping out-of-range pitch");
                    continue;
                };
                let velocity = if on { velocity.clamp(0.0, 1.0) } else { 0.0 };
                note_events.push((time, pitch, velocity));
            }
        }
    }

    if note_events.is_empty() {
        return Vec::new();
    }

    let start_time = note_events[0].0;
    let end_time = note_events[note_events.len() - 1].0;
    let total_slices = (((end_time - start_time) / slice_duration).ceil() as usize).max(1);

    // BTreeMap keeps snapshot order deterministic
    let mut sounding: BTreeMap<Pitch, f32> = BTreeMap::new();
    let mut slices = Vec::with_capacity(total_slices);
    let mut event_idx = 0;

    for index in 0..total_slices {
        let window_end = start_time + (index + 1) as f64 * slice_duration;
        while event_idx < note_events.len() && note_events[event_idx].0 < window_end {
            let (_, pitch, velocity) = note_events[event_idx];
            event_idx += 1;
            if velocity > 0.0 {
                sounding.insert(pitch, velocity);
            } else {
                sounding.remove(&pitch);
            }
        }
        slices.push(TimeSlice {
            index,
            notes: sounding.iter().map(|(&p, &v)| (p, v)).collect(),
        });
    }

    slices
}
