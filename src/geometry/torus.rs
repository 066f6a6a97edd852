// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Umbilic torus curve generation.
//!
//! An umbilic torus is the closed space curve traced by the vertices of a
//! regular polygon as it sweeps around a circular axis while rolling, so
//! that every vertex lies on one continuous helical strand. The curve is
//! the backbone the pitch layout hangs notes on.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Returns a point along the umbilical path of a torus.
///
/// For a triangle (`sides = 3`), the polygon sweeps 3 times around the Y
/// axis while its vertex offset completes one roll per unit `t`, so the
/// three strands join into a single closed curve.
///
/// # Arguments
/// * `sides` - Number of sides in the polygon cross-section (>= 3, caller's contract)
/// * `edge_length` - Length of each polygon edge
/// * `radius` - Major radius (distance from the center to the polygon centers)
/// * `t` - Parameter along the path, periodic with period 1
/// * `offset_alpha` - Starting roll offset selecting which strand passes t = 0
/// * `roll_multiplier` - Extra roll turns per unit `t` (1 for the natural roll)
pub fn point_along_umbilic(
    sides: u32,
    edge_length: f32,
    radius: f32,
    t: f32,
    offset_alpha: f32,
    roll_multiplier: i32,
) -> Vec3 {
    // Circumscribed-circle radius of the polygon cross-section
    let poly_rad = edge_length / (2.0 * (PI / sides as f32).sin());
    let r = radius + poly_rad;

    // Sweep angle: `sides` full clockwise turns per unit t
    let theta = -TAU * sides as f32 * t;

    // Vertex roll: one rotation per unit t, scaled by the multiplier
    let phi = (TAU * t + offset_alpha) * roll_multiplier as f32;

    // The vertex offset is rotated to track the sweep, which keeps its
    // local x axis radial; the roll then only moves the point radially
    // and vertically.
    let radial = r + poly_rad * phi.cos();
    Vec3::new(radial * theta.cos(), poly_rad * phi.sin(), radial * theta.sin())
}

/// Sample the full closed curve at a fixed parameter step.
///
/// Walks `t` over `[phase, phase + 1)`; the caller joins the last point back
/// to the first when drawing a loop.
pub fn sample_closed(
    sides: u32,
    edge_length: f32,
    radius: f32,
    offset_alpha: f32,
    roll_multiplier: i32,
    step: f32,
    phase: f32,
) -> Vec<Vec3> {
    let count = (1.0 / step).round() as usize;
    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let t = phase + i as f32 * step;
        points.push(point_along_umbilic(
            sides,
            edge_length,
            radius,
            t,
            offset_alpha,
            roll_multiplier,
        ));
    }
    points
}
