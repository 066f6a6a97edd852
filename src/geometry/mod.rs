// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Geometric primitives for the torus visualization.

pub mod torus;
pub mod wave;

pub use torus::{point_along_umbilic, sample_closed};
pub use wave::{endpoint_widths, wave_path, WaveSettings};
