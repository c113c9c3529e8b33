//! Sampling a function into line-strip vertices.

use crate::types::{Domain, Vertex};

/// Sample `f` at `resolution` evenly spaced points across `domain`.
///
/// The first sample is at `domain.min` and the last at `domain.max`. A
/// resolution of `0` yields no vertices; a resolution of `1` yields a single
/// vertex at `domain.min`.
pub fn generate_vertices<F>(f: F, resolution: usize, domain: Domain) -> Vec<Vertex>
where
    F: Fn(f32) -> f32,
{
    if resolution == 0 {
        return Vec::new();
    }

    // Precision loss only matters past 2^24 samples, far beyond any sensible
    // line strip.
    #[expect(clippy::cast_precision_loss)]
    let steps = (resolution - 1).max(1) as f32;

    (0..resolution)
        .map(|i| {
            let x = if i == 0 {
                domain.min
            } else if i + 1 == resolution {
                domain.max
            } else {
                // Finite even when `max - min` overflows f32.
                #[expect(clippy::cast_precision_loss)]
                let t = i as f32 / steps;
                domain.min * (1.0 - t) + domain.max * t
            };
            Vertex {
                position: [x, f(x), 0.0],
            }
        })
        .collect()
}

/// View vertices as the flat `x, y, z` sequence handed to the GPU.
#[must_use]
pub fn as_floats(vertices: &[Vertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}
