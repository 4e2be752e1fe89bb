//! Marker layout generation
//!
//! Markers are scattered uniformly over the normalized field. Overlaps are
//! allowed; there is no collision avoidance.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_POSITION;

/// A numbered target the player must click in order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// 1-based click order
    pub id: u32,
    /// Normalized top-left corner, each axis in [0, MAX_POSITION)
    pub position: Vec2,
}

impl Marker {
    pub fn new(id: u32, position: Vec2) -> Self {
        Self { id, position }
    }

    /// Scale the normalized position into a play field of the given size
    #[inline]
    pub fn to_field(&self, size: Vec2) -> Vec2 {
        self.position * size
    }
}

/// Generate `count` markers with ids `1..=count`.
///
/// Markers come back in descending id order so the lowest numbers are drawn
/// last (on top). Callers should only rely on the id set, not the order.
pub fn generate<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Vec<Marker> {
    (1..=count)
        .rev()
        .map(|id| {
            let x = sample_axis(rng);
            let y = sample_axis(rng);
            Marker::new(id, Vec2::new(x, y))
        })
        .collect()
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let v = rng.random_range(0.0..MAX_POSITION);
    // f32 rounding can land exactly on the bound
    if v < MAX_POSITION { v } else { 0.0 }
}
