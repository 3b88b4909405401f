//! Turning output neurons into bounded steps on the grid.

use crate::neuron::{Neuron, NeuronRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Grid extent, positions are valid on `[0, width) x [0, height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }
}

/// The step `neuron` asks for along one axis, or 0 if it would leave `[0, bound)`. A `hold`
/// value above 0 keeps the creature where it is.
pub fn movement<N: Neuron>(
    neuron: &NeuronRef<'_, N>,
    current: i32,
    bound: i32,
    hold: Option<f64>,
) -> i32 {
    if hold.is_some_and(|h| h > 0.) {
        return 0;
    }

    let delta = neuron.direction();
    match current.checked_add(delta) {
        Some(next) if (0..bound).contains(&next) => delta,
        _ => 0,
    }
}
