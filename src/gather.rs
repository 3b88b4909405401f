use crate::{
    agent::Agent,
    movement::Bounds,
    neuron::Neuron,
    scenario::Environment,
};

/// Creatures on a grid, rewarded for ending a generation in the right half and in the upper
/// half (`y` at most `height / 2`).
///
/// Senses, in order: x and y as fractions of the grid, then whether any other creature shares
/// the column, and the row, as -1 or 1. Only other creatures count: a creature is never aligned
/// with itself, so a lone creature senses -1 on both flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerGather {
    bounds: Bounds,
}

impl CornerGather {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.
    } else {
        -1.
    }
}

impl Environment for CornerGather {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn sensory(&self) -> usize {
        4
    }

    fn sense<N: Neuron>(&self, agent: usize, agents: &[Agent<N>], input: &mut [f64]) {
        let here = agents[agent].position;
        let others = agents
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != agent)
            .map(|(_, a)| a.position);
        let (mut column, mut row) = (false, false);
        for pos in others {
            column |= pos.x == here.x;
            row |= pos.y == here.y;
        }

        input[0] = here.x as f64 / self.bounds.width as f64;
        input[1] = here.y as f64 / self.bounds.height as f64;
        input[2] = flag(column);
        input[3] = flag(row);
    }

    fn score<N: Neuron>(&self, agent: &Agent<N>) -> i32 {
        (agent.position.x >= self.bounds.width / 2) as i32
            + (agent.position.y <= self.bounds.height / 2) as i32
    }
}
