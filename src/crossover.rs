//! Single point crossover of connectivity genomes, with a Hebbian-flavoured weight update on
//! every synapse the child inherits as active.

use crate::{network::Network, neuron::Neuron};

/// `weights_a[index] += weights_a[index] * weights_b[index] / slots`
///
/// There is no clamping, repeated application may grow a weight without bound.
#[inline]
pub fn adjust_synapses(weights_a: &mut [f64], weights_b: &[f64], slots: usize, index: usize) {
    weights_a[index] += weights_a[index] * weights_b[index] / slots as f64;
}

/// Overwrite `child`'s genome with `a`'s bits before `breaking_point` and `b`'s bits from it
/// on. Each inherited active bit scales the child's own weight at that neuron and slot by the
/// weight of the parent it came from, see [adjust_synapses].
///
/// A breaking point past the end of the genome is clamped to its length, so the whole genome
/// comes from `a`.
///
/// # Panics
/// If the three networks differ in width
pub fn merge_genomes<N: Neuron>(
    child: &mut Network<N>,
    a: &Network<N>,
    b: &Network<N>,
    breaking_point: usize,
) {
    let width = child.width();
    assert!(
        a.width() == width && b.width() == width,
        "crossover across networks of width {width}, {} and {}",
        a.width(),
        b.width()
    );

    let len = child.genome().len();
    let split = breaking_point.min(len);
    for idx in 0..len {
        let parent = if idx < split { a } else { b };
        let bit = parent.genome().get(idx);
        child.genome_mut().set(idx, bit);
        if bit {
            let (neuron, slot) = (idx / width, idx % width);
            adjust_synapses(child.weights_mut(neuron), parent.weights(neuron), width, slot);
        }
    }
}
