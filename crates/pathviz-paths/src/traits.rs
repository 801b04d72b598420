use pathviz_core::{NodeId, Space};

/// One outgoing move: the neighbour reached and the cost of entering it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub to: NodeId,
    /// Non-negative traversal cost.
    pub cost: f64,
}

/// Weighted neighbour enumeration over a [`Space`].
pub trait Pather: Space {
    /// Append the passable neighbours of `n` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, n: NodeId, buf: &mut Vec<Step>);
}

/// Pather with a distance estimate for A*.
pub trait AstarPather: Pather {
    /// Heuristic estimate of the cost from `from` to `to`. Optimality of A*
    /// requires that this never overestimates.
    fn estimate(&self, from: NodeId, to: NodeId) -> f64;
}
