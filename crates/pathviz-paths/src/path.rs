//! Path reconstruction from a predecessor map.

use pathviz_core::NodeId;

use crate::traits::{Pather, Step};

/// A start-to-target node sequence and its total entering cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

impl Path {
    /// Number of edges.
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

/// Walk `predecessor` back from `target` and return the nodes in
/// start-to-target order.
///
/// Returns `None` when `target` was never visited, or when the map loops
/// back on itself.
pub fn reconstruct(
    predecessor: &[Option<NodeId>],
    visited: &[bool],
    target: NodeId,
) -> Option<Vec<NodeId>> {
    if !visited.get(target.index()).copied().unwrap_or(false) {
        return None;
    }
    let mut nodes = vec![target];
    let mut cur = target;
    while let Some(prev) = predecessor.get(cur.index()).copied().flatten() {
        if nodes.len() > predecessor.len() {
            return None;
        }
        nodes.push(prev);
        cur = prev;
    }
    nodes.reverse();
    Some(nodes)
}

/// Sum of entering costs along `nodes`, or `None` if two consecutive nodes
/// are not adjacent in `space`.
pub fn path_cost<P: Pather>(space: &P, nodes: &[NodeId]) -> Option<f64> {
    let mut buf: Vec<Step> = Vec::new();
    let mut total = 0.0;
    for pair in nodes.windows(2) {
        buf.clear();
        space.neighbors(pair[0], &mut buf);
        let step = buf.iter().find(|s| s.to == pair[1])?;
        total += step.cost;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::{Point, parse_grid};

    fn ids(v: &[usize]) -> Vec<NodeId> {
        v.iter().copied().map(NodeId).collect()
    }

    #[test]
    fn walks_back_to_the_root() {
        let pred = vec![None, Some(NodeId(0)), Some(NodeId(1)), Some(NodeId(1))];
        let visited = vec![true, true, false, true];
        assert_eq!(reconstruct(&pred, &visited, NodeId(3)), Some(ids(&[0, 1, 3])));
    }

    #[test]
    fn unvisited_target_has_no_path() {
        let pred = vec![None, Some(NodeId(0))];
        assert_eq!(reconstruct(&pred, &[true, false], NodeId(1)), None);
        assert_eq!(reconstruct(&pred, &[true, false], NodeId(9)), None);
    }

    #[test]
    fn looping_map_is_rejected() {
        let pred = vec![Some(NodeId(1)), Some(NodeId(0))];
        assert_eq!(reconstruct(&pred, &[true, true], NodeId(0)), None);
    }

    #[test]
    fn cost_sums_entered_cells() {
        let g = parse_grid("S#T").unwrap();
        let nodes: Vec<NodeId> = (0..3).filter_map(|x| g.id(Point::new(x, 0))).collect();
        assert_eq!(path_cost(&g, &nodes), Some(51.0));
        let gap = [nodes[0], nodes[2]];
        assert_eq!(path_cost(&g, &gap), None);
    }

    #[test]
    fn path_length_counts_edges() {
        let p = Path {
            nodes: ids(&[4, 5, 6]),
            cost: 2.0,
        };
        assert_eq!(p.len(), 2);
        assert_eq!(p.first(), Some(NodeId(4)));
        assert_eq!(p.last(), Some(NodeId(6)));
    }
}
