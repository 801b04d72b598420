//! Connected-component labelling.

use pathviz_core::NodeId;

use crate::traits::{Pather, Step};

/// Component labels produced by [`components`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components {
    labels: Vec<Option<usize>>,
    count: usize,
}

impl Components {
    /// Label of `n`, or `None` if it was excluded.
    pub fn label(&self, n: NodeId) -> Option<usize> {
        self.labels.get(n.index()).copied().flatten()
    }

    /// Number of distinct components.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether `a` and `b` are labelled and in the same component.
    pub fn connected(&self, a: NodeId, b: NodeId) -> bool {
        matches!((self.label(a), self.label(b)), (Some(x), Some(y)) if x == y)
    }
}

/// Flood-fill from `from` and return every node reachable from it,
/// `from` included.
pub fn flood<P: Pather>(pather: &P, from: NodeId) -> Vec<NodeId> {
    let n = pather.node_count();
    let mut result = Vec::new();
    if from.index() >= n {
        return result;
    }
    let mut seen = vec![false; n];
    let mut stack = vec![from];
    let mut nbuf: Vec<Step> = Vec::new();
    seen[from.index()] = true;
    result.push(from);

    while let Some(ci) = stack.pop() {
        nbuf.clear();
        pather.neighbors(ci, &mut nbuf);
        for step in nbuf.iter() {
            let ni = step.to;
            if ni.index() < n && !seen[ni.index()] {
                seen[ni.index()] = true;
                stack.push(ni);
                result.push(ni);
            }
        }
    }
    result
}

/// Label every node for which `include` holds with a component id. Two
/// nodes share a label if a chain of neighbours joins them.
pub fn components<P, F>(pather: &P, include: F) -> Components
where
    P: Pather,
    F: Fn(NodeId) -> bool,
{
    let n = pather.node_count();
    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut label = 0;
    let mut stack = Vec::new();
    let mut nbuf: Vec<Step> = Vec::new();

    for start in (0..n).map(NodeId) {
        if labels[start.index()].is_some() || !include(start) {
            continue;
        }
        // Iterative DFS from `start`.
        stack.clear();
        stack.push(start);
        labels[start.index()] = Some(label);

        while let Some(ci) = stack.pop() {
            nbuf.clear();
            pather.neighbors(ci, &mut nbuf);
            for step in nbuf.iter() {
                let ni = step.to;
                if ni.index() < n && labels[ni.index()].is_none() && include(ni) {
                    labels[ni.index()] = Some(label);
                    stack.push(ni);
                }
            }
        }
        label += 1;
    }

    Components {
        labels,
        count: label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::{GraphSpace, Point, Pos, Space, parse_grid};

    const ROOMS: &str = "
        S.W..
        ..W.T
        WWW..
        .#...
    ";

    #[test]
    fn flood_stays_in_its_region() {
        let g = parse_grid(ROOMS).unwrap();
        let region = flood(&g, g.start().unwrap());
        assert_eq!(region.len(), 4);
        assert!(!region.contains(&g.target().unwrap()));
    }

    #[test]
    fn open_cells_split_into_two_components() {
        let g = parse_grid(ROOMS).unwrap();
        let cc = components(&g, |n| !g.is_wall(g.point(n)));
        assert_eq!(cc.count(), 2);
        let (s, t) = g.endpoints().unwrap();
        assert!(!cc.connected(s, t));
        let corner = g.id(Point::rc(3, 0)).unwrap();
        assert!(cc.connected(t, corner));
        assert_eq!(cc.label(g.id(Point::rc(0, 2)).unwrap()), None);
    }

    #[test]
    fn graph_components() {
        let mut g = GraphSpace::new();
        for l in ["A", "B", "C"] {
            g.add_vertex(l, Pos::default()).unwrap();
        }
        g.add_edge("A", "B", 1.0).unwrap();
        let cc = components(&g, |_| true);
        assert_eq!(cc.count(), 2);
        assert_eq!(flood(&g, NodeId(2)), vec![NodeId(2)]);
    }
}
