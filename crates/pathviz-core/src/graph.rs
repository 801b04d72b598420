//! Explicit graph space: labelled vertices with 2-D positions joined by
//! undirected weighted edges.

use std::collections::HashMap;

use crate::error::SpaceError;
use crate::flags::{NodeId, VisFlags};
use crate::geom::Pos;
use crate::space::Space;

/// A graph vertex. Positions are used for drawing, force layout and the
/// Euclidean A* estimate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub label: String,
    pub pos: Pos,
    /// Layout velocity.
    pub vel: Pos,
    pub flags: VisFlags,
}

/// An undirected edge between two vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    pub weight: f64,
}

impl Edge {
    /// The endpoint opposite `v`, if `v` is on this edge.
    #[inline]
    pub fn other(&self, v: NodeId) -> Option<NodeId> {
        if self.a == v {
            Some(self.b)
        } else if self.b == v {
            Some(self.a)
        } else {
            None
        }
    }
}

/// An undirected weighted graph.
#[derive(Debug, Clone, Default)]
pub struct GraphSpace {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    /// Edge indices incident to each vertex, in insertion order.
    incident: Vec<Vec<usize>>,
    labels: HashMap<String, NodeId>,
    start: Option<NodeId>,
    target: Option<NodeId>,
}

impl GraphSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex. Labels must be unique.
    pub fn add_vertex(&mut self, label: &str, pos: Pos) -> Result<NodeId, SpaceError> {
        if self.labels.contains_key(label) {
            return Err(SpaceError::DuplicateVertex(label.to_string()));
        }
        let id = NodeId(self.vertices.len());
        self.vertices.push(Vertex {
            label: label.to_string(),
            pos,
            vel: Pos::default(),
            flags: VisFlags::NONE,
        });
        self.incident.push(Vec::new());
        self.labels.insert(label.to_string(), id);
        Ok(id)
    }

    /// Connect two vertices by label. If they are already connected (in
    /// either direction) the existing edge's weight is replaced.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) -> Result<(), SpaceError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(SpaceError::InvalidWeight(weight));
        }
        let va = self.vertex_id(a)?;
        let vb = self.vertex_id(b)?;
        if let Some(ei) = self.edge_index(va, vb) {
            self.edges[ei].weight = weight;
            return Ok(());
        }
        let ei = self.edges.len();
        self.edges.push(Edge { a: va, b: vb, weight });
        self.incident[va.index()].push(ei);
        if va != vb {
            self.incident[vb.index()].push(ei);
        }
        Ok(())
    }

    /// Look up a vertex id by label.
    pub fn vertex_id(&self, label: &str) -> Result<NodeId, SpaceError> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| SpaceError::UnknownVertex(label.to_string()))
    }

    pub fn vertex(&self, id: NodeId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn edge_index(&self, a: NodeId, b: NodeId) -> Option<usize> {
        self.incident.get(a.index())?.iter().copied().find(|&ei| {
            let e = &self.edges[ei];
            (e.a == a && e.b == b) || (e.a == b && e.b == a)
        })
    }

    /// The edge joining `a` and `b`, if any.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.edge_index(a, b).map(|ei| &self.edges[ei])
    }

    /// Neighbours of `v` with the connecting edge weight, in edge insertion
    /// order.
    pub fn incident(&self, v: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.incident
            .get(v.index())
            .into_iter()
            .flatten()
            .filter_map(move |&ei| {
                let e = &self.edges[ei];
                e.other(v).map(|n| (n, e.weight))
            })
    }

    /// Designate the start vertex. Selecting the target is a no-op.
    pub fn set_start(&mut self, label: &str) -> Result<bool, SpaceError> {
        let id = self.vertex_id(label)?;
        if self.target == Some(id) || self.start == Some(id) {
            return Ok(false);
        }
        self.start = Some(id);
        Ok(true)
    }

    /// Designate the target vertex. Selecting the start is a no-op.
    pub fn set_target(&mut self, label: &str) -> Result<bool, SpaceError> {
        let id = self.vertex_id(label)?;
        if self.start == Some(id) || self.target == Some(id) {
            return Ok(false);
        }
        self.target = Some(id);
        Ok(true)
    }
}

impl Space for GraphSpace {
    fn node_count(&self) -> usize {
        self.vertices.len()
    }

    fn start(&self) -> Option<NodeId> {
        self.start
    }

    fn target(&self) -> Option<NodeId> {
        self.target
    }

    fn flags(&self, id: NodeId) -> VisFlags {
        self.vertex(id).map_or(VisFlags::NONE, |v| v.flags)
    }

    fn set_flags(&mut self, id: NodeId, flags: VisFlags) -> bool {
        match self.vertices.get_mut(id.index()) {
            Some(v) => {
                v.flags = flags;
                true
            }
            None => false,
        }
    }

    fn clear_flags(&mut self) {
        for v in self.vertices.iter_mut() {
            v.flags = VisFlags::NONE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GraphSpace {
        let mut g = GraphSpace::new();
        g.add_vertex("A", Pos::new(0.0, 0.0)).unwrap();
        g.add_vertex("B", Pos::new(100.0, 0.0)).unwrap();
        g.add_vertex("C", Pos::new(0.0, 100.0)).unwrap();
        g.add_edge("A", "B", 1.0).unwrap();
        g.add_edge("B", "C", 2.0).unwrap();
        g.add_edge("C", "A", 5.0).unwrap();
        g
    }

    #[test]
    fn duplicate_vertex_rejected() {
        let mut g = triangle();
        assert_eq!(
            g.add_vertex("A", Pos::default()),
            Err(SpaceError::DuplicateVertex("A".into()))
        );
    }

    #[test]
    fn readding_edge_updates_weight() {
        let mut g = triangle();
        g.add_edge("B", "A", 7.0).unwrap();
        assert_eq!(g.edges().len(), 3);
        let (a, b) = (g.vertex_id("A").unwrap(), g.vertex_id("B").unwrap());
        assert_eq!(g.edge_between(a, b).unwrap().weight, 7.0);
    }

    #[test]
    fn edge_to_unknown_vertex_fails() {
        let mut g = triangle();
        assert_eq!(
            g.add_edge("A", "Z", 1.0),
            Err(SpaceError::UnknownVertex("Z".into()))
        );
        assert!(g.add_edge("A", "B", -1.0).is_err());
    }

    #[test]
    fn incident_lists_both_directions() {
        let g = triangle();
        let a = g.vertex_id("A").unwrap();
        let ns: Vec<(NodeId, f64)> = g.incident(a).collect();
        assert_eq!(ns, vec![(NodeId(1), 1.0), (NodeId(2), 5.0)]);
    }

    #[test]
    fn endpoints_must_differ() {
        let mut g = triangle();
        assert_eq!(g.set_start("A"), Ok(true));
        assert_eq!(g.set_target("A"), Ok(false));
        assert_eq!(g.endpoints(), Err(SpaceError::MissingTarget));
        g.set_target("C").unwrap();
        assert_eq!(g.endpoints(), Ok((NodeId(0), NodeId(2))));
    }
}
