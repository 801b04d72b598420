//! [`Pather`] implementations for the core spaces.

use pathviz_core::{GraphSpace, GridSpace, NodeId};

use crate::distance::{euclidean, manhattan};
use crate::traits::{AstarPather, Pather, Step};

impl Pather for GridSpace {
    /// Cardinal neighbours (up, down, left, right) that are inside the grid
    /// and not walls. The cost is the entered cell's weight.
    fn neighbors(&self, n: NodeId, buf: &mut Vec<Step>) {
        for np in self.point(n).neighbors_4() {
            let Some(tile) = self.tile(np) else {
                continue;
            };
            if tile.wall {
                continue;
            }
            if let Some(to) = self.id(np) {
                buf.push(Step {
                    to,
                    cost: f64::from(tile.weight),
                });
            }
        }
    }
}

impl AstarPather for GridSpace {
    /// Manhattan distance. Admissible because every step costs at least 1.
    fn estimate(&self, from: NodeId, to: NodeId) -> f64 {
        f64::from(manhattan(self.point(from), self.point(to)))
    }
}

impl Pather for GraphSpace {
    fn neighbors(&self, n: NodeId, buf: &mut Vec<Step>) {
        buf.extend(self.incident(n).map(|(to, cost)| Step { to, cost }));
    }
}

impl AstarPather for GraphSpace {
    /// Euclidean distance between vertex positions.
    ///
    /// Only admissible when every edge weight is at least the straight-line
    /// distance between its endpoints; with weights chosen independently of
    /// the layout, A* on a graph may return a suboptimal path.
    fn estimate(&self, from: NodeId, to: NodeId) -> f64 {
        match (self.vertex(from), self.vertex(to)) {
            (Some(a), Some(b)) => euclidean(a.pos, b.pos),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::{Point, Pos, parse_grid};

    #[test]
    fn grid_neighbors_skip_walls_and_edges() {
        let g = parse_grid(
            "
            SW.
            #..
            ..T
            ",
        )
        .unwrap();
        let mut buf = Vec::new();
        g.neighbors(g.id(Point::new(0, 0)).unwrap(), &mut buf);
        assert_eq!(
            buf,
            vec![Step {
                to: g.id(Point::new(0, 1)).unwrap(),
                cost: 50.0
            }]
        );
    }

    #[test]
    fn grid_estimate_is_manhattan() {
        let g = parse_grid("S...\n...T").unwrap();
        let (s, t) = (g.id(Point::new(0, 0)).unwrap(), g.id(Point::new(3, 1)).unwrap());
        assert_eq!(g.estimate(s, t), 4.0);
    }

    #[test]
    fn graph_neighbors_and_estimate() {
        let mut g = GraphSpace::new();
        let a = g.add_vertex("A", Pos::new(0.0, 0.0)).unwrap();
        let b = g.add_vertex("B", Pos::new(30.0, 40.0)).unwrap();
        g.add_edge("A", "B", 3.0).unwrap();
        let mut buf = Vec::new();
        g.neighbors(b, &mut buf);
        assert_eq!(buf, vec![Step { to: a, cost: 3.0 }]);
        assert!((g.estimate(a, b) - 50.0).abs() < 1e-9);
    }
}
