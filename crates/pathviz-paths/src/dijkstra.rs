use pathviz_core::{NodeId, SpaceError};

use crate::search::{Algorithm, Outcome, Search, SearchResult, StepSink};
use crate::traits::Pather;

impl Search {
    pub(crate) fn step_dijkstra<P: Pather, K: StepSink>(
        &mut self,
        pather: &P,
        sink: &mut K,
    ) -> Outcome {
        self.step_weighted(pather, sink, |_| 0.0)
    }

    /// One extraction cycle of the lazy-deletion priority search shared by
    /// Dijkstra and A*. Entries are keyed by `distance + estimate`.
    ///
    /// Entries for already visited nodes are skipped and counted. The
    /// target is tested on extraction, never on relaxation.
    pub(crate) fn step_weighted<P, K, H>(
        &mut self,
        pather: &P,
        sink: &mut K,
        estimate: H,
    ) -> Outcome
    where
        P: Pather,
        K: StepSink,
        H: Fn(NodeId) -> f64,
    {
        let target = self.target();
        let ci = loop {
            let Some((ci, _)) = self.open.pop() else {
                return Outcome::NoPath;
            };
            if self.visited[ci.index()] {
                self.stale += 1;
                continue;
            }
            break ci;
        };

        self.mark_visited(ci, sink);
        if ci == target {
            return Outcome::Found;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(ci, &mut nbuf);
        let current_dist = self.distance[ci.index()];

        for step in nbuf.iter() {
            let ni = step.to;
            if !self.knows(ni) || self.visited[ni.index()] {
                continue;
            }
            let nd = current_dist + step.cost;
            if nd < self.distance[ni.index()] {
                self.distance[ni.index()] = nd;
                self.predecessor[ni.index()] = Some(ci);
                self.open.insert(ni, nd + estimate(ni));
            }
        }
        self.nbuf = nbuf;

        if self.open.is_empty() {
            Outcome::NoPath
        } else {
            Outcome::Running
        }
    }
}

/// Dijkstra's algorithm from the space's start to its target. Finds a path
/// of minimum total entering cost.
pub fn dijkstra<P: Pather>(pather: &P) -> Result<SearchResult, SpaceError> {
    let mut search = Search::new(pather, Algorithm::Dijkstra)?;
    while search.advance(|s| s.step_dijkstra(pather, &mut ())) == Outcome::Running {}
    Ok(search.into_result())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::bfs::bfs;
    use crate::path::path_cost;
    use crate::traits::Step;
    use pathviz_core::{GraphSpace, GridSpace, Point, Pos, Space, parse_grid};

    #[test]
    fn open_grid_corner_to_corner() {
        let g = GridSpace::with_endpoints(5, 5, Point::rc(0, 0), Point::rc(4, 4)).unwrap();
        let path = dijkstra(&g).unwrap().path.unwrap();
        assert_eq!(path.len(), 8);
        assert_eq!(path.cost, 8.0);
    }

    #[test]
    fn detours_around_weights() {
        let g = parse_grid(
            "
            S#T
            ...
            ",
        )
        .unwrap();
        let path = dijkstra(&g).unwrap().path.unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.cost, 4.0);
        assert_eq!(path_cost(&g, &path.nodes), Some(path.cost));
    }

    #[test]
    fn agrees_with_bfs_on_uniform_grids() {
        let g = parse_grid(
            "
            S..W....
            .W.W.WW.
            .W...W..
            .WWWWW.W
            ......WT
            .WWWW...
            ",
        )
        .unwrap();
        let b = bfs(&g).unwrap().path.unwrap();
        let d = dijkstra(&g).unwrap().path.unwrap();
        assert_eq!(b.len(), d.len());
    }

    /// Exhaustive minimum over simple paths. Small inputs only.
    pub(crate) fn cheapest_simple_path<P: Pather>(
        p: &P,
        at: NodeId,
        goal: NodeId,
        seen: &mut Vec<bool>,
    ) -> f64 {
        if at == goal {
            return 0.0;
        }
        seen[at.index()] = true;
        let mut buf: Vec<Step> = Vec::new();
        p.neighbors(at, &mut buf);
        let mut best = f64::INFINITY;
        for s in buf {
            if !seen[s.to.index()] {
                best = best.min(s.cost + cheapest_simple_path(p, s.to, goal, seen));
            }
        }
        seen[at.index()] = false;
        best
    }

    #[test]
    fn no_enumerated_path_is_cheaper() {
        let g = parse_grid(
            "
            S.#.
            #W.#
            ..#T
            ",
        )
        .unwrap();
        let r = dijkstra(&g).unwrap();
        let path = r.path.unwrap();
        let (s, t) = g.endpoints().unwrap();
        let brute = cheapest_simple_path(&g, s, t, &mut vec![false; g.node_count()]);
        assert_eq!(path.cost, brute);
        assert_eq!(path_cost(&g, &path.nodes), Some(path.cost));
    }

    #[test]
    fn stale_entries_are_skipped() {
        // B is queued at 10 through the heavy edge, then improved to 2
        // through C. The entry at 10 comes out after B is visited.
        let mut g = GraphSpace::new();
        for l in ["A", "B", "C", "D"] {
            g.add_vertex(l, Pos::default()).unwrap();
        }
        g.add_edge("A", "B", 10.0).unwrap();
        g.add_edge("A", "C", 1.0).unwrap();
        g.add_edge("C", "B", 1.0).unwrap();
        g.add_edge("B", "D", 15.0).unwrap();
        g.set_start("A").unwrap();
        g.set_target("D").unwrap();

        let mut search = Search::new(&g, Algorithm::Dijkstra).unwrap();
        while search.advance(|s| s.step_dijkstra(&g, &mut ())) == Outcome::Running {}
        let path = search.path().unwrap();
        let names: Vec<&str> = path
            .nodes
            .iter()
            .map(|n| g.vertex(*n).unwrap().label.as_str())
            .collect();
        assert_eq!(names, ["A", "C", "B", "D"]);
        assert_eq!(path.cost, 17.0);
        assert_eq!(search.order().len(), 4);
        assert_eq!(search.stale_entries(), 1);
    }

    #[test]
    fn unreachable_target() {
        let g = parse_grid(
            "
            S.W.
            ..WT
            ",
        )
        .unwrap();
        let r = dijkstra(&g).unwrap();
        assert_eq!(r.outcome, Outcome::NoPath);
        assert!(r.path.is_none());
        assert_eq!(r.order.len(), 4);
    }
}
