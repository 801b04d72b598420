use pathviz_core::SpaceError;

use crate::search::{Algorithm, Outcome, Search, SearchResult, StepSink};
use crate::traits::Pather;

impl Search {
    /// Expand one full queue layer.
    ///
    /// Nodes are marked visited when dequeued and discovered (predecessor
    /// recorded) when enqueued, so each node is queued at most once.
    pub(crate) fn step_bfs<P: Pather, K: StepSink>(&mut self, pather: &P, sink: &mut K) -> Outcome {
        let layer = self.queue.len();
        if layer == 0 {
            return Outcome::NoPath;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let target = self.target();

        for _ in 0..layer {
            let Some(ci) = self.queue.pop_front() else {
                break;
            };
            self.mark_visited(ci, sink);
            if ci == target {
                self.nbuf = nbuf;
                return Outcome::Found;
            }

            nbuf.clear();
            pather.neighbors(ci, &mut nbuf);
            let current_dist = self.distance[ci.index()];

            for step in nbuf.iter() {
                let ni = step.to;
                if !self.knows(ni) || self.discovered[ni.index()] {
                    continue;
                }
                self.discovered[ni.index()] = true;
                self.predecessor[ni.index()] = Some(ci);
                self.distance[ni.index()] = current_dist + step.cost;
                self.queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;
        if self.queue.is_empty() {
            Outcome::NoPath
        } else {
            Outcome::Running
        }
    }
}

/// Breadth-first search from the space's start to its target. Finds a path
/// with the fewest edges, ignoring weights.
pub fn bfs<P: Pather>(pather: &P) -> Result<SearchResult, SpaceError> {
    let mut search = Search::new(pather, Algorithm::Bfs)?;
    while search.advance(|s| s.step_bfs(pather, &mut ())) == Outcome::Running {}
    Ok(search.into_result())
}
