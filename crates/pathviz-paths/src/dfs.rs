use pathviz_core::SpaceError;

use crate::search::{Algorithm, Outcome, Search, SearchResult, StepSink};
use crate::traits::Pather;

impl Search {
    /// Pop until an unvisited node comes out, then visit and expand it.
    ///
    /// The stack may hold duplicates; the predecessor of a node is whichever
    /// visited node pushed it last.
    pub(crate) fn step_dfs<P: Pather, K: StepSink>(&mut self, pather: &P, sink: &mut K) -> Outcome {
        let target = self.target();
        let ci = loop {
            let Some(ci) = self.stack.pop() else {
                return Outcome::NoPath;
            };
            if !self.visited[ci.index()] {
                break ci;
            }
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
            self.predecessor[ni.index()] = Some(ci);
            self.distance[ni.index()] = current_dist + step.cost;
            self.stack.push(ni);
        }
        self.nbuf = nbuf;

        if self.stack.is_empty() {
            Outcome::NoPath
        } else {
            Outcome::Running
        }
    }
}

/// Depth-first search from the space's start to its target. The path found
/// is valid but not necessarily short.
pub fn dfs<P: Pather>(pather: &P) -> Result<SearchResult, SpaceError> {
    let mut search = Search::new(pather, Algorithm::Dfs)?;
    while search.advance(|s| s.step_dfs(pather, &mut ())) == Outcome::Running {}
    Ok(search.into_result())
}
