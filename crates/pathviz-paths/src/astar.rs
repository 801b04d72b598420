use pathviz_core::SpaceError;

use crate::search::{Algorithm, Outcome, Search, SearchResult, StepSink};
use crate::traits::AstarPather;

impl Search {
    /// Dijkstra cycle with the queue keyed by `distance + estimate`.
    pub(crate) fn step_astar<P: AstarPather, K: StepSink>(
        &mut self,
        pather: &P,
        sink: &mut K,
    ) -> Outcome {
        let target = self.target();
        self.step_weighted(pather, sink, |n| pather.estimate(n, target))
    }
}

/// A* search from the space's start to its target.
///
/// Optimal whenever [`AstarPather::estimate`] never overestimates, which
/// holds for grids but not in general for graphs.
pub fn astar<P: AstarPather>(pather: &P) -> Result<SearchResult, SpaceError> {
    let mut search = Search::new(pather, Algorithm::AStar)?;
    while search.advance(|s| s.step_astar(pather, &mut ())) == Outcome::Running {}
    Ok(search.into_result())
}
