//! The steppable [`Search`] state machine shared by every algorithm.
//!
//! A search owns only its run state; the space is borrowed per call to
//! [`Search::step`], so the caller is free to paint flags on the space
//! between steps.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use pathviz_core::{NodeId, Space, SpaceError};
use thiserror::Error;

use crate::heap::MinHeap;
use crate::path::{Path, reconstruct};
use crate::traits::{AstarPather, Step};

/// The traversal strategies a [`Search`] can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::AStar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }

    /// Whether the algorithm minimizes total cost rather than hop count.
    pub fn is_weighted(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm {0:?}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == lower || (lower == "a*" && *a == Algorithm::AStar))
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Receives every node as it is marked visited, in order.
pub trait StepSink {
    fn visit(&mut self, node: NodeId);
}

impl StepSink for () {
    fn visit(&mut self, _node: NodeId) {}
}

impl StepSink for Vec<NodeId> {
    fn visit(&mut self, node: NodeId) {
        self.push(node);
    }
}

/// Where a search stands after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Running,
    Found,
    /// The frontier emptied without reaching the target.
    NoPath,
}

/// Per-run traversal state. Create one per run; nothing carries over.
#[derive(Debug, Clone)]
pub struct Search {
    algorithm: Algorithm,
    start: NodeId,
    target: NodeId,
    pub(crate) distance: Vec<f64>,
    pub(crate) predecessor: Vec<Option<NodeId>>,
    pub(crate) visited: Vec<bool>,
    pub(crate) discovered: Vec<bool>,
    pub(crate) queue: VecDeque<NodeId>,
    pub(crate) stack: Vec<NodeId>,
    pub(crate) open: MinHeap<NodeId>,
    pub(crate) stale: usize,
    pub(crate) nbuf: Vec<Step>,
    order: Vec<NodeId>,
    outcome: Outcome,
    steps: usize,
}

impl Search {
    /// Validate the endpoints of `space` and seed the frontier.
    pub fn new<S: Space>(space: &S, algorithm: Algorithm) -> Result<Self, SpaceError> {
        let (start, target) = space.endpoints()?;
        let n = space.node_count();
        if start.index() >= n || target.index() >= n {
            return Err(SpaceError::UnknownVertex(format!(
                "endpoint outside 0..{n}"
            )));
        }
        let mut search = Self {
            algorithm,
            start,
            target,
            distance: vec![f64::INFINITY; n],
            predecessor: vec![None; n],
            visited: vec![false; n],
            discovered: vec![false; n],
            queue: VecDeque::new(),
            stack: Vec::new(),
            open: MinHeap::new(),
            stale: 0,
            nbuf: Vec::with_capacity(8),
            order: Vec::new(),
            outcome: Outcome::Running,
            steps: 0,
        };
        search.distance[start.index()] = 0.0;
        match algorithm {
            Algorithm::Bfs => {
                search.discovered[start.index()] = true;
                search.queue.push_back(start);
            }
            Algorithm::Dfs => search.stack.push(start),
            Algorithm::Dijkstra | Algorithm::AStar => search.open.insert(start, 0.0),
        }
        Ok(search)
    }

    /// Advance by one unit of work: a whole queue layer for BFS, one
    /// pop-and-expand cycle otherwise. Every node marked visited is passed
    /// to `sink`. Once finished, further calls do nothing and return the
    /// final outcome.
    pub fn step<P: AstarPather, K: StepSink>(&mut self, space: &P, sink: &mut K) -> Outcome {
        match self.algorithm {
            Algorithm::Bfs => self.advance(|s| s.step_bfs(space, sink)),
            Algorithm::Dfs => self.advance(|s| s.step_dfs(space, sink)),
            Algorithm::Dijkstra => self.advance(|s| s.step_dijkstra(space, sink)),
            Algorithm::AStar => self.advance(|s| s.step_astar(space, sink)),
        }
    }

    /// Step until the search finishes.
    pub fn run<P: AstarPather, K: StepSink>(&mut self, space: &P, sink: &mut K) -> Outcome {
        while self.step(space, sink) == Outcome::Running {}
        self.outcome
    }

    pub(crate) fn advance(&mut self, f: impl FnOnce(&mut Self) -> Outcome) -> Outcome {
        if self.outcome != Outcome::Running {
            return self.outcome;
        }
        self.steps += 1;
        self.outcome = f(self);
        self.outcome
    }

    pub(crate) fn mark_visited<K: StepSink>(&mut self, n: NodeId, sink: &mut K) {
        self.visited[n.index()] = true;
        self.order.push(n);
        sink.visit(n);
    }

    /// Whether `n` is a node id this search has state for.
    #[inline]
    pub(crate) fn knows(&self, n: NodeId) -> bool {
        n.index() < self.visited.len()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Number of steps that did work.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Nodes in the order they were marked visited.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Tentative (or final, once visited) distance from the start.
    pub fn distance(&self, n: NodeId) -> f64 {
        self.distance.get(n.index()).copied().unwrap_or(f64::INFINITY)
    }

    pub fn predecessor(&self, n: NodeId) -> Option<NodeId> {
        self.predecessor.get(n.index()).copied().flatten()
    }

    pub fn is_visited(&self, n: NodeId) -> bool {
        self.visited.get(n.index()).copied().unwrap_or(false)
    }

    /// Priority-queue entries popped for already visited nodes.
    pub fn stale_entries(&self) -> usize {
        self.stale
    }

    /// The start-to-target path, once the target has been visited.
    pub fn path(&self) -> Option<Path> {
        if self.outcome != Outcome::Found {
            return None;
        }
        let nodes = reconstruct(&self.predecessor, &self.visited, self.target)?;
        Some(Path {
            nodes,
            cost: self.distance(self.target),
        })
    }

    pub fn into_result(self) -> SearchResult {
        SearchResult {
            algorithm: self.algorithm,
            outcome: self.outcome,
            path: self.path(),
            steps: self.steps,
            order: self.order,
        }
    }
}

/// Summary of a finished search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub algorithm: Algorithm,
    pub outcome: Outcome,
    pub path: Option<Path>,
    pub order: Vec<NodeId>,
    pub steps: usize,
}

/// Run `algorithm` on `space` to completion.
pub fn solve<P: AstarPather>(space: &P, algorithm: Algorithm) -> Result<SearchResult, SpaceError> {
    let mut search = Search::new(space, algorithm)?;
    search.run(space, &mut ());
    Ok(search.into_result())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::{GridSpace, Point, parse_grid};

    #[test]
    fn algorithm_names_parse_back() {
        for a in Algorithm::ALL {
            assert_eq!(a.name().parse::<Algorithm>(), Ok(a));
        }
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!(" Dijkstra ".parse::<Algorithm>(), Ok(Algorithm::Dijkstra));
        assert!("greedy".parse::<Algorithm>().is_err());
    }

    #[test]
    fn invalid_space_is_rejected_before_running() {
        let g = GridSpace::new(3, 3).unwrap();
        assert_eq!(
            Search::new(&g, Algorithm::Bfs).unwrap_err(),
            SpaceError::MissingStart
        );
    }

    #[test]
    fn finished_search_is_inert() {
        let g = parse_grid("S.T").unwrap();
        let mut s = Search::new(&g, Algorithm::Dijkstra).unwrap();
        assert_eq!(s.run(&g, &mut ()), Outcome::Found);
        let steps = s.steps();
        let order = s.order().to_vec();
        assert_eq!(s.step(&g, &mut ()), Outcome::Found);
        assert_eq!(s.steps(), steps);
        assert_eq!(s.order(), &order[..]);
    }

    #[test]
    fn sink_sees_visit_order() {
        let g = parse_grid("S..T").unwrap();
        let mut s = Search::new(&g, Algorithm::Bfs).unwrap();
        let mut seen = Vec::new();
        s.run(&g, &mut seen);
        assert_eq!(seen, s.order());
        assert_eq!(seen.first(), g.id(Point::new(0, 0)).as_ref());
        assert_eq!(seen.last(), g.id(Point::new(3, 0)).as_ref());
    }

    #[test]
    fn runs_are_repeatable() {
        let g = parse_grid(
            "
            S..#.
            .W.#.
            .W...
            ...WT
            ",
        )
        .unwrap();
        for a in Algorithm::ALL {
            let first = solve(&g, a).unwrap();
            let second = solve(&g, a).unwrap();
            assert_eq!(first, second, "{a}");
        }
    }
}
