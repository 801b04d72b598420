//! Steppable graph searches over pathviz spaces.
//!
//! This crate provides the traversal algorithms animated by the visualizer:
//!
//! - **BFS** fewest-edge search ([`bfs`]), one queue layer per step
//! - **DFS** depth-first search ([`dfs`]), no optimality guarantee
//! - **Dijkstra** minimum-cost search ([`dijkstra`])
//! - **A\*** minimum-cost search guided by an estimate ([`astar`])
//! - **Connected components** labelling ([`components`], [`flood`])
//!
//! Every algorithm is a step function on the shared [`Search`] state, so a
//! driver can run it to completion or one unit of work at a time and
//! observe each visited node through a [`StepSink`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] : [`Space`](pathviz_core::Space) | BFS, DFS, Dijkstra, components |
//! | [`AstarPather`] : [`Pather`] | A*, [`Search::step`] |

mod astar;
mod bfs;
mod cc;
mod dfs;
mod dijkstra;
mod distance;
mod heap;
mod path;
mod search;
mod spaces;
mod traits;

pub use astar::astar;
pub use bfs::bfs;
pub use cc::{Components, components, flood};
pub use dfs::dfs;
pub use dijkstra::dijkstra;
pub use distance::{euclidean, manhattan};
pub use heap::{EmptyQueueError, MinHeap};
pub use path::{Path, path_cost, reconstruct};
pub use search::{Algorithm, Outcome, Search, SearchResult, StepSink, UnknownAlgorithm, solve};
pub use traits::{AstarPather, Pather, Step};
