//! Error types shared by the pathviz crates.

use thiserror::Error;

use crate::flags::NodeId;
use crate::geom::Point;

/// A space that cannot be searched, or an edit that the space refuses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpaceError {
    #[error("no start node has been placed")]
    MissingStart,
    #[error("no target node has been placed")]
    MissingTarget,
    #[error("start and target are the same node ({0})")]
    SameEndpoints(NodeId),
    #[error("{0} is outside the grid")]
    OutOfBounds(Point),
    #[error("{0} is a wall and cannot hold the start or target")]
    WallEndpoint(Point),
    #[error("unknown vertex {0:?}")]
    UnknownVertex(String),
    #[error("vertex {0:?} already exists")]
    DuplicateVertex(String),
    #[error("invalid weight {0}")]
    InvalidWeight(f64),
    #[error("invalid grid size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
}

/// A maze record that does not describe a valid grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("maze record is malformed: {0}")]
    Malformed(String),
    #[error("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },
    #[error("invalid cell character {ch:?} at row {row}, column {col}")]
    InvalidCell { ch: char, row: i32, col: i32 },
    #[error("start/target markers disagree with the recorded coordinates")]
    EndpointMismatch,
    #[error(transparent)]
    Space(#[from] SpaceError),
}

/// Failures reported by a [`MazeStore`](crate::store::MazeStore).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("maze {0} not found")]
    NotFound(u64),
    #[error("a maze needs a non-empty name")]
    EmptyName,
    #[error("a maze named {0:?} already exists")]
    DuplicateName(String),
}
