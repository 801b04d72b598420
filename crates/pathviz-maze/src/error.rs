use pathviz_core::SpaceError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MazeError {
    /// Start and target need two distinct open cells.
    #[error("maze has {0} open cells, need at least 2 for the endpoints")]
    TooFewOpenCells(usize),
    #[error(transparent)]
    Space(#[from] SpaceError),
}
