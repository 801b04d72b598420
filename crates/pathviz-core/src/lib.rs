//! **pathviz-core**: core types of the pathfinding visualizer.
//!
//! This crate provides the model that searches run over and that the
//! animation layer paints: geometry primitives, node ids and visualization
//! flags, the editable [`GridSpace`] and [`GraphSpace`], a force layout for
//! graphs, the maze persistence codec and the [`MazeStore`] boundary.

pub mod codec;
pub mod error;
pub mod flags;
pub mod geom;
pub mod graph;
pub mod grid;
pub mod layout;
pub mod space;
pub mod store;

pub use codec::{MazeRecord, decode, encode, parse_grid};
pub use error::{CodecError, SpaceError, StoreError};
pub use flags::{NodeId, VisFlags};
pub use geom::{Point, Pos, Range};
pub use graph::{Edge, GraphSpace, Vertex};
pub use grid::{ClearMode, GridSpace, HEAVY_WEIGHT, Tile};
pub use layout::{ForceLayout, ForceLayoutConfig, circle_layout};
pub use space::Space;
pub use store::{MazeId, MazeStore, MazeSummary, MemoryStore};
