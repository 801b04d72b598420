//! Maze generation for pathviz grids.
//!
//! Provides two carving algorithms, both producing a spanning tree over the
//! opened cells so that every open cell is reachable from every other:
//! - **Randomized Prim's** ([`Prim`]), exposed step by step so the carving
//!   itself can be animated.
//! - **Recursive backtracker** ([`backtrack`]), iterative with an explicit
//!   stack.
//!
//! [`MazeGen`] drives either one and then places the start and target on
//! distinct random open cells.

mod backtrack;
mod error;
mod mapgen;
mod prim;

pub use backtrack::backtrack;
pub use error::MazeError;
pub use mapgen::{MazeGen, MazeKind};
pub use prim::{Prim, PrimStep};
