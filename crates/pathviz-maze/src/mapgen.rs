//! Maze generation driver: carve with one of the generators, then place
//! the endpoints.

use pathviz_core::{GridSpace, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::backtrack::backtrack;
use crate::error::MazeError;
use crate::prim::Prim;

/// Available carving algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MazeKind {
    /// Randomized Prim's: many short dead ends.
    #[default]
    Prim,
    /// Recursive backtracker: long winding corridors.
    Backtracker,
}

/// Maze generator operating on a [`GridSpace`].
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub grid: GridSpace,
}

impl<R: Rng> MazeGen<R> {
    pub fn with_grid(grid: GridSpace, rng: R) -> Self {
        Self { rng, grid }
    }

    /// Replace the grid contents with a fresh maze and place start and
    /// target on distinct random open cells.
    ///
    /// Returns `(start, target)`.
    pub fn generate(&mut self, kind: MazeKind) -> Result<(Point, Point), MazeError> {
        let carved = match kind {
            MazeKind::Prim => {
                let mut prim = Prim::start(&mut self.grid, &mut self.rng)?;
                prim.run(&mut self.grid, &mut self.rng)?
            }
            MazeKind::Backtracker => backtrack(&mut self.grid, &mut self.rng)?,
        };
        log::debug!(
            "{kind:?} maze carved {carved} cells on {}x{}",
            self.grid.width(),
            self.grid.height()
        );
        self.place_endpoints()
    }

    /// Put start and target on two distinct random open cells.
    pub fn place_endpoints(&mut self) -> Result<(Point, Point), MazeError> {
        let open: Vec<Point> = self.grid.open_cells().collect();
        if open.len() < 2 {
            log::warn!("cannot place endpoints on {} open cells", open.len());
            return Err(MazeError::TooFewOpenCells(open.len()));
        }
        let si = self.rng.random_range(0..open.len());
        // Draw from the remaining cells so the two never coincide.
        let mut ti = self.rng.random_range(0..open.len() - 1);
        if ti >= si {
            ti += 1;
        }
        let (start, target) = (open[si], open[ti]);
        // Clear the old endpoints first so neither move is blocked by them.
        self.grid.clear_endpoints();
        self.grid.move_start(start)?;
        self.grid.move_target(target)?;
        Ok((start, target))
    }
}

impl MazeGen<StdRng> {
    /// A generator whose output is fully determined by `seed`.
    pub fn seeded(grid: GridSpace, seed: u64) -> Self {
        Self::with_grid(grid, StdRng::seed_from_u64(seed))
    }
}
