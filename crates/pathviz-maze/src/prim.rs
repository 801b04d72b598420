//! Randomized Prim's maze carving, one frontier pick per step.

use pathviz_core::{GridSpace, Point};
use rand::Rng;

use crate::error::MazeError;

/// Offsets to frontier cells: two cells away in each cardinal direction.
const JUMPS: [(i32, i32); 4] = [(0, 2), (0, -2), (2, 0), (-2, 0)];

/// Outcome of one [`Prim::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimStep {
    /// `cell` and the wall `between` it and the maze were opened.
    Carved { between: Point, cell: Point },
    /// The picked frontier cell had already been opened.
    Skipped,
    /// The frontier is empty; carving is complete.
    Done,
}

/// Carving state of a randomized Prim's run.
///
/// The frontier holds `(between, cell)` pairs where `cell` is a wall two
/// steps from an open cell and `between` is the wall separating them. A
/// pair may be stale by the time it is picked; stale pairs are dropped.
#[derive(Debug, Clone, Default)]
pub struct Prim {
    frontier: Vec<(Point, Point)>,
    carved: usize,
}

impl Prim {
    /// Turn the whole grid into walls (dropping the endpoints), open a
    /// random seed cell and queue its frontier.
    pub fn start<R: Rng>(grid: &mut GridSpace, rng: &mut R) -> Result<Self, MazeError> {
        grid.fill_walls();
        let seed = Point::new(
            rng.random_range(0..grid.width()),
            rng.random_range(0..grid.height()),
        );
        grid.set_wall(seed, false)?;
        let mut prim = Self {
            frontier: Vec::new(),
            carved: 1,
        };
        prim.extend_frontier(grid, seed);
        Ok(prim)
    }

    /// Pick one random frontier pair and carve it if its cell is still a
    /// wall.
    pub fn step<R: Rng>(
        &mut self,
        grid: &mut GridSpace,
        rng: &mut R,
    ) -> Result<PrimStep, MazeError> {
        if self.frontier.is_empty() {
            return Ok(PrimStep::Done);
        }
        let i = rng.random_range(0..self.frontier.len());
        let (between, cell) = self.frontier.swap_remove(i);
        if !grid.is_wall(cell) {
            return Ok(PrimStep::Skipped);
        }
        grid.set_wall(cell, false)?;
        grid.set_wall(between, false)?;
        self.carved += 2;
        self.extend_frontier(grid, cell);
        Ok(PrimStep::Carved { between, cell })
    }

    /// Step until the frontier is empty. Returns the number of cells opened.
    pub fn run<R: Rng>(
        &mut self,
        grid: &mut GridSpace,
        rng: &mut R,
    ) -> Result<usize, MazeError> {
        while self.step(grid, rng)? != PrimStep::Done {}
        Ok(self.carved)
    }

    pub fn is_done(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Pairs still waiting to be picked.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Cells opened so far, the seed included.
    pub fn carved(&self) -> usize {
        self.carved
    }

    fn extend_frontier(&mut self, grid: &GridSpace, from: Point) {
        for (dy, dx) in JUMPS {
            let cell = from.shift(dx, dy);
            if grid.contains(cell) && grid.is_wall(cell) {
                let between = from.shift(dx / 2, dy / 2);
                self.frontier.push((between, cell));
            }
        }
    }
}
