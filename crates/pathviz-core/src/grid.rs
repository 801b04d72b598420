//! Editable 2-D grid space.
//!
//! [`GridSpace`] stores one [`Tile`] per cell in row-major order, plus the
//! optional start and target positions. Edit methods mirror what the editor
//! allows: walls and weights never land on an endpoint, and endpoints never
//! land on a wall.

use std::fmt;

use crate::error::SpaceError;
use crate::flags::{NodeId, VisFlags};
use crate::geom::{Point, Range};
use crate::space::Space;

/// Entering cost of a weighted cell.
pub const HEAVY_WEIGHT: u32 = 50;

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub wall: bool,
    /// Cost of stepping into this cell. Always ≥ 1.
    pub weight: u32,
    pub flags: VisFlags,
}

impl Tile {
    pub const OPEN: Self = Self {
        wall: false,
        weight: 1,
        flags: VisFlags::NONE,
    };

    pub const WALL: Self = Self {
        wall: true,
        weight: 1,
        flags: VisFlags::NONE,
    };

    #[inline]
    pub const fn is_weighted(self) -> bool {
        !self.wall && self.weight > 1
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::OPEN
    }
}

/// What [`GridSpace::clear`] resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    /// Visualization flags only.
    Path,
    /// Flags, walls and weights. Endpoints stay.
    Board,
    /// Everything, including the endpoints.
    All,
}

/// A `width × height` grid with 4-directional adjacency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpace {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    start: Option<Point>,
    target: Option<Point>,
}

impl GridSpace {
    /// Create an open grid without endpoints.
    pub fn new(width: i32, height: i32) -> Result<Self, SpaceError> {
        let len = match width.checked_mul(height) {
            Some(len) if width > 0 && height > 0 => len as usize,
            _ => return Err(SpaceError::InvalidSize { width, height }),
        };
        Ok(Self {
            width,
            height,
            tiles: vec![Tile::OPEN; len],
            start: None,
            target: None,
        })
    }

    /// Create an open grid with both endpoints placed.
    pub fn with_endpoints(
        width: i32,
        height: i32,
        start: Point,
        target: Point,
    ) -> Result<Self, SpaceError> {
        let mut grid = Self::new(width, height)?;
        grid.move_start(start)?;
        if !grid.move_target(target)? {
            return Err(SpaceError::SameEndpoints(grid.node(target)?));
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The grid rectangle, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Convert a `Point` to a node id. Returns `None` if out of bounds.
    #[inline]
    pub fn id(&self, p: Point) -> Option<NodeId> {
        if !self.contains(p) {
            return None;
        }
        Some(NodeId((p.y * self.width + p.x) as usize))
    }

    /// Convert a node id back to a `Point`.
    #[inline]
    pub fn point(&self, id: NodeId) -> Point {
        let i = id.index() as i32;
        Point::new(i % self.width, i / self.width)
    }

    fn node(&self, p: Point) -> Result<NodeId, SpaceError> {
        self.id(p).ok_or(SpaceError::OutOfBounds(p))
    }

    /// The tile at `p`, or `None` if out of bounds.
    pub fn tile(&self, p: Point) -> Option<Tile> {
        self.id(p).map(|id| self.tiles[id.index()])
    }

    /// The tile with the given id, or `None` if out of range.
    pub fn tile_by_id(&self, id: NodeId) -> Option<Tile> {
        self.tiles.get(id.index()).copied()
    }

    /// Whether `p` is a wall. Out-of-bounds points count as walls.
    pub fn is_wall(&self, p: Point) -> bool {
        self.tile(p).is_none_or(|t| t.wall)
    }

    pub fn start_point(&self) -> Option<Point> {
        self.start
    }

    pub fn target_point(&self) -> Option<Point> {
        self.target
    }

    fn is_endpoint(&self, p: Point) -> bool {
        self.start == Some(p) || self.target == Some(p)
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Raise or remove a wall. Endpoints are left untouched (`Ok(false)`).
    pub fn set_wall(&mut self, p: Point, wall: bool) -> Result<bool, SpaceError> {
        let id = self.node(p)?;
        if self.is_endpoint(p) {
            return Ok(false);
        }
        let tile = &mut self.tiles[id.index()];
        if tile.wall == wall {
            return Ok(false);
        }
        tile.wall = wall;
        tile.weight = 1;
        Ok(true)
    }

    /// Toggle the heavy weight on an open cell. Endpoints and walls are
    /// left untouched.
    pub fn set_weighted(&mut self, p: Point, weighted: bool) -> Result<bool, SpaceError> {
        let weight = if weighted { HEAVY_WEIGHT } else { 1 };
        self.set_weight(p, weight)
    }

    /// Set an arbitrary entering cost (≥ 1) on an open, non-endpoint cell.
    pub fn set_weight(&mut self, p: Point, weight: u32) -> Result<bool, SpaceError> {
        let id = self.node(p)?;
        if weight == 0 {
            return Err(SpaceError::InvalidWeight(0.0));
        }
        if self.is_endpoint(p) {
            return Ok(false);
        }
        let tile = &mut self.tiles[id.index()];
        if tile.wall || tile.weight == weight {
            return Ok(false);
        }
        tile.weight = weight;
        Ok(true)
    }

    /// Move the start onto `p`.
    ///
    /// Moving onto a wall is an error; moving onto the target or onto the
    /// current start is a no-op. The destination's weight is reset.
    pub fn move_start(&mut self, p: Point) -> Result<bool, SpaceError> {
        self.check_endpoint_target(p)?;
        if self.start == Some(p) || self.target == Some(p) {
            return Ok(false);
        }
        self.start = Some(p);
        self.reset_weight(p);
        Ok(true)
    }

    /// Move the target onto `p`. Same rules as [`move_start`](Self::move_start).
    pub fn move_target(&mut self, p: Point) -> Result<bool, SpaceError> {
        self.check_endpoint_target(p)?;
        if self.start == Some(p) || self.target == Some(p) {
            return Ok(false);
        }
        self.target = Some(p);
        self.reset_weight(p);
        Ok(true)
    }

    fn check_endpoint_target(&self, p: Point) -> Result<(), SpaceError> {
        let id = self.node(p)?;
        if self.tiles[id.index()].wall {
            return Err(SpaceError::WallEndpoint(p));
        }
        Ok(())
    }

    fn reset_weight(&mut self, p: Point) {
        if let Some(id) = self.id(p) {
            self.tiles[id.index()].weight = 1;
        }
    }

    /// Resize the grid, keeping the overlapping cells. Endpoints that fall
    /// outside the new bounds are removed.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), SpaceError> {
        let mut next = Self::new(width, height)?;
        let kept = next.bounds();
        for p in self.bounds().iter().filter(|&p| kept.contains(p)) {
            if let (Some(from), Some(to)) = (self.id(p), next.id(p)) {
                next.tiles[to.index()] = Tile {
                    flags: VisFlags::NONE,
                    ..self.tiles[from.index()]
                };
            }
        }
        next.start = self.start.filter(|&p| next.contains(p));
        next.target = self.target.filter(|&p| next.contains(p));
        *self = next;
        Ok(())
    }

    /// Reset part of the grid, see [`ClearMode`].
    pub fn clear(&mut self, mode: ClearMode) {
        match mode {
            ClearMode::Path => self.clear_flags(),
            ClearMode::Board => self.tiles.fill(Tile::OPEN),
            ClearMode::All => {
                self.tiles.fill(Tile::OPEN);
                self.start = None;
                self.target = None;
            }
        }
    }

    /// Remove both endpoints, leaving the cells they were on open.
    pub fn clear_endpoints(&mut self) {
        self.start = None;
        self.target = None;
    }

    /// Turn every cell into a wall and drop the endpoints. Used by maze
    /// generators before carving.
    pub fn fill_walls(&mut self) {
        self.tiles.fill(Tile::WALL);
        self.start = None;
        self.target = None;
    }

    /// Iterate over all open (non-wall) cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.bounds().iter().filter(|&p| !self.is_wall(p))
    }

    /// Number of cells with the given flags set.
    pub fn count_flags(&self, flags: VisFlags) -> usize {
        self.tiles.iter().filter(|t| t.flags.contains(flags)).count()
    }
}

impl Space for GridSpace {
    fn node_count(&self) -> usize {
        self.tiles.len()
    }

    fn start(&self) -> Option<NodeId> {
        self.start.and_then(|p| self.id(p))
    }

    fn target(&self) -> Option<NodeId> {
        self.target.and_then(|p| self.id(p))
    }

    fn flags(&self, id: NodeId) -> VisFlags {
        self.tiles.get(id.index()).map_or(VisFlags::NONE, |t| t.flags)
    }

    fn set_flags(&mut self, id: NodeId, flags: VisFlags) -> bool {
        match self.tiles.get_mut(id.index()) {
            Some(t) => {
                t.flags = flags;
                true
            }
            None => false,
        }
    }

    fn clear_flags(&mut self) {
        for t in self.tiles.iter_mut() {
            t.flags = VisFlags::NONE;
        }
    }
}

/// Debug rendering: `S`/`T` endpoints, `W` walls, `#` weights, `*` path,
/// `o` visited, `.` open.
impl fmt::Display for GridSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point::new(x, y);
                let t = self.tiles[(y * self.width + x) as usize];
                let ch = if self.start == Some(p) {
                    'S'
                } else if self.target == Some(p) {
                    'T'
                } else if t.wall {
                    'W'
                } else if t.flags.contains(VisFlags::PATH) {
                    '*'
                } else if t.flags.contains(VisFlags::VISITED) {
                    'o'
                } else if t.is_weighted() {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
            if y + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
