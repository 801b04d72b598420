//! Maze persistence format.
//!
//! A [`MazeRecord`] stores the grid size, both endpoint coordinates and one
//! character per cell in row-major order:
//!
//! | char | cell |
//! |---|---|
//! | `S` | start |
//! | `T` | target |
//! | `W` | wall |
//! | `#` | weighted |
//! | `0` | plain |
//!
//! The compact text form is `ROWSxCOLS;SR,SC;TR,TC;CELLS`, e.g.
//! `2x3;0,0;1,2;S0W00T`.
//!
//! Weights other than 1 are all stored as `#` and come back as
//! [`HEAVY_WEIGHT`].

use std::fmt;
use std::str::FromStr;

use crate::error::{CodecError, SpaceError};
use crate::geom::Point;
use crate::grid::{GridSpace, HEAVY_WEIGHT};

/// Serialized grid, as exchanged with the persistence service.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeRecord {
    pub rows: i32,
    pub cols: i32,
    /// `(row, col)` of the start.
    pub start: (i32, i32),
    /// `(row, col)` of the target.
    pub target: (i32, i32),
    pub cells: String,
}

/// Serialize a grid. Both endpoints must be placed.
pub fn encode(grid: &GridSpace) -> Result<MazeRecord, SpaceError> {
    let start = grid.start_point().ok_or(SpaceError::MissingStart)?;
    let target = grid.target_point().ok_or(SpaceError::MissingTarget)?;
    let cells = grid
        .bounds()
        .iter()
        .map(|p| {
            if p == start {
                'S'
            } else if p == target {
                'T'
            } else {
                match grid.tile(p) {
                    Some(t) if t.wall => 'W',
                    Some(t) if t.weight > 1 => '#',
                    _ => '0',
                }
            }
        })
        .collect();
    Ok(MazeRecord {
        rows: grid.height(),
        cols: grid.width(),
        start: (start.y, start.x),
        target: (target.y, target.x),
        cells,
    })
}

/// Rebuild a grid from a record, checking that the `S`/`T` markers agree
/// with the recorded coordinates.
pub fn decode(record: &MazeRecord) -> Result<GridSpace, CodecError> {
    // Check the cell count before allocating anything sized by the header.
    let found = record.cells.chars().count();
    let expected = usize::try_from(record.rows)
        .ok()
        .zip(usize::try_from(record.cols).ok())
        .and_then(|(rows, cols)| rows.checked_mul(cols));
    if let Some(expected) = expected {
        if found != expected {
            return Err(CodecError::CellCount { expected, found });
        }
    }
    let mut grid = GridSpace::new(record.cols, record.rows)?;

    let start = Point::rc(record.start.0, record.start.1);
    let target = Point::rc(record.target.0, record.target.1);
    let mut seen_start = false;
    let mut seen_target = false;

    for (p, ch) in grid.bounds().iter().zip(record.cells.chars()) {
        match ch {
            'S' => {
                if p != start || seen_start {
                    return Err(CodecError::EndpointMismatch);
                }
                seen_start = true;
            }
            'T' => {
                if p != target || seen_target {
                    return Err(CodecError::EndpointMismatch);
                }
                seen_target = true;
            }
            'W' => {
                grid.set_wall(p, true)?;
            }
            '#' => {
                grid.set_weight(p, HEAVY_WEIGHT)?;
            }
            '0' => {}
            _ => {
                return Err(CodecError::InvalidCell {
                    ch,
                    row: p.y,
                    col: p.x,
                });
            }
        }
    }
    if !seen_start || !seen_target {
        return Err(CodecError::EndpointMismatch);
    }
    grid.move_start(start)?;
    grid.move_target(target)?;
    Ok(grid)
}

impl fmt::Display for MazeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{};{},{};{},{};{}",
            self.rows,
            self.cols,
            self.start.0,
            self.start.1,
            self.target.0,
            self.target.1,
            self.cells
        )
    }
}

impl FromStr for MazeRecord {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(4, ';');
        let mut next = |what: &str| {
            parts
                .next()
                .ok_or_else(|| CodecError::Malformed(format!("missing {what}")))
        };
        let (rows, cols) = parse_pair(next("size")?, 'x')?;
        let start = parse_pair(next("start")?, ',')?;
        let target = parse_pair(next("target")?, ',')?;
        let cells = next("cells")?.to_string();
        Ok(Self {
            rows,
            cols,
            start,
            target,
            cells,
        })
    }
}

fn parse_pair(s: &str, sep: char) -> Result<(i32, i32), CodecError> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| CodecError::Malformed(format!("expected `a{sep}b`, got {s:?}")))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| CodecError::Malformed(format!("{v:?}: {e}")))
    };
    Ok((parse(a)?, parse(b)?))
}

/// Parse a multi-line picture of a grid, one text line per row, using the
/// record alphabet (`.` is accepted as a plain cell). Surrounding whitespace
/// is trimmed; every line must have the same width.
///
/// ```
/// let g = pathviz_core::codec::parse_grid("S.W\n..T").unwrap();
/// assert_eq!(g.width(), 3);
/// ```
pub fn parse_grid(s: &str) -> Result<GridSpace, CodecError> {
    let lines: Vec<&str> = s.trim().lines().map(str::trim).collect();
    let rows = lines.len() as i32;
    let cols = lines.first().map_or(0, |l| l.chars().count()) as i32;
    if lines.iter().any(|l| l.chars().count() as i32 != cols) {
        return Err(CodecError::Malformed("inconsistent line widths".into()));
    }

    let mut start = None;
    let mut target = None;
    let mut cells = String::with_capacity((rows * cols).max(0) as usize);
    for (row, line) in lines.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            match ch {
                'S' => start = Some((row as i32, col as i32)),
                'T' => target = Some((row as i32, col as i32)),
                _ => {}
            }
            cells.push(if ch == '.' { '0' } else { ch });
        }
    }

    let record = MazeRecord {
        rows,
        cols,
        start: start.ok_or(SpaceError::MissingStart)?,
        target: target.ok_or(SpaceError::MissingTarget)?,
        cells,
    };
    decode(&record)
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn record_json_round_trip() {
        let rec: MazeRecord = "2x2;0,0;1,1;S00T".parse().unwrap();
        let json = serde_json::to_string(&rec).unwrap();
        let back: MazeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, back);
    }
}
