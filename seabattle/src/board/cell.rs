// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Cell coordinates and their string encoding.
use std::{fmt, str::FromStr};

use crate::board::errors::ParseCellError;

/// The coordinates of a single cell of the board.
///
/// Ordering is column-major (`x` first, then `y`), which is also the order the fleet
/// generator walks the board in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Cell {
    /// Column of the cell.
    pub x: usize,
    /// Row of the cell.
    pub y: usize,
}

impl Cell {
    /// Construct a [`Cell`] from the given `x` and `y`.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Encode this cell as a [`CellHash`].
    pub fn to_hash(&self) -> CellHash {
        CellHash(format!("{}-{}", self.x, self.y))
    }

    /// Chebyshev distance between two cells. Cells that touch, including diagonally,
    /// are at distance 1.
    pub fn distance(&self, other: &Cell) -> usize {
        let dx = if self.x > other.x { self.x - other.x } else { other.x - self.x };
        let dy = if self.y > other.y { self.y - other.y } else { other.y - self.y };
        dx.max(dy)
    }
}

impl From<(usize, usize)> for Cell {
    /// Construct a [`Cell`] from the given `(x, y)` pair.
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl From<Cell> for (usize, usize) {
    /// Convert the [`Cell`] into an `(x, y)` pair.
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

impl FromStr for Cell {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, '-');
        let x = parts.next().and_then(|x| x.parse().ok());
        let y = parts.next().and_then(|y| y.parse().ok());
        match (x, y) {
            (Some(x), Some(y)) => Ok(Cell { x, y }),
            _ => Err(ParseCellError::new(s)),
        }
    }
}

/// String key for a [`Cell`] of the form `"{x}-{y}"`. Used where cells are exchanged or
/// stored as text, for example in a state container keyed by strings.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CellHash(String);

impl CellHash {
    /// View the encoded form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the cell this hash was built from.
    pub fn to_cell(&self) -> Result<Cell, ParseCellError> {
        self.0.parse()
    }
}

impl fmt::Display for CellHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<Cell> for CellHash {
    fn from(cell: Cell) -> Self {
        cell.to_hash()
    }
}

impl FromStr for CellHash {
    type Err = ParseCellError;

    /// Accepts only strings that decode to a cell, so every [`CellHash`] round-trips.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Cell>().map(|cell| cell.to_hash())
    }
}

/// Encode a cell as `"{x}-{y}"`.
pub fn hash(cell: &Cell) -> CellHash {
    cell.to_hash()
}

/// Decode a string produced by [`hash`].
pub fn unhash(hash: &str) -> Result<Cell, ParseCellError> {
    hash.parse()
}

/// Structural equality of two cells.
pub fn equals(a: &Cell, b: &Cell) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_format() {
        assert_eq!(hash(&Cell::new(3, 7)).as_str(), "3-7");
        assert_eq!(hash(&Cell::new(0, 0)).as_str(), "0-0");
        assert_eq!(hash(&Cell::new(12, 105)).as_str(), "12-105");
    }

    #[test]
    fn unhash_inverts_hash() {
        for x in 0..12 {
            for y in 0..12 {
                let cell = Cell::new(x, y);
                assert_eq!(unhash(hash(&cell).as_str()).unwrap(), cell);
                assert_eq!(cell.to_hash().to_cell().unwrap(), cell);
            }
        }
    }

    #[test]
    fn unhash_rejects_garbage() {
        for bad in &["", "3", "3-", "-3", "a-b", "3-4-5", "-1-2", "3 - 4"] {
            let err = unhash(bad).unwrap_err();
            assert_eq!(err.input(), *bad);
        }
    }

    #[test]
    fn hash_from_str_validates() {
        assert_eq!("4-9".parse::<CellHash>().unwrap(), Cell::new(4, 9).to_hash());
        assert!("4_9".parse::<CellHash>().is_err());
    }

    #[test]
    fn equality_is_structural() {
        assert!(equals(&Cell::new(1, 2), &Cell::from((1, 2))));
        assert!(!equals(&Cell::new(1, 2), &Cell::new(2, 1)));
    }

    #[test]
    fn chebyshev_distance() {
        let c = Cell::new(4, 4);
        assert_eq!(c.distance(&c), 0);
        assert_eq!(c.distance(&Cell::new(5, 5)), 1);
        assert_eq!(c.distance(&Cell::new(3, 4)), 1);
        assert_eq!(c.distance(&Cell::new(6, 3)), 2);
        assert_eq!(c.distance(&Cell::new(0, 9)), 5);
    }
}
