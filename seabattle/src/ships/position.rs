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
//! Compact axis-list encoding of a ship's placement.
use crate::board::{
    cell::Cell,
    geometry::{ship_neighbor_cells, ship_occupied_cells},
};

/// Placement of a ship as one list of columns and one list of rows. A horizontal ship
/// has a single row and one column per cell, a vertical ship the reverse, and a
/// single-cell ship one of each.
///
/// The occupied cells are always the cartesian product of the two lists. A position with
/// several entries on both axes is therefore a rectangle; the generator never builds one,
/// but every consumer handles it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ShipPosition {
    x: Vec<usize>,
    y: Vec<usize>,
}

impl ShipPosition {
    /// Construct a position from its column list and row list.
    pub fn new(x: Vec<usize>, y: Vec<usize>) -> Self {
        Self { x, y }
    }

    /// Build the compact form of a straight run of cells. For each axis, if the first two
    /// cells share a coordinate that coordinate alone is kept, otherwise the axis is the
    /// sorted list of every cell's coordinate.
    pub fn from_cells(cells: &[Cell]) -> Self {
        Self {
            x: compact_axis(cells, |cell| cell.x),
            y: compact_axis(cells, |cell| cell.y),
        }
    }

    /// Columns occupied by the ship.
    pub fn x(&self) -> &[usize] {
        &self.x
    }

    /// Rows occupied by the ship.
    pub fn y(&self) -> &[usize] {
        &self.y
    }

    /// Length of the ship: the longer of the two axis lists.
    pub fn size(&self) -> usize {
        self.x.len().max(self.y.len())
    }

    /// Cells occupied by this ship, `x`-major.
    pub fn cells(&self) -> Vec<Cell> {
        ship_occupied_cells(self)
    }

    /// Unique cells within `ring` of the ship that the ship does not occupy.
    pub fn neighbor_cells(&self, ring: usize) -> Vec<Cell> {
        ship_neighbor_cells(self, ring)
    }

    /// Whether the ship occupies `cell`.
    pub fn contains(&self, cell: &Cell) -> bool {
        self.x.contains(&cell.x) && self.y.contains(&cell.y)
    }
}

fn compact_axis<F: Fn(&Cell) -> usize>(cells: &[Cell], coord: F) -> Vec<usize> {
    match cells {
        [first, second, ..] if coord(first) == coord(second) => vec![coord(first)],
        _ => {
            let mut axis: Vec<usize> = cells.iter().map(coord).collect();
            axis.sort_unstable();
            axis
        }
    }
}
