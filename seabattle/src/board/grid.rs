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
//! Per-cell view of a board for front ends: every cell classified by what a player
//! would see there.
use std::{
    borrow::Borrow,
    ops::{Index, IndexMut},
};

use crate::{
    board::{cell::Cell, in_bounds, BOARD_SIZE},
    ships::{apply_hits, ShipPosition},
};

/// What is shown on a single cell of the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TileKind {
    /// Not fired upon, no ship.
    Untouched,
    /// Not fired upon, occupied by a ship.
    UntouchedOccupied,
    /// Fired upon and empty, or revealed empty around a sunk ship.
    Missed,
    /// Part of a ship that was hit but is still afloat.
    Damaged,
    /// Part of a sunk ship.
    Destroyed,
}

impl TileKind {
    /// Whether a shot may still be fired at this tile.
    pub fn is_fireable(self) -> bool {
        match self {
            TileKind::Untouched | TileKind::UntouchedOccupied => true,
            _ => false,
        }
    }
}

impl Default for TileKind {
    fn default() -> Self {
        TileKind::Untouched
    }
}

/// Classified tiles for a full board.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tiles {
    /// Row-major tiles.
    tiles: Box<[TileKind]>,
}

impl Tiles {
    /// A board where nothing has happened yet.
    pub fn new() -> Self {
        Self {
            tiles: vec![TileKind::default(); BOARD_SIZE * BOARD_SIZE].into_boxed_slice(),
        }
    }

    /// Classify every cell given a fleet and the cells fired at it. Fired cells off the
    /// board are ignored.
    pub fn classify(fleet: &[ShipPosition], fired: &[Cell]) -> Self {
        let mut tiles = Self::new();
        for cell in fleet.iter().flat_map(|ship| ship.cells()) {
            if let Some(tile) = tiles.get_mut(cell) {
                *tile = TileKind::UntouchedOccupied;
            }
        }
        for cell in fired {
            if let Some(tile) = tiles.get_mut(cell) {
                if *tile == TileKind::Untouched {
                    *tile = TileKind::Missed;
                }
            }
        }
        for ship in apply_hits(fleet, fired) {
            if ship.is_destroyed() {
                for cell in ship.cells() {
                    tiles.set(cell, TileKind::Destroyed);
                }
                for cell in ship.neighbor_cells(1) {
                    tiles.set(cell, TileKind::Missed);
                }
            } else {
                for &cell in ship.hits() {
                    tiles.set(cell, TileKind::Damaged);
                }
            }
        }
        tiles
    }

    /// Copy of these tiles with ships that were never hit shown as empty water.
    pub fn hide_ships(&self) -> Self {
        Self {
            tiles: self
                .tiles
                .iter()
                .map(|&tile| match tile {
                    TileKind::UntouchedOccupied => TileKind::Untouched,
                    other => other,
                })
                .collect(),
        }
    }

    /// Get the tile at the given [`Cell`], or `None` if it is off the board.
    pub fn get<B: Borrow<Cell>>(&self, cell: B) -> Option<TileKind> {
        linearize(cell.borrow()).map(|i| self.tiles[i])
    }

    /// Get a mutable reference to the tile at the given [`Cell`].
    fn get_mut<B: Borrow<Cell>>(&mut self, cell: B) -> Option<&mut TileKind> {
        linearize(cell.borrow()).and_then(move |i| self.tiles.get_mut(i))
    }

    /// Set the tile at the given [`Cell`] if it is on the board.
    fn set(&mut self, cell: Cell, kind: TileKind) {
        if let Some(tile) = self.get_mut(cell) {
            *tile = kind;
        }
    }

    /// Get an iterator over rows of tiles, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> {
        self.tiles.chunks(BOARD_SIZE)
    }
}

impl Default for Tiles {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Borrow<Cell>> Index<B> for Tiles {
    type Output = TileKind;

    fn index(&self, cell: B) -> &Self::Output {
        match linearize(cell.borrow()) {
            Some(i) => &self.tiles[i],
            None => panic!("{:?} is out of bounds", cell.borrow()),
        }
    }
}

impl<B: Borrow<Cell>> IndexMut<B> for Tiles {
    fn index_mut(&mut self, cell: B) -> &mut Self::Output {
        match linearize(cell.borrow()) {
            Some(i) => &mut self.tiles[i],
            None => panic!("{:?} is out of bounds", cell.borrow()),
        }
    }
}

/// Convert a cell to a row-major index, or `None` if it is off the board.
fn linearize(cell: &Cell) -> Option<usize> {
    if in_bounds(cell) {
        Some(cell.y * BOARD_SIZE + cell.x)
    } else {
        None
    }
}
