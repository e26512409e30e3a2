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
//! Types that make up the game board.

pub use self::{
    errors::{GenerationError, ParseCellError},
    geometry::{neighbors_in_direction, Direction},
    grid::{TileKind, Tiles},
};

pub mod cell;
mod errors;
pub mod geometry;
mod grid;
pub mod setup;

use self::cell::Cell;

/// Width and height of every board.
pub const BOARD_SIZE: usize = 10;

/// Check whether the given [`Cell`] lies on the board.
#[inline]
pub fn in_bounds(cell: &Cell) -> bool {
    cell.x < BOARD_SIZE && cell.y < BOARD_SIZE
}

/// Get an iterator over rows of the board. Each row is an iterator over the cells of
/// that row.
pub fn iter_rows() -> impl Iterator<Item = impl Iterator<Item = Cell>> {
    (0..BOARD_SIZE).map(|y| (0..BOARD_SIZE).map(move |x| Cell { x, y }))
}
