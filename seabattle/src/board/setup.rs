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
//! Random placement of a full fleet. Ships are straight, stay on the board, and never
//! touch each other, not even at a corner.
use std::collections::BTreeSet;

use log::{debug, warn};
use once_cell::sync::Lazy;
use rand::{rngs::OsRng, Rng};

use crate::{
    board::{
        cell::Cell,
        errors::GenerationError,
        geometry::{neighbors, neighbors_in_direction, Direction},
        BOARD_SIZE,
    },
    ships::{ShipPosition, FLEET_SIZES},
};

/// Number of anchors tried for a single ship before generation is abandoned.
pub const MAX_ATTEMPTS: usize = 10_000;

/// Every cell of the board, `x`-major.
static BOARD_CELLS: Lazy<Vec<Cell>> = Lazy::new(|| {
    (0..BOARD_SIZE)
        .flat_map(|x| (0..BOARD_SIZE).map(move |y| Cell { x, y }))
        .collect()
});

/// Generate a fleet using the operating system's cryptographically secure generator.
pub fn generate() -> Result<Vec<ShipPosition>, GenerationError> {
    generate_with(&mut OsRng)
}

/// Generate a fleet drawing every random choice from `rng`. The caller never receives a
/// partial fleet: if any ship cannot be placed the whole generation fails.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Result<Vec<ShipPosition>, GenerationError> {
    let mut setup = FleetSetup::new();
    for &size in FLEET_SIZES.iter() {
        setup.place(size, rng)?;
    }
    Ok(setup.finish())
}

/// Placement phase of a single board. Tracks which cells may still hold a ship.
#[derive(Debug, Clone)]
pub struct FleetSetup {
    /// Cells that are neither occupied nor next to an occupied cell. Ordered so that a
    /// given random stream always produces the same fleet.
    available: BTreeSet<Cell>,

    /// Ships placed so far, in placement order.
    ships: Vec<ShipPosition>,
}

impl FleetSetup {
    /// Begin placement on an empty board.
    pub fn new() -> Self {
        Self {
            available: BOARD_CELLS.iter().copied().collect(),
            ships: Vec::new(),
        }
    }

    /// Returns true if a ship may still use this cell.
    pub fn is_available(&self, cell: &Cell) -> bool {
        self.available.contains(cell)
    }

    /// Number of cells a ship may still use.
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Ships placed so far.
    pub fn ships(&self) -> &[ShipPosition] {
        &self.ships
    }

    /// Place a ship of the given size at a random valid position, then block its cells
    /// and the ring around them for every later ship. A ship of size 0 cannot be placed.
    pub fn place<R: Rng + ?Sized>(
        &mut self,
        size: usize,
        rng: &mut R,
    ) -> Result<&ShipPosition, GenerationError> {
        if size == 0 {
            return Err(GenerationError::new(size, 0));
        }
        let cells = self.choose_cells(size, rng)?;
        self.occupy(&cells);
        let position = ShipPosition::from_cells(&cells);
        debug!("placed ship of size {} at {:?}", size, position);
        self.ships.push(position);
        Ok(&self.ships[self.ships.len() - 1])
    }

    /// Consume the setup, returning the placed ships.
    pub fn finish(self) -> Vec<ShipPosition> {
        self.ships
    }

    /// Pick an anchor and a direction with room for the rest of the ship, retrying with
    /// a fresh anchor until one fits or the attempts run out.
    fn choose_cells<R: Rng + ?Sized>(
        &self,
        size: usize,
        rng: &mut R,
    ) -> Result<Vec<Cell>, GenerationError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let anchor = match self.random_available(rng) {
                Some(anchor) => anchor,
                None => {
                    warn!("no free cell left for ship of size {}", size);
                    return Err(GenerationError::new(size, attempt));
                }
            };
            if size == 1 {
                return Ok(vec![anchor]);
            }
            let mut runs: Vec<Vec<Cell>> = Direction::iter(Direction::axes())
                .filter_map(|dir| self.free_run(anchor, dir, size - 1))
                .collect();
            if !runs.is_empty() {
                let run = runs.swap_remove(rng.gen_range(0, runs.len()));
                if attempt > 1 {
                    debug!("ship of size {} fit after {} attempts", size, attempt);
                }
                let mut cells = Vec::with_capacity(size);
                cells.push(anchor);
                cells.extend(run);
                return Ok(cells);
            }
        }
        warn!(
            "giving up on ship of size {} after {} attempts",
            size, MAX_ATTEMPTS
        );
        Err(GenerationError::new(size, MAX_ATTEMPTS))
    }

    /// Uniformly pick one of the available cells.
    fn random_available<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        if self.available.is_empty() {
            None
        } else {
            let idx = rng.gen_range(0, self.available.len());
            self.available.iter().nth(idx).copied()
        }
    }

    /// The `len` cells next to `anchor` in `dir`, if every one of them is on the board
    /// and available.
    fn free_run(&self, anchor: Cell, dir: Direction, len: usize) -> Option<Vec<Cell>> {
        let run: Vec<Cell> = neighbors_in_direction(anchor, dir, len).collect();
        if run.len() == len && run.iter().all(|cell| self.is_available(cell)) {
            Some(run)
        } else {
            None
        }
    }

    /// Mark the cells and everything touching them as unavailable.
    fn occupy(&mut self, cells: &[Cell]) {
        for &cell in cells {
            self.available.remove(&cell);
            for neighbor in neighbors(cell, Direction::all(), 1) {
                self.available.remove(&neighbor);
            }
        }
    }
}

impl Default for FleetSetup {
    fn default() -> Self {
        Self::new()
    }
}
