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
//! Ships, the hits they have taken, and whether they are still afloat.
use std::collections::HashSet;

use crate::board::cell::Cell;

pub use self::position::ShipPosition;

mod position;

/// Sizes of the ships every fleet is made of, in the order they are placed.
pub const FLEET_SIZES: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// A ship together with the cells of it that have been fired upon. Never stored; always
/// derived from a [`ShipPosition`] and the opponent's fired cells by [`apply_hits`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ship {
    /// Where the ship lies.
    position: ShipPosition,

    /// Occupied cells that have been fired upon, in occupied-cell order.
    hits: Vec<Cell>,
}

impl Ship {
    /// Construct a ship from its position and the cells of it that were hit.
    pub fn new(position: ShipPosition, hits: Vec<Cell>) -> Self {
        Self { position, hits }
    }

    /// Where the ship lies.
    pub fn position(&self) -> &ShipPosition {
        &self.position
    }

    /// Cells of this ship that have been hit.
    pub fn hits(&self) -> &[Cell] {
        &self.hits
    }

    /// Length of the ship.
    pub fn size(&self) -> usize {
        self.position.size()
    }

    /// Cells occupied by this ship.
    pub fn cells(&self) -> Vec<Cell> {
        self.position.cells()
    }

    /// The ring of cells around this ship, revealed once it sinks.
    pub fn neighbor_cells(&self, ring: usize) -> Vec<Cell> {
        self.position.neighbor_cells(ring)
    }

    /// Check if this ship has been destroyed: it has as many distinct hit cells as its
    /// size. Repeated hits on the same cell count once.
    pub fn is_destroyed(&self) -> bool {
        let distinct: HashSet<&Cell> = self.hits.iter().collect();
        distinct.len() == self.size()
    }

    /// Check if this ship has been hit at least once without being destroyed.
    pub fn is_damaged(&self) -> bool {
        !self.hits.is_empty() && !self.is_destroyed()
    }
}

/// Project the fired-upon cells onto each ship of the fleet. The output has one [`Ship`]
/// per input position, in the same order.
pub fn apply_hits(fleet: &[ShipPosition], fired: &[Cell]) -> Vec<Ship> {
    let fired: HashSet<&Cell> = fired.iter().collect();
    fleet
        .iter()
        .map(|position| {
            let hits = position
                .cells()
                .into_iter()
                .filter(|cell| fired.contains(cell))
                .collect();
            Ship::new(position.clone(), hits)
        })
        .collect()
}

/// Check if a ship has been destroyed. See [`Ship::is_destroyed`].
pub fn is_destroyed(ship: &Ship) -> bool {
    ship.is_destroyed()
}

/// Returns true if every ship has been destroyed. An empty fleet counts as destroyed.
pub fn is_fleet_destroyed(ships: &[Ship]) -> bool {
    ships.iter().all(Ship::is_destroyed)
}

/// Whether firing at `cell` hits any ship of the fleet.
pub fn check_hit(fleet: &[ShipPosition], cell: &Cell) -> bool {
    find_ship(fleet, cell).is_some()
}

/// Index of the ship of the fleet occupying `cell`, if any.
pub fn find_ship(fleet: &[ShipPosition], cell: &Cell) -> Option<usize> {
    fleet.iter().position(|ship| ship.contains(cell))
}
