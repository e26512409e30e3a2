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
//! Neighbor queries on the board. Everything here clips to the board, so callers never
//! see a cell outside `[0, BOARD_SIZE)` from a query that walks away from its input.
use std::collections::HashSet;

use enumflags2::BitFlags;

use crate::{
    board::{cell::Cell, in_bounds, BOARD_SIZE},
    ships::ShipPosition,
};

/// Direction to look for neighbors in. `Diagonal` covers all four diagonal corners at
/// once.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Direction {
    /// Decreasing `y`.
    Top = 0b00001,
    /// Increasing `y`.
    Bottom = 0b00010,
    /// Decreasing `x`.
    Left = 0b00100,
    /// Increasing `x`.
    Right = 0b01000,
    /// All four diagonal corners.
    Diagonal = 0b10000,
}

impl Direction {
    /// Every direction in a fixed order.
    pub const ALL: [Direction; 5] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
        Direction::Diagonal,
    ];

    /// All directions, orthogonal and diagonal. Together they cover the eight cells
    /// around a cell at each distance.
    pub fn all() -> BitFlags<Direction> {
        BitFlags::all()
    }

    /// The four directions a ship can extend in from its anchor.
    pub fn axes() -> BitFlags<Direction> {
        Direction::Top | Direction::Bottom | Direction::Left | Direction::Right
    }

    /// Iterate the directions present in `flags`, in the order of [`Direction::ALL`].
    pub fn iter(flags: BitFlags<Direction>) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(move |dir| flags.contains(*dir))
    }

    /// Unit steps taken by this direction at distance 1.
    fn steps(self) -> &'static [(isize, isize)] {
        match self {
            Direction::Top => &[(0, -1)],
            Direction::Bottom => &[(0, 1)],
            Direction::Left => &[(-1, 0)],
            Direction::Right => &[(1, 0)],
            Direction::Diagonal => &[(-1, -1), (1, 1), (-1, 1), (1, -1)],
        }
    }
}

/// Iterator over the neighbors of a cell in one direction, nearest first. Stops early once
/// every step has moved away from the board for good, so any `count` is cheap.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    cell: Cell,
    steps: &'static [(isize, isize)],
    count: usize,
    dist: usize,
    step: usize,
    /// Whether any step at the current distance may still reach the board later.
    approaching: bool,
}

impl Iterator for NeighborIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        loop {
            if self.dist > self.count {
                return None;
            }
            if self.step >= self.steps.len() {
                if !self.approaching {
                    return None;
                }
                self.step = 0;
                self.approaching = false;
                self.dist = self.dist.checked_add(1)?;
                continue;
            }
            let (dx, dy) = self.steps[self.step];
            self.step += 1;
            match offset(self.cell, dx, dy, self.dist) {
                Offset::OnBoard(cell) => {
                    self.approaching = true;
                    return Some(cell);
                }
                Offset::OffBoard => self.approaching = true,
                Offset::Gone => {}
            }
        }
    }
}

/// Where a step lands.
enum Offset {
    OnBoard(Cell),
    /// Off the board, but a longer step in the same direction may land on it.
    OffBoard,
    /// Off the board, and every longer step in the same direction is too.
    Gone,
}

/// Move `dist` steps of `(dx, dy)` from `cell`.
fn offset(cell: Cell, dx: isize, dy: isize, dist: usize) -> Offset {
    let shift = |v: usize, d: isize| match d {
        d if d < 0 => v.checked_sub(dist),
        d if d > 0 => v.checked_add(dist).filter(|&v| v < BOARD_SIZE),
        _ => Some(v).filter(|&v| v < BOARD_SIZE),
    };
    match (shift(cell.x, dx), shift(cell.y, dy)) {
        (Some(x), Some(y)) => {
            let moved = Cell { x, y };
            if in_bounds(&moved) {
                Offset::OnBoard(moved)
            } else {
                Offset::OffBoard
            }
        }
        _ => Offset::Gone,
    }
}

/// Get the cells at distance `1..=count` from `cell` in the given direction, dropping any
/// that fall off the board. `Diagonal` yields up to four cells per distance.
pub fn neighbors_in_direction(cell: Cell, direction: Direction, count: usize) -> NeighborIter {
    NeighborIter {
        cell,
        steps: direction.steps(),
        count,
        dist: 1,
        step: 0,
        approaching: false,
    }
}

/// Get the neighbors of `cell` in every direction of `directions`, up to `count` away.
/// May contain the same cell only if `directions` overlap, which they never do.
pub fn neighbors(
    cell: Cell,
    directions: BitFlags<Direction>,
    count: usize,
) -> impl Iterator<Item = Cell> {
    Direction::iter(directions).flat_map(move |dir| neighbors_in_direction(cell, dir, count))
}

/// Cells occupied by a ship: every `x` paired with every `y`, `x`-major. Duplicated axis
/// entries are passed through as duplicated cells, and nothing is bounds checked.
pub fn ship_occupied_cells(position: &ShipPosition) -> Vec<Cell> {
    position
        .x()
        .iter()
        .flat_map(|&x| position.y().iter().map(move |&y| Cell { x, y }))
        .collect()
}

/// Unique cells within `ring` of any occupied cell of the ship, excluding the ship's own
/// cells. Order follows the occupied cells, then [`Direction::ALL`], then distance.
pub fn ship_neighbor_cells(position: &ShipPosition, ring: usize) -> Vec<Cell> {
    let occupied = ship_occupied_cells(position);
    let mut seen: HashSet<Cell> = occupied.iter().copied().collect();
    occupied
        .iter()
        .flat_map(|&cell| neighbors(cell, Direction::all(), ring))
        .filter(|cell| seen.insert(*cell))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(cell: (usize, usize), dir: Direction, count: usize) -> Vec<(usize, usize)> {
        neighbors_in_direction(cell.into(), dir, count)
            .map(Into::into)
            .collect()
    }

    #[test]
    fn orthogonal_neighbors() {
        assert_eq!(collect((5, 5), Direction::Top, 3), vec![(5, 4), (5, 3), (5, 2)]);
        assert_eq!(collect((5, 5), Direction::Bottom, 2), vec![(5, 6), (5, 7)]);
        assert_eq!(collect((5, 5), Direction::Left, 1), vec![(4, 5)]);
        assert_eq!(collect((5, 5), Direction::Right, 4), vec![(6, 5), (7, 5), (8, 5), (9, 5)]);
    }

    #[test]
    fn diagonal_neighbors() {
        assert_eq!(
            collect((5, 5), Direction::Diagonal, 1),
            vec![(4, 4), (6, 6), (4, 6), (6, 4)]
        );
        assert_eq!(collect((5, 5), Direction::Diagonal, 2).len(), 8);
    }

    #[test]
    fn clipped_at_edges() {
        assert_eq!(collect((0, 0), Direction::Top, 3), vec![]);
        assert_eq!(collect((0, 0), Direction::Left, 3), vec![]);
        assert_eq!(collect((0, 0), Direction::Diagonal, 2), vec![(1, 1), (2, 2)]);
        assert_eq!(collect((8, 1), Direction::Right, 3), vec![(9, 1)]);
        assert_eq!(collect((9, 9), Direction::Diagonal, 1), vec![(8, 8)]);
        // Cells off the board still only produce on-board neighbors.
        assert_eq!(collect((11, 5), Direction::Left, 2), vec![(9, 5)]);
    }

    #[test]
    fn zero_count_is_empty() {
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                for &dir in Direction::ALL.iter() {
                    assert!(collect((x, y), dir, 0).is_empty());
                }
            }
        }
    }

    #[test]
    fn huge_counts_stop_at_the_edge() {
        let far = usize::max_value();
        assert_eq!(
            collect((5, 5), Direction::Top, far),
            vec![(5, 4), (5, 3), (5, 2), (5, 1), (5, 0)]
        );
        assert_eq!(collect((9, 9), Direction::Right, far), vec![]);
        assert_eq!(collect((5, 5), Direction::Diagonal, far).len(), 17);
        assert_eq!(
            collect((11, 5), Direction::Left, far),
            (0..BOARD_SIZE).rev().map(|x| (x, 5)).collect::<Vec<_>>()
        );
        assert!(collect((far, far), Direction::Bottom, far).is_empty());
    }

    #[test]
    fn neighbors_stay_on_board() {
        for x in 0..BOARD_SIZE + 2 {
            for y in 0..BOARD_SIZE + 2 {
                for &dir in Direction::ALL.iter() {
                    for count in 0..5 {
                        let found = collect((x, y), dir, count);
                        let bound = if dir == Direction::Diagonal { 4 * count } else { count };
                        assert!(found.len() <= bound);
                        assert!(found.iter().all(|&(x, y)| x < BOARD_SIZE && y < BOARD_SIZE));
                    }
                }
            }
        }
    }

    #[test]
    fn axes_exclude_diagonal() {
        let axes: Vec<_> = Direction::iter(Direction::axes()).collect();
        assert_eq!(
            axes,
            vec![Direction::Top, Direction::Bottom, Direction::Left, Direction::Right]
        );
        assert_eq!(Direction::iter(Direction::all()).count(), 5);
    }

    #[test]
    fn all_directions_ring() {
        let ring: Vec<_> = neighbors(Cell::new(4, 4), Direction::all(), 1).collect();
        assert_eq!(ring.len(), 8);
        assert!(ring.iter().all(|c| c.distance(&Cell::new(4, 4)) == 1));
    }

    #[test]
    fn occupied_cells_are_a_cartesian_product() {
        let line = ShipPosition::new(vec![7], vec![2, 3, 4, 5]);
        let cells: Vec<(usize, usize)> =
            ship_occupied_cells(&line).into_iter().map(Into::into).collect();
        assert_eq!(cells, vec![(7, 2), (7, 3), (7, 4), (7, 5)]);

        let rect = ShipPosition::new(vec![1, 2], vec![3, 4]);
        let cells: Vec<(usize, usize)> =
            ship_occupied_cells(&rect).into_iter().map(Into::into).collect();
        assert_eq!(cells, vec![(1, 3), (1, 4), (2, 3), (2, 4)]);

        let dup = ShipPosition::new(vec![1, 1], vec![3]);
        assert_eq!(ship_occupied_cells(&dup), vec![Cell::new(1, 3), Cell::new(1, 3)]);

        let empty = ShipPosition::new(vec![], vec![3]);
        assert!(ship_occupied_cells(&empty).is_empty());
    }

    #[test]
    fn neighbor_cells_of_a_ship() {
        let single = ShipPosition::new(vec![0], vec![0]);
        let mut halo: Vec<(usize, usize)> = ship_neighbor_cells(&single, 1)
            .into_iter()
            .map(Into::into)
            .collect();
        halo.sort();
        assert_eq!(halo, vec![(0, 1), (1, 0), (1, 1)]);

        let line = ShipPosition::new(vec![2, 3, 4], vec![5]);
        let halo = ship_neighbor_cells(&line, 1);
        // A 3x1 ship in open water has a 5x3 bounding ring minus its own cells.
        assert_eq!(halo.len(), 12);
        let unique: HashSet<_> = halo.iter().collect();
        assert_eq!(unique.len(), halo.len());
        for cell in &halo {
            assert!(!ship_occupied_cells(&line).contains(cell));
        }
    }
}
