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
//! Board model and combat resolution for the classic sea battle game: a 10x10 board per
//! player, a fixed fleet of ten straight ships that never touch, and alternating shots
//! until one fleet is gone.
//!
//! [`board`] holds cell addressing, geometry queries, random fleet placement and the
//! tile view used by front ends. [`ships`] projects the fired-upon cells onto each ship
//! and decides what is destroyed. [`game`] wraps those pure functions in a reducer and a
//! store that owns both players' boards.

pub mod board;
pub mod game;
pub mod ships;

pub use crate::{
    board::{
        cell::{Cell, CellHash},
        setup::generate,
        GenerationError, ParseCellError, BOARD_SIZE,
    },
    ships::{
        apply_hits, check_hit, is_destroyed, is_fleet_destroyed, Ship, ShipPosition, FLEET_SIZES,
    },
};
