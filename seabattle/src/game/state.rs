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
//! Pure game state transitions for two players.
use log::trace;

use crate::{
    board::{cell::Cell, in_bounds, Tiles},
    game::errors::{ActionError, CannotActReason},
    ships::{apply_hits, find_ship, is_fleet_destroyed, Ship, ShipPosition},
};

/// Player ID. Either `P1` or `P2`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    /// Both players, in seat order.
    pub const ALL: [Player; 2] = [Player::P1, Player::P2];

    /// Get the opponent of this player.
    pub fn opponent(self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }
}

/// One player's side of the game: their fleet and every cell the opponent fired at.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PlayerBoard {
    ships_positions: Vec<ShipPosition>,
    hits_positions: Vec<Cell>,
    is_initialized: bool,
}

impl PlayerBoard {
    /// The player's fleet. Empty until initialized.
    pub fn ships_positions(&self) -> &[ShipPosition] {
        &self.ships_positions
    }

    /// Cells fired at on this board, oldest first.
    pub fn hits_positions(&self) -> &[Cell] {
        &self.hits_positions
    }

    /// Whether a fleet has been placed on this board.
    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    /// The fleet with the hits it has taken.
    pub fn ships(&self) -> Vec<Ship> {
        apply_hits(&self.ships_positions, &self.hits_positions)
    }

    /// Returns true if the board has a fleet and all of it is destroyed.
    pub fn defeated(&self) -> bool {
        self.is_initialized && is_fleet_destroyed(&self.ships())
    }

    /// Classified tiles of this board, with every ship visible.
    pub fn tiles(&self) -> Tiles {
        Tiles::classify(&self.ships_positions, &self.hits_positions)
    }
}

/// Stage of the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// Waiting for both fleets.
    Setup,
    /// Players are taking turns.
    InProgress,
    /// One fleet is destroyed.
    Over { winner: Player },
    /// A fleet could not be generated. The game cannot start until a new game is begun.
    Failed,
}

/// A shot that was recorded and not yet evaluated.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Shot {
    pub shooter: Player,
    pub target: Player,
    pub cell: Cell,
}

/// Outcome of an evaluated shot. Ships are identified by their index in the target's
/// fleet.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// Nothing was hit. The turn passes to the target.
    Miss,
    /// The ship was hit but it was not sunk. The shooter fires again.
    Hit(usize),
    /// The ship was sunk but the target still has other ships. The shooter fires again.
    Sunk(usize),
    /// The ship was sunk and the target has no remaining ships.
    Victory(usize),
}

impl ShotOutcome {
    /// Get the index of the ship that was hit.
    pub fn ship(self) -> Option<usize> {
        match self {
            ShotOutcome::Miss => None,
            ShotOutcome::Hit(idx) | ShotOutcome::Sunk(idx) | ShotOutcome::Victory(idx) => {
                Some(idx)
            }
        }
    }
}

/// Full state of a two-player game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    /// Boards indexed by player.
    boards: [PlayerBoard; 2],
    /// Player who fires first in every new game.
    first: Player,
    /// Player whose turn it currently is.
    current: Player,
    phase: Phase,
    /// Shot recorded by the last `RecordHit`, until `EvaluateShot` consumes it.
    pending: Option<Shot>,
    /// Outcome of the last evaluated shot.
    last_outcome: Option<ShotOutcome>,
}

impl GameState {
    /// A fresh game with empty boards where `first` fires first.
    pub fn new(first: Player) -> Self {
        Self {
            boards: Default::default(),
            first,
            current: first,
            phase: Phase::Setup,
            pending: None,
            last_outcome: None,
        }
    }

    /// Get the board of the specified player.
    pub fn board(&self, player: Player) -> &PlayerBoard {
        &self.boards[player.index()]
    }

    /// Get the player whose turn it currently is.
    pub fn current(&self) -> Player {
        self.current
    }

    /// Player who fires first.
    pub fn first(&self) -> Player {
        self.first
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Get the winner if the game is over.
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::Over { winner } => Some(winner),
            _ => None,
        }
    }

    /// The shot waiting to be evaluated, if any.
    pub fn pending(&self) -> Option<&Shot> {
        self.pending.as_ref()
    }

    /// Outcome of the most recently evaluated shot.
    pub fn last_outcome(&self) -> Option<ShotOutcome> {
        self.last_outcome
    }

    fn board_mut(&mut self, player: Player) -> &mut PlayerBoard {
        &mut self.boards[player.index()]
    }
}

/// A change to the game state.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Action {
    /// Install a generated fleet. Ignored if the player already has one.
    PlaceFleet {
        player: Player,
        fleet: Vec<ShipPosition>,
    },
    /// Fleet generation failed; the game cannot start.
    GenerationFailed,
    /// The current player fires at `cell` on `target`'s board.
    RecordHit { target: Player, cell: Cell },
    /// Resolve the recorded shot: pass the turn on a miss, end the game on victory.
    EvaluateShot,
    /// Throw away everything and return to setup.
    NewGame,
}

/// Apply `action` to `state`, producing the next state. `state` is never modified.
pub fn reduce(state: &GameState, action: Action) -> Result<GameState, ActionError> {
    fn reject(reason: CannotActReason, action: Action) -> Result<GameState, ActionError> {
        Err(ActionError::new(reason, action))
    }

    trace!("reducing {:?} in phase {:?}", action, state.phase);
    let mut next = state.clone();
    match action {
        Action::PlaceFleet { player, fleet } => {
            if state.phase != Phase::Setup {
                return reject(CannotActReason::SetupOver, Action::PlaceFleet { player, fleet });
            }
            let board = next.board_mut(player);
            if !board.is_initialized {
                board.ships_positions = fleet;
                board.is_initialized = true;
            }
            if next.boards.iter().all(|board| board.is_initialized) {
                next.phase = Phase::InProgress;
            }
        }
        Action::GenerationFailed => {
            if state.phase != Phase::Setup {
                return reject(CannotActReason::SetupOver, action);
            }
            next.phase = Phase::Failed;
        }
        Action::RecordHit { target, cell } => {
            let reason = match state.phase {
                Phase::Setup | Phase::Failed => Some(CannotActReason::NotStarted),
                Phase::Over { .. } => Some(CannotActReason::AlreadyOver),
                Phase::InProgress if state.pending.is_some() => Some(CannotActReason::ShotPending),
                Phase::InProgress if target == state.current => Some(CannotActReason::OutOfTurn),
                Phase::InProgress if !in_bounds(&cell) => Some(CannotActReason::OutOfBounds),
                Phase::InProgress if state.board(target).hits_positions.contains(&cell) => {
                    Some(CannotActReason::AlreadyShot)
                }
                Phase::InProgress => None,
            };
            if let Some(reason) = reason {
                return reject(reason, action);
            }
            next.board_mut(target).hits_positions.push(cell);
            next.pending = Some(Shot {
                shooter: state.current,
                target,
                cell,
            });
            next.last_outcome = None;
        }
        Action::EvaluateShot => {
            let shot = match state.pending {
                Some(shot) => shot,
                None => return reject(CannotActReason::NoPendingShot, action),
            };
            let board = next.board(shot.target);
            let outcome = match find_ship(&board.ships_positions, &shot.cell) {
                None => ShotOutcome::Miss,
                Some(idx) => {
                    let ships = board.ships();
                    if is_fleet_destroyed(&ships) {
                        ShotOutcome::Victory(idx)
                    } else if ships[idx].is_destroyed() {
                        ShotOutcome::Sunk(idx)
                    } else {
                        ShotOutcome::Hit(idx)
                    }
                }
            };
            match outcome {
                ShotOutcome::Miss => next.current = shot.target,
                ShotOutcome::Victory(_) => {
                    next.phase = Phase::Over {
                        winner: shot.shooter,
                    }
                }
                ShotOutcome::Hit(_) | ShotOutcome::Sunk(_) => {}
            }
            next.pending = None;
            next.last_outcome = Some(outcome);
        }
        Action::NewGame => next = GameState::new(state.first),
    }
    Ok(next)
}
