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
use std::fmt::{self, Debug};

use thiserror::Error;

use crate::{board::GenerationError, game::state::Action};

/// Reason why the reducer refused an action.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotActReason {
    /// Fleets are still being placed, or placement failed.
    #[error("the game has not started")]
    NotStarted,
    /// Fleets can only be placed before the game starts.
    #[error("fleet placement is over")]
    SetupOver,
    /// One of the fleets is already destroyed.
    #[error("the game is already over")]
    AlreadyOver,
    /// The target is the player whose turn it is.
    #[error("player attempted to shoot out of turn")]
    OutOfTurn,
    /// The target cell is off the board.
    #[error("the target cell is out of bounds")]
    OutOfBounds,
    /// The target cell was fired at before.
    #[error("the target cell was already shot")]
    AlreadyShot,
    /// A recorded shot has not been evaluated yet.
    #[error("the previous shot has not been evaluated")]
    ShotPending,
    /// There is no recorded shot to evaluate.
    #[error("there is no shot to evaluate")]
    NoPendingShot,
}

/// Error returned when an action cannot be applied to the current state.
#[derive(Error)]
#[error("cannot apply {action:?}: {reason}")]
pub struct ActionError {
    /// Why the action was refused.
    reason: CannotActReason,
    /// The refused action.
    action: Action,
}

impl ActionError {
    pub(super) fn new(reason: CannotActReason, action: Action) -> Self {
        Self { reason, action }
    }

    /// Get the reason the action was refused.
    pub fn reason(&self) -> CannotActReason {
        self.reason
    }

    /// Get the action that was refused.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Extract the refused action.
    pub fn into_action(self) -> Action {
        self.action
    }
}

impl Debug for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Any failure of the [`Store`][crate::game::Store]'s compound operations.
#[derive(Debug, Error)]
pub enum GameError {
    /// A fleet could not be generated, so the game cannot start.
    #[error("could not start game: {0}")]
    Generation(#[from] GenerationError),
    /// An earlier generation failed; the game must be started over with a new game.
    #[error("fleet generation failed earlier, start a new game")]
    Failed,
    /// The reducer refused an action.
    #[error(transparent)]
    Action(#[from] ActionError),
}
