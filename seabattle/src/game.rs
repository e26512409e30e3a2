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
//! Implementation of the game as whole.
//!
//! [`state`] is a pure reducer over both players' boards: every change is an [`Action`]
//! applied to a [`GameState`] to get the next one. A shot is two actions in a row,
//! recording the hit and then evaluating it.
//!
//! [`store`] holds the latest state, notifies subscribers after every accepted action,
//! and offers the calls a front end needs: start a game, fire, start over.

pub use self::{
    errors::{ActionError, CannotActReason, GameError},
    state::{reduce, Action, GameState, Phase, Player, PlayerBoard, Shot, ShotOutcome},
    store::Store,
};

mod errors;
pub mod state;
pub mod store;
