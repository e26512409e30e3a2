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
//! Holder for the latest [`GameState`] that front ends read from and dispatch to.
use log::{debug, info};
use rand::{rngs::OsRng, Rng};

use crate::{
    board::{cell::Cell, setup::generate_with},
    game::{
        errors::{ActionError, GameError},
        state::{reduce, Action, GameState, Phase, Player, ShotOutcome},
    },
};

/// Callback run after every accepted action.
type Subscriber = Box<dyn FnMut(&GameState)>;

/// Owns the game state. Every change goes through [`reduce`]; subscribers see each new
/// state in order.
pub struct Store {
    state: GameState,
    subscribers: Vec<Subscriber>,
}

impl Store {
    /// Construct a store for a new game where `first` fires first.
    pub fn new(first: Player) -> Self {
        Self {
            state: GameState::new(first),
            subscribers: Vec::new(),
        }
    }

    /// Get the latest state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Register a callback to run after every accepted action.
    pub fn subscribe<F: FnMut(&GameState) + 'static>(&mut self, subscriber: F) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply an action. On success the new state replaces the old one and subscribers are
    /// notified; on failure nothing changes.
    pub fn dispatch(&mut self, action: Action) -> Result<&GameState, ActionError> {
        self.state = reduce(&self.state, action)?;
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
        Ok(&self.state)
    }

    /// Generate fleets for both players with the operating system's secure generator.
    pub fn initialize_ships(&mut self) -> Result<(), GameError> {
        self.initialize_ships_with(&mut OsRng)
    }

    /// Generate a fleet for every player that does not have one yet, drawing from `rng`.
    /// Does nothing once the game has started. If generation fails the game moves to
    /// [`Phase::Failed`] and the error is returned; from then on every call fails with
    /// [`GameError::Failed`] until [`Store::new_game`].
    pub fn initialize_ships_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        match self.state.phase() {
            Phase::Setup => {}
            Phase::Failed => return Err(GameError::Failed),
            Phase::InProgress | Phase::Over { .. } => return Ok(()),
        }
        for &player in Player::ALL.iter() {
            if self.state.board(player).is_initialized() {
                continue;
            }
            match generate_with(rng) {
                Ok(fleet) => {
                    debug!("generated fleet for {:?}", player);
                    self.dispatch(Action::PlaceFleet { player, fleet })?;
                }
                Err(err) => {
                    self.dispatch(Action::GenerationFailed)?;
                    return Err(err.into());
                }
            }
        }
        info!("both fleets placed, {:?} fires first", self.state.current());
        Ok(())
    }

    /// Fire at `cell` on `target`'s board: record the hit, then evaluate it.
    pub fn fire(&mut self, target: Player, cell: Cell) -> Result<ShotOutcome, ActionError> {
        self.dispatch(Action::RecordHit { target, cell })?;
        let state = self.dispatch(Action::EvaluateShot)?;
        match state.last_outcome() {
            Some(outcome) => {
                if let ShotOutcome::Victory(_) = outcome {
                    info!("{:?} won", state.current());
                }
                Ok(outcome)
            }
            // EvaluateShot always records an outcome when it is accepted.
            None => unreachable!(),
        }
    }

    /// Discard the current game and return to setup.
    pub fn new_game(&mut self) -> &GameState {
        // NewGame is accepted in every phase.
        match self.dispatch(Action::NewGame) {
            Ok(state) => state,
            Err(_) => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use rand::{rngs::mock::StepRng, rngs::StdRng, RngCore, SeedableRng};

    use super::*;
    use crate::{
        board::{setup::MAX_ATTEMPTS, TileKind},
        game::errors::CannotActReason,
        ships::FLEET_SIZES,
    };

    /// Random source that makes each `gen_range(0, len)` return a chosen index. The last
    /// pick repeats forever.
    struct Scripted {
        picks: Vec<(u64, u64)>,
        next: usize,
    }

    impl RngCore for Scripted {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            let (idx, len) = self.picks[self.next.min(self.picks.len() - 1)];
            self.next += 1;
            // Smallest value whose widening product with `len` has `idx` as its high word.
            ((((idx as u128) << 64) + len as u128 - 1) / len as u128) as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    /// Places the size 4 ship on row 9 from column 4, a size 3 ship on row 7 from column 4
    /// and another down column 8 from row 5. That walls off (9, 9), and the first size 2
    /// ship keeps drawing it as its anchor.
    fn walled_in_corner() -> Scripted {
        Scripted {
            picks: vec![
                (79, 100),
                (1, 2),
                (45, 88),
                (2, 3),
                (67, 78),
                (0, 1),
                (66, 67),
            ],
            next: 0,
        }
    }

    fn started() -> Store {
        let mut store = Store::new(Player::P1);
        store.initialize_ships_with(&mut StepRng::new(0, 0)).unwrap();
        store
    }

    #[test]
    fn initialization_places_both_fleets() {
        let store = started();
        assert_eq!(store.state().phase(), Phase::InProgress);
        for &player in Player::ALL.iter() {
            let board = store.state().board(player);
            assert!(board.is_initialized());
            assert_eq!(board.ships_positions().len(), FLEET_SIZES.len());
        }
    }

    #[test]
    fn initialization_runs_once() {
        let mut store = started();
        let before = store.state().clone();
        store
            .initialize_ships_with(&mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn generation_failure_stays_visible() {
        let mut store = Store::new(Player::P1);
        match store.initialize_ships_with(&mut walled_in_corner()) {
            Err(GameError::Generation(err)) => {
                assert_eq!(err.size(), 2);
                assert_eq!(err.attempts(), MAX_ATTEMPTS);
            }
            other => panic!("expected a generation error, got {:?}", other),
        }
        assert_eq!(store.state().phase(), Phase::Failed);
        assert!(!store.state().board(Player::P1).is_initialized());

        // Retrying without starting over keeps failing instead of pretending to succeed.
        match store.initialize_ships_with(&mut StepRng::new(0, 0)) {
            Err(GameError::Failed) => {}
            other => panic!("expected the earlier failure, got {:?}", other),
        }
        assert!(!store.state().board(Player::P1).is_initialized());

        store.new_game();
        store.initialize_ships_with(&mut StepRng::new(0, 0)).unwrap();
        assert_eq!(store.state().phase(), Phase::InProgress);
    }

    #[test]
    fn failed_phase_refuses_initialization() {
        let mut store = Store::new(Player::P2);
        store.dispatch(Action::GenerationFailed).unwrap();
        assert!(matches!(
            store.initialize_ships_with(&mut StepRng::new(0, 0)),
            Err(GameError::Failed)
        ));
        assert_eq!(store.state().phase(), Phase::Failed);
    }

    #[test]
    fn subscribers_see_every_transition() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = Store::new(Player::P1);
        let log = Rc::clone(&seen);
        store.subscribe(move |state: &GameState| log.borrow_mut().push(state.phase()));
        store.initialize_ships_with(&mut StepRng::new(0, 0)).unwrap();
        // Record and evaluate are two separate notifications.
        store.fire(Player::P2, Cell::new(9, 0)).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                Phase::Setup,
                Phase::InProgress,
                Phase::InProgress,
                Phase::InProgress
            ]
        );

        // Refused actions notify nobody.
        assert!(store.fire(Player::P2, Cell::new(9, 0)).is_err());
        assert_eq!(seen.borrow().len(), 4);
    }

    #[test]
    fn fire_reports_outcomes() {
        let mut store = started();
        // Both fleets come from the same first-choice source, so their layouts match.
        assert_eq!(store.fire(Player::P2, Cell::new(0, 0)).unwrap(), ShotOutcome::Hit(0));
        assert_eq!(store.state().current(), Player::P1);
        assert_eq!(store.fire(Player::P2, Cell::new(4, 0)).unwrap(), ShotOutcome::Sunk(6));
        assert_eq!(store.fire(Player::P2, Cell::new(9, 9)).unwrap(), ShotOutcome::Miss);
        assert_eq!(store.state().current(), Player::P2);

        // P2 now holds the turn and cannot target their own board.
        let err = store.fire(Player::P2, Cell::new(8, 8)).unwrap_err();
        assert_eq!(err.reason(), CannotActReason::OutOfTurn);

        let tiles = store.state().board(Player::P2).tiles();
        assert_eq!(tiles[Cell::new(0, 0)], TileKind::Damaged);
        assert_eq!(tiles[Cell::new(4, 0)], TileKind::Destroyed);
        assert_eq!(tiles[Cell::new(5, 1)], TileKind::Missed);
        assert_eq!(tiles[Cell::new(9, 9)], TileKind::Missed);
    }

    #[test]
    fn full_game_ends_in_victory() {
        let mut store = started();
        let targets: Vec<Cell> = store
            .state()
            .board(Player::P2)
            .ships_positions()
            .iter()
            .flat_map(|ship| ship.cells())
            .collect();
        let (last, rest) = targets.split_last().unwrap();
        for &cell in rest {
            let outcome = store.fire(Player::P2, cell).unwrap();
            assert!(outcome.ship().is_some());
            assert_eq!(store.state().winner(), None);
        }
        assert_eq!(
            store.fire(Player::P2, *last).unwrap(),
            ShotOutcome::Victory(FLEET_SIZES.len() - 1)
        );
        assert_eq!(store.state().winner(), Some(Player::P1));

        store.new_game();
        assert_eq!(store.state().phase(), Phase::Setup);
        assert_eq!(store.state().current(), Player::P1);
    }
}
