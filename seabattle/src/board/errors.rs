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
//! Errors raised while decoding cells and generating fleets.

use thiserror::Error;

/// Error returned when a string is not a valid `"{x}-{y}"` cell hash.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("invalid cell hash {input:?}, expected \"<x>-<y>\"")]
pub struct ParseCellError {
    /// The string that failed to decode.
    input: String,
}

impl ParseCellError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The string that failed to decode.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Error returned when the fleet generator could not place a ship.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("failed to place ship of size {size} after {attempts} attempts")]
pub struct GenerationError {
    /// Size of the ship that could not be placed.
    size: usize,
    /// Number of anchors that were tried before giving up.
    attempts: usize,
}

impl GenerationError {
    pub(crate) fn new(size: usize, attempts: usize) -> Self {
        Self { size, attempts }
    }

    /// Size of the ship that could not be placed.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of attempts made before generation was aborted.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}
