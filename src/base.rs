// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Core value types: banknote denominations and the operation mode.

use crate::TallyError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A banknote value in whole currency units.
///
/// Wraps a `u32`. The engine accepts any value; only the boundary layer
/// restricts input to [`EURO_BANKNOTES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Denomination(pub u32);

/// The recognized banknotes, in the order they are offered to the user.
pub const EURO_BANKNOTES: [Denomination; 7] = [
    Denomination(5),
    Denomination(10),
    Denomination(20),
    Denomination(50),
    Denomination(100),
    Denomination(200),
    Denomination(500),
];

impl Denomination {
    /// Returns the face value as a [`Decimal`].
    pub fn value(&self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Returns `true` if this value is one of [`EURO_BANKNOTES`].
    pub fn is_recognized(&self) -> bool {
        EURO_BANKNOTES.contains(self)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sign applied to the next denomination action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Add,
    Subtract,
}

impl Mode {
    /// `+1` for [`Mode::Add`], `-1` for [`Mode::Subtract`].
    pub fn sign(&self) -> i64 {
        match self {
            Self::Add => 1,
            Self::Subtract => -1,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Subtract => f.write_str("subtract"),
        }
    }
}

impl FromStr for Mode {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+" | "add" => Ok(Self::Add),
            "-" | "sub" | "subtract" => Ok(Self::Subtract),
            other => Err(TallyError::UnknownMode(other.to_string())),
        }
    }
}
