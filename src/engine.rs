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

//! Tally engine.
//!
//! The [`TallyEngine`] holds the running total, the current [`Mode`] and the
//! net usage count of every denomination applied so far.
//!
//! # Operations
//!
//! - **Apply**: add or subtract a denomination, depending on the mode.
//! - **Set mode**: switch between add and subtract.
//! - **Reset**: zero the total, clear usage, return to add mode.
//!
//! The engine is a plain mutable struct. Sharing it between threads or
//! notifying observers is the job of [`Session`](crate::Session).

use crate::base::{Denomination, Mode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Net usage count per denomination, ordered by value.
pub type Usage = BTreeMap<Denomination, i64>;

/// Running total and per-denomination usage.
///
/// # Invariants
///
/// - `total` equals the sum of `value × count` over all usage entries.
/// - Usage entries are created on first use and only removed by [`reset`](Self::reset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyEngine {
    total: Decimal,
    mode: Mode,
    usage: Usage,
}

/// Owned copy of the engine state at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallySnapshot {
    pub total: Decimal,
    pub mode: Mode,
    pub usage: Usage,
}

impl TallyEngine {
    /// Creates an engine with a zero total, empty usage and add mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn usage(&self) -> &Usage {
        &self.usage
    }

    /// Net usage of `denomination`; zero when it was never applied.
    pub fn count(&self, denomination: Denomination) -> i64 {
        self.usage.get(&denomination).copied().unwrap_or(0)
    }

    /// Applies `denomination` with the sign of the current mode.
    ///
    /// Membership in the recognized set is not checked; any value is tracked
    /// as given.
    pub fn apply(&mut self, denomination: Denomination) {
        let sign = self.mode.sign();
        self.total += denomination.value() * Decimal::from(sign);
        *self.usage.entry(denomination).or_insert(0) += sign;

        tracing::debug!(
            denomination = denomination.0,
            mode = %self.mode,
            total = %self.total,
            "applied denomination"
        );
        self.assert_invariants();
    }

    /// Replaces the current mode. Total and usage are untouched.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::debug!(from = %self.mode, to = %mode, "mode changed");
        }
        self.mode = mode;
    }

    /// Returns to the initial state: zero total, add mode, no usage entries.
    pub fn reset(&mut self) {
        tracing::info!(total = %self.total, entries = self.usage.len(), "tally reset");
        self.total = Decimal::ZERO;
        self.mode = Mode::Add;
        self.usage.clear();
    }

    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            total: self.total,
            mode: self.mode,
            usage: self.usage.clone(),
        }
    }

    fn assert_invariants(&self) {
        debug_assert_eq!(
            self.total,
            usage_sum(&self.usage),
            "Invariant violated: total diverged from usage"
        );
    }
}

/// Sum of `value × count` over `usage`.
pub fn usage_sum(usage: &Usage) -> Decimal {
    usage
        .iter()
        .map(|(denomination, count)| denomination.value() * Decimal::from(*count))
        .sum()
}
