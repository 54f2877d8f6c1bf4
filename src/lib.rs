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

//! # Banknote Tally
//!
//! This library keeps a running total of banknotes added to or taken out of
//! a pile, together with how many notes of each denomination make up that
//! total.
//!
//! ## Core Components
//!
//! - [`TallyEngine`]: Running total, operation mode and per-denomination usage
//! - [`build_report`]: Breakdown of positively used denominations, largest first
//! - [`Session`]: Lock-guarded engine that notifies subscribers of changes
//! - [`Command`]: User input parsed and checked against [`EURO_BANKNOTES`]
//! - [`TallyError`]: Error types for rejected input
//!
//! ## Example
//!
//! ```
//! use banknote_tally::{Denomination, Mode, TallyEngine, build_report};
//! use rust_decimal_macros::dec;
//!
//! let mut engine = TallyEngine::new();
//! engine.apply(Denomination(50));
//! engine.apply(Denomination(20));
//! engine.set_mode(Mode::Subtract);
//! engine.apply(Denomination(20));
//! assert_eq!(engine.total(), dec!(50.00));
//!
//! let snapshot = engine.snapshot();
//! let report = build_report(snapshot.usage, snapshot.total);
//! assert_eq!(report.lines().len(), 1);
//! ```

mod base;
pub mod command;
mod engine;
pub mod error;
pub mod report;
mod session;

pub use base::{Denomination, EURO_BANKNOTES, Mode};
pub use command::Command;
pub use engine::{TallyEngine, TallySnapshot, Usage, usage_sum};
pub use error::TallyError;
pub use report::{Report, ReportFormat, ReportLine, build_report};
pub use session::{Session, TallyEvent};
