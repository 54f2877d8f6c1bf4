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

//! Error types for boundary input.
//!
//! Engine operations are infallible; these errors only arise when user
//! input is turned into commands.

use thiserror::Error;

/// Input parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TallyError {
    /// Numeric input that is not one of the offered banknotes
    #[error("unrecognized denomination: {0}")]
    UnrecognizedDenomination(u32),

    /// Mode token other than add/subtract
    #[error("unknown mode: {0}")]
    UnknownMode(String),

    /// Token that maps to no command
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Report format other than text/csv
    #[error("unknown report format: {0}")]
    UnknownReportFormat(String),
}
