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

//! User commands.
//!
//! Turns input tokens into [`Command`]s. This is the only place where
//! denominations are checked against [`EURO_BANKNOTES`]; the engine itself
//! accepts any value.

use crate::TallyError;
use crate::base::{Denomination, EURO_BANKNOTES, Mode};
use crate::session::Session;
use std::str::FromStr;

/// One user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Apply(Denomination),
    SetMode(Mode),
    Reset,
    Report,
    Help,
    Quit,
}

impl Command {
    /// Parses every whitespace-separated token of `line`.
    ///
    /// Each token yields its own result so one bad token does not discard
    /// the rest of the line.
    pub fn parse_line(line: &str) -> impl Iterator<Item = Result<Command, TallyError>> + '_ {
        line.split_whitespace().map(|token| token.parse::<Command>())
    }

    /// Applies state-changing commands to `session`.
    ///
    /// Returns `false` for commands the engine does not handle
    /// (`Report`, `Help`, `Quit`), leaving them to the caller.
    pub fn execute(self, session: &Session) -> bool {
        match self {
            Self::Apply(denomination) => session.apply(denomination),
            Self::SetMode(mode) => session.set_mode(mode),
            Self::Reset => session.reset(),
            Self::Report | Self::Help | Self::Quit => return false,
        }
        true
    }
}

impl FromStr for Command {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        match token.as_str() {
            "ac" | "reset" => return Ok(Self::Reset),
            "report" | "r" => return Ok(Self::Report),
            "help" | "?" => return Ok(Self::Help),
            "quit" | "q" | "exit" => return Ok(Self::Quit),
            _ => {}
        }

        if let Ok(mode) = token.parse::<Mode>() {
            return Ok(Self::SetMode(mode));
        }

        let digits = token.strip_prefix('€').unwrap_or(&token);
        match digits.parse::<u32>() {
            Ok(value) => {
                let denomination = Denomination(value);
                if denomination.is_recognized() {
                    Ok(Self::Apply(denomination))
                } else {
                    Err(TallyError::UnrecognizedDenomination(value))
                }
            }
            Err(_) => Err(TallyError::UnknownCommand(token)),
        }
    }
}

/// One-line summary of the accepted tokens.
pub fn help_text() -> String {
    let notes: Vec<String> = EURO_BANKNOTES.iter().map(|d| d.to_string()).collect();
    format!(
        "notes: {} | mode: + - | reset: ac | report: r | quit: q",
        notes.join(" ")
    )
}
