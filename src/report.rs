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

//! Usage report.
//!
//! A [`Report`] is a read-only projection of a [`TallySnapshot`]: the
//! denominations with a strictly positive net count, largest first.
//!
//! # Example
//!
//! ```
//! use banknote_tally::{Denomination, TallyEngine, build_report};
//!
//! let mut engine = TallyEngine::new();
//! engine.apply(Denomination(5));
//! engine.apply(Denomination(5));
//! engine.apply(Denomination(20));
//!
//! let snapshot = engine.snapshot();
//! let report = build_report(snapshot.usage, snapshot.total);
//! let lines: Vec<_> = report.lines().iter().map(|l| (l.denomination.0, l.count)).collect();
//! assert_eq!(lines, vec![(20, 1), (5, 2)]);
//! ```

use crate::TallyError;
use crate::base::Denomination;
use crate::engine::{TallySnapshot, Usage};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One row of the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub denomination: Denomination,
    pub count: u64,
}

/// Denomination breakdown with the total it was taken at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    lines: Vec<ReportLine>,
    total: Decimal,
}

impl Report {
    /// Lines in descending denomination order.
    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// `true` when no denomination has positive net usage.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Builds a report from a usage mapping and total.
///
/// Entries with a net count of zero or below are dropped, even if the
/// denomination was applied at some point.
pub fn build_report(usage: Usage, total: Decimal) -> Report {
    let mut lines: Vec<ReportLine> = usage
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(denomination, count)| ReportLine {
            denomination,
            count: count.unsigned_abs(),
        })
        .collect();
    lines.sort_by(|a, b| b.denomination.cmp(&a.denomination));

    tracing::trace!(lines = lines.len(), total = %total, "built report");
    Report { lines, total }
}

impl From<TallySnapshot> for Report {
    fn from(snapshot: TallySnapshot) -> Self {
        build_report(snapshot.usage, snapshot.total)
    }
}

impl From<&TallySnapshot> for Report {
    fn from(snapshot: &TallySnapshot) -> Self {
        build_report(snapshot.usage.clone(), snapshot.total)
    }
}

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Csv => f.write_str("csv"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            other => Err(TallyError::UnknownReportFormat(other.to_string())),
        }
    }
}
