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

//! Shared tally session with change notification.
//!
//! Wraps a [`TallyEngine`] in a [`Mutex`] so that every operation, and every
//! snapshot taken for a report, is atomic. Subscribers receive a
//! [`TallyEvent`] after each completed change over a [`crossbeam`] channel.
//!
//! # Example
//!
//! ```
//! use banknote_tally::{Denomination, Session, TallyEvent};
//! use rust_decimal_macros::dec;
//!
//! let session = Session::new();
//! let events = session.subscribe();
//!
//! session.apply(Denomination(50));
//! assert_eq!(session.total(), dec!(50));
//! assert!(matches!(events.try_recv(), Ok(TallyEvent::Applied { .. })));
//! ```

use crate::base::{Denomination, Mode};
use crate::engine::{TallyEngine, TallySnapshot};
use crate::report::{Report, build_report};
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use rust_decimal::Decimal;

/// Change notification emitted after an operation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyEvent {
    Applied {
        denomination: Denomination,
        mode: Mode,
        total: Decimal,
    },
    ModeChanged {
        mode: Mode,
    },
    Reset,
}

/// Lock-guarded engine plus its subscribers.
#[derive(Debug, Default)]
pub struct Session {
    engine: Mutex<TallyEngine>,
    subscribers: Mutex<Vec<Sender<TallyEvent>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    ///
    /// Dropping the receiver unsubscribes; the sender is pruned on the next
    /// notification.
    pub fn subscribe(&self) -> Receiver<TallyEvent> {
        let (sender, receiver) = channel::unbounded();
        self.subscribers.lock().push(sender);
        receiver
    }

    pub fn apply(&self, denomination: Denomination) {
        let mut engine = self.engine.lock();
        engine.apply(denomination);
        // Sent under the engine lock so events arrive in mutation order.
        self.notify(TallyEvent::Applied {
            denomination,
            mode: engine.mode(),
            total: engine.total(),
        });
    }

    pub fn set_mode(&self, mode: Mode) {
        let mut engine = self.engine.lock();
        engine.set_mode(mode);
        self.notify(TallyEvent::ModeChanged { mode });
    }

    pub fn reset(&self) {
        let mut engine = self.engine.lock();
        engine.reset();
        self.notify(TallyEvent::Reset);
    }

    pub fn total(&self) -> Decimal {
        self.engine.lock().total()
    }

    pub fn mode(&self) -> Mode {
        self.engine.lock().mode()
    }

    pub fn snapshot(&self) -> TallySnapshot {
        self.engine.lock().snapshot()
    }

    /// Builds a report from a snapshot taken under the lock.
    ///
    /// Works at any total; see [`gated_report`](Self::gated_report) for the
    /// display gate.
    pub fn report(&self) -> Report {
        let snapshot = self.snapshot();
        build_report(snapshot.usage, snapshot.total)
    }

    /// `true` when the total is strictly positive.
    pub fn report_available(&self) -> bool {
        self.total() > Decimal::ZERO
    }

    /// Report for display, or `None` when the total is not positive.
    ///
    /// Gate and report come from the same snapshot.
    pub fn gated_report(&self) -> Option<Report> {
        let snapshot = self.snapshot();
        if snapshot.total > Decimal::ZERO {
            Some(build_report(snapshot.usage, snapshot.total))
        } else {
            None
        }
    }

    fn notify(&self, event: TallyEvent) {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|sender| sender.send(event).is_ok());
        if subscribers.len() != before {
            tracing::trace!(pruned = before - subscribers.len(), "dropped closed subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn events_follow_operations_in_order() {
        let session = Session::new();
        let events = session.subscribe();

        session.apply(Denomination(10));
        session.set_mode(Mode::Subtract);
        session.apply(Denomination(5));
        session.reset();

        let received: Vec<TallyEvent> = events.try_iter().collect();
        assert_eq!(
            received,
            vec![
                TallyEvent::Applied {
                    denomination: Denomination(10),
                    mode: Mode::Add,
                    total: dec!(10),
                },
                TallyEvent::ModeChanged {
                    mode: Mode::Subtract
                },
                TallyEvent::Applied {
                    denomination: Denomination(5),
                    mode: Mode::Subtract,
                    total: dec!(5),
                },
                TallyEvent::Reset,
            ]
        );
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let session = Session::new();
        let kept = session.subscribe();
        drop(session.subscribe());

        session.apply(Denomination(20));
        assert_eq!(session.subscribers.lock().len(), 1);
        assert_eq!(kept.try_iter().count(), 1);
    }

    #[test]
    fn report_gate_requires_positive_total() {
        let session = Session::new();
        assert!(!session.report_available());

        session.apply(Denomination(5));
        assert!(session.report_available());

        session.set_mode(Mode::Subtract);
        session.apply(Denomination(5));
        assert!(!session.report_available());
        assert!(session.report().is_empty());
    }

    #[test]
    fn gated_report_follows_total() {
        let session = Session::new();
        assert_eq!(session.gated_report(), None);

        session.apply(Denomination(20));
        let report = session.gated_report().unwrap();
        assert_eq!(report.total(), dec!(20));
        assert_eq!(report.lines().len(), 1);

        session.set_mode(Mode::Subtract);
        session.apply(Denomination(50));
        assert_eq!(session.gated_report(), None);
    }

    #[test]
    fn session_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Session>();
    }
}
