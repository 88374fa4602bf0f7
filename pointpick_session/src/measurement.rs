// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-point measurement state machine.
//!
//! ## States
//!
//! - [`MeasureState::Empty`]: nothing committed.
//! - [`MeasureState::OnePointPending`]: the first point is committed.
//! - [`MeasureState::TwoPointsCommitted`]: a finished segment; an auto-reset
//!   deadline may be armed.
//!
//! A pointer move resolves a *head*, the point under the cursor. A click
//! commits the head if it is live. Committing consumes the head, so a second
//! click without an intervening successful move does nothing.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use glam::DVec3;
//! use pointpick_session::measurement::{MeasureState, MeasurementSession};
//!
//! let mut m = MeasurementSession::new(Some(Duration::from_secs(2)));
//! m.update_head(Some(DVec3::ZERO));
//! m.click(Duration::ZERO);
//! m.update_head(Some(DVec3::new(3.0, 4.0, 0.0)));
//! let commit = m.click(Duration::from_millis(100)).unwrap();
//! assert_eq!(commit.completed.unwrap().length, 5.0);
//! assert_eq!(m.state(), MeasureState::TwoPointsCommitted);
//!
//! // The deadline passes and the measurement clears itself.
//! assert!(m.poll(Duration::from_millis(2100)));
//! assert_eq!(m.state(), MeasureState::Empty);
//! ```

use core::time::Duration;

use glam::DVec3;

/// Where a measurement stands.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MeasureState {
    /// No committed points.
    Empty,
    /// One committed point, waiting for the second.
    OnePointPending,
    /// Two committed points.
    TwoPointsCommitted,
}

/// A straight segment between two world points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    /// Start point.
    pub from: DVec3,
    /// End point.
    pub to: DVec3,
    /// Euclidean distance between `from` and `to`.
    pub length: f64,
}

impl Segment {
    /// Create a segment and compute its length.
    pub fn new(from: DVec3, to: DVec3) -> Self {
        Self {
            from,
            to,
            length: from.distance(to),
        }
    }
}

/// Result of a successful click.
#[derive(Clone, Debug, PartialEq)]
pub struct Commit {
    /// Committed points after the click.
    pub points: Vec<DVec3>,
    /// The finalized segment, when this click completed a measurement.
    pub completed: Option<Segment>,
}

/// Committed points, the transient head, and the auto-reset deadline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasurementSession {
    committed: Vec<DVec3>,
    head: Option<DVec3>,
    head_live: bool,
    reset_at: Option<Duration>,
    auto_reset_delay: Option<Duration>,
    external: Vec<DVec3>,
}

impl MeasurementSession {
    /// Create an empty session. `auto_reset_delay` of `None` disables auto-reset.
    pub fn new(auto_reset_delay: Option<Duration>) -> Self {
        Self {
            auto_reset_delay,
            ..Self::default()
        }
    }

    /// Current state, derived from the committed points.
    pub fn state(&self) -> MeasureState {
        match self.committed.len() {
            0 => MeasureState::Empty,
            1 => MeasureState::OnePointPending,
            _ => MeasureState::TwoPointsCommitted,
        }
    }

    /// Committed points in click order.
    pub fn committed(&self) -> &[DVec3] {
        &self.committed
    }

    /// Most recently resolved head, live or not.
    pub fn head(&self) -> Option<DVec3> {
        self.head
    }

    /// Whether the head can be committed by a click.
    pub fn head_is_live(&self) -> bool {
        self.head_live
    }

    /// Pending auto-reset deadline.
    pub fn reset_deadline(&self) -> Option<Duration> {
        self.reset_at
    }

    /// Record a pointer-move resolution.
    ///
    /// `None` leaves the head unchanged. Returns `true` when the head moved.
    pub fn update_head(&mut self, resolved: Option<DVec3>) -> bool {
        let Some(p) = resolved else {
            return false;
        };
        self.head_live = true;
        if self.head == Some(p) {
            return false;
        }
        self.head = Some(p);
        true
    }

    /// Commit the live head, if any.
    pub fn click(&mut self, now: Duration) -> Option<Commit> {
        if !self.head_live {
            return None;
        }
        let head = self.head?;
        self.head_live = false;
        if self.state() == MeasureState::TwoPointsCommitted {
            self.committed.clear();
            self.reset_at = None;
        }
        self.committed.push(head);
        let completed = match self.committed.as_slice() {
            [from, to] => {
                self.reset_at = self.auto_reset_delay.map(|d| now + d);
                Some(Segment::new(*from, *to))
            }
            _ => None,
        };
        Some(Commit {
            points: self.committed.clone(),
            completed,
        })
    }

    /// Clear the head and committed points and disarm the timer.
    ///
    /// Returns `true` if anything was cleared.
    pub fn cancel(&mut self) -> bool {
        let changed = self.head.is_some() || !self.committed.is_empty();
        self.committed.clear();
        self.head = None;
        self.head_live = false;
        self.reset_at = None;
        changed
    }

    /// Fire the auto-reset if its deadline has passed.
    ///
    /// Clears committed points but keeps the head. Returns `true` when a reset happened.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.reset_at {
            Some(at) if now >= at => {
                self.reset_at = None;
                self.committed.clear();
                true
            }
            _ => false,
        }
    }

    /// Override the displayed points with an externally edited list.
    ///
    /// An empty list removes the override.
    pub fn set_external_points(&mut self, points: Vec<DVec3>) {
        self.external = points;
    }

    /// Points to draw: the external override when present, otherwise
    /// committed points followed by the live head.
    pub fn display_points(&self) -> Vec<DVec3> {
        if !self.external.is_empty() {
            return self.external.clone();
        }
        let mut out = self.committed.clone();
        if self.head_live {
            out.extend(self.head);
        }
        out
    }

    /// Consecutive segments through [`display_points`](Self::display_points).
    pub fn segments(&self) -> Vec<Segment> {
        self.display_points()
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect()
    }
}
