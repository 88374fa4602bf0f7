// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the session: configuration, input events, outcomes, and effects.
//!
//! ## Overview
//!
//! Input flows in as [`InputEvent`]s and frame ticks; what happened flows out as
//! [`Effect`]s. Both are plain data so a host can record, replay, or test the
//! loop without a rendering surface.

use core::time::Duration;

use glam::DVec3;
use kurbo::Point;
use pointpick_scene::{BuildStats, ConfigError, PickConfig};

use crate::measurement::Segment;

/// Session tunables.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Snapshot extraction, index build, and query settings.
    pub pick: PickConfig,
    /// Delay after which a finished two-point measurement clears itself.
    /// `None` keeps finished measurements until cancelled.
    pub auto_reset_delay: Option<Duration>,
    /// Delay after mount at which a rebuild is forced once, regardless of camera
    /// motion, so late-loading point clouds become pickable.
    pub initial_rebuild_delay: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pick: PickConfig::default(),
            auto_reset_delay: Some(Duration::from_millis(2000)),
            initial_rebuild_delay: Some(Duration::from_millis(500)),
        }
    }
}

impl SessionConfig {
    /// Check every field for a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pick.validate()
    }
}

/// Pointer buttons the session distinguishes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerButton {
    /// Usually the left button or a touch; commits points.
    Primary,
    /// Usually the right button; cancels the measurement.
    Secondary,
    /// Any other button; ignored.
    Auxiliary,
}

/// Keys the session distinguishes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Cancels the measurement.
    Escape,
    /// Any other key; ignored.
    Other,
}

/// Raw input delivered to [`InteractionLoop::handle_input`](crate::InteractionLoop::handle_input).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a position in client pixels.
    PointerMove {
        /// Client-space pixel position.
        position: Point,
    },
    /// A pointer button went down.
    PointerDown {
        /// Which button.
        button: PointerButton,
    },
    /// A key went down.
    KeyDown(Key),
}

/// Whether the host should let an input continue to other handlers.
///
/// The session claims button presses so that a host's own click handling
/// (selection, context menus) does not also run while measuring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Let the event continue to other handlers.
    Continue,
    /// Stop propagation and suppress default handling.
    StopAndConsume,
}

/// Something the session did in response to a frame or input.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// The pick snapshot was replaced.
    IndexRebuilt(BuildStats),
    /// The live head moved to a newly resolved point.
    HeadMoved(DVec3),
    /// The live head was cleared by a cancel.
    HeadCleared,
    /// The committed point list changed; carries the new list.
    MeasurementChanged(Vec<DVec3>),
    /// A two-point measurement was finalized.
    MeasurementCompleted(Segment),
}

/// Result of handling one input event.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    /// Propagation decision for the host.
    pub outcome: Outcome,
    /// Effects produced, in order.
    pub effects: Vec<Effect>,
}

impl Response {
    pub(crate) fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            effects: Vec::new(),
        }
    }
}
