// Copyright 2025 the Pointpick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Source coordinate systems and their mapping into the viewer's right-handed Y-up frame.

use core::fmt;
use core::str::FromStr;

use glam::{DMat4, DVec3};

/// Which axis points up in the source data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UpAxis {
    /// X up.
    X,
    /// Y up (the viewer's native convention).
    Y,
    /// Z up (common for survey and GIS data).
    Z,
}

/// Handedness of the source data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    /// Right-handed.
    Right,
    /// Left-handed.
    Left,
}

/// Coordinate system of a point-cloud file.
///
/// Parses from and displays as `RIGHT_HANDED_Z_UP`-style names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CoordinateSystem {
    /// Handedness.
    pub handedness: Handedness,
    /// Up axis.
    pub up: UpAxis,
}

impl CoordinateSystem {
    /// The viewer's native frame; its transform is the identity.
    pub const RIGHT_HANDED_Y_UP: Self = Self::new(Handedness::Right, UpAxis::Y);

    /// Create a coordinate system.
    pub const fn new(handedness: Handedness, up: UpAxis) -> Self {
        Self { handedness, up }
    }

    /// Whether the source is left-handed.
    pub fn is_left_handed(self) -> bool {
        self.handedness == Handedness::Left
    }

    /// Matrix applied to point clouds stored in this system before display.
    ///
    /// Z-up rotates +90° about X, X-up rotates -90° about Z, and left-handed
    /// sources additionally flip Z before the rotation. Right-handed Y-up is
    /// the identity.
    pub fn transform_matrix(self) -> DMat4 {
        let rotation = match self.up {
            UpAxis::Z => DMat4::from_rotation_x(core::f64::consts::FRAC_PI_2),
            UpAxis::X => DMat4::from_rotation_z(-core::f64::consts::FRAC_PI_2),
            UpAxis::Y => DMat4::IDENTITY,
        };
        match self.handedness {
            Handedness::Right => rotation,
            Handedness::Left => rotation * DMat4::from_scale(DVec3::new(1.0, 1.0, -1.0)),
        }
    }
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Self::RIGHT_HANDED_Y_UP
    }
}

/// Unrecognized coordinate system name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown coordinate system `{0}`")]
pub struct ParseCoordinateSystemError(pub String);

impl FromStr for CoordinateSystem {
    type Err = ParseCoordinateSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (handedness, up) = s
            .split_once("_HANDED_")
            .ok_or_else(|| ParseCoordinateSystemError(s.to_owned()))?;
        let handedness = match handedness {
            "RIGHT" => Handedness::Right,
            "LEFT" => Handedness::Left,
            _ => return Err(ParseCoordinateSystemError(s.to_owned())),
        };
        let up = match up {
            "X_UP" => UpAxis::X,
            "Y_UP" => UpAxis::Y,
            "Z_UP" => UpAxis::Z,
            _ => return Err(ParseCoordinateSystemError(s.to_owned())),
        };
        Ok(Self::new(handedness, up))
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handedness = match self.handedness {
            Handedness::Right => "RIGHT",
            Handedness::Left => "LEFT",
        };
        let up = match self.up {
            UpAxis::X => "X",
            UpAxis::Y => "Y",
            UpAxis::Z => "Z",
        };
        write!(f, "{handedness}_HANDED_{up}_UP")
    }
}
