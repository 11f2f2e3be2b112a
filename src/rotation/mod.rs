// SPDX-License-Identifier: MIT OR Apache-2.0

//! Angles and quaternion rotations.

pub mod angle;
pub mod quaternion;
