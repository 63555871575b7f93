// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for type and value conversion.
//!
//! [`BridgeError`] covers failures the evaluator can report back to the
//! interpreted program. [`UnsupportedBasicKind`] is different: it means the
//! front-end emitted a basic kind the bridge has no runtime type for, which
//! is a broken invariant between the two, and is only ever raised as a panic.

use crate::descriptor::BasicKind;
use crate::runtime::ChanDir;
use std::fmt;

/// Reportable conversion failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The value's runtime type cannot be converted to the target type.
    IncompatibleValueConversion {
        /// Source runtime type.
        from: String,
        /// Target runtime type.
        to: String,
    },
    /// Slice to array conversion with a slice of the wrong length.
    SliceLengthMismatch {
        /// Length of the slice.
        len: usize,
        /// Length of the target array.
        want: usize,
    },
    /// Payload is not an instance of the runtime type it was paired with.
    ValueShapeMismatch {
        /// Runtime type the payload was checked against.
        ty: String,
    },
    /// Channel operation not allowed by the handle's direction.
    ChannelDirection {
        /// Attempted operation (`send` / `recv`).
        op: &'static str,
        /// Direction of the handle.
        dir: ChanDir,
    },
    /// Channel queue disconnected.
    ChannelClosed,
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleValueConversion { from, to } => {
                write!(f, "cannot convert value of type {} to type {}", from, to)
            }
            Self::SliceLengthMismatch { len, want } => write!(
                f,
                "cannot convert slice with length {} to array with length {}",
                len, want
            ),
            Self::ValueShapeMismatch { ty } => {
                write!(f, "value is not an instance of type {}", ty)
            }
            Self::ChannelDirection { op, dir } => {
                write!(f, "invalid operation: {} on {} channel", op, dir)
            }
            Self::ChannelClosed => f.write_str("channel is closed"),
        }
    }
}

impl std::error::Error for BridgeError {}

/// Result alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Fatal fault: the basic-kind table has no entry for a kind the front-end
/// produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedBasicKind(pub BasicKind);

impl fmt::Display for UnsupportedBasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported basic kind `{}`: front-end and runtime type table are out of sync",
            self.0
        )
    }
}

impl std::error::Error for UnsupportedBasicKind {}
