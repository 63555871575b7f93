// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Basic-kind table.
//!
//! Fixed mapping from front-end basic kinds to runtime primitives. Untyped
//! constant kinds map to their default type (`untyped int` is `int`,
//! `untyped rune` is `int32`, `untyped float` is `float64`, ...).
//!
//! `Invalid`, `unsafe.Pointer` and `untyped nil` have no entry. A miss is
//! a broken contract with the front-end, handled by the caller.

use crate::descriptor::BasicKind;
use crate::runtime::{RuntimeKind, RuntimeType};

/// Runtime kind for a basic kind, or `None` if the table has no entry.
pub(crate) fn basic_runtime_kind(kind: BasicKind) -> Option<RuntimeKind> {
    let rt = match kind {
        BasicKind::Bool | BasicKind::UntypedBool => RuntimeKind::Bool,
        BasicKind::Int | BasicKind::UntypedInt => RuntimeKind::Int,
        BasicKind::Int8 => RuntimeKind::Int8,
        BasicKind::Int16 => RuntimeKind::Int16,
        BasicKind::Int32 | BasicKind::UntypedRune => RuntimeKind::Int32,
        BasicKind::Int64 => RuntimeKind::Int64,
        BasicKind::Uint => RuntimeKind::Uint,
        BasicKind::Uint8 => RuntimeKind::Uint8,
        BasicKind::Uint16 => RuntimeKind::Uint16,
        BasicKind::Uint32 => RuntimeKind::Uint32,
        BasicKind::Uint64 => RuntimeKind::Uint64,
        BasicKind::Uintptr => RuntimeKind::Uintptr,
        BasicKind::Float32 => RuntimeKind::Float32,
        BasicKind::Float64 | BasicKind::UntypedFloat => RuntimeKind::Float64,
        BasicKind::Complex64 => RuntimeKind::Complex64,
        BasicKind::Complex128 | BasicKind::UntypedComplex => RuntimeKind::Complex128,
        BasicKind::String | BasicKind::UntypedString => RuntimeKind::String,
        BasicKind::Invalid | BasicKind::UnsafePointer | BasicKind::UntypedNil => return None,
    };
    Some(rt)
}

/// Runtime primitive for a basic kind, or `None` if the table has no entry.
pub fn basic_runtime_type(kind: BasicKind) -> Option<RuntimeType> {
    basic_runtime_kind(kind).map(RuntimeType::new)
}
