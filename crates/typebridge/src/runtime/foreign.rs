// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Natively backed runtime types.
//!
//! Some types cannot be synthesized from their static description: their
//! values live in host code (file handles, mutexes, clocks). The
//! foreign-binding layer describes them with a [`ForeignBinding`], wraps it
//! in a [`ForeignType`] and registers the resulting runtime type in the
//! external type registry.

use crate::runtime::{RuntimeValue, WORD_SIZE};
use crate::value::Value;
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Behaviour of a natively backed type.
pub trait ForeignBinding: Send + Sync {
    /// Qualified type name, e.g. `os.File`. Identifies the type.
    fn type_name(&self) -> &str;

    /// Zero value of the type.
    fn zero(&self) -> RuntimeValue;

    /// Check that `value` is an instance of the type.
    fn admits(&self, value: &RuntimeValue) -> bool {
        matches!(value, RuntimeValue::Foreign(_))
    }

    /// Convert `value` into an instance of the type, or `None` if the
    /// conversion is not allowed.
    fn convert(&self, _value: &Value) -> Option<RuntimeValue> {
        None
    }

    /// Size in bytes (defaults to a handle).
    fn size(&self) -> usize {
        WORD_SIZE
    }

    /// Alignment in bytes.
    fn align(&self) -> usize {
        WORD_SIZE
    }
}

/// Shared handle on a [`ForeignBinding`].
///
/// Two foreign types are the same type iff their names match.
#[derive(Clone)]
pub struct ForeignType(Arc<dyn ForeignBinding>);

impl ForeignType {
    pub fn new(binding: impl ForeignBinding + 'static) -> Self {
        Self(Arc::new(binding))
    }

    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    pub fn zero(&self) -> RuntimeValue {
        self.0.zero()
    }

    pub fn admits(&self, value: &RuntimeValue) -> bool {
        self.0.admits(value)
    }

    pub fn convert(&self, value: &Value) -> Option<RuntimeValue> {
        self.0.convert(value)
    }

    pub fn size(&self) -> usize {
        self.0.size()
    }

    pub fn align(&self) -> usize {
        self.0.align()
    }
}

impl PartialEq for ForeignType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.type_name() == other.type_name()
    }
}

impl Eq for ForeignType {}

impl Hash for ForeignType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name().hash(state);
    }
}

impl fmt::Debug for ForeignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForeignType({})", self.type_name())
    }
}

/// Opaque host value carried by a foreign-typed runtime value.
#[derive(Clone)]
pub struct ForeignValue(Arc<dyn Any + Send + Sync>);

impl ForeignValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the host value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Check if both handles share the same host value.
    pub fn ptr_eq(&self, other: &ForeignValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ForeignValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ForeignValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForeignValue({:p})", Arc::as_ptr(&self.0))
    }
}
