// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host value to runtime value conversion.

use crate::convert::coerce;
use crate::convert::TypeConverter;
use crate::descriptor::TypeDescriptor;
use crate::error::Result;
use crate::registry::ExternalTypeResolver;
use crate::runtime::{RuntimeType, RuntimeValue};
use crate::value::Value;

impl<R: ExternalTypeResolver> TypeConverter<R> {
    /// Value of the type described by `desc`.
    ///
    /// `None` (or a nil interface) yields the zero value of the type.
    /// Otherwise `raw` is converted to the type; a value held in an
    /// interface is converted from its dynamic type.
    ///
    /// # Errors
    ///
    /// [`BridgeError::IncompatibleValueConversion`] if the value's type
    /// cannot be converted to the described type, and
    /// [`BridgeError::SliceLengthMismatch`] for slice to array conversions of
    /// the wrong length.
    ///
    /// # Panics
    ///
    /// Same as [`TypeConverter::to_runtime_type`].
    ///
    /// [`BridgeError::IncompatibleValueConversion`]: crate::error::BridgeError::IncompatibleValueConversion
    /// [`BridgeError::SliceLengthMismatch`]: crate::error::BridgeError::SliceLengthMismatch
    pub fn to_value(&self, raw: Option<&Value>, desc: &TypeDescriptor) -> Result<Value> {
        let ty = self.to_runtime_type(desc);
        self.to_value_from_type(raw, &ty)
    }

    /// Like [`TypeConverter::to_value`] for an already converted type.
    pub fn to_value_from_type(&self, raw: Option<&Value>, ty: &RuntimeType) -> Result<Value> {
        match raw.and_then(dynamic_value) {
            None => Ok(Value::zero(ty.clone())),
            Some(value) => coerce::convert(value, ty),
        }
    }
}

/// Dynamic content of `value`: interfaces are unwrapped, nil ones are absent.
fn dynamic_value(mut value: &Value) -> Option<&Value> {
    while value.ty().is_any() {
        match value.raw() {
            RuntimeValue::Interface(Some(inner)) => value = inner,
            _ => return None,
        }
    }
    Some(value)
}
