// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed values.
//!
//! A [`Value`] is a [`RuntimeValue`] paired with the [`RuntimeType`] it is an
//! instance of. This is the uniform wrapper the evaluator stores and passes
//! around.
//!
//! # Example
//!
//! ```rust
//! use typebridge::runtime::RuntimeType;
//! use typebridge::Value;
//!
//! let n = Value::from(300i32);
//! let narrowed = n.convert(&RuntimeType::uint8()).unwrap();
//! assert_eq!(narrowed.as_u64(), Some(44));
//! ```

use crate::convert::coerce;
use crate::error::{BridgeError, Result};
use crate::runtime::{Complex, RuntimeKind, RuntimeType, RuntimeValue};

/// Runtime value with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    ty: RuntimeType,
    raw: RuntimeValue,
}

impl Value {
    /// Pair `raw` with `ty`, checking that the payload is an instance of the
    /// type.
    pub fn new(ty: RuntimeType, raw: RuntimeValue) -> Result<Self> {
        if !ty.admits(&raw) {
            return Err(BridgeError::ValueShapeMismatch { ty: ty.to_string() });
        }
        Ok(Self { ty, raw })
    }

    /// Zero value of `ty`.
    pub fn zero(ty: RuntimeType) -> Self {
        let raw = ty.zero_value();
        Self { ty, raw }
    }

    /// Pair without checking. Callers guarantee `ty.admits(&raw)`.
    pub(crate) fn from_parts(ty: RuntimeType, raw: RuntimeValue) -> Self {
        debug_assert!(ty.admits(&raw), "payload not admitted by {}", ty);
        Self { ty, raw }
    }

    pub fn ty(&self) -> &RuntimeType {
        &self.ty
    }

    pub fn raw(&self) -> &RuntimeValue {
        &self.raw
    }

    pub fn into_raw(self) -> RuntimeValue {
        self.raw
    }

    /// Check if this is the zero value of its type.
    pub fn is_zero(&self) -> bool {
        self.raw == self.ty.zero_value()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.raw.as_i64()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.raw.as_u64()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.raw.as_f64()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.raw.as_str()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.raw.as_bool()
    }

    /// Struct field by name.
    pub fn field(&self, name: &str) -> Option<Value> {
        let field = self.ty.field(name)?;
        match &self.raw {
            RuntimeValue::Struct(items) => items
                .get(field.index)
                .map(|raw| Self::from_parts(field.ty.clone(), raw.clone())),
            _ => None,
        }
    }

    /// Convert to `target` following the language's conversion rules.
    pub fn convert(&self, target: &RuntimeType) -> Result<Value> {
        coerce::convert(self, target)
    }
}

macro_rules! impl_from_primitive {
    ($($rust:ty => $kind:ident, $variant:ident;)*) => {
        $(
            impl From<$rust> for Value {
                fn from(v: $rust) -> Self {
                    Self::from_parts(RuntimeType::new(RuntimeKind::$kind), RuntimeValue::$variant(v))
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool, Bool;
    isize => Int, Int;
    i8 => Int8, Int8;
    i16 => Int16, Int16;
    i32 => Int32, Int32;
    i64 => Int64, Int64;
    usize => Uint, Uint;
    u8 => Uint8, Uint8;
    u16 => Uint16, Uint16;
    u32 => Uint32, Uint32;
    u64 => Uint64, Uint64;
    f32 => Float32, Float32;
    f64 => Float64, Float64;
    Complex<f32> => Complex64, Complex64;
    Complex<f64> => Complex128, Complex128;
    String => String, String;
}

/// Runes are `int32` code points.
impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::from(c as i32)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}
