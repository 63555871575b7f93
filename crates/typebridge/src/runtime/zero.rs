// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Zero values of runtime types.

use crate::runtime::{Complex, RuntimeKind, RuntimeType, RuntimeValue};

impl RuntimeType {
    /// Default instance of the type.
    ///
    /// Reference-like kinds (slice, map, pointer, channel, interface) are nil;
    /// arrays and structs are zeroed element by element.
    pub fn zero_value(&self) -> RuntimeValue {
        match self.kind() {
            RuntimeKind::Bool => RuntimeValue::Bool(false),
            RuntimeKind::Int => RuntimeValue::Int(0),
            RuntimeKind::Int8 => RuntimeValue::Int8(0),
            RuntimeKind::Int16 => RuntimeValue::Int16(0),
            RuntimeKind::Int32 => RuntimeValue::Int32(0),
            RuntimeKind::Int64 => RuntimeValue::Int64(0),
            RuntimeKind::Uint => RuntimeValue::Uint(0),
            RuntimeKind::Uint8 => RuntimeValue::Uint8(0),
            RuntimeKind::Uint16 => RuntimeValue::Uint16(0),
            RuntimeKind::Uint32 => RuntimeValue::Uint32(0),
            RuntimeKind::Uint64 => RuntimeValue::Uint64(0),
            RuntimeKind::Uintptr => RuntimeValue::Uintptr(0),
            RuntimeKind::Float32 => RuntimeValue::Float32(0.0),
            RuntimeKind::Float64 => RuntimeValue::Float64(0.0),
            RuntimeKind::Complex64 => RuntimeValue::Complex64(Complex::default()),
            RuntimeKind::Complex128 => RuntimeValue::Complex128(Complex::default()),
            RuntimeKind::String => RuntimeValue::String(String::new()),
            RuntimeKind::Array { len, elem } => {
                let elem_zero = elem.zero_value();
                RuntimeValue::Array(vec![elem_zero; *len])
            }
            RuntimeKind::Slice(_) => RuntimeValue::Slice(None),
            RuntimeKind::Map { .. } => RuntimeValue::Map(None),
            RuntimeKind::Pointer(_) => RuntimeValue::Pointer(None),
            RuntimeKind::Chan { .. } => RuntimeValue::Chan(None),
            RuntimeKind::Struct(fields) => {
                RuntimeValue::Struct(fields.iter().map(|f| f.ty.zero_value()).collect())
            }
            RuntimeKind::Any => RuntimeValue::Interface(None),
            RuntimeKind::Foreign(foreign) => foreign.zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{ChanDir, StructField};

    #[test]
    fn test_nested_struct_zero() {
        let inner = RuntimeType::struct_of(vec![
            StructField::new("x", RuntimeType::float64()),
            StructField::new("tags", RuntimeType::slice_of(RuntimeType::string())),
        ]);
        let outer = RuntimeType::struct_of(vec![
            StructField::new("pos", RuntimeType::array_of(2, inner.clone())),
            StructField::new("next", RuntimeType::pointer_to(inner)),
            StructField::new("done", RuntimeType::chan_of(ChanDir::Both, RuntimeType::bool())),
            StructField::new("meta", RuntimeType::map_of(RuntimeType::string(), RuntimeType::any())),
        ]);

        let inner_zero = RuntimeValue::Struct(vec![RuntimeValue::Float64(0.0), RuntimeValue::Slice(None)]);
        assert_eq!(
            outer.zero_value(),
            RuntimeValue::Struct(vec![
                RuntimeValue::Array(vec![inner_zero.clone(), inner_zero]),
                RuntimeValue::Pointer(None),
                RuntimeValue::Chan(None),
                RuntimeValue::Map(None),
            ])
        );
        assert!(outer.admits(&outer.zero_value()));
    }

    #[test]
    fn test_any_zero_is_nil_interface() {
        assert!(RuntimeType::any().zero_value().is_nil());
    }
}
