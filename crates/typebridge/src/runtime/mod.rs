// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type representations and payloads.
//!
//! # Features
//!
//! - **RuntimeType**: constructible type handle (primitives, arrays, slices,
//!   maps, pointers, channels, structs, `any`, foreign types)
//! - **RuntimeValue**: untyped payload matching a runtime type
//! - **Zero values**: `RuntimeType::zero_value()`
//! - **Layout**: sizes, alignments and struct field offsets assigned by
//!   `RuntimeType::struct_of`
//!
//! # Example
//!
//! ```rust
//! use typebridge::runtime::{RuntimeType, RuntimeValue, StructField};
//!
//! let point = RuntimeType::struct_of(vec![
//!     StructField::new("X", RuntimeType::int32()).with_tag(r#"json:"x""#),
//!     StructField::new("Y", RuntimeType::int32()).with_tag(r#"json:"y""#),
//! ]);
//!
//! assert_eq!(point.field("Y").map(|f| f.offset), Some(4));
//! assert_eq!(
//!     point.zero_value(),
//!     RuntimeValue::Struct(vec![RuntimeValue::Int32(0), RuntimeValue::Int32(0)])
//! );
//! ```

mod foreign;
mod types;
mod value;
mod zero;

pub use foreign::{ForeignBinding, ForeignType, ForeignValue};
pub use types::{ChanDir, RuntimeKind, RuntimeType, StructField, StructTag, WORD_SIZE};
pub use value::{Channel, Complex, Pointer, RuntimeValue};
