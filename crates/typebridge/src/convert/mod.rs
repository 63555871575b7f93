// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type and value conversion.
//!
//! # Features
//!
//! - **TypeConverter**: descriptor to runtime type, external registry first
//! - **Value conversion**: zero values for absent inputs, coercion otherwise
//! - **Basic table**: fixed mapping of basic kinds to runtime primitives
//! - **TypeCache**: concurrent memoization of structural conversions
//!
//! # Example
//!
//! ```rust
//! use typebridge::convert::TypeConverter;
//! use typebridge::descriptor::{BasicKind, StructBuilder, TypeDescriptor};
//! use typebridge::Value;
//!
//! let converter = TypeConverter::default();
//! let desc = StructBuilder::new()
//!     .tagged_field("A", TypeDescriptor::basic(BasicKind::Int32), r#"json:"a""#)
//!     .basic_field("B", BasicKind::String)
//!     .build();
//!
//! let ty = converter.to_runtime_type(&desc);
//! assert_eq!(ty.field("A").map(|f| f.tag.get("json")), Some("a"));
//!
//! let zero = converter.to_value(None, &desc).unwrap();
//! assert!(zero.is_zero());
//!
//! let n = converter
//!     .to_value(Some(&Value::from(258i64)), &TypeDescriptor::basic(BasicKind::Uint8))
//!     .unwrap();
//! assert_eq!(n.as_u64(), Some(2));
//! ```

mod basic;
pub mod cache;
pub(crate) mod coerce;
mod types;
mod values;

pub use basic::basic_runtime_type;
pub use cache::{CacheStats, TypeCache};
pub use types::TypeConverter;

#[cfg(test)]
mod tests;
