// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # typebridge - runtime types for an embedded Go-like interpreter
//!
//! Converts the static type descriptors produced by the front-end type
//! checker into constructible runtime types, and coerces host values into
//! those types to produce the interpreter's uniform [`Value`] wrapper.
//!
//! ## Quick Start
//!
//! ```rust
//! use typebridge::descriptor::{BasicKind, ChanDirection, TypeDescriptor};
//! use typebridge::registry::RegistryBuilder;
//! use typebridge::runtime::RuntimeType;
//! use typebridge::{TypeConverter, Value};
//!
//! // Natively bound types are registered once, before conversion starts.
//! let duration = RuntimeType::named("time.Duration", &RuntimeType::int64());
//! let registry = RegistryBuilder::new()
//!     .register_named("time", "Duration", TypeDescriptor::basic(BasicKind::Int64), duration.clone())
//!     .build();
//! let converter = TypeConverter::new(registry);
//!
//! let ticks = TypeDescriptor::channel(
//!     ChanDirection::RecvOnly,
//!     TypeDescriptor::named("time", "Duration", TypeDescriptor::basic(BasicKind::Int64)),
//! );
//! assert_eq!(converter.to_runtime_type(&ticks).to_string(), "<-chan time.Duration");
//!
//! let v = converter
//!     .to_value(Some(&Value::from(1.9f64)), &TypeDescriptor::basic(BasicKind::Int32))
//!     .unwrap();
//! assert_eq!(v.as_i64(), Some(1));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |  Value conversion      to_value(raw?, descriptor) -> Value   |
//! +--------------------------------------------------------------+
//! |  Type conversion       to_runtime_type(descriptor)           |
//! |     registry first -> basic table / structural -> TypeCache  |
//! +--------------------------------------------------------------+
//! |  External registry     natively bound types (read-only)      |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`descriptor`] - static type descriptors (front-end input)
//! - [`runtime`] - runtime types and payloads
//! - [`convert`] - type converter, coercion rules, type cache
//! - [`registry`] - external type registry
//! - [`config`] - converter configuration

/// Converter configuration (cache mode, pinning, environment overrides).
pub mod config;
/// Type and value conversion.
pub mod convert;
/// Static type descriptors produced by the front-end.
pub mod descriptor;
/// Error types.
pub mod error;
/// External type registry for natively bound types.
pub mod registry;
/// Runtime types, values, channels and pointers.
pub mod runtime;
/// Typed value wrapper.
pub mod value;

pub use config::{BridgeConfig, CacheMode};
pub use convert::{basic_runtime_type, TypeConverter};
pub use error::{BridgeError, Result};
pub use registry::{ExternalTypeRegistry, ExternalTypeResolver, NoExternalTypes};
pub use value::Value;
