// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! External type registry.
//!
//! Natively implemented types (bound from host libraries) already have a
//! runtime representation; synthesizing one from their static description
//! would produce a different, incompatible type. The foreign-binding layer
//! registers them here, and the converter consults the registry before any
//! structural work, at every level of recursion.
//!
//! The registry is populated once through [`RegistryBuilder`] and is
//! read-only afterwards.
//!
//! # Example
//!
//! ```rust
//! use typebridge::descriptor::{BasicKind, TypeDescriptor};
//! use typebridge::registry::{ExternalTypeResolver, RegistryBuilder};
//! use typebridge::runtime::RuntimeType;
//!
//! let duration = RuntimeType::named("time.Duration", &RuntimeType::int64());
//! let registry = RegistryBuilder::new()
//!     .register_named("time", "Duration", TypeDescriptor::basic(BasicKind::Int64), duration.clone())
//!     .build();
//!
//! let desc = TypeDescriptor::named("time", "Duration", TypeDescriptor::basic(BasicKind::Int64));
//! assert_eq!(registry.resolve(&desc), Some(duration));
//! ```

use crate::descriptor::TypeDescriptor;
use crate::runtime::RuntimeType;
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup of pre-existing runtime types by descriptor.
///
/// Implementations must be side-effect free; the converter may call
/// `resolve` from many threads at once.
pub trait ExternalTypeResolver: Send + Sync {
    /// Runtime type registered for `desc`, or `None` if the descriptor must
    /// be converted structurally.
    fn resolve(&self, desc: &TypeDescriptor) -> Option<RuntimeType>;
}

impl<R: ExternalTypeResolver + ?Sized> ExternalTypeResolver for &R {
    fn resolve(&self, desc: &TypeDescriptor) -> Option<RuntimeType> {
        (**self).resolve(desc)
    }
}

impl<R: ExternalTypeResolver + ?Sized> ExternalTypeResolver for Arc<R> {
    fn resolve(&self, desc: &TypeDescriptor) -> Option<RuntimeType> {
        (**self).resolve(desc)
    }
}

/// Resolver with no registered types.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoExternalTypes;

impl ExternalTypeResolver for NoExternalTypes {
    fn resolve(&self, _desc: &TypeDescriptor) -> Option<RuntimeType> {
        None
    }
}

/// Frozen [`HashMap`]-backed registry.
///
/// Keys use descriptor identity: structural for unnamed descriptors,
/// qualified name plus underlying shape for named ones.
#[derive(Debug, Default, Clone)]
pub struct ExternalTypeRegistry {
    types: HashMap<TypeDescriptor, RuntimeType>,
}

impl ExternalTypeRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Check if `desc` has a registered runtime type.
    #[must_use]
    pub fn contains(&self, desc: &TypeDescriptor) -> bool {
        self.types.contains_key(desc)
    }
}

impl ExternalTypeResolver for ExternalTypeRegistry {
    fn resolve(&self, desc: &TypeDescriptor) -> Option<RuntimeType> {
        self.types.get(desc).cloned()
    }
}

/// Builder for [`ExternalTypeRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: HashMap<TypeDescriptor, RuntimeType>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ty` as the runtime type of `desc`. A later registration for
    /// the same descriptor replaces the earlier one.
    #[must_use]
    pub fn register(mut self, desc: TypeDescriptor, ty: RuntimeType) -> Self {
        if let Some(previous) = self.types.insert(desc.clone(), ty) {
            log::warn!(
                "[typebridge::registry] {} registered twice, replacing {}",
                desc,
                previous
            );
        }
        self
    }

    /// Register the named type `package.name` with the given underlying
    /// descriptor.
    #[must_use]
    pub fn register_named(
        self,
        package: impl Into<String>,
        name: impl Into<String>,
        underlying: TypeDescriptor,
        ty: RuntimeType,
    ) -> Self {
        self.register(TypeDescriptor::named(package, name, underlying), ty)
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> ExternalTypeRegistry {
        log::debug!(
            "[typebridge::registry] built with {} external type(s)",
            self.types.len()
        );
        ExternalTypeRegistry { types: self.types }
    }
}
