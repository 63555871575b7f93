// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor to runtime type conversion.

use crate::config::BridgeConfig;
use crate::convert::basic::basic_runtime_kind;
use crate::convert::cache::TypeCache;
use crate::descriptor::{ChanDirection, DescriptorKind, FieldDescriptor, TypeDescriptor};
use crate::error::UnsupportedBasicKind;
use crate::registry::{ExternalTypeResolver, NoExternalTypes};
use crate::runtime::{ChanDir, RuntimeType, StructField};

/// Converts static type descriptors into runtime types and values.
///
/// The external resolver is consulted first on every conversion, including
/// the conversion of each child descriptor, so registered types replace
/// structural synthesis wherever they appear. Structural results are
/// memoized in a [`TypeCache`] keyed by the descriptor's shape.
///
/// `TypeConverter` is `Send + Sync` whenever its resolver is; share one
/// instance (e.g. behind an `Arc`) between evaluator threads.
pub struct TypeConverter<R = NoExternalTypes> {
    resolver: R,
    cache: TypeCache,
    config: BridgeConfig,
}

impl Default for TypeConverter<NoExternalTypes> {
    fn default() -> Self {
        Self::new(NoExternalTypes)
    }
}

impl<R: ExternalTypeResolver> TypeConverter<R> {
    /// Create a converter with the default configuration.
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, BridgeConfig::default())
    }

    pub fn with_config(resolver: R, config: BridgeConfig) -> Self {
        log::debug!("[typebridge::convert] cache mode {:?}", config.cache);
        Self {
            resolver,
            cache: TypeCache::new(config.cache),
            config,
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Memo table of structural conversions.
    pub fn cache(&self) -> &TypeCache {
        &self.cache
    }

    /// Runtime type for `desc`.
    ///
    /// Named types without an external registration convert to the runtime
    /// type of their underlying shape. Interfaces, signatures, tuples and
    /// type parameters all convert to `any`.
    ///
    /// # Panics
    ///
    /// Panics if `desc` contains a basic kind with no runtime counterpart
    /// (`invalid type`, `unsafe.Pointer`, `untyped nil`). The front-end never
    /// hands such descriptors to the runtime; seeing one means the two are
    /// out of sync.
    pub fn to_runtime_type(&self, desc: &TypeDescriptor) -> RuntimeType {
        if let Some(ty) = self.resolver.resolve(desc) {
            log::debug!("[typebridge::convert] {} resolved externally as {}", desc, ty);
            return ty;
        }

        let shape = desc.underlying();
        if self.config.pin_basic_types && matches!(shape.kind(), DescriptorKind::Basic(_)) {
            self.cache.pin(shape);
        }
        self.cache.get_or_build(shape, || self.convert_shape(shape))
    }

    fn convert_shape(&self, shape: &TypeDescriptor) -> RuntimeType {
        let ty = match shape.kind() {
            DescriptorKind::Basic(kind) => match basic_runtime_kind(*kind) {
                Some(rt) => RuntimeType::new(rt),
                None => {
                    let fault = UnsupportedBasicKind(*kind);
                    log::error!("[typebridge::convert] {}", fault);
                    panic!("{}", fault);
                }
            },
            DescriptorKind::Array { len, elem } => {
                let Ok(len) = usize::try_from(*len) else {
                    log::error!("[typebridge::convert] array length of {} overflows", shape);
                    panic!("array length {} exceeds the address space", len);
                };
                RuntimeType::array_of(len, self.to_runtime_type(elem))
            }
            DescriptorKind::Slice(elem) => RuntimeType::slice_of(self.to_runtime_type(elem)),
            DescriptorKind::Map { key, elem } => {
                RuntimeType::map_of(self.to_runtime_type(key), self.to_runtime_type(elem))
            }
            DescriptorKind::Pointer(elem) => RuntimeType::pointer_to(self.to_runtime_type(elem)),
            DescriptorKind::Channel { dir, elem } => {
                RuntimeType::chan_of(chan_dir(*dir), self.to_runtime_type(elem))
            }
            DescriptorKind::Struct(fields) => {
                RuntimeType::struct_of(fields.iter().map(|f| self.struct_field(f)).collect())
            }
            // Method sets are dispatched by the evaluator, not the type.
            DescriptorKind::Interface(_) => RuntimeType::any(),
            DescriptorKind::Signature(_) | DescriptorKind::Tuple(_) | DescriptorKind::TypeParam(_) => {
                log::debug!(
                    "[typebridge::convert] no runtime shape for {}, using interface {{}}",
                    shape
                );
                RuntimeType::any()
            }
            // `underlying()` strips names; kept for exhaustiveness.
            DescriptorKind::Named(named) => self.to_runtime_type(&named.underlying),
        };
        log::trace!("[typebridge::convert] {} -> {}", shape, ty);
        ty
    }

    fn struct_field(&self, field: &FieldDescriptor) -> StructField {
        let converted = StructField::new(field.name.clone(), self.to_runtime_type(&field.ty))
            .with_tag(field.tag.clone());
        if field.embedded {
            converted.anonymous()
        } else {
            converted
        }
    }
}

fn chan_dir(dir: ChanDirection) -> ChanDir {
    match dir {
        ChanDirection::RecvOnly => ChanDir::Recv,
        ChanDirection::SendOnly => ChanDir::Send,
        ChanDirection::SendRecv => ChanDir::Both,
    }
}

impl<R> std::fmt::Debug for TypeConverter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeConverter")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
