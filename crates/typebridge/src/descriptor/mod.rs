// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static type descriptors.
//!
//! A [`TypeDescriptor`] is the structural description of a type as produced
//! by front-end analysis. Descriptors are immutable and cheap to clone: the
//! node lives behind an `Arc`, so a named type and the struct it wraps can be
//! shared by every field, element and signature that mentions them.
//!
//! # Identity
//!
//! Descriptors compare structurally. A named type is identified by its
//! declaration: the qualified name together with the underlying descriptor.
//! Two function-local declarations may share `main.T` while denoting
//! different shapes, so the name alone is not enough. The structural hash is
//! computed once at construction, which keeps lookups in the external
//! registry and the type cache O(1).
//!
//! # Example
//!
//! ```rust
//! use typebridge::descriptor::{BasicKind, StructBuilder, TypeDescriptor};
//!
//! let point = StructBuilder::new()
//!     .tagged_field("X", TypeDescriptor::basic(BasicKind::Int32), r#"json:"x""#)
//!     .tagged_field("Y", TypeDescriptor::basic(BasicKind::Int32), r#"json:"y""#)
//!     .build();
//! let named = TypeDescriptor::named("geo", "Point", point.clone());
//!
//! assert_eq!(named.underlying(), &point);
//! assert_eq!(named.to_string(), "geo.Point");
//! ```

mod basic;
mod builder;

pub use basic::BasicKind;
pub use builder::StructBuilder;

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Channel direction as declared in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDirection {
    /// `chan T`
    SendRecv,
    /// `chan<- T`
    SendOnly,
    /// `<-chan T`
    RecvOnly,
}

/// Structural kind of a descriptor.
///
/// `Signature`, `Tuple` and `TypeParam` are the shapes the runtime has no
/// precise representation for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// Primitive type.
    Basic(BasicKind),
    /// `[len]elem`
    Array { len: u64, elem: TypeDescriptor },
    /// `[]elem`
    Slice(TypeDescriptor),
    /// `map[key]elem`
    Map {
        key: TypeDescriptor,
        elem: TypeDescriptor,
    },
    /// `*elem`
    Pointer(TypeDescriptor),
    /// Struct with ordered fields.
    Struct(Vec<FieldDescriptor>),
    /// Interface with its method set.
    Interface(Vec<MethodDescriptor>),
    /// Channel with direction.
    Channel {
        dir: ChanDirection,
        elem: TypeDescriptor,
    },
    /// Declared (named) type.
    Named(NamedType),
    /// Function signature.
    Signature(SignatureDescriptor),
    /// Multi-value result list.
    Tuple(Vec<TypeDescriptor>),
    /// Unresolved generic type parameter.
    TypeParam(String),
}

#[derive(Debug)]
struct DescriptorNode {
    kind: DescriptorKind,
    hash: u64,
}

/// Immutable, shareable type descriptor.
#[derive(Clone)]
pub struct TypeDescriptor {
    node: Arc<DescriptorNode>,
}

impl TypeDescriptor {
    /// Create a descriptor from its kind.
    pub fn new(kind: DescriptorKind) -> Self {
        let mut hasher = DefaultHasher::new();
        kind.hash(&mut hasher);
        Self {
            node: Arc::new(DescriptorNode {
                kind,
                hash: hasher.finish(),
            }),
        }
    }

    pub fn basic(kind: BasicKind) -> Self {
        Self::new(DescriptorKind::Basic(kind))
    }

    pub fn array(len: u64, elem: TypeDescriptor) -> Self {
        Self::new(DescriptorKind::Array { len, elem })
    }

    pub fn slice(elem: TypeDescriptor) -> Self {
        Self::new(DescriptorKind::Slice(elem))
    }

    pub fn map(key: TypeDescriptor, elem: TypeDescriptor) -> Self {
        Self::new(DescriptorKind::Map { key, elem })
    }

    pub fn pointer(elem: TypeDescriptor) -> Self {
        Self::new(DescriptorKind::Pointer(elem))
    }

    /// Create a struct descriptor. See also [`StructBuilder`].
    pub fn structure(fields: Vec<FieldDescriptor>) -> Self {
        Self::new(DescriptorKind::Struct(fields))
    }

    pub fn interface(methods: Vec<MethodDescriptor>) -> Self {
        Self::new(DescriptorKind::Interface(methods))
    }

    /// `interface{}`
    pub fn empty_interface() -> Self {
        Self::interface(Vec::new())
    }

    pub fn channel(dir: ChanDirection, elem: TypeDescriptor) -> Self {
        Self::new(DescriptorKind::Channel { dir, elem })
    }

    /// Create a named type. An empty `package` denotes a universe or
    /// function-local declaration.
    pub fn named(
        package: impl Into<String>,
        name: impl Into<String>,
        underlying: TypeDescriptor,
    ) -> Self {
        Self::new(DescriptorKind::Named(NamedType {
            package: package.into(),
            name: name.into(),
            underlying,
        }))
    }

    pub fn signature(
        params: Vec<TypeDescriptor>,
        results: Vec<TypeDescriptor>,
        variadic: bool,
    ) -> Self {
        Self::new(DescriptorKind::Signature(SignatureDescriptor {
            params,
            results,
            variadic,
        }))
    }

    pub fn tuple(elems: Vec<TypeDescriptor>) -> Self {
        Self::new(DescriptorKind::Tuple(elems))
    }

    pub fn type_param(name: impl Into<String>) -> Self {
        Self::new(DescriptorKind::TypeParam(name.into()))
    }

    /// Get the descriptor kind.
    pub fn kind(&self) -> &DescriptorKind {
        &self.node.kind
    }

    /// Structural shape of this descriptor: follows named types down to the
    /// first non-named descriptor.
    pub fn underlying(&self) -> &TypeDescriptor {
        let mut current = self;
        while let DescriptorKind::Named(named) = current.kind() {
            current = &named.underlying;
        }
        current
    }

    /// Check if this is a named type.
    pub fn is_named(&self) -> bool {
        matches!(self.kind(), DescriptorKind::Named(_))
    }

    /// Qualified name if this is a named type.
    pub fn name(&self) -> Option<String> {
        match self.kind() {
            DescriptorKind::Named(named) => Some(named.qualified_name()),
            _ => None,
        }
    }

    /// Get fields if the underlying shape is a struct.
    pub fn fields(&self) -> Option<&[FieldDescriptor]> {
        match self.underlying().kind() {
            DescriptorKind::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Check if both handles point at the same node.
    pub fn ptr_eq(&self, other: &TypeDescriptor) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    pub(crate) fn structural_hash(&self) -> u64 {
        self.node.hash
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.node.hash == other.node.hash && self.kind() == other.kind())
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.node.hash);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            DescriptorKind::Basic(kind) => write!(f, "{}", kind),
            DescriptorKind::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            DescriptorKind::Slice(elem) => write!(f, "[]{}", elem),
            DescriptorKind::Map { key, elem } => write!(f, "map[{}]{}", key, elem),
            DescriptorKind::Pointer(elem) => write!(f, "*{}", elem),
            DescriptorKind::Struct(fields) => {
                f.write_str("struct{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    if field.embedded {
                        write!(f, "{}", field.ty)?;
                    } else {
                        write!(f, "{} {}", field.name, field.ty)?;
                    }
                    if !field.tag.is_empty() {
                        write!(f, " {:?}", field.tag)?;
                    }
                }
                f.write_str("}")
            }
            DescriptorKind::Interface(methods) => {
                f.write_str("interface{")?;
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    // Method signatures print without the leading `func`.
                    let sig = method.signature.to_string();
                    write!(f, "{}{}", method.name, sig.trim_start_matches("func"))?;
                }
                f.write_str("}")
            }
            DescriptorKind::Channel { dir, elem } => match dir {
                ChanDirection::SendRecv => write!(f, "chan {}", elem),
                ChanDirection::SendOnly => write!(f, "chan<- {}", elem),
                ChanDirection::RecvOnly => write!(f, "<-chan {}", elem),
            },
            DescriptorKind::Named(named) => f.write_str(&named.qualified_name()),
            DescriptorKind::Signature(sig) => write!(f, "{}", sig),
            DescriptorKind::Tuple(elems) => {
                f.write_str("(")?;
                write_list(f, elems)?;
                f.write_str(")")
            }
            DescriptorKind::TypeParam(name) => f.write_str(name),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeDescriptor]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Struct field descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Field name (for embedded fields, the type name).
    pub name: String,
    /// Field type.
    pub ty: TypeDescriptor,
    /// Raw struct tag, empty if none.
    pub tag: String,
    /// Embedded (anonymous) field.
    pub embedded: bool,
}

impl FieldDescriptor {
    /// Create a new untagged, non-embedded field.
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: String::new(),
            embedded: false,
        }
    }

    /// Set the struct tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Mark as embedded.
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }
}

/// Interface method descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    pub name: String,
    /// Always a [`DescriptorKind::Signature`].
    pub signature: TypeDescriptor,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, signature: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            signature,
        }
    }
}

/// Declared type with its underlying descriptor.
#[derive(Debug, Clone)]
pub struct NamedType {
    /// Package path, empty for universe or local declarations.
    pub package: String,
    pub name: String,
    pub underlying: TypeDescriptor,
}

impl NamedType {
    /// `package.Name`, or just `Name` without a package.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

// Equal names over different shapes are different declarations.
impl PartialEq for NamedType {
    fn eq(&self, other: &Self) -> bool {
        self.package == other.package
            && self.name == other.name
            && self.underlying == other.underlying
    }
}

impl Eq for NamedType {}

impl Hash for NamedType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.package.hash(state);
        self.name.hash(state);
        self.underlying.hash(state);
    }
}

/// Function signature descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureDescriptor {
    pub params: Vec<TypeDescriptor>,
    pub results: Vec<TypeDescriptor>,
    /// The last parameter is a `...T` slice.
    pub variadic: bool,
}

impl fmt::Display for SignatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("func(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let last = i + 1 == self.params.len();
            match param.kind() {
                DescriptorKind::Slice(elem) if last && self.variadic => {
                    write!(f, "...{}", elem)?
                }
                _ => write!(f, "{}", param)?,
            }
        }
        f.write_str(")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " {}", single),
            many => {
                f.write_str(" (")?;
                write_list(f, many)?;
                f.write_str(")")
            }
        }
    }
}
