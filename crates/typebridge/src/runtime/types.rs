// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type representations.

use crate::runtime::{ForeignType, RuntimeValue};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// Size of a machine word on the running platform.
pub const WORD_SIZE: usize = std::mem::size_of::<usize>();

/// Channel direction of a runtime channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// Receive-only.
    Recv,
    /// Send-only.
    Send,
    /// Bidirectional.
    Both,
}

impl ChanDir {
    /// Check if values can be received through this direction.
    pub fn can_recv(self) -> bool {
        matches!(self, Self::Recv | Self::Both)
    }

    /// Check if values can be sent through this direction.
    pub fn can_send(self) -> bool {
        matches!(self, Self::Send | Self::Both)
    }
}

impl fmt::Display for ChanDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Recv => "receive-only",
            Self::Send => "send-only",
            Self::Both => "bidirectional",
        })
    }
}

/// Runtime type kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuntimeKind {
    Bool,
    /// Platform-width signed integer.
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Platform-width unsigned integer.
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    /// Fixed-length sequence.
    Array { len: usize, elem: RuntimeType },
    /// Dynamic-length sequence.
    Slice(RuntimeType),
    /// Associative container.
    Map { key: RuntimeType, value: RuntimeType },
    /// Pointer to `elem`.
    Pointer(RuntimeType),
    /// Channel of `elem`.
    Chan { dir: ChanDir, elem: RuntimeType },
    /// Struct with laid out fields.
    Struct(Vec<StructField>),
    /// The universal interface: holds a value of any type.
    Any,
    /// Natively backed type supplied by a foreign binding.
    Foreign(ForeignType),
}

impl RuntimeKind {
    /// Check if this is an integer kind.
    pub fn is_integer(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    /// Check if this is a signed integer kind.
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Self::Int | Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64
        )
    }

    /// Check if this is an unsigned integer kind.
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::Uint | Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64 | Self::Uintptr
        )
    }

    /// Check if this is a floating-point kind.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Check if this is a complex kind.
    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Integer or floating-point kind.
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }
}

/// Struct field of a runtime struct type.
///
/// `index` and `offset` are assigned by [`RuntimeType::struct_of`]; values
/// supplied by the caller are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructField {
    /// Field name.
    pub name: String,
    /// Field type.
    pub ty: RuntimeType,
    /// Struct tag.
    pub tag: StructTag,
    /// Embedded field.
    pub anonymous: bool,
    /// Position in the struct.
    pub index: usize,
    /// Byte offset within the struct.
    pub offset: usize,
}

impl StructField {
    /// Create a new untagged field.
    pub fn new(name: impl Into<String>, ty: RuntimeType) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: StructTag::default(),
            anonymous: false,
            index: 0,
            offset: 0,
        }
    }

    /// Set the struct tag.
    pub fn with_tag(mut self, tag: impl Into<StructTag>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Mark as embedded.
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}

/// Opaque struct tag string, e.g. `json:"name,omitempty" db:"name"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StructTag(String);

impl StructTag {
    /// Raw tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the tag is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value associated with `key`, or `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.lookup(key).unwrap_or("")
    }

    /// Value associated with `key` in the conventional `key:"value"` format.
    ///
    /// Returns `None` if the key is absent or the tag is malformed before it
    /// is reached. Escapes inside the quoted value are returned as written.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut rest = self.0.as_str();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                return None;
            }

            let name_end = rest
                .find(|c: char| c <= ' ' || c == ':' || c == '"' || c == '\x7f')
                .unwrap_or(rest.len());
            if name_end == 0 || !rest[name_end..].starts_with(":\"") {
                return None;
            }
            let name = &rest[..name_end];
            rest = &rest[name_end + 2..];

            // Find the closing quote, skipping escaped characters.
            let bytes = rest.as_bytes();
            let mut i = 0;
            while i < bytes.len() && bytes[i] != b'"' {
                if bytes[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            if i >= bytes.len() {
                return None;
            }
            let value = &rest[..i];
            rest = &rest[i + 1..];

            if name == key {
                return Some(value);
            }
        }
    }
}

impl From<&str> for StructTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for StructTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
struct RuntimeNode {
    name: Option<Arc<str>>,
    kind: RuntimeKind,
    hash: u64,
}

/// Immutable runtime type handle.
///
/// Cloning is an `Arc` increment; handles are shared by every value of the
/// type. Equality is structural (including the name), with a pointer fast
/// path.
#[derive(Clone)]
pub struct RuntimeType {
    node: Arc<RuntimeNode>,
}

impl RuntimeType {
    /// Create an unnamed runtime type of the given kind.
    ///
    /// Struct kinds should go through [`RuntimeType::struct_of`] so that
    /// field indices and offsets are assigned.
    pub fn new(kind: RuntimeKind) -> Self {
        Self::build(None, kind)
    }

    fn build(name: Option<Arc<str>>, kind: RuntimeKind) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        kind.hash(&mut hasher);
        Self {
            node: Arc::new(RuntimeNode {
                name,
                kind,
                hash: hasher.finish(),
            }),
        }
    }

    /// Create a named type sharing the shape of `underlying`.
    pub fn named(name: impl AsRef<str>, underlying: &RuntimeType) -> Self {
        Self::build(Some(Arc::from(name.as_ref())), underlying.kind().clone())
    }

    /// The universal `any` type. Every call returns the same handle.
    pub fn any() -> Self {
        static ANY: OnceLock<RuntimeType> = OnceLock::new();
        ANY.get_or_init(|| Self::new(RuntimeKind::Any)).clone()
    }

    pub fn bool() -> Self {
        Self::new(RuntimeKind::Bool)
    }

    pub fn int() -> Self {
        Self::new(RuntimeKind::Int)
    }

    pub fn int32() -> Self {
        Self::new(RuntimeKind::Int32)
    }

    pub fn int64() -> Self {
        Self::new(RuntimeKind::Int64)
    }

    pub fn uint8() -> Self {
        Self::new(RuntimeKind::Uint8)
    }

    pub fn float64() -> Self {
        Self::new(RuntimeKind::Float64)
    }

    pub fn string() -> Self {
        Self::new(RuntimeKind::String)
    }

    /// `[len]elem`
    pub fn array_of(len: usize, elem: RuntimeType) -> Self {
        Self::new(RuntimeKind::Array { len, elem })
    }

    /// `[]elem`
    pub fn slice_of(elem: RuntimeType) -> Self {
        Self::new(RuntimeKind::Slice(elem))
    }

    /// `map[key]value`
    pub fn map_of(key: RuntimeType, value: RuntimeType) -> Self {
        Self::new(RuntimeKind::Map { key, value })
    }

    /// `*elem`
    pub fn pointer_to(elem: RuntimeType) -> Self {
        Self::new(RuntimeKind::Pointer(elem))
    }

    /// Channel of `elem` with direction `dir`.
    pub fn chan_of(dir: ChanDir, elem: RuntimeType) -> Self {
        Self::new(RuntimeKind::Chan { dir, elem })
    }

    /// Natively backed type.
    pub fn foreign(foreign: ForeignType) -> Self {
        let name = Arc::from(foreign.type_name());
        Self::build(Some(name), RuntimeKind::Foreign(foreign))
    }

    /// Struct type from fields in declaration order.
    ///
    /// Assigns each field its index and a byte offset following the runtime
    /// layout rules (each field aligned to its type's alignment).
    pub fn struct_of(fields: Vec<StructField>) -> Self {
        let mut offset = 0usize;
        let fields = fields
            .into_iter()
            .enumerate()
            .map(|(index, mut field)| {
                offset = align_up(offset, field.ty.align());
                field.index = index;
                field.offset = offset;
                offset = offset.saturating_add(field.ty.size());
                field
            })
            .collect();
        Self::new(RuntimeKind::Struct(fields))
    }

    /// Get the type kind.
    pub fn kind(&self) -> &RuntimeKind {
        &self.node.kind
    }

    /// Type name, if the type is named.
    pub fn name(&self) -> Option<&str> {
        self.node.name.as_deref()
    }

    /// Unnamed type with the same shape.
    pub fn underlying(&self) -> RuntimeType {
        if self.node.name.is_none() {
            self.clone()
        } else {
            Self::new(self.node.kind.clone())
        }
    }

    /// Check if this is the universal `any` type (named or not).
    pub fn is_any(&self) -> bool {
        matches!(self.kind(), RuntimeKind::Any)
    }

    /// Get fields if this is a struct.
    pub fn fields(&self) -> Option<&[StructField]> {
        match self.kind() {
            RuntimeKind::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields()?.iter().find(|f| f.name == name)
    }

    /// Element type of arrays, slices, pointers, channels and maps.
    pub fn elem(&self) -> Option<&RuntimeType> {
        match self.kind() {
            RuntimeKind::Array { elem, .. }
            | RuntimeKind::Slice(elem)
            | RuntimeKind::Pointer(elem)
            | RuntimeKind::Chan { elem, .. } => Some(elem),
            RuntimeKind::Map { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Check if both handles point at the same node.
    pub fn ptr_eq(&self, other: &RuntimeType) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Size in bytes of a value of this type.
    pub fn size(&self) -> usize {
        match self.kind() {
            RuntimeKind::Bool | RuntimeKind::Int8 | RuntimeKind::Uint8 => 1,
            RuntimeKind::Int16 | RuntimeKind::Uint16 => 2,
            RuntimeKind::Int32 | RuntimeKind::Uint32 | RuntimeKind::Float32 => 4,
            RuntimeKind::Int64
            | RuntimeKind::Uint64
            | RuntimeKind::Float64
            | RuntimeKind::Complex64 => 8,
            RuntimeKind::Complex128 => 16,
            RuntimeKind::Int | RuntimeKind::Uint | RuntimeKind::Uintptr => WORD_SIZE,
            // Data pointer + length.
            RuntimeKind::String => 2 * WORD_SIZE,
            // Data pointer + length + capacity.
            RuntimeKind::Slice(_) => 3 * WORD_SIZE,
            RuntimeKind::Map { .. } | RuntimeKind::Pointer(_) | RuntimeKind::Chan { .. } => {
                WORD_SIZE
            }
            // Type word + data word.
            RuntimeKind::Any => 2 * WORD_SIZE,
            RuntimeKind::Array { len, elem } => elem.size().saturating_mul(*len),
            RuntimeKind::Struct(fields) => {
                let end = fields
                    .last()
                    .map(|f| f.offset.saturating_add(f.ty.size()))
                    .unwrap_or(0);
                align_up(end, self.align())
            }
            RuntimeKind::Foreign(foreign) => foreign.size(),
        }
    }

    /// Alignment in bytes of a value of this type.
    pub fn align(&self) -> usize {
        match self.kind() {
            RuntimeKind::Bool | RuntimeKind::Int8 | RuntimeKind::Uint8 => 1,
            RuntimeKind::Int16 | RuntimeKind::Uint16 => 2,
            RuntimeKind::Int32
            | RuntimeKind::Uint32
            | RuntimeKind::Float32
            | RuntimeKind::Complex64 => 4,
            RuntimeKind::Int64 | RuntimeKind::Uint64 | RuntimeKind::Float64 => 8usize.min(WORD_SIZE),
            RuntimeKind::Complex128 => 8usize.min(WORD_SIZE),
            RuntimeKind::Array { elem, .. } => elem.align(),
            RuntimeKind::Struct(fields) => fields.iter().map(|f| f.ty.align()).max().unwrap_or(1),
            RuntimeKind::Foreign(foreign) => foreign.align(),
            _ => WORD_SIZE,
        }
    }

    /// Check that `value` is an instance of this type.
    ///
    /// Pointer targets and channel contents are not inspected.
    pub fn admits(&self, value: &RuntimeValue) -> bool {
        match (self.kind(), value) {
            (RuntimeKind::Bool, RuntimeValue::Bool(_))
            | (RuntimeKind::Int, RuntimeValue::Int(_))
            | (RuntimeKind::Int8, RuntimeValue::Int8(_))
            | (RuntimeKind::Int16, RuntimeValue::Int16(_))
            | (RuntimeKind::Int32, RuntimeValue::Int32(_))
            | (RuntimeKind::Int64, RuntimeValue::Int64(_))
            | (RuntimeKind::Uint, RuntimeValue::Uint(_))
            | (RuntimeKind::Uint8, RuntimeValue::Uint8(_))
            | (RuntimeKind::Uint16, RuntimeValue::Uint16(_))
            | (RuntimeKind::Uint32, RuntimeValue::Uint32(_))
            | (RuntimeKind::Uint64, RuntimeValue::Uint64(_))
            | (RuntimeKind::Uintptr, RuntimeValue::Uintptr(_))
            | (RuntimeKind::Float32, RuntimeValue::Float32(_))
            | (RuntimeKind::Float64, RuntimeValue::Float64(_))
            | (RuntimeKind::Complex64, RuntimeValue::Complex64(_))
            | (RuntimeKind::Complex128, RuntimeValue::Complex128(_))
            | (RuntimeKind::String, RuntimeValue::String(_))
            | (RuntimeKind::Pointer(_), RuntimeValue::Pointer(_))
            | (RuntimeKind::Any, RuntimeValue::Interface(_)) => true,
            (RuntimeKind::Chan { dir, .. }, RuntimeValue::Chan(chan)) => {
                chan.as_ref().map_or(true, |c| c.dir() == *dir)
            }
            (RuntimeKind::Array { len, elem }, RuntimeValue::Array(items)) => {
                items.len() == *len && items.iter().all(|item| elem.admits(item))
            }
            (RuntimeKind::Slice(elem), RuntimeValue::Slice(items)) => items
                .iter()
                .flatten()
                .all(|item| elem.admits(item)),
            (RuntimeKind::Map { key, value }, RuntimeValue::Map(entries)) => entries
                .iter()
                .flatten()
                .all(|(k, v)| key.admits(k) && value.admits(v)),
            (RuntimeKind::Struct(fields), RuntimeValue::Struct(items)) => {
                fields.len() == items.len()
                    && fields.iter().zip(items).all(|(f, item)| f.ty.admits(item))
            }
            (RuntimeKind::Foreign(foreign), value) => foreign.admits(value),
            _ => false,
        }
    }
}

fn align_up(offset: usize, align: usize) -> usize {
    let align = align.max(1);
    offset.div_ceil(align).saturating_mul(align)
}

impl PartialEq for RuntimeType {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.node.hash == other.node.hash
                && self.node.name == other.node.name
                && self.node.kind == other.node.kind)
    }
}

impl Eq for RuntimeType {}

impl Hash for RuntimeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.node.hash);
    }
}

impl fmt::Debug for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuntimeType({})", self)
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        match self.kind() {
            RuntimeKind::Bool => f.write_str("bool"),
            RuntimeKind::Int => f.write_str("int"),
            RuntimeKind::Int8 => f.write_str("int8"),
            RuntimeKind::Int16 => f.write_str("int16"),
            RuntimeKind::Int32 => f.write_str("int32"),
            RuntimeKind::Int64 => f.write_str("int64"),
            RuntimeKind::Uint => f.write_str("uint"),
            RuntimeKind::Uint8 => f.write_str("uint8"),
            RuntimeKind::Uint16 => f.write_str("uint16"),
            RuntimeKind::Uint32 => f.write_str("uint32"),
            RuntimeKind::Uint64 => f.write_str("uint64"),
            RuntimeKind::Uintptr => f.write_str("uintptr"),
            RuntimeKind::Float32 => f.write_str("float32"),
            RuntimeKind::Float64 => f.write_str("float64"),
            RuntimeKind::Complex64 => f.write_str("complex64"),
            RuntimeKind::Complex128 => f.write_str("complex128"),
            RuntimeKind::String => f.write_str("string"),
            RuntimeKind::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            RuntimeKind::Slice(elem) => write!(f, "[]{}", elem),
            RuntimeKind::Map { key, value } => write!(f, "map[{}]{}", key, value),
            RuntimeKind::Pointer(elem) => write!(f, "*{}", elem),
            RuntimeKind::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {}", elem),
                ChanDir::Send => write!(f, "chan<- {}", elem),
                ChanDir::Recv => write!(f, "<-chan {}", elem),
            },
            RuntimeKind::Struct(fields) => {
                if fields.is_empty() {
                    return f.write_str("struct {}");
                }
                f.write_str("struct { ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{} {}", field.name, field.ty)?;
                    if !field.tag.is_empty() {
                        write!(f, " {:?}", field.tag.as_str())?;
                    }
                }
                f.write_str(" }")
            }
            RuntimeKind::Any => f.write_str("interface {}"),
            RuntimeKind::Foreign(foreign) => f.write_str(foreign.type_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_layout() {
        let st = RuntimeType::struct_of(vec![
            StructField::new("flag", RuntimeType::bool()),
            StructField::new("count", RuntimeType::int64()),
            StructField::new("small", RuntimeType::new(RuntimeKind::Int16)),
        ]);
        let fields = st.fields().expect("struct");
        assert_eq!(fields[0].offset, 0);
        assert_eq!(fields[1].offset, 8);
        assert_eq!(fields[2].offset, 16);
        assert_eq!(fields[2].index, 2);
        assert_eq!(st.align(), 8);
        assert_eq!(st.size(), 24);
    }

    #[test]
    fn test_empty_struct_layout() {
        let st = RuntimeType::struct_of(Vec::new());
        assert_eq!(st.size(), 0);
        assert_eq!(st.align(), 1);
        assert_eq!(st.to_string(), "struct {}");
    }

    #[test]
    fn test_struct_tag_lookup() {
        let tag = StructTag::from(r#"json:"name,omitempty" db:"user_name""#);
        assert_eq!(tag.lookup("json"), Some("name,omitempty"));
        assert_eq!(tag.get("db"), "user_name");
        assert_eq!(tag.lookup("xml"), None);
        assert_eq!(tag.get("xml"), "");

        let escaped = StructTag::from(r#"re:"a\"b" k:"v""#);
        assert_eq!(escaped.lookup("re"), Some(r#"a\"b"#));
        assert_eq!(escaped.lookup("k"), Some("v"));

        assert_eq!(StructTag::from("malformed").lookup("malformed"), None);
    }

    #[test]
    fn test_structural_equality() {
        let a = RuntimeType::map_of(RuntimeType::string(), RuntimeType::slice_of(RuntimeType::int()));
        let b = RuntimeType::map_of(RuntimeType::string(), RuntimeType::slice_of(RuntimeType::int()));
        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_named_types_are_distinct() {
        let duration = RuntimeType::named("time.Duration", &RuntimeType::int64());
        assert_ne!(duration, RuntimeType::int64());
        assert_eq!(duration.underlying(), RuntimeType::int64());
        assert_eq!(duration.to_string(), "time.Duration");
        assert_eq!(duration.kind(), &RuntimeKind::Int64);
    }

    #[test]
    fn test_any_is_shared() {
        assert!(RuntimeType::any().ptr_eq(&RuntimeType::any()));
        assert_eq!(RuntimeType::any().to_string(), "interface {}");
    }

    #[test]
    fn test_display() {
        let chan = RuntimeType::chan_of(ChanDir::Send, RuntimeType::string());
        assert_eq!(chan.to_string(), "chan<- string");
        let ptr = RuntimeType::pointer_to(RuntimeType::array_of(3, RuntimeType::uint8()));
        assert_eq!(ptr.to_string(), "*[3]uint8");
    }

    #[test]
    fn test_admits() {
        let arr = RuntimeType::array_of(2, RuntimeType::int32());
        assert!(arr.admits(&RuntimeValue::Array(vec![
            RuntimeValue::Int32(1),
            RuntimeValue::Int32(2)
        ])));
        assert!(!arr.admits(&RuntimeValue::Array(vec![RuntimeValue::Int32(1)])));
        assert!(!arr.admits(&RuntimeValue::Array(vec![
            RuntimeValue::Int32(1),
            RuntimeValue::Int64(2)
        ])));

        let slice = RuntimeType::slice_of(RuntimeType::string());
        assert!(slice.admits(&RuntimeValue::Slice(None)));
        assert!(!slice.admits(&RuntimeValue::Map(None)));
    }
}
