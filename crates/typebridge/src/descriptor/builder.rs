// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for struct descriptors.

use crate::descriptor::{BasicKind, DescriptorKind, FieldDescriptor, TypeDescriptor};

/// Builder for struct [`TypeDescriptor`]s.
#[derive(Debug, Default)]
pub struct StructBuilder {
    fields: Vec<FieldDescriptor>,
}

impl StructBuilder {
    /// Create an empty struct builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    pub fn field(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.fields.push(FieldDescriptor::new(name, ty));
        self
    }

    /// Add a field of a basic kind.
    pub fn basic_field(self, name: impl Into<String>, kind: BasicKind) -> Self {
        self.field(name, TypeDescriptor::basic(kind))
    }

    /// Add a field with a struct tag.
    pub fn tagged_field(
        mut self,
        name: impl Into<String>,
        ty: TypeDescriptor,
        tag: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldDescriptor::new(name, ty).with_tag(tag));
        self
    }

    /// Add an embedded field. The field name is the type's name, or its
    /// textual form for unnamed types.
    pub fn embedded_field(mut self, ty: TypeDescriptor) -> Self {
        let name = match ty.kind() {
            DescriptorKind::Named(named) => named.name.clone(),
            _ => ty.to_string(),
        };
        self.fields.push(FieldDescriptor::new(name, ty).embedded());
        self
    }

    /// Add a pre-built field descriptor.
    pub fn push(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the struct descriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::structure(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order_and_flags() {
        let inner = TypeDescriptor::named("io", "Reader", TypeDescriptor::empty_interface());
        let desc = StructBuilder::new()
            .basic_field("id", BasicKind::Uint32)
            .tagged_field("name", TypeDescriptor::basic(BasicKind::String), "db:\"name\"")
            .embedded_field(inner)
            .build();

        let fields = desc.fields().expect("struct fields");
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["id", "name", "Reader"]);
        assert_eq!(fields[1].tag, "db:\"name\"");
        assert!(fields[2].embedded);
        assert!(!fields[0].embedded);
    }
}
