// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tests for the type and value converter.

use super::*;
use crate::config::{BridgeConfig, CacheMode};
use crate::descriptor::{
    BasicKind, ChanDirection, FieldDescriptor, MethodDescriptor, StructBuilder, TypeDescriptor,
};
use crate::error::BridgeError;
use crate::registry::{ExternalTypeRegistry, NoExternalTypes, RegistryBuilder};
use crate::runtime::{
    ChanDir, ForeignBinding, ForeignType, ForeignValue, RuntimeKind, RuntimeType, RuntimeValue,
    WORD_SIZE,
};
use crate::value::Value;

fn basic(kind: BasicKind) -> TypeDescriptor {
    TypeDescriptor::basic(kind)
}

#[test]
fn test_composite_shapes() {
    let converter = TypeConverter::default();

    let desc = TypeDescriptor::map(
        basic(BasicKind::String),
        TypeDescriptor::slice(TypeDescriptor::pointer(TypeDescriptor::array(
            4,
            basic(BasicKind::Float32),
        ))),
    );
    let ty = converter.to_runtime_type(&desc);
    assert_eq!(ty.to_string(), "map[string][]*[4]float32");
    assert!(ty.name().is_none());
}

#[test]
fn test_named_without_override_uses_shape() {
    let converter = TypeConverter::default();
    let celsius = TypeDescriptor::named("main", "Celsius", basic(BasicKind::Float64));
    assert_eq!(converter.to_runtime_type(&celsius), RuntimeType::float64());
}

#[test]
fn test_shadowed_local_types_do_not_share_cache_entries() {
    // `type T int` in one function, `type T string` in another.
    let converter = TypeConverter::default();
    let ints = TypeDescriptor::slice(TypeDescriptor::named("main", "T", basic(BasicKind::Int)));
    let strings =
        TypeDescriptor::slice(TypeDescriptor::named("main", "T", basic(BasicKind::String)));

    let first = converter.to_runtime_type(&ints);
    let second = converter.to_runtime_type(&strings);
    assert_eq!(first, RuntimeType::slice_of(RuntimeType::int()));
    assert_eq!(second, RuntimeType::slice_of(RuntimeType::string()));
    assert_eq!(second, TypeConverter::default().to_runtime_type(&strings));
    assert_eq!(converter.to_runtime_type(&ints), first);
}

#[test]
fn test_struct_fields_preserved() {
    let converter = TypeConverter::default();
    let desc = StructBuilder::new()
        .tagged_field("A", basic(BasicKind::Int32), r#"json:"a""#)
        .push(FieldDescriptor::new("B", basic(BasicKind::String)).embedded())
        .build();

    let ty = converter.to_runtime_type(&desc);
    let fields = ty.fields().expect("struct");
    assert_eq!(fields.len(), 2);

    assert_eq!(fields[0].name, "A");
    assert_eq!(fields[0].ty, RuntimeType::int32());
    assert_eq!(fields[0].tag.as_str(), r#"json:"a""#);
    assert!(!fields[0].anonymous);

    assert_eq!(fields[1].name, "B");
    assert_eq!(fields[1].ty, RuntimeType::string());
    assert!(fields[1].tag.is_empty());
    assert!(fields[1].anonymous);
    assert_eq!(fields[1].offset, WORD_SIZE.max(4));
}

#[test]
fn test_channel_directions() {
    let converter = TypeConverter::default();
    let cases = [
        (ChanDirection::SendRecv, ChanDir::Both),
        (ChanDirection::SendOnly, ChanDir::Send),
        (ChanDirection::RecvOnly, ChanDir::Recv),
    ];
    for (dir, expected) in cases {
        let ty = converter.to_runtime_type(&TypeDescriptor::channel(dir, basic(BasicKind::Int)));
        match ty.kind() {
            RuntimeKind::Chan { dir, elem } => {
                assert_eq!(*dir, expected);
                assert_eq!(elem, &RuntimeType::int());
            }
            other => panic!("expected channel, got {:?}", other),
        }
    }
}

#[test]
fn test_interfaces_and_other_shapes_collapse_to_any() {
    let converter = TypeConverter::default();
    let stringer = TypeDescriptor::interface(vec![MethodDescriptor::new(
        "String",
        TypeDescriptor::signature(Vec::new(), vec![basic(BasicKind::String)], false),
    )]);
    let shapes = [
        TypeDescriptor::empty_interface(),
        stringer.clone(),
        TypeDescriptor::named("fmt", "Stringer", stringer),
        TypeDescriptor::signature(vec![basic(BasicKind::Int)], Vec::new(), false),
        TypeDescriptor::tuple(vec![basic(BasicKind::Int), basic(BasicKind::Bool)]),
        TypeDescriptor::type_param("T"),
    ];
    for shape in &shapes {
        let ty = converter.to_runtime_type(shape);
        assert!(ty.ptr_eq(&RuntimeType::any()), "{} -> {}", shape, ty);
    }
}

#[test]
fn test_override_on_nested_descriptor() {
    let duration = RuntimeType::named("time.Duration", &RuntimeType::int64());
    let registry = RegistryBuilder::new()
        .register_named("time", "Duration", basic(BasicKind::Int64), duration.clone())
        .build();
    let converter = TypeConverter::new(&registry);

    let timeouts = TypeDescriptor::slice(TypeDescriptor::named(
        "time",
        "Duration",
        basic(BasicKind::Int64),
    ));
    let ty = converter.to_runtime_type(&timeouts);
    assert_eq!(ty.elem(), Some(&duration));
    assert_eq!(ty.to_string(), "[]time.Duration");
}

#[test]
fn test_override_beats_struct_synthesis() {
    let shape = StructBuilder::new()
        .basic_field("fd", BasicKind::Int)
        .basic_field("name", BasicKind::String)
        .build();
    let native = RuntimeType::named("os.File", &RuntimeType::struct_of(Vec::new()));
    let registry = RegistryBuilder::new()
        .register_named("os", "File", shape.clone(), native.clone())
        .build();
    let converter = TypeConverter::new(registry);

    let file = TypeDescriptor::named("os", "File", shape);
    assert_eq!(converter.to_runtime_type(&file), native);
    // Resolver hits bypass the cache.
    assert!(converter.cache().is_empty());
}

#[test]
#[should_panic(expected = "unsupported basic kind")]
fn test_untyped_nil_is_fatal() {
    let converter = TypeConverter::default();
    let _ = converter.to_runtime_type(&basic(BasicKind::UntypedNil));
}

#[test]
#[should_panic(expected = "unsafe.Pointer")]
fn test_unsafe_pointer_in_struct_is_fatal() {
    let converter = TypeConverter::default();
    let desc = StructBuilder::new()
        .basic_field("ok", BasicKind::Bool)
        .basic_field("raw", BasicKind::UnsafePointer)
        .build();
    let _ = converter.to_runtime_type(&desc);
}

#[test]
fn test_cache_serves_repeated_shapes() {
    let converter = TypeConverter::default();
    let make = || {
        StructBuilder::new()
            .basic_field("x", BasicKind::Float64)
            .basic_field("y", BasicKind::Float64)
            .build()
    };
    let first = converter.to_runtime_type(&make());
    let second = converter.to_runtime_type(&make());
    assert!(first.ptr_eq(&second));
    assert!(converter.cache().stats().hits >= 1);
    assert!(converter.cache().is_pinned(&basic(BasicKind::Float64)));
}

#[test]
fn test_disabled_cache_still_converts() {
    let config = BridgeConfig::default()
        .with_cache(CacheMode::Disabled)
        .with_pinned_basics(false);
    let converter = TypeConverter::with_config(NoExternalTypes, config);
    let desc = TypeDescriptor::slice(basic(BasicKind::Uint8));
    let first = converter.to_runtime_type(&desc);
    let second = converter.to_runtime_type(&desc);
    assert_eq!(first, second);
    assert!(!first.ptr_eq(&second));
    assert!(converter.cache().is_empty());
}

#[test]
fn test_to_value_absent_is_zero() {
    let converter = TypeConverter::default();
    let desc = TypeDescriptor::array(2, basic(BasicKind::String));
    let v = converter.to_value(None, &desc).expect("zero");
    assert_eq!(v.ty(), &converter.to_runtime_type(&desc));
    assert_eq!(
        v.raw(),
        &RuntimeValue::Array(vec![RuntimeValue::String(String::new()); 2])
    );
}

#[test]
fn test_to_value_nil_interface_is_zero() {
    let converter = TypeConverter::default();
    let nil = Value::zero(RuntimeType::any());
    let v = converter
        .to_value(Some(&nil), &basic(BasicKind::Int16))
        .expect("zero");
    assert_eq!(v.raw(), &RuntimeValue::Int16(0));
}

#[test]
fn test_to_value_unwraps_interfaces() {
    let converter = TypeConverter::default();
    let boxed = Value::from(7u8)
        .convert(&RuntimeType::any())
        .expect("box");
    let v = converter
        .to_value(Some(&boxed), &basic(BasicKind::Int64))
        .expect("unbox");
    assert_eq!(v.as_i64(), Some(7));

    let reboxed = converter
        .to_value(Some(&boxed), &TypeDescriptor::empty_interface())
        .expect("rebox");
    assert_eq!(reboxed, boxed);
}

#[test]
fn test_to_value_string_to_number_fails() {
    let converter = TypeConverter::default();
    let err = converter
        .to_value(Some(&Value::from("42")), &basic(BasicKind::Int))
        .unwrap_err();
    assert!(matches!(err, BridgeError::IncompatibleValueConversion { .. }));
    assert_eq!(err.to_string(), "cannot convert value of type string to type int");
}

#[test]
fn test_to_value_from_type_matches_to_value() {
    let converter = TypeConverter::default();
    let desc = basic(BasicKind::UntypedFloat);
    let ty = converter.to_runtime_type(&desc);
    let input = Value::from(3i32);
    assert_eq!(
        converter.to_value(Some(&input), &desc),
        converter.to_value_from_type(Some(&input), &ty)
    );
}

/// Host-side duration in whole seconds.
#[derive(Debug, PartialEq)]
struct Seconds(i64);

/// Accepts integers; `strict` hooks hand back a bare integer payload.
struct SecondsBinding {
    strict: bool,
}

impl ForeignBinding for SecondsBinding {
    fn type_name(&self) -> &str {
        "clock.Seconds"
    }

    fn zero(&self) -> RuntimeValue {
        RuntimeValue::Foreign(ForeignValue::new(Seconds(0)))
    }

    fn admits(&self, value: &RuntimeValue) -> bool {
        matches!(value, RuntimeValue::Foreign(v) if v.downcast_ref::<Seconds>().is_some())
    }

    fn convert(&self, value: &Value) -> Option<RuntimeValue> {
        let secs = value.as_i64()?;
        if self.strict {
            Some(RuntimeValue::Int64(secs))
        } else {
            Some(RuntimeValue::Foreign(ForeignValue::new(Seconds(secs))))
        }
    }
}

fn seconds_converter(strict: bool) -> (TypeConverter<ExternalTypeRegistry>, TypeDescriptor) {
    let desc = TypeDescriptor::named("clock", "Seconds", basic(BasicKind::Int64));
    let registry = RegistryBuilder::new()
        .register(
            desc.clone(),
            RuntimeType::foreign(ForeignType::new(SecondsBinding { strict })),
        )
        .build();
    (TypeConverter::new(registry), desc)
}

#[test]
fn test_foreign_hook_accepts_value() {
    let (converter, desc) = seconds_converter(false);

    let value = converter.to_value(Some(&Value::from(90i32)), &desc).expect("hook accepts ints");
    assert_eq!(value.ty().name(), Some("clock.Seconds"));
    match value.raw() {
        RuntimeValue::Foreign(host) => assert_eq!(host.downcast_ref::<Seconds>(), Some(&Seconds(90))),
        other => panic!("unexpected payload {:?}", other),
    }

    let zero = converter.to_value(None, &desc).expect("zero value");
    assert!(zero.ty().admits(zero.raw()));
}

#[test]
fn test_foreign_hook_rejects_value() {
    let (converter, desc) = seconds_converter(false);

    let err = converter
        .to_value(Some(&Value::from("soon")), &desc)
        .expect_err("hook rejects strings");
    assert_eq!(
        err,
        BridgeError::IncompatibleValueConversion {
            from: "string".into(),
            to: "clock.Seconds".into(),
        }
    );
}

#[test]
fn test_foreign_hook_payload_must_be_admitted() {
    let (converter, desc) = seconds_converter(true);
    let ty = converter.to_runtime_type(&desc);

    let shape_err = BridgeError::ValueShapeMismatch {
        ty: "clock.Seconds".into(),
    };
    assert_eq!(Value::new(ty, RuntimeValue::Int64(5)).expect_err("bare int"), shape_err);
    assert_eq!(
        converter.to_value(Some(&Value::from(5i64)), &desc).expect_err("bare int from hook"),
        shape_err
    );
}
