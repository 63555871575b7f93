// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversion Benchmark
//!
//! Measures descriptor to runtime type conversion with and without the type
//! cache, and value coercion on the hot paths the evaluator hits:
//! - cold struct conversion (cache disabled)
//! - cached struct conversion
//! - numeric narrowing and string to byte-slice coercion

#![allow(clippy::uninlined_format_args)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use typebridge::descriptor::{BasicKind, StructBuilder, TypeDescriptor};
use typebridge::{BridgeConfig, CacheMode, NoExternalTypes, TypeConverter, Value};

fn sensor_reading() -> TypeDescriptor {
    let vector3 = StructBuilder::new()
        .basic_field("x", BasicKind::Float64)
        .basic_field("y", BasicKind::Float64)
        .basic_field("z", BasicKind::Float64)
        .build();
    StructBuilder::new()
        .basic_field("sensor_id", BasicKind::Uint32)
        .tagged_field("location", TypeDescriptor::basic(BasicKind::String), r#"json:"loc""#)
        .field("position", TypeDescriptor::named("geo", "Vector3", vector3.clone()))
        .field("history", TypeDescriptor::slice(vector3))
        .field(
            "labels",
            TypeDescriptor::map(
                TypeDescriptor::basic(BasicKind::String),
                TypeDescriptor::empty_interface(),
            ),
        )
        .build()
}

fn bench_type_conversion(c: &mut Criterion) {
    let desc = sensor_reading();

    let cold = TypeConverter::with_config(
        NoExternalTypes,
        BridgeConfig::default().with_cache(CacheMode::Disabled),
    );
    c.bench_function("to_runtime_type_cold", |b| {
        b.iter(|| black_box(cold.to_runtime_type(black_box(&desc))));
    });

    let cached = TypeConverter::default();
    let _ = cached.to_runtime_type(&desc);
    c.bench_function("to_runtime_type_cached", |b| {
        b.iter(|| black_box(cached.to_runtime_type(black_box(&desc))));
    });

    c.bench_function("to_value_zero_struct", |b| {
        b.iter(|| black_box(cached.to_value(None, black_box(&desc))));
    });
}

fn bench_value_coercion(c: &mut Criterion) {
    let converter = TypeConverter::default();
    let uint8 = TypeDescriptor::basic(BasicKind::Uint8);
    let bytes = TypeDescriptor::slice(TypeDescriptor::basic(BasicKind::BYTE));
    let number = Value::from(1_000_003i64);
    let text = Value::from("the quick brown fox jumps over the lazy dog");

    c.bench_function("coerce_int64_to_uint8", |b| {
        b.iter(|| black_box(converter.to_value(Some(black_box(&number)), &uint8)));
    });
    c.bench_function("coerce_string_to_bytes", |b| {
        b.iter(|| black_box(converter.to_value(Some(black_box(&text)), &bytes)));
    });
}

criterion_group!(benches, bench_type_conversion, bench_value_coercion);
criterion_main!(benches);
