// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::cast_possible_truncation)] // Expected values are computed with casts
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::float_cmp)]

//! Randomized numeric coercion against Rust's own conversion semantics.

use typebridge::descriptor::{BasicKind, TypeDescriptor};
use typebridge::runtime::RuntimeValue;
use typebridge::{TypeConverter, Value};

const SAMPLES: usize = 2_000;

fn convert(converter: &TypeConverter, input: &Value, kind: BasicKind) -> RuntimeValue {
    converter
        .to_value(Some(input), &TypeDescriptor::basic(kind))
        .expect("numeric conversion")
        .into_raw()
}

#[test]
fn integers_wrap_like_twos_complement() {
    let converter = TypeConverter::default();
    let mut rng = fastrand::Rng::with_seed(0x7e57);

    for _ in 0..SAMPLES {
        let n = rng.i64(..);
        let input = Value::from(n);
        assert_eq!(convert(&converter, &input, BasicKind::Int8), RuntimeValue::Int8(n as i8));
        assert_eq!(convert(&converter, &input, BasicKind::Uint16), RuntimeValue::Uint16(n as u16));
        assert_eq!(convert(&converter, &input, BasicKind::Int32), RuntimeValue::Int32(n as i32));
        assert_eq!(convert(&converter, &input, BasicKind::Uint64), RuntimeValue::Uint64(n as u64));
        assert_eq!(convert(&converter, &input, BasicKind::Int), RuntimeValue::Int(n as isize));

        let u = rng.u64(..);
        let input = Value::from(u);
        assert_eq!(convert(&converter, &input, BasicKind::Int64), RuntimeValue::Int64(u as i64));
        assert_eq!(convert(&converter, &input, BasicKind::Uint8), RuntimeValue::Uint8(u as u8));
        assert_eq!(convert(&converter, &input, BasicKind::Uintptr), RuntimeValue::Uintptr(u as usize));
    }
}

#[test]
fn widening_round_trips_are_lossless() {
    let converter = TypeConverter::default();
    let mut rng = fastrand::Rng::with_seed(42);

    for _ in 0..SAMPLES {
        let n = rng.i32(..);
        let wide = converter
            .to_value(Some(&Value::from(n)), &TypeDescriptor::basic(BasicKind::Int64))
            .expect("widen");
        let back = converter
            .to_value(Some(&wide), &TypeDescriptor::basic(BasicKind::Int32))
            .expect("narrow");
        assert_eq!(back.raw(), &RuntimeValue::Int32(n));

        let as_float = converter
            .to_value(Some(&Value::from(n)), &TypeDescriptor::basic(BasicKind::Float64))
            .expect("to float");
        assert_eq!(as_float.as_f64(), Some(f64::from(n)));
    }
}

#[test]
fn floats_truncate_toward_zero_and_saturate() {
    let converter = TypeConverter::default();
    let mut rng = fastrand::Rng::with_seed(7);

    for _ in 0..SAMPLES {
        let f = (rng.f64() - 0.5) * 1e6;
        let input = Value::from(f);
        assert_eq!(convert(&converter, &input, BasicKind::Int32), RuntimeValue::Int32(f.trunc() as i32));
        assert_eq!(convert(&converter, &input, BasicKind::Uint8), RuntimeValue::Uint8(f as u8));
        assert_eq!(convert(&converter, &input, BasicKind::Float32), RuntimeValue::Float32(f as f32));
    }

    let nan = Value::from(f64::NAN);
    assert_eq!(convert(&converter, &nan, BasicKind::Int64), RuntimeValue::Int64(0));
    let inf = Value::from(f64::INFINITY);
    assert_eq!(convert(&converter, &inf, BasicKind::Int16), RuntimeValue::Int16(i16::MAX));
}
