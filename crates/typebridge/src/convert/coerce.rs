// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value coercion between runtime types.
//!
//! Conversions are type-level: the semantic value is preserved where the
//! target can represent it, never the bit pattern.
//!
//! | Source              | Target                  | Result                                  |
//! |---------------------|-------------------------|-----------------------------------------|
//! | any                 | same type               | identity                                |
//! | any                 | `interface {}`          | boxed as the interface's dynamic value  |
//! | any                 | foreign type            | decided by the binding                  |
//! | integer / float     | integer / float         | wrap, truncate toward zero, or round    |
//! | complex             | complex                 | component-wise rounding                 |
//! | integer             | string                  | UTF-8 of the code point (or U+FFFD)     |
//! | string              | `[]uint8` / `[]int32`   | bytes / code points                     |
//! | `[]uint8`/`[]int32` | string                  | decoded text                            |
//! | T                   | U, same underlying type | payload retyped (struct tags ignored)   |
//! | `*T`                | `*U`, same underlying   | pointer retyped (both unnamed)          |
//! | `chan T`            | `<-chan T` / `chan<- T` | handle restricted                       |
//! | `[]T`               | `[N]T`                  | copied, lengths must match              |

use crate::error::{BridgeError, Result};
use crate::runtime::{ChanDir, Complex, RuntimeKind, RuntimeType, RuntimeValue};
use crate::value::Value;

/// Convert `value` to `target`.
pub(crate) fn convert(value: &Value, target: &RuntimeType) -> Result<Value> {
    let source = value.ty();
    if source == target {
        return Ok(value.clone());
    }
    log::trace!("[typebridge::coerce] {} -> {}", source, target);

    if let RuntimeKind::Foreign(foreign) = target.kind() {
        return match foreign.convert(value) {
            Some(raw) => Value::new(target.clone(), raw),
            None => Err(incompatible(source, target)),
        };
    }

    if target.is_any() {
        let raw = if source.is_any() {
            value.raw().clone()
        } else {
            RuntimeValue::Interface(Some(Box::new(value.clone())))
        };
        return Ok(Value::from_parts(target.clone(), raw));
    }

    if let Some(raw) = convert_by_kind(value.raw(), source.kind(), target.kind()) {
        return Ok(Value::from_parts(target.clone(), raw));
    }

    if identical_underlying(source.kind(), target.kind()) {
        return Ok(Value::from_parts(target.clone(), value.raw().clone()));
    }

    match (source.kind(), target.kind()) {
        (RuntimeKind::Pointer(from), RuntimeKind::Pointer(to))
            if source.name().is_none()
                && target.name().is_none()
                && identical_underlying(from.kind(), to.kind()) =>
        {
            Ok(Value::from_parts(target.clone(), value.raw().clone()))
        }
        (
            RuntimeKind::Chan {
                dir: ChanDir::Both,
                elem: from,
            },
            RuntimeKind::Chan { dir, elem: to },
        ) if from == to && (source.name().is_none() || target.name().is_none()) => {
            restrict_channel(value.raw(), *dir)
                .map(|raw| Value::from_parts(target.clone(), raw))
                .ok_or_else(|| incompatible(source, target))
        }
        (RuntimeKind::Slice(from), RuntimeKind::Array { len, elem: to }) if from == to => {
            slice_to_array(value.raw(), *len).map(|raw| Value::from_parts(target.clone(), raw))
        }
        _ => Err(incompatible(source, target)),
    }
}

fn incompatible(source: &RuntimeType, target: &RuntimeType) -> BridgeError {
    BridgeError::IncompatibleValueConversion {
        from: source.to_string(),
        to: target.to_string(),
    }
}

/// Numeric payload widened to 64 bits.
#[derive(Debug, Clone, Copy)]
enum Num {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Num {
    fn of(raw: &RuntimeValue) -> Option<Num> {
        raw.as_i64()
            .map(Num::Signed)
            .or_else(|| raw.as_u64().map(Num::Unsigned))
            .or_else(|| raw.as_f64().map(Num::Float))
    }
}

macro_rules! cast_num {
    ($num:expr, $t:ty) => {
        match $num {
            Num::Signed(v) => v as $t,
            Num::Unsigned(v) => v as $t,
            Num::Float(v) => v as $t,
        }
    };
}

/// Numeric value of kind `target`. Integer targets wrap integers and
/// truncate floats toward zero with saturation; float targets round to
/// nearest.
fn numeric(num: Num, target: &RuntimeKind) -> Option<RuntimeValue> {
    let raw = match target {
        RuntimeKind::Int => RuntimeValue::Int(cast_num!(num, isize)),
        RuntimeKind::Int8 => RuntimeValue::Int8(cast_num!(num, i8)),
        RuntimeKind::Int16 => RuntimeValue::Int16(cast_num!(num, i16)),
        RuntimeKind::Int32 => RuntimeValue::Int32(cast_num!(num, i32)),
        RuntimeKind::Int64 => RuntimeValue::Int64(cast_num!(num, i64)),
        RuntimeKind::Uint => RuntimeValue::Uint(cast_num!(num, usize)),
        RuntimeKind::Uint8 => RuntimeValue::Uint8(cast_num!(num, u8)),
        RuntimeKind::Uint16 => RuntimeValue::Uint16(cast_num!(num, u16)),
        RuntimeKind::Uint32 => RuntimeValue::Uint32(cast_num!(num, u32)),
        RuntimeKind::Uint64 => RuntimeValue::Uint64(cast_num!(num, u64)),
        RuntimeKind::Uintptr => RuntimeValue::Uintptr(cast_num!(num, usize)),
        RuntimeKind::Float32 => RuntimeValue::Float32(cast_num!(num, f32)),
        RuntimeKind::Float64 => RuntimeValue::Float64(cast_num!(num, f64)),
        _ => return None,
    };
    Some(raw)
}

fn code_point_string(num: Num) -> String {
    let c = match num {
        Num::Signed(v) => u32::try_from(v).ok().and_then(char::from_u32),
        Num::Unsigned(v) => u32::try_from(v).ok().and_then(char::from_u32),
        Num::Float(_) => None,
    };
    c.unwrap_or(char::REPLACEMENT_CHARACTER).to_string()
}

/// Conversions decided by the kinds alone.
fn convert_by_kind(
    raw: &RuntimeValue,
    from: &RuntimeKind,
    to: &RuntimeKind,
) -> Option<RuntimeValue> {
    if from.is_numeric() && to.is_numeric() {
        return numeric(Num::of(raw)?, to);
    }

    if from.is_complex() {
        let c = raw.as_complex()?;
        return match to {
            RuntimeKind::Complex64 => Some(RuntimeValue::Complex64(Complex::new(
                c.re as f32,
                c.im as f32,
            ))),
            RuntimeKind::Complex128 => Some(RuntimeValue::Complex128(c)),
            _ => None,
        };
    }

    match (from, to) {
        (from, RuntimeKind::String) if from.is_integer() => {
            Some(RuntimeValue::String(code_point_string(Num::of(raw)?)))
        }
        (RuntimeKind::String, RuntimeKind::Slice(elem)) => {
            let s = raw.as_str()?;
            match elem.kind() {
                RuntimeKind::Uint8 => Some(RuntimeValue::Slice(Some(
                    s.bytes().map(RuntimeValue::Uint8).collect(),
                ))),
                RuntimeKind::Int32 => Some(RuntimeValue::Slice(Some(
                    s.chars().map(|c| RuntimeValue::Int32(c as i32)).collect(),
                ))),
                _ => None,
            }
        }
        (RuntimeKind::Slice(elem), RuntimeKind::String) => {
            let items = match raw {
                RuntimeValue::Slice(items) => items.as_deref().unwrap_or(&[]),
                _ => return None,
            };
            match elem.kind() {
                RuntimeKind::Uint8 => {
                    let bytes: Vec<u8> = items
                        .iter()
                        .filter_map(|item| match item {
                            RuntimeValue::Uint8(b) => Some(*b),
                            _ => None,
                        })
                        .collect();
                    Some(RuntimeValue::String(String::from_utf8_lossy(&bytes).into_owned()))
                }
                RuntimeKind::Int32 => Some(RuntimeValue::String(
                    items
                        .iter()
                        .filter_map(RuntimeValue::as_i64)
                        .map(|cp| {
                            u32::try_from(cp)
                                .ok()
                                .and_then(char::from_u32)
                                .unwrap_or(char::REPLACEMENT_CHARACTER)
                        })
                        .collect(),
                )),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Same name and identical underlying shape, struct tags ignored.
fn identical_ignoring_tags(a: &RuntimeType, b: &RuntimeType) -> bool {
    a.ptr_eq(b) || (a.name() == b.name() && identical_underlying(a.kind(), b.kind()))
}

fn identical_underlying(a: &RuntimeKind, b: &RuntimeKind) -> bool {
    match (a, b) {
        (RuntimeKind::Array { len: la, elem: ea }, RuntimeKind::Array { len: lb, elem: eb }) => {
            la == lb && identical_ignoring_tags(ea, eb)
        }
        (RuntimeKind::Slice(ea), RuntimeKind::Slice(eb))
        | (RuntimeKind::Pointer(ea), RuntimeKind::Pointer(eb)) => identical_ignoring_tags(ea, eb),
        (RuntimeKind::Map { key: ka, value: va }, RuntimeKind::Map { key: kb, value: vb }) => {
            identical_ignoring_tags(ka, kb) && identical_ignoring_tags(va, vb)
        }
        (RuntimeKind::Chan { dir: da, elem: ea }, RuntimeKind::Chan { dir: db, elem: eb }) => {
            da == db && identical_ignoring_tags(ea, eb)
        }
        (RuntimeKind::Struct(fa), RuntimeKind::Struct(fb)) => {
            fa.len() == fb.len()
                && fa.iter().zip(fb).all(|(x, y)| {
                    x.name == y.name
                        && x.anonymous == y.anonymous
                        && identical_ignoring_tags(&x.ty, &y.ty)
                })
        }
        // Primitives, `any` and foreign kinds carry no nested types.
        _ => a == b,
    }
}

fn restrict_channel(raw: &RuntimeValue, dir: ChanDir) -> Option<RuntimeValue> {
    match raw {
        RuntimeValue::Chan(None) => Some(RuntimeValue::Chan(None)),
        RuntimeValue::Chan(Some(chan)) => chan.restrict(dir).map(|c| RuntimeValue::Chan(Some(c))),
        _ => None,
    }
}

fn slice_to_array(raw: &RuntimeValue, want: usize) -> Result<RuntimeValue> {
    let items = match raw {
        RuntimeValue::Slice(items) => items.as_deref().unwrap_or(&[]),
        _ => {
            return Err(BridgeError::ValueShapeMismatch {
                ty: "slice".to_string(),
            })
        }
    };
    if items.len() != want {
        return Err(BridgeError::SliceLengthMismatch {
            len: items.len(),
            want,
        });
    }
    Ok(RuntimeValue::Array(items.to_vec()))
}
