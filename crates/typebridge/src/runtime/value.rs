// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Untyped runtime payloads.
//!
//! A [`RuntimeValue`] only makes sense next to the [`RuntimeType`] it is an
//! instance of; the pair is a [`Value`].
//!
//! [`RuntimeType`]: crate::runtime::RuntimeType

use crate::error::{BridgeError, Result};
use crate::runtime::ChanDir;
use crate::runtime::ForeignValue;
use crate::value::Value;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Complex number with `T` real and imaginary parts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

/// Runtime payload of a value.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeValue {
    // Primitives
    Bool(bool),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Uintptr(usize),
    Float32(f32),
    Float64(f64),
    Complex64(Complex<f32>),
    Complex128(Complex<f64>),
    String(String),

    // Composites (`None` is nil)
    Array(Vec<RuntimeValue>),
    Slice(Option<Vec<RuntimeValue>>),
    Map(Option<Vec<(RuntimeValue, RuntimeValue)>>),
    Pointer(Option<Pointer>),
    Chan(Option<Channel>),
    Struct(Vec<RuntimeValue>),

    /// Content of an `any`: the dynamic value, `None` for a nil interface.
    Interface(Option<Box<Value>>),
    Foreign(ForeignValue),
}

impl RuntimeValue {
    /// Check if this is a nil slice, map, pointer, channel or interface.
    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Self::Slice(None)
                | Self::Map(None)
                | Self::Pointer(None)
                | Self::Chan(None)
                | Self::Interface(None)
        )
    }

    /// Signed integer payload widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v as i64),
            Self::Int8(v) => Some(v.into()),
            Self::Int16(v) => Some(v.into()),
            Self::Int32(v) => Some(v.into()),
            Self::Int64(v) => Some(v),
            _ => None,
        }
    }

    /// Unsigned integer payload widened to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::Uint(v) | Self::Uintptr(v) => Some(v as u64),
            Self::Uint8(v) => Some(v.into()),
            Self::Uint16(v) => Some(v.into()),
            Self::Uint32(v) => Some(v.into()),
            Self::Uint64(v) => Some(v),
            _ => None,
        }
    }

    /// Floating-point payload widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float32(v) => Some(v.into()),
            Self::Float64(v) => Some(v),
            _ => None,
        }
    }

    /// Complex payload widened to `Complex<f64>`.
    pub fn as_complex(&self) -> Option<Complex<f64>> {
        match *self {
            Self::Complex64(c) => Some(Complex::new(c.re.into(), c.im.into())),
            Self::Complex128(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of an array or non-nil slice.
    pub fn as_elements(&self) -> Option<&[RuntimeValue]> {
        match self {
            Self::Array(items) | Self::Slice(Some(items)) => Some(items),
            _ => None,
        }
    }
}

/// Shared, mutable cell a pointer refers to.
///
/// Cloning the pointer aliases the cell; equality is identity.
#[derive(Clone)]
pub struct Pointer {
    cell: Arc<RwLock<RuntimeValue>>,
}

impl Pointer {
    /// Allocate a new cell holding `value`.
    pub fn new(value: RuntimeValue) -> Self {
        Self {
            cell: Arc::new(RwLock::new(value)),
        }
    }

    /// Copy of the pointee.
    pub fn load(&self) -> RuntimeValue {
        self.cell.read().clone()
    }

    /// Replace the pointee.
    pub fn store(&self, value: RuntimeValue) {
        *self.cell.write() = value;
    }

    /// Run `f` on the pointee without copying it.
    pub fn with<R>(&self, f: impl FnOnce(&RuntimeValue) -> R) -> R {
        f(&self.cell.read())
    }

    pub fn ptr_eq(&self, other: &Pointer) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl PartialEq for Pointer {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pointer({:p})", Arc::as_ptr(&self.cell))
    }
}

struct ChannelInner {
    tx: Sender<RuntimeValue>,
    rx: Receiver<RuntimeValue>,
    capacity: usize,
}

/// Channel handle: a shared queue seen through a direction.
///
/// Restricting a bidirectional handle yields a handle on the same queue that
/// only allows one direction.
#[derive(Clone)]
pub struct Channel {
    inner: Arc<ChannelInner>,
    dir: ChanDir,
}

impl Channel {
    /// Create a bidirectional channel. A capacity of 0 makes every send wait
    /// for a matching receive.
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = channel::bounded(capacity);
        Self {
            inner: Arc::new(ChannelInner { tx, rx, capacity }),
            dir: ChanDir::Both,
        }
    }

    /// Direction of this handle.
    pub fn dir(&self) -> ChanDir {
        self.dir
    }

    /// Handle on the same queue with direction `dir`.
    ///
    /// Returns `None` when widening (a directional handle cannot regain the
    /// direction it lost).
    pub fn restrict(&self, dir: ChanDir) -> Option<Channel> {
        if self.dir != ChanDir::Both && self.dir != dir {
            return None;
        }
        Some(Self {
            inner: Arc::clone(&self.inner),
            dir,
        })
    }

    /// Send a value, blocking until there is room.
    pub fn send(&self, value: RuntimeValue) -> Result<()> {
        if !self.dir.can_send() {
            return Err(BridgeError::ChannelDirection {
                op: "send",
                dir: self.dir,
            });
        }
        self.inner
            .tx
            .send(value)
            .map_err(|_| BridgeError::ChannelClosed)
    }

    /// Receive a value, blocking until one is available.
    pub fn recv(&self) -> Result<RuntimeValue> {
        self.check_recv()?;
        self.inner.rx.recv().map_err(|_| BridgeError::ChannelClosed)
    }

    /// Receive a value if one is ready.
    pub fn try_recv(&self) -> Result<Option<RuntimeValue>> {
        self.check_recv()?;
        match self.inner.rx.try_recv() {
            Ok(value) => Ok(Some(value)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(BridgeError::ChannelClosed),
        }
    }

    /// Number of queued values.
    pub fn len(&self) -> usize {
        self.inner.rx.len()
    }

    /// Check if no value is queued.
    pub fn is_empty(&self) -> bool {
        self.inner.rx.is_empty()
    }

    /// Buffer capacity.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Check if both handles share the same queue.
    pub fn same_channel(&self, other: &Channel) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn check_recv(&self) -> Result<()> {
        if self.dir.can_recv() {
            Ok(())
        } else {
            Err(BridgeError::ChannelDirection {
                op: "recv",
                dir: self.dir,
            })
        }
    }
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        self.same_channel(other) && self.dir == other.dir
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Channel({:p}, {}, cap={})",
            Arc::as_ptr(&self.inner),
            self.dir,
            self.inner.capacity
        )
    }
}
