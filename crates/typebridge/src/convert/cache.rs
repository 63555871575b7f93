// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent cache of converted runtime types.
//!
//! The TypeCache ensures that structural conversion of a descriptor happens
//! once per structural identity. Subsequent lookups are served from a
//! `DashMap` (unbounded mode) or from an LRU behind a read lock (bounded
//! mode). In bounded mode a secondary dashset keeps track of "pinned"
//! entries that must never be evicted (basic kinds, by default).
//!
//! Builders run with no lock held: conversion is recursive and re-enters
//! the cache for child descriptors.

use crate::config::CacheMode;
use crate::descriptor::TypeDescriptor;
use crate::runtime::RuntimeType;
use dashmap::{DashMap, DashSet};
use lru::LruCache;
use parking_lot::RwLock;

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

enum Store {
    Disabled,
    Unbounded(DashMap<TypeDescriptor, RuntimeType>),
    Bounded {
        inner: RwLock<LruCache<TypeDescriptor, RuntimeType>>,
        pinned: DashSet<TypeDescriptor>,
    },
}

/// Memo table from descriptors to runtime types.
pub struct TypeCache {
    mode: CacheMode,
    store: Store,
    stats: RwLock<CacheStats>,
}

impl TypeCache {
    #[must_use]
    pub fn new(mode: CacheMode) -> Self {
        let store = match mode {
            CacheMode::Disabled => Store::Disabled,
            CacheMode::Unbounded => Store::Unbounded(DashMap::new()),
            CacheMode::Bounded(capacity) => Store::Bounded {
                inner: RwLock::new(LruCache::new(capacity)),
                pinned: DashSet::new(),
            },
        };
        Self {
            mode,
            store,
            stats: RwLock::new(CacheStats::default()),
        }
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// Cached runtime type for `key`, building and storing it on a miss.
    ///
    /// When two threads miss on the same key, both build and the first
    /// stored result is returned to both.
    pub fn get_or_build<F>(&self, key: &TypeDescriptor, build: F) -> RuntimeType
    where
        F: FnOnce() -> RuntimeType,
    {
        match &self.store {
            Store::Disabled => {
                self.record_miss();
                build()
            }
            Store::Unbounded(map) => {
                if let Some(hit) = map.get(key).map(|entry| entry.value().clone()) {
                    self.record_hit();
                    return hit;
                }
                let built = build();
                self.record_miss();
                map.entry(key.clone()).or_insert(built).value().clone()
            }
            Store::Bounded { inner, pinned } => {
                if let Some(hit) = inner.read().peek(key).cloned() {
                    self.record_hit();
                    return hit;
                }

                let built = build();
                self.record_miss();

                let mut cache = inner.write();
                if let Some(raced) = cache.get(key) {
                    return raced.clone();
                }
                if cache.len() >= cache.cap().get() && !self.free_slot(&mut cache, pinned) {
                    log::debug!(
                        "[typebridge::cache] full of pinned entries, not caching {}",
                        key
                    );
                    return built;
                }
                cache.put(key.clone(), built.clone());
                built
            }
        }
    }

    /// Protect `key` from eviction. No effect unless the cache is bounded.
    pub fn pin(&self, key: &TypeDescriptor) {
        if let Store::Bounded { pinned, .. } = &self.store {
            if !pinned.contains(key) {
                pinned.insert(key.clone());
            }
        }
    }

    /// Check if `key` is pinned.
    pub fn is_pinned(&self, key: &TypeDescriptor) -> bool {
        match &self.store {
            Store::Bounded { pinned, .. } => pinned.contains(key),
            _ => false,
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        match &self.store {
            Store::Disabled => 0,
            Store::Unbounded(map) => map.len(),
            Store::Bounded { inner, .. } => inner.read().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and pin, and reset the statistics.
    pub fn clear(&self) {
        match &self.store {
            Store::Disabled => {}
            Store::Unbounded(map) => map.clear(),
            Store::Bounded { inner, pinned } => {
                inner.write().clear();
                pinned.clear();
            }
        }
        *self.stats.write() = CacheStats::default();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        *self.stats.read()
    }

    fn free_slot(
        &self,
        cache: &mut LruCache<TypeDescriptor, RuntimeType>,
        pinned: &DashSet<TypeDescriptor>,
    ) -> bool {
        if cache.len() < cache.cap().get() {
            return true;
        }

        let attempts = cache.len();
        for _ in 0..attempts {
            match cache.pop_lru() {
                Some((old_key, old_value)) if pinned.contains(&old_key) => {
                    cache.put(old_key, old_value);
                }
                Some((old_key, _)) => {
                    log::debug!(
                        "[typebridge::cache] evicted {} (hash {:016x})",
                        old_key,
                        old_key.structural_hash()
                    );
                    self.record_eviction();
                    return true;
                }
                None => break,
            }
        }

        false
    }

    fn record_hit(&self) {
        let mut stats = self.stats.write();
        stats.hits = stats.hits.saturating_add(1);
    }

    fn record_miss(&self) {
        let mut stats = self.stats.write();
        stats.misses = stats.misses.saturating_add(1);
    }

    fn record_eviction(&self) {
        let mut stats = self.stats.write();
        stats.evictions = stats.evictions.saturating_add(1);
    }
}

impl std::fmt::Debug for TypeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeCache")
            .field("mode", &self.mode)
            .field("len", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}
