// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bridge configuration - single source of truth.
//!
//! Every tunable of the converter lives here. **Never hardcode cache sizes
//! elsewhere.**
//!
//! # Environment
//!
//! [`BridgeConfig::from_env`] reads `TYPEBRIDGE_CACHE`:
//!
//! | Value        | Mode                               |
//! |--------------|------------------------------------|
//! | `off`        | [`CacheMode::Disabled`]            |
//! | `unbounded`  | [`CacheMode::Unbounded`]           |
//! | `<n>` (n>0)  | [`CacheMode::Bounded`] with `n`    |

use std::num::NonZeroUsize;

/// Default capacity of the bounded type cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Environment variable overriding the cache mode.
pub const CACHE_ENV_VAR: &str = "TYPEBRIDGE_CACHE";

/// Memoization strategy for converted types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Convert every descriptor from scratch.
    Disabled,
    /// Insert-once map that never evicts.
    Unbounded,
    /// LRU cache holding at most `n` unpinned entries.
    Bounded(NonZeroUsize),
}

impl CacheMode {
    /// Parse the textual form used by [`CACHE_ENV_VAR`].
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "disabled" | "none" => Some(Self::Disabled),
            "unbounded" => Some(Self::Unbounded),
            other => other
                .parse::<usize>()
                .ok()
                .and_then(NonZeroUsize::new)
                .map(Self::Bounded),
        }
    }
}

impl Default for CacheMode {
    fn default() -> Self {
        match NonZeroUsize::new(DEFAULT_CACHE_CAPACITY) {
            Some(cap) => Self::Bounded(cap),
            None => Self::Unbounded,
        }
    }
}

/// Converter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Type cache strategy.
    pub cache: CacheMode,
    /// Keep basic-kind conversions in the cache regardless of LRU pressure.
    pub pin_basic_types: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            cache: CacheMode::default(),
            pin_basic_types: true,
        }
    }
}

impl BridgeConfig {
    /// Default configuration with overrides from the environment.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(CACHE_ENV_VAR) {
            Ok(raw) => config.apply_cache_setting(&raw),
            Err(_) => config,
        }
    }

    fn apply_cache_setting(self, raw: &str) -> Self {
        match CacheMode::parse(raw) {
            Some(mode) => {
                log::debug!("[config] {}={} -> {:?}", CACHE_ENV_VAR, raw, mode);
                self.with_cache(mode)
            }
            None => {
                log::warn!(
                    "[config] Invalid {} value '{}', keeping {:?}",
                    CACHE_ENV_VAR,
                    raw,
                    self.cache
                );
                self
            }
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: CacheMode) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn with_pinned_basics(mut self, pin: bool) -> Self {
        self.pin_basic_types = pin;
        self
    }
}
