//! Transient visual effect counters (hit flash, pickup sparkle, death fade).
//!
//! Counters are owned here, not by the objects they animate. Objects ask
//! whether an effect is still running; a terminal effect that is still
//! running keeps its object in the active set.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Short tint after taking a hit
    Flash,
    /// Expanding burst after loot is picked up
    Sparkle,
    /// Fade/shrink after an object is destroyed or felled
    Death,
}

/// A running counter for one `(key, kind)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectCounter {
    pub kind: EffectKind,
    /// Ticks left; always > 0 while stored
    pub remaining: u32,
    /// Length the counter was armed with
    pub duration: u32,
}

impl EffectCounter {
    /// Fraction of the effect still to play, from 1.0 (just armed) toward 0.0
    pub fn fraction(&self) -> f32 {
        self.remaining as f32 / self.duration as f32
    }
}

/// Per-kind durations, in frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectDurations {
    pub flash: u32,
    pub sparkle: u32,
    pub death: u32,
}

impl EffectDurations {
    pub fn for_kind(&self, kind: EffectKind) -> u32 {
        match kind {
            EffectKind::Flash => self.flash,
            EffectKind::Sparkle => self.sparkle,
            EffectKind::Death => self.death,
        }
    }
}

impl Default for EffectDurations {
    fn default() -> Self {
        Self {
            flash: FLASH_DURATION,
            sparkle: SPARKLE_DURATION,
            death: DEATH_FADE_DURATION,
        }
    }
}

/// Keyed effect counters. Each `(key, kind)` pair is either absent or active;
/// a counter that ticks down to zero is removed on the spot.
#[derive(Debug, Clone)]
pub struct EffectStateMachine<K> {
    counters: HashMap<(K, EffectKind), EffectCounter>,
}

impl<K: Copy + Eq + Hash> EffectStateMachine<K> {
    pub fn new() -> Self {
        Self {
            counters: HashMap::new(),
        }
    }

    /// Start a counter unless one is already running for this pair.
    /// A zero duration never becomes active.
    pub fn trigger(&mut self, key: K, kind: EffectKind, duration: u32) {
        if duration == 0 {
            return;
        }
        self.counters.entry((key, kind)).or_insert(EffectCounter {
            kind,
            remaining: duration,
            duration,
        });
    }

    /// Start a counter, restarting it if already running (e.g. flash on every hit).
    pub fn rearm(&mut self, key: K, kind: EffectKind, duration: u32) {
        if duration == 0 {
            self.clear(key, kind);
            return;
        }
        self.counters.insert(
            (key, kind),
            EffectCounter {
                kind,
                remaining: duration,
                duration,
            },
        );
    }

    /// Decrement a counter and return what is left. Reaching zero removes it.
    /// Ticking an absent pair does nothing and returns 0.
    pub fn tick(&mut self, key: K, kind: EffectKind) -> u32 {
        let Some(counter) = self.counters.get_mut(&(key, kind)) else {
            return 0;
        };

        counter.remaining -= 1;
        let remaining = counter.remaining;
        if remaining == 0 {
            self.counters.remove(&(key, kind));
        }
        remaining
    }

    pub fn is_active(&self, key: K, kind: EffectKind) -> bool {
        self.counters.contains_key(&(key, kind))
    }

    pub fn remaining(&self, key: K, kind: EffectKind) -> Option<u32> {
        self.counters.get(&(key, kind)).map(|c| c.remaining)
    }

    pub fn fraction(&self, key: K, kind: EffectKind) -> Option<f32> {
        self.counters.get(&(key, kind)).map(EffectCounter::fraction)
    }

    pub fn clear(&mut self, key: K, kind: EffectKind) {
        self.counters.remove(&(key, kind));
    }

    /// Drop every counter belonging to `key` (used when its object is removed)
    pub fn clear_key(&mut self, key: K) {
        self.counters.retain(|(k, _), _| *k != key);
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl<K: Copy + Eq + Hash> Default for EffectStateMachine<K> {
    fn default() -> Self {
        Self::new()
    }
}
