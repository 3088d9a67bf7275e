use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::trace;

use crate::model::ColorAssignment;

/// Scope of cached colors: one palette, one exact id set, one theme/strategy label.
///
/// Colors depend on every other id colored in the same pass, so entries are
/// only ever reused for the identical set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey {
    pub palette: u64,
    pub id_set: u64,
    pub theme: String,
}

impl CacheKey {
    pub fn new(palette: u64, id_set: u64, theme: impl Into<String>) -> Self {
        Self { palette, id_set, theme: theme.into() }
    }
}

/// FNV-1a over the sorted distinct ids, length-prefixed; independent of input order.
pub fn id_set_fingerprint<S: AsRef<str>>(ids: &[S]) -> u64 {
    let distinct: BTreeSet<&str> = ids.iter().map(|s| s.as_ref()).collect();
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    let mut feed = |bytes: &[u8]| {
        for b in bytes {
            hash ^= *b as u64;
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
    };
    for id in distinct {
        feed(&(id.len() as u64).to_le_bytes());
        feed(id.as_bytes());
    }
    hash
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    color: String,
    last_used_tick: u64,
}

type Slot = (CacheKey, String);

/// Caller-owned memo of id -> color, bounded by a number of cached ids.
///
/// Eviction is LRU by a logical tick; every touch gets a fresh tick so the
/// order is total and deterministic. A capacity of 0 disables caching.
/// Entries assume a region's geometry does not change under a stable id.
#[derive(Debug)]
pub struct ColorCache {
    capacity: usize,
    tick: u64,
    entries: BTreeMap<Slot, CacheEntry>,
    by_tick: BTreeMap<u64, Slot>,
    stats: CacheStats,
}

impl ColorCache {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, tick: 0, entries: BTreeMap::new(), by_tick: BTreeMap::new(), stats: CacheStats::default() }
    }

    pub fn capacity(&self) -> usize { self.capacity }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn stats(&self) -> CacheStats { self.stats }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_tick.clear();
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn touch(&mut self, slot: &Slot) -> Option<&str> {
        let tick = self.next_tick();
        let entry = self.entries.get_mut(slot)?;
        self.by_tick.remove(&entry.last_used_tick);
        entry.last_used_tick = tick;
        self.by_tick.insert(tick, slot.clone());
        Some(entry.color.as_str())
    }

    pub fn get(&mut self, key: &CacheKey, id: &str) -> Option<&str> {
        let slot = (key.clone(), id.to_string());
        if self.entries.contains_key(&slot) {
            self.stats.hits += 1;
            self.touch(&slot)
        } else {
            self.stats.misses += 1;
            None
        }
    }

    pub fn insert(&mut self, key: &CacheKey, id: &str, color: &str) {
        if self.capacity == 0 {
            return;
        }
        let slot = (key.clone(), id.to_string());
        let tick = self.next_tick();
        if let Some(old) = self.entries.insert(slot.clone(), CacheEntry { color: color.to_string(), last_used_tick: tick }) {
            self.by_tick.remove(&old.last_used_tick);
        }
        self.by_tick.insert(tick, slot);
        while self.entries.len() > self.capacity {
            self.evict_lru();
        }
    }

    fn evict_lru(&mut self) {
        let Some((_, slot)) = self.by_tick.pop_first() else { return };
        self.entries.remove(&slot);
        self.stats.evictions += 1;
        trace!(id = %slot.1, theme = %slot.0.theme, "color cache eviction");
    }

    pub fn insert_assignment(&mut self, key: &CacheKey, assignment: &ColorAssignment) {
        for (id, color) in assignment.iter() {
            self.insert(key, id, color);
        }
    }

    /// Full hit only: `Some` when every id is cached under `key`, else `None`
    /// (counted as one miss, nothing touched).
    pub fn lookup_assignment<S: AsRef<str>>(&mut self, key: &CacheKey, ids: &[S]) -> Option<ColorAssignment> {
        let slots: Vec<Slot> = ids.iter().map(|id| (key.clone(), id.as_ref().to_string())).collect();
        if slots.is_empty() || !slots.iter().all(|s| self.entries.contains_key(s)) {
            self.stats.misses += 1;
            return None;
        }
        self.stats.hits += 1;
        let mut out = ColorAssignment::new();
        for slot in &slots {
            if let Some(color) = self.touch(slot) {
                out.insert(slot.1.clone(), color.to_string());
            }
        }
        Some(out)
    }
}
