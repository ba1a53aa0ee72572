//! Configuration fingerprinting and the bounded frame cache.
//!
//! A fingerprint is a canonical hash of every input that affects the computed
//! field; two configs with equal fingerprints produce byte-identical frames.
//! The cache maps fingerprints to completed frames with a fixed capacity,
//! evicting the oldest-inserted entry on overflow (insertion order, not LRU).
//! Stale configurations need no explicit invalidation; their keys simply stop
//! matching.
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::config::FieldConfig;
use crate::render::FieldFrame;

/// Default number of frames retained.
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// Canonical hash of everything that affects the rendered field.
pub fn fingerprint(config: &FieldConfig) -> u64 {
    let mut hasher = DefaultHasher::new();

    config.canvas_width.hash(&mut hasher);
    config.canvas_height.hash(&mut hasher);

    config.walls.len().hash(&mut hasher);
    for wall in &config.walls {
        wall.a.x.to_bits().hash(&mut hasher);
        wall.a.y.to_bits().hash(&mut hasher);
        wall.b.x.to_bits().hash(&mut hasher);
        wall.b.y.to_bits().hash(&mut hasher);
    }

    config.sensors.len().hash(&mut hasher);
    for sensor in &config.sensors {
        sensor.id.hash(&mut hasher);
        sensor.position.x.to_bits().hash(&mut hasher);
        sensor.position.y.to_bits().hash(&mut hasher);
        match sensor.usable_reading() {
            Some(reading) => {
                1u8.hash(&mut hasher);
                reading.to_bits().hash(&mut hasher);
            }
            None => 0u8.hash(&mut hasher),
        }
    }

    for tunable in [
        config.comfort_min,
        config.comfort_max,
        config.ambient_temp,
        config.grid_scale,
        config.dominance_radius,
        config.decay_factor,
        config.flow_scale,
        config.blend_radius,
        config.blend_threshold,
    ] {
        tunable.to_bits().hash(&mut hasher);
    }

    hasher.finish()
}

/// Bounded cache of completed frames keyed by configuration fingerprint.
pub struct FrameCache {
    capacity: usize,
    entries: HashMap<u64, Arc<FieldFrame>>,
    order: VecDeque<u64>,
}

impl FrameCache {
    /// Creates an empty cache with [`DEFAULT_CACHE_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates an empty cache holding at most `capacity` frames.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Looks up a completed frame by fingerprint.
    pub fn get(&self, fingerprint: u64) -> Option<Arc<FieldFrame>> {
        self.entries.get(&fingerprint).cloned()
    }

    /// Inserts a completed frame, evicting the oldest-inserted entry if full.
    pub fn insert(&mut self, frame: Arc<FieldFrame>) {
        let key = frame.fingerprint;
        if self.entries.contains_key(&key) {
            self.entries.insert(key, frame);
            return;
        }

        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }

        self.entries.insert(key, frame);
        self.order.push_back(key);
    }

    /// Number of cached frames.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all cached frames.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl Default for FrameCache {
    fn default() -> Self {
        Self::new()
    }
}
