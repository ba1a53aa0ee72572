//! Event types and sinks for observing render jobs.
//!
//! This module defines [`RenderEvent`] and a set of sinks and adapters to
//! emit, collect, or forward events while a [`crate::render::job::RenderJob`]
//! is driven by the [`crate::render::engine::FieldEngine`].
use std::sync::Arc;

use crate::render::FieldFrame;

/// Describes events emitted while computing a field frame.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum RenderEvent {
    /// Emitted when a render job starts computing (not on cache hits).
    Started {
        /// Fingerprint of the requested configuration.
        fingerprint: u64,
        /// Number of sensors with usable readings.
        sensor_count: usize,
    },

    /// Progress through the distance-building phase.
    Progress {
        /// Completion percentage, 0 to 100.
        percent: u8,
        /// Human-readable stage label.
        stage: String,
    },

    /// Emitted when one sensor's distance grid finished building.
    GridBuilt {
        /// Index of the sensor in the configuration.
        sensor_index: usize,
    },

    /// Delivered exactly once per applied request, never after cancellation.
    Completed {
        /// The finished frame.
        frame: Arc<FieldFrame>,
        /// Whether the frame came from the cache without recomputation.
        from_cache: bool,
    },
}

/// Discriminant for [`RenderEvent`], used by sinks to skip payload
/// construction for events nobody listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderEventKind {
    Started,
    Progress,
    GridBuilt,
    Completed,
}

/// A generic event sink that accepts [`RenderEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: RenderEvent);

    /// Whether this sink cares about events of the given kind.
    fn wants(&self, _kind: RenderEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: RenderEvent) {}

    #[inline]
    fn wants(&self, _kind: RenderEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(RenderEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(RenderEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(RenderEvent),
{
    #[inline]
    fn send(&mut self, event: RenderEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<RenderEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<RenderEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: RenderEvent) {
        self.events.push(event);
    }
}
