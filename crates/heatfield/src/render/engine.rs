//! Engine facade owning the frame cache and driving render jobs.
//!
//! One [`FieldEngine`] per card/view: caches are explicit engine state, never
//! process-wide singletons, so instances cannot pollute each other and tests
//! can observe them directly. Execution is cooperative on a single logical
//! thread; a new request supersedes and cancels the previous in-flight job,
//! so only the most recently requested configuration's result is ever applied.
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::FieldConfig;
use crate::error::{Error, Result};
use crate::field::color::Rgb;
use crate::render::cache::{fingerprint, FrameCache, DEFAULT_CACHE_CAPACITY};
use crate::render::events::{EventSink, RenderEvent, RenderEventKind};
use crate::render::job::{CancelHandle, JobStatus, RenderJob, DEFAULT_SLICE_BUDGET};
use crate::render::FieldFrame;

/// Counters observable by hosts and tests.
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct EngineStats {
    /// Distance grids actually built (cache hits build none).
    pub grid_builds: u64,
    /// Requests answered from the cache.
    pub cache_hits: u64,
    /// Frames completed and applied.
    pub frames_completed: u64,
}

/// Owns the frame cache and drives [`RenderJob`]s in bounded slices.
pub struct FieldEngine {
    cache: FrameCache,
    stats: EngineStats,
    slice_budget: Duration,
    active: Option<CancelHandle>,
    current: Option<Arc<FieldFrame>>,
}

impl FieldEngine {
    /// Creates an engine with the default cache capacity and slice budget.
    pub fn new() -> Self {
        Self {
            cache: FrameCache::with_capacity(DEFAULT_CACHE_CAPACITY),
            stats: EngineStats::default(),
            slice_budget: DEFAULT_SLICE_BUDGET,
            active: None,
            current: None,
        }
    }

    /// Sets the frame cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = FrameCache::with_capacity(capacity);
        self
    }

    /// Sets the wall-clock budget per [`FieldEngine::advance`] call.
    pub fn with_slice_budget(mut self, slice_budget: Duration) -> Self {
        self.slice_budget = slice_budget;
        self
    }

    /// Requests a frame for the given configuration.
    ///
    /// Cancels any outstanding job first (supersession). A fingerprint match
    /// in the cache applies the cached frame, emits `Completed` synchronously,
    /// and returns an already-finished job; otherwise the returned job must be
    /// driven with [`FieldEngine::advance`].
    pub fn request(
        &mut self,
        config: FieldConfig,
        sink: &mut dyn EventSink,
    ) -> Result<RenderJob> {
        config.validate()?;
        self.cancel_active();

        let fp = fingerprint(&config);
        if let Some(frame) = self.cache.get(fp) {
            self.stats.cache_hits += 1;
            self.current = Some(frame.clone());
            info!("Serving frame {fp:#018x} from cache.");
            if sink.wants(RenderEventKind::Completed) {
                sink.send(RenderEvent::Completed {
                    frame,
                    from_cache: true,
                });
            }
            return Ok(RenderJob::finished(config, fp));
        }

        let usable = config
            .sensors
            .iter()
            .filter(|s| s.usable_reading().is_some())
            .count();
        info!(
            "Starting render {fp:#018x}: {} walls, {usable} readable sensors.",
            config.walls.len()
        );
        if sink.wants(RenderEventKind::Started) {
            sink.send(RenderEvent::Started {
                fingerprint: fp,
                sensor_count: usable,
            });
        }

        let job = RenderJob::new(config, fp);
        self.active = Some(job.cancel_handle());
        Ok(job)
    }

    /// Drives a job for one slice budget.
    ///
    /// On completion the frame is cached, applied as the engine's current
    /// frame, and delivered through a single `Completed` event. Cancelled jobs
    /// produce no events and no cache write.
    pub fn advance(&mut self, job: &mut RenderJob, sink: &mut dyn EventSink) -> JobStatus {
        let status = job.advance(self.slice_budget, sink);

        if status == JobStatus::Complete {
            if let Some(frame) = job.take_frame() {
                self.stats.grid_builds += job.grids_built() as u64;
                self.stats.frames_completed += 1;
                self.cache.insert(frame.clone());
                self.current = Some(frame.clone());
                self.active = None;
                info!("Render {:#018x} complete.", frame.fingerprint);
                if sink.wants(RenderEventKind::Completed) {
                    sink.send(RenderEvent::Completed {
                        frame,
                        from_cache: false,
                    });
                }
            }
        }

        status
    }

    /// Requests and drives a frame to completion in one call.
    pub fn render_blocking(
        &mut self,
        config: FieldConfig,
        sink: &mut dyn EventSink,
    ) -> Result<Arc<FieldFrame>> {
        let mut job = self.request(config, sink)?;
        loop {
            match self.advance(&mut job, sink) {
                JobStatus::Running => continue,
                JobStatus::Complete => break,
                JobStatus::Cancelled => {
                    return Err(Error::Render("job cancelled before completion".into()))
                }
            }
        }
        self.current
            .clone()
            .ok_or_else(|| Error::Render("no frame applied after completion".into()))
    }

    /// Cancels the outstanding job, if any. Called on supersession and fit
    /// for component teardown.
    pub fn cancel_active(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
    }

    /// The most recently applied frame.
    pub fn current_frame(&self) -> Option<&Arc<FieldFrame>> {
        self.current.as_ref()
    }

    /// Whether a pixel should be rendered, per the current frame.
    pub fn is_interior(&self, x: f32, y: f32) -> bool {
        self.current
            .as_ref()
            .map(|f| f.is_interior(x, y))
            .unwrap_or(false)
    }

    /// Temperature estimate at a pixel of the current frame.
    pub fn field_value(&self, x: f32, y: f32) -> Option<f32> {
        self.current.as_ref().map(|f| f.field_value(x, y))
    }

    /// Color for a temperature under the current frame's comfort zone.
    pub fn colorize(&self, temperature: f32) -> Option<Rgb> {
        self.current.as_ref().map(|f| f.colorize(temperature))
    }

    /// Engine counters.
    pub fn stats(&self) -> EngineStats {
        self.stats
    }
}

impl Default for FieldEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Sensor;
    use crate::render::events::VecSink;

    fn config() -> FieldConfig {
        FieldConfig::new(40, 40)
            .with_grid_scale(4.0)
            .with_ambient_temp(20.0)
            .with_sensors(vec![
                Sensor::new("a", 10.0, 10.0).with_reading(22.0),
                Sensor::new("b", 30.0, 30.0).with_reading(25.0),
            ])
    }

    #[test]
    fn matching_fingerprint_short_circuits_to_cache() {
        let mut engine = FieldEngine::new();

        let first = engine
            .render_blocking(config(), &mut ())
            .expect("first render");
        assert_eq!(engine.stats().grid_builds, 2);
        assert_eq!(engine.stats().cache_hits, 0);

        let mut sink = VecSink::new();
        let second = engine
            .render_blocking(config(), &mut sink)
            .expect("second render");

        // No distance-build phase ran again.
        assert_eq!(engine.stats().grid_builds, 2);
        assert_eq!(engine.stats().cache_hits, 1);
        assert_eq!(first.image.data, second.image.data);

        let from_cache = sink.as_slice().iter().any(|e| {
            matches!(
                e,
                RenderEvent::Completed {
                    from_cache: true,
                    ..
                }
            )
        });
        assert!(from_cache, "completion should be served from cache");
    }

    #[test]
    fn changed_reading_misses_the_cache() {
        let mut engine = FieldEngine::new();
        engine.render_blocking(config(), &mut ()).expect("render");

        let mut warmer = config();
        warmer.sensors[0].reading = Some(23.5);
        engine.render_blocking(warmer, &mut ()).expect("render");

        assert_eq!(engine.stats().cache_hits, 0);
        assert_eq!(engine.stats().grid_builds, 4);
    }

    #[test]
    fn new_request_cancels_the_outstanding_job() {
        let mut engine = FieldEngine::new().with_slice_budget(Duration::ZERO);

        let mut stale = engine.request(config(), &mut ()).expect("first request");
        assert_eq!(engine.advance(&mut stale, &mut ()), JobStatus::Running);

        let mut fresh_config = config();
        fresh_config.sensors[0].reading = Some(30.0);
        let mut fresh = engine.request(fresh_config, &mut ()).expect("supersede");

        // The superseded job is dead and stays silent.
        let mut sink = VecSink::new();
        assert_eq!(engine.advance(&mut stale, &mut sink), JobStatus::Cancelled);
        assert!(sink.is_empty());
        assert_eq!(engine.stats().frames_completed, 0);

        while engine.advance(&mut fresh, &mut ()) == JobStatus::Running {}
        assert_eq!(engine.stats().frames_completed, 1);
    }

    #[test]
    fn no_sensor_config_renders_uniform_ambient() {
        let mut engine = FieldEngine::new();
        let frame = engine
            .render_blocking(
                FieldConfig::new(20, 20).with_ambient_temp(19.0),
                &mut (),
            )
            .expect("render");

        assert!(engine.is_interior(10.0, 10.0));
        assert_eq!(engine.field_value(3.0, 17.0), Some(19.0));

        let ambient_color = frame.colorize(19.0);
        for (x, y) in [(0, 0), (7, 13), (19, 19)] {
            assert_eq!(
                frame.image.pixel(x, y).map(|p| [p[0], p[1], p[2]]),
                Some([ambient_color.r, ambient_color.g, ambient_color.b])
            );
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut engine = FieldEngine::new();
        let result = engine.request(FieldConfig::new(0, 10), &mut ());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn facade_queries_need_an_applied_frame() {
        let engine = FieldEngine::new();
        assert!(!engine.is_interior(0.0, 0.0));
        assert_eq!(engine.field_value(0.0, 0.0), None);
        assert_eq!(engine.colorize(21.0), None);
    }

    #[test]
    fn eviction_forces_recomputation_of_old_configs() {
        let mut engine = FieldEngine::new().with_cache_capacity(2);

        let variant = |t: f32| {
            FieldConfig::new(20, 20)
                .with_sensors(vec![Sensor::new("s", 10.0, 10.0).with_reading(t)])
        };

        engine.render_blocking(variant(20.0), &mut ()).expect("a");
        engine.render_blocking(variant(21.0), &mut ()).expect("b");
        engine.render_blocking(variant(22.0), &mut ()).expect("c");

        // variant(20.0) was the oldest insert and must be rebuilt.
        engine.render_blocking(variant(20.0), &mut ()).expect("a2");
        assert_eq!(engine.stats().cache_hits, 0);
        assert_eq!(engine.stats().grid_builds, 4);
    }
}
