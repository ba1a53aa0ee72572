//! Time-sliced, cancellable computation of a full field frame.
//!
//! A [`RenderJob`] walks through three phases: one sensor distance grid per
//! unit of work, then the interior mask, then row-chunked pixel colorization.
//! Each [`RenderJob::advance`] call does at most one slice budget of work and
//! yields, so a host event loop stays responsive. Cancellation is cooperative,
//! checked at every chunk boundary; a cancelled job emits nothing further.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use tracing::debug;

use crate::config::FieldConfig;
use crate::field::builder::build_distance_grid;
use crate::field::color::colorize;
use crate::field::grid::DistanceGrid;
use crate::field::mask::{build_interior_mask, InteriorMask};
use crate::field::temperature::field_value;
use crate::render::events::{EventSink, RenderEvent, RenderEventKind};
use crate::render::image::FieldImage;
use crate::render::FieldFrame;

/// Default wall-clock budget per slice of work.
pub const DEFAULT_SLICE_BUDGET: Duration = Duration::from_millis(16);

/// Pixel rows colorized between budget checks.
const ROWS_PER_CHUNK: u32 = 32;

/// Cooperative cancellation handle for a [`RenderJob`].
///
/// Cancellation takes effect at the next chunk boundary; afterwards the job
/// fires no events and writes nothing to the cache.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Outcome of driving a job for one slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobStatus {
    /// More work remains; call again.
    Running,
    /// The frame is finished.
    Complete,
    /// The job was cancelled; it will never complete.
    Cancelled,
}

enum Phase {
    Grids { next: usize },
    Mask,
    Pixels { mask: InteriorMask, next_row: u32 },
    Done,
}

/// An in-flight field computation.
pub struct RenderJob {
    config: FieldConfig,
    fingerprint: u64,
    grid_width: usize,
    grid_height: usize,
    grids: Vec<Option<DistanceGrid>>,
    image: FieldImage,
    phase: Phase,
    cancelled: Arc<AtomicBool>,
    grids_built: usize,
    frame: Option<Arc<FieldFrame>>,
}

impl RenderJob {
    pub(crate) fn new(config: FieldConfig, fingerprint: u64) -> Self {
        let (grid_width, grid_height) = config.grid_dims();
        let image = FieldImage::new(config.canvas_width, config.canvas_height);
        let sensor_count = config.sensors.len();
        Self {
            config,
            fingerprint,
            grid_width,
            grid_height,
            grids: (0..sensor_count).map(|_| None).collect(),
            image,
            phase: Phase::Grids { next: 0 },
            cancelled: Arc::new(AtomicBool::new(false)),
            grids_built: 0,
            frame: None,
        }
    }

    /// An already-finished job, returned for cache hits.
    pub(crate) fn finished(config: FieldConfig, fingerprint: u64) -> Self {
        let mut job = Self::new(config, fingerprint);
        job.phase = Phase::Done;
        job
    }

    /// Handle for cancelling this job cooperatively.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: self.cancelled.clone(),
        }
    }

    /// Fingerprint of the configuration this job computes.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Current status without doing any work.
    pub fn status(&self) -> JobStatus {
        if self.cancelled.load(Ordering::Relaxed) {
            JobStatus::Cancelled
        } else if matches!(self.phase, Phase::Done) {
            JobStatus::Complete
        } else {
            JobStatus::Running
        }
    }

    pub(crate) fn grids_built(&self) -> usize {
        self.grids_built
    }

    /// The finished frame, yielded at most once.
    pub(crate) fn take_frame(&mut self) -> Option<Arc<FieldFrame>> {
        self.frame.take()
    }

    /// Runs at most `budget` of work, yielding between chunks.
    pub(crate) fn advance(&mut self, budget: Duration, sink: &mut dyn EventSink) -> JobStatus {
        let deadline = Instant::now() + budget;

        loop {
            if self.cancelled.load(Ordering::Relaxed) {
                return JobStatus::Cancelled;
            }

            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Grids { next } => {
                    if next >= self.config.sensors.len() {
                        self.phase = Phase::Mask;
                    } else {
                        self.build_grid(next, sink);
                        self.phase = Phase::Grids { next: next + 1 };
                    }
                }
                Phase::Mask => {
                    let mask = build_interior_mask(
                        &self.config.sensors,
                        &self.config.walls,
                        self.grid_width,
                        self.grid_height,
                        self.config.grid_scale,
                    );
                    self.phase = Phase::Pixels { mask, next_row: 0 };
                }
                Phase::Pixels { mask, next_row } => {
                    if next_row >= self.config.canvas_height {
                        self.finish(mask);
                        return JobStatus::Complete;
                    }
                    let end = (next_row + ROWS_PER_CHUNK).min(self.config.canvas_height);
                    self.colorize_rows(&mask, next_row, end);
                    self.phase = Phase::Pixels {
                        mask,
                        next_row: end,
                    };
                }
                Phase::Done => return JobStatus::Complete,
            }

            if Instant::now() >= deadline {
                return match self.phase {
                    Phase::Done => JobStatus::Complete,
                    _ => JobStatus::Running,
                };
            }
        }
    }

    fn build_grid(&mut self, index: usize, sink: &mut dyn EventSink) {
        let sensor = &self.config.sensors[index];
        if sensor.usable_reading().is_some() {
            let grid = build_distance_grid(
                sensor.position,
                &self.config.walls,
                self.grid_width,
                self.grid_height,
                self.config.grid_scale,
            );
            self.grids[index] = Some(grid);
            self.grids_built += 1;

            if sink.wants(RenderEventKind::GridBuilt) {
                sink.send(RenderEvent::GridBuilt {
                    sensor_index: index,
                });
            }
        } else {
            debug!("Sensor '{}' has no usable reading; skipping.", sensor.id);
        }

        if sink.wants(RenderEventKind::Progress) {
            let total = self.config.sensors.len();
            let percent = (((index + 1) * 100) / total.max(1)) as u8;
            sink.send(RenderEvent::Progress {
                percent,
                stage: "distance grids".into(),
            });
        }
    }

    fn colorize_rows(&mut self, mask: &InteriorMask, start: u32, end: u32) {
        for y in start..end {
            for x in 0..self.config.canvas_width {
                let (fx, fy) = (x as f32, y as f32);
                if !mask.is_interior(fx, fy) {
                    continue;
                }
                let value = field_value(
                    Vec2::new(fx, fy),
                    &self.config.sensors,
                    &self.grids,
                    &self.config,
                );
                let color = colorize(value, self.config.comfort_min, self.config.comfort_max);
                self.image.set_pixel(x, y, color);
            }
        }
    }

    fn finish(&mut self, mask: InteriorMask) {
        self.phase = Phase::Done;
        self.frame = Some(Arc::new(FieldFrame {
            config: self.config.clone(),
            fingerprint: self.fingerprint,
            grids: std::mem::take(&mut self.grids),
            mask,
            image: std::mem::take(&mut self.image),
        }));
    }
}
