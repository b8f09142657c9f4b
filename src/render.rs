//! Frame setup and draw accounting.
//!
//! The [`Renderer`] owns the per-frame driver state that is not tied to any
//! resource: viewport, clear colour and depth testing. It also counts what the
//! scene submitted so [`FrameStats`] can report frame rate and load once per
//! second, which stands in for an on-screen debug overlay.

use instant::Duration;

use crate::{data_structures::shape::DrawCall, gpu::Gpu};

/// Submissions of the frame in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCounters {
    pub draw_calls: usize,
    pub triangles: usize,
}

pub struct Renderer {
    gpu: Gpu,
    pub clear_colour: [f32; 4],
    counters: FrameCounters,
}

impl Renderer {
    pub fn new(gpu: &Gpu, clear_colour: [f32; 4]) -> Self {
        gpu.set_depth_test(true);
        Self {
            gpu: gpu.clone(),
            clear_colour,
            counters: FrameCounters::default(),
        }
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    /// Reset the viewport to the framebuffer size and clear colour and depth.
    pub fn begin_frame(&mut self, width: u32, height: u32) {
        self.gpu.viewport(0, 0, width as i32, height as i32);
        self.gpu.clear(self.clear_colour);
        self.counters = FrameCounters::default();
    }

    pub fn record(&mut self, call: DrawCall) {
        self.counters.draw_calls += 1;
        self.counters.triangles += call.triangles();
    }

    pub fn counters(&self) -> FrameCounters {
        self.counters
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("clear_colour", &self.clear_colour)
            .field("counters", &self.counters)
            .finish()
    }
}

/// `fps` and `frame_time_ms` average over one reporting window; `draw_calls`
/// and `triangles` are the counts of the frame that closed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsReport {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub draw_calls: usize,
    pub triangles: usize,
}

impl std::fmt::Display for StatsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.0} fps ({:.2} ms), {} draws, {} triangles",
            self.fps, self.frame_time_ms, self.draw_calls, self.triangles
        )
    }
}

#[derive(Debug)]
pub struct FrameStats {
    window: Duration,
    elapsed: Duration,
    frames: u32,
    last: Option<StatsReport>,
}

impl FrameStats {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            elapsed: Duration::ZERO,
            frames: 0,
            last: None,
        }
    }

    /// Account one frame of length `dt`. Returns a report whenever a full window
    /// has elapsed.
    pub fn tick(&mut self, dt: Duration, counters: FrameCounters) -> Option<StatsReport> {
        self.elapsed += dt;
        self.frames += 1;
        if self.elapsed < self.window {
            return None;
        }
        let seconds = self.elapsed.as_secs_f32();
        let report = StatsReport {
            fps: self.frames as f32 / seconds,
            frame_time_ms: seconds * 1000.0 / self.frames as f32,
            draw_calls: counters.draw_calls,
            triangles: counters.triangles,
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.last = Some(report);
        Some(report)
    }

    pub fn last(&self) -> Option<StatsReport> {
        self.last
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
