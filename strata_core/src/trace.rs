// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the presentation pipeline.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the presenter calls at significant points of the frame cycle. All method
//! bodies default to no-ops, so implementing only the events you care about
//! is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! Degradations that are deliberately not errors — capability fallbacks,
//! query timeouts, forced full renders — are visible only through these
//! events.

use crate::device::BufferingMode;
use crate::geom::DeviceIntSize;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What happened to the swap chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwapchainEventKind {
    /// Initial creation.
    Created,
    /// Destroyed and recreated at a new size or buffering depth.
    Recreated,
    /// Released for good.
    Destroyed,
}

/// Why a full-frame render was forced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ForceReason {
    /// The swap chain was resized; non-front buffers hold stale content.
    Resized,
    /// The caller requested it explicitly.
    Requested,
    /// The presentable surface was recreated by a pause/resume cycle.
    Resumed,
    /// The dirty-rectangle count exceeded the platform maximum.
    RectBudgetExceeded,
    /// A native compositor commit was rejected.
    CommitRejected,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a swap chain is created, recreated, or destroyed.
#[derive(Clone, Copy, Debug)]
pub struct SwapchainEvent {
    /// What happened.
    pub kind: SwapchainEventKind,
    /// Back-buffer size.
    pub size: DeviceIntSize,
    /// Buffer rotation depth.
    pub buffering: BufferingMode,
}

/// Emitted when a frame is presented through the swap chain.
#[derive(Clone, Copy, Debug)]
pub struct PresentEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Whether the whole surface was presented.
    pub full: bool,
    /// Rectangle count for a partial present (zero for full).
    pub rect_count: u32,
}

/// Emitted when a bounded completion wait gave up before the GPU signaled.
#[derive(Clone, Copy, Debug)]
pub struct QueryTimeoutEvent {
    /// Frame counter at the time of the wait.
    pub frame_index: u64,
    /// How many polls were attempted.
    pub polls: u32,
}

/// Emitted when the planner latches a forced full render.
#[derive(Clone, Copy, Debug)]
pub struct ForceFullRenderEvent {
    /// Why the force was latched.
    pub reason: ForceReason,
}

/// Emitted after a native compositor commit attempt.
#[derive(Clone, Copy, Debug)]
pub struct CommitEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Number of placements in the staged tree.
    pub surface_count: u32,
    /// Whether the platform accepted the commit.
    pub accepted: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the presentation pipeline.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called on swap-chain lifecycle changes.
    fn on_swapchain(&mut self, e: &SwapchainEvent) {
        _ = e;
    }

    /// Called when a frame is presented.
    fn on_present(&mut self, e: &PresentEvent) {
        _ = e;
    }

    /// Called when a completion wait times out.
    fn on_query_timeout(&mut self, e: &QueryTimeoutEvent) {
        _ = e;
    }

    /// Called when a full render is forced.
    fn on_force_full_render(&mut self, e: &ForceFullRenderEvent) {
        _ = e;
    }

    /// Called after a native tree commit attempt.
    fn on_commit(&mut self, e: &CommitEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SwapchainEvent`].
    #[inline]
    pub fn swapchain(&mut self, e: &SwapchainEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_swapchain(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PresentEvent`].
    #[inline]
    pub fn present(&mut self, e: &PresentEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_present(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`QueryTimeoutEvent`].
    #[inline]
    pub fn query_timeout(&mut self, e: &QueryTimeoutEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_query_timeout(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ForceFullRenderEvent`].
    #[inline]
    pub fn force_full_render(&mut self, e: &ForceFullRenderEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_force_full_render(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CommitEvent`].
    #[inline]
    pub fn commit(&mut self, e: &CommitEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_commit(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_present() -> PresentEvent {
        PresentEvent {
            frame_index: 42,
            full: false,
            rect_count: 2,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_present(&sample_present());
        sink.on_query_timeout(&QueryTimeoutEvent {
            frame_index: 42,
            polls: 8,
        });
        sink.on_force_full_render(&ForceFullRenderEvent {
            reason: ForceReason::Resized,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.present(&sample_present());
        tracer.commit(&CommitEvent {
            frame_index: 1,
            surface_count: 3,
            accepted: true,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            frames: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_present(&mut self, e: &PresentEvent) {
                self.frames.push(e.frame_index);
            }
        }

        let mut sink = RecordingSink { frames: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.present(&sample_present());
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
    }
}
