// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use strata_core::trace::{
    CommitEvent, ForceFullRenderEvent, ForceReason, PresentEvent, QueryTimeoutEvent,
    SwapchainEvent, SwapchainEventKind, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn kind_name(kind: SwapchainEventKind) -> &'static str {
    match kind {
        SwapchainEventKind::Created => "created",
        SwapchainEventKind::Recreated => "recreated",
        SwapchainEventKind::Destroyed => "destroyed",
    }
}

fn reason_name(reason: ForceReason) -> &'static str {
    match reason {
        ForceReason::Resized => "resized",
        ForceReason::Requested => "requested",
        ForceReason::Resumed => "resumed",
        ForceReason::RectBudgetExceeded => "rect-budget-exceeded",
        ForceReason::CommitRejected => "commit-rejected",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_swapchain(&mut self, e: &SwapchainEvent) {
        let _ = writeln!(
            self.writer,
            "[swapchain] {} {:?} {}-buffered",
            kind_name(e.kind),
            e.size,
            e.buffering.buffer_count(),
        );
    }

    fn on_present(&mut self, e: &PresentEvent) {
        if e.full {
            let _ = writeln!(self.writer, "[present] frame={} full", e.frame_index);
        } else {
            let _ = writeln!(
                self.writer,
                "[present] frame={} partial rects={}",
                e.frame_index, e.rect_count,
            );
        }
    }

    fn on_query_timeout(&mut self, e: &QueryTimeoutEvent) {
        let _ = writeln!(
            self.writer,
            "[query-timeout] frame={} polls={}",
            e.frame_index, e.polls,
        );
    }

    fn on_force_full_render(&mut self, e: &ForceFullRenderEvent) {
        let _ = writeln!(self.writer, "[force-full] reason={}", reason_name(e.reason));
    }

    fn on_commit(&mut self, e: &CommitEvent) {
        let _ = writeln!(
            self.writer,
            "[commit] frame={} surfaces={} {}",
            e.frame_index,
            e.surface_count,
            if e.accepted { "accepted" } else { "rejected" },
        );
    }
}
