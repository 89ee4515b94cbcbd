// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! The presentation pipeline records no timestamps, so the time axis is the
//! event sequence number (one microsecond per event). That keeps ordering
//! faithful in `chrome://tracing` and [Perfetto](https://ui.perfetto.dev/)
//! without pretending to know wall-clock durations.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or Perfetto.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for (seq, recorded) in decode(bytes).enumerate() {
        let ts = u64::try_from(seq).unwrap_or(u64::MAX);
        match recorded {
            RecordedEvent::Swapchain(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Swapchain",
                    "cat": "Surface",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "kind": format!("{:?}", e.kind),
                        "size": format!("{:?}", e.size),
                        "buffers": e.buffering.buffer_count(),
                    }
                }));
            }
            RecordedEvent::Present(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Present",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "full": e.full,
                        "rect_count": e.rect_count,
                    }
                }));
            }
            RecordedEvent::QueryTimeout(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "QueryTimeout",
                    "cat": "Throttle",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "polls": e.polls,
                    }
                }));
            }
            RecordedEvent::ForceFullRender(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "ForceFullRender",
                    "cat": "Planner",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "reason": format!("{:?}", e.reason),
                    }
                }));
            }
            RecordedEvent::Commit(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Commit",
                    "cat": "Native",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "surface_count": e.surface_count,
                        "accepted": e.accepted,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}
