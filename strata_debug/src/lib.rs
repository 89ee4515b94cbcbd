// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for strata
//! diagnostics.
//!
//! This crate provides [`TraceSink`](strata_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`] — writes Chrome Trace Event Format JSON from
//!   recorded bytes.
//!
//! The presentation pipeline owns no clock, so recordings carry no
//! timestamps; ordering is the record order, and the Chrome exporter uses
//! the event sequence number as the time axis.

pub mod chrome;
pub mod pretty;
pub mod recorder;
