// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types and contracts for presenting GPU-rendered frames.
//!
//! `strata_core` provides the data model shared by the two presentation
//! paths: the self-composited swap-chain path (`strata_present`) and the
//! platform-composited path (`strata_native`). It is `no_std` compatible
//! (with `alloc`).
//!
//! # Architecture
//!
//! Platform integration happens behind two trait seams:
//!
//! ```text
//!   FramePresenter ──► PresentDevice   (swap chain, present, queries)
//!        │
//!        └──────────► PlatformCompositor  (native visual tree, commit)
//! ```
//!
//! **[`geom`]** — Integer device-pixel geometry with [`kurbo`] interop.
//!
//! **[`id`]** — Opaque, non-owning handles for device resources and native
//! surfaces.
//!
//! **[`caps`]** — Immutable capability snapshot, probed once at
//! initialization and never re-queried on the frame path.
//!
//! **[`device`]** — The [`PresentDevice`](device::PresentDevice) trait that
//! GPU backends implement: swap-chain lifecycle, present, and
//! present-completion queries.
//!
//! **[`platform`]** — The
//! [`PlatformCompositor`](platform::PlatformCompositor) trait that native
//! compositor backends implement: visual lifecycle and atomic tree commits.
//!
//! **[`dirty`]** — Dirty-region model for partial presents.
//!
//! **[`error`]** — Error taxonomy: fatal device conditions, native-tree
//! misuse, and commit rejection.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for presentation instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod caps;
pub mod device;
pub mod dirty;
pub mod error;
pub mod geom;
pub mod id;
pub mod platform;
pub mod trace;
