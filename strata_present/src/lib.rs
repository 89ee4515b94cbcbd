// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame presentation over a buffered swap chain.
//!
//! The crate is built from three passive components and one orchestrator:
//!
//! **[`surface`]** — [`SurfaceManager`](surface::SurfaceManager): owns the
//! swap chain and its presentable surface; recreates them wholesale on
//! resize; models the lighter pause/resume surface teardown.
//!
//! **[`throttle`]** — [`PresentThrottle`](throttle::PresentThrottle): caps
//! how many frames the CPU may submit ahead of the GPU with a bounded FIFO
//! of recycled completion queries.
//!
//! **[`partial`]** — [`PartialPresentPlanner`](partial::PartialPresentPlanner):
//! decides full- versus partial-region present each frame and latches
//! forced full renders across discontinuities.
//!
//! **[`presenter`]** — [`FramePresenter`](presenter::FramePresenter): the
//! caller-facing frame lifecycle. Drives the three components over a
//! [`PresentDevice`](strata_core::device::PresentDevice), and in the
//! platform-composited mode delegates to
//! [`SceneCompositor`](strata_native::compositor::SceneCompositor).
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables trace event emission.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod partial;
pub mod presenter;
pub mod surface;
pub mod throttle;
