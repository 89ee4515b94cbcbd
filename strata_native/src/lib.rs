// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-composited presentation: independent visual surfaces committed
//! atomically to the OS compositor.
//!
//! When a [`PlatformCompositor`](strata_core::platform::PlatformCompositor)
//! is available, the renderer stops producing one flat frame and instead
//! draws into per-surface backings that the platform composites on its own.
//! [`SceneCompositor`](compositor::SceneCompositor) owns the surface records
//! and drives the backend through one begin/mutate/commit cycle per frame.
//!
//! Nothing here touches the swap chain; the self-composited path lives in
//! `strata_present`.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables trace event emission.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod compositor;
