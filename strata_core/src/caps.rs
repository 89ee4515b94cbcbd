// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable platform capability snapshot.
//!
//! Capabilities are probed from the device exactly once, at presenter
//! initialization, and held as an immutable value for the presenter's
//! lifetime. Nothing on the frame path re-queries the driver; anything the
//! platform cannot do is permanently routed to the simpler always-supported
//! path.

use crate::device::BufferingMode;

/// What the platform and driver can do, probed once at initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// Whether the driver supports triple buffering without stalling.
    pub triple_buffering: bool,
    /// Whether the swap effect supports presenting partial regions.
    pub partial_present: bool,
    /// Maximum dirty-rectangle count accepted by a partial present.
    /// Zero when `partial_present` is `false`.
    pub max_partial_rects: u32,
    /// Whether the platform compositor can composite application surfaces
    /// directly (e.g. DirectComposition visuals).
    pub native_compositor: bool,
    /// Whether the swap chain blends with what is beneath the window.
    pub alpha: bool,
    /// Whether present-completion queries are available for throttling.
    pub completion_queries: bool,
    /// Whether the presentable surface's Y axis points down in GL terms.
    pub surface_y_flipped: bool,
}

impl Capabilities {
    /// The always-supported baseline: double buffering, full presents only,
    /// no native compositing, no throttling queries.
    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            triple_buffering: false,
            partial_present: false,
            max_partial_rects: 0,
            native_compositor: false,
            alpha: false,
            completion_queries: true,
            surface_y_flipped: true,
        }
    }

    /// A fully featured configuration, as seen on a healthy
    /// DirectComposition-capable driver.
    #[must_use]
    pub const fn direct_composition() -> Self {
        Self {
            triple_buffering: true,
            partial_present: true,
            max_partial_rects: 4,
            native_compositor: true,
            alpha: false,
            completion_queries: true,
            surface_y_flipped: true,
        }
    }

    /// The buffering depth implied by this snapshot.
    ///
    /// Fixed for the lifetime of any swap chain created under it.
    #[must_use]
    pub const fn buffering(&self) -> BufferingMode {
        if self.triple_buffering {
            BufferingMode::Triple
        } else {
            BufferingMode::Double
        }
    }
}
