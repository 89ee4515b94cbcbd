// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform compositor integrations.
//!
//! When the platform can composite application-supplied visuals directly
//! (e.g. DirectComposition), the renderer stops producing one flat frame
//! and instead draws into independent native surfaces that the OS
//! composites. A [`PlatformCompositor`] implementation owns those native
//! visual objects; `strata_native` drives it through one
//! begin/mutate/commit cycle per frame.
//!
//! The commit is the only externally visible step, and it is atomic: either
//! the whole placement list takes effect or the previous tree stays up.

use crate::error::{CommitError, DeviceError};
use crate::geom::{DeviceIntPoint, DeviceIntRect, DeviceIntSize};
use crate::id::NativeSurfaceId;

/// A writable drawing target for one native surface, returned by `bind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BindTarget {
    /// Backend framebuffer object to draw into.
    pub fbo_id: u32,
    /// Translation from surface space to the target's coordinate space.
    pub offset: DeviceIntPoint,
    /// The region that actually needs drawing, clipped to the surface.
    pub dirty_rect: DeviceIntRect,
}

/// One entry of the committed visual tree, in back-to-front order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfacePlacement {
    /// Which surface to place.
    pub id: NativeSurfaceId,
    /// Top-left position in device pixels.
    pub position: DeviceIntPoint,
    /// Clip applied to the placed surface, in device pixels.
    pub clip_rect: DeviceIntRect,
}

/// Platform compositor seam for the platform-composited presentation path.
///
/// All methods take `&mut self`; serialization is external, like
/// [`PresentDevice`](crate::device::PresentDevice).
pub trait PlatformCompositor {
    /// Allocates the native backing for a surface.
    ///
    /// The id is caller-chosen; `strata_native` guarantees it is not
    /// already live.
    fn create_visual(
        &mut self,
        id: NativeSurfaceId,
        size: DeviceIntSize,
        opaque: bool,
    ) -> Result<(), DeviceError>;

    /// Releases a surface's native backing.
    fn destroy_visual(&mut self, id: NativeSurfaceId);

    /// Opens the surface for drawing and returns the target to draw into.
    ///
    /// `dirty_rect` is the caller's damage estimate; the backend may clip
    /// it further. Exactly one visual may be bound at a time, enforced by
    /// `strata_native`.
    fn bind_visual(
        &mut self,
        id: NativeSurfaceId,
        dirty_rect: DeviceIntRect,
    ) -> Result<BindTarget, DeviceError>;

    /// Finalizes the most recently bound surface's content.
    fn unbind_visual(&mut self);

    /// Atomically replaces the on-screen tree with `placements`.
    ///
    /// On failure the previous tree must remain in force; partial
    /// application is a contract violation.
    fn commit(&mut self, placements: &[SurfacePlacement]) -> Result<(), CommitError>;
}
