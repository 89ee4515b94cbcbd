// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque resource handles.
//!
//! Every GPU-side object in strata is referenced through a non-owning `u64`
//! handle minted by the backend. The device remains the root owner; handles
//! merely name objects across the trait seams, which keeps the ownership
//! graph rooted and free of cycles.

use core::fmt;

/// Names a swap chain created by a [`PresentDevice`].
///
/// [`PresentDevice`]: crate::device::PresentDevice
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SwapchainHandle(pub u64);

impl fmt::Debug for SwapchainHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SwapchainHandle({})", self.0)
    }
}

/// Names a presentable surface bound to a swap chain's back buffer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceHandle(pub u64);

impl fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceHandle({})", self.0)
    }
}

/// Names a GPU present-completion query object.
///
/// Query objects are pooled: the [`PresentThrottle`] hands a retired handle
/// back to the device when issuing the next query, so no query is allocated
/// or freed on the frame path.
///
/// [`PresentThrottle`]: ../strata_present/struct.PresentThrottle.html
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryHandle(pub u64);

impl fmt::Debug for QueryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryHandle({})", self.0)
    }
}

/// Caller-assigned identity of a native compositor surface.
///
/// Ids are chosen by the caller (typically the scene renderer) and must be
/// unique among live surfaces; the native compositor rejects duplicates.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NativeSurfaceId(pub u64);

impl fmt::Debug for NativeSurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeSurfaceId({})", self.0)
    }
}
