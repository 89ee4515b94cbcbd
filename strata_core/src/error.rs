// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for the presentation pipeline.
//!
//! Three severities exist, and they propagate differently:
//!
//! - **Fatal** ([`PresentError`]) — the device or swap chain is gone; the
//!   caller must discard and recreate the whole presenter.
//! - **Rejected commit** ([`CommitError`]) — the native tree rolled back to
//!   its last committed state; the caller forces a full render next frame.
//! - **Misuse** ([`SurfaceError`]) — a native-surface operation referenced
//!   an id in the wrong state; committed state is untouched.
//!
//! Capability gaps and query timeouts are deliberately *not* errors: they
//! degrade to a simpler path and are only visible through the tracer.

use core::fmt;

use crate::id::NativeSurfaceId;

/// Failure reported by a [`PresentDevice`](crate::device::PresentDevice)
/// operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceError {
    /// The backend could not create the requested object.
    CreationFailed,
    /// The GPU device was reset or removed.
    DeviceLost,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreationFailed => write!(f, "device object creation failed"),
            Self::DeviceLost => write!(f, "GPU device lost"),
        }
    }
}

/// Fatal presenter failure. Recovery is full recreation by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresentError {
    /// GPU/driver reset; every surface and query is invalid.
    DeviceLost,
    /// Swap-chain recreation failed; treated identically to device loss.
    ResizeFailed,
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceLost => write!(f, "device lost; recreate the presenter"),
            Self::ResizeFailed => write!(f, "swap chain recreation failed; recreate the presenter"),
        }
    }
}

impl From<DeviceError> for PresentError {
    fn from(_: DeviceError) -> Self {
        // Any device-level failure during presentation leaves the swap chain
        // in an unknown state, so the presenter treats it as loss.
        Self::DeviceLost
    }
}

/// A native-surface operation failed without touching committed state.
///
/// Most variants are caller misuse (an id in the wrong state); the
/// offending call simply has no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceError {
    /// `create_surface` was called with an id that already exists.
    DuplicateId(NativeSurfaceId),
    /// The id does not name a live surface.
    UnknownId(NativeSurfaceId),
    /// The surface is currently bound for drawing and cannot be destroyed.
    SurfaceBusy(NativeSurfaceId),
    /// A bind is already open; `unbind` must be called first.
    BindPending,
    /// The platform backend failed to allocate or open the native surface.
    BackendFailure,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "surface {id:?} already exists"),
            Self::UnknownId(id) => write!(f, "surface {id:?} does not exist"),
            Self::SurfaceBusy(id) => write!(f, "surface {id:?} is bound for drawing"),
            Self::BindPending => write!(f, "a surface is already bound; unbind first"),
            Self::BackendFailure => write!(f, "platform backend failed the surface operation"),
        }
    }
}

/// The platform compositor refused a tree commit.
///
/// The previously committed tree remains in force.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommitError {
    /// The commit was rejected; the caller should force a full render on
    /// the next frame.
    Rejected,
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => write!(f, "native compositor rejected the tree commit"),
        }
    }
}
