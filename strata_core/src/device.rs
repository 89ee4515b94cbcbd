// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for GPU presentation devices.
//!
//! A [`PresentDevice`] is the root resource of the ownership graph: it owns
//! every swap chain, surface, and query object it mints, and everything
//! else in strata refers to those objects through the non-owning handles in
//! [`crate::id`]. Backends implement this trait over the real driver (DXGI,
//! EGL, ...); tests implement it over a scripted mock.
//!
//! All methods take `&mut self`: strata assumes single-threaded ownership
//! and performs no internal locking.

use crate::caps::Capabilities;
use crate::dirty::PresentRegion;
use crate::error::DeviceError;
use crate::geom::DeviceIntSize;
use crate::id::{QueryHandle, SurfaceHandle, SwapchainHandle};

/// How many back buffers a swap chain rotates through.
///
/// Fixed for a swap chain's lifetime; changing depth recreates the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferingMode {
    /// Two buffers: lowest memory, present may block on the previous flip.
    Double,
    /// Three buffers: one extra frame in flight before presents block.
    Triple,
}

impl BufferingMode {
    /// The buffer count behind this mode.
    #[must_use]
    pub const fn buffer_count(self) -> u32 {
        match self {
            Self::Double => 2,
            Self::Triple => 3,
        }
    }
}

/// Everything needed to create a swap chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwapchainDesc {
    /// Back-buffer size in device pixels.
    pub size: DeviceIntSize,
    /// Buffer rotation depth.
    pub buffering: BufferingMode,
    /// Whether the chain blends with content beneath the window.
    pub alpha: bool,
}

/// Outcome of polling a present-completion query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryStatus {
    /// The GPU has not reached the query yet.
    Pending,
    /// The GPU signaled the query; the present has completed.
    Signaled,
    /// The query can never signal (device lost or query object invalid).
    Unavailable,
}

/// GPU backend seam for the self-composited presentation path.
///
/// Implementations map these operations onto the platform's swap-chain API.
/// The contract mirrors the frame loop: create once, present per frame,
/// poll completion queries to pace submission, and recreate wholesale on
/// resize.
pub trait PresentDevice {
    /// Probes driver capabilities.
    ///
    /// Called exactly once, at presenter initialization; the result is
    /// cached for the presenter's lifetime.
    fn capabilities(&mut self) -> Capabilities;

    /// Creates a swap chain. Swap chains are never mutated in place; a new
    /// size or buffering depth means a new chain.
    fn create_swapchain(&mut self, desc: &SwapchainDesc) -> Result<SwapchainHandle, DeviceError>;

    /// Releases a swap chain and every buffer it owns.
    fn destroy_swapchain(&mut self, swapchain: SwapchainHandle);

    /// Creates the presentable surface bound to the chain's back buffer.
    fn create_surface(&mut self, swapchain: SwapchainHandle) -> Result<SurfaceHandle, DeviceError>;

    /// Releases a presentable surface. The swap chain survives.
    fn destroy_surface(&mut self, surface: SurfaceHandle);

    /// Presents the current back buffer, either whole or restricted to the
    /// given rectangles.
    fn present(
        &mut self,
        swapchain: SwapchainHandle,
        region: PresentRegion<'_>,
    ) -> Result<(), DeviceError>;

    /// Issues a GPU completion query at the current point in the command
    /// stream.
    ///
    /// `recycled` is a previously retired query object for reuse, so the
    /// frame path never allocates. Returns `None` when the device does not
    /// support completion queries; the caller then skips throttling.
    fn issue_completion_query(&mut self, recycled: Option<QueryHandle>) -> Option<QueryHandle>;

    /// Checks whether the GPU has signaled a query. Must never block
    /// unboundedly; a brief internal wait is acceptable.
    fn poll_query(&mut self, query: QueryHandle) -> QueryStatus;

    /// Returns a query object to the device without waiting on it.
    ///
    /// Used when queued queries reference a destroyed swap chain.
    fn retire_query(&mut self, query: QueryHandle);

    /// Probes for device reset. Once `true`, every handle minted by this
    /// device is invalid.
    fn is_context_lost(&mut self) -> bool;
}
