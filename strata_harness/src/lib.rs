// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted backend doubles for strata tests and demos.
//!
//! [`MockDevice`] implements [`PresentDevice`] and [`MockPlatform`]
//! implements [`PlatformCompositor`], both with call recording and failure
//! injection so tests can drive the presentation pipeline through loss,
//! resize-failure, timeout, and commit-rejection paths without a GPU.
//!
//! Scripting knobs take effect on the *next* matching call and then reset,
//! so a test arms exactly the failure it wants:
//!
//! ```rust
//! use strata_core::caps::Capabilities;
//! use strata_harness::MockDevice;
//!
//! let mut device = MockDevice::new(Capabilities::direct_composition());
//! device.fail_next_swapchain = true;
//! // The next create_swapchain call returns DeviceError::CreationFailed.
//! ```

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;

use strata_core::caps::Capabilities;
use strata_core::device::{PresentDevice, QueryStatus, SwapchainDesc};
use strata_core::dirty::PresentRegion;
use strata_core::error::{CommitError, DeviceError};
use strata_core::geom::{DeviceIntPoint, DeviceIntRect, DeviceIntSize};
use strata_core::id::{NativeSurfaceId, QueryHandle, SurfaceHandle, SwapchainHandle};
use strata_core::platform::{BindTarget, PlatformCompositor, SurfacePlacement};

/// One recorded present call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentRecord {
    /// Which swap chain was presented.
    pub swapchain: SwapchainHandle,
    /// Whether the whole surface was presented.
    pub full: bool,
    /// The rectangles of a partial present (empty for full).
    pub rects: Vec<DeviceIntRect>,
}

/// A scripted [`PresentDevice`].
///
/// Handles are minted from a single counter so swap chains, surfaces, and
/// queries never collide. Queries signal after a configurable number of
/// polls ([`signal_after_polls`](Self::signal_after_polls), default 0:
/// signaled on the first poll).
#[derive(Debug)]
pub struct MockDevice {
    caps: Capabilities,
    next_handle: u64,

    /// Arms a `CreationFailed` on the next `create_swapchain`.
    pub fail_next_swapchain: bool,
    /// Arms a `CreationFailed` on the next `create_surface`.
    pub fail_next_surface: bool,
    /// When set, `is_context_lost` reports `true` and every query polls
    /// as `Unavailable`.
    pub context_lost: bool,
    /// Number of polls a query stays `Pending` before signaling.
    pub signal_after_polls: u32,

    live_swapchains: HashMap<SwapchainHandle, SwapchainDesc>,
    live_surfaces: HashMap<SurfaceHandle, SwapchainHandle>,
    query_polls_left: HashMap<QueryHandle, u32>,

    presents: Vec<PresentRecord>,
    destroyed_swapchains: Vec<SwapchainHandle>,
    destroyed_surfaces: Vec<SurfaceHandle>,
    retired_queries: Vec<QueryHandle>,
    issued_queries: u32,
    reused_queries: u32,
}

impl MockDevice {
    /// Creates a device reporting the given capabilities.
    #[must_use]
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            next_handle: 1,
            fail_next_swapchain: false,
            fail_next_surface: false,
            context_lost: false,
            signal_after_polls: 0,
            live_swapchains: HashMap::new(),
            live_surfaces: HashMap::new(),
            query_polls_left: HashMap::new(),
            presents: Vec::new(),
            destroyed_swapchains: Vec::new(),
            destroyed_surfaces: Vec::new(),
            retired_queries: Vec::new(),
            issued_queries: 0,
            reused_queries: 0,
        }
    }

    fn mint(&mut self) -> u64 {
        let h = self.next_handle;
        self.next_handle += 1;
        h
    }

    /// All presents in call order.
    #[must_use]
    pub fn presents(&self) -> &[PresentRecord] {
        &self.presents
    }

    /// The descriptor of a live swap chain, if any.
    #[must_use]
    pub fn swapchain_desc(&self, swapchain: SwapchainHandle) -> Option<&SwapchainDesc> {
        self.live_swapchains.get(&swapchain)
    }

    /// Number of live (created, not destroyed) swap chains.
    #[must_use]
    pub fn live_swapchain_count(&self) -> usize {
        self.live_swapchains.len()
    }

    /// Number of live presentable surfaces.
    #[must_use]
    pub fn live_surface_count(&self) -> usize {
        self.live_surfaces.len()
    }

    /// Handles destroyed via `destroy_swapchain`, in order.
    #[must_use]
    pub fn destroyed_swapchains(&self) -> &[SwapchainHandle] {
        &self.destroyed_swapchains
    }

    /// Queries handed back without being waited on.
    #[must_use]
    pub fn retired_queries(&self) -> &[QueryHandle] {
        &self.retired_queries
    }

    /// Total completion queries issued (fresh and recycled).
    #[must_use]
    pub fn issued_queries(&self) -> u32 {
        self.issued_queries
    }

    /// How many issued queries reused a recycled object.
    #[must_use]
    pub fn reused_queries(&self) -> u32 {
        self.reused_queries
    }

    /// Queries currently issued and not yet signaled or retired.
    #[must_use]
    pub fn outstanding_queries(&self) -> usize {
        self.query_polls_left.len()
    }
}

impl PresentDevice for MockDevice {
    fn capabilities(&mut self) -> Capabilities {
        self.caps
    }

    fn create_swapchain(&mut self, desc: &SwapchainDesc) -> Result<SwapchainHandle, DeviceError> {
        if self.fail_next_swapchain {
            self.fail_next_swapchain = false;
            return Err(DeviceError::CreationFailed);
        }
        if self.context_lost {
            return Err(DeviceError::DeviceLost);
        }
        let handle = SwapchainHandle(self.mint());
        self.live_swapchains.insert(handle, *desc);
        Ok(handle)
    }

    fn destroy_swapchain(&mut self, swapchain: SwapchainHandle) {
        self.live_swapchains.remove(&swapchain);
        self.destroyed_swapchains.push(swapchain);
    }

    fn create_surface(&mut self, swapchain: SwapchainHandle) -> Result<SurfaceHandle, DeviceError> {
        if self.fail_next_surface {
            self.fail_next_surface = false;
            return Err(DeviceError::CreationFailed);
        }
        if !self.live_swapchains.contains_key(&swapchain) {
            return Err(DeviceError::CreationFailed);
        }
        let handle = SurfaceHandle(self.mint());
        self.live_surfaces.insert(handle, swapchain);
        Ok(handle)
    }

    fn destroy_surface(&mut self, surface: SurfaceHandle) {
        self.live_surfaces.remove(&surface);
        self.destroyed_surfaces.push(surface);
    }

    fn present(
        &mut self,
        swapchain: SwapchainHandle,
        region: PresentRegion<'_>,
    ) -> Result<(), DeviceError> {
        if self.context_lost {
            return Err(DeviceError::DeviceLost);
        }
        let record = match region {
            PresentRegion::Full => PresentRecord {
                swapchain,
                full: true,
                rects: Vec::new(),
            },
            PresentRegion::Partial(rects) => PresentRecord {
                swapchain,
                full: false,
                rects: rects.to_vec(),
            },
        };
        self.presents.push(record);
        Ok(())
    }

    fn issue_completion_query(&mut self, recycled: Option<QueryHandle>) -> Option<QueryHandle> {
        if !self.caps.completion_queries {
            return None;
        }
        let handle = match recycled {
            Some(handle) => {
                self.reused_queries += 1;
                handle
            }
            None => QueryHandle(self.mint()),
        };
        self.issued_queries += 1;
        self.query_polls_left.insert(handle, self.signal_after_polls);
        Some(handle)
    }

    fn poll_query(&mut self, query: QueryHandle) -> QueryStatus {
        if self.context_lost {
            self.query_polls_left.remove(&query);
            return QueryStatus::Unavailable;
        }
        match self.query_polls_left.get_mut(&query) {
            Some(0) => {
                self.query_polls_left.remove(&query);
                QueryStatus::Signaled
            }
            Some(left) => {
                *left -= 1;
                QueryStatus::Pending
            }
            None => QueryStatus::Unavailable,
        }
    }

    fn retire_query(&mut self, query: QueryHandle) {
        self.query_polls_left.remove(&query);
        self.retired_queries.push(query);
    }

    fn is_context_lost(&mut self) -> bool {
        self.context_lost
    }
}

/// One recorded bind call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindRecord {
    /// Which surface was bound.
    pub id: NativeSurfaceId,
    /// The dirty rect the caller passed in.
    pub dirty_rect: DeviceIntRect,
}

/// A scripted [`PlatformCompositor`].
///
/// Records every commit; [`fail_next_commit`](Self::fail_next_commit)
/// rejects one commit without touching the last accepted tree, matching
/// the atomicity contract.
#[derive(Debug, Default)]
pub struct MockPlatform {
    /// Arms a `Rejected` on the next `commit`.
    pub fail_next_commit: bool,

    visuals: HashMap<NativeSurfaceId, (DeviceIntSize, bool)>,
    binds: Vec<BindRecord>,
    committed: Vec<SurfacePlacement>,
    commit_count: u32,
    next_fbo: u32,
}

impl MockPlatform {
    /// Creates an empty platform double.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently accepted tree.
    #[must_use]
    pub fn committed(&self) -> &[SurfacePlacement] {
        &self.committed
    }

    /// Number of accepted commits.
    #[must_use]
    pub fn commit_count(&self) -> u32 {
        self.commit_count
    }

    /// Whether a visual with this id is live.
    #[must_use]
    pub fn has_visual(&self, id: NativeSurfaceId) -> bool {
        self.visuals.contains_key(&id)
    }

    /// The size and opacity a visual was created with.
    #[must_use]
    pub fn visual_desc(&self, id: NativeSurfaceId) -> Option<(DeviceIntSize, bool)> {
        self.visuals.get(&id).copied()
    }

    /// All bind calls in order.
    #[must_use]
    pub fn binds(&self) -> &[BindRecord] {
        &self.binds
    }
}

impl PlatformCompositor for MockPlatform {
    fn create_visual(
        &mut self,
        id: NativeSurfaceId,
        size: DeviceIntSize,
        opaque: bool,
    ) -> Result<(), DeviceError> {
        self.visuals.insert(id, (size, opaque));
        Ok(())
    }

    fn destroy_visual(&mut self, id: NativeSurfaceId) {
        self.visuals.remove(&id);
    }

    fn bind_visual(
        &mut self,
        id: NativeSurfaceId,
        dirty_rect: DeviceIntRect,
    ) -> Result<BindTarget, DeviceError> {
        let Some(&(size, _)) = self.visuals.get(&id) else {
            return Err(DeviceError::CreationFailed);
        };
        self.binds.push(BindRecord { id, dirty_rect });
        self.next_fbo += 1;
        let clipped = dirty_rect
            .intersection(DeviceIntRect::from_size(size))
            .unwrap_or(DeviceIntRect::ZERO);
        Ok(BindTarget {
            fbo_id: self.next_fbo,
            offset: DeviceIntPoint::ZERO,
            dirty_rect: clipped,
        })
    }

    fn unbind_visual(&mut self) {}

    fn commit(&mut self, placements: &[SurfacePlacement]) -> Result<(), CommitError> {
        if self.fail_next_commit {
            self.fail_next_commit = false;
            return Err(CommitError::Rejected);
        }
        self.committed = placements.to_vec();
        self.commit_count += 1;
        Ok(())
    }
}
