// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The native visual tree and its per-frame mutation cycle.
//!
//! [`SceneCompositor`] is a state machine with one cycle per frame:
//!
//! 1. [`begin_frame`](SceneCompositor::begin_frame) opens the mutation
//!    window.
//! 2. Surfaces are created, destroyed, bound for drawing, and placed with
//!    [`add_surface`](SceneCompositor::add_surface). Placement order is
//!    paint order, back to front, and a repeated `add_surface` for the same
//!    id moves it to the new slot (last call wins).
//! 3. [`end_frame`](SceneCompositor::end_frame) commits the staged tree
//!    atomically. On rejection the previously committed tree stays up and
//!    the caller forces a full render next frame.
//!
//! Mutation calls outside an open window are caller bugs and panic. Errors
//! ([`SurfaceError`]) are reserved for id-state conflicts and backend
//! failures, which leave committed state untouched.

use alloc::vec::Vec;

use hashbrown::HashMap;
use strata_core::error::{CommitError, SurfaceError};
use strata_core::geom::{DeviceIntPoint, DeviceIntRect, DeviceIntSize};
use strata_core::id::NativeSurfaceId;
use strata_core::platform::{BindTarget, PlatformCompositor, SurfacePlacement};
use strata_core::trace::{CommitEvent, Tracer};

/// Bookkeeping record for one live native surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeSurface {
    /// Allocation size in device pixels. Fixed for the surface's lifetime.
    pub size: DeviceIntSize,
    /// Whether the backing was allocated without an alpha channel.
    pub opaque: bool,
    /// Position in the last committed tree that placed this surface.
    pub position: DeviceIntPoint,
    /// Clip in the last committed tree that placed this surface.
    pub clip_rect: DeviceIntRect,
}

/// Owns the native surface records and the staged/committed visual trees.
///
/// The platform backend `P` holds the actual OS objects; this type enforces
/// the id-state rules and the atomic commit protocol on top of it.
#[derive(Debug)]
pub struct SceneCompositor<P: PlatformCompositor> {
    platform: P,
    surfaces: HashMap<NativeSurfaceId, NativeSurface>,
    /// The last tree the platform accepted, back to front.
    committed: Vec<SurfacePlacement>,
    /// `Some` while a mutation window is open.
    staged: Option<Vec<SurfacePlacement>>,
    bound: Option<NativeSurfaceId>,
}

impl<P: PlatformCompositor> SceneCompositor<P> {
    /// Wraps a platform backend with an empty tree.
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            surfaces: HashMap::new(),
            committed: Vec::new(),
            staged: None,
            bound: None,
        }
    }

    /// Shared access to the platform backend.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Exclusive access to the platform backend.
    ///
    /// Must not be used to mutate the visual tree behind this type's back.
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Whether a mutation window is currently open.
    #[must_use]
    pub fn frame_open(&self) -> bool {
        self.staged.is_some()
    }

    /// The last committed tree, in back-to-front paint order.
    #[must_use]
    pub fn committed(&self) -> &[SurfacePlacement] {
        &self.committed
    }

    /// The record for a live surface, if any.
    #[must_use]
    pub fn surface(&self, id: NativeSurfaceId) -> Option<&NativeSurface> {
        self.surfaces.get(&id)
    }

    /// Number of live surfaces (placed or not).
    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    fn staged_mut(&mut self, op: &str) -> &mut Vec<SurfacePlacement> {
        match &mut self.staged {
            Some(staged) => staged,
            None => panic!("{op} called outside a compositor frame"),
        }
    }

    /// Opens the mutation window for this frame.
    ///
    /// # Panics
    ///
    /// Panics if a window is already open.
    pub fn begin_frame(&mut self) {
        assert!(self.staged.is_none(), "compositor frame already open");
        self.staged = Some(Vec::new());
    }

    /// Allocates a new surface with a caller-chosen id.
    ///
    /// The surface exists but is not on screen until placed with
    /// [`add_surface`](Self::add_surface) and committed.
    ///
    /// # Panics
    ///
    /// Panics if no mutation window is open.
    pub fn create_surface(
        &mut self,
        id: NativeSurfaceId,
        size: DeviceIntSize,
        opaque: bool,
    ) -> Result<(), SurfaceError> {
        _ = self.staged_mut("create_surface");
        if self.surfaces.contains_key(&id) {
            return Err(SurfaceError::DuplicateId(id));
        }
        self.platform
            .create_visual(id, size, opaque)
            .map_err(|_| SurfaceError::BackendFailure)?;
        self.surfaces.insert(
            id,
            NativeSurface {
                size,
                opaque,
                position: DeviceIntPoint::ZERO,
                clip_rect: DeviceIntRect::from_size(size),
            },
        );
        Ok(())
    }

    /// Releases a surface and removes any placement staged for it this
    /// frame. Previously committed trees are unaffected until the next
    /// commit rebuilds them.
    ///
    /// # Panics
    ///
    /// Panics if no mutation window is open.
    pub fn destroy_surface(&mut self, id: NativeSurfaceId) -> Result<(), SurfaceError> {
        _ = self.staged_mut("destroy_surface");
        if self.bound == Some(id) {
            return Err(SurfaceError::SurfaceBusy(id));
        }
        if self.surfaces.remove(&id).is_none() {
            return Err(SurfaceError::UnknownId(id));
        }
        self.platform.destroy_visual(id);
        self.staged_mut("destroy_surface").retain(|p| p.id != id);
        Ok(())
    }

    /// Opens a surface for drawing and returns the target to draw into.
    ///
    /// Exactly one surface may be bound at a time; the renderer draws, then
    /// calls [`unbind`](Self::unbind).
    ///
    /// # Panics
    ///
    /// Panics if no mutation window is open.
    pub fn bind(
        &mut self,
        id: NativeSurfaceId,
        dirty_rect: DeviceIntRect,
    ) -> Result<BindTarget, SurfaceError> {
        _ = self.staged_mut("bind");
        if self.bound.is_some() {
            return Err(SurfaceError::BindPending);
        }
        if !self.surfaces.contains_key(&id) {
            return Err(SurfaceError::UnknownId(id));
        }
        let target = self
            .platform
            .bind_visual(id, dirty_rect)
            .map_err(|_| SurfaceError::BackendFailure)?;
        self.bound = Some(id);
        Ok(target)
    }

    /// Finalizes the most recently bound surface's content.
    ///
    /// A no-op when nothing is bound.
    pub fn unbind(&mut self) {
        if self.bound.take().is_some() {
            self.platform.unbind_visual();
        }
    }

    /// Inserts or repositions `id` in the staged paint order.
    ///
    /// Call order defines back-to-front order; repeating an id updates its
    /// position and clip *and* moves it to the new call-order slot.
    ///
    /// # Panics
    ///
    /// Panics if no mutation window is open.
    pub fn add_surface(
        &mut self,
        id: NativeSurfaceId,
        position: DeviceIntPoint,
        clip_rect: DeviceIntRect,
    ) -> Result<(), SurfaceError> {
        _ = self.staged_mut("add_surface");
        if !self.surfaces.contains_key(&id) {
            return Err(SurfaceError::UnknownId(id));
        }
        let staged = self.staged_mut("add_surface");
        staged.retain(|p| p.id != id);
        staged.push(SurfacePlacement {
            id,
            position,
            clip_rect,
        });
        Ok(())
    }

    /// Commits the staged tree atomically and closes the mutation window.
    ///
    /// On success the staged tree becomes the committed tree and each placed
    /// surface's record is updated. On rejection the previous tree remains
    /// in force; the caller must force a full render next frame.
    ///
    /// # Panics
    ///
    /// Panics if no mutation window is open, or if a surface is still bound.
    pub fn end_frame(
        &mut self,
        frame_index: u64,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), CommitError> {
        assert!(
            self.bound.is_none(),
            "compositor frame ended with a surface still bound"
        );
        let Some(staged) = self.staged.take() else {
            panic!("end_frame called without begin_frame");
        };
        #[expect(
            clippy::cast_possible_truncation,
            reason = "placement count capped at u32::MAX for tracing"
        )]
        let surface_count = staged.len().min(u32::MAX as usize) as u32;
        match self.platform.commit(&staged) {
            Ok(()) => {
                for placement in &staged {
                    if let Some(record) = self.surfaces.get_mut(&placement.id) {
                        record.position = placement.position;
                        record.clip_rect = placement.clip_rect;
                    }
                }
                self.committed = staged;
                tracer.commit(&CommitEvent {
                    frame_index,
                    surface_count,
                    accepted: true,
                });
                Ok(())
            }
            Err(err) => {
                tracer.commit(&CommitEvent {
                    frame_index,
                    surface_count,
                    accepted: false,
                });
                Err(err)
            }
        }
    }
}
