// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swap-chain and presentable-surface lifecycle.
//!
//! [`SurfaceManager`] owns exactly one swap chain and, unless paused, one
//! presentable surface bound to the chain's back buffer. Swap chains are
//! never mutated in place: a new size means destroy and recreate, which
//! invalidates anything bound to the old surface and must be followed by a
//! forced full render (the presenter takes care of that).
//!
//! Pause releases only the presentable surface, modeling OS-driven surface
//! teardown while the window is hidden. The swap chain and device survive,
//! which is strictly lighter than device loss.

use strata_core::caps::Capabilities;
use strata_core::device::{PresentDevice, SwapchainDesc};
use strata_core::dirty::PresentRegion;
use strata_core::error::{DeviceError, PresentError};
use strata_core::geom::DeviceIntSize;
use strata_core::id::{SurfaceHandle, SwapchainHandle};
use strata_core::trace::{SwapchainEvent, SwapchainEventKind, Tracer};

/// Owns the swap chain and its presentable surface.
///
/// The cached [`SwapchainDesc`] is the source of truth for size queries;
/// nothing on the hot path asks the driver.
#[derive(Debug)]
pub struct SurfaceManager {
    swapchain: SwapchainHandle,
    /// `None` while paused.
    surface: Option<SurfaceHandle>,
    desc: SwapchainDesc,
}

impl SurfaceManager {
    /// Creates the swap chain and its presentable surface.
    ///
    /// Buffering depth and alpha come from the capability snapshot; the
    /// caller must not proceed on failure.
    pub fn initialize<D: PresentDevice>(
        device: &mut D,
        size: DeviceIntSize,
        caps: &Capabilities,
        tracer: &mut Tracer<'_>,
    ) -> Result<Self, DeviceError> {
        let desc = SwapchainDesc {
            size,
            buffering: caps.buffering(),
            alpha: caps.alpha,
        };
        let swapchain = device.create_swapchain(&desc)?;
        let surface = match device.create_surface(swapchain) {
            Ok(surface) => surface,
            Err(err) => {
                device.destroy_swapchain(swapchain);
                return Err(err);
            }
        };
        tracer.swapchain(&SwapchainEvent {
            kind: SwapchainEventKind::Created,
            size,
            buffering: desc.buffering,
        });
        Ok(Self {
            swapchain,
            surface: Some(surface),
            desc,
        })
    }

    /// The cached back-buffer size. No device query.
    #[must_use]
    pub fn buffer_size(&self) -> DeviceIntSize {
        self.desc.size
    }

    /// The presentable surface, or `None` while paused.
    #[must_use]
    pub fn surface(&self) -> Option<SurfaceHandle> {
        self.surface
    }

    /// Whether the presentable surface has been released by [`pause`](Self::pause).
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.surface.is_none()
    }

    /// The presentable surface while not paused.
    ///
    /// # Panics
    ///
    /// Panics if paused.
    #[must_use]
    pub fn active_surface(&self) -> SurfaceHandle {
        match self.surface {
            Some(surface) => surface,
            None => panic!("surface accessed while paused"),
        }
    }

    /// Recreates the swap chain at a new size.
    ///
    /// Returns `Ok(false)` without touching the device when the size is
    /// unchanged. On `Ok(true)` the old chain and surface are gone: the
    /// caller must discard queued completion queries and force a full
    /// render.
    pub fn resize<D: PresentDevice>(
        &mut self,
        device: &mut D,
        new_size: DeviceIntSize,
        tracer: &mut Tracer<'_>,
    ) -> Result<bool, PresentError> {
        if new_size == self.desc.size {
            return Ok(false);
        }
        if let Some(surface) = self.surface.take() {
            device.destroy_surface(surface);
        }
        device.destroy_swapchain(self.swapchain);

        self.desc.size = new_size;
        self.swapchain = device
            .create_swapchain(&self.desc)
            .map_err(|_| PresentError::ResizeFailed)?;
        self.surface = Some(
            device
                .create_surface(self.swapchain)
                .map_err(|_| PresentError::ResizeFailed)?,
        );
        tracer.swapchain(&SwapchainEvent {
            kind: SwapchainEventKind::Recreated,
            size: new_size,
            buffering: self.desc.buffering,
        });
        Ok(true)
    }

    /// Releases the presentable surface, keeping the swap chain.
    ///
    /// A no-op when already paused.
    pub fn pause<D: PresentDevice>(&mut self, device: &mut D) {
        if let Some(surface) = self.surface.take() {
            device.destroy_surface(surface);
        }
    }

    /// Recreates the presentable surface against the existing swap chain.
    ///
    /// A no-op when not paused. Surface content is undefined afterwards;
    /// the presenter forces a full render.
    pub fn resume<D: PresentDevice>(&mut self, device: &mut D) -> Result<(), PresentError> {
        if self.surface.is_none() {
            self.surface = Some(device.create_surface(self.swapchain)?);
        }
        Ok(())
    }

    /// Presents the current back buffer.
    ///
    /// # Panics
    ///
    /// Panics if paused; the presenter never opens a frame while paused.
    pub fn present<D: PresentDevice>(
        &mut self,
        device: &mut D,
        region: PresentRegion<'_>,
    ) -> Result<(), PresentError> {
        assert!(self.surface.is_some(), "present called while paused");
        device.present(self.swapchain, region)?;
        Ok(())
    }

    /// Releases the surface and the swap chain.
    pub fn destroy<D: PresentDevice>(mut self, device: &mut D, tracer: &mut Tracer<'_>) {
        if let Some(surface) = self.surface.take() {
            device.destroy_surface(surface);
        }
        device.destroy_swapchain(self.swapchain);
        tracer.swapchain(&SwapchainEvent {
            kind: SwapchainEventKind::Destroyed,
            size: self.desc.size,
            buffering: self.desc.buffering,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::device::BufferingMode;
    use strata_harness::MockDevice;

    fn init(device: &mut MockDevice, w: i32, h: i32) -> SurfaceManager {
        let caps = device.capabilities();
        SurfaceManager::initialize(device, DeviceIntSize::new(w, h), &caps, &mut Tracer::none())
            .unwrap()
    }

    #[test]
    fn initialize_derives_desc_from_caps() {
        let mut device = MockDevice::new(Capabilities::direct_composition());
        let manager = init(&mut device, 800, 600);
        assert_eq!(manager.buffer_size(), DeviceIntSize::new(800, 600));
        assert_eq!(device.live_swapchain_count(), 1);
        assert_eq!(device.live_surface_count(), 1);

        let desc = device.swapchain_desc(manager.swapchain).unwrap();
        assert_eq!(desc.buffering, BufferingMode::Triple);
    }

    #[test]
    fn failed_surface_creation_cleans_up_the_swapchain() {
        let mut device = MockDevice::new(Capabilities::minimal());
        device.fail_next_surface = true;
        let caps = device.capabilities();
        let result = SurfaceManager::initialize(
            &mut device,
            DeviceIntSize::new(64, 64),
            &caps,
            &mut Tracer::none(),
        );
        assert_eq!(result.unwrap_err(), DeviceError::CreationFailed);
        assert_eq!(device.live_swapchain_count(), 0);
    }

    #[test]
    fn resize_to_same_size_is_a_noop() {
        let mut device = MockDevice::new(Capabilities::minimal());
        let mut manager = init(&mut device, 800, 600);
        let resized = manager
            .resize(&mut device, DeviceIntSize::new(800, 600), &mut Tracer::none())
            .unwrap();
        assert!(!resized);
        assert!(device.destroyed_swapchains().is_empty());
    }

    #[test]
    fn resize_recreates_wholesale_and_updates_cached_size() {
        let mut device = MockDevice::new(Capabilities::minimal());
        let mut manager = init(&mut device, 800, 600);
        let new_size = DeviceIntSize::new(1024, 768);
        let resized = manager
            .resize(&mut device, new_size, &mut Tracer::none())
            .unwrap();
        assert!(resized);
        assert_eq!(manager.buffer_size(), new_size);
        assert_eq!(device.destroyed_swapchains().len(), 1);
        assert_eq!(device.live_swapchain_count(), 1);
        assert_eq!(device.live_surface_count(), 1);
    }

    #[test]
    fn failed_resize_reports_resize_failed() {
        let mut device = MockDevice::new(Capabilities::minimal());
        let mut manager = init(&mut device, 800, 600);
        device.fail_next_swapchain = true;
        let result = manager.resize(&mut device, DeviceIntSize::new(10, 10), &mut Tracer::none());
        assert_eq!(result.unwrap_err(), PresentError::ResizeFailed);
    }

    #[test]
    fn pause_releases_only_the_surface() {
        let mut device = MockDevice::new(Capabilities::minimal());
        let mut manager = init(&mut device, 800, 600);
        manager.pause(&mut device);
        assert!(manager.is_paused());
        assert_eq!(device.live_surface_count(), 0);
        assert_eq!(device.live_swapchain_count(), 1);

        manager.resume(&mut device).unwrap();
        assert!(!manager.is_paused());
        assert_eq!(device.live_surface_count(), 1);
        // Pause and resume again are no-ops in their own state.
        manager.resume(&mut device).unwrap();
        assert_eq!(device.live_surface_count(), 1);
    }

    #[test]
    #[should_panic(expected = "present called while paused")]
    fn present_while_paused_panics() {
        let mut device = MockDevice::new(Capabilities::minimal());
        let mut manager = init(&mut device, 800, 600);
        manager.pause(&mut device);
        _ = manager.present(&mut device, PresentRegion::Full);
    }

    #[test]
    fn destroy_releases_everything() {
        let mut device = MockDevice::new(Capabilities::minimal());
        let manager = init(&mut device, 800, 600);
        manager.destroy(&mut device, &mut Tracer::none());
        assert_eq!(device.live_swapchain_count(), 0);
        assert_eq!(device.live_surface_count(), 0);
    }
}
