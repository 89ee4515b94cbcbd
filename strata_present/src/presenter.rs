// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The caller-facing frame presenter.
//!
//! [`FramePresenter`] owns the device and wires the passive components
//! together: [`SurfaceManager`] for the swap chain, [`PresentThrottle`] for
//! GPU pacing, [`PartialPresentPlanner`] for the redraw decision, and (when
//! the platform supports it) the
//! [`SceneCompositor`](strata_native::compositor::SceneCompositor) for
//! platform-composited frames.
//!
//! The presentation mode is a tagged variant chosen at
//! [`initialize`](FramePresenter::initialize); an instance never switches
//! modes mid-lifetime. In the self-composited mode the renderer draws into
//! the [`FrameTarget`] from `begin_frame` and `end_frame` presents it; in
//! the native mode the renderer draws into individual native surfaces
//! between `bind`/`unbind` and `compositor_end_frame` commits the tree.
//!
//! # Call discipline
//!
//! All calls must come from one thread; there is no internal locking.
//! `begin_frame`/`end_frame` pairs must not nest, and `resize`, `pause`,
//! and `resume` are only legal between frames. Violations are caller bugs
//! and panic.

use strata_core::caps::Capabilities;
use strata_core::device::PresentDevice;
use strata_core::dirty::DirtyRegion;
use strata_core::error::{CommitError, DeviceError, PresentError, SurfaceError};
use strata_core::geom::{DeviceIntPoint, DeviceIntRect, DeviceIntSize};
use strata_core::id::{NativeSurfaceId, SurfaceHandle};
use strata_core::platform::{BindTarget, PlatformCompositor};
use strata_core::trace::{ForceReason, PresentEvent, Tracer};
use strata_native::compositor::SceneCompositor;

use crate::partial::PartialPresentPlanner;
use crate::surface::SurfaceManager;
use crate::throttle::{PresentThrottle, ThrottleConfig};

/// What the renderer draws into for one self-composited frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTarget {
    /// The presentable surface bound to the swap chain's back buffer.
    pub surface: SurfaceHandle,
    /// Back-buffer size in device pixels.
    pub size: DeviceIntSize,
}

/// Presentation mode, fixed at initialization.
#[derive(Debug)]
enum Mode<P: PlatformCompositor> {
    /// The renderer produces one flat frame; the swap chain presents it.
    SelfComposited,
    /// The platform composites independent native surfaces.
    Native(SceneCompositor<P>),
}

/// Owns the device and drives the per-frame presentation cycle.
#[derive(Debug)]
pub struct FramePresenter<D: PresentDevice, P: PlatformCompositor> {
    device: D,
    caps: Capabilities,
    surface: SurfaceManager,
    throttle: PresentThrottle,
    planner: PartialPresentPlanner,
    mode: Mode<P>,
    frame_index: u64,
    frame_open: bool,
    /// Latched resize, applied at the next frame boundary.
    pending_resize: Option<DeviceIntSize>,
}

impl<D: PresentDevice, P: PlatformCompositor> FramePresenter<D, P> {
    /// Probes capabilities, creates the swap chain, and picks the
    /// presentation mode.
    ///
    /// The native mode is selected only when the device advertises native
    /// compositing *and* a platform backend is supplied; otherwise the
    /// presenter self-composites and `platform` is dropped.
    pub fn initialize(
        mut device: D,
        platform: Option<P>,
        size: DeviceIntSize,
        throttle: ThrottleConfig,
        tracer: &mut Tracer<'_>,
    ) -> Result<Self, DeviceError> {
        let caps = device.capabilities();
        let surface = SurfaceManager::initialize(&mut device, size, &caps, tracer)?;
        let mode = match platform {
            Some(platform) if caps.native_compositor => {
                Mode::Native(SceneCompositor::new(platform))
            }
            _ => Mode::SelfComposited,
        };
        Ok(Self {
            device,
            caps,
            surface,
            throttle: PresentThrottle::new(throttle),
            planner: PartialPresentPlanner::new(&caps),
            mode,
            frame_index: 0,
            frame_open: false,
            pending_resize: None,
        })
    }

    // -- capability queries ------------------------------------------------

    /// Whether rendering runs on the translated-GL device path. Constant
    /// for this presenter.
    #[must_use]
    pub const fn use_angle(&self) -> bool {
        true
    }

    /// Whether the platform compositor backs the presentation (swap chain
    /// or native surfaces).
    #[must_use]
    pub const fn use_dcomp(&self) -> bool {
        self.caps.native_compositor
    }

    /// Whether the swap chain rotates three buffers.
    #[must_use]
    pub const fn use_triple_buffering(&self) -> bool {
        self.caps.triple_buffering
    }

    /// Whether frames are composited by the platform from independent
    /// native surfaces.
    #[must_use]
    pub fn should_use_native_compositor(&self) -> bool {
        matches!(self.mode, Mode::Native(_))
    }

    /// Whether the presentable surface's Y axis points down in GL terms.
    #[must_use]
    pub const fn surface_is_y_flipped(&self) -> bool {
        self.caps.surface_y_flipped
    }

    /// The platform's dirty-rectangle budget for partial presents.
    #[must_use]
    pub fn max_partial_present_rects(&self) -> u32 {
        self.planner.max_partial_rects()
    }

    /// The capability snapshot probed at initialization.
    #[must_use]
    pub const fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    // -- state queries -----------------------------------------------------

    /// The cached back-buffer size. A latched resize is not reflected
    /// until it is applied at a frame boundary.
    #[must_use]
    pub fn buffer_size(&self) -> DeviceIntSize {
        self.surface.buffer_size()
    }

    /// Monotonic count of completed frames.
    #[must_use]
    pub const fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Whether the next present is already committed to the full surface.
    #[must_use]
    pub fn is_full_render_forced(&self) -> bool {
        self.planner.is_full_render_forced()
    }

    /// Probes the device for reset. Once `true`, the presenter is dead and
    /// the caller must recreate it.
    pub fn is_context_lost(&mut self) -> bool {
        self.device.is_context_lost()
    }

    /// Shared access to the device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Exclusive access to the device.
    ///
    /// Must not be used to mutate swap-chain or query state behind the
    /// presenter's back.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    // -- frame lifecycle ---------------------------------------------------

    /// Opens a frame: applies any latched resize and returns the target to
    /// draw into.
    ///
    /// # Panics
    ///
    /// Panics if a frame is already open or the presenter is paused.
    pub fn begin_frame(&mut self, tracer: &mut Tracer<'_>) -> Result<FrameTarget, PresentError> {
        assert!(!self.frame_open, "begin_frame while a frame is open");
        assert!(!self.surface.is_paused(), "begin_frame while paused");
        if self.device.is_context_lost() {
            return Err(PresentError::DeviceLost);
        }
        self.apply_pending_resize(tracer)?;
        self.frame_open = true;
        Ok(FrameTarget {
            surface: self.surface.active_surface(),
            size: self.surface.buffer_size(),
        })
    }

    /// Closes the frame: presents (self-composited mode only), paces the
    /// GPU, and advances the frame counter.
    ///
    /// `dirty` is this frame's change estimate; the planner decides what
    /// actually reaches the device. In the native mode the swap chain is
    /// not presented; the tree committed by
    /// [`compositor_end_frame`](Self::compositor_end_frame) is what
    /// reaches the screen.
    ///
    /// # Panics
    ///
    /// Panics if no frame is open.
    pub fn end_frame(
        &mut self,
        dirty: &DirtyRegion,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), PresentError> {
        assert!(self.frame_open, "end_frame without begin_frame");
        self.frame_open = false;

        if !self.should_use_native_compositor() {
            let region = self.planner.plan(dirty, tracer);
            self.surface.present(&mut self.device, region)?;
            #[expect(
                clippy::cast_possible_truncation,
                reason = "rect count is bounded by the platform maximum"
            )]
            let rect_count = region.rect_count().min(u32::MAX as usize) as u32;
            tracer.present(&PresentEvent {
                frame_index: self.frame_index,
                full: region.is_full(),
                rect_count,
            });
        }
        self.throttle
            .after_present(&mut self.device, self.frame_index, tracer);
        self.frame_index += 1;
        Ok(())
    }

    /// Waits for the oldest in-flight present.
    ///
    /// Returns `false` only on device loss; check
    /// [`is_context_lost`](Self::is_context_lost) and recreate.
    pub fn wait_for_gpu(&mut self, tracer: &mut Tracer<'_>) -> bool {
        self.throttle
            .wait_for_gpu(&mut self.device, self.frame_index, tracer)
    }

    /// Latches a resize; it takes effect at the next frame boundary
    /// ([`begin_frame`](Self::begin_frame) or [`update`](Self::update)).
    pub fn resize(&mut self, new_size: DeviceIntSize) {
        self.pending_resize = Some(new_size);
    }

    /// Runs deferred maintenance between frames; currently this applies a
    /// latched resize without waiting for the next `begin_frame`.
    ///
    /// A no-op while paused.
    ///
    /// # Panics
    ///
    /// Panics if a frame is open.
    pub fn update(&mut self, tracer: &mut Tracer<'_>) -> Result<(), PresentError> {
        assert!(!self.frame_open, "update during a frame");
        if self.surface.is_paused() {
            return Ok(());
        }
        self.apply_pending_resize(tracer)
    }

    /// Releases the presentable surface while the window is hidden. The
    /// swap chain and device survive; this is not device loss.
    ///
    /// # Panics
    ///
    /// Panics if a frame is open.
    pub fn pause(&mut self) {
        assert!(!self.frame_open, "pause during a frame");
        self.surface.pause(&mut self.device);
    }

    /// Recreates the presentable surface after a pause.
    ///
    /// Surface content is undefined afterwards, so the next present is
    /// forced full. A no-op when not paused.
    pub fn resume(&mut self, tracer: &mut Tracer<'_>) -> Result<(), PresentError> {
        if !self.surface.is_paused() {
            return Ok(());
        }
        self.surface.resume(&mut self.device)?;
        self.planner.force(ForceReason::Resumed, tracer);
        Ok(())
    }

    /// Forces the next present to cover the whole surface. Idempotent.
    pub fn request_full_render(&mut self, tracer: &mut Tracer<'_>) {
        self.planner.request_full_render(tracer);
    }

    /// Releases every device resource and returns the device.
    ///
    /// In-flight queries are abandoned, not waited on.
    pub fn shutdown(mut self, tracer: &mut Tracer<'_>) -> D {
        self.throttle.discard_all(&mut self.device);
        self.surface.destroy(&mut self.device, tracer);
        self.device
    }

    fn apply_pending_resize(&mut self, tracer: &mut Tracer<'_>) -> Result<(), PresentError> {
        let Some(new_size) = self.pending_resize.take() else {
            return Ok(());
        };
        if self.surface.resize(&mut self.device, new_size, tracer)? {
            // The queued queries reference the destroyed chain; the new
            // chain's non-front buffers hold stale content.
            self.throttle.discard_all(&mut self.device);
            self.planner.force(ForceReason::Resized, tracer);
        }
        Ok(())
    }

    // -- native-surface operations -----------------------------------------

    fn native(&mut self) -> &mut SceneCompositor<P> {
        match &mut self.mode {
            Mode::Native(scene) => scene,
            Mode::SelfComposited => panic!("native compositor is not active"),
        }
    }

    /// The native scene, for inspection.
    ///
    /// # Panics
    ///
    /// Panics if the native mode is not active; gate on
    /// [`should_use_native_compositor`](Self::should_use_native_compositor).
    #[must_use]
    pub fn scene(&self) -> &SceneCompositor<P> {
        match &self.mode {
            Mode::Native(scene) => scene,
            Mode::SelfComposited => panic!("native compositor is not active"),
        }
    }

    /// Opens the native tree's mutation window for this frame.
    ///
    /// # Panics
    ///
    /// Panics if the native mode is not active.
    pub fn compositor_begin_frame(&mut self) {
        self.native().begin_frame();
    }

    /// Allocates a native surface. See
    /// [`SceneCompositor::create_surface`].
    pub fn create_surface(
        &mut self,
        id: NativeSurfaceId,
        size: DeviceIntSize,
        opaque: bool,
    ) -> Result<(), SurfaceError> {
        self.native().create_surface(id, size, opaque)
    }

    /// Releases a native surface. See
    /// [`SceneCompositor::destroy_surface`].
    pub fn destroy_surface(&mut self, id: NativeSurfaceId) -> Result<(), SurfaceError> {
        self.native().destroy_surface(id)
    }

    /// Opens a native surface for drawing. See [`SceneCompositor::bind`].
    pub fn bind(
        &mut self,
        id: NativeSurfaceId,
        dirty_rect: DeviceIntRect,
    ) -> Result<BindTarget, SurfaceError> {
        self.native().bind(id, dirty_rect)
    }

    /// Finalizes the bound native surface. See [`SceneCompositor::unbind`].
    pub fn unbind(&mut self) {
        self.native().unbind();
    }

    /// Places a native surface in paint order. See
    /// [`SceneCompositor::add_surface`].
    pub fn add_surface(
        &mut self,
        id: NativeSurfaceId,
        position: DeviceIntPoint,
        clip_rect: DeviceIntRect,
    ) -> Result<(), SurfaceError> {
        self.native().add_surface(id, position, clip_rect)
    }

    /// Commits the native tree atomically.
    ///
    /// A committed tree carries this frame's redraw, so a pending
    /// forced-full-render latch is cleared here. On rejection the previous
    /// tree stays up and the latch is re-set; the error tells the caller to
    /// redraw everything next frame.
    ///
    /// # Panics
    ///
    /// Panics if the native mode is not active.
    pub fn compositor_end_frame(&mut self, tracer: &mut Tracer<'_>) -> Result<(), CommitError> {
        let scene = match &mut self.mode {
            Mode::Native(scene) => scene,
            Mode::SelfComposited => panic!("native compositor is not active"),
        };
        self.planner.consume_forced();
        match scene.end_frame(self.frame_index, tracer) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.planner.force(ForceReason::CommitRejected, tracer);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use strata_harness::{MockDevice, MockPlatform};

    fn size() -> DeviceIntSize {
        DeviceIntSize::new(800, 600)
    }

    /// Triple buffering and partial present, but no native compositing.
    fn swapchain_caps() -> Capabilities {
        let mut caps = Capabilities::direct_composition();
        caps.native_compositor = false;
        caps
    }

    fn swapchain_presenter(caps: Capabilities) -> FramePresenter<MockDevice, MockPlatform> {
        FramePresenter::initialize(
            MockDevice::new(caps),
            None,
            size(),
            ThrottleConfig::default(),
            &mut Tracer::none(),
        )
        .unwrap()
    }

    fn native_presenter() -> FramePresenter<MockDevice, MockPlatform> {
        FramePresenter::initialize(
            MockDevice::new(Capabilities::direct_composition()),
            Some(MockPlatform::new()),
            size(),
            ThrottleConfig::default(),
            &mut Tracer::none(),
        )
        .unwrap()
    }

    fn one_rect() -> DirtyRegion {
        DirtyRegion::Rects(vec![DeviceIntRect::new(0, 0, 16, 16)])
    }

    #[test]
    fn initialize_without_native_compositing() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        assert!(presenter.use_angle());
        assert!(!presenter.use_dcomp());
        assert!(presenter.use_triple_buffering());
        assert!(!presenter.should_use_native_compositor());

        // An empty dirty list performs a full present and enqueues exactly
        // one completion query.
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter
            .end_frame(&DirtyRegion::Rects(vec![]), &mut Tracer::none())
            .unwrap();
        let device = presenter.device();
        assert_eq!(device.presents().len(), 1);
        assert!(device.presents()[0].full);
        assert_eq!(device.issued_queries(), 1);
        assert_eq!(device.outstanding_queries(), 1);
        assert_eq!(presenter.frame_index(), 1);
    }

    #[test]
    fn second_frame_presents_partially() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();

        let presents = presenter.device().presents();
        assert!(presents[0].full, "first frame is forced full");
        assert!(!presents[1].full);
        assert_eq!(presents[1].rects.len(), 1);
    }

    #[test]
    fn latched_resize_applies_at_begin_frame() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();

        let new_size = DeviceIntSize::new(1280, 720);
        presenter.resize(new_size);
        assert_eq!(presenter.buffer_size(), size(), "not applied mid-latch");

        let target = presenter.begin_frame(&mut Tracer::none()).unwrap();
        assert_eq!(target.size, new_size);
        assert_eq!(presenter.buffer_size(), new_size);
        // The queued query referenced the destroyed chain.
        assert_eq!(presenter.device().retired_queries().len(), 1);

        // The frame after a resize is forced full despite its dirty list.
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();
        assert!(presenter.device().presents().last().unwrap().full);
    }

    #[test]
    fn resize_to_current_size_changes_nothing() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();

        presenter.resize(size());
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();
        assert!(presenter.device().destroyed_swapchains().is_empty());
        assert!(!presenter.device().presents()[1].full);
    }

    #[test]
    fn update_applies_resize_between_frames() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        let new_size = DeviceIntSize::new(640, 480);
        presenter.resize(new_size);
        presenter.update(&mut Tracer::none()).unwrap();
        assert_eq!(presenter.buffer_size(), new_size);
    }

    #[test]
    fn request_full_render_forces_exactly_one_present() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        // Burn the initial forced-full frame.
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();

        presenter.request_full_render(&mut Tracer::none());
        assert!(presenter.is_full_render_forced());
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();
        assert!(!presenter.is_full_render_forced());
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();

        let presents = presenter.device().presents();
        assert!(presents[1].full);
        assert!(!presents[2].full);
    }

    #[test]
    fn pause_resume_forces_a_full_render() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();

        presenter.pause();
        assert_eq!(presenter.device().live_surface_count(), 0);
        presenter.resume(&mut Tracer::none()).unwrap();
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();
        assert!(presenter.device().presents().last().unwrap().full);
    }

    #[test]
    fn lost_context_fails_begin_frame() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        presenter.device_mut().context_lost = true;
        assert!(presenter.is_context_lost());
        assert_eq!(
            presenter.begin_frame(&mut Tracer::none()).unwrap_err(),
            PresentError::DeviceLost
        );
    }

    #[test]
    fn native_mode_commits_a_tree_instead_of_presenting() {
        let mut presenter = native_presenter();
        assert!(presenter.should_use_native_compositor());
        assert!(presenter.use_dcomp());

        let id = NativeSurfaceId(1);
        let pos = DeviceIntPoint::new(10, 10);
        let clip = DeviceIntRect::new(0, 0, 256, 256);

        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.compositor_begin_frame();
        presenter
            .create_surface(id, DeviceIntSize::new(256, 256), true)
            .unwrap();
        let target = presenter.bind(id, clip).unwrap();
        assert_eq!(target.dirty_rect, clip);
        presenter.unbind();
        presenter.add_surface(id, pos, clip).unwrap();
        presenter.compositor_end_frame(&mut Tracer::none()).unwrap();
        presenter
            .end_frame(&DirtyRegion::Full, &mut Tracer::none())
            .unwrap();

        assert_eq!(presenter.scene().committed().len(), 1);
        assert_eq!(presenter.scene().committed()[0].position, pos);
        // The swap chain was not presented, but the frame was still paced.
        assert!(presenter.device().presents().is_empty());
        assert_eq!(presenter.device().outstanding_queries(), 1);
    }

    #[test]
    fn rejected_commit_latches_a_full_render() {
        let mut presenter = native_presenter();
        let id = NativeSurfaceId(1);
        let clip = DeviceIntRect::new(0, 0, 64, 64);

        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.compositor_begin_frame();
        presenter
            .create_surface(id, DeviceIntSize::new(64, 64), true)
            .unwrap();
        presenter.add_surface(id, DeviceIntPoint::ZERO, clip).unwrap();
        presenter.compositor_end_frame(&mut Tracer::none()).unwrap();
        presenter
            .end_frame(&DirtyRegion::Full, &mut Tracer::none())
            .unwrap();
        assert!(!presenter.is_full_render_forced());

        let mode_scene = match &mut presenter.mode {
            Mode::Native(scene) => scene,
            Mode::SelfComposited => unreachable!(),
        };
        mode_scene.platform_mut().fail_next_commit = true;

        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.compositor_begin_frame();
        presenter
            .add_surface(id, DeviceIntPoint::new(5, 5), clip)
            .unwrap();
        assert_eq!(
            presenter.compositor_end_frame(&mut Tracer::none()),
            Err(CommitError::Rejected)
        );
        presenter
            .end_frame(&DirtyRegion::Full, &mut Tracer::none())
            .unwrap();

        assert!(presenter.is_full_render_forced());
        assert_eq!(presenter.scene().committed()[0].position, DeviceIntPoint::ZERO);
    }

    #[test]
    fn native_full_render_clears_after_the_redraw_frame() {
        let mut presenter = native_presenter();
        let id = NativeSurfaceId(1);
        let clip = DeviceIntRect::new(0, 0, 64, 64);

        // Initialization latches a full render; the first committed frame
        // clears it.
        assert!(presenter.is_full_render_forced());
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.compositor_begin_frame();
        presenter
            .create_surface(id, DeviceIntSize::new(64, 64), true)
            .unwrap();
        presenter.add_surface(id, DeviceIntPoint::ZERO, clip).unwrap();
        presenter.compositor_end_frame(&mut Tracer::none()).unwrap();
        presenter
            .end_frame(&DirtyRegion::Full, &mut Tracer::none())
            .unwrap();
        assert!(!presenter.is_full_render_forced());

        // A rejected commit re-latches within the same frame.
        let mode_scene = match &mut presenter.mode {
            Mode::Native(scene) => scene,
            Mode::SelfComposited => unreachable!(),
        };
        mode_scene.platform_mut().fail_next_commit = true;
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.compositor_begin_frame();
        presenter
            .add_surface(id, DeviceIntPoint::new(5, 5), clip)
            .unwrap();
        assert!(presenter.compositor_end_frame(&mut Tracer::none()).is_err());
        presenter
            .end_frame(&DirtyRegion::Full, &mut Tracer::none())
            .unwrap();
        assert!(presenter.is_full_render_forced());

        // The redraw frame whose commit succeeds clears the latch again.
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.compositor_begin_frame();
        presenter
            .add_surface(id, DeviceIntPoint::new(5, 5), clip)
            .unwrap();
        presenter.compositor_end_frame(&mut Tracer::none()).unwrap();
        presenter
            .end_frame(&DirtyRegion::Full, &mut Tracer::none())
            .unwrap();
        assert!(!presenter.is_full_render_forced());
        assert_eq!(presenter.scene().committed()[0].position, DeviceIntPoint::new(5, 5));
    }

    #[test]
    fn wait_for_gpu_drains_in_flight_presents() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();
        assert!(presenter.wait_for_gpu(&mut Tracer::none()));
        assert_eq!(presenter.device().outstanding_queries(), 0);
    }

    #[test]
    fn shutdown_releases_everything() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        presenter.end_frame(&one_rect(), &mut Tracer::none()).unwrap();
        let device = presenter.shutdown(&mut Tracer::none());
        assert_eq!(device.live_swapchain_count(), 0);
        assert_eq!(device.live_surface_count(), 0);
        assert_eq!(device.outstanding_queries(), 0);
    }

    #[test]
    #[should_panic(expected = "begin_frame while a frame is open")]
    fn nested_begin_frame_panics() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        presenter.begin_frame(&mut Tracer::none()).unwrap();
        _ = presenter.begin_frame(&mut Tracer::none());
    }

    #[test]
    #[should_panic(expected = "begin_frame while paused")]
    fn begin_frame_while_paused_panics() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        presenter.pause();
        _ = presenter.begin_frame(&mut Tracer::none());
    }

    #[test]
    #[should_panic(expected = "native compositor is not active")]
    fn native_ops_panic_in_swapchain_mode() {
        let mut presenter = swapchain_presenter(swapchain_caps());
        presenter.compositor_begin_frame();
    }
}
