// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full- versus partial-region present planning.
//!
//! Partial presents combined with multi-buffering can leave non-front
//! buffers holding stale content, so any discontinuity (resize, surface
//! recreation, rejected native commit, explicit request) must be corrected
//! by one full present before partial updates resume. [`PartialPresentPlanner`]
//! owns that latch and applies the per-frame decision.

use strata_core::caps::Capabilities;
use strata_core::dirty::{DirtyRegion, PresentRegion};
use strata_core::trace::{ForceFullRenderEvent, ForceReason, Tracer};

/// Decides, per frame, whether to present the whole surface or only the
/// dirty rectangles.
#[derive(Debug)]
pub struct PartialPresentPlanner {
    /// Capability-derived at init; never re-probed.
    use_partial_present: bool,
    max_rects: u32,
    /// Latched across frames, cleared by the frame that honors it.
    force_full_render: bool,
}

impl PartialPresentPlanner {
    /// Derives the planner from the capability snapshot.
    ///
    /// Starts with a forced full render: the swap chain's initial buffer
    /// content is undefined.
    #[must_use]
    pub fn new(caps: &Capabilities) -> Self {
        Self {
            use_partial_present: caps.partial_present && caps.max_partial_rects > 0,
            max_rects: caps.max_partial_rects,
            force_full_render: true,
        }
    }

    /// The platform's dirty-rectangle budget, probed once at init.
    ///
    /// Zero when partial presents are unsupported.
    #[must_use]
    pub fn max_partial_rects(&self) -> u32 {
        self.max_rects
    }

    /// Whether the next plan is already committed to a full present.
    #[must_use]
    pub fn is_full_render_forced(&self) -> bool {
        self.force_full_render
    }

    /// Forces the next present to cover the whole surface. Idempotent.
    pub fn request_full_render(&mut self, tracer: &mut Tracer<'_>) {
        self.force(ForceReason::Requested, tracer);
    }

    /// Latches a forced full render, tracing the transition.
    pub(crate) fn force(&mut self, reason: ForceReason, tracer: &mut Tracer<'_>) {
        if !self.force_full_render {
            tracer.force_full_render(&ForceFullRenderEvent { reason });
        }
        self.force_full_render = true;
    }

    /// Clears the latch, reporting whether this frame must redraw fully.
    ///
    /// Called once per frame by whichever path carries the redraw to the
    /// screen: [`plan`](Self::plan) for a swap-chain present, the committed
    /// native tree otherwise.
    pub(crate) fn consume_forced(&mut self) -> bool {
        core::mem::take(&mut self.force_full_render)
    }

    /// Turns this frame's dirty region into the region to present.
    ///
    /// A full present clears the force latch. An empty dirty list means
    /// change tracking produced nothing usable and presents full. A dirty
    /// list over the platform budget falls back to a full present for this
    /// frame (traced, not an error).
    pub fn plan<'a>(
        &mut self,
        dirty: &'a DirtyRegion,
        tracer: &mut Tracer<'_>,
    ) -> PresentRegion<'a> {
        let forced = self.consume_forced();
        if forced || !self.use_partial_present {
            return PresentRegion::Full;
        }
        match dirty {
            DirtyRegion::Full | DirtyRegion::None => PresentRegion::Full,
            DirtyRegion::Rects(rects) if rects.is_empty() => PresentRegion::Full,
            DirtyRegion::Rects(rects) if rects.len() > self.max_rects as usize => {
                tracer.force_full_render(&ForceFullRenderEvent {
                    reason: ForceReason::RectBudgetExceeded,
                });
                PresentRegion::Full
            }
            DirtyRegion::Rects(rects) => PresentRegion::Partial(rects),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use strata_core::geom::DeviceIntRect;

    fn planner() -> PartialPresentPlanner {
        let mut planner = PartialPresentPlanner::new(&Capabilities::direct_composition());
        // Burn the initial forced full render.
        _ = planner.plan(&DirtyRegion::Full, &mut Tracer::none());
        planner
    }

    fn rects(n: i32) -> DirtyRegion {
        let rects: Vec<_> = (0..n).map(|i| DeviceIntRect::new(i * 10, 0, 8, 8)).collect();
        DirtyRegion::Rects(rects)
    }

    #[test]
    fn first_frame_is_always_full() {
        let mut planner = PartialPresentPlanner::new(&Capabilities::direct_composition());
        assert!(planner.is_full_render_forced());
        assert!(planner.plan(&rects(1), &mut Tracer::none()).is_full());
        // The full present cleared the latch.
        assert!(!planner.is_full_render_forced());
    }

    #[test]
    fn bounded_dirty_list_passes_through_unchanged() {
        let mut planner = planner();
        let dirty = rects(3);
        let region = planner.plan(&dirty, &mut Tracer::none());
        let PresentRegion::Partial(out) = region else {
            panic!("expected a partial present");
        };
        let DirtyRegion::Rects(expected) = &dirty else {
            unreachable!()
        };
        assert_eq!(out, &expected[..]);
    }

    #[test]
    fn over_budget_dirty_list_presents_full() {
        let mut planner = planner();
        assert_eq!(planner.max_partial_rects(), 4);
        assert!(planner.plan(&rects(5), &mut Tracer::none()).is_full());
        // One bad frame does not latch; the next bounded list is partial.
        assert!(!planner.plan(&rects(2), &mut Tracer::none()).is_full());
    }

    #[test]
    fn empty_dirty_list_presents_full() {
        let mut planner = planner();
        assert!(planner.plan(&rects(0), &mut Tracer::none()).is_full());
        assert!(planner.plan(&DirtyRegion::None, &mut Tracer::none()).is_full());
    }

    #[test]
    fn request_full_render_is_a_one_shot() {
        let mut planner = planner();
        planner.request_full_render(&mut Tracer::none());
        planner.request_full_render(&mut Tracer::none());
        assert!(planner.is_full_render_forced());
        assert!(planner.plan(&rects(1), &mut Tracer::none()).is_full());
        assert!(!planner.is_full_render_forced());
        assert!(!planner.plan(&rects(1), &mut Tracer::none()).is_full());
    }

    #[test]
    fn unsupported_partial_present_is_always_full() {
        let mut planner = PartialPresentPlanner::new(&Capabilities::minimal());
        assert_eq!(planner.max_partial_rects(), 0);
        for _ in 0..3 {
            assert!(planner.plan(&rects(1), &mut Tracer::none()).is_full());
        }
    }

    #[cfg(feature = "trace")]
    #[test]
    fn force_transitions_are_traced_once() {
        use strata_core::trace::TraceSink;

        #[derive(Default)]
        struct Reasons(Vec<ForceReason>);
        impl TraceSink for Reasons {
            fn on_force_full_render(&mut self, e: &ForceFullRenderEvent) {
                self.0.push(e.reason);
            }
        }

        let mut planner = planner();
        let mut sink = Reasons::default();
        planner.request_full_render(&mut Tracer::new(&mut sink));
        planner.request_full_render(&mut Tracer::new(&mut sink));
        assert_eq!(sink.0, [ForceReason::Requested]);
    }
}
