// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GPU present throttling with recycled completion queries.
//!
//! [`PresentThrottle`] keeps a bounded FIFO of completion queries, one per
//! in-flight present. When the FIFO is full, the oldest query is waited on
//! with a bounded poll before the next query is enqueued, capping how many
//! frames the CPU may produce ahead of the GPU.
//!
//! Signaled query objects go to a free pool and are handed back to the
//! device on the next issue, so the frame path performs no allocation after
//! construction.
//!
//! Degradation is deliberate and silent: devices without completion
//! queries skip throttling entirely, and a wait that exhausts its poll
//! budget gives the query back to the device and lets the frame continue.
//! Both show up only through the tracer.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use strata_core::device::{PresentDevice, QueryStatus};
use strata_core::id::QueryHandle;
use strata_core::trace::{QueryTimeoutEvent, Tracer};

/// Throttle tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ThrottleConfig {
    /// Maximum presents in flight before submission blocks on the oldest.
    pub max_pending: usize,
    /// Poll attempts per wait before giving up on a query.
    ///
    /// A count, not a wall-clock bound: the device's
    /// [`poll_query`](PresentDevice::poll_query) may sleep briefly
    /// internally, and this crate owns no clock.
    pub max_poll_attempts: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_pending: 2,
            max_poll_attempts: 64,
        }
    }
}

/// Outcome of waiting on the oldest queued query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WaitOutcome {
    /// Nothing was queued.
    Idle,
    /// The GPU signaled the query.
    Completed,
    /// The poll budget ran out; throttling is skipped this cycle.
    TimedOut,
    /// The query can never signal; the device is gone.
    DeviceGone,
}

/// Bounded FIFO of in-flight present-completion queries.
#[derive(Debug)]
pub struct PresentThrottle {
    config: ThrottleConfig,
    /// Oldest first. Never longer than `config.max_pending`.
    queued: VecDeque<QueryHandle>,
    /// Signaled query objects awaiting reuse.
    free: Vec<QueryHandle>,
}

impl PresentThrottle {
    /// Creates an empty throttle; all capacity is reserved up front.
    ///
    /// # Panics
    ///
    /// Panics if `config.max_pending` is zero.
    #[must_use]
    pub fn new(config: ThrottleConfig) -> Self {
        assert!(config.max_pending > 0, "max_pending must be at least 1");
        Self {
            config,
            queued: VecDeque::with_capacity(config.max_pending),
            free: Vec::with_capacity(config.max_pending),
        }
    }

    /// Queries currently in flight.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queued.len()
    }

    /// The configured in-flight bound.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.max_pending
    }

    /// Waits for the oldest in-flight present, if any.
    ///
    /// Returns `false` only when the device reported the query can never
    /// signal (device loss); timeouts and an empty queue return `true` and
    /// let submission continue.
    pub fn wait_for_gpu<D: PresentDevice>(
        &mut self,
        device: &mut D,
        frame_index: u64,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        self.wait_oldest(device, frame_index, tracer) != WaitOutcome::DeviceGone
    }

    /// Records a present: throttles if the FIFO is full, then issues and
    /// enqueues a completion query.
    ///
    /// On devices without completion queries this is a no-op and frames
    /// run unthrottled.
    pub fn after_present<D: PresentDevice>(
        &mut self,
        device: &mut D,
        frame_index: u64,
        tracer: &mut Tracer<'_>,
    ) {
        if self.queued.len() >= self.config.max_pending {
            _ = self.wait_oldest(device, frame_index, tracer);
        }
        let recycled = self.free.pop();
        if let Some(query) = device.issue_completion_query(recycled) {
            self.queued.push_back(query);
        }
    }

    /// Abandons every in-flight query without waiting.
    ///
    /// Used when the swap chain the queries were issued against is being
    /// destroyed. The free pool survives; those objects are still valid
    /// device children.
    pub fn discard_all<D: PresentDevice>(&mut self, device: &mut D) {
        while let Some(query) = self.queued.pop_front() {
            device.retire_query(query);
        }
    }

    fn wait_oldest<D: PresentDevice>(
        &mut self,
        device: &mut D,
        frame_index: u64,
        tracer: &mut Tracer<'_>,
    ) -> WaitOutcome {
        let Some(query) = self.queued.pop_front() else {
            return WaitOutcome::Idle;
        };
        let mut polls: u32 = 0;
        loop {
            match device.poll_query(query) {
                QueryStatus::Signaled => {
                    self.free.push(query);
                    return WaitOutcome::Completed;
                }
                QueryStatus::Unavailable => {
                    // The handle is dead with the device; do not recycle it.
                    return WaitOutcome::DeviceGone;
                }
                QueryStatus::Pending => {
                    polls += 1;
                    if polls >= self.config.max_poll_attempts {
                        tracer.query_timeout(&QueryTimeoutEvent { frame_index, polls });
                        device.retire_query(query);
                        return WaitOutcome::TimedOut;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::caps::Capabilities;
    use strata_harness::MockDevice;

    fn device() -> MockDevice {
        MockDevice::new(Capabilities::minimal())
    }

    fn throttle() -> PresentThrottle {
        PresentThrottle::new(ThrottleConfig::default())
    }

    #[test]
    fn queue_never_exceeds_its_bound() {
        let mut dev = device();
        let mut throttle = throttle();
        for frame in 0..10 {
            throttle.after_present(&mut dev, frame, &mut Tracer::none());
            assert!(throttle.pending() <= throttle.capacity());
            assert!(dev.outstanding_queries() <= throttle.capacity());
        }
        assert_eq!(throttle.pending(), 2);
    }

    #[test]
    fn signaled_queries_are_recycled_not_reallocated() {
        let mut dev = device();
        let mut throttle = throttle();
        for frame in 0..6 {
            throttle.after_present(&mut dev, frame, &mut Tracer::none());
        }
        // Six issues, but only the first two minted fresh objects.
        assert_eq!(dev.issued_queries(), 6);
        assert_eq!(dev.reused_queries(), 4);
    }

    #[test]
    fn wait_with_empty_queue_is_idle() {
        let mut dev = device();
        let mut throttle = throttle();
        assert!(throttle.wait_for_gpu(&mut dev, 0, &mut Tracer::none()));
        assert_eq!(dev.issued_queries(), 0);
    }

    #[test]
    fn wait_drains_the_oldest_query() {
        let mut dev = device();
        let mut throttle = throttle();
        throttle.after_present(&mut dev, 0, &mut Tracer::none());
        throttle.after_present(&mut dev, 1, &mut Tracer::none());
        assert_eq!(throttle.pending(), 2);
        assert!(throttle.wait_for_gpu(&mut dev, 2, &mut Tracer::none()));
        assert_eq!(throttle.pending(), 1);
    }

    #[test]
    fn exhausted_poll_budget_retires_the_query() {
        let mut dev = device();
        dev.signal_after_polls = 1_000;
        let mut throttle = PresentThrottle::new(ThrottleConfig {
            max_pending: 1,
            max_poll_attempts: 4,
        });
        throttle.after_present(&mut dev, 0, &mut Tracer::none());
        // The FIFO is full, so this waits on frame 0's query and gives up.
        throttle.after_present(&mut dev, 1, &mut Tracer::none());
        assert_eq!(dev.retired_queries().len(), 1);
        assert_eq!(throttle.pending(), 1);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn exhausted_poll_budget_is_traced() {
        use strata_core::trace::TraceSink;

        #[derive(Default)]
        struct Timeouts(Vec<u32>);
        impl TraceSink for Timeouts {
            fn on_query_timeout(&mut self, e: &QueryTimeoutEvent) {
                self.0.push(e.polls);
            }
        }

        let mut dev = device();
        dev.signal_after_polls = 1_000;
        let mut throttle = PresentThrottle::new(ThrottleConfig {
            max_pending: 1,
            max_poll_attempts: 4,
        });
        let mut sink = Timeouts::default();
        throttle.after_present(&mut dev, 0, &mut Tracer::new(&mut sink));
        throttle.after_present(&mut dev, 1, &mut Tracer::new(&mut sink));
        assert_eq!(sink.0, [4]);
    }

    #[test]
    fn unsupported_queries_skip_throttling() {
        let mut caps = Capabilities::minimal();
        caps.completion_queries = false;
        let mut dev = MockDevice::new(caps);
        let mut throttle = throttle();
        for frame in 0..5 {
            throttle.after_present(&mut dev, frame, &mut Tracer::none());
        }
        assert_eq!(throttle.pending(), 0);
        assert_eq!(dev.issued_queries(), 0);
        assert!(throttle.wait_for_gpu(&mut dev, 5, &mut Tracer::none()));
    }

    #[test]
    fn lost_device_fails_the_wait() {
        let mut dev = device();
        let mut throttle = throttle();
        throttle.after_present(&mut dev, 0, &mut Tracer::none());
        dev.context_lost = true;
        assert!(!throttle.wait_for_gpu(&mut dev, 1, &mut Tracer::none()));
        assert_eq!(throttle.pending(), 0);
    }

    #[test]
    fn discard_all_retires_without_waiting() {
        let mut dev = device();
        dev.signal_after_polls = 1_000;
        let mut throttle = throttle();
        throttle.after_present(&mut dev, 0, &mut Tracer::none());
        throttle.after_present(&mut dev, 1, &mut Tracer::none());
        throttle.discard_all(&mut dev);
        assert_eq!(throttle.pending(), 0);
        assert_eq!(dev.retired_queries().len(), 2);
        assert_eq!(dev.outstanding_queries(), 0);
    }

    #[test]
    #[should_panic(expected = "max_pending must be at least 1")]
    fn zero_capacity_is_rejected() {
        _ = PresentThrottle::new(ThrottleConfig {
            max_pending: 0,
            max_poll_attempts: 1,
        });
    }
}
