// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them
//! back as an iterator of [`RecordedEvent`] in record order.

use strata_core::device::BufferingMode;
use strata_core::geom::DeviceIntSize;
use strata_core::trace::{
    CommitEvent, ForceFullRenderEvent, ForceReason, PresentEvent, QueryTimeoutEvent,
    SwapchainEvent, SwapchainEventKind, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SWAPCHAIN: u8 = 1;
const TAG_PRESENT: u8 = 2;
const TAG_QUERY_TIMEOUT: u8 = 3;
const TAG_FORCE_FULL_RENDER: u8 = 4;
const TAG_COMMIT: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_size(&mut self, size: DeviceIntSize) {
        self.write_i32(size.width);
        self.write_i32(size.height);
    }

    fn write_buffering(&mut self, b: BufferingMode) {
        self.write_u8(match b {
            BufferingMode::Double => 0,
            BufferingMode::Triple => 1,
        });
    }

    fn write_kind(&mut self, k: SwapchainEventKind) {
        self.write_u8(match k {
            SwapchainEventKind::Created => 0,
            SwapchainEventKind::Recreated => 1,
            SwapchainEventKind::Destroyed => 2,
        });
    }

    fn write_reason(&mut self, r: ForceReason) {
        self.write_u8(match r {
            ForceReason::Resized => 0,
            ForceReason::Requested => 1,
            ForceReason::Resumed => 2,
            ForceReason::RectBudgetExceeded => 3,
            ForceReason::CommitRejected => 4,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_swapchain(&mut self, e: &SwapchainEvent) {
        self.write_u8(TAG_SWAPCHAIN);
        self.write_kind(e.kind);
        self.write_size(e.size);
        self.write_buffering(e.buffering);
    }

    fn on_present(&mut self, e: &PresentEvent) {
        self.write_u8(TAG_PRESENT);
        self.write_u64(e.frame_index);
        self.write_u8(u8::from(e.full));
        self.write_u32(e.rect_count);
    }

    fn on_query_timeout(&mut self, e: &QueryTimeoutEvent) {
        self.write_u8(TAG_QUERY_TIMEOUT);
        self.write_u64(e.frame_index);
        self.write_u32(e.polls);
    }

    fn on_force_full_render(&mut self, e: &ForceFullRenderEvent) {
        self.write_u8(TAG_FORCE_FULL_RENDER);
        self.write_reason(e.reason);
    }

    fn on_commit(&mut self, e: &CommitEvent) {
        self.write_u8(TAG_COMMIT);
        self.write_u64(e.frame_index);
        self.write_u32(e.surface_count);
        self.write_u8(u8::from(e.accepted));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A [`SwapchainEvent`].
    Swapchain(SwapchainEvent),
    /// A [`PresentEvent`].
    Present(PresentEvent),
    /// A [`QueryTimeoutEvent`].
    QueryTimeout(QueryTimeoutEvent),
    /// A [`ForceFullRenderEvent`].
    ForceFullRender(ForceFullRenderEvent),
    /// A [`CommitEvent`].
    Commit(CommitEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_i32(&mut self) -> Option<i32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = i32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_size(&mut self) -> Option<DeviceIntSize> {
        Some(DeviceIntSize::new(self.read_i32()?, self.read_i32()?))
    }

    fn read_buffering(&mut self) -> Option<BufferingMode> {
        Some(match self.read_u8()? {
            0 => BufferingMode::Double,
            _ => BufferingMode::Triple,
        })
    }

    fn read_kind(&mut self) -> Option<SwapchainEventKind> {
        Some(match self.read_u8()? {
            0 => SwapchainEventKind::Created,
            1 => SwapchainEventKind::Recreated,
            _ => SwapchainEventKind::Destroyed,
        })
    }

    fn read_reason(&mut self) -> Option<ForceReason> {
        Some(match self.read_u8()? {
            0 => ForceReason::Resized,
            1 => ForceReason::Requested,
            2 => ForceReason::Resumed,
            3 => ForceReason::RectBudgetExceeded,
            _ => ForceReason::CommitRejected,
        })
    }

    fn decode_swapchain(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Swapchain(SwapchainEvent {
            kind: self.read_kind()?,
            size: self.read_size()?,
            buffering: self.read_buffering()?,
        }))
    }

    fn decode_present(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Present(PresentEvent {
            frame_index: self.read_u64()?,
            full: self.read_u8()? != 0,
            rect_count: self.read_u32()?,
        }))
    }

    fn decode_query_timeout(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::QueryTimeout(QueryTimeoutEvent {
            frame_index: self.read_u64()?,
            polls: self.read_u32()?,
        }))
    }

    fn decode_force_full_render(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ForceFullRender(ForceFullRenderEvent {
            reason: self.read_reason()?,
        }))
    }

    fn decode_commit(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Commit(CommitEvent {
            frame_index: self.read_u64()?,
            surface_count: self.read_u32()?,
            accepted: self.read_u8()? != 0,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_SWAPCHAIN => self.decode_swapchain(),
            TAG_PRESENT => self.decode_present(),
            TAG_QUERY_TIMEOUT => self.decode_query_timeout(),
            TAG_FORCE_FULL_RENDER => self.decode_force_full_render(),
            TAG_COMMIT => self.decode_commit(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_a_frame_cycle_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_swapchain(&SwapchainEvent {
            kind: SwapchainEventKind::Created,
            size: DeviceIntSize::new(800, 600),
            buffering: BufferingMode::Triple,
        });
        rec.on_force_full_render(&ForceFullRenderEvent {
            reason: ForceReason::Resized,
        });
        rec.on_present(&PresentEvent {
            frame_index: 3,
            full: false,
            rect_count: 2,
        });
        rec.on_commit(&CommitEvent {
            frame_index: 3,
            surface_count: 5,
            accepted: true,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 4);
        match &events[0] {
            RecordedEvent::Swapchain(e) => {
                assert_eq!(e.kind, SwapchainEventKind::Created);
                assert_eq!(e.size, DeviceIntSize::new(800, 600));
                assert_eq!(e.buffering, BufferingMode::Triple);
            }
            other => panic!("expected Swapchain, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::ForceFullRender(e) => assert_eq!(e.reason, ForceReason::Resized),
            other => panic!("expected ForceFullRender, got {other:?}"),
        }
        match &events[2] {
            RecordedEvent::Present(e) => {
                assert_eq!(e.frame_index, 3);
                assert!(!e.full);
                assert_eq!(e.rect_count, 2);
            }
            other => panic!("expected Present, got {other:?}"),
        }
        match &events[3] {
            RecordedEvent::Commit(e) => {
                assert_eq!(e.frame_index, 3);
                assert_eq!(e.surface_count, 5);
                assert!(e.accepted);
            }
            other => panic!("expected Commit, got {other:?}"),
        }
    }

    #[test]
    fn query_timeout_round_trips() {
        let mut rec = RecorderSink::new();
        rec.on_query_timeout(&QueryTimeoutEvent {
            frame_index: 17,
            polls: 64,
        });
        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::QueryTimeout(e) => {
                assert_eq!(e.frame_index, 17);
                assert_eq!(e.polls, 64);
            }
            other => panic!("expected QueryTimeout, got {other:?}"),
        }
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn truncated_record_stops_cleanly() {
        let mut rec = RecorderSink::new();
        rec.on_present(&PresentEvent {
            frame_index: 1,
            full: true,
            rect_count: 0,
        });
        let bytes = rec.into_bytes();
        let events: Vec<_> = decode(&bytes[..bytes.len() - 1]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        let events: Vec<_> = decode(&[0xff, 1, 2, 3]).collect();
        assert!(events.is_empty());
    }
}
