// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-region model for partial presents.
//!
//! A [`DirtyRegion`] is produced by the scene renderer for exactly one
//! frame; the planner turns it into a [`PresentRegion`], which is what the
//! device actually receives.

use alloc::vec::Vec;

use crate::geom::DeviceIntRect;

/// The regions of the frame that changed since the last present.
///
/// Valid only for the frame that produced it.
#[derive(Clone, Debug, Default)]
pub enum DirtyRegion {
    /// The entire surface changed (or change tracking is unavailable).
    #[default]
    Full,
    /// An ordered list of changed rectangles.
    Rects(Vec<DeviceIntRect>),
    /// Nothing changed; the previous frame can be reused.
    None,
}

impl DirtyRegion {
    /// Returns `true` if no region needs presenting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The number of rectangles, treating `Full` as unbounded.
    #[must_use]
    pub fn rect_count(&self) -> Option<usize> {
        match self {
            Self::Full => None,
            Self::Rects(rects) => Some(rects.len()),
            Self::None => Some(0),
        }
    }

    /// Merges another region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&*self, other) {
            (Self::Full, _) | (_, Self::Full) => *self = Self::Full,
            (Self::None, _) => *self = other.clone(),
            (_, Self::None) => {}
            (Self::Rects(a), Self::Rects(b)) => {
                let mut merged = a.clone();
                merged.extend_from_slice(b);
                *self = Self::Rects(merged);
            }
        }
    }
}

/// What the device is asked to present, after planning.
///
/// Borrowed from the frame's [`DirtyRegion`]; a partial present passes the
/// caller's rectangles through unchanged.
#[derive(Clone, Copy, Debug)]
pub enum PresentRegion<'a> {
    /// Present the whole surface.
    Full,
    /// Present only the listed rectangles.
    Partial(&'a [DeviceIntRect]),
}

impl PresentRegion<'_> {
    /// Returns `true` for a full-surface present.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        matches!(self, Self::Full)
    }

    /// The number of rectangles in a partial present, or zero for full.
    #[must_use]
    pub const fn rect_count(&self) -> usize {
        match self {
            Self::Full => 0,
            Self::Partial(rects) => rects.len(),
        }
    }
}
