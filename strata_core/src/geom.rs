// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer device-pixel geometry.
//!
//! Swap chains, dirty rectangles, and native-surface placement all work in
//! whole device pixels, so the core types here are integer-valued. Clip
//! computations that need real-valued math convert to [`kurbo::Rect`] via
//! [`DeviceIntRect::to_kurbo`].

use core::fmt;

/// A size in whole device pixels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceIntSize {
    /// Width in device pixels.
    pub width: i32,
    /// Height in device pixels.
    pub height: i32,
}

impl DeviceIntSize {
    /// A zero-area size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a size from width and height.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns `true` when either dimension is zero or negative.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl fmt::Debug for DeviceIntSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A point in whole device pixels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceIntPoint {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl DeviceIntPoint {
    /// The origin point.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a point from coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Debug for DeviceIntPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle in whole device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct DeviceIntRect {
    /// Top-left corner.
    pub origin: DeviceIntPoint,
    /// Extent from the origin.
    pub size: DeviceIntSize,
}

impl DeviceIntRect {
    /// An empty rectangle at the origin.
    pub const ZERO: Self = Self {
        origin: DeviceIntPoint::ZERO,
        size: DeviceIntSize::ZERO,
    };

    /// Creates a rectangle from origin coordinates and size.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: DeviceIntPoint::new(x, y),
            size: DeviceIntSize::new(width, height),
        }
    }

    /// Creates a rectangle covering `size` at the origin.
    #[inline]
    #[must_use]
    pub const fn from_size(size: DeviceIntSize) -> Self {
        Self {
            origin: DeviceIntPoint::ZERO,
            size,
        }
    }

    /// Returns `true` when the rectangle has no area.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.size.is_empty()
    }

    /// Exclusive right edge.
    #[inline]
    #[must_use]
    pub const fn max_x(self) -> i32 {
        self.origin.x + self.size.width
    }

    /// Exclusive bottom edge.
    #[inline]
    #[must_use]
    pub const fn max_y(self) -> i32 {
        self.origin.y + self.size.height
    }

    /// Returns the overlap of two rectangles, or `None` when they are
    /// disjoint (or either is empty).
    #[must_use]
    pub fn intersection(self, other: Self) -> Option<Self> {
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let x1 = self.max_x().min(other.max_x());
        let y1 = self.max_y().min(other.max_y());
        if x0 < x1 && y0 < y1 {
            Some(Self::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }

    /// Converts to a real-valued [`kurbo::Rect`] for clip math.
    #[inline]
    #[must_use]
    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.origin.x),
            f64::from(self.origin.y),
            f64::from(self.max_x()),
            f64::from(self.max_y()),
        )
    }
}
