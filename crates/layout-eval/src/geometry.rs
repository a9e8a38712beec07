// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Axis-aligned integer rectangles in page pixel coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned bounding rectangle `(x, y, width, height)` with a top-left
/// origin, in the pixel coordinates shared by the hypothesis and groundtruth
/// images.
///
/// The rectangle covers the half-open ranges `x..x + width` and
/// `y..y + height`, so a rectangle with a zero width or height contains no
/// pixels at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Number of pixels covered by the rectangle.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns true if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns true if the pixel at `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && (x as u64) < self.right() && y >= self.y && (y as u64) < self.bottom()
    }

    /// Returns true if the rectangle lies entirely within a `width` x `height`
    /// image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }

    /// Geometric intersection of two rectangles, or `None` when they share no
    /// pixel.
    ///
    /// Rectangles that merely touch along an edge do not intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if (x1 as u64) < x2 && (y1 as u64) < y2 {
            Some(Rect::new(x1, y1, (x2 - x1 as u64) as u32, (y2 - y1 as u64) as u32))
        } else {
            None
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    /// Iterates over every pixel coordinate in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let Rect {
            x,
            y,
            width,
            height,
        } = *self;
        (y..y.saturating_add(height))
            .flat_map(move |row| (x..x.saturating_add(width)).map(move |col| (col, row)))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[x={}, y={}, w={}, h={}]",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_partial_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersection(&b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(b.intersection(&a), Some(Rect::new(5, 5, 5, 5)));
    }

    #[test]
    fn test_intersection_nested() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(20, 30, 10, 5);
        assert_eq!(outer.intersection(&inner), Some(inner));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn test_degenerate_rect_never_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let line = Rect::new(2, 2, 0, 5);
        assert!(line.is_empty());
        assert_eq!(line.area(), 0);
        assert!(!a.intersects(&line));
        assert_eq!(line.pixels().count(), 0);
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 5);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 7));
        assert!(!r.contains(6, 7));
        assert!(!r.contains(5, 8));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn test_fits_within() {
        assert!(Rect::new(0, 0, 10, 10).fits_within(10, 10));
        assert!(!Rect::new(1, 0, 10, 10).fits_within(10, 10));
        assert!(!Rect::new(u32::MAX, 0, 2, 1).fits_within(u32::MAX, 1));
    }

    #[test]
    fn test_pixels_row_major() {
        let coords: Vec<_> = Rect::new(1, 1, 2, 2).pixels().collect();
        assert_eq!(coords, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }
}
