// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Per-image pixel ownership overlay.
//!
//! A [`PixelTracker`] has the same dimensions as the image it shadows and
//! records, for every pixel, which categories have already claimed it. A pixel
//! may be claimed once per [`Mark`]: a second claim for the same category is a
//! duplicate and must not be added to any total. Claims for different
//! categories are independent, so the vertex pass and the true positive pass
//! can both walk the same pixel without interfering.

use crate::geometry::Rect;
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// Category under which a pixel is claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Counted as foreground of a region while building a vertex set.
    Foreground,
    TruePositive,
    FalsePositive,
    FalseNegative,
    TrueNegative,
}

impl Mark {
    const fn bit(self) -> u8 {
        match self {
            Mark::Foreground => 1 << 0,
            Mark::TruePositive => 1 << 1,
            Mark::FalsePositive => 1 << 2,
            Mark::FalseNegative => 1 << 3,
            Mark::TrueNegative => 1 << 4,
        }
    }

    /// Debug colour for the category: true positives red, false positives
    /// blue, false negatives green, true negatives orange.
    pub const fn color(self) -> Option<[u8; 3]> {
        match self {
            Mark::Foreground => None,
            Mark::TruePositive => Some([255, 0, 0]),
            Mark::FalsePositive => Some([0, 0, 255]),
            Mark::FalseNegative => Some([0, 255, 0]),
            Mark::TrueNegative => Some([255, 165, 0]),
        }
    }
}

/// Overlay recording which pixels of one image have been claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelTracker {
    width: u32,
    height: u32,
    marks: Vec<u8>,
}

impl PixelTracker {
    /// Creates an overlay with no pixel claimed.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            marks: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Returns true if `(x, y)` has already been claimed under `mark`.
    pub fn is_marked(&self, x: u32, y: u32, mark: Mark) -> bool {
        self.marks[self.index(x, y)] & mark.bit() != 0
    }

    /// Claims `(x, y)` under `mark`.
    ///
    /// Returns true if the pixel was unclaimed for this category, false if it
    /// was a duplicate. Read and mark happen in one step.
    pub fn claim(&mut self, x: u32, y: u32, mark: Mark) -> bool {
        let idx = self.index(x, y);
        let cell = &mut self.marks[idx];
        if *cell & mark.bit() != 0 {
            false
        } else {
            *cell |= mark.bit();
            true
        }
    }

    /// Number of pixels claimed under `mark`.
    pub fn count(&self, mark: Mark) -> u64 {
        self.marks.iter().filter(|&&m| m & mark.bit() != 0).count() as u64
    }

    /// Renders the overlay as a colour-coded debug image.
    ///
    /// Each claimed pixel takes the colour of its highest priority outcome
    /// (true positive, false positive, false negative, true negative); other
    /// pixels are black. The outline of every rectangle in `outlines` is
    /// drawn in white on top so segmentations remain visible.
    pub fn render(&self, outlines: &[Rect]) -> RgbImage {
        const PRIORITY: [Mark; 4] = [
            Mark::TruePositive,
            Mark::FalsePositive,
            Mark::FalseNegative,
            Mark::TrueNegative,
        ];

        let mut img = RgbImage::new(self.width, self.height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let cell = self.marks[y as usize * self.width as usize + x as usize];
            if let Some(color) = PRIORITY
                .iter()
                .find(|m| cell & m.bit() != 0)
                .and_then(|m| m.color())
            {
                *pixel = Rgb(color);
            }
        }

        for rect in outlines {
            draw_outline(&mut img, rect);
        }
        img
    }
}

fn draw_outline(img: &mut RgbImage, rect: &Rect) {
    if rect.is_empty() || !rect.fits_within(img.width(), img.height()) {
        return;
    }
    let white = Rgb([255, 255, 255]);
    let x2 = rect.x + rect.width - 1;
    let y2 = rect.y + rect.height - 1;
    for x in rect.x..=x2 {
        img.put_pixel(x, rect.y, white);
        img.put_pixel(x, y2, white);
    }
    for y in rect.y..=y2 {
        img.put_pixel(rect.x, y, white);
        img.put_pixel(x2, y, white);
    }
}
