// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Read-only raster access and colour matching.
//!
//! The evaluator never depends on a particular imaging library: it only needs
//! the dimensions of a page and the colour of a pixel. [`RasterSurface`] is
//! implemented for [`image::RgbImage`], which is what the CLI decodes pages
//! into, and can be implemented for any other pixel buffer.

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// 8-bit RGB colour.
pub type Rgb = [u8; 3];

/// Minimal read-only view of a colour-coded page image.
pub trait RasterSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Colour of the pixel at `(x, y)`. Callers guarantee the coordinate is
    /// in bounds.
    fn color_at(&self, x: u32, y: u32) -> Rgb;

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

impl RasterSurface for RgbImage {
    fn width(&self) -> u32 {
        RgbImage::width(self)
    }

    fn height(&self) -> u32 {
        RgbImage::height(self)
    }

    fn color_at(&self, x: u32, y: u32) -> Rgb {
        self.get_pixel(x, y).0
    }
}

impl<T: RasterSurface + ?Sized> RasterSurface for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn color_at(&self, x: u32, y: u32) -> Rgb {
        (**self).color_at(x, y)
    }
}

/// Page colours that are never part of a region.
///
/// `background` is the paper colour. `reserved` is the palette entry used to
/// code true negatives (orange by default); it is treated like background on
/// input so it can never be mistaken for a region colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageColors {
    pub background: Rgb,
    pub reserved: Rgb,
}

impl Default for PageColors {
    fn default() -> Self {
        Self {
            background: [255, 255, 255],
            reserved: [255, 165, 0],
        }
    }
}

impl PageColors {
    /// Returns true for any colour other than background or reserved.
    pub fn is_foreground(&self, color: Rgb) -> bool {
        color != self.background && color != self.reserved
    }
}

/// Which pixels of a page belong to the regions under evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionFilter {
    /// Only pixels of exactly this colour (one region type).
    Color(Rgb),
    /// Every foreground pixel, whatever its colour.
    AnyForeground,
}

/// A [`RegionFilter`] bound to the page colours it is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelMatcher {
    pub filter: RegionFilter,
    pub colors: PageColors,
}

impl PixelMatcher {
    pub fn new(filter: RegionFilter, colors: PageColors) -> Self {
        Self { filter, colors }
    }

    /// Matcher accepting every foreground pixel.
    pub fn foreground(colors: PageColors) -> Self {
        Self::new(RegionFilter::AnyForeground, colors)
    }

    pub fn matches(&self, color: Rgb) -> bool {
        match self.filter {
            RegionFilter::Color(target) => color == target && self.colors.is_foreground(color),
            RegionFilter::AnyForeground => self.colors.is_foreground(color),
        }
    }
}
