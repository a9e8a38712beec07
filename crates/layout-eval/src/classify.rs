// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Pixel classification primitive shared by the vertex and edge builders.
//!
//! Every count in the evaluation comes from [`PixelClassifier::classify`]:
//! walk a rectangle, skip pixels covered by any excluded rectangle, and claim
//! each pixel of the wanted colour on the caller's [`PixelTracker`]. Pixels
//! already claimed under the same [`Mark`] are reported as duplicates instead
//! of being counted again, which keeps page totals exact when rectangles on
//! one side overlap.

use crate::{
    geometry::Rect,
    raster::{PageColors, PixelMatcher, RasterSurface},
    tracker::{Mark, PixelTracker},
};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Result of one classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelCount {
    /// Matching pixels claimed by this pass.
    pub count: u64,
    /// Matching pixels that an earlier pass had already claimed.
    pub duplicates: u64,
}

impl Add for PixelCount {
    type Output = PixelCount;

    fn add(self, rhs: PixelCount) -> PixelCount {
        PixelCount {
            count: self.count + rhs.count,
            duplicates: self.duplicates + rhs.duplicates,
        }
    }
}

impl AddAssign for PixelCount {
    fn add_assign(&mut self, rhs: PixelCount) {
        *self = *self + rhs;
    }
}

/// Counts colour-coded pixels of one image.
///
/// The classifier borrows the image and knows which colour it is looking for;
/// the tracker overlay is passed to every call so its lifetime stays visible
/// at the call site.
#[derive(Debug, Clone, Copy)]
pub struct PixelClassifier<'a, R: ?Sized> {
    image: &'a R,
    matcher: PixelMatcher,
}

impl<'a, R: RasterSurface + ?Sized> PixelClassifier<'a, R> {
    pub fn new(image: &'a R, matcher: PixelMatcher) -> Self {
        Self { image, matcher }
    }

    pub fn image(&self) -> &'a R {
        self.image
    }

    pub fn matcher(&self) -> &PixelMatcher {
        &self.matcher
    }

    /// Counts pixels inside `rect` whose colour matches, ignoring any pixel
    /// covered by a rectangle in `exclude`, and claims them under `mark`.
    pub fn classify(
        &self,
        rect: &Rect,
        exclude: &[Rect],
        tracker: &mut PixelTracker,
        mark: Mark,
    ) -> PixelCount {
        let mut result = PixelCount::default();
        for (x, y) in rect.pixels() {
            if exclude.iter().any(|r| r.contains(x, y)) {
                continue;
            }
            if !self.matcher.matches(self.image.color_at(x, y)) {
                continue;
            }
            if tracker.claim(x, y, mark) {
                result.count += 1;
            } else {
                result.duplicates += 1;
            }
        }
        result
    }

    /// Matching pixels of `rect` not yet claimed as region foreground.
    pub fn foreground(&self, rect: &Rect, tracker: &mut PixelTracker) -> PixelCount {
        self.classify(rect, &[], tracker, Mark::Foreground)
    }

    /// Matching pixels inside the intersection of a hypothesis and a
    /// groundtruth rectangle, claimed as true positives.
    ///
    /// Returns `None` when the rectangles do not intersect. A pixel shared
    /// with an intersection classified earlier is reported as a duplicate.
    pub fn true_positives(
        &self,
        hyp_rect: &Rect,
        gt_rect: &Rect,
        tracker: &mut PixelTracker,
    ) -> Option<(Rect, PixelCount)> {
        let overlap = hyp_rect.intersection(gt_rect)?;
        let pixels = self.classify(&overlap, &[], tracker, Mark::TruePositive);
        Some((overlap, pixels))
    }

    /// Matching pixels of a hypothesis rectangle outside every groundtruth
    /// rectangle.
    pub fn false_positives(
        &self,
        hyp_rect: &Rect,
        gt_rects: &[Rect],
        tracker: &mut PixelTracker,
    ) -> PixelCount {
        self.classify(hyp_rect, gt_rects, tracker, Mark::FalsePositive)
    }

    /// Matching pixels of a groundtruth rectangle outside every hypothesis
    /// rectangle.
    pub fn false_negatives(
        &self,
        gt_rect: &Rect,
        hyp_rects: &[Rect],
        tracker: &mut PixelTracker,
    ) -> PixelCount {
        self.classify(gt_rect, hyp_rects, tracker, Mark::FalseNegative)
    }
}

/// Foreground pixels of the whole page lying outside every rectangle of both
/// sides, claimed as true negatives.
pub fn count_true_negatives<R: RasterSurface + ?Sized>(
    image: &R,
    colors: PageColors,
    rects: &[Rect],
    tracker: &mut PixelTracker,
) -> PixelCount {
    let page = Rect::new(0, 0, image.width(), image.height());
    PixelClassifier::new(image, PixelMatcher::foreground(colors)).classify(
        &page,
        rects,
        tracker,
        Mark::TrueNegative,
    )
}

/// Number of foreground pixels on the whole page. Nothing is claimed.
pub fn count_foreground<R: RasterSurface + ?Sized>(image: &R, colors: PageColors) -> u64 {
    Rect::new(0, 0, image.width(), image.height())
        .pixels()
        .filter(|&(x, y)| colors.is_foreground(image.color_at(x, y)))
        .count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RegionFilter;
    use image::{Rgb, RgbImage};

    const RED: [u8; 3] = [255, 0, 0];
    const BLACK: [u8; 3] = [0, 0, 0];

    fn page() -> RgbImage {
        // 10x10 white page, red block at x 2..6, y 2..6, black block at
        // x 7..9, y 7..9.
        let mut img = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        for y in 2..6 {
            for x in 2..6 {
                img.put_pixel(x, y, Rgb(RED));
            }
        }
        for y in 7..9 {
            for x in 7..9 {
                img.put_pixel(x, y, Rgb(BLACK));
            }
        }
        img
    }

    fn red() -> PixelMatcher {
        PixelMatcher::new(RegionFilter::Color(RED), PageColors::default())
    }

    #[test]
    fn test_classify_counts_and_marks() {
        let img = page();
        let classifier = PixelClassifier::new(&img, red());
        let mut tracker = PixelTracker::new(10, 10);

        let first = classifier.foreground(&Rect::new(0, 0, 4, 4), &mut tracker);
        assert_eq!(first, PixelCount { count: 4, duplicates: 0 });
        assert!(tracker.is_marked(3, 3, Mark::Foreground));
        assert!(!tracker.is_marked(1, 1, Mark::Foreground));

        // Overlapping rectangle: the 4 shared pixels are duplicates.
        let second = classifier.foreground(&Rect::new(2, 2, 4, 4), &mut tracker);
        assert_eq!(second, PixelCount { count: 12, duplicates: 4 });
    }

    #[test]
    fn test_classify_respects_exclusions() {
        let img = page();
        let classifier = PixelClassifier::new(&img, red());
        let mut tracker = PixelTracker::new(10, 10);

        let fp = classifier.false_positives(
            &Rect::new(0, 0, 10, 10),
            &[Rect::new(2, 2, 2, 4)],
            &mut tracker,
        );
        assert_eq!(fp, PixelCount { count: 8, duplicates: 0 });
        assert!(!tracker.is_marked(2, 2, Mark::FalsePositive));
        assert!(tracker.is_marked(4, 2, Mark::FalsePositive));
    }

    #[test]
    fn test_true_positives_dedup_across_groundtruth_boxes() {
        let img = page();
        let classifier = PixelClassifier::new(&img, red());
        let mut tracker = PixelTracker::new(10, 10);
        let hyp = Rect::new(0, 0, 10, 10);

        // Two groundtruth boxes sharing the column x = 3.
        let (overlap, first) = classifier
            .true_positives(&hyp, &Rect::new(2, 2, 2, 4), &mut tracker)
            .unwrap();
        assert_eq!(overlap, Rect::new(2, 2, 2, 4));
        assert_eq!(first, PixelCount { count: 8, duplicates: 0 });

        let (_, second) = classifier
            .true_positives(&hyp, &Rect::new(3, 2, 3, 4), &mut tracker)
            .unwrap();
        assert_eq!(second, PixelCount { count: 8, duplicates: 4 });

        assert!(
            classifier
                .true_positives(&Rect::new(0, 0, 2, 2), &Rect::new(2, 2, 2, 2), &mut tracker)
                .is_none()
        );
    }

    #[test]
    fn test_false_negatives_and_true_negatives() {
        let img = page();
        let classifier = PixelClassifier::new(&img, red());
        let mut tracker = PixelTracker::new(10, 10);

        let fn_count = classifier.false_negatives(
            &Rect::new(2, 2, 4, 4),
            &[Rect::new(2, 2, 4, 2)],
            &mut tracker,
        );
        assert_eq!(fn_count.count, 8);

        let tn = count_true_negatives(
            &img,
            PageColors::default(),
            &[Rect::new(2, 2, 4, 4)],
            &mut tracker,
        );
        assert_eq!(tn.count, 4);
        assert!(tracker.is_marked(8, 8, Mark::TrueNegative));
    }

    #[test]
    fn test_any_foreground_and_page_total() {
        let img = page();
        assert_eq!(count_foreground(&img, PageColors::default()), 20);

        let classifier =
            PixelClassifier::new(&img, PixelMatcher::foreground(PageColors::default()));
        let mut tracker = PixelTracker::new(10, 10);
        let all = classifier.foreground(&Rect::new(0, 0, 10, 10), &mut tracker);
        assert_eq!(all.count, 20);
    }

    #[test]
    fn test_degenerate_rect_counts_nothing() {
        let img = page();
        let classifier = PixelClassifier::new(&img, red());
        let mut tracker = PixelTracker::new(10, 10);
        assert_eq!(
            classifier.foreground(&Rect::new(3, 3, 0, 4), &mut tracker),
            PixelCount::default()
        );
    }
}
