// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Page-level metrics derived from a completed bipartite graph.
//!
//! Two read-only records are produced for each page:
//!
//! - [`GroundTruthMetrics`] describes the groundtruth composition: how many
//!   regions were touched by the hypothesis and how the page's region pixels
//!   and area are distributed among them.
//! - [`HypothesisMetrics`] scores the hypothesis: correct segmentations,
//!   over- and undersegmentations, missed and spurious regions, and the pixel
//!   rates below.
//!
//! ```text
//! Recall (TPR)       = TP / P
//! Fallout (FPR)      = FP / N
//! Accuracy           = (TP + TN) / (P + N)
//! Specificity        = TN / N
//! Precision (PPV)    = TP / (TP + FP)
//! NPV                = TN / (TN + FN)
//! False discovery    = FP / (TP + FP)
//! ```
//!
//! Every ratio with a zero denominator is `0.0`: a page without regions of
//! the evaluated type is a valid input, not an error.

use crate::{
    classify::PixelCount,
    geometry::Rect,
    graph::{Side, Vertex},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `num / den`, or `0.0` when there is no data.
pub fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Pixel passes run after the edges are built, indexed like the vertex sets.
#[derive(Debug, Clone, Default)]
pub struct PagePixelCounts {
    /// False positives of each hypothesis vertex.
    pub false_positives: Vec<PixelCount>,
    /// False negatives of each groundtruth vertex.
    pub false_negatives: Vec<PixelCount>,
    /// Foreground pixels outside every rectangle of both sides.
    pub true_negatives: PixelCount,
    /// Foreground pixels of the whole groundtruth page.
    pub total_fg_pix: u64,
}

/// Weight of one groundtruth box within the page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GtBoxDescription {
    /// The box's foreground pixels over all groundtruth foreground pixels.
    pub fg_pix_ratio: f64,
    /// The box's area over the area of all groundtruth boxes.
    pub area_ratio: f64,
}

/// Composition of the groundtruth side of a page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundTruthMetrics {
    /// Groundtruth regions overlapped by at least one hypothesis region.
    pub segmentations: usize,
    /// Foreground pixels of groundtruth regions with at least one edge.
    pub total_seg_fg_pixels: u64,
    /// Foreground pixels of groundtruth regions with no edge.
    pub total_nonseg_fg_pixels: u64,
    /// Foreground pixels of all groundtruth regions.
    pub total_fg_pixels: u64,
    pub fg_pixel_ratio: f64,
    /// Area of groundtruth regions with at least one edge.
    pub total_seg_area: u64,
    /// Area of all groundtruth regions.
    pub total_region_area: u64,
    /// Area of the page.
    pub total_area: u64,
    pub area_ratio: f64,
    /// One entry per groundtruth vertex, in vertex order.
    pub descriptions: Vec<GtBoxDescription>,
}

impl GroundTruthMetrics {
    /// Single pass over the groundtruth vertices.
    pub fn compute(groundtruth: &[Vertex], page_area: u64) -> Self {
        let mut metrics = GroundTruthMetrics {
            total_area: page_area,
            ..Default::default()
        };

        for g in groundtruth {
            debug_assert_eq!(g.side, Side::GroundTruth);
            if g.edges.is_empty() {
                metrics.total_nonseg_fg_pixels += g.foreground_pixel_count;
            } else {
                metrics.segmentations += 1;
                metrics.total_seg_fg_pixels += g.foreground_pixel_count;
                metrics.total_seg_area += g.area;
            }
            metrics.total_fg_pixels += g.foreground_pixel_count;
            metrics.total_region_area += g.area;
        }

        metrics.fg_pixel_ratio = ratio(metrics.total_seg_fg_pixels, metrics.total_fg_pixels);
        metrics.area_ratio = ratio(metrics.total_seg_area, metrics.total_area);
        metrics.descriptions = groundtruth
            .iter()
            .map(|g| GtBoxDescription {
                fg_pix_ratio: ratio(g.foreground_pixel_count, metrics.total_fg_pixels),
                area_ratio: ratio(g.area, metrics.total_region_area),
            })
            .collect();
        metrics
    }
}

impl fmt::Display for GroundTruthMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "║ Groundtruth:")?;
        writeln!(
            f,
            "║   Regions:         {} ({} overlapped)",
            self.descriptions.len(),
            self.segmentations
        )?;
        writeln!(
            f,
            "║   Foreground:      {}/{} px overlapped ({:.1}%)",
            self.total_seg_fg_pixels,
            self.total_fg_pixels,
            self.fg_pixel_ratio * 100.0
        )?;
        writeln!(
            f,
            "║   Area:            {}/{} px² overlapped regions ({:.1}% of page)",
            self.total_seg_area,
            self.total_area,
            self.area_ratio * 100.0
        )?;
        Ok(())
    }
}

/// Scores for one hypothesis region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDescription {
    /// Index of the hypothesis vertex.
    pub index: usize,
    pub rect: Rect,
    pub num_fg_pixels: u64,
    pub num_fg_pixels_duplicate: u64,
    pub area: u64,
    /// Region pixels shared with the overlapped groundtruth regions over
    /// their foreground.
    pub recall: f64,
    /// False positives over the page's negative pixels.
    pub fallout: f64,
    pub fallout_duplicate: f64,
    /// True positives over the region's foreground.
    pub precision: f64,
    /// False positives over the region's foreground.
    pub false_discovery: f64,
    pub false_discovery_duplicate: f64,
    pub true_positive_pix: u64,
    pub true_positive_pix_duplicate: u64,
    pub false_positive_pix: u64,
    pub false_positive_pix_duplicate: u64,
    /// Foreground of the overlapped groundtruth regions this region missed.
    pub false_negative_pix: u64,
    /// Number of groundtruth regions overlapping this one.
    pub num_gt_overlap: usize,
    pub correct_segmentation: bool,
}

/// Missed pixels of one groundtruth region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlappingGtRegion {
    /// Index of the groundtruth vertex.
    pub index: usize,
    pub rect: Rect,
    pub false_negative_pix: u64,
    pub false_negative_pix_duplicate: u64,
    /// Number of hypothesis regions overlapping this one.
    pub num_edges: usize,
}

/// Accuracy of the hypothesis on one page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HypothesisMetrics {
    /// Hypothesis regions with exactly one edge covering the matched
    /// groundtruth region's foreground.
    pub correct_segmentations: usize,
    pub total_gt_regions: usize,
    pub total_recall: f64,
    pub total_fallout: f64,
    pub total_precision: f64,
    pub total_fdr: f64,
    /// Hypothesis regions overlapping groundtruth regions that have more than
    /// one hypothesis region.
    pub oversegmentations: usize,
    pub avg_oversegmentations_per_box: f64,
    /// Groundtruth regions merged into hypothesis regions that overlap more
    /// than one groundtruth region.
    pub undersegmentations: usize,
    pub avg_undersegmentations_per_box: f64,
    /// Groundtruth regions split across several hypothesis regions.
    pub oversegmented_components: usize,
    /// Hypothesis regions merging several groundtruth regions.
    pub undersegmented_components: usize,
    /// Groundtruth regions with no overlapping hypothesis region.
    pub false_negatives: usize,
    /// Hypothesis regions with no overlapping groundtruth region.
    pub false_positives: usize,
    pub negative_predictive_val: f64,
    pub specificity: f64,
    pub accuracy: f64,
    pub total_false_negative_pix: u64,
    pub total_false_positive_pix: u64,
    /// TP + FP.
    pub total_positive_fg_pix: u64,
    pub total_true_positive_fg_pix: u64,
    pub total_true_negative_fg_pix: u64,
    /// Foreground pixels of the whole page.
    pub total_fg_pix: u64,
    /// `total_fg_pix - total_positive_fg_pix`, that is TN + FN.
    pub total_negative_fg_pix: u64,
    pub boxes: Vec<RegionDescription>,
    pub overlap_gts: Vec<OverlappingGtRegion>,
    /// Region type evaluated, `"all"` for every foreground colour.
    pub res_type_name: String,
}

impl HypothesisMetrics {
    /// Aggregates the completed graph into page metrics.
    ///
    /// `coverage_threshold` is the fraction of a groundtruth region's
    /// foreground a single-edge hypothesis region must cover to count as a
    /// correct segmentation.
    pub fn compute(
        hypothesis: &[Vertex],
        groundtruth: &[Vertex],
        counts: &PagePixelCounts,
        coverage_threshold: f64,
        res_type_name: &str,
    ) -> Self {
        let mut metrics = HypothesisMetrics {
            total_gt_regions: groundtruth.len(),
            total_fg_pix: counts.total_fg_pix,
            res_type_name: res_type_name.to_string(),
            ..Default::default()
        };

        let gt_positives: u64 = groundtruth.iter().map(|g| g.foreground_pixel_count).sum();
        let negatives = counts.total_fg_pix.saturating_sub(gt_positives);

        for h in hypothesis {
            let fp = counts
                .false_positives
                .get(h.index)
                .copied()
                .unwrap_or_default();
            let region = describe_region(h, groundtruth, fp, negatives, coverage_threshold);

            match h.degree() {
                0 => metrics.false_positives += 1,
                1 => {}
                k => {
                    metrics.undersegmented_components += 1;
                    metrics.undersegmentations += k;
                }
            }
            if region.correct_segmentation {
                metrics.correct_segmentations += 1;
            }

            metrics.total_recall += region.recall;
            metrics.total_precision += region.precision;
            metrics.total_fallout += region.fallout;
            metrics.total_fdr += region.false_discovery;
            metrics.total_true_positive_fg_pix += region.true_positive_pix;
            metrics.total_false_positive_pix += region.false_positive_pix;
            metrics.boxes.push(region);
        }

        for g in groundtruth {
            let missed = counts
                .false_negatives
                .get(g.index)
                .copied()
                .unwrap_or_default();

            match g.degree() {
                0 => metrics.false_negatives += 1,
                1 => {}
                k => {
                    metrics.oversegmented_components += 1;
                    metrics.oversegmentations += k;
                }
            }

            metrics.total_false_negative_pix += missed.count;
            metrics.overlap_gts.push(OverlappingGtRegion {
                index: g.index,
                rect: g.rect,
                false_negative_pix: missed.count,
                false_negative_pix_duplicate: missed.duplicates,
                num_edges: g.degree(),
            });
        }

        metrics.avg_oversegmentations_per_box = ratio(
            metrics.oversegmentations as u64,
            metrics.oversegmented_components as u64,
        );
        metrics.avg_undersegmentations_per_box = ratio(
            metrics.undersegmentations as u64,
            metrics.undersegmented_components as u64,
        );

        let tp = metrics.total_true_positive_fg_pix;
        let fp = metrics.total_false_positive_pix;
        let fn_ = metrics.total_false_negative_pix;
        let tn = counts.true_negatives.count;

        metrics.total_true_negative_fg_pix = tn;
        metrics.total_positive_fg_pix = tp + fp;
        metrics.total_negative_fg_pix = counts.total_fg_pix.saturating_sub(tp + fp);
        metrics.accuracy = ratio(tp + tn, counts.total_fg_pix);
        metrics.specificity = ratio(tn, negatives);
        metrics.negative_predictive_val = ratio(tn, tn + fn_);
        metrics
    }

    /// Per-region report, see [`VerboseReport`].
    pub fn verbose(&self) -> VerboseReport<'_> {
        VerboseReport { metrics: self }
    }
}

fn describe_region(
    h: &Vertex,
    groundtruth: &[Vertex],
    fp: PixelCount,
    negatives: u64,
    coverage_threshold: f64,
) -> RegionDescription {
    let mut tp = PixelCount::default();
    let mut partner_fg = 0;
    let mut missed = 0;

    // Region scores use the whole overlap; page totals the de-duplicated
    // counts.
    let mut covered = 0;

    for e in &h.edges {
        let Some(g) = groundtruth.get(e.other.index) else {
            continue;
        };
        tp += PixelCount {
            count: e.intersecting_pixel_count,
            duplicates: e.intersecting_duplicate_count,
        };
        covered += e.overlap_pixel_count();
        partner_fg += g.foreground_pixel_count;
        missed += g
            .foreground_pixel_count
            .saturating_sub(e.overlap_pixel_count());
    }

    // A groundtruth region without region pixels can never be matched.
    let correct_segmentation = match h.edges.as_slice() {
        [e] => groundtruth.get(e.other.index).is_some_and(|g| {
            g.foreground_pixel_count > 0
                && e.overlap_pixel_count() as f64
                    >= coverage_threshold * g.foreground_pixel_count as f64
        }),
        _ => false,
    };

    RegionDescription {
        index: h.index,
        rect: h.rect,
        num_fg_pixels: h.foreground_pixel_count,
        num_fg_pixels_duplicate: h.foreground_pixel_duplicate_count,
        area: h.area,
        recall: ratio(covered.min(partner_fg), partner_fg),
        fallout: ratio(fp.count, negatives),
        fallout_duplicate: ratio(fp.duplicates, negatives),
        precision: ratio(tp.count, h.foreground_pixel_count),
        false_discovery: ratio(fp.count, h.foreground_pixel_count),
        false_discovery_duplicate: ratio(fp.duplicates, h.foreground_pixel_count),
        true_positive_pix: tp.count,
        true_positive_pix_duplicate: tp.duplicates,
        false_positive_pix: fp.count,
        false_positive_pix_duplicate: fp.duplicates,
        false_negative_pix: missed,
        num_gt_overlap: h.degree(),
        correct_segmentation,
    }
}

impl fmt::Display for HypothesisMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "╔══════════════════════════════════════════════════════════════╗"
        )?;
        writeln!(f, "║ Layout evaluation: {}", self.res_type_name)?;
        writeln!(
            f,
            "╠══════════════════════════════════════════════════════════════╣"
        )?;
        writeln!(f, "║ Regions:")?;
        writeln!(
            f,
            "║   Hypothesis:           {} ({} correct)",
            self.boxes.len(),
            self.correct_segmentations
        )?;
        writeln!(f, "║   Groundtruth:          {}", self.total_gt_regions)?;
        writeln!(
            f,
            "║   Oversegmented:        {} regions, {} pieces (avg {:.2})",
            self.oversegmented_components,
            self.oversegmentations,
            self.avg_oversegmentations_per_box
        )?;
        writeln!(
            f,
            "║   Undersegmented:       {} regions, {} merged (avg {:.2})",
            self.undersegmented_components,
            self.undersegmentations,
            self.avg_undersegmentations_per_box
        )?;
        writeln!(f, "║   Missed (FN):          {}", self.false_negatives)?;
        writeln!(f, "║   False alarms (FP):    {}", self.false_positives)?;
        writeln!(
            f,
            "╠══════════════════════════════════════════════════════════════╣"
        )?;
        writeln!(f, "║ Pixels:")?;
        writeln!(f, "║   Foreground:           {}", self.total_fg_pix)?;
        writeln!(
            f,
            "║   TP / FP:              {} / {}",
            self.total_true_positive_fg_pix, self.total_false_positive_pix
        )?;
        writeln!(
            f,
            "║   TN / FN:              {} / {}",
            self.total_true_negative_fg_pix, self.total_false_negative_pix
        )?;
        writeln!(f, "║   Accuracy:             {:.4}", self.accuracy)?;
        writeln!(f, "║   Specificity:          {:.4}", self.specificity)?;
        writeln!(
            f,
            "║   NPV:                  {:.4}",
            self.negative_predictive_val
        )?;
        writeln!(
            f,
            "╚══════════════════════════════════════════════════════════════╝"
        )?;
        Ok(())
    }
}

/// Region-by-region listing of a [`HypothesisMetrics`].
pub struct VerboseReport<'a> {
    metrics: &'a HypothesisMetrics,
}

impl fmt::Display for VerboseReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.metrics)?;
        for b in &self.metrics.boxes {
            writeln!(f, "Hypothesis region {} {}", b.index, b.rect)?;
            writeln!(
                f,
                "  fg={} (dup {}) area={} overlaps={}{}",
                b.num_fg_pixels,
                b.num_fg_pixels_duplicate,
                b.area,
                b.num_gt_overlap,
                if b.correct_segmentation {
                    " correct"
                } else {
                    ""
                }
            )?;
            writeln!(
                f,
                "  TP={} FP={} (dup {}) FN={}",
                b.true_positive_pix,
                b.false_positive_pix,
                b.false_positive_pix_duplicate,
                b.false_negative_pix
            )?;
            writeln!(
                f,
                "  recall={:.4} precision={:.4} fallout={:.6} fdr={:.4}",
                b.recall, b.precision, b.fallout, b.false_discovery
            )?;
        }
        for g in &self.metrics.overlap_gts {
            writeln!(
                f,
                "Groundtruth region {} {} edges={} FN={} (dup {})",
                g.index, g.rect, g.num_edges, g.false_negative_pix, g.false_negative_pix_duplicate
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, VertexId};

    fn vertex(side: Side, index: usize, fg: u64, edges: &[(usize, u64)]) -> Vertex {
        Vertex {
            rect: Rect::new(0, 0, 10, 10),
            area: 100,
            foreground_pixel_count: fg,
            foreground_pixel_duplicate_count: 0,
            side,
            index,
            edges: edges
                .iter()
                .map(|&(other, pixels)| Edge {
                    other: VertexId::new(side.opposite(), other),
                    intersecting_pixel_count: pixels,
                    intersecting_duplicate_count: 0,
                    overlap_area: pixels,
                })
                .collect(),
        }
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(5, 0), 0.0);
        assert_eq!(ratio(0, 0), 0.0);
        assert_eq!(ratio(1, 4), 0.25);
    }

    #[test]
    fn test_groundtruth_metrics() {
        let gt = vec![
            vertex(Side::GroundTruth, 0, 60, &[(0, 60)]),
            vertex(Side::GroundTruth, 1, 40, &[]),
        ];
        let metrics = GroundTruthMetrics::compute(&gt, 1000);

        assert_eq!(metrics.segmentations, 1);
        assert_eq!(metrics.total_seg_fg_pixels, 60);
        assert_eq!(metrics.total_nonseg_fg_pixels, 40);
        assert_eq!(metrics.total_fg_pixels, 100);
        assert!((metrics.fg_pixel_ratio - 0.6).abs() < 1e-9);
        assert_eq!(metrics.total_seg_area, 100);
        assert_eq!(metrics.total_region_area, 200);
        assert!((metrics.area_ratio - 0.1).abs() < 1e-9);
        assert_eq!(metrics.descriptions.len(), 2);
        assert!((metrics.descriptions[1].fg_pix_ratio - 0.4).abs() < 1e-9);
        assert!((metrics.descriptions[1].area_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_over_and_undersegmentation_counts() {
        // h0 merges g0 and g1; g2 is split across h1, h2 and h3.
        let hyp = vec![
            vertex(Side::Hypothesis, 0, 20, &[(0, 10), (1, 10)]),
            vertex(Side::Hypothesis, 1, 5, &[(2, 5)]),
            vertex(Side::Hypothesis, 2, 5, &[(2, 5)]),
            vertex(Side::Hypothesis, 3, 5, &[(2, 5)]),
            vertex(Side::Hypothesis, 4, 7, &[]),
        ];
        let gt = vec![
            vertex(Side::GroundTruth, 0, 10, &[(0, 10)]),
            vertex(Side::GroundTruth, 1, 10, &[(0, 10)]),
            vertex(Side::GroundTruth, 2, 15, &[(1, 5), (2, 5), (3, 5)]),
            vertex(Side::GroundTruth, 3, 9, &[]),
        ];
        let counts = PagePixelCounts {
            false_positives: vec![
                PixelCount::default(),
                PixelCount::default(),
                PixelCount::default(),
                PixelCount::default(),
                PixelCount {
                    count: 7,
                    duplicates: 0,
                },
            ],
            false_negatives: vec![
                PixelCount::default(),
                PixelCount::default(),
                PixelCount::default(),
                PixelCount {
                    count: 9,
                    duplicates: 0,
                },
            ],
            true_negatives: PixelCount {
                count: 50,
                duplicates: 0,
            },
            total_fg_pix: 110,
        };

        let m = HypothesisMetrics::compute(&hyp, &gt, &counts, 1.0, "displayed");
        assert_eq!(m.undersegmented_components, 1);
        assert_eq!(m.undersegmentations, 2);
        assert_eq!(m.oversegmented_components, 1);
        assert_eq!(m.oversegmentations, 3);
        assert!((m.avg_oversegmentations_per_box - 3.0).abs() < 1e-9);
        assert!((m.avg_undersegmentations_per_box - 2.0).abs() < 1e-9);
        assert_eq!(m.false_positives, 1);
        assert_eq!(m.false_negatives, 1);
        // h1..h3 each cover only a third of g2.
        assert_eq!(m.correct_segmentations, 0);
        assert_eq!(m.total_gt_regions, 4);
        assert_eq!(m.res_type_name, "displayed");

        assert_eq!(m.total_true_positive_fg_pix, 35);
        assert_eq!(m.total_false_positive_pix, 7);
        assert_eq!(m.total_false_negative_pix, 9);
        assert_eq!(m.total_positive_fg_pix, 42);
        assert_eq!(m.total_negative_fg_pix, 68);

        // Negatives: 110 page pixels - 44 groundtruth pixels.
        assert!((m.specificity - 50.0 / 66.0).abs() < 1e-9);
        assert!((m.accuracy - 85.0 / 110.0).abs() < 1e-9);
        assert!((m.negative_predictive_val - 50.0 / 59.0).abs() < 1e-9);

        let h0 = &m.boxes[0];
        assert_eq!(h0.num_gt_overlap, 2);
        assert!((h0.recall - 1.0).abs() < 1e-9);
        assert!((h0.precision - 1.0).abs() < 1e-9);

        let h4 = &m.boxes[4];
        assert_eq!(h4.recall, 0.0);
        assert!((h4.false_discovery - 1.0).abs() < 1e-9);
        assert!((h4.fallout - 7.0 / 66.0).abs() < 1e-9);

        let g2 = &m.overlap_gts[2];
        assert_eq!(g2.num_edges, 3);
        assert_eq!(m.overlap_gts[3].false_negative_pix, 9);
    }

    #[test]
    fn test_correct_segmentation_threshold() {
        let hyp = vec![vertex(Side::Hypothesis, 0, 95, &[(0, 95)])];
        let gt = vec![vertex(Side::GroundTruth, 0, 100, &[(0, 95)])];
        let counts = PagePixelCounts {
            false_positives: vec![PixelCount::default()],
            false_negatives: vec![PixelCount {
                count: 5,
                duplicates: 0,
            }],
            true_negatives: PixelCount::default(),
            total_fg_pix: 100,
        };

        let strict = HypothesisMetrics::compute(&hyp, &gt, &counts, 1.0, "all");
        assert_eq!(strict.correct_segmentations, 0);
        assert_eq!(strict.boxes[0].false_negative_pix, 5);

        let tolerant = HypothesisMetrics::compute(&hyp, &gt, &counts, 0.95, "all");
        assert_eq!(tolerant.correct_segmentations, 1);
        assert!(tolerant.boxes[0].correct_segmentation);
    }

    #[test]
    fn test_empty_groundtruth_region_is_never_correct() {
        let hyp = vec![vertex(Side::Hypothesis, 0, 0, &[(0, 0)])];
        let gt = vec![vertex(Side::GroundTruth, 0, 0, &[(0, 0)])];
        let counts = PagePixelCounts {
            false_positives: vec![PixelCount::default()],
            false_negatives: vec![PixelCount::default()],
            ..Default::default()
        };

        let m = HypothesisMetrics::compute(&hyp, &gt, &counts, 1.0, "all");
        assert_eq!(m.correct_segmentations, 0);
        assert!(!m.boxes[0].correct_segmentation);
        assert_eq!(m.boxes[0].recall, 0.0);
    }

    #[test]
    fn test_region_scores_include_duplicate_overlap() {
        // h0 claimed the shared pixels first; h1 still covers g0 entirely.
        let mut hyp = vec![
            vertex(Side::Hypothesis, 0, 100, &[(0, 100)]),
            vertex(Side::Hypothesis, 1, 0, &[(0, 0)]),
        ];
        hyp[1].edges[0].intersecting_duplicate_count = 100;
        let gt = vec![vertex(Side::GroundTruth, 0, 100, &[(0, 100), (1, 0)])];
        let counts = PagePixelCounts {
            false_positives: vec![PixelCount::default(); 2],
            false_negatives: vec![PixelCount::default()],
            ..Default::default()
        };

        let m = HypothesisMetrics::compute(&hyp, &gt, &counts, 1.0, "all");
        assert!(m.boxes[1].correct_segmentation);
        assert!((m.boxes[1].recall - 1.0).abs() < 1e-9);
        assert_eq!(m.boxes[1].false_negative_pix, 0);
        assert_eq!(m.boxes[1].true_positive_pix, 0);
        assert_eq!(m.total_true_positive_fg_pix, 100);
    }

    #[test]
    fn test_empty_page_reports_zero() {
        let m = HypothesisMetrics::compute(&[], &[], &PagePixelCounts::default(), 1.0, "all");
        assert_eq!(m.accuracy, 0.0);
        assert_eq!(m.specificity, 0.0);
        assert_eq!(m.negative_predictive_val, 0.0);
        assert_eq!(m.avg_oversegmentations_per_box, 0.0);
        assert!(m.boxes.is_empty());

        let text = m.verbose().to_string();
        assert!(text.contains("Layout evaluation: all"));
    }
}
