// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Bipartite overlap graph between hypothesis and groundtruth regions.
//!
//! One vertex set holds the hypothesis regions, the other the groundtruth
//! regions of a single page. An edge joins a hypothesis vertex and a
//! groundtruth vertex whose rectangles intersect, weighted by the number of
//! region pixels inside the intersection. Edges never join two vertices of the
//! same set.
//!
//! Vertices live in one arena per side and are addressed by [`VertexId`];
//! edges store ids rather than references, so rebuilding or clearing the graph
//! cannot leave an edge pointing at a vertex that no longer exists.

use crate::{
    Error,
    classify::{PixelClassifier, PixelCount, count_foreground, count_true_negatives},
    config::EvalConfig,
    geometry::Rect,
    metrics::{GroundTruthMetrics, HypothesisMetrics, PagePixelCounts},
    raster::{PixelMatcher, RasterSurface, RegionFilter},
    tracker::PixelTracker,
};
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two independent vertex sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Hypothesis,
    GroundTruth,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Hypothesis => Side::GroundTruth,
            Side::GroundTruth => Side::Hypothesis,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Hypothesis => write!(f, "hypothesis"),
            Side::GroundTruth => write!(f, "groundtruth"),
        }
    }
}

/// Stable handle of a vertex: its side and position in that side's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexId {
    pub side: Side,
    pub index: usize,
}

impl VertexId {
    pub const fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }
}

/// Pixel overlap between one hypothesis and one groundtruth region, as seen
/// from one of its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// The vertex on the opposite side.
    pub other: VertexId,
    /// Region pixels of the hypothesis image inside the intersection that no
    /// earlier edge had claimed.
    pub intersecting_pixel_count: u64,
    /// Region pixels inside the intersection already claimed by an earlier
    /// edge.
    pub intersecting_duplicate_count: u64,
    /// Area of the rectangle intersection.
    pub overlap_area: u64,
}

/// One region of a page with its pixel statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub rect: Rect,
    pub area: u64,
    /// Region pixels inside `rect` first claimed by this vertex.
    pub foreground_pixel_count: u64,
    /// Region pixels inside `rect` already claimed by an earlier vertex of
    /// the same side.
    pub foreground_pixel_duplicate_count: u64,
    pub side: Side,
    pub index: usize,
    pub edges: Vec<Edge>,
}

impl Edge {
    /// Every region pixel inside the intersection, claimed here or earlier.
    pub fn overlap_pixel_count(&self) -> u64 {
        self.intersecting_pixel_count + self.intersecting_duplicate_count
    }
}

impl Vertex {
    pub fn id(&self) -> VertexId {
        VertexId::new(self.side, self.index)
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// Everything needed to evaluate one page.
///
/// Both images must have the same dimensions and every rectangle must lie
/// inside them; [`BipartiteGraph::build`] rejects anything else.
#[derive(Debug, Clone, Copy)]
pub struct GraphInput<'a, R: ?Sized> {
    pub hypothesis_image: &'a R,
    pub groundtruth_image: &'a R,
    pub hypothesis_rects: &'a [Rect],
    pub groundtruth_rects: &'a [Rect],
    pub filter: RegionFilter,
    /// Name of the region type being evaluated, for reporting.
    pub region_type: Option<&'a str>,
}

impl<'a, R: RasterSurface + ?Sized> GraphInput<'a, R> {
    fn validate(&self) -> Result<(), Error> {
        let (width, height) = self.hypothesis_image.dimensions();
        let groundtruth = self.groundtruth_image.dimensions();
        if (width, height) != groundtruth {
            return Err(Error::DimensionMismatch {
                hypothesis: (width, height),
                groundtruth,
            });
        }

        let sides = [
            (Side::Hypothesis, self.hypothesis_rects),
            (Side::GroundTruth, self.groundtruth_rects),
        ];
        for (side, rects) in sides {
            if let Some((index, rect)) = rects
                .iter()
                .enumerate()
                .find(|(_, r)| !r.fits_within(width, height))
            {
                return Err(Error::RectOutOfBounds {
                    side,
                    index,
                    rect: *rect,
                    width,
                    height,
                });
            }
        }
        Ok(())
    }
}

/// Evaluation graph for a single page.
///
/// The graph owns both vertex arenas, all edges, the two tracker overlays and
/// the metric records computed from them. Each page gets its own instance.
#[derive(Debug, Clone, Default)]
pub struct BipartiteGraph {
    hypothesis: Vec<Vertex>,
    groundtruth: Vec<Vertex>,
    hyp_tracker: Option<PixelTracker>,
    gt_tracker: Option<PixelTracker>,
    gt_metrics: GroundTruthMetrics,
    hyp_metrics: HypothesisMetrics,
}

impl BipartiteGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the input, builds both vertex sets and their edges, and
    /// computes the metric records.
    #[cfg_attr(feature = "profiling", tracing::instrument(skip_all))]
    pub fn build<R>(input: &GraphInput<'_, R>, config: &EvalConfig) -> Result<Self, Error>
    where
        R: RasterSurface + Sync + ?Sized,
    {
        input.validate()?;

        let colors = config.page_colors();
        let matcher = PixelMatcher::new(input.filter, colors);
        let hyp_classifier = PixelClassifier::new(input.hypothesis_image, matcher);
        let gt_classifier = PixelClassifier::new(input.groundtruth_image, matcher);

        let ((mut hypothesis, mut hyp_tracker), (mut groundtruth, mut gt_tracker)) = rayon::join(
            || make_vertices(Side::Hypothesis, &hyp_classifier, input.hypothesis_rects),
            || make_vertices(Side::GroundTruth, &gt_classifier, input.groundtruth_rects),
        );

        make_edges(
            &mut hypothesis,
            &mut groundtruth,
            &hyp_classifier,
            &mut hyp_tracker,
        );

        let (false_positives, (false_negatives, true_negatives, total_fg_pix)) = rayon::join(
            || {
                hypothesis
                    .iter()
                    .map(|h| {
                        hyp_classifier.false_positives(
                            &h.rect,
                            input.groundtruth_rects,
                            &mut hyp_tracker,
                        )
                    })
                    .collect::<Vec<_>>()
            },
            || {
                let false_negatives = groundtruth
                    .iter()
                    .map(|g| {
                        gt_classifier.false_negatives(
                            &g.rect,
                            input.hypothesis_rects,
                            &mut gt_tracker,
                        )
                    })
                    .collect::<Vec<_>>();
                let all_rects: Vec<Rect> = input
                    .hypothesis_rects
                    .iter()
                    .chain(input.groundtruth_rects)
                    .copied()
                    .collect();
                let true_negatives = count_true_negatives(
                    input.groundtruth_image,
                    colors,
                    &all_rects,
                    &mut gt_tracker,
                );
                let total = count_foreground(input.groundtruth_image, colors);
                (false_negatives, true_negatives, total)
            },
        );

        let (width, height) = input.groundtruth_image.dimensions();
        let counts = PagePixelCounts {
            false_positives,
            false_negatives,
            true_negatives,
            total_fg_pix,
        };

        let gt_metrics = GroundTruthMetrics::compute(&groundtruth, width as u64 * height as u64);
        let hyp_metrics = HypothesisMetrics::compute(
            &hypothesis,
            &groundtruth,
            &counts,
            config.coverage_threshold,
            input.region_type.unwrap_or("all"),
        );

        log::debug!(
            "Built {} graph: {} hypothesis and {} groundtruth vertices, {} edges",
            input.region_type.unwrap_or("all"),
            hypothesis.len(),
            groundtruth.len(),
            hypothesis.iter().map(Vertex::degree).sum::<usize>(),
        );

        Ok(Self {
            hypothesis,
            groundtruth,
            hyp_tracker: Some(hyp_tracker),
            gt_tracker: Some(gt_tracker),
            gt_metrics,
            hyp_metrics,
        })
    }

    /// Clears the graph and builds it again from `input`.
    ///
    /// If validation fails the graph is left empty.
    pub fn rebuild<R>(
        &mut self,
        input: &GraphInput<'_, R>,
        config: &EvalConfig,
    ) -> Result<(), Error>
    where
        R: RasterSurface + Sync + ?Sized,
    {
        self.clear();
        *self = Self::build(input, config)?;
        Ok(())
    }

    /// Releases edges, then vertices, then tracker overlays, and resets the
    /// metric records.
    pub fn clear(&mut self) {
        for vertex in self.hypothesis.iter_mut().chain(self.groundtruth.iter_mut()) {
            vertex.edges.clear();
        }
        self.hypothesis.clear();
        self.groundtruth.clear();
        self.hyp_tracker = None;
        self.gt_tracker = None;
        self.gt_metrics = GroundTruthMetrics::default();
        self.hyp_metrics = HypothesisMetrics::default();
    }

    pub fn is_empty(&self) -> bool {
        self.hypothesis.is_empty() && self.groundtruth.is_empty()
    }

    pub fn vertices(&self, side: Side) -> &[Vertex] {
        match side {
            Side::Hypothesis => &self.hypothesis,
            Side::GroundTruth => &self.groundtruth,
        }
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices(id.side).get(id.index)
    }

    /// Vertices on the opposite side joined to `id` by an edge.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertex(id)
            .into_iter()
            .flat_map(|v| v.edges.iter())
            .filter_map(|e| self.vertex(e.other))
    }

    /// Tracker overlay of one side, if the graph has been built.
    pub fn tracker(&self, side: Side) -> Option<&PixelTracker> {
        match side {
            Side::Hypothesis => self.hyp_tracker.as_ref(),
            Side::GroundTruth => self.gt_tracker.as_ref(),
        }
    }

    pub fn groundtruth_metrics(&self) -> &GroundTruthMetrics {
        &self.gt_metrics
    }

    pub fn hypothesis_metrics(&self) -> &HypothesisMetrics {
        &self.hyp_metrics
    }

    /// Human-readable listing of one vertex set and its edges.
    pub fn describe_side(&self, side: Side) -> SideDescription<'_> {
        SideDescription {
            side,
            vertices: self.vertices(side),
        }
    }
}

fn make_vertices<R>(
    side: Side,
    classifier: &PixelClassifier<'_, R>,
    rects: &[Rect],
) -> (Vec<Vertex>, PixelTracker)
where
    R: RasterSurface + ?Sized,
{
    #[cfg(feature = "profiling")]
    let _span = crate::instrument::debug_span!("make_vertices", %side).entered();

    let (width, height) = classifier.image().dimensions();
    let mut tracker = PixelTracker::new(width, height);

    let vertices = rects
        .iter()
        .enumerate()
        .map(|(index, rect)| {
            if rect.is_empty() {
                log::debug!("Degenerate {} rectangle {} {}", side, index, rect);
            }
            let PixelCount { count, duplicates } = classifier.foreground(rect, &mut tracker);
            if duplicates > 0 {
                log::debug!(
                    "{} rectangle {} shares {} foreground pixels with earlier rectangles",
                    side,
                    index,
                    duplicates
                );
            }
            Vertex {
                rect: *rect,
                area: rect.area(),
                foreground_pixel_count: count,
                foreground_pixel_duplicate_count: duplicates,
                side,
                index,
                edges: Vec::new(),
            }
        })
        .collect();

    (vertices, tracker)
}

/// Joins every pair of intersecting hypothesis and groundtruth vertices.
///
/// Intersections are classified on the hypothesis image in hypothesis-major
/// order, claiming true positives on the hypothesis tracker, so a pixel shared
/// by several pairs is counted by the first edge only.
fn make_edges<R>(
    hypothesis: &mut [Vertex],
    groundtruth: &mut [Vertex],
    classifier: &PixelClassifier<'_, R>,
    tracker: &mut PixelTracker,
) where
    R: RasterSurface + ?Sized,
{
    #[cfg(feature = "profiling")]
    let _span = crate::instrument::debug_span!("make_edges").entered();

    for (i, j) in iproduct!(0..hypothesis.len(), 0..groundtruth.len()) {
        let Some((overlap, pixels)) =
            classifier.true_positives(&hypothesis[i].rect, &groundtruth[j].rect, tracker)
        else {
            continue;
        };

        hypothesis[i].edges.push(Edge {
            other: VertexId::new(Side::GroundTruth, j),
            intersecting_pixel_count: pixels.count,
            intersecting_duplicate_count: pixels.duplicates,
            overlap_area: overlap.area(),
        });
        groundtruth[j].edges.push(Edge {
            other: VertexId::new(Side::Hypothesis, i),
            intersecting_pixel_count: pixels.count,
            intersecting_duplicate_count: pixels.duplicates,
            overlap_area: overlap.area(),
        });
    }
}

/// Listing of one vertex set, see [`BipartiteGraph::describe_side`].
pub struct SideDescription<'a> {
    side: Side,
    vertices: &'a [Vertex],
}

impl fmt::Display for SideDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} set: {} vertices", self.side, self.vertices.len())?;
        for v in self.vertices {
            writeln!(
                f,
                "  [{}] {} area={} fg={} fg_dup={} edges={}",
                v.index,
                v.rect,
                v.area,
                v.foreground_pixel_count,
                v.foreground_pixel_duplicate_count,
                v.edges.len()
            )?;
            for e in &v.edges {
                writeln!(
                    f,
                    "      -> {} {} intersecting={} dup={} overlap_area={}",
                    e.other.side,
                    e.other.index,
                    e.intersecting_pixel_count,
                    e.intersecting_duplicate_count,
                    e.overlap_area
                )?;
            }
        }
        Ok(())
    }
}
