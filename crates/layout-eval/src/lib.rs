// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! # Layout Evaluation Library
//!
//! Pixel-accurate evaluation of document layout analysis. A hypothesis
//! segmentation of a page is compared against a verified groundtruth
//! segmentation of the same page. Each segmentation is given as a
//! colour-coded image, where region pixels are painted with the colour of
//! their region type, and a list of rectangles delimiting the regions.
//!
//! The two rectangle lists become the vertex sets of a bipartite graph.
//! Intersecting hypothesis and groundtruth rectangles are joined by edges
//! weighted with the number of region pixels they share, and the graph is
//! then reduced to page metrics:
//!
//! - correct segmentations, oversegmentations and undersegmentations
//! - missed regions (false negatives) and false alarms (false positives)
//! - pixel recall, precision, fallout, false discovery rate, accuracy,
//!   specificity and negative predictive value
//!
//! Every pixel is counted at most once per category, even when rectangles on
//! the same side overlap; pixels claimed twice are reported separately as
//! duplicates.
//!
//! ## Example
//!
//! ```rust
//! use image::{Rgb, RgbImage};
//! use layout_eval::{BipartiteGraph, EvalConfig, GraphInput, Rect};
//!
//! # fn main() -> Result<(), layout_eval::Error> {
//! let config = EvalConfig::default();
//! let mut page = RgbImage::from_pixel(64, 64, Rgb([255, 255, 255]));
//! for y in 10..20 {
//!     for x in 10..30 {
//!         page.put_pixel(x, y, Rgb([255, 0, 0]));
//!     }
//! }
//! let rects = [Rect::new(10, 10, 20, 10)];
//!
//! let input = GraphInput {
//!     hypothesis_image: &page,
//!     groundtruth_image: &page,
//!     hypothesis_rects: &rects,
//!     groundtruth_rects: &rects,
//!     filter: config.filter_for(Some("displayed"))?,
//!     region_type: Some("displayed"),
//! };
//! let graph = BipartiteGraph::build(&input, &config)?;
//!
//! let metrics = graph.hypothesis_metrics();
//! assert_eq!(metrics.correct_segmentations, 1);
//! assert_eq!(metrics.total_true_positive_fg_pix, 200);
//! # Ok(())
//! # }
//! ```
//!
//! ## Optional Features
//!
//! - `profiling`: emits `tracing` spans around graph construction

mod boxfile;
mod classify;
mod config;
mod error;
mod geometry;
mod graph;
mod instrument;
mod metrics;
mod raster;
mod tracker;

pub use crate::{
    boxfile::{BoxEntry, filter_boxes, parse_boxes, read_boxes},
    classify::{PixelClassifier, PixelCount, count_foreground, count_true_negatives},
    config::EvalConfig,
    error::Error,
    geometry::Rect,
    graph::{BipartiteGraph, Edge, GraphInput, Side, SideDescription, Vertex, VertexId},
    metrics::{
        GroundTruthMetrics, GtBoxDescription, HypothesisMetrics, OverlappingGtRegion,
        PagePixelCounts, RegionDescription, VerboseReport, ratio,
    },
    raster::{PageColors, PixelMatcher, RasterSurface, RegionFilter, Rgb},
    tracker::{Mark, PixelTracker},
};
