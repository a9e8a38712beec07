// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use image::RgbImage;
use layout_eval::{BipartiteGraph, EvalConfig, Error, GraphInput, Rect, Side, read_boxes};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Evaluation settings file (TOML, JSON or YAML).  Defaults to
    /// config.toml in the user configuration directory when present.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Evaluation Command
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, PartialEq, Clone, Debug)]
enum Command {
    /// Compare a hypothesis segmentation of a page against its groundtruth.
    Evaluate {
        /// Colour-coded hypothesis image
        #[clap(long)]
        hyp_image: PathBuf,

        /// Colour-coded groundtruth image
        #[clap(long)]
        gt_image: PathBuf,

        /// Hypothesis box file, one `x y width height [type]` per line
        #[clap(long)]
        hyp_boxes: PathBuf,

        /// Groundtruth box file
        #[clap(long)]
        gt_boxes: PathBuf,

        /// Region type to evaluate.  Without it every foreground pixel and
        /// every box is evaluated.
        #[clap(long = "type")]
        region_type: Option<String>,

        /// Print both metric records as JSON
        #[clap(long)]
        json: bool,

        /// Print the per-region report
        #[clap(long, short)]
        verbose: bool,

        /// Write the colour-coded tracker images into this directory
        #[clap(long)]
        debug_dir: Option<PathBuf>,
    },
    /// List the configured region types and their colours.
    Palette,
}

fn default_config_path() -> Option<PathBuf> {
    let path = ProjectDirs::from("ai", "EdgeFirst", "Layout Eval")?
        .config_dir()
        .join("config.toml");
    path.exists().then_some(path)
}

fn load_image(path: &Path) -> Result<RgbImage, Error> {
    log::debug!("Loading {:?}", path);
    Ok(image::open(path)?.to_rgb8())
}

fn write_debug_images(
    graph: &BipartiteGraph,
    dir: &Path,
    hyp_rects: &[Rect],
    gt_rects: &[Rect],
) -> Result<(), Error> {
    std::fs::create_dir_all(dir)?;
    for (side, rects) in [(Side::Hypothesis, hyp_rects), (Side::GroundTruth, gt_rects)] {
        if let Some(tracker) = graph.tracker(side) {
            let path = dir.join(format!("{}.png", side));
            tracker.render(rects).save(&path)?;
            log::info!("Wrote {:?}", path);
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all))]
fn handle_evaluate(
    config: &EvalConfig,
    hyp_image: PathBuf,
    gt_image: PathBuf,
    hyp_boxes: PathBuf,
    gt_boxes: PathBuf,
    region_type: Option<String>,
    json: bool,
    verbose: bool,
    debug_dir: Option<PathBuf>,
) -> Result<(), Error> {
    let region_type = region_type.as_deref();
    let filter = config.filter_for(region_type)?;

    let hyp_img = load_image(&hyp_image)?;
    let gt_img = load_image(&gt_image)?;
    let hyp_rects = read_boxes(&hyp_boxes, region_type)?;
    let gt_rects = read_boxes(&gt_boxes, region_type)?;

    let input = GraphInput {
        hypothesis_image: &hyp_img,
        groundtruth_image: &gt_img,
        hypothesis_rects: &hyp_rects,
        groundtruth_rects: &gt_rects,
        filter,
        region_type,
    };
    let graph = BipartiteGraph::build(&input, config)?;
    log::debug!("{}", graph.describe_side(Side::Hypothesis));
    log::debug!("{}", graph.describe_side(Side::GroundTruth));

    if json {
        let report = serde_json::json!({
            "groundtruth": graph.groundtruth_metrics(),
            "hypothesis": graph.hypothesis_metrics(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if verbose {
        print!("{}", graph.groundtruth_metrics());
        print!("{}", graph.hypothesis_metrics().verbose());
    } else {
        print!("{}", graph.groundtruth_metrics());
        print!("{}", graph.hypothesis_metrics());
    }

    if let Some(dir) = debug_dir {
        write_debug_images(&graph, &dir, &hyp_rects, &gt_rects)?;
    }

    Ok(())
}

fn handle_palette(config: &EvalConfig) -> Result<(), Error> {
    for (name, [r, g, b]) in &config.palette {
        println!("{:<16} {:3} {:3} {:3}", name, r, g, b);
    }
    Ok(())
}

fn init_logging() {
    #[cfg(feature = "profiling")]
    {
        use tracing_subscriber::EnvFilter;

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    #[cfg(not(feature = "profiling"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn main() -> Result<(), Error> {
    init_logging();

    let args = Args::parse();
    let config_path = args.config.or_else(default_config_path);
    let config = EvalConfig::load(config_path.as_deref())?;

    match args.cmd {
        Command::Evaluate {
            hyp_image,
            gt_image,
            hyp_boxes,
            gt_boxes,
            region_type,
            json,
            verbose,
            debug_dir,
        } => handle_evaluate(
            &config,
            hyp_image,
            gt_image,
            hyp_boxes,
            gt_boxes,
            region_type,
            json,
            verbose,
            debug_dir,
        ),
        Command::Palette => handle_palette(&config),
    }
}
