// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{geometry::Rect, graph::Side};

/// Error type for layout evaluation.
///
/// Input validation failures are reported before any pixel is classified, so
/// a failed evaluation never leaves a partially built graph behind. Ratios with
/// a zero denominator are not errors; they evaluate to `0.0`.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred while reading an input file.
    IoError(std::io::Error),
    /// Configuration parsing or loading error.
    ConfigError(config::ConfigError),
    /// JSON serialization or deserialization error.
    JsonError(serde_json::Error),
    /// Image decoding or encoding error.
    ImageError(image::ImageError),
    /// The hypothesis and groundtruth images have different dimensions.
    DimensionMismatch {
        hypothesis: (u32, u32),
        groundtruth: (u32, u32),
    },
    /// A rectangle extends past the image it refers to.
    RectOutOfBounds {
        side: Side,
        index: usize,
        rect: Rect,
        width: u32,
        height: u32,
    },
    /// A box file line could not be parsed.
    InvalidBoxFile(String),
    /// The requested region type has no palette colour.
    UnknownRegionType(String),
    /// Invalid parameters provided to an operation.
    InvalidParameters(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::ConfigError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonError(err)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageError(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "I/O error: {}", e),
            Error::ConfigError(e) => write!(f, "Configuration error: {}", e),
            Error::JsonError(e) => write!(f, "JSON error: {}", e),
            Error::ImageError(e) => write!(f, "Image error: {}", e),
            Error::DimensionMismatch {
                hypothesis,
                groundtruth,
            } => write!(
                f,
                "Image dimensions differ: hypothesis is {}x{}, groundtruth is {}x{}",
                hypothesis.0, hypothesis.1, groundtruth.0, groundtruth.1
            ),
            Error::RectOutOfBounds {
                side,
                index,
                rect,
                width,
                height,
            } => write!(
                f,
                "{} rectangle {} {} lies outside the {}x{} image",
                side, index, rect, width, height
            ),
            Error::InvalidBoxFile(s) => write!(f, "Invalid box file: {}", s),
            Error::UnknownRegionType(s) => write!(f, "Unknown region type: {}", s),
            Error::InvalidParameters(s) => write!(f, "Invalid parameters: {}", s),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            Error::ConfigError(e) => Some(e),
            Error::JsonError(e) => Some(e),
            Error::ImageError(e) => Some(e),
            _ => None,
        }
    }
}
