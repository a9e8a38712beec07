// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Box file reader.
//!
//! A box file lists the rectangles of one segmentation, one per line:
//!
//! ```text
//! # x y width height [type]
//! 120 340 600 80 displayed
//! 150 512 90 24 embedded
//! 40 40 500 30
//! ```
//!
//! Fields are whitespace separated. Blank lines and lines starting with `#`
//! are ignored. The region type is optional.

use crate::{Error, geometry::Rect};
use std::{fs, path::Path};

/// One parsed line of a box file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxEntry {
    pub rect: Rect,
    pub region_type: Option<String>,
}

/// Parses the contents of a box file.
pub fn parse_boxes(text: &str) -> Result<Vec<BoxEntry>, Error> {
    let mut entries = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if !(4..=5).contains(&fields.len()) {
            return Err(Error::InvalidBoxFile(format!(
                "line {}: expected 'x y width height [type]', found {} fields",
                lineno + 1,
                fields.len()
            )));
        }

        let mut coords = [0u32; 4];
        for (value, field) in coords.iter_mut().zip(&fields) {
            *value = field.parse().map_err(|e| {
                Error::InvalidBoxFile(format!("line {}: '{}': {}", lineno + 1, field, e))
            })?;
        }

        let [x, y, width, height] = coords;
        entries.push(BoxEntry {
            rect: Rect::new(x, y, width, height),
            region_type: fields.get(4).map(|t| t.to_string()),
        });
    }

    Ok(entries)
}

/// Rectangles of the given region type, in file order.
///
/// With no type every rectangle is kept; with a type, untyped lines are
/// skipped.
pub fn filter_boxes(entries: &[BoxEntry], region_type: Option<&str>) -> Vec<Rect> {
    entries
        .iter()
        .filter(|e| match region_type {
            None => true,
            Some(t) => e.region_type.as_deref() == Some(t),
        })
        .map(|e| e.rect)
        .collect()
}

/// Reads a box file and keeps the rectangles of `region_type`.
pub fn read_boxes<P: AsRef<Path>>(path: P, region_type: Option<&str>) -> Result<Vec<Rect>, Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let entries = parse_boxes(&text)?;
    let rects = filter_boxes(&entries, region_type);
    log::debug!(
        "Read {} of {} rectangles from {:?}",
        rects.len(),
        entries.len(),
        path
    );
    Ok(rects)
}
