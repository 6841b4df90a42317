// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative marks handed to a renderer.
//!
//! Marks describe *what* to draw; the renderer owns the drawing surface and decides how.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Brush;

use crate::style::{StrokeStyle, StyleClass};

/// Stable identity for a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Identity for the `slot`-th mark generated for vertex `vertex` of series `series`.
    ///
    /// Ids only need to be unique within a single chart build.
    pub const fn for_vertex(series: usize, vertex: usize, slot: usize) -> Self {
        Self(((series as u64) << 40) | ((vertex as u64) << 4) | (slot as u64 & 0xF))
    }
}

/// The drawing layer a mark belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Background grid group; threshold bands are appended here.
    Grid,
    /// Series group: lines and event bars.
    Series,
    /// Axis labels.
    Labels,
}

/// Horizontal alignment of a text mark relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the position.
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

/// Geometry of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkShape {
    /// A path, filled and/or stroked.
    Path(BezPath),
    /// A single line of unshaped text.
    Text {
        /// Anchor position (the text's vertical middle).
        pos: Point,
        /// The text content.
        text: String,
        /// Font size in scene coordinates.
        font_size: f64,
        /// Horizontal alignment.
        anchor: TextAnchor,
    },
}

/// A single declarative mark.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Drawing layer.
    pub layer: Layer,
    /// Paint order within the chart; lower draws first.
    pub z_index: i32,
    /// Style tag.
    pub class: StyleClass,
    /// Geometry.
    pub shape: MarkShape,
    /// Fill paint, if filled.
    pub fill: Option<Brush>,
    /// Stroke, if stroked.
    pub stroke: Option<StrokeStyle>,
}

impl Mark {
    /// Bounding box of path marks. Text marks have no intrinsic bounds.
    pub fn bounds(&self) -> Option<Rect> {
        match &self.shape {
            MarkShape::Path(p) => Some(p.bounding_box()),
            MarkShape::Text { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn vertex_ids_are_distinct_per_slot_and_series() {
        let a = MarkId::for_vertex(0, 3, 0);
        let b = MarkId::for_vertex(0, 3, 1);
        let c = MarkId::for_vertex(1, 3, 0);
        let d = MarkId::for_vertex(0, 4, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_ne!(b, d);
    }
}
