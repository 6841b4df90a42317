// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Four-corner rectangles shared by event bars and threshold bands.

use kurbo::{BezPath, Point, Rect};

use crate::scale::AxisProjector;

/// A closed four-corner shape in screen space.
///
/// Corners are stored as `(left, a), (left, b), (right, b), (right, a)`, where `a` and `b` are
/// the screen positions of the two vertical value bounds. The shape closes back to the first
/// corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    /// The four corners in drawing order.
    pub corners: [Point; 4],
}

impl Rectangle {
    /// Builds a rectangle from horizontal edges and two screen-space y positions.
    pub fn from_edges(left: f64, right: f64, y_a: f64, y_b: f64) -> Self {
        Self {
            corners: [
                Point::new(left, y_a),
                Point::new(left, y_b),
                Point::new(right, y_b),
                Point::new(right, y_a),
            ],
        }
    }

    /// Builds a rectangle spanning two data values on a vertical axis.
    ///
    /// Screen y is `base_y - projector(value)`.
    pub fn spanning_values(
        left: f64,
        right: f64,
        value_a: f64,
        value_b: f64,
        projector: &impl AxisProjector,
        base_y: f64,
    ) -> Self {
        Self::from_edges(
            left,
            right,
            base_y - projector.project_value(value_a),
            base_y - projector.project_value(value_b),
        )
    }

    /// Left edge.
    pub fn left(&self) -> f64 {
        self.corners[0].x
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.corners[2].x
    }

    /// Screen y of the first value bound.
    pub fn y_a(&self) -> f64 {
        self.corners[0].y
    }

    /// Screen y of the second value bound.
    pub fn y_b(&self) -> f64 {
        self.corners[1].y
    }

    /// Axis-aligned bounds (normalized).
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.corners[0], self.corners[2])
    }

    /// Closed path through the corners, in corner order.
    pub fn to_path(&self) -> BezPath {
        let [a, b, c, d] = self.corners;
        let mut p = BezPath::new();
        p.move_to(a);
        p.line_to(b);
        p.line_to(c);
        p.line_to(d);
        p.close_path();
        p
    }
}
