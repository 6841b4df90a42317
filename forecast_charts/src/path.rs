// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path steps emitted by the gapped-line builder.

use kurbo::{BezPath, Point};

use crate::sample::PointMeta;

/// What a vertex means to downstream consumers (tooltips, marker replacement).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VertexRole {
    /// An ordinary sample vertex without events.
    Plain(PointMeta),
    /// The line's entry into an event gap. Carries no metadata so the sample is reported once.
    PreEvent,
    /// The line's exit from an event gap. Event bars are anchored on this vertex.
    PostEvent(PointMeta),
}

impl VertexRole {
    /// Returns the metadata carried by this vertex, if any.
    pub fn meta(&self) -> Option<&PointMeta> {
        match self {
            Self::Plain(meta) | Self::PostEvent(meta) => Some(meta),
            Self::PreEvent => None,
        }
    }
}

/// A single path step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathOp {
    /// Starts a new, disconnected subpath.
    Move {
        /// Target point in screen space.
        point: Point,
        /// Role of the vertex.
        role: VertexRole,
    },
    /// Continues the current subpath with a straight segment.
    Line {
        /// Target point in screen space.
        point: Point,
        /// Role of the vertex.
        role: VertexRole,
    },
}

impl PathOp {
    /// The vertex position.
    pub fn point(&self) -> Point {
        match self {
            Self::Move { point, .. } | Self::Line { point, .. } => *point,
        }
    }

    /// The vertex role.
    pub fn role(&self) -> &VertexRole {
        match self {
            Self::Move { role, .. } | Self::Line { role, .. } => role,
        }
    }

    /// Returns `true` if this step breaks the line (a data hole or an event gap).
    pub fn is_hole(&self) -> bool {
        matches!(self, Self::Move { .. })
    }
}

/// Converts path steps into a `kurbo` path for stroking.
pub fn to_bez_path(ops: &[PathOp]) -> BezPath {
    let mut p = BezPath::new();
    for op in ops {
        match op {
            PathOp::Move { point, .. } => p.move_to(*point),
            PathOp::Line { point, .. } => p.line_to(*point),
        }
    }
    p
}
