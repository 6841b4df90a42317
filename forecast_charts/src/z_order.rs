// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Renderers should sort by `(z_index, MarkId)` for a deterministic tie-break.

/// Gridlines drawn behind everything else.
pub const GRID_LINES: i32 = -50;
/// Threshold bands, appended to the grid layer above the gridlines.
pub const THRESHOLD_BANDS: i32 = -40;

/// The stroked series line.
pub const SERIES_STROKE: i32 = 10;
/// Event bars, which take the place of point markers.
pub const EVENT_BARS: i32 = 20;

/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
