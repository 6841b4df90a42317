// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry for stock forecast charts.
//!
//! A forecast chart is a line of stock levels over time where some samples carry events:
//! stock leaving (outbound, e.g. expiries) and stock arriving (inbound, e.g. shipments).
//! Events are drawn as bars next to their sample instead of being folded into the line,
//! and the line leaves a gap where the bars go. Two threshold bands sit behind the series.
//!
//! The crate is organized around three pure builders that share one coordinate convention
//! (screen y of a value `v` is `base_y - projector.project_value(v)`):
//! - [`GappedLineBuilder`] turns projected samples into [`PathOp`]s with gaps and offsets.
//! - [`EventBarGeometry`] turns a vertex's events into [`Rectangle`]s, or tells the caller to
//!   drop the point marker.
//! - [`ThresholdBands`] computes the two background bands from [`Thresholds`].
//!
//! [`ForecastChartSpec`] composes them into a [`ChartScene`] of declarative [`Mark`]s for a
//! renderer to draw. Drawing itself is out of scope.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod chart;
mod error;
mod event_bars;
#[cfg(not(feature = "std"))]
mod float;
mod gapped_line;
mod mark;
mod path;
mod rectangle;
mod sample;
mod scale;
mod style;
mod threshold_bands;
mod z_order;


pub use chart::{ChartData, ChartScene, ForecastChartSpec, Padding, PointInstruction};
pub use error::{ChartError, ThresholdKind};
pub use event_bars::{
    EventBar, EventBarGeometry, EventBars, EventDirection, EventStack, MarkerAction,
};
pub use gapped_line::{Anchor, GappedLine, GappedLineBuilder, LineState};
pub use mark::{Layer, Mark, MarkId, MarkShape, TextAnchor};
pub use path::{PathOp, VertexRole, to_bez_path};
pub use rectangle::Rectangle;
pub use sample::{Events, PointMeta, ProjectedSample, Sample, Thresholds};
pub use scale::{AxisProjector, ScaleLinear, ScaleLinearSpec, ScalePoint};
pub use style::{ChartStyle, StrokeStyle, StyleClass};
pub use threshold_bands::ThresholdBands;
pub use z_order::*;
