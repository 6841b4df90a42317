// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart composition.
//!
//! [`ForecastChartSpec`] owns layout and axis options. [`ForecastChartSpec::build`] runs the
//! geometry builders in render order and returns a [`ChartScene`]:
//! - one gapped line per series,
//! - a marker instruction for every line vertex (remove it, or replace it with event bars),
//! - the threshold bands, and
//! - a flat, z-ordered list of declarative [`Mark`]s covering all of the above plus grid and
//!   labels.
//!
//! Nothing here mutates a drawing surface; the renderer applies the scene.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};

use crate::event_bars::{EventBarGeometry, EventStack, MarkerAction};
use crate::gapped_line::{GappedLine, GappedLineBuilder};
use crate::mark::{Layer, Mark, MarkId, MarkShape, TextAnchor};
use crate::sample::{ProjectedSample, Sample, Thresholds};
use crate::scale::{AxisProjector, ScaleLinear, ScaleLinearSpec, ScalePoint};
use crate::style::{ChartStyle, StyleClass};
use crate::threshold_bands::ThresholdBands;
use crate::z_order;

const GRID_ID_BASE: u64 = 0xA1 << 56;
const LABEL_ID_BASE: u64 = 0xA2 << 56;
const BAND_ID_BASE: u64 = 0xA3 << 56;
const LINE_ID_BASE: u64 = 0xA4 << 56;
const BAR_ID_BASE: u64 = 0xA5 << 56;

/// Everything a chart shows.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartData {
    /// Category labels along x, one per sample position.
    #[cfg_attr(feature = "serde", serde(default))]
    pub labels: Vec<String>,
    /// Threshold bands.
    pub thresholds: Thresholds,
    /// Sample series, each in chronological order.
    pub series: Vec<Vec<Sample>>,
}

/// Per-side padding around the chart rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Padding {
    /// Top padding.
    pub top: f64,
    /// Right padding.
    pub right: f64,
    /// Bottom padding.
    pub bottom: f64,
    /// Left padding.
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 20.0,
            left: 30.0,
        }
    }
}

/// Layout and axis options for a forecast chart.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ForecastChartSpec {
    /// Total width of the view.
    pub width: f64,
    /// Total height of the view.
    pub height: f64,
    /// Padding around the chart rectangle.
    pub padding: Padding,
    /// Space reserved below the chart rectangle for the x axis.
    pub axis_x_offset: f64,
    /// Space reserved left of the chart rectangle for the y axis.
    pub axis_y_offset: f64,
    /// Width of one event bar.
    pub bar_width: f64,
    /// A value the y axis always includes.
    pub reference_value: Option<f64>,
    /// Restricts y ticks to whole numbers.
    pub only_integer: bool,
    /// Approximate number of y ticks.
    pub y_tick_count: usize,
    /// Whether to emit horizontal gridlines.
    pub show_grid: bool,
    /// Whether to emit axis labels.
    pub show_labels: bool,
    /// Paints.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub style: ChartStyle,
}

impl Default for ForecastChartSpec {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            padding: Padding::default(),
            axis_x_offset: 20.0,
            axis_y_offset: 20.0,
            bar_width: 20.0,
            reference_value: Some(0.0),
            only_integer: true,
            y_tick_count: 5,
            show_grid: true,
            show_labels: true,
            style: ChartStyle::default(),
        }
    }
}

/// What to do with the point marker of one line vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct PointInstruction {
    /// Series index.
    pub series: usize,
    /// Index of the vertex in the series' path ops.
    pub vertex: usize,
    /// Index of the sample this vertex reports, if it carries metadata.
    pub sample: Option<usize>,
    /// Remove or replace.
    pub action: MarkerAction,
}

/// Output of one chart build.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartScene {
    /// Outer view bounds.
    pub view: Rect,
    /// The data rectangle. `y1` is the y axis origin.
    pub chart_rect: Rect,
    /// Category scale along x.
    pub x_scale: ScalePoint,
    /// Value scale along y.
    pub y_scale: ScaleLinear,
    /// One gapped line per series.
    pub lines: Vec<GappedLine>,
    /// Marker instructions, in series then vertex order.
    pub markers: Vec<PointInstruction>,
    /// Threshold bands.
    pub bands: ThresholdBands,
    /// All marks, sorted by `(z_index, id)`.
    pub marks: Vec<Mark>,
}

impl ForecastChartSpec {
    /// Sets the view size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the padding.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the event bar width.
    pub fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width;
        self
    }

    /// Sets the style.
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Enables or disables gridlines and labels.
    pub fn with_guides(mut self, show_grid: bool, show_labels: bool) -> Self {
        self.show_grid = show_grid;
        self.show_labels = show_labels;
        self
    }

    /// The outer view bounds.
    pub fn view(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width.max(0.0), self.height.max(0.0))
    }

    /// The data rectangle inside padding and axis offsets.
    pub fn chart_rect(&self) -> Rect {
        let p = self.padding;
        let x0 = p.left + self.axis_y_offset;
        let y0 = p.top;
        let x1 = (self.width - p.right).max(x0);
        let y1 = (self.height - p.bottom - self.axis_x_offset).max(y0);
        Rect::new(x0, y0, x1, y1)
    }

    /// Instantiates the y scale over all values and event stacks in `data`.
    pub fn y_scale(&self, data: &ChartData, chart_rect: Rect) -> ScaleLinear {
        ScaleLinearSpec::new(value_domain(data))
            .with_reference_value(self.reference_value)
            .with_only_integer(self.only_integer)
            .with_nice(true)
            .instantiate_resolved((chart_rect.y1, chart_rect.y0), self.y_tick_count)
    }

    /// Instantiates the x scale: first category on the left edge, last on the right edge.
    pub fn x_scale(&self, data: &ChartData, chart_rect: Rect) -> ScalePoint {
        let longest = data.series.iter().map(Vec::len).max().unwrap_or(0);
        let count = data.labels.len().max(longest);
        ScalePoint::new((chart_rect.x0, chart_rect.x1), count).with_padding(0.0)
    }

    /// Pairs each sample of a series with its screen position.
    pub fn project_series(
        &self,
        series: &[Sample],
        x_scale: &ScalePoint,
        y_projector: &impl AxisProjector,
        base_y: f64,
    ) -> Vec<ProjectedSample> {
        series
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let y = sample
                    .value
                    .map_or(base_y, |v| base_y - y_projector.project_value(v));
                ProjectedSample::new(i, *sample, (x_scale.x(i), y))
            })
            .collect()
    }

    /// Builds the full scene for `data`.
    pub fn build(&self, data: &ChartData) -> ChartScene {
        let view = self.view();
        let chart_rect = self.chart_rect();
        let x_scale = self.x_scale(data, chart_rect);
        let y_scale = self.y_scale(data, chart_rect);
        let base_y = chart_rect.y1;

        let line_builder = GappedLineBuilder::new(self.bar_width);
        let bar_geometry = EventBarGeometry::new(self.bar_width);

        let lines: Vec<GappedLine> = data
            .series
            .iter()
            .map(|series| {
                let projected = self.project_series(series, &x_scale, &y_scale, base_y);
                line_builder.build(&projected)
            })
            .collect();

        let markers: Vec<PointInstruction> = lines
            .iter()
            .enumerate()
            .flat_map(|(series, line)| {
                line.ops
                    .iter()
                    .enumerate()
                    .map(move |(vertex, op)| PointInstruction {
                        series,
                        vertex,
                        sample: op.role().meta().map(|m| m.index),
                        action: bar_geometry.marker_for(op, &y_scale, base_y),
                    })
            })
            .collect();

        let bands = ThresholdBands::new(&data.thresholds, chart_rect, &y_scale);

        let mut marks = Vec::new();
        if self.show_grid {
            marks.extend(self.grid_marks(&y_scale, chart_rect));
        }
        if self.show_labels {
            marks.extend(self.label_marks(data, &x_scale, &y_scale, chart_rect));
        }
        marks.extend(self.band_marks(&bands));
        marks.extend(self.line_marks(&lines));
        marks.extend(self.bar_marks(&markers));
        marks.sort_by_key(|m| (m.z_index, m.id));

        log::debug!(
            "chart build: {} series, {} markers, {} bars, {} marks",
            lines.len(),
            markers.len(),
            markers.iter().map(|m| m.action.bars().len()).sum::<usize>(),
            marks.len()
        );

        ChartScene {
            view,
            chart_rect,
            x_scale,
            y_scale,
            lines,
            markers,
            bands,
            marks,
        }
    }

    fn y_ticks(&self, y_scale: &ScaleLinear) -> Vec<f64> {
        let (lo, hi) = (y_scale.domain_min(), y_scale.domain_max());
        y_scale
            .ticks_with(self.y_tick_count, self.only_integer)
            .into_iter()
            .filter(|t| *t >= lo.min(hi) && *t <= hi.max(lo))
            .collect()
    }

    fn grid_marks(&self, y_scale: &ScaleLinear, chart_rect: Rect) -> Vec<Mark> {
        self.y_ticks(y_scale)
            .into_iter()
            .enumerate()
            .map(|(i, tick)| {
                let y = chart_rect.y1 - y_scale.project_value(tick);
                let mut p = BezPath::new();
                p.move_to((chart_rect.x0, y));
                p.line_to((chart_rect.x1, y));
                Mark {
                    id: MarkId::from_raw(GRID_ID_BASE + i as u64),
                    layer: Layer::Grid,
                    z_index: z_order::GRID_LINES,
                    class: StyleClass::Grid,
                    shape: MarkShape::Path(p),
                    fill: None,
                    stroke: Some(self.style.grid.clone()),
                }
            })
            .collect()
    }

    fn label_marks(
        &self,
        data: &ChartData,
        x_scale: &ScalePoint,
        y_scale: &ScaleLinear,
        chart_rect: Rect,
    ) -> Vec<Mark> {
        let font_size = self.style.label_font_size;
        let label = |id: u64, pos: Point, text: String, anchor: TextAnchor| Mark {
            id: MarkId::from_raw(LABEL_ID_BASE + id),
            layer: Layer::Labels,
            z_index: z_order::AXIS_LABELS,
            class: StyleClass::Label,
            shape: MarkShape::Text {
                pos,
                text,
                font_size,
                anchor,
            },
            fill: self.style.fill_for(StyleClass::Label).cloned(),
            stroke: None,
        };

        let mut out = Vec::new();
        for (i, tick) in self.y_ticks(y_scale).into_iter().enumerate() {
            let y = chart_rect.y1 - y_scale.project_value(tick);
            let pos = Point::new(chart_rect.x0 - 5.0, y);
            out.push(label(i as u64, pos, format!("{tick}"), TextAnchor::End));
        }
        let x_label_y = chart_rect.y1 + self.axis_x_offset * 0.5;
        for (i, text) in data.labels.iter().enumerate() {
            let pos = Point::new(x_scale.x(i), x_label_y);
            out.push(label(
                0x1_0000 + i as u64,
                pos,
                text.clone(),
                TextAnchor::Middle,
            ));
        }
        out
    }

    fn band_marks(&self, bands: &ThresholdBands) -> Vec<Mark> {
        bands
            .tagged()
            .into_iter()
            .enumerate()
            .map(|(i, (class, rect))| Mark {
                id: MarkId::from_raw(BAND_ID_BASE + i as u64),
                layer: Layer::Grid,
                z_index: z_order::THRESHOLD_BANDS,
                class,
                shape: MarkShape::Path(rect.to_path()),
                fill: self.style.fill_for(class).cloned(),
                stroke: None,
            })
            .collect()
    }

    fn line_marks(&self, lines: &[GappedLine]) -> Vec<Mark> {
        lines
            .iter()
            .enumerate()
            .map(|(series, line)| Mark {
                id: MarkId::from_raw(LINE_ID_BASE + series as u64),
                layer: Layer::Series,
                z_index: z_order::SERIES_STROKE,
                class: StyleClass::Line,
                shape: MarkShape::Path(line.to_bez_path()),
                fill: None,
                stroke: Some(self.style.line.clone()),
            })
            .collect()
    }

    fn bar_marks(&self, markers: &[PointInstruction]) -> Vec<Mark> {
        markers
            .iter()
            .flat_map(|m| {
                m.action.bars().iter().enumerate().map(move |(slot, bar)| {
                    let class = bar.direction.class();
                    let MarkId(raw) = MarkId::for_vertex(m.series, m.vertex, slot);
                    Mark {
                        id: MarkId::from_raw(BAR_ID_BASE | raw),
                        layer: Layer::Series,
                        z_index: z_order::EVENT_BARS,
                        class,
                        shape: MarkShape::Path(bar.rect.to_path()),
                        fill: self.style.fill_for(class).cloned(),
                        stroke: None,
                    }
                })
            })
            .collect()
    }
}

/// Value extent of all samples, including the levels their event bars reach.
///
/// Falls back to `(0, 1)` when there are no values.
fn value_domain(data: &ChartData) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for sample in data.series.iter().flatten() {
        let Some(value) = sample.value.filter(|v| v.is_finite()) else {
            continue;
        };
        let stack = EventStack::new(value, &sample.events);
        for v in [value, stack.outbound_top, stack.outbound_bottom] {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min.is_finite() && max.is_finite() {
        (min, max)
    } else {
        (0.0, 1.0)
    }
}
