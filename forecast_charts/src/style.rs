// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style tags and default paints.

use peniko::Brush;
use peniko::color::palette::css;

/// The fixed style tag attached to every generated mark.
///
/// Consumers that render to a styled document (SVG, HTML) emit [`StyleClass::as_str`] as the
/// element class so the chart can be themed from a stylesheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleClass {
    /// The gapped series line.
    Line,
    /// An outbound (expiries) event bar.
    Outbound,
    /// An inbound (shipments) event bar.
    Inbound,
    /// The minimum threshold band.
    ThresholdMin,
    /// The excess threshold band.
    ThresholdMax,
    /// A horizontal gridline.
    Grid,
    /// An axis label.
    Label,
}

impl StyleClass {
    /// The class attribute value for this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "forecast-chart__line",
            Self::Outbound => "forecast-chart__expiries",
            Self::Inbound => "forecast-chart__shipments",
            Self::ThresholdMin => "forecast-chart__thresholds forecast-chart__thresholds--min",
            Self::ThresholdMax => "forecast-chart__thresholds forecast-chart__thresholds--max",
            Self::Grid => "ct-grid",
            Self::Label => "ct-label",
        }
    }
}

impl core::fmt::Display for StyleClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stroke paint and width.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Paints for every mark the chart generates.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    /// Stroke for the series line.
    pub line: StrokeStyle,
    /// Fill for outbound bars.
    pub outbound_fill: Brush,
    /// Fill for inbound bars.
    pub inbound_fill: Brush,
    /// Fill for the minimum band.
    pub threshold_min_fill: Brush,
    /// Fill for the excess band.
    pub threshold_max_fill: Brush,
    /// Stroke for gridlines.
    pub grid: StrokeStyle,
    /// Fill for axis labels.
    pub label_fill: Brush,
    /// Font size for axis labels.
    pub label_font_size: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line: StrokeStyle::solid(css::STEEL_BLUE, 2.0),
            outbound_fill: css::CRIMSON.into(),
            inbound_fill: css::BLACK.into(),
            threshold_min_fill: css::ORANGE.with_alpha(0.2).into(),
            threshold_max_fill: css::RED.with_alpha(0.15).into(),
            grid: StrokeStyle::solid(css::BLACK.with_alpha(40.0 / 255.0), 1.0),
            label_fill: css::DIM_GRAY.into(),
            label_font_size: 10.0,
        }
    }
}

impl ChartStyle {
    /// The fill used for marks tagged with `class`, if that class is filled.
    pub fn fill_for(&self, class: StyleClass) -> Option<&Brush> {
        match class {
            StyleClass::Outbound => Some(&self.outbound_fill),
            StyleClass::Inbound => Some(&self.inbound_fill),
            StyleClass::ThresholdMin => Some(&self.threshold_min_fill),
            StyleClass::ThresholdMax => Some(&self.threshold_max_fill),
            StyleClass::Label => Some(&self.label_fill),
            StyleClass::Line | StyleClass::Grid => None,
        }
    }
}
