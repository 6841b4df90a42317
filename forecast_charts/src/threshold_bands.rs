// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold band geometry.

use kurbo::Rect;

use crate::rectangle::Rectangle;
use crate::sample::Thresholds;
use crate::scale::AxisProjector;
use crate::style::StyleClass;

/// The two background bands of a chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdBands {
    /// Values `[0, min]`.
    pub min: Rectangle,
    /// Values `[max, excess]`.
    pub max: Rectangle,
}

impl ThresholdBands {
    /// Computes both bands across the full width of `chart_rect`.
    ///
    /// `chart_rect.x0`/`x1` are the left/right edges and `chart_rect.y1` (the bottom edge) is
    /// the axis origin the projector measures from. Sample data plays no part.
    pub fn new(thresholds: &Thresholds, chart_rect: Rect, projector: &impl AxisProjector) -> Self {
        let band = |lo: f64, hi: f64| {
            Rectangle::spanning_values(
                chart_rect.x0,
                chart_rect.x1,
                lo,
                hi,
                projector,
                chart_rect.y1,
            )
        };
        Self {
            min: band(0.0, thresholds.min()),
            max: band(thresholds.max(), thresholds.excess()),
        }
    }

    /// Both bands with their style tags, lowest band first.
    pub fn tagged(&self) -> [(StyleClass, Rectangle); 2] {
        [
            (StyleClass::ThresholdMin, self.min),
            (StyleClass::ThresholdMax, self.max),
        ]
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn bands_project_from_chart_bottom() {
        let thresholds = Thresholds::new(30.0, 100.0, 125.0).unwrap();
        let rect = Rect::new(0.0, 0.0, 300.0, 400.0);
        let bands = ThresholdBands::new(&thresholds, rect, &|v: f64| v * 3.0);

        assert_eq!(bands.min, Rectangle::from_edges(0.0, 300.0, 400.0, 310.0));
        assert_eq!(bands.max, Rectangle::from_edges(0.0, 300.0, 100.0, 25.0));
    }

    #[test]
    fn tags_are_fixed() {
        let thresholds = Thresholds::new(1.0, 2.0, 3.0).unwrap();
        let rect = Rect::new(10.0, 5.0, 20.0, 50.0);
        let bands = ThresholdBands::new(&thresholds, rect, &|v: f64| v);
        let [(a, _), (b, _)] = bands.tagged();
        assert_eq!(a, StyleClass::ThresholdMin);
        assert_eq!(b, StyleClass::ThresholdMax);
    }
}
