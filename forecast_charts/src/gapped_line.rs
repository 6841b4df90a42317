// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A line path that leaves room for event bars.
//!
//! Every sample with events is split into two vertices: the line enters the sample at the
//! stock level *before* the events (left of the bars) and leaves it at the sample's value
//! (right of the bars). The space between the two is a gap, not a segment, so the bars can
//! be drawn there without the line crossing them.
//!
//! The builder is a left fold over the samples. [`LineState`] is the only thing carried from
//! one sample to the next.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point};

use crate::path::{self, PathOp, VertexRole};
use crate::sample::{Events, PointMeta, ProjectedSample};

/// The last plotted sample, used to estimate pixels per unit of value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Screen y of the sample.
    pub screen_y: f64,
    /// Data value of the sample.
    pub value: f64,
}

/// State threaded through the fold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineState {
    /// The most recent sample that had a value. Holes do not clear it.
    pub previous: Option<Anchor>,
    /// Whether the next vertex must start a new subpath.
    pub in_hole: bool,
}

impl Default for LineState {
    fn default() -> Self {
        Self {
            previous: None,
            in_hole: true,
        }
    }
}

impl LineState {
    /// Local pixels-per-unit slope between the previous anchor and `(screen_y, value)`.
    ///
    /// Returns `0` without a previous anchor, for equal values, and for non-finite results.
    /// An anchor at value `0` or at screen y `0` counts as no anchor.
    pub fn y_factor(&self, screen_y: f64, value: f64) -> f64 {
        let Some(prev) = self.previous.filter(|p| p.value != 0.0 && p.screen_y != 0.0) else {
            return 0.0;
        };
        let dv = value - prev.value;
        if dv == 0.0 {
            return 0.0;
        }
        let factor = (screen_y - prev.screen_y) / dv;
        if factor.is_finite() { factor } else { 0.0 }
    }
}

/// Output of [`GappedLineBuilder::build`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GappedLine {
    /// Path steps in sample order.
    pub ops: Vec<PathOp>,
    /// Fold state after the last sample.
    pub state: LineState,
}

impl GappedLine {
    /// Converts the steps into a strokable path.
    pub fn to_bez_path(&self) -> BezPath {
        path::to_bez_path(&self.ops)
    }
}

/// Builds gapped line paths for a fixed bar width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GappedLineBuilder {
    bar_width: f64,
}

impl GappedLineBuilder {
    /// Creates a builder. Negative or non-finite widths are treated as `0`.
    pub fn new(bar_width: f64) -> Self {
        let bar_width = if bar_width.is_finite() {
            bar_width.max(0.0)
        } else {
            0.0
        };
        Self { bar_width }
    }

    /// The width of one event bar.
    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    /// Half the horizontal room needed for the bars of `events`.
    pub fn x_offset(&self, events: &Events) -> f64 {
        let mut room = 0.0;
        if events.inbound() != 0.0 {
            room += self.bar_width;
        }
        if events.outbound() != 0.0 {
            room += self.bar_width;
        }
        room / 2.0
    }

    /// Builds the path for one series.
    pub fn build(&self, samples: &[ProjectedSample]) -> GappedLine {
        let (ops, state) = samples.iter().fold(
            (Vec::with_capacity(samples.len()), LineState::default()),
            |(mut ops, state), sample| {
                let state = self.step(state, sample, &mut ops);
                (ops, state)
            },
        );
        log::debug!(
            "gapped line: {} samples -> {} path ops",
            samples.len(),
            ops.len()
        );
        GappedLine { ops, state }
    }

    /// Processes one sample, appending its steps to `out` and returning the next state.
    pub fn step(
        &self,
        state: LineState,
        sample: &ProjectedSample,
        out: &mut Vec<PathOp>,
    ) -> LineState {
        let Some(value) = sample.sample.value else {
            return LineState {
                in_hole: true,
                ..state
            };
        };
        let events = sample.sample.events;
        let Point { x, y } = sample.pos;

        let y_offset = events.net() * state.y_factor(y, value);
        let x_offset = self.x_offset(&events);

        let meta = PointMeta {
            index: sample.index,
            value,
            events,
        };
        let role = if x_offset > 0.0 {
            VertexRole::PreEvent
        } else {
            VertexRole::Plain(meta)
        };
        let point = Point::new(x - x_offset, y - y_offset);
        let first = if state.in_hole {
            PathOp::Move { point, role }
        } else {
            PathOp::Line { point, role }
        };
        log::trace!("sample {}: {first:?}", sample.index);
        out.push(first);

        if x_offset != 0.0 {
            let exit = PathOp::Move {
                point: Point::new(x + x_offset, y),
                role: VertexRole::PostEvent(meta),
            };
            log::trace!("sample {}: {exit:?}", sample.index);
            out.push(exit);
        }

        LineState {
            previous: Some(Anchor { screen_y: y, value }),
            in_hole: false,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::sample::Sample;

    fn projected(samples: &[(Sample, (f64, f64))]) -> Vec<ProjectedSample> {
        samples
            .iter()
            .enumerate()
            .map(|(i, (s, pos))| ProjectedSample::new(i, *s, *pos))
            .collect()
    }

    fn assert_point_close(a: Point, b: Point) {
        let eps = 1e-9;
        assert!((a.x - b.x).abs() <= eps, "x {a:?} != {b:?}");
        assert!((a.y - b.y).abs() <= eps, "y {a:?} != {b:?}");
    }

    #[test]
    fn plain_series_degenerates_to_polyline() {
        let input = projected(&[
            (Sample::new(1.0), (0.0, 10.0)),
            (Sample::new(2.0), (5.0, 8.0)),
            (Sample::new(4.0), (10.0, 4.0)),
        ]);
        let line = GappedLineBuilder::new(20.0).build(&input);

        assert_eq!(line.ops.len(), 3);
        assert!(matches!(line.ops[0], PathOp::Move { .. }));
        for (op, s) in line.ops.iter().zip(&input) {
            assert_eq!(op.point(), s.pos, "no offsets without events");
            assert!(matches!(op.role(), VertexRole::Plain(m) if m.index == s.index));
        }
        assert!(line.ops[1..].iter().all(|op| matches!(op, PathOp::Line { .. })));
    }

    #[test]
    fn event_sample_splits_into_entry_and_exit() {
        let input = projected(&[
            (Sample::new(120.0), (0.0, 80.0)),
            (
                Sample::new(150.0).with_events(Events::new(20.0, 40.0)),
                (10.0, 70.0),
            ),
            (Sample::new(50.0), (20.0, 95.0)),
        ]);
        let line = GappedLineBuilder::new(20.0).build(&input);
        assert_eq!(line.ops.len(), 4);

        assert!(matches!(line.ops[0], PathOp::Move { .. }));
        assert_point_close(line.ops[0].point(), Point::new(0.0, 80.0));

        let y_offset = (40.0 - 20.0) * ((70.0 - 80.0) / (150.0 - 120.0));
        assert!(matches!(
            line.ops[1],
            PathOp::Line {
                role: VertexRole::PreEvent,
                ..
            }
        ));
        assert_point_close(line.ops[1].point(), Point::new(10.0 - 20.0, 70.0 - y_offset));

        match line.ops[2] {
            PathOp::Move {
                point,
                role: VertexRole::PostEvent(meta),
            } => {
                assert_point_close(point, Point::new(30.0, 70.0));
                assert_eq!(meta.index, 1);
                assert_eq!(meta.value, 150.0);
                assert_eq!(meta.events, Events::new(20.0, 40.0));
            }
            other => panic!("expected post-event move, got {other:?}"),
        }

        assert!(matches!(line.ops[3], PathOp::Line { .. }));
        assert_point_close(line.ops[3].point(), Point::new(20.0, 95.0));
    }

    #[test]
    fn single_direction_uses_half_bar_offset() {
        let b = GappedLineBuilder::new(20.0);
        assert_eq!(b.x_offset(&Events::new(0.0, 5.0)), 10.0);
        assert_eq!(b.x_offset(&Events::new(5.0, 0.0)), 10.0);
        assert_eq!(b.x_offset(&Events::new(5.0, 5.0)), 20.0);
        assert_eq!(b.x_offset(&Events::NONE), 0.0);
    }

    #[test]
    fn holes_restart_with_move() {
        let input = projected(&[
            (Sample::hole(), (0.0, 0.0)),
            (Sample::new(3.0), (10.0, 30.0)),
            (Sample::hole(), (20.0, 0.0)),
            (Sample::new(4.0), (30.0, 20.0)),
            (Sample::new(5.0), (40.0, 10.0)),
        ]);
        let line = GappedLineBuilder::new(20.0).build(&input);

        assert_eq!(line.ops.len(), 3);
        assert!(matches!(line.ops[0], PathOp::Move { .. }), "leading hole");
        assert!(matches!(line.ops[1], PathOp::Move { .. }), "hole in the middle");
        assert!(matches!(line.ops[2], PathOp::Line { .. }));
        assert!(!line.state.in_hole);
    }

    #[test]
    fn line_never_directly_follows_a_hole() {
        let input = projected(&[
            (Sample::new(3.0), (0.0, 30.0)),
            (Sample::hole(), (10.0, 0.0)),
            (
                Sample::new(4.0).with_events(Events::new(1.0, 0.0)),
                (20.0, 20.0),
            ),
            (Sample::hole(), (30.0, 0.0)),
            (Sample::hole(), (40.0, 0.0)),
            (Sample::new(2.0), (50.0, 40.0)),
        ]);
        let line = GappedLineBuilder::new(10.0).build(&input);
        let kinds: Vec<bool> = line.ops.iter().map(PathOp::is_hole).collect();
        assert_eq!(kinds, vec![true, true, true, true]);
    }

    #[test]
    fn slope_across_hole_uses_last_plotted_sample() {
        let input = projected(&[
            (Sample::new(10.0), (0.0, 100.0)),
            (Sample::hole(), (10.0, 0.0)),
            (
                Sample::new(20.0).with_events(Events::new(0.0, 5.0)),
                (20.0, 50.0),
            ),
        ]);
        let line = GappedLineBuilder::new(10.0).build(&input);
        // Slope (50 - 100) / (20 - 10) = -5 px per unit; net +5 units.
        assert_point_close(line.ops[1].point(), Point::new(15.0, 75.0));
        assert!(line.ops[1].is_hole(), "entry after a hole is still a move");
    }

    #[test]
    fn equal_values_do_not_divide_by_zero() {
        let input = projected(&[
            (Sample::new(10.0), (0.0, 50.0)),
            (
                Sample::new(10.0).with_events(Events::new(3.0, 0.0)),
                (10.0, 50.0),
            ),
        ]);
        let line = GappedLineBuilder::new(10.0).build(&input);
        let entry = line.ops[1].point();
        assert!(entry.y.is_finite());
        assert_eq!(entry, Point::new(5.0, 50.0));
    }

    #[test]
    fn zero_anchor_has_no_slope() {
        let input = projected(&[
            (Sample::new(0.0), (0.0, 100.0)),
            (
                Sample::new(10.0).with_events(Events::new(0.0, 5.0)),
                (10.0, 50.0),
            ),
        ]);
        let line = GappedLineBuilder::new(10.0).build(&input);
        assert_eq!(line.ops[1].point(), Point::new(5.0, 50.0));

        let at_top = LineState {
            previous: Some(Anchor {
                screen_y: 0.0,
                value: 40.0,
            }),
            in_hole: false,
        };
        assert_eq!(at_top.y_factor(30.0, 30.0), 0.0);
    }

    #[test]
    fn first_point_has_no_slope() {
        let input = projected(&[(
            Sample::new(10.0).with_events(Events::new(3.0, 8.0)),
            (10.0, 50.0),
        )]);
        let line = GappedLineBuilder::new(10.0).build(&input);
        assert_eq!(line.ops[0].point(), Point::new(0.0, 50.0));
        assert_eq!(line.ops[1].point(), Point::new(20.0, 50.0));
    }

    #[test]
    fn build_is_deterministic() {
        let input = projected(&[
            (Sample::new(5.0), (0.0, 10.0)),
            (
                Sample::new(7.0).with_events(Events::new(1.0, 2.0)),
                (10.0, 6.0),
            ),
        ]);
        let b = GappedLineBuilder::new(12.0);
        assert_eq!(b.build(&input), b.build(&input));
    }

    #[test]
    fn invalid_bar_width_is_zero() {
        assert_eq!(GappedLineBuilder::new(-4.0).bar_width(), 0.0);
        assert_eq!(GappedLineBuilder::new(f64::NAN).bar_width(), 0.0);
    }
}
