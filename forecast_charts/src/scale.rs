// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny scale utilities.
//!
//! The geometry builders only see scales through [`AxisProjector`], which reports how far a
//! value lies from the axis origin. Everything else here exists so the chart layer can build
//! those projectors from data.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Maps a data value to a pixel distance from the axis origin.
///
/// For the y axis the origin is the bottom edge of the chart rectangle, so the screen
/// coordinate of `v` is `y1 - project_value(v)`.
pub trait AxisProjector {
    /// Returns the distance of `value` from the axis origin, in pixels.
    fn project_value(&self, value: f64) -> f64;
}

impl<F> AxisProjector for F
where
    F: Fn(f64) -> f64,
{
    fn project_value(&self, value: f64) -> f64 {
        self(value)
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to "nice" the domain based on tick generation.
    pub nice: bool,
    /// A value the domain is always stretched to include (typically `0`).
    pub reference_value: Option<f64>,
    /// Restricts tick steps to whole numbers.
    pub only_integer: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }

    /// Returns “nice-ish” tick values for the domain, restricted to integers when
    /// `only_integer` is set.
    pub fn ticks_with(&self, count: usize, only_integer: bool) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count, only_integer)
    }
}

impl AxisProjector for ScaleLinear {
    /// Signed distance from the range start, positive towards the range end.
    fn project_value(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        let d = self.map(value) - r0;
        if r1 < r0 { -d } else { d }
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
            reference_value: None,
            only_integer: false,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Sets a value the domain must always include.
    pub fn with_reference_value(mut self, reference_value: Option<f64>) -> Self {
        self.reference_value = reference_value;
        self
    }

    /// Restricts tick steps to whole numbers.
    pub fn with_only_integer(mut self, only_integer: bool) -> Self {
        self.only_integer = only_integer;
        self
    }

    /// Returns the effective domain after applying the reference value and `nice`.
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        let (mut lo, mut hi) = self.domain;
        if let Some(r) = self.reference_value.filter(|r| r.is_finite()) {
            lo = lo.min(r);
            hi = hi.max(r);
        }
        if !self.nice {
            return (lo, hi);
        }
        let ticks = nice_ticks(lo, hi, tick_count, self.only_integer);
        match (ticks.first(), ticks.last()) {
            (Some(&first), Some(&last)) if ticks.len() >= 2 => (first, last),
            _ => (lo, hi),
        }
    }

    /// Instantiates a concrete scale using the `resolved_domain`.
    pub fn instantiate_resolved(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize, only_integer: bool) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let mut step = nice_step(step0);
    if only_integer && step > 0.0 {
        step = step.max(1.0).round();
    }
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A discrete point scale: evenly spaced positions for category indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePoint {
    range: (f64, f64),
    count: usize,
    padding: f64,
}

impl ScalePoint {
    /// Creates a new point scale.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding: 0.5,
        }
    }

    /// Sets the outer padding in point steps.
    ///
    /// A padding of `0` puts the first point on the range start and the last on the range end.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Returns the number of points.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the distance between adjacent points.
    pub fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        if n <= 1.0 {
            return 0.0;
        }
        let span = (r1 - r0).abs();
        let denom = (n - 1.0) + 2.0 * self.padding;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the x-position for a point at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let step = self.step();
        let start = if r1 >= r0 { r0 } else { r1 };
        start + self.padding * step + step * index as f64
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn point_scale_positions_are_monotonic() {
        let scale = ScalePoint::new((0.0, 100.0), 5);
        let a = scale.x(0);
        let b = scale.x(1);
        let c = scale.x(2);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn point_scale_without_padding_spans_full_range() {
        let scale = ScalePoint::new((50.0, 350.0), 4).with_padding(0.0);
        assert_eq!(scale.x(0), 50.0);
        assert_eq!(scale.x(3), 350.0);
        assert_eq!(scale.step(), 100.0);
    }

    #[test]
    fn linear_projection_is_distance_from_range_start() {
        // A y scale: value 0 at the bottom (y=400), value 100 at the top (y=100).
        let s = ScaleLinear::new((0.0, 100.0), (400.0, 100.0));
        assert_eq!(s.project_value(0.0), 0.0);
        assert_eq!(s.project_value(50.0), 150.0);
        assert_eq!(400.0 - s.project_value(100.0), 100.0);
    }

    #[test]
    fn projection_below_domain_is_negative() {
        let s = ScaleLinear::new((0.0, 100.0), (400.0, 100.0));
        assert_eq!(s.project_value(-10.0), -30.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let s = ScaleLinear::new((5.0, 5.0), (10.0, 20.0));
        assert_eq!(s.map(7.0), 10.0);
        assert_eq!(s.project_value(7.0), 0.0);
    }

    #[test]
    fn resolved_domain_includes_reference_value() {
        let spec = ScaleLinearSpec::new((40.0, 150.0))
            .with_reference_value(Some(0.0))
            .with_nice(true)
            .with_only_integer(true);
        let (lo, hi) = spec.resolved_domain(5);
        assert_eq!(lo, 0.0);
        assert!(hi >= 150.0, "domain {hi} should cover the data");
    }

    #[test]
    fn integer_ticks_never_step_below_one() {
        let s = ScaleLinear::new((0.0, 3.0), (0.0, 100.0));
        let ticks = s.ticks_with(10, true);
        assert_eq!(ticks, alloc::vec![0.0, 1.0, 2.0, 3.0]);
        assert!(s.ticks_with(10, false).len() > 4, "fractional ticks are allowed otherwise");
    }

    #[test]
    fn closures_are_projectors() {
        let p = |v: f64| v * 3.0;
        assert_eq!(p.project_value(30.0), 90.0);
    }
}
