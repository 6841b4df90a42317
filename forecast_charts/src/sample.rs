// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input data model: samples, their event quantities, and chart thresholds.

use kurbo::Point;

use crate::error::{ChartError, ThresholdKind};

/// Event quantities attached to a sample.
///
/// Quantities are never negative: [`Events::new`] clamps negative or non-finite inputs to `0`.
/// Use [`Events::try_new`] to reject them instead.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawEvents")
)]
pub struct Events {
    #[cfg_attr(feature = "serde", serde(rename = "expiries"))]
    outbound: f64,
    #[cfg_attr(feature = "serde", serde(rename = "shipments"))]
    inbound: f64,
}

impl Events {
    /// No events.
    pub const NONE: Self = Self {
        outbound: 0.0,
        inbound: 0.0,
    };

    /// Creates event quantities, clamping invalid values to `0`.
    pub fn new(outbound: f64, inbound: f64) -> Self {
        Self {
            outbound: clamp_quantity(outbound),
            inbound: clamp_quantity(inbound),
        }
    }

    /// Creates event quantities, rejecting negative or non-finite values.
    pub fn try_new(outbound: f64, inbound: f64) -> Result<Self, ChartError> {
        for value in [outbound, inbound] {
            if !is_valid_quantity(value) {
                return Err(ChartError::InvalidEventQuantity { value });
            }
        }
        Ok(Self { outbound, inbound })
    }

    /// Outbound quantity (stock leaving, e.g. expiries).
    pub fn outbound(&self) -> f64 {
        self.outbound
    }

    /// Inbound quantity (stock arriving, e.g. shipments).
    pub fn inbound(&self) -> f64 {
        self.inbound
    }

    /// Net stock change caused by the events: `inbound - outbound`.
    pub fn net(&self) -> f64 {
        self.inbound - self.outbound
    }

    /// Returns `true` if neither direction carries a quantity.
    pub fn is_empty(&self) -> bool {
        self.outbound == 0.0 && self.inbound == 0.0
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawEvents {
    #[serde(default)]
    expiries: f64,
    #[serde(default)]
    shipments: f64,
}

#[cfg(feature = "serde")]
impl From<RawEvents> for Events {
    fn from(raw: RawEvents) -> Self {
        Self::new(raw.expiries, raw.shipments)
    }
}

fn is_valid_quantity(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn clamp_quantity(value: f64) -> f64 {
    if is_valid_quantity(value) {
        value
    } else {
        log::warn!("clamping invalid event quantity {value} to 0");
        0.0
    }
}

/// One chronological observation in a series.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Stock level, or `None` for a hole in the data.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: Option<f64>,
    /// Events that happened at this sample.
    #[cfg_attr(feature = "serde", serde(rename = "meta", default))]
    pub events: Events,
}

impl Sample {
    /// A sample with a value and no events.
    pub fn new(value: f64) -> Self {
        Self {
            value: Some(value),
            events: Events::NONE,
        }
    }

    /// A missing observation.
    pub fn hole() -> Self {
        Self {
            value: None,
            events: Events::NONE,
        }
    }

    /// Sets the events for this sample.
    pub fn with_events(mut self, events: Events) -> Self {
        self.events = events;
        self
    }

    /// Returns `true` if this sample has no value.
    pub fn is_hole(&self) -> bool {
        self.value.is_none()
    }
}

/// A sample together with its screen position.
///
/// Positions are supplied by whoever owns the axes; the geometry builders never scale values
/// themselves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedSample {
    /// Index of the sample in its series.
    pub index: usize,
    /// The data.
    pub sample: Sample,
    /// Screen-space position of the sample's value.
    pub pos: Point,
}

impl ProjectedSample {
    /// Pairs a sample with its screen position.
    pub fn new(index: usize, sample: Sample, pos: impl Into<Point>) -> Self {
        Self {
            index,
            sample,
            pos: pos.into(),
        }
    }
}

/// Sample metadata carried on path vertices, so marker replacement can find its sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMeta {
    /// Index of the sample in its series.
    pub index: usize,
    /// The sample's value.
    pub value: f64,
    /// The sample's events.
    pub events: Events,
}

/// The threshold bands drawn behind the series.
///
/// Always satisfies `0 <= min <= max <= excess`, with every bound finite.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawThresholds")
)]
pub struct Thresholds {
    min: f64,
    max: f64,
    excess: f64,
}

impl Thresholds {
    /// Validates and creates thresholds.
    pub fn new(min: f64, max: f64, excess: f64) -> Result<Self, ChartError> {
        for (kind, value) in [
            (ThresholdKind::Min, min),
            (ThresholdKind::Max, max),
            (ThresholdKind::Excess, excess),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidThreshold { kind, value });
            }
        }
        if min > max || max > excess {
            return Err(ChartError::UnorderedThresholds { min, max, excess });
        }
        Ok(Self { min, max, excess })
    }

    /// Upper bound of the minimum band (which starts at `0`).
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Lower bound of the excess band.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Upper bound of the excess band.
    pub fn excess(&self) -> f64 {
        self.excess
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawThresholds {
    min: f64,
    max: f64,
    excess: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawThresholds> for Thresholds {
    type Error = ChartError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max, raw.excess)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn events_clamp_invalid_quantities() {
        let e = Events::new(-5.0, f64::NAN);
        assert_eq!(e, Events::NONE);
        assert!(e.is_empty());

        let e = Events::new(20.0, 40.0);
        assert_eq!(e.net(), 20.0);
        assert!(!e.is_empty());
    }

    #[test]
    fn events_try_new_rejects_negative() {
        assert_eq!(
            Events::try_new(1.0, -2.0),
            Err(ChartError::InvalidEventQuantity { value: -2.0 })
        );
        assert!(Events::try_new(0.0, 3.0).is_ok(), "zero is a valid quantity");
    }

    #[test]
    fn thresholds_validate_sign_and_order() {
        assert!(Thresholds::new(30.0, 100.0, 125.0).is_ok());
        assert_eq!(
            Thresholds::new(30.0, f64::INFINITY, 125.0),
            Err(ChartError::InvalidThreshold {
                kind: ThresholdKind::Max,
                value: f64::INFINITY,
            })
        );
        assert!(matches!(
            Thresholds::new(-1.0, 100.0, 125.0),
            Err(ChartError::InvalidThreshold {
                kind: ThresholdKind::Min,
                ..
            })
        ));
        assert!(matches!(
            Thresholds::new(30.0, 130.0, 125.0),
            Err(ChartError::UnorderedThresholds { .. })
        ));
    }
}
