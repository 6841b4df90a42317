// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input validation errors.

/// Which threshold a [`ChartError::InvalidThreshold`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThresholdKind {
    /// Upper bound of the minimum band.
    Min,
    /// Lower bound of the excess band.
    Max,
    /// Upper bound of the excess band.
    Excess,
}

impl core::fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Excess => "excess",
        })
    }
}

/// Errors returned when chart inputs are rejected at construction time.
///
/// Geometry builders never fail; only the validating constructors for
/// [`Thresholds`](crate::Thresholds) and [`Events::try_new`](crate::Events::try_new) return
/// these.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// A threshold was negative or not finite.
    #[error("invalid {kind} threshold: {value}")]
    InvalidThreshold {
        /// The offending threshold.
        kind: ThresholdKind,
        /// The rejected value.
        value: f64,
    },
    /// Thresholds are not ordered as `min <= max <= excess`.
    #[error("thresholds must satisfy min <= max <= excess (got {min}, {max}, {excess})")]
    UnorderedThresholds {
        /// Upper bound of the minimum band.
        min: f64,
        /// Lower bound of the excess band.
        max: f64,
        /// Upper bound of the excess band.
        excess: f64,
    },
    /// An event quantity was negative or not finite.
    #[error("invalid event quantity: {value}")]
    InvalidEventQuantity {
        /// The rejected quantity.
        value: f64,
    },
}
