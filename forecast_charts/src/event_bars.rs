// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event bar geometry.
//!
//! Event bars replace the point marker of a sample with events. They are anchored on the
//! sample's post-event vertex and fill the gap the gapped line left for them:
//!
//! ```text
//!   line in ─┐
//!            │ outbound │          │
//!            └──────────┤ inbound  ├─ line out
//!                       └──────────┘
//! ```
//!
//! The outbound bar starts where the line arrives (the stock before the events) and drops by
//! the outbound quantity; the inbound bar rises from that level back to the sample's value.

use smallvec::SmallVec;

use crate::path::{PathOp, VertexRole};
use crate::rectangle::Rectangle;
use crate::sample::Events;
use crate::scale::AxisProjector;
use crate::style::StyleClass;

/// Which way an event moves stock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventDirection {
    /// Stock leaving (expiries).
    Outbound,
    /// Stock arriving (shipments).
    Inbound,
}

impl EventDirection {
    /// The style tag for bars of this direction.
    pub fn class(self) -> StyleClass {
        match self {
            Self::Outbound => StyleClass::Outbound,
            Self::Inbound => StyleClass::Inbound,
        }
    }
}

/// One bar shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventBar {
    /// Direction of the event this bar shows.
    pub direction: EventDirection,
    /// Bar corners in screen space.
    pub rect: Rectangle,
}

/// Bars for one sample, at most one per direction.
pub type EventBars = SmallVec<[EventBar; 2]>;

/// What to do with the point marker of a path vertex.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerAction {
    /// Drop the marker; draw nothing in its place.
    Remove,
    /// Drop the marker and draw these bars instead.
    Replace(EventBars),
}

impl MarkerAction {
    /// The replacement bars (empty for [`MarkerAction::Remove`]).
    pub fn bars(&self) -> &[EventBar] {
        match self {
            Self::Remove => &[],
            Self::Replace(bars) => bars,
        }
    }
}

/// Value-space bounds of the stacked bars for one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventStack {
    /// Stock level before any event (where the line arrives).
    pub outbound_top: f64,
    /// Stock level after the outbound events.
    pub outbound_bottom: f64,
    /// Equal to `outbound_bottom`: the inbound bar starts where the outbound bar ends.
    pub inbound_bottom: f64,
    /// Stock level after all events (the sample's value).
    pub inbound_top: f64,
}

impl EventStack {
    /// Computes the stack for a sample whose value after the events is `stock`.
    pub fn new(stock: f64, events: &Events) -> Self {
        let stock_diff = events.outbound() - events.inbound();
        let outbound_top = stock + stock_diff;
        let outbound_bottom = outbound_top - events.outbound();
        Self {
            outbound_top,
            outbound_bottom,
            inbound_bottom: outbound_bottom,
            inbound_top: stock,
        }
    }
}

/// Builds event bars for a fixed bar width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventBarGeometry {
    bar_width: f64,
}

impl EventBarGeometry {
    /// Creates the geometry builder. Negative or non-finite widths are treated as `0`.
    pub fn new(bar_width: f64) -> Self {
        let bar_width = if bar_width.is_finite() {
            bar_width.max(0.0)
        } else {
            0.0
        };
        Self { bar_width }
    }

    /// Computes the bars for a sample anchored at `anchor_x`.
    ///
    /// `stock` is the sample's value and `base_y` the screen y of the axis origin; screen y of
    /// a value `v` is `base_y - projector.project_value(v)`.
    pub fn bars(
        &self,
        anchor_x: f64,
        stock: f64,
        events: &Events,
        projector: &impl AxisProjector,
        base_y: f64,
    ) -> MarkerAction {
        if events.is_empty() {
            return MarkerAction::Remove;
        }

        let w = self.bar_width;
        let stack = EventStack::new(stock, events);
        let has_inbound = events.inbound() != 0.0;
        let mut bars = EventBars::new();

        if events.outbound() != 0.0 {
            // Leave a notch to the right for the inbound bar.
            let (left, right) = if has_inbound {
                (anchor_x - 2.0 * w, anchor_x - w)
            } else {
                (anchor_x - w, anchor_x)
            };
            bars.push(EventBar {
                direction: EventDirection::Outbound,
                rect: Rectangle::spanning_values(
                    left,
                    right,
                    stack.outbound_top,
                    stack.outbound_bottom,
                    projector,
                    base_y,
                ),
            });
        }

        if has_inbound {
            bars.push(EventBar {
                direction: EventDirection::Inbound,
                rect: Rectangle::spanning_values(
                    anchor_x - w,
                    anchor_x,
                    stack.inbound_top,
                    stack.inbound_bottom,
                    projector,
                    base_y,
                ),
            });
        }

        log::trace!("{} event bar(s) anchored at x={anchor_x}", bars.len());
        MarkerAction::Replace(bars)
    }

    /// Decides the marker for a path vertex produced by the gapped-line builder.
    ///
    /// Entry vertices and vertices without events lose their marker; exit vertices get bars.
    pub fn marker_for(
        &self,
        op: &PathOp,
        projector: &impl AxisProjector,
        base_y: f64,
    ) -> MarkerAction {
        match op.role() {
            VertexRole::PreEvent => MarkerAction::Remove,
            VertexRole::Plain(meta) | VertexRole::PostEvent(meta) => {
                self.bars(op.point().x, meta.value, &meta.events, projector, base_y)
            }
        }
    }
}
