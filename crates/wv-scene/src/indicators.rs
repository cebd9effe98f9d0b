#![forbid(unsafe_code)]

//! Read-only indicator values shown next to the view.

use serde::Serialize;
use wv_model::{AngleReadout, InFrustumCountChanged};

/// In-frustum counters and angle readouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Indicators {
    /// Subject points currently inside the wedge.
    pub in_frustum: usize,
    /// Largest count seen since the last [`clear_max`](Self::clear_max).
    pub max_in_frustum: usize,
    /// Wedge width in whole degrees.
    pub alpha_degrees: i32,
    /// View direction in whole degrees, clockwise positive.
    pub beta_degrees: i32,
}

impl Indicators {
    /// Seed the indicators from the model's state at construction.
    #[must_use]
    pub fn new(in_frustum: usize, readout: AngleReadout) -> Self {
        Self {
            in_frustum,
            max_in_frustum: in_frustum,
            alpha_degrees: readout.alpha_degrees,
            beta_degrees: readout.beta_degrees,
        }
    }

    pub fn on_count_changed(&mut self, change: InFrustumCountChanged) {
        self.in_frustum = change.count;
        self.max_in_frustum = self.max_in_frustum.max(change.count);
    }

    pub fn set_readout(&mut self, readout: AngleReadout) {
        self.alpha_degrees = readout.alpha_degrees;
        self.beta_degrees = readout.beta_degrees;
    }

    /// Reset the max counter. It picks up again on the next count change.
    pub fn clear_max(&mut self) {
        self.max_in_frustum = 0;
    }
}
