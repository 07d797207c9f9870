//! Illegal shortcuts a company can take on a project.
//!
//! Every method marks the project as using illegal methods (boosting its
//! progress, see [`crate::progress::illegal_method_multiplier`]) and leaves
//! a trace in the company's action history that the audit model reads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IllegalMethod {
    /// Pay off an official. The amount counts toward total bribes.
    Bribery,
    DocumentForgery,
    OfficialPressure,
    /// Buy a leaked land-registry database (+20% lessor output).
    IllegalDatabase,
}

impl IllegalMethod {
    pub const ALL: [IllegalMethod; 4] = [
        IllegalMethod::Bribery,
        IllegalMethod::DocumentForgery,
        IllegalMethod::OfficialPressure,
        IllegalMethod::IllegalDatabase,
    ];

    pub fn cost(self) -> f64 {
        match self {
            IllegalMethod::Bribery => 50_000.0,
            IllegalMethod::DocumentForgery => 30_000.0,
            IllegalMethod::OfficialPressure => 20_000.0,
            IllegalMethod::IllegalDatabase => 80_000.0,
        }
    }

    /// Growth of the corruption network (0–100 scale).
    pub fn network_gain(self) -> f64 {
        match self {
            IllegalMethod::Bribery => 10.0,
            IllegalMethod::DocumentForgery => 5.0,
            IllegalMethod::OfficialPressure => 8.0,
            IllegalMethod::IllegalDatabase => 3.0,
        }
    }

    /// Growth of audit risk (0–100 scale).
    pub fn risk_gain(self) -> f64 {
        match self {
            IllegalMethod::Bribery => 15.0,
            IllegalMethod::DocumentForgery => 20.0,
            IllegalMethod::OfficialPressure => 10.0,
            IllegalMethod::IllegalDatabase => 12.0,
        }
    }

    pub fn counts_as_bribe(self) -> bool {
        self == IllegalMethod::Bribery
    }
}

/// Add `gain` to a 0–100 gauge.
pub fn raise_gauge(value: f64, gain: f64) -> f64 {
    (value + gain).clamp(0.0, 100.0)
}
