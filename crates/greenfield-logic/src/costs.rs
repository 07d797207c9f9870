//! Lump costs paid when a project advances into a new stage.

use serde::{Deserialize, Serialize};

use crate::stages::Stage;
use crate::technology::Technology;

/// Grid deposit per kW of connection capacity.
pub const GRID_DEPOSIT_PER_KW: f64 = 30.0;
/// Upper bound on the grid deposit.
pub const GRID_DEPOSIT_CAP: f64 = 3_000_000.0;
pub const GRID_CONNECTION_FEE: f64 = 30_000.0;
pub const ZONING_MINIMUM: f64 = 50_000.0;

/// Itemized transition cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCost {
    pub items: Vec<(String, f64)>,
}

impl StageCost {
    pub fn total(&self) -> f64 {
        self.items.iter().map(|(_, c)| c).sum()
    }

    /// Scale every line item (global build-cost events).
    pub fn scaled(mut self, factor: f64) -> Self {
        for (_, c) in &mut self.items {
            *c *= factor;
        }
        self
    }
}

fn environmental_testing(technology: Technology) -> f64 {
    technology
        .components()
        .iter()
        .map(|t| match t {
            Technology::Wind => 40_000.0,
            Technology::Pv => 15_000.0,
            _ => 10_000.0,
        })
        .sum()
}

fn resource_measurement(technology: Technology) -> f64 {
    technology
        .components()
        .iter()
        .map(|t| match t {
            Technology::Wind => 60_000.0,
            Technology::Pv => 5_000.0,
            _ => 0.0,
        })
        .sum()
}

/// Cost of moving into `target`. Land Acquisition is never a target.
pub fn transition_cost(target: Stage, technology: Technology, power_mw: f64) -> StageCost {
    let items = match target {
        Stage::LandAcquisition => Vec::new(),
        Stage::EnvironmentalDecision => vec![
            ("Due diligence".to_string(), 20_000.0 + 500.0 * power_mw),
            ("Environmental testing".to_string(), environmental_testing(technology)),
            ("Resource measurement".to_string(), resource_measurement(technology)),
        ],
        Stage::ZoningConditions => vec![(
            "Zoning application".to_string(),
            ZONING_MINIMUM.max(800.0 * power_mw),
        )],
        Stage::GridConnection => {
            let deposit = (power_mw * 1000.0 * GRID_DEPOSIT_PER_KW).min(GRID_DEPOSIT_CAP);
            vec![
                ("Connection fee".to_string(), GRID_CONNECTION_FEE),
                ("Grid deposit".to_string(), deposit),
            ]
        }
        Stage::ReadyToBuild => vec![
            ("Environmental impact report".to_string(), 80_000.0),
            ("Building permit".to_string(), 1_200.0 * power_mw),
            ("Grid line".to_string(), 2_000.0 * power_mw),
        ],
    };
    StageCost { items }
}
