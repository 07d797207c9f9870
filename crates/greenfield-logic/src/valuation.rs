//! Market valuation of a development project.
//!
//! ```text
//! value = power × 150 000
//!       × stage multiplier (blended with in-stage progress)
//!       × technology multiplier (base × global market × technology events)
//!       × power multiplier      (1 + min(power, 100)/100 × 0.2)
//!       × location multiplier   (region-scoped events)
//!       × quality multiplier    (1 + developer skill / 20)
//!       × random event multiplier
//! ```

use serde::{Deserialize, Serialize};

use crate::stages::{blended_value_multiplier, Stage};
use crate::technology::Technology;

pub const VALUE_PER_MW: f64 = 150_000.0;
/// Power beyond this adds no further size premium.
pub const POWER_PREMIUM_CAP_MW: f64 = 100.0;

/// Inputs for one valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationInput {
    pub power_mw: f64,
    pub stage: Stage,
    pub progress: f64,
    pub technology: Technology,
    /// Product of unscoped market modifiers.
    pub global_market_modifier: f64,
    /// Product of technology-scoped market modifiers.
    pub technology_modifier: f64,
    /// Product of region-scoped market modifiers.
    pub location_modifier: f64,
    pub developer_skill: Option<f64>,
    pub random_event_multiplier: f64,
}

/// Individual factors of a valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub base: f64,
    pub stage: f64,
    pub technology: f64,
    pub power: f64,
    pub location: f64,
    pub quality: f64,
    pub random_event: f64,
    pub value: f64,
}

pub fn power_multiplier(power_mw: f64) -> f64 {
    1.0 + (power_mw.clamp(0.0, POWER_PREMIUM_CAP_MW) / 100.0) * 0.2
}

pub fn quality_multiplier(developer_skill: Option<f64>) -> f64 {
    developer_skill.map_or(1.0, |s| 1.0 + s / 20.0)
}

pub fn technology_multiplier(technology: Technology, global_market: f64, technology_modifier: f64) -> f64 {
    technology.base_value_multiplier() * global_market * technology_modifier
}

pub fn market_value(input: &ValuationInput) -> Valuation {
    let base = input.power_mw * VALUE_PER_MW;
    let stage = blended_value_multiplier(input.stage, input.progress);
    let technology = technology_multiplier(
        input.technology,
        input.global_market_modifier,
        input.technology_modifier,
    );
    let power = power_multiplier(input.power_mw);
    let quality = quality_multiplier(input.developer_skill);
    let value = base
        * stage
        * technology
        * power
        * input.location_modifier
        * quality
        * input.random_event_multiplier;

    Valuation {
        base,
        stage,
        technology,
        power,
        location: input.location_modifier,
        quality,
        random_event: input.random_event_multiplier,
        value: value.max(0.0),
    }
}

/// Transient market shocks that can hit a single valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketShock {
    InvestorPanic,
    GridCongestionReport,
    RegulatoryRumor,
    FinancingSqueeze,
    BidderWar,
    StrategicBuyer,
}

impl MarketShock {
    pub const NEGATIVE: [MarketShock; 4] = [
        MarketShock::InvestorPanic,
        MarketShock::GridCongestionReport,
        MarketShock::RegulatoryRumor,
        MarketShock::FinancingSqueeze,
    ];
    pub const POSITIVE: [MarketShock; 2] = [MarketShock::BidderWar, MarketShock::StrategicBuyer];

    pub fn multiplier(self) -> f64 {
        match self {
            MarketShock::InvestorPanic => 0.8,
            MarketShock::GridCongestionReport => 0.85,
            MarketShock::RegulatoryRumor => 0.9,
            MarketShock::FinancingSqueeze => 0.88,
            MarketShock::BidderWar => 1.2,
            MarketShock::StrategicBuyer => 1.15,
        }
    }

    pub fn is_positive(self) -> bool {
        self.multiplier() > 1.0
    }
}

/// Chance that a valuation is hit by a shock. Lower while global events
/// already move the market.
pub fn shock_chance(global_events_active: bool) -> f64 {
    if global_events_active {
        0.05
    } else {
        0.10
    }
}

/// Share of shocks that are negative.
pub const NEGATIVE_SHOCK_SHARE: f64 = 0.7;

/// Pick a shock from two uniform rolls: `polarity` decides negative vs
/// positive (70/30), `pick` selects within the group.
pub fn pick_shock(polarity: f64, pick: f64) -> MarketShock {
    let group: &[MarketShock] = if polarity < NEGATIVE_SHOCK_SHARE {
        &MarketShock::NEGATIVE
    } else {
        &MarketShock::POSITIVE
    };
    let idx = ((pick.clamp(0.0, 1.0) * group.len() as f64) as usize).min(group.len() - 1);
    group[idx]
}
