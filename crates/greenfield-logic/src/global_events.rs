//! Catalog of world events that temporarily shift market conditions.
//!
//! Events come in five categories. On each economic tick every category is
//! rolled independently against its configured probability; a hit draws one
//! template of that category. A template carries a duration and an
//! [`EventEffect`], optionally scoped to a region or a technology.

use serde::{Deserialize, Serialize};

use crate::technology::Technology;
use crate::RegionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Economic,
    Political,
    Social,
    Environmental,
    Technological,
}

impl EventCategory {
    pub const ALL: [EventCategory; 5] = [
        EventCategory::Economic,
        EventCategory::Political,
        EventCategory::Social,
        EventCategory::Environmental,
        EventCategory::Technological,
    ];
}

/// Which multiplicative modifier of an effect bundle to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    /// Multiplier on market valuations.
    Market,
    /// Multiplier on stage duration (>1 slows permitting).
    PermitTime,
    /// Multiplier on stage-transition costs.
    BuildCost,
}

/// Effect bundle of one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventEffect {
    pub market: f64,
    pub permit_time: f64,
    pub build_cost: f64,
    /// Applied once to the company on activation.
    pub reputation: i32,
}

impl EventEffect {
    pub const NEUTRAL: EventEffect = EventEffect {
        market: 1.0,
        permit_time: 1.0,
        build_cost: 1.0,
        reputation: 0,
    };

    pub fn modifier(&self, effect: EffectType) -> f64 {
        match effect {
            EffectType::Market => self.market,
            EffectType::PermitTime => self.permit_time,
            EffectType::BuildCost => self.build_cost,
        }
    }
}

/// Where an active event applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventScope {
    pub region: Option<RegionId>,
    pub technology: Option<Technology>,
}

impl EventScope {
    pub fn global() -> Self {
        Self::default()
    }

    pub fn is_global(&self) -> bool {
        self.region.is_none() && self.technology.is_none()
    }

    /// A scoped event only applies when the query names the same region
    /// and/or a technology involving the scoped one.
    pub fn matches(&self, query: &ScopeQuery) -> bool {
        let region_ok = match &self.region {
            Some(r) => query.region.as_ref() == Some(r),
            None => true,
        };
        let tech_ok = match self.technology {
            Some(t) => query.technology.map_or(false, |q| q.involves(t)),
            None => true,
        };
        region_ok && tech_ok
    }
}

/// Scope of an aggregate-modifier query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeQuery {
    pub region: Option<RegionId>,
    pub technology: Option<Technology>,
}

impl ScopeQuery {
    pub fn everywhere() -> Self {
        Self::default()
    }

    pub fn region(region: impl Into<RegionId>) -> Self {
        Self {
            region: Some(region.into()),
            technology: None,
        }
    }

    pub fn technology(technology: Technology) -> Self {
        Self {
            region: None,
            technology: Some(technology),
        }
    }
}

/// How a template picks its scope when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeTemplate {
    Global,
    /// Scoped to one region drawn at activation.
    RandomRegion,
    Technology(Technology),
}

/// A catalog entry that can be activated as a global event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub category: EventCategory,
    pub duration_days: u32,
    pub effect: EventEffect,
    pub scope: ScopeTemplate,
}

macro_rules! effect {
    (market: $m:expr, permit: $p:expr, build: $b:expr, rep: $r:expr) => {
        EventEffect {
            market: $m,
            permit_time: $p,
            build_cost: $b,
            reputation: $r,
        }
    };
}

static CATALOG: &[EventTemplate] = &[
    // Economic
    EventTemplate {
        key: "rate_hike",
        name: "Central bank raises interest rates",
        category: EventCategory::Economic,
        duration_days: 60,
        effect: effect!(market: 0.9, permit: 1.0, build: 1.1, rep: 0),
        scope: ScopeTemplate::Global,
    },
    EventTemplate {
        key: "green_investment_boom",
        name: "Green investment boom",
        category: EventCategory::Economic,
        duration_days: 45,
        effect: effect!(market: 1.15, permit: 1.0, build: 1.0, rep: 0),
        scope: ScopeTemplate::Global,
    },
    EventTemplate {
        key: "power_price_spike",
        name: "Wholesale power price spike",
        category: EventCategory::Economic,
        duration_days: 30,
        effect: effect!(market: 1.2, permit: 1.0, build: 1.05, rep: 0),
        scope: ScopeTemplate::Global,
    },
    EventTemplate {
        key: "supply_chain_crunch",
        name: "Supply chain disruption",
        category: EventCategory::Economic,
        duration_days: 40,
        effect: effect!(market: 0.95, permit: 1.0, build: 1.2, rep: 0),
        scope: ScopeTemplate::Global,
    },
    // Political
    EventTemplate {
        key: "renewable_auction",
        name: "New renewable energy auction announced",
        category: EventCategory::Political,
        duration_days: 90,
        effect: effect!(market: 1.1, permit: 1.0, build: 1.0, rep: 0),
        scope: ScopeTemplate::Global,
    },
    EventTemplate {
        key: "permit_reform",
        name: "Permitting reform speeds up procedures",
        category: EventCategory::Political,
        duration_days: 120,
        effect: effect!(market: 1.0, permit: 0.85, build: 1.0, rep: 0),
        scope: ScopeTemplate::Global,
    },
    EventTemplate {
        key: "wind_distance_rule",
        name: "Stricter wind turbine distance rules",
        category: EventCategory::Political,
        duration_days: 180,
        effect: effect!(market: 0.8, permit: 1.3, build: 1.0, rep: 0),
        scope: ScopeTemplate::Technology(Technology::Wind),
    },
    EventTemplate {
        key: "regional_elections",
        name: "Regional elections freeze local decisions",
        category: EventCategory::Political,
        duration_days: 30,
        effect: effect!(market: 1.0, permit: 1.25, build: 1.0, rep: 0),
        scope: ScopeTemplate::RandomRegion,
    },
    // Social
    EventTemplate {
        key: "local_protests",
        name: "Residents protest new installations",
        category: EventCategory::Social,
        duration_days: 30,
        effect: effect!(market: 0.9, permit: 1.2, build: 1.0, rep: -3),
        scope: ScopeTemplate::RandomRegion,
    },
    EventTemplate {
        key: "climate_awareness",
        name: "Climate awareness campaign",
        category: EventCategory::Social,
        duration_days: 60,
        effect: effect!(market: 1.05, permit: 1.0, build: 1.0, rep: 3),
        scope: ScopeTemplate::Global,
    },
    EventTemplate {
        key: "community_energy",
        name: "Community energy movement grows",
        category: EventCategory::Social,
        duration_days: 45,
        effect: effect!(market: 1.1, permit: 0.95, build: 1.0, rep: 1),
        scope: ScopeTemplate::RandomRegion,
    },
    // Environmental
    EventTemplate {
        key: "drought",
        name: "Prolonged drought",
        category: EventCategory::Environmental,
        duration_days: 45,
        effect: effect!(market: 1.05, permit: 1.1, build: 1.0, rep: 0),
        scope: ScopeTemplate::Technology(Technology::Pv),
    },
    EventTemplate {
        key: "bird_protection_ruling",
        name: "Court ruling on bird migration corridors",
        category: EventCategory::Environmental,
        duration_days: 90,
        effect: effect!(market: 0.9, permit: 1.2, build: 1.0, rep: 0),
        scope: ScopeTemplate::Technology(Technology::Wind),
    },
    EventTemplate {
        key: "flood",
        name: "Regional flooding",
        category: EventCategory::Environmental,
        duration_days: 20,
        effect: effect!(market: 0.85, permit: 1.15, build: 1.1, rep: 0),
        scope: ScopeTemplate::RandomRegion,
    },
    // Technological
    EventTemplate {
        key: "panel_price_drop",
        name: "Solar panel prices drop",
        category: EventCategory::Technological,
        duration_days: 90,
        effect: effect!(market: 1.05, permit: 1.0, build: 0.85, rep: 0),
        scope: ScopeTemplate::Technology(Technology::Pv),
    },
    EventTemplate {
        key: "battery_breakthrough",
        name: "Battery chemistry breakthrough",
        category: EventCategory::Technological,
        duration_days: 120,
        effect: effect!(market: 1.2, permit: 1.0, build: 0.9, rep: 0),
        scope: ScopeTemplate::Technology(Technology::Bess),
    },
    EventTemplate {
        key: "turbine_recall",
        name: "Turbine model recall",
        category: EventCategory::Technological,
        duration_days: 60,
        effect: effect!(market: 0.9, permit: 1.0, build: 1.15, rep: 0),
        scope: ScopeTemplate::Technology(Technology::Wind),
    },
];

/// Every event template.
pub fn catalog() -> &'static [EventTemplate] {
    CATALOG
}

/// Templates of one category, in catalog order.
pub fn templates_for(category: EventCategory) -> Vec<&'static EventTemplate> {
    CATALOG.iter().filter(|t| t.category == category).collect()
}

/// Look up a template by key.
pub fn template(key: &str) -> Option<&'static EventTemplate> {
    CATALOG.iter().find(|t| t.key == key)
}
