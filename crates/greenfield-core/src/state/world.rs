use greenfield_logic::global_events::{EffectType, EventCategory, EventEffect, EventScope, ScopeQuery};
use greenfield_logic::technology::Technology;
use greenfield_logic::valuation::MarketShock;
use greenfield_logic::CountyId;
use serde::{Deserialize, Serialize};

use super::{ProjectId, StaffId};

pub type GlobalEventId = u32;

/// An activated world event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalEvent {
    pub id: GlobalEventId,
    pub key: String,
    pub name: String,
    pub category: EventCategory,
    pub effect: EventEffect,
    pub scope: EventScope,
    pub activated_day: u32,
    pub duration_days: u32,
    pub expires_day: u32,
}

impl GlobalEvent {
    pub fn is_active(&self, day: u32) -> bool {
        day < self.expires_day
    }
}

/// Events currently in force.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalEventLog {
    pub active: Vec<GlobalEvent>,
    pub next_id: GlobalEventId,
}

/// Valuation modifiers split by scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketModifiers {
    pub global: f64,
    pub technology: f64,
    pub location: f64,
}

impl GlobalEventLog {
    pub fn active_at(&self, day: u32) -> impl Iterator<Item = &GlobalEvent> {
        self.active.iter().filter(move |e| e.is_active(day))
    }

    /// Product of `effect` over every active event whose scope matches.
    pub fn aggregate(&self, day: u32, effect: EffectType, query: &ScopeQuery) -> f64 {
        self.active_at(day)
            .filter(|e| e.scope.matches(query))
            .map(|e| e.effect.modifier(effect))
            .product()
    }

    /// Market modifiers for a project, split into the unscoped part, the
    /// technology-scoped part and the region-scoped part.
    pub fn market_modifiers(&self, day: u32, region: &str, technology: Technology) -> MarketModifiers {
        let query = ScopeQuery {
            region: Some(region.to_string()),
            technology: Some(technology),
        };
        let mut m = MarketModifiers {
            global: 1.0,
            technology: 1.0,
            location: 1.0,
        };
        for e in self.active_at(day).filter(|e| e.scope.matches(&query)) {
            let v = e.effect.market;
            if e.scope.region.is_some() {
                m.location *= v;
            } else if e.scope.technology.is_some() {
                m.technology *= v;
            } else {
                m.global *= v;
            }
        }
        m
    }

    /// Remove events that have expired by `day`, returning them.
    pub fn purge_expired(&mut self, day: u32) -> Vec<GlobalEvent> {
        let (active, expired): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|e| e.is_active(day));
        self.active = active;
        expired
    }
}

/// Scouts working one county for one technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeasePool {
    pub county: CountyId,
    pub technology: Technology,
    pub scouts: Vec<StaffId>,
}

/// A transient shock that hit an appraisal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketShockRecord {
    pub day: u32,
    pub project_id: ProjectId,
    pub shock: MarketShock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Buyer {
    /// Sold through an explicit `sell_project` command.
    Direct,
    /// A simulated buyer accepted a listing.
    Market,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub day: u32,
    pub project_id: ProjectId,
    pub technology: Technology,
    pub power_mw: f64,
    pub price: f64,
    pub buyer: Buyer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Power brought to ready-to-build across the whole market.
    pub global_rtb_power_mw: f64,
    pub shocks: Vec<MarketShockRecord>,
    pub sales: Vec<SaleRecord>,
}
