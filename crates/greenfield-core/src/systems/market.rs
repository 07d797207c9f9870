//! Market valuation, listings and project sales.

use greenfield_logic::valuation::{market_value, pick_shock, shock_chance, Valuation, ValuationInput};
use log::info;

use crate::context::TickContext;
use crate::error::CommandError;
use crate::events::SimEvent;
use crate::state::{
    Buyer, Listing, MarketShockRecord, Project, ProjectId, ProjectLogKind, SaleRecord, SimulationState,
};

/// Asking prices up to this share of the current value attract buyers.
pub const BUYER_PRICE_TOLERANCE: f64 = 1.1;

/// Deterministic valuation of a project under the current global events.
pub fn valuation(state: &SimulationState, project: &Project) -> Valuation {
    let modifiers = state
        .global_events
        .market_modifiers(state.day(), &project.region_id, project.technology);
    market_value(&ValuationInput {
        power_mw: project.power_mw,
        stage: project.stage,
        progress: project.progress,
        technology: project.technology,
        global_market_modifier: modifiers.global,
        technology_modifier: modifiers.technology,
        location_modifier: modifiers.location,
        developer_skill: state.developer_base_skill(project),
        random_event_multiplier: 1.0,
    })
}

pub fn refresh_market_value(state: &mut SimulationState, id: ProjectId) {
    let value = match state.projects.get(&id) {
        Some(p) => valuation(state, p).value,
        None => return,
    };
    if let Some(p) = state.projects.get_mut(&id) {
        p.market_value = value;
    }
}

pub fn refresh_all_market_values(state: &mut SimulationState) {
    let ids: Vec<ProjectId> = state.projects.keys().copied().collect();
    for id in ids {
        refresh_market_value(state, id);
    }
}

/// Valuation including the chance of a transient market shock. A shock is
/// recorded in the market history and emitted as an event.
pub fn appraise(
    state: &mut SimulationState,
    ctx: &mut TickContext<'_>,
    id: ProjectId,
) -> Result<Valuation, CommandError> {
    let project = state
        .projects
        .get(&id)
        .ok_or_else(|| CommandError::not_found("project", id))?;
    let mut v = valuation(state, project);

    if ctx.rng.chance(shock_chance(state.has_active_global_events())) {
        let polarity = ctx.rng.unit();
        let pick = ctx.rng.unit();
        let shock = pick_shock(polarity, pick);
        v.random_event = shock.multiplier();
        v.value *= v.random_event;
        state.market.shocks.push(MarketShockRecord {
            day: state.day(),
            project_id: id,
            shock,
        });
        ctx.emit(SimEvent::MarketShock {
            project: id,
            shock,
            multiplier: shock.multiplier(),
        });
    }
    Ok(v)
}

/// List a project for sale at `price`, or at its appraisal when no price is
/// given. Re-listing replaces the previous offer. Returns the asking price.
pub fn send_project_to_market(
    state: &mut SimulationState,
    ctx: &mut TickContext<'_>,
    id: ProjectId,
    price: Option<f64>,
) -> Result<f64, CommandError> {
    if !state.projects.contains_key(&id) {
        return Err(CommandError::not_found("project", id));
    }
    if let Some(p) = price {
        if !(p.is_finite() && p > 0.0) {
            return Err(CommandError::InvalidInput(format!("asking price must be positive, got {p}")));
        }
    }

    let appraisal = appraise(state, ctx, id)?.value;
    let asking_price = price.unwrap_or(appraisal);
    let day = state.day();
    if let Some(project) = state.projects.get_mut(&id) {
        project.listing = Some(Listing {
            asking_price,
            appraisal,
            listed_day: day,
        });
        project.record(day, ProjectLogKind::Listed { asking_price });
    }
    info!("project {id} listed at {asking_price:.0} (appraised {appraisal:.0})");
    Ok(asking_price)
}

/// Sell a project outright.
pub fn sell_project(
    state: &mut SimulationState,
    ctx: &mut TickContext<'_>,
    id: ProjectId,
    price: f64,
) -> Result<(), CommandError> {
    if !state.projects.contains_key(&id) {
        return Err(CommandError::not_found("project", id));
    }
    if !(price.is_finite() && price > 0.0) {
        return Err(CommandError::InvalidInput(format!("sale price must be positive, got {price}")));
    }
    complete_sale(state, ctx, id, price, Buyer::Direct);
    Ok(())
}

/// Simulated buyers take listings priced within reach of current value.
pub fn market_buyers_tick(state: &mut SimulationState, ctx: &mut TickContext<'_>) {
    let offers: Vec<(ProjectId, f64, f64)> = state
        .projects
        .values()
        .filter_map(|p| p.listing.as_ref().map(|l| (p.id, l.asking_price, p.market_value)))
        .collect();

    for (id, asking, value) in offers {
        if asking <= value * BUYER_PRICE_TOLERANCE && ctx.rng.chance(ctx.config.market_buyer_chance) {
            complete_sale(state, ctx, id, asking, Buyer::Market);
        }
    }
}

/// Remove a project from the company and credit the price. Its staff and
/// tasks go with it.
fn complete_sale(
    state: &mut SimulationState,
    ctx: &mut TickContext<'_>,
    id: ProjectId,
    price: f64,
    buyer: Buyer,
) {
    let project = match state.projects.remove(&id) {
        Some(p) => p,
        None => return,
    };
    for staff_id in project.assigned_staff.values() {
        if let Some(member) = state.staff.get_mut(staff_id) {
            member.assignment = None;
        }
    }
    state.company.receive(price);
    state.market.sales.push(SaleRecord {
        day: state.clock.day,
        project_id: id,
        technology: project.technology,
        power_mw: project.power_mw,
        price,
        buyer,
    });
    info!("project {id} sold for {price:.0} ({buyer:?})");
    ctx.emit(SimEvent::ProjectSold {
        project: id,
        price,
        buyer,
    });
}
