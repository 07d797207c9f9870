//! Global event activation and expiry.

use greenfield_logic::global_events::{
    templates_for, EventCategory, EventScope, EventTemplate, ScopeQuery, ScopeTemplate,
};
use log::info;

use super::market::refresh_all_market_values;
use crate::context::TickContext;
use crate::events::SimEvent;
use crate::state::{GlobalEvent, SimulationState};

/// Expire old events, roll every category and activate the hits.
pub fn global_events_tick(state: &mut SimulationState, ctx: &mut TickContext<'_>) {
    let day = state.day();
    for expired in state.global_events.purge_expired(day) {
        info!("global event '{}' expired", expired.name);
        ctx.emit(SimEvent::GlobalEventExpired {
            id: expired.id,
            key: expired.key,
        });
    }

    for category in EventCategory::ALL {
        if !ctx.rng.chance(ctx.config.event_probabilities.get(category)) {
            continue;
        }
        let templates = templates_for(category);
        if templates.is_empty() {
            continue;
        }
        let template = templates[ctx.rng.index(templates.len())];
        activate(state, ctx, template);
    }

    refresh_all_market_values(state);
}

/// Activate one template now.
pub fn activate(state: &mut SimulationState, ctx: &mut TickContext<'_>, template: &EventTemplate) -> GlobalEvent {
    let scope = match template.scope {
        ScopeTemplate::Global => EventScope::global(),
        ScopeTemplate::Technology(t) => EventScope {
            region: None,
            technology: Some(t),
        },
        ScopeTemplate::RandomRegion => {
            let regions = ctx.catalog.regions();
            if regions.is_empty() {
                EventScope::global()
            } else {
                EventScope {
                    region: Some(regions[ctx.rng.index(regions.len())].clone()),
                    technology: None,
                }
            }
        }
    };

    let day = state.day();
    let log = &mut state.global_events;
    let event = GlobalEvent {
        id: log.next_id,
        key: template.key.to_string(),
        name: template.name.to_string(),
        category: template.category,
        effect: template.effect,
        scope,
        activated_day: day,
        duration_days: template.duration_days,
        expires_day: day + template.duration_days,
    };
    log.next_id += 1;
    log.active.push(event.clone());
    state.company.adjust_reputation(event.effect.reputation);

    info!("global event '{}' active until day {}", event.name, event.expires_day);
    ctx.emit(SimEvent::GlobalEventActivated {
        id: event.id,
        key: event.key.clone(),
        category: event.category,
        expires_day: event.expires_day,
    });
    event
}

/// Active events whose scope matches the filter (all active events when
/// no filter is given).
pub fn active_global_events<'s>(state: &'s SimulationState, filter: Option<&ScopeQuery>) -> Vec<&'s GlobalEvent> {
    state
        .global_events
        .active_at(state.day())
        .filter(|e| filter.map_or(true, |q| e.scope.matches(q)))
        .collect()
}
