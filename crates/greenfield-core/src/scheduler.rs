//! Turn scheduler.
//!
//! Advancing the game is a fold of [`run_day`] over the requested number
//! of days. Subsystems run on fixed day moduli:
//!
//! | Days | Phase |
//! |------|-------|
//! | `% 2` | project progress, parallel tasks, staff, audit |
//! | `% 3` | local project events |
//! | `% 5` | global events, market buyers |
//! | `% 30` | salaries and loan installments |
//!
//! Within a day the order is always progress, project events, staff,
//! global events, audit, finance.

use crate::context::TickContext;
use crate::events::SimEvent;
use crate::state::{GameSpeed, SimulationState};
use crate::systems::{
    audit_tick, finance_tick, global_events_tick, market_buyers_tick, progress_tick,
    project_events_tick, staff_tick, tasks_tick,
};

/// Simulate one day.
pub fn run_day(state: &mut SimulationState, ctx: &mut TickContext<'_>) {
    state.clock.tick();
    let clock = state.clock.clone();
    ctx.emit(SimEvent::DayAdvanced {
        day: clock.day,
        turn: clock.turn,
    });

    if clock.is_progress_day() {
        progress_tick(state, ctx);
        tasks_tick(state, ctx);
    }
    if clock.is_project_event_day() {
        project_events_tick(state, ctx);
    }
    if clock.is_progress_day() {
        staff_tick(state, ctx);
    }
    if clock.is_economic_day() {
        global_events_tick(state, ctx);
        market_buyers_tick(state, ctx);
    }
    if clock.is_progress_day() {
        audit_tick(state, ctx);
    }
    if clock.is_finance_day() {
        finance_tick(state, ctx);
    }
}

/// Advance by `speed` days, returning the new state. Emitted events are
/// collected in `ctx`.
pub fn advance(state: SimulationState, speed: GameSpeed, ctx: &mut TickContext<'_>) -> SimulationState {
    (0..speed.days()).fold(state, |mut state, _| {
        state.clock.speed = speed;
        run_day(&mut state, ctx);
        state
    })
}
