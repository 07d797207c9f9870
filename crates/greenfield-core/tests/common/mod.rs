#![allow(dead_code)]

use greenfield_core::prelude::*;

pub const REGION: &str = "pomorskie";
pub const COUNTY: &str = "pl-2201";

/// Engine whose every roll is 0.99: no random event fires, range draws
/// land on their upper bound.
pub fn quiet_engine(config: SimConfig) -> SimulationEngine<FixedRolls> {
    SimulationEngine::with_rng(config, StaticCatalog::sample(), FixedRolls::always(0.99))
}

pub fn rich_config() -> SimConfig {
    SimConfig {
        starting_cash: 10_000_000.0,
        ..Default::default()
    }
}

/// Hire a scout, put them in the PV pool of the test county and open a
/// PV project there.
pub fn pv_project<R: RandomSource>(engine: &mut SimulationEngine<R>) -> (StaffId, ProjectId) {
    let scout = engine.hire_staff(Role::Scout, Level::Junior).unwrap();
    engine.assign_lessor(scout, COUNTY, Technology::Pv).unwrap();
    let project = engine.start_project(REGION, COUNTY, Technology::Pv).unwrap();
    (scout, project)
}

pub fn hire_developer<R: RandomSource>(engine: &mut SimulationEngine<R>, project: ProjectId) -> StaffId {
    let dev = engine.hire_staff(Role::Developer, Level::Junior).unwrap();
    engine.assign_staff(dev, project).unwrap();
    dev
}

/// Advance until the clock shows `day`.
pub fn run_until<R: RandomSource>(engine: &mut SimulationEngine<R>, day: u32) -> Vec<SimEvent> {
    let mut events = Vec::new();
    while engine.state.clock.day < day {
        events.extend(engine.advance_day(GameSpeed::Normal));
    }
    events
}

pub fn complete_stage<R: RandomSource>(engine: &mut SimulationEngine<R>, project: ProjectId) {
    if let Some(p) = engine.state.projects.get_mut(&project) {
        p.progress = 100.0;
    }
}
