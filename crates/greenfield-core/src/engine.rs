//! Simulation engine - main entry point for running the simulation

use greenfield_logic::config::SimConfig;
use greenfield_logic::global_events::ScopeQuery;
use greenfield_logic::illegal::IllegalMethod;
use greenfield_logic::stages::Stage;
use greenfield_logic::staff::{Level, Role, TrainingType};
use greenfield_logic::tasks::TaskKind;
use greenfield_logic::technology::Technology;
use greenfield_logic::valuation::Valuation;
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::CountyCatalog;
use crate::commands::{apply_command, Command, CommandOutcome};
use crate::context::TickContext;
use crate::error::CommandError;
use crate::events::SimEvent;
use crate::persistence::{self, SaveError};
use crate::rng::RandomSource;
use crate::scheduler;
use crate::state::{
    GameSpeed, GlobalEvent, LoanId, Project, ProjectId, SimulationState, StaffId, StaffMember, TaskId,
};
use crate::systems;

/// Callback invoked with every emitted event, in order.
pub type Observer = Box<dyn FnMut(&SimEvent)>;

/// Main simulation engine
pub struct SimulationEngine<R: RandomSource = ChaCha8Rng> {
    /// The whole simulation state. Commands replace it as one value.
    pub state: SimulationState,
    config: SimConfig,
    catalog: Box<dyn CountyCatalog>,
    rng: R,
    observers: Vec<Observer>,
}

impl SimulationEngine<ChaCha8Rng> {
    /// Create a simulation seeded from `config.seed`, or from entropy when
    /// no seed is set.
    pub fn new(config: SimConfig, catalog: impl CountyCatalog + 'static) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, catalog, rng)
    }
}

impl<R: RandomSource> SimulationEngine<R> {
    pub fn with_rng(config: SimConfig, catalog: impl CountyCatalog + 'static, rng: R) -> Self {
        Self {
            state: SimulationState::new(&config),
            config,
            catalog: Box::new(catalog),
            rng,
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn catalog(&self) -> &dyn CountyCatalog {
        self.catalog.as_ref()
    }

    /// Swap the random source, e.g. to script rolls in a test.
    pub fn set_rng(&mut self, rng: R) {
        self.rng = rng;
    }

    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    fn notify(&mut self, events: &[SimEvent]) {
        for observer in &mut self.observers {
            for event in events {
                observer(event);
            }
        }
    }

    /// Advance the clock by `speed` days, running every subsystem that is
    /// due. Returns the events emitted along the way.
    pub fn advance_day(&mut self, speed: GameSpeed) -> Vec<SimEvent> {
        let state = std::mem::take(&mut self.state);
        let mut ctx = TickContext::new(&self.config, self.catalog.as_ref(), &mut self.rng);
        self.state = scheduler::advance(state, speed, &mut ctx);
        let events = ctx.take_events();
        self.notify(&events);
        events
    }

    /// Run a command on a copy of the state and commit it on success.
    fn transact<T>(
        &mut self,
        what: &str,
        f: impl FnOnce(&mut SimulationState, &mut TickContext<'_>) -> Result<T, CommandError>,
    ) -> Result<T, CommandError> {
        let mut next = self.state.clone();
        let mut ctx = TickContext::new(&self.config, self.catalog.as_ref(), &mut self.rng);
        match f(&mut next, &mut ctx) {
            Ok(value) => {
                let events = ctx.take_events();
                self.state = next;
                self.notify(&events);
                Ok(value)
            }
            Err(e) => {
                debug!("{what} rejected: {e}");
                Err(e)
            }
        }
    }

    /// Run a [`Command`].
    pub fn execute(&mut self, command: &Command) -> Result<CommandOutcome, CommandError> {
        let mut ctx = TickContext::new(&self.config, self.catalog.as_ref(), &mut self.rng);
        match apply_command(&self.state, command, &mut ctx) {
            Ok((next, outcome)) => {
                let events = ctx.take_events();
                self.state = next;
                self.notify(&events);
                Ok(outcome)
            }
            Err(e) => {
                debug!("{command:?} rejected: {e}");
                Err(e)
            }
        }
    }

    // ── Staff ───────────────────────────────────────────────────────────

    pub fn hire_staff(&mut self, role: Role, level: Level) -> Result<StaffId, CommandError> {
        self.transact("hire", |s, ctx| systems::hire_staff(s, ctx, role, level, None))
    }

    /// Hire a scout specialized in `technology`.
    pub fn hire_specialist(&mut self, level: Level, technology: Technology) -> Result<StaffId, CommandError> {
        self.transact("hire", |s, ctx| {
            systems::hire_staff(s, ctx, Role::Scout, level, Some(technology))
        })
    }

    /// Returns the severance paid.
    pub fn fire_staff(&mut self, staff: StaffId) -> Result<f64, CommandError> {
        self.transact("fire", |s, _| systems::fire_staff(s, staff))
    }

    pub fn train_staff(&mut self, staff: StaffId, training: TrainingType) -> Result<(), CommandError> {
        self.transact("train", |s, _| systems::train_staff(s, staff, training))
    }

    pub fn assign_staff(&mut self, staff: StaffId, project: ProjectId) -> Result<(), CommandError> {
        self.transact("assign", |s, _| systems::assign_staff(s, staff, project))
    }

    pub fn assign_lessor(&mut self, staff: StaffId, county: &str, technology: Technology) -> Result<(), CommandError> {
        self.transact("assign lessor", |s, ctx| {
            systems::assign_lessor(s, ctx, staff, county, technology)
        })
    }

    pub fn unassign_staff(&mut self, staff: StaffId) -> Result<(), CommandError> {
        self.transact("unassign", |s, _| systems::unassign_staff(s, staff))
    }

    pub fn upgrade_training_program(&mut self) -> Result<u8, CommandError> {
        self.transact("training upgrade", |s, _| systems::upgrade_training_program(s))
    }

    // ── Projects ────────────────────────────────────────────────────────

    pub fn start_project(
        &mut self,
        region: &str,
        county: &str,
        technology: Technology,
    ) -> Result<ProjectId, CommandError> {
        self.transact("start project", |s, ctx| {
            systems::start_project(s, ctx, region, county, technology)
        })
    }

    pub fn advance_project_stage(&mut self, project: ProjectId) -> Result<Stage, CommandError> {
        self.transact("advance stage", |s, ctx| systems::advance_stage(s, ctx, project))
    }

    /// Returns the amount paid.
    pub fn accelerate_project(&mut self, project: ProjectId, amount: Option<f64>) -> Result<f64, CommandError> {
        self.transact("accelerate", |s, ctx| {
            systems::accelerate_project(s, ctx, project, amount)
        })
    }

    pub fn apply_illegal_method(&mut self, project: ProjectId, method: IllegalMethod) -> Result<(), CommandError> {
        self.transact("illegal method", |s, _| {
            systems::apply_illegal_method(s, project, method)
        })
    }

    pub fn start_task(
        &mut self,
        project: ProjectId,
        kind: TaskKind,
        duration: u32,
        cost: f64,
    ) -> Result<TaskId, CommandError> {
        self.transact("start task", |s, ctx| {
            systems::start_task(s, ctx, project, kind, duration, cost)
        })
    }

    /// Returns the refund.
    pub fn cancel_task(&mut self, task: TaskId) -> Result<f64, CommandError> {
        self.transact("cancel task", |s, _| systems::cancel_task(s, task))
    }

    /// Returns the asking price.
    pub fn send_project_to_market(&mut self, project: ProjectId, price: Option<f64>) -> Result<f64, CommandError> {
        self.transact("list project", |s, ctx| {
            systems::send_project_to_market(s, ctx, project, price)
        })
    }

    pub fn sell_project(&mut self, project: ProjectId, price: f64) -> Result<(), CommandError> {
        self.transact("sell project", |s, ctx| systems::sell_project(s, ctx, project, price))
    }

    pub fn take_loan(&mut self, amount: f64, months: u32) -> Result<LoanId, CommandError> {
        self.transact("loan", |s, ctx| systems::take_loan(s, ctx, amount, months))
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.state.projects.get(&id)
    }

    pub fn staff_member(&self, id: StaffId) -> Option<&StaffMember> {
        self.state.staff.get(&id)
    }

    /// Current valuation of a project, without transient market shocks.
    pub fn get_market_value(&self, project: ProjectId) -> Result<Valuation, CommandError> {
        let p = self
            .project(project)
            .ok_or_else(|| CommandError::not_found("project", project))?;
        Ok(systems::valuation(&self.state, p))
    }

    pub fn get_active_global_events(&self, filter: Option<&ScopeQuery>) -> Vec<&GlobalEvent> {
        systems::active_global_events(&self.state, filter)
    }

    // ── Persistence ─────────────────────────────────────────────────────

    pub fn save_snapshot(&self) -> Result<Vec<u8>, SaveError> {
        persistence::save_snapshot(&self.state)
    }

    /// Replace the state with a snapshot. The config, catalog and random
    /// source stay as they are.
    pub fn load_snapshot(&mut self, bytes: &[u8]) -> Result<(), SaveError> {
        self.state = persistence::load_snapshot(bytes)?;
        Ok(())
    }

    pub fn save_snapshot_json(&self) -> Result<String, SaveError> {
        persistence::save_snapshot_json(&self.state)
    }

    pub fn load_snapshot_json(&mut self, json: &str) -> Result<(), SaveError> {
        self.state = persistence::load_snapshot_json(json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::rng::FixedRolls;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn quiet_engine() -> SimulationEngine<FixedRolls> {
        SimulationEngine::with_rng(SimConfig::default(), StaticCatalog::sample(), FixedRolls::always(0.99))
    }

    #[test]
    fn test_engine_creation() {
        let engine = SimulationEngine::new(
            SimConfig {
                seed: Some(1),
                ..Default::default()
            },
            StaticCatalog::sample(),
        );
        assert_eq!(engine.state.day(), 0);
        assert_eq!(engine.state.company.cash, 2_000_000.0);
    }

    #[test]
    fn test_advance_speeds() {
        let mut engine = quiet_engine();
        engine.advance_day(GameSpeed::Fastest);
        assert_eq!(engine.state.clock.day, 10);
        assert_eq!(engine.state.clock.turn, 5);
        assert_eq!(engine.state.clock.speed, GameSpeed::Fastest);
        engine.advance_day(GameSpeed::Fast);
        assert_eq!(engine.state.clock.day, 13);
    }

    #[test]
    fn test_observers_see_every_event() {
        let mut engine = quiet_engine();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.subscribe(Box::new(move |e| sink.borrow_mut().push(e.clone())));
        let events = engine.advance_day(GameSpeed::Faster);
        assert_eq!(*seen.borrow(), events);
        let days = events
            .iter()
            .filter(|e| matches!(e, SimEvent::DayAdvanced { .. }))
            .count();
        assert_eq!(days, 5);
    }

    #[test]
    fn test_failed_command_changes_nothing() {
        let mut engine = quiet_engine();
        let before = engine.state.clone();
        assert!(engine.fire_staff(42).is_err());
        assert!(engine.advance_project_stage(7).is_err());
        assert_eq!(engine.state, before);
    }

    #[test]
    fn test_execute_command_enum() {
        let mut engine = quiet_engine();
        let outcome = engine
            .execute(&Command::HireStaff {
                role: Role::Developer,
                level: Level::Mid,
                specialization: None,
            })
            .unwrap();
        let id = match outcome {
            CommandOutcome::Hired(id) => id,
            other => panic!("unexpected outcome {other:?}"),
        };
        let dev = engine.staff_member(id).unwrap();
        assert_eq!(dev.level, Level::Mid);
        assert_eq!(dev.skill, 7);
        assert_eq!(engine.state.company.cash, 2_000_000.0 - 18_000.0);
    }
}
