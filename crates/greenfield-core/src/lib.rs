//! Greenfield Core - renewable project-development company simulation
//!
//! Runs a development company through discrete in-game days: projects move
//! through permitting stages, staff gain experience and run into random
//! events, world events shift the market, and illegal shortcuts feed an
//! audit model that can fine the company.
//!
//! # Architecture
//!
//! - **State**: one [`SimulationState`](state::SimulationState) value owns
//!   the clock, the company, projects, staff, lease pools, global events
//!   and the market.
//! - **Systems**: update operations over the state. Player commands
//!   validate before mutating; tick systems run from the scheduler.
//! - **Scheduler**: `advance_day` folds [`run_day`](scheduler::run_day)
//!   over the requested number of days.
//! - **Ports**: randomness ([`rng::RandomSource`]) and county reference
//!   data ([`catalog::CountyCatalog`]) are injected.
//!
//! Formulas and static tables live in `greenfield-logic`.
//!
//! # Example
//!
//! ```rust,no_run
//! use greenfield_core::prelude::*;
//!
//! let mut engine = SimulationEngine::new(SimConfig::default(), StaticCatalog::sample());
//!
//! let scout = engine.hire_staff(Role::Scout, Level::Mid).unwrap();
//! engine.assign_lessor(scout, "pl-2201", Technology::Pv).unwrap();
//! let project = engine.start_project("pomorskie", "pl-2201", Technology::Pv).unwrap();
//!
//! for _ in 0..30 {
//!     for event in engine.advance_day(GameSpeed::Fast) {
//!         println!("{event:?}");
//!     }
//! }
//! println!("{:.0}", engine.get_market_value(project).unwrap().value);
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod events;
pub mod persistence;
pub mod rng;
pub mod scheduler;
pub mod state;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::catalog::{CountyCatalog, CountyInfo, StaticCatalog};
    pub use crate::commands::{Command, CommandOutcome};
    pub use crate::engine::SimulationEngine;
    pub use crate::error::CommandError;
    pub use crate::events::SimEvent;
    pub use crate::rng::{FixedRolls, RandomSource};
    pub use crate::state::*;
    pub use greenfield_logic::config::{NegativeCashPolicy, SimConfig};
    pub use greenfield_logic::illegal::IllegalMethod;
    pub use greenfield_logic::stages::Stage;
    pub use greenfield_logic::staff::{Level, Role, TrainingType};
    pub use greenfield_logic::tasks::TaskKind;
    pub use greenfield_logic::technology::Technology;
}
