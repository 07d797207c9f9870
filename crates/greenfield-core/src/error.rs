//! Typed failures of player commands.
//!
//! A command that returns an error has not changed the simulation state.
//! Randomized bad outcomes (failed audits, exposed bribes) are not errors;
//! they come back as [`SimEvent`](crate::events::SimEvent)s.

use greenfield_logic::stages::Stage;
use greenfield_logic::staff::Role;
use thiserror::Error;

use crate::state::ProjectId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("insufficient funds: {required:.0} required, {available:.0} available")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("project {project} cannot leave stage {stage:?}")]
    InvalidStageTransition { project: ProjectId, stage: Stage },

    #[error("a {role:?} is required")]
    MissingRequiredStaff { role: Role },

    #[error("{resource} capacity exceeded (limit {limit})")]
    CapacityExceeded { resource: &'static str, limit: f64 },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CommandError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        CommandError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Fail unless `available` covers `required`.
    pub fn ensure_funds(required: f64, available: f64) -> Result<(), CommandError> {
        if available < required {
            Err(CommandError::InsufficientFunds {
                required,
                available,
            })
        } else {
            Ok(())
        }
    }
}
