//! Notifications emitted by the simulation.
//!
//! `advance_day` returns them in emission order, and the engine forwards
//! each one to subscribed observers. Randomized outcomes (failed audits,
//! exposed bribes, market shocks) surface here rather than as errors.

use greenfield_logic::global_events::EventCategory;
use greenfield_logic::project_events::ProjectEventKind;
use greenfield_logic::stages::Stage;
use greenfield_logic::staff::{Level, StaffEventKind};
use greenfield_logic::tasks::TaskKind;
use greenfield_logic::valuation::MarketShock;
use serde::{Deserialize, Serialize};

use crate::state::{Buyer, GlobalEventId, LoanId, ProjectId, StaffId, TaskId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    DayAdvanced {
        day: u32,
        turn: u32,
    },
    /// Progress in the current stage reached 100.
    StageCompleted {
        project: ProjectId,
        stage: Stage,
    },
    StageAdvanced {
        project: ProjectId,
        stage: Stage,
        cost: f64,
    },
    ReadyToBuild {
        project: ProjectId,
        power_mw: f64,
    },
    IllegalMethodDetected {
        project: ProjectId,
        reputation_loss: i32,
    },
    ProjectEvent {
        project: ProjectId,
        kind: ProjectEventKind,
        progress_delta: f64,
    },
    StaffEvent {
        staff: StaffId,
        kind: StaffEventKind,
        reputation_delta: i32,
    },
    StaffPromoted {
        staff: StaffId,
        level: Level,
        skill: u8,
    },
    GlobalEventActivated {
        id: GlobalEventId,
        key: String,
        category: EventCategory,
        expires_day: u32,
    },
    GlobalEventExpired {
        id: GlobalEventId,
        key: String,
    },
    AuditPassed {
        risk_reduction: f64,
    },
    AuditFailed {
        fine: f64,
        reputation_loss: i32,
    },
    TaskCompleted {
        project: ProjectId,
        task: TaskId,
        kind: TaskKind,
    },
    MarketShock {
        project: ProjectId,
        shock: MarketShock,
        multiplier: f64,
    },
    ProjectSold {
        project: ProjectId,
        price: f64,
        buyer: Buyer,
    },
    SalariesPaid {
        total: f64,
    },
    LoanInstallment {
        loan: LoanId,
        amount: f64,
    },
    LoanRepaid {
        loan: LoanId,
    },
}

impl SimEvent {
    /// Whether the event is bad news for the company.
    pub fn is_setback(&self) -> bool {
        match self {
            SimEvent::IllegalMethodDetected { .. } | SimEvent::AuditFailed { .. } => true,
            SimEvent::ProjectEvent { progress_delta, .. } => *progress_delta < 0.0,
            SimEvent::StaffEvent { reputation_delta, .. } => *reputation_delta < 0,
            SimEvent::MarketShock { multiplier, .. } => *multiplier < 1.0,
            _ => false,
        }
    }
}
