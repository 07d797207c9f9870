use std::collections::BTreeMap;

use greenfield_logic::illegal::IllegalMethod;
use greenfield_logic::project_events::ProjectEventKind;
use greenfield_logic::stages::Stage;
use greenfield_logic::staff::Role;
use greenfield_logic::tasks::{task_progress, TaskKind};
use greenfield_logic::technology::Technology;
use greenfield_logic::{CountyId, RegionId};
use serde::{Deserialize, Serialize};

use super::{ProjectId, StaffId};

pub type TaskId = u32;

/// A side process attached to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelTask {
    pub id: TaskId,
    pub kind: TaskKind,
    pub duration: u32,
    pub cost: f64,
    /// Ticks run so far.
    pub elapsed: u32,
    /// 0–100, derived from `elapsed`.
    pub progress: f64,
    pub started_day: u32,
}

impl ParallelTask {
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by one tick. Returns `true` on the tick that reaches
    /// `duration`.
    pub fn tick(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.elapsed += 1;
        self.progress = task_progress(self.elapsed, self.duration);
        self.is_done()
    }
}

/// An open offer to sell a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub asking_price: f64,
    /// Value the market put on the project when it was listed.
    pub appraisal: f64,
    pub listed_day: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectLogKind {
    Started { cost: f64 },
    StageCompleted { stage: Stage },
    StageAdvanced { to: Stage, cost: f64 },
    Accelerated { amount: f64, cost: f64 },
    IllegalMethodApplied { method: IllegalMethod },
    IllegalMethodDetected,
    LocalEvent { kind: ProjectEventKind, progress_delta: f64 },
    StaffAssigned { role: Role, staff: StaffId },
    StaffReleased { role: Role, staff: StaffId },
    TaskStarted { task: TaskId, kind: TaskKind },
    TaskCompleted { task: TaskId, kind: TaskKind },
    TaskCancelled { task: TaskId, kind: TaskKind },
    Listed { asking_price: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLogEntry {
    pub day: u32,
    pub kind: ProjectLogKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub region_id: RegionId,
    pub county_id: CountyId,
    pub technology: Technology,
    pub stage: Stage,
    /// 0–100 within the current stage.
    pub progress: f64,
    pub power_mw: f64,
    /// Lump cost paid to enter each stage.
    pub stage_costs: BTreeMap<Stage, f64>,
    /// At most one staff member per role.
    pub assigned_staff: BTreeMap<Role, StaffId>,
    pub uses_illegal_methods: bool,
    /// Last computed market value, without transient market shocks.
    pub market_value: f64,
    pub tasks: Vec<ParallelTask>,
    pub listing: Option<Listing>,
    pub started_day: u32,
    pub log: Vec<ProjectLogEntry>,
}

impl Project {
    pub fn new(
        id: ProjectId,
        region_id: RegionId,
        county_id: CountyId,
        technology: Technology,
        day: u32,
    ) -> Self {
        Self {
            id,
            name: format!("{} #{id}", technology.label()),
            region_id,
            county_id,
            technology,
            stage: Stage::LandAcquisition,
            progress: 0.0,
            power_mw: technology.default_power_mw(),
            stage_costs: BTreeMap::new(),
            assigned_staff: BTreeMap::new(),
            uses_illegal_methods: false,
            market_value: 0.0,
            tasks: Vec::new(),
            listing: None,
            started_day: day,
            log: Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.stage.is_terminal()
    }

    pub fn is_stage_complete(&self) -> bool {
        self.progress >= greenfield_logic::progress::MAX_PROGRESS
    }

    pub fn record(&mut self, day: u32, kind: ProjectLogKind) {
        self.log.push(ProjectLogEntry { day, kind });
    }

    pub fn staff_in(&self, role: Role) -> Option<StaffId> {
        self.assigned_staff.get(&role).copied()
    }
}
