//! Player commands as reducer actions.
//!
//! [`apply_command`] works on a copy of the state and hands it back only
//! when the command succeeds, so callers either commit the whole new state
//! or keep the old one.

use greenfield_logic::illegal::IllegalMethod;
use greenfield_logic::stages::Stage;
use greenfield_logic::staff::{Level, Role, TrainingType};
use greenfield_logic::tasks::TaskKind;
use greenfield_logic::technology::Technology;
use greenfield_logic::{CountyId, RegionId};
use serde::{Deserialize, Serialize};

use crate::context::TickContext;
use crate::error::CommandError;
use crate::state::{LoanId, ProjectId, SimulationState, StaffId, TaskId};
use crate::systems;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    HireStaff {
        role: Role,
        level: Level,
        #[serde(default)]
        specialization: Option<Technology>,
    },
    FireStaff { staff: StaffId },
    TrainStaff { staff: StaffId, training: TrainingType },
    AssignStaff { staff: StaffId, project: ProjectId },
    AssignLessor { staff: StaffId, county: CountyId, technology: Technology },
    UnassignStaff { staff: StaffId },
    UpgradeTrainingProgram,
    StartProject { region: RegionId, county: CountyId, technology: Technology },
    AdvanceProjectStage { project: ProjectId },
    AccelerateProject { project: ProjectId, amount: Option<f64> },
    ApplyIllegalMethod { project: ProjectId, method: IllegalMethod },
    StartTask { project: ProjectId, kind: TaskKind, duration: u32, cost: f64 },
    CancelTask { task: TaskId },
    SendProjectToMarket { project: ProjectId, price: Option<f64> },
    SellProject { project: ProjectId, price: f64 },
    TakeLoan { amount: f64, months: u32 },
}

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Done,
    Hired(StaffId),
    Severance(f64),
    TrainingProgramLevel(u8),
    ProjectStarted(ProjectId),
    StageEntered(Stage),
    Accelerated { cost: f64 },
    TaskStarted(TaskId),
    TaskRefund(f64),
    Listed { asking_price: f64 },
    LoanTaken(LoanId),
}

/// Apply a command to a copy of `state`.
pub fn apply_command(
    state: &SimulationState,
    command: &Command,
    ctx: &mut TickContext<'_>,
) -> Result<(SimulationState, CommandOutcome), CommandError> {
    let mut next = state.clone();
    let outcome = dispatch(&mut next, command, ctx)?;
    Ok((next, outcome))
}

fn dispatch(
    state: &mut SimulationState,
    command: &Command,
    ctx: &mut TickContext<'_>,
) -> Result<CommandOutcome, CommandError> {
    use CommandOutcome as Out;
    Ok(match command {
        Command::HireStaff {
            role,
            level,
            specialization,
        } => Out::Hired(systems::hire_staff(state, ctx, *role, *level, *specialization)?),
        Command::FireStaff { staff } => Out::Severance(systems::fire_staff(state, *staff)?),
        Command::TrainStaff { staff, training } => {
            systems::train_staff(state, *staff, *training)?;
            Out::Done
        }
        Command::AssignStaff { staff, project } => {
            systems::assign_staff(state, *staff, *project)?;
            Out::Done
        }
        Command::AssignLessor {
            staff,
            county,
            technology,
        } => {
            systems::assign_lessor(state, ctx, *staff, county, *technology)?;
            Out::Done
        }
        Command::UnassignStaff { staff } => {
            systems::unassign_staff(state, *staff)?;
            Out::Done
        }
        Command::UpgradeTrainingProgram => Out::TrainingProgramLevel(systems::upgrade_training_program(state)?),
        Command::StartProject {
            region,
            county,
            technology,
        } => Out::ProjectStarted(systems::start_project(state, ctx, region, county, *technology)?),
        Command::AdvanceProjectStage { project } => Out::StageEntered(systems::advance_stage(state, ctx, *project)?),
        Command::AccelerateProject { project, amount } => Out::Accelerated {
            cost: systems::accelerate_project(state, ctx, *project, *amount)?,
        },
        Command::ApplyIllegalMethod { project, method } => {
            systems::apply_illegal_method(state, *project, *method)?;
            Out::Done
        }
        Command::StartTask {
            project,
            kind,
            duration,
            cost,
        } => Out::TaskStarted(systems::start_task(state, ctx, *project, *kind, *duration, *cost)?),
        Command::CancelTask { task } => Out::TaskRefund(systems::cancel_task(state, *task)?),
        Command::SendProjectToMarket { project, price } => Out::Listed {
            asking_price: systems::send_project_to_market(state, ctx, *project, *price)?,
        },
        Command::SellProject { project, price } => {
            systems::sell_project(state, ctx, *project, *price)?;
            Out::Done
        }
        Command::TakeLoan { amount, months } => Out::LoanTaken(systems::take_loan(state, ctx, *amount, *months)?),
    })
}
