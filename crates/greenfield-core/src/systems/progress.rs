//! Project progress engine: per-tick stage progress, explicit stage
//! transitions, acceleration and local project events.

use greenfield_logic::costs::transition_cost;
use greenfield_logic::global_events::EffectType;
use greenfield_logic::progress::{
    apply_progress, progress_increment, ProgressInput, ILLEGAL_DETECTION_CHANCE,
    ILLEGAL_DETECTION_REPUTATION, MAX_PROGRESS, READY_TO_BUILD_REPUTATION,
    STAGE_COMPLETION_REPUTATION,
};
use greenfield_logic::project_events::{pick_project_event, PROJECT_EVENT_CHANCE};
use greenfield_logic::stages::Stage;
use greenfield_logic::staff::Role;
use log::{debug, info};

use super::market::refresh_market_value;
use crate::context::TickContext;
use crate::error::CommandError;
use crate::events::SimEvent;
use crate::state::{Project, ProjectId, ProjectLogKind, SimulationState};

/// Progress bought per unit of acceleration costs this much per MW.
pub const ACCELERATION_COST_PER_MW: f64 = 200.0;
pub const DEFAULT_ACCELERATION: f64 = 10.0;

/// Progress a project would make in one tick right now.
pub fn tick_increment(state: &SimulationState, project: &Project) -> f64 {
    let lessors = state.lessors_for(&project.county_id, project.technology);
    let supporting = state.supporting_skills(project);
    let illegals = &state.company.illegals;
    let input = ProgressInput {
        stage: project.stage,
        lessors: &lessors,
        developer_skill: state.developer_skill(project),
        role_skills: &supporting,
        reputation: state.company.reputation,
        uses_illegal_methods: project.uses_illegal_methods,
        corruption_network: illegals.corruption_network,
        has_illegal_database: illegals.has_illegal_database,
        permit_time_modifier: state.project_modifier(project, EffectType::PermitTime),
    };
    progress_increment(&input).total
}

/// Add progress to a project and apply the completion rules when it
/// crosses 100.
pub(crate) fn add_progress(state: &mut SimulationState, ctx: &mut TickContext<'_>, id: ProjectId, delta: f64) {
    let day = state.day();
    let Some(project) = state.projects.get_mut(&id) else {
        return;
    };
    if project.is_terminal() {
        return;
    }
    let (next, crossed) = apply_progress(project.progress, delta);
    project.progress = next;
    if !crossed {
        return;
    }

    let stage = project.stage;
    let legal = !project.uses_illegal_methods;
    project.record(day, ProjectLogKind::StageCompleted { stage });
    if legal {
        state.company.adjust_reputation(STAGE_COMPLETION_REPUTATION);
    }
    info!("project {id} completed {}", stage.label());
    ctx.emit(SimEvent::StageCompleted { project: id, stage });
}

/// One progress tick for every project in development.
pub fn progress_tick(state: &mut SimulationState, ctx: &mut TickContext<'_>) {
    let ids: Vec<ProjectId> = state.projects.keys().copied().collect();
    for id in ids {
        let (delta, illegal) = match state.projects.get(&id) {
            Some(p) if !p.is_terminal() => (tick_increment(state, p), p.uses_illegal_methods),
            _ => continue,
        };
        add_progress(state, ctx, id, delta);

        if illegal && ctx.rng.chance(ILLEGAL_DETECTION_CHANCE) {
            state.company.adjust_reputation(ILLEGAL_DETECTION_REPUTATION);
            let day = state.day();
            if let Some(p) = state.projects.get_mut(&id) {
                p.record(day, ProjectLogKind::IllegalMethodDetected);
            }
            info!("illegal methods on project {id} came to light");
            ctx.emit(SimEvent::IllegalMethodDetected {
                project: id,
                reputation_loss: -ILLEGAL_DETECTION_REPUTATION,
            });
        }
    }
    super::market::refresh_all_market_values(state);
}

/// Local events, rolled on project-event days.
pub fn project_events_tick(state: &mut SimulationState, ctx: &mut TickContext<'_>) {
    let ids: Vec<ProjectId> = state
        .projects
        .values()
        .filter(|p| !p.is_terminal())
        .map(|p| p.id)
        .collect();
    for id in ids {
        if !ctx.rng.chance(PROJECT_EVENT_CHANCE) {
            continue;
        }
        let kind = pick_project_event(ctx.rng.unit());
        let delta = kind.progress_delta();
        let day = state.day();
        if let Some(p) = state.projects.get_mut(&id) {
            p.record(day, ProjectLogKind::LocalEvent { kind, progress_delta: delta });
        }
        ctx.emit(SimEvent::ProjectEvent {
            project: id,
            kind,
            progress_delta: delta,
        });
        add_progress(state, ctx, id, delta);
        refresh_market_value(state, id);
    }
}

/// Cost of moving a project into its next stage under current build-cost
/// modifiers.
pub fn next_stage_cost(state: &SimulationState, project: &Project) -> Option<(Stage, f64)> {
    let next = project.stage.next()?;
    let factor = state.project_modifier(project, EffectType::BuildCost);
    let cost = transition_cost(next, project.technology, project.power_mw)
        .scaled(factor)
        .total();
    Some((next, cost))
}

/// Move a project whose current stage is complete into the next stage.
pub fn advance_stage(
    state: &mut SimulationState,
    ctx: &mut TickContext<'_>,
    id: ProjectId,
) -> Result<Stage, CommandError> {
    let project = state
        .projects
        .get(&id)
        .ok_or_else(|| CommandError::not_found("project", id))?;
    let (next, cost) = match next_stage_cost(state, project) {
        Some(n) if project.is_stage_complete() => n,
        _ => {
            return Err(CommandError::InvalidStageTransition {
                project: id,
                stage: project.stage,
            })
        }
    };
    if project.stage == Stage::LandAcquisition && project.staff_in(Role::Developer).is_none() {
        return Err(CommandError::MissingRequiredStaff { role: Role::Developer });
    }
    state.company.invest(cost)?;

    let day = state.day();
    let Some(project) = state.projects.get_mut(&id) else {
        return Err(CommandError::not_found("project", id));
    };
    project.stage = next;
    project.progress = 0.0;
    project.stage_costs.insert(next, cost);
    project.record(day, ProjectLogKind::StageAdvanced { to: next, cost });
    let legal = !project.uses_illegal_methods;
    let power = project.power_mw;
    info!("project {id} entered {} for {cost:.0}", next.label());
    ctx.emit(SimEvent::StageAdvanced {
        project: id,
        stage: next,
        cost,
    });

    if next.is_terminal() {
        state.company.rtb_power_mw += power;
        state.market.global_rtb_power_mw += power;
        if legal {
            state.company.adjust_reputation(READY_TO_BUILD_REPUTATION);
        }
        ctx.emit(SimEvent::ReadyToBuild {
            project: id,
            power_mw: power,
        });
    }
    refresh_market_value(state, id);
    Ok(next)
}

/// Pay to push a project forward by up to `amount` progress points. Only
/// the points that fit below 100 are charged.
pub fn accelerate_project(
    state: &mut SimulationState,
    ctx: &mut TickContext<'_>,
    id: ProjectId,
    amount: Option<f64>,
) -> Result<f64, CommandError> {
    let amount = amount.unwrap_or(DEFAULT_ACCELERATION);
    if !(amount.is_finite() && amount > 0.0 && amount <= 100.0) {
        return Err(CommandError::InvalidInput(format!(
            "acceleration must be within (0, 100], got {amount}"
        )));
    }
    let project = state
        .projects
        .get(&id)
        .ok_or_else(|| CommandError::not_found("project", id))?;
    if project.is_terminal() || project.is_stage_complete() {
        return Err(CommandError::InvalidStageTransition {
            project: id,
            stage: project.stage,
        });
    }
    let amount = amount.min(MAX_PROGRESS - project.progress);
    let cost = amount * project.power_mw * ACCELERATION_COST_PER_MW;
    state.company.invest(cost)?;

    let day = state.day();
    if let Some(p) = state.projects.get_mut(&id) {
        p.record(day, ProjectLogKind::Accelerated { amount, cost });
    }
    debug!("project {id} accelerated by {amount} for {cost:.0}");
    add_progress(state, ctx, id, amount);
    refresh_market_value(state, id);
    Ok(cost)
}
