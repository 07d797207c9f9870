//! Parallel task manager.
//!
//! Tasks are kept on their project and ticked in project-id order, then in
//! start order within a project.

use greenfield_logic::tasks::{TaskKind, CANCEL_REFUND_SHARE};
use log::debug;

use super::progress::add_progress;
use crate::context::TickContext;
use crate::error::CommandError;
use crate::events::SimEvent;
use crate::state::{ParallelTask, ProjectId, ProjectLogKind, SimulationState, TaskId};

/// Start a task on a project, paying its cost up front.
pub fn start_task(
    state: &mut SimulationState,
    ctx: &TickContext<'_>,
    project_id: ProjectId,
    kind: TaskKind,
    duration: u32,
    cost: f64,
) -> Result<TaskId, CommandError> {
    if duration == 0 {
        return Err(CommandError::InvalidInput("task duration must be at least one tick".into()));
    }
    if !(cost.is_finite() && cost >= 0.0) {
        return Err(CommandError::InvalidInput(format!("task cost must not be negative, got {cost}")));
    }
    let project = state
        .projects
        .get(&project_id)
        .ok_or_else(|| CommandError::not_found("project", project_id))?;
    if project.is_terminal() {
        return Err(CommandError::InvalidStageTransition {
            project: project_id,
            stage: project.stage,
        });
    }
    let per_project = ctx.config.max_tasks_per_project;
    if project.tasks.len() >= per_project {
        return Err(CommandError::CapacityExceeded {
            resource: "tasks per project",
            limit: per_project as f64,
        });
    }
    let global = ctx.config.max_parallel_tasks;
    if state.task_count() >= global {
        return Err(CommandError::CapacityExceeded {
            resource: "parallel tasks",
            limit: global as f64,
        });
    }
    state.company.invest(cost)?;

    let id = state.allocate_task_id();
    let day = state.day();
    if let Some(p) = state.projects.get_mut(&project_id) {
        p.tasks.push(ParallelTask {
            id,
            kind,
            duration,
            cost,
            elapsed: 0,
            progress: 0.0,
            started_day: day,
        });
        p.record(day, ProjectLogKind::TaskStarted { task: id, kind });
    }
    debug!("task #{id} ({kind:?}) started on project {project_id}");
    Ok(id)
}

/// Remove a task and refund half of its cost.
pub fn cancel_task(state: &mut SimulationState, task_id: TaskId) -> Result<f64, CommandError> {
    let project_id = state
        .task_owner(task_id)
        .ok_or_else(|| CommandError::not_found("task", task_id))?;
    let day = state.day();
    let Some(project) = state.projects.get_mut(&project_id) else {
        return Err(CommandError::not_found("project", project_id));
    };
    let Some(idx) = project.tasks.iter().position(|t| t.id == task_id) else {
        return Err(CommandError::not_found("task", task_id));
    };
    let task = project.tasks.remove(idx);
    project.record(
        day,
        ProjectLogKind::TaskCancelled {
            task: task_id,
            kind: task.kind,
        },
    );
    let refund = task.cost * CANCEL_REFUND_SHARE;
    state.company.refund(refund);
    Ok(refund)
}

/// Advance every task by one tick and pay out the ones that finish.
pub fn tasks_tick(state: &mut SimulationState, ctx: &mut TickContext<'_>) {
    let day = state.day();
    let mut finished: Vec<(ProjectId, ParallelTask)> = Vec::new();
    for project in state.projects.values_mut() {
        let mut i = 0;
        while i < project.tasks.len() {
            if project.tasks[i].tick() {
                let task = project.tasks.remove(i);
                project.record(
                    day,
                    ProjectLogKind::TaskCompleted {
                        task: task.id,
                        kind: task.kind,
                    },
                );
                finished.push((project.id, task));
            } else {
                i += 1;
            }
        }
    }

    for (project_id, task) in finished {
        let reward = task.kind.reward();
        debug!("task #{} ({:?}) finished on project {project_id}", task.id, task.kind);
        ctx.emit(SimEvent::TaskCompleted {
            project: project_id,
            task: task.id,
            kind: task.kind,
        });
        state.company.adjust_reputation(reward.reputation);
        add_progress(state, ctx, project_id, reward.progress);
    }
}
