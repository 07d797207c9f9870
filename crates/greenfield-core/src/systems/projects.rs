//! Opening projects and taking illegal shortcuts on them.

use greenfield_logic::illegal::{raise_gauge, IllegalMethod};
use greenfield_logic::staff::Role;
use greenfield_logic::technology::Technology;
use log::{info, warn};

use super::market::refresh_market_value;
use crate::context::TickContext;
use crate::error::CommandError;
use crate::state::{IllegalAction, Project, ProjectId, ProjectLogKind, SimulationState};

/// Open a new project in a county. Needs at least one lessor in the
/// county's lease pool for the technology and free land and grid capacity.
pub fn start_project(
    state: &mut SimulationState,
    ctx: &TickContext<'_>,
    region_id: &str,
    county_id: &str,
    technology: Technology,
) -> Result<ProjectId, CommandError> {
    let county = ctx
        .catalog
        .county(county_id)
        .ok_or_else(|| CommandError::not_found("county", county_id))?;
    if county.region_id != region_id {
        return Err(CommandError::InvalidInput(format!(
            "county {county_id} is not in region {region_id}"
        )));
    }
    if state.lessors_for(county_id, technology).is_empty() {
        return Err(CommandError::MissingRequiredStaff { role: Role::Scout });
    }

    let power = technology.default_power_mw();
    let used = state.used_capacity_mw(county_id);
    if used + power > county.land_capacity_mw {
        return Err(CommandError::CapacityExceeded {
            resource: "land",
            limit: county.land_capacity_mw,
        });
    }
    if used + power > county.grid_capacity_mw {
        return Err(CommandError::CapacityExceeded {
            resource: "grid",
            limit: county.grid_capacity_mw,
        });
    }

    let cost = technology.start_cost();
    state.company.invest(cost)?;

    let id = state.allocate_project_id();
    let day = state.day();
    let mut project = Project::new(id, region_id.to_string(), county_id.to_string(), technology, day);
    project.record(day, ProjectLogKind::Started { cost });
    state.projects.insert(id, project);
    refresh_market_value(state, id);
    info!("started {} project {id} in {county_id}", technology.label());
    Ok(id)
}

/// Use an illegal shortcut on a project.
pub fn apply_illegal_method(
    state: &mut SimulationState,
    project_id: ProjectId,
    method: IllegalMethod,
) -> Result<(), CommandError> {
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
    let cost = method.cost();
    state.company.spend(cost)?;

    let day = state.day();
    let illegals = &mut state.company.illegals;
    illegals.corruption_network = raise_gauge(illegals.corruption_network, method.network_gain());
    illegals.audit_risk = raise_gauge(illegals.audit_risk, method.risk_gain());
    if method.counts_as_bribe() {
        illegals.total_bribes += cost;
    }
    if method == IllegalMethod::IllegalDatabase {
        illegals.has_illegal_database = true;
    }
    illegals.action_history.push(IllegalAction {
        day,
        project_id,
        method,
        cost,
    });
    warn!(
        "{method:?} on project {project_id}: network {:.0}, audit risk {:.0}",
        illegals.corruption_network, illegals.audit_risk
    );

    if let Some(p) = state.projects.get_mut(&project_id) {
        p.uses_illegal_methods = true;
        p.record(day, ProjectLogKind::IllegalMethodApplied { method });
    }
    Ok(())
}
