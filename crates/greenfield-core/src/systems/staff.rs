//! Staff pool: hiring, assignments, training and the per-tick event and
//! leveling pass.

use greenfield_logic::staff::{
    check_promotion, event_weights, experience_gain, hiring_cost, monthly_salary, pick_event,
    severance_cost, training_program_upgrade_cost, Level, Role, TrainingType,
};
use greenfield_logic::technology::Technology;
use log::{debug, info};

use crate::context::TickContext;
use crate::error::CommandError;
use crate::events::SimEvent;
use crate::state::{Assignment, ProjectId, ProjectLogKind, SimulationState, StaffId, StaffMember};

pub const STARTING_MORALE: f64 = 75.0;
pub const STARTING_ENERGY: f64 = 100.0;

fn member<'s>(state: &'s SimulationState, id: StaffId) -> Result<&'s StaffMember, CommandError> {
    state.staff.get(&id).ok_or_else(|| CommandError::not_found("staff member", id))
}

/// Hire a new staff member. Skill is drawn from the level's range. Only
/// scouts may come with a technology specialization.
pub fn hire_staff(
    state: &mut SimulationState,
    ctx: &mut TickContext<'_>,
    role: Role,
    level: Level,
    specialization: Option<Technology>,
) -> Result<StaffId, CommandError> {
    if specialization.is_some() && !role.works_in_lease_pool() {
        return Err(CommandError::InvalidInput(format!(
            "only scouts specialize in a technology, not a {role:?}"
        )));
    }
    state.company.spend(hiring_cost(role, level))?;

    let (lo, hi) = level.skill_range();
    let skill = ctx.rng.range_inclusive(lo as i64, hi as i64) as u8;
    let id = state.allocate_staff_id();
    state.staff.insert(
        id,
        StaffMember {
            id,
            role,
            level,
            skill,
            experience: 0.0,
            morale: STARTING_MORALE,
            energy: STARTING_ENERGY,
            salary: monthly_salary(role, level),
            specialization,
            productivity: 1.0,
            productivity_ticks: 0,
            assignment: None,
            hired_day: state.clock.day,
        },
    );
    debug!("hired {level:?} {role:?} #{id} (skill {skill}, specialization {specialization:?})");
    Ok(id)
}

/// Let a staff member go, paying severance.
pub fn fire_staff(state: &mut SimulationState, id: StaffId) -> Result<f64, CommandError> {
    let severance = severance_cost(member(state, id)?.salary);
    state.company.spend(severance)?;
    release(state, id);
    state.staff.remove(&id);
    debug!("fired staff #{id}, severance {severance:.0}");
    Ok(severance)
}

/// Send a staff member on paid training.
pub fn train_staff(
    state: &mut SimulationState,
    id: StaffId,
    training: TrainingType,
) -> Result<(), CommandError> {
    member(state, id)?;
    state.company.spend(training.cost())?;
    if let Some(m) = state.staff.get_mut(&id) {
        m.experience += training.experience();
        m.gain_skill(training.skill());
        let (morale, energy) = training.wellbeing();
        m.adjust_wellbeing(morale, energy);
    }
    Ok(())
}

pub fn upgrade_training_program(state: &mut SimulationState) -> Result<u8, CommandError> {
    let current = state.company.training_program_level;
    let cost = training_program_upgrade_cost(current).ok_or_else(|| {
        CommandError::InvalidInput(format!("training program already at level {current}"))
    })?;
    state.company.spend(cost)?;
    state.company.training_program_level = current + 1;
    info!("training program upgraded to level {}", current + 1);
    Ok(current + 1)
}

/// Detach a staff member from wherever they work.
fn release(state: &mut SimulationState, id: StaffId) {
    let day = state.clock.day;
    let Some(member) = state.staff.get_mut(&id) else {
        return;
    };
    let role = member.role;
    match member.assignment.take() {
        Some(Assignment::Project(project_id)) => {
            if let Some(p) = state.projects.get_mut(&project_id) {
                if p.assigned_staff.get(&role) == Some(&id) {
                    p.assigned_staff.remove(&role);
                    p.record(day, ProjectLogKind::StaffReleased { role, staff: id });
                }
            }
        }
        Some(Assignment::LeasePool { county, technology }) => {
            let pool = state.lease_pool_mut(&county, technology);
            pool.scouts.retain(|s| *s != id);
        }
        None => {}
    }
    state.lease_pools.retain(|p| !p.scouts.is_empty());
}

/// Put a staff member on a project. Scouts work lease pools instead.
pub fn assign_staff(
    state: &mut SimulationState,
    staff_id: StaffId,
    project_id: ProjectId,
) -> Result<(), CommandError> {
    let role = member(state, staff_id)?.role;
    let project = state
        .projects
        .get(&project_id)
        .ok_or_else(|| CommandError::not_found("project", project_id))?;
    if role.works_in_lease_pool() {
        return Err(CommandError::InvalidInput(format!(
            "{role:?} #{staff_id} works a lease pool, not a project"
        )));
    }
    match project.staff_in(role) {
        Some(current) if current == staff_id => return Ok(()),
        Some(_) => {
            return Err(CommandError::CapacityExceeded {
                resource: "project role",
                limit: 1.0,
            })
        }
        None => {}
    }

    release(state, staff_id);
    let day = state.clock.day;
    if let Some(p) = state.projects.get_mut(&project_id) {
        p.assigned_staff.insert(role, staff_id);
        p.record(day, ProjectLogKind::StaffAssigned { role, staff: staff_id });
    }
    if let Some(m) = state.staff.get_mut(&staff_id) {
        m.assignment = Some(Assignment::Project(project_id));
    }
    super::market::refresh_market_value(state, project_id);
    Ok(())
}

/// Put a scout into the lease pool of a county and technology.
pub fn assign_lessor(
    state: &mut SimulationState,
    ctx: &TickContext<'_>,
    staff_id: StaffId,
    county: &str,
    technology: Technology,
) -> Result<(), CommandError> {
    let m = member(state, staff_id)?;
    if !m.role.works_in_lease_pool() {
        return Err(CommandError::InvalidInput(format!(
            "{:?} #{staff_id} cannot work a lease pool",
            m.role
        )));
    }
    let target = Assignment::LeasePool {
        county: county.to_string(),
        technology,
    };
    if m.assignment.as_ref() == Some(&target) {
        return Ok(());
    }
    if ctx.catalog.county(county).is_none() {
        return Err(CommandError::not_found("county", county));
    }
    let limit = ctx.config.lease_pool_size;
    if state.lease_pool(county, technology).map_or(0, |p| p.scouts.len()) >= limit {
        return Err(CommandError::CapacityExceeded {
            resource: "lease pool",
            limit: limit as f64,
        });
    }

    release(state, staff_id);
    state.lease_pool_mut(county, technology).scouts.push(staff_id);
    if let Some(m) = state.staff.get_mut(&staff_id) {
        m.assignment = Some(target);
    }
    Ok(())
}

pub fn unassign_staff(state: &mut SimulationState, staff_id: StaffId) -> Result<(), CommandError> {
    member(state, staff_id)?;
    release(state, staff_id);
    Ok(())
}

/// Experience, random events and promotions for every staff member.
pub fn staff_tick(state: &mut SimulationState, ctx: &mut TickContext<'_>) {
    let xp = experience_gain(ctx.config.base_experience_per_tick, state.company.training_program_level);
    let recovery = ctx.config.energy_recovery_per_tick;
    let event_chance = ctx.config.staff_event_chance;
    let ids: Vec<StaffId> = state.staff.keys().copied().collect();

    for id in ids {
        let Some(m) = state.staff.get_mut(&id) else {
            continue;
        };
        m.decay_productivity();
        m.adjust_wellbeing(0.0, recovery);
        m.experience += xp;

        if ctx.rng.chance(event_chance) {
            let weights = event_weights(m.morale, m.energy, m.skill);
            let kind = pick_event(&weights, ctx.rng.unit());
            let effect = kind.effect();
            m.apply_effect(&effect);
            let reputation_delta = effect.sentiment.reputation_delta();
            state.company.adjust_reputation(reputation_delta);
            debug!("staff #{id}: {kind:?}");
            ctx.emit(SimEvent::StaffEvent {
                staff: id,
                kind,
                reputation_delta,
            });
        }

        let Some(m) = state.staff.get_mut(&id) else {
            continue;
        };
        if let Some(next) = check_promotion(m.level, m.experience) {
            let (lo, hi) = next.promotion_skill_gain();
            let gain = ctx.rng.range_inclusive(lo as i64, hi as i64) as u8;
            m.level = next;
            m.gain_skill(gain);
            m.salary = monthly_salary(m.role, next);
            info!("staff #{id} promoted to {next:?} (skill {})", m.skill);
            ctx.emit(SimEvent::StaffPromoted {
                staff: id,
                level: next,
                skill: m.skill,
            });
        }
    }
}
