//! The simulation state tree.
//!
//! [`SimulationState`] is one plain value owning the clock, the company,
//! every project and staff member, lease pools, active global events and
//! the market. Systems read across subsystems only through the accessor
//! queries defined here.

mod clock;
mod company;
mod project;
mod staff;
mod world;

pub use clock::*;
pub use company::*;
pub use project::*;
pub use staff::*;
pub use world::*;

use std::collections::BTreeMap;

use greenfield_logic::audit::AuditExposure;
use greenfield_logic::config::SimConfig;
use greenfield_logic::global_events::{EffectType, ScopeQuery};
use greenfield_logic::progress::LessorContribution;
use greenfield_logic::staff::Role;
use greenfield_logic::technology::Technology;
use serde::{Deserialize, Serialize};

pub type ProjectId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub clock: GameClock,
    pub company: Company,
    pub projects: BTreeMap<ProjectId, Project>,
    pub staff: BTreeMap<StaffId, StaffMember>,
    pub lease_pools: Vec<LeasePool>,
    pub global_events: GlobalEventLog,
    pub market: Market,
    next_project_id: ProjectId,
    next_staff_id: StaffId,
    next_task_id: TaskId,
    next_loan_id: LoanId,
}

impl SimulationState {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            clock: GameClock::new(),
            company: Company::new(config.starting_cash, config.starting_reputation),
            projects: BTreeMap::new(),
            staff: BTreeMap::new(),
            lease_pools: Vec::new(),
            global_events: GlobalEventLog::default(),
            market: Market::default(),
            next_project_id: 1,
            next_staff_id: 1,
            next_task_id: 1,
            next_loan_id: 1,
        }
    }

    pub fn day(&self) -> u32 {
        self.clock.day
    }

    pub(crate) fn allocate_project_id(&mut self) -> ProjectId {
        let id = self.next_project_id;
        self.next_project_id += 1;
        id
    }

    pub(crate) fn allocate_staff_id(&mut self) -> StaffId {
        let id = self.next_staff_id;
        self.next_staff_id += 1;
        id
    }

    pub(crate) fn allocate_task_id(&mut self) -> TaskId {
        let id = self.next_task_id;
        self.next_task_id += 1;
        id
    }

    pub(crate) fn allocate_loan_id(&mut self) -> LoanId {
        let id = self.next_loan_id;
        self.next_loan_id += 1;
        id
    }

    // ── Accessor queries ────────────────────────────────────────────────

    /// Aggregate modifier of active global events for a scope.
    pub fn aggregate_modifier(&self, effect: EffectType, query: &ScopeQuery) -> f64 {
        self.global_events.aggregate(self.clock.day, effect, query)
    }

    /// Modifier for a project's own region and technology.
    pub fn project_modifier(&self, project: &Project, effect: EffectType) -> f64 {
        let query = ScopeQuery {
            region: Some(project.region_id.clone()),
            technology: Some(project.technology),
        };
        self.aggregate_modifier(effect, &query)
    }

    pub fn has_active_global_events(&self) -> bool {
        self.global_events.active_at(self.clock.day).next().is_some()
    }

    /// Effective skill of the staff member holding `role` on a project.
    pub fn role_skill(&self, project: &Project, role: Role) -> Option<f64> {
        project
            .staff_in(role)
            .and_then(|id| self.staff.get(&id))
            .map(StaffMember::effective_skill)
    }

    pub fn developer_skill(&self, project: &Project) -> Option<f64> {
        self.role_skill(project, Role::Developer)
    }

    /// Raw skill of the assigned Developer, ignoring productivity.
    pub fn developer_base_skill(&self, project: &Project) -> Option<f64> {
        project
            .staff_in(Role::Developer)
            .and_then(|id| self.staff.get(&id))
            .map(|s| f64::from(s.skill))
    }

    /// Effective skills of the supporting roles (not Developer, not Scout).
    pub fn supporting_skills(&self, project: &Project) -> Vec<(Role, f64)> {
        project
            .assigned_staff
            .iter()
            .filter(|(role, _)| !matches!(role, Role::Developer | Role::Scout))
            .filter_map(|(role, id)| self.staff.get(id).map(|s| (*role, s.effective_skill())))
            .collect()
    }

    pub fn lease_pool(&self, county: &str, technology: Technology) -> Option<&LeasePool> {
        self.lease_pools
            .iter()
            .find(|p| p.county == county && p.technology == technology)
    }

    pub(crate) fn lease_pool_mut(&mut self, county: &str, technology: Technology) -> &mut LeasePool {
        let idx = match self
            .lease_pools
            .iter()
            .position(|p| p.county == county && p.technology == technology)
        {
            Some(idx) => idx,
            None => {
                self.lease_pools.push(LeasePool {
                    county: county.to_string(),
                    technology,
                    scouts: Vec::new(),
                });
                self.lease_pools.len() - 1
            }
        };
        &mut self.lease_pools[idx]
    }

    /// Lessor contributions from the pool matching a project's county and
    /// technology.
    pub fn lessors_for(&self, county: &str, technology: Technology) -> Vec<LessorContribution> {
        self.lease_pool(county, technology)
            .map(|pool| {
                pool.scouts
                    .iter()
                    .filter_map(|id| self.staff.get(id))
                    .map(|s| LessorContribution {
                        effective_skill: s.effective_skill(),
                        specialization_match: s.specialization.map_or(false, |t| technology.involves(t)),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn illegal_project_count(&self) -> usize {
        self.projects.values().filter(|p| p.uses_illegal_methods).count()
    }

    /// Power of the company's projects located in a county.
    pub fn used_capacity_mw(&self, county: &str) -> f64 {
        self.projects
            .values()
            .filter(|p| p.county_id == county)
            .map(|p| p.power_mw)
            .sum()
    }

    pub fn task_count(&self) -> usize {
        self.projects.values().map(|p| p.tasks.len()).sum()
    }

    /// Project owning a task.
    pub fn task_owner(&self, task: TaskId) -> Option<ProjectId> {
        self.projects
            .values()
            .find(|p| p.tasks.iter().any(|t| t.id == task))
            .map(|p| p.id)
    }

    pub fn audit_exposure(&self) -> AuditExposure {
        let illegals = &self.company.illegals;
        AuditExposure {
            audit_risk: illegals.audit_risk,
            turns_since_last_audit: self.company.turns_since_last_audit,
            reputation: self.company.reputation,
            illegal_project_count: self.illegal_project_count(),
            illegal_history_len: illegals.action_history.len(),
            total_bribes: illegals.total_bribes,
        }
    }

    pub fn monthly_payroll(&self) -> f64 {
        self.staff.values().map(|s| s.salary).sum()
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_follows_config() {
        let config = SimConfig {
            starting_cash: 5_000.0,
            starting_reputation: 120,
            ..Default::default()
        };
        let state = SimulationState::new(&config);
        assert_eq!(state.company.cash, 5_000.0);
        assert_eq!(state.company.reputation, 120);
        assert_eq!(state.day(), 0);
        assert!(state.projects.is_empty());
    }

    #[test]
    fn ids_are_sequential() {
        let mut state = SimulationState::new(&SimConfig::default());
        assert_eq!(state.allocate_project_id(), 1);
        assert_eq!(state.allocate_project_id(), 2);
        assert_eq!(state.allocate_staff_id(), 1);
    }

    #[test]
    fn lease_pools_are_created_on_demand() {
        let mut state = SimulationState::new(&SimConfig::default());
        state.lease_pool_mut("pl-2201", Technology::Pv).scouts.push(4);
        state.lease_pool_mut("pl-2201", Technology::Pv).scouts.push(5);
        assert_eq!(state.lease_pools.len(), 1);
        assert!(state.lease_pool("pl-2201", Technology::Wind).is_none());
        assert_eq!(state.lease_pool("pl-2201", Technology::Pv).map(|p| p.scouts.len()), Some(2));
    }
}
