use greenfield_logic::staff::{Level, Role, StaffEffect, MAX_SKILL, MIN_SKILL};
use greenfield_logic::technology::Technology;
use greenfield_logic::CountyId;
use serde::{Deserialize, Serialize};

use super::ProjectId;

pub type StaffId = u32;

/// Where a staff member works. Scouts work a county lease pool, every other
/// role works one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assignment {
    Project(ProjectId),
    LeasePool {
        county: CountyId,
        technology: Technology,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub role: Role,
    pub level: Level,
    /// 1–10, never decreases.
    pub skill: u8,
    pub experience: f64,
    /// 0–100.
    pub morale: f64,
    /// 0–100.
    pub energy: f64,
    /// Monthly salary.
    pub salary: f64,
    /// Scouts may specialize in one technology.
    pub specialization: Option<Technology>,
    /// Transient productivity multiplier from the last staff event.
    pub productivity: f64,
    pub productivity_ticks: u32,
    pub assignment: Option<Assignment>,
    pub hired_day: u32,
}

impl StaffMember {
    /// Skill after the transient productivity modifier.
    pub fn effective_skill(&self) -> f64 {
        f64::from(self.skill) * self.productivity
    }

    pub fn assigned_project(&self) -> Option<ProjectId> {
        match self.assignment {
            Some(Assignment::Project(id)) => Some(id),
            _ => None,
        }
    }

    /// Raise skill, saturating at the maximum.
    pub fn gain_skill(&mut self, amount: u8) {
        self.skill = self.skill.saturating_add(amount).clamp(MIN_SKILL, MAX_SKILL);
    }

    pub fn adjust_wellbeing(&mut self, morale: f64, energy: f64) {
        self.morale = (self.morale + morale).clamp(0.0, 100.0);
        self.energy = (self.energy + energy).clamp(0.0, 100.0);
    }

    /// Apply a staff event's effect bundle.
    pub fn apply_effect(&mut self, effect: &StaffEffect) {
        self.adjust_wellbeing(effect.morale, effect.energy);
        self.productivity = effect.productivity;
        self.productivity_ticks = effect.productivity_ticks;
        self.gain_skill(effect.skill);
        self.experience += effect.experience;
    }

    /// Count down the productivity modifier by one tick.
    pub fn decay_productivity(&mut self) {
        if self.productivity_ticks > 0 {
            self.productivity_ticks -= 1;
            if self.productivity_ticks == 0 {
                self.productivity = 1.0;
            }
        }
    }
}
