//! Per-tick stage progress model.
//!
//! The increment for one tick is
//!
//! ```text
//! (BASE_PROGRESS × PROGRESS_SCALE + stage bonus)
//!     × developer factor
//!     ÷ reputation time multiplier
//!     × illegal-method multiplier
//!     ÷ permit-time modifier (global events)
//! ```
//!
//! The stage bonus comes from the stage's [`StageProfile`](crate::stages::StageProfile):
//! lessor contributions in Land Acquisition, Developer plus role bonuses in
//! the permitting stages.
//!
//! ```
//! use greenfield_logic::progress::{progress_increment, LessorContribution, ProgressInput};
//! use greenfield_logic::stages::Stage;
//!
//! let lessors = [LessorContribution { effective_skill: 5.0, specialization_match: false }];
//! let input = ProgressInput {
//!     lessors: &lessors,
//!     ..ProgressInput::neutral(Stage::LandAcquisition)
//! };
//! let p = progress_increment(&input);
//! assert!((p.total - 4.75).abs() < 1e-9);
//! ```

use crate::staff::Role;
use crate::stages::{Stage, DEVELOPER_BONUS_DIVISOR};

/// Fixed per-tick base progress before scaling.
pub const BASE_PROGRESS: f64 = 2.5;
/// Uniform scale applied to the base (net base 3.75).
pub const PROGRESS_SCALE: f64 = 1.5;
/// Divisor applied to a lessor's effective skill.
pub const LESSOR_SKILL_DIVISOR: f64 = 5.0;
/// Lessor contribution multiplier when specialized in the project's technology.
pub const SPECIALIZATION_MATCH_BONUS: f64 = 1.5;
/// Lessor contribution multiplier while the company owns an illegal land database.
pub const ILLEGAL_DATABASE_BONUS: f64 = 1.2;
/// Progress factor in developer stages when no Developer is assigned.
pub const MISSING_DEVELOPER_PENALTY: f64 = 0.3;

/// Baseline boost from illegal methods.
pub const ILLEGAL_BASE_MULTIPLIER: f64 = 1.4;
/// Extra boost at a fully built corruption network.
pub const ILLEGAL_NETWORK_BONUS: f64 = 0.3;

/// Chance per progress tick that an illegal project is exposed.
pub const ILLEGAL_DETECTION_CHANCE: f64 = 0.10;
pub const ILLEGAL_DETECTION_REPUTATION: i32 = -10;
/// Reputation for completing a stage legally.
pub const STAGE_COMPLETION_REPUTATION: i32 = 5;
/// Reputation for reaching Ready-to-Build legally.
pub const READY_TO_BUILD_REPUTATION: i32 = 10;

pub const MAX_PROGRESS: f64 = 100.0;

/// One lessor working the county/technology lease pool of a project.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LessorContribution {
    /// Skill after the member's transient productivity modifier.
    pub effective_skill: f64,
    pub specialization_match: bool,
}

/// Everything the progress model needs about one project for one tick.
#[derive(Debug, Clone)]
pub struct ProgressInput<'a> {
    pub stage: Stage,
    pub lessors: &'a [LessorContribution],
    /// Effective skill of the assigned Developer, if any.
    pub developer_skill: Option<f64>,
    /// Effective skills of other assigned roles.
    pub role_skills: &'a [(Role, f64)],
    pub reputation: i32,
    pub uses_illegal_methods: bool,
    /// Corruption network strength, 0–100.
    pub corruption_network: f64,
    pub has_illegal_database: bool,
    /// Aggregate permit-time modifier from active global events (1.0 = none).
    pub permit_time_modifier: f64,
}

impl<'a> ProgressInput<'a> {
    /// A project with no staff, neutral reputation and no modifiers.
    pub fn neutral(stage: Stage) -> Self {
        Self {
            stage,
            lessors: &[],
            developer_skill: None,
            role_skills: &[],
            reputation: 100,
            uses_illegal_methods: false,
            corruption_network: 0.0,
            has_illegal_database: false,
            permit_time_modifier: 1.0,
        }
    }
}

/// Factors that made up one tick's increment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBreakdown {
    pub base: f64,
    pub stage_bonus: f64,
    pub developer_factor: f64,
    pub reputation_factor: f64,
    pub illegal_factor: f64,
    pub permit_factor: f64,
    pub total: f64,
}

/// Stage-duration multiplier from reputation. Below 100, every 20 points
/// lengthen stages by 5%; at or above 100 it is neutral.
pub fn reputation_time_multiplier(reputation: i32) -> f64 {
    if reputation >= 100 {
        1.0
    } else {
        1.0 + (100 - reputation) as f64 / 20.0 * 0.05
    }
}

/// Speed-up from illegal methods, scaled by the corruption network.
pub fn illegal_method_multiplier(uses_illegal_methods: bool, corruption_network: f64) -> f64 {
    if uses_illegal_methods {
        ILLEGAL_BASE_MULTIPLIER + ILLEGAL_NETWORK_BONUS * (corruption_network / 100.0).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

fn lessor_bonus(lessors: &[LessorContribution], has_illegal_database: bool) -> f64 {
    let sum: f64 = lessors
        .iter()
        .map(|l| {
            let c = l.effective_skill / LESSOR_SKILL_DIVISOR;
            if l.specialization_match {
                c * SPECIALIZATION_MATCH_BONUS
            } else {
                c
            }
        })
        .sum();
    if has_illegal_database {
        sum * ILLEGAL_DATABASE_BONUS
    } else {
        sum
    }
}

/// Compute the progress increment for one tick. Terminal projects get zero.
pub fn progress_increment(input: &ProgressInput<'_>) -> ProgressBreakdown {
    if input.stage.is_terminal() {
        return ProgressBreakdown {
            base: 0.0,
            stage_bonus: 0.0,
            developer_factor: 1.0,
            reputation_factor: 1.0,
            illegal_factor: 1.0,
            permit_factor: 1.0,
            total: 0.0,
        };
    }

    let profile = input.stage.profile();
    let base = BASE_PROGRESS * PROGRESS_SCALE;

    let mut stage_bonus = 0.0;
    if profile.uses_lessor_pool {
        stage_bonus += lessor_bonus(input.lessors, input.has_illegal_database);
    }

    let mut developer_factor = 1.0;
    if profile.requires_developer {
        match input.developer_skill {
            Some(skill) => stage_bonus += skill / DEVELOPER_BONUS_DIVISOR,
            None => developer_factor = MISSING_DEVELOPER_PENALTY,
        }
    }

    for bonus in profile.role_bonuses {
        stage_bonus += input
            .role_skills
            .iter()
            .filter(|(role, _)| *role == bonus.role)
            .map(|(_, skill)| skill / bonus.divisor)
            .sum::<f64>();
    }

    let reputation_factor = 1.0 / reputation_time_multiplier(input.reputation);
    let illegal_factor = illegal_method_multiplier(input.uses_illegal_methods, input.corruption_network);
    let permit_factor = if input.permit_time_modifier > 0.0 {
        1.0 / input.permit_time_modifier
    } else {
        1.0
    };

    let total = (base + stage_bonus) * developer_factor * reputation_factor * illegal_factor * permit_factor;

    ProgressBreakdown {
        base,
        stage_bonus,
        developer_factor,
        reputation_factor,
        illegal_factor,
        permit_factor,
        total: total.max(0.0),
    }
}

/// Add `delta` to `progress`, clamped to [0, 100]. Returns the new value and
/// whether this step crossed 100 from below.
pub fn apply_progress(progress: f64, delta: f64) -> (f64, bool) {
    let next = (progress + delta).clamp(0.0, MAX_PROGRESS);
    let crossed = progress < MAX_PROGRESS && next >= MAX_PROGRESS;
    (next, crossed)
}
