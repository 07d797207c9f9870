//! Staff roles, levels, random staff events and experience progression.
//!
//! # Random events
//!
//! Each staff tick a member has a small chance of a random event. The event
//! is drawn from a weighted table whose weights depend on the member's
//! morale, energy and skill (see [`event_weights`]). Weights are always
//! renormalized to sum to 1 before a draw.
//!
//! ```
//! use greenfield_logic::staff::{event_weights, pick_event};
//!
//! let weights = event_weights(80.0, 80.0, 5);
//! let total: f64 = weights.iter().map(|(_, w)| w).sum();
//! assert!((total - 1.0).abs() < 1e-9);
//! let _event = pick_event(&weights, 0.42);
//! ```
//!
//! # Leveling
//!
//! Experience accrues a flat amount per tick, scaled by the company's
//! training program. Thresholds are absolute and compared with `>`:
//! a Junior at exactly 3000 XP is still a Junior.

use serde::{Deserialize, Serialize};

/// Job role of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Negotiates land leases; works out of a county lease pool.
    Scout,
    Developer,
    Lawyer,
    EnvSpecialist,
    Lobbyist,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Scout,
        Role::Developer,
        Role::Lawyer,
        Role::EnvSpecialist,
        Role::Lobbyist,
    ];

    /// Monthly salary of a Junior in this role.
    pub fn base_salary(self) -> f64 {
        match self {
            Role::Scout => 8_000.0,
            Role::Developer => 12_000.0,
            Role::Lawyer => 14_000.0,
            Role::EnvSpecialist => 10_000.0,
            Role::Lobbyist => 13_000.0,
        }
    }

    /// Scouts are assigned to lease pools; every other role to a project.
    pub fn works_in_lease_pool(self) -> bool {
        self == Role::Scout
    }
}

/// Seniority. Only ever moves Junior → Mid → Senior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Junior,
    Mid,
    Senior,
}

impl Level {
    /// Inclusive skill range a new hire of this level is drawn from.
    pub fn skill_range(self) -> (u8, u8) {
        match self {
            Level::Junior => (1, 4),
            Level::Mid => (4, 7),
            Level::Senior => (7, 10),
        }
    }

    pub fn salary_multiplier(self) -> f64 {
        match self {
            Level::Junior => 1.0,
            Level::Mid => 1.5,
            Level::Senior => 2.2,
        }
    }

    /// The next level and the experience that must be exceeded to reach it.
    pub fn promotion(self) -> Option<(Level, f64)> {
        match self {
            Level::Junior => Some((Level::Mid, JUNIOR_TO_MID_XP)),
            Level::Mid => Some((Level::Senior, MID_TO_SENIOR_XP)),
            Level::Senior => None,
        }
    }

    /// Inclusive skill gain rolled on promotion into this level.
    pub fn promotion_skill_gain(self) -> (u8, u8) {
        match self {
            Level::Junior => (0, 0),
            Level::Mid => (1, 3),
            Level::Senior => (2, 4),
        }
    }
}

pub const MIN_SKILL: u8 = 1;
pub const MAX_SKILL: u8 = 10;

/// Experience that must be exceeded for Junior → Mid.
pub const JUNIOR_TO_MID_XP: f64 = 3000.0;
/// Experience that must be exceeded for Mid → Senior.
pub const MID_TO_SENIOR_XP: f64 = 8000.0;

/// Months of salary paid on dismissal.
pub const SEVERANCE_MONTHS: f64 = 3.0;

pub fn monthly_salary(role: Role, level: Level) -> f64 {
    role.base_salary() * level.salary_multiplier()
}

/// One-off recruitment cost (one month of salary).
pub fn hiring_cost(role: Role, level: Level) -> f64 {
    monthly_salary(role, level)
}

pub fn severance_cost(monthly_salary: f64) -> f64 {
    monthly_salary * SEVERANCE_MONTHS
}

/// Experience multiplier of the company training program, levels 0–3.
pub fn training_program_multiplier(level: u8) -> f64 {
    match level {
        0 => 1.0,
        1 => 1.1,
        2 => 1.2,
        _ => 1.35,
    }
}

pub const MAX_TRAINING_PROGRAM_LEVEL: u8 = 3;

/// Cost of raising the training program from `current` to `current + 1`.
pub fn training_program_upgrade_cost(current: u8) -> Option<f64> {
    match current {
        0 => Some(100_000.0),
        1 => Some(250_000.0),
        2 => Some(500_000.0),
        _ => None,
    }
}

/// Experience gained in one tick.
pub fn experience_gain(base_per_tick: f64, training_program_level: u8) -> f64 {
    base_per_tick * training_program_multiplier(training_program_level)
}

/// Level the member qualifies for with `experience`, if above `level`.
/// Promotes at most one level per call.
pub fn check_promotion(level: Level, experience: f64) -> Option<Level> {
    match level.promotion() {
        Some((next, threshold)) if experience > threshold => Some(next),
        _ => None,
    }
}

/// Random staff event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffEventKind {
    Vacation,
    Illness,
    Burnout,
    Promotion,
    Conflict,
    Innovation,
    Mistake,
}

impl StaffEventKind {
    pub const ALL: [StaffEventKind; 7] = [
        StaffEventKind::Vacation,
        StaffEventKind::Illness,
        StaffEventKind::Burnout,
        StaffEventKind::Promotion,
        StaffEventKind::Conflict,
        StaffEventKind::Innovation,
        StaffEventKind::Mistake,
    ];

    fn base_weight(self) -> f64 {
        match self {
            StaffEventKind::Vacation => 0.20,
            StaffEventKind::Illness => 0.15,
            StaffEventKind::Burnout => 0.10,
            StaffEventKind::Promotion => 0.10,
            StaffEventKind::Conflict => 0.15,
            StaffEventKind::Innovation => 0.15,
            StaffEventKind::Mistake => 0.15,
        }
    }

    /// Effect bundle applied when the event fires.
    pub fn effect(self) -> StaffEffect {
        match self {
            StaffEventKind::Vacation => StaffEffect {
                morale: 15.0,
                energy: 30.0,
                productivity: 0.5,
                productivity_ticks: 3,
                skill: 0,
                experience: 0.0,
                sentiment: Sentiment::Neutral,
            },
            StaffEventKind::Illness => StaffEffect {
                morale: -5.0,
                energy: -30.0,
                productivity: 0.5,
                productivity_ticks: 4,
                skill: 0,
                experience: 0.0,
                sentiment: Sentiment::Neutral,
            },
            StaffEventKind::Burnout => StaffEffect {
                morale: -25.0,
                energy: -40.0,
                productivity: 0.4,
                productivity_ticks: 5,
                skill: 0,
                experience: 0.0,
                sentiment: Sentiment::Negative,
            },
            StaffEventKind::Promotion => StaffEffect {
                morale: 20.0,
                energy: 0.0,
                productivity: 1.1,
                productivity_ticks: 3,
                skill: 1,
                experience: 500.0,
                sentiment: Sentiment::Positive,
            },
            StaffEventKind::Conflict => StaffEffect {
                morale: -15.0,
                energy: -5.0,
                productivity: 0.8,
                productivity_ticks: 3,
                skill: 0,
                experience: 0.0,
                sentiment: Sentiment::Negative,
            },
            StaffEventKind::Innovation => StaffEffect {
                morale: 10.0,
                energy: 0.0,
                productivity: 1.3,
                productivity_ticks: 3,
                skill: 0,
                experience: 300.0,
                sentiment: Sentiment::Positive,
            },
            StaffEventKind::Mistake => StaffEffect {
                morale: -10.0,
                energy: 0.0,
                productivity: 0.7,
                productivity_ticks: 2,
                skill: 0,
                experience: 100.0,
                sentiment: Sentiment::Negative,
            },
        }
    }
}

/// Whether an event reflects on the company's reputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Reputation change caused by an event with this sentiment.
    pub fn reputation_delta(self) -> i32 {
        match self {
            Sentiment::Positive => 2,
            Sentiment::Neutral => 0,
            Sentiment::Negative => -2,
        }
    }
}

/// Deltas applied to a staff member by an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaffEffect {
    pub morale: f64,
    pub energy: f64,
    /// Transient productivity multiplier and how many ticks it lasts.
    pub productivity: f64,
    pub productivity_ticks: u32,
    pub skill: u8,
    pub experience: f64,
    pub sentiment: Sentiment,
}

/// Event weights for a member's current condition, normalized to sum to 1.
pub fn event_weights(morale: f64, energy: f64, skill: u8) -> Vec<(StaffEventKind, f64)> {
    let mut weights: Vec<(StaffEventKind, f64)> = StaffEventKind::ALL
        .iter()
        .map(|&kind| {
            let mut w = kind.base_weight();
            if morale < 50.0 {
                match kind {
                    StaffEventKind::Burnout => w *= 3.0,
                    StaffEventKind::Conflict => w *= 2.0,
                    _ => {}
                }
            }
            if energy < 50.0 {
                match kind {
                    StaffEventKind::Illness => w *= 2.0,
                    StaffEventKind::Mistake => w *= 1.5,
                    _ => {}
                }
            }
            if skill > 7 {
                match kind {
                    StaffEventKind::Innovation => w *= 2.0,
                    StaffEventKind::Promotion => w *= 1.5,
                    _ => {}
                }
            }
            (kind, w)
        })
        .collect();

    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    if total > 0.0 {
        for (_, w) in &mut weights {
            *w /= total;
        }
    }
    weights
}

/// Pick an event from normalized weights with a uniform roll in [0, 1).
pub fn pick_event(weights: &[(StaffEventKind, f64)], roll: f64) -> StaffEventKind {
    let mut acc = 0.0;
    for &(kind, w) in weights {
        acc += w;
        if roll < acc {
            return kind;
        }
    }
    // Rounding can leave the cumulative sum a hair under 1.0.
    weights
        .last()
        .map(|(kind, _)| *kind)
        .unwrap_or(StaffEventKind::Vacation)
}

/// Paid training a single staff member can be sent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingType {
    /// Experience boost.
    Course,
    /// +1 skill.
    Certification,
    /// Morale and energy boost.
    TeamBuilding,
}

impl TrainingType {
    pub fn cost(self) -> f64 {
        match self {
            TrainingType::Course => 20_000.0,
            TrainingType::Certification => 50_000.0,
            TrainingType::TeamBuilding => 10_000.0,
        }
    }

    pub fn experience(self) -> f64 {
        match self {
            TrainingType::Course => 1500.0,
            _ => 0.0,
        }
    }

    pub fn skill(self) -> u8 {
        match self {
            TrainingType::Certification => 1,
            _ => 0,
        }
    }

    /// Morale and energy deltas.
    pub fn wellbeing(self) -> (f64, f64) {
        match self {
            TrainingType::TeamBuilding => (20.0, 20.0),
            _ => (0.0, 0.0),
        }
    }
}
