//! Regulatory stages a project moves through.
//!
//! A project starts in [`Stage::LandAcquisition`] and walks forward one
//! stage at a time until [`Stage::ReadyToBuild`]. Nothing skips a stage and
//! nothing moves backwards.
//!
//! Per-stage tunables (valuation multiplier, which roles add a progress
//! bonus and at what divisor) live in a single table, [`StageProfile`], so
//! the progress model and the valuation model read the same numbers.
//!
//! ```
//! use greenfield_logic::stages::Stage;
//!
//! let stage = Stage::LandAcquisition;
//! assert_eq!(stage.next(), Some(Stage::EnvironmentalDecision));
//! assert!(Stage::ReadyToBuild.is_terminal());
//! ```

use serde::{Deserialize, Serialize};

use crate::staff::Role;

/// Ordered regulatory stage of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    LandAcquisition,
    EnvironmentalDecision,
    ZoningConditions,
    GridConnection,
    ReadyToBuild,
}

impl Stage {
    /// All stages in order.
    pub const ALL: [Stage; 5] = [
        Stage::LandAcquisition,
        Stage::EnvironmentalDecision,
        Stage::ZoningConditions,
        Stage::GridConnection,
        Stage::ReadyToBuild,
    ];

    /// Position in the stage order (0-based).
    pub fn index(self) -> usize {
        match self {
            Stage::LandAcquisition => 0,
            Stage::EnvironmentalDecision => 1,
            Stage::ZoningConditions => 2,
            Stage::GridConnection => 3,
            Stage::ReadyToBuild => 4,
        }
    }

    /// The stage that follows this one, `None` for the terminal stage.
    pub fn next(self) -> Option<Stage> {
        Stage::ALL.get(self.index() + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::ReadyToBuild
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::LandAcquisition => "Land acquisition",
            Stage::EnvironmentalDecision => "Environmental decision",
            Stage::ZoningConditions => "Zoning conditions",
            Stage::GridConnection => "Grid connection",
            Stage::ReadyToBuild => "Ready to build",
        }
    }

    /// Static tunables for this stage.
    pub fn profile(self) -> &'static StageProfile {
        &STAGE_PROFILES[self.index()]
    }
}

/// A role whose assignment adds to stage progress, and the divisor applied
/// to its effective skill. Smaller divisor means more leverage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleBonus {
    pub role: Role,
    pub divisor: f64,
}

/// Per-stage configuration shared by the progress and valuation engines.
#[derive(Debug, Clone, PartialEq)]
pub struct StageProfile {
    pub stage: Stage,
    /// Fraction of the full RTB value a project in this stage is worth.
    pub value_multiplier: f64,
    /// Whether progress in this stage needs an assigned Developer.
    pub requires_developer: bool,
    /// Whether lessors from the county lease pool drive progress.
    pub uses_lessor_pool: bool,
    /// Role-specific bonuses added on top of the developer bonus.
    pub role_bonuses: &'static [RoleBonus],
}

/// Divisor applied to the Developer's effective skill in every stage that
/// requires one.
pub const DEVELOPER_BONUS_DIVISOR: f64 = 4.0;

static STAGE_PROFILES: [StageProfile; 5] = [
    StageProfile {
        stage: Stage::LandAcquisition,
        value_multiplier: 0.15,
        requires_developer: false,
        uses_lessor_pool: true,
        role_bonuses: &[],
    },
    StageProfile {
        stage: Stage::EnvironmentalDecision,
        value_multiplier: 0.35,
        requires_developer: true,
        uses_lessor_pool: false,
        role_bonuses: &[RoleBonus {
            role: Role::EnvSpecialist,
            divisor: 3.0,
        }],
    },
    StageProfile {
        stage: Stage::ZoningConditions,
        value_multiplier: 0.55,
        requires_developer: true,
        uses_lessor_pool: false,
        role_bonuses: &[
            RoleBonus {
                role: Role::Lawyer,
                divisor: 4.0,
            },
            RoleBonus {
                role: Role::Lobbyist,
                divisor: 5.0,
            },
        ],
    },
    StageProfile {
        stage: Stage::GridConnection,
        value_multiplier: 0.85,
        requires_developer: true,
        uses_lessor_pool: false,
        role_bonuses: &[
            RoleBonus {
                role: Role::Lawyer,
                divisor: 5.0,
            },
            RoleBonus {
                role: Role::Lobbyist,
                divisor: 3.0,
            },
        ],
    },
    StageProfile {
        stage: Stage::ReadyToBuild,
        value_multiplier: 1.0,
        requires_developer: false,
        uses_lessor_pool: false,
        role_bonuses: &[],
    },
];

/// Stage multiplier blended with in-stage progress: a project halfway
/// through Zoning is worth halfway between the Zoning and Grid multipliers.
pub fn blended_value_multiplier(stage: Stage, progress: f64) -> f64 {
    let current = stage.profile().value_multiplier;
    match stage.next() {
        Some(next) => {
            let t = (progress / 100.0).clamp(0.0, 1.0);
            current + (next.profile().value_multiplier - current) * t
        }
        None => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_strict() {
        for pair in Stage::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
        assert_eq!(Stage::ReadyToBuild.next(), None);
    }

    #[test]
    fn profile_table_is_indexed_by_stage() {
        for stage in Stage::ALL {
            assert_eq!(stage.profile().stage, stage);
        }
    }

    #[test]
    fn value_multipliers_match_table() {
        let expected = [0.15, 0.35, 0.55, 0.85, 1.0];
        for (stage, want) in Stage::ALL.iter().zip(expected) {
            assert!((stage.profile().value_multiplier - want).abs() < 1e-12);
        }
    }

    #[test]
    fn blending_interpolates_toward_next_stage() {
        assert!((blended_value_multiplier(Stage::LandAcquisition, 0.0) - 0.15).abs() < 1e-12);
        assert!((blended_value_multiplier(Stage::LandAcquisition, 50.0) - 0.25).abs() < 1e-12);
        assert!((blended_value_multiplier(Stage::GridConnection, 100.0) - 1.0).abs() < 1e-12);
        assert!((blended_value_multiplier(Stage::ReadyToBuild, 40.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn only_land_uses_lessors() {
        let land: Vec<_> = Stage::ALL
            .iter()
            .filter(|s| s.profile().uses_lessor_pool)
            .collect();
        assert_eq!(land, vec![&Stage::LandAcquisition]);
    }
}
