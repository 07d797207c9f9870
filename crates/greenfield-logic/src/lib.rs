//! Pure simulation logic for Greenfield.
//!
//! This crate holds every formula and static table of the renewable
//! project-development simulation. Functions take plain data and return
//! results; probabilistic decisions take their uniform roll as an argument,
//! so the engine owns all randomness and these functions stay deterministic.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`audit`] | Audit trigger probability, pass chance, fines |
//! | [`config`] | Simulation tunables and validation |
//! | [`costs`] | Stage-transition lump costs |
//! | [`global_events`] | Event catalog, effect bundles, scope matching |
//! | [`illegal`] | Illegal shortcuts and their risk footprint |
//! | [`progress`] | Per-tick stage progress model |
//! | [`project_events`] | Local events hitting a single project |
//! | [`staff`] | Roles, levels, staff events, experience and training |
//! | [`stages`] | Ordered stages and the shared per-stage table |
//! | [`tasks`] | Parallel side-process kinds and rewards |
//! | [`technology`] | PV / WF / BESS and hybrids |
//! | [`valuation`] | Market value formula and market shocks |

pub mod audit;
pub mod config;
pub mod costs;
pub mod global_events;
pub mod illegal;
pub mod progress;
pub mod project_events;
pub mod staff;
pub mod stages;
pub mod tasks;
pub mod technology;
pub mod valuation;

/// Identifier of an administrative region (from the county catalog).
pub type RegionId = String;
/// Identifier of a county (from the county catalog).
pub type CountyId = String;

/// Reputation bounds; 100 is neutral.
pub const MIN_REPUTATION: i32 = 0;
pub const MAX_REPUTATION: i32 = 200;
pub const NEUTRAL_REPUTATION: i32 = 100;

/// Apply a reputation delta, clamped to [0, 200].
pub fn adjust_reputation(reputation: i32, delta: i32) -> i32 {
    reputation.saturating_add(delta).clamp(MIN_REPUTATION, MAX_REPUTATION)
}
