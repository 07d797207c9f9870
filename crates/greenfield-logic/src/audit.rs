//! Audit trigger and outcome model.
//!
//! Trigger probability:
//!
//! ```text
//! auditRisk/100
//!   + min(0.2, floor(turnsSinceLastAudit/10) × 0.05)
//!   + 0.1 if reputation < 50
//!   + min(0.3, illegalProjects × 0.03)
//! ```
//!
//! The raw sum can exceed 1.0; [`audit_triggers`] clamps it so a sum at or
//! above 1.0 always fires.
//!
//! ```
//! use greenfield_logic::audit::{audit_trigger_probability, audit_triggers, AuditExposure};
//!
//! let exposure = AuditExposure {
//!     audit_risk: 100.0,
//!     turns_since_last_audit: 50,
//!     reputation: 100,
//!     illegal_project_count: 3,
//!     illegal_history_len: 0,
//!     total_bribes: 0.0,
//! };
//! assert!(audit_trigger_probability(&exposure) > 1.0);
//! assert!(audit_triggers(&exposure, 0.999_999));
//! ```

/// Inputs the audit model reads from the company.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditExposure {
    /// 0–100.
    pub audit_risk: f64,
    pub turns_since_last_audit: u32,
    pub reputation: i32,
    pub illegal_project_count: usize,
    pub illegal_history_len: usize,
    pub total_bribes: f64,
}

/// Audit risk removed by a passed audit.
pub const PASS_RISK_REDUCTION: f64 = 10.0;
pub const MIN_PASS_PROBABILITY: f64 = 0.1;
pub const FINE_PER_ILLEGAL_PROJECT: f64 = 50_000.0;
pub const FINE_BRIBE_SHARE: f64 = 0.5;

pub fn time_since_last_audit_factor(turns: u32) -> f64 {
    ((turns / 10) as f64 * 0.05).min(0.2)
}

pub fn reputation_factor(reputation: i32) -> f64 {
    if reputation < 50 {
        0.1
    } else {
        0.0
    }
}

pub fn illegal_projects_factor(count: usize) -> f64 {
    (count as f64 * 0.03).min(0.3)
}

/// Unclamped trigger probability.
pub fn audit_trigger_probability(exposure: &AuditExposure) -> f64 {
    exposure.audit_risk / 100.0
        + time_since_last_audit_factor(exposure.turns_since_last_audit)
        + reputation_factor(exposure.reputation)
        + illegal_projects_factor(exposure.illegal_project_count)
}

/// Whether an audit fires for a uniform `roll` in [0, 1).
pub fn audit_triggers(exposure: &AuditExposure, roll: f64) -> bool {
    roll < audit_trigger_probability(exposure).clamp(0.0, 1.0)
}

pub fn pass_probability(exposure: &AuditExposure) -> f64 {
    (1.0 - exposure.illegal_project_count as f64 * 0.1 - exposure.illegal_history_len as f64 * 0.05)
        .max(MIN_PASS_PROBABILITY)
}

pub fn audit_fine(exposure: &AuditExposure) -> f64 {
    exposure.illegal_project_count as f64 * FINE_PER_ILLEGAL_PROJECT
        + exposure.total_bribes * FINE_BRIBE_SHARE
}

/// Reputation lost on a failed audit (positive number).
pub fn audit_reputation_loss(exposure: &AuditExposure) -> i32 {
    10 + exposure.illegal_project_count as i32 * 5 + exposure.illegal_history_len as i32 * 2
}

/// Result of an audit that fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuditVerdict {
    Passed { risk_reduction: f64 },
    Failed { fine: f64, reputation_loss: i32 },
}

/// Decide the outcome of a fired audit from a uniform `roll`.
pub fn audit_verdict(exposure: &AuditExposure, roll: f64) -> AuditVerdict {
    if roll < pass_probability(exposure) {
        AuditVerdict::Passed {
            risk_reduction: PASS_RISK_REDUCTION,
        }
    } else {
        AuditVerdict::Failed {
            fine: audit_fine(exposure),
            reputation_loss: audit_reputation_loss(exposure),
        }
    }
}
