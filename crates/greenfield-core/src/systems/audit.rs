//! Audits of the company's illegal activity.

use greenfield_logic::audit::{audit_triggers, audit_verdict, AuditVerdict};
use log::{info, warn};

use crate::context::TickContext;
use crate::events::SimEvent;
use crate::state::SimulationState;

/// Whether the company can be audited at all.
pub fn audit_eligible(state: &SimulationState, ctx: &TickContext<'_>) -> bool {
    !ctx.config.audit_requires_exposure
        || state.company.illegals.has_exposure()
        || state.illegal_project_count() > 0
}

/// One audit turn: count the turn, maybe run an audit.
pub fn audit_tick(state: &mut SimulationState, ctx: &mut TickContext<'_>) -> Option<AuditVerdict> {
    state.company.turns_since_last_audit += 1;
    if !audit_eligible(state, ctx) {
        return None;
    }

    let exposure = state.audit_exposure();
    if !audit_triggers(&exposure, ctx.rng.unit()) {
        return None;
    }

    let verdict = audit_verdict(&exposure, ctx.rng.unit());
    let company = &mut state.company;
    company.turns_since_last_audit = 0;
    company.last_audit_day = Some(state.clock.day);
    match verdict {
        AuditVerdict::Passed { risk_reduction } => {
            company.illegals.audit_risk = (company.illegals.audit_risk - risk_reduction).max(0.0);
            info!("audit passed, risk now {:.0}", company.illegals.audit_risk);
            ctx.emit(SimEvent::AuditPassed { risk_reduction });
        }
        AuditVerdict::Failed { fine, reputation_loss } => {
            company.charge(fine, ctx.config.negative_cash_policy);
            company.adjust_reputation(-reputation_loss);
            warn!("audit failed: fine {fine:.0}, reputation -{reputation_loss}");
            ctx.emit(SimEvent::AuditFailed { fine, reputation_loss });
        }
    }
    Some(verdict)
}
