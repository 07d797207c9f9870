//! Monthly payroll and loans.

use log::{debug, info};

use crate::context::TickContext;
use crate::error::CommandError;
use crate::events::SimEvent;
use crate::state::{Loan, LoanId, SimulationState};

pub const MAX_LOAN_MONTHS: u32 = 360;

/// Borrow `amount`, repaid in equal monthly installments.
pub fn take_loan(
    state: &mut SimulationState,
    ctx: &TickContext<'_>,
    amount: f64,
    months: u32,
) -> Result<LoanId, CommandError> {
    if !(amount.is_finite() && amount > 0.0) {
        return Err(CommandError::InvalidInput(format!("loan amount must be positive, got {amount}")));
    }
    if months == 0 || months > MAX_LOAN_MONTHS {
        return Err(CommandError::InvalidInput(format!(
            "loan term must be 1..={MAX_LOAN_MONTHS} months, got {months}"
        )));
    }
    let id = state.allocate_loan_id();
    let loan = Loan::new(id, amount, ctx.config.loan_annual_rate, months);
    debug!("loan #{id}: {amount:.0} over {months} months, {:.0}/month", loan.monthly_payment);
    state.company.cash += amount;
    state.company.loans.push(loan);
    Ok(id)
}

/// Pay salaries and loan installments.
pub fn finance_tick(state: &mut SimulationState, ctx: &mut TickContext<'_>) {
    let policy = ctx.config.negative_cash_policy;
    let payroll = state.monthly_payroll();
    if payroll > 0.0 {
        let paid = state.company.charge(payroll, policy);
        ctx.emit(SimEvent::SalariesPaid { total: paid });
    }

    let installments: Vec<(LoanId, f64, bool)> = state
        .company
        .loans
        .iter_mut()
        .map(|loan| (loan.id, loan.pay_installment(), loan.is_repaid()))
        .collect();
    for (id, due, repaid) in installments {
        let paid = state.company.charge(due, policy);
        ctx.emit(SimEvent::LoanInstallment { loan: id, amount: paid });
        if repaid {
            info!("loan #{id} repaid");
            ctx.emit(SimEvent::LoanRepaid { loan: id });
        }
    }
    state.company.loans.retain(|l| !l.is_repaid());
}
