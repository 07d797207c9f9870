use greenfield_logic::config::NegativeCashPolicy;
use greenfield_logic::illegal::IllegalMethod;
use greenfield_logic::adjust_reputation;
use serde::{Deserialize, Serialize};

use super::ProjectId;
use crate::error::CommandError;

pub type LoanId = u32;

/// One recorded illegal action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IllegalAction {
    pub day: u32,
    pub project_id: ProjectId,
    pub method: IllegalMethod,
    pub cost: f64,
}

/// Corruption footprint of the company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Illegals {
    /// 0–100.
    pub corruption_network: f64,
    /// 0–100.
    pub audit_risk: f64,
    pub has_illegal_database: bool,
    pub total_bribes: f64,
    pub action_history: Vec<IllegalAction>,
}

impl Illegals {
    /// Whether the company has ever been exposed to an audit-worthy act.
    pub fn has_exposure(&self) -> bool {
        self.audit_risk > 0.0 || !self.action_history.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicMetrics {
    /// Money put into projects (start, stage, task and acceleration costs).
    pub total_investment: f64,
    pub total_revenue: f64,
    /// Every outflow, investment included.
    pub total_expenses: f64,
    pub roi: f64,
}

impl EconomicMetrics {
    pub fn record_investment(&mut self, amount: f64) {
        self.total_investment += amount;
        self.record_expense(amount);
    }

    pub fn record_expense(&mut self, amount: f64) {
        self.total_expenses += amount;
        self.refresh_roi();
    }

    pub fn record_revenue(&mut self, amount: f64) {
        self.total_revenue += amount;
        self.refresh_roi();
    }

    /// Undo part of an earlier investment.
    pub fn record_refund(&mut self, amount: f64) {
        self.total_investment -= amount;
        self.total_expenses -= amount;
        self.refresh_roi();
    }

    fn refresh_roi(&mut self) {
        self.roi = if self.total_investment > 0.0 {
            (self.total_revenue - self.total_expenses) / self.total_investment
        } else {
            0.0
        };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub principal: f64,
    /// Outstanding principal.
    pub remaining: f64,
    pub annual_rate: f64,
    pub monthly_payment: f64,
    pub months_left: u32,
}

impl Loan {
    /// Equal-installment loan.
    pub fn new(id: LoanId, principal: f64, annual_rate: f64, months: u32) -> Self {
        let r = annual_rate / 12.0;
        let n = months.max(1) as f64;
        let monthly_payment = if r > 0.0 {
            principal * r / (1.0 - (1.0 + r).powf(-n))
        } else {
            principal / n
        };
        Self {
            id,
            principal,
            remaining: principal,
            annual_rate,
            monthly_payment,
            months_left: months.max(1),
        }
    }

    /// Pay one installment. Returns the amount due this month.
    pub fn pay_installment(&mut self) -> f64 {
        if self.months_left == 0 {
            return 0.0;
        }
        self.months_left -= 1;
        if self.months_left == 0 {
            let interest = self.remaining * self.annual_rate / 12.0;
            let last = self.remaining + interest;
            self.remaining = 0.0;
            return last;
        }
        let interest = self.remaining * self.annual_rate / 12.0;
        self.remaining = (self.remaining - (self.monthly_payment - interest)).max(0.0);
        self.monthly_payment
    }

    pub fn is_repaid(&self) -> bool {
        self.months_left == 0
    }
}

/// The player's company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub cash: f64,
    /// 0–200, 100 is neutral.
    pub reputation: i32,
    pub illegals: Illegals,
    pub metrics: EconomicMetrics,
    pub loans: Vec<Loan>,
    /// 0–3, drives the experience multiplier.
    pub training_program_level: u8,
    /// Power brought to ready-to-build by this company.
    pub rtb_power_mw: f64,
    pub turns_since_last_audit: u32,
    pub last_audit_day: Option<u32>,
}

impl Company {
    pub fn new(cash: f64, reputation: i32) -> Self {
        Self {
            cash,
            reputation: adjust_reputation(reputation, 0),
            illegals: Illegals::default(),
            metrics: EconomicMetrics::default(),
            loans: Vec::new(),
            training_program_level: 0,
            rtb_power_mw: 0.0,
            turns_since_last_audit: 0,
            last_audit_day: None,
        }
    }

    pub fn adjust_reputation(&mut self, delta: i32) {
        self.reputation = adjust_reputation(self.reputation, delta);
    }

    /// Debit a validated purchase. Fails without side effects when short.
    pub fn spend(&mut self, amount: f64) -> Result<(), CommandError> {
        CommandError::ensure_funds(amount, self.cash)?;
        self.cash -= amount;
        self.metrics.record_expense(amount);
        Ok(())
    }

    /// Debit an investment into a project.
    pub fn invest(&mut self, amount: f64) -> Result<(), CommandError> {
        CommandError::ensure_funds(amount, self.cash)?;
        self.cash -= amount;
        self.metrics.record_investment(amount);
        Ok(())
    }

    /// Debit an obligation that cannot be refused (salaries, installments,
    /// fines). Returns the amount actually taken.
    pub fn charge(&mut self, amount: f64, policy: NegativeCashPolicy) -> f64 {
        let taken = match policy {
            NegativeCashPolicy::Allow => amount,
            NegativeCashPolicy::FloorAtZero => amount.min(self.cash.max(0.0)),
        };
        self.cash -= taken;
        self.metrics.record_expense(taken);
        taken
    }

    pub fn refund(&mut self, amount: f64) {
        self.cash += amount;
        self.metrics.record_refund(amount);
    }

    pub fn receive(&mut self, amount: f64) {
        self.cash += amount;
        self.metrics.record_revenue(amount);
    }
}
