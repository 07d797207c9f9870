//! Simulation tunables.
//!
//! [`SimConfig`] collects the knobs that are balance decisions rather than
//! part of a formula. It deserializes from JSON with every field optional
//! (missing fields fall back to [`SimConfig::default`]).
//!
//! ```
//! use greenfield_logic::config::{validate_config, SimConfig};
//!
//! let config = SimConfig::default();
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::global_events::EventCategory;

/// What happens when a debit would push cash below zero in code paths that
/// do not validate funds (salaries, loan installments, audit fines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegativeCashPolicy {
    /// Cash goes negative (debt).
    Allow,
    /// Cash stops at zero; the unpaid remainder is dropped.
    FloorAtZero,
}

/// Per-category activation probability per economic tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventProbabilities {
    pub economic: f64,
    pub political: f64,
    pub social: f64,
    pub environmental: f64,
    pub technological: f64,
}

impl Default for EventProbabilities {
    fn default() -> Self {
        Self {
            economic: 0.10,
            political: 0.08,
            social: 0.06,
            environmental: 0.05,
            technological: 0.07,
        }
    }
}

impl EventProbabilities {
    pub fn get(&self, category: EventCategory) -> f64 {
        match category {
            EventCategory::Economic => self.economic,
            EventCategory::Political => self.political,
            EventCategory::Social => self.social,
            EventCategory::Environmental => self.environmental,
            EventCategory::Technological => self.technological,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub starting_cash: f64,
    /// 0–200, 100 is neutral.
    pub starting_reputation: i32,
    /// Concurrent parallel tasks across all projects.
    pub max_parallel_tasks: usize,
    pub max_tasks_per_project: usize,
    /// Scouts per county/technology lease pool.
    pub lease_pool_size: usize,
    /// Chance per staff tick of a random staff event.
    pub staff_event_chance: f64,
    /// Experience per staff tick before the training multiplier.
    pub base_experience_per_tick: f64,
    /// Energy regained per staff tick.
    pub energy_recovery_per_tick: f64,
    pub event_probabilities: EventProbabilities,
    /// Chance per economic tick that a listed project finds a buyer.
    pub market_buyer_chance: f64,
    /// Annual interest on new loans.
    pub loan_annual_rate: f64,
    pub negative_cash_policy: NegativeCashPolicy,
    /// Run audits only once the company has any illegal exposure.
    pub audit_requires_exposure: bool,
    /// Seed for the production RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            starting_cash: 2_000_000.0,
            starting_reputation: 100,
            max_parallel_tasks: 3,
            max_tasks_per_project: 2,
            lease_pool_size: 3,
            staff_event_chance: 0.05,
            base_experience_per_tick: 10.0,
            energy_recovery_per_tick: 2.0,
            event_probabilities: EventProbabilities::default(),
            market_buyer_chance: 0.2,
            loan_annual_rate: 0.08,
            negative_cash_policy: NegativeCashPolicy::Allow,
            audit_requires_exposure: true,
            seed: None,
        }
    }
}

fn check_probability(errors: &mut Vec<String>, name: &str, p: f64) {
    if !(0.0..=1.0).contains(&p) {
        errors.push(format!("{name} must be within 0..=1, got {p}"));
    }
}

/// Validate a config. Returns a list of problems (empty = valid).
pub fn validate_config(config: &SimConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if !config.starting_cash.is_finite() {
        errors.push("starting_cash must be finite".to_string());
    }
    if !(0..=200).contains(&config.starting_reputation) {
        errors.push(format!(
            "starting_reputation must be within 0..=200, got {}",
            config.starting_reputation
        ));
    }
    if config.max_parallel_tasks == 0 {
        errors.push("max_parallel_tasks must be at least 1".to_string());
    }
    if config.max_tasks_per_project == 0 {
        errors.push("max_tasks_per_project must be at least 1".to_string());
    }
    if config.lease_pool_size == 0 {
        errors.push("lease_pool_size must be at least 1".to_string());
    }
    if config.base_experience_per_tick < 0.0 {
        errors.push("base_experience_per_tick must not be negative".to_string());
    }
    if config.loan_annual_rate < 0.0 {
        errors.push("loan_annual_rate must not be negative".to_string());
    }

    check_probability(&mut errors, "staff_event_chance", config.staff_event_chance);
    check_probability(&mut errors, "market_buyer_chance", config.market_buyer_chance);
    for cat in EventCategory::ALL {
        check_probability(
            &mut errors,
            &format!("event_probabilities.{cat:?}"),
            config.event_probabilities.get(cat),
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(validate_config(&SimConfig::default()).is_empty());
    }

    #[test]
    fn catches_bad_values() {
        let config = SimConfig {
            starting_reputation: 250,
            max_parallel_tasks: 0,
            staff_event_chance: 1.5,
            event_probabilities: EventProbabilities {
                social: -0.1,
                ..Default::default()
            },
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 4, "{errors:?}");
    }
}
