//! Generation and storage technologies a project can be built around.

use serde::{Deserialize, Serialize};

/// Project technology. Hybrids combine two single technologies on one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Technology {
    /// Photovoltaic farm.
    Pv,
    /// Onshore wind farm.
    Wind,
    /// Battery energy storage system.
    Bess,
    PvBess,
    WindPv,
    WindBess,
}

impl Technology {
    pub const ALL: [Technology; 6] = [
        Technology::Pv,
        Technology::Wind,
        Technology::Bess,
        Technology::PvBess,
        Technology::WindPv,
        Technology::WindBess,
    ];

    /// The single technologies that make up this one.
    pub fn components(self) -> &'static [Technology] {
        match self {
            Technology::Pv => &[Technology::Pv],
            Technology::Wind => &[Technology::Wind],
            Technology::Bess => &[Technology::Bess],
            Technology::PvBess => &[Technology::Pv, Technology::Bess],
            Technology::WindPv => &[Technology::Wind, Technology::Pv],
            Technology::WindBess => &[Technology::Wind, Technology::Bess],
        }
    }

    pub fn is_hybrid(self) -> bool {
        self.components().len() > 1
    }

    /// Whether `other` names this technology or one of its components.
    /// Used for technology-scoped events and lessor specializations.
    pub fn involves(self, other: Technology) -> bool {
        self == other || self.components().contains(&other)
    }

    /// Base valuation multiplier. Hybrids take the mean of their parts.
    pub fn base_value_multiplier(self) -> f64 {
        match self {
            Technology::Pv => 1.0,
            Technology::Wind => 1.2,
            Technology::Bess => 1.5,
            _ => {
                let parts = self.components();
                parts.iter().map(|t| t.base_value_multiplier()).sum::<f64>() / parts.len() as f64
            }
        }
    }

    /// Installed power of a newly started project, in MW.
    pub fn default_power_mw(self) -> f64 {
        match self {
            Technology::Pv => 50.0,
            Technology::Wind => 40.0,
            Technology::Bess => 20.0,
            _ => self.components().iter().map(|t| t.default_power_mw()).sum(),
        }
    }

    /// Up-front cost of opening a project (initial lease options, site visit).
    pub fn start_cost(self) -> f64 {
        match self {
            Technology::Pv => 25_000.0,
            Technology::Wind => 40_000.0,
            Technology::Bess => 15_000.0,
            _ => self.components().iter().map(|t| t.start_cost()).sum(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Technology::Pv => "PV",
            Technology::Wind => "WF",
            Technology::Bess => "BESS",
            Technology::PvBess => "PV+BESS",
            Technology::WindPv => "WF+PV",
            Technology::WindBess => "WF+BESS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_multipliers() {
        assert!((Technology::Pv.base_value_multiplier() - 1.0).abs() < 1e-12);
        assert!((Technology::Wind.base_value_multiplier() - 1.2).abs() < 1e-12);
        assert!((Technology::Bess.base_value_multiplier() - 1.5).abs() < 1e-12);
        assert!((Technology::PvBess.base_value_multiplier() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn hybrids_involve_their_parts() {
        assert!(Technology::WindBess.involves(Technology::Wind));
        assert!(Technology::WindBess.involves(Technology::Bess));
        assert!(!Technology::WindBess.involves(Technology::Pv));
        assert!(!Technology::Pv.involves(Technology::PvBess));
        assert!(Technology::PvBess.is_hybrid());
        assert!(!Technology::Bess.is_hybrid());
    }

    #[test]
    fn hybrid_power_is_sum_of_parts() {
        assert!((Technology::WindPv.default_power_mw() - 90.0).abs() < 1e-12);
    }
}
