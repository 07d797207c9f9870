//! Local events that hit a single project.
//!
//! Rolled on project-event ticks for every project still in development.

use serde::{Deserialize, Serialize};

/// Chance per project-event tick that a project sees a local event.
pub const PROJECT_EVENT_CHANCE: f64 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectEventKind {
    LocalProtest,
    OfficialDelay,
    FavorableRuling,
    CommunitySupport,
}

impl ProjectEventKind {
    pub const ALL: [ProjectEventKind; 4] = [
        ProjectEventKind::LocalProtest,
        ProjectEventKind::OfficialDelay,
        ProjectEventKind::FavorableRuling,
        ProjectEventKind::CommunitySupport,
    ];

    pub fn weight(self) -> f64 {
        match self {
            ProjectEventKind::LocalProtest => 0.3,
            ProjectEventKind::OfficialDelay => 0.3,
            ProjectEventKind::FavorableRuling => 0.2,
            ProjectEventKind::CommunitySupport => 0.2,
        }
    }

    /// Progress change in the current stage.
    pub fn progress_delta(self) -> f64 {
        match self {
            ProjectEventKind::LocalProtest => -5.0,
            ProjectEventKind::OfficialDelay => -3.0,
            ProjectEventKind::FavorableRuling => 5.0,
            ProjectEventKind::CommunitySupport => 3.0,
        }
    }
}

/// Pick a project event with a uniform roll in [0, 1).
pub fn pick_project_event(roll: f64) -> ProjectEventKind {
    let total: f64 = ProjectEventKind::ALL.iter().map(|k| k.weight()).sum();
    let mut acc = 0.0;
    for kind in ProjectEventKind::ALL {
        acc += kind.weight() / total;
        if roll < acc {
            return kind;
        }
    }
    ProjectEventKind::CommunitySupport
}
