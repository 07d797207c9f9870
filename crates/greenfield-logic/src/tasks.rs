//! Side processes that run alongside a project's main stage.
//!
//! A task advances linearly by `100 / duration` percent per tick and pays
//! out its [`TaskReward`] once, on the tick that brings it to `duration`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    EnvironmentalSurvey,
    GridStudy,
    LegalReview,
    CommunityConsultation,
}

/// What a task delivers when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskReward {
    /// Progress added to the project's current stage.
    pub progress: f64,
    pub reputation: i32,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::EnvironmentalSurvey,
        TaskKind::GridStudy,
        TaskKind::LegalReview,
        TaskKind::CommunityConsultation,
    ];

    /// Suggested duration in ticks.
    pub fn default_duration(self) -> u32 {
        match self {
            TaskKind::EnvironmentalSurvey => 10,
            TaskKind::GridStudy => 8,
            TaskKind::LegalReview => 5,
            TaskKind::CommunityConsultation => 6,
        }
    }

    /// Suggested cost.
    pub fn default_cost(self) -> f64 {
        match self {
            TaskKind::EnvironmentalSurvey => 40_000.0,
            TaskKind::GridStudy => 60_000.0,
            TaskKind::LegalReview => 25_000.0,
            TaskKind::CommunityConsultation => 15_000.0,
        }
    }

    pub fn reward(self) -> TaskReward {
        match self {
            TaskKind::EnvironmentalSurvey => TaskReward {
                progress: 15.0,
                reputation: 0,
            },
            TaskKind::GridStudy => TaskReward {
                progress: 20.0,
                reputation: 0,
            },
            TaskKind::LegalReview => TaskReward {
                progress: 10.0,
                reputation: 0,
            },
            TaskKind::CommunityConsultation => TaskReward {
                progress: 5.0,
                reputation: 3,
            },
        }
    }
}

/// Percent done after `elapsed` of `duration` ticks. Exactly 100 once
/// `elapsed` reaches `duration`.
pub fn task_progress(elapsed: u32, duration: u32) -> f64 {
    let duration = duration.max(1);
    if elapsed >= duration {
        100.0
    } else {
        elapsed as f64 * 100.0 / duration as f64
    }
}

/// Share of the cost returned when a task is cancelled.
pub const CANCEL_REFUND_SHARE: f64 = 0.5;
