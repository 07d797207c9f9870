use serde::{Deserialize, Serialize};

/// Days advanced per `advance_day` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameSpeed {
    Normal,
    Fast,
    Faster,
    Fastest,
}

impl GameSpeed {
    pub fn days(self) -> u32 {
        match self {
            GameSpeed::Normal => 1,
            GameSpeed::Fast => 3,
            GameSpeed::Faster => 5,
            GameSpeed::Fastest => 10,
        }
    }

    pub fn from_days(days: u32) -> Option<GameSpeed> {
        match days {
            1 => Some(GameSpeed::Normal),
            3 => Some(GameSpeed::Fast),
            5 => Some(GameSpeed::Faster),
            10 => Some(GameSpeed::Fastest),
            _ => None,
        }
    }
}

/// In-game calendar. A turn lasts two days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameClock {
    pub day: u32,
    pub turn: u32,
    pub speed: GameSpeed,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            day: 0,
            turn: 0,
            speed: GameSpeed::Normal,
        }
    }

    /// Move one day forward. Returns `true` when a new turn started.
    pub fn tick(&mut self) -> bool {
        self.day += 1;
        if self.day % 2 == 0 {
            self.turn += 1;
            true
        } else {
            false
        }
    }

    /// Staff and project progress run on even days.
    pub fn is_progress_day(&self) -> bool {
        self.day % 2 == 0
    }

    pub fn is_project_event_day(&self) -> bool {
        self.day % 3 == 0
    }

    pub fn is_economic_day(&self) -> bool {
        self.day % 5 == 0
    }

    /// Salaries and loan installments, once a month.
    pub fn is_finance_day(&self) -> bool {
        self.day % 30 == 0
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_follow_even_days() {
        let mut clock = GameClock::new();
        assert!(!clock.tick());
        assert!(clock.tick());
        assert_eq!((clock.day, clock.turn), (2, 1));
        for _ in 0..8 {
            clock.tick();
        }
        assert_eq!((clock.day, clock.turn), (10, 5));
    }

    #[test]
    fn speeds() {
        assert_eq!(GameSpeed::from_days(5), Some(GameSpeed::Faster));
        assert_eq!(GameSpeed::from_days(2), None);
        assert_eq!(GameSpeed::Fastest.days(), 10);
    }
}
