use std::time::{Duration, Instant};

use crate::game::{CollisionType, GameState, Phase};

/// Why a game stopped counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Collision(CollisionType),
    /// Thrown away with a restart while still running
    Abandoned,
}

/// One finished game
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub score: u32,
    pub steps: u32,
    pub end: GameEnd,
    pub duration: Duration,
}

/// Everything played since the process started. In memory only.
#[derive(Debug)]
pub struct SessionMetrics {
    game_started: Instant,
    elapsed: Duration,
    records: Vec<GameRecord>,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            game_started: Instant::now(),
            elapsed: Duration::ZERO,
            records: Vec::new(),
        }
    }

    pub fn on_game_start(&mut self) {
        self.game_started = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    /// Advance the clock of the current game. Not called after game over,
    /// so the panel shows the time the game lasted.
    pub fn on_tick(&mut self) {
        self.elapsed = self.game_started.elapsed();
    }

    /// Close the current game. A game that is still running counts as
    /// abandoned.
    pub fn record(&mut self, state: &GameState) -> &GameRecord {
        let end = match state.phase {
            Phase::GameOver(collision) => GameEnd::Collision(collision),
            Phase::Running => GameEnd::Abandoned,
        };
        self.records.push(GameRecord {
            score: state.score,
            steps: state.steps,
            end,
            duration: self.game_started.elapsed(),
        });
        &self.records[self.records.len() - 1]
    }

    pub fn games_played(&self) -> usize {
        self.records.len()
    }

    pub fn abandoned(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.end == GameEnd::Abandoned)
            .count()
    }

    pub fn best_score(&self) -> u32 {
        self.records.iter().map(|record| record.score).max().unwrap_or(0)
    }

    pub fn last(&self) -> Option<&GameRecord> {
        self.records.last()
    }

    /// mm:ss of the current game
    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
