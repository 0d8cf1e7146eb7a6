//! Level progression and the win/loss state machine.

use log::info;

use crate::constants::enemies_required;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Still playing; a "level N" banner is fading in and out.
    LevelTransition,
    GameOver,
    GameWin,
}

/// What a single kill did to progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KillOutcome {
    Counted,
    LevelUp(u32),
    Won,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LevelState {
    pub level: u32,
    pub max_level: u32,
    pub enemies_destroyed: u32,
    pub enemies_required: u32,
    pub game_over: bool,
    pub game_win: bool,
    pub transition_active: bool,
    pub transition_start: u64,
    pub transition_ms: u64,
}

impl LevelState {
    pub fn new(max_level: u32, transition_ms: u64) -> Self {
        LevelState {
            level: 1,
            max_level,
            enemies_destroyed: 0,
            enemies_required: enemies_required(1),
            game_over: false,
            game_win: false,
            transition_active: false,
            transition_start: 0,
            transition_ms,
        }
    }

    pub fn status(&self) -> GameStatus {
        if self.game_win {
            GameStatus::GameWin
        } else if self.game_over {
            GameStatus::GameOver
        } else if self.transition_active {
            GameStatus::LevelTransition
        } else {
            GameStatus::Playing
        }
    }

    /// `true` once the simulation has stopped for good.
    pub fn is_terminal(&self) -> bool {
        self.game_over || self.game_win
    }

    /// Count one destroyed enemy and advance the level when the quota fills.
    pub fn record_kill(&mut self, now: u64) -> KillOutcome {
        self.enemies_destroyed += 1;
        if self.enemies_destroyed < self.enemies_required {
            return KillOutcome::Counted;
        }
        if self.level < self.max_level {
            self.level += 1;
            self.enemies_destroyed = 0;
            self.enemies_required = enemies_required(self.level);
            self.transition_active = true;
            self.transition_start = now;
            info!(
                "Level {} reached; {} kills required",
                self.level, self.enemies_required
            );
            KillOutcome::LevelUp(self.level)
        } else {
            if !self.game_win {
                info!("Final level cleared");
            }
            self.game_win = true;
            KillOutcome::Won
        }
    }

    pub fn mark_game_over(&mut self) {
        if !self.game_over {
            info!("Game over at level {}", self.level);
        }
        self.game_over = true;
    }

    /// End the transition banner once its duration has elapsed.  Returns
    /// `true` on the tick it ends.
    pub fn update_transition(&mut self, now: u64) -> bool {
        if self.transition_active && now.saturating_sub(self.transition_start) >= self.transition_ms {
            self.transition_active = false;
            return true;
        }
        false
    }

    /// Banner opacity: ramps 0 → 255 over the first half, back to 0 over the
    /// second.  `None` when no transition is showing.
    pub fn transition_opacity(&self, now: u64) -> Option<u8> {
        if !self.transition_active || self.transition_ms == 0 {
            return None;
        }
        let elapsed = now.saturating_sub(self.transition_start);
        if elapsed >= self.transition_ms {
            return None;
        }
        let half = self.transition_ms as f64 / 2.0;
        let elapsed = elapsed as f64;
        let ratio = if elapsed < half {
            elapsed / half
        } else {
            (self.transition_ms as f64 - elapsed) / half
        };
        Some((ratio * 255.0) as u8)
    }
}
