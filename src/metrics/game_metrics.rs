use std::time::{Duration, Instant};

/// Play-time bookkeeping for the header and the end-of-game log line
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub foods_eaten: u32,
    /// Set once the game ends; the clock stops there
    pub finished: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            foods_eaten: 0,
            finished: false,
        }
    }

    pub fn update(&mut self) {
        if !self.finished {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        *self = Self::new();
    }

    pub fn on_food_eaten(&mut self) {
        self.foods_eaten += 1;
    }

    pub fn on_game_over(&mut self) {
        self.update();
        self.finished = true;
    }

    /// Food per minute of play, 0 before the first full second
    pub fn pace(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs < 1.0 {
            0.0
        } else {
            self.foods_eaten as f64 * 60.0 / secs
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
