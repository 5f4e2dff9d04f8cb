use std::time::{Duration, Instant};

/// Wall-clock timing for the session on screen
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Set once the session ends so the clock stops
    pub stopped: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            stopped: false,
        }
    }

    pub fn update(&mut self) {
        if !self.stopped {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.stopped = false;
    }

    pub fn on_game_over(&mut self) {
        self.update();
        self.stopped = true;
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
