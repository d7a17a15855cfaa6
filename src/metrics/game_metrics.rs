use std::time::{Duration, Instant};

/// Session statistics across episodes
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub total_score: u64,
    pub total_frames: u64,
    /// Score and frames of the game in progress, if one is running
    current: Option<(u32, u32)>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            total_score: 0,
            total_frames: 0,
            current: None,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Start timing a new game. A game still running is counted as played.
    pub fn on_game_start(&mut self) {
        if let Some((score, frames)) = self.current.take() {
            self.on_game_over(score, frames);
        }
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.current = Some((0, 0));
    }

    /// Note the latest score and frame count of the running game
    pub fn on_progress(&mut self, score: u32, frames: u32) {
        if let Some(current) = self.current.as_mut() {
            *current = (score, frames);
        }
    }

    pub fn is_game_running(&self) -> bool {
        self.current.is_some()
    }

    pub fn on_game_over(&mut self, final_score: u32, frames: u32) {
        self.current = None;
        self.games_played += 1;
        self.total_score += u64::from(final_score);
        self.total_frames += u64::from(frames);
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn mean_score(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_score as f64 / f64::from(self.games_played)
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    pub fn format_summary(&self) -> String {
        format!(
            "games: {}  high score: {}  mean score: {:.2}  frames: {}",
            self.games_played,
            self.high_score,
            self.mean_score(),
            self.total_frames
        )
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10, 200);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5, 90);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15, 310);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.games_played, 3);
        assert_eq!(metrics.total_frames, 600);
    }

    #[test]
    fn test_mean_score() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.mean_score(), 0.0);

        metrics.on_game_over(1, 10);
        metrics.on_game_over(4, 10);
        assert_eq!(metrics.mean_score(), 2.5);
        assert!(metrics.format_summary().contains("mean score: 2.50"));
    }

    #[test]
    fn test_restart_counts_unfinished_game() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        metrics.on_progress(3, 40);
        assert!(metrics.is_game_running());

        metrics.on_game_start();

        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.high_score, 3);
        assert_eq!(metrics.total_frames, 40);
        assert!(metrics.is_game_running());
    }

    #[test]
    fn test_finished_game_not_counted_again_on_restart() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        metrics.on_game_over(2, 30);
        assert!(!metrics.is_game_running());

        // Progress after the game ended is ignored
        metrics.on_progress(9, 99);
        metrics.on_game_start();

        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.high_score, 2);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
