use alloc::string::String;
use rand::prelude::*;
use web_time::Instant;

use crate::*;

/// Highest value the timer readout ever reaches.
pub const MAX_TIMER_SECS: u32 = 999;

/// Wall-clock timer that starts with the first reveal and freezes when the game ends.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GameTimer {
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl GameTimer {
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn stop(&mut self, now: Instant) {
        if self.started_at.is_some() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_none()
    }

    /// Whole seconds between start and `now` (or the stop time), 0 if never started.
    pub fn elapsed_secs_at(&self, now: Instant) -> u32 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let end = self.ended_at.unwrap_or(now);
        end.saturating_duration_since(started_at)
            .as_secs()
            .min(u64::from(MAX_TIMER_SECS)) as u32
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs_at(Instant::now())
    }
}

/// A player's sitting: the current board, its timer, and the seed source for the
/// next game. Resetting drops the board and starts over with the same config.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    rng: SmallRng,
    board: Board,
    timer: GameTimer,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = Board::new(config, rng.random());
        Self {
            config,
            rng,
            board,
            timer: GameTimer::default(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    pub fn state(&self) -> GameState {
        self.board.state()
    }

    pub fn reset(&mut self) {
        self.board = Board::new(self.config, self.rng.random());
        self.timer = GameTimer::default();
        log::debug!(
            "New game {}x{} with {} mines",
            self.config.rows(),
            self.config.cols(),
            self.config.mines()
        );
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let was_initial = self.board.state().is_initial();
        let report = self.board.reveal(coords)?;

        if report.outcome.has_update() {
            let now = Instant::now();
            if was_initial {
                self.timer.start(now);
            }
            if self.board.is_finished() {
                self.timer.stop(now);
                log::info!(
                    "Game {:?} after {}s",
                    self.board.state(),
                    self.timer.elapsed_secs_at(now)
                );
            }
        }
        Ok(report)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagReport> {
        self.board.toggle_flag(coords)
    }

    /// Formatted `mines - flags`.
    pub fn mine_counter(&self) -> String {
        format_counter(self.board.flags_remaining())
    }

    pub fn timer_display_at(&self, now: Instant) -> String {
        format_counter(self.timer.elapsed_secs_at(now) as i32)
    }

    pub fn timer_display(&self) -> String {
        self.timer_display_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    #[test]
    fn timer_is_zero_until_started() {
        let timer = GameTimer::default();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_secs_at(Instant::now() + Duration::from_secs(30)), 0);
    }

    #[test]
    fn timer_counts_and_freezes() {
        let start = Instant::now();
        let mut timer = GameTimer::default();
        timer.start(start);
        timer.start(start + Duration::from_secs(5));

        assert!(timer.is_running());
        assert_eq!(timer.elapsed_secs_at(start + Duration::from_millis(2500)), 2);

        timer.stop(start + Duration::from_secs(12));
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_secs_at(start + Duration::from_secs(100)), 12);
    }

    #[test]
    fn timer_caps_at_display_limit() {
        let start = Instant::now();
        let mut timer = GameTimer::default();
        timer.start(start);
        assert_eq!(
            timer.elapsed_secs_at(start + Duration::from_secs(5000)),
            MAX_TIMER_SECS
        );
    }

    #[test]
    fn session_starts_timer_on_first_reveal_only() {
        let mut session = Session::new(GameConfig::beginner(), 3);
        assert_eq!(session.timer_display(), "000");
        assert_eq!(session.mine_counter(), "010");

        session.toggle_flag((0, 0)).unwrap();
        assert!(!session.timer().is_running());
        assert_eq!(session.mine_counter(), "009");

        session.reveal((4, 4)).unwrap();
        assert_ne!(session.state(), GameState::NotStarted);
        assert_eq!(session.timer().is_running(), !session.board().is_finished());
    }

    #[test]
    fn session_stops_timer_when_game_ends() {
        let config = GameConfig::new((1, 2), 1).unwrap();
        let mut session = Session::new(config, 11);

        session.reveal((0, 1)).unwrap();

        assert_eq!(session.state(), GameState::Won);
        assert!(!session.timer().is_running());
        assert_eq!(session.mine_counter(), "000");
    }

    #[test]
    fn reset_replaces_board_with_same_config() {
        let mut session = Session::new(GameConfig::intermediate(), 5);
        session.reveal((8, 8)).unwrap();
        session.toggle_flag((0, 0)).unwrap();

        session.reset();

        assert_eq!(session.state(), GameState::NotStarted);
        assert_eq!(session.config(), GameConfig::intermediate());
        assert_eq!(session.board().revealed_count(), 0);
        assert_eq!(session.board().flag_count(), 0);
        assert!(session.board().mine_layout().is_none());
        assert!(!session.timer().is_running());
    }

    #[test]
    fn games_in_a_session_get_different_layouts() {
        let mut session = Session::new(GameConfig::expert(), 1);
        session.reveal((0, 0)).unwrap();
        let first = session.board().mine_layout().cloned();

        session.reset();
        session.reveal((0, 0)).unwrap();

        assert_ne!(session.board().mine_layout().cloned(), first);
    }
}
