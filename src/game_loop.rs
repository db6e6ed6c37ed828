//! Host-side driver
//!
//! Turns wall-clock frame callbacks into simulation ticks. Spawning runs on
//! its own periodic timer fed by the same clock, so it keeps its cadence no
//! matter how ticks are spaced.

use crate::consts::{MAX_FRAME_DT, NOMINAL_DT};
use crate::sim::{GamePhase, GameState, Snapshot, TickInput, tick, try_spawn};
use crate::tuning::Tuning;

/// Periodic trigger for spawn cycles
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval: f32,
    elapsed: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Add `dt` seconds and return how many intervals completed (at most `cap`)
    ///
    /// Intervals beyond the cap are dropped rather than queued.
    pub fn advance(&mut self, dt: f32, cap: u32) -> u32 {
        if !(dt > 0.0) || !(self.interval > 0.0) {
            return 0;
        }
        self.elapsed += dt;
        let due = (self.elapsed / self.interval).floor();
        self.elapsed -= due * self.interval;
        (due as u32).min(cap)
    }
}

/// Game instance holding the state, its tuning and the frame clock
pub struct GameLoop {
    state: GameState,
    tuning: Tuning,
    spawn_timer: SpawnTimer,
    /// Clock reading of the previous frame (seconds)
    last_time: Option<f64>,
    input: TickInput,
}

impl GameLoop {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("Starting game with seed {seed}");
        Self {
            state: GameState::new(seed, &tuning),
            spawn_timer: SpawnTimer::new(tuning.spawn.interval),
            tuning,
            last_time: None,
            input: TickInput::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts and tests that need to poke at the world
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Record a key press; the pause binding also queues a pause toggle
    pub fn key_down(&mut self, key: &str) {
        if key.eq_ignore_ascii_case(&self.tuning.keys.pause) {
            self.input.pause = true;
        }
        self.input.keys.press(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.keys.release(key);
    }

    /// Queue a pause toggle for the next frame
    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    /// Run one frame at clock time `now` (seconds), returning the tick's Δt
    ///
    /// The first frame after construction or restart uses the nominal frame
    /// length; later frames use the clock difference clamped to
    /// [`MAX_FRAME_DT`].
    pub fn frame(&mut self, now: f64) -> f32 {
        let elapsed = match self.last_time {
            Some(prev) => (now - prev) as f32,
            None => NOMINAL_DT,
        };
        self.last_time = Some(now);
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        let dt = elapsed.min(MAX_FRAME_DT);

        let due = self
            .spawn_timer
            .advance(elapsed, self.tuning.spawn.max_per_frame);
        if self.spawning_allowed() {
            for _ in 0..due {
                try_spawn(&mut self.state, &self.tuning);
            }
        }

        tick(&mut self.state, &self.input, &self.tuning, dt);

        // Clear one-shot inputs after processing
        self.input.pause = false;
        dt
    }

    /// Throw away the current run and start fresh
    pub fn restart(&mut self, seed: u64) {
        log::info!("Restarting with seed {seed}");
        self.state = GameState::new(seed, &self.tuning);
        self.spawn_timer = SpawnTimer::new(self.tuning.spawn.interval);
        self.last_time = None;
        self.input.keys.clear();
        self.input.pause = false;
    }

    fn spawning_allowed(&self) -> bool {
        match self.state.phase {
            GamePhase::Running => true,
            GamePhase::Paused(kind) => {
                kind == crate::sim::PauseKind::Manual && self.tuning.rules.spawn_while_paused
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PauseKind;

    fn game() -> GameLoop {
        GameLoop::new(42, Tuning::default())
    }

    #[test]
    fn test_spawn_timer_counts_intervals() {
        let mut timer = SpawnTimer::new(0.5);
        assert_eq!(timer.advance(0.3, 4), 0);
        assert_eq!(timer.advance(0.3, 4), 1);
        assert_eq!(timer.advance(1.0, 4), 2);
        // Backlog beyond the cap is dropped
        assert_eq!(timer.advance(10.0, 4), 4);
        assert_eq!(timer.advance(0.1, 4), 0);
        assert_eq!(timer.advance(-1.0, 4), 0);
    }

    #[test]
    fn test_first_frame_uses_nominal_dt() {
        let mut g = game();
        assert_eq!(g.frame(1000.0), NOMINAL_DT);
        assert!((g.frame(1000.05) - 0.05).abs() < 1e-4);
        // Long stall is clamped
        assert_eq!(g.frame(1010.0), MAX_FRAME_DT);
        // Clock going backwards does not rewind the simulation
        assert_eq!(g.frame(1005.0), 0.0);
    }

    #[test]
    fn test_enemies_spawn_on_timer_up_to_limit() {
        // Stationary enemies and a harmless weapon keep the count stable
        let mut tuning = Tuning::default();
        tuning.enemy.speed = 0.0;
        tuning.weapon.damage = 0.0;
        let mut g = GameLoop::new(42, tuning);
        let mut now = 0.0;
        for _ in 0..30 {
            g.frame(now);
            now += 0.1;
        }
        assert_eq!(g.state().enemies.len(), g.tuning().spawn.limit);
    }

    #[test]
    fn test_key_bindings_drive_pause() {
        let mut g = game();
        g.frame(0.0);
        g.key_down("P");
        g.frame(0.016);
        assert_eq!(g.phase(), GamePhase::Paused(PauseKind::Manual));
        g.key_up("p");
        g.frame(0.032);
        assert_eq!(g.phase(), GamePhase::Paused(PauseKind::Manual));
        g.toggle_pause();
        g.frame(0.048);
        assert_eq!(g.phase(), GamePhase::Running);
    }

    #[test]
    fn test_spawning_continues_during_manual_pause() {
        let mut g = game();
        g.toggle_pause();
        g.frame(0.0);
        for i in 1..=10 {
            g.frame(i as f64 * 0.1);
        }
        assert!(g.phase() == GamePhase::Paused(PauseKind::Manual));
        assert!(!g.state().enemies.is_empty());
    }

    #[test]
    fn test_no_spawning_when_disabled_while_paused() {
        let mut tuning = Tuning::default();
        tuning.rules.spawn_while_paused = false;
        let mut g = GameLoop::new(1, tuning);
        g.toggle_pause();
        for i in 0..10 {
            g.frame(i as f64 * 0.1);
        }
        assert!(g.state().enemies.is_empty());
    }

    #[test]
    fn test_game_over_until_restart() {
        let mut g = game();
        g.state_mut().player.health = 0.0;
        g.frame(0.0);
        assert!(g.phase().is_game_over());
        for i in 1..=10 {
            g.frame(i as f64 * 0.1);
        }
        assert!(g.state().enemies.is_empty());

        g.key_down("d");
        g.restart(7);
        assert!(g.input.keys.is_empty());
        assert_eq!(g.phase(), GamePhase::Running);
        assert_eq!(g.state().player.health, g.state().player.max_health);
        assert_eq!(g.state().seed, 7);
    }

    #[test]
    fn test_held_keys_move_the_player() {
        let mut g = game();
        let start = g.state().player.bounds.pos;
        g.key_down("S");
        for i in 0..10 {
            g.frame(i as f64 / 60.0);
        }
        assert!(g.state().player.bounds.pos.y > start.y);
        assert_eq!(g.snapshot().player.pos, g.state().player.bounds.pos);
    }
}
