//! Single simulation tick
//!
//! Advances movement, aiming, shooting, pursuit and damage in a fixed order
//! and owns the pause / game-over transitions. Spawning runs on its own timer
//! in the driver, see [`crate::game_loop`].

use super::combat::{
    remove_dead_enemies, resolve_bullet_hits, resolve_contacts, should_fire, spawn_bullet,
    update_bullets,
};
use super::input::TickInput;
use super::movement::{
    clamp_enemies, integrate_player, pursue_player, refresh_in_range, separate_enemies,
    update_aim, update_player_velocity,
};
use super::state::{GamePhase, GameState, PauseKind};
use crate::consts::MAX_FRAME_DT;
use crate::tuning::Tuning;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused(PauseKind::Manual);
                log::info!("Paused at {:.1}s", state.time);
                return;
            }
            GamePhase::Paused(PauseKind::Manual) => {
                state.phase = GamePhase::Running;
                log::info!("Resumed");
            }
            GamePhase::Paused(PauseKind::GameOver) => {}
        }
    }

    // Don't tick if paused or game over
    if !state.phase.is_running() {
        return;
    }
    if state.player.is_dead() {
        enter_game_over(state);
        return;
    }

    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    let rules = &tuning.rules;
    let keys = &tuning.keys;

    state.time_ticks += 1;
    state.time += f64::from(dt);

    // Player
    let dir = input.direction(keys);
    update_player_velocity(&mut state.player, dir, input.sprint_held(keys), dt);
    integrate_player(state);

    // Aim and shoot
    refresh_in_range(state);
    let smoothing = rules
        .frame_scaling
        .smoothing(tuning.weapon.aim_smoothing, dt);
    update_aim(&mut state.player, &state.enemies, smoothing);
    if should_fire(state, tuning, input.fire_held(keys)) {
        spawn_bullet(state, tuning);
    }

    // Projectiles
    update_bullets(state, rules.frame_scaling, dt);
    resolve_bullet_hits(state);
    remove_dead_enemies(state);

    // Enemies
    pursue_player(state, rules.frame_scaling, dt);
    if rules.separate_enemies {
        separate_enemies(&mut state.enemies);
    }
    clamp_enemies(state);
    refresh_in_range(state);

    // Contact
    resolve_contacts(state, tuning);
    remove_dead_enemies(state);

    if state.player.is_dead() {
        enter_game_over(state);
    }
}

fn enter_game_over(state: &mut GameState) {
    state.phase = GamePhase::Paused(PauseKind::GameOver);
    log::info!(
        "Game over after {:.1}s ({} kills)",
        state.time,
        state.kills
    );
}
