//! Quadrant-biased enemy spawning
//!
//! Enemies appear in one of the quadrants the player is *not* standing in.
//! Placement retries a bounded number of times and gives up quietly for the
//! cycle when the field is too crowded.

use glam::Vec2;
use rand::Rng;

use super::collision::{Aabb, rect_rect};
use super::state::GameState;
use crate::tuning::Tuning;

/// The four fixed quadrants: top-left, top-right, bottom-left, bottom-right
pub fn quadrants(world: &Aabb) -> [Aabb; 4] {
    let half = world.size * 0.5;
    let origin = world.pos;
    [
        Aabb::new(origin, half),
        Aabb::new(origin + Vec2::new(half.x, 0.0), half),
        Aabb::new(origin + Vec2::new(0.0, half.y), half),
        Aabb::new(origin + half, half),
    ]
}

/// Index of the first quadrant touched by a small probe on the player's center
pub fn player_quadrant(quads: &[Aabb; 4], player_center: Vec2, probe_size: f32) -> Option<usize> {
    let probe = Aabb::centered(player_center, Vec2::splat(probe_size));
    quads.iter().position(|q| rect_rect(&probe, q))
}

/// Run one spawn cycle, returning the new enemy's id if one was placed
pub fn try_spawn(state: &mut GameState, tuning: &Tuning) -> Option<u32> {
    let spawn = &tuning.spawn;
    if state.enemies.len() >= spawn.limit {
        return None;
    }

    let quads = quadrants(&state.world);
    let current = player_quadrant(&quads, state.player.center(), spawn.probe_size);
    let candidates: Vec<Aabb> = quads
        .iter()
        .enumerate()
        .filter(|&(idx, _)| Some(idx) != current)
        .map(|(_, q)| *q)
        .collect();

    let size = Vec2::splat(tuning.enemy.size);
    let margin = Vec2::splat(spawn.margin);
    let mut rng = state.rng_state.next_rng();

    for _ in 0..spawn.attempts {
        let quad = candidates[rng.random_range(0..candidates.len())];
        let span = (quad.size - size - margin * 2.0).max(Vec2::ZERO);
        let pos = quad.pos
            + margin
            + Vec2::new(rng.random::<f32>() * span.x, rng.random::<f32>() * span.y);
        let candidate = Aabb::new(pos, size);

        let blocked = rect_rect(&candidate, &state.player.bounds)
            || state.enemies.iter().any(|e| rect_rect(&candidate, &e.bounds));
        if blocked {
            continue;
        }

        let id = state.add_enemy(pos, &tuning.enemy);
        log::debug!("Spawned enemy {} at ({:.1}, {:.1})", id, pos.x, pos.y);
        return Some(id);
    }

    log::debug!(
        "No free spawn position after {} attempts, skipping cycle",
        spawn.attempts
    );
    None
}
