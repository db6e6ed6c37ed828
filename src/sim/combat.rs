//! Fire control, projectiles and damage
//!
//! Removal never happens while a collection is being walked: hits are gathered
//! first and the bullets and enemies are pruned afterwards.

use glam::Vec2;

use super::collision::{Aabb, rect_rect};
use super::movement::nearest_in_range;
use super::state::{Bullet, GameState};
use crate::angle_delta;
use crate::tuning::{ContactDamage, FrameScaling, Tuning};

/// Whether the player should fire this tick
///
/// With an enemy in range the weapon fires on its own once the aim has
/// settled within the tolerance of that enemy's bearing; otherwise only the
/// fire key triggers it. The cooldown applies to both.
pub fn should_fire(state: &GameState, tuning: &Tuning, fire_held: bool) -> bool {
    let player = &state.player;
    if !player.weapon.ready(state.time) {
        return false;
    }
    match nearest_in_range(player, &state.enemies) {
        Some((_, bearing)) => {
            angle_delta(player.aim.looking, bearing).abs() < tuning.weapon.aim_tolerance
        }
        None => fire_held,
    }
}

/// Spawn a bullet from the player's center along the current looking angle
///
/// Player speed at the moment of firing boosts both range and projectile
/// speed.
pub fn spawn_bullet(state: &mut GameState, tuning: &Tuning) -> u32 {
    let id = state.next_entity_id();
    let player = &mut state.player;
    let weapon = &mut player.weapon;

    let boost = 1.0 + (player.vel.x.abs() + player.vel.y.abs()) * tuning.weapon.range_boost_factor;
    let speed = weapon.projectile_speed + player.vel.length();
    let angle = player.aim.looking;
    let size = weapon.projectile_size;

    state.bullets.push(Bullet {
        id,
        bounds: Aabb::new(player.bounds.center() - size * 0.5, size),
        vel: Vec2::from_angle(angle) * speed,
        angle,
        speed,
        damage: weapon.damage,
        range: weapon.range * boost,
        distance_traveled: 0.0,
    });
    weapon.last_fired = Some(state.time);
    log::debug!("Fired bullet {} at {:.2} rad (range x{:.2})", id, angle, boost);
    id
}

/// Move bullets and drop those that left the world or ran out of range
pub fn update_bullets(state: &mut GameState, scaling: FrameScaling, dt: f32) {
    let scale = scaling.step_scale(dt);
    let world = state.world;
    state.bullets.retain_mut(|bullet| {
        bullet.vel = Vec2::from_angle(bullet.angle) * bullet.speed;
        let step = bullet.vel * scale;
        bullet.bounds.pos += step;
        bullet.distance_traveled += step.length();
        bullet.bounds.is_within(&world) && !bullet.expired()
    });
}

/// Apply bullet hits: each bullet damages at most the first enemy it overlaps
///
/// Enemies killed by an earlier bullet this tick can no longer be hit.
pub fn resolve_bullet_hits(state: &mut GameState) {
    let mut spent = Vec::new();
    for bullet in &state.bullets {
        let target = state
            .enemies
            .iter_mut()
            .find(|e| !e.is_dead() && rect_rect(&bullet.bounds, &e.bounds));
        if let Some(enemy) = target {
            enemy.health -= bullet.damage;
            spent.push(bullet.id);
        }
    }
    if !spent.is_empty() {
        state.bullets.retain(|b| !spent.contains(&b.id));
    }
}

/// Apply contact damage between the player and every touching enemy
pub fn resolve_contacts(state: &mut GameState, tuning: &Tuning) {
    let player = &mut state.player;
    for enemy in &mut state.enemies {
        if enemy.is_dead() || !rect_rect(&enemy.bounds, &player.bounds) {
            continue;
        }
        let damage = match tuning.rules.contact_damage {
            ContactDamage::EnemyHealth => enemy.health,
            ContactDamage::Fixed(amount) => amount,
        };
        player.take_damage(damage);
        enemy.health -= tuning.enemy.contact_damage;
    }
}

/// Remove enemies with no health left, returning how many were removed
pub fn remove_dead_enemies(state: &mut GameState) -> u32 {
    let before = state.enemies.len();
    state.enemies.retain(|e| {
        if e.is_dead() {
            log::debug!("Enemy {} destroyed", e.id);
        }
        !e.is_dead()
    });
    let removed = (before - state.enemies.len()) as u32;
    state.kills += removed;
    removed
}
