//! Player movement, sprint resource, aim smoothing and enemy pursuit
//!
//! Player velocity is kept in game units per tick: acceleration already folds
//! in Δt, so positions integrate the velocity directly without another Δt.

use glam::Vec2;

use super::collision::{rect_circle, resolve_penetration};
use super::state::{Enemy, GameState, Player};
use crate::consts::REFERENCE_HZ;
use crate::math::Vec2Ext;
use crate::normalize_angle;
use crate::tuning::FrameScaling;

/// Advance player velocity and the sprint resource for one tick
///
/// `dir` holds the per-axis input in {-1, 0, 1}.
pub fn update_player_velocity(player: &mut Player, dir: Vec2, sprint_held: bool, dt: f32) {
    let sprint = &mut player.sprint;
    sprint.active = sprint_held && sprint.current > 0.0;
    let factor = sprint.factor();
    let step = player.acceleration * dt * factor;

    for axis in 0..2 {
        if dir[axis] != 0.0 {
            player.vel[axis] += dir[axis] * step;
            if player.sprint.active {
                player.sprint.drain(player.sprint.recharge_rate * dt);
            }
        }
    }

    if !player.sprint.active && player.sprint.current < player.sprint.max {
        player.sprint.recharge(player.sprint.recharge_rate * dt);
    }

    let cap = player.speed_cap();
    player.vel = player.vel.clamp(Vec2::splat(-cap), Vec2::splat(cap)).limited(cap);

    // Exponential decay, independent of frame rate
    let decay = player.friction.powf(dt * REFERENCE_HZ);
    for axis in 0..2 {
        if dir[axis] == 0.0 {
            player.vel[axis] *= decay;
        }
    }
}

/// Move the player by its velocity and keep it inside the world
pub fn integrate_player(state: &mut GameState) {
    let player = &mut state.player;
    player.bounds.pos += player.vel;
    player.bounds.clamp_into(&state.world);
}

/// Recompute every enemy's `in_range` flag against the weapon range circle
///
/// The flag is display state for the renderer. Targeting goes through
/// [`nearest_in_range`], which measures center to center.
pub fn refresh_in_range(state: &mut GameState) {
    let reach = state.player.range_circle();
    for enemy in &mut state.enemies {
        enemy.in_range = rect_circle(&enemy.bounds, &reach);
    }
}

/// Index and bearing of the closest enemy whose center lies within weapon
/// range (first wins ties)
pub fn nearest_in_range(player: &Player, enemies: &[Enemy]) -> Option<(usize, f32)> {
    let center = player.center();
    let range = player.weapon.range;
    let mut best: Option<(usize, f32)> = None;
    for (idx, enemy) in enemies.iter().enumerate() {
        let dist = center.distance(enemy.center());
        if dist >= range {
            continue;
        }
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((idx, dist));
        }
    }
    best.map(|(idx, _)| (idx, (enemies[idx].center() - center).bearing()))
}

/// Smooth the looking angle toward the nearest threat or the movement heading
pub fn update_aim(player: &mut Player, enemies: &[Enemy], smoothing: f32) {
    let target = if let Some((_, bearing)) = nearest_in_range(player, enemies) {
        bearing
    } else if player.vel != Vec2::ZERO {
        player.vel.bearing()
    } else {
        player.aim.target
    };
    let target = normalize_angle(target);

    let aim = &mut player.aim;
    aim.looking += smoothing * (target - aim.looking);
    aim.target = target;
}

/// Step every enemy straight toward the player's center
pub fn pursue_player(state: &mut GameState, scaling: FrameScaling, dt: f32) {
    let target = state.player.center();
    let scale = scaling.step_scale(dt);
    for enemy in &mut state.enemies {
        // Coincident centers give a zero direction, so the enemy holds still
        let dir = (target - enemy.center()).unit();
        let step = dir * enemy.speed * scale;
        enemy.bounds.pos += step;
        let cap = Vec2::splat(enemy.max_speed);
        enemy.vel = step.clamp(-cap, cap);
    }
}

/// Push overlapping enemies apart, earlier enemies yielding to later ones
pub fn separate_enemies(enemies: &mut [Enemy]) {
    for i in 0..enemies.len() {
        for j in 0..enemies.len() {
            if i == j {
                continue;
            }
            let other = enemies[j].bounds;
            resolve_penetration(&mut enemies[i].bounds, &other);
        }
    }
}

/// Keep every enemy inside the world
pub fn clamp_enemies(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.bounds.clamp_into(&state.world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NOMINAL_DT;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn player() -> Player {
        Player::new(&Tuning::default())
    }

    #[test]
    fn test_acceleration_applies_on_held_axis() {
        let mut p = player();
        update_player_velocity(&mut p, Vec2::new(1.0, 0.0), false, NOMINAL_DT);
        // 12 units/s² for one 60 Hz frame
        assert!((p.vel.x - 0.2).abs() < 1e-5);
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn test_friction_only_on_idle_axes() {
        let mut p = player();
        p.vel = Vec2::new(0.1, 0.3);
        update_player_velocity(&mut p, Vec2::new(1.0, 0.0), false, NOMINAL_DT);
        // x kept accelerating, y decayed by 0.4 for one frame
        assert!((p.vel.x - 0.3).abs() < 1e-5);
        assert!((p.vel.y - 0.12).abs() < 1e-5);
    }

    #[test]
    fn test_sprint_drains_per_moving_axis_and_recharges() {
        let mut p = player();
        update_player_velocity(&mut p, Vec2::new(1.0, 1.0), true, 0.1);
        assert!(p.sprint.active);
        assert!((p.sprint.current - 98.0).abs() < 1e-4);

        update_player_velocity(&mut p, Vec2::ZERO, false, 0.1);
        assert!(!p.sprint.active);
        assert!((p.sprint.current - 99.0).abs() < 1e-4);
    }

    #[test]
    fn test_sprint_requires_resource() {
        let mut p = player();
        p.sprint.current = 0.0;
        update_player_velocity(&mut p, Vec2::new(1.0, 0.0), true, NOMINAL_DT);
        assert!(!p.sprint.active);
    }

    #[test]
    fn test_sprint_raises_speed_cap() {
        let mut p = player();
        for _ in 0..120 {
            update_player_velocity(&mut p, Vec2::new(1.0, 0.0), true, NOMINAL_DT);
        }
        assert!((p.vel.x - p.max_speed * p.sprint.multiplier).abs() < 1e-5);

        update_player_velocity(&mut p, Vec2::new(1.0, 0.0), false, NOMINAL_DT);
        assert!((p.vel.x - p.max_speed).abs() < 1e-5);
    }

    #[test]
    fn test_aim_moves_halfway_toward_enemy() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.player.aim.looking = 1.0;
        state.player.aim.target = 1.0;
        // Enemy centered 10 units to the right of the player center
        let center = state.player.center();
        let pos = center + Vec2::new(10.0, 0.0) - Vec2::splat(tuning.enemy.size / 2.0);
        state.add_enemy(pos, &tuning.enemy);
        refresh_in_range(&mut state);
        assert!(state.enemies[0].in_range);

        update_aim(&mut state.player, &state.enemies, 0.5);
        assert!((state.player.aim.looking - 0.5).abs() < 1e-5);
        assert!(state.player.aim.target.abs() < 1e-6);
    }

    #[test]
    fn test_aim_follows_velocity_then_holds() {
        let mut p = player();
        p.vel = Vec2::new(0.0, 0.2);
        update_aim(&mut p, &[], 0.5);
        assert!((p.aim.target - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        p.vel = Vec2::ZERO;
        let before = p.aim.looking;
        update_aim(&mut p, &[], 0.5);
        // Target unchanged, looking keeps converging toward it
        assert!(p.aim.looking > before);
    }

    #[test]
    fn test_nearest_in_range_prefers_closest_then_first() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        let c = state.player.center() - Vec2::splat(2.5);
        state.add_enemy(c + Vec2::new(15.0, 0.0), &tuning.enemy);
        state.add_enemy(c + Vec2::new(0.0, -8.0), &tuning.enemy);
        state.add_enemy(c + Vec2::new(-8.0, 0.0), &tuning.enemy);
        refresh_in_range(&mut state);
        let (idx, _) = nearest_in_range(&state.player, &state.enemies).unwrap();
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_target_range_is_measured_between_centers() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        // Center 26 away, near box edge only 23.5 away
        let pos = state.player.center() + Vec2::new(26.0, 0.0) - Vec2::splat(2.5);
        state.add_enemy(pos, &tuning.enemy);
        refresh_in_range(&mut state);
        assert!(state.enemies[0].in_range);
        assert_eq!(nearest_in_range(&state.player, &state.enemies), None);

        // Heading wins over the enemy's bearing
        state.player.vel = Vec2::new(0.0, 0.2);
        update_aim(&mut state.player, &state.enemies, 1.0);
        assert!((state.player.aim.looking - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        state.enemies[0].bounds.pos.x -= 1.5;
        let (idx, bearing) = nearest_in_range(&state.player, &state.enemies).unwrap();
        assert_eq!(idx, 0);
        assert!(bearing.abs() < 1e-6);
    }

    #[test]
    fn test_pursuit_steps_toward_player() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.add_enemy(Vec2::new(10.0, 47.5), &tuning.enemy);
        pursue_player(&mut state, FrameScaling::PerTick, NOMINAL_DT);
        let e = &state.enemies[0];
        assert!((e.bounds.pos.x - 10.1).abs() < 1e-5);
        assert!((e.bounds.pos.y - 47.5).abs() < 1e-5);
    }

    #[test]
    fn test_reference_scaling_doubles_pursuit_step_at_30hz() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.add_enemy(Vec2::new(10.0, 47.5), &tuning.enemy);
        pursue_player(&mut state, FrameScaling::Reference60Hz, 1.0 / 30.0);
        let e = &state.enemies[0];
        assert!((e.bounds.pos.x - 10.2).abs() < 1e-5);
        assert!((e.bounds.pos.y - 47.5).abs() < 1e-5);
    }

    #[test]
    fn test_pursuit_with_coincident_centers_is_finite() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        let pos = state.player.bounds.pos;
        state.add_enemy(pos, &tuning.enemy);
        pursue_player(&mut state, FrameScaling::PerTick, NOMINAL_DT);
        let e = &state.enemies[0];
        assert!(e.bounds.pos.is_finite());
        assert_eq!(e.bounds.pos, pos);
    }

    #[test]
    fn test_separate_enemies_removes_overlap() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.add_enemy(Vec2::new(10.0, 10.0), &tuning.enemy);
        state.add_enemy(Vec2::new(11.0, 13.0), &tuning.enemy);
        separate_enemies(&mut state.enemies);
        let (a, b) = (&state.enemies[0].bounds, &state.enemies[1].bounds);
        assert!(!crate::sim::collision::rect_rect(a, b));
    }

    #[test]
    fn test_integrate_clamps_to_world() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.player.bounds.pos = Vec2::new(94.9, 0.2);
        state.player.vel = Vec2::new(0.45, -0.45);
        integrate_player(&mut state);
        assert_eq!(state.player.bounds.pos, Vec2::new(95.0, 0.0));
    }

    fn arb_dir() -> impl Strategy<Value = Vec2> {
        (-1i8..=1, -1i8..=1).prop_map(|(x, y)| Vec2::new(x as f32, y as f32))
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_cap(
            steps in prop::collection::vec((arb_dir(), any::<bool>(), 0.001f32..0.1), 1..200)
        ) {
            let mut p = player();
            for (dir, sprint, dt) in steps {
                update_player_velocity(&mut p, dir, sprint, dt);
                let cap = p.max_speed * p.sprint.factor();
                prop_assert!(p.vel.length() <= cap + 1e-5);
            }
        }

        #[test]
        fn prop_sprint_stays_in_bounds(
            steps in prop::collection::vec((arb_dir(), any::<bool>(), 0.0f32..0.5), 1..300)
        ) {
            let mut p = player();
            for (dir, sprint, dt) in steps {
                update_player_velocity(&mut p, dir, sprint, dt);
                prop_assert!(p.sprint.current >= 0.0);
                prop_assert!(p.sprint.current <= p.sprint.max);
            }
        }
    }
}
