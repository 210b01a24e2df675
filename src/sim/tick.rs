//! Fixed timestep simulation tick
//!
//! Advances one run deterministically: movement, timers, spawning, collision
//! resolution, scoring. Normal gameplay never errors; the run ends through
//! `TickOutcome::Ended`.

use glam::Vec2;
use rand::Rng;

use super::collision::{clamp_to_field, footprints_overlap, off_field};
use super::state::{Obstacle, Projectile, SimState};
use crate::consts::*;

/// Abstract input events for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Directional movement, components in [-1, 1]
    pub move_dir: Vec2,
    /// Fire action; accepted only when the cooldown has elapsed
    pub fire: bool,
}

/// Terminal signal produced each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The run is over; carries the final score
    Ended(u64),
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) -> TickOutcome {
    // An ended run stays ended; further ticks do not mutate it
    if state.player.lives == 0 {
        return TickOutcome::Ended(state.score());
    }
    state.time_ticks += 1;

    // Player movement, scaled by the Speed effect
    let dir = if input.move_dir.length_squared() > 1.0 {
        input.move_dir.normalize()
    } else {
        input.move_dir
    };
    state.player.vel = dir * PLAYER_BASE_SPEED * state.speed_mult;
    state.player.pos = clamp_to_field(
        state.player.pos + state.player.vel * dt,
        state.player.radius,
    );

    // Timers floor at zero
    state.player.invincibility = (state.player.invincibility - dt).max(0.0);
    state.player.fire_cooldown = (state.player.fire_cooldown - dt).max(0.0);

    if input.fire && state.player.fire_cooldown == 0.0 {
        spawn_projectile(state);
        state.player.fire_cooldown = FIRE_COOLDOWN_SECS;
    }

    // Advance entities
    for projectile in &mut state.projectiles {
        projectile.pos += projectile.vel * dt;
    }
    for obstacle in &mut state.obstacles {
        obstacle.pos += obstacle.vel * dt;
    }

    // Time-based spawn policy
    state.spawn_timer += dt;
    while state.spawn_timer >= SPAWN_INTERVAL_SECS {
        state.spawn_timer -= SPAWN_INTERVAL_SECS;
        spawn_obstacle(state);
    }

    // Drop anything that left the field
    state.projectiles.retain(|p| !off_field(p.pos, p.radius));
    state.obstacles.retain(|o| !off_field(o.pos, o.radius));

    resolve_projectile_hits(state);

    if let Some(outcome) = resolve_player_hits(state) {
        return outcome;
    }

    TickOutcome::Continue
}

fn spawn_projectile(state: &mut SimState) {
    let id = state.next_entity_id();
    let muzzle = state.player.pos - Vec2::new(0.0, state.player.radius + PROJECTILE_RADIUS);
    state.projectiles.push(Projectile {
        id,
        pos: muzzle,
        vel: Vec2::new(0.0, -PROJECTILE_SPEED),
        radius: PROJECTILE_RADIUS,
    });
}

fn spawn_obstacle(state: &mut SimState) {
    let id = state.next_entity_id();
    let x = state
        .rng
        .random_range(OBSTACLE_RADIUS..FIELD_WIDTH - OBSTACLE_RADIUS);
    // Fall speed ramps mildly as the run goes on
    let speed = OBSTACLE_BASE_SPEED + OBSTACLE_SPEED_RAMP * state.elapsed_secs();
    state.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(x, -OBSTACLE_RADIUS),
        vel: Vec2::new(0.0, speed),
        radius: OBSTACLE_RADIUS,
    });
}

/// Projectile-obstacle collisions: both entities are removed and the
/// destruction bonus is credited. Each projectile destroys at most one
/// obstacle.
fn resolve_projectile_hits(state: &mut SimState) {
    let mut dead_projectiles: Vec<u32> = Vec::new();
    let mut dead_obstacles: Vec<u32> = Vec::new();

    for projectile in &state.projectiles {
        for obstacle in &state.obstacles {
            if dead_obstacles.contains(&obstacle.id) {
                continue;
            }
            if footprints_overlap(
                projectile.pos,
                projectile.radius,
                obstacle.pos,
                obstacle.radius,
            ) {
                dead_projectiles.push(projectile.id);
                dead_obstacles.push(obstacle.id);
                break;
            }
        }
    }

    if dead_obstacles.is_empty() {
        return;
    }
    state.bonus_points += DESTROY_BONUS * dead_obstacles.len() as u64;
    state.projectiles.retain(|p| !dead_projectiles.contains(&p.id));
    state.obstacles.retain(|o| !dead_obstacles.contains(&o.id));
}

/// Player-obstacle collisions: a hit while vulnerable costs one life,
/// consumes the obstacle, and grants an invincibility window. While
/// invincible the obstacle passes through.
fn resolve_player_hits(state: &mut SimState) -> Option<TickOutcome> {
    let mut consumed: Vec<u32> = Vec::new();

    for obstacle in &state.obstacles {
        if !footprints_overlap(
            state.player.pos,
            state.player.radius,
            obstacle.pos,
            obstacle.radius,
        ) {
            continue;
        }
        if state.player.is_invincible() {
            continue;
        }
        state.player.lives -= 1;
        state.player.invincibility = INVINCIBILITY_SECS;
        consumed.push(obstacle.id);
        log::debug!(
            "hit at t={:.2}s, {} lives left",
            state.elapsed_secs(),
            state.player.lives
        );
        if state.player.lives == 0 {
            break;
        }
    }

    state.obstacles.retain(|o| !consumed.contains(&o.id));

    if state.player.lives == 0 {
        let score = state.score();
        log::info!("run ended: score={score} ticks={}", state.time_ticks);
        Some(TickOutcome::Ended(score))
    } else {
        None
    }
}
