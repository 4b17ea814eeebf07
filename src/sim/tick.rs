//! Per-frame simulation update
//!
//! One `tick` advances the whole world: player physics first, then each
//! enemy kind, then spawn cadence, step-assist, the defeat latch, and the
//! world-edge stage check. Enemy collections are walked in reverse index
//! order so in-place removal never skips or double-processes a neighbor.
//! Velocities are in units per tick; only timers, animation and the banner
//! fade consume the millisecond delta.

use glam::Vec2;

use super::entity::{Direction, EntityKind};
use super::geom;
use super::policy::{collision_policy, patrol_velocity, retarget};
use super::state::SimState;
use crate::consts::{GRAVITY, JUMP_VELOCITY, MOVE_SCALE, STEP_ASSIST_MIN};
use crate::SimError;

/// Joystick direction classification, polled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputDirection {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

/// Input snapshot for one tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub direction: InputDirection,
    /// Bounded-magnitude joystick vector.
    pub vector: Vec2,
}

/// Advance the simulation by one frame of `dt` milliseconds.
pub fn tick(state: &mut SimState, input: &TickInput, dt: f64) -> Result<(), SimError> {
    state.time_ms += dt;

    update_camera(state);
    let ledge = step_player(state, input, dt)?;
    step_away(state, dt)?;
    step_walkers(state, EntityKind::Low, dt)?;
    step_walkers(state, EntityKind::Tall, dt)?;
    spawn_pressure(state, dt);
    apply_step_assist(state, input, ledge);
    resolve_defeat(state);
    resolve_world_edge(state);
    state.banner.fade(dt, state.game_over);

    Ok(())
}

/// Clamp the view to keep the player centered inside the world.
fn update_camera(state: &mut SimState) {
    let max_world = state.world.width();
    let centered =
        state.player.pos.x - state.config.viewport_width / 2.0 + state.player.size.x / 2.0;
    state.camera.x = centered.min(max_world - state.config.viewport_width).max(0.0);
}

/// Player physics: input-driven movement, gravity, collision, jump.
/// Returns the measured ledge offset for the step-assist pass.
fn step_player(
    state: &mut SimState,
    input: &TickInput,
    dt: f64,
) -> Result<Option<f32>, SimError> {
    let player = &mut state.player;
    let movement = input.vector * MOVE_SCALE;

    if input.direction != InputDirection::None {
        player.mirrored = movement.x < 0.0;
    }
    player.walking = movement.x != 0.0;

    player.vel.y += GRAVITY;
    player.vel.x = movement.x;

    let policy = collision_policy(EntityKind::Player);
    let outcome = player.resolve_collisions(&state.world.segments, &policy)?;
    if outcome.blocked_x {
        player.walking = false;
    }
    if !outcome.blocked_y {
        player.landing = false;
    }
    // The world's left edge is a hard wall.
    if player.pos.x + player.vel.x < 0.0 {
        player.vel.x = 0.0;
    }

    player.pos += player.vel;

    if player.landing && input.direction == InputDirection::Up {
        player.vel.y = JUMP_VELOCITY;
    }
    player.advance_animation(dt);

    Ok(outcome.ledge_offset)
}

/// Away enemies drift toward the world's left edge at the stage's current
/// speed. Any horizontal block destroys them; touching the player deals
/// the contact damage and destroys them; leaving the world removes them.
fn step_away(state: &mut SimState, dt: f64) -> Result<(), SimError> {
    let SimState {
        player,
        enemies,
        world,
        stage,
        roster,
        ..
    } = state;
    let policy = collision_policy(EntityKind::Away);
    let damage = roster.away.damage;

    let mut i = enemies.away.len();
    while i > 0 {
        i -= 1;
        let enemy = &mut enemies.away[i];

        enemy.vel.x = stage.away_speed;
        enemy.vel.y += GRAVITY;

        let outcome = enemy.resolve_collisions(&world.segments, &policy)?;
        let mut alive = !outcome.destroyed;

        if geom::overlaps(&enemy.rect(), &player.rect())? {
            player.hp = (player.hp - damage).max(0);
            alive = false;
            log::debug!("contact hit: player hp {}", player.hp);
        }

        enemy.pos += enemy.vel;
        enemy.advance_animation(dt);

        // Fully outside the playable span counts as destroyed too.
        if alive && (enemy.rect().right() < 0.0 || enemy.rect().x > world.width()) {
            alive = false;
        }

        if !alive {
            enemies.away.remove(i);
        }
    }
    Ok(())
}

/// Ground walkers patrol under a self-adjusting direction timer, clamp at
/// the world bounds, and hop when blocked while standing on ground.
fn step_walkers(state: &mut SimState, kind: EntityKind, dt: f64) -> Result<(), SimError> {
    let SimState {
        enemies,
        world,
        roster,
        rng,
        ..
    } = state;
    let Some(spec) = roster.walker(kind) else {
        return Ok(());
    };
    let list = match kind {
        EntityKind::Tall => &mut enemies.tall,
        _ => &mut enemies.low,
    };
    let policy = collision_policy(kind);
    let right_edge = world.right_edge();

    for enemy in list.iter_mut().rev() {
        if let Some(timer) = enemy.timer.as_mut() {
            if timer.update(dt) {
                enemy.direction = retarget(spec, timer, rng);
            }
        }

        enemy.vel.x = patrol_velocity(spec, enemy.direction);
        enemy.vel.y += GRAVITY;
        enemy.walking = enemy.direction != Direction::None;
        if enemy.direction != Direction::None {
            enemy.mirrored = enemy.direction == Direction::Right;
        }

        let outcome = enemy.resolve_collisions(&world.segments, &policy)?;
        let hop = outcome.blocked_x;
        if !outcome.blocked_y {
            enemy.landing = false;
        }
        // Patrol stays inside [0, last segment right edge]; the walker
        // holds position instead of despawning.
        if enemy.pos.x + enemy.vel.x < 0.0
            || enemy.pos.x + enemy.size.x + enemy.vel.x > right_edge
        {
            enemy.vel.x = 0.0;
        }

        enemy.pos += enemy.vel;

        if enemy.landing && hop {
            enemy.vel.y = JUMP_VELOCITY;
        }
        enemy.advance_animation(dt);
    }
    Ok(())
}

/// Away spawn cadence; suppressed once the run is over.
fn spawn_pressure(state: &mut SimState, dt: f64) {
    if state.away_spawn.update(dt) && !state.game_over {
        state.spawn_away();
    }
}

/// Small ledges are climbed without a jump: when the blocked-while-landing
/// measurement falls in the assist band, re-apply the horizontal input and
/// nudge the player up onto the ledge.
fn apply_step_assist(state: &mut SimState, input: &TickInput, ledge: Option<f32>) {
    let Some(offset) = ledge else {
        return;
    };
    if (STEP_ASSIST_MIN..0.0).contains(&offset) {
        let movement = input.vector * MOVE_SCALE;
        state.player.pos.x += movement.x;
        state.player.pos.y += offset;
    }
}

/// Latch defeat exactly once; while the run is over, no enemies remain.
fn resolve_defeat(state: &mut SimState) {
    if state.player.hp <= 0 && !state.game_over {
        state.game_over = true;
        state
            .banner
            .show("defeat", super::stage::DEFEAT_COLOR);
        log::info!("player defeated at stage {:?}", state.stage.current);
    }
    if state.game_over {
        state.enemies.clear_all();
    }
}

/// Crossing the world's right edge advances the stage sequence; terminal
/// runs are only clamped back inside.
fn resolve_world_edge(state: &mut SimState) {
    let max_world = state.world.width();
    if state.player.pos.x + state.player.size.x < max_world {
        return;
    }
    if state.game_over {
        state.player.pos.x = max_world - state.player.size.x;
    } else {
        state.advance_stage();
    }
}
