//! Per-enemy-kind behavior parameters
//!
//! Kind-specific AI is table-driven: each kind carries its size, speed,
//! hit points and cadence numbers, and the collision-response policy the
//! generic resolver interprets. Tick logic stays generic over the tables.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{AxisResponse, CollisionPolicy, Direction, EntityKind, GroundRule};
use super::timer::Timer;

/// Parameters for the repeatedly-spawned contact-damage enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwaySpec {
    pub size: Vec2,
    /// Base horizontal velocity; negative, toward the world's left edge.
    pub speed: f32,
    pub hp: i32,
    /// Damage dealt on player contact; contact also destroys the attacker.
    pub damage: i32,
    /// Spawn cadence in milliseconds.
    pub spawn_interval: f64,
    /// Spawn this many segments ahead of the player's current one.
    pub spawn_segment_offset: usize,
}

/// Parameters for a ground-patrolling enemy kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerSpec {
    pub size: Vec2,
    pub speed: f32,
    pub hp: i32,
    /// Base direction-change cadence in milliseconds.
    pub change_direction_delay: f64,
}

/// The full enemy parameter table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyRoster {
    pub away: AwaySpec,
    pub low: WalkerSpec,
    pub tall: WalkerSpec,
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self {
            away: AwaySpec {
                size: Vec2::new(25.0, 25.0),
                speed: -3.0,
                hp: 100,
                damage: 5,
                spawn_interval: 3000.0,
                spawn_segment_offset: 1,
            },
            low: WalkerSpec {
                size: Vec2::new(40.0, 40.0),
                speed: 3.0,
                hp: 10,
                change_direction_delay: 3000.0,
            },
            tall: WalkerSpec {
                size: Vec2::new(50.0, 50.0),
                speed: 2.0,
                hp: 50,
                change_direction_delay: 4000.0,
            },
        }
    }
}

impl EnemyRoster {
    pub fn walker(&self, kind: EntityKind) -> Option<&WalkerSpec> {
        match kind {
            EntityKind::Low => Some(&self.low),
            EntityKind::Tall => Some(&self.tall),
            _ => None,
        }
    }
}

/// Collision responses per entity kind.
///
/// The player and walkers stop dead against segments; away enemies are
/// destroyed by any horizontal hit. Landing is gated tighter for walkers
/// than for the player, which may also settle on the segment behind it.
pub fn collision_policy(kind: EntityKind) -> CollisionPolicy {
    match kind {
        EntityKind::Player => CollisionPolicy {
            horizontal: AxisResponse::Stop,
            vertical: AxisResponse::Stop,
            ground: GroundRule::CurrentOrPrevious,
            measure_ledge: true,
        },
        EntityKind::Away => CollisionPolicy {
            horizontal: AxisResponse::Destroy,
            vertical: AxisResponse::Stop,
            ground: GroundRule::Any,
            measure_ledge: false,
        },
        EntityKind::Low | EntityKind::Tall => CollisionPolicy {
            horizontal: AxisResponse::Stop,
            vertical: AxisResponse::Stop,
            ground: GroundRule::Current,
            measure_ledge: false,
        },
    }
}

/// Pick a new patrol direction and re-randomize the cadence.
///
/// The interval performs a clamped random walk: jittered by up to a
/// quarter of the base delay in either direction, held within
/// [base/4, base]. The direction is uniform over {none, left, right}.
pub fn retarget<R: Rng>(spec: &WalkerSpec, timer: &mut Timer, rng: &mut R) -> Direction {
    let direction = match rng.random_range(0..=2) {
        0 => Direction::None,
        1 => Direction::Left,
        _ => Direction::Right,
    };
    let quarter = spec.change_direction_delay / 4.0;
    let jitter = rng.random_range(-quarter..=quarter);
    timer.interval = (timer.interval + jitter).clamp(quarter, spec.change_direction_delay);
    direction
}

/// Horizontal velocity for a walker's current patrol direction.
pub fn patrol_velocity(spec: &WalkerSpec, direction: Direction) -> f32 {
    match direction {
        Direction::None => 0.0,
        Direction::Left => -spec.speed,
        Direction::Right => spec.speed,
    }
}
