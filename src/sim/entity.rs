//! Simulation entities and axis-separated collision resolution
//!
//! One `Entity` type serves the player and every enemy kind. Resolution is
//! two-phase: the X-shifted hitbox is tested against every segment (first
//! hit wins, remaining segments are skipped for that axis), then the
//! Y-shifted hitbox independently. An entity can be blocked on X by one
//! segment and on Y by another in the same tick; each test uses the box
//! unshifted on the other axis, so corner cases resolve by whichever axis
//! hits first in segment order rather than by swept collision.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::{self, Rect};
use super::timer::Timer;
use super::world::Segment;
use crate::SimError;
use crate::assets::{ImageHandle, SpriteSet};
use crate::consts::WALK_FRAME_MS;

/// Entity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Away,
    Low,
    Tall,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Away => "away",
            EntityKind::Low => "low",
            EntityKind::Tall => "tall",
        }
    }
}

/// Horizontal patrol direction for ground walkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
}

/// What a blocked axis does to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisResponse {
    /// Zero the axis velocity; the position delta is discarded.
    Stop,
    /// Negate the axis velocity.
    Bounce,
    /// Mark the entity for removal.
    Destroy,
}

/// Which colliding segment counts as ground underneath the entity.
///
/// Gating on the tracked segment index prevents false landings on segments
/// far ahead or behind that merely overlap vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundRule {
    /// Any vertically-colliding segment.
    Any,
    /// Only the segment whose index the entity currently overlaps.
    Current,
    /// The current segment or the one just behind it.
    CurrentOrPrevious,
}

impl GroundRule {
    pub fn matches(self, current: Option<usize>, segment: usize) -> bool {
        match self {
            GroundRule::Any => true,
            GroundRule::Current => current == Some(segment),
            GroundRule::CurrentOrPrevious => {
                current.is_some_and(|c| c == segment || c == segment + 1)
            }
        }
    }
}

/// Declarative collision behavior for one entity kind, interpreted by
/// [`Entity::resolve_collisions`]. Replaces per-frame callback wiring.
#[derive(Debug, Clone, Copy)]
pub struct CollisionPolicy {
    pub horizontal: AxisResponse,
    /// Applied only when `ground` matches the blocking segment.
    pub vertical: AxisResponse,
    pub ground: GroundRule,
    /// Measure the ledge offset on a horizontal block while landing
    /// (feeds the player's step-assist).
    pub measure_ledge: bool,
}

/// Per-tick collision outcome, consumed by kind-specific step logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionOutcome {
    pub blocked_x: bool,
    pub blocked_y: bool,
    /// A blocked axis requested removal.
    pub destroyed: bool,
    /// Ground contact satisfied the policy's rule this tick.
    pub landed: bool,
    /// `segment_top - entity_bottom` of the blocking segment, when measured.
    pub ledge_offset: Option<f32>,
}

/// A mutable simulation object: the player or one enemy instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// Display label; the player's chosen name, the kind label for enemies.
    pub name: String,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Constant after creation, always positive.
    pub size: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    /// Patrol direction; meaningful for ground walkers only.
    pub direction: Direction,
    /// Direction-change cadence; ground walkers only.
    pub timer: Option<Timer>,
    /// Index of the background segment the entity horizontally overlaps.
    pub segment_index: Option<usize>,
    pub walking: bool,
    pub mirrored: bool,
    /// Carried across ticks; cleared when no vertical collision occurs.
    pub landing: bool,
    pub collided_x: bool,
    pub collided_y: bool,
    pub sprites: SpriteSet,
    anim_elapsed: f64,
    anim_frame: usize,
}

impl Entity {
    pub fn new(
        kind: EntityKind,
        name: impl Into<String>,
        hp: i32,
        pos: Vec2,
        size: Vec2,
        sprites: SpriteSet,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            pos,
            vel: Vec2::ZERO,
            size,
            hp,
            max_hp: hp,
            direction: Direction::None,
            timer: None,
            segment_index: None,
            walking: false,
            mirrored: false,
            landing: false,
            collided_x: false,
            collided_y: false,
            sprites,
            anim_elapsed: 0.0,
            anim_frame: 0,
        }
    }

    /// Create an enemy at a uniform-random x in [min_x, max_x], bottom
    /// resting exactly on `anchor_y`. Away enemies drift from the moment
    /// they exist; walkers start idle until their timer picks a direction.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_enemy<R: Rng>(
        kind: EntityKind,
        hp: i32,
        size: Vec2,
        sprites: SpriteSet,
        min_x: f32,
        max_x: f32,
        anchor_y: f32,
        change_direction_delay: Option<f64>,
        rng: &mut R,
    ) -> Self {
        let x = if max_x > min_x {
            rng.random_range(min_x..=max_x)
        } else {
            min_x
        };
        let mut entity = Self::new(
            kind,
            kind.label(),
            hp,
            Vec2::new(x, anchor_y - size.y),
            size,
            sprites,
        );
        if kind == EntityKind::Away {
            entity.walking = true;
        }
        entity.timer = change_direction_delay.map(Timer::new);
        entity
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_corner_size(self.pos, self.size)
    }

    /// Resolve the pending velocity against every background segment.
    ///
    /// Updates `segment_index` from the horizontal-span scan, sets the
    /// per-axis collision flags, and applies the policy's responses to the
    /// blocking segment of each axis. Does not move the entity.
    pub fn resolve_collisions(
        &mut self,
        segments: &[Segment],
        policy: &CollisionPolicy,
    ) -> Result<CollisionOutcome, SimError> {
        let mut outcome = CollisionOutcome::default();
        self.collided_x = false;
        self.collided_y = false;

        for segment in segments {
            let seg_rect = segment.rect;
            // The span scan runs before the axis checks so the ground rule
            // below sees this segment as current when the entity is over it.
            if geom::overlaps_x(&self.rect(), &seg_rect)? {
                self.segment_index = Some(segment.index);
            }

            if !self.collided_x {
                let hitbox = Rect::new(
                    self.pos.x + self.vel.x,
                    self.pos.y,
                    self.size.x,
                    self.size.y,
                );
                if geom::overlaps(&hitbox, &seg_rect)? {
                    self.collided_x = true;
                    outcome.blocked_x = true;
                    if policy.measure_ledge && self.landing {
                        outcome.ledge_offset = Some(seg_rect.y - (self.pos.y + self.size.y));
                    }
                    match policy.horizontal {
                        AxisResponse::Stop => self.vel.x = 0.0,
                        AxisResponse::Bounce => self.vel.x = -self.vel.x,
                        AxisResponse::Destroy => outcome.destroyed = true,
                    }
                }
            }

            if !self.collided_y {
                let hitbox = Rect::new(
                    self.pos.x,
                    self.pos.y + self.vel.y,
                    self.size.x,
                    self.size.y,
                );
                if geom::overlaps(&hitbox, &seg_rect)? {
                    self.collided_y = true;
                    outcome.blocked_y = true;
                    if policy.ground.matches(self.segment_index, segment.index) {
                        match policy.vertical {
                            AxisResponse::Stop => self.vel.y = 0.0,
                            AxisResponse::Bounce => self.vel.y = -self.vel.y,
                            AxisResponse::Destroy => outcome.destroyed = true,
                        }
                        self.landing = true;
                        outcome.landed = true;
                    }
                }
            }
        }

        Ok(outcome)
    }

    /// Advance the walk cycle; idle entities hold their frame.
    pub fn advance_animation(&mut self, dt: f64) {
        if !self.walking {
            return;
        }
        self.anim_elapsed += dt;
        if self.anim_elapsed >= WALK_FRAME_MS {
            self.anim_elapsed = 0.0;
            if !self.sprites.walk.is_empty() {
                self.anim_frame = (self.anim_frame + 1) % self.sprites.walk.len();
            }
        }
    }

    /// The image to draw this tick.
    pub fn sprite(&self) -> ImageHandle {
        if self.walking {
            self.sprites
                .walk
                .get(self.anim_frame)
                .copied()
                .unwrap_or(self.sprites.idle)
        } else {
            self.sprites.idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ArtCatalog, MemoryAssets};
    use crate::consts::GRAVITY;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn sprites() -> SpriteSet {
        let mut assets = MemoryAssets::new();
        ArtCatalog::load(&mut assets).unwrap().player
    }

    fn ground_segment(index: usize, x: f32, y: f32, width: f32) -> Segment {
        Segment {
            index,
            image: ImageHandle(0),
            rect: Rect::new(x, y, width, 200.0),
        }
    }

    fn stop_policy() -> CollisionPolicy {
        CollisionPolicy {
            horizontal: AxisResponse::Stop,
            vertical: AxisResponse::Stop,
            ground: GroundRule::Current,
            measure_ledge: false,
        }
    }

    #[test]
    fn test_spawn_bottom_rests_on_anchor() {
        let mut rng = Pcg32::seed_from_u64(1);
        let e = Entity::spawn_enemy(
            EntityKind::Low,
            10,
            Vec2::new(40.0, 40.0),
            sprites(),
            100.0,
            300.0,
            480.0,
            Some(3000.0),
            &mut rng,
        );
        assert_eq!(e.pos.y + e.size.y, 480.0);
        assert!(e.pos.x >= 100.0 && e.pos.x <= 300.0);
        assert!(!e.walking);
        assert!(e.timer.is_some());
    }

    #[test]
    fn test_spawn_away_walks_immediately() {
        let mut rng = Pcg32::seed_from_u64(1);
        let e = Entity::spawn_enemy(
            EntityKind::Away,
            100,
            Vec2::new(25.0, 25.0),
            sprites(),
            50.0,
            50.0,
            0.0,
            None,
            &mut rng,
        );
        assert!(e.walking);
        assert_eq!(e.pos.x, 50.0);
        assert!(e.timer.is_none());
    }

    #[test]
    fn test_gravity_accumulates_in_freefall() {
        let mut e = Entity::new(
            EntityKind::Player,
            "p",
            100,
            Vec2::new(0.0, -1000.0),
            Vec2::splat(40.0),
            sprites(),
        );
        let segments = [ground_segment(0, 0.0, 480.0, 800.0)];
        let mut last = 0.0;
        for _ in 0..5 {
            e.vel.y += GRAVITY;
            let outcome = e.resolve_collisions(&segments, &stop_policy()).unwrap();
            assert!(!outcome.blocked_y);
            assert!(e.vel.y > last);
            assert_eq!(e.vel.y - last, GRAVITY);
            last = e.vel.y;
            e.pos += e.vel;
        }
    }

    #[test]
    fn test_landing_zeroes_vertical_velocity() {
        let mut e = Entity::new(
            EntityKind::Player,
            "p",
            100,
            Vec2::new(10.0, 439.8),
            Vec2::splat(40.0),
            sprites(),
        );
        let segments = [ground_segment(0, 0.0, 480.0, 800.0)];
        e.vel.y += GRAVITY;
        let outcome = e.resolve_collisions(&segments, &stop_policy()).unwrap();
        assert!(outcome.blocked_y);
        assert!(outcome.landed);
        assert!(e.landing);
        assert_eq!(e.vel.y, 0.0);
    }

    #[test]
    fn test_ground_rule_gating() {
        assert!(GroundRule::Any.matches(None, 7));
        assert!(GroundRule::Current.matches(Some(3), 3));
        assert!(!GroundRule::Current.matches(Some(3), 2));
        assert!(!GroundRule::Current.matches(None, 0));
        // The player may also land on the segment just behind its own.
        assert!(GroundRule::CurrentOrPrevious.matches(Some(3), 3));
        assert!(GroundRule::CurrentOrPrevious.matches(Some(3), 2));
        assert!(!GroundRule::CurrentOrPrevious.matches(Some(3), 4));
        assert!(!GroundRule::CurrentOrPrevious.matches(None, 0));
    }

    #[test]
    fn test_lands_while_straddling_a_tile_boundary() {
        // Entity spans the one-unit tile overlap; the second tile sits
        // lower, the fall box clips the first tile's lip.
        let segments = [
            ground_segment(0, 0.0, 470.0, 800.0),
            ground_segment(1, 799.0, 490.0, 800.0),
        ];
        let mut e = Entity::new(
            EntityKind::Player,
            "p",
            100,
            Vec2::new(780.0, 429.8),
            Vec2::splat(40.0),
            sprites(),
        );
        e.vel.y += GRAVITY;
        let policy = CollisionPolicy {
            ground: GroundRule::CurrentOrPrevious,
            ..stop_policy()
        };
        let outcome = e.resolve_collisions(&segments, &policy).unwrap();
        assert!(outcome.landed);
        assert_eq!(e.vel.y, 0.0);
        // The span scan left the entity tracked on the first tile it
        // overlapped when the fall box hit it.
        assert_eq!(e.segment_index, Some(1));
    }

    #[test]
    fn test_horizontal_block_discards_delta() {
        let mut e = Entity::new(
            EntityKind::Player,
            "p",
            100,
            Vec2::new(100.0, 450.0),
            Vec2::splat(40.0),
            sprites(),
        );
        // A raised segment ahead: entity bottom (490) is below its top.
        let segments = [ground_segment(7, 142.0, 470.0, 800.0)];
        e.vel.x = 3.0;
        let outcome = e.resolve_collisions(&segments, &stop_policy()).unwrap();
        assert!(outcome.blocked_x);
        assert_eq!(e.vel.x, 0.0);
        e.pos += e.vel;
        assert_eq!(e.pos.x, 100.0);
    }

    #[test]
    fn test_ledge_offset_measured_only_while_landing() {
        let policy = CollisionPolicy {
            measure_ledge: true,
            ground: GroundRule::CurrentOrPrevious,
            ..stop_policy()
        };
        let segments = [ground_segment(1, 142.0, 480.0, 800.0)];
        let mut e = Entity::new(
            EntityKind::Player,
            "p",
            100,
            Vec2::new(100.0, 450.0),
            Vec2::splat(40.0),
            sprites(),
        );
        e.vel.x = 3.0;
        let outcome = e.resolve_collisions(&segments, &policy).unwrap();
        assert_eq!(outcome.ledge_offset, None);

        e.landing = true;
        e.vel.x = 3.0;
        let outcome = e.resolve_collisions(&segments, &policy).unwrap();
        // segment top 480 minus entity bottom 490
        assert_eq!(outcome.ledge_offset, Some(-10.0));
    }

    #[test]
    fn test_destroy_response_marks_removal() {
        let policy = CollisionPolicy {
            horizontal: AxisResponse::Destroy,
            vertical: AxisResponse::Stop,
            ground: GroundRule::Any,
            measure_ledge: false,
        };
        let segments = [ground_segment(0, 100.0, 470.0, 800.0)];
        let mut e = Entity::new(
            EntityKind::Away,
            "away",
            100,
            Vec2::new(130.0, 450.0),
            Vec2::splat(25.0),
            sprites(),
        );
        e.vel.x = -3.0;
        let outcome = e.resolve_collisions(&segments, &policy).unwrap();
        assert!(outcome.blocked_x);
        assert!(outcome.destroyed);
    }

    #[test]
    fn test_walk_cycle_advances_at_frame_interval() {
        let mut e = Entity::new(
            EntityKind::Player,
            "p",
            100,
            Vec2::ZERO,
            Vec2::splat(40.0),
            sprites(),
        );
        let idle = e.sprite();
        e.walking = true;
        let first = e.sprite();
        e.advance_animation(WALK_FRAME_MS);
        let second = e.sprite();
        assert_ne!(first, second);
        e.walking = false;
        assert_eq!(e.sprite(), idle);
    }
}
