//! Simulation state
//!
//! Every piece of mutable game data lives in `SimState`, owned by the
//! frame driver and threaded through `tick`/`present`. The presentation
//! layer reads it between update and draw and never mutates it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use super::policy::EnemyRoster;
use super::stage::{Banner, Hsl, Stage, StageState, Theme, SKY_STAGE3, SKY_WON, WIN_HUE};
use super::timer::Timer;
use super::world::World;
use crate::assets::{ArtCatalog, SpriteSet, WorldArt};
use crate::consts::{AWAY_SPEED_STEP, PLAYER_HP, PLAYER_SIZE};
use crate::SimError;

/// Run configuration, fixed at start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Number of background tiles per stage world.
    pub segments: usize,
    /// RNG seed; same seed and inputs reproduce the run.
    pub seed: u64,
    pub player_name: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            segments: 1,
            seed: 0,
            player_name: "player".to_owned(),
        }
    }
}

/// Per-kind enemy collections, owned and pruned by the simulation step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemySet {
    pub away: Vec<Entity>,
    pub low: Vec<Entity>,
    pub tall: Vec<Entity>,
}

impl EnemySet {
    pub fn clear_all(&mut self) {
        self.away.clear();
        self.low.clear();
        self.tall.clear();
    }

    pub fn total(&self) -> usize {
        self.away.len() + self.low.len() + self.tall.len()
    }
}

/// Derived view offset, recomputed from the player each frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

/// Complete game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub config: SimConfig,
    pub art: ArtCatalog,
    pub roster: EnemyRoster,
    pub rng: Pcg32,
    pub player: Entity,
    pub enemies: EnemySet,
    pub world: World,
    pub camera: Camera,
    pub stage: StageState,
    pub banner: Banner,
    /// Away-enemy spawn cadence.
    pub away_spawn: Timer,
    /// Backdrop override; set by the error stage and the win screen.
    pub sky: Option<Hsl>,
    /// Sticky terminal latch: defeat or victory. While set, enemy
    /// collections are cleared every frame and the world edge only clamps.
    pub game_over: bool,
    /// Total simulated time in milliseconds.
    pub time_ms: f64,
}

impl SimState {
    /// Build a fresh run: classic world, player at mid-viewport on the sky
    /// line, stage 1 wave populated.
    pub fn new(config: SimConfig, art: ArtCatalog) -> Result<Self, SimError> {
        if config.segments == 0 {
            return Err(SimError::Configuration(
                "world must have at least one background segment".to_owned(),
            ));
        }

        let roster = EnemyRoster::default();
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let world = World::build(&config, Theme::Classic.art(&art), &mut rng);

        let player = Entity::new(
            EntityKind::Player,
            config.player_name.clone(),
            PLAYER_HP,
            Vec2::new(config.viewport_width / 2.0, 0.0),
            Vec2::splat(PLAYER_SIZE),
            art.player.clone(),
        );

        let mut state = Self {
            stage: StageState::new(roster.away.speed),
            banner: Banner::new("Stage: 1", Hsl::new(0.0, 100.0, 0.0)),
            away_spawn: Timer::new(roster.away.spawn_interval),
            roster,
            player,
            enemies: EnemySet::default(),
            world,
            camera: Camera::default(),
            sky: None,
            game_over: false,
            time_ms: 0.0,
            config,
            art,
            rng,
        };
        state.spawn_stage_wave();
        log::info!("run started: seed {}", state.config.seed);
        Ok(state)
    }

    fn sprites_for(&self, kind: EntityKind) -> SpriteSet {
        match kind {
            EntityKind::Player => self.art.player.clone(),
            EntityKind::Away => self.art.away.clone(),
            EntityKind::Low => self.art.low.clone(),
            EntityKind::Tall => self.art.tall.clone(),
        }
    }

    /// Populate the current stage's wave: walkers dropped from the sky
    /// across the far half of the world.
    pub fn spawn_stage_wave(&mut self) {
        let Some((kind, count)) = self.stage.current.wave() else {
            return;
        };
        let Some(spec) = self.roster.walker(kind) else {
            return;
        };
        let (size, hp, delay) = (spec.size, spec.hp, spec.change_direction_delay);
        let min_x = self.world.mid_segment_x();
        let max_x = self.world.right_edge();
        let sprites = self.sprites_for(kind);
        for _ in 0..count {
            let enemy = Entity::spawn_enemy(
                kind,
                hp,
                size,
                sprites.clone(),
                min_x,
                max_x,
                0.0,
                Some(delay),
                &mut self.rng,
            );
            match kind {
                EntityKind::Tall => self.enemies.tall.push(enemy),
                _ => self.enemies.low.push(enemy),
            }
        }
        log::info!("spawned {count} {} enemies", kind.label());
    }

    /// Spawn one away enemy at the right edge of the segment one ahead of
    /// the player, resting on that segment's top. No-op when no such
    /// segment exists (the player is near the world's end).
    pub fn spawn_away(&mut self) {
        let Some(current) = self.player.segment_index else {
            return;
        };
        let index = current + self.roster.away.spawn_segment_offset;
        let Some(segment) = self.world.segments.get(index) else {
            return;
        };
        let spec = &self.roster.away;
        let x = segment.rect.right() - spec.size.x;
        let anchor = segment.rect.y;
        let (hp, size) = (spec.hp, spec.size);
        let sprites = self.sprites_for(EntityKind::Away);
        let enemy = Entity::spawn_enemy(
            EntityKind::Away,
            hp,
            size,
            sprites,
            x,
            x,
            anchor,
            None,
            &mut self.rng,
        );
        log::debug!("away spawn on segment {index} at x {x}");
        self.enemies.away.push(enemy);
    }

    /// Put the player at the left edge of the (re)built world, standing on
    /// the first segment.
    pub fn reset_player_position(&mut self) {
        self.player.pos.x = 0.0;
        self.player.pos.y = self.world.segments[0].rect.y - self.player.size.y;
    }

    /// One stage transition: advance the machine, escalate, rebuild the
    /// world for the new stage, repopulate its wave, reposition the player.
    pub fn advance_stage(&mut self) {
        let next = self.stage.advance(AWAY_SPEED_STEP);
        self.enemies.low.clear();
        self.enemies.tall.clear();

        match next {
            Stage::Won => {
                self.world = World::build(
                    &self.config,
                    Theme::Classic.art(&self.art),
                    &mut self.rng,
                );
                self.sky = Some(SKY_WON);
                self.game_over = true;
                self.banner.show(
                    "You Win",
                    Hsl::new(WIN_HUE, 100.0, self.stage.title_lightness),
                );
                log::info!("run won");
            }
            stage => {
                self.world = World::build(
                    &self.config,
                    stage.theme().art(&self.art),
                    &mut self.rng,
                );
                if stage.theme() == Theme::Error {
                    self.sky = Some(SKY_STAGE3);
                }
                self.spawn_stage_wave();
                let number = stage.number().unwrap_or(0);
                self.banner.show(
                    format!("Stage: {number}"),
                    Hsl::new(0.0, 100.0, self.stage.title_lightness),
                );
                log::info!(
                    "stage {number}: away speed {}, {} enemies",
                    self.stage.away_speed,
                    self.enemies.total()
                );
            }
        }
        self.reset_player_position();
    }
}

impl Theme {
    /// The art set this theme draws from.
    pub fn art(self, catalog: &ArtCatalog) -> &WorldArt {
        match self {
            Theme::Classic => &catalog.classic,
            Theme::Error => &catalog.error,
        }
    }
}
