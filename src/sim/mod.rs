//! Deterministic simulation module
//!
//! All gameplay logic lives here. The module is renderer-agnostic and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Single-writer state, owned by the frame driver
//! - No rendering or platform dependencies

pub mod entity;
pub mod geom;
pub mod policy;
pub mod stage;
pub mod state;
pub mod tick;
pub mod timer;
pub mod world;

pub use entity::{
    AxisResponse, CollisionOutcome, CollisionPolicy, Direction, Entity, EntityKind, GroundRule,
};
pub use geom::{overlaps, overlaps_x, overlaps_y, Rect};
pub use policy::{collision_policy, AwaySpec, EnemyRoster, WalkerSpec};
pub use stage::{Banner, Hsl, Stage, StageState, Theme};
pub use state::{Camera, EnemySet, SimConfig, SimState};
pub use tick::{tick, InputDirection, TickInput};
pub use timer::Timer;
pub use world::{Decoration, Segment, World};
