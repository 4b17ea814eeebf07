//! Grove Runner - a 2D side-scrolling action game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collision, enemy AI, stages)
//! - `assets`: Opaque image handles resolved by the host
//! - `snapshot`: Read-only draw data for the presentation layer
//! - `app`: Fixed-timestep frame driver

pub mod app;
pub mod assets;
pub mod sim;
pub mod snapshot;

pub use app::App;
pub use sim::state::{SimConfig, SimState};

use thiserror::Error;

/// Unrecoverable core errors.
///
/// Both variants indicate a programming or configuration defect, not a
/// transient condition; callers propagate rather than retry. Player defeat
/// is ordinary state, never an error.
#[derive(Debug, Error)]
pub enum SimError {
    /// A geometry helper received a rect with a non-finite required field.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An asset reference or run precondition could not be resolved.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Game configuration constants
pub mod consts {
    /// Downward acceleration added to vertical velocity each tick.
    pub const GRAVITY: f32 = 0.5;
    /// Vertical launch velocity applied on jump (units/tick).
    pub const JUMP_VELOCITY: f32 = -9.0;
    /// Joystick vector to horizontal velocity scale.
    pub const MOVE_SCALE: f32 = 3.0;
    /// Ledge offsets in [STEP_ASSIST_MIN, 0) are climbed without a jump.
    pub const STEP_ASSIST_MIN: f32 = -15.0;
    /// Distance from the viewport bottom to the nominal ground line.
    pub const GROUND_MARGIN: f32 = 120.0;
    /// Vertical jitter band (±) applied to each background segment.
    pub const SEGMENT_JITTER: f32 = 20.0;
    /// Decoration props are square, this many units on a side.
    pub const DECORATION_SIZE: f32 = 100.0;
    /// Milliseconds between walk animation frames.
    pub const WALK_FRAME_MS: f64 = 250.0;
    /// Banner alpha lost per millisecond while fading.
    pub const BANNER_FADE_PER_MS: f32 = 1.0 / 2500.0;
    /// Fixed simulation timestep in milliseconds (60 Hz).
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Maximum ticks per frame to prevent spiral of death.
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player defaults
    pub const PLAYER_HP: i32 = 100;
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Away-enemy speed penalty applied at each stage transition.
    pub const AWAY_SPEED_STEP: f32 = 2.0;
    /// Banner lightness gained at each stage transition, and its cap.
    pub const TITLE_LIGHTNESS_STEP: f32 = 25.0;
    pub const TITLE_LIGHTNESS_MAX: f32 = 50.0;
}
