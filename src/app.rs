//! Frame driver
//!
//! Bridges a display-refresh callback to the fixed simulation timestep.
//! The host calls `frame` with its clock once per refresh; the driver runs
//! as many fixed ticks as fit, carrying the remainder, and clamps large
//! gaps (tab switches, debugger stops) instead of spiraling.

use crate::assets::ArtCatalog;
use crate::consts::{MAX_SUBSTEPS, TICK_MS};
use crate::sim::state::{SimConfig, SimState};
use crate::sim::tick::{tick, TickInput};
use crate::SimError;

/// Largest frame delta fed to the accumulator, in milliseconds.
const MAX_FRAME_MS: f64 = 100.0;

/// Player names must be this long to start a run.
const NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=10;

/// The start-run gate: 3 to 10 characters after trimming.
pub fn validate_player_name(name: &str) -> Result<&str, SimError> {
    let trimmed = name.trim();
    let length = trimmed.chars().count();
    if !NAME_LENGTH.contains(&length) {
        return Err(SimError::Configuration(format!(
            "player name must be 3-10 characters, got {length}"
        )));
    }
    Ok(trimmed)
}

/// Owns the simulation and the input snapshot between frames.
pub struct App {
    pub state: SimState,
    /// Polled input; the host overwrites it whenever the joystick moves.
    pub input: TickInput,
    accumulator: f64,
    last_time: Option<f64>,
}

impl App {
    /// Validate the start gate and build a run.
    pub fn start(mut config: SimConfig, art: ArtCatalog) -> Result<Self, SimError> {
        config.player_name = validate_player_name(&config.player_name)?.to_owned();
        Ok(Self {
            state: SimState::new(config, art)?,
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: None,
        })
    }

    /// Advance the simulation to `now_ms` (host clock, milliseconds).
    pub fn frame(&mut self, now_ms: f64) -> Result<(), SimError> {
        let delta = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_time = Some(now_ms);
        self.accumulator += delta;

        let mut substeps = 0;
        while self.accumulator >= TICK_MS && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, TICK_MS)?;
            self.accumulator -= TICK_MS;
            substeps += 1;
        }
        Ok(())
    }
}
