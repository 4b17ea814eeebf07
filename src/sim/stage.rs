//! Stage progression
//!
//! The run is a fixed three-stage sequence modeled as an explicit state
//! machine; `Won` is terminal and absorbing. Escalation state (away-enemy
//! speed, banner lightness) and the on-screen banner live here so the
//! sequencer owns everything a transition touches besides the world
//! itself.

use serde::{Deserialize, Serialize};

use super::entity::EntityKind;
use crate::consts::{BANNER_FADE_PER_MS, TITLE_LIGHTNESS_MAX, TITLE_LIGHTNESS_STEP};

/// Which art set the world is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Classic,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Stage1,
    Stage2,
    Stage3,
    Won,
}

impl Stage {
    /// Next stage in the fixed sequence; `Won` absorbs.
    pub fn advance(self) -> Stage {
        match self {
            Stage::Stage1 => Stage::Stage2,
            Stage::Stage2 => Stage::Stage3,
            Stage::Stage3 | Stage::Won => Stage::Won,
        }
    }

    /// 1-based stage number; `None` once the run is won.
    pub fn number(self) -> Option<u32> {
        match self {
            Stage::Stage1 => Some(1),
            Stage::Stage2 => Some(2),
            Stage::Stage3 => Some(3),
            Stage::Won => None,
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Stage::Stage3 => Theme::Error,
            _ => Theme::Classic,
        }
    }

    /// The enemy wave populated on entering this stage.
    pub fn wave(self) -> Option<(EntityKind, usize)> {
        match self {
            Stage::Stage1 => Some((EntityKind::Low, 2)),
            Stage::Stage2 => Some((EntityKind::Low, 4)),
            Stage::Stage3 => Some((EntityKind::Tall, 4)),
            Stage::Won => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Won
    }
}

/// HSL color triple handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }
}

/// Backdrop color once the error stage begins.
pub const SKY_STAGE3: Hsl = Hsl::new(198.0, 72.0, 35.0);
/// Backdrop color after winning.
pub const SKY_WON: Hsl = Hsl::new(198.0, 72.0, 72.0);
/// Banner color on defeat.
pub const DEFEAT_COLOR: Hsl = Hsl::new(0.0, 100.0, 50.0);
/// Banner hue after winning.
pub const WIN_HUE: f32 = 130.0;

/// Stage-wide escalation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageState {
    pub current: Stage,
    /// Velocity of freshly spawned away enemies; steps further negative at
    /// every transition, so the ambient threat hardens stage over stage.
    pub away_speed: f32,
    /// Banner lightness progression, stepped and capped per transition.
    pub title_lightness: f32,
}

impl StageState {
    pub fn new(away_speed: f32) -> Self {
        Self {
            current: Stage::Stage1,
            away_speed,
            title_lightness: 0.0,
        }
    }

    /// Apply the per-transition escalation and move to the next stage.
    pub fn advance(&mut self, speed_step: f32) -> Stage {
        self.current = self.current.advance();
        self.away_speed -= speed_step;
        self.title_lightness = (self.title_lightness + TITLE_LIGHTNESS_STEP).min(TITLE_LIGHTNESS_MAX);
        self.current
    }
}

/// Center-screen title text with a slow fade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    pub color: Hsl,
    pub alpha: f32,
    pub visible: bool,
}

impl Banner {
    pub fn new(text: impl Into<String>, color: Hsl) -> Self {
        Self {
            text: text.into(),
            color,
            alpha: 1.0,
            visible: true,
        }
    }

    pub fn show(&mut self, text: impl Into<String>, color: Hsl) {
        self.text = text.into();
        self.color = color;
        self.alpha = 1.0;
        self.visible = true;
    }

    /// Fade toward invisible; terminal banners hold at full opacity.
    pub fn fade(&mut self, dt: f64, hold: bool) {
        if !self.visible {
            return;
        }
        if hold {
            self.alpha = 1.0;
            return;
        }
        self.alpha = (self.alpha - BANNER_FADE_PER_MS * dt as f32).max(0.0);
        if self.alpha == 0.0 {
            self.visible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_fixed_and_terminal() {
        assert_eq!(Stage::Stage1.advance(), Stage::Stage2);
        assert_eq!(Stage::Stage2.advance(), Stage::Stage3);
        assert_eq!(Stage::Stage3.advance(), Stage::Won);
        assert_eq!(Stage::Won.advance(), Stage::Won);
        assert!(Stage::Won.is_terminal());
        assert!(!Stage::Stage3.is_terminal());
    }

    #[test]
    fn test_waves_escalate_then_switch_kind() {
        assert_eq!(Stage::Stage1.wave(), Some((EntityKind::Low, 2)));
        assert_eq!(Stage::Stage2.wave(), Some((EntityKind::Low, 4)));
        assert_eq!(Stage::Stage3.wave(), Some((EntityKind::Tall, 4)));
        assert_eq!(Stage::Won.wave(), None);
        assert_eq!(Stage::Stage3.theme(), Theme::Error);
        assert_eq!(Stage::Stage2.theme(), Theme::Classic);
    }

    #[test]
    fn test_escalation_steps_speed_and_lightness() {
        let mut stage = StageState::new(-3.0);
        stage.advance(2.0);
        assert_eq!(stage.current, Stage::Stage2);
        assert_eq!(stage.away_speed, -5.0);
        assert_eq!(stage.title_lightness, 25.0);
        stage.advance(2.0);
        assert_eq!(stage.away_speed, -7.0);
        assert_eq!(stage.title_lightness, 50.0);
        stage.advance(2.0);
        assert_eq!(stage.current, Stage::Won);
        // Lightness caps while speed keeps stepping.
        assert_eq!(stage.title_lightness, 50.0);
        assert_eq!(stage.away_speed, -9.0);
    }

    #[test]
    fn test_banner_fades_then_hides() {
        let mut banner = Banner::new("Stage: 1", Hsl::new(0.0, 100.0, 0.0));
        banner.fade(1250.0, false);
        assert!((banner.alpha - 0.5).abs() < 1e-4);
        assert!(banner.visible);
        banner.fade(2500.0, false);
        assert_eq!(banner.alpha, 0.0);
        assert!(!banner.visible);
    }

    #[test]
    fn test_terminal_banner_holds_full_alpha() {
        let mut banner = Banner::new("defeat", DEFEAT_COLOR);
        banner.fade(10_000.0, true);
        assert_eq!(banner.alpha, 1.0);
        assert!(banner.visible);
    }
}
