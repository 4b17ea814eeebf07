//! Presentation read-out
//!
//! The core never draws. `present` walks the state, culls to the camera
//! viewport, and hands plain data snapshots to a `DrawSink` supplied by
//! the presentation layer. Snapshots carry image handles and geometry
//! only; what a handle looks like is the host's business.

use crate::assets::ImageHandle;
use crate::sim::geom::Rect;
use crate::sim::stage::Hsl;
use crate::sim::state::SimState;

/// Drawable view of an entity for one frame.
#[derive(Debug, Clone)]
pub struct EntitySnapshot<'a> {
    pub image: ImageHandle,
    pub name: &'a str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub mirrored: bool,
    pub hp: i32,
    pub max_hp: i32,
}

/// Drawable view of a background segment or decoration prop.
#[derive(Debug, Clone, Copy)]
pub struct TileSnapshot {
    pub image: ImageHandle,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Center-screen title for one frame.
#[derive(Debug, Clone, Copy)]
pub struct BannerSnapshot<'a> {
    pub text: &'a str,
    pub color: Hsl,
    pub alpha: f32,
}

/// Render target supplied by the presentation layer.
pub trait DrawSink {
    fn tile(&mut self, tile: &TileSnapshot);
    fn entity(&mut self, entity: &EntitySnapshot<'_>);
    fn banner(&mut self, banner: &BannerSnapshot<'_>);
}

fn visible(rect: &Rect, camera_x: f32, viewport_width: f32) -> bool {
    rect.right() > camera_x && rect.x < camera_x + viewport_width
}

fn tile_of(image: ImageHandle, rect: &Rect) -> TileSnapshot {
    TileSnapshot {
        image,
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
    }
}

fn entity_of(entity: &crate::sim::entity::Entity) -> EntitySnapshot<'_> {
    EntitySnapshot {
        image: entity.sprite(),
        name: &entity.name,
        x: entity.pos.x,
        y: entity.pos.y,
        width: entity.size.x,
        height: entity.size.y,
        mirrored: entity.mirrored,
        hp: entity.hp,
        max_hp: entity.max_hp,
    }
}

/// Emit the frame's draw data in paint order: ground, decorations, the
/// player, enemies, then the banner. Off-camera tiles and enemies are
/// culled; the player is always emitted.
pub fn present(state: &SimState, sink: &mut dyn DrawSink) {
    let camera_x = state.camera.x;
    let viewport = state.config.viewport_width;

    for segment in &state.world.segments {
        if visible(&segment.rect, camera_x, viewport) {
            sink.tile(&tile_of(segment.image, &segment.rect));
        }
    }
    for decoration in &state.world.decorations {
        if visible(&decoration.rect, camera_x, viewport) {
            sink.tile(&tile_of(decoration.image, &decoration.rect));
        }
    }

    sink.entity(&entity_of(&state.player));

    for enemy in state
        .enemies
        .away
        .iter()
        .chain(&state.enemies.low)
        .chain(&state.enemies.tall)
    {
        if visible(&enemy.rect(), camera_x, viewport) {
            sink.entity(&entity_of(enemy));
        }
    }

    if state.banner.visible {
        sink.banner(&BannerSnapshot {
            text: &state.banner.text,
            color: state.banner.color,
            alpha: state.banner.alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ArtCatalog, MemoryAssets};
    use crate::sim::state::{SimConfig, SimState};

    #[derive(Default)]
    struct Recorder {
        tiles: usize,
        entities: Vec<String>,
        banners: Vec<String>,
    }

    impl DrawSink for Recorder {
        fn tile(&mut self, _tile: &TileSnapshot) {
            self.tiles += 1;
        }
        fn entity(&mut self, entity: &EntitySnapshot<'_>) {
            self.entities.push(entity.name.to_owned());
        }
        fn banner(&mut self, banner: &BannerSnapshot<'_>) {
            self.banners.push(banner.text.to_owned());
        }
    }

    fn new_state(segments: usize) -> SimState {
        let mut assets = MemoryAssets::new();
        let art = ArtCatalog::load(&mut assets).unwrap();
        let config = SimConfig {
            segments,
            seed: 31,
            player_name: "viewer".to_owned(),
            ..SimConfig::default()
        };
        SimState::new(config, art).unwrap()
    }

    #[test]
    fn test_present_emits_world_player_and_banner() {
        let state = new_state(1);
        let mut sink = Recorder::default();
        present(&state, &mut sink);
        // One segment plus one decoration.
        assert_eq!(sink.tiles, 2);
        assert_eq!(sink.entities[0], "viewer");
        // Stage-1 wave walkers are on screen in a one-segment world.
        assert_eq!(sink.entities.len(), 1 + state.enemies.low.len());
        assert_eq!(sink.banners, vec!["Stage: 1".to_owned()]);
    }

    #[test]
    fn test_present_culls_offscreen_tiles_and_enemies() {
        let mut state = new_state(4);
        state.camera.x = 0.0;
        // Park every walker far past the viewport.
        for enemy in state.enemies.low.iter_mut() {
            enemy.pos.x = 3000.0;
        }
        let mut sink = Recorder::default();
        present(&state, &mut sink);
        // Only the first tile column is visible at camera 0: segment 0 and
        // its decoration, maybe segment 1's leftmost unit.
        assert!(sink.tiles < 8);
        assert_eq!(sink.entities, vec!["viewer".to_owned()]);
    }

    #[test]
    fn test_player_is_drawn_even_offscreen() {
        let mut state = new_state(4);
        state.camera.x = 1600.0;
        state.player.pos.x = 0.0;
        let mut sink = Recorder::default();
        present(&state, &mut sink);
        assert!(sink.entities.contains(&"viewer".to_owned()));
    }

    #[test]
    fn test_faded_banner_is_not_emitted() {
        let mut state = new_state(1);
        state.banner.visible = false;
        let mut sink = Recorder::default();
        present(&state, &mut sink);
        assert!(sink.banners.is_empty());
    }
}
