//! Tiled background and decoration builder
//!
//! The world is a row of viewport-wide ground segments, each nudged
//! vertically by a small random jitter, with one decoration prop placed
//! somewhere on every segment. Regeneration replaces both collections
//! wholesale; nothing is patched incrementally.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::SimConfig;
use crate::assets::{ImageHandle, WorldArt};
use crate::consts::{DECORATION_SIZE, GROUND_MARGIN, SEGMENT_JITTER};

/// One tile of world ground; the unit of collision and indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Stable order in the world, stamped at build time.
    pub index: usize,
    pub image: ImageHandle,
    pub rect: Rect,
}

/// Purely visual prop attached loosely to a segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decoration {
    pub segment: usize,
    pub image: ImageHandle,
    pub rect: Rect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub segments: Vec<Segment>,
    pub decorations: Vec<Decoration>,
    width: f32,
}

impl World {
    /// Build `config.segments` adjacent tiles from the theme's art.
    ///
    /// Each tile after the first overlaps its predecessor by one unit, so
    /// the world spans `viewport_width * segments - segments` — the tiling
    /// formula is a literal contract, not a derived quantity.
    pub fn build<R: Rng>(config: &SimConfig, art: &WorldArt, rng: &mut R) -> Self {
        let ground = config.viewport_height - GROUND_MARGIN;
        let count = config.segments;

        let mut segments = Vec::with_capacity(count);
        let mut decorations = Vec::with_capacity(count);
        for index in 0..count {
            let jitter = rng.random_range(-SEGMENT_JITTER..=SEGMENT_JITTER);
            let x = config.viewport_width * index as f32 - index as f32;
            let y = ground + jitter;
            let rect = Rect::new(x, y, config.viewport_width, config.viewport_height - y);
            segments.push(Segment {
                index,
                image: art.background,
                rect,
            });

            if !art.decorations.is_empty() {
                let deco_x = if rect.width > DECORATION_SIZE {
                    rng.random_range(rect.x..=(rect.right() - DECORATION_SIZE))
                } else {
                    rect.x
                };
                let deco_image = art.decorations[rng.random_range(0..art.decorations.len())];
                decorations.push(Decoration {
                    segment: index,
                    image: deco_image,
                    rect: Rect::new(deco_x, y - DECORATION_SIZE, DECORATION_SIZE, DECORATION_SIZE),
                });
            }
        }

        Self {
            segments,
            decorations,
            width: config.viewport_width * count as f32 - count as f32,
        }
    }

    /// World width under the off-by-one tiling formula; the stage exit line.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Right edge of the last segment; the walker patrol bound.
    pub fn right_edge(&self) -> f32 {
        self.segments.last().map_or(0.0, |s| s.rect.right())
    }

    /// x of the middle segment, the near bound of wave spawn placement.
    pub fn mid_segment_x(&self) -> f32 {
        self.segments[self.segments.len() / 2].rect.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ArtCatalog, MemoryAssets};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn classic_art() -> WorldArt {
        let mut assets = MemoryAssets::new();
        ArtCatalog::load(&mut assets).unwrap().classic
    }

    fn config(segments: usize) -> SimConfig {
        SimConfig {
            segments,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_single_segment_world_width_is_799() {
        // 800 * 1 - 1: the documented off-by-one boundary value.
        let mut rng = Pcg32::seed_from_u64(3);
        let world = World::build(&config(1), &classic_art(), &mut rng);
        assert_eq!(world.width(), 799.0);
        assert_eq!(world.segments.len(), 1);
        assert_eq!(world.decorations.len(), 1);
    }

    #[test]
    fn test_segments_are_indexed_and_jittered_in_band() {
        let mut rng = Pcg32::seed_from_u64(11);
        let cfg = config(4);
        let world = World::build(&cfg, &classic_art(), &mut rng);
        let ground = cfg.viewport_height - GROUND_MARGIN;
        assert_eq!(world.width(), 800.0 * 4.0 - 4.0);
        for (i, segment) in world.segments.iter().enumerate() {
            assert_eq!(segment.index, i);
            assert_eq!(segment.rect.x, 800.0 * i as f32 - i as f32);
            let jitter = segment.rect.y - ground;
            assert!(jitter >= -SEGMENT_JITTER && jitter <= SEGMENT_JITTER);
            // Tiles reach the bottom of the viewport exactly.
            assert_eq!(segment.rect.bottom(), cfg.viewport_height);
        }
    }

    #[test]
    fn test_decorations_sit_on_their_segment() {
        let mut rng = Pcg32::seed_from_u64(23);
        let world = World::build(&config(3), &classic_art(), &mut rng);
        for (deco, segment) in world.decorations.iter().zip(&world.segments) {
            assert_eq!(deco.segment, segment.index);
            assert!(deco.rect.x >= segment.rect.x);
            assert!(deco.rect.right() <= segment.rect.right());
            assert_eq!(deco.rect.bottom(), segment.rect.y);
            assert_eq!(deco.rect.width, DECORATION_SIZE);
        }
    }

    #[test]
    fn test_rebuild_replaces_wholesale() {
        let mut rng = Pcg32::seed_from_u64(5);
        let cfg = config(2);
        let art = classic_art();
        let first = World::build(&cfg, &art, &mut rng);
        let second = World::build(&cfg, &art, &mut rng);
        assert_eq!(first.segments.len(), second.segments.len());
        // Fresh jitter draws; the worlds are independent builds.
        assert_eq!(first.width(), second.width());
    }
}
