//! Asset provider interface
//!
//! The simulation references sprites by opaque handle only. The host
//! resolves logical paths to drawable images and guarantees a handle is
//! usable once its load-complete signal fires; the core never inspects
//! pixel data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::SimError;

/// Opaque drawable image reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u32);

/// Resolves a logical sprite path to a drawable handle.
pub trait Assets {
    fn image(&mut self, path: &str) -> Result<ImageHandle, SimError>;
}

/// Path-interning provider for hosts that keep their own handle-to-image
/// table, and for headless use. Never fails to resolve.
#[derive(Debug, Default)]
pub struct MemoryAssets {
    by_path: HashMap<String, ImageHandle>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reverse lookup, mainly useful to presentation layers and tests.
    pub fn path_of(&self, handle: ImageHandle) -> Option<&str> {
        self.by_path
            .iter()
            .find(|(_, h)| **h == handle)
            .map(|(path, _)| path.as_str())
    }
}

impl Assets for MemoryAssets {
    fn image(&mut self, path: &str) -> Result<ImageHandle, SimError> {
        let next = ImageHandle(self.by_path.len() as u32);
        Ok(*self.by_path.entry(path.to_owned()).or_insert(next))
    }
}

/// Idle image plus cyclic walk frames for one entity kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteSet {
    pub idle: ImageHandle,
    pub walk: Vec<ImageHandle>,
}

impl SpriteSet {
    fn load(assets: &mut dyn Assets, idle: &str, walk: &[&str]) -> Result<Self, SimError> {
        Ok(Self {
            idle: assets.image(idle)?,
            walk: walk
                .iter()
                .map(|&path| assets.image(path))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Ground image plus decoration choices for one stage theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldArt {
    pub background: ImageHandle,
    pub decorations: Vec<ImageHandle>,
}

impl WorldArt {
    fn load(assets: &mut dyn Assets, background: &str, decorations: &[&str]) -> Result<Self, SimError> {
        Ok(Self {
            background: assets.image(background)?,
            decorations: decorations
                .iter()
                .map(|&path| assets.image(path))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Every sprite the game draws, resolved once before the run starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtCatalog {
    pub player: SpriteSet,
    pub away: SpriteSet,
    pub low: SpriteSet,
    pub tall: SpriteSet,
    pub classic: WorldArt,
    pub error: WorldArt,
}

impl ArtCatalog {
    /// Resolve the full sprite path table through the provider. Fails with
    /// a configuration error if any reference is unresolvable.
    pub fn load(assets: &mut dyn Assets) -> Result<Self, SimError> {
        Ok(Self {
            player: SpriteSet::load(
                assets,
                "character/idle.png",
                &[
                    "character/idle.png",
                    "character/walk1.png",
                    "character/idle.png",
                    "character/walk2.png",
                ],
            )?,
            away: SpriteSet::load(
                assets,
                "enemy/away1.png",
                &[
                    "enemy/away1.png",
                    "enemy/away2.png",
                    "enemy/away3.png",
                    "enemy/away4.png",
                ],
            )?,
            low: SpriteSet::load(
                assets,
                "enemy/low2.png",
                &["enemy/low1.png", "enemy/low2.png", "enemy/low3.png"],
            )?,
            tall: SpriteSet::load(
                assets,
                "enemy/tall2.png",
                &["enemy/tall1.png", "enemy/tall2.png", "enemy/tall3.png"],
            )?,
            classic: WorldArt::load(
                assets,
                "background/grass.png",
                &[
                    "background/tree1.png",
                    "background/tree2.png",
                    "background/tree3.png",
                    "background/tree4.png",
                    "background/tree5.png",
                    "background/tree6.png",
                    "background/tree7.png",
                    "background/tree8.png",
                ],
            )?,
            error: WorldArt::load(
                assets,
                "background/grassError.png",
                &[
                    "background/treeError1.png",
                    "background/treeError2.png",
                    "background/treeError3.png",
                    "background/treeError4.png",
                    "background/treeError5.png",
                    "background/treeError6.png",
                ],
            )?,
        })
    }
}
