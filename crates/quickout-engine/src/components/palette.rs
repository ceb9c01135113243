//! Ball skins: the type index a renderer maps to a texture, plus the texture
//! size the physical radius is derived from.

use log::warn;
use serde::{Deserialize, Serialize};

pub const BLUE: u32 = 0;
pub const GREEN: u32 = 1;
pub const RED: u32 = 2;
pub const YELLOW: u32 = 3;

/// Texture height of the stock skins, in pixels.
const DEFAULT_SKIN_HEIGHT_PX: f32 = 64.0;

/// Opaque handle for one ball type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSkin {
    /// Index the renderer uses to pick a texture.
    pub type_index: u32,
    /// Half the texture height, in pixels.
    pub radius_px: f32,
}

impl BallSkin {
    pub const fn new(type_index: u32, radius_px: f32) -> Self {
        Self { type_index, radius_px }
    }
}

/// Ordered, never-empty list of skins.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    skins: Vec<BallSkin>,
}

impl Palette {
    /// Build a palette. An empty list falls back to the stock skins.
    pub fn new(skins: Vec<BallSkin>) -> Self {
        if skins.is_empty() {
            warn!("empty ball palette, using the default skins");
            return Self::default();
        }
        Self { skins }
    }

    pub fn default_skins() -> Vec<BallSkin> {
        let radius = DEFAULT_SKIN_HEIGHT_PX / 2.0;
        vec![
            BallSkin::new(BLUE, radius),
            BallSkin::new(GREEN, radius),
            BallSkin::new(RED, radius),
            BallSkin::new(YELLOW, radius),
        ]
    }

    pub fn len(&self) -> usize {
        self.skins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }

    /// Look up a skin by position. Out-of-range indices wrap around.
    pub fn get(&self, index: usize) -> BallSkin {
        self.skins[index % self.skins.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BallSkin> {
        self.skins.iter()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            skins: Self::default_skins(),
        }
    }
}

/// Round-robin position in a [`Palette`]. Starts before the first skin.
#[derive(Debug, Clone, Default)]
pub struct PaletteCursor {
    current: Option<usize>,
}

impl PaletteCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance and return the next skin, wrapping to the first on overflow.
    pub fn next(&mut self, palette: &Palette) -> BallSkin {
        let next = match self.current {
            Some(i) if i + 1 < palette.len() => i + 1,
            _ => 0,
        };
        self.current = Some(next);
        palette.get(next)
    }

    /// Index of the most recently returned skin.
    pub fn current(&self) -> Option<usize> {
        self.current
    }
}
