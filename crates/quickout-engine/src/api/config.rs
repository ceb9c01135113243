use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::palette::{BallSkin, Palette};
use crate::core::physics::ColliderMaterial;
use crate::core::registry::BallPhysics;

/// How overlapping balls get pushed apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionStrategy {
    /// Rapier resolves every contact.
    #[default]
    Engine,
    /// Rapier only resolves ball-wall contacts; ball pairs go through the
    /// manual velocity-exchange pass once per frame.
    Pairwise,
}

/// Arena configuration. Immutable once a level is built.
/// Every field is optional in JSON and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Viewport width in pixels (default: 800).
    pub viewport_width: f32,
    /// Viewport height in pixels (default: 480).
    pub viewport_height: f32,
    /// Pixels per physics unit (default: 75).
    pub pixels_per_unit: f32,
    /// Population cap (default: 17).
    pub max_entities: usize,
    /// Seconds that must pass after a spawn or removal before the next spawn (default: 0.15).
    pub respawn_time: f32,
    /// Width of the random velocity range per axis (default: 20).
    pub max_speed: f32,
    /// Shift applied to the random velocity range, giving `[-offset, max_speed - offset]` (default: 5).
    pub speed_offset: f32,
    /// Physics timestep in seconds (default: 1/45).
    pub fixed_dt: f32,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
    pub gravity: Vec2,
    pub ball_material: ColliderMaterial,
    pub palette: Vec<BallSkin>,
    pub collision_strategy: CollisionStrategy,
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 480.0,
            pixels_per_unit: 75.0,
            max_entities: 17,
            respawn_time: 0.15,
            max_speed: 20.0,
            speed_offset: 5.0,
            fixed_dt: 1.0 / 45.0,
            velocity_iterations: 6,
            position_iterations: 2,
            gravity: Vec2::ZERO,
            ball_material: ColliderMaterial::default(),
            palette: Palette::default_skins(),
            collision_strategy: CollisionStrategy::Engine,
            seed: None,
        }
    }
}

impl ArenaConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Multiplier from pixels to physics units.
    pub fn world_to_box(&self) -> f32 {
        1.0 / self.pixels_per_unit
    }

    /// Multiplier from physics units to pixels.
    pub fn box_to_world(&self) -> f32 {
        self.pixels_per_unit
    }

    /// Arena width in physics units.
    pub fn world_width(&self) -> f32 {
        self.viewport_width * self.world_to_box()
    }

    /// Arena height in physics units.
    pub fn world_height(&self) -> f32 {
        self.viewport_height * self.world_to_box()
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width(), self.world_height())
    }

    /// Physical radius of a ball wearing `skin`.
    pub fn ball_radius(&self, skin: &BallSkin) -> f32 {
        skin.radius_px * self.world_to_box()
    }

    /// Body settings every ball of this arena is created with.
    pub fn ball_physics(&self) -> BallPhysics {
        BallPhysics {
            material: self.ball_material,
            strategy: self.collision_strategy,
        }
    }

    /// Convert a pixel-space point to physics units.
    pub fn to_world(&self, px: Vec2) -> Vec2 {
        px * self.world_to_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_arena_constants() {
        let cfg = ArenaConfig::default();
        assert_eq!(cfg.max_entities, 17);
        assert!((cfg.respawn_time - 0.15).abs() < 1e-6);
        assert!((cfg.fixed_dt - 1.0 / 45.0).abs() < 1e-6);
        assert_eq!((cfg.velocity_iterations, cfg.position_iterations), (6, 2));
        assert_eq!(cfg.gravity, Vec2::ZERO);
        assert_eq!(cfg.collision_strategy, CollisionStrategy::Engine);
    }

    #[test]
    fn world_extents_follow_scale() {
        let cfg = ArenaConfig::default();
        assert!((cfg.world_width() - 800.0 / 75.0).abs() < 1e-5);
        assert!((cfg.world_height() - 6.4).abs() < 1e-5);
        assert!((cfg.world_to_box() * cfg.box_to_world() - 1.0).abs() < 1e-6);
        let radius = cfg.ball_radius(&cfg.palette[0]);
        assert!((radius - 32.0 / 75.0).abs() < 1e-6);
    }

    #[test]
    fn parse_partial_json() {
        let json = r#"{
            "max_entities": 5,
            "collision_strategy": "pairwise",
            "seed": 7
        }"#;
        let cfg = ArenaConfig::from_json(json).unwrap();
        assert_eq!(cfg.max_entities, 5);
        assert_eq!(cfg.collision_strategy, CollisionStrategy::Pairwise);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.viewport_width, 800.0);
        assert_eq!(cfg.palette.len(), 4);
    }

    #[test]
    fn parse_custom_palette() {
        let json = r#"{
            "palette": [
                { "type_index": 2, "radius_px": 20.0 },
                { "type_index": 5, "radius_px": 40.0 }
            ]
        }"#;
        let cfg = ArenaConfig::from_json(json).unwrap();
        assert_eq!(cfg.palette[1].type_index, 5);
        assert_eq!(cfg.palette[1].radius_px, 40.0);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(ArenaConfig::from_json("{ \"max_entities\": \"lots\" }").is_err());
    }

    #[test]
    fn json_roundtrip_preserves_config() {
        let cfg = ArenaConfig {
            seed: Some(99),
            collision_strategy: CollisionStrategy::Pairwise,
            ..ArenaConfig::default()
        };
        let json = cfg.to_json().unwrap();
        assert_eq!(ArenaConfig::from_json(&json).unwrap(), cfg);
    }
}
