use glam::Vec2;

use crate::api::types::BallId;
use crate::components::palette::BallSkin;
use crate::core::physics::PhysicsBody;

/// A dynamic circular entity. Position and velocity mirror its physics body
/// and are refreshed after every step.
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: BallId,
    /// Skin handed back to the renderer.
    pub skin: BallSkin,
    /// Caller-chosen tag (the palette slot it was spawned from).
    pub tag: u32,
    /// Radius in world units.
    pub radius: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub in_collision: bool,
    /// Set when the ball should leave the arena; reaped by the next sweep.
    pub removed: bool,
    /// Remaining seconds to live. `None` lives forever.
    pub lifetime: Option<f32>,
    /// Overlaps seen during the current pairwise resolution pass.
    pub collision_count: u32,
    pub body: PhysicsBody,
}

impl Ball {
    pub fn new(id: BallId, body: PhysicsBody, skin: BallSkin, radius: f32) -> Self {
        Self {
            id,
            skin,
            tag: skin.type_index,
            radius,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            in_collision: false,
            removed: false,
            lifetime: None,
            collision_count: 0,
            body,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: u32) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_lifetime(mut self, lifetime: Option<f32>) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Advance local timers; an expired lifetime flags the ball as removed.
    pub fn update(&mut self, dt: f32) {
        if let Some(remaining) = self.lifetime.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.removed = true;
            }
        }
    }

    pub fn mark_removed(&mut self) {
        self.removed = true;
    }

    pub fn type_index(&self) -> u32 {
        self.skin.type_index
    }

    /// Circle-circle overlap test on the mirrored state.
    pub fn intersects(&self, other: &Ball) -> bool {
        let reach = self.radius + other.radius;
        self.pos.distance_squared(other.pos) < reach * reach
    }
}

/// Seconds-to-live as accepted by spawn calls: negative means infinite.
pub fn lifetime_from_secs(secs: f32) -> Option<f32> {
    (secs >= 0.0).then_some(secs)
}
