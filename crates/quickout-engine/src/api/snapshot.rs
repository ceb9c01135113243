use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::BallId;
use crate::components::ball::Ball;

/// Read-only view of one live ball, for renderers and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub id: BallId,
    pub type_index: u32,
    pub tag: u32,
    /// World units.
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub in_collision: bool,
}

impl From<&Ball> for BallSnapshot {
    fn from(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            type_index: ball.type_index(),
            tag: ball.tag,
            pos: ball.pos,
            vel: ball.vel,
            radius: ball.radius,
            in_collision: ball.in_collision,
        }
    }
}

/// Per-ball record packed for GPU upload: 8 floats = 32 bytes stride.
/// Position and radius are in pixels.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Palette type index, as a float.
    pub type_index: f32,
    pub tag: f32,
    pub vx: f32,
    pub vy: f32,
    /// 1.0 while touching another ball.
    pub in_collision: f32,
}

impl BallInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_ball(ball: &Ball, box_to_world: f32) -> Self {
        let px = ball.pos * box_to_world;
        Self {
            x: px.x,
            y: px.y,
            radius: ball.radius * box_to_world,
            type_index: ball.type_index() as f32,
            tag: ball.tag as f32,
            vx: ball.vel.x,
            vy: ball.vel.y,
            in_collision: if ball.in_collision { 1.0 } else { 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::palette::{BallSkin, GREEN};
    use crate::core::physics::PhysicsBody;
    use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

    fn ball() -> Ball {
        let body = PhysicsBody {
            body_handle: RigidBodyHandle::invalid(),
            collider_handle: ColliderHandle::invalid(),
        };
        let mut ball = Ball::new(BallId(3), body, BallSkin::new(GREEN, 32.0), 0.4)
            .with_tag(7)
            .with_pos(Vec2::new(2.0, 1.0))
            .with_vel(Vec2::new(-1.0, 0.5));
        ball.in_collision = true;
        ball
    }

    #[test]
    fn instance_layout_is_eight_floats() {
        assert_eq!(std::mem::size_of::<BallInstance>(), BallInstance::STRIDE_BYTES);
        let instances = [BallInstance::from_ball(&ball(), 75.0); 2];
        let floats: &[f32] = bytemuck::cast_slice(&instances);
        assert_eq!(floats.len(), 2 * BallInstance::FLOATS);
        assert_eq!(floats[0], 150.0);
        assert_eq!(floats[1], 75.0);
        assert!((floats[2] - 30.0).abs() < 1e-4);
        assert_eq!(floats[3], GREEN as f32);
        assert_eq!(floats[7], 1.0);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let snap = BallSnapshot::from(&ball());
        let json = serde_json::to_value(snap).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["type_index"], GREEN);
        assert_eq!(json["tag"], 7);
        assert_eq!(json["in_collision"], true);
    }
}
