use glam::Vec2;
use log::debug;

use crate::api::config::CollisionStrategy;
use crate::api::types::{BallId, CollisionCategory, CollisionFilter};
use crate::components::ball::Ball;
use crate::components::palette::BallSkin;
use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial, ColliderTag, PhysicsWorld};

/// Everything needed to put one ball into the arena.
#[derive(Debug, Clone, Copy)]
pub struct BallSpawn {
    pub skin: BallSkin,
    pub tag: u32,
    /// Radius in world units.
    pub radius: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub lifetime: Option<f32>,
}

/// Body settings shared by every ball of one arena.
#[derive(Debug, Clone, Copy)]
pub struct BallPhysics {
    pub material: ColliderMaterial,
    pub strategy: CollisionStrategy,
}

impl BallPhysics {
    fn body_desc(&self, spawn: &BallSpawn) -> BodyDesc {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: spawn.radius })
            .with_position(spawn.position)
            .with_velocity(spawn.velocity)
            .with_filter(CollisionFilter::ball());
        match self.strategy {
            CollisionStrategy::Engine => desc,
            // Ball pairs still raise contact events, but only walls push back.
            CollisionStrategy::Pairwise => desc.with_solver_filter(CollisionFilter::new(
                CollisionCategory::BALL,
                CollisionCategory::WALL,
            )),
        }
    }
}

/// Capacity-bounded, ordered storage of live balls.
/// Membership only changes through [`spawn`](Self::spawn) and [`sweep`](Self::sweep).
pub struct EntityRegistry {
    balls: Vec<Ball>,
    capacity: usize,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            balls: Vec::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// Create the ball's body and insert it. `None` when already at capacity.
    pub fn spawn(
        &mut self,
        physics: &mut PhysicsWorld,
        spawn: BallSpawn,
        ball_physics: &BallPhysics,
    ) -> Option<BallId> {
        if self.is_full() {
            return None;
        }

        let id = BallId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let body = physics.create_body(
            ColliderTag::Ball(id),
            &ball_physics.body_desc(&spawn),
            ball_physics.material,
        );
        let ball = Ball::new(id, body, spawn.skin, spawn.radius)
            .with_tag(spawn.tag)
            .with_pos(spawn.position)
            .with_vel(spawn.velocity)
            .with_lifetime(spawn.lifetime);
        debug!(
            "spawned ball {:?} type {} at ({:.2}, {:.2})",
            id, spawn.skin.type_index, spawn.position.x, spawn.position.y
        );
        self.balls.push(ball);
        Some(id)
    }

    /// Advance every ball's local timers.
    pub fn update(&mut self, dt: f32) {
        for ball in &mut self.balls {
            ball.update(dt);
        }
    }

    /// Copy body positions and velocities onto the balls.
    pub fn sync_from(&mut self, physics: &PhysicsWorld) {
        for ball in &mut self.balls {
            ball.pos = physics.body_position(&ball.body);
            ball.vel = physics.velocity(&ball.body);
        }
    }

    /// Remove every ball flagged `removed`, destroying its body and handing
    /// it to `on_removed`. Marks first, then compacts, so each ball is
    /// visited exactly once. Returns the number reaped.
    pub fn sweep(
        &mut self,
        physics: &mut PhysicsWorld,
        mut on_removed: impl FnMut(&Ball),
    ) -> usize {
        if !self.balls.iter().any(|b| b.removed) {
            return 0;
        }

        let (reaped, kept): (Vec<Ball>, Vec<Ball>) =
            std::mem::take(&mut self.balls).into_iter().partition(|b| b.removed);
        self.balls = kept;

        for ball in &reaped {
            physics.remove_body(&ball.body);
            on_removed(ball);
        }
        reaped.len()
    }

    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BallId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        self.balls.iter_mut()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.balls.len() >= self.capacity
    }
}
