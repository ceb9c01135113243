use glam::Vec2;
use log::trace;

use crate::components::ball::Ball;
use crate::core::physics::PhysicsWorld;
use crate::core::registry::EntityRegistry;

/// Manual O(n²) ball-ball resolution. Only runs under
/// [`CollisionStrategy::Pairwise`](crate::api::config::CollisionStrategy::Pairwise).
///
/// Balls are treated as equal masses: on overlap the velocity components
/// along the contact normal are swapped. Per-ball collision counts and
/// `in_collision` are cleared at the end of every pass.
#[derive(Debug, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Run one pass over the registry and push changed velocities back to
    /// the bodies. Returns the number of overlapping pairs.
    pub fn resolve(&mut self, registry: &mut EntityRegistry, physics: &mut PhysicsWorld) -> usize {
        let balls = registry.as_mut_slice();
        let mut pairs = 0;

        for j in 1..balls.len() {
            let (head, tail) = balls.split_at_mut(j);
            let b = &mut tail[0];
            for a in head.iter_mut() {
                if !a.intersects(b) {
                    continue;
                }
                pairs += 1;
                a.collision_count += 1;
                b.collision_count += 1;
                a.in_collision = true;
                b.in_collision = true;

                trace!("ball {:?} velocity before: {}", a.id, a.vel);
                trace!("ball {:?} velocity before: {}", b.id, b.vel);
                if exchange_normal_velocities(a, b) {
                    trace!("ball {:?} velocity after: {}", a.id, a.vel);
                    trace!("ball {:?} velocity after: {}", b.id, b.vel);
                }
            }
        }

        for ball in balls.iter_mut() {
            if ball.collision_count > 0 {
                if ball.collision_count > 1 {
                    trace!(
                        "ball {:?} touched {} balls this pass, final velocity {}",
                        ball.id, ball.collision_count, ball.vel
                    );
                }
                physics.set_velocity(&ball.body, ball.vel);
            }
            ball.collision_count = 0;
            ball.in_collision = false;
        }

        pairs
    }
}

/// Swap the normal components of two approaching balls' velocities.
/// Returns `false` when they are concentric or already separating.
fn exchange_normal_velocities(a: &mut Ball, b: &mut Ball) -> bool {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    if dist <= f32::EPSILON {
        return false;
    }
    let normal: Vec2 = delta / dist;
    let approach = (a.vel - b.vel).dot(normal);
    if approach <= 0.0 {
        return false;
    }
    let impulse = normal * approach;
    a.vel -= impulse;
    b.vel += impulse;
    true
}
