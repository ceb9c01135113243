use log::debug;

use crate::api::types::BallId;
use crate::core::physics::{ColliderTag, ContactObserver};
use crate::core::registry::EntityRegistry;

/// Turns raw contact events into ball flags.
///
/// - ball begins touching ball: both get `in_collision = true`
/// - ball begins touching a boundary sensor: that ball gets `removed = true`
/// - any contact involving a ball ends: that ball gets `in_collision = false`
///
/// Only flags change here; membership is left to the post-step sweep.
pub struct BoundaryContactObserver<'a> {
    registry: &'a mut EntityRegistry,
    exits: usize,
}

impl<'a> BoundaryContactObserver<'a> {
    pub fn new(registry: &'a mut EntityRegistry) -> Self {
        Self { registry, exits: 0 }
    }

    /// Balls flagged for removal by boundary sensors so far.
    pub fn exits(&self) -> usize {
        self.exits
    }

    fn set_in_collision(&mut self, id: BallId, value: bool) {
        if let Some(ball) = self.registry.get_mut(id) {
            ball.in_collision = value;
        }
    }

    fn flag_exit(&mut self, id: BallId) {
        if let Some(ball) = self.registry.get_mut(id) {
            if !ball.removed {
                debug!("ball {:?} reached the arena edge", id);
                self.exits += 1;
            }
            ball.mark_removed();
        }
    }
}

impl ContactObserver for BoundaryContactObserver<'_> {
    fn on_contact_begin(&mut self, a: ColliderTag, b: ColliderTag) {
        match (a, b) {
            (ColliderTag::Ball(x), ColliderTag::Ball(y)) => {
                self.set_in_collision(x, true);
                self.set_in_collision(y, true);
            }
            (ColliderTag::Ball(id), ColliderTag::BoundarySensor)
            | (ColliderTag::BoundarySensor, ColliderTag::Ball(id)) => self.flag_exit(id),
            _ => {}
        }
    }

    fn on_contact_end(&mut self, a: ColliderTag, b: ColliderTag) {
        for id in [a.ball_id(), b.ball_id()].into_iter().flatten() {
            self.set_in_collision(id, false);
        }
    }
}
