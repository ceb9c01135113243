use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use glam::Vec2;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::api::types::{BallId, CollisionFilter};

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn vec2_to_point(v: Vec2) -> nalgebra::Point2<f32> {
    nalgebra::Point2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn filter_to_groups(filter: CollisionFilter) -> InteractionGroups {
    InteractionGroups::new(
        Group::from_bits_truncate(filter.category.bits() as u32),
        Group::from_bits_truncate(filter.mask.bits() as u32),
    )
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
    /// Two-sided edge between two points in body-local space.
    Segment { a: Vec2, b: Vec2 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
            ColliderDesc::Segment { a, b } => {
                ColliderBuilder::segment(vec2_to_point(a), vec2_to_point(b))
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl ColliderMaterial {
    /// Massless edge material for static boundary geometry.
    pub const EDGE: Self = Self {
        restitution: 0.0,
        friction: 0.2,
        density: 0.0,
    };
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 1.0,
            friction: 1.0,
            density: 1.0,
        }
    }
}

/// What a collider belongs to. Stored in the collider's `user_data` so
/// contact events can be mapped back without owning pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderTag {
    Ball(BallId),
    Wall,
    BoundarySensor,
    Anchor,
    /// The collider was removed before its event was dispatched.
    Detached,
}

impl ColliderTag {
    const KIND_SHIFT: u32 = 32;

    fn to_user_data(self) -> u128 {
        let (kind, payload): (u128, u32) = match self {
            ColliderTag::Detached => (0, 0),
            ColliderTag::Ball(id) => (1, id.0),
            ColliderTag::Wall => (2, 0),
            ColliderTag::BoundarySensor => (3, 0),
            ColliderTag::Anchor => (4, 0),
        };
        (kind << Self::KIND_SHIFT) | payload as u128
    }

    fn from_user_data(data: u128) -> Self {
        match data >> Self::KIND_SHIFT {
            1 => ColliderTag::Ball(BallId(data as u32)),
            2 => ColliderTag::Wall,
            3 => ColliderTag::BoundarySensor,
            4 => ColliderTag::Anchor,
            _ => ColliderTag::Detached,
        }
    }

    pub fn ball_id(self) -> Option<BallId> {
        match self {
            ColliderTag::Ball(id) => Some(id),
            _ => None,
        }
    }
}

/// Builder for describing a rigid body (and its single collider) before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
    pub collider: ColliderDesc,
    /// Which fixtures generate contacts (and therefore events).
    pub filter: CollisionFilter,
    /// Which contacts the solver actually resolves.
    pub solver_filter: CollisionFilter,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
            collider,
            filter: CollisionFilter::default(),
            solver_filter: CollisionFilter::default(),
        }
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            gravity_scale: 0.0,
            ..Self::dynamic(collider)
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    /// Sets both the contact filter and the solver filter.
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self.solver_filter = filter;
        self
    }

    /// Narrows which contacts are resolved without silencing their events.
    pub fn with_solver_filter(mut self, filter: CollisionFilter) -> Self {
        self.solver_filter = filter;
        self
    }
}

/// Handle pair stored on a Ball, referencing Rapier internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// The static arena container: one fixed body carrying a solid edge and a
/// coincident sensor edge per side (bottom, right, top, left).
#[derive(Debug, Clone, Copy)]
pub struct BoundaryBody {
    pub body_handle: RigidBodyHandle,
    pub walls: [ColliderHandle; 4],
    pub sensors: [ColliderHandle; 4],
}

/// A resolved contact event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: ColliderTag,
    pub b: ColliderTag,
    /// `true` when the contact just started, `false` when it ended.
    pub started: bool,
}

/// Receives contact events while [`PhysicsWorld::step`] runs.
/// Implementors may flip flags on entities but must not add or remove any.
pub trait ContactObserver {
    fn on_contact_begin(&mut self, a: ColliderTag, b: ColliderTag);
    fn on_contact_end(&mut self, a: ColliderTag, b: ColliderTag);
}

/// Ignores every event.
impl ContactObserver for () {
    fn on_contact_begin(&mut self, _a: ColliderTag, _b: ColliderTag) {}
    fn on_contact_end(&mut self, _a: ColliderTag, _b: ColliderTag) {}
}

/// Records every event, in dispatch order.
impl ContactObserver for Vec<ContactEvent> {
    fn on_contact_begin(&mut self, a: ColliderTag, b: ColliderTag) {
        self.push(ContactEvent { a, b, started: true });
    }

    fn on_contact_end(&mut self, a: ColliderTag, b: ColliderTag) {
        self.push(ContactEvent { a, b, started: false });
    }
}

// ---------------------------------------------------------------------------
// Event collector. Rapier calls it with `&self` from inside the pipeline.
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain_collisions(&self) -> Vec<CollisionEvent> {
        let mut guard = self.collisions.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.collisions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Owns the Rapier2D simulation context for one arena.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: DirectEventCollector,
    steps: u64,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: DirectEventCollector::new(),
            steps: 0,
        }
    }

    /// Set the fixed integration timestep used by every [`step`](Self::step).
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Velocity iterations drive the main solver loop, position iterations the
    /// inner stabilization passes. Zero is bumped to one.
    pub fn set_solver_iterations(&mut self, velocity: usize, position: usize) {
        self.integration_parameters.num_solver_iterations =
            NonZeroUsize::new(velocity).unwrap_or(NonZeroUsize::MIN);
        self.integration_parameters.num_internal_pgs_iterations = position.max(1);
    }

    pub fn solver_iterations(&self) -> (usize, usize) {
        (
            self.integration_parameters.num_solver_iterations.get(),
            self.integration_parameters.num_internal_pgs_iterations,
        )
    }

    /// Create a rigid body + collider and return handles.
    /// The tag is stored on the collider for contact lookups.
    pub fn create_body(
        &mut self,
        tag: ColliderTag,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .linvel(vec2_to_na(desc.velocity))
            .gravity_scale(desc.gravity_scale)
            .user_data(tag.to_user_data())
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .collision_groups(filter_to_groups(desc.filter))
            .solver_groups(filter_to_groups(desc.solver_filter))
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .user_data(tag.to_user_data())
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Build the static container for a `width` x `height` arena whose lower
    /// left corner sits at the origin.
    pub fn create_boundary(&mut self, width: f32, height: f32) -> BoundaryBody {
        let rb = RigidBodyBuilder::fixed()
            .user_data(ColliderTag::Wall.to_user_data())
            .build();
        let body_handle = self.bodies.insert(rb);

        let lower_left = Vec2::ZERO;
        let lower_right = Vec2::new(width, 0.0);
        let upper_right = Vec2::new(width, height);
        let upper_left = Vec2::new(0.0, height);
        let edges = [
            (lower_left, lower_right),
            (lower_right, upper_right),
            (upper_right, upper_left),
            (upper_left, lower_left),
        ];

        let mut walls = [ColliderHandle::invalid(); 4];
        let mut sensors = [ColliderHandle::invalid(); 4];
        for (i, (a, b)) in edges.into_iter().enumerate() {
            let shape = ColliderDesc::Segment { a, b };
            walls[i] = self.attach_edge(body_handle, shape, ColliderTag::Wall, CollisionFilter::wall(), false);
            sensors[i] = self.attach_edge(
                body_handle,
                shape,
                ColliderTag::BoundarySensor,
                CollisionFilter::boundary_sensor(),
                true,
            );
        }

        BoundaryBody {
            body_handle,
            walls,
            sensors,
        }
    }

    /// A fixed body that takes part in no collisions at all. Serves as the
    /// world-side attachment point for pointer joints.
    pub fn create_anchor(&mut self, position: Vec2, half_extents: Vec2) -> PhysicsBody {
        let desc = BodyDesc::fixed(ColliderDesc::Cuboid {
            half_width: half_extents.x,
            half_height: half_extents.y,
        })
        .with_position(position)
        .with_filter(CollisionFilter::NONE);
        self.create_body(ColliderTag::Anchor, &desc, ColliderMaterial::EDGE)
    }

    /// Remove a body and all its colliders from the simulation.
    /// Returns `false` if the body was already gone.
    pub fn remove_body(&mut self, body: &PhysicsBody) -> bool {
        self.bodies
            .remove(
                body.body_handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn contains_body(&self, body: &PhysicsBody) -> bool {
        self.bodies.contains(body.body_handle) && self.colliders.contains(body.collider_handle)
    }

    /// Advance the simulation by exactly one fixed timestep, then hand every
    /// contact begin/end event raised by the solver to `observer` before
    /// returning.
    pub fn step(&mut self, observer: &mut dyn ContactObserver) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );
        self.steps += 1;

        for event in self.event_collector.drain_collisions() {
            let (h1, h2, started) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };

            let a = self.collider_tag(h1);
            let b = self.collider_tag(h2);
            if started {
                observer.on_contact_begin(a, b);
            } else {
                observer.on_contact_end(a, b);
            }
        }
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Get the current position of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.translation()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of colliders in the simulation.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Tag of a live collider, `Detached` once it has been removed.
    pub fn collider_tag(&self, handle: ColliderHandle) -> ColliderTag {
        self.colliders
            .get(handle)
            .map(|c| ColliderTag::from_user_data(c.user_data))
            .unwrap_or(ColliderTag::Detached)
    }

    // -- private helpers --

    fn attach_edge(
        &mut self,
        body_handle: RigidBodyHandle,
        shape: ColliderDesc,
        tag: ColliderTag,
        filter: CollisionFilter,
        sensor: bool,
    ) -> ColliderHandle {
        let material = ColliderMaterial::EDGE;
        let collider = shape
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .sensor(sensor)
            .collision_groups(filter_to_groups(filter))
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .user_data(tag.to_user_data())
            .build();
        self.colliders
            .insert_with_parent(collider, body_handle, &mut self.bodies)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn involves(event: &ContactEvent, tag: ColliderTag) -> bool {
        event.a == tag || event.b == tag
    }

    fn is_sensor(world: &PhysicsWorld, handle: ColliderHandle) -> bool {
        world.colliders.get(handle).is_some_and(|c| c.is_sensor())
    }

    fn ball_desc(pos: Vec2, vel: Vec2) -> BodyDesc {
        BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.4 })
            .with_position(pos)
            .with_velocity(vel)
            .with_filter(CollisionFilter::ball())
    }

    #[test]
    fn create_and_remove_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            ColliderTag::Ball(BallId(1)),
            &ball_desc(Vec2::ZERO, Vec2::ZERO),
            ColliderMaterial::default(),
        );
        assert_eq!(world.body_count(), 1);
        assert!(world.contains_body(&body));
        assert!(world.remove_body(&body));
        assert_eq!(world.body_count(), 0);
        assert!(!world.contains_body(&body));
        assert!(!world.remove_body(&body), "second removal must be a no-op");
    }

    #[test]
    fn tags_survive_user_data_roundtrip() {
        for tag in [
            ColliderTag::Ball(BallId(0)),
            ColliderTag::Ball(BallId(u32::MAX)),
            ColliderTag::Wall,
            ColliderTag::BoundarySensor,
            ColliderTag::Anchor,
            ColliderTag::Detached,
        ] {
            assert_eq!(ColliderTag::from_user_data(tag.to_user_data()), tag);
        }
        assert_eq!(ColliderTag::from_user_data(0), ColliderTag::Detached);
    }

    #[test]
    fn solver_iterations_are_applied() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_solver_iterations(6, 2);
        assert_eq!(world.solver_iterations(), (6, 2));
        world.set_solver_iterations(0, 0);
        assert_eq!(world.solver_iterations(), (1, 1));
    }

    #[test]
    fn step_advances_one_fixed_dt() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 45.0);
        let body = world.create_body(
            ColliderTag::Ball(BallId(1)),
            &ball_desc(Vec2::new(5.0, 5.0), Vec2::new(4.5, 0.0)),
            ColliderMaterial::default(),
        );
        world.step(&mut ());
        let pos = world.body_position(&body);
        assert!((pos.x - 5.1).abs() < 1e-3, "x={}", pos.x);
        assert_eq!(world.steps(), 1);
    }

    #[test]
    fn boundary_has_four_walls_and_four_sensors() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let boundary = world.create_boundary(10.0, 6.0);
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collider_count(), 8);
        for h in boundary.walls {
            assert_eq!(world.collider_tag(h), ColliderTag::Wall);
            assert!(!is_sensor(&world, h));
        }
        for h in boundary.sensors {
            assert_eq!(world.collider_tag(h), ColliderTag::BoundarySensor);
            assert!(is_sensor(&world, h));
        }
    }

    #[test]
    fn anchor_collides_with_nothing() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 45.0);
        let anchor = world.create_anchor(Vec2::new(3.0, 3.0), Vec2::new(1.0, 1.0));
        world.create_body(
            ColliderTag::Ball(BallId(7)),
            &ball_desc(Vec2::new(3.0, 3.0), Vec2::ZERO),
            ColliderMaterial::default(),
        );

        let mut events: Vec<ContactEvent> = Vec::new();
        for _ in 0..5 {
            world.step(&mut events);
        }
        assert!(events.is_empty(), "anchor produced events: {:?}", events);
        assert_eq!(world.body_position(&anchor), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn overlapping_balls_report_contact_start() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 45.0);
        world.create_body(
            ColliderTag::Ball(BallId(1)),
            &ball_desc(Vec2::new(5.0, 5.0), Vec2::new(1.0, 0.0)),
            ColliderMaterial::default(),
        );
        world.create_body(
            ColliderTag::Ball(BallId(2)),
            &ball_desc(Vec2::new(5.6, 5.0), Vec2::new(-1.0, 0.0)),
            ColliderMaterial::default(),
        );

        let mut events: Vec<ContactEvent> = Vec::new();
        world.step(&mut events);

        let first = events.iter().find(|e| e.started).expect("contact start");
        assert!(involves(first, ColliderTag::Ball(BallId(1))));
        assert!(involves(first, ColliderTag::Ball(BallId(2))));
    }

    #[test]
    fn ball_touching_edge_hits_sensor() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 45.0);
        world.create_boundary(10.0, 6.0);
        world.create_body(
            ColliderTag::Ball(BallId(3)),
            &ball_desc(Vec2::new(0.2, 3.0), Vec2::ZERO),
            ColliderMaterial::default(),
        );

        let mut events: Vec<ContactEvent> = Vec::new();
        world.step(&mut events);

        assert!(events.iter().any(|e| e.started
            && involves(e, ColliderTag::BoundarySensor)
            && involves(e, ColliderTag::Ball(BallId(3)))));
    }

    #[test]
    fn set_velocity_directly() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            ColliderTag::Ball(BallId(1)),
            &ball_desc(Vec2::ZERO, Vec2::ZERO),
            ColliderMaterial::default(),
        );
        world.set_velocity(&body, Vec2::new(5.0, -3.0));
        let vel = world.velocity(&body);
        assert!((vel.x - 5.0).abs() < 0.001);
        assert!((vel.y + 3.0).abs() < 0.001);
    }

    #[test]
    fn builder_pattern() {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 5.0 })
            .with_position(Vec2::new(10.0, 20.0))
            .with_velocity(Vec2::new(1.0, 2.0))
            .with_filter(CollisionFilter::ball())
            .with_solver_filter(CollisionFilter::wall());

        assert_eq!(desc.body_type, BodyType::Dynamic);
        assert_eq!(desc.position, Vec2::new(10.0, 20.0));
        assert_eq!(desc.velocity, Vec2::new(1.0, 2.0));
        assert_eq!(desc.filter, CollisionFilter::ball());
        assert_eq!(desc.solver_filter, CollisionFilter::wall());

        let fixed = BodyDesc::fixed(ColliderDesc::Ball { radius: 1.0 });
        assert_eq!(fixed.body_type, BodyType::Fixed);
        assert_eq!(fixed.gravity_scale, 0.0);
    }
}
