use glam::Vec2;
use log::{debug, info, warn};

use crate::api::config::{ArenaConfig, CollisionStrategy};
use crate::api::snapshot::{BallInstance, BallSnapshot};
use crate::api::types::BallId;
use crate::components::ball::{lifetime_from_secs, Ball};
use crate::components::palette::{BallSkin, Palette};
use crate::core::physics::{BoundaryBody, PhysicsBody, PhysicsWorld};
use crate::core::registry::{BallSpawn, EntityRegistry};
use crate::systems::contacts::BoundaryContactObserver;
use crate::systems::resolver::CollisionResolver;
use crate::systems::spawn::{SpawnContext, SpawnController};
use crate::systems::validation::{AcceptAll, RemovalValidator, VerdictTally};

/// Anchor placement, in pixels. Far outside any sensible viewport.
const ANCHOR_POSITION_PX: Vec2 = Vec2::new(-1000.0, -1000.0);
/// Anchor half extents, in world units.
const ANCHOR_HALF_EXTENTS: Vec2 = Vec2::new(50.0, 1.0);
/// Speed of the moving balls in the opening layout.
const OPENING_SPEED: f32 = 3.5;

/// The arena: physics world, live balls and spawn control, advanced one
/// frame at a time through [`update`](Self::update).
pub struct Level {
    config: ArenaConfig,
    physics: PhysicsWorld,
    registry: EntityRegistry,
    spawner: SpawnController,
    palette: Palette,
    resolver: CollisionResolver,
    validator: Box<dyn RemovalValidator>,
    verdicts: VerdictTally,
    boundary: Option<BoundaryBody>,
    anchor: Option<PhysicsBody>,
    dragged: Option<BallId>,
    frame: u64,
}

impl Level {
    pub fn new(config: ArenaConfig) -> Self {
        let mut physics = PhysicsWorld::new(config.gravity);
        physics.set_dt(config.fixed_dt);
        physics.set_solver_iterations(config.velocity_iterations, config.position_iterations);

        Self {
            registry: EntityRegistry::new(config.max_entities),
            spawner: SpawnController::new(&config),
            palette: Palette::new(config.palette.clone()),
            resolver: CollisionResolver::new(),
            validator: Box::new(AcceptAll),
            verdicts: VerdictTally::default(),
            boundary: None,
            anchor: None,
            dragged: None,
            frame: 0,
            physics,
            config,
        }
    }

    /// Replace the removal policy.
    pub fn with_validator(mut self, validator: impl RemovalValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Build the boundary and anchor, then place the opening five balls.
    pub fn init(&mut self) {
        if !self.build_arena() {
            return;
        }

        let (w, h) = (self.config.viewport_width, self.config.viewport_height);
        let v = OPENING_SPEED;
        let layout = [
            (Vec2::new(0.27 * w, 0.5 * h), Vec2::new(v, 0.0)),
            (Vec2::new(0.54 * w, 0.5 * h), Vec2::ZERO),
            (Vec2::new(0.81 * w, 0.5 * h), Vec2::new(-v, 0.0)),
            (Vec2::new(0.54 * w, 0.75 * h), Vec2::new(0.0, -v)),
            (Vec2::new(0.54 * w, 0.25 * h), Vec2::new(0.0, v)),
        ];

        for (position_px, velocity) in layout {
            let skin = self.next_skin();
            let tag = self.current_slot();
            match self.spawn_ball_at(skin, position_px, -1.0, tag) {
                Some(id) => self.set_velocity(id, velocity),
                None => debug!("opening ball at {} skipped, arena full", position_px),
            }
        }
        info!(
            "level ready: {} balls, {} colliders, cap {}, {:.2}x{:.2} world units",
            self.registry.len(),
            self.physics.collider_count(),
            self.registry.capacity(),
            self.width(),
            self.height()
        );
    }

    /// Boundary and anchor only; the arena fills through the spawner.
    pub fn init_empty(&mut self) {
        if self.build_arena() {
            info!("empty level ready, cap {}", self.registry.capacity());
        }
    }

    fn build_arena(&mut self) -> bool {
        if self.boundary.is_some() {
            warn!("level already initialized");
            return false;
        }
        self.boundary = Some(self.physics.create_boundary(self.width(), self.height()));
        let anchor_pos = self.config.to_world(ANCHOR_POSITION_PX);
        self.anchor = Some(self.physics.create_anchor(anchor_pos, ANCHOR_HALF_EXTENTS));
        true
    }

    /// Place a ball at a viewport position in pixels, at rest.
    /// A negative `lifetime` lives forever. `None` when the arena is full.
    pub fn spawn_ball_at(
        &mut self,
        skin: BallSkin,
        position_px: Vec2,
        lifetime: f32,
        tag: u32,
    ) -> Option<BallId> {
        let position = self.config.to_world(position_px);
        self.place(skin, position, Vec2::ZERO, lifetime, tag)
    }

    /// Place a ball at a uniformly random position that keeps it inside
    /// the arena, at rest.
    pub fn spawn_ball(&mut self, skin: BallSkin, lifetime: f32, tag: u32) -> Option<BallId> {
        let radius = self.config.ball_radius(&skin);
        let position = self.spawner.random_position(radius, self.config.world_size());
        self.place(skin, position, Vec2::ZERO, lifetime, tag)
    }

    fn place(
        &mut self,
        skin: BallSkin,
        position: Vec2,
        velocity: Vec2,
        lifetime: f32,
        tag: u32,
    ) -> Option<BallId> {
        let spawn = BallSpawn {
            skin,
            tag,
            radius: self.config.ball_radius(&skin),
            position,
            velocity,
            lifetime: lifetime_from_secs(lifetime),
        };
        let id = self
            .registry
            .spawn(&mut self.physics, spawn, &self.config.ball_physics())?;
        self.spawner.reset_timer();
        Some(id)
    }

    /// Set a ball's velocity on both the body and its mirror.
    pub fn set_velocity(&mut self, id: BallId, vel: Vec2) {
        if let Some(ball) = self.registry.get_mut(id) {
            ball.vel = vel;
            self.physics.set_velocity(&ball.body, vel);
        }
    }

    /// Next skin in round-robin order.
    pub fn next_skin(&mut self) -> BallSkin {
        self.spawner.next_skin(&self.palette)
    }

    fn current_slot(&self) -> u32 {
        self.spawner.current_slot().unwrap_or(0) as u32
    }

    /// Skin at a palette slot; wraps.
    pub fn skin(&self, index: usize) -> BallSkin {
        self.palette.get(index)
    }

    /// Advance one frame: step, mirror, resolve, age, reap, admit, tick.
    pub fn update(&mut self, delta: f32) {
        self.frame += 1;
        self.spawner.begin_frame();

        let exits = {
            let mut observer = BoundaryContactObserver::new(&mut self.registry);
            self.physics.step(&mut observer);
            observer.exits()
        };
        self.registry.sync_from(&self.physics);

        if self.config.collision_strategy == CollisionStrategy::Pairwise {
            let pairs = self.resolver.resolve(&mut self.registry, &mut self.physics);
            if pairs > 0 {
                debug!("frame {}: {} overlapping pairs resolved", self.frame, pairs);
            }
        }

        self.registry.update(delta);

        if let Some(ball) = self.dragged.and_then(|id| self.registry.get(id)) {
            if ball.in_collision {
                debug!("dragged ball {:?} (type {}) is in collision", ball.id, ball.type_index());
            }
        }

        let reaped = self.sweep();
        if exits > 0 || reaped > 0 {
            debug!("frame {}: {} exits, {} reaped", self.frame, exits, reaped);
        }

        self.spawner.maybe_spawn(SpawnContext {
            registry: &mut self.registry,
            physics: &mut self.physics,
            palette: &self.palette,
            config: &self.config,
        });
        self.spawner.tick(delta);
    }

    /// Reap every ball flagged `removed`. Each reaped ball resets the
    /// respawn timer and goes through the removal validator.
    pub fn sweep(&mut self) -> usize {
        let spawner = &mut self.spawner;
        let validator = &mut self.validator;
        let verdicts = &mut self.verdicts;
        let dragged = &mut self.dragged;
        self.registry.sweep(&mut self.physics, |ball| {
            spawner.reset_timer();
            verdicts.record(validator.validate(ball));
            if *dragged == Some(ball.id) {
                *dragged = None;
            }
        })
    }

    // -- Accessors --

    pub fn balls(&self) -> impl Iterator<Item = &Ball> {
        self.registry.iter()
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.registry.get(id)
    }

    pub fn max_entities(&self) -> usize {
        self.registry.capacity()
    }

    /// Arena width in world units.
    pub fn width(&self) -> f32 {
        self.config.world_width()
    }

    /// Arena height in world units.
    pub fn height(&self) -> f32 {
        self.config.world_height()
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Attachment point for pointer joints. `None` before init.
    pub fn anchor_body(&self) -> Option<PhysicsBody> {
        self.anchor
    }

    pub fn boundary(&self) -> Option<&BoundaryBody> {
        self.boundary.as_ref()
    }

    pub fn spawn_more_balls(&self) -> bool {
        self.spawner.is_enabled()
    }

    /// Suspend or resume automatic spawning. Live balls are untouched.
    pub fn set_spawn_more_balls(&mut self, enabled: bool) {
        self.spawner.set_enabled(enabled);
    }

    /// Seconds since the last spawn or removal.
    pub fn respawn_timer(&self) -> f32 {
        self.spawner.timer()
    }

    /// Balls admitted by the spawner (opening and manual placements excluded).
    pub fn spawned(&self) -> u64 {
        self.spawner.spawned()
    }

    pub fn verdicts(&self) -> VerdictTally {
        self.verdicts
    }

    /// Report the ball currently held by the pointer, if any.
    pub fn set_dragged(&mut self, id: Option<BallId>) {
        self.dragged = id;
    }

    pub fn dragged(&self) -> Option<BallId> {
        self.dragged
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn snapshot(&self) -> Vec<BallSnapshot> {
        self.registry.iter().map(BallSnapshot::from).collect()
    }

    /// Fill `out` with one packed instance per live ball, in pixels.
    pub fn write_instances(&self, out: &mut Vec<BallInstance>) {
        out.clear();
        let scale = self.config.box_to_world();
        out.extend(self.registry.iter().map(|b| BallInstance::from_ball(b, scale)));
    }
}
