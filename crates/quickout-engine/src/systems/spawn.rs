//! Admission control for new balls: population cap, respawn timer and the
//! randomized placement policy.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::api::config::ArenaConfig;
use crate::api::types::BallId;
use crate::components::palette::{BallSkin, Palette, PaletteCursor};
use crate::core::physics::PhysicsWorld;
use crate::core::registry::{BallSpawn, EntityRegistry};

/// Per-frame borrows the controller needs to place a ball.
pub struct SpawnContext<'a> {
    pub registry: &'a mut EntityRegistry,
    pub physics: &'a mut PhysicsWorld,
    pub palette: &'a Palette,
    pub config: &'a ArenaConfig,
}

pub struct SpawnController {
    rng: ChaCha8Rng,
    cursor: PaletteCursor,
    /// Seconds since the last spawn or removal.
    timer: f32,
    /// Set by a reset; suppresses that frame's accumulation.
    reset_this_frame: bool,
    enabled: bool,
    respawn_time: f32,
    max_speed: f32,
    speed_offset: f32,
    spawned: u64,
}

impl SpawnController {
    pub fn new(config: &ArenaConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            rng,
            cursor: PaletteCursor::new(),
            timer: 0.0,
            reset_this_frame: false,
            enabled: true,
            respawn_time: config.respawn_time,
            max_speed: config.max_speed,
            speed_offset: config.speed_offset,
            spawned: 0,
        }
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Open a frame. Resets made before this call (setup, spawns between
    /// frames) no longer suppress accumulation.
    pub fn begin_frame(&mut self) {
        self.reset_this_frame = false;
    }

    /// Zero the timer. The current frame's delta will not be added.
    pub fn reset_timer(&mut self) {
        self.timer = 0.0;
        self.reset_this_frame = true;
    }

    /// Close the frame: accumulate `dt` unless the timer was reset during it.
    pub fn tick(&mut self, dt: f32) {
        if self.reset_this_frame {
            self.reset_this_frame = false;
        } else {
            self.timer += dt;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Suspend or resume admission without touching live balls.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Balls admitted by [`maybe_spawn`](Self::maybe_spawn) so far.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Both admission conditions plus the external switch.
    pub fn admits(&self, population: usize, capacity: usize) -> bool {
        self.enabled && population < capacity && self.timer > self.respawn_time
    }

    /// Next skin in round-robin order.
    pub fn next_skin(&mut self, palette: &Palette) -> BallSkin {
        self.cursor.next(palette)
    }

    /// Palette slot of the most recently handed-out skin.
    pub fn current_slot(&self) -> Option<usize> {
        self.cursor.current()
    }

    /// Uniform sample in `[min, max)`.
    pub fn random_coordinate(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen::<f32>() * (max - min) + min
    }

    /// Uniform point keeping a ball of `radius` fully inside `size`.
    pub fn random_position(&mut self, radius: f32, size: Vec2) -> Vec2 {
        Vec2::new(
            self.random_coordinate(radius, size.x - radius),
            self.random_coordinate(radius, size.y - radius),
        )
    }

    /// Each axis uniform in `[-speed_offset, max_speed - speed_offset)`.
    pub fn random_velocity(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen::<f32>() * self.max_speed - self.speed_offset,
            self.rng.gen::<f32>() * self.max_speed - self.speed_offset,
        )
    }

    /// Spawn one randomized ball if admission allows it. Resets the timer on success.
    pub fn maybe_spawn(&mut self, ctx: SpawnContext<'_>) -> Option<BallId> {
        if !self.admits(ctx.registry.len(), ctx.registry.capacity()) {
            return None;
        }

        let skin = self.next_skin(ctx.palette);
        let tag = self.current_slot().unwrap_or(0) as u32;
        let radius = ctx.config.ball_radius(&skin);
        let spawn = BallSpawn {
            skin,
            tag,
            radius,
            position: self.random_position(radius, ctx.config.world_size()),
            velocity: self.random_velocity(),
            lifetime: None,
        };

        let id = ctx
            .registry
            .spawn(ctx.physics, spawn, &ctx.config.ball_physics())?;
        self.spawned += 1;
        self.reset_timer();
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> (ArenaConfig, SpawnController) {
        let config = ArenaConfig {
            seed: Some(seed),
            ..ArenaConfig::default()
        };
        let controller = SpawnController::new(&config);
        (config, controller)
    }

    #[test]
    fn timer_accumulates_until_reset() {
        let (_, mut ctl) = seeded(1);
        for _ in 0..4 {
            ctl.tick(0.25);
        }
        assert!((ctl.timer() - 1.0).abs() < 1e-6);

        ctl.reset_timer();
        ctl.tick(0.25);
        assert_eq!(ctl.timer(), 0.0, "reset frame adds nothing");
        ctl.tick(0.25);
        assert!((ctl.timer() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn reset_outside_a_frame_does_not_swallow_the_next_delta() {
        let (_, mut ctl) = seeded(1);
        ctl.reset_timer();
        ctl.begin_frame();
        ctl.tick(0.25);
        assert!((ctl.timer() - 0.25).abs() < 1e-6);

        ctl.begin_frame();
        ctl.reset_timer();
        ctl.tick(0.25);
        assert_eq!(ctl.timer(), 0.0);
    }

    #[test]
    fn admission_requires_room_time_and_switch() {
        let (_, mut ctl) = seeded(1);
        assert!(!ctl.admits(0, 17), "timer starts at zero");
        ctl.tick(0.2);
        assert!(ctl.admits(0, 17));
        assert!(ctl.admits(16, 17));
        assert!(!ctl.admits(17, 17));
        ctl.set_enabled(false);
        assert!(!ctl.admits(0, 17));
    }

    #[test]
    fn timer_must_strictly_exceed_interval() {
        let (cfg, mut ctl) = seeded(1);
        ctl.tick(cfg.respawn_time);
        assert!(!ctl.admits(0, 17));
    }

    #[test]
    fn random_samples_stay_in_bounds() {
        let (cfg, mut ctl) = seeded(1234);
        let size = cfg.world_size();
        let radius = cfg.ball_radius(&cfg.palette[0]);
        for _ in 0..2000 {
            let p = ctl.random_position(radius, size);
            assert!(p.x >= radius && p.x <= size.x - radius, "x={}", p.x);
            assert!(p.y >= radius && p.y <= size.y - radius, "y={}", p.y);
            let v = ctl.random_velocity();
            for c in [v.x, v.y] {
                assert!(c >= -5.0 && c <= cfg.max_speed - 5.0, "v={}", c);
            }
        }
    }

    #[test]
    fn same_seed_same_samples() {
        let (cfg, mut a) = seeded(42);
        let (_, mut b) = seeded(42);
        let size = cfg.world_size();
        for _ in 0..20 {
            assert_eq!(a.random_position(0.4, size), b.random_position(0.4, size));
            assert_eq!(a.random_velocity(), b.random_velocity());
        }
    }

    #[test]
    fn maybe_spawn_places_and_resets() {
        let (cfg, mut ctl) = seeded(5);
        let palette = Palette::new(cfg.palette.clone());
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut registry = EntityRegistry::new(cfg.max_entities);

        let refused = ctl.maybe_spawn(SpawnContext {
            registry: &mut registry,
            physics: &mut physics,
            palette: &palette,
            config: &cfg,
        });
        assert!(refused.is_none());

        ctl.tick(0.5);
        let id = ctl
            .maybe_spawn(SpawnContext {
                registry: &mut registry,
                physics: &mut physics,
                palette: &palette,
                config: &cfg,
            })
            .expect("admitted");
        assert_eq!(ctl.timer(), 0.0);
        assert_eq!(ctl.spawned(), 1);
        let ball = registry.get(id).unwrap();
        assert_eq!(ball.type_index(), palette.get(0).type_index);
        assert_eq!(ball.tag, 0);
        assert!(ball.lifetime.is_none());
    }
}
