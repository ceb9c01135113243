pub mod api;
pub mod core;
pub mod components;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{ArenaConfig, CollisionStrategy};
pub use api::level::Level;
pub use api::snapshot::{BallInstance, BallSnapshot};
pub use api::types::{BallId, CollisionCategory, CollisionFilter};
pub use components::ball::Ball;
pub use components::palette::{BallSkin, Palette, BLUE, GREEN, RED, YELLOW};
pub use core::physics::{
    BodyDesc, BodyType, BoundaryBody, ColliderDesc, ColliderMaterial, ColliderTag,
    ContactEvent, ContactObserver, PhysicsBody, PhysicsWorld,
};
pub use core::registry::EntityRegistry;
pub use core::time::FixedTimestep;
pub use systems::contacts::BoundaryContactObserver;
pub use systems::resolver::CollisionResolver;
pub use systems::spawn::SpawnController;
pub use systems::validation::{AcceptAll, RemovalValidator, Verdict, VerdictTally};
