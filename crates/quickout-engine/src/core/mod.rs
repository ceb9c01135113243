pub mod physics;
pub mod registry;
pub mod time;
