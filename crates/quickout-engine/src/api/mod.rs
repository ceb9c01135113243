pub mod config;
pub mod level;
pub mod snapshot;
pub mod types;
