pub mod ball;
pub mod palette;
