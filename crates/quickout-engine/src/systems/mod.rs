pub mod contacts;
pub mod resolver;
pub mod spawn;
pub mod validation;
