//! Resource gateway
//!
//! Uniform create/list operations for every record type, with foreign-key
//! checks applied before each write.

pub mod integrity;
pub mod resource;

pub use integrity::{Reference, Target};
pub use resource::{create_many, create_one, list_all, Resource};
