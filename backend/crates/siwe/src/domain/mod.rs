//! Domain Layer
//!
//! Message model, value objects, entities and repository contracts.

pub mod entities;
pub mod message;
pub mod repository;
pub mod value_objects;
