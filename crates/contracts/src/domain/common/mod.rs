//! Common types and traits for all list entities

pub mod entity_id;
pub mod list_entity;

// Re-exports
pub use entity_id::EntityId;
pub use list_entity::ListEntity;
