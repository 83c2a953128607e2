pub mod entity;
pub mod kind;
pub mod page;

pub use entity::Entity;
pub use kind::{Column, EntityKind};
pub use page::{total_pages_for, Page};
