pub mod endpoints;
pub mod gateway;

pub use gateway::{Body, Gateway, AUTH_HEADER};
