//! Domain entities mirrored from the workshop backend.

pub mod alert;
pub mod auth;
pub mod catalog;
pub mod client;
pub mod invoice;
pub mod maintenance;
pub mod resource;
pub mod types;
pub mod vehicle;
pub mod workshop;
