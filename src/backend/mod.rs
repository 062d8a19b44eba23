//! Clients and wire types for the remote services

pub mod api;
pub mod types;

pub use api::BackendClient;
pub use types::{display_rating, HistoryEntry, HistoryReview, PlaceResult, Review};
