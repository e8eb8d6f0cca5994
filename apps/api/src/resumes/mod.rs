//! Stored resume versions: listing, selection, download and duplication.

pub mod handlers;
pub mod manager;
