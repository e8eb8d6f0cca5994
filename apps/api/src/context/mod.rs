// State container
// Implements: action reducer, completeness scoring, portfolio analysis,
// the shared store and the form-editor endpoints.

pub mod actions;
pub mod completeness;
pub mod handlers;
pub mod models;
pub mod reducer;
pub mod store;
pub mod validation;
