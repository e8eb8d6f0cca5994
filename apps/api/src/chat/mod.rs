//! Scripted discovery chat. Replies come from fixed per-phase tables; user
//! input is recorded but never interpreted.

pub mod handlers;
pub mod phases;
pub mod prompts;
pub mod wizard;
