//! Per-frame game systems.
//!
//! - `interaction`: player proximity damage and pickup
//! - `effects`: effect counters driving each object's lifecycle

pub mod effects;
pub mod interaction;

pub use effects::{draw_state, handle_event, is_removable, lifecycle_system, DrawState};
pub use interaction::interaction_system;
