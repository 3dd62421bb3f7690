//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod dungeon;
mod effects;
mod gameplay;
mod sensor;
mod ui;

pub use dungeon::*;
pub use effects::*;
pub use gameplay::*;
pub use sensor::*;
pub use ui::*;
