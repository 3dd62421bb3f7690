//! Torch-lit dungeon crawling driven by a hand-presence sensor.
//!
//! A procedurally generated dungeon is revealed tile by tile as long as a hand
//! is held in front of the camera. Objects in the dungeon react to the player
//! and leave the world only once their closing effect has played out.

pub mod components;
pub mod config;
pub mod constants;
pub mod dungeon_gen;
pub mod events;
pub mod grid;
pub mod minimap;
pub mod sensor;
pub mod session;
pub mod spawning;
pub mod systems;
pub mod tile;
pub mod torch;
pub mod vfx;
pub mod visibility;

pub use config::{ConfigError, TorchlitConfig};
pub use dungeon_gen::{DungeonGenerator, GenerationError, GeneratorConfig, Rect, RoomPlanner, TunnelCarver};
pub use grid::DungeonMap;
pub use minimap::render_minimap;
pub use sensor::{CaptureDevice, FrameSequence, HandModel, Presence, PresenceSource, SensorBridge, SensorError};
pub use session::{FrameReport, GameSession};
pub use tile::TileType;
pub use torch::{Torch, TorchConfig};
pub use vfx::{EffectDurations, EffectKind, EffectStateMachine};
pub use visibility::{VisibilityGrid, VisibilityTracker};
