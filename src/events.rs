//! Game event system for decoupled communication between systems.
//!
//! Interaction systems emit events; the effect machine and logging react
//! without the systems knowing about each other.

use hecs::Entity;

use crate::components::ObjectKind;

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An object took damage from the player
    Hit {
        entity: Entity,
        damage: i32,
        remaining_health: i32,
    },
    /// An object's health dropped to zero
    Defeated { entity: Entity, kind: ObjectKind },
    /// An object was picked up or felled
    Collected { entity: Entity, kind: ObjectKind },
    /// An object's terminal effect finished and it left the active set
    Removed { entity: Entity },
}

/// Simple event queue - events are pushed during update, processed at end of frame
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
