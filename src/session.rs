//! One running game: the dungeon, what has been seen of it, and the objects in it.

use hecs::{Entity, World};
use rand::Rng;

use crate::config::TorchlitConfig;
use crate::dungeon_gen::GenerationError;
use crate::events::{EventQueue, GameEvent};
use crate::grid::DungeonMap;
use crate::sensor::{Presence, PresenceSource};
use crate::spawning::spawn_room_objects;
use crate::systems::{handle_event, interaction_system, lifecycle_system};
use crate::torch::Torch;
use crate::vfx::{EffectDurations, EffectStateMachine};
use crate::visibility::VisibilityTracker;

/// What happened during one [`GameSession::frame`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Reveal radius used this frame; `None` when no hand was present
    pub radius: Option<i32>,
    pub gesture: bool,
    pub events: Vec<GameEvent>,
}

impl FrameReport {
    pub fn removed(&self) -> impl Iterator<Item = Entity> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::Removed { entity } => Some(*entity),
            _ => None,
        })
    }
}

pub struct GameSession {
    map: DungeonMap,
    visibility: VisibilityTracker,
    world: World,
    effects: EffectStateMachine<Entity>,
    durations: EffectDurations,
    torch: Torch,
    player: (i32, i32),
    events: EventQueue,
    frame_count: u64,
}

impl GameSession {
    /// Generate a dungeon, place the player in the first room and populate the
    /// encounter room.
    pub fn new(config: &TorchlitConfig, rng: &mut impl Rng) -> Result<Self, GenerationError> {
        let map = DungeonMap::generate(config.map_width, config.map_height, &config.generator, rng)?;
        let visibility = VisibilityTracker::for_map(&map);
        let player = map.start_position();

        let mut world = World::new();
        let spawned = spawn_room_objects(&mut world, &map);

        tracing::info!(
            rooms = map.rooms().len(),
            objects = spawned.len(),
            player_x = player.0,
            player_y = player.1,
            "session started"
        );

        Ok(Self {
            map,
            visibility,
            world,
            effects: EffectStateMachine::new(),
            durations: config.effects,
            torch: Torch::new(config.torch),
            player,
            events: EventQueue::new(),
            frame_count: 0,
        })
    }

    /// Step the player by `(dx, dy)`. The target is clamped to the map and the
    /// move is refused unless it lands on floor. Returns whether the player moved.
    pub fn move_player(&mut self, dx: i32, dy: i32) -> bool {
        let max_x = self.map.width as i32 - 1;
        let max_y = self.map.height as i32 - 1;
        let target = (
            (self.player.0 + dx).clamp(0, max_x),
            (self.player.1 + dy).clamp(0, max_y),
        );

        if target == self.player || !self.map.is_floor(target.0, target.1) {
            return false;
        }
        self.player = target;
        true
    }

    /// Run one frame against the latest sensor reading.
    pub fn frame(&mut self, sensor: &impl PresenceSource) -> FrameReport {
        puffin::profile_function!();

        self.frame_count += 1;
        let Presence { present, gesture } = sensor.presence();
        let gesture = present && gesture;

        let radius = self.torch.advance(present);
        if let Some(radius) = radius {
            self.visibility.update(self.player, radius);
        }

        interaction_system(&mut self.world, self.player, &mut self.events);
        let mut events: Vec<GameEvent> = self.events.drain().collect();
        for event in &events {
            handle_event(&mut self.effects, &self.durations, event);
        }

        let expired = lifecycle_system(&mut self.world, &mut self.effects, &self.durations);
        for entity in expired {
            self.effects.clear_key(entity);
            if self.world.despawn(entity).is_ok() {
                tracing::debug!(?entity, frame = self.frame_count, "object removed");
                events.push(GameEvent::Removed { entity });
            }
        }

        FrameReport {
            radius,
            gesture,
            events,
        }
    }

    pub fn map(&self) -> &DungeonMap {
        &self.map
    }

    pub fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn effects(&self) -> &EffectStateMachine<Entity> {
        &self.effects
    }

    pub fn torch(&self) -> &Torch {
        &self.torch
    }

    pub fn player(&self) -> (i32, i32) {
        self.player
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
