//! Effect-driven object lifecycle.
//!
//! Game logic decides when an object is defeated or collected; the effect
//! counters decide when it may actually leave the world.

use hecs::{Entity, World};

use crate::components::{Collectible, Health, Lifecycle};
use crate::events::GameEvent;
use crate::vfx::{EffectDurations, EffectKind, EffectStateMachine};

/// How a renderer should draw an object this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawState {
    Idle,
    Flashing,
    /// Terminal effect running; `fraction` falls from 1.0 toward 0.0
    Fading { kind: EffectKind, fraction: f32 },
}

/// React to an interaction event. Hits re-arm the flash counter.
pub fn handle_event(
    effects: &mut EffectStateMachine<Entity>,
    durations: &EffectDurations,
    event: &GameEvent,
) {
    if let GameEvent::Hit { entity, .. } = event {
        effects.rearm(*entity, EffectKind::Flash, durations.flash);
    }
}

/// The effect an object should play on its way out, if it is done for.
fn terminal_effect(health: Option<&Health>, collectible: Option<&Collectible>) -> Option<EffectKind> {
    if let Some(collectible) = collectible {
        return collectible.collected.then_some(collectible.fade);
    }
    health.filter(|h| h.is_defeated()).map(|_| EffectKind::Death)
}

/// Advance every object's effect counters by one frame and return the
/// objects whose terminal effect has finished.
///
/// An object that was just defeated or collected starts its terminal effect
/// here and is kept until that counter expires.
pub fn lifecycle_system(
    world: &mut World,
    effects: &mut EffectStateMachine<Entity>,
    durations: &EffectDurations,
) -> Vec<Entity> {
    puffin::profile_function!();

    let mut expired = Vec::new();

    for (entity, (lifecycle, health, collectible)) in
        world.query_mut::<(&mut Lifecycle, Option<&Health>, Option<&Collectible>)>()
    {
        match *lifecycle {
            Lifecycle::Alive => match terminal_effect(health, collectible) {
                Some(kind) => {
                    effects.clear(entity, EffectKind::Flash);
                    effects.trigger(entity, kind, durations.for_kind(kind));
                    if effects.is_active(entity, kind) {
                        *lifecycle = Lifecycle::Fading(kind);
                    } else {
                        *lifecycle = Lifecycle::Expired;
                        expired.push(entity);
                    }
                }
                None => {
                    effects.tick(entity, EffectKind::Flash);
                }
            },
            Lifecycle::Fading(kind) => {
                effects.tick(entity, kind);
                if !effects.is_active(entity, kind) {
                    *lifecycle = Lifecycle::Expired;
                    expired.push(entity);
                }
            }
            Lifecycle::Expired => expired.push(entity),
        }
    }

    expired
}

/// Whether an object may be removed from the active set
pub fn is_removable(world: &World, entity: Entity) -> bool {
    world
        .get::<&Lifecycle>(entity)
        .map(|l| *l == Lifecycle::Expired)
        .unwrap_or(true)
}

pub fn draw_state(world: &World, effects: &EffectStateMachine<Entity>, entity: Entity) -> DrawState {
    if let Ok(lifecycle) = world.get::<&Lifecycle>(entity) {
        if let Lifecycle::Fading(kind) = *lifecycle {
            let fraction = effects.fraction(entity, kind).unwrap_or(0.0);
            return DrawState::Fading { kind, fraction };
        }
    }

    if effects.is_active(entity, EffectKind::Flash) {
        DrawState::Flashing
    } else {
        DrawState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ObjectKind;
    use crate::events::EventQueue;
    use crate::spawning::spawn_object;
    use crate::systems::interaction::interaction_system;

    struct Harness {
        world: World,
        effects: EffectStateMachine<Entity>,
        durations: EffectDurations,
        events: EventQueue,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                world: World::new(),
                effects: EffectStateMachine::new(),
                durations: EffectDurations::default(),
                events: EventQueue::new(),
            }
        }

        /// One frame with the player standing at `player`
        fn frame(&mut self, player: (i32, i32)) -> Vec<Entity> {
            interaction_system(&mut self.world, player, &mut self.events);
            for event in self.events.drain() {
                handle_event(&mut self.effects, &self.durations, &event);
            }
            let expired = lifecycle_system(&mut self.world, &mut self.effects, &self.durations);
            for entity in &expired {
                self.effects.clear_key(*entity);
                let _ = self.world.despawn(*entity);
            }
            expired
        }
    }

    #[test]
    fn test_hit_flashes_then_settles() {
        let mut h = Harness::new();
        let enemy = spawn_object(&mut h.world, ObjectKind::SwordEnemy, 5, 5);

        h.frame((5, 6));
        assert_eq!(draw_state(&h.world, &h.effects, enemy), DrawState::Flashing);

        // Walk away; flash runs out after its duration
        for _ in 0..9 {
            h.frame((20, 20));
        }
        assert_eq!(draw_state(&h.world, &h.effects, enemy), DrawState::Idle);
        assert!(!h.effects.is_active(enemy, EffectKind::Flash));
    }

    #[test]
    fn test_defeated_enemy_fades_before_removal() {
        let mut h = Harness::new();
        let enemy = spawn_object(&mut h.world, ObjectKind::SwordEnemy, 5, 5);

        // 5 hits of 20 damage
        for _ in 0..4 {
            assert!(h.frame((5, 6)).is_empty());
        }
        assert!(h.frame((5, 6)).is_empty());
        assert!(h.world.get::<&Health>(enemy).unwrap().is_defeated());
        assert_eq!(
            draw_state(&h.world, &h.effects, enemy),
            DrawState::Fading { kind: EffectKind::Death, fraction: 1.0 }
        );
        assert!(!h.effects.is_active(enemy, EffectKind::Flash));

        // Still present for the 19 ticks that leave the counter active
        for _ in 0..19 {
            assert!(h.frame((5, 6)).is_empty());
            assert!(h.world.contains(enemy));
            assert!(!is_removable(&h.world, enemy));
        }

        let removed = h.frame((5, 6));
        assert_eq!(removed, vec![enemy]);
        assert!(!h.world.contains(enemy));
        assert!(h.effects.is_empty());
    }

    #[test]
    fn test_collected_loot_sparkles() {
        let mut h = Harness::new();
        let loot = spawn_object(&mut h.world, ObjectKind::Loot, 2, 2);

        h.frame((2, 3));
        assert_eq!(
            draw_state(&h.world, &h.effects, loot),
            DrawState::Fading { kind: EffectKind::Sparkle, fraction: 1.0 }
        );
        for _ in 0..9 {
            assert!(h.frame((2, 3)).is_empty());
        }
        assert_eq!(h.frame((2, 3)), vec![loot]);
    }

    #[test]
    fn test_felled_tree_uses_death_fade() {
        let mut h = Harness::new();
        let tree = spawn_object(&mut h.world, ObjectKind::Tree, 8, 8);
        h.frame((8, 9));
        assert!(h.effects.is_active(tree, EffectKind::Death));
        assert!(!h.effects.is_active(tree, EffectKind::Sparkle));
    }

    #[test]
    fn test_objects_on_same_tile_do_not_share_counters() {
        let mut h = Harness::new();
        let loot = spawn_object(&mut h.world, ObjectKind::Loot, 4, 4);
        h.frame((4, 5));
        for _ in 0..5 {
            h.frame((4, 5));
        }
        // A second item dropped on the same tile starts its own sparkle
        let second = spawn_object(&mut h.world, ObjectKind::Loot, 4, 4);
        h.frame((4, 5));
        assert_eq!(h.effects.remaining(loot, EffectKind::Sparkle), Some(4));
        assert_eq!(h.effects.remaining(second, EffectKind::Sparkle), Some(10));
    }

    #[test]
    fn test_zero_length_fade_expires_immediately() {
        let mut h = Harness::new();
        h.durations.sparkle = 0;
        let loot = spawn_object(&mut h.world, ObjectKind::Loot, 0, 0);
        assert_eq!(h.frame((0, 1)), vec![loot]);
    }
}
