//! Player proximity interactions: damaging enemies and collecting items.

use hecs::World;

use crate::components::{Collectible, Damageable, Health, Lifecycle, ObjectKind, Position};
use crate::events::{EventQueue, GameEvent};

/// Apply one frame of proximity interactions from the player's tile.
///
/// Damageable objects in reach lose health every frame until defeated;
/// collectibles in reach are picked up once. Objects already on their way out
/// are left alone.
pub fn interaction_system(world: &mut World, player: (i32, i32), events: &mut EventQueue) {
    for (entity, (kind, pos, health, damageable, lifecycle)) in world
        .query_mut::<(&ObjectKind, &Position, &mut Health, &Damageable, &Lifecycle)>()
    {
        if *lifecycle != Lifecycle::Alive || health.is_defeated() {
            continue;
        }
        if pos.distance_to(player.0, player.1) >= damageable.reach {
            continue;
        }

        health.current -= damageable.damage;
        events.push(GameEvent::Hit {
            entity,
            damage: damageable.damage,
            remaining_health: health.current,
        });
        if health.is_defeated() {
            events.push(GameEvent::Defeated {
                entity,
                kind: *kind,
            });
        }
    }

    for (entity, (kind, pos, collectible, lifecycle)) in
        world.query_mut::<(&ObjectKind, &Position, &mut Collectible, &Lifecycle)>()
    {
        if *lifecycle != Lifecycle::Alive || collectible.collected {
            continue;
        }
        if pos.distance_to(player.0, player.1) >= collectible.reach {
            continue;
        }

        collectible.collected = true;
        events.push(GameEvent::Collected {
            entity,
            kind: *kind,
        });
    }
}
