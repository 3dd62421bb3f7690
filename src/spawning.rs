//! Data-driven object spawning.
//!
//! Each object kind is described by an `ObjectDef`; spawning turns the
//! definition into a hecs entity carrying the matching capability components.

use hecs::{Entity, World};

use crate::components::{Collectible, Damageable, Health, Lifecycle, ObjectKind, Position};
use crate::grid::DungeonMap;
use crate::vfx::EffectKind;

/// How an object reacts to the player coming close
#[derive(Clone, Copy, Debug)]
pub enum Interaction {
    Damage { reach: f32, damage: i32 },
    Collect { reach: f32, fade: EffectKind },
}

/// Definition of an object type - all the data needed to spawn one
#[derive(Clone, Copy, Debug)]
pub struct ObjectDef {
    pub kind: ObjectKind,
    pub health: i32,
    pub interaction: Interaction,
}

impl ObjectDef {
    /// Spawn this object type at the given position
    pub fn spawn(&self, world: &mut World, x: i32, y: i32) -> Entity {
        let pos = Position::new(x, y);
        let health = Health::new(self.health);

        match self.interaction {
            Interaction::Damage { reach, damage } => world.spawn((
                self.kind,
                pos,
                health,
                Lifecycle::Alive,
                Damageable { reach, damage },
            )),
            Interaction::Collect { reach, fade } => world.spawn((
                self.kind,
                pos,
                health,
                Lifecycle::Alive,
                Collectible {
                    reach,
                    collected: false,
                    fade,
                },
            )),
        }
    }
}

/// Predefined object types
pub mod objects {
    use super::*;
    use crate::constants::*;

    pub const PROJECTILE_ENEMY: ObjectDef = ObjectDef {
        kind: ObjectKind::ProjectileEnemy,
        health: OBJECT_STARTING_HEALTH,
        interaction: Interaction::Damage {
            reach: PROJECTILE_ENEMY_REACH,
            damage: PROJECTILE_ENEMY_DAMAGE,
        },
    };

    pub const SWORD_ENEMY: ObjectDef = ObjectDef {
        kind: ObjectKind::SwordEnemy,
        health: OBJECT_STARTING_HEALTH,
        interaction: Interaction::Damage {
            reach: SWORD_ENEMY_REACH,
            damage: SWORD_ENEMY_DAMAGE,
        },
    };

    pub const TREE: ObjectDef = ObjectDef {
        kind: ObjectKind::Tree,
        health: OBJECT_STARTING_HEALTH,
        interaction: Interaction::Collect {
            reach: COLLECT_REACH,
            fade: EffectKind::Death,
        },
    };

    pub const LOOT: ObjectDef = ObjectDef {
        kind: ObjectKind::Loot,
        health: OBJECT_STARTING_HEALTH,
        interaction: Interaction::Collect {
            reach: COLLECT_REACH,
            fade: EffectKind::Sparkle,
        },
    };
}

pub fn object_def(kind: ObjectKind) -> &'static ObjectDef {
    match kind {
        ObjectKind::ProjectileEnemy => &objects::PROJECTILE_ENEMY,
        ObjectKind::SwordEnemy => &objects::SWORD_ENEMY,
        ObjectKind::Tree => &objects::TREE,
        ObjectKind::Loot => &objects::LOOT,
    }
}

pub fn spawn_object(world: &mut World, kind: ObjectKind, x: i32, y: i32) -> Entity {
    object_def(kind).spawn(world, x, y)
}

/// Offsets from the encounter room's center
const ROOM_LAYOUT: [(ObjectKind, i32, i32); 6] = [
    (ObjectKind::ProjectileEnemy, -2, 0),
    (ObjectKind::ProjectileEnemy, 2, 0),
    (ObjectKind::Tree, 0, -2),
    (ObjectKind::Tree, 0, 2),
    (ObjectKind::Loot, -2, -2),
    (ObjectKind::Loot, 2, 2),
];

/// Populate the encounter room: the second room, or the only room when the
/// dungeon has just one.
pub fn spawn_room_objects(world: &mut World, map: &DungeonMap) -> Vec<Entity> {
    let index = if map.rooms().len() > 1 { 1 } else { 0 };
    let Some((cx, cy)) = map.room_center(index) else {
        return Vec::new();
    };

    ROOM_LAYOUT
        .iter()
        .map(|&(kind, dx, dy)| spawn_object(world, kind, cx + dx, cy + dy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon_gen::GeneratorConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_enemy_gets_damage_capability() {
        let mut world = World::new();
        let enemy = spawn_object(&mut world, ObjectKind::SwordEnemy, 3, 4);
        assert!(world.get::<&Damageable>(enemy).is_ok());
        assert!(world.get::<&Collectible>(enemy).is_err());
        assert_eq!(*world.get::<&Position>(enemy).unwrap(), Position::new(3, 4));
        assert_eq!(world.get::<&Health>(enemy).unwrap().current, 100);
    }

    #[test]
    fn test_collectibles_fade_by_kind() {
        let mut world = World::new();
        let tree = spawn_object(&mut world, ObjectKind::Tree, 0, 0);
        let loot = spawn_object(&mut world, ObjectKind::Loot, 1, 0);
        assert_eq!(world.get::<&Collectible>(tree).unwrap().fade, EffectKind::Death);
        assert_eq!(world.get::<&Collectible>(loot).unwrap().fade, EffectKind::Sparkle);
        assert!(world.get::<&Damageable>(loot).is_err());
    }

    #[test]
    fn test_room_objects_surround_second_room() {
        let mut rng = StdRng::seed_from_u64(9);
        let map = DungeonMap::generate(60, 45, &GeneratorConfig::default(), &mut rng).unwrap();
        let mut world = World::new();
        let spawned = spawn_room_objects(&mut world, &map);
        assert_eq!(spawned.len(), 6);

        let index = if map.rooms().len() > 1 { 1 } else { 0 };
        let (cx, cy) = map.room_center(index).unwrap();
        let first = *world.get::<&Position>(spawned[0]).unwrap();
        assert_eq!(first, Position::new(cx - 2, cy));
        let kinds: Vec<ObjectKind> = spawned
            .iter()
            .map(|e| *world.get::<&ObjectKind>(*e).unwrap())
            .collect();
        assert_eq!(kinds.iter().filter(|k| **k == ObjectKind::Loot).count(), 2);
    }
}
