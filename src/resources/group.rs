//! Sprite groups: ordered lists of entity ids.
//!
//! Groups never own entities; the [`World`](bevy_ecs::world::World) does.
//! An entity may belong to several groups at once, and is removed from all
//! of them in the same step it is despawned (see
//! [`prune_defeated`](crate::systems::prune::prune_defeated)).
//!
//! | group        | members                                  |
//! |--------------|------------------------------------------|
//! | `visible`    | everything drawn: player, enemies, grass, objects, weapon, magic |
//! | `obstacles`  | boundary blocks, grass, objects          |
//! | `attackable` | enemies, grass                           |
//! | `attacks`    | weapon, fire magic                       |

use bevy_ecs::prelude::{Entity, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Visible,
    Obstacles,
    Attackable,
    Attacks,
}

/// Named ordered collection of entity ids.
///
/// No duplicate detection; removal is by identity and keeps the relative
/// order of the remaining members.
#[derive(Debug, Clone)]
pub struct SpriteGroup {
    name: &'static str,
    members: Vec<Entity>,
}

impl SpriteGroup {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn add(&mut self, entity: Entity) {
        self.members.push(entity);
    }

    /// Removes every occurrence of `entity`. Returns whether it was a member.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let before = self.members.len();
        self.members.retain(|e| *e != entity);
        before != self.members.len()
    }

    /// Removes a batch collected during an earlier scan.
    pub fn remove_all(&mut self, entities: &[Entity]) {
        if entities.is_empty() {
            return;
        }
        self.members.retain(|e| !entities.contains(e));
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    /// Read view in insertion order.
    pub fn sprites(&self) -> &[Entity] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.members.iter().copied()
    }

    /// Calls `f` for every member in insertion order.
    pub fn update(&self, mut f: impl FnMut(Entity)) {
        for entity in &self.members {
            f(*entity);
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The four level groups.
#[derive(Resource, Debug, Clone)]
pub struct SpriteGroups {
    pub visible: SpriteGroup,
    pub obstacles: SpriteGroup,
    pub attackable: SpriteGroup,
    pub attacks: SpriteGroup,
}

impl Default for SpriteGroups {
    fn default() -> Self {
        Self {
            visible: SpriteGroup::new("visible"),
            obstacles: SpriteGroup::new("obstacles"),
            attackable: SpriteGroup::new("attackable"),
            attacks: SpriteGroup::new("attacks"),
        }
    }
}

impl SpriteGroups {
    pub fn get(&self, kind: GroupKind) -> &SpriteGroup {
        match kind {
            GroupKind::Visible => &self.visible,
            GroupKind::Obstacles => &self.obstacles,
            GroupKind::Attackable => &self.attackable,
            GroupKind::Attacks => &self.attacks,
        }
    }

    pub fn get_mut(&mut self, kind: GroupKind) -> &mut SpriteGroup {
        match kind {
            GroupKind::Visible => &mut self.visible,
            GroupKind::Obstacles => &mut self.obstacles,
            GroupKind::Attackable => &mut self.attackable,
            GroupKind::Attacks => &mut self.attacks,
        }
    }

    pub fn add(&mut self, entity: Entity, kinds: &[GroupKind]) {
        for kind in kinds {
            self.get_mut(*kind).add(entity);
        }
    }

    /// Drops `entity` from every group.
    pub fn forget(&mut self, entity: Entity) {
        self.forget_all(&[entity]);
    }

    pub fn forget_all(&mut self, entities: &[Entity]) {
        self.visible.remove_all(entities);
        self.obstacles.remove_all(entities);
        self.attackable.remove_all(entities);
        self.attacks.remove_all(entities);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn removal_preserves_order_of_remaining_members() {
        let e = entities(5);
        let mut group = SpriteGroup::new("attackable");
        for entity in &e {
            group.add(*entity);
        }
        assert!(group.remove(e[1]));
        group.remove_all(&[e[3]]);
        assert_eq!(group.sprites(), &[e[0], e[2], e[4]]);
        assert!(!group.remove(e[1]));
    }

    #[test]
    fn update_visits_in_insertion_order() {
        let e = entities(3);
        let mut group = SpriteGroup::new("visible");
        group.add(e[2]);
        group.add(e[0]);
        group.add(e[1]);
        let mut seen = Vec::new();
        group.update(|entity| seen.push(entity));
        assert_eq!(seen, vec![e[2], e[0], e[1]]);
    }

    #[test]
    fn forget_clears_every_group() {
        let e = entities(2);
        let mut groups = SpriteGroups::default();
        groups.add(e[0], &[GroupKind::Visible, GroupKind::Obstacles, GroupKind::Attackable]);
        groups.add(e[1], &[GroupKind::Visible, GroupKind::Attacks]);
        groups.forget(e[0]);
        assert_eq!(groups.visible.sprites(), &[e[1]]);
        assert!(groups.obstacles.is_empty());
        assert!(groups.attackable.is_empty());
        assert!(groups.attacks.contains(e[1]));
        assert_eq!(groups.get(GroupKind::Attacks).name(), "attacks");
    }
}
