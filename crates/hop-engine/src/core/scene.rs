use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Flat entity storage. A level holds a few hundred entities at most,
/// so lookups are linear scans.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
        }
    }

    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID, keeping the order of the rest.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.index_of(id)?;
        Some(self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Borrow two distinct entities mutably at once (collision resolution).
    pub fn get_pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        if a == b {
            return None;
        }
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        if ia < ib {
            let (left, right) = self.entities.split_at_mut(ib);
            Some((&mut left[ia], &mut right[0]))
        } else {
            let (left, right) = self.entities.split_at_mut(ia);
            Some((&mut right[0], &mut left[ib]))
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec2::new(10.0, 20.0)));
        assert_eq!(scene.get(id).unwrap().pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn despawn_keeps_order_of_the_rest() {
        let mut scene = Scene::new();
        for i in 1..=3 {
            scene.spawn(Entity::new(EntityId(i)));
        }
        scene.despawn(EntityId(1));
        let ids: Vec<u32> = scene.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn pair_borrow_in_both_orders() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("a"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("b"));

        let (a, b) = scene.get_pair_mut(EntityId(2), EntityId(1)).unwrap();
        assert_eq!(a.tag, "b");
        assert_eq!(b.tag, "a");
        assert!(scene.get_pair_mut(EntityId(1), EntityId(1)).is_none());
        assert!(scene.get_pair_mut(EntityId(1), EntityId(9)).is_none());
    }
}
