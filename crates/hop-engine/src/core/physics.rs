//! Arcade physics: axis-aligned boxes, global gravity, zero-bounce separation.
//!
//! Bodies live on entities (`Entity::body`). The world only integrates and
//! answers pairwise queries; games decide which groups collide.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::scene::Scene;

/// Previous-frame overlaps at or below this depth count as resting contact.
const CONTACT_EPSILON: f32 = 0.01;
/// Corner entries shallower than this on Y resolve vertically, so bodies
/// slide across the seam between two platforms.
const SEAM_BIAS: f32 = 4.0;

/// Axis-aligned rectangle in world space (Y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of `size` placed so that `anchor` (0..1 on each axis) sits at `pos`.
    pub fn from_anchor(pos: Vec2, anchor: Vec2, size: Vec2) -> Self {
        let min = pos - anchor * size;
        Self { min, max: min + size }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Penetration depth on each axis. Positive on both axes means the
    /// rectangles intersect.
    pub fn overlap(&self, other: &Aabb) -> Vec2 {
        Vec2::new(
            self.max.x.min(other.max.x) - self.min.x.max(other.min.x),
            self.max.y.min(other.max.y) - self.min.y.max(other.min.y),
        )
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        let o = self.overlap(other);
        o.x > 0.0 && o.y > 0.0
    }
}

/// Per-side contact flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sides {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Sides {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Arcade body attached to an entity. Its rectangle is derived from the
/// entity position and anchor, so moving the entity moves the body.
#[derive(Debug, Clone)]
pub struct ArcadeBody {
    /// Disabled bodies are neither integrated nor tested.
    pub enable: bool,
    pub size: Vec2,
    pub velocity: Vec2,
    pub allow_gravity: bool,
    /// Immovable bodies are never pushed by a separation.
    pub immovable: bool,
    pub collide_world_bounds: bool,
    /// Contacts from solid collisions this frame.
    pub touching: Sides,
    /// `touching` as it was at the end of the previous frame.
    pub was_touching: Sides,
    /// Contacts with the world bounds this frame.
    pub blocked: Sides,
    prev: Option<Vec2>,
}

impl ArcadeBody {
    pub fn new(size: Vec2) -> Self {
        Self {
            enable: true,
            size,
            velocity: Vec2::ZERO,
            allow_gravity: true,
            immovable: false,
            collide_world_bounds: false,
            touching: Sides::default(),
            was_touching: Sides::default(),
            blocked: Sides::default(),
            prev: None,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_gravity(mut self, allow: bool) -> Self {
        self.allow_gravity = allow;
        self
    }

    pub fn immovable(mut self) -> Self {
        self.immovable = true;
        self
    }

    pub fn with_world_bounds(mut self) -> Self {
        self.collide_world_bounds = true;
        self
    }

    /// Whether a solid contact below was registered this frame.
    pub fn on_ground(&self) -> bool {
        self.touching.down
    }
}

/// Global gravity plus world bounds. Stateless between frames apart from
/// what lives on the bodies.
#[derive(Debug, Clone)]
pub struct ArcadePhysics {
    pub gravity: Vec2,
    pub bounds: Aabb,
}

impl ArcadePhysics {
    pub fn new(world_width: f32, world_height: f32) -> Self {
        Self {
            gravity: Vec2::ZERO,
            bounds: Aabb::new(Vec2::ZERO, Vec2::new(world_width, world_height)),
        }
    }

    /// Integrate every enabled body: reset contact flags, apply gravity,
    /// move, then clamp to the world bounds where requested.
    pub fn step(&self, scene: &mut Scene, dt: f32) {
        for entity in scene.iter_mut() {
            let anchor = entity.anchor;
            let Some(body) = entity.body.as_mut() else {
                continue;
            };
            if !body.enable {
                continue;
            }

            body.prev = Some(entity.pos);
            body.was_touching = body.touching;
            body.touching = Sides::default();
            body.blocked = Sides::default();

            if body.allow_gravity {
                body.velocity += self.gravity * dt;
            }
            entity.pos += body.velocity * dt;

            if body.collide_world_bounds {
                self.clamp_to_bounds(&mut entity.pos, anchor, body);
            }
        }
    }

    fn clamp_to_bounds(&self, pos: &mut Vec2, anchor: Vec2, body: &mut ArcadeBody) {
        let rect = Aabb::from_anchor(*pos, anchor, body.size);

        if rect.min.x < self.bounds.min.x {
            pos.x += self.bounds.min.x - rect.min.x;
            body.velocity.x = 0.0;
            body.blocked.left = true;
        } else if rect.max.x > self.bounds.max.x {
            pos.x -= rect.max.x - self.bounds.max.x;
            body.velocity.x = 0.0;
            body.blocked.right = true;
        }

        if rect.min.y < self.bounds.min.y {
            pos.y += self.bounds.min.y - rect.min.y;
            body.velocity.y = 0.0;
            body.blocked.up = true;
        } else if rect.max.y > self.bounds.max.y {
            pos.y -= rect.max.y - self.bounds.max.y;
            body.velocity.y = 0.0;
            body.blocked.down = true;
        }
    }

    /// Solid collision of every body in `a` against every body in `b`.
    /// Returns the pairs that were touching and got separated.
    pub fn collide(&self, scene: &mut Scene, a: &[EntityId], b: &[EntityId]) -> Vec<(EntityId, EntityId)> {
        let mut hits = Vec::new();
        for &ia in a {
            for &ib in b {
                if let Some((ea, eb)) = scene.get_pair_mut(ia, ib) {
                    if separate(ea, eb) {
                        hits.push((ia, ib));
                    }
                }
            }
        }
        hits
    }

    /// Solid collision of a group against itself, each pair once.
    pub fn collide_within(&self, scene: &mut Scene, ids: &[EntityId]) -> Vec<(EntityId, EntityId)> {
        let mut hits = Vec::new();
        for (i, &ia) in ids.iter().enumerate() {
            for &ib in &ids[i + 1..] {
                if let Some((ea, eb)) = scene.get_pair_mut(ia, ib) {
                    if separate(ea, eb) {
                        hits.push((ia, ib));
                    }
                }
            }
        }
        hits
    }

    /// Intersection test only. Positions, velocities and contact flags are
    /// left exactly as they were.
    pub fn overlap(&self, scene: &Scene, a: &[EntityId], b: &[EntityId]) -> Vec<(EntityId, EntityId)> {
        let mut hits = Vec::new();
        for &ia in a {
            let Some(ra) = enabled_bounds(scene, ia) else {
                continue;
            };
            for &ib in b {
                if ia == ib {
                    continue;
                }
                if let Some(rb) = enabled_bounds(scene, ib) {
                    if ra.intersects(&rb) {
                        hits.push((ia, ib));
                    }
                }
            }
        }
        hits
    }
}

fn enabled_bounds(scene: &Scene, id: EntityId) -> Option<Aabb> {
    scene
        .get(id)
        .filter(|e| e.has_enabled_body())
        .and_then(|e| e.bounds())
}

fn prev_bounds(entity: &Entity, body: &ArcadeBody) -> Aabb {
    Aabb::from_anchor(body.prev.unwrap_or(entity.pos), entity.anchor, body.size)
}

/// Resolve one intersecting pair. Returns false when they do not touch.
fn separate(ea: &mut Entity, eb: &mut Entity) -> bool {
    if !ea.has_enabled_body() || !eb.has_enabled_body() {
        return false;
    }
    let (Some(ra), Some(rb)) = (ea.bounds(), eb.bounds()) else {
        return false;
    };
    let depth = ra.overlap(&rb);
    if depth.x <= 0.0 || depth.y <= 0.0 {
        return false;
    }

    let (Some(ba), Some(bb)) = (ea.body.as_ref(), eb.body.as_ref()) else {
        return false;
    };
    let prev = prev_bounds(ea, ba).overlap(&prev_bounds(eb, bb));
    let was_x = prev.x > CONTACT_EPSILON;
    let was_y = prev.y > CONTACT_EPSILON;

    // Came from above/below -> vertical; came from the side -> horizontal.
    let vertical = match (was_x, was_y) {
        (true, false) => true,
        (false, true) => false,
        (false, false) => depth.y < depth.x.max(SEAM_BIAS),
        (true, true) => depth.y < depth.x,
    };

    if vertical {
        separate_y(ea, eb, ra.center().y < rb.center().y, depth.y);
    } else {
        separate_x(ea, eb, ra.center().x < rb.center().x, depth.x);
    }
    true
}

fn carried_dx(entity: &Entity) -> f32 {
    entity
        .body
        .as_ref()
        .and_then(|b| b.prev)
        .map(|prev| entity.pos.x - prev.x)
        .unwrap_or(0.0)
}

fn separate_y(ea: &mut Entity, eb: &mut Entity, a_above: bool, depth: f32) {
    let dx_a = carried_dx(ea);
    let dx_b = carried_dx(eb);
    let (Some(ba), Some(bb)) = (ea.body.as_mut(), eb.body.as_mut()) else {
        return;
    };

    if a_above {
        ba.touching.down = true;
        bb.touching.up = true;
    } else {
        ba.touching.up = true;
        bb.touching.down = true;
    }

    // Displacement that moves `a` out of `b`.
    let push = if a_above { -depth } else { depth };

    match (ba.immovable, bb.immovable) {
        (true, true) => {}
        (false, true) => {
            ea.pos.y += push;
            ba.velocity.y = bb.velocity.y;
            if a_above {
                ea.pos.x += dx_b;
            }
        }
        (true, false) => {
            eb.pos.y -= push;
            bb.velocity.y = ba.velocity.y;
            if !a_above {
                eb.pos.x += dx_a;
            }
        }
        (false, false) => {
            ea.pos.y += push * 0.5;
            eb.pos.y -= push * 0.5;
            let shared = (ba.velocity.y + bb.velocity.y) * 0.5;
            ba.velocity.y = shared;
            bb.velocity.y = shared;
        }
    }
}

fn separate_x(ea: &mut Entity, eb: &mut Entity, a_left: bool, depth: f32) {
    let (Some(ba), Some(bb)) = (ea.body.as_mut(), eb.body.as_mut()) else {
        return;
    };

    if a_left {
        ba.touching.right = true;
        bb.touching.left = true;
    } else {
        ba.touching.left = true;
        bb.touching.right = true;
    }

    let push = if a_left { -depth } else { depth };

    match (ba.immovable, bb.immovable) {
        (true, true) => {}
        (false, true) => {
            ea.pos.x += push;
            ba.velocity.x = bb.velocity.x;
        }
        (true, false) => {
            eb.pos.x -= push;
            bb.velocity.x = ba.velocity.x;
        }
        (false, false) => {
            ea.pos.x += push * 0.5;
            eb.pos.x -= push * 0.5;
            let shared = (ba.velocity.x + bb.velocity.x) * 0.5;
            ba.velocity.x = shared;
            bb.velocity.x = shared;
        }
    }
}
