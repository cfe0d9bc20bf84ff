//! Deterministic in-memory physics backend for controller tests.
//!
//! The world is a single infinite floor plane plus point-like props. The
//! character is a point whose origin rests on the plane; props are picked
//! when the ray passes within [`FakePhysics::PICK_RADIUS`] of them.

use std::collections::{BTreeMap, VecDeque};

use glam::{Quat, Vec3};
use graviton_physics::{CollisionResponseMode, Contact, PhysicalObject, PhysicsBackend, PickHit};

/// One property write or motion applied to a fake object, in call order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ObjectEvent {
    SetMode(CollisionResponseMode),
    SetGravity(bool),
    MoveTo(Vec3),
    Impulse(Vec3),
}

#[derive(Clone, Debug)]
pub struct FakeObject {
    pub mode: CollisionResponseMode,
    pub gravity: bool,
    pub position: Vec3,
    pub rotation: Quat,
    pub events: Vec<ObjectEvent>,
}

impl PhysicalObject for FakeObject {
    fn collision_response_mode(&self) -> CollisionResponseMode {
        self.mode
    }

    fn set_collision_response_mode(&mut self, mode: CollisionResponseMode) {
        self.mode = mode;
        self.events.push(ObjectEvent::SetMode(mode));
    }

    fn gravity_enabled(&self) -> bool {
        self.gravity
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity = enabled;
        self.events.push(ObjectEvent::SetGravity(enabled));
    }

    fn move_to(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
        self.events.push(ObjectEvent::MoveTo(position));
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.events.push(ObjectEvent::Impulse(impulse));
    }
}

pub struct FakePhysics {
    pub position: Vec3,
    /// Height of the floor plane, or `None` for an empty void.
    pub floor_y: Option<f32>,
    /// Extra contacts reported by the next move, one batch per move.
    pub scripted_contacts: VecDeque<Vec<Contact<u32>>>,
    objects: BTreeMap<u32, FakeObject>,
    next_id: u32,
}

impl FakePhysics {
    pub const FLOOR: u32 = 0;
    pub const PICK_RADIUS: f32 = 0.01;
    const COLLIDER_OFFSET: u32 = 1000;

    /// Character at the origin standing on a floor at `y = 0`.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            floor_y: Some(0.0),
            scripted_contacts: VecDeque::new(),
            objects: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Character floating at `position` with no floor.
    pub fn void(position: Vec3) -> Self {
        Self {
            position,
            floor_y: None,
            ..Self::new()
        }
    }

    /// Adds a discrete, gravity-affected prop and returns its body id.
    pub fn add_object(&mut self, position: Vec3) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.insert(
            id,
            FakeObject {
                mode: CollisionResponseMode::Discrete,
                gravity: true,
                position,
                rotation: Quat::IDENTITY,
                events: Vec::new(),
            },
        );
        id
    }

    pub fn collider_of(body: u32) -> u32 {
        body + Self::COLLIDER_OFFSET
    }

    pub fn object(&self, body: u32) -> &FakeObject {
        &self.objects[&body]
    }

    pub fn object_mut_direct(&mut self, body: u32) -> &mut FakeObject {
        self.objects.get_mut(&body).expect("unknown fake object")
    }

    pub fn destroy(&mut self, body: u32) {
        self.objects.remove(&body);
    }

    pub fn script_contact(&mut self, normal: Vec3, collider: u32) {
        self.scripted_contacts
            .push_back(vec![Contact { normal, collider }]);
    }
}

impl PhysicsBackend for FakePhysics {
    type BodyId = u32;
    type ColliderId = u32;

    fn move_character(&mut self, displacement: Vec3, _dt: f32) -> Vec<Contact<u32>> {
        let mut contacts = self.scripted_contacts.pop_front().unwrap_or_default();

        let mut next = self.position + displacement;
        if let Some(floor) = self.floor_y
            && next.y <= floor
        {
            next.y = floor;
            contacts.push(Contact {
                normal: Vec3::Y,
                collider: Self::FLOOR,
            });
        }
        self.position = next;
        contacts
    }

    fn character_position(&self) -> Vec3 {
        self.position
    }

    fn cast_pick_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<PickHit<u32, u32>> {
        let dir = direction.normalize_or_zero();
        self.objects
            .iter()
            .filter_map(|(&id, obj)| {
                let to = obj.position - origin;
                let t = to.dot(dir);
                let off_axis = (to - dir * t).length();
                let on_ray = (0.0..=max_distance).contains(&t) && off_axis <= Self::PICK_RADIUS;
                on_ray.then_some(PickHit {
                    body: id,
                    collider: Self::collider_of(id),
                    distance: t,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn object_mut(&mut self, body: u32) -> Option<&mut dyn PhysicalObject> {
        self.objects
            .get_mut(&body)
            .map(|o| o as &mut dyn PhysicalObject)
    }
}
