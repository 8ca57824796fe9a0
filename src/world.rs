use glam::Vec2;
use log::{debug, trace, warn};

use std::time::Instant;

use crate::api::{HasPhysicsBody, NarrowphaseApi, PhysicsWorldApi};
use crate::body::Body;
use crate::forces::{ForceField, ForceKind};
use crate::narrowphase::Narrowphase;
use crate::types::*;

/// Rigid-body world: ordered bodies, ordered force fields, fixed bounds.
///
/// Not internally synchronized. Mutate membership only between steps.
///
/// Collision pairs are enumerated over all `i < j` in registration order, O(n²)
/// with no spatial index, so resolution order (and the tie-breaks that depend on
/// it) is exactly reproducible.
///
/// Two-dynamic-body bounces scale each body's post-collision velocity by its
/// own restitution rather than a combined pair coefficient.
pub struct PhysicsWorld {
    cfg: WorldConfig,
    pub step_counter: u64,

    bodies: Vec<(BodyId, Body)>,
    forces: Vec<(ForceId, ForceField)>,
    // Slot for `ForceId::DEFAULT_GRAVITY`; `None` once removed.
    default_gravity: Option<ForceField>,
    gravity: f32,
    next_body_id: u64,
    next_force_id: u64,

    // Contacts recorded by the last step
    contacts: Vec<Contact>,
    last_pairs_tested: usize,
    last_pair_contacts: usize,

    last_timing: Option<StepTiming>,
}

impl PhysicsWorldApi for PhysicsWorld {
    fn new(cfg: WorldConfig) -> Self {
        let gravity = cfg.gravity;
        Self {
            cfg,
            step_counter: 0,
            bodies: Vec::new(),
            forces: Vec::new(),
            default_gravity: Some(ForceField::gravity(gravity)),
            gravity,
            next_body_id: 0,
            next_force_id: ForceId::DEFAULT_GRAVITY.0 + 1,
            contacts: Vec::new(),
            last_pairs_tested: 0,
            last_pair_contacts: 0,
            last_timing: None,
        }
    }

    fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.next_body_id);
        self.next_body_id += 1;
        if !body.is_static() && body.mass() <= 0.0 {
            warn!("body {:?} is dynamic with non-positive mass {}", id, body.mass());
        }
        debug!("add body {:?} at {:?} size {:?}", id, body.position(), body.size());
        self.bodies.push((id, body));
        id
    }

    fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let idx = self.bodies.iter().position(|(bid, _)| *bid == id)?;
        debug!("remove body {:?}", id);
        Some(self.bodies.remove(idx).1)
    }

    fn add_force(&mut self, field: ForceField) -> ForceId {
        let id = ForceId(self.next_force_id);
        self.next_force_id += 1;
        debug!("add force {:?}: {:?}", id, field.kind());
        self.forces.push((id, field));
        id
    }

    fn remove_force(&mut self, id: ForceId) -> Option<ForceField> {
        if id == ForceId::DEFAULT_GRAVITY {
            let removed = self.default_gravity.take();
            if removed.is_some() {
                debug!("detached default gravity");
            }
            return removed;
        }
        let idx = self.forces.iter().position(|(fid, _)| *fid == id)?;
        debug!("remove force {:?}", id);
        Some(self.forces.remove(idx).1)
    }

    fn register(&mut self, object: &mut dyn HasPhysicsBody) -> BodyId {
        let id = self.add_body(object.physics_body());
        object.attach_body(id);
        id
    }

    fn unregister(&mut self, object: &dyn HasPhysicsBody) -> Option<Body> {
        self.remove_body(object.body_id()?)
    }

    fn step(&mut self, dt: f32) {
        let timed = self.cfg.enable_timing;
        let t_all = timed.then(Instant::now);
        self.contacts.clear();
        self.step_counter = self.step_counter.wrapping_add(1);

        let t0 = timed.then(Instant::now);
        self.accumulate_forces();
        let forces_ms = elapsed_ms(t0);

        let t1 = timed.then(Instant::now);
        for (_, body) in self.bodies.iter_mut() {
            body.integrate(dt);
        }
        let integrate_ms = elapsed_ms(t1);

        let t2 = timed.then(Instant::now);
        self.resolve_collisions();
        let collide_ms = elapsed_ms(t2);

        let t3 = timed.then(Instant::now);
        self.clamp_to_bounds();
        let bounds_ms = elapsed_ms(t3);

        self.last_timing = t_all.map(|t| StepTiming {
            step_ms: t.elapsed().as_secs_f64() * 1000.0,
            forces_ms,
            integrate_ms,
            collide_ms,
            bounds_ms,
        });
        trace!(
            "step {} dt={} bodies={} pairs={} pair_contacts={} contacts={}",
            self.step_counter,
            dt,
            self.bodies.len(),
            self.last_pairs_tested,
            self.last_pair_contacts,
            self.contacts.len()
        );
    }

    fn set_gravity(&mut self, strength: f32) {
        self.gravity = strength;
        match self.default_gravity.as_mut() {
            Some(field) => {
                if let ForceKind::Gravity { direction } = *field.kind() {
                    field.set_gravity_vector(Vec2::new(direction.x, strength));
                }
                debug!("gravity set to {}", strength);
            }
            None => warn!("gravity set to {} but the default gravity field was removed", strength),
        }
    }

    fn gravity(&self) -> f32 {
        self.gravity
    }

    fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|(bid, _)| *bid == id).map(|(_, b)| b)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|(bid, _)| *bid == id).map(|(_, b)| b)
    }

    fn force(&self, id: ForceId) -> Option<&ForceField> {
        if id == ForceId::DEFAULT_GRAVITY {
            return self.default_gravity.as_ref();
        }
        self.forces.iter().find(|(fid, _)| *fid == id).map(|(_, f)| f)
    }

    fn force_mut(&mut self, id: ForceId) -> Option<&mut ForceField> {
        if id == ForceId::DEFAULT_GRAVITY {
            return self.default_gravity.as_mut();
        }
        self.forces.iter_mut().find(|(fid, _)| *fid == id).map(|(_, f)| f)
    }

    fn bodies(&self) -> Vec<Body> {
        self.bodies.iter().map(|(_, b)| b.clone()).collect()
    }

    fn body_ids(&self) -> Vec<BodyId> {
        self.bodies.iter().map(|(id, _)| *id).collect()
    }

    fn drain_contacts(&mut self) -> Vec<Contact> {
        std::mem::take(&mut self.contacts)
    }

    fn query_point(&self, p: Vec2) -> Vec<BodyId> {
        self.bodies
            .iter()
            .filter(|(_, b)| Narrowphase::overlap_point_rect(p, &b.bounds_rect()))
            .map(|(id, _)| *id)
            .collect()
    }

    fn query_rect(&self, rect: Rect) -> Vec<BodyId> {
        self.bodies
            .iter()
            .filter(|(_, b)| Narrowphase::overlap_rect_rect(&b.bounds_rect(), &rect))
            .map(|(id, _)| *id)
            .collect()
    }

    fn raycast(&self, origin: Vec2, dir: Vec2, max_t: f32) -> Option<RayHit> {
        if dir.length_squared() == 0.0 {
            return None;
        }
        let mut best: Option<RayHit> = None;
        for (id, body) in &self.bodies {
            let Some((toi, normal)) = Narrowphase::ray_rect(origin, dir, &body.bounds_rect()) else {
                continue;
            };
            if toi > max_t {
                continue;
            }
            if best.as_ref().is_none_or(|b| toi < b.toi) {
                best = Some(RayHit {
                    body: *id,
                    toi,
                    normal,
                    point: origin + dir * toi,
                });
            }
        }
        best
    }
}

impl PhysicsWorld {
    /// World with default configuration and the given bounds.
    pub fn with_bounds(width: f32, height: f32) -> Self {
        <Self as PhysicsWorldApi>::new(WorldConfig::with_bounds(width, height))
    }

    /// Configuration fixed at construction.
    pub fn config(&self) -> &WorldConfig {
        &self.cfg
    }

    pub fn width(&self) -> f32 {
        self.cfg.width
    }

    pub fn height(&self) -> f32 {
        self.cfg.height
    }

    fn accumulate_forces(&mut self) {
        let Self {
            bodies,
            forces,
            default_gravity,
            ..
        } = self;
        for (_, body) in bodies.iter_mut() {
            if body.is_static() {
                continue;
            }
            for field in default_gravity.iter().chain(forces.iter().map(|(_, f)| f)) {
                if !field.is_active() {
                    continue;
                }
                let force = field.calculate(body);
                body.apply_force(force);
            }
        }
    }

    fn resolve_collisions(&mut self) {
        let n = self.bodies.len();
        let max_contacts = self.cfg.max_contacts;
        let mut pair_contacts = 0;

        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.bodies.split_at_mut(j);
                let (id_a, a) = &mut head[i];
                let (id_b, b) = &mut tail[0];
                if !a.collides_with(b) {
                    continue;
                }
                if a.is_static() && b.is_static() {
                    continue;
                }
                let Some(sep) = Narrowphase::separation(&a.bounds_rect(), &b.bounds_rect()) else {
                    continue;
                };
                let axis = resolve_pair(a, b, sep.correction);
                pair_contacts += 1;
                trace!(
                    "contact {:?}/{:?} side={:?} depth={} axis={:?}",
                    id_a, id_b, sep.side, sep.depth, axis
                );
                push_contact(
                    &mut self.contacts,
                    max_contacts,
                    Contact {
                        kind: ContactKind::Body,
                        a: *id_a,
                        b: Some(*id_b),
                        correction: sep.correction,
                        axis,
                    },
                );
            }
        }

        self.last_pairs_tested = n * n.saturating_sub(1) / 2;
        self.last_pair_contacts = pair_contacts;
    }

    fn clamp_to_bounds(&mut self) {
        let (width, height) = (self.cfg.width, self.cfg.height);
        let max_contacts = self.cfg.max_contacts;

        for (id, body) in self.bodies.iter_mut() {
            if body.is_static() {
                continue;
            }
            let id = *id;
            let size = body.size();
            let contacts = &mut self.contacts;

            // Floor, with ground friction on the tangential velocity
            if body.position().y + size.y > height {
                let target = Vec2::new(body.position().x, height - size.y);
                snap_to_boundary(contacts, max_contacts, id, body, ContactKind::Floor, target);
                body.set_velocity_y(-body.velocity().y * body.restitution());
                body.set_velocity_x(body.velocity().x * (1.0 - body.friction()));
            }

            if body.position().y < 0.0 {
                let target = Vec2::new(body.position().x, 0.0);
                snap_to_boundary(contacts, max_contacts, id, body, ContactKind::Ceiling, target);
                body.set_velocity_y(-body.velocity().y * body.restitution());
            }

            if body.position().x < 0.0 {
                let target = Vec2::new(0.0, body.position().y);
                snap_to_boundary(contacts, max_contacts, id, body, ContactKind::LeftWall, target);
                body.set_velocity_x(-body.velocity().x * body.restitution());
            }

            if body.position().x + size.x > width {
                let target = Vec2::new(width - size.x, body.position().y);
                snap_to_boundary(contacts, max_contacts, id, body, ContactKind::RightWall, target);
                body.set_velocity_x(-body.velocity().x * body.restitution());
            }
        }
    }

    /// Return debug stats for the world and its last step.
    pub fn debug_stats(&self) -> WorldStats {
        let fields = || self.default_gravity.iter().chain(self.forces.iter().map(|(_, f)| f));
        WorldStats {
            bodies: self.bodies.len(),
            static_bodies: self.bodies.iter().filter(|(_, b)| b.is_static()).count(),
            forces: fields().count(),
            active_forces: fields().filter(|f| f.is_active()).count(),
            pairs_tested: self.last_pairs_tested,
            pair_contacts: self.last_pair_contacts,
        }
    }

    /// Return timing breakdown for the last `step` (when enabled).
    pub fn timing(&self) -> Option<StepTiming> {
        self.last_timing
    }
}

/// Positional correction then velocity response for one overlapping pair.
fn resolve_pair(a: &mut Body, b: &mut Body, correction: Vec2) -> Axis {
    match (a.is_static(), b.is_static()) {
        (false, false) => {
            a.nudge(correction * 0.5);
            b.nudge(-correction * 0.5);
        }
        (false, true) => a.nudge(correction),
        (true, false) => b.nudge(-correction),
        (true, true) => {}
    }

    let axis = if correction.x.abs() > correction.y.abs() {
        Axis::Horizontal
    } else {
        Axis::Vertical
    };
    let (va, vb) = match axis {
        Axis::Horizontal => (a.velocity().x, b.velocity().x),
        Axis::Vertical => (a.velocity().y, b.velocity().y),
    };
    let (na, nb) = match (a.is_static(), b.is_static()) {
        (false, false) => {
            let (na, nb) = Narrowphase::elastic_1d(va, a.mass(), vb, b.mass());
            (na * a.restitution(), nb * b.restitution())
        }
        (false, true) => (-va * a.restitution(), vb),
        (true, false) => (va, -vb * b.restitution()),
        (true, true) => (va, vb),
    };
    match axis {
        Axis::Horizontal => {
            a.set_velocity_x(na);
            b.set_velocity_x(nb);
        }
        Axis::Vertical => {
            a.set_velocity_y(na);
            b.set_velocity_y(nb);
        }
    }
    axis
}

fn snap_to_boundary(
    contacts: &mut Vec<Contact>,
    max_contacts: usize,
    id: BodyId,
    body: &mut Body,
    kind: ContactKind,
    target: Vec2,
) {
    let axis = match kind {
        ContactKind::LeftWall | ContactKind::RightWall => Axis::Horizontal,
        _ => Axis::Vertical,
    };
    let correction = target - body.position();
    body.set_position(target);
    push_contact(contacts, max_contacts, Contact { kind, a: id, b: None, correction, axis });
}

fn push_contact(buf: &mut Vec<Contact>, max: usize, contact: Contact) {
    if buf.len() < max {
        buf.push(contact);
    }
}

fn elapsed_ms(t: Option<Instant>) -> f64 {
    t.map(|t| t.elapsed().as_secs_f64() * 1000.0).unwrap_or(0.0)
}
