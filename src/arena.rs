use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ultraviolet::DVec2;

use crate::{
    body::{Body, Bounds, Rgb, ShapeKind},
    config::ArenaConfig,
    error::RestoreError,
    persist,
    utils::{self, RandomSource},
};

/// Handle to a body placed in an [`Arena`]. Unique for the lifetime of the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

impl BodyId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// What gets painted behind the bodies, inside the arena bounds.
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    Solid(Rgb),
    /// Vertical gradient from the first color (top) to the second (bottom).
    Gradient(Rgb, Rgb),
    Image(PathBuf),
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Rgb::WHITE)
    }
}

#[derive(Clone, Debug)]
struct Occupant {
    id: BodyId,
    body: Body,
}

/// Outcome of testing one pair during [`Arena::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Contact {
    /// Not touching, or exactly co-located.
    Clear,
    /// Approaching and overlapping: impulse and separation applied.
    Resolved,
    /// Overlapping but already moving apart. Ends the advancing body's sweep.
    Separating,
}

/// Owns the fixed-capacity body population and the playable region.
#[derive(Clone, Debug)]
pub struct Arena {
    /// Playable region, inset from the viewport by [`Arena::MARGIN`].
    bounds: Bounds,
    viewport: (u32, u32),
    /// One entry per slot; `None` marks an empty slot.
    slots: Vec<Option<Occupant>>,
    background: Background,
    /// Inset used when spawning bodies across the viewport.
    pub spawn_margin: u32,
    /// Completed ticks.
    pub tick: u64,
    next_id: u64,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

impl Arena {
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 600;
    pub const DEFAULT_CAPACITY: usize = 20;
    pub const DEFAULT_SPAWN_MARGIN: u32 = 50;
    /// Largest slot count an arena will allocate.
    pub const MAX_CAPACITY: usize = 4096;
    /// Gap between the viewport edge and the playable region, on every side.
    pub const MARGIN: f64 = 30.0;

    /// Empty arena for a `width` x `height` viewport with the default capacity.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_capacity(width, height, Self::DEFAULT_CAPACITY)
    }

    /// Capacity is clamped to [`Arena::MAX_CAPACITY`].
    pub fn with_capacity(width: u32, height: u32, capacity: usize) -> Self {
        let capacity = clamp_capacity(capacity);
        Self {
            bounds: Self::inset(width, height),
            viewport: (width, height),
            slots: empty_slots(capacity),
            background: Background::default(),
            spawn_margin: Self::DEFAULT_SPAWN_MARGIN,
            tick: 0,
            next_id: 0,
        }
    }

    pub fn from_config(config: &ArenaConfig) -> Self {
        let mut arena = Self::with_capacity(config.width, config.height, config.capacity);
        arena.spawn_margin = config.spawn_margin;
        arena
    }

    fn inset(width: u32, height: u32) -> Bounds {
        let m = Self::MARGIN;
        Bounds::new(
            m,
            m,
            (width as f64 - 2.0 * m).max(0.0),
            (height as f64 - 2.0 * m).max(0.0),
        )
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Recomputes the playable region for a new viewport.
    /// Bodies are left where they are; containment catches up on the next tick.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.bounds = Self::inset(width, height);
        log::debug!("arena resized to {width}x{height}, bounds {:?}", self.bounds);
    }

    /// Advances every occupied slot once, in slot order.
    pub fn update(&mut self) {
        for index in 0..self.slots.len() {
            if self.slots[index].is_some() {
                self.advance(index);
            }
        }
        self.tick += 1;
    }

    /// Moves the body in slot `index` one tick and resolves its contacts.
    ///
    /// The body integrates, bounces off the walls, then is tested against every
    /// other occupied slot in order. Colliding bodies are pushed directly, so a
    /// pair is seen twice per [`Arena::update`]. The sweep stops at the first
    /// overlapping pair that is already separating.
    pub fn advance(&mut self, index: usize) {
        let bounds = self.bounds;
        let Some(Some(occupant)) = self.slots.get_mut(index) else {
            return;
        };

        let body = &mut occupant.body;
        if !body.is_moving() {
            return;
        }
        body.integrate();
        body.contain(&bounds);

        for other in 0..self.slots.len() {
            if other == index {
                continue;
            }
            let Some((this, that)) = self.pair_mut(index, other) else {
                continue;
            };
            if collide(this, that) == Contact::Separating {
                return;
            }
        }
    }

    /// Mutable access to two distinct occupied slots at once.
    fn pair_mut(&mut self, i: usize, j: usize) -> Option<(&mut Body, &mut Body)> {
        debug_assert_ne!(i, j);
        let (a, b) = if i < j {
            let (lo, hi) = self.slots.split_at_mut(j);
            (&mut lo[i], &mut hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(i);
            (&mut hi[0], &mut lo[j])
        };
        match (a, b) {
            (Some(a), Some(b)) => Some((&mut a.body, &mut b.body)),
            _ => None,
        }
    }

    /// Slot count, occupied or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Every slot in storage order, `None` for empty ones.
    pub fn slots(&self) -> impl Iterator<Item = Option<&Body>> + '_ {
        self.slots.iter().map(|slot| slot.as_ref().map(|o| &o.body))
    }

    /// Occupied slots in storage order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> + '_ {
        self.slots.iter().flatten().map(|o| (o.id, &o.body))
    }

    pub fn bodies_mut(&mut self) -> impl Iterator<Item = &mut Body> + '_ {
        self.slots.iter_mut().flatten().map(|o| &mut o.body)
    }

    pub fn body_at(&self, index: usize) -> Option<&Body> {
        self.slots.get(index)?.as_ref().map(|o| &o.body)
    }

    pub fn body_at_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.slots.get_mut(index)?.as_mut().map(|o| &mut o.body)
    }

    pub fn id_at(&self, index: usize) -> Option<BodyId> {
        self.slots.get(index)?.as_ref().map(|o| o.id)
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|o| o.id == id))
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.body_at(self.index_of(id)?)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let index = self.index_of(id)?;
        self.body_at_mut(index)
    }

    /// Places `body` in the first empty slot. A full arena drops it and returns `None`.
    pub fn add(&mut self, body: Body) -> Option<BodyId> {
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_none()) else {
            log::debug!("arena full ({} slots), dropping body", self.slots.len());
            return None;
        };
        let id = BodyId(self.next_id);
        self.next_id += 1;
        *slot = Some(Occupant { id, body });
        Some(id)
    }

    /// Empties the slot holding `id`. The slot itself stays, so capacity is unchanged.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let index = self.index_of(id)?;
        self.slots[index].take().map(|o| o.body)
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Replaces the slot collection with `capacity` empty slots, discarding every body.
    /// Capacity is clamped to [`Arena::MAX_CAPACITY`].
    pub fn set_capacity(&mut self, capacity: usize) {
        let capacity = clamp_capacity(capacity);
        log::debug!(
            "arena capacity {} -> {capacity}, dropping {} bodies",
            self.slots.len(),
            self.len()
        );
        self.slots = empty_slots(capacity);
    }

    /// Clears the arena and fills every slot with a randomized body of `shape`.
    pub fn populate(&mut self, rng: &mut impl RandomSource, shape: ShapeKind) {
        self.clear();
        let (width, height) = self.viewport;
        for body in utils::scatter(rng, self.slots.len(), shape, width, height, self.spawn_margin) {
            self.add(body);
        }
    }

    pub fn toggle_acceleration_all(&mut self, rng: &mut impl RandomSource) {
        for body in self.bodies_mut() {
            body.toggle_acceleration(rng);
        }
    }

    pub fn disable_acceleration_all(&mut self) {
        self.bodies_mut().for_each(Body::disable_acceleration);
    }

    pub fn set_background_color(&mut self, color: Rgb) {
        self.background = Background::Solid(color);
    }

    pub fn set_background_gradient(&mut self, top: Rgb, bottom: Rgb) {
        self.background = Background::Gradient(top, bottom);
    }

    /// Switches to an image background if `path` exists. Otherwise nothing changes.
    pub fn set_background_image(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if !path.is_file() {
            log::warn!("background image '{}' not found, keeping current background", path.display());
            return false;
        }
        self.background = Background::Image(path.to_path_buf());
        true
    }

    /// Velocity kick applied to every body whose center lies within `radius` of `center`.
    ///
    /// Rejected as a whole, returning `false`, if any input is non-finite or any
    /// affected velocity would stop being finite.
    pub fn apply_impulse(&mut self, center: DVec2, impulse: DVec2, radius: f64) -> bool {
        let inputs = [center.x, center.y, impulse.x, impulse.y, radius];
        if !inputs.iter().all(|v| v.is_finite()) {
            log::warn!("rejected impulse {impulse:?} at {center:?} radius {radius}: non-finite input");
            return false;
        }

        let r_sq = radius * radius;
        let hit = |body: &Body| (body.pos - center).mag_sq() < r_sq;
        let overflows = self.bodies().any(|(_, body)| {
            let vel = body.vel + impulse;
            hit(body) && !(vel.x.is_finite() && vel.y.is_finite())
        });
        if overflows {
            log::warn!("rejected impulse {impulse:?}: velocity would overflow");
            return false;
        }

        for body in self.bodies_mut() {
            if hit(body) {
                body.vel += impulse;
            }
        }
        true
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        persist::population_to_json(self.slots())
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("saved {} bodies to '{}'", self.len(), path.display());
        Ok(())
    }

    /// Replaces the population with the bodies in `json`.
    /// Nothing changes if any record is invalid. Returns how many bodies found a slot.
    pub fn load_json(&mut self, json: &str) -> Result<usize, RestoreError> {
        let bodies = persist::population_from_json(json)?;
        Ok(self.replace_population(bodies))
    }

    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, RestoreError> {
        let path = path.as_ref();
        let bodies = persist::read_population(path)?;
        let placed = self.replace_population(bodies);
        log::info!("loaded {placed} bodies from '{}'", path.display());
        Ok(placed)
    }

    fn replace_population(&mut self, bodies: Vec<Body>) -> usize {
        self.clear();
        let total = bodies.len();
        let placed = bodies.into_iter().filter_map(|b| self.add(b)).count();
        if placed < total {
            log::debug!("{} restored bodies did not fit", total - placed);
        }
        placed
    }
}

fn clamp_capacity(capacity: usize) -> usize {
    if capacity > Arena::MAX_CAPACITY {
        log::warn!("capacity {capacity} exceeds {}, clamping", Arena::MAX_CAPACITY);
    }
    capacity.min(Arena::MAX_CAPACITY)
}

fn empty_slots(capacity: usize) -> Vec<Option<Occupant>> {
    (0..capacity).map(|_| None).collect()
}

/// Resolves contact between `a` (the advancing body) and `b`.
///
/// Bodies are treated as disks of radius `size`. Coincident centers never collide.
fn collide(a: &mut Body, b: &mut Body) -> Contact {
    let d = a.pos - b.pos;
    let distance = d.mag();
    let min_distance = a.size() + b.size();

    if !(distance < min_distance && distance > 0.0) {
        return Contact::Clear;
    }

    let n = d / distance;
    let vn = (a.vel - b.vel).dot(n);
    if vn >= 0.0 {
        return Contact::Separating;
    }

    let j = 2.0 * vn / (a.mass() + b.mass());
    a.vel -= n * (j * b.mass());
    b.vel += n * (j * a.mass());

    // Split the overlap evenly so the pair does not sink into each other.
    let correction = (min_distance - distance) / 2.0;
    a.pos += n * correction;
    b.pos -= n * correction;

    Contact::Resolved
}
