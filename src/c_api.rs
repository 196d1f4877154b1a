//! C surface for a host application that owns the window, timer and input.
//!
//! The host must not call population functions while `Arena_Update` is running
//! on another thread; nothing here locks.

use crate::{
    arena::Arena,
    body::{Body, Bounds, Rgb, ShapeKind},
    persist::BodyRecord,
    utils,
};
use ultraviolet::DVec2;

/// Flat copy of one body for the host's renderer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct BodySnapshot {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub mass: f64,
    pub border_thickness: f64,
    pub color: Rgb,
    /// 0 circle, 1 triangle, 2 square, 3 hexagon.
    pub shape: u8,
    pub is_moving: bool,
    pub is_accelerating: bool,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            x: body.pos.x,
            y: body.pos.y,
            vx: body.vel.x,
            vy: body.vel.y,
            size: body.size(),
            mass: body.mass(),
            border_thickness: body.border_thickness,
            color: body.color,
            shape: shape_tag(body.shape()),
            is_moving: body.is_moving(),
            is_accelerating: body.is_accelerating(),
        }
    }
}

fn shape_tag(shape: ShapeKind) -> u8 {
    match shape {
        ShapeKind::Circle => 0,
        ShapeKind::Triangle => 1,
        ShapeKind::Square => 2,
        ShapeKind::Hexagon => 3,
    }
}

fn shape_from_tag(tag: u8) -> ShapeKind {
    ShapeKind::ALL.get(tag as usize).copied().unwrap_or(ShapeKind::Circle)
}

#[unsafe(no_mangle)]
pub extern "C" fn Arena_Create(width: u32, height: u32) -> *mut Arena {
    Box::into_raw(Box::new(Arena::new(width, height)))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_Destroy(handle: *mut Arena) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_Update(handle: *mut Arena) {
    if let Some(arena) = unsafe { handle.as_mut() } {
        arena.update();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_Resize(handle: *mut Arena, width: u32, height: u32) {
    if let Some(arena) = unsafe { handle.as_mut() } {
        arena.resize(width, height);
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_GetBounds(handle: *const Arena) -> Bounds {
    unsafe { handle.as_ref() }.map_or(Bounds::default(), Arena::bounds)
}

/// Fills every slot with random bodies. `shape` uses the same tags as [`BodySnapshot`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_Populate(handle: *mut Arena, seed: u64, shape: u8) {
    if let Some(arena) = unsafe { handle.as_mut() } {
        let mut rng = utils::rng_from_seed(Some(seed));
        arena.populate(&mut rng, shape_from_tag(shape));
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_Clear(handle: *mut Arena) {
    if let Some(arena) = unsafe { handle.as_mut() } {
        arena.clear();
    }
}

/// Negative counts give an empty arena; counts above [`Arena::MAX_CAPACITY`] are clamped.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_SetCapacity(handle: *mut Arena, capacity: i64) {
    if let Some(arena) = unsafe { handle.as_mut() } {
        arena.set_capacity(usize::try_from(capacity.max(0)).unwrap_or(usize::MAX));
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_GetCapacity(handle: *const Arena) -> usize {
    unsafe { handle.as_ref() }.map_or(0, Arena::capacity)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_GetBodyCount(handle: *const Arena) -> usize {
    unsafe { handle.as_ref() }.map_or(0, Arena::len)
}

/// Copies slot `index` into `out`. Returns `false` for empty or out-of-range slots.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_GetBody(
    handle: *const Arena,
    index: usize,
    out: *mut BodySnapshot,
) -> bool {
    let Some(arena) = (unsafe { handle.as_ref() }) else {
        return false;
    };
    let Some(out) = (unsafe { out.as_mut() }) else {
        return false;
    };
    match arena.body_at(index) {
        Some(body) => {
            *out = BodySnapshot::from(body);
            true
        }
        None => false,
    }
}

/// Adds a body with explicit kinematics. Returns `false` if the record is
/// invalid or the arena is full.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_AddBody(
    handle: *mut Arena,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    size: f64,
    mass: f64,
    color: Rgb,
    shape: u8,
) -> bool {
    let Some(arena) = (unsafe { handle.as_mut() }) else {
        return false;
    };
    let record = BodyRecord {
        position_x: x,
        position_y: y,
        velocity_x: vx,
        velocity_y: vy,
        acceleration_x: 0.0,
        acceleration_y: 0.0,
        color_r: color.r.into(),
        color_g: color.g.into(),
        color_b: color.b.into(),
        border_thickness: 1.0,
        size,
        is_moving: true,
        is_accelerating: false,
        shape: shape_from_tag(shape),
        mass,
    };
    match record.restore() {
        Ok(body) => arena.add(body).is_some(),
        Err(e) => {
            log::warn!("rejected body from host: {e}");
            false
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_ToggleAcceleration(handle: *mut Arena, seed: u64) {
    if let Some(arena) = unsafe { handle.as_mut() } {
        let mut rng = utils::rng_from_seed(Some(seed));
        arena.toggle_acceleration_all(&mut rng);
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_DisableAcceleration(handle: *mut Arena) {
    if let Some(arena) = unsafe { handle.as_mut() } {
        arena.disable_acceleration_all();
    }
}

/// Adds `(fx, fy)` to the velocity of every body centered within `radius` of `(x, y)`.
/// Returns `false` and changes nothing for non-finite input.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Arena_ApplyImpulse(
    handle: *mut Arena,
    x: f64,
    y: f64,
    fx: f64,
    fy: f64,
    radius: f64,
) -> bool {
    match unsafe { handle.as_mut() } {
        Some(arena) => arena.apply_impulse(DVec2::new(x, y), DVec2::new(fx, fy), radius),
        None => false,
    }
}
