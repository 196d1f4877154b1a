use serde::{Deserialize, Serialize};
use ultraviolet::DVec2;

use crate::utils::RandomSource;

/// Outline drawn for a body. Physics treats every kind as a disk of radius `size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Triangle,
    Square,
    Hexagon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Square,
        ShapeKind::Hexagon,
    ];
}

/// 8-bit RGB color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const DIM_GRAY: Rgb = Rgb::new(105, 105, 105);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned rectangle, `x`/`y` being the top-left corner (y grows downward).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A moving shape in the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Center position.
    pub pos: DVec2,
    /// Displacement per tick.
    pub vel: DVec2,
    /// Velocity delta per tick, only applied while accelerating.
    pub acc: DVec2,
    pub color: Rgb,
    pub border_thickness: f64,
    size: f64,
    mass: f64,
    moving: bool,
    accelerating: bool,
    shape: ShapeKind,
}

impl Body {
    /// Mass given to every randomly spawned body.
    pub const SPAWN_MASS: f64 = 2.0;

    /// Spawns a body at `pos` with random speed, heading, color, border and size.
    ///
    /// Draws are consumed in a fixed order: speed, heading, red, green, blue,
    /// border thickness, size.
    pub fn random(pos: DVec2, shape: ShapeKind, rng: &mut impl RandomSource) -> Self {
        let speed = rng.unit() * 7.0 + 1.0;
        let angle = rng.unit() * std::f64::consts::TAU;
        let (sin, cos) = angle.sin_cos();

        let r = rng.range(0, 256) as u8;
        let g = rng.range(0, 256) as u8;
        let b = rng.range(0, 256) as u8;

        let border_thickness = rng.unit() * 3.0 + 1.0;
        let size = rng.unit() * 30.0 + 10.0;

        Self {
            pos,
            vel: DVec2::new(speed * cos, speed * sin),
            acc: DVec2::zero(),
            color: Rgb::new(r, g, b),
            border_thickness,
            size,
            mass: Self::SPAWN_MASS,
            moving: true,
            accelerating: false,
            shape,
        }
    }

    /// Rebuilds a body from already validated fields.
    /// Validation lives at the persistence boundary, see [`crate::persist::BodyRecord`].
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        pos: DVec2,
        vel: DVec2,
        acc: DVec2,
        color: Rgb,
        border_thickness: f64,
        size: f64,
        accelerating: bool,
        moving: bool,
        mass: f64,
        shape: ShapeKind,
    ) -> Self {
        Self {
            pos,
            vel,
            acc,
            color,
            border_thickness,
            size,
            mass,
            moving,
            accelerating,
            shape,
        }
    }

    /// Collision radius and bounding box half-extent.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Frozen bodies skip integration but still act as obstacles.
    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }

    pub fn is_accelerating(&self) -> bool {
        self.accelerating
    }

    /// Picks a fresh small random acceleration and starts applying it.
    pub fn toggle_acceleration(&mut self, rng: &mut impl RandomSource) {
        let magnitude = rng.unit() * 0.5 - 0.1;
        let angle = rng.unit() * std::f64::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        self.acc = DVec2::new(magnitude * cos, magnitude * sin);
        self.accelerating = true;
    }

    pub fn disable_acceleration(&mut self) {
        self.acc = DVec2::zero();
        self.accelerating = false;
    }

    /// Axis-aligned box of half-extent `size` around the center.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.pos.x - self.size,
            self.pos.y - self.size,
            self.size * 2.0,
            self.size * 2.0,
        )
    }

    /// Explicit Euler step with a unit time step.
    /// The caller is responsible for skipping frozen bodies.
    pub fn integrate(&mut self) {
        if self.accelerating {
            self.vel += self.acc;
        }
        self.pos += self.vel;
    }

    /// Clamps the body back inside `area` and reflects velocity on each violated edge.
    ///
    /// The bounding box is taken once up front; the four edges are then tested
    /// independently against it in the order left, right, top, bottom.
    pub fn contain(&mut self, area: &Bounds) {
        let bb = self.bounds();

        if bb.left() < area.left() {
            self.pos.x = area.left() + self.size;
            self.vel.x = -self.vel.x;
        }
        if bb.right() > area.right() {
            self.pos.x = area.right() - self.size;
            self.vel.x = -self.vel.x;
        }
        if bb.top() < area.top() {
            self.pos.y = area.top() + self.size;
            self.vel.y = -self.vel.y;
        }
        if bb.bottom() > area.bottom() {
            self.pos.y = area.bottom() - self.size;
            self.vel.y = -self.vel.y;
        }
    }
}
