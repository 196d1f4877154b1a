#![allow(dead_code)]

use std::collections::VecDeque;

use bounce_arena::{Body, BodyRecord, RandomSource, ShapeKind};

/// Black circle with border 1, moving and not accelerating.
pub fn body(x: f64, y: f64, vx: f64, vy: f64, size: f64, mass: f64) -> Body {
    record(x, y, vx, vy, size, mass).restore().unwrap()
}

pub fn record(x: f64, y: f64, vx: f64, vy: f64, size: f64, mass: f64) -> BodyRecord {
    BodyRecord {
        position_x: x,
        position_y: y,
        velocity_x: vx,
        velocity_y: vy,
        acceleration_x: 0.0,
        acceleration_y: 0.0,
        color_r: 0,
        color_g: 0,
        color_b: 0,
        border_thickness: 1.0,
        size,
        is_moving: true,
        is_accelerating: false,
        shape: ShapeKind::Circle,
        mass,
    }
}

/// Replays fixed draws so construction output can be asserted exactly.
pub struct Scripted {
    units: VecDeque<f64>,
    ints: VecDeque<i32>,
}

impl Scripted {
    pub fn new(units: &[f64], ints: &[i32]) -> Self {
        Self {
            units: units.iter().copied().collect(),
            ints: ints.iter().copied().collect(),
        }
    }

    pub fn exhausted(&self) -> bool {
        self.units.is_empty() && self.ints.is_empty()
    }
}

impl RandomSource for Scripted {
    fn unit(&mut self) -> f64 {
        self.units.pop_front().expect("script ran out of unit draws")
    }

    fn range(&mut self, low: i32, high: i32) -> i32 {
        let v = self.ints.pop_front().expect("script ran out of integer draws");
        assert!((low..high).contains(&v), "{v} outside {low}..{high}");
        v
    }
}
