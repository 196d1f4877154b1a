//! Persistence boundary for bodies and whole populations.
//!
//! A body is stored as a flat [`BodyRecord`] holding every field needed to rebuild
//! it exactly. A population is a JSON array with one entry per slot, `null` for
//! empty slots:
//!
//! ```json
//! [
//!   {
//!     "PositionX": 10.0, "PositionY": 20.0,
//!     "VelocityX": 1.0, "VelocityY": -1.0,
//!     "AccelerationX": 0.0, "AccelerationY": 0.0,
//!     "ColorR": 255, "ColorG": 0, "ColorB": 0,
//!     "BorderThickness": 2.0, "Size": 15.0,
//!     "IsMoving": true, "IsAccelerating": false,
//!     "Type": "Circle", "Mass": 2.0
//!   },
//!   null
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use ultraviolet::DVec2;

use crate::body::{Body, Rgb, ShapeKind};
use crate::error::RestoreError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BodyRecord {
    pub position_x: f64,
    pub position_y: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub acceleration_x: f64,
    pub acceleration_y: f64,
    pub color_r: i64,
    pub color_g: i64,
    pub color_b: i64,
    pub border_thickness: f64,
    pub size: f64,
    pub is_moving: bool,
    pub is_accelerating: bool,
    #[serde(rename = "Type")]
    pub shape: ShapeKind,
    pub mass: f64,
}

impl From<&Body> for BodyRecord {
    fn from(body: &Body) -> Self {
        Self {
            position_x: body.pos.x,
            position_y: body.pos.y,
            velocity_x: body.vel.x,
            velocity_y: body.vel.y,
            acceleration_x: body.acc.x,
            acceleration_y: body.acc.y,
            color_r: body.color.r.into(),
            color_g: body.color.g.into(),
            color_b: body.color.b.into(),
            border_thickness: body.border_thickness,
            size: body.size(),
            is_moving: body.is_moving(),
            is_accelerating: body.is_accelerating(),
            shape: body.shape(),
            mass: body.mass(),
        }
    }
}

impl TryFrom<BodyRecord> for Body {
    type Error = RestoreError;

    fn try_from(record: BodyRecord) -> Result<Self, Self::Error> {
        record.restore()
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, RestoreError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RestoreError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, RestoreError> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(RestoreError::NonPositive { field, value })
    }
}

fn channel(channel: &'static str, value: i64) -> Result<u8, RestoreError> {
    u8::try_from(value).map_err(|_| RestoreError::ColorOutOfRange { channel, value })
}

impl BodyRecord {
    /// Rebuilds the body verbatim. Nothing is defaulted or clamped: an invalid
    /// physical field rejects the whole record.
    pub fn restore(&self) -> Result<Body, RestoreError> {
        let pos = DVec2::new(
            finite("PositionX", self.position_x)?,
            finite("PositionY", self.position_y)?,
        );
        let vel = DVec2::new(
            finite("VelocityX", self.velocity_x)?,
            finite("VelocityY", self.velocity_y)?,
        );
        let acc = DVec2::new(
            finite("AccelerationX", self.acceleration_x)?,
            finite("AccelerationY", self.acceleration_y)?,
        );
        let color = Rgb::new(
            channel("ColorR", self.color_r)?,
            channel("ColorG", self.color_g)?,
            channel("ColorB", self.color_b)?,
        );

        let border_thickness = finite("BorderThickness", self.border_thickness)?;
        if border_thickness < 0.0 {
            return Err(RestoreError::Negative {
                field: "BorderThickness",
                value: border_thickness,
            });
        }

        let size = positive("Size", self.size)?;
        let mass = positive("Mass", self.mass)?;

        Ok(Body::from_parts(
            pos,
            vel,
            acc,
            color,
            border_thickness,
            size,
            self.is_accelerating,
            self.is_moving,
            mass,
            self.shape,
        ))
    }
}

/// Serializes one entry per slot, `null` for empty slots.
pub fn population_to_json<'a>(
    slots: impl IntoIterator<Item = Option<&'a Body>>,
) -> Result<String, serde_json::Error> {
    let records: Vec<Option<BodyRecord>> = slots
        .into_iter()
        .map(|slot| slot.map(BodyRecord::from))
        .collect();
    serde_json::to_string_pretty(&records)
}

/// Parses a population. Empty slots are skipped; any invalid record fails the whole load.
pub fn population_from_json(json: &str) -> Result<Vec<Body>, RestoreError> {
    let records: Vec<Option<BodyRecord>> = serde_json::from_str(json)?;
    records
        .into_iter()
        .flatten()
        .map(|record| record.restore())
        .collect()
}

pub fn read_population(path: impl AsRef<Path>) -> Result<Vec<Body>, RestoreError> {
    let json = fs::read_to_string(path.as_ref())?;
    population_from_json(&json)
}
