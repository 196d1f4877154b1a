//! Draw dispatch. The core only describes what to paint; a [`Canvas`]
//! implementation does the rasterizing.

use ultraviolet::DVec2;

use crate::arena::{Arena, Background};
use crate::body::{Body, Bounds, Rgb, ShapeKind};

/// Outline of one body in screen coordinates (y grows downward).
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Ellipse inscribed in the box.
    Ellipse(Bounds),
    Rectangle(Bounds),
    /// Closed polygon, vertices in drawing order.
    Polygon(Vec<DVec2>),
}

/// Outline for `shape` centered on `pos` with half-extent `size`.
pub fn geometry(shape: ShapeKind, pos: DVec2, size: f64) -> Geometry {
    let bb = Bounds::new(pos.x - size, pos.y - size, size * 2.0, size * 2.0);
    match shape {
        ShapeKind::Circle => Geometry::Ellipse(bb),
        ShapeKind::Square => Geometry::Rectangle(bb),
        ShapeKind::Triangle => Geometry::Polygon(vec![
            DVec2::new(pos.x, pos.y - size),
            DVec2::new(pos.x - size, pos.y + size),
            DVec2::new(pos.x + size, pos.y + size),
        ]),
        ShapeKind::Hexagon => Geometry::Polygon(
            (0..6)
                .map(|i| {
                    let (sin, cos) = (i as f64 * std::f64::consts::PI / 3.0).sin_cos();
                    DVec2::new(pos.x + size * cos, pos.y + size * sin)
                })
                .collect(),
        ),
    }
}

/// Everything a renderer needs for one body.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeDraw {
    pub kind: ShapeKind,
    pub geometry: Geometry,
    pub fill: Rgb,
    pub stroke: Rgb,
    pub stroke_width: f64,
}

impl ShapeDraw {
    /// Border color is fixed regardless of fill.
    pub const STROKE: Rgb = Rgb::BLACK;

    pub fn of(body: &Body) -> Self {
        Self {
            kind: body.shape(),
            geometry: geometry(body.shape(), body.pos, body.size()),
            fill: body.color,
            stroke: Self::STROKE,
            stroke_width: body.border_thickness,
        }
    }
}

/// Renderer collaborator. Calls arrive back to front.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Bounds, color: Rgb);
    fn fill_background(&mut self, rect: Bounds, background: &Background);
    fn draw_shape(&mut self, shape: &ShapeDraw);
}

impl Arena {
    /// Color of the frame painted around the playable region.
    pub const FRAME_COLOR: Rgb = Rgb::DIM_GRAY;

    /// Frame, then background, then every occupied body in slot order.
    pub fn draw(&self, canvas: &mut impl Canvas) {
        let bounds = self.bounds();
        canvas.fill_rect(
            Bounds::new(-3.0, -3.0, bounds.width + 63.0, bounds.height + 63.0),
            Self::FRAME_COLOR,
        );
        canvas.fill_background(bounds, self.background());
        for (_, body) in self.bodies() {
            canvas.draw_shape(&ShapeDraw::of(body));
        }
    }
}
