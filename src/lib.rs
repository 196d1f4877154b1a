pub mod arena;
pub mod body;
pub mod config;
pub mod error;
pub mod persist;
pub mod render;
pub mod utils;
pub mod c_api;

pub use arena::{Arena, Background, BodyId};
pub use body::{Body, Bounds, Rgb, ShapeKind};
pub use config::ArenaConfig;
pub use error::{ConfigError, RestoreError};
pub use persist::BodyRecord;
pub use render::{Canvas, Geometry, ShapeDraw};
pub use utils::RandomSource;
