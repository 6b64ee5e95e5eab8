//! Grouped 2D collision queries over points, axis-aligned rects and circles.
//!
//! Shapes live in [`narrow`], along with the pairwise collision predicates. Registered
//! shapes are grouped and queried through a [`CollisionWorld`], which also performs
//! per-tick motion correction against a group.

pub mod broad;
pub mod error;
pub mod narrow;

pub use broad::{CollisionRecord, CollisionWorld, GroupId, Handle, WorldConfig};
pub use error::CollisionError;
pub use narrow::{collides, Circle, Collide, CollideType, Point, Rect, Shape, ShapeKind};

#[cfg(not(feature = "f64"))]
pub type Fp = f32;
#[cfg(not(feature = "f64"))]
pub type Vec2 = glam::Vec2;

#[cfg(feature = "f64")]
pub type Fp = f64;
#[cfg(feature = "f64")]
pub type Vec2 = glam::DVec2;
