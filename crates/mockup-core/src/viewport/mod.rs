//! Pan/zoom state for inspecting a single result at full scale.

mod transform;
mod viewer;

pub use transform::{fit, pan, zoom, Size, Transform, Vec2};
pub use viewer::{ViewerState, WheelDirection};
