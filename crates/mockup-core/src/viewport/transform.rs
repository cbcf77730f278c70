use crate::consts::{MAX_SCALE, MIN_SCALE};

/// Width/height pair in display pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Pointer position or movement in container pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Mapping from container coordinates to image coordinates.
///
/// `scale` is always positive and stays within `[MIN_SCALE, MAX_SCALE]`
/// after any [`zoom`]; offsets are unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Largest scale that shows the whole image inside the container, never
/// above native resolution. Offsets are reset.
pub fn fit(container: Size, image: Size) -> Transform {
    let fit_x = container.width / image.width;
    let fit_y = container.height / image.height;
    let mut scale = fit_x.min(fit_y).min(1.0);
    // Zero-sized containers or images would give 0, NaN or inf.
    if !scale.is_finite() || scale <= 0.0 {
        scale = MIN_SCALE;
    }
    Transform {
        scale,
        offset_x: 0.0,
        offset_y: 0.0,
    }
}

/// Multiply the scale by `factor`, clamped to `[MIN_SCALE, MAX_SCALE]`.
pub fn zoom(current: Transform, factor: f32) -> Transform {
    if !factor.is_finite() || factor <= 0.0 {
        return current;
    }
    Transform {
        scale: (current.scale * factor).clamp(MIN_SCALE, MAX_SCALE),
        ..current
    }
}

pub fn pan(current: Transform, delta: Vec2) -> Transform {
    Transform {
        offset_x: current.offset_x + delta.x,
        offset_y: current.offset_y + delta.y,
        ..current
    }
}
