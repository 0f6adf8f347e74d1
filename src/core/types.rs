use serde::{Deserialize, Serialize};

/// Rendering surface size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSize {
    pub width: u32,
    pub height: u32,
}

impl DeviceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

/// Point in device pixel coordinates (origin top-left, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Point in scene coordinates (y grows upwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
}

impl ScenePoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned scene rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneRect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl SceneRect {
    #[must_use]
    pub const fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Smallest rectangle covering both inputs.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Strict containment, matching how grid ticks are clipped to the axis box.
    #[must_use]
    pub fn contains_x_strict(self, x: f64) -> bool {
        x > self.min_x && x < self.max_x
    }

    #[must_use]
    pub fn contains_y_strict(self, y: f64) -> bool {
        y > self.min_y && y < self.max_y
    }
}

/// Scene axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Restricts pan, zoom and selection to one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisLock {
    #[default]
    Free,
    /// Only the X axis moves.
    HorizontalOnly,
    /// Only the Y axis moves.
    VerticalOnly,
}

impl AxisLock {
    #[must_use]
    pub const fn moves_x(self) -> bool {
        !matches!(self, Self::VerticalOnly)
    }

    #[must_use]
    pub const fn moves_y(self) -> bool {
        !matches!(self, Self::HorizontalOnly)
    }

    #[must_use]
    pub const fn moves(self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.moves_x(),
            Axis::Y => self.moves_y(),
        }
    }
}
