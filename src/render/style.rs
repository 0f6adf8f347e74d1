use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::render::Color;

/// Color and width of one stroked layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
}

impl LineStyle {
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    pub fn validate(self, name: &str) -> PlotResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PlotError::InvalidConfig(format!(
                "{name} width must be finite and > 0"
            )));
        }
        self.color.validate()
    }
}

/// Style contract for every frame a viewport draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_grid")]
    pub grid: LineStyle,
    #[serde(default = "default_true")]
    pub show_grid: bool,
    /// Dashed crosshair following the pointer.
    #[serde(default = "default_cursor_grid")]
    pub cursor_grid: LineStyle,
    #[serde(default = "default_true")]
    pub show_cursor_grid: bool,
    /// Width shared by all series strips; colors are per series.
    #[serde(default = "default_series_width")]
    pub series_width: f64,
    #[serde(default = "default_selection_outline")]
    pub selection_outline: LineStyle,
    #[serde(default = "default_selection_fill")]
    pub selection_fill: Color,
    #[serde(default = "default_axes")]
    pub axes: LineStyle,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: default_background(),
            grid: default_grid(),
            show_grid: true,
            cursor_grid: default_cursor_grid(),
            show_cursor_grid: true,
            series_width: default_series_width(),
            selection_outline: default_selection_outline(),
            selection_fill: default_selection_fill(),
            axes: default_axes(),
        }
    }
}

impl PlotStyle {
    pub fn validate(&self) -> PlotResult<()> {
        self.background.validate()?;
        self.grid.validate("grid")?;
        self.cursor_grid.validate("cursor grid")?;
        self.selection_outline.validate("selection outline")?;
        self.selection_fill.validate()?;
        self.axes.validate("axes")?;
        if !self.series_width.is_finite() || self.series_width <= 0.0 {
            return Err(PlotError::InvalidConfig(
                "series width must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_background() -> Color {
    Color::rgb(1.0, 1.0, 1.0)
}

fn default_grid() -> LineStyle {
    LineStyle::new(Color::rgba8(175, 175, 175, 255), 1.0)
}

fn default_cursor_grid() -> LineStyle {
    LineStyle::new(Color::rgba8(50, 50, 50, 200), 1.0)
}

fn default_series_width() -> f64 {
    1.0
}

fn default_selection_outline() -> LineStyle {
    LineStyle::new(Color::rgba8(128, 128, 128, 255), 1.0)
}

fn default_selection_fill() -> Color {
    Color::rgba8(173, 216, 230, 100)
}

fn default_axes() -> LineStyle {
    LineStyle::new(Color::rgb(0.0, 0.0, 0.0), 1.0)
}
