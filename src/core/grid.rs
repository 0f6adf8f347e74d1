use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::types::{Axis, DevicePoint, ScenePoint};
use crate::core::viewport::Viewport;
use crate::error::{PlotError, PlotResult};

/// Upper bound on tracked grid lines per axis.
///
/// A density level that would exceed it regenerates the lines around the
/// visible window instead of subdividing every tracked line.
pub const MAX_GRID_LINES_PER_AXIS: usize = 16_384;

/// One visible grid label: device position along the axis and scene value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTick {
    pub position_px: f64,
    pub value: f64,
}

/// What one density level did to the tracked lines.
#[derive(Debug, Clone, PartialEq)]
enum DensityLevel {
    /// Lines appended after the ones of the level below.
    Inserted(usize),
    /// Lines replaced by a window around the visible range; keeps the level
    /// below so halving restores it.
    Windowed {
        previous: Vec<f64>,
        previous_window: Option<(f64, f64)>,
    },
}

/// Tracked line positions of one axis plus the density levels applied on top
/// of the last full rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisGrid {
    lines: Vec<f64>,
    origin: f64,
    step: f64,
    border: (f64, f64),
    last_zoom: f64,
    levels: SmallVec<[DensityLevel; 8]>,
    window: Option<(f64, f64)>,
}

impl Default for AxisGrid {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            origin: 0.0,
            step: 1.0,
            border: (0.0, 0.0),
            last_zoom: 1.0,
            levels: SmallVec::new(),
            window: None,
        }
    }
}

impl AxisGrid {
    #[must_use]
    pub fn lines(&self) -> &[f64] {
        &self.lines
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Zoom factor the current density corresponds to.
    #[must_use]
    pub fn last_zoom(&self) -> f64 {
        self.last_zoom
    }

    /// Number of density doublings applied since the last full rebuild.
    #[must_use]
    pub fn density_level(&self) -> usize {
        self.levels.len()
    }

    /// Scene range the tracked lines are limited to once a density level had
    /// to be windowed; `None` while the lines cover the whole border.
    #[must_use]
    pub fn window(&self) -> Option<(f64, f64)> {
        self.window
    }

    fn rebuild(&mut self, origin: f64, step: f64, border_min: f64, border_max: f64) {
        self.lines.clear();
        self.levels.clear();
        self.window = None;
        self.last_zoom = 1.0;
        self.origin = origin;
        self.step = step;
        self.border = (border_min, border_max);

        let inside = |value: f64| value > border_min && value < border_max;
        let mut index = 0_u32;
        loop {
            let value = origin + f64::from(index) * step;
            if !inside(value) || self.lines.len() >= MAX_GRID_LINES_PER_AXIS {
                break;
            }
            self.lines.push(value);
            index += 1;
        }
        let mut index = 1_u32;
        loop {
            let value = origin - f64::from(index) * step;
            if !inside(value) || self.lines.len() >= MAX_GRID_LINES_PER_AXIS {
                break;
            }
            self.lines.push(value);
            index += 1;
        }
        if self.lines.len() >= MAX_GRID_LINES_PER_AXIS {
            warn!(step, "grid rebuild hit the line cap");
        }
    }

    /// Moves the density to the level matching `zoom`. `visible` is the scene
    /// range on screen and `margin` how far a windowed level reaches past it.
    fn adjust_density(&mut self, zoom: f64, ratio: f64, visible: (f64, f64), margin: f64) {
        let subdivisions = subdivisions(ratio);
        while self.last_zoom * ratio < zoom {
            self.last_zoom *= ratio;
            let existing = self.lines.len();
            if self.window.is_none() && existing * (subdivisions + 1) <= MAX_GRID_LINES_PER_AXIS {
                let spacing = self.step / self.last_zoom;
                for index in 0..existing {
                    let base = self.lines[index];
                    for part in 1..=subdivisions {
                        self.lines.push(base + part as f64 * spacing);
                    }
                }
                self.levels.push(DensityLevel::Inserted(existing * subdivisions));
            } else {
                let previous = std::mem::take(&mut self.lines);
                let previous_window = self.window.take();
                self.levels.push(DensityLevel::Windowed {
                    previous,
                    previous_window,
                });
                self.fill_window(visible, margin);
            }
        }

        while zoom < self.last_zoom {
            let Some(level) = self.levels.pop() else {
                break;
            };
            match level {
                DensityLevel::Inserted(inserted) => {
                    self.lines.truncate(self.lines.len() - inserted);
                }
                DensityLevel::Windowed {
                    previous,
                    previous_window,
                } => {
                    self.lines = previous;
                    self.window = previous_window;
                }
            }
            self.last_zoom /= ratio;
        }

        if let Some((low, high)) = self.window {
            if visible.0 < low || visible.1 > high {
                self.fill_window(visible, margin);
            }
        }
    }

    /// Replaces the lines with the lattice `origin + k * step / last_zoom`
    /// over `visible` widened by `margin`, clipped to the border.
    fn fill_window(&mut self, visible: (f64, f64), margin: f64) {
        let spacing = self.step / self.last_zoom;
        let low = (visible.0 - margin).max(self.border.0);
        let high = (visible.1 + margin).min(self.border.1);
        self.lines.clear();
        self.window = Some((low, high));

        let mut first = ((low - self.origin) / spacing).ceil();
        let mut last = ((high - self.origin) / spacing).floor();
        if !first.is_finite() || !last.is_finite() {
            warn!(spacing, low, high, "grid window cannot be indexed");
            return;
        }
        let cap = MAX_GRID_LINES_PER_AXIS as f64;
        if last - first + 1.0 > cap {
            let center = (((visible.0 + visible.1) / 2.0 - self.origin) / spacing).round();
            first = first.max(center - cap / 2.0);
            last = last.min(first + cap - 1.0);
        }

        let mut index = first;
        while index <= last {
            let value = self.origin + index * spacing;
            if value > self.border.0 && value < self.border.1 {
                self.lines.push(value);
            }
            index += 1.0;
        }
        trace!(
            low,
            high,
            lines = self.lines.len(),
            level = self.levels.len(),
            "grid window regenerated"
        );
    }
}

/// Lines inserted per tracked line when density goes up one level.
fn subdivisions(ratio: f64) -> usize {
    (ratio.round() as usize).max(2) - 1
}

/// Grid lines and visible ticks derived from a [`Viewport`].
///
/// Full rebuilds happen on bound or step changes; continuous zoom only adds
/// or removes whole density levels, so the per-frame cost stays proportional
/// to the number of tracked lines.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    vertical: AxisGrid,
    horizontal: AxisGrid,
    vertical_ticks: Vec<GridTick>,
    horizontal_ticks: Vec<GridTick>,
    density_ratio: f64,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            vertical: AxisGrid::default(),
            horizontal: AxisGrid::default(),
            vertical_ticks: Vec::new(),
            horizontal_ticks: Vec::new(),
            density_ratio: 2.0,
        }
    }
}

impl GridState {
    /// Creates an empty grid; `density_ratio` must be an integer >= 2.
    pub fn new(density_ratio: f64) -> PlotResult<Self> {
        validate_density_ratio(density_ratio)?;
        Ok(Self {
            density_ratio,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn density_ratio(&self) -> f64 {
        self.density_ratio
    }

    /// Grid of vertical lines (positions along X).
    #[must_use]
    pub fn vertical(&self) -> &AxisGrid {
        &self.vertical
    }

    /// Grid of horizontal lines (positions along Y).
    #[must_use]
    pub fn horizontal(&self) -> &AxisGrid {
        &self.horizontal
    }

    /// Visible X ticks, ascending, terminated by the cursor tick.
    #[must_use]
    pub fn vertical_ticks(&self) -> &[GridTick] {
        &self.vertical_ticks
    }

    /// Visible Y ticks, top to bottom, terminated by the cursor tick.
    #[must_use]
    pub fn horizontal_ticks(&self) -> &[GridTick] {
        &self.horizontal_ticks
    }

    /// Regenerates every line from the axis minimum out to the border.
    pub fn rebuild(&mut self, viewport: &Viewport) {
        let bounds = viewport.bounds();
        let border = viewport.border();
        self.vertical.rebuild(
            bounds.min_x,
            viewport.grid_step(Axis::X),
            border.min_x,
            border.max_x,
        );
        self.horizontal.rebuild(
            bounds.min_y,
            viewport.grid_step(Axis::Y),
            border.min_y,
            border.max_y,
        );
        trace!(
            vertical = self.vertical.lines.len(),
            horizontal = self.horizontal.lines.len(),
            "grid full rebuild"
        );
    }

    /// Adds or removes density levels until they match the current zoom.
    pub fn adjust_density(&mut self, viewport: &Viewport) {
        let (zoom_x, zoom_y) = viewport.zoom();
        let visible = viewport.visible_rect();
        self.vertical.adjust_density(
            zoom_x,
            self.density_ratio,
            (visible.min_x, visible.max_x),
            visible.width(),
        );
        self.horizontal.adjust_density(
            zoom_y,
            self.density_ratio,
            (visible.min_y, visible.max_y),
            visible.height(),
        );
    }

    /// Recomputes the visible tick sequences for `cursor`.
    pub fn extract_ticks(&mut self, viewport: &Viewport, cursor: DevicePoint) {
        let visible = viewport.visible_rect();

        self.vertical_ticks.clear();
        self.vertical_ticks.extend(
            self.vertical
                .lines
                .iter()
                .copied()
                .filter(|&x| visible.contains_x_strict(x))
                .map(|x| GridTick {
                    position_px: viewport.scene_to_device(ScenePoint::new(x, 0.0)).x,
                    value: x,
                }),
        );
        self.vertical_ticks
            .sort_by_key(|tick| OrderedFloat(tick.position_px));

        self.horizontal_ticks.clear();
        self.horizontal_ticks.extend(
            self.horizontal
                .lines
                .iter()
                .copied()
                .filter(|&y| visible.contains_y_strict(y))
                .map(|y| GridTick {
                    position_px: viewport.scene_to_device(ScenePoint::new(0.0, y)).y,
                    value: y,
                }),
        );
        self.horizontal_ticks
            .sort_by_key(|tick| OrderedFloat(tick.position_px));

        let scene = viewport.device_to_scene(cursor);
        self.vertical_ticks.push(GridTick {
            position_px: cursor.x,
            value: scene.x,
        });
        self.horizontal_ticks.push(GridTick {
            position_px: cursor.y,
            value: scene.y,
        });
    }

    /// Full refresh pass run after every viewport change.
    pub fn refresh(&mut self, viewport: &Viewport, cursor: DevicePoint, full_rebuild: bool) {
        if full_rebuild {
            self.rebuild(viewport);
        }
        self.adjust_density(viewport);
        self.extract_ticks(viewport, cursor);
    }
}

pub(crate) fn validate_density_ratio(ratio: f64) -> PlotResult<()> {
    if !ratio.is_finite() || ratio < 2.0 || ratio.fract() != 0.0 {
        return Err(PlotError::InvalidConfig(
            "grid density ratio must be an integer >= 2".to_owned(),
        ));
    }
    Ok(())
}
