use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::sample::{Sample, sample_range};
use crate::core::types::{SceneRect, ScenePoint};
use crate::error::{PlotError, PlotResult};
use crate::render::Color;

/// Stable series identifier. Ids are never reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(pub u32);

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How consecutive samples of a series are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderMode {
    /// Straight segments between consecutive samples.
    #[default]
    Line,
    /// Step plot: each sample spans `[x, x + step]`.
    Column,
    /// Step plot centred on the sample: each sample spans `[x - step/2, x + step/2]`.
    Rectangle,
}

/// Colors handed out to series added without an explicit color.
pub const DEFAULT_SERIES_PALETTE: [Color; 6] = [
    Color::rgb(0.122, 0.467, 0.706),
    Color::rgb(1.0, 0.498, 0.055),
    Color::rgb(0.173, 0.627, 0.173),
    Color::rgb(0.839, 0.153, 0.157),
    Color::rgb(0.580, 0.404, 0.741),
    Color::rgb(0.549, 0.337, 0.294),
];

/// One plotted series.
///
/// Sample `i` sits at `start + i * step` on the X axis. The horizontal extent
/// reported by [`Series::x_extent`] is exactly the extent the render mode
/// draws, so fitting the scene to data never clips or pads a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<S: Sample> {
    id: SeriesId,
    name: String,
    samples: Vec<S>,
    start: f64,
    step: f64,
    color: Color,
    visible: bool,
    render_mode: RenderMode,
}

impl<S: Sample> Series<S> {
    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn samples(&self) -> &[S] {
        &self.samples
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// X position of sample `index`.
    #[must_use]
    pub fn sample_x(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }

    /// Horizontal extent drawn by the current render mode.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        let count = self.samples.len();
        if count == 0 {
            return None;
        }
        let last = self.sample_x(count - 1);
        match self.render_mode {
            RenderMode::Line => Some((self.start, last)),
            RenderMode::Column => Some((self.start, last + self.step)),
            RenderMode::Rectangle => {
                let half = self.step / 2.0;
                Some((self.start - half, last + half))
            }
        }
    }

    #[must_use]
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        sample_range(&self.samples)
    }

    #[must_use]
    pub fn extent(&self) -> Option<SceneRect> {
        let (min_x, max_x) = self.x_extent()?;
        let (min_y, max_y) = self.y_extent()?;
        Some(SceneRect::new(min_x, max_x, min_y, max_y))
    }

    /// Scene-space vertex runs for the current render mode.
    ///
    /// Samples without a finite projection break the run, so one series may
    /// produce several strips.
    #[must_use]
    pub fn strips(&self) -> Vec<Vec<ScenePoint>> {
        let mut strips = Vec::new();
        let mut current = Vec::new();
        let lead = match self.render_mode {
            RenderMode::Line | RenderMode::Column => 0.0,
            RenderMode::Rectangle => -self.step / 2.0,
        };

        for (index, sample) in self.samples.iter().enumerate() {
            let Some(value) = sample.to_scene() else {
                if current.len() > 1 {
                    strips.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                continue;
            };
            let x = self.sample_x(index) + lead;
            match self.render_mode {
                RenderMode::Line => current.push(ScenePoint::new(x, value)),
                RenderMode::Column | RenderMode::Rectangle => {
                    current.push(ScenePoint::new(x, value));
                    current.push(ScenePoint::new(x + self.step, value));
                }
            }
        }

        if current.len() > 1 {
            strips.push(current);
        }
        strips
    }
}

/// Owns every series of one viewport, keyed by id in insertion order.
#[derive(Debug, Clone)]
pub struct SeriesStore<S: Sample> {
    series: IndexMap<SeriesId, Series<S>>,
    next_id: u32,
    default_step: f64,
    default_render_mode: RenderMode,
}

impl<S: Sample> Default for SeriesStore<S> {
    fn default() -> Self {
        Self {
            series: IndexMap::new(),
            next_id: 0,
            default_step: 1.0,
            default_render_mode: RenderMode::Line,
        }
    }
}

impl<S: Sample> SeriesStore<S> {
    /// Creates an empty store; `default_step` must be finite and > 0.
    pub fn new(default_step: f64, default_render_mode: RenderMode) -> PlotResult<Self> {
        validate_step(default_step)?;
        Ok(Self {
            default_step,
            default_render_mode,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[must_use]
    pub fn default_step(&self) -> f64 {
        self.default_step
    }

    #[must_use]
    pub fn default_render_mode(&self) -> RenderMode {
        self.default_render_mode
    }

    /// Adds a series and returns its id.
    ///
    /// An empty sample list creates a hidden series. `color` falls back to the
    /// default palette.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        samples: Vec<S>,
        color: Option<Color>,
    ) -> SeriesId {
        let id = SeriesId(self.next_id);
        self.next_id += 1;
        let color = color.unwrap_or(
            DEFAULT_SERIES_PALETTE[id.0 as usize % DEFAULT_SERIES_PALETTE.len()],
        );
        let visible = !samples.is_empty();
        let series = Series {
            id,
            name: name.into(),
            samples,
            start: 0.0,
            step: self.default_step,
            color,
            visible,
            render_mode: self.default_render_mode,
        };
        debug!(series = %id, samples = series.samples.len(), visible, "add series");
        self.series.insert(id, series);
        id
    }

    pub fn remove(&mut self, id: SeriesId) -> PlotResult<Series<S>> {
        let removed = self
            .series
            .shift_remove(&id)
            .ok_or(PlotError::UnknownSeries(id))?;
        debug!(series = %id, "remove series");
        Ok(removed)
    }

    #[must_use]
    pub fn contains(&self, id: SeriesId) -> bool {
        self.series.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: SeriesId) -> Option<&Series<S>> {
        self.series.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series<S>> {
        self.series.values()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Series<S>> {
        self.series.values().filter(|series| series.visible)
    }

    /// Replaces the samples of a series; an empty list hides it.
    pub fn set_values(&mut self, id: SeriesId, samples: Vec<S>) -> PlotResult<()> {
        let series = self.get_mut(id)?;
        if samples.is_empty() {
            series.visible = false;
        }
        series.samples = samples;
        trace!(series = %id, samples = series.samples.len(), "set series values");
        Ok(())
    }

    /// Shows or hides a series. A series without samples stays hidden.
    pub fn set_visible(&mut self, id: SeriesId, visible: bool) -> PlotResult<()> {
        let series = self.get_mut(id)?;
        series.visible = visible && !series.samples.is_empty();
        Ok(())
    }

    pub fn set_color(&mut self, id: SeriesId, color: Color) -> PlotResult<()> {
        color.validate()?;
        self.get_mut(id)?.color = color;
        Ok(())
    }

    pub fn set_name(&mut self, id: SeriesId, name: impl Into<String>) -> PlotResult<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_start(&mut self, id: SeriesId, start: f64) -> PlotResult<()> {
        if !start.is_finite() {
            return Err(PlotError::InvalidData(
                "series start must be finite".to_owned(),
            ));
        }
        self.get_mut(id)?.start = start;
        Ok(())
    }

    pub fn set_step(&mut self, id: SeriesId, step: f64) -> PlotResult<()> {
        validate_step(step)?;
        self.get_mut(id)?.step = step;
        Ok(())
    }

    /// Sets the step of every series and of series added later.
    pub fn set_step_all(&mut self, step: f64) -> PlotResult<()> {
        validate_step(step)?;
        self.default_step = step;
        for series in self.series.values_mut() {
            series.step = step;
        }
        Ok(())
    }

    pub fn set_render_mode(&mut self, id: SeriesId, mode: RenderMode) -> PlotResult<()> {
        self.get_mut(id)?.render_mode = mode;
        Ok(())
    }

    /// Sets the render mode of every series and of series added later.
    pub fn set_render_mode_all(&mut self, mode: RenderMode) {
        self.default_render_mode = mode;
        for series in self.series.values_mut() {
            series.render_mode = mode;
        }
    }

    /// Union of the extents of all visible series.
    #[must_use]
    pub fn data_extent(&self) -> Option<SceneRect> {
        self.visible()
            .filter_map(Series::extent)
            .reduce(SceneRect::union)
    }

    fn get_mut(&mut self, id: SeriesId) -> PlotResult<&mut Series<S>> {
        self.series.get_mut(&id).ok_or(PlotError::UnknownSeries(id))
    }
}

fn validate_step(step: f64) -> PlotResult<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(PlotError::InvalidData(
            "series step must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(samples: Vec<f64>, mode: RenderMode) -> (SeriesStore<f64>, SeriesId) {
        let mut store = SeriesStore::new(1.0, mode).expect("valid store");
        let id = store.add("s", samples, None);
        (store, id)
    }

    #[test]
    fn extent_follows_render_mode() {
        let (mut store, id) = store_with(vec![0.0, 1.0, 2.0, 3.0], RenderMode::Line);
        assert_eq!(store.data_extent(), Some(SceneRect::new(0.0, 3.0, 0.0, 3.0)));

        store.set_render_mode(id, RenderMode::Column).expect("known id");
        assert_eq!(store.data_extent(), Some(SceneRect::new(0.0, 4.0, 0.0, 3.0)));

        store.set_render_mode(id, RenderMode::Rectangle).expect("known id");
        assert_eq!(store.data_extent(), Some(SceneRect::new(-0.5, 3.5, 0.0, 3.0)));
    }

    #[test]
    fn strip_extent_matches_reported_extent() {
        for mode in [RenderMode::Line, RenderMode::Column, RenderMode::Rectangle] {
            let (store, id) = store_with(vec![2.0, -1.0, 4.0], mode);
            let series = store.get(id).expect("series");
            let strips = series.strips();
            assert_eq!(strips.len(), 1);
            let first = strips[0].first().expect("vertex").x;
            let last = strips[0].last().expect("vertex").x;
            assert_eq!(series.x_extent(), Some((first, last)));
        }
    }

    #[test]
    fn non_finite_sample_splits_strip() {
        let (store, id) = store_with(vec![1.0, 2.0, f64::NAN, 3.0, 4.0], RenderMode::Line);
        let strips = store.get(id).expect("series").strips();
        assert_eq!(strips.len(), 2);
        assert_eq!(strips[1][0], ScenePoint::new(3.0, 3.0));
    }

    #[test]
    fn empty_samples_hide_series() {
        let (mut store, id) = store_with(Vec::new(), RenderMode::Line);
        assert!(!store.get(id).expect("series").is_visible());
        store.set_visible(id, true).expect("known id");
        assert!(!store.get(id).expect("series").is_visible());

        store.set_values(id, vec![1.0]).expect("known id");
        store.set_visible(id, true).expect("known id");
        assert!(store.get(id).expect("series").is_visible());
    }

    #[test]
    fn ids_are_not_recycled() {
        let (mut store, first) = store_with(vec![1.0], RenderMode::Line);
        store.remove(first).expect("known id");
        let second = store.add("t", vec![1.0], None);
        assert_ne!(first, second);
        assert!(matches!(
            store.set_step(first, 2.0),
            Err(PlotError::UnknownSeries(id)) if id == first
        ));
    }

    #[test]
    fn non_positive_step_is_rejected() {
        let (mut store, id) = store_with(vec![1.0], RenderMode::Line);
        assert!(store.set_step(id, 0.0).is_err());
        assert!(store.set_step(id, -1.0).is_err());
        assert_eq!(store.get(id).expect("series").step(), 1.0);
    }
}
