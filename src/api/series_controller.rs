use tracing::debug;

use crate::core::{RenderMode, Sample, Series, SeriesId};
use crate::error::PlotResult;
use crate::extensions::PlotEvent;
use crate::render::{Color, Renderer};

use super::PlotViewport;

impl<R: Renderer, S: Sample> PlotViewport<R, S> {
    /// Adds a series with a palette color. Fits the scene when auto-fit is on.
    pub fn add_series(&mut self, name: impl Into<String>, samples: Vec<S>) -> SeriesId {
        let id = self.series.add(name, samples, None);
        self.after_data_change(id);
        id
    }

    /// Adds a series with an explicit color.
    pub fn add_series_with_color(
        &mut self,
        name: impl Into<String>,
        samples: Vec<S>,
        color: Color,
    ) -> PlotResult<SeriesId> {
        color.validate()?;
        let id = self.series.add(name, samples, Some(color));
        self.after_data_change(id);
        Ok(id)
    }

    /// Removes a series; its id is never handed out again.
    pub fn remove_series(&mut self, id: SeriesId) -> PlotResult<Series<S>> {
        let removed = self.series.remove(id)?;
        self.after_data_change(id);
        Ok(removed)
    }

    /// Replaces the samples of a series; an empty list hides it.
    pub fn set_series_values(&mut self, id: SeriesId, samples: Vec<S>) -> PlotResult<()> {
        self.series.set_values(id, samples)?;
        self.after_data_change(id);
        Ok(())
    }

    #[must_use]
    pub fn contains_series(&self, id: SeriesId) -> bool {
        self.series.contains(id)
    }

    pub fn set_series_visible(&mut self, id: SeriesId, visible: bool) -> PlotResult<()> {
        self.series.set_visible(id, visible)?;
        self.after_presentation_change(id);
        Ok(())
    }

    pub fn set_series_color(&mut self, id: SeriesId, color: Color) -> PlotResult<()> {
        self.series.set_color(id, color)?;
        self.after_presentation_change(id);
        Ok(())
    }

    pub fn set_series_name(&mut self, id: SeriesId, name: impl Into<String>) -> PlotResult<()> {
        self.series.set_name(id, name)?;
        self.emit_plot_event(PlotEvent::SeriesChanged { series_id: id });
        Ok(())
    }

    /// Moves the first sample of a series to `start` on the X axis.
    pub fn set_series_start(&mut self, id: SeriesId, start: f64) -> PlotResult<()> {
        self.series.set_start(id, start)?;
        self.after_presentation_change(id);
        Ok(())
    }

    pub fn set_series_step(&mut self, id: SeriesId, step: f64) -> PlotResult<()> {
        self.series.set_step(id, step)?;
        self.after_presentation_change(id);
        Ok(())
    }

    /// Sets the X step of every series, including ones added later.
    pub fn set_step_all(&mut self, step: f64) -> PlotResult<()> {
        self.series.set_step_all(step)?;
        debug!(step, "set step for all series");
        self.redraw_pending = true;
        Ok(())
    }

    pub fn set_series_render_mode(&mut self, id: SeriesId, mode: RenderMode) -> PlotResult<()> {
        self.series.set_render_mode(id, mode)?;
        self.after_presentation_change(id);
        Ok(())
    }

    /// Sets the render mode of every series, including ones added later.
    pub fn set_render_mode_all(&mut self, mode: RenderMode) {
        self.series.set_render_mode_all(mode);
        debug!(?mode, "set render mode for all series");
        self.redraw_pending = true;
    }

    fn after_data_change(&mut self, id: SeriesId) {
        if self.auto_fit {
            self.reset_scene();
        }
        self.redraw_pending = true;
        self.emit_plot_event(PlotEvent::SeriesChanged { series_id: id });
    }

    fn after_presentation_change(&mut self, id: SeriesId) {
        self.redraw_pending = true;
        self.emit_plot_event(PlotEvent::SeriesChanged { series_id: id });
    }
}
