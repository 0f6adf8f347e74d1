use tracing::debug;

use crate::core::{
    Axis, DevicePoint, GridState, GridTick, Sample, SeriesStore, Viewport,
};
use crate::error::{PlotError, PlotResult};
use crate::extensions::PlotObserver;
use crate::interaction::{InputStateMachine, InteractionState};
use crate::render::{DrawList, FrameRenderer, PlotStyle, RenderFrame, Renderer};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::PlotConfig;
use super::validation::validate_plot_config;

/// Main orchestration facade consumed by host applications.
///
/// `PlotViewport` owns the viewport transform, the grid, the input state
/// machine and the series of one plot, keeps them consistent after every
/// mutation and hands finished frames to the renderer.
pub struct PlotViewport<R: Renderer, S: Sample = f64> {
    pub(super) renderer: R,
    pub(super) id: u32,
    pub(super) auto_fit: bool,
    pub(super) viewport: Viewport,
    pub(super) grid: GridState,
    pub(super) input: InputStateMachine,
    pub(super) series: SeriesStore<S>,
    pub(super) style: PlotStyle,
    pub(super) observers: Vec<Box<dyn PlotObserver>>,
    pub(super) redraw_pending: bool,
}

impl<R: Renderer, S: Sample> PlotViewport<R, S> {
    /// Creates a fully initialized viewport from a validated config.
    pub fn new(renderer: R, config: PlotConfig) -> PlotResult<Self> {
        validate_plot_config(&config)?;

        let mut viewport = Viewport::new(
            config.device_size,
            config.zoom_limits,
            config.default_tick_divisions,
        )?;
        let (min_x, max_x) = config.x_bounds;
        let (min_y, max_y) = config.y_bounds;
        if !viewport.set_x_bounds(min_x, max_x) || !viewport.set_y_bounds(min_y, max_y) {
            return Err(PlotError::InvalidConfig(
                "initial scene bounds are invalid".to_owned(),
            ));
        }
        if let Some(step) = config.fixed_grid_step_x {
            viewport.set_grid_step(Axis::X, step);
        }
        if let Some(step) = config.fixed_grid_step_y {
            viewport.set_grid_step(Axis::Y, step);
        }
        viewport.set_axis_lock(config.default_axis_lock);

        let input = InputStateMachine::new(
            config.bindings,
            config.default_axis_lock,
            config.wheel_zoom_coefficient,
        )?;
        let mut grid = GridState::new(config.grid_density_ratio)?;
        grid.refresh(&viewport, input.state().cursor(), true);

        debug!(
            viewport_id = config.viewport_id,
            width = config.device_size.width,
            height = config.device_size.height,
            "plot viewport created"
        );

        Ok(Self {
            renderer,
            id: config.viewport_id,
            auto_fit: config.auto_fit,
            viewport,
            grid,
            input,
            series: SeriesStore::new(config.default_step, config.default_render_mode)?,
            style: config.style,
            observers: Vec::new(),
            redraw_pending: true,
        })
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Snapshot of the live configuration.
    #[must_use]
    pub fn config(&self) -> PlotConfig {
        let bounds = self.viewport.bounds();
        PlotConfig {
            device_size: self.viewport.device_size(),
            viewport_id: self.id,
            auto_fit: self.auto_fit,
            x_bounds: (bounds.min_x, bounds.max_x),
            y_bounds: (bounds.min_y, bounds.max_y),
            zoom_limits: self.viewport.limits(),
            grid_density_ratio: self.grid.density_ratio(),
            default_tick_divisions: self.viewport.tick_divisions(),
            wheel_zoom_coefficient: self.input.wheel_zoom_coefficient(),
            default_step: self.series.default_step(),
            default_render_mode: self.series.default_render_mode(),
            default_axis_lock: self.input.default_lock(),
            fixed_grid_step_x: self.viewport.fixed_grid_step(Axis::X),
            fixed_grid_step_y: self.viewport.fixed_grid_step(Axis::Y),
            bindings: self.input.bindings(),
            style: self.style,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    #[must_use]
    pub fn interaction_state(&self) -> &InteractionState {
        self.input.state()
    }

    #[must_use]
    pub fn series(&self) -> &SeriesStore<S> {
        &self.series
    }

    #[must_use]
    pub fn cursor(&self) -> DevicePoint {
        self.input.state().cursor()
    }

    /// Visible X ticks, ascending, terminated by the cursor tick.
    #[must_use]
    pub fn vertical_ticks(&self) -> &[GridTick] {
        self.grid.vertical_ticks()
    }

    /// Visible Y ticks, top to bottom, terminated by the cursor tick.
    #[must_use]
    pub fn horizontal_ticks(&self) -> &[GridTick] {
        self.grid.horizontal_ticks()
    }

    /// Returns and clears the coalesced redraw flag.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    #[must_use]
    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Scene-space primitives for the current state.
    #[must_use]
    pub fn build_draw_list(&self) -> DrawList {
        FrameRenderer::build(
            &self.series,
            &self.viewport,
            &self.grid,
            self.input.state(),
            &self.style,
        )
    }

    /// Pixel-space frame for the current state.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        self.build_draw_list().to_render_frame(&self.viewport)
    }

    pub fn render(&mut self) -> PlotResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)?;
        self.redraw_pending = false;
        Ok(())
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> PlotResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame();
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.redraw_pending = false;
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
