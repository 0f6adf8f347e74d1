use cairo::{Context, Format, ImageSurface};

use crate::error::{PlotError, PlotResult};
use crate::render::{
    Color, DASH_PATTERN_PX, FramePrimitive, LineStrokeStyle, RectPrimitive, RenderFrame, Renderer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub rects_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a toolkit draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> PlotResult<()>;
}

/// Cairo renderer backend.
///
/// Draws offscreen into an image surface through `Renderer::render`, or in
/// place on an external context through `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> PlotResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(PlotError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> PlotResult<()> {
        frame.validate()?;

        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for primitive in &frame.primitives {
            match primitive {
                FramePrimitive::Line(line) => {
                    apply_stroke(context, line.color, line.stroke_width, line.stroke_style);
                    context.move_to(line.x1, line.y1);
                    context.line_to(line.x2, line.y2);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke line", err))?;
                    stats.lines_drawn += 1;
                }
                FramePrimitive::Polyline(polyline) => {
                    apply_stroke(
                        context,
                        polyline.color,
                        polyline.stroke_width,
                        polyline.stroke_style,
                    );
                    let mut points = polyline.points.iter();
                    if let Some(first) = points.next() {
                        context.move_to(first.x, first.y);
                    }
                    for point in points {
                        context.line_to(point.x, point.y);
                    }
                    if polyline.closed {
                        context.close_path();
                    }
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
                    stats.polylines_drawn += 1;
                }
                FramePrimitive::Rect(rect) => {
                    draw_rect(context, *rect)?;
                    stats.rects_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> PlotResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn apply_stroke(context: &Context, color: Color, width: f64, style: LineStrokeStyle) {
    apply_color(context, color);
    context.set_line_width(width);
    match style {
        LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
        LineStrokeStyle::Dashed => {
            let dashes = DASH_PATTERN_PX.map(|length| length * width);
            context.set_dash(&dashes, 0.0);
        }
    }
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> PlotResult<()> {
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_stroke(
            context,
            rect.border_color,
            rect.border_width,
            LineStrokeStyle::Solid,
        );
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> PlotError {
    PlotError::InvalidData(format!("{prefix}: {err}"))
}
