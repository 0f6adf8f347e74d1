#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{DevicePoint, GridState, Sample, ScenePoint, SeriesStore, Viewport};
use crate::interaction::{InteractionMode, InteractionState};
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, LineStyle, PlotStyle, PolylinePrimitive,
    RectPrimitive, RenderFrame,
};

/// Strips shorter than this are projected sequentially even with
/// `parallel-projection` enabled.
#[cfg(feature = "parallel-projection")]
const PARALLEL_PROJECTION_MIN_POINTS: usize = 4_096;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color,
    pub pattern: LineStrokeStyle,
}

impl StrokeStyle {
    #[must_use]
    pub const fn solid(style: LineStyle) -> Self {
        Self {
            width: style.width,
            color: style.color,
            pattern: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn dashed(style: LineStyle) -> Self {
        Self {
            width: style.width,
            color: style.color,
            pattern: LineStrokeStyle::Dashed,
        }
    }
}

/// Scene-space draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    Line {
        from: ScenePoint,
        to: ScenePoint,
        stroke: StrokeStyle,
    },
    LineStrip {
        points: Vec<ScenePoint>,
        closed: bool,
        stroke: StrokeStyle,
    },
    FilledQuad {
        corners: [ScenePoint; 4],
        color: Color,
    },
}

/// Ordered scene-space primitives for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub background: Color,
    pub primitives: Vec<DrawPrimitive>,
}

impl DrawList {
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Projects every primitive into device pixels for `viewport`.
    ///
    /// Quads project to axis-aligned rectangles because the transform only
    /// scales and translates.
    #[must_use]
    pub fn to_render_frame(&self, viewport: &Viewport) -> RenderFrame {
        let mut frame = RenderFrame::new(viewport.device_size(), self.background);
        for primitive in &self.primitives {
            frame = match primitive {
                DrawPrimitive::Line { from, to, stroke } => {
                    let from = viewport.scene_to_device(*from);
                    let to = viewport.scene_to_device(*to);
                    frame.with_line(
                        LinePrimitive::new(from.x, from.y, to.x, to.y, stroke.width, stroke.color)
                            .with_stroke_style(stroke.pattern),
                    )
                }
                DrawPrimitive::LineStrip {
                    points,
                    closed,
                    stroke,
                } => {
                    let projected = project_points(points, viewport);
                    let runs = finite_runs(projected);
                    let closed = *closed && runs.len() == 1;
                    runs.into_iter().fold(frame, |frame, points| {
                        frame.with_polyline(PolylinePrimitive {
                            points,
                            closed,
                            stroke_width: stroke.width,
                            color: stroke.color,
                            stroke_style: stroke.pattern,
                        })
                    })
                }
                DrawPrimitive::FilledQuad { corners, color } => {
                    let projected = corners.map(|corner| viewport.scene_to_device(corner));
                    let (min, max) = projected.iter().skip(1).fold(
                        (projected[0], projected[0]),
                        |(min, max), point| {
                            (
                                DevicePoint::new(min.x.min(point.x), min.y.min(point.y)),
                                DevicePoint::new(max.x.max(point.x), max.y.max(point.y)),
                            )
                        },
                    );
                    frame.with_rect(RectPrimitive::filled(
                        min.x,
                        min.y,
                        max.x - min.x,
                        max.y - min.y,
                        *color,
                    ))
                }
            };
        }
        frame
    }
}

fn project_points(points: &[ScenePoint], viewport: &Viewport) -> Vec<DevicePoint> {
    #[cfg(feature = "parallel-projection")]
    {
        if points.len() >= PARALLEL_PROJECTION_MIN_POINTS {
            return points
                .par_iter()
                .map(|point| viewport.scene_to_device(*point))
                .collect();
        }
    }

    points
        .iter()
        .map(|point| viewport.scene_to_device(*point))
        .collect()
}

/// Builds the draw list of one frame from viewport snapshots.
///
/// Paint order: cursor crosshair, grid, series, selection overlay, axes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameRenderer;

impl FrameRenderer {
    #[must_use]
    pub fn build<S: Sample>(
        series: &SeriesStore<S>,
        viewport: &Viewport,
        grid: &GridState,
        interaction: &InteractionState,
        style: &PlotStyle,
    ) -> DrawList {
        let mut primitives = Vec::new();
        let visible = viewport.visible_rect();

        if style.show_cursor_grid {
            let cursor = viewport.device_to_scene(interaction.cursor());
            let stroke = StrokeStyle::dashed(style.cursor_grid);
            primitives.push(DrawPrimitive::Line {
                from: ScenePoint::new(visible.min_x, cursor.y),
                to: ScenePoint::new(visible.max_x, cursor.y),
                stroke,
            });
            primitives.push(DrawPrimitive::Line {
                from: ScenePoint::new(cursor.x, visible.min_y),
                to: ScenePoint::new(cursor.x, visible.max_y),
                stroke,
            });
        }

        if style.show_grid {
            let border = viewport.border();
            let stroke = StrokeStyle::solid(style.grid);
            primitives.extend(grid.vertical().lines().iter().map(|&x| DrawPrimitive::Line {
                from: ScenePoint::new(x, border.min_y),
                to: ScenePoint::new(x, border.max_y),
                stroke,
            }));
            primitives.extend(grid.horizontal().lines().iter().map(|&y| DrawPrimitive::Line {
                from: ScenePoint::new(border.min_x, y),
                to: ScenePoint::new(border.max_x, y),
                stroke,
            }));
        }

        for entry in series.visible() {
            let stroke = StrokeStyle {
                width: style.series_width,
                color: entry.color(),
                pattern: LineStrokeStyle::Solid,
            };
            primitives.extend(entry.strips().into_iter().map(|points| {
                DrawPrimitive::LineStrip {
                    points,
                    closed: false,
                    stroke,
                }
            }));
        }

        if let Some(selection) = interaction.selection() {
            let stroke = StrokeStyle::dashed(style.selection_outline);
            let (begin, end) = (selection.begin, selection.end);
            if interaction.mode() == InteractionMode::SelectZoom {
                let corners = [
                    begin,
                    ScenePoint::new(begin.x, end.y),
                    end,
                    ScenePoint::new(end.x, begin.y),
                ];
                primitives.push(DrawPrimitive::LineStrip {
                    points: corners.to_vec(),
                    closed: true,
                    stroke,
                });
                primitives.push(DrawPrimitive::FilledQuad {
                    corners,
                    color: style.selection_fill,
                });
            } else {
                primitives.push(DrawPrimitive::Line {
                    from: begin,
                    to: end,
                    stroke,
                });
            }
        }

        let stroke = StrokeStyle::solid(style.axes);
        primitives.push(DrawPrimitive::Line {
            from: ScenePoint::new(visible.min_x, visible.max_y),
            to: ScenePoint::new(visible.min_x, visible.min_y),
            stroke,
        });
        primitives.push(DrawPrimitive::Line {
            from: ScenePoint::new(visible.min_x, visible.min_y),
            to: ScenePoint::new(visible.max_x, visible.min_y),
            stroke,
        });

        DrawList {
            background: style.background,
            primitives,
        }
    }
}

/// Splits projected points at positions that overflow device space. Runs
/// shorter than two points are dropped.
fn finite_runs(points: Vec<DevicePoint>) -> Vec<Vec<DevicePoint>> {
    if points.iter().all(|point| point.is_finite()) {
        return if points.len() > 1 { vec![points] } else { Vec::new() };
    }
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in points {
        if point.is_finite() {
            current.push(point);
        } else if current.len() > 1 {
            runs.push(std::mem::take(&mut current));
        } else {
            current.clear();
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}
