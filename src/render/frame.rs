use crate::core::DeviceSize;
use crate::error::{PlotError, PlotResult};
use crate::render::{Color, LinePrimitive, PolylinePrimitive, RectPrimitive};

/// One pixel-space draw command. Frames keep them in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum FramePrimitive {
    Line(LinePrimitive),
    Polyline(PolylinePrimitive),
    Rect(RectPrimitive),
}

impl FramePrimitive {
    pub fn validate(&self) -> PlotResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Polyline(polyline) => polyline.validate(),
            Self::Rect(rect) => rect.validate(),
        }
    }
}

/// Backend-agnostic scene for one viewport draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub size: DeviceSize,
    pub background: Color,
    pub primitives: Vec<FramePrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(size: DeviceSize, background: Color) -> Self {
        Self {
            size,
            background,
            primitives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.primitives.push(FramePrimitive::Line(line));
        self
    }

    #[must_use]
    pub fn with_polyline(mut self, polyline: PolylinePrimitive) -> Self {
        self.primitives.push(FramePrimitive::Polyline(polyline));
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.primitives.push(FramePrimitive::Rect(rect));
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.size.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.size.width,
                height: self.size.height,
            });
        }
        self.background.validate()?;
        for primitive in &self.primitives {
            primitive.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.count(|primitive| matches!(primitive, FramePrimitive::Line(_)))
    }

    #[must_use]
    pub fn polyline_count(&self) -> usize {
        self.count(|primitive| matches!(primitive, FramePrimitive::Polyline(_)))
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.count(|primitive| matches!(primitive, FramePrimitive::Rect(_)))
    }

    fn count(&self, predicate: impl Fn(&FramePrimitive) -> bool) -> usize {
        self.primitives
            .iter()
            .filter(|primitive| predicate(primitive))
            .count()
    }
}
