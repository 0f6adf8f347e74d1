mod bindings;
mod events;
mod state_machine;

pub use bindings::{InputBindings, Key, LockBinding, Modifiers, PointerButton, PointerButtons};
pub use events::{KeyEvent, PointerEvent, WheelEvent};
pub use state_machine::{InputResponse, InputStateMachine};
pub(crate) use state_machine::validate_wheel_zoom_coefficient;

use serde::{Deserialize, Serialize};

use crate::core::{DevicePoint, ScenePoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
    /// Select button pressed, pointer not moved yet.
    SelectStart,
    /// Dragging right of the press origin: rectangle zoom.
    SelectZoom,
    /// Dragging left of the press origin: reset gesture.
    SelectReset,
}

impl InteractionMode {
    #[must_use]
    pub fn is_selecting(self) -> bool {
        matches!(
            self,
            Self::SelectStart | Self::SelectZoom | Self::SelectReset
        )
    }
}

/// Scene-space endpoints of the selection being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub begin: ScenePoint,
    pub end: ScenePoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    origin: ScenePoint,
    selection: Selection,
    cursor: DevicePoint,
    previous_cursor: DevicePoint,
}

impl Default for InteractionState {
    fn default() -> Self {
        let origin = ScenePoint::new(0.0, 0.0);
        Self {
            mode: InteractionMode::Idle,
            origin,
            selection: Selection {
                begin: origin,
                end: origin,
            },
            cursor: DevicePoint::new(0.0, 0.0),
            previous_cursor: DevicePoint::new(0.0, 0.0),
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Scene point where the select button went down.
    #[must_use]
    pub fn origin(&self) -> ScenePoint {
        self.origin
    }

    /// Current selection, only while a zoom or reset drag is shown.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        matches!(
            self.mode,
            InteractionMode::SelectZoom | InteractionMode::SelectReset
        )
        .then_some(self.selection)
    }

    #[must_use]
    pub fn cursor(&self) -> DevicePoint {
        self.cursor
    }

    #[must_use]
    pub fn previous_cursor(&self) -> DevicePoint {
        self.previous_cursor
    }
}
