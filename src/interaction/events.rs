use serde::{Deserialize, Serialize};

use crate::core::DevicePoint;
use crate::interaction::{Key, Modifiers, PointerButton, PointerButtons};

/// Pointer press, release or move in device pixels.
///
/// `button` is the button that changed state (`None` for moves); `buttons` is
/// the set held after the change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub position: DevicePoint,
    pub button: Option<PointerButton>,
    pub buttons: PointerButtons,
}

impl PointerEvent {
    #[must_use]
    pub fn press(x: f64, y: f64, button: PointerButton) -> Self {
        Self {
            position: DevicePoint::new(x, y),
            button: Some(button),
            buttons: PointerButtons::from_button(button),
        }
    }

    #[must_use]
    pub fn release(x: f64, y: f64, button: PointerButton) -> Self {
        Self {
            position: DevicePoint::new(x, y),
            button: Some(button),
            buttons: PointerButtons::none(),
        }
    }

    #[must_use]
    pub fn moved(x: f64, y: f64, buttons: PointerButtons) -> Self {
        Self {
            position: DevicePoint::new(x, y),
            button: None,
            buttons,
        }
    }
}

/// Key press or release.
///
/// `modifiers` is the modifier state after the change, so releasing Shift
/// while Control is held reports `Modifiers::CONTROL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[must_use]
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Wheel rotation at a device position. Positive `delta_y` scrolls up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub position: DevicePoint,
    pub delta_y: f64,
}

impl WheelEvent {
    #[must_use]
    pub fn new(x: f64, y: f64, delta_y: f64) -> Self {
        Self {
            position: DevicePoint::new(x, y),
            delta_y,
        }
    }
}
