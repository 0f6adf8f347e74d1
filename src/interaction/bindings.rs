use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Pointer button identifiers, independent of any UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Back,
    Forward,
}

impl PointerButton {
    const fn bit(self) -> u8 {
        match self {
            Self::Primary => 1 << 0,
            Self::Secondary => 1 << 1,
            Self::Middle => 1 << 2,
            Self::Back => 1 << 3,
            Self::Forward => 1 << 4,
        }
    }
}

/// Set of pointer buttons currently held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerButtons {
    bits: u8,
}

impl PointerButtons {
    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn from_button(button: PointerButton) -> Self {
        Self { bits: button.bit() }
    }

    #[must_use]
    pub const fn with(self, button: PointerButton) -> Self {
        Self {
            bits: self.bits | button.bit(),
        }
    }

    #[must_use]
    pub const fn contains(self, button: PointerButton) -> bool {
        (self.bits & button.bit()) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }
}

/// Keyboard modifier mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Self = Self { bits: 0 };
    pub const SHIFT: Self = Self { bits: 1 << 0 };
    pub const CONTROL: Self = Self { bits: 1 << 1 };
    pub const ALT: Self = Self { bits: 1 << 2 };
    pub const META: Self = Self { bits: 1 << 3 };

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// `true` when every modifier of `other` is held. An empty `other` never
    /// matches, so an unbound modifier cannot trigger a lock change.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        other.bits != 0 && (self.bits & other.bits) == other.bits
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }
}

/// Keyboard key identifiers, independent of any UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    Escape,
    Enter,
    Tab,
    Backspace,
    Shift,
    Control,
    Alt,
    Meta,
    Character(char),
    /// Host-specific key code for keys without a named variant.
    Code(u32),
}

/// Key that switches the axis lock, plus the modifier that key reports while
/// held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockBinding {
    pub key: Key,
    pub modifier: Modifiers,
}

/// Rebindable pointer and keyboard controls of one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBindings {
    pub pan_button: PointerButton,
    pub select_button: PointerButton,
    pub reset_key: Key,
    pub cancel_key: Key,
    /// Restricts interaction to the Y axis.
    pub vertical_lock: LockBinding,
    /// Restricts interaction to the X axis.
    pub horizontal_lock: LockBinding,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            pan_button: PointerButton::Secondary,
            select_button: PointerButton::Primary,
            reset_key: Key::Space,
            cancel_key: Key::Escape,
            vertical_lock: LockBinding {
                key: Key::Shift,
                modifier: Modifiers::SHIFT,
            },
            horizontal_lock: LockBinding {
                key: Key::Control,
                modifier: Modifiers::CONTROL,
            },
        }
    }
}

impl InputBindings {
    /// Exchanges the pan and select buttons.
    pub fn swap_pointer_buttons(&mut self) {
        std::mem::swap(&mut self.pan_button, &mut self.select_button);
    }

    /// Exchanges the vertical and horizontal lock bindings.
    pub fn swap_axis_lock_keys(&mut self) {
        std::mem::swap(&mut self.vertical_lock, &mut self.horizontal_lock);
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.pan_button == self.select_button {
            return Err(PlotError::InvalidConfig(
                "pan and select buttons must differ".to_owned(),
            ));
        }

        let keys = [
            ("reset", self.reset_key),
            ("cancel", self.cancel_key),
            ("vertical lock", self.vertical_lock.key),
            ("horizontal lock", self.horizontal_lock.key),
        ];
        for (index, (name, key)) in keys.iter().enumerate() {
            if let Some((other, _)) = keys[index + 1..].iter().find(|(_, k)| k == key) {
                return Err(PlotError::InvalidConfig(format!(
                    "{name} key and {other} key must differ"
                )));
            }
        }
        Ok(())
    }
}
