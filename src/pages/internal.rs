//! Keypad and enum-selection page instances.

use core::fmt::Write as _;

use embedded_graphics::prelude::Point;
use heapless::String;

use crate::config::ENCODER_STEP;
use crate::gui::Gui;
use crate::platform::Platform;
use crate::types::{Action, Unit};

const KEYPAD_TEXT_CAPACITY: usize = 16;
const ENUM_ROW_HEIGHT: i32 = 24;

/// Value bounds and default for a numeric keypad session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericKeypadOptions {
    pub min: f32,
    pub max: f32,
    pub def: f32,
    pub unit: Unit,
}

/// Numeric entry page. The accepted value is handed to `on_ok`; the caller
/// decides whether the keypad then stays up or gets popped.
pub struct NumericKeypadPage<P: Platform> {
    pub options: NumericKeypadOptions,
    pub text: String<KEYPAD_TEXT_CAPACITY>,
    pub on_ok: fn(&mut Gui<P>, f32),
}

impl<P: Platform> NumericKeypadPage<P> {
    pub fn new(options: NumericKeypadOptions, on_ok: fn(&mut Gui<P>, f32)) -> Self {
        Self {
            options,
            text: String::new(),
            on_ok,
        }
    }

    pub fn key(&mut self, ch: char) {
        if !ch.is_ascii_digit() && ch != '.' {
            return;
        }
        if ch == '.' && self.text.contains('.') {
            return;
        }
        let _ = self.text.push(ch);
    }

    pub fn back(&mut self) {
        self.text.pop();
    }

    /// The entered value, or the session default while nothing is typed.
    pub fn value(&self) -> f32 {
        self.text.parse().unwrap_or(self.options.def)
    }

    pub fn is_in_range(&self, value: f32) -> bool {
        value >= self.options.min && value <= self.options.max
    }

    pub(crate) fn on_encoder(&mut self, counter: i32) -> bool {
        let value = self.value() + ENCODER_STEP * counter as f32;
        let value = value.clamp(self.options.min, self.options.max);
        self.text.clear();
        let _ = write!(self.text, "{value:.2}");
        true
    }
}

/// What a completed text-keypad session means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKeypadPurpose {
    UnlockPassword,
}

/// Free-text entry page.
pub struct TextKeypadPage {
    pub label: &'static str,
    pub text: String<KEYPAD_TEXT_CAPACITY>,
    pub purpose: TextKeypadPurpose,
}

impl TextKeypadPage {
    pub fn new(label: &'static str, purpose: TextKeypadPurpose) -> Self {
        Self {
            label,
            text: String::new(),
            purpose,
        }
    }

    pub fn key(&mut self, ch: char) {
        let _ = self.text.push(ch);
    }

    pub fn back(&mut self) {
        self.text.pop();
    }
}

/// One row of an enum-selection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumItem {
    pub value: u8,
    pub label: &'static str,
}

/// Modal list of enum values, drawn over the underlying page. Hit testing is
/// done here rather than in the host's layout tables.
pub struct SelectFromEnumPage<P: Platform> {
    pub items: &'static [EnumItem],
    pub current: u8,
    pub disabled: Option<u8>,
    pub on_set: fn(&mut Gui<P>, u8),
}

impl<P: Platform> SelectFromEnumPage<P> {
    pub fn new(items: &'static [EnumItem], current: u8, on_set: fn(&mut Gui<P>, u8)) -> Self {
        Self {
            items,
            current,
            disabled: None,
            on_set,
        }
    }

    pub fn action_at(&self, position: Point) -> Option<Action> {
        if position.y < 0 {
            return Some(Action::DialogCancel);
        }
        let row = (position.y / ENUM_ROW_HEIGHT) as usize;
        match self.items.get(row) {
            Some(item) if Some(item.value) != self.disabled => {
                Some(Action::SelectEnumItem(item.value))
            }
            Some(_) => None,
            // Touches outside the list dismiss it.
            None => Some(Action::DialogCancel),
        }
    }
}
