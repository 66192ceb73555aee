//! Encoder focus and value editing.
//!
//! One channel value at a time owns the encoder. Rotation nudges it by a
//! fixed step; in confirmation mode the new value is parked as a pending
//! edit until a click commits it. A click with no pending edit advances the
//! focus through the editable values instead.

use log::trace;

use crate::config::ENCODER_STEP;
use crate::pages::{ActiveId, Page};
use crate::platform::Platform;
use crate::types::{Cursor, DataId, Value};
use crate::Gui;

/// Which value the encoder currently edits, plus the pending edit and the
/// snapshot the renderer uses to detect focus movement.
#[derive(Debug, Clone, Copy)]
pub struct FocusState {
    pub cursor: Cursor,
    pub data_id: DataId,
    pub edit_value: Value,
    pub was_cursor: Cursor,
    pub was_data_id: DataId,
}

impl Default for FocusState {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusState {
    pub fn new() -> Self {
        Self {
            cursor: Cursor::channel(0),
            data_id: DataId::VoltageEdit,
            edit_value: Value::None,
            was_cursor: Cursor::channel(0),
            was_data_id: DataId::VoltageEdit,
        }
    }

    pub fn set(&mut self, cursor: Cursor, data_id: DataId) {
        self.cursor = cursor;
        self.data_id = data_id;
        self.edit_value = Value::None;
    }

    pub fn clear_edit(&mut self) {
        self.edit_value = Value::None;
    }

    pub fn has_pending_edit(&self) -> bool {
        !self.edit_value.is_none()
    }

    pub(crate) fn snapshot_previous(&mut self) {
        self.was_cursor = self.cursor;
        self.was_data_id = self.data_id;
    }
}

impl<P: Platform> Gui<P> {
    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn set_focus(&mut self, cursor: Cursor, data_id: DataId) {
        self.focus.set(cursor, data_id);
        self.request_redraw();
    }

    /// Dispatch one encoder poll.
    pub fn on_encoder(&mut self, counter: i32, clicked: bool) {
        if self.platform.is_front_panel_locked() {
            return;
        }

        if clicked {
            self.on_encoder_clicked();
        }

        if counter != 0 {
            self.on_encoder_rotated(counter);
        }
    }

    fn on_encoder_clicked(&mut self) {
        if self.active_page.as_ref().is_some_and(Page::on_encoder_click) {
            self.keypad_ok();
            return;
        }

        if !self.encoder_enabled_in_active_page() {
            return;
        }

        if self.focus.has_pending_edit() {
            self.commit_pending_edit();
        } else {
            self.advance_focus();
        }
        self.platform.play_click();
    }

    fn commit_pending_edit(&mut self) {
        let Some(channel) = self.focus.cursor.index() else {
            return;
        };
        let Some(value) = self.focus.edit_value.as_float() else {
            return;
        };
        match self.platform.set(channel, self.focus.data_id, value) {
            Ok(()) => self.focus.clear_edit(),
            Err(error) => {
                let cursor = self.focus.cursor;
                self.error_message(cursor, error, None);
            }
        }
    }

    /// Voltage hands the focus to current on the same channel; current hands
    /// it to voltage on the next operational channel, wrapping around.
    fn advance_focus(&mut self) {
        let cursor = self.focus.cursor;
        if self.focus.data_id == DataId::VoltageEdit {
            self.focus.set(cursor, DataId::CurrentEdit);
        } else {
            let count = self.platform.channel_count().max(1);
            let current = cursor.index().unwrap_or(0);
            let mut next = (current + 1) % count;
            for _ in 0..count {
                if self.platform.is_channel_ok(next) {
                    break;
                }
                next = (next + 1) % count;
            }
            self.focus.set(Cursor::channel(next), DataId::VoltageEdit);
        }
        trace!("focus moved to {:?} {:?}", self.focus.cursor, self.focus.data_id);
        self.request_redraw();
    }

    fn on_encoder_rotated(&mut self, counter: i32) {
        if let Some(page) = self.active_page.as_mut() {
            if page.on_encoder(counter) {
                self.request_redraw();
                return;
            }
        }

        if let Some(Page::EditModeStep(page)) = self.active_page.as_mut() {
            let counts = page.on_encoder(counter);
            self.adjust_focused_value(counts);
            return;
        }

        self.platform.enable_encoder_acceleration(true);
        let multiplier = self.encoder_speed_multiplier();
        self.platform.set_encoder_speed_multiplier(multiplier);

        if let Some(Page::EditModeSlider(page)) = self.active_page.as_mut() {
            let counts = page.on_encoder(counter);
            self.adjust_focused_value(counts);
            return;
        }

        if self.encoder_enabled_in_active_page() {
            self.adjust_focused_value(counter);
        }
    }

    /// Acceleration scales with the focused value's range relative to the
    /// voltage range, so current and voltage feel the same per detent.
    fn encoder_speed_multiplier(&self) -> f32 {
        let Some(channel) = self.focus.cursor.index() else {
            return 1.0;
        };
        let focus_max = self.platform.max(channel, self.focus.data_id);
        let voltage_max = self.platform.max(channel, DataId::VoltageSet);
        if voltage_max > 0.0 {
            focus_max / voltage_max
        } else {
            1.0
        }
    }

    /// Nudge the focused value by `counter` detents, clamped to its range.
    pub(crate) fn adjust_focused_value(&mut self, counter: i32) {
        let Some(channel) = self.focus.cursor.index() else {
            return;
        };
        let data_id = self.focus.data_id;

        let current = match self.focus.edit_value.as_float() {
            Some(pending) => pending,
            None => match self.platform.get(channel, data_id).as_float() {
                Some(value) => value,
                None => return,
            },
        };
        let unit = self.platform.get(channel, data_id).unit();

        let mut new_value = current + ENCODER_STEP * counter as f32;
        new_value = new_value.clamp(
            self.platform.min(channel, data_id),
            self.platform.max(channel, data_id),
        );

        if self.platform.encoder_confirmation_mode() {
            self.focus.edit_value = Value::Float(new_value, unit);
            self.request_redraw();
        } else if let Err(error) = self.platform.set(channel, data_id, new_value) {
            let cursor = self.focus.cursor;
            self.error_message(cursor, error, None);
        } else {
            self.request_redraw();
        }
    }

    /// The encoder edits values only on pages whose layout exposes an edit
    /// action somewhere.
    fn encoder_enabled_in_active_page(&self) -> bool {
        match self.active_id {
            ActiveId::Page(id) => self.platform.page_has_edit_action(id),
            _ => false,
        }
    }
}
