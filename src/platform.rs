//! Host integration traits.
//!
//! The engine is hardware-agnostic; everything it needs from the firmware
//! host is split into small capability traits gathered under [`Platform`].
//! Hosts implement the lot on one struct; tests use a recording fake.

use embedded_graphics::prelude::Point;

use crate::pages::{ActiveId, PageId};
use crate::types::{LimitBounds, LimitKind, SetError, Value, WidgetCursor};
use crate::Action;

/// One encoder poll result: accumulated detents plus the click edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderInput {
    pub counter: i32,
    pub clicked: bool,
}

/// Display power control.
pub trait Display {
    fn turn_on(&mut self);
    fn turn_off(&mut self);
    fn is_on(&self) -> bool;
}

/// Touch-panel calibration state and mode entry.
pub trait TouchPanel {
    fn is_calibrated(&self) -> bool;
    fn is_calibrating(&self) -> bool;
    /// Enter calibration mode. `result_page` is shown when calibration
    /// finishes, `fallback_page` when it is dismissed.
    fn enter_calibration_mode(&mut self, result_page: PageId, fallback_page: PageId);
    /// Advance the calibration procedure one frame.
    fn calibration_tick(&mut self, now_us: u64);
}

/// Instrument power state.
pub trait Power {
    fn is_power_up(&self) -> bool;
    fn change_power_state(&mut self, up: bool);
}

/// Power-on self test results.
pub trait SelfTest {
    fn any_self_test_failed(&self) -> bool;
}

/// Channel data access. Values use the type-tagged [`Value`]; sets go through
/// the instrument's protection checks and may be rejected.
pub trait Channels {
    fn channel_count(&self) -> u8;
    fn is_channel_ok(&self, channel: u8) -> bool;
    fn get(&self, channel: u8, item: crate::DataId) -> Value;
    fn set(&mut self, channel: u8, item: crate::DataId, value: f32) -> Result<(), SetError>;
    fn min(&self, channel: u8, item: crate::DataId) -> f32;
    fn max(&self, channel: u8, item: crate::DataId) -> f32;
    fn limit(&self, channel: u8, kind: LimitKind) -> f32;
    fn max_limit(&self, channel: u8, kind: LimitKind) -> f32;
    fn limit_bounds(&self, channel: u8, kind: LimitKind) -> LimitBounds;
    fn set_limit(&mut self, channel: u8, kind: LimitKind, value: f32);
}

/// Layout hit testing. The engine never sees the widget tree, only the
/// resolved widget under a point.
pub trait WidgetLookup {
    fn find_widget_at(&self, page: ActiveId, position: Point) -> Option<WidgetCursor>;
    /// Whether the page's layout binds any widget to an edit action.
    fn page_has_edit_action(&self, page: PageId) -> bool;
}

/// Persistent configuration the engine reads and updates.
pub trait Persist {
    fn is_front_panel_locked(&self) -> bool;
    /// Returns false when the change could not be stored.
    fn set_front_panel_locked(&mut self, locked: bool) -> bool;
    fn display_state(&self) -> u8;
    fn set_display_state(&mut self, state: u8);
    fn system_password(&self) -> &str;
    fn encoder_confirmation_mode(&self) -> bool;
}

/// Audible feedback.
pub trait Sound {
    fn play_click(&mut self);
    fn play_beep(&mut self);
}

/// Everything the engine needs from the firmware host.
pub trait Platform:
    Display + TouchPanel + Power + SelfTest + Channels + WidgetLookup + Persist + Sound
{
    /// Poll the rotary encoder. Returns `None` when nothing happened since
    /// the last poll.
    fn read_encoder(&mut self) -> Option<EncoderInput>;
    fn enable_encoder_acceleration(&mut self, enabled: bool);
    fn set_encoder_speed_multiplier(&mut self, multiplier: f32);
    /// Execute a host-owned widget action.
    fn handle_action(&mut self, action: Action);
    /// Raw touch on a button-group widget whose action is not enabled.
    fn handle_button_group_touch(&mut self, widget: WidgetCursor, position: Point);
    /// Raw touch latched onto a list-graph widget.
    fn handle_list_graph_touch(&mut self, widget: WidgetCursor, position: Point);
}
