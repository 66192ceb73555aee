//! Recording platform fake for engine tests.

use std::collections::HashMap;
use std::vec::Vec;

use embedded_graphics::prelude::Point;

use crate::pages::{ActiveId, PageId};
use crate::platform::{
    Channels, Display, EncoderInput, Persist, Platform, Power, SelfTest, Sound, TouchPanel,
    WidgetLookup,
};
use crate::types::{Action, DataId, LimitBounds, LimitKind, SetError, Value, WidgetCursor};

pub struct TestPlatform {
    pub display_on: bool,
    pub power_up: bool,
    pub calibrated: bool,
    pub calibrating: bool,
    pub calibration_entered: Option<(PageId, PageId)>,
    pub calibration_ticks: u32,
    pub self_test_failed: bool,
    pub locked: bool,
    pub display_state_flag: u8,
    pub password: String,
    pub confirmation_mode: bool,
    pub channel_count: u8,
    pub channel_ok: [bool; 4],
    pub values: HashMap<(u8, u8), f32>,
    pub value_min: f32,
    pub value_max: f32,
    pub limits: HashMap<(u8, u8), f32>,
    pub max_limits: HashMap<(u8, u8), f32>,
    pub bounds: LimitBounds,
    pub set_result: Result<(), SetError>,
    pub set_calls: Vec<(u8, DataId, f32)>,
    pub set_limit_calls: Vec<(u8, LimitKind, f32)>,
    pub widget_at: Option<WidgetCursor>,
    pub edit_action_pages: Vec<PageId>,
    pub actions: Vec<Action>,
    pub button_group_touches: Vec<Point>,
    pub list_graph_touches: Vec<Point>,
    pub clicks: u32,
    pub beeps: u32,
    pub encoder: Option<EncoderInput>,
    pub acceleration_enabled: bool,
    pub speed_multiplier: f32,
    pub marker: u32,
}

impl Default for TestPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPlatform {
    pub fn new() -> Self {
        Self {
            display_on: false,
            power_up: true,
            calibrated: true,
            calibrating: false,
            calibration_entered: None,
            calibration_ticks: 0,
            self_test_failed: false,
            locked: false,
            display_state_flag: 1,
            password: String::new(),
            confirmation_mode: false,
            channel_count: 2,
            channel_ok: [true; 4],
            values: HashMap::new(),
            value_min: 0.0,
            value_max: 40.0,
            limits: HashMap::new(),
            max_limits: HashMap::new(),
            bounds: LimitBounds {
                min: 0.0,
                max: 40.0,
                def: 40.0,
            },
            set_result: Ok(()),
            set_calls: Vec::new(),
            set_limit_calls: Vec::new(),
            widget_at: None,
            edit_action_pages: vec![PageId::Main],
            actions: Vec::new(),
            button_group_touches: Vec::new(),
            list_graph_touches: Vec::new(),
            clicks: 0,
            beeps: 0,
            encoder: None,
            acceleration_enabled: false,
            speed_multiplier: 1.0,
            marker: 0,
        }
    }

    fn data_key(item: DataId) -> u8 {
        match item {
            DataId::VoltageEdit => 0,
            DataId::CurrentEdit => 1,
            DataId::VoltageSet => 2,
            DataId::CurrentSet => 3,
            DataId::VoltageMon => 4,
            DataId::CurrentMon => 5,
            DataId::Other(_) => 6,
        }
    }

    fn limit_key(kind: LimitKind) -> u8 {
        match kind {
            LimitKind::Voltage => 0,
            LimitKind::Current => 1,
            LimitKind::Power => 2,
        }
    }

    pub fn set_value(&mut self, channel: u8, item: DataId, value: f32) {
        self.values.insert((channel, Self::data_key(item)), value);
    }

    pub fn set_channel_limit(&mut self, channel: u8, kind: LimitKind, limit: f32, max: f32) {
        self.limits.insert((channel, Self::limit_key(kind)), limit);
        self.max_limits.insert((channel, Self::limit_key(kind)), max);
    }
}

impl Display for TestPlatform {
    fn turn_on(&mut self) {
        self.display_on = true;
    }

    fn turn_off(&mut self) {
        self.display_on = false;
    }

    fn is_on(&self) -> bool {
        self.display_on
    }
}

impl TouchPanel for TestPlatform {
    fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    fn is_calibrating(&self) -> bool {
        self.calibrating
    }

    fn enter_calibration_mode(&mut self, result_page: PageId, fallback_page: PageId) {
        self.calibrating = true;
        self.calibration_entered = Some((result_page, fallback_page));
    }

    fn calibration_tick(&mut self, _now_us: u64) {
        self.calibration_ticks += 1;
    }
}

impl Power for TestPlatform {
    fn is_power_up(&self) -> bool {
        self.power_up
    }

    fn change_power_state(&mut self, up: bool) {
        self.power_up = up;
    }
}

impl SelfTest for TestPlatform {
    fn any_self_test_failed(&self) -> bool {
        self.self_test_failed
    }
}

impl Channels for TestPlatform {
    fn channel_count(&self) -> u8 {
        self.channel_count
    }

    fn is_channel_ok(&self, channel: u8) -> bool {
        self.channel_ok[channel as usize]
    }

    fn get(&self, channel: u8, item: DataId) -> Value {
        match self.values.get(&(channel, Self::data_key(item))) {
            Some(value) => Value::Float(*value, crate::types::Unit::Volt),
            None => Value::None,
        }
    }

    fn set(&mut self, channel: u8, item: DataId, value: f32) -> Result<(), SetError> {
        self.set_calls.push((channel, item, value));
        self.set_result?;
        self.set_value(channel, item, value);
        Ok(())
    }

    fn min(&self, _channel: u8, _item: DataId) -> f32 {
        self.value_min
    }

    fn max(&self, _channel: u8, _item: DataId) -> f32 {
        self.value_max
    }

    fn limit(&self, channel: u8, kind: LimitKind) -> f32 {
        *self
            .limits
            .get(&(channel, Self::limit_key(kind)))
            .unwrap_or(&self.value_max)
    }

    fn max_limit(&self, channel: u8, kind: LimitKind) -> f32 {
        *self
            .max_limits
            .get(&(channel, Self::limit_key(kind)))
            .unwrap_or(&self.value_max)
    }

    fn limit_bounds(&self, _channel: u8, _kind: LimitKind) -> LimitBounds {
        self.bounds
    }

    fn set_limit(&mut self, channel: u8, kind: LimitKind, value: f32) {
        self.set_limit_calls.push((channel, kind, value));
        self.limits.insert((channel, Self::limit_key(kind)), value);
    }
}

impl WidgetLookup for TestPlatform {
    fn find_widget_at(&self, _page: ActiveId, _position: Point) -> Option<WidgetCursor> {
        self.widget_at
    }

    fn page_has_edit_action(&self, page: PageId) -> bool {
        self.edit_action_pages.contains(&page)
    }
}

impl Persist for TestPlatform {
    fn is_front_panel_locked(&self) -> bool {
        self.locked
    }

    fn set_front_panel_locked(&mut self, locked: bool) -> bool {
        self.locked = locked;
        true
    }

    fn display_state(&self) -> u8 {
        self.display_state_flag
    }

    fn set_display_state(&mut self, state: u8) {
        self.display_state_flag = state;
    }

    fn system_password(&self) -> &str {
        &self.password
    }

    fn encoder_confirmation_mode(&self) -> bool {
        self.confirmation_mode
    }
}

impl Sound for TestPlatform {
    fn play_click(&mut self) {
        self.clicks += 1;
    }

    fn play_beep(&mut self) {
        self.beeps += 1;
    }
}

impl Platform for TestPlatform {
    fn read_encoder(&mut self) -> Option<EncoderInput> {
        self.encoder.take()
    }

    fn enable_encoder_acceleration(&mut self, enabled: bool) {
        self.acceleration_enabled = enabled;
    }

    fn set_encoder_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier;
    }

    fn handle_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    fn handle_button_group_touch(&mut self, _widget: WidgetCursor, position: Point) {
        self.button_group_touches.push(position);
    }

    fn handle_list_graph_touch(&mut self, _widget: WidgetCursor, position: Point) {
        self.list_graph_touches.push(position);
    }
}
