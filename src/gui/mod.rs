//! The GUI engine: page navigation, the per-frame tick and touch dispatch.

mod dialog;
mod focus;

pub use dialog::DialogState;
pub use focus::FocusState;

use embedded_graphics::prelude::Point;
use log::debug;

use crate::config::{
    GuiConfig, CALIBRATION_INTRO_TIMEOUT_US, ENTERING_STANDBY_PAGE_TIMEOUT_US,
    STANDBY_PAGE_TIMEOUT_US, TOAST_DURATION_US, WELCOME_PAGE_TIMEOUT_US,
};
use crate::event::{EventKind, EventQueue, GestureClassifier};
use crate::lock::is_action_enabled;
use crate::nav::{NavigationFrame, NavigationStack};
use crate::pages::{ActiveId, Page, PageId};
use crate::platform::Platform;
use crate::types::{Action, PointerState, TouchSample, Widget, WidgetCursor, WidgetKind};

/// Widget accepted at touch-down, kept until release. Internal pages have no
/// layout widget; the down position stands in for it.
#[derive(Debug, Clone, Copy)]
struct FoundWidget {
    widget: Option<WidgetCursor>,
    position: Point,
}

/// The engine. The host calls [`Gui::handle_touch`] with every touch sample
/// and [`Gui::tick`] once per frame, then renders whatever
/// [`Gui::active_page_id`] says is up.
pub struct Gui<P: Platform> {
    pub platform: P,
    config: GuiConfig,
    active_id: ActiveId,
    previous_id: ActiveId,
    active_page: Option<Page<P>>,
    stack: NavigationStack<P>,
    queue: EventQueue,
    classifier: GestureClassifier,
    pub(crate) focus: FocusState,
    pub(crate) dialogs: DialogState<P>,
    now_us: u64,
    show_page_time_us: u64,
    time_of_last_activity_us: u64,
    touch_action_executed: bool,
    found_widget_at_down: Option<FoundWidget>,
    found_touch_widget: Option<WidgetCursor>,
    selected_widget: Option<WidgetCursor>,
    redraw_requested: bool,
}

impl<P: Platform> Gui<P> {
    pub fn new(platform: P) -> Self {
        Self::with_config(platform, GuiConfig::default())
    }

    pub fn with_config(platform: P, config: GuiConfig) -> Self {
        Self {
            platform,
            config,
            active_id: ActiveId::None,
            previous_id: ActiveId::None,
            active_page: None,
            stack: NavigationStack::new(),
            queue: EventQueue::new(),
            classifier: GestureClassifier::new(),
            focus: FocusState::new(),
            dialogs: DialogState::new(),
            now_us: 0,
            show_page_time_us: 0,
            time_of_last_activity_us: 0,
            touch_action_executed: false,
            found_widget_at_down: None,
            found_touch_widget: None,
            selected_widget: None,
            redraw_requested: false,
        }
    }

    pub fn active_page_id(&self) -> ActiveId {
        self.active_id
    }

    pub fn previous_page_id(&self) -> ActiveId {
        self.previous_id
    }

    pub fn active_page(&self) -> Option<&Page<P>> {
        self.active_page.as_ref()
    }

    pub fn selected_widget(&self) -> Option<&WidgetCursor> {
        self.selected_widget.as_ref()
    }

    /// True once since the last call when the screen needs repainting.
    pub fn take_redraw_request(&mut self) -> bool {
        core::mem::replace(&mut self.redraw_requested, false)
    }

    pub(crate) fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    // ------------------------------------------------------------------
    // Navigation

    fn install_page(&mut self, id: ActiveId, page: Option<Page<P>>) {
        if !self.platform.is_on() {
            self.platform.turn_on();
        }

        self.previous_id = self.active_id;
        self.active_id = id;
        self.active_page = page.or_else(|| id.page().and_then(Page::create));

        // Runs for resumed instances too, so a page re-snapshots whatever
        // changed underneath it while it sat on the stack.
        if let Some(page) = self.active_page.as_mut() {
            page.will_appear(&mut self.platform);
        }

        self.show_page_time_us = self.now_us;
        self.time_of_last_activity_us = self.now_us;
        self.found_widget_at_down = None;
        self.found_touch_widget = None;
        self.selected_widget = None;
        self.redraw_requested = true;

        debug!("show page {:?}", id);
    }

    /// Replace the whole navigation state with a single page.
    pub fn set_page(&mut self, id: PageId) {
        self.stack.clear();
        self.focus.clear_edit();
        self.install_page(ActiveId::Page(id), None);
    }

    /// Suspend the active page and show a new one on top of it.
    pub fn push_page(&mut self, id: PageId) {
        self.push_active(ActiveId::Page(id), None);
    }

    /// Push variant for pages carrying an explicit instance.
    pub fn push_page_with(&mut self, id: ActiveId, page: Page<P>) {
        self.push_active(id, Some(page));
    }

    fn push_active(&mut self, id: ActiveId, page: Option<Page<P>>) {
        if self.active_id != ActiveId::None {
            let suspended = NavigationFrame {
                id: self.active_id,
                page: self.active_page.take(),
            };
            self.stack.push(suspended);
        }
        self.install_page(id, page);
    }

    /// Show a new page in place, dropping the active one.
    pub fn replace_page(&mut self, id: PageId) {
        self.install_page(ActiveId::Page(id), None);
    }

    /// Replace variant for pages carrying an explicit instance.
    pub fn replace_page_with(&mut self, id: ActiveId, page: Page<P>) {
        self.install_page(id, Some(page));
    }

    /// Return to the page underneath. An empty stack lands on the main page.
    pub fn pop_page(&mut self) {
        match self.stack.pop() {
            Some(frame) => self.install_page(frame.id, frame.page),
            None => self.set_page(PageId::Main),
        }
    }

    pub fn show_welcome_page(&mut self) {
        self.set_page(PageId::Welcome);
    }

    pub fn show_standby_page(&mut self) {
        self.set_page(PageId::Standby);
    }

    pub fn show_entering_standby_page(&mut self) {
        if self.active_id != ActiveId::Page(PageId::EnteringStandby) {
            self.set_page(PageId::EnteringStandby);
        }
    }

    pub fn show_self_test_result_page(&mut self) {
        self.set_page(PageId::SelfTestResult);
    }

    pub fn start_page_id(&self) -> PageId {
        if self.platform.any_self_test_failed() {
            PageId::SelfTestResult
        } else {
            PageId::Main
        }
    }

    // ------------------------------------------------------------------
    // Touch input

    /// Feed one raw touch sample. Classified events are queued for the next
    /// [`Gui::tick`].
    pub fn handle_touch(&mut self, now_us: u64, sample: TouchSample) {
        self.now_us = now_us;

        if self.platform.is_calibrating() {
            self.platform.calibration_tick(now_us);
            return;
        }

        // Input is ignored while the instrument powers down.
        if self.active_id == ActiveId::Page(PageId::EnteringStandby) {
            return;
        }

        if sample.state != PointerState::None {
            self.time_of_last_activity_us = now_us;
        }

        let output = self.classifier.tick(now_us, sample);
        for event in output.events.into_iter().flatten() {
            self.queue.push(event);
        }
    }

    // ------------------------------------------------------------------
    // Tick

    /// Advance the engine one frame.
    pub fn tick(&mut self, now_us: u64) {
        self.now_us = now_us;

        if self.active_id == ActiveId::None {
            self.process_events();
            return;
        }

        // Hold transitional pages for their display time.
        let shown_for = now_us.wrapping_sub(self.show_page_time_us);
        match self.active_id {
            ActiveId::Page(PageId::Standby) if shown_for < STANDBY_PAGE_TIMEOUT_US => {
                return;
            }
            ActiveId::Page(PageId::EnteringStandby)
                if shown_for < ENTERING_STANDBY_PAGE_TIMEOUT_US =>
            {
                if !self.platform.is_power_up() {
                    // Power is already down; switch to the standby page with
                    // its clock rewound so the total wait stays the same.
                    let entered_at = self.show_page_time_us;
                    self.show_standby_page();
                    self.show_page_time_us = entered_at
                        .wrapping_sub(STANDBY_PAGE_TIMEOUT_US - ENTERING_STANDBY_PAGE_TIMEOUT_US);
                }
                return;
            }
            ActiveId::Page(PageId::Welcome) if shown_for < WELCOME_PAGE_TIMEOUT_US => {
                return;
            }
            _ => {}
        }

        // Blank the screen once power is down.
        if !self.platform.is_power_up() {
            self.active_id = ActiveId::None;
            self.active_page = None;
            self.stack.clear();
            self.platform.turn_off();
            return;
        }

        // Leave an expired transitional page.
        if matches!(
            self.active_id,
            ActiveId::Page(PageId::Welcome | PageId::Standby | PageId::EnteringStandby)
        ) {
            if !self.platform.is_calibrated() {
                self.set_page(PageId::ScreenCalibrationIntro);
            } else {
                let start = self.start_page_id();
                self.set_page(start);
            }
            return;
        }

        // Honor the persisted display on/off switch.
        let display_state = self.platform.display_state();
        if display_state == 0
            && self.active_id != ActiveId::Page(PageId::DisplayOff)
            && self.active_id != ActiveId::Page(PageId::SelfTestResult)
            && self.platform.is_calibrated()
        {
            self.set_page(PageId::DisplayOff);
            return;
        } else if display_state == 1 && self.active_id == ActiveId::Page(PageId::DisplayOff) {
            self.set_page(PageId::Main);
            return;
        }

        self.process_events();

        if self.active_id == ActiveId::Page(PageId::DisplayOff) {
            return;
        }

        if let Some(input) = self.platform.read_encoder() {
            self.on_encoder(input.counter, input.clicked);
        }

        let inactivity = now_us.saturating_sub(self.time_of_last_activity_us);

        if let Some(delay) = self.config.back_to_main_delay_us {
            if let ActiveId::Page(id) = self.active_id {
                if id.returns_to_main() && inactivity >= delay {
                    self.set_page(PageId::Main);
                }
            }
        }

        if self.active_id == ActiveId::Page(PageId::ScreenCalibrationIntro)
            && inactivity >= CALIBRATION_INTRO_TIMEOUT_US
        {
            let fallback = self.start_page_id();
            self.platform
                .enter_calibration_mode(PageId::ScreenCalibrationYesNoCancel, fallback);
            return;
        }

        if let ActiveId::Page(id) = self.active_id {
            if id.is_toast() && inactivity >= TOAST_DURATION_US {
                self.dialog_ok();
                return;
            }
        }

        if !self.platform.is_calibrating() {
            self.focus.snapshot_previous();
        }
    }

    // ------------------------------------------------------------------
    // Event dispatch

    fn process_events(&mut self) {
        let events = self.queue.drain();
        for event in &events {
            if self.active_id == ActiveId::Page(PageId::ScreenCalibrationIntro) {
                if event.kind == EventKind::TouchUp {
                    let fallback = self.start_page_id();
                    self.platform
                        .enter_calibration_mode(PageId::ScreenCalibrationYesNoCancel, fallback);
                }
                continue;
            }

            match event.kind {
                EventKind::TouchDown => self.on_touch_down(event.position),
                EventKind::TouchMove => self.on_touch_move(event.position),
                EventKind::LongTap => self.on_long_tap(),
                EventKind::AutoRepeat => self.on_auto_repeat(),
                EventKind::TouchUp => self.on_touch_up(),
            }
        }
    }

    fn on_touch_down(&mut self, position: Point) {
        self.touch_action_executed = false;
        self.found_widget_at_down = None;

        if self.active_id.is_internal() {
            let hit = self
                .active_page
                .as_ref()
                .and_then(|page| page.action_at(position))
                .is_some();
            if hit {
                self.found_widget_at_down = Some(FoundWidget {
                    widget: None,
                    position,
                });
                self.request_redraw();
            }
            return;
        }

        let found = self.platform.find_widget_at(self.active_id, position);
        if let Some(found) = found {
            let locked = self.platform.is_front_panel_locked();
            if is_action_enabled(locked, self.active_id, &found.widget) {
                self.found_widget_at_down = Some(FoundWidget {
                    widget: Some(found),
                    position,
                });
                self.select_widget(found);
                return;
            }
        }

        // Unaccepted touches still reach the page-level handlers. The
        // edit-mode branches run with or without a widget under the contact.
        if let Some(found) = found.filter(|f| f.widget.kind == WidgetKind::ButtonGroup) {
            self.platform.handle_button_group_touch(found, position);
        } else if self.active_id == ActiveId::Page(PageId::EditModeSlider) {
            if let Some(Page::EditModeSlider(slider)) = self.active_page.as_mut() {
                slider.touch_down(position);
            }
        } else if self.active_id == ActiveId::Page(PageId::EditModeStep) {
            // Step taps act on release.
        } else if let Some(found) = found.filter(|f| f.widget.kind == WidgetKind::ListGraph) {
            self.found_touch_widget = Some(found);
            self.platform.handle_list_graph_touch(found, position);
        }
    }

    fn on_touch_move(&mut self, position: Point) {
        if self.found_widget_at_down.is_some() {
            return;
        }

        if self.active_id == ActiveId::Page(PageId::EditModeSlider) {
            let counts = match self.active_page.as_mut() {
                Some(Page::EditModeSlider(slider)) => slider.touch_move(position),
                _ => 0,
            };
            if counts != 0 {
                self.adjust_focused_value(counts);
            }
        } else if let Some(found) = self.found_touch_widget {
            self.platform.handle_list_graph_touch(found, position);
        }
    }

    fn on_long_tap(&mut self) {
        if self.touch_action_executed {
            return;
        }

        if self.active_id == ActiveId::None {
            self.touch_action_executed = true;
            self.platform.change_power_state(true);
            self.show_welcome_page();
            return;
        }

        if self.active_id == ActiveId::Page(PageId::DisplayOff) {
            self.touch_action_executed = true;
            self.platform.set_display_state(1);
            return;
        }

        let Some(action) = self.found_action() else {
            return;
        };

        match action {
            Action::TurnOff => {
                self.deselect_widget();
                self.found_widget_at_down = None;
                self.touch_action_executed = true;
                self.show_entering_standby_page();
                self.platform.play_click();
                self.platform.change_power_state(false);
            }
            Action::FrontPanelLock | Action::FrontPanelUnlock => {
                self.deselect_widget();
                self.found_widget_at_down = None;
                self.touch_action_executed = true;
                self.platform.play_click();
                if self.platform.is_front_panel_locked() {
                    self.unlock_front_panel();
                } else {
                    self.lock_front_panel();
                }
            }
            _ => {}
        }
    }

    fn on_auto_repeat(&mut self) {
        let Some(action) = self.found_action() else {
            return;
        };
        if matches!(action, Action::KeypadBack | Action::UpDown) {
            self.touch_action_executed = true;
            self.execute_action(action);
        }
    }

    fn on_touch_up(&mut self) {
        if self.found_widget_at_down.is_some() {
            self.deselect_widget();
            if let Some(action) = self.found_action() {
                if !action.is_long_press_action() {
                    self.execute_action(action);
                }
            }
            self.found_widget_at_down = None;
        } else if self.active_id == ActiveId::Page(PageId::EditModeSlider) {
            if let Some(Page::EditModeSlider(slider)) = self.active_page.as_mut() {
                slider.touch_up();
            }
        } else if self.active_id == ActiveId::Page(PageId::EditModeStep) {
            if let Some(Page::EditModeStep(step)) = self.active_page.as_mut() {
                step.next_step();
            }
            self.request_redraw();
        }
        self.found_touch_widget = None;
    }

    /// Action of the widget accepted at touch-down.
    fn found_action(&self) -> Option<Action> {
        let found = self.found_widget_at_down?;
        match found.widget {
            Some(cursor) => Some(cursor.widget.action),
            None => self
                .active_page
                .as_ref()
                .and_then(|page| page.action_at(found.position)),
        }
    }

    fn found_widget(&self) -> Option<WidgetCursor> {
        self.found_widget_at_down.and_then(|found| found.widget)
    }

    pub(crate) fn execute_action(&mut self, action: Action) {
        if action == Action::None {
            return;
        }
        self.platform.play_click();

        match action {
            Action::Edit => {
                if let Some(found) = self.found_widget() {
                    self.enter_edit_focus(found);
                }
            }
            Action::DialogYes => self.dialog_yes(),
            Action::DialogNo => self.dialog_no(),
            Action::DialogCancel => self.dialog_cancel(),
            Action::DialogOk => self.dialog_ok(),
            Action::ErrorAlertAction => self.error_message_action(),
            Action::KeypadKey(ch) => self.keypad_key(ch),
            Action::KeypadBack => self.keypad_back(),
            Action::KeypadOk => self.keypad_ok(),
            Action::KeypadCancel => self.keypad_cancel(),
            Action::SelectEnumItem(value) => self.select_enum_item(value),
            Action::FrontPanelLock => self.lock_front_panel(),
            Action::FrontPanelUnlock => self.unlock_front_panel(),
            Action::None | Action::TurnOff => {}
            // Remaining host-owned actions.
            Action::UpDown | Action::Other(_) => self.platform.handle_action(action),
        }
    }

    fn enter_edit_focus(&mut self, found: WidgetCursor) {
        if let Some(data) = found.widget.data {
            if data.is_editable() {
                self.focus.set(found.cursor, data);
                self.request_redraw();
            }
        }
    }

    fn select_widget(&mut self, widget: WidgetCursor) {
        self.selected_widget = Some(widget);
        self.request_redraw();
    }

    fn deselect_widget(&mut self) {
        if self.selected_widget.take().is_some() {
            self.request_redraw();
        }
    }

    /// Decorated widget state for the renderer.
    pub fn widget_style(&self, widget: &Widget) -> crate::types::Style {
        crate::lock::transform_style(self.platform.is_front_panel_locked(), widget)
    }
}
