//! Alert, confirmation and keypad dialogs.
//!
//! Dialog callbacks are plain function pointers over the engine, so a dialog
//! can chain into further navigation without allocation. Callbacks stay set
//! until the next dialog overwrites them.

use log::warn;

use crate::pages::{
    ActiveId, EnumItem, InternalId, NumericKeypadOptions, NumericKeypadPage, Page, PageId,
    SelectFromEnumPage, TextKeypadPage, TextKeypadPurpose,
};
use crate::platform::Platform;
use crate::types::{Cursor, LimitKind, SetError, Value};
use crate::Gui;

pub type DialogCallback<P> = fn(&mut Gui<P>);

/// Messages and callbacks of the dialog currently on screen.
pub struct DialogState<P: Platform> {
    pub message: Value,
    pub message2: Option<&'static str>,
    pub message3: Option<&'static str>,
    pub(crate) yes_callback: Option<DialogCallback<P>>,
    pub(crate) no_callback: Option<DialogCallback<P>>,
    pub(crate) cancel_callback: Option<DialogCallback<P>>,
    pub(crate) error_action: Option<DialogCallback<P>>,
    pub(crate) error_action_channel: u8,
    pub(crate) pending_limit_kind: Option<LimitKind>,
}

impl<P: Platform> Default for DialogState<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> DialogState<P> {
    pub fn new() -> Self {
        Self {
            message: Value::None,
            message2: None,
            message3: None,
            yes_callback: None,
            no_callback: None,
            cancel_callback: None,
            error_action: None,
            error_action_channel: 0,
            pending_limit_kind: None,
        }
    }
}

impl<P: Platform> Gui<P> {
    // ------------------------------------------------------------------
    // Alerts

    fn alert_message(
        &mut self,
        page_id: PageId,
        message: Value,
        ok_callback: Option<DialogCallback<P>>,
    ) {
        self.dialogs.message = message;
        self.dialogs.yes_callback = ok_callback;

        self.push_page(page_id);

        if page_id == PageId::ErrorAlert {
            self.platform.play_beep();
        }
    }

    pub fn info_message(&mut self, message: &'static str) {
        self.alert_message(PageId::InfoAlert, Value::Str(message), None);
    }

    pub fn info_message_with_callback(
        &mut self,
        message: &'static str,
        ok_callback: DialogCallback<P>,
    ) {
        self.alert_message(PageId::InfoAlert, Value::Str(message), Some(ok_callback));
    }

    pub fn long_info_message(&mut self, message: &'static str, message2: &'static str) {
        self.dialogs.message2 = Some(message2);
        self.alert_message(PageId::InfoLongAlert, Value::Str(message), None);
    }

    pub fn toast_message(
        &mut self,
        message: &'static str,
        message2: &'static str,
        message3: &'static str,
    ) {
        self.dialogs.message2 = Some(message2);
        self.dialogs.message3 = Some(message3);
        self.alert_message(PageId::ToastAlert, Value::Str(message), None);
    }

    pub fn error_message_str(&mut self, message: &'static str) {
        self.alert_message(PageId::ErrorAlert, Value::Str(message), None);
        self.platform.play_beep();
    }

    /// Show a set-rejection error. When the rejection came from a limit that
    /// is not yet at its ceiling, the alert carries a shortcut for raising
    /// that limit on the offending channel.
    pub fn error_message(
        &mut self,
        cursor: Cursor,
        error: SetError,
        ok_callback: Option<DialogCallback<P>>,
    ) {
        let mut page_id = PageId::ErrorAlert;

        if let (Some(kind), Some(channel)) = (error.limit_kind(), cursor.index()) {
            if self.platform.limit(channel, kind) < self.platform.max_limit(channel, kind) {
                self.dialogs.message2 = Some(kind.label());
                self.dialogs.error_action = Some(Self::change_limit_for(kind));
                self.dialogs.error_action_channel = channel;
                self.dialogs.pending_limit_kind = Some(kind);
                page_id = PageId::ErrorAlertWithAction;
            } else {
                page_id = PageId::ErrorToastAlert;
            }
        }

        self.alert_message(page_id, Value::Error(error), ok_callback);
        self.platform.play_beep();
    }

    // ------------------------------------------------------------------
    // Yes/no dialogs

    pub fn yes_no_dialog(
        &mut self,
        page_id: PageId,
        message: &'static str,
        yes_callback: Option<DialogCallback<P>>,
        no_callback: Option<DialogCallback<P>>,
        cancel_callback: Option<DialogCallback<P>>,
    ) {
        self.dialogs.message = Value::Str(message);
        self.dialogs.yes_callback = yes_callback;
        self.dialogs.no_callback = no_callback;
        self.dialogs.cancel_callback = cancel_callback;

        self.push_page(page_id);
    }

    pub fn are_you_sure(&mut self, yes_callback: DialogCallback<P>) {
        self.yes_no_dialog(PageId::YesNo, "Are you sure?", Some(yes_callback), None, None);
    }

    pub fn are_you_sure_with_message(
        &mut self,
        message: &'static str,
        yes_callback: DialogCallback<P>,
    ) {
        self.yes_no_dialog(
            PageId::AreYouSureWithMessage,
            message,
            Some(yes_callback),
            None,
            None,
        );
    }

    // ------------------------------------------------------------------
    // Dialog resolution

    pub fn dialog_yes(&mut self) {
        self.pop_page();
        if let Some(callback) = self.dialogs.yes_callback {
            callback(self);
        }
    }

    pub fn dialog_no(&mut self) {
        self.pop_page();
        if let Some(callback) = self.dialogs.no_callback {
            callback(self);
        }
    }

    pub fn dialog_cancel(&mut self) {
        self.pop_page();
        if let Some(callback) = self.dialogs.cancel_callback {
            callback(self);
        }
    }

    pub fn dialog_ok(&mut self) {
        self.dialog_yes();
    }

    /// Resolve an error alert by running its attached fix-up action.
    pub fn error_message_action(&mut self) {
        self.pop_page();
        if let Some(callback) = self.dialogs.yes_callback {
            callback(self);
        }
        if let Some(action) = self.dialogs.error_action {
            action(self);
        } else {
            warn!("error alert resolved without an action");
        }
    }

    // ------------------------------------------------------------------
    // Limit fix-up

    fn change_limit_for(kind: LimitKind) -> DialogCallback<P> {
        match kind {
            LimitKind::Voltage => Self::change_voltage_limit,
            LimitKind::Current => Self::change_current_limit,
            LimitKind::Power => Self::change_power_limit,
        }
    }

    fn change_voltage_limit(&mut self) {
        self.change_limit(LimitKind::Voltage);
    }

    fn change_current_limit(&mut self) {
        self.change_limit(LimitKind::Current);
    }

    fn change_power_limit(&mut self) {
        self.change_limit(LimitKind::Power);
    }

    fn change_limit(&mut self, kind: LimitKind) {
        let channel = self.dialogs.error_action_channel;
        let bounds = self.platform.limit_bounds(channel, kind);
        self.dialogs.pending_limit_kind = Some(kind);
        self.start_numeric_keypad(
            NumericKeypadOptions {
                min: bounds.min,
                max: bounds.max,
                def: bounds.def,
                unit: kind.unit(),
            },
            Self::on_set_limit,
        );
    }

    fn on_set_limit(&mut self, value: f32) {
        let Some(kind) = self.dialogs.pending_limit_kind else {
            return;
        };
        let channel = self.dialogs.error_action_channel;
        self.platform.set_limit(channel, kind, value);
        self.info_message_with_callback(kind.changed_message(), Self::pop_page_callback);
    }

    fn pop_page_callback(&mut self) {
        self.pop_page();
    }

    // ------------------------------------------------------------------
    // Keypads

    pub fn start_numeric_keypad(
        &mut self,
        options: NumericKeypadOptions,
        on_ok: fn(&mut Gui<P>, f32),
    ) {
        let page = NumericKeypadPage::new(options, on_ok);
        self.push_page_with(
            ActiveId::Page(PageId::NumericKeypad),
            Page::NumericKeypad(page),
        );
    }

    fn start_text_keypad(&mut self, label: &'static str, purpose: TextKeypadPurpose) {
        let page = TextKeypadPage::new(label, purpose);
        self.push_page_with(ActiveId::Page(PageId::Keypad), Page::TextKeypad(page));
    }

    pub(crate) fn keypad_key(&mut self, ch: char) {
        match self.active_page.as_mut() {
            Some(Page::NumericKeypad(page)) => page.key(ch),
            Some(Page::TextKeypad(page)) => page.key(ch),
            _ => return,
        }
        self.request_redraw();
    }

    pub(crate) fn keypad_back(&mut self) {
        match self.active_page.as_mut() {
            Some(Page::NumericKeypad(page)) => page.back(),
            Some(Page::TextKeypad(page)) => page.back(),
            _ => return,
        }
        self.request_redraw();
    }

    pub(crate) fn keypad_cancel(&mut self) {
        self.pop_page();
    }

    pub(crate) fn keypad_ok(&mut self) {
        enum Commit<P: Platform> {
            Numeric(f32, bool, fn(&mut Gui<P>, f32)),
            Text(heapless::String<16>, TextKeypadPurpose),
        }

        let commit = match self.active_page.as_ref() {
            Some(Page::NumericKeypad(page)) => {
                let value = page.value();
                Commit::Numeric(value, page.is_in_range(value), page.on_ok)
            }
            Some(Page::TextKeypad(page)) => Commit::Text(page.text.clone(), page.purpose),
            _ => return,
        };

        match commit {
            Commit::Numeric(value, in_range, on_ok) => {
                if !in_range {
                    self.error_message_str(SetError::ValueOutOfRange.message());
                    return;
                }
                // The keypad stays up; the acceptor decides when to leave.
                on_ok(self, value);
            }
            Commit::Text(entered, purpose) => {
                self.pop_page();
                match purpose {
                    TextKeypadPurpose::UnlockPassword => self.finish_unlock(entered.as_str()),
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Front panel lock

    pub fn lock_front_panel(&mut self) {
        if self.platform.set_front_panel_locked(true) {
            self.info_message("Front panel is locked!");
        }
    }

    pub fn unlock_front_panel(&mut self) {
        if self.platform.system_password().is_empty() {
            if self.platform.set_front_panel_locked(false) {
                self.info_message("Front panel is unlocked!");
            }
        } else {
            self.start_text_keypad("Password: ", TextKeypadPurpose::UnlockPassword);
        }
    }

    fn finish_unlock(&mut self, entered: &str) {
        if entered == self.platform.system_password() {
            if self.platform.set_front_panel_locked(false) {
                self.info_message("Front panel is unlocked!");
            }
        } else {
            self.error_message_str("Invalid password!");
        }
    }

    // ------------------------------------------------------------------
    // Enum selection

    pub fn push_select_from_enum(
        &mut self,
        items: &'static [EnumItem],
        current: u8,
        disabled: Option<u8>,
        on_set: fn(&mut Gui<P>, u8),
    ) {
        let mut page = SelectFromEnumPage::new(items, current, on_set);
        page.disabled = disabled;
        self.push_page_with(
            ActiveId::Internal(InternalId::SelectFromEnum),
            Page::SelectFromEnum(page),
        );
    }

    pub(crate) fn select_enum_item(&mut self, value: u8) {
        let Some(Page::SelectFromEnum(page)) = self.active_page.as_ref() else {
            return;
        };
        let on_set = page.on_set;
        self.pop_page();
        on_set(self, value);
    }
}
