//! Page identifiers and owned page instances.
//!
//! Most pages are pure layout and carry no state; they exist only as a
//! [`PageId`] the host's renderer keys off. Pages that do carry state get an
//! owned instance in [`Page`], constructed when the page is shown and dropped
//! when it leaves the navigation stack.

mod edit_mode;
mod internal;

pub use edit_mode::{EditModeSliderPage, EditModeStepPage};
pub use internal::{
    EnumItem, NumericKeypadOptions, NumericKeypadPage, SelectFromEnumPage, TextKeypadPage,
    TextKeypadPurpose,
};

use embedded_graphics::prelude::Point;

use crate::platform::Platform;
use crate::types::Action;

/// Layout page identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageId {
    Welcome,
    Standby,
    EnteringStandby,
    DisplayOff,
    SelfTestResult,
    Main,
    EventQueue,
    ChSettingsProtection,
    ChSettingsAdv,
    ChSettingsInfo,
    SysSettings,
    SysInfo,
    SysInfo2,
    UserProfiles,
    UserProfiles2,
    UserProfileSettings,
    ScreenCalibrationIntro,
    ScreenCalibrationYesNo,
    ScreenCalibrationYesNoCancel,
    YesNo,
    AreYouSureWithMessage,
    InfoAlert,
    InfoLongAlert,
    ToastAlert,
    ErrorAlert,
    ErrorLongAlert,
    ErrorAlertWithAction,
    ErrorToastAlert,
    Keypad,
    NumericKeypad,
    EditModeKeypad,
    EditModeSlider,
    EditModeStep,
}

impl PageId {
    /// Pages whose touch handling bypasses the action-enabled check because
    /// the page itself resolves what a hit means.
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            PageId::InfoAlert
                | PageId::InfoLongAlert
                | PageId::ToastAlert
                | PageId::ErrorAlert
                | PageId::ErrorLongAlert
                | PageId::ErrorAlertWithAction
                | PageId::ErrorToastAlert
        )
    }

    /// Toast pages that dismiss themselves after a short delay.
    pub fn is_toast(&self) -> bool {
        matches!(self, PageId::ToastAlert | PageId::ErrorToastAlert)
    }

    /// List-style pages that fall back to the main page after inactivity.
    pub fn returns_to_main(&self) -> bool {
        matches!(
            self,
            PageId::EventQueue
                | PageId::UserProfiles
                | PageId::UserProfiles2
                | PageId::UserProfileSettings
        )
    }
}

/// Pages outside the layout page table, hit-tested by the page object itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalId {
    SelectFromEnum,
}

/// What the display currently shows. `None` means the display is powered
/// down and nothing is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveId {
    #[default]
    None,
    Internal(InternalId),
    Page(PageId),
}

impl ActiveId {
    pub fn is_internal(&self) -> bool {
        matches!(self, ActiveId::Internal(_))
    }

    pub fn page(&self) -> Option<PageId> {
        match self {
            ActiveId::Page(id) => Some(*id),
            _ => None,
        }
    }
}

/// Stateful page instance owned by the navigation stack.
pub enum Page<P: Platform> {
    EventQueue(EventQueuePage),
    SysSettings(SysSettingsPage),
    NumericKeypad(NumericKeypadPage<P>),
    TextKeypad(TextKeypadPage),
    SelectFromEnum(SelectFromEnumPage<P>),
    EditModeSlider(EditModeSliderPage),
    EditModeStep(EditModeStepPage),
}

impl<P: Platform> Page<P> {
    /// Construct the instance for pages that carry state. Layout-only pages
    /// and pages pushed with an explicit instance return `None`.
    pub fn create(id: PageId) -> Option<Self> {
        match id {
            PageId::EventQueue => Some(Page::EventQueue(EventQueuePage::new())),
            PageId::SysSettings => Some(Page::SysSettings(SysSettingsPage::new())),
            PageId::EditModeSlider => Some(Page::EditModeSlider(EditModeSliderPage::new())),
            PageId::EditModeStep => Some(Page::EditModeStep(EditModeStepPage::new())),
            _ => None,
        }
    }

    /// Called right before the page becomes visible.
    pub fn will_appear(&mut self, platform: &mut P) {
        match self {
            Page::EventQueue(page) => page.will_appear(),
            Page::SysSettings(page) => page.will_appear(platform),
            _ => {}
        }
    }

    /// Hit-test for internal pages. Layout pages return `None` and go
    /// through the host's widget lookup instead.
    pub fn action_at(&self, position: Point) -> Option<Action> {
        match self {
            Page::SelectFromEnum(page) => page.action_at(position),
            _ => None,
        }
    }

    /// Encoder rotation is offered to the page first. Returns true when the
    /// page consumed it.
    pub fn on_encoder(&mut self, counter: i32) -> bool {
        match self {
            Page::NumericKeypad(page) => page.on_encoder(counter),
            _ => false,
        }
    }

    /// True when the page claims encoder clicks as its confirm gesture.
    pub fn on_encoder_click(&self) -> bool {
        matches!(self, Page::NumericKeypad(_) | Page::TextKeypad(_))
    }
}

/// Scroll position of the event-log page.
#[derive(Debug, Default)]
pub struct EventQueuePage {
    pub scroll_offset: u16,
}

impl EventQueuePage {
    pub fn new() -> Self {
        Self::default()
    }

    fn will_appear(&mut self) {
        self.scroll_offset = 0;
    }
}

/// System settings page, snapshotting the values it edits on entry.
#[derive(Debug, Default)]
pub struct SysSettingsPage {
    pub encoder_confirmation_mode: bool,
    pub dirty: bool,
}

impl SysSettingsPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn will_appear<P: Platform>(&mut self, platform: &mut P) {
        self.encoder_confirmation_mode = platform.encoder_confirmation_mode();
        self.dirty = false;
    }
}
