//! Front-panel lock gating.
//!
//! While the panel is locked, only a small allow-list of pages stays
//! interactive and action styles render disabled. Both rules are pure
//! functions over the active page and the hit widget.

use crate::pages::{ActiveId, PageId};
use crate::types::{Action, Style, Widget};

/// Pages that remain interactive while the panel is locked.
fn page_interactive_when_locked(page: ActiveId) -> bool {
    matches!(
        page,
        ActiveId::Page(
            PageId::InfoAlert
                | PageId::ErrorAlert
                | PageId::Keypad
                | PageId::ScreenCalibrationYesNo
                | PageId::ScreenCalibrationYesNoCancel
        )
    )
}

/// Whether a widget's action may execute on the given page.
pub fn is_action_enabled(locked: bool, page: ActiveId, widget: &Widget) -> bool {
    if widget.action == Action::None {
        return false;
    }
    if !locked {
        return true;
    }
    // Unlock must stay reachable from anywhere.
    widget.action == Action::FrontPanelUnlock || page_interactive_when_locked(page)
}

/// Style remap applied while the panel is locked, so action widgets render
/// disabled without the layout layer knowing about the lock.
pub fn transform_style(locked: bool, widget: &Widget) -> Style {
    if !locked {
        return widget.style;
    }
    match widget.style {
        Style::BottomButton if widget.action != Action::FrontPanelUnlock => {
            Style::BottomButtonDisabled
        }
        Style::EditS => Style::DefaultS,
        Style::MonValue => Style::Default,
        Style::ChannelOffLandscape => Style::DefaultLLandscape,
        Style::EditValueActiveSRight => Style::EditValueSRight,
        other => other,
    }
}
