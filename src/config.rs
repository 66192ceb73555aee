//! Timing constants and runtime configuration for the panel engine.
//!
//! All timeouts are in microseconds to match the monotonic clock the host
//! feeds into [`crate::Gui::tick`].

/// Depth of the page-navigation stack, active page included.
pub const PAGE_NAVIGATION_STACK_SIZE: usize = 5;

/// Capacity of the pending touch-event queue.
pub const MAX_EVENTS: usize = 16;

/// How long the welcome page stays up before the start page replaces it.
pub const WELCOME_PAGE_TIMEOUT_US: u64 = 2_000_000;

/// How long the standby page stays up before power-down completes.
pub const STANDBY_PAGE_TIMEOUT_US: u64 = 10_000_000;

/// How long the entering-standby page stays up before power-down starts.
pub const ENTERING_STANDBY_PAGE_TIMEOUT_US: u64 = 5_000_000;

/// Hold duration after which a pressed contact fires a long tap.
pub const LONG_TAP_TIMEOUT_US: u64 = 1_000_000;

/// Interval between auto-repeat events while a contact stays pressed.
pub const AUTO_REPEAT_DELAY_US: u64 = 200_000;

/// Lifetime of self-dismissing toast alerts.
pub const TOAST_DURATION_US: u64 = 1_000_000;

/// Inactivity on the calibration intro page before calibration starts.
pub const CALIBRATION_INTRO_TIMEOUT_US: u64 = 20_000_000;

/// Value change per encoder detent when editing a focused value.
pub const ENCODER_STEP: f32 = 0.01;

/// Host-tunable knobs that are not timing-critical.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuiConfig {
    /// When set, list-style pages return to the main page after this much
    /// inactivity. `None` disables the return.
    pub back_to_main_delay_us: Option<u64>,
}
