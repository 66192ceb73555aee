//! Shared value, cursor and widget types exchanged between the engine and
//! the host's layout/data layers.

use embedded_graphics::prelude::Point;

/// Measurement unit attached to a [`Value::Float`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    None,
    Volt,
    MilliVolt,
    Amper,
    MilliAmper,
    Watt,
}

/// Error reported by the host data layer when a set is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetError {
    VoltageLimitExceeded,
    CurrentLimitExceeded,
    PowerLimitExceeded,
    ValueOutOfRange,
    Other(&'static str),
}

impl SetError {
    pub fn message(&self) -> &'static str {
        match self {
            SetError::VoltageLimitExceeded => "Voltage limit exceeded!",
            SetError::CurrentLimitExceeded => "Current limit exceeded!",
            SetError::PowerLimitExceeded => "Power limit exceeded!",
            SetError::ValueOutOfRange => "Value out of range!",
            SetError::Other(message) => message,
        }
    }

    /// The limit whose ceiling caused the rejection, when there is one.
    pub fn limit_kind(&self) -> Option<LimitKind> {
        match self {
            SetError::VoltageLimitExceeded => Some(LimitKind::Voltage),
            SetError::CurrentLimitExceeded => Some(LimitKind::Current),
            SetError::PowerLimitExceeded => Some(LimitKind::Power),
            _ => None,
        }
    }
}

/// Tagged value produced by the host data layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Int(i32),
    Float(f32, Unit),
    Str(&'static str),
    Error(SetError),
}

impl Value {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(value, _) => Some(*value),
            _ => None,
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            Value::Float(_, unit) => *unit,
            _ => Unit::None,
        }
    }
}

/// Addresses which instance of a data item a widget binds to. For this
/// instrument the only instanced axis is the output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    channel: Option<u8>,
}

impl Cursor {
    pub fn none() -> Self {
        Self { channel: None }
    }

    pub fn channel(index: u8) -> Self {
        Self {
            channel: Some(index),
        }
    }

    pub fn index(&self) -> Option<u8> {
        self.channel
    }
}

/// Data item identifiers the engine itself needs to reason about. Everything
/// else flows through the host untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataId {
    VoltageEdit,
    CurrentEdit,
    VoltageSet,
    CurrentSet,
    VoltageMon,
    CurrentMon,
    Other(u16),
}

impl DataId {
    /// Whether the encoder may pick this item up as the edit focus.
    pub fn is_editable(&self) -> bool {
        matches!(self, DataId::VoltageEdit | DataId::CurrentEdit)
    }
}

/// Actions a widget can trigger. Engine-owned actions are dispatched
/// internally; [`Action::Other`] is forwarded to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    None,
    Edit,
    TurnOff,
    FrontPanelLock,
    FrontPanelUnlock,
    KeypadBack,
    UpDown,
    DialogYes,
    DialogNo,
    DialogCancel,
    DialogOk,
    ErrorAlertAction,
    KeypadKey(char),
    KeypadOk,
    KeypadCancel,
    SelectEnumItem(u8),
    Other(u16),
}

impl Action {
    /// Actions that fire on long press and must stay silent on release.
    pub fn is_long_press_action(&self) -> bool {
        matches!(
            self,
            Action::TurnOff | Action::FrontPanelLock | Action::FrontPanelUnlock
        )
    }
}

/// Style identifiers the lock layer remaps while the panel is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Default,
    DefaultS,
    DefaultLLandscape,
    BottomButton,
    BottomButtonDisabled,
    EditS,
    MonValue,
    ChannelOffLandscape,
    EditValueActiveSRight,
    EditValueSRight,
    Other(u16),
}

/// Widget classes with engine-visible touch behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetKind {
    #[default]
    Text,
    Button,
    ButtonGroup,
    ListGraph,
    Other(u8),
}

/// Slice of a layout widget the engine needs for hit handling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Widget {
    pub kind: WidgetKind,
    pub action: Action,
    pub style: Style,
    pub data: Option<DataId>,
}

/// A widget together with the cursor it was resolved under.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WidgetCursor {
    pub cursor: Cursor,
    pub widget: Widget,
}

/// Contact phase of one raw touch sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerState {
    #[default]
    None,
    Down,
    Move,
    Up,
}

/// One raw sample from the touch driver, already calibrated to screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchSample {
    pub state: PointerState,
    pub position: Point,
}

/// Which channel limit an error-with-fix dialog offers to raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Voltage,
    Current,
    Power,
}

impl LimitKind {
    pub fn label(&self) -> &'static str {
        match self {
            LimitKind::Voltage => "Change voltage limit",
            LimitKind::Current => "Change current limit",
            LimitKind::Power => "Change power limit",
        }
    }

    pub fn changed_message(&self) -> &'static str {
        match self {
            LimitKind::Voltage => "Voltage limit changed!",
            LimitKind::Current => "Current limit changed!",
            LimitKind::Power => "Power limit changed!",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            LimitKind::Voltage => Unit::Volt,
            LimitKind::Current => Unit::Amper,
            LimitKind::Power => Unit::Watt,
        }
    }
}

/// Numeric keypad bounds for a limit edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitBounds {
    pub min: f32,
    pub max: f32,
    pub def: f32,
}
