#![cfg_attr(not(test), no_std)]
//! Touchscreen GUI event and page-navigation engine for an embedded bench
//! power-supply front panel.
//!
//! The crate owns the generic input pipeline every screen rides on: gesture
//! classification of raw touch samples, a bounded event queue with coalescing,
//! a bounded page-navigation stack with strict instance ownership, the
//! per-frame tick state machine that drives transitional screens, and the
//! focus/edit protocol for encoder input. Rendering, layout descriptors,
//! instrument business logic and hardware drivers stay behind the traits in
//! [`platform`]; the firmware host implements them and calls
//! [`Gui::handle_touch`] and [`Gui::tick`] once per frame.

pub mod config;
pub mod event;
pub mod gui;
pub mod lock;
pub mod nav;
pub mod pages;
pub mod platform;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use event::{Event, EventKind, EventQueue, GestureClassifier};
pub use gui::Gui;
pub use pages::{ActiveId, InternalId, Page, PageId};
pub use platform::{EncoderInput, Platform};
pub use types::{
    Action, Cursor, DataId, LimitBounds, LimitKind, PointerState, SetError, Style, TouchSample,
    Unit, Value, Widget, WidgetCursor, WidgetKind,
};
