//! Bounded queue of classified touch events, drained once per tick.

use embedded_graphics::prelude::Point;
use heapless::Vec;
use log::trace;

use crate::config::MAX_EVENTS;

/// Classified touch event kind, in the order the classifier emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    TouchDown,
    TouchMove,
    LongTap,
    AutoRepeat,
    TouchUp,
}

/// One classified event with the contact position it was observed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub position: Point,
}

impl Event {
    pub fn new(kind: EventKind, position: Point) -> Self {
        Self { kind, position }
    }
}

/// Pending events between input polling and the per-tick dispatch.
///
/// The queue coalesces bursts that would otherwise starve dispatch: at most
/// one auto-repeat is kept pending, and a move whose position matches the
/// previous move on either axis is dropped as a duplicate. On overflow the
/// oldest move is evicted; if no move is queued the new event is dropped.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<Event, MAX_EVENTS>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: Event) {
        match event.kind {
            EventKind::AutoRepeat => {
                if self
                    .events
                    .iter()
                    .any(|queued| queued.kind == EventKind::AutoRepeat)
                {
                    return;
                }
            }
            EventKind::TouchMove => {
                if let Some(last) = self.events.last() {
                    if last.kind == EventKind::TouchMove
                        && (last.position.x == event.position.x
                            || last.position.y == event.position.y)
                    {
                        return;
                    }
                }
            }
            _ => {}
        }

        if self.events.is_full() {
            match self
                .events
                .iter()
                .position(|queued| queued.kind == EventKind::TouchMove)
            {
                Some(index) => {
                    self.events.remove(index);
                }
                None => {
                    trace!("event queue full, dropping {:?}", event.kind);
                    return;
                }
            }
        }

        // Cannot fail, a slot was freed above.
        let _ = self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Event, MAX_EVENTS> {
        core::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
