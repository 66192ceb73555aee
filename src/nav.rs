//! Bounded page-navigation stack.
//!
//! The stack owns page instances exclusively: a page object lives in exactly
//! one frame, moves out when reactivated and is dropped when its frame is
//! evicted or popped without reactivation.

use heapless::Vec;
use log::debug;

use crate::config::PAGE_NAVIGATION_STACK_SIZE;
use crate::pages::{ActiveId, Page};
use crate::platform::Platform;

/// One suspended page: its identifier plus the owned instance, when the
/// page carries state.
pub struct NavigationFrame<P: Platform> {
    pub id: ActiveId,
    pub page: Option<Page<P>>,
}

/// Fixed-depth stack of suspended pages underneath the active one.
pub struct NavigationStack<P: Platform> {
    frames: Vec<NavigationFrame<P>, PAGE_NAVIGATION_STACK_SIZE>,
}

impl<P: Platform> Default for NavigationStack<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> NavigationStack<P> {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Suspend a page. When the stack is full the bottom frame is evicted
    /// and its page instance dropped.
    pub fn push(&mut self, frame: NavigationFrame<P>) {
        if self.frames.is_full() {
            let evicted = self.frames.remove(0);
            debug!("navigation stack full, evicting {:?}", evicted.id);
        }
        if self.frames.push(frame).is_err() {
            // Unreachable, a slot was freed above.
            debug!("navigation stack push failed");
        }
    }

    pub fn pop(&mut self) -> Option<NavigationFrame<P>> {
        self.frames.pop()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
