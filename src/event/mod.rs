//! Touch input pipeline: gesture classification and the pending-event queue.

mod classifier;
mod queue;

pub use classifier::GestureClassifier;
pub use queue::{Event, EventKind, EventQueue};
