//! Gesture classification of raw touch samples.
//!
//! Turns the driver's down/move/up contact phases into the queue's event
//! vocabulary, synthesizing long taps and auto-repeats from hold duration.
//! A single sample can emit several events in one tick: a move, the long tap
//! that just matured, and a due auto-repeat all land in order.

use embedded_graphics::prelude::Point;
use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::config::{AUTO_REPEAT_DELAY_US, LONG_TAP_TIMEOUT_US};
use crate::event::{Event, EventKind};
use crate::types::{PointerState, TouchSample};

#[derive(Clone, Copy, Debug)]
enum GestureHsmEvent {
    Sample { now_us: u64, sample: TouchSample },
}

/// Events produced by one classifier tick, in emission order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassifierOutput {
    pub events: [Option<Event>; 3],
}

#[derive(Clone, Copy, Debug, Default)]
struct DispatchContext {
    events: [Option<Event>; 3],
}

impl DispatchContext {
    fn emit(&mut self, event: Event) {
        for slot in &mut self.events {
            if slot.is_none() {
                *slot = Some(event);
                return;
            }
        }
    }

    fn finish(self) -> ClassifierOutput {
        ClassifierOutput {
            events: self.events,
        }
    }
}

/// Wrapper over the classification state machine.
pub struct GestureClassifier {
    machine: statig::blocking::StateMachine<GestureHsm>,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self {
            machine: GestureHsm::new().state_machine(),
        }
    }

    pub fn tick(&mut self, now_us: u64, sample: TouchSample) -> ClassifierOutput {
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&GestureHsmEvent::Sample { now_us, sample }, &mut context);
        context.finish()
    }
}

struct GestureHsm {
    down_us: u64,
    last_auto_repeat_us: u64,
    long_tap_emitted: bool,
}

impl GestureHsm {
    fn new() -> Self {
        Self {
            down_us: 0,
            last_auto_repeat_us: 0,
            long_tap_emitted: false,
        }
    }

    fn begin_press(&mut self, now_us: u64) {
        self.down_us = now_us;
        self.last_auto_repeat_us = now_us;
        self.long_tap_emitted = false;
    }

    fn classify_hold(&mut self, context: &mut DispatchContext, now_us: u64, position: Point) {
        context.emit(Event::new(EventKind::TouchMove, position));

        if !self.long_tap_emitted && now_us.saturating_sub(self.down_us) >= LONG_TAP_TIMEOUT_US {
            self.long_tap_emitted = true;
            context.emit(Event::new(EventKind::LongTap, position));
        }

        if now_us.saturating_sub(self.last_auto_repeat_us) >= AUTO_REPEAT_DELAY_US {
            self.last_auto_repeat_us = now_us;
            context.emit(Event::new(EventKind::AutoRepeat, position));
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Sample { now_us, sample } => match sample.state {
                PointerState::Down => {
                    self.begin_press(*now_us);
                    context.emit(Event::new(EventKind::TouchDown, sample.position));
                    Transition(State::engaged())
                }
                // Stray moves and releases without a preceding press carry
                // no interaction to classify.
                _ => Handled,
            },
        }
    }

    #[state]
    fn engaged(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Sample { now_us, sample } => match sample.state {
                PointerState::Down => {
                    self.begin_press(*now_us);
                    context.emit(Event::new(EventKind::TouchDown, sample.position));
                    Handled
                }
                PointerState::Move => {
                    self.classify_hold(context, *now_us, sample.position);
                    Handled
                }
                PointerState::Up => {
                    context.emit(Event::new(EventKind::TouchUp, sample.position));
                    Transition(State::idle())
                }
                PointerState::None => Handled,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(state: PointerState, x: i32, y: i32) -> TouchSample {
        TouchSample {
            state,
            position: Point::new(x, y),
        }
    }

    fn kinds(output: ClassifierOutput) -> std::vec::Vec<EventKind> {
        output.events.into_iter().flatten().map(|e| e.kind).collect()
    }

    #[test]
    fn press_move_release_classifies_in_order() {
        let mut classifier = GestureClassifier::new();

        assert_eq!(
            kinds(classifier.tick(0, sample(PointerState::Down, 10, 10))),
            [EventKind::TouchDown]
        );
        assert_eq!(
            kinds(classifier.tick(50_000, sample(PointerState::Move, 12, 10))),
            [EventKind::TouchMove]
        );
        assert_eq!(
            kinds(classifier.tick(100_000, sample(PointerState::Up, 12, 10))),
            [EventKind::TouchUp]
        );
    }

    #[test]
    fn long_tap_fires_once_per_press() {
        let mut classifier = GestureClassifier::new();

        let _ = classifier.tick(0, sample(PointerState::Down, 10, 10));
        let _ = classifier.tick(150_000, sample(PointerState::Move, 10, 10));

        let output = kinds(classifier.tick(1_050_000, sample(PointerState::Move, 10, 10)));
        assert!(output.contains(&EventKind::LongTap));

        let output = kinds(classifier.tick(1_100_000, sample(PointerState::Move, 10, 10)));
        assert!(!output.contains(&EventKind::LongTap));

        // A new press re-arms it.
        let _ = classifier.tick(2_000_000, sample(PointerState::Up, 10, 10));
        let _ = classifier.tick(3_000_000, sample(PointerState::Down, 10, 10));
        let output = kinds(classifier.tick(4_100_000, sample(PointerState::Move, 10, 10)));
        assert!(output.contains(&EventKind::LongTap));
    }

    #[test]
    fn auto_repeat_keeps_cadence_while_held() {
        let mut classifier = GestureClassifier::new();

        let _ = classifier.tick(0, sample(PointerState::Down, 10, 10));
        assert_eq!(
            kinds(classifier.tick(150_000, sample(PointerState::Move, 10, 10))),
            [EventKind::TouchMove]
        );
        assert_eq!(
            kinds(classifier.tick(210_000, sample(PointerState::Move, 10, 10))),
            [EventKind::TouchMove, EventKind::AutoRepeat]
        );
        // Cadence restarts from the last repeat.
        assert_eq!(
            kinds(classifier.tick(390_000, sample(PointerState::Move, 10, 10))),
            [EventKind::TouchMove]
        );
        assert_eq!(
            kinds(classifier.tick(420_000, sample(PointerState::Move, 10, 10))),
            [EventKind::TouchMove, EventKind::AutoRepeat]
        );
    }

    #[test]
    fn long_tap_and_auto_repeat_can_share_a_tick() {
        let mut classifier = GestureClassifier::new();

        let _ = classifier.tick(0, sample(PointerState::Down, 10, 10));
        let output = kinds(classifier.tick(1_000_000, sample(PointerState::Move, 10, 10)));
        assert_eq!(
            output,
            [EventKind::TouchMove, EventKind::LongTap, EventKind::AutoRepeat]
        );
    }

    #[test]
    fn ignores_move_and_up_while_idle() {
        let mut classifier = GestureClassifier::new();

        assert!(kinds(classifier.tick(0, sample(PointerState::Move, 10, 10))).is_empty());
        assert!(kinds(classifier.tick(10, sample(PointerState::Up, 10, 10))).is_empty());
        assert!(kinds(classifier.tick(20, sample(PointerState::None, 0, 0))).is_empty());
    }

    #[test]
    fn repeated_down_resets_timers() {
        let mut classifier = GestureClassifier::new();

        let _ = classifier.tick(0, sample(PointerState::Down, 10, 10));
        let _ = classifier.tick(900_000, sample(PointerState::Move, 10, 10));
        let _ = classifier.tick(950_000, sample(PointerState::Down, 20, 20));

        let output = kinds(classifier.tick(1_100_000, sample(PointerState::Move, 20, 20)));
        assert_eq!(output, [EventKind::TouchMove]);
    }
}
