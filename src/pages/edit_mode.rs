//! Slider and step edit-mode page instances.
//!
//! Both pages translate raw input into signed detent counts; the engine
//! applies the counts to the focused value exactly as it does for the
//! encoder, so every edit path shares one clamp-and-set routine.

use embedded_graphics::prelude::Point;

const SLIDER_PIXELS_PER_COUNT: i32 = 4;
const STEP_MULTIPLIERS: [i32; 4] = [1, 5, 10, 100];

/// Full-height drag slider. Vertical movement maps to value detents;
/// dragging up increases the value.
#[derive(Debug, Default)]
pub struct EditModeSliderPage {
    anchor_y: i32,
    tracking: bool,
}

impl EditModeSliderPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_down(&mut self, position: Point) {
        self.anchor_y = position.y;
        self.tracking = true;
    }

    /// Counts accumulated since the last call, consuming the drag distance.
    pub fn touch_move(&mut self, position: Point) -> i32 {
        if !self.tracking {
            return 0;
        }
        let delta = self.anchor_y - position.y;
        let counts = delta / SLIDER_PIXELS_PER_COUNT;
        if counts != 0 {
            self.anchor_y -= counts * SLIDER_PIXELS_PER_COUNT;
        }
        counts
    }

    pub fn touch_up(&mut self) {
        self.tracking = false;
    }

    pub fn on_encoder(&mut self, counter: i32) -> i32 {
        counter
    }
}

/// Step edit mode: each tap or detent moves the value by the selected
/// step multiple.
#[derive(Debug, Default)]
pub struct EditModeStepPage {
    step_index: usize,
}

impl EditModeStepPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_multiplier(&self) -> i32 {
        STEP_MULTIPLIERS[self.step_index]
    }

    pub fn next_step(&mut self) {
        self.step_index = (self.step_index + 1) % STEP_MULTIPLIERS.len();
    }

    pub fn on_encoder(&mut self, counter: i32) -> i32 {
        counter * self.step_multiplier()
    }
}
