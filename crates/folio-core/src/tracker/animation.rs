//! Frame-stepped smooth scrolling with ease-out.
//!
//! Each step covers `speed` of the remaining distance and snaps once the
//! remainder is below half a pixel. If the host reports an offset that does
//! not match the last one emitted, the user scrolled mid-animation and the
//! animation gives up.

use super::{ScrollBehavior, ScrollCommand};
use tracing::debug;

const SNAP_THRESHOLD_PX: f32 = 0.5;
const EXTERNAL_SCROLL_TOLERANCE_PX: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    current: f32,
    target: f32,
    speed: f32,
    last_emitted: Option<f32>,
    active: bool,
    instant: bool,
}

impl SmoothScroll {
    pub fn new(speed: f32) -> Self {
        let speed = if speed.is_finite() { speed } else { 0.25 };
        Self {
            current: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
            last_emitted: None,
            active: false,
            instant: false,
        }
    }

    /// Begin animating from `from` towards the command's target, clamped to
    /// the scrollable range.
    pub fn start(&mut self, from: f32, command: &ScrollCommand, max_offset: f32) {
        let max_offset = if max_offset.is_finite() {
            max_offset.max(0.0)
        } else {
            0.0
        };
        self.current = if from.is_finite() { from } else { 0.0 };
        self.target = command.top.clamp(0.0, max_offset);
        self.last_emitted = None;
        self.instant = matches!(command.behavior, ScrollBehavior::Instant);
        self.active = self.instant || (self.target - self.current).abs() > f32::EPSILON;
        debug!(
            from = self.current,
            target = self.target,
            "Started scroll animation"
        );
    }

    /// Advance one frame. Returns the offset to apply, or `None` when idle.
    pub fn step(&mut self) -> Option<f32> {
        if !self.active {
            return None;
        }
        if self.instant {
            self.current = self.target;
        } else {
            self.current += (self.target - self.current) * self.speed;
        }
        if (self.target - self.current).abs() < SNAP_THRESHOLD_PX {
            self.current = self.target;
            self.active = false;
        }
        self.last_emitted = Some(self.current);
        Some(self.current)
    }

    /// Feed an offset observed from a scroll event. Returns `true` if the
    /// animation was abandoned because someone else moved the view.
    pub fn observe_external(&mut self, offset: f32) -> bool {
        if !self.active {
            return false;
        }
        let Some(last) = self.last_emitted else {
            return false;
        };
        if (offset - last).abs() > EXTERNAL_SCROLL_TOLERANCE_PX {
            debug!(
                observed = offset,
                expected = last,
                "Scroll animation interrupted by user"
            );
            self.cancel();
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.instant = false;
        self.last_emitted = None;
    }

    pub fn is_animating(&self) -> bool {
        self.active
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(0.25)
    }
}
