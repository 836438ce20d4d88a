//! Mouse look accumulation
//!
//! Raw mouse motion arrives from the event loop at any rate; the look
//! integrator wants exactly one delta per frame. [`LookAccumulator`] sums raw
//! motion until the frame consumes it.
//!
//! Screen-space motion has +Y pointing down. The accumulator flips it so the
//! consumed delta has +Y meaning "look up", which is the convention of
//! [`InputFrame::look_delta`](super::InputFrame::look_delta).

use glam::Vec2;

/// Accumulates raw mouse motion between frames.
#[derive(Debug, Clone, Default)]
pub struct LookAccumulator {
    delta: Vec2,
    /// Whether the cursor is captured; uncaptured motion is not look input.
    captured: bool,
}

impl LookAccumulator {
    /// New accumulator with the cursor captured.
    pub fn new() -> Self {
        Self {
            delta: Vec2::ZERO,
            captured: true,
        }
    }

    /// Add raw screen-space motion (`dy` positive = mouse moved down).
    #[inline]
    pub fn accumulate(&mut self, dx: f32, dy: f32) {
        if self.captured {
            self.delta.x += dx;
            self.delta.y -= dy;
        }
    }

    /// Return the accumulated delta (look-up positive) and reset it.
    #[inline]
    pub fn consume(&mut self) -> Vec2 {
        std::mem::take(&mut self.delta)
    }

    /// Peek without consuming.
    #[inline]
    pub fn peek(&self) -> Vec2 {
        self.delta
    }

    /// Releasing the cursor discards pending motion to prevent a jump on recapture.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
        if !captured {
            self.delta = Vec2::ZERO;
        }
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.captured
    }
}
