//! Frame-driven transient animations
//!
//! A [`Tween`] is an explicit in-flight interpolation advanced once per tick.
//! A [`TweenSlot`] holds at most one tween of a kind: starting a new one drops
//! the previous one, so two interpolations never race over the same value.

use glam::Vec3;

use crate::physics::CapsuleShape;

/// Linear interpolation between two values of the same type.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(self, to: Self, t: f32) -> Self {
        Vec3::lerp(self, to, t)
    }
}

impl Lerp for CapsuleShape {
    #[inline]
    fn lerp(self, to: Self, t: f32) -> Self {
        CapsuleShape {
            height: self.height.lerp(to.height, t),
            center: self.center.lerp(to.center, t),
        }
    }
}

/// Timed linear interpolation from `start` to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T: Lerp> {
    start: T,
    target: T,
    elapsed: f32,
    duration: f32,
}

impl<T: Lerp> Tween<T> {
    /// A zero or negative duration completes on the first advance.
    pub fn new(start: T, target: T, duration: f32) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration,
        }
    }

    /// Advance by `dt` seconds.
    ///
    /// # Returns
    /// `(value, done)`. When `done` is true the value is exactly the target.
    pub fn advance(&mut self, dt: f32) -> (T, bool) {
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            return (self.target, true);
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        (self.start.lerp(self.target, t), false)
    }

    #[inline]
    pub fn target(&self) -> T {
        self.target
    }

    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    /// Normalized progress (0.0 to 1.0).
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

/// Holder for at most one in-flight tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSlot<T: Lerp> {
    active: Option<Tween<T>>,
}

impl<T: Lerp> Default for TweenSlot<T> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<T: Lerp> TweenSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween, cancelling the one in flight.
    ///
    /// # Returns
    /// `true` if an in-flight tween was cancelled.
    pub fn start(&mut self, tween: Tween<T>) -> bool {
        self.active.replace(tween).is_some()
    }

    /// Cancel without applying anything further.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn current(&self) -> Option<&Tween<T>> {
        self.active.as_ref()
    }

    /// Advance the in-flight tween. The slot clears itself on completion.
    ///
    /// # Returns
    /// `None` when idle, otherwise `(value, done)`.
    pub fn advance(&mut self, dt: f32) -> Option<(T, bool)> {
        let tween = self.active.as_mut()?;
        let (value, done) = tween.advance(dt);
        if done {
            self.active = None;
        }
        Some((value, done))
    }
}
