//! Pointer follower: a small dot and a soft glow chasing the pointer with
//! different lag, both growing while an interactive element is hovered.

use glam::Vec2;

use crate::easing::Ease;

pub const DOT_LAG: f64 = 0.1;
pub const GLOW_LAG: f64 = 0.3;
pub const HOVER_SCALE: f32 = 1.5;
pub const SCALE_DURATION: f64 = 0.3;
pub const FOLLOW_EASE: Ease = Ease::Power2Out;

/// Selector for elements that grow the cursor on hover.
pub const INTERACTIVE_SELECTOR: &str = "a, button, [role=\"button\"]";

pub trait Mix: Copy {
    fn mix(self, other: Self, amount: f32) -> Self;
}

impl Mix for f32 {
    fn mix(self, other: Self, amount: f32) -> Self {
        self + (other - self) * amount
    }
}

impl Mix for Vec2 {
    fn mix(self, other: Self, amount: f32) -> Self {
        self.lerp(other, amount)
    }
}

/// A value that eases toward its latest target; a new target restarts the
/// transition from wherever the value currently is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chase<V> {
    from: V,
    to: V,
    current: V,
    elapsed: f64,
    duration: f64,
    ease: Ease,
}

impl<V: Mix> Chase<V> {
    pub fn new(initial: V, duration: f64, ease: Ease) -> Self {
        Self { from: initial, to: initial, current: initial, elapsed: duration, duration, ease }
    }

    pub fn retarget(&mut self, to: V) {
        self.from = self.current;
        self.to = to;
        self.elapsed = 0.0;
    }

    pub fn tick(&mut self, dt: f64) -> V {
        if self.elapsed < self.duration {
            self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
            let fraction = if self.duration > 0.0 { self.elapsed / self.duration } else { 1.0 };
            self.current = self.from.mix(self.to, self.ease.apply(fraction) as f32);
        }
        self.current
    }

    pub fn current(&self) -> V {
        self.current
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Where to draw the two cursor elements this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorFrame {
    pub dot: Vec2,
    pub glow: Vec2,
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct PointerFollower {
    dot: Chase<Vec2>,
    glow: Chase<Vec2>,
    scale: Chase<f32>,
}

impl Default for PointerFollower {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl PointerFollower {
    pub fn new(origin: Vec2) -> Self {
        Self {
            dot: Chase::new(origin, DOT_LAG, FOLLOW_EASE),
            glow: Chase::new(origin, GLOW_LAG, FOLLOW_EASE),
            scale: Chase::new(1.0, SCALE_DURATION, FOLLOW_EASE),
        }
    }

    /// Pointer moved to client coordinates.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let target = Vec2::new(x, y);
        self.dot.retarget(target);
        self.glow.retarget(target);
    }

    pub fn hover_changed(&mut self, hovering: bool) {
        self.scale.retarget(if hovering { HOVER_SCALE } else { 1.0 });
    }

    pub fn tick(&mut self, dt: f64) -> CursorFrame {
        CursorFrame { dot: self.dot.tick(dt), glow: self.glow.tick(dt), scale: self.scale.tick(dt) }
    }

    pub fn is_settled(&self) -> bool {
        self.dot.is_settled() && self.glow.is_settled() && self.scale.is_settled()
    }
}

/// CSS transform for a cursor element centred on `pos`.
pub fn cursor_transform(pos: Vec2, scale: f32) -> String {
    format!("translate3d({:.2}px, {:.2}px, 0) translate(-50%, -50%) scale({:.3})", pos.x, pos.y, scale)
}
