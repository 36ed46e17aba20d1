//! Visual state interpolation.
//!
//! A [`Timeline`] is a list of from/to tracks placed on a shared clock. It is
//! sampled, never run: the host's frame callback advances a [`Playhead`] and
//! asks the timeline what every target should look like at that instant.

use crate::easing::Ease;

/// The animatable properties of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub opacity: f64,
    /// Horizontal offset in px.
    pub x: f64,
    /// Vertical offset in px.
    pub y: f64,
    pub scale: f64,
    /// Degrees.
    pub rotation: f64,
    pub rotation_x: f64,
    pub rotation_y: f64,
}

impl VisualState {
    /// Fully visible, untransformed.
    pub const REST: VisualState = VisualState {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotation: 0.0,
        rotation_x: 0.0,
        rotation_y: 0.0,
    };

    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub const fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    pub const fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub const fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub const fn with_rotation_x(mut self, rotation_x: f64) -> Self {
        self.rotation_x = rotation_x;
        self
    }

    pub const fn with_rotation_y(mut self, rotation_y: f64) -> Self {
        self.rotation_y = rotation_y;
        self
    }

    /// Straight linear mix, `amount` unclamped so overshooting eases work.
    pub fn mix(&self, other: &VisualState, amount: f64) -> VisualState {
        let m = |a: f64, b: f64| a + (b - a) * amount;
        VisualState {
            opacity: m(self.opacity, other.opacity),
            x: m(self.x, other.x),
            y: m(self.y, other.y),
            scale: m(self.scale, other.scale),
            rotation: m(self.rotation, other.rotation),
            rotation_x: m(self.rotation_x, other.rotation_x),
            rotation_y: m(self.rotation_y, other.rotation_y),
        }
    }

    /// CSS `transform` value for this state.
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({:.3}px, {:.3}px, 0) rotate({:.3}deg) rotateX({:.3}deg) rotateY({:.3}deg) scale({:.4})",
            self.x, self.y, self.rotation, self.rotation_x, self.rotation_y, self.scale
        )
    }

    /// Opacity clamped for CSS.
    pub fn css_opacity(&self) -> String {
        format!("{:.4}", self.opacity.clamp(0.0, 1.0))
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::REST
    }
}

/// Value of a transition at `fraction` of its duration.
pub fn interpolate(fraction: f64, from: &VisualState, to: &VisualState, ease: Ease) -> VisualState {
    from.mix(to, ease.apply(fraction))
}

/// Where a track starts relative to what is already on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Right after the previous track ends.
    AfterPrevious,
    /// Relative to the end of the previous track; `-0.8` is GSAP's `"-=0.8"`.
    Offset(f64),
    /// Same start as the previous track (`"<"`).
    WithPrevious,
    /// Absolute time in seconds.
    At(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub target: usize,
    pub from: VisualState,
    pub to: VisualState,
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl Track {
    fn sample(&self, time: f64) -> VisualState {
        if self.duration <= 0.0 {
            return if time >= self.start { self.to } else { self.from };
        }
        interpolate((time - self.start) / self.duration, &self.from, &self.to, self.ease)
    }
}

/// Spacing for [`Timeline::staggered`]: where the first track goes and the
/// gap between successive starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stagger {
    pub first: Position,
    pub each: f64,
}

impl Stagger {
    pub const fn new(first: Position, each: f64) -> Self {
        Self { first, each }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    tracks: Vec<Track>,
    last_start: f64,
    last_end: f64,
    duration: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single from/to transition for target 0.
    pub fn single(from: VisualState, to: VisualState, duration: f64, ease: Ease) -> Self {
        Self::new().from_to(0, from, to, duration, ease, Position::At(0.0))
    }

    pub fn from_to(
        mut self,
        target: usize,
        from: VisualState,
        to: VisualState,
        duration: f64,
        ease: Ease,
        position: Position,
    ) -> Self {
        let start = match position {
            Position::AfterPrevious => self.last_end,
            Position::Offset(delta) => (self.last_end + delta).max(0.0),
            Position::WithPrevious => self.last_start,
            Position::At(at) => at.max(0.0),
        };
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        self.last_start = start;
        self.last_end = start + duration;
        self.duration = self.duration.max(self.last_end);
        self.tracks.push(Track { target, from, to, start, duration, ease });
        self
    }

    /// One track per target, each starting `stagger.each` seconds after the last.
    pub fn staggered(
        mut self,
        targets: impl IntoIterator<Item = usize>,
        from: VisualState,
        to: VisualState,
        duration: f64,
        ease: Ease,
        stagger: Stagger,
    ) -> Self {
        let mut first_start = None;
        for (i, target) in targets.into_iter().enumerate() {
            let pos = match first_start {
                None => stagger.first,
                Some(start) => Position::At(start + stagger.each * i as f64),
            };
            self = self.from_to(target, from, to, duration, ease, pos);
            if first_start.is_none() {
                first_start = Some(self.last_start);
            }
        }
        if let Some(start) = first_start {
            self.last_start = start;
        }
        self
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of distinct target slots the tracks address.
    pub fn target_count(&self) -> usize {
        self.tracks.iter().map(|t| t.target + 1).max().unwrap_or(0)
    }

    /// Write every target's state at `time` into `states`.
    ///
    /// The first track of each target renders immediately (its `from` state
    /// holds before it starts); later tracks of the same target only take over
    /// once they have started.
    pub fn sample_into(&self, time: f64, states: &mut [VisualState]) {
        let mut seen = vec![false; states.len()];
        for track in &self.tracks {
            let Some(slot) = states.get_mut(track.target) else {
                continue;
            };
            if !seen[track.target] || time >= track.start {
                *slot = track.sample(time);
                seen[track.target] = true;
            }
        }
    }

    pub fn sample(&self, time: f64) -> Vec<VisualState> {
        let mut states = vec![VisualState::REST; self.target_count()];
        self.sample_into(time, &mut states);
        states
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Clock for a timeline: position, direction and pause state.
#[derive(Debug, Clone, PartialEq)]
pub struct Playhead {
    time: f64,
    duration: f64,
    direction: Direction,
    paused: bool,
}

impl Playhead {
    /// Paused at zero.
    pub fn new(duration: f64) -> Self {
        Self { time: 0.0, duration: duration.max(0.0), direction: Direction::Forward, paused: true }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Running and not yet at the end it is heading for.
    pub fn is_active(&self) -> bool {
        !self.paused
            && match self.direction {
                Direction::Forward => self.time < self.duration,
                Direction::Backward => self.time > 0.0,
            }
    }

    pub fn play(&mut self) {
        self.direction = Direction::Forward;
        self.paused = false;
    }

    pub fn reverse(&mut self) {
        self.direction = Direction::Backward;
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn restart(&mut self) {
        self.time = 0.0;
        self.play();
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.direction = Direction::Forward;
        self.paused = true;
    }

    pub fn complete(&mut self) {
        self.time = self.duration;
        self.direction = Direction::Forward;
        self.paused = true;
    }

    /// Advance by `dt` seconds. Returns whether the time changed.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.paused || dt.is_nan() || dt <= 0.0 {
            return false;
        }
        let before = self.time;
        self.time = match self.direction {
            Direction::Forward => (self.time + dt).min(self.duration),
            Direction::Backward => (self.time - dt).max(0.0),
        };
        self.time != before
    }
}

/// A two-state transition toggled by hover or touch.
#[derive(Debug, Clone)]
pub struct HoverTween {
    timeline: Timeline,
    playhead: Playhead,
}

impl HoverTween {
    pub fn new(idle: VisualState, hovered: VisualState, duration: f64, ease: Ease) -> Self {
        let timeline = Timeline::single(idle, hovered, duration, ease);
        let playhead = Playhead::new(timeline.duration());
        Self { timeline, playhead }
    }

    pub fn enter(&mut self) {
        self.playhead.play();
    }

    pub fn leave(&mut self) {
        self.playhead.reverse();
    }

    pub fn is_active(&self) -> bool {
        self.playhead.is_active()
    }

    pub fn tick(&mut self, dt: f64) -> VisualState {
        self.playhead.advance(dt);
        self.state()
    }

    pub fn state(&self) -> VisualState {
        let mut states = [VisualState::REST];
        self.timeline.sample_into(self.playhead.time(), &mut states);
        states[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden() -> VisualState {
        VisualState::REST.with_opacity(0.0).with_y(100.0)
    }

    #[test]
    fn interpolate_is_pure_mix() {
        let mid = interpolate(0.5, &hidden(), &VisualState::REST, Ease::Linear);
        assert_eq!(mid.opacity, 0.5);
        assert_eq!(mid.y, 50.0);
        assert_eq!(interpolate(2.0, &hidden(), &VisualState::REST, Ease::Linear), VisualState::REST);
    }

    #[test]
    fn overlap_positions() {
        let tl = Timeline::new()
            .from_to(0, hidden(), VisualState::REST, 1.2, Ease::Power4Out, Position::AfterPrevious)
            .from_to(1, hidden(), VisualState::REST, 1.2, Ease::Power4Out, Position::Offset(-0.8))
            .from_to(2, hidden(), VisualState::REST, 0.6, Ease::Linear, Position::WithPrevious);
        let starts: Vec<f64> = tl.tracks().iter().map(|t| t.start).collect();
        assert!((starts[1] - 0.4).abs() < 1e-12);
        assert!((starts[2] - 0.4).abs() < 1e-12);
        assert!((tl.duration() - 1.6).abs() < 1e-12);
    }

    #[test]
    fn first_track_renders_before_start() {
        let tl = Timeline::new().from_to(0, hidden(), VisualState::REST, 1.0, Ease::Linear, Position::At(2.0));
        assert_eq!(tl.sample(0.0)[0], hidden());
        assert_eq!(tl.sample(3.0)[0], VisualState::REST);
    }

    #[test]
    fn stagger_offsets_each_target() {
        let spacing = Stagger::new(Position::At(0.0), 0.15);
        let tl = Timeline::new().staggered(0..4, hidden(), VisualState::REST, 0.8, Ease::Power2Out, spacing);
        let starts: Vec<f64> = tl.tracks().iter().map(|t| t.start).collect();
        assert_eq!(starts.len(), 4);
        assert!((starts[3] - 0.45).abs() < 1e-12);
        assert!((tl.duration() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn playhead_reverses_from_current_time() {
        let mut head = Playhead::new(1.0);
        assert!(!head.advance(0.5));
        head.play();
        head.advance(0.4);
        head.reverse();
        head.advance(0.1);
        assert!((head.time() - 0.3).abs() < 1e-12);
        head.advance(5.0);
        assert_eq!(head.time(), 0.0);
        assert!(!head.is_active());
    }

    #[test]
    fn playhead_ignores_unusable_steps() {
        let mut head = Playhead::new(1.0);
        head.play();
        assert!(!head.advance(f64::NAN));
        assert!(!head.advance(-0.2));
        assert!(!head.advance(0.0));
        assert_eq!(head.time(), 0.0);
        assert!(head.advance(0.25));
    }

    #[test]
    fn hover_tween_round_trip() {
        let mut hover = HoverTween::new(VisualState::REST, VisualState::REST.with_scale(1.1), 0.3, Ease::Power2Out);
        hover.enter();
        assert_eq!(hover.tick(1.0).scale, 1.1);
        hover.leave();
        assert_eq!(hover.tick(1.0).scale, 1.0);
    }
}
