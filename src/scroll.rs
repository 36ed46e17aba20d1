//! Scroll-triggered transitions.
//!
//! A [`ScrollTrigger`] watches where an element sits relative to two lines in
//! the viewport and reports crossings. The [`ScrollDriver`] owns one trigger
//! per binding and turns crossings into playhead actions; the host calls
//! [`ScrollDriver::on_scroll`] on scroll/resize and [`ScrollDriver::tick`]
//! once per frame.

use std::str::FromStr;

use crate::config::{MotionConfig, Preset};
use crate::easing::Ease;
use crate::error::ConfigError;
use crate::tween::{Playhead, Timeline, VisualState};

/// Element box in viewport coordinates (as from `getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

/// Something a binding can measure and style.
pub trait AnimationTarget {
    /// Viewport box, or `None` once the element has left the document.
    fn bounds(&self) -> Option<Bounds>;
    fn apply(&self, state: &VisualState);
    /// Replace SVG path data. Only path elements care.
    fn set_path(&self, _d: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    fn of(&self, bounds: &Bounds) -> f64 {
        match self {
            Edge::Top => bounds.top,
            Edge::Center => (bounds.top + bounds.bottom) / 2.0,
            Edge::Bottom => bounds.bottom,
        }
    }
}

/// `"<element edge> <viewport line>"`, e.g. `"top 80%"` or `"bottom center"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerLine {
    pub edge: Edge,
    /// Fraction of the viewport height from its top.
    pub viewport: f64,
}

impl TriggerLine {
    pub const fn new(edge: Edge, viewport: f64) -> Self {
        Self { edge, viewport }
    }

    /// Signed distance the page still has to scroll before the edge meets the
    /// line; zero or negative once it has.
    fn remaining(&self, bounds: &Bounds, viewport_height: f64) -> f64 {
        self.edge.of(bounds) - self.viewport * viewport_height
    }
}

impl FromStr for TriggerLine {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigError::InvalidTriggerPosition(s.to_string());
        let mut parts = s.split_whitespace();
        let (Some(edge), Some(line), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(bad());
        };
        let edge = match edge {
            "top" => Edge::Top,
            "center" => Edge::Center,
            "bottom" => Edge::Bottom,
            _ => return Err(bad()),
        };
        let viewport = match line {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            pct => pct
                .strip_suffix('%')
                .and_then(|n| n.parse::<f64>().ok())
                .filter(|n| n.is_finite())
                .map(|n| n / 100.0)
                .ok_or_else(bad)?,
        };
        Ok(Self { edge, viewport })
    }
}

/// What a binding does when its trigger reports a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
    None,
}

impl ToggleAction {
    pub fn run(&self, playhead: &mut Playhead) {
        match self {
            ToggleAction::Play => playhead.play(),
            ToggleAction::Pause => playhead.pause(),
            ToggleAction::Resume => playhead.resume(),
            ToggleAction::Reverse => playhead.reverse(),
            ToggleAction::Restart => playhead.restart(),
            ToggleAction::Reset => playhead.reset(),
            ToggleAction::Complete => playhead.complete(),
            ToggleAction::None => {}
        }
    }
}

impl FromStr for ToggleAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "play" => ToggleAction::Play,
            "pause" => ToggleAction::Pause,
            "resume" => ToggleAction::Resume,
            "reverse" => ToggleAction::Reverse,
            "restart" => ToggleAction::Restart,
            "reset" => ToggleAction::Reset,
            "complete" => ToggleAction::Complete,
            "none" => ToggleAction::None,
            _ => return Err(()),
        })
    }
}

/// Actions for enter, leave, enter-back and leave-back, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    /// `play none none reverse`
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::Reverse,
        }
    }
}

impl ToggleActions {
    pub fn action_for(&self, event: TriggerEvent) -> ToggleAction {
        match event {
            TriggerEvent::Enter => self.on_enter,
            TriggerEvent::Leave => self.on_leave,
            TriggerEvent::EnterBack => self.on_enter_back,
            TriggerEvent::LeaveBack => self.on_leave_back,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actions = s
            .split_whitespace()
            .map(str::parse::<ToggleAction>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::InvalidToggleActions(s.to_string()))?;
        match actions.as_slice() {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter: *on_enter,
                on_leave: *on_leave,
                on_enter_back: *on_enter_back,
                on_leave_back: *on_leave_back,
            }),
            _ => Err(ConfigError::InvalidToggleActions(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Before,
    Active,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTrigger {
    start: TriggerLine,
    end: TriggerLine,
    state: TriggerState,
}

impl ScrollTrigger {
    pub fn new(start: TriggerLine, end: TriggerLine) -> Self {
        Self { start, end, state: TriggerState::Before }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    fn classify(&self, bounds: &Bounds, viewport_height: f64) -> TriggerState {
        if self.start.remaining(bounds, viewport_height) > 0.0 {
            TriggerState::Before
        } else if self.end.remaining(bounds, viewport_height) < 0.0 {
            TriggerState::After
        } else {
            TriggerState::Active
        }
    }

    /// Re-evaluate against fresh bounds. Crossings are returned in the order
    /// they happened; skipping the active zone yields two events.
    pub fn update(&mut self, bounds: &Bounds, viewport_height: f64) -> Vec<TriggerEvent> {
        use TriggerEvent::*;
        use TriggerState::*;

        let next = self.classify(bounds, viewport_height);
        let events = match (self.state, next) {
            (Before, Active) => vec![Enter],
            (Before, After) => vec![Enter, Leave],
            (Active, After) => vec![Leave],
            (After, Active) => vec![EnterBack],
            (After, Before) => vec![EnterBack, LeaveBack],
            (Active, Before) => vec![LeaveBack],
            _ => Vec::new(),
        };
        self.state = next;
        events
    }

    /// Position between the start and end lines, `0..=1`.
    pub fn progress(&self, bounds: &Bounds, viewport_height: f64) -> f64 {
        let to_start = self.start.remaining(bounds, viewport_height);
        let to_end = self.end.remaining(bounds, viewport_height);
        let span = to_end - to_start;
        if span <= 0.0 {
            return if to_start <= 0.0 { 1.0 } else { 0.0 };
        }
        (-to_start / span).clamp(0.0, 1.0)
    }
}

/// Trigger settings for one binding. `None` fields take the driver defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerOptions {
    pub duration: Option<f64>,
    pub ease: Option<Ease>,
    pub start: Option<TriggerLine>,
    pub end: Option<TriggerLine>,
    pub toggle_actions: Option<ToggleActions>,
}

impl TriggerOptions {
    pub fn start(mut self, line: TriggerLine) -> Self {
        self.start = Some(line);
        self
    }

    pub fn end(mut self, line: TriggerLine) -> Self {
        self.end = Some(line);
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn toggle_actions(mut self, actions: ToggleActions) -> Self {
        self.toggle_actions = Some(actions);
        self
    }
}

/// `top 80%`
pub const DEFAULT_START: TriggerLine = TriggerLine::new(Edge::Top, 0.8);
/// `bottom 20%`
pub const DEFAULT_END: TriggerLine = TriggerLine::new(Edge::Bottom, 0.2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u32);

struct Binding<T> {
    id: BindingId,
    trigger_target: T,
    targets: Vec<T>,
    timeline: Timeline,
    playhead: Playhead,
    trigger: Option<ScrollTrigger>,
    actions: ToggleActions,
    states: Vec<VisualState>,
}

impl<T: AnimationTarget> Binding<T> {
    fn render(&mut self) {
        self.timeline.sample_into(self.playhead.time(), &mut self.states);
        for (target, state) in self.targets.iter().zip(&self.states) {
            target.apply(state);
        }
    }
}

/// Scroll bindings for one mounted section.
pub struct ScrollDriver<T> {
    config: MotionConfig,
    reduced_motion: bool,
    bindings: Vec<Binding<T>>,
    next_id: u32,
}

impl<T: AnimationTarget> ScrollDriver<T> {
    pub fn new(config: MotionConfig, reduced_motion: bool) -> Self {
        Self { config, reduced_motion, bindings: Vec::new(), next_id: 0 }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Bind a preset entrance to `target`, triggered by the target itself.
    pub fn bind_preset(&mut self, target: T, preset: Preset, options: TriggerOptions) -> BindingId
    where
        T: Clone,
    {
        let duration = self.config.duration_or_default(options.duration);
        let ease = options.ease.unwrap_or(self.config.ease);
        let timeline = Timeline::single(self.config.initial_state(preset), VisualState::REST, duration, ease);
        self.bind_timeline(target.clone(), vec![target], timeline, options)
    }

    /// Bind a timeline over `targets`, driven by `trigger_target`'s position.
    ///
    /// The timeline's opening state is rendered immediately. Under reduced
    /// motion its closing state is rendered instead and no trigger is kept.
    pub fn bind_timeline(
        &mut self,
        trigger_target: T,
        targets: Vec<T>,
        timeline: Timeline,
        options: TriggerOptions,
    ) -> BindingId {
        let id = BindingId(self.next_id);
        self.next_id += 1;

        let mut playhead = Playhead::new(timeline.duration());
        let trigger = if self.reduced_motion {
            playhead.complete();
            None
        } else {
            Some(ScrollTrigger::new(
                options.start.unwrap_or(DEFAULT_START),
                options.end.unwrap_or(DEFAULT_END),
            ))
        };
        let mut binding = Binding {
            id,
            trigger_target,
            states: vec![VisualState::REST; targets.len()],
            targets,
            timeline,
            playhead,
            trigger,
            actions: options.toggle_actions.unwrap_or_default(),
        };
        binding.render();
        self.bindings.push(binding);
        id
    }

    /// Number of live viewport triggers.
    pub fn observer_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.trigger.is_some()).count()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Evaluate every trigger against current layout.
    pub fn on_scroll(&mut self, viewport_height: f64) {
        for binding in &mut self.bindings {
            let Some(trigger) = binding.trigger.as_mut() else {
                continue;
            };
            let Some(bounds) = binding.trigger_target.bounds() else {
                continue;
            };
            for event in trigger.update(&bounds, viewport_height) {
                log::trace!("binding {:?}: {:?}", binding.id, event);
                binding.actions.action_for(event).run(&mut binding.playhead);
            }
        }
    }

    /// Advance running transitions by `dt` seconds and restyle what moved.
    pub fn tick(&mut self, dt: f64) {
        for binding in &mut self.bindings {
            if binding.playhead.advance(dt) {
                binding.render();
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.bindings.iter().any(|b| b.playhead.is_active())
    }

    /// Drop one binding without touching its targets' styles.
    pub fn unbind(&mut self, id: BindingId) {
        self.bindings.retain(|b| b.id != id);
    }

    /// Release every trigger and cancel in-flight transitions.
    pub fn teardown(&mut self) {
        if !self.bindings.is_empty() {
            log::debug!("releasing {} scroll bindings", self.bindings.len());
        }
        self.bindings.clear();
    }
}

/// Scroll-scrubbed progress with lag, for animations bound to position
/// rather than time.
#[derive(Debug, Clone, PartialEq)]
pub struct Scrubber {
    trigger: ScrollTrigger,
    /// Seconds to catch up; zero follows scroll exactly.
    lag: f64,
    target: f64,
    progress: f64,
}

impl Scrubber {
    pub fn new(start: TriggerLine, end: TriggerLine, lag: f64) -> Self {
        Self { trigger: ScrollTrigger::new(start, end), lag: lag.max(0.0), target: 0.0, progress: 0.0 }
    }

    pub fn on_scroll(&mut self, bounds: Option<Bounds>, viewport_height: f64) {
        if let Some(bounds) = bounds {
            self.target = self.trigger.progress(&bounds, viewport_height);
        }
    }

    /// Move toward the scroll position and return the smoothed progress.
    pub fn tick(&mut self, dt: f64) -> f64 {
        if self.lag <= 0.0 {
            self.progress = self.target;
        } else if dt > 0.0 {
            let k = 1.0 - (-dt * 4.0 / self.lag).exp();
            self.progress += (self.target - self.progress) * k;
            if (self.target - self.progress).abs() < 1e-4 {
                self.progress = self.target;
            }
        }
        self.progress
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(top: f64) -> Bounds {
        Bounds { top, bottom: top + 400.0 }
    }

    #[test]
    fn parses_positions() {
        assert_eq!("top 80%".parse::<TriggerLine>().unwrap(), DEFAULT_START);
        assert_eq!("bottom 20%".parse::<TriggerLine>().unwrap(), DEFAULT_END);
        assert_eq!(
            "center center".parse::<TriggerLine>().unwrap(),
            TriggerLine::new(Edge::Center, 0.5)
        );
        assert!("top".parse::<TriggerLine>().is_err());
        assert!("middle 10%".parse::<TriggerLine>().is_err());
        assert!("top eighty".parse::<TriggerLine>().is_err());
    }

    #[test]
    fn parses_toggle_actions() {
        assert_eq!("play none none reverse".parse::<ToggleActions>().unwrap(), ToggleActions::default());
        assert!("play none".parse::<ToggleActions>().is_err());
        assert!("play none none rewind".parse::<ToggleActions>().is_err());
    }

    #[test]
    fn crossings() {
        let mut trigger = ScrollTrigger::new(DEFAULT_START, DEFAULT_END);
        assert!(trigger.update(&at(1000.0), 1000.0).is_empty());
        assert_eq!(trigger.update(&at(700.0), 1000.0), vec![TriggerEvent::Enter]);
        assert_eq!(trigger.update(&at(-300.0), 1000.0), vec![TriggerEvent::Leave]);
        assert_eq!(trigger.update(&at(0.0), 1000.0), vec![TriggerEvent::EnterBack]);
        assert_eq!(trigger.update(&at(900.0), 1000.0), vec![TriggerEvent::LeaveBack]);
        assert_eq!(
            trigger.update(&at(-500.0), 1000.0),
            vec![TriggerEvent::Enter, TriggerEvent::Leave]
        );
    }

    #[test]
    fn progress_between_lines() {
        let trigger = ScrollTrigger::new(TriggerLine::new(Edge::Top, 0.5), TriggerLine::new(Edge::Bottom, 0.5));
        assert_eq!(trigger.progress(&at(600.0), 1000.0), 0.0);
        assert_eq!(trigger.progress(&at(500.0), 1000.0), 0.0);
        assert!((trigger.progress(&at(300.0), 1000.0) - 0.5).abs() < 1e-12);
        assert_eq!(trigger.progress(&at(-2000.0), 1000.0), 1.0);
    }

    #[test]
    fn scrubber_lags_then_settles() {
        let mut scrub = Scrubber::new(TriggerLine::new(Edge::Top, 0.5), TriggerLine::new(Edge::Bottom, 0.5), 1.0);
        scrub.on_scroll(Some(at(100.0)), 1000.0);
        let first = scrub.tick(1.0 / 60.0);
        assert!(first > 0.0 && first < 1.0);
        for _ in 0..600 {
            scrub.tick(1.0 / 60.0);
        }
        assert_eq!(scrub.progress(), 1.0);
    }
}
