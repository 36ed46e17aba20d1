//! Page sections: their copy, their scroll bindings and their ambient motion.
//!
//! Each section module exposes a `*Targets` struct naming the elements it
//! animates and a `mount` function returning a [`SectionMotion`]. Targets are
//! generic so the same compositions run against DOM elements in the browser
//! and against recorders in tests.

pub mod about;
pub mod contact;
pub mod hero;
pub mod projects;
pub mod skills;

use crate::config::MotionConfig;
use crate::decor::{Oscillator, PathMorph, Spinner};
use crate::scroll::{AnimationTarget, ScrollDriver, Scrubber};
use crate::tween::{HoverTween, VisualState};

/// Looping motion bound to one element.
#[derive(Debug, Clone)]
pub enum Motion {
    Oscillate(Oscillator),
    Spin(Spinner),
}

impl Motion {
    pub fn sample(&self, elapsed: f64) -> VisualState {
        match self {
            Motion::Oscillate(osc) => osc.sample(elapsed),
            Motion::Spin(spin) => spin.sample(elapsed),
        }
    }
}

struct Looping<T> {
    target: T,
    motion: Motion,
}

struct Hover<T> {
    target: T,
    tween: HoverTween,
}

struct Morph<T> {
    trigger: T,
    target: T,
    scrubber: Scrubber,
    morph: PathMorph,
    last: Option<f64>,
}

/// All motion owned by one mounted section.
pub struct SectionMotion<T> {
    name: &'static str,
    driver: ScrollDriver<T>,
    loops: Vec<Looping<T>>,
    hovers: Vec<Hover<T>>,
    morph: Option<Morph<T>>,
}

impl<T: AnimationTarget> SectionMotion<T> {
    pub fn new(name: &'static str, config: &MotionConfig, reduced_motion: bool) -> Self {
        Self {
            name,
            driver: ScrollDriver::new(config.clone(), reduced_motion),
            loops: Vec::new(),
            hovers: Vec::new(),
            morph: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn driver(&self) -> &ScrollDriver<T> {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut ScrollDriver<T> {
        &mut self.driver
    }

    pub fn reduced_motion(&self) -> bool {
        self.driver.reduced_motion()
    }

    /// Add looping motion. Ignored under reduced motion.
    pub fn add_loop(&mut self, target: T, motion: Motion) {
        if self.reduced_motion() {
            return;
        }
        self.loops.push(Looping { target, motion });
    }

    /// Add a hover transition; returns its index for [`Self::set_hover`].
    /// Ignored under reduced motion.
    pub fn add_hover(&mut self, target: T, tween: HoverTween) -> Option<usize> {
        if self.reduced_motion() {
            return None;
        }
        self.hovers.push(Hover { target, tween });
        Some(self.hovers.len() - 1)
    }

    /// Bind a scroll-scrubbed path morph. Under reduced motion the path is
    /// rendered once at `still_progress` and nothing is observed.
    pub fn set_morph(&mut self, trigger: T, target: T, scrubber: Scrubber, morph: PathMorph, still_progress: f64) {
        if self.reduced_motion() {
            if let Some((d, opacity)) = morph.sample(still_progress) {
                target.set_path(&d);
                target.apply(&VisualState::REST.with_opacity(opacity));
            }
            return;
        }
        self.morph = Some(Morph { trigger, target, scrubber, morph, last: None });
    }

    pub fn set_hover(&mut self, index: usize, hovered: bool) {
        if let Some(hover) = self.hovers.get_mut(index) {
            if hovered {
                hover.tween.enter();
            } else {
                hover.tween.leave();
            }
        }
    }

    /// Viewport triggers held by this section.
    pub fn observer_count(&self) -> usize {
        self.driver.observer_count() + usize::from(self.morph.is_some())
    }

    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    pub fn on_scroll(&mut self, viewport_height: f64) {
        self.driver.on_scroll(viewport_height);
        if let Some(morph) = self.morph.as_mut() {
            morph.scrubber.on_scroll(morph.trigger.bounds(), viewport_height);
        }
    }

    /// One frame: `dt` since the last frame, `elapsed` since mount, seconds.
    pub fn tick(&mut self, dt: f64, elapsed: f64) {
        self.driver.tick(dt);
        for looping in &self.loops {
            looping.target.apply(&looping.motion.sample(elapsed));
        }
        for hover in &mut self.hovers {
            if hover.tween.is_active() {
                let state = hover.tween.tick(dt);
                hover.target.apply(&state);
            }
        }
        if let Some(morph) = self.morph.as_mut() {
            let progress = morph.scrubber.tick(dt);
            if morph.last != Some(progress) {
                morph.last = Some(progress);
                if let Some((d, opacity)) = morph.morph.sample(progress) {
                    morph.target.set_path(&d);
                    morph.target.apply(&VisualState::REST.with_opacity(opacity));
                }
            }
        }
    }

    /// Release triggers and stop all motion. No styles are written after this.
    pub fn teardown(&mut self) {
        log::debug!("unmounting section {}", self.name);
        self.driver.teardown();
        self.loops.clear();
        self.hovers.clear();
        self.morph = None;
    }
}
