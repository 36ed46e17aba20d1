use crate::config::MotionConfig;
use crate::easing::Ease;
use crate::scroll::{AnimationTarget, Edge, TriggerLine, TriggerOptions};
use crate::tween::{Position, Stagger, Timeline, VisualState};

use super::SectionMotion;

pub const TITLE: &str = "Get In Touch";
pub const SUBMIT_LABEL: &str = "Send Message";
pub const SUBMITTING_LABEL: &str = "Sending...";

pub struct ContactTargets<T> {
    pub container: T,
    pub title: T,
    pub form: T,
    /// Name, email and message wrappers, then the submit row.
    pub rows: [T; 4],
}

pub fn rows_timeline() -> Timeline {
    Timeline::new().staggered(
        0..4,
        VisualState::REST.with_opacity(0.0).with_y(30.0).with_scale(0.95),
        VisualState::REST,
        0.8,
        Ease::Power2Out,
        Stagger::new(Position::At(0.0), 0.15),
    )
}

pub fn mount<T: AnimationTarget + Clone>(config: &MotionConfig, reduced_motion: bool, t: ContactTargets<T>) -> SectionMotion<T> {
    let mut section = SectionMotion::new("contact", config, reduced_motion);
    let driver = section.driver_mut();
    driver.bind_timeline(
        t.container,
        vec![t.title],
        Timeline::single(
            VisualState::REST.with_opacity(0.0).with_y(-50.0).with_rotation(-3.0),
            VisualState::REST,
            1.2,
            Ease::Power3Out,
        ),
        TriggerOptions::default().start(TriggerLine::new(Edge::Top, 0.7)),
    );
    driver.bind_timeline(
        t.form,
        t.rows.to_vec(),
        rows_timeline(),
        TriggerOptions::default().start(TriggerLine::new(Edge::Top, 0.75)),
    );
    section
}
