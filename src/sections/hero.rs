use crate::config::MotionConfig;
use crate::decor::{Oscillator, Spinner};
use crate::easing::Ease;
use crate::scroll::{AnimationTarget, Edge, TriggerLine, TriggerOptions};
use crate::tween::{Position, Timeline, VisualState};

use super::{Motion, SectionMotion};

pub const HEADING: &str = "Welcome to Our Creative Portfolio";
pub const LINES: [&str; 3] = ["Creative Excellence", "Through Innovation", "And Dedication"];
pub const SUBTITLE: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor \
incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam.";
pub const CTA: &str = "Discover Our Work";

pub const BLOB_PATHS: [&str; 2] = [
    "M45.3,-59.4C57.7,-50.3,66.3,-35.6,70.4,-19.2C74.5,-2.8,74.1,15.3,67.5,30.3C60.9,45.3,48.1,57.2,33.3,63.8C18.5,70.4,1.7,71.7,-15.3,70.1C-32.3,68.5,-49.6,63.9,-60.5,53.6C-71.4,43.3,-75.9,27.3,-76.5,11.1C-77.1,-5.1,-73.8,-21.5,-65.5,-34.4C-57.2,-47.3,-44,-56.7,-29.8,-65C-15.6,-73.3,-0.4,-80.5,13.6,-77.9C27.6,-75.3,32.9,-68.5,45.3,-59.4Z",
    "M38.4,-54.8C48.3,-45.3,54.1,-31.5,58.5,-17.2C62.9,-2.9,66,11.9,62.3,24.8C58.6,37.7,48.1,48.7,35.8,56.3C23.5,63.9,9.4,68.1,-5.5,66.8C-20.4,65.5,-36.1,58.7,-47.5,48.6C-58.9,38.5,-66,25.1,-68.4,10.8C-70.8,-3.5,-68.5,-18.7,-61.3,-31.4C-54.1,-44.1,-42,-54.3,-29.2,-62.2C-16.4,-70.1,-2.8,-75.7,9.6,-73.3C22,-70.9,28.5,-64.3,38.4,-54.8Z",
];

pub struct HeroTargets<T> {
    pub container: T,
    pub lines: [T; 3],
    pub subtitle: T,
    pub cta: T,
    /// Wrapper that pops the blobs in.
    pub blob_group: T,
    pub blobs: [T; 2],
    /// The whole decorative SVG, slowly spinning.
    pub emblem: T,
}

/// Staggered headline reveal, one timeline on the section.
pub fn intro_timeline() -> Timeline {
    let line_from = VisualState::REST.with_opacity(0.0).with_y(100.0).with_rotation_x(-90.0);
    let rest = VisualState::REST;
    Timeline::new()
        .from_to(0, line_from, rest, 1.2, Ease::Power4Out, Position::AfterPrevious)
        .from_to(1, line_from, rest, 1.2, Ease::Power4Out, Position::Offset(-0.8))
        .from_to(2, line_from, rest, 1.2, Ease::Power4Out, Position::Offset(-0.8))
        .from_to(3, rest.with_opacity(0.0).with_y(30.0), rest, 0.8, Ease::Power2Out, Position::Offset(-0.4))
        .from_to(4, rest.with_opacity(0.0).with_scale(0.8), rest, 0.6, Ease::BackOut(1.4), Position::Offset(-0.2))
}

pub fn mount<T: AnimationTarget + Clone>(config: &MotionConfig, reduced_motion: bool, t: HeroTargets<T>) -> SectionMotion<T> {
    let mut section = SectionMotion::new("hero", config, reduced_motion);
    let [l1, l2, l3] = t.lines;
    let driver = section.driver_mut();
    driver.bind_timeline(
        t.container.clone(),
        vec![l1, l2, l3, t.subtitle, t.cta],
        intro_timeline(),
        TriggerOptions::default().end(TriggerLine::new(Edge::Center, 0.5)),
    );
    driver.bind_timeline(
        t.container,
        vec![t.blob_group],
        Timeline::single(
            VisualState::REST.with_scale(0.0).with_rotation(-180.0),
            VisualState::REST,
            2.0,
            Ease::ElasticOut { amplitude: 1.0, period: 0.5 },
        ),
        TriggerOptions::default().start(TriggerLine::new(Edge::Top, 0.6)),
    );

    let [b1, b2] = t.blobs;
    section.add_loop(
        b1,
        Motion::Oscillate(Oscillator::new(
            VisualState::REST,
            VisualState::REST.with_scale(1.1).with_rotation(5.0),
            3.0,
            Ease::SineInOut,
        )),
    );
    section.add_loop(
        b2,
        Motion::Oscillate(Oscillator::new(
            VisualState::REST,
            VisualState::REST.with_scale(0.95).with_rotation(-5.0),
            2.5,
            Ease::SineInOut,
        )),
    );
    section.add_loop(t.emblem, Motion::Spin(Spinner::new(20.0)));
    section
}
