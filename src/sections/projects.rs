use crate::config::MotionConfig;
use crate::decor::{Oscillator, PathMorph};
use crate::easing::Ease;
use crate::error::ConfigError;
use crate::scroll::{AnimationTarget, Edge, Scrubber, TriggerLine, TriggerOptions};
use crate::tween::{Position, Timeline, VisualState};

use super::{Motion, SectionMotion};

pub const TITLE: &str = "Featured Projects";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub content: &'static str,
}

pub const PROJECTS: [Project; 4] = [
    Project {
        title: "Project Alpha",
        description: "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
        content: "Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris.",
    },
    Project {
        title: "Project Beta",
        description: "Duis aute irure dolor in reprehenderit in voluptate.",
        content: "Velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt.",
    },
    Project {
        title: "Project Gamma",
        description: "Mollit anim id est laborum sed ut perspiciatis unde.",
        content: "Omnis iste natus error sit voluptatem accusantium doloremque laudantium, totam rem aperiam, eaque ipsa quae ab illo inventore veritatis.",
    },
    Project {
        title: "Project Delta",
        description: "Et quasi architecto beatae vitae dicta sunt explicabo.",
        content: "Nemo enim ipsam voluptatem quia voluptas sit aspernatur aut odit aut fugit, sed quia consequuntur magni dolores eos qui ratione.",
    },
];

/// Wave path keyframes with their opacity, scrubbed by scroll.
pub const WAVE_KEYFRAMES: [(&str, f64); 4] = [
    ("M50,50 Q100,50 150,50 T250,50 T350,50 T450,50", 0.0),
    ("M50,100 Q100,50 150,100 T250,100 T350,100 T450,100", 0.3),
    ("M50,150 Q100,100 150,150 T250,150 T350,150 T450,150", 0.4),
    ("M50,200 Q100,150 150,200 T250,200 T350,200 T450,200", 0.3),
];
/// Progress shown when scrubbing is off: the second keyframe.
pub const STILL_PROGRESS: f64 = 1.0 / 3.0;
/// Seconds the wave takes to catch up with the scrollbar.
pub const SCRUB_LAG: f64 = 1.0;

pub struct ProjectsTargets<T> {
    pub container: T,
    pub title: T,
    pub cards: Vec<T>,
    /// Glow blobs per card.
    pub glows: Vec<Vec<T>>,
    pub wave: T,
}

/// Cards alternate sides: even from the left, odd from the right.
pub fn card_entrance(index: usize) -> VisualState {
    let direction = if index % 2 == 0 { -100.0 } else { 100.0 };
    VisualState::REST
        .with_opacity(0.0)
        .with_x(direction)
        .with_rotation_y(if direction > 0.0 { 15.0 } else { -15.0 })
}

pub fn wave_morph() -> Result<PathMorph, ConfigError> {
    PathMorph::new(&WAVE_KEYFRAMES, Ease::Power1Out)
}

pub fn mount<T: AnimationTarget + Clone>(
    config: &MotionConfig,
    reduced_motion: bool,
    t: ProjectsTargets<T>,
) -> Result<SectionMotion<T>, ConfigError> {
    let mut section = SectionMotion::new("projects", config, reduced_motion);
    let driver = section.driver_mut();
    driver.bind_timeline(
        t.container.clone(),
        vec![t.title],
        Timeline::single(VisualState::REST.with_opacity(0.0).with_scale(0.9), VisualState::REST, 1.0, Ease::Power3Out),
        TriggerOptions::default().start(TriggerLine::new(Edge::Top, 0.7)),
    );
    for (index, card) in t.cards.into_iter().enumerate() {
        let timeline = Timeline::new().from_to(
            0,
            card_entrance(index),
            VisualState::REST,
            1.0,
            Ease::Power3Out,
            Position::At(index as f64 * 0.15),
        );
        driver.bind_timeline(card.clone(), vec![card], timeline, TriggerOptions::default());
    }

    for glows in t.glows {
        for (i, glow) in glows.into_iter().enumerate() {
            let osc = Oscillator::new(
                VisualState::REST.with_opacity(0.2),
                VisualState::REST.with_opacity(0.6).with_scale(1.1),
                2.0,
                Ease::SineInOut,
            )
            .delayed(i as f64 * 0.3);
            section.add_loop(glow, Motion::Oscillate(osc));
        }
    }

    section.set_morph(
        t.container,
        t.wave,
        Scrubber::new(TriggerLine::new(Edge::Top, 0.5), TriggerLine::new(Edge::Bottom, 0.5), SCRUB_LAG),
        wave_morph()?,
        STILL_PROGRESS,
    );
    Ok(section)
}
