use crate::config::MotionConfig;
use crate::decor::{Oscillator, Spinner};
use crate::easing::Ease;
use crate::scroll::{AnimationTarget, Edge, TriggerLine, TriggerOptions};
use crate::tween::{Timeline, VisualState};

use super::{Motion, SectionMotion};

pub const TITLE: &str = "About Our Vision";
pub const PARAGRAPHS: [&str; 3] = [
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nullam in dui mauris. Vivamus hendrerit \
arcu sed erat molestie vehicula. Sed auctor neque eu tellus rhoncus ut eleifend nibh porttitor.",
    "Ut in nulla enim. Phasellus molestie magna non est bibendum non venenatis nisl tempor. Suspendisse \
dictum feugiat nisl ut dapibus. Mauris iaculis porttitor posuere praesent tristique magna sit amet purus.",
    "Gravida in fermentum et sollicitudin ac orci phasellus egestas. Sed pulvinar proin gravida hendrerit \
lectus a molestie lorem ipsum dolor sit amet.",
];
/// Tilt each paragraph enters with, degrees.
const PARAGRAPH_TILT: [f64; 3] = [3.0, -3.0, 2.0];

/// Spokes around the breathing circles: `(x1, y1, x2, y2)` in a 200×200 box.
pub const SPOKES: [(f64, f64, f64, f64); 8] = [
    (100.0, 40.0, 100.0, 60.0),
    (140.0, 60.0, 130.0, 75.0),
    (160.0, 100.0, 140.0, 100.0),
    (140.0, 140.0, 130.0, 125.0),
    (100.0, 160.0, 100.0, 140.0),
    (60.0, 140.0, 70.0, 125.0),
    (40.0, 100.0, 60.0, 100.0),
    (60.0, 60.0, 70.0, 75.0),
];

pub struct AboutTargets<T> {
    pub container: T,
    pub title: T,
    pub paragraphs: [T; 3],
    pub motif: T,
    pub outer_circle: T,
    pub inner_circle: T,
    pub spokes: Vec<T>,
}

pub fn mount<T: AnimationTarget + Clone>(config: &MotionConfig, reduced_motion: bool, t: AboutTargets<T>) -> SectionMotion<T> {
    let mut section = SectionMotion::new("about", config, reduced_motion);
    let hidden = VisualState::REST.with_opacity(0.0);
    let driver = section.driver_mut();

    driver.bind_timeline(
        t.container,
        vec![t.title],
        Timeline::single(hidden.with_x(-100.0).with_rotation(-5.0), VisualState::REST, 1.2, Ease::Power3Out),
        TriggerOptions::default().start(TriggerLine::new(Edge::Top, 0.7)),
    );
    for (paragraph, tilt) in t.paragraphs.into_iter().zip(PARAGRAPH_TILT) {
        driver.bind_timeline(
            paragraph.clone(),
            vec![paragraph],
            Timeline::single(hidden.with_y(50.0).with_rotation(tilt), VisualState::REST, 1.0, Ease::Power2Out),
            TriggerOptions::default().start(TriggerLine::new(Edge::Top, 0.75)),
        );
    }
    driver.bind_timeline(
        t.motif.clone(),
        vec![t.motif],
        Timeline::single(
            hidden.with_scale(0.5).with_rotation(-45.0),
            VisualState::REST,
            1.5,
            Ease::ElasticOut { amplitude: 1.0, period: 0.6 },
        ),
        TriggerOptions::default().start(TriggerLine::new(Edge::Top, 0.7)),
    );

    section.add_loop(
        t.outer_circle,
        Motion::Oscillate(Oscillator::new(
            VisualState::REST,
            VisualState::REST.with_scale(1.15).with_opacity(0.8),
            2.5,
            Ease::SineInOut,
        )),
    );
    section.add_loop(
        t.inner_circle,
        Motion::Oscillate(Oscillator::new(
            VisualState::REST.with_opacity(0.9),
            VisualState::REST.with_scale(0.85),
            2.5,
            Ease::SineInOut,
        )),
    );
    for (i, spoke) in t.spokes.into_iter().enumerate() {
        section.add_loop(spoke, Motion::Spin(Spinner::new(15.0).delayed(i as f64 * 0.5)));
    }
    section
}
