use crate::config::MotionConfig;
use crate::easing::Ease;
use crate::scroll::{AnimationTarget, Edge, TriggerLine, TriggerOptions};
use crate::tween::{HoverTween, Position, Stagger, Timeline, VisualState};

use super::SectionMotion;

pub const TITLE: &str = "Skills & Expertise";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub category: &'static str,
}

pub const SKILLS: [Skill; 12] = [
    Skill { name: "React", category: "Frontend" },
    Skill { name: "TypeScript", category: "Language" },
    Skill { name: "Node.js", category: "Backend" },
    Skill { name: "GSAP", category: "Animation" },
    Skill { name: "Three.js", category: "3D Graphics" },
    Skill { name: "Tailwind CSS", category: "Styling" },
    Skill { name: "Next.js", category: "Framework" },
    Skill { name: "GraphQL", category: "API" },
    Skill { name: "WebGL", category: "3D Graphics" },
    Skill { name: "PostgreSQL", category: "Database" },
    Skill { name: "Docker", category: "DevOps" },
    Skill { name: "Git", category: "Version Control" },
];

/// Cards revealed together.
pub const BATCH_SIZE: usize = 3;
/// Total stagger spread inside one batch, seconds.
const BATCH_STAGGER: f64 = 0.15;
/// Extra delay per batch, seconds.
const BATCH_DELAY: f64 = 0.1;
/// Touch lift is held this long after the finger leaves, ms.
pub const TOUCH_RELEASE_DELAY_MS: u32 = 200;

pub struct SkillsTargets<T> {
    pub container: T,
    pub title: T,
    pub grid: T,
    /// Outer card wrappers, one per skill, revealed on scroll.
    pub cards: Vec<T>,
    /// Inner card faces, lifted on hover.
    pub faces: Vec<T>,
}

pub fn batch_timeline(batch_index: usize, len: usize) -> Timeline {
    let each = if len > 1 { BATCH_STAGGER / (len - 1) as f64 } else { 0.0 };
    Timeline::new().staggered(
        0..len,
        VisualState::REST.with_opacity(0.0).with_y(60.0).with_scale(0.8),
        VisualState::REST,
        0.6,
        Ease::BackOut(1.4),
        Stagger::new(Position::At(batch_index as f64 * BATCH_DELAY), each),
    )
}

pub fn hover_tween() -> HoverTween {
    HoverTween::new(VisualState::REST, VisualState::REST.with_scale(1.1).with_y(-8.0), 0.3, Ease::Power2Out)
}

/// Mounts the section. Hover indices match card order.
pub fn mount<T: AnimationTarget + Clone>(config: &MotionConfig, reduced_motion: bool, t: SkillsTargets<T>) -> SectionMotion<T> {
    let mut section = SectionMotion::new("skills", config, reduced_motion);
    let driver = section.driver_mut();
    driver.bind_timeline(
        t.container,
        vec![t.title],
        Timeline::single(VisualState::REST.with_opacity(0.0).with_y(-50.0), VisualState::REST, 1.0, Ease::Power3Out),
        TriggerOptions::default().start(TriggerLine::new(Edge::Top, 0.7)),
    );
    for (batch_index, batch) in t.cards.chunks(BATCH_SIZE).enumerate() {
        driver.bind_timeline(
            t.grid.clone(),
            batch.to_vec(),
            batch_timeline(batch_index, batch.len()),
            TriggerOptions::default().start(TriggerLine::new(Edge::Top, 0.75)),
        );
    }
    for face in t.faces {
        section.add_hover(face, hover_tween());
    }
    section
}
