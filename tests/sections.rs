mod common;

use common::{at_rest, close, Probe};
use inkfolio_wasm::config::MotionConfig;
use inkfolio_wasm::sections::about::{self, AboutTargets};
use inkfolio_wasm::sections::contact::{self, ContactTargets};
use inkfolio_wasm::sections::hero::{self, HeroTargets};
use inkfolio_wasm::sections::projects::{self, ProjectsTargets};
use inkfolio_wasm::sections::skills::{self, SkillsTargets};
use inkfolio_wasm::sections::SectionMotion;

const VH: f64 = 1000.0;

fn probes(n: usize) -> Vec<Probe> {
    (0..n).map(|_| Probe::at(1200.0, 300.0)).collect()
}

struct HeroProbes {
    container: Probe,
    lines: [Probe; 3],
    subtitle: Probe,
    cta: Probe,
    blob_group: Probe,
    blobs: [Probe; 2],
    emblem: Probe,
}

impl HeroProbes {
    fn new() -> Self {
        Self {
            container: Probe::at(0.0, VH),
            lines: Default::default(),
            subtitle: Probe::default(),
            cta: Probe::default(),
            blob_group: Probe::default(),
            blobs: Default::default(),
            emblem: Probe::default(),
        }
    }

    fn targets(&self) -> HeroTargets<Probe> {
        HeroTargets {
            container: self.container.clone(),
            lines: self.lines.clone(),
            subtitle: self.subtitle.clone(),
            cta: self.cta.clone(),
            blob_group: self.blob_group.clone(),
            blobs: self.blobs.clone(),
            emblem: self.emblem.clone(),
        }
    }

    fn animated(&self) -> Vec<&Probe> {
        let mut all: Vec<&Probe> = self.lines.iter().collect();
        all.extend([&self.subtitle, &self.cta, &self.blob_group]);
        all
    }
}

fn mount_all(reduced: bool) -> (Vec<SectionMotion<Probe>>, Vec<Probe>, Probe) {
    let config = MotionConfig::default();
    let hero = HeroProbes::new();
    let mut entering: Vec<Probe> = hero.animated().into_iter().cloned().collect();

    let about_parts = probes(4);
    let about_targets = AboutTargets {
        container: Probe::at(1200.0, VH),
        title: about_parts[0].clone(),
        paragraphs: [about_parts[1].clone(), about_parts[2].clone(), about_parts[3].clone()],
        motif: Probe::at(1400.0, 300.0),
        outer_circle: Probe::default(),
        inner_circle: Probe::default(),
        spokes: probes(about::SPOKES.len()),
    };
    entering.extend(about_parts);
    entering.push(about_targets.motif.clone());

    let cards = probes(skills::SKILLS.len());
    let skill_title = Probe::default();
    entering.extend(cards.iter().cloned());
    entering.push(skill_title.clone());
    let skills_targets = SkillsTargets {
        container: Probe::at(2400.0, VH),
        title: skill_title,
        grid: Probe::at(2600.0, 600.0),
        cards,
        faces: probes(skills::SKILLS.len()),
    };

    let project_cards = probes(projects::PROJECTS.len());
    let project_title = Probe::default();
    let wave = Probe::default();
    entering.extend(project_cards.iter().cloned());
    entering.push(project_title.clone());
    let projects_targets = ProjectsTargets {
        container: Probe::at(3600.0, 2.0 * VH),
        title: project_title,
        cards: project_cards,
        glows: (0..projects::PROJECTS.len()).map(|_| probes(2)).collect(),
        wave: wave.clone(),
    };

    let rows = probes(4);
    let contact_title = Probe::default();
    entering.extend(rows.iter().cloned());
    entering.push(contact_title.clone());
    let contact_targets = ContactTargets {
        container: Probe::at(5600.0, VH),
        title: contact_title,
        form: Probe::at(5800.0, 600.0),
        rows: [rows[0].clone(), rows[1].clone(), rows[2].clone(), rows[3].clone()],
    };

    let sections = vec![
        hero::mount(&config, reduced, hero.targets()),
        about::mount(&config, reduced, about_targets),
        skills::mount(&config, reduced, skills_targets),
        projects::mount(&config, reduced, projects_targets).unwrap(),
        contact::mount(&config, reduced, contact_targets),
    ];
    (sections, entering, wave)
}

#[test]
fn reduced_motion_mounts_everything_at_rest_without_observers() {
    let (mut sections, entering, wave) = mount_all(true);

    for section in &sections {
        assert_eq!(section.observer_count(), 0, "{}", section.name());
        assert_eq!(section.loop_count(), 0, "{}", section.name());
    }
    for probe in &entering {
        assert!(at_rest(&probe.last().unwrap()));
    }
    assert_eq!(wave.last_path().as_deref(), Some(projects::WAVE_KEYFRAMES[1].0));
    assert!(close(wave.last().unwrap().opacity, projects::WAVE_KEYFRAMES[1].1));

    let writes: Vec<usize> = entering.iter().map(Probe::writes).collect();
    for section in &mut sections {
        section.on_scroll(VH);
        section.tick(0.5, 0.5);
    }
    assert_eq!(entering.iter().map(Probe::writes).collect::<Vec<_>>(), writes);
}

#[test]
fn full_motion_registers_one_observer_per_binding() {
    let (sections, entering, wave) = mount_all(false);
    let counts: Vec<(&str, usize, usize)> =
        sections.iter().map(|s| (s.name(), s.observer_count(), s.loop_count())).collect();
    assert_eq!(
        counts,
        [
            ("hero", 2, 3),
            ("about", 5, 2 + about::SPOKES.len()),
            ("skills", 1 + skills::SKILLS.len().div_ceil(skills::BATCH_SIZE), 0),
            ("projects", 1 + projects::PROJECTS.len() + 1, 2 * projects::PROJECTS.len()),
            ("contact", 2, 0),
        ]
    );
    for probe in &entering {
        assert!(probe.last().unwrap().opacity < 1.0 || probe.last().unwrap().scale < 1.0);
    }
    assert_eq!(wave.last_path(), None);
}

#[test]
fn hero_intro_plays_in_sequence() {
    let config = MotionConfig::default();
    let hero = HeroProbes::new();
    let mut section = hero::mount(&config, false, hero.targets());

    section.on_scroll(VH);
    section.tick(0.5, 0.5);
    let [first, second, third] = &hero.lines;
    assert!(first.last().unwrap().opacity > 0.0);
    assert!(close(third.last().unwrap().opacity, 0.0));

    let timeline = hero::intro_timeline();
    section.tick(timeline.duration(), 0.5 + timeline.duration());
    for line in [first, second, third, &hero.subtitle, &hero.cta] {
        assert!(at_rest(&line.last().unwrap()));
    }
    // Spinning and pulsing start straight away.
    assert!(hero.emblem.writes() > 0);
    assert!(hero.blobs[0].writes() > 0);
}

#[test]
fn hero_intro_overlaps_lines() {
    let tracks = hero::intro_timeline();
    let starts: Vec<f64> = tracks.tracks().iter().map(|t| t.start).collect();
    let expected = [0.0, 0.4, 0.8, 1.6, 2.2];
    for (start, want) in starts.iter().zip(expected) {
        assert!(close(*start, want), "{starts:?}");
    }
    assert!(close(tracks.duration(), 2.8));
}

#[test]
fn skill_batches_spread_their_stagger() {
    let timeline = skills::batch_timeline(2, 3);
    let starts: Vec<f64> = timeline.tracks().iter().map(|t| t.start).collect();
    assert!(close(starts[0], 0.2));
    assert!(close(starts[1], 0.275));
    assert!(close(starts[2], 0.35));

    let single = skills::batch_timeline(0, 1);
    assert_eq!(single.tracks().len(), 1);
}

#[test]
fn skill_hover_lifts_and_settles() {
    let config = MotionConfig::default();
    let faces = probes(skills::SKILLS.len());
    let mut section = skills::mount(
        &config,
        false,
        SkillsTargets {
            container: Probe::at(0.0, VH),
            title: Probe::default(),
            grid: Probe::at(100.0, 600.0),
            cards: probes(skills::SKILLS.len()),
            faces: faces.clone(),
        },
    );

    section.set_hover(4, true);
    section.tick(1.0, 1.0);
    let lifted = faces[4].last().unwrap();
    assert!(close(lifted.scale, 1.1));
    assert!(close(lifted.y, -8.0));
    assert_eq!(faces[3].writes(), 0);

    section.set_hover(4, false);
    section.tick(1.0, 2.0);
    assert!(at_rest(&faces[4].last().unwrap()));
}

#[test]
fn project_wave_follows_scroll_with_lag() {
    let config = MotionConfig::default();
    let container = Probe::at(VH, 2.0 * VH);
    let wave = Probe::default();
    let mut section = projects::mount(
        &config,
        false,
        ProjectsTargets {
            container: container.clone(),
            title: Probe::default(),
            cards: Vec::new(),
            glows: Vec::new(),
            wave: wave.clone(),
        },
    )
    .unwrap();

    // Scrolled so the section's centre is at the viewport centre: halfway.
    container.place(-500.0, 2.0 * VH);
    section.on_scroll(VH);
    section.tick(0.1, 0.1);
    let early_path = wave.last_path().unwrap();
    section.tick(10.0, 10.1);
    let settled = wave.last_path().unwrap();
    assert_ne!(early_path, settled);
    assert!(wave.last().unwrap().opacity > 0.0);
}

#[test]
fn teardown_stops_every_write() {
    let hero = HeroProbes::new();
    let mut section = hero::mount(&MotionConfig::default(), false, hero.targets());
    section.on_scroll(VH);
    section.tick(0.1, 0.1);
    let writes: Vec<usize> = [&hero.emblem, &hero.blobs[1], &hero.lines[0]].iter().map(|p| p.writes()).collect();

    section.teardown();
    section.on_scroll(VH);
    section.tick(0.1, 0.2);
    let after: Vec<usize> = [&hero.emblem, &hero.blobs[1], &hero.lines[0]].iter().map(|p| p.writes()).collect();
    assert_eq!(after, writes);

    let (mut sections, _, _) = mount_all(false);
    for section in &mut sections {
        section.teardown();
        assert_eq!(section.observer_count(), 0);
        assert_eq!(section.loop_count(), 0);
    }
}
