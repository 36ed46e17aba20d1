use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use crate::config::MotionConfig;
use crate::sections::about::{self, AboutTargets};
use crate::sections::contact::{self, ContactTargets};
use crate::sections::hero::{self, HeroTargets};
use crate::sections::projects::{self, ProjectsTargets};
use crate::sections::skills::{self, SkillsTargets};
use crate::sections::SectionMotion;

use super::contact::ContactFields;
use super::dom::{append, glow_filter, gradient, h, set_attrs, svg};

pub type SharedSection = Rc<RefCell<SectionMotion<Element>>>;

/// Everything [`build`] put on the page.
pub struct Built {
    pub sections: Vec<SharedSection>,
    pub contact: ContactFields,
    pub listeners: Vec<EventListener>,
}

fn section(doc: &Document, id: &str) -> Result<Element, JsValue> {
    let el = h(doc, "section", &format!("section section--{id}"), None)?;
    el.set_id(id);
    Ok(el)
}

fn shared(section: SectionMotion<Element>) -> SharedSection {
    log::debug!("{} mounted with {} observers", section.name(), section.observer_count());
    Rc::new(RefCell::new(section))
}

/// Render every section into `root` and bind its motion.
pub fn build(doc: &Document, root: &Element, config: &MotionConfig, reduced_motion: bool) -> Result<Built, JsValue> {
    let mut listeners = Vec::new();
    let mut sections = Vec::with_capacity(5);

    sections.push(shared(build_hero(doc, root, config, reduced_motion)?));
    sections.push(shared(build_about(doc, root, config, reduced_motion)?));

    let skills = shared(build_skills(doc, root, config, reduced_motion)?);
    if !reduced_motion {
        listeners.extend(skill_hovers(root, &skills)?);
    }
    sections.push(skills);

    sections.push(shared(build_projects(doc, root, config, reduced_motion)?));

    let (motion, contact) = build_contact(doc, root, config, reduced_motion)?;
    sections.push(shared(motion));

    Ok(Built { sections, contact, listeners })
}

fn build_hero(doc: &Document, root: &Element, config: &MotionConfig, reduced: bool) -> Result<SectionMotion<Element>, JsValue> {
    let container = section(doc, "hero")?;
    let content = h(doc, "div", "hero__content", None)?;
    let heading = h(doc, "h1", "hero__heading", None)?;
    heading.set_attribute("aria-label", hero::HEADING)?;
    let mut lines = Vec::with_capacity(3);
    for text in hero::LINES {
        let line = h(doc, "span", "hero__line", Some(text))?;
        heading.append_child(&line)?;
        lines.push(line);
    }
    let subtitle = h(doc, "p", "hero__subtitle", Some(hero::SUBTITLE))?;
    let cta = h(doc, "a", "hero__cta", Some(hero::CTA))?;
    cta.set_attribute("href", "#projects")?;
    append(&content, &[&heading, &subtitle, &cta])?;

    let emblem = svg(doc, "svg", &[("class", "hero__art"), ("viewBox", "-100 -100 200 200"), ("aria-hidden", "true")])?;
    let defs = svg(doc, "defs", &[])?;
    append(
        &defs,
        &[
            &gradient(doc, "hero-blob-a", ("0%", "0%", "100%", "100%"), &[("0%", "#d3dad9", "0.9"), ("100%", "#715a5a", "0.6")])?,
            &gradient(doc, "hero-blob-b", ("100%", "0%", "0%", "100%"), &[("0%", "#44444e", "0.8"), ("100%", "#d3dad9", "0.4")])?,
            &glow_filter(doc, "hero-glow", "4")?,
        ],
    )?;
    let blob_group = svg(doc, "g", &[("class", "hero__blobs"), ("filter", "url(#hero-glow)")])?;
    let blob_a = svg(doc, "path", &[("d", hero::BLOB_PATHS[0]), ("fill", "url(#hero-blob-a)")])?;
    let blob_b = svg(doc, "path", &[("d", hero::BLOB_PATHS[1]), ("fill", "url(#hero-blob-b)")])?;
    append(&blob_group, &[&blob_a, &blob_b])?;
    append(&emblem, &[&defs, &blob_group])?;
    append(&container, &[&content, &emblem])?;
    root.append_child(&container)?;

    let [l1, l2, l3]: [Element; 3] = lines.try_into().map_err(|_| JsValue::from_str("hero lines"))?;
    Ok(hero::mount(
        config,
        reduced,
        HeroTargets {
            container,
            lines: [l1, l2, l3],
            subtitle,
            cta,
            blob_group,
            blobs: [blob_a, blob_b],
            emblem,
        },
    ))
}

fn build_about(doc: &Document, root: &Element, config: &MotionConfig, reduced: bool) -> Result<SectionMotion<Element>, JsValue> {
    let container = section(doc, "about")?;
    let title = h(doc, "h2", "section__title", Some(about::TITLE))?;
    let grid = h(doc, "div", "about__grid", None)?;
    let text = h(doc, "div", "about__text", None)?;
    let [p1, p2, p3] = about::PARAGRAPHS;
    let paragraphs = [
        h(doc, "p", "about__paragraph", Some(p1))?,
        h(doc, "p", "about__paragraph", Some(p2))?,
        h(doc, "p", "about__paragraph", Some(p3))?,
    ];
    append(&text, &paragraphs.iter().collect::<Vec<_>>())?;

    let motif = h(doc, "div", "about__motif", None)?;
    let art = svg(doc, "svg", &[("viewBox", "0 0 200 200"), ("aria-hidden", "true")])?;
    let defs = svg(doc, "defs", &[])?;
    defs.append_child(&gradient(
        doc,
        "about-ring",
        ("0%", "0%", "100%", "100%"),
        &[("0%", "#d3dad9", "1"), ("100%", "#715a5a", "1")],
    )?)?;
    let outer_circle = svg(
        doc,
        "circle",
        &[("cx", "100"), ("cy", "100"), ("r", "80"), ("fill", "none"), ("stroke", "url(#about-ring)"), ("stroke-width", "2")],
    )?;
    let inner_circle = svg(
        doc,
        "circle",
        &[("cx", "100"), ("cy", "100"), ("r", "50"), ("fill", "#44444e"), ("fill-opacity", "0.5")],
    )?;
    let mut spokes = Vec::with_capacity(about::SPOKES.len());
    for (x1, y1, x2, y2) in about::SPOKES {
        let spoke = svg(doc, "line", &[("stroke", "#d3dad9"), ("stroke-width", "2"), ("stroke-linecap", "round")])?;
        set_attrs(
            &spoke,
            &[
                ("x1", x1.to_string().as_str()),
                ("y1", y1.to_string().as_str()),
                ("x2", x2.to_string().as_str()),
                ("y2", y2.to_string().as_str()),
            ],
        )?;
        spokes.push(spoke);
    }
    append(&art, &[&defs, &outer_circle, &inner_circle])?;
    append(&art, &spokes.iter().collect::<Vec<_>>())?;
    motif.append_child(&art)?;
    append(&grid, &[&text, &motif])?;
    append(&container, &[&title, &grid])?;
    root.append_child(&container)?;

    Ok(about::mount(
        config,
        reduced,
        AboutTargets { container, title, paragraphs, motif, outer_circle, inner_circle, spokes },
    ))
}

fn build_skills(doc: &Document, root: &Element, config: &MotionConfig, reduced: bool) -> Result<SectionMotion<Element>, JsValue> {
    let container = section(doc, "skills")?;
    let title = h(doc, "h2", "section__title", Some(skills::TITLE))?;
    let grid = h(doc, "div", "skills__grid", None)?;
    let mut cards = Vec::with_capacity(skills::SKILLS.len());
    let mut faces = Vec::with_capacity(skills::SKILLS.len());
    for skill in skills::SKILLS {
        let card = h(doc, "div", "skill", None)?;
        let face = h(doc, "div", "skill__face", None)?;
        append(
            &face,
            &[&h(doc, "span", "skill__name", Some(skill.name))?, &h(doc, "span", "skill__category", Some(skill.category))?],
        )?;
        card.append_child(&face)?;
        grid.append_child(&card)?;
        cards.push(card);
        faces.push(face);
    }
    append(&container, &[&title, &grid])?;
    root.append_child(&container)?;

    Ok(skills::mount(config, reduced, SkillsTargets { container, title, grid, cards, faces }))
}

/// Pointer and touch lift on each skill card. Touch release lingers briefly.
fn skill_hovers(root: &Element, section: &SharedSection) -> Result<Vec<EventListener>, JsValue> {
    let cards = root.query_selector_all(".skill")?;
    let mut listeners = Vec::new();
    for i in 0..cards.length() {
        let Some(card) = cards.item(i) else { continue };
        let index = i as usize;
        for (event, hovered) in [("mouseenter", true), ("mouseleave", false), ("touchstart", true)] {
            let section = section.clone();
            listeners.push(EventListener::new(&card, event, move |_| {
                section.borrow_mut().set_hover(index, hovered);
            }));
        }
        let release: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        let section = Rc::downgrade(section);
        listeners.push(EventListener::new(&card, "touchend", move |_| {
            let section = section.clone();
            *release.borrow_mut() = Some(Timeout::new(skills::TOUCH_RELEASE_DELAY_MS, move || {
                if let Some(section) = section.upgrade() {
                    section.borrow_mut().set_hover(index, false);
                }
            }));
        }));
    }
    Ok(listeners)
}

fn build_projects(doc: &Document, root: &Element, config: &MotionConfig, reduced: bool) -> Result<SectionMotion<Element>, JsValue> {
    let container = section(doc, "projects")?;
    let title = h(doc, "h2", "section__title", Some(projects::TITLE))?;

    let wave_art = svg(
        doc,
        "svg",
        &[("class", "projects__wave"), ("viewBox", "0 0 500 250"), ("preserveAspectRatio", "none"), ("aria-hidden", "true")],
    )?;
    let defs = svg(doc, "defs", &[])?;
    defs.append_child(&gradient(
        doc,
        "projects-wave",
        ("0%", "0%", "100%", "0%"),
        &[("0%", "#715a5a", "0"), ("50%", "#d3dad9", "1"), ("100%", "#715a5a", "0")],
    )?)?;
    let (first_path, _) = projects::WAVE_KEYFRAMES[0];
    let wave = svg(
        doc,
        "path",
        &[("d", first_path), ("fill", "none"), ("stroke", "url(#projects-wave)"), ("stroke-width", "2")],
    )?;
    append(&wave_art, &[&defs, &wave])?;

    let grid = h(doc, "div", "projects__grid", None)?;
    let mut cards = Vec::with_capacity(projects::PROJECTS.len());
    let mut glows = Vec::with_capacity(projects::PROJECTS.len());
    for project in projects::PROJECTS {
        let card = h(doc, "article", "project", None)?;
        let glow_layer = h(doc, "div", "project__glows", None)?;
        glow_layer.set_attribute("aria-hidden", "true")?;
        let card_glows = vec![h(doc, "div", "project__glow", None)?, h(doc, "div", "project__glow project__glow--alt", None)?];
        append(&glow_layer, &card_glows.iter().collect::<Vec<_>>())?;
        append(
            &card,
            &[
                &glow_layer,
                &h(doc, "h3", "project__title", Some(project.title))?,
                &h(doc, "p", "project__description", Some(project.description))?,
                &h(doc, "p", "project__content", Some(project.content))?,
            ],
        )?;
        grid.append_child(&card)?;
        cards.push(card);
        glows.push(card_glows);
    }
    append(&container, &[&wave_art, &title, &grid])?;
    root.append_child(&container)?;

    projects::mount(config, reduced, ProjectsTargets { container, title, cards, glows, wave })
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn field_row(doc: &Document, name: &str, label: &str, control: &str) -> Result<(Element, Element, Element), JsValue> {
    let row = h(doc, "div", "form-row", None)?;
    let id = format!("contact-{name}");
    let label_el = h(doc, "label", "form-label", Some(label))?;
    label_el.set_attribute("for", &id)?;
    let input = h(doc, control, "form-control", None)?;
    set_attrs(&input, &[("id", id.as_str()), ("name", name), ("placeholder", label)])?;
    match name {
        "email" => input.set_attribute("type", "email")?,
        "message" => input.set_attribute("rows", "5")?,
        _ => input.set_attribute("type", "text")?,
    }
    let error = h(doc, "p", "form-error", None)?;
    error.set_attribute("hidden", "")?;
    append(&row, &[&label_el, &input, &error])?;
    Ok((row, input, error))
}

fn build_contact(
    doc: &Document,
    root: &Element,
    config: &MotionConfig,
    reduced: bool,
) -> Result<(SectionMotion<Element>, ContactFields), JsValue> {
    let container = section(doc, "contact")?;
    let title = h(doc, "h2", "section__title", Some(contact::TITLE))?;
    let form = h(doc, "form", "contact__form", None)?;
    form.set_attribute("novalidate", "")?;

    let (name_row, name, name_error) = field_row(doc, "name", "Name", "input")?;
    let (email_row, email, email_error) = field_row(doc, "email", "Email", "input")?;
    let (message_row, message, message_error) = field_row(doc, "message", "Message", "textarea")?;
    let submit_row = h(doc, "div", "form-row", None)?;
    let button = h(doc, "button", "contact__submit", Some(contact::SUBMIT_LABEL))?;
    button.set_attribute("type", "submit")?;
    submit_row.append_child(&button)?;

    append(&form, &[&name_row, &email_row, &message_row, &submit_row])?;
    append(&container, &[&title, &form])?;
    root.append_child(&container)?;

    let fields = ContactFields {
        form: form.clone().dyn_into()?,
        inputs: [name, email, message],
        errors: [name_error, email_error, message_error],
        button: button.dyn_into()?,
    };
    let motion = contact::mount(
        config,
        reduced,
        ContactTargets { container, title, form, rows: [name_row, email_row, message_row, submit_row] },
    );
    Ok((motion, fields))
}
