use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::cursor::{cursor_transform, PointerFollower, INTERACTIVE_SELECTOR};

use super::dom::h;

/// The dot and glow that trail the pointer.
pub struct CursorView {
    dot: HtmlElement,
    glow: HtmlElement,
    follower: PointerFollower,
}

impl CursorView {
    pub fn mount(document: &Document, parent: &Element) -> Result<Rc<RefCell<Self>>, JsValue> {
        let dot: HtmlElement = h(document, "div", "cursor cursor--dot", None)?.dyn_into()?;
        let glow: HtmlElement = h(document, "div", "cursor cursor--glow", None)?.dyn_into()?;
        for el in [&dot, &glow] {
            el.set_attribute("aria-hidden", "true")?;
            parent.append_child(el)?;
        }
        Ok(Rc::new(RefCell::new(Self { dot, glow, follower: PointerFollower::default() })))
    }

    pub fn pointer_moved(&mut self, client_x: f64, client_y: f64) {
        self.follower.pointer_moved(client_x as f32, client_y as f32);
    }

    pub fn hover_changed(&mut self, hovering: bool) {
        self.follower.hover_changed(hovering);
    }

    pub fn frame(&mut self, dt: f64) {
        if self.follower.is_settled() {
            return;
        }
        let frame = self.follower.tick(dt);
        let _ = self.dot.style().set_property("transform", &cursor_transform(frame.dot, frame.scale));
        let _ = self.glow.style().set_property("transform", &cursor_transform(frame.glow, frame.scale));
    }

    pub fn unmount(&self) {
        self.dot.remove();
        self.glow.remove();
    }
}

/// Enter/leave listeners on every interactive element currently in `root`.
pub fn watch_interactive(root: &Element, view: &Rc<RefCell<CursorView>>) -> Result<Vec<EventListener>, JsValue> {
    let nodes = root.query_selector_all(INTERACTIVE_SELECTOR)?;
    let mut listeners = Vec::with_capacity(nodes.length() as usize * 2);
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        for (event, hovering) in [("mouseenter", true), ("mouseleave", false)] {
            let view = view.clone();
            listeners.push(EventListener::new(&node, event, move |_| {
                view.borrow_mut().hover_changed(hovering);
            }));
        }
    }
    log::debug!("cursor watching {} interactive elements", nodes.length());
    Ok(listeners)
}
