use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use crate::notify::{ToastId, ToastRequest, Toaster};

use super::dom::{self, h};

/// DOM region listing the toasts, driven by a [`Toaster`] and one timeout
/// armed for its next deadline.
pub struct ToasterView {
    document: Document,
    region: Element,
    toaster: Toaster,
    nodes: HashMap<ToastId, Element>,
    timer: Option<Timeout>,
    this: Weak<RefCell<ToasterView>>,
}

pub type SharedToaster = Rc<RefCell<ToasterView>>;

fn now() -> f64 {
    web_sys::window().map(|w| dom::now(&w)).unwrap_or(0.0)
}

impl ToasterView {
    /// Create the region under `parent` and wire its close buttons.
    pub fn mount(document: &Document, parent: &Element) -> Result<(SharedToaster, EventListener), JsValue> {
        let region = h(document, "ol", "toaster", None)?;
        region.set_attribute("aria-live", "polite")?;
        parent.append_child(&region)?;

        let view = Rc::new_cyclic(|this| {
            RefCell::new(Self {
                document: document.clone(),
                region: region.clone(),
                toaster: Toaster::new(),
                nodes: HashMap::new(),
                timer: None,
                this: this.clone(),
            })
        });

        // One delegated listener for every close button.
        let weak = Rc::downgrade(&view);
        let listener = EventListener::new(&region, "click", move |event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Ok(Some(button)) = target.closest("[data-toast-close]") else {
                return;
            };
            let id = button.get_attribute("data-toast-close").and_then(|id| id.parse::<ToastId>().ok());
            if let (Some(id), Some(view)) = (id, weak.upgrade()) {
                view.borrow_mut().dismiss(id);
            }
        });
        Ok((view, listener))
    }

    pub fn raise(&mut self, request: ToastRequest) -> ToastId {
        let id = self.toaster.raise(now(), request);
        self.sync();
        id
    }

    pub fn dismiss(&mut self, id: ToastId) {
        self.toaster.dismiss(now(), id);
        self.sync();
    }

    fn fire(&mut self) {
        if self.toaster.advance(now()) {
            self.render();
        }
        self.arm();
    }

    fn sync(&mut self) {
        self.render();
        self.arm();
    }

    /// Point the timer at the next deadline.
    fn arm(&mut self) {
        let Some(deadline) = self.toaster.next_deadline() else {
            self.timer = None;
            return;
        };
        let delay = (deadline - now()).max(0.0).ceil() as u32;
        let weak = self.this.clone();
        self.timer = Some(Timeout::new(delay, move || {
            if let Some(view) = weak.upgrade() {
                view.borrow_mut().fire();
            }
        }));
    }

    fn render(&mut self) {
        for toast in self.toaster.toasts() {
            let state = if toast.open { "open" } else { "closed" };
            if let Some(node) = self.nodes.get(&toast.id) {
                let _ = node.set_attribute("data-state", state);
                continue;
            }
            match self.build(toast.id, &toast.title, &toast.description, toast.severity.as_str()) {
                Ok(node) => {
                    let _ = node.set_attribute("data-state", state);
                    let _ = self.region.append_child(&node);
                    self.nodes.insert(toast.id, node);
                }
                Err(err) => log::error!("toast {} not rendered: {err:?}", toast.id),
            }
        }
        let toaster = &self.toaster;
        self.nodes.retain(|id, node| {
            let alive = toaster.get(*id).is_some();
            if !alive {
                node.remove();
            }
            alive
        });
    }

    fn build(&self, id: ToastId, title: &str, description: &str, severity: &str) -> Result<Element, JsValue> {
        let doc = &self.document;
        let item = h(doc, "li", &format!("toast toast--{severity}"), None)?;
        item.set_attribute("role", "status")?;
        item.set_attribute("data-toast-id", &id.to_string())?;
        let body = h(doc, "div", "toast__body", None)?;
        dom::append(
            &body,
            &[&h(doc, "div", "toast__title", Some(title))?, &h(doc, "div", "toast__description", Some(description))?],
        )?;
        let close = h(doc, "button", "toast__close", Some("×"))?;
        close.set_attribute("type", "button")?;
        close.set_attribute("aria-label", "Close")?;
        close.set_attribute("data-toast-close", &id.to_string())?;
        dom::append(&item, &[&body, &close])?;
        Ok(item)
    }

    /// Cancel pending callbacks and the timer; the region stays as it is.
    pub fn unmount(&mut self) {
        self.toaster.cancel_all();
        self.timer = None;
    }
}
