use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use crate::form::{ContactForm, Field, Submission};
use crate::relay::EmailRelay;
use crate::sections::contact::{SUBMITTING_LABEL, SUBMIT_LABEL};

use super::relay::EmailJsRelay;
use super::toaster::SharedToaster;

/// Elements of the rendered contact form, in [`Field::ALL`] order.
pub struct ContactFields {
    pub form: HtmlFormElement,
    pub inputs: [Element; 3],
    pub errors: [Element; 3],
    pub button: HtmlButtonElement,
}

pub struct ContactView {
    fields: ContactFields,
    form: ContactForm,
}

fn read_value(el: &Element) -> String {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn write_value(el: &Element, value: &str) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        if input.value() != value {
            input.set_value(value);
        }
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        if area.value() != value {
            area.set_value(value);
        }
    }
}

fn set_disabled(el: &Element, disabled: bool) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_disabled(disabled);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_disabled(disabled);
    }
}

impl ContactView {
    /// Wire the form to a fresh [`ContactForm`]. The listeners keep the view
    /// alive; drop them to detach.
    pub fn attach(fields: ContactFields, relay: Rc<EmailJsRelay>, toaster: SharedToaster) -> Vec<EventListener> {
        let inputs = fields.inputs.clone();
        let form_el = fields.form.clone();
        let view = Rc::new(RefCell::new(Self { fields, form: ContactForm::new() }));
        view.borrow().render();

        let mut listeners = Vec::new();
        for (field, input) in Field::ALL.into_iter().zip(inputs) {
            let on_input = view.clone();
            let el = input.clone();
            listeners.push(EventListener::new(&input, "input", move |_| {
                let mut v = on_input.borrow_mut();
                v.form.change(field, read_value(&el));
                v.render();
            }));
            let on_blur = view.clone();
            listeners.push(EventListener::new(&input, "blur", move |_| {
                let mut v = on_blur.borrow_mut();
                v.form.blur(field);
                v.render();
            }));
        }

        let options = EventListenerOptions::enable_prevent_default();
        listeners.push(EventListener::new_with_options(&form_el, "submit", options, move |event| {
            event.prevent_default();
            let submission = {
                let mut v = view.borrow_mut();
                let submission = v.form.begin_submit();
                v.render();
                submission
            };
            match submission {
                Submission::Busy => log::debug!("submit ignored, already sending"),
                Submission::Rejected(toast) => {
                    toaster.borrow_mut().raise(toast);
                }
                Submission::Ready(params) => {
                    let (view, relay, toaster) = (view.clone(), relay.clone(), toaster.clone());
                    spawn_local(async move {
                        let outcome = relay.send(&params).await;
                        let toast = {
                            let mut v = view.borrow_mut();
                            let toast = v.form.finish_submit(outcome);
                            v.render();
                            toast
                        };
                        toaster.borrow_mut().raise(toast);
                    });
                }
            }
        }));
        listeners
    }

    fn render(&self) {
        let busy = self.form.is_submitting();
        for (i, field) in Field::ALL.into_iter().enumerate() {
            let input = &self.fields.inputs[i];
            let error = &self.fields.errors[i];
            write_value(input, self.form.value(field));
            set_disabled(input, busy);
            match self.form.visible_error(field) {
                Some(message) => {
                    error.set_text_content(Some(message));
                    let _ = error.remove_attribute("hidden");
                    let _ = input.set_attribute("aria-invalid", "true");
                }
                None => {
                    error.set_text_content(None);
                    let _ = error.set_attribute("hidden", "");
                    let _ = input.remove_attribute("aria-invalid");
                }
            }
        }
        self.fields.button.set_disabled(busy);
        self.fields
            .button
            .set_text_content(Some(if busy { SUBMITTING_LABEL } else { SUBMIT_LABEL }));
    }
}
