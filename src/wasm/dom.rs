use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, SvgElement, Window};

use crate::error::MountError;
use crate::scroll::{AnimationTarget, Bounds};
use crate::tween::VisualState;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

impl From<MountError> for JsValue {
    fn from(err: MountError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn style_of(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        Some(html.style())
    } else {
        element.dyn_ref::<SvgElement>().map(|svg| svg.style())
    }
}

impl AnimationTarget for Element {
    fn bounds(&self) -> Option<Bounds> {
        if !self.is_connected() {
            return None;
        }
        let rect = self.get_bounding_client_rect();
        Some(Bounds { top: rect.top(), bottom: rect.bottom() })
    }

    fn apply(&self, state: &VisualState) {
        let Some(style) = style_of(self) else {
            return;
        };
        let _ = style.set_property("transform", &state.css_transform());
        let _ = style.set_property("opacity", &state.css_opacity());
    }

    fn set_path(&self, d: &str) {
        let _ = self.set_attribute("d", d);
    }
}

pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Viewport size in CSS pixels.
pub fn viewport(window: &Window) -> (f64, f64) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

/// Milliseconds on the page clock.
pub fn now(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

/// HTML element with a class list and optional text.
pub fn h(doc: &Document, tag: &str, class: &str, text: Option<&str>) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if let Some(text) = text {
        el.set_text_content(Some(text));
    }
    Ok(el)
}

/// SVG element with attributes.
pub fn svg(doc: &Document, tag: &str, attrs: &[(&str, &str)]) -> Result<Element, JsValue> {
    let el = doc.create_element_ns(Some(SVG_NS), tag)?;
    set_attrs(&el, attrs)?;
    Ok(el)
}

pub fn set_attrs(el: &Element, attrs: &[(&str, &str)]) -> Result<(), JsValue> {
    for (name, value) in attrs {
        el.set_attribute(name, value)?;
    }
    Ok(())
}

/// Append children in order.
pub fn append(parent: &Element, children: &[&Element]) -> Result<(), JsValue> {
    for child in children {
        parent.append_child(child)?;
    }
    Ok(())
}

/// Two-stop linear gradient for SVG `<defs>`.
pub fn gradient(
    doc: &Document,
    id: &str,
    (x1, y1, x2, y2): (&str, &str, &str, &str),
    stops: &[(&str, &str, &str)],
) -> Result<Element, JsValue> {
    let grad = svg(doc, "linearGradient", &[("id", id), ("x1", x1), ("y1", y1), ("x2", x2), ("y2", y2)])?;
    for (offset, color, opacity) in stops {
        let stop = svg(doc, "stop", &[("offset", offset), ("stop-color", color), ("stop-opacity", opacity)])?;
        grad.append_child(&stop)?;
    }
    Ok(grad)
}

/// Soft blur-and-merge glow filter.
pub fn glow_filter(doc: &Document, id: &str, deviation: &str) -> Result<Element, JsValue> {
    let filter = svg(doc, "filter", &[("id", id)])?;
    let blur = svg(doc, "feGaussianBlur", &[("stdDeviation", deviation), ("result", "coloredBlur")])?;
    let merge = svg(doc, "feMerge", &[])?;
    merge.append_child(&svg(doc, "feMergeNode", &[("in", "coloredBlur")])?)?;
    merge.append_child(&svg(doc, "feMergeNode", &[("in", "SourceGraphic")])?)?;
    append(&filter, &[&blur, &merge])?;
    Ok(filter)
}
