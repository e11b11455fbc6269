//! Thin query/listener helpers over `web_sys`.
//!
//! Every lookup returns an `Option`; a missing element means the dependent
//! feature stays inactive, it is never an error.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement};

pub fn window() -> Option<web_sys::Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

pub fn body() -> Option<HtmlElement> {
    document().and_then(|d| d.body())
}

pub fn by_id(id: &str) -> Option<Element> {
    document().and_then(|d| d.get_element_by_id(id))
}

pub fn query(selector: &str) -> Option<Element> {
    document().and_then(|d| d.query_selector(selector).ok().flatten())
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let mut out = Vec::new();
    if let Some(doc) = document() {
        if let Ok(list) = doc.query_selector_all(selector) {
            for i in 0..list.length() {
                if let Some(node) = list.get(i) {
                    if let Ok(el) = node.dyn_into::<Element>() {
                        out.push(el);
                    }
                }
            }
        }
    }
    out
}

/// Milliseconds since navigation start, 0.0 when `performance` is missing.
pub fn now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Attach a permanent listener. The closure is leaked on purpose: listeners
/// live for the whole page, matching the document scope.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Same as [`listen`] but registered passively so the handler can never
/// block the scrolling thread.
pub fn listen_passive(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let opts = AddEventListenerOptions::new();
    opts.set_passive(true);
    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

/// True when the event fired directly on `el` (backdrop-click detection).
pub fn event_target_is(evt: &Event, el: &Element) -> bool {
    let el_val: &JsValue = el.as_ref();
    evt.target()
        .map(|t| &JsValue::from(t) == el_val)
        .unwrap_or(false)
}

pub fn html(el: &Element) -> Option<HtmlElement> {
    el.dyn_ref::<HtmlElement>().cloned()
}

/// Set an inline style property, ignoring failures on non-HTML elements.
pub fn set_style(el: &Element, prop: &str, value: &str) {
    if let Some(h) = html(el) {
        let _ = h.style().set_property(prop, value);
    }
}

pub fn remove_style(el: &Element, prop: &str) {
    if let Some(h) = html(el) {
        let _ = h.style().remove_property(prop);
    }
}
