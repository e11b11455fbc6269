//! Reveal-on-scroll: `.reveal` elements gain `visible` once they enter
//! the viewport, observed once then unobserved. Hosts without
//! `IntersectionObserver` get everything revealed immediately.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;

const THRESHOLD: f64 = 0.12;

thread_local! {
    static OBSERVER: RefCell<Option<IntersectionObserver>> = const { RefCell::new(None) };
}

fn observer_supported() -> bool {
    dom::window()
        .map(|w| js_sys::Reflect::has(w.as_ref(), &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

pub fn init() {
    let reveals = dom::query_all(".reveal");
    if reveals.is_empty() {
        return;
    }

    if !observer_supported() {
        for el in &reveals {
            let _ = el.class_list().add_1("visible");
        }
        return;
    }

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1("visible");
                    observer.unobserve(&target);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(THRESHOLD));
    let Ok(observer) =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
    else {
        return;
    };
    callback.forget();

    for el in &reveals {
        observer.observe(el);
    }
    OBSERVER.with(|cell| cell.replace(Some(observer)));
}
