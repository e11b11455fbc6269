//! Animated stat counters.
//!
//! Each `.stat-number` carries a numeric `data-target`. When the stats
//! section first becomes visible the counters tick up every 10 ms in
//! `target / 200` sized steps, strictly increasing, and finish with the
//! literal `"{target}+"`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry};

use crate::dom;

/// Number of steps the count-up is divided into.
pub const SPEED: f64 = 200.0;

const TICK_MS: i32 = 10;

/// Next displayed value: always strictly greater than `count` (for
/// integral counts and positive targets) and never past `target`.
pub fn counter_step(count: f64, target: f64, increment: f64) -> f64 {
    (count + increment).ceil().min(target)
}

thread_local! {
    static OBSERVER: RefCell<Option<IntersectionObserver>> = const { RefCell::new(None) };
}

pub fn init() {
    let Some(stats) = dom::by_id("statistics") else {
        return;
    };
    if dom::query_all(".stat-number").is_empty() {
        return;
    }

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    for counter in dom::query_all(".stat-number") {
                        animate_counter(counter);
                    }
                    observer.unobserve(&entry.target());
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let Ok(observer) = IntersectionObserver::new(callback.as_ref().unchecked_ref()) else {
        return;
    };
    callback.forget();
    observer.observe(&stats);
    OBSERVER.with(|cell| cell.replace(Some(observer)));
}

/// Self-rescheduling timeout chain, stopping once the target is reached.
fn animate_counter(el: Element) {
    let target = el
        .get_attribute("data-target")
        .and_then(|t| t.parse::<f64>().ok())
        .unwrap_or(0.0);
    let increment = target / SPEED;
    let mut count = 0.0_f64;

    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if count < target {
            count = counter_step(count, target, increment);
            el.set_text_content(Some(&format!("{count}")));
            schedule_tick(&f);
        } else {
            el.set_text_content(Some(&format!("{target}+")));
        }
    }) as Box<dyn FnMut()>));
    schedule_tick(&g);
}

fn schedule_tick(f: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let Some(win) = dom::window() {
        if let Some(cb) = f.borrow().as_ref() {
            let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                TICK_MS,
            );
        }
    }
}
