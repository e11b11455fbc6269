//! Demo modals and page chrome: login dialog, cookie banner, page loader,
//! and the unified Escape dismissal.
//!
//! The login form always reports success; it is a demo stub, not real
//! authentication.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom;
use crate::task::OneShot;

const COOKIE_DELAY_MS: i32 = 3000;
const LOADER_DELAY_MS: i32 = 1000;

#[derive(Default)]
struct Timers {
    cookie: Option<OneShot>,
    loader: Option<OneShot>,
}

thread_local! {
    static TIMERS: RefCell<Timers> = RefCell::new(Timers::default());
}

fn show(el: &Element) {
    dom::set_style(el, "display", "flex");
}

fn hide(el: &Element) {
    dom::set_style(el, "display", "none");
}

fn alert(message: &str) {
    if let Some(win) = dom::window() {
        let _ = win.alert_with_message(message);
    }
}

pub fn init() {
    init_login();
    init_cookie_banner();
    init_page_loader();
    init_escape_dismiss();
}

fn init_login() {
    let Some(container) = dom::by_id("login-container") else {
        return;
    };

    if let Some(btn) = dom::by_id("login-btn") {
        let container = container.clone();
        dom::listen(btn.as_ref(), "click", move |_| show(&container));
    }
    if let Some(close) = dom::query(".login-close") {
        let container = container.clone();
        dom::listen(close.as_ref(), "click", move |_| hide(&container));
    }

    // Backdrop click closes; the container itself is the dimmed backdrop.
    if let Some(doc) = dom::document() {
        let backdrop = container.clone();
        dom::listen(doc.as_ref(), "click", move |evt| {
            if dom::event_target_is(&evt, &backdrop) {
                hide(&backdrop);
            }
        });
    }

    if let Some(form) = dom::by_id("login-form") {
        dom::listen(form.as_ref(), "submit", move |evt| {
            evt.prevent_default();
            alert("Autentificare reușită! (aceasta este o funcționalitate demonstrativă)");
            hide(&container);
        });
    }
}

/// The banner reappears on every page load after a short delay; accepting
/// or declining only hides it for the current visit.
fn init_cookie_banner() {
    let Some(banner) = dom::by_id("cookie-popup") else {
        return;
    };

    let popup = banner.clone();
    let timer = OneShot::new(COOKIE_DELAY_MS, move || show(&popup));
    TIMERS.with(|t| t.borrow_mut().cookie = timer);

    for id in ["accept-cookies", "decline-cookies"] {
        if let Some(btn) = dom::by_id(id) {
            let banner = banner.clone();
            dom::listen(btn.as_ref(), "click", move |_| hide(&banner));
        }
    }
}

fn init_page_loader() {
    let Some(_) = dom::by_id("page-loader") else {
        return;
    };

    let schedule = || {
        let timer = OneShot::new(LOADER_DELAY_MS, || {
            if let Some(loader) = dom::by_id("page-loader") {
                let _ = loader.class_list().add_1("hidden");
            }
        });
        TIMERS.with(|t| t.borrow_mut().loader = timer);
    };

    // The module may initialize after `load` already fired.
    let already_loaded = dom::document()
        .map(|d| d.ready_state() == "complete")
        .unwrap_or(false);
    if already_loaded {
        schedule();
    } else if let Some(win) = dom::window() {
        dom::listen(win.as_ref(), "load", move |_| schedule());
    }
}

/// Escape dismisses the member popup, cookie banner and login modal
/// uniformly, wherever each happens to be open.
fn init_escape_dismiss() {
    let Some(doc) = dom::document() else { return };
    dom::listen(doc.as_ref(), "keydown", move |evt| {
        let Some(key) = evt.dyn_ref::<web_sys::KeyboardEvent>().map(|e| e.key()) else {
            return;
        };
        if key != "Escape" {
            return;
        }
        if let Some(popup) = dom::by_id("popup") {
            let _ = popup.class_list().remove_1("active");
        }
        if let Some(banner) = dom::by_id("cookie-popup") {
            hide(&banner);
        }
        if let Some(login) = dom::by_id("login-container") {
            hide(&login);
        }
    });
}

/// Demo stub for the subject cards; a dedicated page exists only in the
/// full product.
pub fn open_materie(materie: &str) {
    alert(&format!(
        "Ai selectat materia: {}!\nAceastă funcționalitate va deschide o pagină dedicată în versiunea completă.",
        materie.to_uppercase()
    ));
}
