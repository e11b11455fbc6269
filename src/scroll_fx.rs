//! Scroll-position-derived effects: progress bar, scroll-to-top button,
//! header hide/show, and the pointer-following logo parallax.
//!
//! One passive scroll listener performs the three scroll recomputations;
//! each is idempotent and reads the current offsets fresh. The parallax is
//! a perpetual rAF loop easing toward the last pointer position.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions};

use crate::capability::{self, Capabilities};
use crate::dom;

/// Scroll-to-top button appears past this offset.
pub const SCROLL_TOP_THRESHOLD: f64 = 300.0;

/// The header only hides after scrolling past this region.
pub const HEADER_MIN_SCROLL: f64 = 100.0;

/// Per-frame interpolation factor of the parallax follow.
pub const PARALLAX_EASE: f64 = 0.08;

/// Reading progress in percent, clamped to [0, 100]. A document with no
/// scroll range yields 0.
pub fn progress_percent(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let range = scroll_height - client_height;
    if range <= 0.0 {
        return 0.0;
    }
    (scroll_top / range * 100.0).clamp(0.0, 100.0)
}

/// Hidden while moving down past the top region; any upward delta shows it.
pub fn header_hidden(current: f64, last: f64) -> bool {
    current > last && current > HEADER_MIN_SCROLL
}

/// Scrolling jumps instead of animating under reduced motion or on
/// mobile viewports.
pub fn instant_scroll(reduced_motion: bool, mobile_viewport: bool) -> bool {
    reduced_motion || mobile_viewport
}

/// Bring the section with the given id into view. Called from the page's
/// navigation buttons, so the platform signals are read fresh rather than
/// from the init-time snapshot.
pub fn scroll_to_section(id: &str) {
    let Some(section) = dom::by_id(id) else { return };
    if instant_scroll(
        capability::prefers_reduced_motion(),
        capability::mobile_viewport(),
    ) {
        section.scroll_into_view();
    } else {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        section.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

#[derive(Default)]
struct Parallax {
    target_x: f64,
    target_y: f64,
    current_x: f64,
    current_y: f64,
}

thread_local! {
    static PARALLAX: RefCell<Parallax> = RefCell::new(Parallax::default());
}

pub fn init(caps: &Capabilities) {
    init_scroll_listener(caps);
    init_scroll_top_button(caps);
    if !caps.reduced_motion && !caps.touch {
        init_parallax();
    }
}

fn scroll_y() -> f64 {
    dom::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

fn init_scroll_listener(caps: &Capabilities) {
    let Some(win) = dom::window() else { return };

    let progress_bar = dom::by_id("progress-bar");
    let scroll_btn = dom::by_id("scrollTopBtn");
    let header = dom::query("header");
    // Header hide/show stays off on mobile/touch viewports; the header is
    // always visible there.
    let header_enabled = !caps.mobile_viewport && !caps.touch;
    let last_scroll = Cell::new(0.0_f64);

    dom::listen_passive(win.as_ref(), "scroll", move |_| {
        let current = scroll_y();

        if let Some(bar) = progress_bar.as_ref() {
            let (top, height, client) = dom::document()
                .and_then(|d| d.document_element())
                .map(|root| {
                    (
                        f64::from(root.scroll_top()),
                        f64::from(root.scroll_height()),
                        f64::from(root.client_height()),
                    )
                })
                .unwrap_or((0.0, 0.0, 0.0));
            let pct = progress_percent(top, height, client);
            dom::set_style(bar, "width", &format!("{pct}%"));
        }

        if let Some(btn) = scroll_btn.as_ref() {
            let display = if current > SCROLL_TOP_THRESHOLD { "block" } else { "none" };
            dom::set_style(btn, "display", display);
        }

        if header_enabled {
            if let Some(header) = header.as_ref() {
                let _ = if header_hidden(current, last_scroll.get()) {
                    header.class_list().add_1("hidden")
                } else {
                    header.class_list().remove_1("hidden")
                };
            }
        }
        last_scroll.set(current.max(0.0));
    });
}

fn init_scroll_top_button(caps: &Capabilities) {
    let Some(btn) = dom::by_id("scrollTopBtn") else {
        return;
    };
    let instant = instant_scroll(caps.reduced_motion, caps.mobile_viewport);
    dom::listen(btn.as_ref(), "click", move |_| {
        let Some(win) = dom::window() else { return };
        if instant {
            win.scroll_to_with_x_and_y(0.0, 0.0);
        } else {
            let opts = ScrollToOptions::new();
            opts.set_top(0.0);
            opts.set_behavior(ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&opts);
        }
    });
}

// --- Parallax ----------------------------------------------------------------

fn init_parallax() {
    let Some(logo) = dom::query(".logo-bg") else {
        return;
    };
    let Some(doc) = dom::document() else { return };

    dom::listen(doc.as_ref(), "mousemove", move |evt| {
        let Some(evt) = evt.dyn_ref::<web_sys::MouseEvent>() else {
            return;
        };
        let (width, height) = viewport_size();
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let x = (f64::from(evt.client_x()) / width - 0.5) * 100.0;
        let y = (f64::from(evt.client_y()) / height - 0.5) * 100.0;
        PARALLAX.with(|p| {
            let mut p = p.borrow_mut();
            p.target_x = x;
            p.target_y = y;
        });
    });

    start_parallax_loop(logo);
}

fn viewport_size() -> (f64, f64) {
    let win = dom::window();
    let width = win
        .as_ref()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = win
        .as_ref()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Perpetual self-rescheduling frame loop: eases the logo toward the last
/// pointer target, never snapping directly to it. Runs for the page's
/// entire lifetime once started.
fn start_parallax_loop(logo: Element) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let (x, y) = PARALLAX.with(|p| {
            let mut p = p.borrow_mut();
            p.current_x += (p.target_x - p.current_x) * PARALLAX_EASE;
            p.current_y += (p.target_y - p.current_y) * PARALLAX_EASE;
            (p.current_x, p.current_y)
        });
        dom::set_style(
            &logo,
            "transform",
            &format!("translate(calc(-50% + {x}px), calc(-50% + {y}px))"),
        );
        if let Some(w) = dom::window() {
            if let Some(cb) = f.borrow().as_ref() {
                let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = dom::window() {
        if let Some(cb) = g.borrow().as_ref() {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
