//! Hamburger menu controller with background scroll locking.
//!
//! Two states, closed (initial) and open. Opening marks the hamburger, nav
//! and overlay active and locks scrolling; closing inverts exactly the lock
//! that was applied and restores the recorded scroll offset. Without a
//! hamburger or nav element the controller never initializes.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom;

const ACTIVE: &str = "active";

/// Which lock was applied, so unlock can invert it precisely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollLock {
    /// `overflow: hidden` on the body (non-touch devices).
    Overflow,
    /// Body fixed and offset by the recorded scroll position, preventing
    /// rubber-banding on touch devices.
    FixedBody { top: f64 },
}

/// Pure open/closed state machine. Open iff a lock is held.
#[derive(Debug, Default)]
pub struct MenuFsm {
    lock: Option<ScrollLock>,
}

impl MenuFsm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.lock.is_some()
    }

    /// Transition closed -> open, choosing the lock strategy for the device.
    pub fn open(&mut self, touch: bool, scroll_y: f64) -> ScrollLock {
        let lock = if touch {
            ScrollLock::FixedBody { top: scroll_y }
        } else {
            ScrollLock::Overflow
        };
        self.lock = Some(lock);
        lock
    }

    /// Transition open -> closed, yielding the lock to undo. `None` when
    /// already closed.
    pub fn close(&mut self) -> Option<ScrollLock> {
        self.lock.take()
    }
}

struct MenuCtl {
    hamburger: Element,
    nav: Element,
    overlay: Option<Element>,
    fsm: MenuFsm,
    touch: bool,
}

thread_local! {
    static MENU: RefCell<Option<MenuCtl>> = const { RefCell::new(None) };
}

fn scroll_offset() -> f64 {
    dom::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

fn apply_lock(lock: ScrollLock) {
    let Some(body) = dom::body() else { return };
    let style = body.style();
    match lock {
        ScrollLock::Overflow => {
            let _ = style.set_property("overflow", "hidden");
        }
        ScrollLock::FixedBody { top } => {
            let _ = style.set_property("position", "fixed");
            let _ = style.set_property("top", &format!("-{top}px"));
            let _ = style.set_property("left", "0");
            let _ = style.set_property("right", "0");
            let _ = style.set_property("width", "100%");
        }
    }
}

fn release_lock(lock: ScrollLock) {
    let Some(body) = dom::body() else { return };
    let style = body.style();
    match lock {
        ScrollLock::Overflow => {
            let _ = style.remove_property("overflow");
        }
        ScrollLock::FixedBody { top } => {
            let _ = style.remove_property("position");
            let _ = style.remove_property("top");
            let _ = style.remove_property("left");
            let _ = style.remove_property("right");
            let _ = style.remove_property("width");
            if let Some(win) = dom::window() {
                win.scroll_to_with_x_and_y(0.0, top);
            }
        }
    }
}

fn set_markers(ctl: &MenuCtl, active: bool) {
    let targets = [Some(&ctl.hamburger), Some(&ctl.nav), ctl.overlay.as_ref()];
    for el in targets.into_iter().flatten() {
        let _ = if active {
            el.class_list().add_1(ACTIVE)
        } else {
            el.class_list().remove_1(ACTIVE)
        };
    }
}

fn toggle() {
    MENU.with(|cell| {
        if let Some(ctl) = cell.borrow_mut().as_mut() {
            if ctl.fsm.is_open() {
                if let Some(lock) = ctl.fsm.close() {
                    set_markers(ctl, false);
                    release_lock(lock);
                }
            } else {
                let lock = ctl.fsm.open(ctl.touch, scroll_offset());
                set_markers(ctl, true);
                apply_lock(lock);
            }
        }
    });
}

fn close() {
    MENU.with(|cell| {
        if let Some(ctl) = cell.borrow_mut().as_mut() {
            if let Some(lock) = ctl.fsm.close() {
                set_markers(ctl, false);
                release_lock(lock);
            }
        }
    });
}

/// Wire the menu. Missing hamburger or nav is a documented no-op.
pub fn init(touch: bool) {
    let Some(hamburger) = dom::by_id("hamburgerBtn") else {
        return;
    };
    let Some(nav) = dom::by_id("navMenu") else {
        return;
    };
    let overlay = dom::by_id("menuOverlay");

    dom::listen(hamburger.as_ref(), "click", move |_| toggle());

    if let Some(ov) = overlay.as_ref() {
        dom::listen(ov.as_ref(), "click", move |_| close());
    }
    for link in dom::query_all("nav a") {
        dom::listen(link.as_ref(), "click", move |_| close());
    }
    if let Some(doc) = dom::document() {
        dom::listen(doc.as_ref(), "keydown", move |evt| {
            if let Some(key) = evt.dyn_ref::<web_sys::KeyboardEvent>().map(|e| e.key()) {
                if key == "Escape" {
                    close();
                }
            }
        });
    }

    MENU.with(|cell| {
        cell.replace(Some(MenuCtl {
            hamburger,
            nav,
            overlay,
            fsm: MenuFsm::new(),
            touch,
        }));
    });
}
