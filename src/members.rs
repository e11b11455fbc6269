//! Member profile popups.
//!
//! One of two display strategies is chosen at init time. Non-touch devices
//! (or any document that ships the shared `#popup` panel) use the shared
//! panel: a member click copies its data attributes into the panel fields.
//! Touch devices without the panel get per-member inline popups toggled by
//! tap, with a transparent overlay catching outside taps. Either way at
//! most one member is open at any time.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::capability::Capabilities;
use crate::dom;

const OPEN: &str = "open";
const ACTIVE: &str = "active";

/// A tap counts only when the finger neither moved nor lingered past this.
pub const TAP_MAX_MS: f64 = 200.0;

/// Exclusivity model for inline popups: tap toggles, opening one closes
/// the rest. Kept free of DOM types so the invariant is testable.
#[derive(Debug, Default)]
pub struct SingleOpen {
    open: Option<usize>,
}

impl SingleOpen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the tapped member is open afterwards.
    pub fn tap(&mut self, index: usize) -> bool {
        if self.open == Some(index) {
            self.open = None;
            false
        } else {
            self.open = Some(index);
            true
        }
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn open_count(&self) -> usize {
        usize::from(self.open.is_some())
    }
}

struct InlineCtl {
    members: Vec<Element>,
    overlay: Element,
    model: SingleOpen,
}

thread_local! {
    static INLINE: RefCell<Option<InlineCtl>> = const { RefCell::new(None) };
}

pub fn init(caps: &Capabilities) {
    let members = dom::query_all(".membru");
    if members.is_empty() {
        return;
    }
    let shared_panel = dom::by_id("popup");

    if shared_panel.is_some() || !caps.touch {
        init_shared_panel(members, shared_panel);
    } else {
        init_inline(members);
    }
}

// --- Shared-panel mode -------------------------------------------------------

fn init_shared_panel(members: Vec<Element>, panel: Option<Element>) {
    let Some(panel) = panel else { return };

    for member in members {
        let panel = panel.clone();
        let source = member.clone();
        dom::listen(member.as_ref(), "click", move |_| {
            fill_panel(&source);
            let _ = panel.class_list().add_1(ACTIVE);
        });
    }

    if let Some(close_btn) = dom::query(".close") {
        let panel = panel.clone();
        dom::listen(close_btn.as_ref(), "click", move |_| {
            let _ = panel.class_list().remove_1(ACTIVE);
        });
    }

    // Backdrop click: the panel element itself is the dimmed backdrop.
    // Escape dismissal belongs to the unified document handler.
    let backdrop = panel.clone();
    dom::listen(panel.as_ref(), "click", move |evt| {
        if dom::event_target_is(&evt, &backdrop) {
            let _ = backdrop.class_list().remove_1(ACTIVE);
        }
    });
}

fn fill_panel(member: &Element) {
    let data = dom::html(member).map(|h| h.dataset());
    let field = |id: &str, key: &str| {
        if let Some(el) = dom::by_id(id) {
            let value = data.as_ref().and_then(|d| d.get(key)).unwrap_or_default();
            el.set_text_content(Some(&value));
        }
    };
    field("popup-nume", "nume");
    field("popup-rol", "rol");
    field("popup-descriere", "descriere");
}

// --- Inline (touch) mode -----------------------------------------------------

fn init_inline(members: Vec<Element>) {
    let Some(doc) = dom::document() else { return };
    let Some(body) = dom::body() else { return };

    // Full-screen transparent tap catcher, shown only while a popup is open.
    let Ok(overlay) = doc.create_element("div") else {
        return;
    };
    overlay.set_id("membru-overlay");
    let _ = overlay.set_attribute(
        "style",
        "position:fixed; inset:0; background:transparent; z-index:5; display:none;",
    );
    if body.append_child(&overlay).is_err() {
        return;
    }

    for (index, member) in members.iter().enumerate() {
        wire_tap(member, index);
    }

    dom::listen(overlay.as_ref(), "click", move |_| close_inline());
    dom::listen(doc.as_ref(), "keydown", move |evt| {
        if let Some(key) = evt.dyn_ref::<web_sys::KeyboardEvent>().map(|e| e.key()) {
            if key == "Escape" {
                close_inline();
            }
        }
    });

    INLINE.with(|cell| {
        cell.replace(Some(InlineCtl {
            members,
            overlay,
            model: SingleOpen::new(),
        }));
    });
}

/// Distinguishes taps from scroll gestures: any touchmove, or a press
/// longer than [`TAP_MAX_MS`], discards the candidate tap.
fn wire_tap(member: &Element, index: usize) {
    let start = std::rc::Rc::new(std::cell::Cell::new(None::<f64>));

    let s = start.clone();
    dom::listen(member.as_ref(), "touchstart", move |_| {
        s.set(Some(dom::now()));
    });

    let s = start.clone();
    dom::listen(member.as_ref(), "touchmove", move |_| {
        s.set(None);
    });

    dom::listen(member.as_ref(), "touchend", move |_| {
        if let Some(began) = start.take() {
            if dom::now() - began <= TAP_MAX_MS {
                tap_inline(index);
            }
        }
    });
}

fn tap_inline(index: usize) {
    INLINE.with(|cell| {
        if let Some(ctl) = cell.borrow_mut().as_mut() {
            let opened = ctl.model.tap(index);
            for m in &ctl.members {
                let _ = m.class_list().remove_1(OPEN);
            }
            if opened {
                if let Some(m) = ctl.members.get(index) {
                    let _ = m.class_list().add_1(OPEN);
                }
            }
            dom::set_style(&ctl.overlay, "display", if opened { "block" } else { "none" });
        }
    });
}

fn close_inline() {
    INLINE.with(|cell| {
        if let Some(ctl) = cell.borrow_mut().as_mut() {
            ctl.model.close_all();
            for m in &ctl.members {
                let _ = m.class_list().remove_1(OPEN);
            }
            dom::set_style(&ctl.overlay, "display", "none");
        }
    });
}
