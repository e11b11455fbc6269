//! Nexus site interactivity crate.
//!
//! Client-side behavior for the Nexus marketing pages, compiled to WASM:
//! theme switching, the mobile hamburger menu, member popups, scroll
//! effects, decorative particles, stat counters and the demo modals. Each
//! controller initializes independently against the document; a missing
//! element simply leaves that feature inactive.

use wasm_bindgen::prelude::*;

mod capability;
mod counters;
mod dom;
mod members;
mod menu;
mod modals;
mod particles;
mod reveal;
mod scroll_fx;
mod task;
mod theme;

pub use capability::{Capabilities, low_end_from_signals};
pub use counters::{SPEED as COUNTER_SPEED, counter_step};
pub use members::{SingleOpen, TAP_MAX_MS};
pub use menu::{MenuFsm, ScrollLock};
pub use particles::{
    AMBIENT_RANGES, AMBIENT_TARGET, HERO_RANGES, Lcg, ParticleRanges, ParticleStyle, STAR_RANGES,
    replenish,
};
pub use scroll_fx::{
    HEADER_MIN_SCROLL, SCROLL_TOP_THRESHOLD, header_hidden, instant_scroll, progress_percent,
};
pub use theme::Theme;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Wire every controller. Safe to call from the page script as soon as the
/// module loads; initialization is deferred until the DOM is parsed.
#[wasm_bindgen]
pub fn init_site() -> Result<(), JsValue> {
    let doc = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
    if doc.ready_state() == "loading" {
        dom::listen(doc.as_ref(), "DOMContentLoaded", |_| {
            init_controllers();
        });
    } else {
        init_controllers();
    }
    Ok(())
}

fn init_controllers() {
    // One capability snapshot feeds every controller; none re-queries the
    // platform inline (the particle pool re-evaluates the viewport itself
    // on debounced resizes).
    let caps = Capabilities::detect();
    theme::init();
    menu::init(caps.touch);
    members::init(&caps);
    scroll_fx::init(&caps);
    particles::init(&caps);
    counters::init();
    reveal::init();
    modals::init();
}

/// Demo handler invoked from the subject cards' `onclick`.
#[wasm_bindgen]
pub fn open_materie(materie: &str) {
    modals::open_materie(materie);
}

/// Smooth-scrolls the section with the given id into view; invoked from
/// the page's navigation buttons.
#[wasm_bindgen]
pub fn scroll_to_section(id: &str) {
    scroll_fx::scroll_to_section(id);
}
