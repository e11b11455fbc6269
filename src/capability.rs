//! Device / viewport / preference detection.
//!
//! Each query reads the platform signals fresh and returns a boolean; any
//! unavailable signal fails open to the least restrictive answer. The
//! controllers consume an immutable [`Capabilities`] snapshot taken at
//! their own init time instead of re-querying inline.

use wasm_bindgen::JsValue;

use crate::dom;

/// Viewport width at or below this counts as a mobile viewport.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Effective connection types treated as slow.
const SLOW_CONNECTIONS: [&str; 3] = ["slow-2g", "2g", "3g"];

/// Snapshot of the platform traits every controller gates on.
#[derive(Clone, Copy, Debug, Default)]
pub struct Capabilities {
    pub reduced_motion: bool,
    pub mobile_viewport: bool,
    pub touch: bool,
    pub low_end: bool,
}

impl Capabilities {
    pub fn detect() -> Self {
        Self {
            reduced_motion: prefers_reduced_motion(),
            mobile_viewport: mobile_viewport(),
            touch: touch(),
            low_end: low_end(),
        }
    }
}

fn media_matches(query: &str) -> bool {
    dom::window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|m| m.matches())
        .unwrap_or(false)
}

pub fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

pub fn mobile_viewport() -> bool {
    dom::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w <= MOBILE_BREAKPOINT)
        .unwrap_or(false)
}

/// Coarse pointer without hover; falls back to touch-point detection on
/// platforms without interaction media queries.
pub fn touch() -> bool {
    if media_matches("(pointer: coarse) and (hover: none)") {
        return true;
    }
    dom::window()
        .map(|w| w.navigator().max_touch_points() > 0)
        .unwrap_or(false)
}

/// Reads `navigator.connection.effectiveType` and `navigator.deviceMemory`
/// via `Reflect` since both are unstable surface in `web_sys`.
pub fn low_end() -> bool {
    let Some(win) = dom::window() else {
        return false;
    };
    let navigator = win.navigator();

    let effective_type = js_sys::Reflect::get(navigator.as_ref(), &JsValue::from_str("connection"))
        .ok()
        .filter(|c| !c.is_undefined() && !c.is_null())
        .and_then(|c| js_sys::Reflect::get(&c, &JsValue::from_str("effectiveType")).ok())
        .and_then(|t| t.as_string());

    let memory_gb = js_sys::Reflect::get(navigator.as_ref(), &JsValue::from_str("deviceMemory"))
        .ok()
        .and_then(|m| m.as_f64());

    let cores = match navigator.hardware_concurrency() {
        c if c > 0.0 => Some(c),
        _ => None,
    };

    low_end_from_signals(effective_type.as_deref(), memory_gb, cores)
}

/// Classification rule, separated from the platform reads: ANY signal
/// reporting low-end wins, a missing signal counts as not low-end.
pub fn low_end_from_signals(
    effective_type: Option<&str>,
    memory_gb: Option<f64>,
    cores: Option<f64>,
) -> bool {
    let slow = effective_type
        .map(|t| SLOW_CONNECTIONS.contains(&t))
        .unwrap_or(false);
    let low_memory = memory_gb.map(|m| m < 4.0).unwrap_or(false);
    let few_cores = cores.map(|c| c < 4.0).unwrap_or(false);
    slow || low_memory || few_cores
}
