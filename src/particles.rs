//! Decorative particle populations.
//!
//! Two independent populations share one sampling path: a fixed hero burst
//! of CSS-looping particles inside `.hero`, and a capped ambient pool in a
//! full-viewport overlay container. The ambient pool replenishes by pull:
//! a periodic check adds exactly one particle while the live count is
//! below target, so the population can never grow without bound. Every
//! ambient particle's removal is an owned one-shot task, cancelled with
//! the pool rather than left dangling.

use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::capability::{self, Capabilities};
use crate::dom;
use crate::task::{Interval, OneShot};

pub const HERO_COUNT: usize = 18;
pub const STAR_COUNT: usize = 4;
pub const AMBIENT_TARGET: usize = 36;
pub const REPLENISH_INTERVAL_MS: i32 = 3200;
pub const BURST_COUNT: usize = 5;
pub const BURST_STAGGER_MS: i32 = 100;
pub const RESIZE_SETTLE_MS: i32 = 500;

/// Exactly one particle is created per check while below target.
pub fn replenish(live: usize, target: usize) -> usize {
    usize::from(live < target)
}

// --- Randomness --------------------------------------------------------------

/// Small linear congruential generator, seedable for tests.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        ((self.0 >> 11) & 0xFFFF_FFFF) as f64 / 4_294_967_296.0
    }

    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

// --- Sampling ----------------------------------------------------------------

/// Inclusive-exclusive sampling ranges for one particle population.
pub struct ParticleRanges {
    pub size: (f64, f64),
    pub duration: (f64, f64),
    pub delay: (f64, f64),
    pub opacity: (f64, f64),
    pub max_drift: f64,
    pub start_bottom: &'static str,
}

pub const HERO_RANGES: ParticleRanges = ParticleRanges {
    size: (3.0, 6.5),
    duration: (10.0, 18.0),
    delay: (0.0, 4.5),
    opacity: (0.35, 0.75),
    max_drift: 140.0,
    start_bottom: "-6vh",
};

pub const STAR_RANGES: ParticleRanges = ParticleRanges {
    size: (4.0, 7.0),
    duration: (10.0, 14.0),
    delay: (0.0, 0.0),
    opacity: (0.5, 0.9),
    max_drift: 112.0,
    start_bottom: "-6vh",
};

pub const AMBIENT_RANGES: ParticleRanges = ParticleRanges {
    size: (3.5, 7.5),
    duration: (15.0, 24.0),
    delay: (0.0, 6.0),
    opacity: (0.32, 0.72),
    max_drift: 220.0,
    start_bottom: "-14vh",
};

/// One particle's randomized attributes, written as CSS custom properties
/// consumed by the stylesheet's float animation.
pub struct ParticleStyle {
    pub size: f64,
    pub duration: f64,
    pub delay: f64,
    pub opacity: f64,
    pub drift: f64,
    pub hue: f64,
    pub left_pct: f64,
    pub start_bottom: &'static str,
}

impl ParticleStyle {
    pub fn sample(rng: &mut Lcg, ranges: &ParticleRanges) -> Self {
        Self {
            size: rng.range(ranges.size.0, ranges.size.1),
            duration: rng.range(ranges.duration.0, ranges.duration.1),
            delay: rng.range(ranges.delay.0, ranges.delay.1),
            opacity: rng.range(ranges.opacity.0, ranges.opacity.1),
            drift: (rng.next_f64() - 0.5) * ranges.max_drift,
            hue: 250.0 + rng.next_f64() * 40.0,
            left_pct: rng.next_f64() * 100.0,
            start_bottom: ranges.start_bottom,
        }
    }

    fn apply(&self, el: &Element) {
        dom::set_style(el, "--size", &format!("{:.2}px", self.size));
        dom::set_style(el, "--duration", &format!("{:.2}s", self.duration));
        dom::set_style(el, "--delay", &format!("{:.2}s", self.delay));
        dom::set_style(el, "--opacity", &format!("{:.2}", self.opacity));
        dom::set_style(el, "--drift", &format!("{:.2}px", self.drift));
        dom::set_style(el, "--hue", &format!("{:.0}", self.hue));
        dom::set_style(el, "left", &format!("{:.2}%", self.left_pct));
        dom::set_style(el, "bottom", self.start_bottom);
    }
}

// --- Pool state --------------------------------------------------------------

struct Pool {
    rng: Lcg,
    next_id: u64,
    /// Pending removal/burst tasks, keyed so fired ones can be pruned.
    removal: HashMap<u64, OneShot>,
    /// Ids whose callback already ran; their tasks are dropped on the
    /// next replenish tick (never from inside their own callback).
    fired: Vec<u64>,
    was_mobile: bool,
    low_end: bool,
    /// Held only to keep the tasks alive; replaced to cancel.
    _resize_settle: Option<OneShot>,
    _replenish: Option<Interval>,
}

thread_local! {
    static POOL: RefCell<Option<Pool>> = const { RefCell::new(None) };
}

fn next_task_id() -> Option<u64> {
    POOL.with(|p| {
        p.borrow_mut().as_mut().map(|pool| {
            let id = pool.next_id;
            pool.next_id += 1;
            id
        })
    })
}

fn register_task(id: u64, task: OneShot) {
    POOL.with(|p| {
        if let Some(pool) = p.borrow_mut().as_mut() {
            pool.removal.insert(id, task);
        }
    });
}

fn mark_fired(id: u64) {
    POOL.with(|p| {
        if let Some(pool) = p.borrow_mut().as_mut() {
            pool.fired.push(id);
        }
    });
}

// --- Init --------------------------------------------------------------------

pub fn init(caps: &Capabilities) {
    // Reduced motion turns the whole subsystem off, resize monitoring
    // included.
    if caps.reduced_motion {
        return;
    }

    POOL.with(|p| {
        p.replace(Some(Pool {
            rng: Lcg::new(dom::now() as u64 | 1),
            next_id: 0,
            removal: HashMap::new(),
            fired: Vec::new(),
            was_mobile: caps.mobile_viewport,
            low_end: caps.low_end,
            _resize_settle: None,
            _replenish: None,
        }));
    });

    rebuild_hero(caps.mobile_viewport || caps.low_end);

    if !caps.mobile_viewport && !caps.low_end {
        if let Some(container) = ensure_container() {
            seed_ambient(&container);
            start_replenish(&container);
            if !caps.touch {
                wire_hover_bursts(&container);
            }
        }
    }

    wire_resize_reclassification();
}

// --- Hero burst --------------------------------------------------------------

/// Tear down and (unless hidden) regenerate the hero particle set. The
/// hero particles loop forever in CSS and carry no removal tasks.
fn rebuild_hero(hide: bool) {
    let Some(hero) = dom::query(".hero") else { return };
    if let Ok(list) = hero.query_selector_all(".particle") {
        for i in 0..list.length() {
            if let Some(node) = list.get(i) {
                if let Ok(el) = node.dyn_into::<Element>() {
                    el.remove();
                }
            }
        }
    }
    if hide {
        return;
    }
    let Some(doc) = dom::document() else { return };

    let mut styles: Vec<(ParticleStyle, bool)> = Vec::with_capacity(HERO_COUNT + STAR_COUNT);
    POOL.with(|p| {
        if let Some(pool) = p.borrow_mut().as_mut() {
            for _ in 0..HERO_COUNT {
                styles.push((ParticleStyle::sample(&mut pool.rng, &HERO_RANGES), false));
            }
            for i in 0..STAR_COUNT {
                let mut style = ParticleStyle::sample(&mut pool.rng, &STAR_RANGES);
                // Stars fade in staggered rather than randomly.
                style.delay = i as f64 * 2.0;
                styles.push((style, true));
            }
        }
    });

    for (style, is_star) in styles {
        let Ok(el) = doc.create_element("div") else {
            continue;
        };
        el.set_class_name(if is_star { "particle star-particle" } else { "particle" });
        style.apply(&el);
        let _ = hero.append_child(&el);
    }
}

// --- Ambient pool ------------------------------------------------------------

/// Create the overlay container once; a second call finds the existing
/// element and reuses it.
fn ensure_container() -> Option<Element> {
    if let Some(existing) = dom::by_id("particle-container") {
        return Some(existing);
    }
    let doc = dom::document()?;
    let body = dom::body()?;
    let container = doc.create_element("div").ok()?;
    container.set_id("particle-container");
    container
        .set_attribute(
            "style",
            "position:fixed; top:0; left:0; width:100%; height:100%; \
             pointer-events:none; z-index:1; overflow:hidden;",
        )
        .ok()?;
    body.insert_before(&container, body.first_child().as_ref()).ok()?;
    Some(container)
}

fn live_particles(container: &Element) -> usize {
    container
        .query_selector_all(".particle")
        .map(|list| list.length() as usize)
        .unwrap_or(0)
}

/// Fill up to target. Counting live elements rather than looping a fixed
/// number keeps a repeated init from overfilling an existing container.
fn seed_ambient(container: &Element) {
    while replenish(live_particles(container), AMBIENT_TARGET) == 1 {
        if !spawn_ambient(container) {
            break;
        }
    }
}

/// Create one ambient particle and schedule its own removal after the
/// animation has fully played out. Returns false when nothing was added.
fn spawn_ambient(container: &Element) -> bool {
    let Some(doc) = dom::document() else {
        return false;
    };
    let style = POOL.with(|p| {
        p.borrow_mut()
            .as_mut()
            .map(|pool| ParticleStyle::sample(&mut pool.rng, &AMBIENT_RANGES))
    });
    let Some(style) = style else { return false };
    let Some(el) = make_particle(&doc, &style) else {
        return false;
    };
    if container.append_child(&el).is_err() {
        return false;
    }

    let Some(id) = next_task_id() else { return true };
    let lifetime_ms = ((style.duration + style.delay) * 1000.0) as i32;
    let task = OneShot::new(lifetime_ms, move || {
        // The container may already be gone; removal is then a no-op.
        el.remove();
        mark_fired(id);
    });
    if let Some(task) = task {
        register_task(id, task);
    }
    true
}

fn make_particle(doc: &Document, style: &ParticleStyle) -> Option<Element> {
    let el = doc.create_element("div").ok()?;
    el.set_class_name("particle");
    style.apply(&el);
    Some(el)
}

fn start_replenish(container: &Element) {
    let container = container.clone();
    let timer = Interval::new(REPLENISH_INTERVAL_MS, move || {
        // Drop tasks whose callbacks already ran; none of them is
        // executing during this tick.
        POOL.with(|p| {
            if let Some(pool) = p.borrow_mut().as_mut() {
                let fired: Vec<u64> = pool.fired.drain(..).collect();
                for id in fired {
                    pool.removal.remove(&id);
                }
            }
        });
        if replenish(live_particles(&container), AMBIENT_TARGET) == 1 {
            spawn_ambient(&container);
        }
    });
    POOL.with(|p| {
        if let Some(pool) = p.borrow_mut().as_mut() {
            pool._replenish = timer;
        }
    });
}

/// Hovering a content section sprays a small staggered burst into the
/// ambient container; the particles join the normal replenishment
/// accounting.
fn wire_hover_bursts(container: &Element) {
    for section in dom::query_all(".content, .hero") {
        let container = container.clone();
        dom::listen(section.as_ref(), "mouseenter", move |_| {
            for i in 0..BURST_COUNT {
                let Some(id) = next_task_id() else { break };
                let target = container.clone();
                let task = OneShot::new(i as i32 * BURST_STAGGER_MS, move || {
                    spawn_ambient(&target);
                    mark_fired(id);
                });
                if let Some(task) = task {
                    register_task(id, task);
                }
            }
        });
    }
}

// --- Resize reclassification -------------------------------------------------

/// After a 500 ms settle, regenerate the hero set only when the
/// mobile/desktop classification actually flipped.
fn wire_resize_reclassification() {
    let Some(win) = dom::window() else { return };
    dom::listen(win.as_ref(), "resize", move |_| {
        let settle = OneShot::new(RESIZE_SETTLE_MS, || {
            let now_mobile = capability::mobile_viewport();
            let flip = POOL.with(|p| {
                p.borrow_mut().as_mut().and_then(|pool| {
                    if pool.was_mobile != now_mobile {
                        pool.was_mobile = now_mobile;
                        Some(now_mobile || pool.low_end)
                    } else {
                        None
                    }
                })
            });
            if let Some(hide) = flip {
                rebuild_hero(hide);
            }
        });
        // Replacing the pending settle task cancels it: classic debounce.
        POOL.with(|p| {
            if let Some(pool) = p.borrow_mut().as_mut() {
                pool._resize_settle = settle;
            }
        });
    });
}
