//! One-shot and repeating timer tasks.
//!
//! Both kinds own their callback closure and clear the underlying browser
//! timer on drop, so whoever holds the task decides its lifetime. A fired
//! one-shot must not be dropped from inside its own callback; owners defer
//! that cleanup to a later turn (see the particle pool's fired-id list).

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

/// A cancellable `setTimeout`. Cancels when dropped.
pub struct OneShot {
    handle: i32,
    _cb: Closure<dyn FnMut()>,
}

impl OneShot {
    /// Schedule `f` to run once after `ms` milliseconds. Returns `None`
    /// when no window is available (non-browser host).
    pub fn new(ms: i32, f: impl FnMut() + 'static) -> Option<Self> {
        let win = web_sys::window()?;
        let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let handle = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                ms,
            )
            .ok()?;
        Some(Self { handle, _cb: cb })
    }
}

impl Drop for OneShot {
    fn drop(&mut self) {
        if let Some(win) = web_sys::window() {
            win.clear_timeout_with_handle(self.handle);
        }
    }
}

/// A cancellable `setInterval`. Cancels when dropped.
pub struct Interval {
    handle: i32,
    _cb: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(ms: i32, f: impl FnMut() + 'static) -> Option<Self> {
        let win = web_sys::window()?;
        let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let handle = win
            .set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                ms,
            )
            .ok()?;
        Some(Self { handle, _cb: cb })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(win) = web_sys::window() {
            win.clear_interval_with_handle(self.handle);
        }
    }
}
