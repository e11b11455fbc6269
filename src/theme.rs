//! Light/dark theme toggle persisted in `localStorage`.

use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::dom;

/// Key used to persist the theme preference in `localStorage`.
const STORAGE_KEY: &str = "theme";

/// Body class carried while the light theme is active.
const LIGHT_CLASS: &str = "light";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Absent or unrecognized stored values mean dark (the default).
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn from_checked(checked: bool) -> Self {
        if checked { Theme::Light } else { Theme::Dark }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

fn stored_theme() -> Theme {
    let value = dom::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    Theme::from_stored(value.as_deref())
}

fn save_theme(theme: Theme) {
    if let Some(storage) = dom::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(STORAGE_KEY, theme.as_str());
    }
}

/// The body class and the stored value stay consistent after every apply.
fn apply_theme(theme: Theme) {
    if let Some(body) = dom::body() {
        let list = body.class_list();
        let _ = match theme {
            Theme::Light => list.add_1(LIGHT_CLASS),
            Theme::Dark => list.remove_1(LIGHT_CLASS),
        };
    }
}

/// Wire the `.input__check` switch. No switch in the document means the
/// theme stays at whatever the stylesheet defaults to.
pub fn init() {
    let Some(input) = dom::query(".input__check").and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };

    let saved = stored_theme();
    apply_theme(saved);
    input.set_checked(saved == Theme::Light);

    let switch = input.clone();
    dom::listen(input.as_ref(), "change", move |_| {
        let theme = Theme::from_checked(switch.checked());
        apply_theme(theme);
        save_theme(theme);
    });
}
