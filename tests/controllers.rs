// Integration tests (native) for the `nexus-site` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

use nexus_site::{
    MenuFsm, ScrollLock, SingleOpen, Theme, counter_step, header_hidden, instant_scroll,
    low_end_from_signals, progress_percent,
};

// --- Scroll progress ---------------------------------------------------------

#[test]
fn progress_is_clamped_to_percent_range() {
    assert_eq!(progress_percent(0.0, 2000.0, 800.0), 0.0);
    assert_eq!(progress_percent(600.0, 2000.0, 800.0), 50.0);
    assert_eq!(progress_percent(1200.0, 2000.0, 800.0), 100.0);
    // Overscroll (rubber-banding) must not exceed 100.
    assert_eq!(progress_percent(1500.0, 2000.0, 800.0), 100.0);
    assert_eq!(progress_percent(-50.0, 2000.0, 800.0), 0.0);
}

#[test]
fn progress_is_zero_without_scroll_range() {
    assert_eq!(progress_percent(0.0, 800.0, 800.0), 0.0);
    assert_eq!(progress_percent(100.0, 600.0, 800.0), 0.0);
    assert_eq!(progress_percent(0.0, 0.0, 0.0), 0.0);
}

// --- Header hide/show --------------------------------------------------------

#[test]
fn header_hides_only_when_scrolling_down_past_top_region() {
    // Moving down but still near the top: stays visible.
    assert!(!header_hidden(80.0, 40.0));
    // Moving down past the region: hides.
    assert!(header_hidden(150.0, 120.0));
    // Any upward delta shows it again, regardless of position.
    assert!(!header_hidden(500.0, 600.0));
    assert!(!header_hidden(150.0, 150.0));
}

#[test]
fn section_scroll_animates_unless_reduced_motion_or_mobile() {
    // Shared gating for the scroll-top button and section navigation.
    assert!(!instant_scroll(false, false));
    assert!(instant_scroll(true, false));
    assert!(instant_scroll(false, true));
    assert!(instant_scroll(true, true));
}

// --- Mobile menu state machine -----------------------------------------------

#[test]
fn menu_toggle_parity_matches_open_close_count() {
    let mut fsm = MenuFsm::new();
    assert!(!fsm.is_open());
    for i in 0..7 {
        if fsm.is_open() {
            fsm.close();
        } else {
            fsm.open(false, 0.0);
        }
        assert_eq!(fsm.is_open(), i % 2 == 0, "after {} toggles", i + 1);
    }
}

#[test]
fn touch_lock_round_trips_the_recorded_scroll_offset() {
    let mut fsm = MenuFsm::new();
    let lock = fsm.open(true, 842.0);
    assert_eq!(lock, ScrollLock::FixedBody { top: 842.0 });
    assert_eq!(fsm.close(), Some(ScrollLock::FixedBody { top: 842.0 }));
    assert!(!fsm.is_open());
}

#[test]
fn non_touch_lock_uses_overflow_strategy() {
    let mut fsm = MenuFsm::new();
    assert_eq!(fsm.open(false, 842.0), ScrollLock::Overflow);
    assert_eq!(fsm.close(), Some(ScrollLock::Overflow));
    // Closing an already-closed menu yields nothing to undo.
    assert_eq!(fsm.close(), None);
}

// --- Member popup exclusivity ------------------------------------------------

#[test]
fn at_most_one_member_popup_is_open() {
    let mut popups = SingleOpen::new();
    assert_eq!(popups.open_count(), 0);

    assert!(popups.tap(0));
    assert_eq!(popups.open_index(), Some(0));
    assert_eq!(popups.open_count(), 1);

    // Opening B while A is open: A closed, B open, never both.
    assert!(popups.tap(3));
    assert_eq!(popups.open_index(), Some(3));
    assert_eq!(popups.open_count(), 1);

    // Tapping the open member toggles it closed.
    assert!(!popups.tap(3));
    assert_eq!(popups.open_count(), 0);
}

#[test]
fn close_all_clears_any_open_popup() {
    let mut popups = SingleOpen::new();
    popups.tap(5);
    popups.close_all();
    assert_eq!(popups.open_index(), None);
}

// --- Theme -------------------------------------------------------------------

#[test]
fn theme_round_trips_through_stored_value() {
    for theme in [Theme::Light, Theme::Dark] {
        assert_eq!(Theme::from_stored(Some(theme.as_str())), theme);
    }
}

#[test]
fn absent_or_garbage_stored_theme_defaults_to_dark() {
    assert_eq!(Theme::from_stored(None), Theme::Dark);
    assert_eq!(Theme::from_stored(Some("solarized")), Theme::Dark);
}

#[test]
fn toggling_twice_returns_to_the_original_theme() {
    for theme in [Theme::Light, Theme::Dark] {
        assert_eq!(theme.toggled().toggled(), theme);
        assert_ne!(theme.toggled(), theme);
    }
}

// --- Low-end classification ----------------------------------------------------

#[test]
fn any_low_end_signal_wins() {
    assert!(low_end_from_signals(Some("2g"), None, None));
    assert!(low_end_from_signals(Some("slow-2g"), Some(8.0), Some(8.0)));
    assert!(low_end_from_signals(Some("3g"), None, None));
    assert!(low_end_from_signals(None, Some(2.0), None));
    assert!(low_end_from_signals(None, None, Some(2.0)));
}

#[test]
fn missing_signals_fail_open_to_not_low_end() {
    assert!(!low_end_from_signals(None, None, None));
    assert!(!low_end_from_signals(Some("4g"), Some(8.0), Some(8.0)));
    assert!(!low_end_from_signals(Some("4g"), None, None));
}

// --- Counter animation ---------------------------------------------------------

#[test]
fn counter_sequence_is_strictly_increasing_and_ends_at_target() {
    let target = 150.0;
    let increment = target / nexus_site::COUNTER_SPEED;
    let mut count = 0.0;
    let mut steps = 0;
    while count < target {
        let next = counter_step(count, target, increment);
        assert!(next > count, "sequence must be strictly increasing");
        assert!(next <= target, "sequence must never overshoot the target");
        assert_eq!(next, next.trunc(), "displayed values are integers");
        count = next;
        steps += 1;
        assert!(steps <= 10_000, "sequence must terminate");
    }
    assert_eq!(count, target);
    // The final frame renders the literal "<target>+".
    assert_eq!(format!("{target}+"), "150+");
}

#[test]
fn small_targets_still_advance_by_whole_numbers() {
    // increment below 1 is rounded up, so the count still moves.
    assert_eq!(counter_step(0.0, 10.0, 0.05), 1.0);
    assert_eq!(counter_step(9.0, 10.0, 0.05), 10.0);
}
