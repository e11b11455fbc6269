// Additional integration tests for particle pool invariants.
// These tests are native-friendly and avoid wasm/browser APIs.

use nexus_site::{
    AMBIENT_RANGES, AMBIENT_TARGET, HERO_RANGES, Lcg, ParticleRanges, ParticleStyle, STAR_RANGES,
    replenish,
};

#[test]
fn replenishment_adds_exactly_one_below_target() {
    assert_eq!(replenish(0, AMBIENT_TARGET), 1);
    assert_eq!(replenish(AMBIENT_TARGET - 1, AMBIENT_TARGET), 1);
}

#[test]
fn replenishment_is_idempotent_at_saturation() {
    // Repeated checks at or above target never add particles.
    for live in [AMBIENT_TARGET, AMBIENT_TARGET + 1, AMBIENT_TARGET * 3] {
        for _ in 0..5 {
            assert_eq!(replenish(live, AMBIENT_TARGET), 0);
        }
    }
}

#[test]
fn pull_based_refill_converges_to_target_and_stays_there() {
    let mut live = 4;
    for _ in 0..200 {
        live += replenish(live, AMBIENT_TARGET);
        assert!(live <= AMBIENT_TARGET, "population must never exceed target");
    }
    assert_eq!(live, AMBIENT_TARGET);
}

#[test]
fn lcg_is_deterministic_per_seed() {
    let mut a = Lcg::new(42);
    let mut b = Lcg::new(42);
    for _ in 0..32 {
        assert_eq!(a.next_f64(), b.next_f64());
    }
    let mut c = Lcg::new(43);
    assert_ne!(
        Lcg::new(42).next_f64(),
        c.next_f64(),
        "different seeds should diverge"
    );
}

#[test]
fn lcg_output_stays_in_unit_interval() {
    let mut rng = Lcg::new(7);
    for _ in 0..10_000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v), "sample {v} outside [0, 1)");
    }
}

fn assert_within(ranges: &ParticleRanges, seed: u64) {
    let mut rng = Lcg::new(seed);
    for _ in 0..500 {
        let s = ParticleStyle::sample(&mut rng, ranges);
        assert!(s.size >= ranges.size.0 && s.size <= ranges.size.1);
        assert!(s.duration >= ranges.duration.0 && s.duration <= ranges.duration.1);
        assert!(s.delay >= ranges.delay.0 && s.delay <= ranges.delay.1);
        assert!(s.opacity >= ranges.opacity.0 && s.opacity <= ranges.opacity.1);
        assert!(s.drift.abs() <= ranges.max_drift / 2.0 + 1e-9);
        assert!((250.0..=290.0).contains(&s.hue));
        assert!((0.0..=100.0).contains(&s.left_pct));
        assert_eq!(s.start_bottom, ranges.start_bottom);
    }
}

#[test]
fn sampled_styles_respect_their_configured_ranges() {
    assert_within(&HERO_RANGES, 1);
    assert_within(&STAR_RANGES, 2);
    assert_within(&AMBIENT_RANGES, 3);
}

#[test]
fn particle_lifetime_covers_delay_plus_duration() {
    // The removal timer fires only after the whole animation has played.
    let mut rng = Lcg::new(11);
    for _ in 0..100 {
        let s = ParticleStyle::sample(&mut rng, &AMBIENT_RANGES);
        let lifetime_ms = ((s.duration + s.delay) * 1000.0) as i64;
        assert!(lifetime_ms >= (AMBIENT_RANGES.duration.0 * 1000.0) as i64);
    }
}
