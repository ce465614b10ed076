use starfield_core::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(99)
}

#[test]
fn confetti_pieces_cycle_the_palette_and_stay_in_range() {
    let mut rng = rng();
    for index in 0..CONFETTI_PIECE_COUNT {
        let piece = confetti_piece(index, &mut rng);
        assert_eq!(piece.color, CONFETTI_COLORS[index % CONFETTI_COLORS.len()]);
        assert!((0.0..100.0).contains(&piece.left_pct));
        assert!((6.0..14.0).contains(&piece.width_px));
        assert!((10.0..24.0).contains(&piece.height_px));
        assert!((0.0..0.25).contains(&piece.delay_s));
        assert!((1.2..2.0).contains(&piece.duration_s));
        assert!((-360.0..360.0).contains(&piece.rotation_deg));
        assert!((-60.0..60.0).contains(&piece.drift_px));
    }
}

#[test]
fn confetti_palette_wraps_after_seven() {
    let mut rng = rng();
    let first = confetti_piece(0, &mut rng);
    let eighth = confetti_piece(7, &mut rng);
    assert_eq!(first.color, eighth.color);
}

#[test]
fn rain_drops_use_known_glyphs_and_ranges() {
    let mut rng = rng();
    for _ in 0..100 {
        let drop = rain_drop(&mut rng);
        assert!(RAIN_GLYPHS.contains(&drop.glyph), "unknown glyph {:?}", drop.glyph);
        assert!((0.0..100.0).contains(&drop.left_pct));
        assert!((0.85..1.6).contains(&drop.font_size_rem));
        assert!((3.5..6.0).contains(&drop.duration_s));
        assert!((0.0..0.5).contains(&drop.delay_s));
        assert!((-30.0..30.0).contains(&drop.drift_px));
    }
}

#[test]
fn key_clicks_randomize_within_their_bands() {
    let mut rng = rng();
    for _ in 0..100 {
        let click = key_click(&mut rng);
        assert!((240.0..460.0).contains(&click.frequency_hz));
        assert!((-30.0..30.0).contains(&click.detune_cents));
        assert!((420.0..700.0).contains(&click.cutoff_hz));
        assert!((0.08..0.11).contains(&click.decay_s));
    }
}

#[test]
fn key_filter_accepts_characters_and_edit_keys_only() {
    assert!(key_click_allowed("a", false, false, false, false));
    assert!(key_click_allowed("Z", false, false, false, false));
    assert!(key_click_allowed(" ", false, false, false, false));
    assert!(key_click_allowed("Backspace", false, false, false, false));
    assert!(key_click_allowed("Enter", false, false, false, false));
    assert!(key_click_allowed("Tab", false, false, false, false));

    assert!(!key_click_allowed("Shift", false, false, false, false));
    assert!(!key_click_allowed("ArrowLeft", false, false, false, false));
    assert!(!key_click_allowed("a", true, false, false, false), "repeat blocked");
    assert!(!key_click_allowed("a", false, true, false, false), "meta blocked");
    assert!(!key_click_allowed("a", false, false, true, false), "ctrl blocked");
    assert!(!key_click_allowed("a", false, false, false, true), "alt blocked");
}

#[test]
fn key_gate_enforces_the_minimum_interval() {
    let mut gate = KeyGate::default();
    assert!(gate.try_pass(0.0), "the very first keystroke always passes");
    assert!(!gate.try_pass(34.9));
    assert!(gate.try_pass(35.0));
    assert!(!gate.try_pass(69.9));
    assert!(gate.try_pass(70.1));
}

#[test]
fn gravity_fall_measures_to_the_floor_margin() {
    let mut rng = rng();
    let fall = gravity_fall(800.0, 500.0, &mut rng);
    assert_eq!(fall.distance_px, 284.0); // 800 - 500 - 16
    assert!((-4.0..4.0).contains(&fall.tilt_deg));

    // An element already below the floor does not rise.
    let fall = gravity_fall(800.0, 795.0, &mut rng);
    assert_eq!(fall.distance_px, 0.0);
}

#[test]
fn snapshot_store_captures_once_per_key() {
    let mut store: SnapshotStore<u32> = SnapshotStore::new();
    let first = InlineSnapshot {
        transform: "rotate(3deg)".into(),
        transition: String::new(),
    };
    assert!(store.capture(7, first.clone()));
    assert!(
        !store.capture(7, InlineSnapshot::default()),
        "a second capture for the same key must not overwrite"
    );
    assert!(store.contains(&7));
    assert_eq!(store.len(), 1);

    store.capture(8, InlineSnapshot::default());
    let drained = store.drain();
    assert_eq!(drained.len(), 2);
    assert_eq!(drained[0], (7, first), "drain preserves capture order");
    assert!(store.is_empty());
    assert!(store.drain().is_empty(), "draining twice is harmless");
}

#[test]
fn default_snapshot_restores_to_blank_styles() {
    let snapshot = InlineSnapshot::default();
    assert_eq!(snapshot.transform, "");
    assert_eq!(snapshot.transition, "");
}
