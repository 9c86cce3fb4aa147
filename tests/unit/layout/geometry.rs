use super::*;
use crate::config::model::{AnchorPreset, Pivot, StarsConfig};
use crate::config::presets::preset_for_category;
use crate::card::model::CardCategory;

fn rect(anchor: AnchorPreset, pivot: (f64, f64), x: f64, y: f64, w: f64, h: f64) -> RectTransform {
    RectTransform {
        anchor,
        pivot: Pivot::new(pivot.0, pivot.1),
        x,
        y,
        w,
        h,
        z_index: 0,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn grid_anchors_place_top_left_at_anchor_point() {
    for preset in AnchorPreset::GRID {
        let r = resolve_rect(&rect(preset, (0.0, 0.0), 0.0, 0.0, 0.1, 0.1), 1000.0, 1000.0);
        let (ax, ay) = preset.unit();
        assert!(approx(r.x, ax * 1000.0), "{preset:?}");
        assert!(approx(r.y, ay * 1000.0), "{preset:?}");
        assert!(approx(r.w, 100.0));
        assert!(approx(r.h, 100.0));
    }
    let br = resolve_rect(
        &rect(AnchorPreset::BottomRight, (0.0, 0.0), 0.0, 0.0, 0.1, 0.1),
        1000.0,
        1000.0,
    );
    assert_eq!((br.x, br.y), (1000.0, 1000.0));
}

#[test]
fn centered_pivot_puts_center_on_anchor() {
    let r = resolve_rect(
        &rect(AnchorPreset::Center, (0.5, 0.5), 0.0, 0.0, 0.2, 0.4),
        400.0,
        600.0,
    );
    let c = r.center();
    assert!(approx(c.x, 200.0));
    assert!(approx(c.y, 300.0));
}

#[test]
fn stretch_presets_resolve_to_center() {
    for preset in [
        AnchorPreset::StretchHorizontal,
        AnchorPreset::StretchVertical,
        AnchorPreset::StretchAll,
    ] {
        let r = resolve_rect(&rect(preset, (0.0, 0.0), 0.0, 0.0, 0.5, 0.5), 100.0, 100.0);
        assert_eq!((r.x, r.y, r.w, r.h), (50.0, 50.0, 50.0, 50.0));
    }
}

#[test]
fn offsets_are_not_clamped() {
    let r = resolve_rect(
        &rect(AnchorPreset::TopLeft, (2.0, -1.0), -0.5, 1.5, 1.5, 0.25),
        100.0,
        200.0,
    );
    assert!(approx(r.w, 150.0));
    assert!(approx(r.h, 50.0));
    assert!(approx(r.x, -50.0 - 300.0));
    assert!(approx(r.y, 300.0 + 50.0));
}

#[test]
fn zero_parent_yields_zero_rect() {
    let r = resolve_rect(
        &rect(AnchorPreset::BottomRight, (0.5, 0.5), 0.3, 0.3, 0.5, 0.5),
        0.0,
        0.0,
    );
    assert_eq!(r, ResolvedRect::default());
    assert!(r.is_empty());
}

#[test]
fn level_four_row_matches_reference_box() {
    let stars = preset_for_category(CardCategory::Monster).stars;
    let r = resolve_stars_rect(&stars, 4, 420.0, 586.0);
    let expected_w = (4.0 * 0.038 + 3.0 * 0.005) * 420.0;
    assert!(approx(r.w, expected_w));
    assert!(approx(r.h, 0.038 * 420.0));
    assert!(approx(r.y, 0.715 * 586.0));
    assert!(approx(r.x, 210.0 - expected_w / 2.0));
}

#[test]
fn doubling_relative_width_doubles_resolved_width() {
    let base = rect(AnchorPreset::Center, (0.5, 0.5), 0.1, -0.2, 0.15, 0.3);
    let one = resolve_rect(&base, 640.0, 480.0);
    let two = resolve_rect(&RectTransform { w: 0.3, ..base }, 640.0, 480.0);
    assert!(approx(two.w, 2.0 * one.w));
    assert!(approx(two.h, one.h));
    assert!(approx(two.center().x, one.center().x));
}

#[test]
fn level_five_row_on_thousand_px_parent_is_240_px() {
    let stars = StarsConfig {
        anchor: AnchorPreset::TopLeft,
        pivot: Pivot::new(0.0, 0.0),
        x: 0.0,
        y: 0.0,
        size: 0.04,
        gap: 0.01,
        z_index: 0,
    };
    let r = resolve_stars_rect(&stars, 5, 1000.0, 1000.0);
    assert!(approx(r.w, 240.0));
    assert!(approx(r.h, 40.0));
    assert_eq!(star_slots(&stars, 5, 1000.0, 1000.0).len(), 5);
}

#[test]
fn level_zero_row_is_empty() {
    let stars = preset_for_category(CardCategory::Monster).stars;
    assert_eq!(stars_row_width(&stars, 0), 0.0);
    assert!(resolve_stars_rect(&stars, 0, 420.0, 586.0).is_empty());
    assert!(star_slots(&stars, 0, 420.0, 586.0).is_empty());
}

#[test]
fn star_slots_step_by_size_plus_gap() {
    let stars = preset_for_category(CardCategory::Monster).stars;
    let row = resolve_stars_rect(&stars, 3, 420.0, 586.0);
    let slots = star_slots(&stars, 3, 420.0, 586.0);
    assert_eq!(slots.len(), 3);
    assert!(approx(slots[0].x, row.x));
    assert!(approx(slots[1].x - slots[0].x, (0.038 + 0.005) * 420.0));
    assert!(approx(slots[2].right(), row.right()));
}

#[test]
fn contains_is_inclusive_and_empty_rects_hit_nothing() {
    let r = ResolvedRect::new(10.0, 10.0, 20.0, 20.0);
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(r.contains(Point::new(30.0, 30.0)));
    assert!(!r.contains(Point::new(30.1, 20.0)));
    let empty = ResolvedRect::new(10.0, 10.0, 0.0, 20.0);
    assert!(!empty.contains(Point::new(10.0, 15.0)));
}
