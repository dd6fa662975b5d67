#![allow(clippy::float_cmp)]

use super::*;

fn seat() -> PlacedElement {
    PlacedElement::new("s", "SEAT", GridPosition::new(0, 0))
}

#[test]
fn fill_defaults_to_code_colour() {
    assert_eq!(element_fill(&seat()), "#3b82f6");
}

#[test]
fn fill_honours_override() {
    let mut el = seat();
    el.color = Some("#123456".into());
    assert_eq!(element_fill(&el), "#123456");
    el.color = Some("  ".into());
    assert_eq!(element_fill(&el), "#3b82f6");
}

#[test]
fn alpha_defaults_to_opaque() {
    assert_eq!(element_alpha(&seat(), false), 1.0);
    assert_eq!(element_alpha(&seat(), true), 0.5);
}

#[test]
fn alpha_clamps_override() {
    let mut el = seat();
    el.opacity = Some(3.0);
    assert_eq!(element_alpha(&el, false), 1.0);
    el.opacity = Some(-1.0);
    assert_eq!(element_alpha(&el, false), 0.0);
    el.opacity = Some(f64::NAN);
    assert_eq!(element_alpha(&el, false), 1.0);
    el.opacity = Some(0.4);
    assert_eq!(element_alpha(&el, true), 0.2);
}

#[test]
fn seat_label_skips_blank() {
    assert_eq!(seat_label(&seat()), None);
    assert_eq!(seat_label(&seat().with_seat_number(" 12A ")), Some("12A"));
    assert_eq!(seat_label(&seat().with_seat_number("   ")), None);
}
