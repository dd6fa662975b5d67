use super::*;

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(-1), Button::Primary);
}

#[test]
fn ui_state_default_has_no_selection() {
    let ui = UiState::default();
    assert!(ui.selected_id.is_none());
    assert!(ui.cursor.is_none());
}

#[test]
fn gesture_default_is_idle() {
    let g = GestureState::default();
    assert!(g.is_idle());
    assert_eq!(g.target(), None);
    assert_eq!(g.pointer(), None);
    assert_eq!(g.label(), "idle");
}

#[test]
fn dragging_exposes_target_and_pointer() {
    let g = GestureState::Dragging {
        id: "a".into(),
        grab_offset: Point::new(3.0, 4.0),
        pointer: Point::new(50.0, 60.0),
    };
    assert!(!g.is_idle());
    assert_eq!(g.target(), Some("a"));
    assert_eq!(g.pointer(), Some(Point::new(50.0, 60.0)));
    assert_eq!(g.label(), "dragging");
}

#[test]
fn resizing_exposes_target_and_pointer() {
    let g = GestureState::Resizing {
        id: "b".into(),
        handle: ResizeHandle::Sw,
        start: Footprint::new(1, 1, 2, 2),
        pointer: Point::new(1.0, 2.0),
    };
    assert_eq!(g.target(), Some("b"));
    assert_eq!(g.pointer(), Some(Point::new(1.0, 2.0)));
    assert_eq!(g.label(), "resizing");
}
