use super::*;

fn block(id: &str, x: i32, y: i32, w: i32, h: i32) -> PlacedElement {
    PlacedElement::new(id, "SEAT", GridPosition::new(x, y)).with_size(w, h)
}

fn grid(w: i32, h: i32, elements: Vec<PlacedElement>) -> LayoutDocument {
    let mut doc = LayoutDocument::new("g", "grid", w, h);
    doc.elements = elements;
    doc
}

fn ten() -> GridExtent {
    GridExtent { width: 10, height: 10 }
}

// =============================================================
// Footprint
// =============================================================

#[test]
fn edges_are_exclusive() {
    let fp = Footprint::new(2, 3, 4, 5);
    assert_eq!(fp.right(), 6);
    assert_eq!(fp.bottom(), 8);
    assert!(fp.contains(GridPosition::new(5, 7)));
    assert!(!fp.contains(GridPosition::new(6, 7)));
    assert!(!fp.contains(GridPosition::new(5, 8)));
}

#[test]
fn touching_boxes_do_not_overlap() {
    let a = Footprint::new(0, 0, 2, 2);
    assert!(!a.overlaps(&Footprint::new(2, 0, 2, 2)));
    assert!(!a.overlaps(&Footprint::new(0, 2, 2, 2)));
    assert!(a.overlaps(&Footprint::new(1, 1, 2, 2)));
}

#[test]
fn overlap_is_symmetric() {
    let boxes = [
        Footprint::new(0, 0, 3, 3),
        Footprint::new(2, 2, 1, 1),
        Footprint::new(3, 0, 1, 5),
        Footprint::new(-1, -1, 2, 2),
        Footprint::new(5, 5, 4, 1),
    ];
    for a in &boxes {
        for b in &boxes {
            assert_eq!(a.overlaps(b), b.overlaps(a), "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn containment_overlaps() {
    let outer = Footprint::new(0, 0, 10, 10);
    assert!(outer.overlaps(&Footprint::new(4, 4, 1, 1)));
}

#[test]
fn within_checks_all_edges() {
    assert!(Footprint::new(8, 8, 2, 2).within(ten()));
    assert!(!Footprint::new(9, 8, 2, 2).within(ten()));
    assert!(!Footprint::new(-1, 0, 2, 2).within(ten()));
}

// =============================================================
// Clamping
// =============================================================

#[test]
fn drag_target_clamps_to_extent() {
    let size = GridSize::new(3, 2);
    assert_eq!(clamp_drag_target(GridPosition::new(50, 50), size, ten()), GridPosition::new(7, 8));
    assert_eq!(clamp_drag_target(GridPosition::new(-4, -1), size, ten()), GridPosition::new(0, 0));
    assert_eq!(clamp_drag_target(GridPosition::new(4, 4), size, ten()), GridPosition::new(4, 4));
}

#[test]
fn oversize_drag_pins_to_zero() {
    let size = GridSize::new(12, 3);
    assert_eq!(clamp_drag_target(GridPosition::new(5, 5), size, ten()), GridPosition::new(0, 5));
}

#[test]
fn resize_candidate_per_handle() {
    let start = Footprint::new(4, 4, 2, 2);
    assert_eq!(resize_candidate(ResizeHandle::Se, start, 2, 1), Footprint::new(4, 4, 4, 3));
    assert_eq!(resize_candidate(ResizeHandle::Sw, start, -1, 1), Footprint::new(3, 4, 3, 3));
    assert_eq!(resize_candidate(ResizeHandle::Ne, start, 1, -2), Footprint::new(4, 2, 3, 4));
    assert_eq!(resize_candidate(ResizeHandle::Nw, start, -2, -1), Footprint::new(2, 3, 4, 3));
}

#[test]
fn resize_candidate_floors_at_one() {
    let start = Footprint::new(4, 4, 2, 2);
    let c = resize_candidate(ResizeHandle::Se, start, -9, -9);
    assert_eq!((c.width, c.height), (1, 1));
    let c = resize_candidate(ResizeHandle::Nw, start, 5, 5);
    assert_eq!((c.width, c.height), (1, 1));
}

#[test]
fn resize_candidate_survives_extreme_deltas() {
    let start = Footprint::new(0, 0, 2, 2);
    let c = resize_candidate(ResizeHandle::Se, start, i32::MAX, i32::MAX);
    assert_eq!(c.width, i32::MAX);
    let c = resize_candidate(ResizeHandle::Nw, start, i32::MIN, i32::MIN);
    assert!(c.width >= 1);
}

#[test]
fn clamp_resize_caps_size_at_edge() {
    assert_eq!(clamp_resize(Footprint::new(8, 8, 7, 7), ten()), Footprint::new(8, 8, 2, 2));
    assert_eq!(clamp_resize(Footprint::new(-3, -2, 5, 5), ten()), Footprint::new(0, 0, 5, 5));
    assert_eq!(clamp_resize(Footprint::new(20, 0, 3, 3), ten()), Footprint::new(9, 0, 1, 3));
}

// =============================================================
// Collision
// =============================================================

#[test]
fn element_never_collides_with_itself() {
    let doc = grid(10, 10, vec![block("a", 0, 0, 2, 2)]);
    assert!(find_collision(&doc, "a", &Footprint::new(1, 1, 2, 2)).is_none());
}

#[test]
fn find_collision_reports_first_hit() {
    let doc = grid(10, 10, vec![block("a", 0, 0, 2, 2), block("b", 2, 0, 2, 2)]);
    let hit = find_collision(&doc, "x", &Footprint::new(1, 0, 2, 1)).unwrap();
    assert_eq!(hit.id, "a");
}

#[test]
fn duplicate_id_twin_still_collides() {
    let doc = grid(10, 10, vec![block("a", 0, 0, 2, 2), block("a", 5, 5, 2, 2)]);
    let hit = find_collision(&doc, "a", &Footprint::new(5, 5, 2, 2)).unwrap();
    assert_eq!(hit.position(), GridPosition::new(5, 5));
    assert_eq!(
        place_dragged(&doc, "a", GridPosition::new(5, 5)),
        Err(PlacementError::Collision { with: "a".into() })
    );
}

#[test]
fn check_placement_rejects_degenerate() {
    let doc = grid(10, 10, vec![]);
    assert_eq!(
        check_placement(&doc, "a", &Footprint::new(0, 0, 0, 3)),
        Err(PlacementError::BelowMinimumSize { width: 0, height: 3 })
    );
}

// =============================================================
// Gesture commits
// =============================================================

#[test]
fn drag_collision_scenario() {
    let doc = grid(10, 10, vec![block("a", 0, 0, 2, 2), block("b", 5, 5, 2, 2)]);

    let err = place_dragged(&doc, "b", GridPosition::new(1, 1)).unwrap_err();
    assert_eq!(err, PlacementError::Collision { with: "a".into() });

    let next = place_dragged(&doc, "b", GridPosition::new(3, 3)).unwrap();
    assert_eq!(next.element("b").unwrap().position(), GridPosition::new(3, 3));
    assert_eq!(doc.element("b").unwrap().position(), GridPosition::new(5, 5));
}

#[test]
fn drag_clamps_before_testing() {
    let doc = grid(10, 10, vec![block("a", 0, 0, 2, 2)]);
    let next = place_dragged(&doc, "a", GridPosition::new(40, -7)).unwrap();
    assert_eq!(next.element("a").unwrap().position(), GridPosition::new(8, 0));
}

#[test]
fn drag_keeps_implicit_size_implicit() {
    let doc = grid(10, 10, vec![PlacedElement::new("t", "TABLE", GridPosition::new(0, 0))]);
    let next = place_dragged(&doc, "t", GridPosition::new(9, 9)).unwrap();
    let t = next.element("t").unwrap();
    assert_eq!(t.position(), GridPosition::new(6, 8));
    assert!(t.size.is_none());
}

#[test]
fn drag_unknown_element() {
    let doc = grid(10, 10, vec![]);
    assert_eq!(
        place_dragged(&doc, "ghost", GridPosition::new(0, 0)),
        Err(PlacementError::UnknownElement("ghost".into()))
    );
}

#[test]
fn resize_clamp_scenario() {
    let doc = grid(10, 10, vec![block("a", 8, 8, 2, 2)]);
    let start = Footprint::new(8, 8, 2, 2);
    let next = place_resized(&doc, "a", ResizeHandle::Se, start, GridPosition::new(13, 13)).unwrap();
    assert_eq!(next.element("a").unwrap().footprint(), Footprint::new(8, 8, 2, 2));
}

#[test]
fn resize_grows_freely() {
    let doc = grid(10, 10, vec![block("a", 1, 1, 2, 2)]);
    let start = Footprint::new(1, 1, 2, 2);
    let next = place_resized(&doc, "a", ResizeHandle::Se, start, GridPosition::new(3, 2)).unwrap();
    assert_eq!(next.element("a").unwrap().footprint(), Footprint::new(1, 1, 4, 3));
}

#[test]
fn resize_into_neighbour_rejected_whole() {
    let doc = grid(10, 10, vec![block("a", 0, 0, 2, 2), block("b", 4, 0, 2, 2)]);
    let start = Footprint::new(0, 0, 2, 2);
    let err = place_resized(&doc, "a", ResizeHandle::Se, start, GridPosition::new(4, 0)).unwrap_err();
    assert_eq!(err, PlacementError::Collision { with: "b".into() });
}

#[test]
fn nw_resize_moves_origin() {
    let doc = grid(10, 10, vec![block("a", 4, 4, 2, 2)]);
    let start = Footprint::new(4, 4, 2, 2);
    let next = place_resized(&doc, "a", ResizeHandle::Nw, start, GridPosition::new(2, 3)).unwrap();
    assert_eq!(next.element("a").unwrap().footprint(), Footprint::new(2, 3, 4, 3));
}

// =============================================================
// Audit
// =============================================================

#[test]
fn audit_clean_document() {
    let doc = grid(10, 10, vec![block("a", 0, 0, 2, 2), block("b", 2, 0, 2, 2)]);
    assert!(audit(&doc).is_empty());
}

#[test]
fn audit_reports_each_kind() {
    let doc = grid(
        10,
        10,
        vec![
            block("a", 0, 0, 3, 3),
            block("b", 2, 2, 2, 2),
            block("c", 9, 9, 2, 1),
            block("a", 5, 0, 1, 1),
            block("z", 7, 0, 0, 1),
        ],
    );
    let found = audit(&doc);
    assert!(found.contains(&Violation::Overlap { first: "a".into(), second: "b".into() }));
    assert!(found.contains(&Violation::OutOfBounds { id: "c".into(), footprint: Footprint::new(9, 9, 2, 1) }));
    assert!(found.contains(&Violation::DuplicateId { id: "a".into() }));
    assert!(found.contains(&Violation::BelowMinimumSize { id: "z".into(), size: GridSize::new(0, 1) }));
}

#[test]
fn violation_messages() {
    let v = Violation::Overlap { first: "a".into(), second: "b".into() };
    assert_eq!(v.to_string(), "`a` overlaps `b`");
}
