use super::*;

#[test]
fn new_board_is_empty() {
    let board = Board::new();
    assert!(board.scene.is_empty());
    assert!(board.groups.is_empty());
    assert!(board.selection.is_empty());
    assert!(!board.surface.is_armed());
}

#[test]
fn overlay_add_deduplicates_and_keeps_order() {
    let mut overlay = SelectionOverlay::new();
    overlay.add(3);
    overlay.add(1);
    overlay.add(3);
    assert_eq!(overlay.selected(), &[3, 1]);
    assert!(overlay.contains(1));
    assert!(!overlay.contains(2));
}

#[test]
fn overlay_deselect_all_clears() {
    let mut overlay = SelectionOverlay::new();
    overlay.add(7);
    overlay.deselect_all();
    assert!(overlay.is_empty());
    overlay.deselect_all();
    assert!(overlay.is_empty());
}
