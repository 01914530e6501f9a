//! Piece geometry tests over the public API

use blockfall::{Piece, PieceKind};

#[test]
fn test_every_kind_spawns_with_four_cells() {
    for kind in PieceKind::ALL {
        let piece = Piece::new(kind, 0, 0);
        assert_eq!(piece.occupied_count(), 4, "kind {:?}", kind);
    }
}

#[test]
fn test_i_piece_half_turn_restores_shape_exactly() {
    let original = Piece::new(PieceKind::I, 3, 0);
    let mut piece = original.clone();

    piece.rotate_cw();
    piece.rotate_cw();

    assert_eq!(piece.shape(), original.shape());
}

#[test]
fn test_rotation_preserves_cell_count_for_all_kinds() {
    for kind in PieceKind::ALL {
        let mut piece = Piece::new(kind, 0, 0);
        for _ in 0..4 {
            piece.rotate_cw();
            assert_eq!(piece.occupied_count(), 4, "cw {:?}", kind);
        }
        for _ in 0..4 {
            piece.rotate_ccw();
            assert_eq!(piece.occupied_count(), 4, "ccw {:?}", kind);
        }
    }
}

#[test]
fn test_rotation_does_not_touch_position() {
    let mut piece = Piece::new(PieceKind::J, 5, 7);
    piece.rotate_cw();
    assert_eq!((piece.x, piece.y), (5, 7));
    piece.rotate_ccw();
    assert_eq!((piece.x, piece.y), (5, 7));
}

#[test]
fn test_extents_track_position() {
    let mut piece = Piece::new(PieceKind::O, 0, 0);
    assert_eq!(piece.rightmost_x(), 2);
    assert_eq!(piece.bottommost_y(), 2);

    piece.x = 4;
    piece.y = 10;
    assert_eq!(piece.rightmost_x(), 6);
    assert_eq!(piece.bottommost_y(), 12);
}

#[test]
fn test_vertical_i_extents() {
    let mut piece = Piece::new(PieceKind::I, 0, 0);
    piece.rotate_cw();

    assert_eq!(piece.rightmost_x(), 1);
    assert_eq!(piece.bottommost_y(), 4);
}

#[test]
fn test_deactivated_piece_stays_deactivated() {
    let mut piece = Piece::new(PieceKind::T, 0, 0);
    piece.deactivate();
    piece.deactivate();
    assert!(!piece.is_active());
}
