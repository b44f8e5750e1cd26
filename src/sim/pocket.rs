//! Pocket capture

use super::collision::in_pocket;
use super::piece::PieceKind;
use super::store::PieceStore;

/// Capture every on-board piece whose center is inside a pocket zone.
///
/// Captured pieces are flagged pocketed and stop dead. Nothing is ever
/// returned to the board here. Returns `(id, kind)` of each piece captured
/// this tick.
pub fn detect(store: &mut PieceStore) -> Vec<(u32, PieceKind)> {
    let pockets = store.board().pockets();
    let mut captured = Vec::new();

    for piece in store.pieces_mut().iter_mut().filter(|p| p.is_active()) {
        if pockets.iter().any(|&pocket| in_pocket(piece.pos, pocket)) {
            piece.pocket();
            captured.push((piece.id(), piece.kind()));
        }
    }

    captured
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Seats;
    use crate::sim::board::Board;
    use glam::Vec2;

    #[test]
    fn test_captures_pieces_in_corners() {
        let mut store = PieceStore::new(Board::default(), Seats::Two);
        store.pieces_mut()[1].pos = Vec2::new(20.0, 20.0);
        store.pieces_mut()[1].vel = Vec2::new(-1.0, -1.0);
        store.pieces_mut()[2].pos = Vec2::new(780.0, 785.0);

        let captured = detect(&mut store);
        assert_eq!(captured.len(), 2);
        assert!(store.pieces()[1].is_pocketed());
        assert_eq!(store.pieces()[1].vel, Vec2::ZERO);
        assert!(store.pieces()[2].is_pocketed());
        assert_eq!(store.pocket_counts().white + store.pocket_counts().black, 2);
    }

    #[test]
    fn test_pocketed_pieces_are_not_recaptured() {
        let mut store = PieceStore::new(Board::default(), Seats::Two);
        store.pieces_mut()[1].pos = Vec2::new(15.0, 15.0);
        assert_eq!(detect(&mut store).len(), 1);
        assert!(detect(&mut store).is_empty());
        assert!(store.pieces()[1].is_pocketed());
    }

    #[test]
    fn test_center_rack_is_safe() {
        let mut store = PieceStore::new(Board::default(), Seats::Four);
        store.spawn_striker(2, 0.0);
        assert!(detect(&mut store).is_empty());
    }

    #[test]
    fn test_striker_can_be_pocketed() {
        let mut store = PieceStore::new(Board::default(), Seats::Two);
        store.spawn_striker(0, 0.0);
        if let Some(s) = store.striker_mut() {
            s.pos = Vec2::new(22.0, 778.0);
        }
        let captured = detect(&mut store);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].1, PieceKind::Striker);
    }
}
