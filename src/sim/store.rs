//! Piece storage and the starting layout

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::board::{Baseline, Board};
use super::piece::{Piece, PieceKind};
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::settings::Seats;

/// Spacing between candidate spots when a respawn point is occupied
const RESPAWN_SEARCH_STEP: f32 = 2.0;
/// Directions tried per ring when nudging the queen off the center
const QUEEN_SEARCH_DIRECTIONS: usize = 12;

/// Pocketed piece counts per role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PocketCounts {
    pub white: u32,
    pub black: u32,
    pub queen: u32,
}

impl PocketCounts {
    pub fn of(&self, kind: PieceKind) -> u32 {
        match kind {
            PieceKind::White => self.white,
            PieceKind::Black => self.black,
            PieceKind::Queen => self.queen,
            PieceKind::Striker => 0,
        }
    }
}

/// Owns every disc on the board, in stable id order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceStore {
    board: Board,
    seats: Seats,
    pieces: Vec<Piece>,
    next_id: u32,
}

impl PieceStore {
    /// Create a store with the starting layout already racked
    pub fn new(board: Board, seats: Seats) -> Self {
        let mut store = Self {
            board,
            seats,
            pieces: Vec::new(),
            next_id: 1,
        };
        store.layout();
        store
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn next_piece_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn push(&mut self, kind: PieceKind, pos: Vec2) {
        let id = self.next_piece_id();
        self.pieces.push(Piece::new(id, kind, pos));
    }

    /// Rack the 19 coins: queen at the center, six on an inner ring every
    /// 60 degrees, twelve on an outer ring every 30 degrees, colors
    /// alternating around each ring. Any previous pieces are discarded.
    pub fn layout(&mut self) {
        self.pieces.clear();
        self.next_id = 1;

        let center = self.board.center();
        self.push(PieceKind::Queen, center);

        let rings = [
            (6, COIN_RADIUS * INNER_RING_FACTOR),
            (12, COIN_RADIUS * OUTER_RING_FACTOR),
        ];
        for (count, dist) in rings {
            let step = std::f32::consts::TAU / count as f32;
            for i in 0..count {
                let kind = if i % 2 == 0 {
                    PieceKind::White
                } else {
                    PieceKind::Black
                };
                self.push(kind, center + polar_to_cartesian(dist, i as f32 * step));
            }
        }
    }

    /// Replace the striker with a fresh one at rest on `seat`'s baseline.
    /// If a coin rests on the requested spot, the striker slides to the
    /// nearest clear point along the same baseline.
    pub fn spawn_striker(&mut self, seat: usize, placement: f32) {
        self.pieces.retain(|p| p.kind() != PieceKind::Striker);
        let line = self.board.baseline(self.seats, seat);
        let pos = self.clear_baseline_point(&line, placement);
        self.push(PieceKind::Striker, pos);
    }

    /// Whether a disc of `radius` at `pos` would touch no coin on the board
    fn is_clear(&self, pos: Vec2, radius: f32) -> bool {
        self.pieces
            .iter()
            .filter(|p| p.is_active() && p.kind() != PieceKind::Striker)
            .all(|p| p.pos.distance(pos) >= p.radius() + radius)
    }

    fn clear_baseline_point(&self, line: &Baseline, placement: f32) -> Vec2 {
        let wanted = line.point_at(placement);
        if self.is_clear(wanted, STRIKER_RADIUS) {
            return wanted;
        }

        let base = if placement.is_nan() {
            0.5
        } else {
            placement.clamp(0.0, 1.0)
        };
        let len = line.start.distance(line.end);
        if len <= 0.0 {
            return wanted;
        }
        let dt = RESPAWN_SEARCH_STEP / len;
        let steps = (len / RESPAWN_SEARCH_STEP).ceil() as usize;
        for k in 1..=steps {
            let offset = k as f32 * dt;
            for t in [base + offset, base - offset] {
                if !(0.0..=1.0).contains(&t) {
                    continue;
                }
                let pos = line.point_at(t);
                if self.is_clear(pos, STRIKER_RADIUS) {
                    log::debug!("Striker spot taken, nudged from {base:.3} to {t:.3}");
                    return pos;
                }
            }
        }
        log::warn!("Baseline fully blocked, striker overlaps a coin");
        wanted
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub(crate) fn pieces_mut(&mut self) -> &mut [Piece] {
        &mut self.pieces
    }

    pub fn striker(&self) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.kind() == PieceKind::Striker)
    }

    pub(crate) fn striker_mut(&mut self) -> Option<&mut Piece> {
        self.pieces
            .iter_mut()
            .find(|p| p.kind() == PieceKind::Striker)
    }

    pub fn queen(&self) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.kind() == PieceKind::Queen)
    }

    /// Return the queen to the board center at rest, or to the closest
    /// clear spot around it when a coin is sitting there
    pub(crate) fn respawn_queen(&mut self) {
        let spot = self.clear_center_point();
        if let Some(queen) = self.pieces.iter_mut().find(|p| p.kind() == PieceKind::Queen) {
            queen.restore_at(spot);
        }
    }

    fn clear_center_point(&self) -> Vec2 {
        let center = self.board.center();
        if self.is_clear(center, COIN_RADIUS) {
            return center;
        }

        let reach = self.board.size * 0.5 - BASELINE_OFFSET;
        let rings = (reach / RESPAWN_SEARCH_STEP) as usize;
        let step = std::f32::consts::TAU / QUEEN_SEARCH_DIRECTIONS as f32;
        for ring in 1..=rings {
            let dist = ring as f32 * RESPAWN_SEARCH_STEP;
            for i in 0..QUEEN_SEARCH_DIRECTIONS {
                let pos = center + polar_to_cartesian(dist, i as f32 * step);
                if self.is_clear(pos, COIN_RADIUS) {
                    log::debug!("Center taken, queen returned {dist:.0} units out");
                    return pos;
                }
            }
        }
        log::warn!("No clear spot near the center, queen overlaps a coin");
        center
    }

    /// Count pocketed coins and queen
    pub fn pocket_counts(&self) -> PocketCounts {
        let mut counts = PocketCounts::default();
        for piece in self.pieces.iter().filter(|p| p.is_pocketed()) {
            match piece.kind() {
                PieceKind::White => counts.white += 1,
                PieceKind::Black => counts.black += 1,
                PieceKind::Queen => counts.queen += 1,
                PieceKind::Striker => {}
            }
        }
        counts
    }

    /// Whether any piece on the board is still above rest speed
    pub fn any_moving(&self) -> bool {
        self.pieces.iter().any(|p| p.is_moving())
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.pieces
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.kinetic_energy())
            .sum()
    }
}
