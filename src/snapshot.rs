//! Read-only per-frame view of a match for renderers

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::Serialize;

use crate::sim::{MatchState, Phase, PieceKind, PocketCounts};

/// Packed per-piece record for instanced drawing
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PieceInstance {
    pub position: [f32; 2],
    pub radius: f32,
    /// See `PieceKind::tag`
    pub kind: u32,
}

impl PieceInstance {
    pub const fn new(x: f32, y: f32, radius: f32, kind: u32) -> Self {
        Self {
            position: [x, y],
            radius,
            kind,
        }
    }
}

/// One piece as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PieceKind,
    pub pocketed: bool,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub pieces: Vec<PieceView>,
    pub scores: PocketCounts,
    pub active_seat: usize,
    pub seat_name: String,
    pub phase: Phase,
    pub queen_pending: bool,
    pub winner: Option<String>,
    /// Pull-back vector of a drag in progress, for the aim line
    pub aim: Option<Vec2>,
}

impl FrameSnapshot {
    pub fn capture(state: &MatchState, aim: Option<Vec2>) -> Self {
        let pieces = state
            .store
            .pieces()
            .iter()
            .map(|p| PieceView {
                id: p.id(),
                pos: p.pos,
                radius: p.radius(),
                kind: p.kind(),
                pocketed: p.is_pocketed(),
            })
            .collect();

        Self {
            pieces,
            scores: state.scores(),
            active_seat: state.active_seat,
            seat_name: state.seat_name().to_string(),
            phase: state.phase,
            queen_pending: state.queen_pending,
            winner: state.winner_label().map(str::to_string),
            aim,
        }
    }

    /// Instances for every piece still on the board
    pub fn instances(&self) -> Vec<PieceInstance> {
        self.pieces
            .iter()
            .filter(|p| !p.pocketed)
            .map(|p| PieceInstance::new(p.pos.x, p.pos.y, p.radius, p.kind.tag()))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Raw bytes of an instance slice, ready for a vertex buffer
pub fn instance_bytes(instances: &[PieceInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
