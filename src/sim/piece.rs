//! Discs on the board

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One of the two coin colors a seat plays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinColor {
    White,
    Black,
}

impl CoinColor {
    pub fn opponent(&self) -> Self {
        match self {
            CoinColor::White => CoinColor::Black,
            CoinColor::Black => CoinColor::White,
        }
    }
}

/// Role of a disc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    White,
    Black,
    /// The single red disc
    Queen,
    /// The disc the active player flicks
    Striker,
}

impl PieceKind {
    pub fn radius(&self) -> f32 {
        match self {
            PieceKind::Striker => STRIKER_RADIUS,
            _ => COIN_RADIUS,
        }
    }

    pub fn mass(&self) -> f32 {
        match self {
            PieceKind::Striker => STRIKER_MASS,
            _ => COIN_MASS,
        }
    }

    /// Numeric tag used by packed render records
    pub fn tag(&self) -> u32 {
        match self {
            PieceKind::White => 0,
            PieceKind::Black => 1,
            PieceKind::Queen => 2,
            PieceKind::Striker => 3,
        }
    }
}

impl From<CoinColor> for PieceKind {
    fn from(color: CoinColor) -> Self {
        match color {
            CoinColor::White => PieceKind::White,
            CoinColor::Black => PieceKind::Black,
        }
    }
}

/// A simulated disc
///
/// Radius, mass and role are fixed at creation; only position, velocity
/// and the pocketed flag change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Piece {
    id: u32,
    kind: PieceKind,
    radius: f32,
    mass: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    pocketed: bool,
}

impl Piece {
    pub fn new(id: u32, kind: PieceKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            radius: kind.radius(),
            mass: kind.mass(),
            pos,
            vel: Vec2::ZERO,
            pocketed: false,
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }

    #[inline]
    pub fn is_pocketed(&self) -> bool {
        self.pocketed
    }

    /// Whether the piece takes part in wall and collision checks
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.pocketed
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn is_moving(&self) -> bool {
        self.is_active() && self.speed() > REST_SPEED
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// Take the piece off the board
    pub(crate) fn pocket(&mut self) {
        self.pocketed = true;
        self.vel = Vec2::ZERO;
    }

    /// Put the piece back on the board at rest
    pub(crate) fn restore_at(&mut self, pos: Vec2) {
        self.pocketed = false;
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }
}
