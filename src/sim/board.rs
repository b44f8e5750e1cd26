//! Fixed board geometry: walls, pockets and baselines

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Seats;

/// A straight segment the striker is placed on before a shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub start: Vec2,
    pub end: Vec2,
}

impl Baseline {
    /// Point at `placement` along the segment (clamped to [0, 1])
    pub fn point_at(&self, placement: f32) -> Vec2 {
        let t = if placement.is_nan() {
            0.5
        } else {
            placement.clamp(0.0, 1.0)
        };
        self.start.lerp(self.end, t)
    }
}

/// Square playing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Side length
    pub size: f32,
}

impl Default for Board {
    fn default() -> Self {
        Self { size: BOARD_SIZE }
    }
}

impl Board {
    pub fn center(&self) -> Vec2 {
        Vec2::splat(self.size / 2.0)
    }

    /// Pocket centers: top-left, top-right, bottom-left, bottom-right
    pub fn pockets(&self) -> [Vec2; 4] {
        let near = POCKET_INSET;
        let far = self.size - POCKET_INSET;
        [
            Vec2::new(near, near),
            Vec2::new(far, near),
            Vec2::new(near, far),
            Vec2::new(far, far),
        ]
    }

    /// Lowest and highest legal center coordinate for a disc
    #[inline]
    pub fn bounds_for(&self, radius: f32) -> (f32, f32) {
        (radius, self.size - radius)
    }

    /// Baseline for a seat. Two seats sit bottom/top; four sit
    /// bottom/left/top/right, each segment running left-to-right from
    /// that player's point of view.
    pub fn baseline(&self, seats: Seats, seat: usize) -> Baseline {
        let near = BASELINE_OFFSET;
        let far = self.size - BASELINE_OFFSET;
        let bottom = Baseline {
            start: Vec2::new(near, far),
            end: Vec2::new(far, far),
        };
        match (seats, seat % seats.count()) {
            (_, 0) => bottom,
            (Seats::Two, _) => Baseline {
                start: Vec2::new(near, near),
                end: Vec2::new(far, near),
            },
            (Seats::Four, 1) => Baseline {
                start: Vec2::new(near, far),
                end: Vec2::new(near, near),
            },
            (Seats::Four, 2) => Baseline {
                start: Vec2::new(far, near),
                end: Vec2::new(near, near),
            },
            (Seats::Four, _) => Baseline {
                start: Vec2::new(far, near),
                end: Vec2::new(far, far),
            },
        }
    }
}
