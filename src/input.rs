//! Pointer input mapping
//!
//! Turns a pull-back drag into a striker velocity and a slider value into a
//! point on the active baseline. Pointer capture itself happens elsewhere;
//! this only sees coordinates.

use glam::Vec2;

use crate::consts::*;
use crate::settings::Seats;
use crate::sim::Board;

/// Where the board is drawn on screen, in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardViewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BoardViewport {
    /// Map a client-space point onto board units
    pub fn to_board(&self, client: Vec2, board: &Board) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return client;
        }
        let local = client - Vec2::new(self.left, self.top);
        local * Vec2::new(board.size / self.width, board.size / self.height)
    }
}

/// Convert a drag vector into a striker velocity.
///
/// Drags at or below the minimum length are not shots. Length is capped at
/// the maximum drag before scaling to shot power.
pub fn shot_velocity(aim: Vec2) -> Option<Vec2> {
    let magnitude = aim.length();
    if !magnitude.is_finite() || magnitude <= MIN_DRAG {
        return None;
    }
    let power = magnitude.min(MAX_DRAG) / MAX_DRAG * MAX_SHOT_POWER;
    Some(aim / magnitude * power)
}

/// Point on `seat`'s baseline for a slider value (clamped to [0, 1])
pub fn placement_to_position(board: &Board, seats: Seats, seat: usize, placement: f32) -> Vec2 {
    board.baseline(seats, seat).point_at(placement)
}

/// Pull-back aiming gesture
#[derive(Debug, Clone, Copy, Default)]
pub struct DragAim {
    start: Option<Vec2>,
    current: Vec2,
}

impl DragAim {
    /// Start dragging if `point` is on the striker
    pub fn begin(&mut self, point: Vec2, striker_pos: Vec2) -> bool {
        if point.distance(striker_pos) >= STRIKER_GRAB_RADIUS {
            return false;
        }
        self.start = Some(point);
        self.current = point;
        true
    }

    pub fn update(&mut self, point: Vec2) {
        if self.start.is_some() {
            self.current = point;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// Direction and strength of the pending shot: start minus current
    pub fn aim_vector(&self) -> Option<Vec2> {
        self.start.map(|start| start - self.current)
    }

    /// Finish the drag, yielding a shot velocity if it was long enough
    pub fn release(&mut self) -> Option<Vec2> {
        let aim = self.aim_vector();
        self.cancel();
        aim.and_then(shot_velocity)
    }

    pub fn cancel(&mut self) {
        self.start = None;
        self.current = Vec2::ZERO;
    }
}
