//! Collision detection and response for discs
//!
//! Disc-disc contacts get positional correction plus a restitution impulse;
//! walls clamp the disc back inside and bounce it with damping.

use glam::Vec2;

use super::board::Board;
use super::piece::Piece;
use crate::consts::*;

/// Contact between two overlapping discs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first disc toward the second
    pub normal: Vec2,
    /// How far the discs overlap along the normal
    pub penetration: f32,
}

/// Check two discs for overlap.
///
/// Returns `None` when they are apart, and also when their centers coincide:
/// there is no usable normal then, so the pair is skipped for this tick.
pub fn disc_contact(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> Option<Contact> {
    let delta = b_pos - a_pos;
    let dist = delta.length();
    let min_dist = a_radius + b_radius;

    if dist >= min_dist || dist < DEGENERATE_DISTANCE {
        return None;
    }

    Some(Contact {
        normal: delta / dist,
        penetration: min_dist - dist,
    })
}

/// Separate two overlapping discs and exchange momentum.
///
/// Each disc is pushed back by half the penetration. The impulse is only
/// applied while they approach each other. Returns true if they overlapped.
pub fn resolve_pair(a: &mut Piece, b: &mut Piece) -> bool {
    let Some(contact) = disc_contact(a.pos, a.radius(), b.pos, b.radius()) else {
        return false;
    };
    let n = contact.normal;

    let correction = n * (contact.penetration / 2.0);
    a.pos -= correction;
    b.pos += correction;

    let vel_along_normal = (b.vel - a.vel).dot(n);
    if vel_along_normal >= 0.0 {
        return true;
    }

    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let impulse = -(1.0 + RESTITUTION) * vel_along_normal / (inv_a + inv_b);

    a.vel -= n * (impulse * inv_a);
    b.vel += n * (impulse * inv_b);
    true
}

/// Keep a disc inside the board, bouncing it off any wall it crossed.
/// Returns true if a wall was hit.
pub fn wall_bounce(piece: &mut Piece, board: &Board) -> bool {
    let (lo, hi) = board.bounds_for(piece.radius());
    let mut hit = false;

    if piece.pos.x < lo {
        piece.pos.x = lo;
        piece.vel.x *= -WALL_DAMPING;
        hit = true;
    } else if piece.pos.x > hi {
        piece.pos.x = hi;
        piece.vel.x *= -WALL_DAMPING;
        hit = true;
    }

    if piece.pos.y < lo {
        piece.pos.y = lo;
        piece.vel.y *= -WALL_DAMPING;
        hit = true;
    } else if piece.pos.y > hi {
        piece.pos.y = hi;
        piece.vel.y *= -WALL_DAMPING;
        hit = true;
    }

    hit
}

/// Whether a disc center lies inside a pocket's capture zone
#[inline]
pub fn in_pocket(pos: Vec2, pocket: Vec2) -> bool {
    pos.distance(pocket) < POCKET_RADIUS
}
