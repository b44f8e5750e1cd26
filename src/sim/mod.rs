//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, velocities in board units per tick
//! - Seeded RNG only (the planner owns it)
//! - Stable iteration order (pieces by id)
//! - No rendering or platform dependencies

pub mod board;
pub mod collision;
pub mod physics;
pub mod piece;
pub mod planner;
pub mod pocket;
pub mod rules;
pub mod state;
pub mod store;
pub mod tick;

pub use board::{Baseline, Board};
pub use collision::{Contact, disc_contact, resolve_pair, wall_bounce};
pub use piece::{CoinColor, Piece, PieceKind};
pub use planner::ShotPlanner;
pub use rules::{Phase, QueenOutcome, ShotOutcome, ShotSummary, TurnDecision};
pub use state::{DEFAULT_PLACEMENT, MatchEvent, MatchState};
pub use store::{PieceStore, PocketCounts};
pub use tick::{TickInput, tick};
