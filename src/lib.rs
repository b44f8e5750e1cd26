//! Carrom - A deterministic disc-flicking board simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pockets, turn rules, planner)
//! - `input`: Drag gesture and baseline slider mapping
//! - `settings`: Match configuration
//! - `session`: Driving loop, deferred computer turns, completion callback
//! - `snapshot`: Read-only per-frame view for renderers

pub mod input;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use session::Session;
pub use settings::{Difficulty, MatchConfig, PlayMode, Seats};
pub use snapshot::{FrameSnapshot, PieceInstance};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per animation frame)
    pub const TICK_HZ: u32 = 60;

    /// Board side length in board units
    pub const BOARD_SIZE: f32 = 800.0;
    /// Pocket capture radius
    pub const POCKET_RADIUS: f32 = 35.0;
    /// Pocket centers sit this far in from each true corner
    pub const POCKET_INSET: f32 = 10.0;
    /// Distance from each board edge to its baseline
    pub const BASELINE_OFFSET: f32 = 100.0;

    /// Piece dimensions
    pub const COIN_RADIUS: f32 = 15.0;
    pub const COIN_MASS: f32 = 1.0;
    pub const STRIKER_RADIUS: f32 = 22.0;
    pub const STRIKER_MASS: f32 = 2.0;

    /// Starting rack rings, as multiples of the coin radius
    pub const INNER_RING_FACTOR: f32 = 2.1;
    pub const OUTER_RING_FACTOR: f32 = 4.1;

    /// Velocity multiplier applied every tick
    pub const FRICTION: f32 = 0.985;
    /// Wall bounce keeps this fraction of the normal velocity
    pub const WALL_DAMPING: f32 = 0.6;
    /// Piece-piece bounciness
    pub const RESTITUTION: f32 = 0.8;
    /// Below this speed a piece is considered at rest
    pub const REST_SPEED: f32 = 0.1;
    /// Pair distances below this are treated as coincident
    pub const DEGENERATE_DISTANCE: f32 = 1.0e-4;

    /// Shots slower than this are ignored
    pub const MIN_SHOT_SPEED: f32 = 0.5;
    /// Drag gestures shorter than this commit nothing
    pub const MIN_DRAG: f32 = 10.0;
    /// Drag distance that maps to full power
    pub const MAX_DRAG: f32 = 150.0;
    /// Striker speed at full drag
    pub const MAX_SHOT_POWER: f32 = 30.0;
    /// Drags must start this close to the striker center
    pub const STRIKER_GRAB_RADIUS: f32 = STRIKER_RADIUS * 2.0;

    /// Coins of each color on the board
    pub const COINS_PER_COLOR: u32 = 9;

    /// Undrained events kept per queue before the oldest are dropped
    pub const EVENT_BACKLOG: usize = 256;

    /// Computer "thinking" delay before it shoots (1 second)
    pub const PLANNER_DELAY_TICKS: u32 = TICK_HZ;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

